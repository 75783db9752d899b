use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

/// 保存主题的 cookie 名
pub const THEME_COOKIE: &str = "theme";

/// 页面主题
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// 解析 cookie 值，未知值按浅色处理
    pub fn parse(value: &str) -> Self {
        match value {
            "dark" => Theme::Dark,
            _ => Theme::Light,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn toggle(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn is_dark(self) -> bool {
        self == Theme::Dark
    }

    /// 根元素上的 class
    pub fn html_class(self) -> &'static str {
        if self.is_dark() { "dark" } else { "" }
    }

    pub fn from_jar(jar: &CookieJar) -> Self {
        jar.get(THEME_COOKIE)
            .map(|c| Theme::parse(c.value()))
            .unwrap_or_default()
    }

    /// 写入 cookie 后的新 jar
    pub fn store(self, jar: CookieJar) -> CookieJar {
        let cookie = Cookie::build((THEME_COOKIE, self.as_str()))
            .path("/")
            .same_site(SameSite::Lax)
            .permanent()
            .build();
        jar.add(cookie)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_toggle() {
        assert_eq!(Theme::parse("dark"), Theme::Dark);
        assert_eq!(Theme::parse("light"), Theme::Light);
        assert_eq!(Theme::parse("solarized"), Theme::Light);
        assert_eq!(Theme::Light.toggle().toggle(), Theme::Light);
        assert_eq!(Theme::Dark.html_class(), "dark");
        assert_eq!(Theme::Light.html_class(), "");
    }

    #[test]
    fn test_cookie_round_trip() {
        let jar = CookieJar::new();
        assert_eq!(Theme::from_jar(&jar), Theme::Light);

        let jar = Theme::Dark.store(jar);
        assert_eq!(Theme::from_jar(&jar), Theme::Dark);

        let jar = Theme::from_jar(&jar).toggle().store(jar);
        assert_eq!(Theme::from_jar(&jar), Theme::Light);
    }
}
