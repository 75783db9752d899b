use axum::{
    Router,
    http::{HeaderMap, header::REFERER},
    response::Redirect,
    routing::post,
};
use axum_extra::extract::CookieJar;

use crate::{gateway::Gateway, state::AppState, theme::Theme};

/// 配置主题切换路由：`POST /theme`
pub fn setup_route<G: Gateway + 'static>() -> Router<AppState<G>> {
    Router::new().route("/theme", post(toggle))
}

/// 只接受以单个 `/` 开头的站内路径，`//host` 和 `/\host` 会被浏览器当作其他站点
fn is_local_path(path: &str) -> bool {
    let mut chars = path.chars();
    chars.next() == Some('/') && !matches!(chars.next(), Some('/' | '\\'))
}

/// 从 `Referer` 中取站内路径，取不到时回到首页
fn back_path(headers: &HeaderMap) -> String {
    headers
        .get(REFERER)
        .and_then(|v| v.to_str().ok())
        .and_then(|referer| {
            if referer.starts_with('/') {
                return Some(referer.to_string());
            }
            let url = url::Url::parse(referer).ok()?;
            let mut path = url.path().to_string();
            if let Some(query) = url.query() {
                path.push('?');
                path.push_str(query);
            }
            Some(path)
        })
        .filter(|path| is_local_path(path))
        .unwrap_or_else(|| "/".to_string())
}

/// 切换主题并跳转回来源页面
async fn toggle(jar: CookieJar, headers: HeaderMap) -> (CookieJar, Redirect) {
    let theme = Theme::from_jar(&jar).toggle();
    tracing::debug!(theme = theme.as_str(), "theme toggled");
    (theme.store(jar), Redirect::to(&back_path(&headers)))
}
