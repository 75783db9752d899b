//! 页面头部元数据。
//!
//! [`Head`] 是 `<head>` 的文档模型，[`Seo`] 把一次页面的元数据写进去。
//! 写入是 upsert：同一个键已存在时原地更新，不会重复追加。

use html_escape::encode_double_quoted_attribute as attr;

use crate::config::SiteConfig;

/// meta 标签的键类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetaKey {
    /// `<meta name="...">`
    Name,
    /// `<meta property="...">`
    Property,
}

impl MetaKey {
    fn attribute(self) -> &'static str {
        match self {
            MetaKey::Name => "name",
            MetaKey::Property => "property",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetaTag {
    pub kind: MetaKey,
    pub key: String,
    pub content: String,
}

/// `<head>` 文档模型，标签按首次插入的顺序输出
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Head {
    pub title: String,
    meta: Vec<MetaTag>,
    canonical: Option<String>,
}

impl Head {
    pub fn new() -> Self {
        Self::default()
    }

    /// 设置 meta 标签，已存在则更新内容
    pub fn upsert_meta(&mut self, kind: MetaKey, key: &str, content: &str) {
        match self.meta.iter_mut().find(|m| m.kind == kind && m.key == key) {
            Some(tag) => tag.content = content.to_string(),
            None => self.meta.push(MetaTag {
                kind,
                key: key.to_string(),
                content: content.to_string(),
            }),
        }
    }

    pub fn set_canonical(&mut self, href: &str) {
        self.canonical = Some(href.to_string());
    }

    pub fn meta(&self, kind: MetaKey, key: &str) -> Option<&str> {
        self.meta
            .iter()
            .find(|m| m.kind == kind && m.key == key)
            .map(|m| m.content.as_str())
    }

    pub fn tags(&self) -> &[MetaTag] {
        &self.meta
    }

    pub fn canonical(&self) -> Option<&str> {
        self.canonical.as_deref()
    }

    /// 输出 `<head>` 内部的 HTML
    pub fn render(&self) -> String {
        let mut out = format!(
            "<title>{}</title>\n",
            html_escape::encode_text(&self.title)
        );
        for tag in &self.meta {
            out.push_str(&format!(
                "<meta {}=\"{}\" content=\"{}\">\n",
                tag.kind.attribute(),
                attr(&tag.key),
                attr(&tag.content)
            ));
        }
        if let Some(href) = &self.canonical {
            out.push_str(&format!("<link rel=\"canonical\" href=\"{}\">\n", attr(href)));
        }
        out
    }
}

/// 单个页面的 SEO 属性，未设置的字段使用站点默认值
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Seo {
    pub title: String,
    pub description: String,
    pub image: String,
    pub url: String,
    pub kind: String,
    pub twitter_card: String,
    pub twitter_site: String,
    pub twitter_creator: String,
    pub canonical: Option<String>,
}

impl Seo {
    /// 站点级默认值，`path` 为当前页面的站内路径
    pub fn for_site(site: &SiteConfig, path: &str) -> Self {
        Self {
            title: format!("{} | {}", site.name, site.tagline),
            description: site.description.clone(),
            image: site.default_image.clone(),
            url: site.absolute_url(path),
            kind: "website".to_string(),
            twitter_card: "summary_large_image".to_string(),
            twitter_site: site.twitter_site.clone(),
            twitter_creator: site.twitter_creator.clone(),
            canonical: None,
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// 空字符串保留默认图片
    pub fn image(mut self, image: &str) -> Self {
        if !image.is_empty() {
            self.image = image.to_string();
        }
        self
    }

    pub fn kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = kind.into();
        self
    }

    /// 写入文档模型，canonical 未指定时使用页面地址
    pub fn apply(&self, head: &mut Head) {
        use MetaKey::{Name, Property};

        head.title = self.title.clone();
        head.upsert_meta(Name, "description", &self.description);

        head.upsert_meta(Property, "og:title", &self.title);
        head.upsert_meta(Property, "og:description", &self.description);
        head.upsert_meta(Property, "og:image", &self.image);
        head.upsert_meta(Property, "og:url", &self.url);
        head.upsert_meta(Property, "og:type", &self.kind);

        head.upsert_meta(Property, "twitter:card", &self.twitter_card);
        head.upsert_meta(Property, "twitter:site", &self.twitter_site);
        head.upsert_meta(Property, "twitter:creator", &self.twitter_creator);
        head.upsert_meta(Property, "twitter:title", &self.title);
        head.upsert_meta(Property, "twitter:description", &self.description);
        head.upsert_meta(Property, "twitter:image", &self.image);

        head.set_canonical(self.canonical.as_deref().unwrap_or(&self.url));
    }
}
