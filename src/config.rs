use std::{env, path::Path};

use serde::Deserialize;

use crate::error::Result;

/// 后端连接信息
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendConfig {
    /// 后端地址，例如 `https://xyz.supabase.co`
    pub url: String,
    /// 公开的匿名密钥
    pub anon_key: String,
}

/// 站点信息，用于页面外壳和 SEO 默认值。
///
/// 所有字段都有默认值，配置文件只需写需要覆盖的部分。
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub name: String,
    pub tagline: String,
    pub description: String,
    /// 站点根地址，用于生成 `og:url` 和 canonical 链接，不带末尾 `/`
    pub base_url: String,
    pub default_image: String,
    pub twitter_site: String,
    pub twitter_creator: String,
    /// 新建文章时使用的作者 id，未设置时不发送
    pub default_author_id: Option<String>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            name: "BlogMaster".to_string(),
            tagline: "Modern Blog Platform".to_string(),
            description: "A modern blog platform focused on delivering high-quality content with an exceptional user experience and SEO optimization.".to_string(),
            base_url: "https://blogmaster.com".to_string(),
            default_image: "https://images.unsplash.com/photo-1555066931-4365d14bab8c?w=1200&q=80".to_string(),
            twitter_site: "@blogmaster".to_string(),
            twitter_creator: "@blogmaster".to_string(),
            default_author_id: None,
        }
    }
}

impl SiteConfig {
    /// 从 TOML 文件加载
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let mut site: SiteConfig = toml::from_str(content)?;
        site.base_url = site.base_url.trim_end_matches('/').to_string();
        Ok(site)
    }

    /// 站内路径对应的完整地址
    pub fn absolute_url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

/// 应用配置
#[derive(Debug, Clone)]
pub struct Config {
    /// 未配置时网关被禁用
    pub backend: Option<BackendConfig>,
    pub listen_addr: String,
    pub site: SiteConfig,
}

const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:3000";

impl Config {
    /// 从环境变量读取配置
    ///
    /// - `SUPABASE_URL` / `SUPABASE_ANON_KEY`：后端地址和公钥，缺任何一个都禁用网关
    /// - `BLOGMASTER_ADDR`：监听地址，默认 `0.0.0.0:3000`
    /// - `BLOGMASTER_SITE`：可选的站点 TOML 配置文件路径
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// 从任意键值来源读取配置，便于测试
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let backend = match (non_empty("SUPABASE_URL"), non_empty("SUPABASE_ANON_KEY")) {
            (Some(url), Some(anon_key)) => Some(BackendConfig { url, anon_key }),
            _ => None,
        };

        let site = match non_empty("BLOGMASTER_SITE") {
            Some(path) => SiteConfig::from_file(path)?,
            None => SiteConfig::default(),
        };

        Ok(Self {
            backend,
            listen_addr: non_empty("BLOGMASTER_ADDR")
                .unwrap_or_else(|| DEFAULT_LISTEN_ADDR.to_string()),
            site,
        })
    }
}
