use std::sync::Arc;

use crate::{config::SiteConfig, gateway::Gateway};

/// 应用程序上下文
///
/// [`AppState`] 持有数据网关和站点配置，所有处理函数共享同一份。
pub struct AppState<G> {
    gateway: Arc<G>,
    site: Arc<SiteConfig>,
}

impl<G> Clone for AppState<G> {
    fn clone(&self) -> Self {
        Self {
            gateway: self.gateway.clone(),
            site: self.site.clone(),
        }
    }
}

impl<G: Gateway> AppState<G> {
    /// 创建一个新的 [`AppState`] 实例
    pub fn new(gateway: G, site: SiteConfig) -> Self {
        Self {
            gateway: Arc::new(gateway),
            site: Arc::new(site),
        }
    }

    /// 获取数据网关
    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    /// 获取站点配置
    pub fn site(&self) -> &SiteConfig {
        &self.site
    }
}
