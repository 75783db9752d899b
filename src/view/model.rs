use std::future::Future;

use crate::error::Error;

/// 页面数据的三种状态
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Loadable<T> {
    /// 初始状态，请求尚未返回
    #[default]
    Loading,
    Ready(T),
    /// 请求失败，携带展示给用户的消息
    Failed(String),
}

impl<T> Loadable<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, Loadable::Loading)
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            Loadable::Ready(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Loadable::Failed(msg) => Some(msg),
            _ => None,
        }
    }
}

/// 展示内容的来源
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentSource {
    /// 来自后端的真实数据
    Live,
    /// 占位示例内容，`reason` 说明为什么没有展示真实数据
    Sample { reason: String },
}

impl ContentSource {
    pub fn is_sample(&self) -> bool {
        matches!(self, ContentSource::Sample { .. })
    }
}

/// 页面最终展示的数据，明确标注是否为占位内容
#[derive(Debug, Clone, PartialEq)]
pub struct Shown<T> {
    pub data: T,
    pub source: ContentSource,
}

impl<T> Shown<T> {
    pub fn live(data: T) -> Self {
        Self {
            data,
            source: ContentSource::Live,
        }
    }

    pub fn sample(data: T, reason: impl Into<String>) -> Self {
        Self {
            data,
            source: ContentSource::Sample {
                reason: reason.into(),
            },
        }
    }
}

/// 请求标识，每次参数变化单调递增
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RequestToken(u64);

/// 单个页面实例的数据状态机。
///
/// 路由参数第一次可用或发生变化时重置为 [`Loading`](Loadable::Loading)
/// 并发出新的 [`RequestToken`]；只有携带最新令牌的结果会被采纳，
/// 旧请求晚到的结果直接丢弃。
#[derive(Debug)]
pub struct PageModel<P, T> {
    param: Option<P>,
    latest: u64,
    state: Loadable<T>,
}

impl<P, T> Default for PageModel<P, T> {
    fn default() -> Self {
        Self {
            param: None,
            latest: 0,
            state: Loadable::Loading,
        }
    }
}

impl<P: PartialEq, T> PageModel<P, T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// 设置路由参数。
    ///
    /// 返回 `Some(token)` 表示需要发起一次请求；参数未变化返回 `None`。
    pub fn set_param(&mut self, param: P) -> Option<RequestToken> {
        if self.param.as_ref() == Some(&param) {
            return None;
        }
        self.param = Some(param);
        self.latest += 1;
        self.state = Loadable::Loading;
        Some(RequestToken(self.latest))
    }

    /// 采纳请求结果，旧令牌的结果被丢弃并返回 `false`
    pub fn resolve(&mut self, token: RequestToken, result: Result<T, String>) -> bool {
        if token.0 != self.latest {
            tracing::debug!(token = token.0, latest = self.latest, "discarding stale response");
            return false;
        }
        self.state = match result {
            Ok(data) => Loadable::Ready(data),
            Err(msg) => Loadable::Failed(msg),
        };
        true
    }

    pub fn param(&self) -> Option<&P> {
        self.param.as_ref()
    }

    pub fn state(&self) -> &Loadable<T> {
        &self.state
    }

    /// 当前应展示的内容，未就绪或失败时使用 `fallback` 并标注为示例
    pub fn content(&self, fallback: impl FnOnce() -> T) -> Shown<T>
    where
        T: Clone,
    {
        match &self.state {
            Loadable::Ready(data) => Shown::live(data.clone()),
            Loadable::Failed(msg) => Shown::sample(fallback(), msg.clone()),
            Loadable::Loading => Shown::sample(fallback(), "Loading..."),
        }
    }
}

impl<P: PartialEq + AsRef<str>, T> PageModel<P, T> {
    /// 与 [`set_param`](Self::set_param) 相同，但空字符串参数不会触发请求
    pub fn set_route_param(&mut self, param: P) -> Option<RequestToken> {
        if param.as_ref().is_empty() {
            return None;
        }
        self.set_param(param)
    }
}

/// 执行一次页面请求：设置参数、等待结果、采纳结果。
///
/// 失败时记录日志，状态中保存 `failure` 消息而不是后端的原始错误。
pub async fn load<'m, P, T, F, Fut>(
    model: &'m mut PageModel<P, T>,
    param: P,
    failure: &str,
    fetch: F,
) -> &'m Loadable<T>
where
    P: PartialEq + AsRef<str>,
    F: FnOnce(String) -> Fut,
    Fut: Future<Output = Result<T, Error>>,
{
    let Some(token) = model.set_route_param(param) else {
        return model.state();
    };

    let key = model.param().map(|p| p.as_ref().to_string()).unwrap_or_default();
    let result = fetch(key.clone()).await.map_err(|e| {
        tracing::error!(param = %key, error = %e, "{failure}");
        failure.to_string()
    });
    model.resolve(token, result);
    model.state()
}
