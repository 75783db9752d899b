use std::{fmt, io};

use axum::{http::StatusCode, response::IntoResponse};
use serde::Deserialize;

use crate::form::ValidationErrors;

pub type Result<T> = core::result::Result<T, Error>;

/// 后端调用失败时携带的错误详情。
///
/// 字段对应后端错误响应体中的 `code` / `message` / `details` / `hint`，
/// 传输层错误只有 `message`。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteError {
    /// HTTP 状态码，传输层失败时为空
    pub status: Option<u16>,
    /// 后端错误码，例如 `PGRST116`
    pub code: Option<String>,
    pub message: String,
    pub details: Option<String>,
    pub hint: Option<String>,
}

impl RemoteError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            status: None,
            code: None,
            message: message.into(),
            details: None,
            hint: None,
        }
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// 从后端的错误响应体构造。
    ///
    /// 表接口返回 `{code, message, details, hint}`，认证接口返回
    /// `{error, error_description}` 或 `{msg, code}`，都兼容处理。
    /// 无法解析时把原始响应体作为消息。
    pub fn from_body(status: u16, body: &str) -> Self {
        #[derive(Deserialize)]
        struct Body {
            code: Option<serde_json::Value>,
            message: Option<String>,
            msg: Option<String>,
            error: Option<String>,
            error_description: Option<String>,
            details: Option<String>,
            hint: Option<String>,
        }

        match serde_json::from_str::<Body>(body) {
            Ok(b) => {
                let message = b
                    .message
                    .or(b.msg)
                    .or(b.error_description)
                    .or_else(|| b.error.clone())
                    .unwrap_or_else(|| format!("backend returned status {status}"));
                let code = match b.code {
                    Some(serde_json::Value::String(s)) => Some(s),
                    Some(serde_json::Value::Number(n)) => Some(n.to_string()),
                    _ => b.error,
                };
                Self {
                    status: Some(status),
                    code,
                    message,
                    details: b.details,
                    hint: b.hint,
                }
            }
            Err(_) if body.trim().is_empty() => {
                Self::new(format!("backend returned status {status}")).with_status(status)
            }
            Err(_) => Self::new(body.trim()).with_status(status),
        }
    }
}

impl fmt::Display for RemoteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(code) = &self.code {
            write!(f, "[{code}] ")?;
        }
        f.write_str(&self.message)?;
        if let Some(details) = &self.details {
            write!(f, " ({details})")?;
        }
        Ok(())
    }
}

impl std::error::Error for RemoteError {}

impl From<reqwest::Error> for RemoteError {
    fn from(e: reqwest::Error) -> Self {
        let remote = RemoteError::new(e.to_string());
        match e.status() {
            Some(status) => remote.with_status(status.as_u16()),
            None => remote,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// 缺少后端地址或公钥，网关被禁用
    #[error("backend not configured: {0}")]
    Configuration(&'static str),

    #[error("remote call failed: {0}")]
    Remote(#[from] RemoteError),

    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    #[error(transparent)]
    Toml(#[from] toml::de::Error),

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::Remote(e.into())
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> axum::response::Response {
        match self {
            Error::Configuration(what) => {
                tracing::error!(what, "backend not configured");
                (StatusCode::SERVICE_UNAVAILABLE, "Service Unavailable")
            }
            .into_response(),
            Error::Remote(e) => {
                tracing::error!(%e, "remote error");
                (StatusCode::BAD_GATEWAY, "Bad Gateway")
            }
            .into_response(),
            Error::Validation(e) => (StatusCode::UNPROCESSABLE_ENTITY, e.to_string()).into_response(),
            Error::Toml(e) => {
                tracing::error!(%e, "config parse error");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
            }
            .into_response(),
            Error::Io(e) => {
                tracing::error!(%e, "file io error");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
            }
            .into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_error_from_rest_body() {
        let body = r#"{"code":"PGRST116","details":"The result contains 0 rows","hint":null,"message":"JSON object requested, multiple (or no) rows returned"}"#;
        let e = RemoteError::from_body(406, body);

        assert_eq!(e.status, Some(406));
        assert_eq!(e.code.as_deref(), Some("PGRST116"));
        assert_eq!(e.details.as_deref(), Some("The result contains 0 rows"));
        assert!(e.to_string().starts_with("[PGRST116] JSON object requested"));
    }

    #[test]
    fn test_remote_error_from_auth_body() {
        let body = r#"{"error":"invalid_grant","error_description":"Invalid login credentials"}"#;
        let e = RemoteError::from_body(400, body);

        assert_eq!(e.code.as_deref(), Some("invalid_grant"));
        assert_eq!(e.message, "Invalid login credentials");

        let e = RemoteError::from_body(422, r#"{"code":422,"msg":"User already registered"}"#);
        assert_eq!(e.code.as_deref(), Some("422"));
        assert_eq!(e.message, "User already registered");
    }

    #[test]
    fn test_remote_error_from_plain_body() {
        let e = RemoteError::from_body(500, "upstream exploded\n");
        assert_eq!(e.message, "upstream exploded");
        assert!(e.code.is_none());

        let e = RemoteError::from_body(503, "");
        assert_eq!(e.message, "backend returned status 503");
    }

    #[test]
    fn test_error_status_codes() {
        let resp = Error::Configuration("SUPABASE_URL").into_response();
        assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);

        let resp = Error::Remote(RemoteError::new("boom")).into_response();
        assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);

        let resp = Error::Io(io::Error::other("disk gone")).into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
