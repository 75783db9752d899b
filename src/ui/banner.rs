use super::esc;
use crate::view::ContentSource;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BannerKind {
    #[default]
    Error,
    Warning,
    /// 提示当前展示的是示例内容
    Sample,
}

impl BannerKind {
    fn class(self) -> &'static str {
        match self {
            BannerKind::Error => "banner banner-error",
            BannerKind::Warning => "banner banner-warning",
            BannerKind::Sample => "banner banner-sample",
        }
    }

    fn role(self) -> &'static str {
        match self {
            BannerKind::Error => "alert",
            BannerKind::Warning | BannerKind::Sample => "status",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BannerProps {
    pub kind: BannerKind,
    pub message: String,
}

impl Default for BannerProps {
    fn default() -> Self {
        Self {
            kind: BannerKind::Error,
            message: "Something went wrong.".to_string(),
        }
    }
}

/// 可关闭的行内提示
pub fn banner(props: &BannerProps) -> String {
    format!(
        r#"<div class="{}" role="{}"><p>{}</p><button type="button" class="banner-dismiss" aria-label="Dismiss" onclick="this.parentElement.remove()">&times;</button></div>"#,
        props.kind.class(),
        props.kind.role(),
        esc(&props.message)
    )
}

/// 页面错误提示，没有错误时为空
pub fn error_banner(error: Option<&str>) -> String {
    error
        .map(|message| {
            banner(&BannerProps {
                kind: BannerKind::Error,
                message: message.to_string(),
            })
        })
        .unwrap_or_default()
}

/// 示例内容提示，真实数据时为空。
///
/// 提示中带上原因；原因与页面错误相同时错误横幅已经展示过，不再重复。
pub fn sample_notice(source: &ContentSource, page_error: Option<&str>) -> String {
    let ContentSource::Sample { reason } = source else {
        return String::new();
    };
    let message = if reason.is_empty() || page_error == Some(reason.as_str()) {
        "Showing sample content.".to_string()
    } else {
        format!("Showing sample content. {reason}")
    };
    banner(&BannerProps {
        kind: BannerKind::Sample,
        message,
    })
}
