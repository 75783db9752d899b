//! 服务端渲染的页面组件。
//!
//! 每个组件都是 `props -> String` 的纯函数，props 实现 [`Default`]，
//! 默认值即组件的占位内容。文本统一转义，文章正文经过清洗后再嵌入。

pub mod banner;
pub mod blog;
pub mod category;
pub mod form;
pub mod layout;
pub mod pages;

use std::{borrow::Cow, sync::LazyLock};

use chrono::{DateTime, Utc};
use regex::Regex;

use crate::{config::SiteConfig, theme::Theme};

pub use self::layout::render_document;

/// 阅读速度，单词每分钟
const WORDS_PER_MINUTE: usize = 200;

static TAGS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").expect("valid regex"));

/// 一次渲染所需的请求上下文
#[derive(Debug, Clone, Copy)]
pub struct PageContext<'a> {
    pub theme: Theme,
    pub site: &'a SiteConfig,
    /// 当前请求的站内路径
    pub path: &'a str,
}

/// 转义文本节点
pub(crate) fn esc(text: &str) -> Cow<'_, str> {
    html_escape::encode_text(text)
}

/// 转义双引号属性值
pub(crate) fn attr(value: &str) -> Cow<'_, str> {
    html_escape::encode_double_quoted_attribute(value)
}

/// 清洗文章 HTML，去掉脚本和事件属性
pub fn sanitize(html: &str) -> String {
    ammonia::clean(html)
}

/// `Month D, YYYY`，没有日期时为空
pub fn format_date(date: Option<DateTime<Utc>>) -> String {
    date.map(|d| d.format("%B %-d, %Y").to_string())
        .unwrap_or_default()
}

/// 按 200 词每分钟估算阅读时间，最少 1 分钟
pub fn read_minutes(content: &str) -> usize {
    let text = TAGS.replace_all(content, " ");
    let words = text.split_whitespace().count();
    words.div_ceil(WORDS_PER_MINUTE).max(1)
}

pub fn read_time(content: &str) -> String {
    format!("{} min read", read_minutes(content))
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_format_date() {
        let date = Utc.with_ymd_and_hms(2023, 4, 5, 10, 0, 0).single();
        assert_eq!(format_date(date), "April 5, 2023");
        assert_eq!(format_date(None), "");
    }

    #[test]
    fn test_read_time() {
        assert_eq!(read_minutes(""), 1);
        assert_eq!(read_minutes(&"word ".repeat(200)), 1);
        assert_eq!(read_minutes(&"word ".repeat(201)), 2);
        // 标签不计入单词
        assert_eq!(read_minutes("<p>one</p><p>two</p>"), 1);
        assert_eq!(read_time(&"w ".repeat(1000)), "5 min read");
    }

    #[test]
    fn test_sanitize_strips_scripts() {
        let html = sanitize(r#"<p onclick="x()">hi</p><script>alert(1)</script>"#);
        assert_eq!(html, "<p>hi</p>");
    }
}
