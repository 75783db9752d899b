use std::fmt;

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::{model::NewPost, slug::slugify};

/// 新建文章表单提交的原始字段。
///
/// 字段名与表单控件的 `name` 一致，缺失的字段按空字符串处理。
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct NewPostForm {
    pub title: String,
    pub content: String,
    pub excerpt: String,
    pub featured_image: String,
    pub category_id: String,
}

/// 单个字段的校验失败信息。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: &'static str,
}

/// 表单校验失败，每个不合法字段一条消息。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// 指定字段的错误消息
    pub fn message_for(&self, field: &str) -> Option<&'static str> {
        self.0.iter().find(|e| e.field == field).map(|e| e.message)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    fn push(&mut self, field: &'static str, message: &'static str) {
        self.0.push(FieldError { field, message });
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for e in &self.0 {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", e.field, e.message)?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

const TITLE_MIN: usize = 5;
const CONTENT_MIN: usize = 50;
const EXCERPT_MIN: usize = 10;

impl NewPostForm {
    /// 校验表单字段。
    ///
    /// 规则：标题至少 5 个字符，正文至少 50 个字符，摘要至少 10 个字符，
    /// 配图必须是合法的绝对 URL，必须选择分类。长度按字符计，不做 trim。
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::default();

        if self.title.chars().count() < TITLE_MIN {
            errors.push("title", "Title must be at least 5 characters");
        }
        if self.content.chars().count() < CONTENT_MIN {
            errors.push("content", "Content must be at least 50 characters");
        }
        if self.excerpt.chars().count() < EXCERPT_MIN {
            errors.push("excerpt", "Excerpt must be at least 10 characters");
        }
        if url::Url::parse(&self.featured_image).is_err() {
            errors.push("featured_image", "Must be a valid URL");
        }
        if self.category_id.is_empty() {
            errors.push("category_id", "Please select a category");
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }

    /// 校验通过后生成待插入的文章。
    ///
    /// slug 由标题计算，只在创建时生成一次，不检查重复。
    /// 标题里没有任何 ASCII 字母数字时退化为 `post-<时间戳>`。
    pub fn into_new_post(
        self,
        author_id: Option<String>,
        now: DateTime<Utc>,
    ) -> Result<NewPost, ValidationErrors> {
        self.validate()?;

        let mut slug = slugify(&self.title);
        if slug.is_empty() {
            slug = format!("post-{}", now.timestamp());
        }

        Ok(NewPost {
            slug,
            title: self.title,
            content: self.content,
            excerpt: self.excerpt,
            featured_image: self.featured_image,
            category_id: self.category_id,
            author_id,
            published_at: now,
        })
    }
}
