use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// 文章
///
/// 对应后端 `posts` 表的一行，附带展开的作者和分类信息。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    /// 文章唯一标识
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    /// 标题
    pub title: String,
    /// URL 中使用的唯一标识，创建时由标题生成
    pub slug: String,
    /// 摘要
    #[serde(default)]
    pub excerpt: String,
    /// HTML 正文片段
    #[serde(default)]
    pub content: String,
    /// 配图地址
    #[serde(default)]
    pub featured_image: Option<String>,
    #[serde(default, deserialize_with = "opt_id_string")]
    pub category_id: Option<String>,
    #[serde(default, deserialize_with = "opt_id_string")]
    pub author_id: Option<String>,
    /// 发布时间
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,

    /// 展开的作者信息，参见 [`AuthorRef`]
    #[serde(default, rename = "profiles", skip_serializing_if = "Option::is_none")]
    pub author: Option<AuthorRef>,
    /// 展开的分类信息，参见 [`CategoryRef`]
    #[serde(default, rename = "categories", skip_serializing_if = "Option::is_none")]
    pub category: Option<CategoryRef>,
}

impl Post {
    /// 作者展示名
    pub fn author_name(&self) -> &str {
        self.author
            .as_ref()
            .map(AuthorRef::display_name)
            .unwrap_or(AuthorRef::ANONYMOUS)
    }

    /// 分类展示名
    pub fn category_name(&self) -> Option<&str> {
        self.category.as_ref().map(|c| c.name.as_str())
    }
}

/// 作者信息，来自 `profiles` 表的展开
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorRef {
    pub username: Option<String>,
    pub full_name: Option<String>,
    pub avatar_url: Option<String>,
}

impl AuthorRef {
    const ANONYMOUS: &'static str = "Anonymous";

    /// 优先使用全名，其次用户名
    pub fn display_name(&self) -> &str {
        self.full_name
            .as_deref()
            .filter(|s| !s.is_empty())
            .or(self.username.as_deref().filter(|s| !s.is_empty()))
            .unwrap_or(Self::ANONYMOUS)
    }
}

/// 分类信息，来自 `categories` 表的展开
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRef {
    pub name: String,
    pub slug: String,
}

/// 分类
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    pub name: String,
    /// 分类页的唯一查询键
    pub slug: String,
    #[serde(default)]
    pub description: Option<String>,
    /// 代表图
    #[serde(default, alias = "image_url")]
    pub image: Option<String>,
}

/// 评论
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    #[serde(deserialize_with = "id_string")]
    pub post_id: String,
    #[serde(default, deserialize_with = "opt_id_string")]
    pub user_id: Option<String>,
    #[serde(default, alias = "body")]
    pub content: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default, rename = "profiles", skip_serializing_if = "Option::is_none")]
    pub author: Option<AuthorRef>,
}

/// 新建文章的插入数据
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewPost {
    pub title: String,
    pub slug: String,
    pub content: String,
    pub excerpt: String,
    pub featured_image: String,
    pub category_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_id: Option<String>,
    pub published_at: DateTime<Utc>,
}

/// 文章的部分更新，未设置的字段不会发送
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PostPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub featured_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
}

/// 新建评论的插入数据
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewComment {
    pub post_id: String,
    pub user_id: String,
    pub content: String,
}

/// 认证用户，只关心是否存在
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// 登录会话
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub expires_in: Option<u64>,
    #[serde(default)]
    pub user: Option<User>,
}

/// 注册或登录的结果
///
/// 需要邮箱确认时注册只返回用户，没有会话。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthResponse {
    pub user: Option<User>,
    pub session: Option<Session>,
}

impl From<Session> for AuthResponse {
    fn from(session: Session) -> Self {
        Self {
            user: session.user.clone(),
            session: Some(session),
        }
    }
}

impl From<User> for AuthResponse {
    fn from(user: User) -> Self {
        Self {
            user: Some(user),
            session: None,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Str(String),
    Int(i64),
    Uint(u64),
}

impl From<RawId> for String {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Str(s) => s,
            RawId::Int(i) => i.to_string(),
            RawId::Uint(u) => u.to_string(),
        }
    }
}

/// 后端的主键可能是 uuid 字符串也可能是整数，统一成字符串
fn id_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    RawId::deserialize(deserializer).map(Into::into)
}

fn opt_id_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<RawId>::deserialize(deserializer).map(|id| id.map(Into::into))
}
