mod memory;
mod rest;

use std::future::Future;

pub use self::{memory::MemoryGateway, rest::RestGateway};

use crate::{
    error::Result,
    model::{AuthResponse, Category, Comment, NewComment, NewPost, Post, PostPatch, User},
};

/// 远程数据网关
///
/// 把文章、分类、评论和认证操作映射到后端的表接口。每个操作只发起一次请求，
/// 不重试，不缓存；失败时返回带有后端错误详情的 [`crate::error::RemoteError`]，
/// 未配置后端时返回 [`crate::error::Error::Configuration`]。
pub trait Gateway: Send + Sync {
    /// 所有文章，按发布时间倒序
    fn list_posts(&self) -> impl Future<Output = Result<Vec<Post>>> + Send;

    /// 按 slug 查询单篇文章
    ///
    /// 没有匹配或匹配多行都视为失败。
    fn post_by_slug(&self, slug: &str) -> impl Future<Output = Result<Post>> + Send;

    /// 指定分类 slug 下的文章，按发布时间倒序
    fn posts_by_category(
        &self,
        category_slug: &str,
    ) -> impl Future<Output = Result<Vec<Post>>> + Send;

    /// 插入文章，返回插入后的记录
    fn create_post(&self, post: &NewPost) -> impl Future<Output = Result<Post>> + Send;

    /// 按 slug 更新文章，返回更新后的记录
    fn update_post(
        &self,
        slug: &str,
        patch: &PostPatch,
    ) -> impl Future<Output = Result<Vec<Post>>> + Send;

    /// 按 slug 删除文章
    fn delete_post(&self, slug: &str) -> impl Future<Output = Result<()>> + Send;

    /// 所有分类
    fn list_categories(&self) -> impl Future<Output = Result<Vec<Category>>> + Send;

    /// 按 slug 查询单个分类
    fn category_by_slug(&self, slug: &str) -> impl Future<Output = Result<Category>> + Send;

    /// 文章的评论，按创建时间正序
    fn comments_for_post(&self, post_id: &str)
    -> impl Future<Output = Result<Vec<Comment>>> + Send;

    /// 插入评论，返回插入后的记录
    fn create_comment(&self, comment: &NewComment) -> impl Future<Output = Result<Comment>> + Send;

    /// 按 id 删除评论
    fn delete_comment(&self, id: &str) -> impl Future<Output = Result<()>> + Send;

    /// 邮箱密码注册
    fn sign_up(
        &self,
        email: &str,
        password: &str,
    ) -> impl Future<Output = Result<AuthResponse>> + Send;

    /// 邮箱密码登录
    fn sign_in(
        &self,
        email: &str,
        password: &str,
    ) -> impl Future<Output = Result<AuthResponse>> + Send;

    /// 注销会话
    fn sign_out(&self, access_token: &str) -> impl Future<Output = Result<()>> + Send;

    /// 当前用户
    ///
    /// 令牌无效或请求失败都返回 `None`，只有未配置后端时返回错误。
    fn current_user(&self, access_token: &str) -> impl Future<Output = Result<Option<User>>> + Send;
}

/// 单行查询失败时后端使用的错误码
pub const SINGLE_ROW_CODE: &str = "PGRST116";
