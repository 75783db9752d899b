use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use chrono::Utc;

use super::{Gateway, SINGLE_ROW_CODE};
use crate::{
    error::{RemoteError, Result},
    model::{
        AuthResponse, Category, CategoryRef, Comment, NewComment, NewPost, Post, PostPatch,
        Session, User,
    },
};

/// 进程内的 [`Gateway`] 实现。
///
/// 行为与远程后端保持一致：单行查询 0 行或多行时失败，slug 唯一，
/// 分类过滤通过分类 slug 关联。支持按操作注入失败，主要用于测试。
#[derive(Clone, Default)]
pub struct MemoryGateway {
    tables: Arc<Mutex<Tables>>,
}

#[derive(Default)]
struct Tables {
    posts: Vec<Post>,
    categories: Vec<Category>,
    comments: Vec<Comment>,
    users: Vec<(User, String)>,
    sessions: HashMap<String, String>,
    next_id: u64,
    /// 操作名 -> 注入的错误，`*` 匹配所有操作
    failures: HashMap<&'static str, RemoteError>,
    calls: Vec<&'static str>,
}

impl Tables {
    fn next_id(&mut self) -> String {
        self.next_id += 1;
        format!("mem-{}", self.next_id)
    }

    /// 记录调用并检查是否注入了失败
    fn enter(&mut self, op: &'static str) -> Result<()> {
        self.calls.push(op);
        match self.failures.get(op).or_else(|| self.failures.get("*")) {
            Some(e) => Err(e.clone().into()),
            None => Ok(()),
        }
    }

    /// 模拟后端对 `categories` 的展开
    fn expand(&self, mut post: Post) -> Post {
        if post.category.is_none() {
            post.category = post.category_id.as_ref().and_then(|id| {
                self.categories
                    .iter()
                    .find(|c| &c.id == id)
                    .map(|c| CategoryRef {
                        name: c.name.clone(),
                        slug: c.slug.clone(),
                    })
            });
        }
        post
    }

    fn sorted_posts<'a>(&self, posts: impl Iterator<Item = &'a Post>) -> Vec<Post> {
        let mut posts: Vec<Post> = posts.cloned().map(|p| self.expand(p)).collect();
        // 新的在前，没有发布时间的排在最后
        posts.sort_by(|a, b| b.published_at.cmp(&a.published_at));
        posts
    }

    fn session_for(&mut self, user: &User) -> Session {
        let token = format!("token-{}", self.next_id());
        self.sessions.insert(token.clone(), user.id.clone());
        Session {
            access_token: token,
            refresh_token: None,
            expires_in: Some(3600),
            user: Some(user.clone()),
        }
    }
}

fn single_row<T>(mut rows: Vec<T>) -> Result<T> {
    if rows.len() == 1 {
        if let Some(row) = rows.pop() {
            return Ok(row);
        }
    }
    Err(RemoteError::new("JSON object requested, multiple (or no) rows returned")
        .with_status(406)
        .with_code(SINGLE_ROW_CODE)
        .with_details(format!("The result contains {} rows", rows.len()))
        .into())
}

impl MemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn with_category(self, category: Category) -> Self {
        self.lock().categories.push(category);
        self
    }

    pub fn with_post(self, post: Post) -> Self {
        self.lock().posts.push(post);
        self
    }

    /// 让指定操作返回错误，`op` 为 [`Gateway`] 的方法名，`*` 表示所有操作
    pub fn fail(&self, op: &'static str, error: RemoteError) {
        self.lock().failures.insert(op, error);
    }

    /// 清除所有注入的失败
    pub fn recover(&self) {
        self.lock().failures.clear();
    }

    /// 已经发生的调用，按顺序
    pub fn calls(&self) -> Vec<&'static str> {
        self.lock().calls.clone()
    }

    pub fn posts(&self) -> Vec<Post> {
        self.lock().posts.clone()
    }
}

impl Gateway for MemoryGateway {
    async fn list_posts(&self) -> Result<Vec<Post>> {
        let mut t = self.lock();
        t.enter("list_posts")?;
        Ok(t.sorted_posts(t.posts.iter()))
    }

    async fn post_by_slug(&self, slug: &str) -> Result<Post> {
        let mut t = self.lock();
        t.enter("post_by_slug")?;
        let rows: Vec<Post> = t
            .posts
            .iter()
            .filter(|p| p.slug == slug)
            .cloned()
            .map(|p| t.expand(p))
            .collect();
        single_row(rows)
    }

    async fn posts_by_category(&self, category_slug: &str) -> Result<Vec<Post>> {
        let mut t = self.lock();
        t.enter("posts_by_category")?;
        let ids: Vec<&str> = t
            .categories
            .iter()
            .filter(|c| c.slug == category_slug)
            .map(|c| c.id.as_str())
            .collect();
        Ok(t.sorted_posts(
            t.posts
                .iter()
                .filter(|p| p.category_id.as_deref().is_some_and(|id| ids.contains(&id))),
        ))
    }

    async fn create_post(&self, post: &NewPost) -> Result<Post> {
        let mut t = self.lock();
        t.enter("create_post")?;
        if t.posts.iter().any(|p| p.slug == post.slug) {
            return Err(RemoteError::new(
                "duplicate key value violates unique constraint \"posts_slug_key\"",
            )
            .with_status(409)
            .with_code("23505")
            .into());
        }

        let row = Post {
            id: t.next_id(),
            title: post.title.clone(),
            slug: post.slug.clone(),
            excerpt: post.excerpt.clone(),
            content: post.content.clone(),
            featured_image: Some(post.featured_image.clone()),
            category_id: Some(post.category_id.clone()),
            author_id: post.author_id.clone(),
            published_at: Some(post.published_at),
            author: None,
            category: None,
        };
        t.posts.push(row.clone());
        Ok(t.expand(row))
    }

    async fn update_post(&self, slug: &str, patch: &PostPatch) -> Result<Vec<Post>> {
        let mut t = self.lock();
        t.enter("update_post")?;
        let mut updated = Vec::new();
        for post in t.posts.iter_mut().filter(|p| p.slug == slug) {
            if let Some(title) = &patch.title {
                post.title = title.clone();
            }
            if let Some(content) = &patch.content {
                post.content = content.clone();
            }
            if let Some(excerpt) = &patch.excerpt {
                post.excerpt = excerpt.clone();
            }
            if let Some(image) = &patch.featured_image {
                post.featured_image = Some(image.clone());
            }
            if let Some(category_id) = &patch.category_id {
                post.category_id = Some(category_id.clone());
                post.category = None;
            }
            updated.push(post.clone());
        }
        Ok(updated.into_iter().map(|p| t.expand(p)).collect())
    }

    async fn delete_post(&self, slug: &str) -> Result<()> {
        let mut t = self.lock();
        t.enter("delete_post")?;
        t.posts.retain(|p| p.slug != slug);
        Ok(())
    }

    async fn list_categories(&self) -> Result<Vec<Category>> {
        let mut t = self.lock();
        t.enter("list_categories")?;
        Ok(t.categories.clone())
    }

    async fn category_by_slug(&self, slug: &str) -> Result<Category> {
        let mut t = self.lock();
        t.enter("category_by_slug")?;
        single_row(
            t.categories
                .iter()
                .filter(|c| c.slug == slug)
                .cloned()
                .collect(),
        )
    }

    async fn comments_for_post(&self, post_id: &str) -> Result<Vec<Comment>> {
        let mut t = self.lock();
        t.enter("comments_for_post")?;
        let mut comments: Vec<Comment> = t
            .comments
            .iter()
            .filter(|c| c.post_id == post_id)
            .cloned()
            .collect();
        comments.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(comments)
    }

    async fn create_comment(&self, comment: &NewComment) -> Result<Comment> {
        let mut t = self.lock();
        t.enter("create_comment")?;
        let row = Comment {
            id: t.next_id(),
            post_id: comment.post_id.clone(),
            user_id: Some(comment.user_id.clone()),
            content: comment.content.clone(),
            created_at: Some(Utc::now()),
            author: None,
        };
        t.comments.push(row.clone());
        Ok(row)
    }

    async fn delete_comment(&self, id: &str) -> Result<()> {
        let mut t = self.lock();
        t.enter("delete_comment")?;
        t.comments.retain(|c| c.id != id);
        Ok(())
    }

    async fn sign_up(&self, email: &str, password: &str) -> Result<AuthResponse> {
        let mut t = self.lock();
        t.enter("sign_up")?;
        if t.users.iter().any(|(u, _)| u.email.as_deref() == Some(email)) {
            return Err(RemoteError::new("User already registered")
                .with_status(422)
                .into());
        }
        let user = User {
            id: t.next_id(),
            email: Some(email.to_string()),
        };
        t.users.push((user.clone(), password.to_string()));
        Ok(t.session_for(&user).into())
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthResponse> {
        let mut t = self.lock();
        t.enter("sign_in")?;
        let user = t
            .users
            .iter()
            .find(|(u, p)| u.email.as_deref() == Some(email) && p == password)
            .map(|(u, _)| u.clone());
        match user {
            Some(user) => Ok(t.session_for(&user).into()),
            None => Err(RemoteError::new("Invalid login credentials")
                .with_status(400)
                .with_code("invalid_grant")
                .into()),
        }
    }

    async fn sign_out(&self, access_token: &str) -> Result<()> {
        let mut t = self.lock();
        t.enter("sign_out")?;
        t.sessions.remove(access_token);
        Ok(())
    }

    async fn current_user(&self, access_token: &str) -> Result<Option<User>> {
        let mut t = self.lock();
        if t.enter("current_user").is_err() {
            return Ok(None);
        }
        let Some(user_id) = t.sessions.get(access_token) else {
            return Ok(None);
        };
        Ok(t.users
            .iter()
            .find(|(u, _)| &u.id == user_id)
            .map(|(u, _)| u.clone()))
    }
}
