use axum::http::{HeaderMap, HeaderValue};
use reqwest::{RequestBuilder, header};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

use super::Gateway;
use crate::{
    config::BackendConfig,
    error::{Error, RemoteError, Result},
    model::{AuthResponse, Category, Comment, NewComment, NewPost, Post, PostPatch, Session, User},
};

/// 文章查询时展开作者和分类
const POST_SELECT: &str =
    "*,profiles:author_id(username,full_name,avatar_url),categories:category_id(name,slug)";

/// 按分类过滤时分类必须内连接，否则过滤只作用在展开的分类上，文章不会被过滤
const POST_BY_CATEGORY_SELECT: &str =
    "*,profiles:author_id(username,full_name,avatar_url),categories:category_id!inner(name,slug)";

const COMMENT_SELECT: &str = "*,profiles:user_id(username,full_name,avatar_url)";

/// 要求后端只返回一个对象，0 行或多行时返回 406
const SINGLE_OBJECT: &str = "application/vnd.pgrst.object+json";

const NOT_CONFIGURED: &str = "SUPABASE_URL and SUPABASE_ANON_KEY must be set";

/// 基于 HTTP 表接口的 [`Gateway`] 实现。
///
/// 未配置后端时所有调用直接返回 [`Error::Configuration`]，不发起请求。
#[derive(Clone)]
pub struct RestGateway {
    inner: Option<Inner>,
}

#[derive(Clone)]
struct Inner {
    client: reqwest::Client,
    base_url: String,
}

impl RestGateway {
    /// 使用后端地址和公钥创建网关
    ///
    /// `config` 为 `None` 时得到一个禁用的网关。
    pub fn new(config: Option<&BackendConfig>) -> Result<Self> {
        let Some(config) = config else {
            return Ok(Self::unconfigured());
        };

        let key = HeaderValue::from_str(&config.anon_key)
            .map_err(|_| Error::Configuration("SUPABASE_ANON_KEY is not a valid header value"))?;
        let bearer = HeaderValue::from_str(&format!("Bearer {}", config.anon_key))
            .map_err(|_| Error::Configuration("SUPABASE_ANON_KEY is not a valid header value"))?;

        let client = reqwest::Client::builder()
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .default_headers({
                let mut header = HeaderMap::new();
                header.insert("apikey", key);
                header.insert(header::AUTHORIZATION, bearer);
                header.insert(header::ACCEPT, HeaderValue::from_static("application/json"));
                header
            })
            .build()
            .map_err(RemoteError::from)?;

        Ok(Self {
            inner: Some(Inner {
                client,
                base_url: config.url.trim_end_matches('/').to_string(),
            }),
        })
    }

    /// 禁用的网关
    pub fn unconfigured() -> Self {
        Self { inner: None }
    }

    pub fn is_configured(&self) -> bool {
        self.inner.is_some()
    }

    fn inner(&self) -> Result<&Inner> {
        self.inner.as_ref().ok_or(Error::Configuration(NOT_CONFIGURED))
    }
}

impl Inner {
    fn table(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    fn auth(&self, path: &str) -> String {
        format!("{}/auth/v1/{}", self.base_url, path)
    }
}

fn eq(value: &str) -> String {
    format!("eq.{value}")
}

/// 发送请求并解析 JSON 响应
async fn fetch<T: DeserializeOwned>(req: RequestBuilder) -> Result<T> {
    let resp = req.send().await?;
    let status = resp.status();

    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        return Err(RemoteError::from_body(status.as_u16(), &body).into());
    }

    let bytes = resp.bytes().await?;
    serde_json::from_slice(&bytes).map_err(|e| {
        RemoteError::new(format!("unexpected response shape: {e}"))
            .with_status(status.as_u16())
            .into()
    })
}

/// 发送请求，忽略响应体
async fn execute(req: RequestBuilder) -> Result<()> {
    let resp = req.send().await?;
    let status = resp.status();

    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        return Err(RemoteError::from_body(status.as_u16(), &body).into());
    }
    Ok(())
}

/// 插入请求返回数组，取第一行
fn first_row<T>(rows: Vec<T>, table: &str) -> Result<T> {
    rows.into_iter().next().ok_or_else(|| {
        RemoteError::new(format!("insert into `{table}` returned no rows")).into()
    })
}

#[derive(Serialize)]
struct Credentials<'a> {
    email: &'a str,
    password: &'a str,
}

/// 注册接口在需要邮箱确认时只返回用户
#[derive(Deserialize)]
#[serde(untagged)]
enum SignUpBody {
    Session(Session),
    User(User),
}

impl Gateway for RestGateway {
    #[tracing::instrument(skip(self))]
    async fn list_posts(&self) -> Result<Vec<Post>> {
        let inner = self.inner()?;
        fetch(
            inner
                .client
                .get(inner.table("posts"))
                .query(&[("select", POST_SELECT), ("order", "published_at.desc")]),
        )
        .await
    }

    #[tracing::instrument(skip(self))]
    async fn post_by_slug(&self, slug: &str) -> Result<Post> {
        let inner = self.inner()?;
        let filter = eq(slug);
        fetch(
            inner
                .client
                .get(inner.table("posts"))
                .header(header::ACCEPT, SINGLE_OBJECT)
                .query(&[("select", POST_SELECT), ("slug", filter.as_str())]),
        )
        .await
    }

    #[tracing::instrument(skip(self))]
    async fn posts_by_category(&self, category_slug: &str) -> Result<Vec<Post>> {
        let inner = self.inner()?;
        let filter = eq(category_slug);
        fetch(inner.client.get(inner.table("posts")).query(&[
            ("select", POST_BY_CATEGORY_SELECT),
            ("categories.slug", filter.as_str()),
            ("order", "published_at.desc"),
        ]))
        .await
    }

    #[tracing::instrument(skip_all, fields(slug = %post.slug))]
    async fn create_post(&self, post: &NewPost) -> Result<Post> {
        let inner = self.inner()?;
        let rows: Vec<Post> = fetch(
            inner
                .client
                .post(inner.table("posts"))
                .header("Prefer", "return=representation")
                .query(&[("select", POST_SELECT)])
                .json(post),
        )
        .await?;
        first_row(rows, "posts")
    }

    #[tracing::instrument(skip(self, patch))]
    async fn update_post(&self, slug: &str, patch: &PostPatch) -> Result<Vec<Post>> {
        let inner = self.inner()?;
        let filter = eq(slug);
        fetch(
            inner
                .client
                .patch(inner.table("posts"))
                .header("Prefer", "return=representation")
                .query(&[("select", POST_SELECT), ("slug", filter.as_str())])
                .json(patch),
        )
        .await
    }

    #[tracing::instrument(skip(self))]
    async fn delete_post(&self, slug: &str) -> Result<()> {
        let inner = self.inner()?;
        execute(
            inner
                .client
                .delete(inner.table("posts"))
                .query(&[("slug", eq(slug))]),
        )
        .await
    }

    #[tracing::instrument(skip(self))]
    async fn list_categories(&self) -> Result<Vec<Category>> {
        let inner = self.inner()?;
        fetch(
            inner
                .client
                .get(inner.table("categories"))
                .query(&[("select", "*")]),
        )
        .await
    }

    #[tracing::instrument(skip(self))]
    async fn category_by_slug(&self, slug: &str) -> Result<Category> {
        let inner = self.inner()?;
        let filter = eq(slug);
        fetch(
            inner
                .client
                .get(inner.table("categories"))
                .header(header::ACCEPT, SINGLE_OBJECT)
                .query(&[("select", "*"), ("slug", filter.as_str())]),
        )
        .await
    }

    #[tracing::instrument(skip(self))]
    async fn comments_for_post(&self, post_id: &str) -> Result<Vec<Comment>> {
        let inner = self.inner()?;
        let filter = eq(post_id);
        fetch(inner.client.get(inner.table("comments")).query(&[
            ("select", COMMENT_SELECT),
            ("post_id", filter.as_str()),
            ("order", "created_at.asc"),
        ]))
        .await
    }

    #[tracing::instrument(skip_all, fields(post_id = %comment.post_id))]
    async fn create_comment(&self, comment: &NewComment) -> Result<Comment> {
        let inner = self.inner()?;
        let rows: Vec<Comment> = fetch(
            inner
                .client
                .post(inner.table("comments"))
                .header("Prefer", "return=representation")
                .json(comment),
        )
        .await?;
        first_row(rows, "comments")
    }

    #[tracing::instrument(skip(self))]
    async fn delete_comment(&self, id: &str) -> Result<()> {
        let inner = self.inner()?;
        execute(
            inner
                .client
                .delete(inner.table("comments"))
                .query(&[("id", eq(id))]),
        )
        .await
    }

    #[tracing::instrument(skip(self, password))]
    async fn sign_up(&self, email: &str, password: &str) -> Result<AuthResponse> {
        let inner = self.inner()?;
        let body: SignUpBody = fetch(
            inner
                .client
                .post(inner.auth("signup"))
                .json(&Credentials { email, password }),
        )
        .await?;

        Ok(match body {
            SignUpBody::Session(session) => session.into(),
            SignUpBody::User(user) => user.into(),
        })
    }

    #[tracing::instrument(skip(self, password))]
    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthResponse> {
        let inner = self.inner()?;
        let session: Session = fetch(
            inner
                .client
                .post(inner.auth("token"))
                .query(&[("grant_type", "password")])
                .json(&Credentials { email, password }),
        )
        .await?;
        Ok(session.into())
    }

    #[tracing::instrument(skip_all)]
    async fn sign_out(&self, access_token: &str) -> Result<()> {
        let inner = self.inner()?;
        execute(
            inner
                .client
                .post(inner.auth("logout"))
                .bearer_auth(access_token),
        )
        .await
    }

    #[tracing::instrument(skip_all)]
    async fn current_user(&self, access_token: &str) -> Result<Option<User>> {
        let inner = self.inner()?;
        match fetch::<User>(inner.client.get(inner.auth("user")).bearer_auth(access_token)).await {
            Ok(user) => Ok(Some(user)),
            Err(e) => {
                tracing::debug!(%e, "no current user");
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{collections::HashMap, net::SocketAddr};

    use axum::{
        Json, Router,
        extract::Query,
        http::StatusCode,
        response::{IntoResponse, Response},
        routing::{get, post},
    };
    use serde_json::{Value, json};

    use super::*;

    const KEY: &str = "anon-key";

    fn post_json(id: u64, slug: &str) -> Value {
        json!({
            "id": id,
            "title": format!("Post {id}"),
            "slug": slug,
            "excerpt": "excerpt text",
            "content": "<p>content</p>",
            "featured_image": "https://img.example/1.jpg",
            "category_id": 1,
            "author_id": "u-1",
            "published_at": "2023-06-15T10:00:00Z",
            "profiles": {"username": "jane", "full_name": "Jane Smith", "avatar_url": null},
            "categories": {"name": "Design", "slug": "design"}
        })
    }

    fn check_key(headers: &HeaderMap) -> Option<Response> {
        let ok = headers.get("apikey").and_then(|v| v.to_str().ok()) == Some(KEY);
        (!ok).then(|| {
            (
                StatusCode::UNAUTHORIZED,
                Json(json!({"message": "Invalid API key"})),
            )
                .into_response()
        })
    }

    fn no_single_row() -> Response {
        (
            StatusCode::NOT_ACCEPTABLE,
            Json(json!({
                "code": "PGRST116",
                "details": "The result contains 0 rows",
                "hint": null,
                "message": "JSON object requested, multiple (or no) rows returned"
            })),
        )
            .into_response()
    }

    fn comment_json(id: u64, post_id: &str, content: &str) -> Value {
        json!({
            "id": id,
            "post_id": post_id,
            "user_id": "u-1",
            "content": content,
            "created_at": "2023-06-16T08:00:00Z",
            "profiles": {"username": "jane", "full_name": "Jane Smith", "avatar_url": null}
        })
    }

    async fn posts(headers: HeaderMap, Query(q): Query<HashMap<String, String>>) -> Response {
        if let Some(resp) = check_key(&headers) {
            return resp;
        }
        assert!(q["select"].contains("profiles:author_id"));

        if let Some(slug) = q.get("slug") {
            assert_eq!(headers[header::ACCEPT], SINGLE_OBJECT);
            return if slug == "eq.hello" {
                Json(post_json(1, "hello")).into_response()
            } else {
                no_single_row()
            };
        }

        if let Some(category) = q.get("categories.slug") {
            assert!(q["select"].contains("!inner"));
            return if category == "eq.design" {
                Json(json!([post_json(2, "b")])).into_response()
            } else {
                Json(json!([])).into_response()
            };
        }

        assert_eq!(q.get("order").map(String::as_str), Some("published_at.desc"));
        Json(json!([post_json(1, "hello"), post_json(2, "b")])).into_response()
    }

    async fn insert_post(headers: HeaderMap, Json(mut body): Json<Value>) -> Response {
        if let Some(resp) = check_key(&headers) {
            return resp;
        }
        assert_eq!(headers["prefer"], "return=representation");
        body["id"] = json!(99);
        (StatusCode::CREATED, Json(json!([body]))).into_response()
    }

    async fn update_posts(
        headers: HeaderMap,
        Query(q): Query<HashMap<String, String>>,
        Json(body): Json<Value>,
    ) -> Response {
        if let Some(resp) = check_key(&headers) {
            return resp;
        }
        assert_eq!(headers["prefer"], "return=representation");
        assert!(q["select"].contains("profiles:author_id"));
        // 只发送要修改的字段
        assert_eq!(body, json!({"title": "Renamed"}));

        if q.get("slug").map(String::as_str) == Some("eq.hello") {
            let mut row = post_json(1, "hello");
            row["title"] = body["title"].clone();
            Json(json!([row])).into_response()
        } else {
            Json(json!([])).into_response()
        }
    }

    async fn delete_posts(headers: HeaderMap, Query(q): Query<HashMap<String, String>>) -> Response {
        if let Some(resp) = check_key(&headers) {
            return resp;
        }
        assert_eq!(q.get("slug").map(String::as_str), Some("eq.hello"));
        StatusCode::NO_CONTENT.into_response()
    }

    async fn categories(headers: HeaderMap, Query(q): Query<HashMap<String, String>>) -> Response {
        if let Some(resp) = check_key(&headers) {
            return resp;
        }
        assert_eq!(q.get("select").map(String::as_str), Some("*"));
        let design = json!({"id": 1, "name": "Design", "slug": "design", "description": "UI and UX", "image_url": null});

        if let Some(slug) = q.get("slug") {
            assert_eq!(headers[header::ACCEPT], SINGLE_OBJECT);
            return if slug == "eq.design" {
                Json(design).into_response()
            } else {
                no_single_row()
            };
        }

        Json(json!([
            design,
            {"id": 2, "name": "Business", "slug": "business", "description": null}
        ]))
        .into_response()
    }

    async fn comments(headers: HeaderMap, Query(q): Query<HashMap<String, String>>) -> Response {
        if let Some(resp) = check_key(&headers) {
            return resp;
        }
        assert!(q["select"].contains("profiles:user_id"));
        assert_eq!(q.get("order").map(String::as_str), Some("created_at.asc"));

        if q.get("post_id").map(String::as_str) == Some("eq.1") {
            Json(json!([
                comment_json(10, "1", "First!"),
                comment_json(11, "1", "Nice post")
            ]))
            .into_response()
        } else {
            Json(json!([])).into_response()
        }
    }

    async fn insert_comment(headers: HeaderMap, Json(body): Json<Value>) -> Response {
        if let Some(resp) = check_key(&headers) {
            return resp;
        }
        assert_eq!(headers["prefer"], "return=representation");
        let post_id = body["post_id"].as_str().unwrap_or_default();
        let content = body["content"].as_str().unwrap_or_default();
        (
            StatusCode::CREATED,
            Json(json!([comment_json(12, post_id, content)])),
        )
            .into_response()
    }

    async fn delete_comments(headers: HeaderMap, Query(q): Query<HashMap<String, String>>) -> Response {
        if let Some(resp) = check_key(&headers) {
            return resp;
        }
        assert_eq!(q.get("id").map(String::as_str), Some("eq.12"));
        StatusCode::NO_CONTENT.into_response()
    }

    async fn signup(Json(body): Json<Value>) -> Response {
        let email = body["email"].as_str().unwrap_or_default();
        match email {
            // 需要邮箱确认时只返回用户
            "confirm@example.com" => Json(json!({"id": "u-2", "email": email})).into_response(),
            "taken@example.com" => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({"msg": "User already registered"})),
            )
                .into_response(),
            _ => Json(json!({
                "access_token": "new-token",
                "refresh_token": "r",
                "expires_in": 3600,
                "user": {"id": "u-3", "email": email}
            }))
            .into_response(),
        }
    }

    async fn logout(headers: HeaderMap) -> Response {
        if headers.get(header::AUTHORIZATION).and_then(|v| v.to_str().ok()) == Some("Bearer good-token") {
            StatusCode::NO_CONTENT.into_response()
        } else {
            (StatusCode::UNAUTHORIZED, Json(json!({"msg": "invalid JWT"}))).into_response()
        }
    }

    async fn token(Query(q): Query<HashMap<String, String>>, Json(body): Json<Value>) -> Response {
        assert_eq!(q.get("grant_type").map(String::as_str), Some("password"));
        if body["password"] == "secret" {
            Json(json!({
                "access_token": "good-token",
                "refresh_token": "r",
                "expires_in": 3600,
                "user": {"id": "u-1", "email": body["email"]}
            }))
            .into_response()
        } else {
            (
                StatusCode::BAD_REQUEST,
                Json(json!({"error": "invalid_grant", "error_description": "Invalid login credentials"})),
            )
                .into_response()
        }
    }

    async fn user(headers: HeaderMap) -> Response {
        if headers[header::AUTHORIZATION] == "Bearer good-token" {
            Json(json!({"id": "u-1", "email": "jane@example.com"})).into_response()
        } else {
            (StatusCode::UNAUTHORIZED, Json(json!({"msg": "invalid JWT"}))).into_response()
        }
    }

    async fn spawn_backend() -> SocketAddr {
        let router = Router::new()
            .route(
                "/rest/v1/posts",
                get(posts)
                    .post(insert_post)
                    .patch(update_posts)
                    .delete(delete_posts),
            )
            .route("/rest/v1/categories", get(categories))
            .route(
                "/rest/v1/comments",
                get(comments).post(insert_comment).delete(delete_comments),
            )
            .route("/auth/v1/signup", post(signup))
            .route("/auth/v1/token", post(token))
            .route("/auth/v1/logout", post(logout))
            .route("/auth/v1/user", get(user));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind test backend");
        let addr = listener.local_addr().expect("local addr");
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("serve test backend");
        });
        addr
    }

    fn gateway(addr: SocketAddr, key: &str) -> RestGateway {
        RestGateway::new(Some(&BackendConfig {
            url: format!("http://{addr}/"),
            anon_key: key.to_string(),
        }))
        .expect("gateway builds")
    }

    #[tokio::test]
    async fn test_unconfigured_fails_fast() {
        let gw = RestGateway::unconfigured();
        assert!(!gw.is_configured());
        assert!(matches!(gw.list_posts().await, Err(Error::Configuration(_))));
        assert!(matches!(gw.post_by_slug("x").await, Err(Error::Configuration(_))));
        assert!(matches!(gw.current_user("t").await, Err(Error::Configuration(_))));
    }

    #[tokio::test]
    async fn test_list_posts_parses_relations() {
        let gw = gateway(spawn_backend().await, KEY);
        let posts = gw.list_posts().await.expect("list posts");

        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].id, "1");
        assert_eq!(posts[0].author_name(), "Jane Smith");
        assert_eq!(posts[0].category_name(), Some("Design"));
    }

    #[tokio::test]
    async fn test_post_by_slug_single_row_contract() {
        let gw = gateway(spawn_backend().await, KEY);

        let post = gw.post_by_slug("hello").await.expect("post exists");
        assert_eq!(post.slug, "hello");

        match gw.post_by_slug("missing").await {
            Err(Error::Remote(e)) => {
                assert_eq!(e.status, Some(406));
                assert_eq!(e.code.as_deref(), Some(crate::gateway::SINGLE_ROW_CODE));
            }
            other => panic!("expected remote error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_posts_by_category_uses_inner_join() {
        let gw = gateway(spawn_backend().await, KEY);
        assert_eq!(gw.posts_by_category("design").await.expect("ok").len(), 1);
        assert!(gw.posts_by_category("other").await.expect("ok").is_empty());
    }

    #[tokio::test]
    async fn test_create_post_returns_inserted_row() {
        let gw = gateway(spawn_backend().await, KEY);
        let new_post = NewPost {
            title: "How To Build a Blog!".into(),
            slug: "how-to-build-a-blog".into(),
            content: "c".repeat(60),
            excerpt: "excerpt text".into(),
            featured_image: "https://img.example/x.jpg".into(),
            category_id: "1".into(),
            author_id: None,
            published_at: chrono::Utc::now(),
        };

        let post = gw.create_post(&new_post).await.expect("created");
        assert_eq!(post.id, "99");
        assert_eq!(post.slug, "how-to-build-a-blog");
    }

    #[tokio::test]
    async fn test_update_post_sends_only_changed_fields() {
        let gw = gateway(spawn_backend().await, KEY);
        let patch = PostPatch {
            title: Some("Renamed".into()),
            ..Default::default()
        };

        let rows = gw.update_post("hello", &patch).await.expect("updated");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].title, "Renamed");
        assert_eq!(rows[0].author_name(), "Jane Smith");

        // 没有匹配的行不是错误
        assert!(gw.update_post("missing", &patch).await.expect("ok").is_empty());
    }

    #[tokio::test]
    async fn test_delete_post_filters_by_slug() {
        let gw = gateway(spawn_backend().await, KEY);
        gw.delete_post("hello").await.expect("deleted");
        assert!(matches!(
            gateway(spawn_backend().await, "wrong").delete_post("hello").await,
            Err(Error::Remote(e)) if e.status == Some(401)
        ));
    }

    #[tokio::test]
    async fn test_list_categories() {
        let gw = gateway(spawn_backend().await, KEY);
        let categories = gw.list_categories().await.expect("categories");

        assert_eq!(categories.len(), 2);
        assert_eq!(categories[0].id, "1");
        assert_eq!(categories[0].description.as_deref(), Some("UI and UX"));
        assert_eq!(categories[1].slug, "business");
        assert_eq!(categories[1].description, None);
    }

    #[tokio::test]
    async fn test_category_by_slug_single_row_contract() {
        let gw = gateway(spawn_backend().await, KEY);

        let category = gw.category_by_slug("design").await.expect("category exists");
        assert_eq!(category.name, "Design");

        match gw.category_by_slug("missing").await {
            Err(Error::Remote(e)) => {
                assert_eq!(e.status, Some(406));
                assert_eq!(e.code.as_deref(), Some(crate::gateway::SINGLE_ROW_CODE));
            }
            other => panic!("expected remote error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_comments_for_post_oldest_first() {
        let gw = gateway(spawn_backend().await, KEY);

        let comments = gw.comments_for_post("1").await.expect("comments");
        assert_eq!(comments.len(), 2);
        assert_eq!(comments[0].content, "First!");
        assert_eq!(comments[0].post_id, "1");
        assert_eq!(
            comments[0].author.as_ref().and_then(|a| a.username.as_deref()),
            Some("jane")
        );

        assert!(gw.comments_for_post("2").await.expect("ok").is_empty());
    }

    #[tokio::test]
    async fn test_create_and_delete_comment() {
        let gw = gateway(spawn_backend().await, KEY);
        let new_comment = NewComment {
            post_id: "1".into(),
            user_id: "u-1".into(),
            content: "Great read".into(),
        };

        let comment = gw.create_comment(&new_comment).await.expect("created");
        assert_eq!(comment.id, "12");
        assert_eq!(comment.content, "Great read");
        assert_eq!(comment.user_id.as_deref(), Some("u-1"));

        gw.delete_comment(&comment.id).await.expect("deleted");
    }

    #[tokio::test]
    async fn test_sign_up_response_shapes() {
        let gw = gateway(spawn_backend().await, KEY);

        let resp = gw.sign_up("new@example.com", "secret").await.expect("signed up");
        assert_eq!(resp.session.map(|s| s.access_token).as_deref(), Some("new-token"));
        assert_eq!(resp.user.map(|u| u.id).as_deref(), Some("u-3"));

        let resp = gw
            .sign_up("confirm@example.com", "secret")
            .await
            .expect("pending confirmation");
        assert_eq!(resp.session, None);
        assert_eq!(resp.user.map(|u| u.id).as_deref(), Some("u-2"));

        match gw.sign_up("taken@example.com", "secret").await {
            Err(Error::Remote(e)) => {
                assert_eq!(e.status, Some(422));
                assert_eq!(e.message, "User already registered");
            }
            other => panic!("expected remote error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_sign_out_sends_bearer_token() {
        let gw = gateway(spawn_backend().await, KEY);
        gw.sign_out("good-token").await.expect("signed out");
        assert!(matches!(
            gw.sign_out("bad").await,
            Err(Error::Remote(e)) if e.status == Some(401)
        ));
    }

    #[tokio::test]
    async fn test_wrong_key_is_remote_error() {
        let gw = gateway(spawn_backend().await, "wrong");
        match gw.list_posts().await {
            Err(Error::Remote(e)) => {
                assert_eq!(e.status, Some(401));
                assert_eq!(e.message, "Invalid API key");
            }
            other => panic!("expected remote error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_auth_flow() {
        let gw = gateway(spawn_backend().await, KEY);

        let resp = gw
            .sign_in("jane@example.com", "secret")
            .await
            .expect("signed in");
        let session = resp.session.expect("session");
        assert_eq!(session.access_token, "good-token");
        assert_eq!(resp.user.map(|u| u.id).as_deref(), Some("u-1"));

        match gw.sign_in("jane@example.com", "nope").await {
            Err(Error::Remote(e)) => assert_eq!(e.message, "Invalid login credentials"),
            other => panic!("expected remote error, got {other:?}"),
        }

        let user = gw.current_user("good-token").await.expect("no error");
        assert_eq!(user.map(|u| u.id).as_deref(), Some("u-1"));
        assert_eq!(gw.current_user("bad").await.expect("no error"), None);
    }

    #[tokio::test]
    async fn test_transport_failure_is_remote_error() {
        // 绑定后立即释放端口，连接会被拒绝
        let addr = {
            let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
                .await
                .expect("bind");
            listener.local_addr().expect("addr")
        };
        let gw = gateway(addr, KEY);
        assert!(matches!(gw.list_categories().await, Err(Error::Remote(_))));
    }
}
