use axum::{
    Form, Router,
    extract::State,
    http::{StatusCode, Uri},
    response::{IntoResponse, Redirect, Response},
    routing::get,
};
use axum_extra::extract::CookieJar;
use chrono::Utc;

use super::{page_title, render_page};
use crate::{
    form::{NewPostForm, ValidationErrors},
    gateway::Gateway,
    seo::Seo,
    state::AppState,
    ui::form::{BlogFormProps, blog_form},
    view::pages,
};

/// 创建失败时展示的提示
pub const CREATE_FAILED: &str = "There was a problem creating your post. Please try again.";

/// 配置新建文章路由。
///
/// - `GET /blog/new`：新建文章表单
/// - `POST /blog/new`：提交表单
pub fn setup_route<G: Gateway + 'static>() -> Router<AppState<G>> {
    Router::new().route("/blog/new", get(new_post_form::<G>).post(create_post::<G>))
}

/// 渲染表单页，分类列表每次从后端读取
async fn render_form<G: Gateway>(
    app: &AppState<G>,
    jar: &CookieJar,
    uri: &Uri,
    values: NewPostForm,
    errors: ValidationErrors,
    failure: Option<&str>,
) -> axum::response::Html<String> {
    let page = pages::new_post(app.gateway()).await;
    let props = BlogFormProps {
        values,
        errors,
        categories: page.categories.data,
        warning: page.warning,
        failure: failure.map(str::to_string),
    };

    let seo = Seo::for_site(app.site(), uri.path())
        .title(page_title(app, "Create New Post"))
        .description("Write and publish a new article.");
    render_page(app, jar, uri, seo, &blog_form(&props))
}

async fn new_post_form<G: Gateway>(
    State(app): State<AppState<G>>,
    jar: CookieJar,
    uri: Uri,
) -> Response {
    render_form(
        &app,
        &jar,
        &uri,
        NewPostForm::default(),
        ValidationErrors::default(),
        None,
    )
    .await
    .into_response()
}

/// 提交新文章。
///
/// 校验失败返回 422 并保留输入；创建成功 303 跳转到文章页；
/// 后端失败返回 502 并提示重试。
async fn create_post<G: Gateway>(
    State(app): State<AppState<G>>,
    jar: CookieJar,
    uri: Uri,
    Form(form): Form<NewPostForm>,
) -> Response {
    let values = form.clone();
    let author_id = app.site().default_author_id.clone();

    let new_post = match form.into_new_post(author_id, Utc::now()) {
        Ok(new_post) => new_post,
        Err(errors) => {
            tracing::debug!(errors = %errors, "rejected post form");
            let html = render_form(&app, &jar, &uri, values, errors, None).await;
            return (StatusCode::UNPROCESSABLE_ENTITY, html).into_response();
        }
    };

    match app.gateway().create_post(&new_post).await {
        Ok(post) => {
            tracing::info!(slug = %post.slug, "post created");
            Redirect::to(&format!("/blog/{}", post.slug)).into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, slug = %new_post.slug, "failed to create post");
            let html = render_form(
                &app,
                &jar,
                &uri,
                values,
                ValidationErrors::default(),
                Some(CREATE_FAILED),
            )
            .await;
            (StatusCode::BAD_GATEWAY, html).into_response()
        }
    }
}
