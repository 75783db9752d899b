use axum::{
    Router,
    extract::{Path, State},
    http::Uri,
    response::Html,
    routing::get,
};
use axum_extra::extract::CookieJar;

use super::{page_title, render_page};
use crate::{
    gateway::Gateway,
    seo::Seo,
    state::AppState,
    ui::{
        banner::{error_banner, sample_notice},
        blog::{BlogGridProps, PostDetailProps, blog_grid, post_detail as render_post},
        category::{CategoryGridProps, CategoryHeroProps, category_grid, category_hero},
        pages::{about_page, contact_page},
    },
    view::pages,
};

/// 配置页面路由。
///
/// 路由包括：
/// - `GET /`：首页，最新文章
/// - `GET /blog`：文章列表
/// - `GET /blog/{slug}`：文章详情
/// - `GET /categories`：分类列表
/// - `GET /categories/{slug}`：分类详情
/// - `GET /about`、`GET /contact`：静态页面
pub fn setup_route<G: Gateway + 'static>() -> Router<AppState<G>> {
    Router::new()
        .route("/", get(home::<G>))
        .route("/blog", get(blog_index::<G>))
        .route("/blog/{slug}", get(post_detail::<G>))
        .route("/categories", get(category_index::<G>))
        .route("/categories/{slug}", get(category_detail::<G>))
        .route("/about", get(about::<G>))
        .route("/contact", get(contact::<G>))
}

async fn home<G: Gateway>(
    State(app): State<AppState<G>>,
    jar: CookieJar,
    uri: Uri,
) -> Html<String> {
    let page = pages::blog_index(app.gateway()).await;

    let body = format!(
        r#"<section class="hero"><h1>{}</h1><p class="lead">{}</p></section>
{}{}{}"#,
        crate::ui::esc(&app.site().name),
        crate::ui::esc(&app.site().description),
        error_banner(page.error.as_deref()),
        sample_notice(&page.posts.source, page.error.as_deref()),
        blog_grid(&BlogGridProps::from_posts("Latest Blog Posts", &page.posts.data)),
    );

    let seo = Seo::for_site(app.site(), uri.path());
    render_page(&app, &jar, &uri, seo, &body)
}

async fn blog_index<G: Gateway>(
    State(app): State<AppState<G>>,
    jar: CookieJar,
    uri: Uri,
) -> Html<String> {
    let page = pages::blog_index(app.gateway()).await;

    let body = format!(
        r#"<div class="page-header"><div><h1>Blog Posts</h1><p class="lead">Explore our latest articles and insights</p></div><a class="button" href="/blog/new">New Post</a></div>
{}{}{}"#,
        error_banner(page.error.as_deref()),
        sample_notice(&page.posts.source, page.error.as_deref()),
        blog_grid(&BlogGridProps::from_posts("", &page.posts.data)),
    );

    let seo = Seo::for_site(app.site(), uri.path())
        .title(page_title(&app, "Blog Posts"))
        .description(
            "Explore our latest articles and insights on web development, design, and technology.",
        );
    render_page(&app, &jar, &uri, seo, &body)
}

/// 文章详情页。
///
/// 文章取不到时仍返回 200，展示错误提示和占位文章。
async fn post_detail<G: Gateway>(
    State(app): State<AppState<G>>,
    Path(slug): Path<String>,
    jar: CookieJar,
    uri: Uri,
) -> Html<String> {
    let page = pages::post_detail(app.gateway(), &slug).await;

    let body = format!(
        "{}{}{}",
        error_banner(page.error.as_deref()),
        sample_notice(&page.post.source, page.error.as_deref()),
        render_post(&PostDetailProps {
            post: page.post.data.clone(),
            related: page.related.data,
        }),
    );

    let post = &page.post.data;
    let seo = Seo::for_site(app.site(), uri.path())
        .title(page_title(&app, &post.title))
        .description(post.excerpt.clone())
        .image(post.featured_image.as_deref().unwrap_or_default())
        .kind("article");
    render_page(&app, &jar, &uri, seo, &body)
}

async fn category_index<G: Gateway>(
    State(app): State<AppState<G>>,
    jar: CookieJar,
    uri: Uri,
) -> Html<String> {
    let page = pages::category_index(app.gateway()).await;

    let body = format!(
        "{}{}{}",
        error_banner(page.error.as_deref()),
        sample_notice(&page.categories.source, page.error.as_deref()),
        category_grid(&CategoryGridProps {
            categories: page.categories.data,
        }),
    );

    let seo = Seo::for_site(app.site(), uri.path())
        .title(page_title(&app, "Categories"))
        .description("Browse all blog categories and find articles on the topics you care about.");
    render_page(&app, &jar, &uri, seo, &body)
}

async fn category_detail<G: Gateway>(
    State(app): State<AppState<G>>,
    Path(slug): Path<String>,
    jar: CookieJar,
    uri: Uri,
) -> Html<String> {
    let page = pages::category_detail(app.gateway(), &slug).await;
    let category = &page.category.data;

    let body = format!(
        "{}{}{}{}",
        error_banner(page.error.as_deref()),
        category_hero(&CategoryHeroProps {
            category: category.clone(),
            count: page.posts.data.len(),
        }),
        sample_notice(&page.posts.source, page.error.as_deref()),
        blog_grid(&BlogGridProps::from_posts(
            format!("Latest in {}", category.name),
            &page.posts.data
        )),
    );

    let seo = Seo::for_site(app.site(), uri.path())
        .title(page_title(&app, &category.name))
        .description(category.description.clone().unwrap_or_default())
        .image(category.image.as_deref().unwrap_or_default());
    render_page(&app, &jar, &uri, seo, &body)
}

async fn about<G: Gateway>(
    State(app): State<AppState<G>>,
    jar: CookieJar,
    uri: Uri,
) -> Html<String> {
    let seo = Seo::for_site(app.site(), uri.path())
        .title(page_title(&app, "About"))
        .description("Learn about the team and the story behind BlogMaster.");
    render_page(&app, &jar, &uri, seo, &about_page())
}

async fn contact<G: Gateway>(
    State(app): State<AppState<G>>,
    jar: CookieJar,
    uri: Uri,
) -> Html<String> {
    let seo = Seo::for_site(app.site(), uri.path())
        .title(page_title(&app, "Contact"))
        .description("Get in touch with the BlogMaster team.");
    render_page(&app, &jar, &uri, seo, &contact_page())
}
