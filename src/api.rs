mod pages;
mod posts;
mod theme;

use axum::{
    Router,
    extract::State,
    http::{StatusCode, Uri},
    response::Html,
};
use axum_extra::extract::CookieJar;
use tower_http::trace::TraceLayer;
use tracing::instrument;

use crate::{
    gateway::Gateway,
    seo::Seo,
    state::AppState,
    theme::Theme,
    ui::{self, PageContext},
};

/// 设置应用的路由。
///
/// 页面路由、文章提交和主题切换组合在一起，未匹配的路径渲染 404 页面。
pub fn setup_route<G: Gateway + 'static>(app: AppState<G>) -> Router {
    Router::new()
        .merge(pages::setup_route())
        .merge(posts::setup_route())
        .merge(theme::setup_route())
        .fallback(not_found::<G>)
        .with_state(app)
}

/// 启动 HTTP 服务，并使用给定的路由处理请求。
///
/// 在 `addr` 上监听 TCP 连接，并打印启动日志。
#[instrument(name = "http server", skip(router))]
pub async fn run_server_with_router(router: Router, addr: &str) {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .unwrap_or_else(|e| panic!("Failed to bind TCP listener on {addr}: {e}"));

    tracing::info!("listening on {addr}");

    axum::serve(listener, router)
        .await
        .expect("Failed to start Axum server");
}

/// 启动 HTTP 服务，自动设置路由和中间件。
///
/// 1. 生成路由
/// 2. 添加日志和追踪中间件
/// 3. 启动服务器
pub async fn run_server<G: Gateway + 'static>(app: AppState<G>, addr: &str) {
    let router = setup_route(app);
    let router = add_middlewares(router);
    run_server_with_router(router, addr).await
}

/// 为路由添加中间件，包括请求追踪和失败日志记录。
///
/// 日志记录会在请求失败时输出错误信息。
fn add_middlewares(router: Router) -> Router {
    fn log_failure(
        err: tower_http::classify::ServerErrorsFailureClass,
        _latency: std::time::Duration,
        _span: &tracing::Span,
    ) {
        tracing::error!(error = %err, "request failed");
    }

    router.layer(
        TraceLayer::new_for_http()
            .on_failure(log_failure)
            .on_request(|_req: &_, _span: &tracing::Span| {
                // 空实现，关闭请求日志
            }),
    )
}

/// 用站点外壳包裹页面内容
fn render_page<G: Gateway>(
    app: &AppState<G>,
    jar: &CookieJar,
    uri: &Uri,
    seo: Seo,
    body: &str,
) -> Html<String> {
    let ctx = PageContext {
        theme: Theme::from_jar(jar),
        site: app.site(),
        path: uri.path(),
    };
    Html(ui::render_document(&ctx, &seo, body))
}

/// 页面标题，`BlogMaster` 作为后缀
fn page_title<G: Gateway>(app: &AppState<G>, title: &str) -> String {
    format!("{} | {}", title, app.site().name)
}

async fn not_found<G: Gateway>(
    State(app): State<AppState<G>>,
    jar: CookieJar,
    uri: Uri,
) -> (StatusCode, Html<String>) {
    let seo = Seo::for_site(app.site(), uri.path())
        .title(page_title(&app, "Page Not Found"))
        .description("The page you are looking for does not exist.");
    let body = ui::pages::not_found_page(uri.path());
    (
        StatusCode::NOT_FOUND,
        render_page(&app, &jar, &uri, seo, &body),
    )
}
