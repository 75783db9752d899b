pub mod api;
pub mod config;
pub mod error;
pub mod form;
pub mod gateway;
pub mod model;
pub mod seo;
pub mod slug;
pub mod state;
pub mod theme;
pub mod ui;
pub mod view;

use tracing_subscriber::{EnvFilter, fmt::time::ChronoLocal};

use config::Config;
use gateway::RestGateway;
use state::AppState;

pub async fn run() {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_timer(ChronoLocal::new("%Y-%m-%d %H:%M:%S%.3f".to_string()))
        .with_env_filter(EnvFilter::from_env("BLOGMASTER_LOG"))
        .init();

    let config = Config::from_env().expect("Failed to load configuration");

    if config.backend.is_none() {
        tracing::warn!("SUPABASE_URL or SUPABASE_ANON_KEY not set, pages will show sample content");
    }

    let gateway = RestGateway::new(config.backend.as_ref()).expect("Failed to create backend client");
    let app = AppState::new(gateway, config.site);

    api::run_server(app, &config.listen_addr).await
}
