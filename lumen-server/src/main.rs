use lumen_core::config::Settings;
use lumen_server::{build_router, serve, AppState};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let settings = Settings::load()?;
    info!(
        "Starting lumen-server {} (env: {})",
        lumen_core::version(),
        settings.env
    );

    let state = AppState::from_settings(&settings)?;
    serve(build_router(state), &settings.server.bind_addr).await
}
