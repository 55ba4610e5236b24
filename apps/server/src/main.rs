use gemassure_server::{api::app_router, build_state, config::Config, init_tracing};
use tower_http::services::{ServeDir, ServeFile};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let config = Config::from_env()?;
    let state = build_state(&config).await?;

    let mut router = app_router(state, &config);
    if let Some(static_dir) = &config.static_dir {
        tracing::info!("Serving frontend from {}", static_dir.display());
        let index_file = static_dir.join("index.html");
        router =
            router.fallback_service(ServeDir::new(static_dir).fallback(ServeFile::new(index_file)));
    }

    if config.enable_debug_routes && config.is_production() {
        tracing::warn!("Debug routes are enabled in production");
    }
    tracing::info!("Listening on {} ({})", config.listen_addr, config.app_env);
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    axum::serve(listener, router).await?;
    Ok(())
}
