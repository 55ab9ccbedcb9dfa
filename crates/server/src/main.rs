mod api;
mod app_config;
mod cli;
mod flow;
mod router;
mod state;
#[cfg(test)]
mod test_support;

use std::time::Duration;

use tracing::info;
use tracing_subscriber::EnvFilter;

async fn serve(config: pdfquiz_core::Config) -> anyhow::Result<()> {
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let idle_secs = config.server.session_idle_secs;
    let app_state = app_config::build_app_state(config);

    if idle_secs > 0 {
        tokio::spawn(state::run_session_sweeper(
            app_state.clone(),
            Duration::from_secs(idle_secs),
        ));
        info!("Idle sessions expire after {}s", idle_secs);
    }

    let app = router::build_router(app_state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on http://{}", addr);
    info!("API docs at http://{}/docs", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_level(true)
        .init();

    let config = app_config::load_config();
    config.log_summary();

    let args: Vec<String> = std::env::args().collect();
    if cli::dispatch(&config, &args).await? {
        return Ok(());
    }

    serve(config).await
}
