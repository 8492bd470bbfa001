//! Writing Session server entry point.

use std::sync::Arc;

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use writing_session::adapters::http::build_router;
use writing_session::adapters::{writer_for, SystemClock};
use writing_session::application::{SessionDispatcher, SessionRuntime};
use writing_session::config::AppConfig;
use writing_session::domain::session::PhaseSequencer;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // --- 1. Load configuration ---
    let config = AppConfig::load()?;
    config.validate()?;

    // --- 2. Set up logging ---
    let filter = EnvFilter::try_new(&config.server.log_level)?;
    if config.is_production() {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().compact())
            .init();
    }
    info!(
        environment = ?config.server.environment,
        export_format = %config.export.format,
        auto_start_timers = config.experiment.auto_start_timers,
        "Configuration loaded"
    );

    // --- 3. Start the session runtime ---
    let clock = config
        .export
        .utc_offset()
        .map_or_else(SystemClock::local, SystemClock::with_offset);
    let dispatcher = SessionDispatcher::new(
        PhaseSequencer::new(config.experiment.timer_policy()),
        Arc::new(clock),
        writer_for(config.export.format),
    );
    let runtime = SessionRuntime::spawn(dispatcher, config.experiment.tick_interval());

    // --- 4. Serve HTTP ---
    let app = build_router(runtime.handle(), &config.server);
    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(address = %addr, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    runtime.shutdown().await;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
}
