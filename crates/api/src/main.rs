//! CourseHerald API server binary entrypoint.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::sync::watch;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use herald_common::config::AppConfig;
use herald_common::redis_pool::create_redis_pool;
use herald_engine::dispatch::DispatchEngine;
use herald_engine::record::RecordBuilder;
use herald_notifier::mailer::HttpMailGateway;
use herald_notifier::queue::RedisDeliveryQueue;
use herald_notifier::store::RedisRecordStore;
use herald_notifier::worker::DeliveryWorker;

use herald_api::routes::create_router;
use herald_api::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new("herald_api=debug,herald_engine=debug,herald_notifier=debug,tower_http=debug")
        }))
        .init();

    tracing::info!("Starting CourseHerald API server...");

    // Load configuration
    let config = AppConfig::from_env()?;

    // Create Redis connection
    let redis = create_redis_pool(&config.redis_url).await?;

    // Wire up the engine's collaborators
    let store = Arc::new(RedisRecordStore::new(redis.clone()));
    let queue = Arc::new(RedisDeliveryQueue::new(redis.clone()));
    let mail = Arc::new(HttpMailGateway::new(&config));

    let engine = Arc::new(DispatchEngine::new(
        queue,
        store.clone(),
        mail,
        RecordBuilder::default(),
        config.email_from.clone(),
    ));

    // Start the delivery worker
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let worker = DeliveryWorker::new(redis, store, config.worker_poll_timeout_secs);
    let worker_handle = tokio::spawn(worker.run(shutdown_rx));
    tracing::info!("Delivery worker spawned");

    // Build router
    let state = AppState::new(engine);
    let app = create_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], 3000));
    tracing::info!("API server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // Stop the worker once the server has drained
    let _ = shutdown_tx.send(true);
    let _ = worker_handle.await;

    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    tracing::info!("Shutdown signal received");
}
