use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub mod api;
pub mod config;
pub mod queue;
pub mod research;
pub mod search;
pub mod store;

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "leadscope_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting LeadScope server...");

    let config = config::Config::from_env().expect("Invalid configuration");

    // Seed the in-memory store with the demo campaign
    let store = Arc::new(store::Database::seeded());
    tracing::info!("In-memory store seeded with demo data");

    let search = Arc::new(search::MockSearchClient::new(config.search_latency));

    // Spawns the single research worker
    let job_queue = queue::JobQueue::new(Arc::clone(&store), search, config.event_buffer);

    // Build router with all API endpoints
    let app = api::create_router(api::AppState {
        store,
        queue: job_queue,
        heartbeat_interval: config.heartbeat_interval,
    });

    tracing::info!("Listening on {}", config.bind_addr);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .await
        .expect("Failed to start server");
}
