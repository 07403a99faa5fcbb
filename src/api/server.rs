use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::{header, HeaderValue, Method};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::api::handlers::{get_rankings_handler, submit_score_handler};
use crate::config::Config;
use crate::db::{self, MongoRecordStore, RecordStore};
use crate::ranking::RankingService;

/// Shared per-request state: the record store and the ranking service over
/// it. All leaderboard state lives in the store; nothing is cached between
/// requests.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn RecordStore>,
    pub ranking: RankingService,
}

impl AppState {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        let ranking = RankingService::new(store.clone());
        Self { store, ranking }
    }
}

pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tower_http=info,hyper=warn")),
        )
        .init();
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Skipping unparseable CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true)
}

pub fn build_router(state: AppState, config: &Config) -> Router {
    Router::new()
        .route("/Score/submit-score", post(submit_score_handler))
        .route("/Score/get-rankings", get(get_rankings_handler))
        // Health check endpoint
        .route("/health", get(health_check))
        .with_state(state)
        .layer(cors_layer(&config.allowed_origins))
        // Add tracing layer for observability
        .layer(TraceLayer::new_for_http())
}

pub async fn create_app(config: &Config) -> Result<Router, Box<dyn std::error::Error>> {
    let collection = db::connect(config).await?;
    db::ensure_indexes(&collection).await?;

    let store: Arc<dyn RecordStore> = Arc::new(MongoRecordStore::new(collection));
    Ok(build_router(AppState::new(store), config))
}

async fn health_check() -> &'static str {
    "OK"
}

pub async fn run_server() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();
    init_tracing();

    info!("Starting leaderboard API server");

    let config = Config::from_env()?;
    let app = create_app(&config).await?;

    // Set up ctrl-c handler for graceful shutdown
    let shutdown = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install CTRL+C signal handler");
        info!("Shutting down gracefully...");
    };

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    Ok(())
}
