use std::time::Duration;

use mongodb::bson::doc;
use mongodb::options::{ClientOptions, IndexOptions};
use mongodb::{Client, Collection, IndexModel};
use tracing::info;

use crate::config::Config;
use crate::db::errors::{Result, StoreError};
use crate::models::ScoreRecord;

/// Connect to MongoDB and return a handle to the records collection.
///
/// This runs once at startup; the returned collection handle is cheap to
/// clone and is shared across requests.
pub async fn connect(config: &Config) -> Result<Collection<ScoreRecord>> {
    info!(
        database = %config.database_name,
        collection = %config.collection_name,
        "Connecting to MongoDB"
    );

    let mut options = ClientOptions::parse(&config.connection_string)
        .await
        .map_err(|e| StoreError::ConnectionError(format!("Invalid connection string: {}", e)))?;
    options.app_name = Some(env!("CARGO_PKG_NAME").to_string());
    // Fail fast instead of queueing requests behind an unreachable server
    options.server_selection_timeout = Some(Duration::from_secs(5));

    let client = Client::with_options(options)
        .map_err(|e| StoreError::ConnectionError(format!("Failed to create client: {}", e)))?;
    let database = client.database(&config.database_name);

    // Test the connection
    database
        .run_command(doc! { "ping": 1 }, None)
        .await
        .map_err(|e| StoreError::ConnectionError(format!("Failed to reach database: {}", e)))?;

    info!("MongoDB connection established");
    Ok(database.collection::<ScoreRecord>(&config.collection_name))
}

/// Create the indexes backing the leaderboard access patterns: sorted reads
/// by score with the creation-time tie-break, and tie-break range counts.
pub async fn ensure_indexes(collection: &Collection<ScoreRecord>) -> Result<()> {
    let ranking_order = IndexModel::builder()
        .keys(doc! { "PlayerScore": -1, "CreatedAt": 1 })
        .options(IndexOptions::builder().name("ranking_order".to_string()).build())
        .build();
    let created_at = IndexModel::builder()
        .keys(doc! { "CreatedAt": 1 })
        .build();

    collection
        .create_indexes(vec![ranking_order, created_at], None)
        .await?;

    info!("Leaderboard indexes ensured");
    Ok(())
}
