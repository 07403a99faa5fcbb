use std::env;
use std::fs;
use std::path::Path;

use tracing::info;

/// Resolve the MongoDB connection string.
///
/// A mounted secret file named by `MONGODB_CONNECTION_STRING_FILE` wins;
/// otherwise the `MONGODB_CONNECTION_STRING` environment variable is used.
/// This runs once at startup, before the record store is created.
pub fn resolve_connection_string() -> Result<String, String> {
    if let Ok(path) = env::var("MONGODB_CONNECTION_STRING_FILE") {
        info!("Loading MongoDB connection string from secret file");
        return read_secret_file(Path::new(&path));
    }

    env::var("MONGODB_CONNECTION_STRING").map_err(|_| {
        "MONGODB_CONNECTION_STRING_FILE or MONGODB_CONNECTION_STRING must be set".to_string()
    })
}

fn read_secret_file(path: &Path) -> Result<String, String> {
    let contents = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read secret file {}: {}", path.display(), e))?;

    // Mounted secrets commonly end with a trailing newline
    let trimmed = contents.trim();
    if trimmed.is_empty() {
        return Err(format!("Secret file {} is empty", path.display()));
    }

    Ok(trimmed.to_string())
}

/// Serializes tests that mutate process-wide environment variables.
#[cfg(test)]
pub(crate) static ENV_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());
