use std::env;

use crate::secrets;

/// Service configuration, resolved once at startup after `.env` loading.
#[derive(Debug, Clone)]
pub struct Config {
    pub connection_string: String,
    pub database_name: String,
    pub collection_name: String,
    pub allowed_origins: Vec<String>,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        let connection_string = secrets::resolve_connection_string()?;

        let database_name =
            env::var("MONGODB_DATABASE_NAME").unwrap_or_else(|_| "leaderboard".to_string());
        let collection_name =
            env::var("MONGODB_COLLECTION_NAME").unwrap_or_else(|_| "records".to_string());

        let allowed_origins = env::var("ALLOWED_ORIGINS")
            .unwrap_or_else(|_| "https://itch.io".to_string())
            .split(',')
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect();

        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|e| format!("Invalid PORT value: {}", e))?;

        Ok(Self {
            connection_string,
            database_name,
            collection_name,
            allowed_origins,
            port,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::secrets::ENV_LOCK;

    fn lock() -> std::sync::MutexGuard<'static, ()> {
        ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn clear_env() {
        for key in [
            "MONGODB_CONNECTION_STRING_FILE",
            "MONGODB_CONNECTION_STRING",
            "MONGODB_DATABASE_NAME",
            "MONGODB_COLLECTION_NAME",
            "ALLOWED_ORIGINS",
            "PORT",
        ] {
            env::remove_var(key);
        }
    }

    #[test]
    fn test_defaults_applied() {
        let _guard = lock();
        clear_env();
        env::set_var("MONGODB_CONNECTION_STRING", "mongodb://localhost:27017");

        let config = Config::from_env().unwrap();
        assert_eq!(config.database_name, "leaderboard");
        assert_eq!(config.collection_name, "records");
        assert_eq!(config.allowed_origins, vec!["https://itch.io".to_string()]);
        assert_eq!(config.port, 3000);

        clear_env();
    }

    #[test]
    fn test_origins_parsed_from_comma_separated_list() {
        let _guard = lock();
        clear_env();
        env::set_var("MONGODB_CONNECTION_STRING", "mongodb://localhost:27017");
        env::set_var(
            "ALLOWED_ORIGINS",
            "https://itch.io, https://html-classic.itch.zone",
        );

        let config = Config::from_env().unwrap();
        assert_eq!(
            config.allowed_origins,
            vec![
                "https://itch.io".to_string(),
                "https://html-classic.itch.zone".to_string()
            ]
        );

        clear_env();
    }

    #[test]
    fn test_invalid_port_is_an_error() {
        let _guard = lock();
        clear_env();
        env::set_var("MONGODB_CONNECTION_STRING", "mongodb://localhost:27017");
        env::set_var("PORT", "not-a-port");

        assert!(Config::from_env().unwrap_err().contains("Invalid PORT"));

        clear_env();
    }
}
