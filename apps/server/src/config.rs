//! Environment-based server configuration, read once at startup.

use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    /// Address the HTTP server binds to.
    pub listen_addr: String,
    /// Path of the SQLite database file.
    pub db_path: String,
    /// Path of the static outlook document served at /api/outlook.
    pub outlook_path: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            listen_addr: env::var("MF_LISTEN_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string()),
            db_path: env::var("MF_DB_PATH").unwrap_or_else(|_| "data/modelfolio.db".to_string()),
            outlook_path: env::var("MF_OUTLOOK_PATH")
                .unwrap_or_else(|_| "data/outlook.json".to_string()),
        }
    }
}
