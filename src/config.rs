//! Runtime settings for the server and the database.

use std::path::Path;

use serde::Deserialize;

/// Default SQLite database path.
pub const DEFAULT_DATABASE_URL: &str = "smartbazaar.db";

/// Settings loaded from an optional TOML file with environment overrides.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// SQLite database path (or `sqlite:` URL).
    pub database_url: String,
    /// Address the web server binds to.
    pub host: String,
    /// Port the web server binds to.
    pub port: u16,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

impl Settings {
    /// Load settings: the TOML file if given, then `BAZAAR_*` environment
    /// variables on top, defaults for everything else.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let mut settings: Settings = match path {
            Some(p) => toml::from_str(&std::fs::read_to_string(p)?)?,
            None => Self::default(),
        };

        if let Ok(url) = std::env::var("BAZAAR_DATABASE_URL") {
            settings.database_url = url;
        }
        if let Ok(host) = std::env::var("BAZAAR_HOST") {
            settings.host = host;
        }
        if let Ok(port) = std::env::var("BAZAAR_PORT") {
            settings.port = port.parse()?;
        }

        Ok(settings)
    }
}
