//! Server configuration parsed from environment variables.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::path::PathBuf;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_CONTENT_DIR: &str = "content";
pub const DEFAULT_SITE_DIR: &str = "target/site";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid {var}: {value:?}")]
    Invalid { var: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
    /// `None` runs the likes store in memory only.
    pub database_url: Option<String>,
    pub content_dir: PathBuf,
    pub site_dir: PathBuf,
}

impl ServerConfig {
    /// Build typed server config from environment variables.
    ///
    /// Optional:
    /// - `PORT`: default 3000
    /// - `DATABASE_URL`: counts are not persisted when absent
    /// - `CONTENT_DIR`: article root, default `content`
    /// - `SITE_DIR`: static files, default `target/site`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when `PORT` is not a port number.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let non_empty = |key: &str| lookup(key).map(|v| v.trim().to_owned()).filter(|v| !v.is_empty());

        let port = match non_empty("PORT") {
            Some(raw) => raw.parse::<u16>().map_err(|_| ConfigError::Invalid { var: "PORT", value: raw })?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            port,
            database_url: non_empty("DATABASE_URL"),
            content_dir: non_empty("CONTENT_DIR").unwrap_or_else(|| DEFAULT_CONTENT_DIR.into()).into(),
            site_dir: non_empty("SITE_DIR").unwrap_or_else(|| DEFAULT_SITE_DIR.into()).into(),
        })
    }
}
