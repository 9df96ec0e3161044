// `hostconnect.toml` loading: file first, environment on top.

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use serde::Deserialize;

use hostconnect_core::{env, HostConnectOptions, Store};
use hostconnect_memory::MemoryStore;
use hostconnect_sqlx::SqlxStore;
use hostconnect_stripe::StripeConnectOptions;

pub const DEFAULT_CONFIG_FILE: &str = "hostconnect.toml";

/// `database.url` value selecting the in-memory store.
pub const MEMORY_DATABASE: &str = "memory";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub url: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: MEMORY_DATABASE.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Tables {
    database: DatabaseConfig,
    server: ServerConfig,
}

#[derive(Debug, Clone)]
pub struct CliConfig {
    pub options: HostConnectOptions,
    pub stripe: StripeConnectOptions,
    pub database: DatabaseConfig,
    pub server: ServerConfig,
}

impl CliConfig {
    /// Load `path` if it exists, then apply environment overrides.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = if path.exists() {
            tracing::debug!(path = %path.display(), "loading config");
            std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?
        } else {
            tracing::debug!(path = %path.display(), "config file not found, using environment");
            String::new()
        };

        Ok(Self::from_toml_str(&text)?.apply_env())
    }

    pub fn from_toml_str(text: &str) -> anyhow::Result<Self> {
        let tables: Tables = toml::from_str(text).context("invalid config")?;
        Ok(Self {
            options: HostConnectOptions::from_toml_str(text)?,
            stripe: StripeConnectOptions::from_toml_str(text)?,
            database: tables.database,
            server: tables.server,
        })
    }

    fn apply_env(mut self) -> Self {
        self.options = self.options.apply_env();
        self.stripe = self.stripe.apply_env();
        if let Some(url) = env::get_database_url_from_env() {
            self.database.url = url;
        }
        self
    }

    pub fn is_memory(&self) -> bool {
        self.database.url == MEMORY_DATABASE
    }

    /// Open the configured store. SQL stores are migrated before use.
    pub async fn open_store(&self) -> anyhow::Result<Arc<dyn Store>> {
        if self.is_memory() {
            return Ok(Arc::new(MemoryStore::new()));
        }

        let store = SqlxStore::connect(&self.database.url).await?;
        store.migrate().await?;
        Ok(Arc::new(store))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let config = CliConfig::from_toml_str("").unwrap();
        assert!(config.is_memory());
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.stripe.scope, "read_write");
    }

    #[test]
    fn parses_every_table() {
        let config = CliConfig::from_toml_str(
            r#"
            secret = "a-very-long-secret-for-signing-tokens"
            token_expires_in = 600

            [stripe]
            client_id = "ca_123"
            client_secret = "sk_test_456"
            redirect_uri = "https://example.com/stripe/oauth/callback"

            [database]
            url = "sqlite://hostconnect.db"

            [server]
            host = "0.0.0.0"
            port = 8080
            "#,
        )
        .unwrap();

        assert_eq!(config.options.token_expires_in, 600);
        assert_eq!(config.stripe.client_id, "ca_123");
        assert_eq!(
            config.stripe.redirect_uri.as_deref(),
            Some("https://example.com/stripe/oauth/callback")
        );
        assert!(!config.is_memory());
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn rejects_malformed_toml() {
        assert!(CliConfig::from_toml_str("secret = ").is_err());
    }
}
