use anyhow::{Context, Result};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StoreBackend {
    /// `database_url` carries the endpoint and credential of the client table.
    Postgres { database_url: String },
    Memory,
}

#[derive(Clone, Debug)]
pub struct ServiceConfig {
    pub store_backend: StoreBackend,
    pub http_addr: String,
}

impl ServiceConfig {
    pub fn from_env(default_http_addr: &str) -> Result<Self> {
        Self::from_lookup(default_http_addr, |key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(default_http_addr: &str, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let kind = lookup("NEXUS_STORE").unwrap_or_else(|| "postgres".to_string());

        let store_backend = match kind.trim().to_ascii_lowercase().as_str() {
            "postgres" | "pg" => StoreBackend::Postgres {
                database_url: lookup("DATABASE_URL").context("DATABASE_URL is required")?,
            },
            "memory" => StoreBackend::Memory,
            other => {
                anyhow::bail!("unknown NEXUS_STORE '{other}'; expected postgres or memory")
            }
        };

        let http_addr = lookup("HTTP_ADDR").unwrap_or_else(|| default_http_addr.to_string());

        Ok(Self {
            store_backend,
            http_addr,
        })
    }
}
