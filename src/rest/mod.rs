//! [`Store`](crate::draft::Store) adapter for a PostgREST-style hosted backend.
//!
//! Rows live in the `dfds`, `materiais_servicos` and `responsaveis`
//! tables under `{base_url}/rest/v1/`. Requests carry the project key both
//! as `apikey` and as a bearer token.
//!
//! # Example
//!
//! ```ignore
//! use contrata::draft::*;
//! use contrata::rest::*;
//!
//! let store = RestStore::new(RestConfig::from_env()?)?;
//! let saved = submit(&draft, &store, user_id).await?;
//! send(&store, saved.id.unwrap()).await?;
//! ```

mod client;
mod rows;

pub use client::RestStore;

use serde::{Deserialize, Serialize};

use crate::core::PcaError;

/// Connection settings for [`RestStore`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestConfig {
    /// Project URL, e.g. `https://xyz.supabase.co`.
    pub base_url: String,
    pub api_key: String,
    /// Database schema sent as `Accept-Profile`/`Content-Profile`.
    /// `None` uses the backend's default schema.
    pub schema: Option<String>,
    pub timeout_secs: u64,
}

impl Default for RestConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            api_key: String::new(),
            schema: None,
            timeout_secs: 30,
        }
    }
}

pub const ENV_API_URL: &str = "CONTRATA_API_URL";
pub const ENV_API_KEY: &str = "CONTRATA_API_KEY";
pub const ENV_API_SCHEMA: &str = "CONTRATA_API_SCHEMA";
pub const ENV_API_TIMEOUT_SECS: &str = "CONTRATA_API_TIMEOUT_SECS";

impl RestConfig {
    /// Read the settings from `CONTRATA_API_*` environment variables.
    pub fn from_env() -> Result<Self, PcaError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the settings through `lookup`, which maps a variable name to
    /// its value. URL and key are required.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, PcaError> {
        let required = |key: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| PcaError::Builder(format!("{key} is not set")))
        };
        let base_url = required(ENV_API_URL)?;
        let api_key = required(ENV_API_KEY)?;
        let schema = lookup(ENV_API_SCHEMA).filter(|v| !v.trim().is_empty());
        let timeout_secs = match lookup(ENV_API_TIMEOUT_SECS) {
            Some(v) => v.trim().parse().map_err(|_| {
                PcaError::Builder(format!("{ENV_API_TIMEOUT_SECS} is not a number: {v}"))
            })?,
            None => Self::default().timeout_secs,
        };
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            schema,
            timeout_secs,
        })
    }

    /// Endpoint of a table.
    pub fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{table}", self.base_url.trim_end_matches('/'))
    }
}
