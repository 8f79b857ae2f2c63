//! Runtime configuration read from environment variables.
//!
//! | Variable | Default |
//! |---|---|
//! | `BIND_ADDRESS` | `0.0.0.0:3000` |
//! | `PROFILE_STORE` | `memory` (or `astra`) |
//! | `ASTRA_DB_BASE_URL` | derived from `ASTRA_DB_ID` + `ASTRA_DB_REGION` |
//! | `ASTRA_DB_NAMESPACE` | required for `astra` |
//! | `ASTRA_DB_APPLICATION_TOKEN` | required for `astra` |
//! | `GEOCODING_API_KEY` | required |
//! | `GEOCODING_BASE_URL` | `https://maps.googleapis.com` |

use std::env;
use std::fmt;

use tracing::info;

use crate::document::AstraConfig;
use crate::geocoding::DEFAULT_GOOGLE_BASE_URL;

const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:3000";

/// Which document store backs the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    Memory,
    Astra(AstraConfig),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub bind_address: String,
    pub store: StoreBackend,
    pub geocoding_api_key: String,
    pub geocoding_base_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A required variable is unset or empty.
    Missing(&'static str),
    /// A variable holds a value we can't use.
    Invalid { key: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "environment variable {} is required", key),
            ConfigError::Invalid { key, value } => {
                write!(f, "environment variable {} has invalid value {:?}", key, value)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl Config {
    /// Load from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load through an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let or_default = |key: &str, default: &str| {
            var(key).unwrap_or_else(|| {
                info!("{key} not set, using default: {default}");
                default.to_string()
            })
        };

        let store = match or_default("PROFILE_STORE", "memory").to_ascii_lowercase().as_str() {
            "memory" => StoreBackend::Memory,
            "astra" => {
                let base_url = match var("ASTRA_DB_BASE_URL") {
                    Some(url) => url,
                    None => {
                        let db_id = var("ASTRA_DB_ID").ok_or(ConfigError::Missing("ASTRA_DB_ID"))?;
                        let region =
                            var("ASTRA_DB_REGION").ok_or(ConfigError::Missing("ASTRA_DB_REGION"))?;
                        AstraConfig::base_url_for(&db_id, &region)
                    }
                };
                StoreBackend::Astra(AstraConfig {
                    base_url,
                    namespace: var("ASTRA_DB_NAMESPACE")
                        .ok_or(ConfigError::Missing("ASTRA_DB_NAMESPACE"))?,
                    token: var("ASTRA_DB_APPLICATION_TOKEN")
                        .ok_or(ConfigError::Missing("ASTRA_DB_APPLICATION_TOKEN"))?,
                })
            }
            other => {
                return Err(ConfigError::Invalid {
                    key: "PROFILE_STORE",
                    value: other.to_string(),
                })
            }
        };

        Ok(Self {
            bind_address: or_default("BIND_ADDRESS", DEFAULT_BIND_ADDRESS),
            store,
            geocoding_api_key: var("GEOCODING_API_KEY")
                .ok_or(ConfigError::Missing("GEOCODING_API_KEY"))?,
            geocoding_base_url: or_default("GEOCODING_BASE_URL", DEFAULT_GOOGLE_BASE_URL),
        })
    }
}
