use anyhow::{anyhow, Result};
use async_trait::async_trait;
use secrecy::SecretString;
use std::env;
use tracing::{debug, warn};

use super::KeyStorage;
use crate::constants::keys::{DEFAULT_FALLBACK_ENV, NETWORK_ENV_PREFIX};

/// Reads private keys from environment variables.
///
/// `MILESTONE_PRIVATE_KEY_<NETWORK>` is tried first (network name upper-cased,
/// dashes replaced by underscores), then the fallback variable.
#[derive(Debug, Clone)]
pub struct EnvVarStorage {
    fallback_var: String,
}

impl EnvVarStorage {
    pub fn new() -> Self {
        Self::with_fallback(DEFAULT_FALLBACK_ENV)
    }

    /// Use a different fallback variable than `PRIVATE_KEY`
    pub fn with_fallback(fallback_var: impl Into<String>) -> Self {
        Self {
            fallback_var: fallback_var.into(),
        }
    }

    pub fn get_env_var_name(network: &str) -> String {
        format!(
            "{}{}",
            NETWORK_ENV_PREFIX,
            network.to_uppercase().replace('-', "_")
        )
    }
}

impl Default for EnvVarStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl KeyStorage for EnvVarStorage {
    async fn get_key(&self, network: &str) -> Result<SecretString> {
        let env_var = Self::get_env_var_name(network);
        debug!(
            "Looking for private key in environment variable: {}",
            env_var
        );

        if let Ok(key) = env::var(&env_var) {
            return Ok(SecretString::from(key));
        }

        if let Ok(key) = env::var(&self.fallback_var) {
            warn!(
                "Using private key from '{}' for network '{}'. Set '{}' to use a network-specific key.",
                self.fallback_var, network, env_var
            );
            return Ok(SecretString::from(key));
        }

        Err(anyhow!(
            "Private key not found. Looked for '{}' and '{}' environment variables",
            env_var,
            self.fallback_var
        ))
    }

    async fn list_keys(&self) -> Result<Vec<String>> {
        let mut keys: Vec<String> = env::vars()
            .filter_map(|(key, _)| {
                key.strip_prefix(NETWORK_ENV_PREFIX)
                    .map(|network| network.to_lowercase().replace('_', "-"))
            })
            .collect();
        keys.sort();

        if env::var(&self.fallback_var).is_ok() && keys.is_empty() {
            keys.push("default".to_string());
        }

        Ok(keys)
    }
}
