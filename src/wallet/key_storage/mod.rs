use anyhow::Result;
use async_trait::async_trait;
use secrecy::SecretString;

pub mod env;

pub use env::EnvVarStorage;

/// Source of signing keys, looked up per network
#[async_trait]
pub trait KeyStorage: Send + Sync {
    async fn get_key(&self, network: &str) -> Result<SecretString>;
    async fn list_keys(&self) -> Result<Vec<String>>;
}
