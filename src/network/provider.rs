use std::collections::HashMap;
use std::sync::Arc;

use alloy::{
    network::{Ethereum, EthereumWallet},
    primitives::Address,
    providers::{Provider, ProviderBuilder, RootProvider},
    signers::local::PrivateKeySigner,
    transports::http::{Client, Http},
};
use anyhow::{Context, Result};
use secrecy::ExposeSecret;
use thiserror::Error;
use tracing::{debug, info};
use url::Url;

use super::gas::GasSettings;
use crate::config::models::Network;
use crate::wallet::key_storage::KeyStorage;

/// Errors that can occur when interacting with network providers
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("Network not found: {0}")]
    NetworkNotFound(String),

    #[error("Invalid RPC URL '{url}': {reason}")]
    InvalidRpcUrl { url: String, reason: String },
}

/// Type alias for the read-only alloy provider
pub type EthProvider = RootProvider<Http<Client>>;

/// Manages the connections to the configured EVM networks
pub struct NetworkManager {
    /// Network configuration by name
    networks: HashMap<String, Network>,

    /// Map of network name to read-only provider
    providers: HashMap<String, Arc<EthProvider>>,
}

impl NetworkManager {
    /// Create a new network manager from a list of network configurations
    pub fn new(networks: &[Network]) -> Result<Self> {
        let mut providers = HashMap::new();
        let mut configs = HashMap::new();

        for network in networks {
            let url = parse_rpc_url(&network.rpc_url)?;
            let provider = ProviderBuilder::new().on_http(url);

            providers.insert(network.name.clone(), Arc::new(provider));
            configs.insert(network.name.clone(), network.clone());
        }

        Ok(Self {
            networks: configs,
            providers,
        })
    }

    /// Get the configuration of a network
    pub fn get_network(&self, network_name: &str) -> Result<&Network> {
        self.networks
            .get(network_name)
            .ok_or_else(|| NetworkError::NetworkNotFound(network_name.to_string()).into())
    }

    /// Get a read-only provider for a network
    pub fn get_provider(&self, network_name: &str) -> Result<Arc<EthProvider>> {
        self.providers
            .get(network_name)
            .cloned()
            .ok_or_else(|| NetworkError::NetworkNotFound(network_name.to_string()).into())
    }

    /// Gas settings configured for a network
    pub fn gas_settings(&self, network_name: &str) -> Result<GasSettings> {
        self.get_network(network_name).map(GasSettings::from_network)
    }

    /// Get all configured network names
    pub fn get_network_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.networks.keys().cloned().collect();
        names.sort();
        names
    }

    /// Load the signer for a network from key storage
    pub async fn load_signer(
        &self,
        network_name: &str,
        key_storage: &dyn KeyStorage,
    ) -> Result<PrivateKeySigner> {
        self.get_network(network_name)?;

        debug!("Loading signer for network {} from key storage", network_name);
        let private_key = key_storage
            .get_key(network_name)
            .await
            .with_context(|| format!("Failed to retrieve key for network {}", network_name))?;

        let signer = private_key
            .expose_secret()
            .trim()
            .parse::<PrivateKeySigner>()
            .with_context(|| "Failed to parse private key as signer")?;

        info!(
            "Loaded wallet for network {} with address {}",
            network_name,
            signer.address()
        );

        Ok(signer)
    }

    /// Build a provider that signs transactions with the given signer
    pub fn signing_provider(
        &self,
        network_name: &str,
        signer: PrivateKeySigner,
    ) -> Result<(Address, impl Provider<Http<Client>, Ethereum>)> {
        let network = self.get_network(network_name)?;
        let url = parse_rpc_url(&network.rpc_url)?;

        let address = signer.address();
        let provider = ProviderBuilder::new()
            .with_recommended_fillers()
            .wallet(EthereumWallet::from(signer))
            .on_http(url);

        Ok((address, provider))
    }
}

fn parse_rpc_url(rpc_url: &str) -> Result<Url> {
    Url::parse(rpc_url).map_err(|e| {
        NetworkError::InvalidRpcUrl {
            url: rpc_url.to_string(),
            reason: e.to_string(),
        }
        .into()
    })
}
