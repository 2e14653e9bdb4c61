use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::artifact::SchemaSelection;

/// The main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct MilestoneConfig {
    /// Where the contract artifacts live and how to read them
    #[serde(default)]
    pub artifacts: ArtifactsConfig,

    /// Networks contracts can be deployed to or called on
    #[serde(default)]
    #[validate]
    pub networks: Vec<Network>,
}

impl MilestoneConfig {
    /// Look up a network by name
    pub fn network(&self, name: &str) -> Option<&Network> {
        self.networks.iter().find(|network| network.name == name)
    }
}

/// Location and schema of the compiled artifacts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactsConfig {
    /// Directory containing `<Contract>.json` files (default: "./dist/contracts")
    #[serde(default = "default_artifacts_dir")]
    pub dir: PathBuf,

    /// Artifact schema: "auto", "legacy" or "standard" (default: "auto")
    #[serde(default)]
    pub schema: SchemaSelection,
}

impl Default for ArtifactsConfig {
    fn default() -> Self {
        Self {
            dir: default_artifacts_dir(),
            schema: SchemaSelection::default(),
        }
    }
}

fn default_artifacts_dir() -> PathBuf {
    PathBuf::from(crate::constants::artifacts::DEFAULT_DIR)
}

/// Configuration for a blockchain network
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Network {
    /// Network name (e.g., "mainnet", "sepolia")
    #[validate(length(min = 1))]
    pub name: String,

    /// RPC URL for the network
    #[validate(url)]
    pub rpc_url: String,

    /// Transaction type to use ("legacy" or "eip1559")
    #[serde(default = "default_transaction_type")]
    #[validate(custom = "validate_transaction_type")]
    pub transaction_type: String,

    /// Gas configuration for this network
    #[serde(default)]
    #[validate]
    pub gas_config: GasConfig,
}

impl Default for Network {
    fn default() -> Self {
        Self {
            name: "localhost".to_string(),
            rpc_url: "http://localhost:8545".to_string(),
            transaction_type: default_transaction_type(),
            gas_config: GasConfig::default(),
        }
    }
}

/// Gas configuration for a network
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct GasConfig {
    /// Gas limit override (optional, the provider estimates if not provided)
    #[validate(range(min = 21000))]
    pub gas_limit: Option<u64>,

    /// For legacy transactions: gas price in gwei
    #[validate(range(min = 0.0))]
    pub gas_price_gwei: Option<f64>,

    /// For EIP-1559: max fee per gas in gwei
    #[validate(range(min = 0.0))]
    pub max_fee_per_gas_gwei: Option<f64>,

    /// For EIP-1559: max priority fee per gas in gwei
    #[validate(range(min = 0.0))]
    pub max_priority_fee_per_gas_gwei: Option<f64>,
}

fn default_transaction_type() -> String {
    "eip1559".to_string()
}

/// Validates that transaction type is either "legacy" or "eip1559"
pub fn validate_transaction_type(tx_type: &str) -> Result<(), ValidationError> {
    match tx_type.to_lowercase().as_str() {
        "legacy" | "eip1559" => Ok(()),
        _ => Err(ValidationError::new("invalid_transaction_type")),
    }
}
