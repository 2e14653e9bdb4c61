//! Gas settings applied to outgoing transactions

use alloy::network::{Network, TransactionBuilder};
use tracing::debug;

use crate::config::models::Network as NetworkConfig;

/// How gas is priced on a transaction
#[derive(Debug, Clone, Default, PartialEq)]
pub enum GasPricing {
    /// Leave pricing to the provider's fillers
    #[default]
    ProviderDefault,
    /// Legacy `gasPrice`
    Legacy { gas_price_wei: Option<u128> },
    /// EIP-1559 fee caps
    Eip1559 {
        max_fee_per_gas_wei: Option<u128>,
        max_priority_fee_per_gas_wei: Option<u128>,
    },
}

/// Gas limit and pricing for a transaction
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GasSettings {
    pub gas_limit: Option<u64>,
    pub pricing: GasPricing,
}

impl GasSettings {
    /// Derive settings from a network's configuration
    pub fn from_network(network: &NetworkConfig) -> Self {
        let gas = &network.gas_config;

        let pricing = match network.transaction_type.to_lowercase().as_str() {
            "legacy" => GasPricing::Legacy {
                gas_price_wei: gas.gas_price_gwei.map(gwei_to_wei),
            },
            "eip1559" => GasPricing::Eip1559 {
                max_fee_per_gas_wei: gas.max_fee_per_gas_gwei.map(gwei_to_wei),
                max_priority_fee_per_gas_wei: gas.max_priority_fee_per_gas_gwei.map(gwei_to_wei),
            },
            _ => GasPricing::ProviderDefault,
        };

        Self {
            gas_limit: gas.gas_limit,
            pricing,
        }
    }

    /// Override the gas limit
    pub fn with_gas_limit(mut self, gas_limit: u64) -> Self {
        self.gas_limit = Some(gas_limit);
        self
    }

    /// Apply the settings to a transaction request
    pub fn apply<N>(&self, tx: &mut N::TransactionRequest)
    where
        N: Network,
        N::TransactionRequest: TransactionBuilder<N>,
    {
        if let Some(gas_limit) = self.gas_limit {
            tx.set_gas_limit(gas_limit);
            debug!("Set gas limit: {}", gas_limit);
        }

        match &self.pricing {
            GasPricing::ProviderDefault => {
                debug!("No gas pricing configured, using provider defaults");
            }
            GasPricing::Legacy { gas_price_wei } => {
                if let Some(price) = gas_price_wei {
                    tx.set_gas_price(*price);
                    debug!("Set legacy gas price: {} wei", price);
                }
            }
            GasPricing::Eip1559 {
                max_fee_per_gas_wei,
                max_priority_fee_per_gas_wei,
            } => {
                if let Some(max_fee) = max_fee_per_gas_wei {
                    tx.set_max_fee_per_gas(*max_fee);
                    debug!("Set max fee per gas: {} wei", max_fee);
                }
                if let Some(priority_fee) = max_priority_fee_per_gas_wei {
                    tx.set_max_priority_fee_per_gas(*priority_fee);
                    debug!("Set max priority fee per gas: {} wei", priority_fee);
                }
            }
        }
    }
}

/// Convert gwei to wei
pub fn gwei_to_wei(gwei: f64) -> u128 {
    // 1 gwei = 10^9 wei
    (gwei * 1e9) as u128
}
