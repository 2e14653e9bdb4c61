use alloy::primitives::{Address, TxHash};
use tracing::{error, info};

/// Standard transaction logging utilities
pub struct TransactionLogger;

impl TransactionLogger {
    /// Log transaction submission
    pub fn log_submission(action: &str, contract: &str) {
        info!("Submitting {} for contract '{}'", action, contract);
    }

    /// Log transaction confirmation
    pub fn log_confirmation(tx_hash: TxHash, gas_used: impl Into<u128>) {
        info!(
            "Transaction confirmed. Tx hash: 0x{:x}, Gas used: {}",
            tx_hash,
            gas_used.into()
        );
    }

    /// Log a completed deployment
    pub fn log_deployment(contract: &str, address: Address, tx_hash: TxHash) {
        info!(
            "Deployed '{}' at {} in tx 0x{:x}",
            contract, address, tx_hash
        );
    }

    /// Log transaction failure
    pub fn log_failure(action: &str, contract: &str, error: &str) {
        error!(
            "Failed to submit {} for contract '{}': {}",
            action, contract, error
        );
    }

    /// Log transaction details for debugging
    pub fn log_transaction_details(
        to_address: &str,
        function_name: Option<&str>,
        gas_limit: Option<u64>,
    ) {
        let mut details = format!("Transaction details - To: {to_address}");

        if let Some(func) = function_name {
            details.push_str(&format!(", Function: {func}"));
        }

        if let Some(limit) = gas_limit {
            details.push_str(&format!(", Gas limit: {limit}"));
        }

        info!("{}", details);
    }
}
