//! Error types for contract classes and bound instances

use thiserror::Error;

/// Errors that can occur when using a contract class
#[derive(Error, Debug)]
pub enum ContractError {
    /// No function matches the requested name, signature or selector
    #[error("Contract '{contract}' has no function '{function}'")]
    FunctionNotFound { contract: String, function: String },

    /// A bare function name matches several overloads
    #[error(
        "Function '{function}' on contract '{contract}' is overloaded; use one of: {candidates}"
    )]
    AmbiguousFunction {
        contract: String,
        function: String,
        candidates: String,
    },

    /// No event matches the requested name or signature
    #[error("Contract '{contract}' has no event '{event}'")]
    EventNotFound { contract: String, event: String },

    /// A bare event name matches several overloads
    #[error("Event '{event}' on contract '{contract}' is overloaded; use one of: {candidates}")]
    AmbiguousEvent {
        contract: String,
        event: String,
        candidates: String,
    },

    /// Wrong number of arguments for a function or constructor
    #[error("'{target}' expects {expected} arguments but got {got}")]
    ArgumentCount {
        target: String,
        expected: usize,
        got: usize,
    },

    /// An argument could not be converted to its ABI type
    #[error("Invalid argument {index} ('{param}') for '{target}': {reason}")]
    InvalidArgument {
        target: String,
        index: usize,
        param: String,
        reason: String,
    },

    /// ABI encoding failed
    #[error("Failed to encode '{target}': {reason}")]
    Encoding { target: String, reason: String },

    /// ABI decoding failed
    #[error("Failed to decode '{target}': {reason}")]
    Decoding { target: String, reason: String },

    /// The class has no creation bytecode
    #[error("Contract '{0}' has no bytecode and cannot be deployed")]
    NotDeployable(String),

    /// A log does not match any event in the ABI
    #[error("Contract '{contract}' has no event with topic {topic}")]
    UnknownEvent { contract: String, topic: String },

    /// The RPC provider returned an error
    #[error("Provider error: {0}")]
    Provider(String),

    /// The transaction was mined but reverted
    #[error("Transaction 0x{tx_hash:x} reverted")]
    TransactionFailed { tx_hash: alloy::primitives::TxHash },

    /// A deployment receipt carries no contract address
    #[error("Deployment transaction 0x{tx_hash:x} did not create a contract")]
    MissingContractAddress { tx_hash: alloy::primitives::TxHash },
}

/// Result type for contract operations
pub type Result<T> = std::result::Result<T, ContractError>;
