//! Application-wide constants
//!
//! Default paths and environment variable names used throughout the crate.

/// Artifact-related constants
pub mod artifacts {
    /// Directory the compiled contract artifacts are read from by default
    pub const DEFAULT_DIR: &str = "./dist/contracts";
}

/// Configuration-related constants
pub mod config {
    /// Directory under the user's home holding the configuration file
    pub const CONFIG_DIR: &str = ".milestone-contracts";

    /// Configuration file name
    pub const CONFIG_FILE: &str = "config.yaml";
}

/// Key storage constants
pub mod keys {
    /// Prefix of per-network private key environment variables
    pub const NETWORK_ENV_PREFIX: &str = "MILESTONE_PRIVATE_KEY_";

    /// Variable consulted when no network-specific key is set
    pub const DEFAULT_FALLBACK_ENV: &str = "PRIVATE_KEY";
}
