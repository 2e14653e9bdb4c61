use thiserror::Error;

#[derive(Debug, Error)]
pub enum MilestoneError {
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::parser::ConfigError),

    #[error("Artifact error: {0}")]
    Artifact(#[from] crate::artifact::ArtifactError),

    #[error("Contract error: {0}")]
    Contract(#[from] crate::contracts::ContractError),

    #[error("Network error: {0}")]
    Network(#[from] crate::network::NetworkError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
