//! Error types for artifact loading

use std::path::PathBuf;

use thiserror::Error;

use super::schema::ArtifactSchema;

/// Errors that can occur while reading a contract artifact
#[derive(Debug, Error)]
pub enum ArtifactError {
    /// The artifact file could not be read
    #[error("Failed to read artifact {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The artifact is not valid JSON
    #[error("Failed to parse artifact '{name}' as JSON: {source}")]
    Json {
        name: String,
        #[source]
        source: serde_json::Error,
    },

    /// Neither schema's root field is present
    #[error(
        "Artifact '{name}' matches no known schema (expected a 'compilerOutput' or 'abiDefinition' field)"
    )]
    UnknownSchema { name: String },

    /// An explicitly selected schema does not fit the document
    #[error("Artifact '{name}' does not match the {expected} schema: missing '{missing_field}'")]
    SchemaMismatch {
        name: String,
        expected: ArtifactSchema,
        missing_field: &'static str,
    },

    /// The schema matched but a required field is absent
    #[error("Artifact '{name}' is missing field '{field}'")]
    MissingField { name: String, field: &'static str },

    /// The ABI field could not be parsed
    #[error("Artifact '{name}' has an invalid ABI: {reason}")]
    InvalidAbi { name: String, reason: String },

    /// A bytecode field is not a hex string
    #[error("Artifact '{name}' has invalid bytecode in '{field}': {reason}")]
    InvalidBytecode {
        name: String,
        field: &'static str,
        reason: String,
    },

    /// Bytecode still contains library link placeholders
    #[error("Artifact '{name}' has unlinked library placeholders in '{field}'")]
    UnlinkedBytecode { name: String, field: &'static str },
}

/// Result type for artifact operations
pub type Result<T> = std::result::Result<T, ArtifactError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ArtifactError::SchemaMismatch {
            name: "LPMilestone".to_string(),
            expected: ArtifactSchema::Standard,
            missing_field: "compilerOutput",
        };
        assert_eq!(
            err.to_string(),
            "Artifact 'LPMilestone' does not match the standard schema: missing 'compilerOutput'"
        );

        let err = ArtifactError::UnlinkedBytecode {
            name: "MilestoneFactory".to_string(),
            field: "code",
        };
        assert_eq!(
            err.to_string(),
            "Artifact 'MilestoneFactory' has unlinked library placeholders in 'code'"
        );
    }
}
