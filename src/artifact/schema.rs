//! Artifact schema versions and the field paths each one uses

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::error::{ArtifactError, Result};

/// Layout of a compiler artifact document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactSchema {
    /// Top-level `abiDefinition` and `code` fields
    Legacy,
    /// Solidity standard-json output nested under `compilerOutput`
    Standard,
}

impl ArtifactSchema {
    /// Field whose presence identifies the schema
    pub fn root_field(&self) -> &'static str {
        match self {
            Self::Legacy => "abiDefinition",
            Self::Standard => "compilerOutput",
        }
    }

    /// Dotted path to the ABI array
    pub fn abi_path(&self) -> &'static str {
        match self {
            Self::Legacy => "abiDefinition",
            Self::Standard => "compilerOutput.abi",
        }
    }

    /// Dotted path to the creation bytecode
    pub fn bytecode_path(&self) -> &'static str {
        match self {
            Self::Legacy => "code",
            Self::Standard => "compilerOutput.evm.bytecode.object",
        }
    }

    /// Dotted path to the runtime bytecode, when the artifact carries it
    pub fn deployed_bytecode_path(&self) -> &'static str {
        match self {
            Self::Legacy => "runtimeBytecode",
            Self::Standard => "compilerOutput.evm.deployedBytecode.object",
        }
    }

    /// Top-level keys that may hold the contract name
    pub fn name_fields(&self) -> &'static [&'static str] {
        match self {
            Self::Legacy => &["className", "contractName"],
            Self::Standard => &["contractName"],
        }
    }

    /// Work out which schema a document uses.
    ///
    /// `compilerOutput` wins when both root fields are present.
    pub fn detect(name: &str, doc: &Value) -> Result<Self> {
        [Self::Standard, Self::Legacy]
            .into_iter()
            .find(|schema| doc.get(schema.root_field()).is_some())
            .ok_or_else(|| ArtifactError::UnknownSchema {
                name: name.to_string(),
            })
    }
}

impl fmt::Display for ArtifactSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Legacy => write!(f, "legacy"),
            Self::Standard => write!(f, "standard"),
        }
    }
}

/// Which schema to expect when reading artifacts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaSelection {
    /// Detect the schema from the document
    #[default]
    Auto,
    Legacy,
    Standard,
}

impl SchemaSelection {
    /// Resolve the selection against a concrete document
    pub fn resolve(self, name: &str, doc: &Value) -> Result<ArtifactSchema> {
        let schema = match self {
            Self::Auto => return ArtifactSchema::detect(name, doc),
            Self::Legacy => ArtifactSchema::Legacy,
            Self::Standard => ArtifactSchema::Standard,
        };

        if doc.get(schema.root_field()).is_none() {
            return Err(ArtifactError::SchemaMismatch {
                name: name.to_string(),
                expected: schema,
                missing_field: schema.root_field(),
            });
        }

        Ok(schema)
    }
}

impl FromStr for SchemaSelection {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "legacy" => Ok(Self::Legacy),
            "standard" => Ok(Self::Standard),
            other => Err(format!(
                "unknown artifact schema '{other}' (expected auto, legacy or standard)"
            )),
        }
    }
}

impl fmt::Display for SchemaSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Auto => write!(f, "auto"),
            Self::Legacy => write!(f, "legacy"),
            Self::Standard => write!(f, "standard"),
        }
    }
}

/// Follow a dotted path through nested JSON objects
pub(crate) fn lookup<'a>(doc: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.').try_fold(doc, |value, key| value.get(key))
}
