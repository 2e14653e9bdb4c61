//! Compiler artifact loading
//!
//! An artifact is the JSON document a Solidity toolchain writes next to each
//! compiled contract. Two layouts are understood: the legacy one with top-level
//! `abiDefinition`/`code` fields and the standard-json one that nests ABI and
//! bytecode under `compilerOutput`. See [`ArtifactSchema`] for the exact paths.

pub mod error;
pub mod schema;
#[cfg(test)]
mod tests;

use std::fs;
use std::path::Path;

use alloy::json_abi::JsonAbi;
use alloy::primitives::Bytes;
use serde_json::Value;
use tracing::debug;

pub use error::{ArtifactError, Result};
pub use schema::{ArtifactSchema, SchemaSelection};

use schema::lookup;

/// ABI and bytecode extracted from a compiler artifact
#[derive(Debug, Clone)]
pub struct ContractArtifact {
    /// Contract name, from the artifact itself or the file stem
    pub name: String,
    /// Schema the fields were read with
    pub schema: ArtifactSchema,
    pub abi: JsonAbi,
    /// Creation bytecode; empty for interfaces and abstract contracts
    pub bytecode: Bytes,
    /// Runtime bytecode, when the artifact carries it
    pub deployed_bytecode: Option<Bytes>,
}

impl ContractArtifact {
    /// Read and parse an artifact file
    pub fn from_file(path: impl AsRef<Path>, selection: SchemaSelection) -> Result<Self> {
        let path = path.as_ref();
        let name_hint = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or("artifact");

        debug!("Reading artifact {:?} (schema: {})", path, selection);

        let content = fs::read_to_string(path).map_err(|source| ArtifactError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_json_str(name_hint, &content, selection)
    }

    /// Parse an artifact from its JSON text
    pub fn from_json_str(name_hint: &str, json: &str, selection: SchemaSelection) -> Result<Self> {
        let doc: Value = serde_json::from_str(json).map_err(|source| ArtifactError::Json {
            name: name_hint.to_string(),
            source,
        })?;

        Self::from_value(name_hint, &doc, selection)
    }

    /// Extract ABI and bytecode from an already parsed document
    pub fn from_value(name_hint: &str, doc: &Value, selection: SchemaSelection) -> Result<Self> {
        let schema = selection.resolve(name_hint, doc)?;

        let name = schema
            .name_fields()
            .iter()
            .find_map(|field| doc.get(*field).and_then(Value::as_str))
            .filter(|name| !name.is_empty())
            .unwrap_or(name_hint)
            .to_string();

        let abi_value = lookup(doc, schema.abi_path()).ok_or_else(|| ArtifactError::MissingField {
            name: name.clone(),
            field: schema.abi_path(),
        })?;
        let abi = parse_abi(&name, abi_value)?;

        let bytecode_value =
            lookup(doc, schema.bytecode_path()).ok_or_else(|| ArtifactError::MissingField {
                name: name.clone(),
                field: schema.bytecode_path(),
            })?;
        let bytecode = parse_bytecode(&name, schema.bytecode_path(), bytecode_value)?;

        let deployed_bytecode = match lookup(doc, schema.deployed_bytecode_path()) {
            Some(value) if !value.is_null() => Some(parse_bytecode(
                &name,
                schema.deployed_bytecode_path(),
                value,
            )?),
            _ => None,
        };

        debug!(
            "Loaded {} artifact '{}': {} functions, {} events, {} bytes of bytecode",
            schema,
            name,
            abi.functions().count(),
            abi.events().count(),
            bytecode.len()
        );

        Ok(Self {
            name,
            schema,
            abi,
            bytecode,
            deployed_bytecode,
        })
    }

    /// Whether the artifact has creation bytecode
    pub fn is_deployable(&self) -> bool {
        !self.bytecode.is_empty()
    }
}

/// Parse an ABI that is either a JSON array or a JSON-encoded string of one
fn parse_abi(name: &str, value: &Value) -> Result<JsonAbi> {
    let parsed = match value {
        Value::String(encoded) => serde_json::from_str::<JsonAbi>(encoded),
        other => serde_json::from_value::<JsonAbi>(other.clone()),
    };

    parsed.map_err(|e| ArtifactError::InvalidAbi {
        name: name.to_string(),
        reason: e.to_string(),
    })
}

/// Decode a hex bytecode field, with or without the `0x` prefix
fn parse_bytecode(name: &str, field: &'static str, value: &Value) -> Result<Bytes> {
    let hex_str = value.as_str().ok_or_else(|| ArtifactError::InvalidBytecode {
        name: name.to_string(),
        field,
        reason: format!("expected a hex string, got {value}"),
    })?;

    let trimmed = hex_str.trim();
    let digits = trimmed.strip_prefix("0x").unwrap_or(trimmed);

    // solc and older toolchains both mark link sites with double underscores
    if digits.contains("__") {
        return Err(ArtifactError::UnlinkedBytecode {
            name: name.to_string(),
            field,
        });
    }

    hex::decode(digits)
        .map(Bytes::from)
        .map_err(|e| ArtifactError::InvalidBytecode {
            name: name.to_string(),
            field,
            reason: e.to_string(),
        })
}
