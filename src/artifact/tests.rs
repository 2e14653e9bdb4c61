use std::io::Write;

use serde_json::json;
use tempfile::NamedTempFile;

use super::*;

fn sample_abi() -> Value {
    json!([
        {
            "type": "constructor",
            "inputs": [{ "name": "_reviewer", "type": "address" }],
            "stateMutability": "nonpayable"
        },
        {
            "constant": true,
            "inputs": [],
            "name": "reviewer",
            "outputs": [{ "name": "", "type": "address" }],
            "payable": false,
            "stateMutability": "view",
            "type": "function"
        },
        {
            "anonymous": false,
            "inputs": [{ "indexed": true, "name": "milestone", "type": "address" }],
            "name": "DeployMilestone",
            "type": "event"
        }
    ])
}

fn legacy_doc(code: &str) -> Value {
    json!({
        "className": "LPMilestone",
        "abiDefinition": sample_abi(),
        "code": code,
    })
}

fn standard_doc(object: &str) -> Value {
    json!({
        "contractName": "LPMilestone",
        "compilerOutput": {
            "abi": sample_abi(),
            "evm": {
                "bytecode": { "object": object },
                "deployedBytecode": { "object": "6080" }
            }
        }
    })
}

#[test]
fn test_legacy_artifact() {
    let artifact =
        ContractArtifact::from_value("file", &legacy_doc("0x6080604052"), SchemaSelection::Auto)
            .unwrap();

    assert_eq!(artifact.name, "LPMilestone");
    assert_eq!(artifact.schema, ArtifactSchema::Legacy);
    assert_eq!(artifact.bytecode.as_ref(), &[0x60, 0x80, 0x60, 0x40, 0x52]);
    assert!(artifact.abi.constructor().is_some());
    assert_eq!(artifact.abi.functions().count(), 1);
    assert_eq!(artifact.abi.events().count(), 1);
    assert!(artifact.deployed_bytecode.is_none());
}

#[test]
fn test_standard_artifact() {
    let artifact =
        ContractArtifact::from_value("file", &standard_doc("6080604052"), SchemaSelection::Standard)
            .unwrap();

    assert_eq!(artifact.schema, ArtifactSchema::Standard);
    assert_eq!(artifact.bytecode.as_ref(), &[0x60, 0x80, 0x60, 0x40, 0x52]);
    assert_eq!(
        artifact.deployed_bytecode.as_ref().map(|code| code.to_vec()),
        Some(vec![0x60, 0x80])
    );
}

#[test]
fn test_prefix_does_not_change_bytecode() {
    let with_prefix =
        ContractArtifact::from_value("a", &legacy_doc("0xdeadbeef"), SchemaSelection::Auto)
            .unwrap();
    let without_prefix =
        ContractArtifact::from_value("a", &legacy_doc("deadbeef"), SchemaSelection::Auto).unwrap();

    assert_eq!(with_prefix.bytecode, without_prefix.bytecode);
}

#[test]
fn test_name_falls_back_to_hint() {
    let doc = json!({ "abiDefinition": sample_abi(), "code": "0x00" });
    let artifact = ContractArtifact::from_value("BridgedMilestone", &doc, SchemaSelection::Auto)
        .unwrap();
    assert_eq!(artifact.name, "BridgedMilestone");
}

#[test]
fn test_abi_encoded_as_string() {
    let doc = json!({
        "abiDefinition": sample_abi().to_string(),
        "code": "0x00",
    });
    let artifact = ContractArtifact::from_value("a", &doc, SchemaSelection::Legacy).unwrap();
    assert_eq!(artifact.abi.functions().count(), 1);
}

#[test]
fn test_wrong_explicit_schema() {
    let result =
        ContractArtifact::from_value("a", &legacy_doc("0x00"), SchemaSelection::Standard);
    assert!(matches!(
        result,
        Err(ArtifactError::SchemaMismatch {
            expected: ArtifactSchema::Standard,
            ..
        })
    ));
}

#[test]
fn test_missing_nested_bytecode() {
    let doc = json!({ "compilerOutput": { "abi": sample_abi(), "evm": {} } });
    let result = ContractArtifact::from_value("a", &doc, SchemaSelection::Auto);
    assert!(matches!(
        result,
        Err(ArtifactError::MissingField {
            field: "compilerOutput.evm.bytecode.object",
            ..
        })
    ));
}

#[test]
fn test_unlinked_bytecode_rejected() {
    let code = "0x6080__$a1b2c3d4e5f60718293a4b5c6d7e8f9012$__6040";
    let result = ContractArtifact::from_value("a", &legacy_doc(code), SchemaSelection::Auto);
    assert!(matches!(
        result,
        Err(ArtifactError::UnlinkedBytecode { field: "code", .. })
    ));
}

#[test]
fn test_invalid_bytecode() {
    let result = ContractArtifact::from_value("a", &legacy_doc("0xzz"), SchemaSelection::Auto);
    assert!(matches!(result, Err(ArtifactError::InvalidBytecode { .. })));

    let doc = json!({ "abiDefinition": sample_abi(), "code": 42 });
    let result = ContractArtifact::from_value("a", &doc, SchemaSelection::Auto);
    assert!(matches!(result, Err(ArtifactError::InvalidBytecode { .. })));
}

#[test]
fn test_invalid_abi() {
    let doc = json!({ "abiDefinition": { "not": "an abi" }, "code": "0x00" });
    let result = ContractArtifact::from_value("a", &doc, SchemaSelection::Auto);
    assert!(matches!(result, Err(ArtifactError::InvalidAbi { .. })));
}

#[test]
fn test_empty_bytecode_is_not_deployable() {
    let artifact =
        ContractArtifact::from_value("a", &standard_doc(""), SchemaSelection::Auto).unwrap();
    assert!(!artifact.is_deployable());
}

#[test]
fn test_from_file() {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(standard_doc("0x6080").to_string().as_bytes())
        .expect("Failed to write to temp file");
    file.flush().expect("Failed to flush temp file");

    let artifact = ContractArtifact::from_file(file.path(), SchemaSelection::Auto).unwrap();
    assert_eq!(artifact.name, "LPMilestone");
    assert_eq!(artifact.schema, ArtifactSchema::Standard);
}

#[test]
fn test_from_file_errors() {
    let result = ContractArtifact::from_file("/nonexistent/LPMilestone.json", SchemaSelection::Auto);
    assert!(matches!(result, Err(ArtifactError::Io { .. })));

    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(b"{ not json").expect("Failed to write to temp file");
    file.flush().expect("Failed to flush temp file");

    let result = ContractArtifact::from_file(file.path(), SchemaSelection::Auto);
    assert!(matches!(result, Err(ArtifactError::Json { .. })));
}
