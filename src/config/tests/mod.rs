use std::io::Write;
use std::path::PathBuf;

use tempfile::NamedTempFile;

use crate::artifact::SchemaSelection;
use crate::config::parser::{load_config, load_config_or_default, parse_config, ConfigError};

// Helper function to create a temporary file with content
fn create_temp_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(content.as_bytes())
        .expect("Failed to write to temp file");
    file.flush().expect("Failed to flush temp file");
    file
}

#[test]
fn test_valid_configuration() {
    let config_yaml = r#"
    artifacts:
      dir: ./dist/contracts
      schema: legacy

    networks:
      - name: mainnet
        rpc_url: https://eth.llamarpc.com
        transaction_type: legacy
        gas_config:
          gas_limit: 6000000
          gas_price_gwei: 20
      - name: sepolia
        rpc_url: https://rpc.sepolia.org
        gas_config:
          max_fee_per_gas_gwei: 30.5
          max_priority_fee_per_gas_gwei: 2
    "#;

    let temp_file = create_temp_file(config_yaml);
    let config = load_config(temp_file.path()).expect("Failed to load valid config");

    assert_eq!(config.artifacts.dir, PathBuf::from("./dist/contracts"));
    assert_eq!(config.artifacts.schema, SchemaSelection::Legacy);
    assert_eq!(config.networks.len(), 2);

    let mainnet = config.network("mainnet").unwrap();
    assert_eq!(mainnet.rpc_url, "https://eth.llamarpc.com");
    assert_eq!(mainnet.transaction_type, "legacy");
    assert_eq!(mainnet.gas_config.gas_limit, Some(6_000_000));
    assert_eq!(mainnet.gas_config.gas_price_gwei, Some(20.0));

    let sepolia = config.network("sepolia").unwrap();
    assert_eq!(sepolia.transaction_type, "eip1559");
    assert_eq!(sepolia.gas_config.max_fee_per_gas_gwei, Some(30.5));
    assert_eq!(sepolia.gas_config.max_priority_fee_per_gas_gwei, Some(2.0));

    assert!(config.network("goerli").is_none());
}

#[test]
fn test_empty_configuration_uses_defaults() {
    let config = parse_config("{}").expect("Failed to parse empty config");

    assert_eq!(config.artifacts.dir, PathBuf::from("./dist/contracts"));
    assert_eq!(config.artifacts.schema, SchemaSelection::Auto);
    assert!(config.networks.is_empty());
}

#[test]
fn test_invalid_rpc_url() {
    let config_yaml = r#"
    networks:
      - name: mainnet
        rpc_url: not-a-url
    "#;

    let result = parse_config(config_yaml);
    assert!(matches!(result, Err(ConfigError::ValidationError(_))));
}

#[test]
fn test_invalid_transaction_type() {
    let config_yaml = r#"
    networks:
      - name: mainnet
        rpc_url: https://eth.llamarpc.com
        transaction_type: eip4844
    "#;

    let result = parse_config(config_yaml);
    assert!(matches!(result, Err(ConfigError::ValidationError(_))));
}

#[test]
fn test_gas_limit_too_low() {
    let config_yaml = r#"
    networks:
      - name: mainnet
        rpc_url: https://eth.llamarpc.com
        gas_config:
          gas_limit: 100
    "#;

    let result = parse_config(config_yaml);
    assert!(matches!(result, Err(ConfigError::ValidationError(_))));
}

#[test]
fn test_unknown_schema() {
    let config_yaml = r#"
    artifacts:
      schema: truffle
    "#;

    let result = parse_config(config_yaml);
    assert!(matches!(result, Err(ConfigError::ParseError(_))));
}

#[test]
fn test_duplicate_network_names() {
    let config_yaml = r#"
    networks:
      - name: mainnet
        rpc_url: https://eth.llamarpc.com
      - name: mainnet
        rpc_url: https://mainnet.infura.io/v3/key
    "#;

    let result = parse_config(config_yaml);
    match result {
        Err(ConfigError::Other(msg)) => assert!(msg.contains("'mainnet'")),
        other => panic!("expected duplicate network error, got {other:?}"),
    }
}

#[test]
fn test_missing_explicit_file() {
    let result = load_config_or_default(Some(std::path::Path::new(
        "/nonexistent/milestone-contracts.yaml",
    )));
    assert!(matches!(result, Err(ConfigError::FileError(_))));
}
