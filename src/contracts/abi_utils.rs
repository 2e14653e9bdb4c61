//! Conversion between JSON values and ABI values
//!
//! Callers hand arguments over as JSON (from the command line or a config
//! file); these helpers turn them into [`DynSolValue`]s typed by the ABI
//! parameters, and turn decoded outputs back into JSON for display.

use alloy::dyn_abi::{DynSolType, DynSolValue, Specifier};
use alloy::json_abi::Param;
use alloy::primitives::{Address, I256, U256};
use alloy::sol_types::Word;
use serde_json::Value;
use std::str::FromStr;

use super::error::{ContractError, Result};

/// Convert JSON arguments into ABI values for a parameter list
///
/// # Arguments
/// * `target` - Signature used in error messages, e.g. "withdraw(address)"
/// * `params` - ABI parameters of the function, constructor or event
/// * `values` - One JSON value per parameter
pub fn coerce_params(target: &str, params: &[Param], values: &[Value]) -> Result<Vec<DynSolValue>> {
    if params.len() != values.len() {
        return Err(ContractError::ArgumentCount {
            target: target.to_string(),
            expected: params.len(),
            got: values.len(),
        });
    }

    params
        .iter()
        .zip(values)
        .enumerate()
        .map(|(index, (param, value))| {
            let invalid = |reason: String| ContractError::InvalidArgument {
                target: target.to_string(),
                index,
                param: param.name.clone(),
                reason,
            };

            let sol_type = param.resolve().map_err(|e| invalid(e.to_string()))?;
            json_to_dyn_sol_value(value, &sol_type).map_err(invalid)
        })
        .collect()
}

/// Convert a JSON value to a DynSolValue of the expected type
pub fn json_to_dyn_sol_value(
    value: &Value,
    sol_type: &DynSolType,
) -> std::result::Result<DynSolValue, String> {
    match (value, sol_type) {
        (Value::String(s), DynSolType::Address) => Address::from_str(s.trim())
            .map(DynSolValue::Address)
            .map_err(|e| format!("invalid address '{s}': {e}")),

        (Value::String(s), DynSolType::Uint(bits)) => {
            let val =
                U256::from_str(s.trim()).map_err(|e| format!("invalid uint{bits} '{s}': {e}"))?;
            check_uint_width(val, *bits)?;
            Ok(DynSolValue::Uint(val, *bits))
        }
        (Value::Number(n), DynSolType::Uint(bits)) => {
            let val = n
                .as_u64()
                .ok_or_else(|| format!("{n} is not a valid uint{bits}; pass large values as strings"))?;
            let val = U256::from(val);
            check_uint_width(val, *bits)?;
            Ok(DynSolValue::Uint(val, *bits))
        }

        (Value::String(s), DynSolType::Int(bits)) => {
            let val =
                I256::from_str(s.trim()).map_err(|e| format!("invalid int{bits} '{s}': {e}"))?;
            check_int_width(val, *bits)?;
            Ok(DynSolValue::Int(val, *bits))
        }
        (Value::Number(n), DynSolType::Int(bits)) => {
            let val = n
                .as_i64()
                .ok_or_else(|| format!("{n} is not a valid int{bits}; pass large values as strings"))?;
            let val = I256::try_from(val).map_err(|e| e.to_string())?;
            check_int_width(val, *bits)?;
            Ok(DynSolValue::Int(val, *bits))
        }

        (Value::Bool(b), DynSolType::Bool) => Ok(DynSolValue::Bool(*b)),
        (Value::String(s), DynSolType::Bool) => s
            .trim()
            .parse::<bool>()
            .map(DynSolValue::Bool)
            .map_err(|e| format!("invalid bool '{s}': {e}")),

        (Value::String(s), DynSolType::String) => Ok(DynSolValue::String(s.clone())),
        (Value::Number(n), DynSolType::String) => Ok(DynSolValue::String(n.to_string())),
        (Value::Bool(b), DynSolType::String) => Ok(DynSolValue::String(b.to_string())),

        (Value::String(s), DynSolType::Bytes) => decode_hex(s).map(DynSolValue::Bytes),

        (Value::String(s), DynSolType::FixedBytes(size)) => {
            let bytes = decode_hex(s)?;
            if bytes.len() != *size {
                return Err(format!("expected {} bytes but got {}", size, bytes.len()));
            }

            let mut word = Word::ZERO;
            word[..*size].copy_from_slice(&bytes);
            Ok(DynSolValue::FixedBytes(word, *size))
        }

        (Value::Array(items), DynSolType::Array(inner)) => items
            .iter()
            .map(|item| json_to_dyn_sol_value(item, inner))
            .collect::<std::result::Result<Vec<_>, _>>()
            .map(DynSolValue::Array),

        (Value::Array(items), DynSolType::FixedArray(inner, size)) => {
            if items.len() != *size {
                return Err(format!(
                    "expected array of size {} but got {}",
                    size,
                    items.len()
                ));
            }
            items
                .iter()
                .map(|item| json_to_dyn_sol_value(item, inner))
                .collect::<std::result::Result<Vec<_>, _>>()
                .map(DynSolValue::FixedArray)
        }

        (Value::Array(items), DynSolType::Tuple(types)) => {
            if items.len() != types.len() {
                return Err(format!(
                    "expected tuple of {} elements but got {}",
                    types.len(),
                    items.len()
                ));
            }
            items
                .iter()
                .zip(types)
                .map(|(item, ty)| json_to_dyn_sol_value(item, ty))
                .collect::<std::result::Result<Vec<_>, _>>()
                .map(DynSolValue::Tuple)
        }

        _ => Err(format!(
            "cannot use {} as {}",
            json_kind(value),
            sol_type.sol_type_name()
        )),
    }
}

/// Convert a decoded ABI value to JSON.
///
/// Integers become decimal strings so that 256-bit values survive.
pub fn dyn_sol_value_to_json(value: &DynSolValue) -> Value {
    match value {
        DynSolValue::Address(addr) => Value::String(addr.to_checksum(None)),
        DynSolValue::Uint(val, _) => Value::String(val.to_string()),
        DynSolValue::Int(val, _) => Value::String(val.to_string()),
        DynSolValue::Bool(b) => Value::Bool(*b),
        DynSolValue::String(s) => Value::String(s.clone()),
        DynSolValue::Bytes(bytes) => Value::String(format!("0x{}", hex::encode(bytes))),
        DynSolValue::FixedBytes(word, size) => {
            Value::String(format!("0x{}", hex::encode(&word[..*size])))
        }
        DynSolValue::Array(items) | DynSolValue::FixedArray(items) | DynSolValue::Tuple(items) => {
            Value::Array(items.iter().map(dyn_sol_value_to_json).collect())
        }
        other => Value::String(format!("{other:?}")),
    }
}

/// Parse a command-line argument as JSON, falling back to a plain string.
///
/// Bare numbers stay as their original text so that values wider than 64
/// bits reach the integer conversion intact.
pub fn parse_cli_argument(raw: &str) -> Value {
    match serde_json::from_str(raw) {
        Ok(Value::Number(_)) | Err(_) => Value::String(raw.trim().to_string()),
        Ok(value) => value,
    }
}

fn check_uint_width(val: U256, bits: usize) -> std::result::Result<(), String> {
    if val.bit_len() > bits {
        return Err(format!("{val} does not fit in uint{bits}"));
    }
    Ok(())
}

fn check_int_width(val: I256, bits: usize) -> std::result::Result<(), String> {
    if bits == 0 || bits > 256 {
        return Err(format!("invalid int width {bits}"));
    }

    // Two's complement range of intN: [-2^(N-1), 2^(N-1) - 1]
    let limit = U256::from(1u8) << (bits - 1);
    let magnitude = val.unsigned_abs();
    let fits = if val.is_negative() {
        magnitude <= limit
    } else {
        magnitude < limit
    };

    if !fits {
        return Err(format!("{val} does not fit in int{bits}"));
    }
    Ok(())
}

fn decode_hex(s: &str) -> std::result::Result<Vec<u8>, String> {
    let trimmed = s.trim();
    hex::decode(trimmed.strip_prefix("0x").unwrap_or(trimmed))
        .map_err(|e| format!("invalid hex bytes '{s}': {e}"))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::address;
    use serde_json::json;

    fn param(name: &str, ty: &str) -> Param {
        Param {
            ty: ty.to_string(),
            name: name.to_string(),
            components: vec![],
            internal_type: None,
        }
    }

    #[test]
    fn test_coerce_params() {
        let params = vec![
            param("_name", "string"),
            param("_reviewer", "address"),
            param("_maxAmount", "uint256"),
        ];
        let values = vec![
            json!("Build a bridge"),
            json!("0x0000000000000000000000000000000000000001"),
            json!("1000000000000000000000"),
        ];

        let coerced = coerce_params("constructor", &params, &values).unwrap();
        assert_eq!(coerced.len(), 3);
        assert!(matches!(&coerced[0], DynSolValue::String(s) if s == "Build a bridge"));
        assert_eq!(
            coerced[1],
            DynSolValue::Address(address!("0000000000000000000000000000000000000001"))
        );
        assert_eq!(
            coerced[2],
            DynSolValue::Uint(U256::from(10u64).pow(U256::from(21u64)), 256)
        );
    }

    #[test]
    fn test_coerce_params_count_mismatch() {
        let params = vec![param("token", "address")];
        let result = coerce_params("withdraw(address)", &params, &[]);
        assert!(matches!(
            result,
            Err(ContractError::ArgumentCount {
                expected: 1,
                got: 0,
                ..
            })
        ));
    }

    #[test]
    fn test_coerce_params_reports_bad_argument() {
        let params = vec![param("newRecipient", "address")];
        let err = coerce_params("changeRecipient(address)", &params, &[json!("nope")]).unwrap_err();
        match err {
            ContractError::InvalidArgument { index, param, .. } => {
                assert_eq!(index, 0);
                assert_eq!(param, "newRecipient");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_uint_width_is_checked() {
        assert!(json_to_dyn_sol_value(&json!(255), &DynSolType::Uint(8)).is_ok());
        assert!(json_to_dyn_sol_value(&json!(256), &DynSolType::Uint(8)).is_err());
        assert!(json_to_dyn_sol_value(&json!("0xff"), &DynSolType::Uint(8)).is_ok());
    }

    #[test]
    fn test_int_width_is_checked() {
        assert!(json_to_dyn_sol_value(&json!(127), &DynSolType::Int(8)).is_ok());
        assert!(json_to_dyn_sol_value(&json!(-128), &DynSolType::Int(8)).is_ok());
        assert_eq!(
            json_to_dyn_sol_value(&json!(1000), &DynSolType::Int(8)).unwrap_err(),
            "1000 does not fit in int8"
        );
        assert!(json_to_dyn_sol_value(&json!(128), &DynSolType::Int(8)).is_err());
        assert!(json_to_dyn_sol_value(&json!("-129"), &DynSolType::Int(8)).is_err());
        assert!(json_to_dyn_sol_value(&json!("-1"), &DynSolType::Int(256)).is_ok());
    }

    #[test]
    fn test_wei_amount_from_cli() {
        let amount = parse_cli_argument("1000000000000000000000");
        assert_eq!(amount, json!("1000000000000000000000"));

        let value = json_to_dyn_sol_value(&amount, &DynSolType::Uint(256)).unwrap();
        assert_eq!(
            value,
            DynSolValue::Uint(U256::from(10u64).pow(U256::from(21u64)), 256)
        );

        let name = json_to_dyn_sol_value(&parse_cli_argument("2024"), &DynSolType::String).unwrap();
        assert_eq!(name, DynSolValue::String("2024".to_string()));
        assert_eq!(
            json_to_dyn_sol_value(&json!(7), &DynSolType::String).unwrap(),
            DynSolValue::String("7".to_string())
        );
    }

    #[test]
    fn test_nested_values() {
        let ty = DynSolType::Array(Box::new(DynSolType::Address));
        let value = json_to_dyn_sol_value(
            &json!([
                "0x0000000000000000000000000000000000000001",
                "0x0000000000000000000000000000000000000002"
            ]),
            &ty,
        )
        .unwrap();
        assert!(matches!(value, DynSolValue::Array(ref items) if items.len() == 2));

        let ty = DynSolType::Tuple(vec![DynSolType::Bool, DynSolType::Int(64)]);
        let value = json_to_dyn_sol_value(&json!([true, -5]), &ty).unwrap();
        assert_eq!(
            value,
            DynSolValue::Tuple(vec![
                DynSolValue::Bool(true),
                DynSolValue::Int(I256::try_from(-5i64).unwrap(), 64)
            ])
        );
    }

    #[test]
    fn test_fixed_bytes() {
        let value = json_to_dyn_sol_value(&json!("0xabcd"), &DynSolType::FixedBytes(2)).unwrap();
        match value {
            DynSolValue::FixedBytes(word, 2) => assert_eq!(&word[..2], &[0xab, 0xcd]),
            other => panic!("unexpected value: {other:?}"),
        }

        assert!(json_to_dyn_sol_value(&json!("0xabcd"), &DynSolType::FixedBytes(4)).is_err());
    }

    #[test]
    fn test_type_mismatch() {
        let err = json_to_dyn_sol_value(&json!({ "a": 1 }), &DynSolType::Address).unwrap_err();
        assert_eq!(err, "cannot use an object as address");
    }

    #[test]
    fn test_to_json() {
        let value = DynSolValue::Tuple(vec![
            DynSolValue::Address(address!("0000000000000000000000000000000000000001")),
            DynSolValue::Uint(U256::from(42u64), 256),
            DynSolValue::Bytes(vec![0xde, 0xad]),
        ]);
        assert_eq!(
            dyn_sol_value_to_json(&value),
            json!(["0x0000000000000000000000000000000000000001", "42", "0xdead"])
        );
    }

    #[test]
    fn test_parse_cli_argument() {
        assert_eq!(parse_cli_argument("42"), json!("42"));
        assert_eq!(parse_cli_argument("[1,2]"), json!([1, 2]));
        assert_eq!(parse_cli_argument("true"), json!(true));
        assert_eq!(
            parse_cli_argument("0x0000000000000000000000000000000000000001"),
            json!("0x0000000000000000000000000000000000000001")
        );
        assert_eq!(parse_cli_argument("Milestone 1"), json!("Milestone 1"));
    }
}
