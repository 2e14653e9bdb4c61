//! Contract classes generated from an ABI and bytecode
//!
//! A [`ContractClass`] is the binding type produced by [`generate_class`]. It
//! knows how to encode calls to every function in its ABI, build creation
//! code for deployment, decode outputs and logs, and bind itself to an
//! address on a network.

use std::sync::Arc;

use alloy::{
    dyn_abi::{DecodedEvent, DynSolValue, EventExt, FunctionExt, JsonAbiExt},
    json_abi::{Event, Function, JsonAbi},
    network::{Network, ReceiptResponse, TransactionBuilder},
    primitives::{Address, Bytes, B256},
    providers::Provider,
    transports::Transport,
};
use serde_json::Value;
use tracing::debug;

use super::abi_utils::coerce_params;
use super::error::{ContractError, Result};
use super::instance::BoundContract;
use crate::artifact::ContractArtifact;
use crate::network::GasSettings;
use crate::utils::TransactionLogger;

/// Build a contract class from an ABI and creation bytecode
pub fn generate_class(name: impl Into<String>, abi: JsonAbi, bytecode: impl Into<Bytes>) -> ContractClass {
    ContractClass {
        name: name.into(),
        abi: Arc::new(abi),
        bytecode: bytecode.into(),
        deployed_bytecode: None,
    }
}

/// Binding type for one compiled contract
#[derive(Debug, Clone)]
pub struct ContractClass {
    name: String,
    abi: Arc<JsonAbi>,
    bytecode: Bytes,
    deployed_bytecode: Option<Bytes>,
}

/// A log decoded against the class ABI
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedLog {
    /// Event name, e.g. "DeployMilestone"
    pub event: String,
    /// Full event signature
    pub signature: String,
    pub indexed: Vec<DynSolValue>,
    pub body: Vec<DynSolValue>,
}

impl ContractClass {
    /// Build a class from a loaded artifact
    pub fn from_artifact(artifact: ContractArtifact) -> Self {
        let mut class = generate_class(artifact.name, artifact.abi, artifact.bytecode);
        class.deployed_bytecode = artifact.deployed_bytecode;
        class
    }

    /// Attach runtime bytecode
    pub fn with_deployed_bytecode(mut self, code: impl Into<Bytes>) -> Self {
        self.deployed_bytecode = Some(code.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn abi(&self) -> &JsonAbi {
        &self.abi
    }

    /// Creation bytecode
    pub fn bytecode(&self) -> &Bytes {
        &self.bytecode
    }

    /// Runtime bytecode, if the artifact carried it
    pub fn deployed_bytecode(&self) -> Option<&Bytes> {
        self.deployed_bytecode.as_ref()
    }

    /// Whether the class has creation bytecode
    pub fn is_deployable(&self) -> bool {
        !self.bytecode.is_empty()
    }

    /// Resolve a function.
    ///
    /// Accepts a bare name ("withdraw"), a full signature ("withdraw(address)")
    /// or a 4-byte selector ("0x51cff8d9"). A bare name must not be overloaded.
    pub fn function(&self, selector: &str) -> Result<&Function> {
        let selector = selector.trim();
        let not_found = || ContractError::FunctionNotFound {
            contract: self.name.clone(),
            function: selector.to_string(),
        };

        if let Some(hex_selector) = selector.strip_prefix("0x") {
            let bytes = hex::decode(hex_selector).map_err(|_| not_found())?;
            return self
                .abi
                .functions()
                .find(|f| f.selector().as_slice() == bytes.as_slice())
                .ok_or_else(not_found);
        }

        if selector.contains('(') {
            let wanted = normalize_signature(selector);
            return self
                .abi
                .functions()
                .find(|f| f.signature() == wanted)
                .ok_or_else(not_found);
        }

        match self.abi.function(selector).map(Vec::as_slice) {
            Some([function]) => Ok(function),
            Some(overloads) if !overloads.is_empty() => Err(ContractError::AmbiguousFunction {
                contract: self.name.clone(),
                function: selector.to_string(),
                candidates: overloads
                    .iter()
                    .map(Function::signature)
                    .collect::<Vec<_>>()
                    .join(", "),
            }),
            _ => Err(not_found()),
        }
    }

    /// Resolve an event by bare name or full signature.
    ///
    /// A bare name must not be overloaded.
    pub fn event(&self, selector: &str) -> Result<&Event> {
        let selector = selector.trim();
        let not_found = || ContractError::EventNotFound {
            contract: self.name.clone(),
            event: selector.to_string(),
        };

        if selector.contains('(') {
            let wanted = normalize_signature(selector);
            return self
                .abi
                .events()
                .find(|e| e.signature() == wanted)
                .ok_or_else(not_found);
        }

        match self.abi.event(selector).map(Vec::as_slice) {
            Some([event]) => Ok(event),
            Some(overloads) if !overloads.is_empty() => Err(ContractError::AmbiguousEvent {
                contract: self.name.clone(),
                event: selector.to_string(),
                candidates: overloads
                    .iter()
                    .map(Event::signature)
                    .collect::<Vec<_>>()
                    .join(", "),
            }),
            _ => Err(not_found()),
        }
    }

    /// Encode calldata: selector followed by the encoded arguments
    pub fn encode_call(&self, function: &str, args: &[DynSolValue]) -> Result<Bytes> {
        let function = self.function(function)?;
        let signature = function.signature();

        if function.inputs.len() != args.len() {
            return Err(ContractError::ArgumentCount {
                target: signature,
                expected: function.inputs.len(),
                got: args.len(),
            });
        }

        function
            .abi_encode_input(args)
            .map(Bytes::from)
            .map_err(|e| ContractError::Encoding {
                target: signature,
                reason: e.to_string(),
            })
    }

    /// Encode calldata from JSON arguments
    pub fn encode_call_json(&self, function: &str, args: &[Value]) -> Result<Bytes> {
        let resolved = self.function(function)?;
        let signature = resolved.signature();
        let values = coerce_params(&signature, &resolved.inputs, args)?;
        self.encode_call(&signature, &values)
    }

    /// Decode the return data of a function call
    pub fn decode_output(&self, function: &str, data: &[u8]) -> Result<Vec<DynSolValue>> {
        let function = self.function(function)?;
        function
            .abi_decode_output(data, true)
            .map_err(|e| ContractError::Decoding {
                target: function.signature(),
                reason: e.to_string(),
            })
    }

    /// Creation code: bytecode followed by the encoded constructor arguments
    pub fn deploy_code(&self, args: &[DynSolValue]) -> Result<Bytes> {
        if !self.is_deployable() {
            return Err(ContractError::NotDeployable(self.name.clone()));
        }

        let expected = self
            .abi
            .constructor()
            .map(|ctor| ctor.inputs.len())
            .unwrap_or(0);
        if expected != args.len() {
            return Err(ContractError::ArgumentCount {
                target: format!("{} constructor", self.name),
                expected,
                got: args.len(),
            });
        }

        let encoded_args = match self.abi.constructor() {
            Some(ctor) => ctor
                .abi_encode_input(args)
                .map_err(|e| ContractError::Encoding {
                    target: format!("{} constructor", self.name),
                    reason: e.to_string(),
                })?,
            None => Vec::new(),
        };

        let mut code = self.bytecode.to_vec();
        code.extend_from_slice(&encoded_args);
        Ok(code.into())
    }

    /// Creation code from JSON constructor arguments
    pub fn deploy_code_json(&self, args: &[Value]) -> Result<Bytes> {
        let target = format!("{} constructor", self.name);
        let values = match self.abi.constructor() {
            Some(ctor) => coerce_params(&target, &ctor.inputs, args)?,
            None => coerce_params(&target, &[], args)?,
        };
        self.deploy_code(&values)
    }

    /// Decode a log emitted by an instance of this contract.
    ///
    /// The event is found by matching the first topic against the selectors
    /// of the non-anonymous events in the ABI.
    pub fn decode_log(&self, topics: &[B256], data: &[u8]) -> Result<DecodedLog> {
        let topic0 = topics.first().ok_or_else(|| ContractError::UnknownEvent {
            contract: self.name.clone(),
            topic: "(none)".to_string(),
        })?;

        let event = self
            .abi
            .events()
            .find(|e| !e.anonymous && e.selector() == *topic0)
            .ok_or_else(|| ContractError::UnknownEvent {
                contract: self.name.clone(),
                topic: format!("0x{topic0:x}"),
            })?;

        let DecodedEvent { indexed, body, .. } = event
            .decode_log_parts(topics.iter().copied(), data, true)
            .map_err(|e| ContractError::Decoding {
                target: event.signature(),
                reason: e.to_string(),
            })?;

        Ok(DecodedLog {
            event: event.name.clone(),
            signature: event.signature(),
            indexed,
            body,
        })
    }

    /// Bind the class to a deployed contract
    pub fn at<T, N, P>(&self, address: Address, provider: Arc<P>) -> BoundContract<T, N, P>
    where
        T: Transport + Clone,
        N: Network,
        P: Provider<T, N>,
    {
        BoundContract::new(self.clone(), address, provider)
    }

    /// Deploy a new instance and wait for it to be mined
    pub async fn deploy<T, N, P>(
        &self,
        provider: Arc<P>,
        args: &[DynSolValue],
        gas: &GasSettings,
    ) -> Result<BoundContract<T, N, P>>
    where
        T: Transport + Clone,
        N: Network,
        P: Provider<T, N>,
        N::TransactionRequest: Default + TransactionBuilder<N>,
        N::ReceiptResponse: ReceiptResponse,
    {
        let code = self.deploy_code(args)?;
        debug!(
            "Deploying {} with {} bytes of creation code",
            self.name,
            code.len()
        );

        let mut tx = N::TransactionRequest::default();
        tx.set_deploy_code(code);
        gas.apply::<N>(&mut tx);

        TransactionLogger::log_submission("deployment", &self.name);

        let pending_tx = provider.send_transaction(tx).await.map_err(|e| {
            TransactionLogger::log_failure("deployment", &self.name, &e.to_string());
            ContractError::Provider(e.to_string())
        })?;

        let tx_hash = *pending_tx.tx_hash();
        debug!("Submitted deployment transaction: 0x{:x}", tx_hash);

        let receipt = pending_tx
            .get_receipt()
            .await
            .map_err(|e| ContractError::Provider(e.to_string()))?;

        if !receipt.status() {
            TransactionLogger::log_failure("deployment", &self.name, "transaction reverted");
            return Err(ContractError::TransactionFailed { tx_hash });
        }

        let address = receipt
            .contract_address()
            .ok_or(ContractError::MissingContractAddress { tx_hash })?;

        TransactionLogger::log_confirmation(tx_hash, receipt.gas_used());
        TransactionLogger::log_deployment(&self.name, address, tx_hash);

        Ok(self.at(address, provider))
    }
}

/// Strip whitespace so "withdraw( address )" matches "withdraw(address)"
fn normalize_signature(signature: &str) -> String {
    signature.chars().filter(|c| !c.is_whitespace()).collect()
}
