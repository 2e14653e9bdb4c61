//! Contract classes bound to a deployed address

use std::marker::PhantomData;
use std::sync::Arc;

use alloy::{
    dyn_abi::DynSolValue,
    network::{Network, ReceiptResponse, TransactionBuilder},
    primitives::{Address, Bytes, U256},
    providers::Provider,
    rpc::types::BlockId,
    transports::Transport,
};
use tracing::{debug, error};

use super::class::ContractClass;
use super::error::{ContractError, Result};
use crate::network::GasSettings;
use crate::utils::TransactionLogger;

/// A contract class bound to an address and a provider
pub struct BoundContract<T, N, P>
where
    T: Transport + Clone,
    N: Network,
    P: Provider<T, N>,
{
    class: ContractClass,
    address: Address,
    provider: Arc<P>,
    _phantom_t: PhantomData<T>,
    _phantom_n: PhantomData<N>,
}

impl<T, N, P> BoundContract<T, N, P>
where
    T: Transport + Clone,
    N: Network,
    P: Provider<T, N>,
{
    pub fn new(class: ContractClass, address: Address, provider: Arc<P>) -> Self {
        Self {
            class,
            address,
            provider,
            _phantom_t: PhantomData,
            _phantom_n: PhantomData,
        }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn class(&self) -> &ContractClass {
        &self.class
    }

    pub fn provider(&self) -> &Arc<P> {
        &self.provider
    }

    /// Encode calldata for a function on this contract
    pub fn encode(&self, function: &str, args: &[DynSolValue]) -> Result<Bytes> {
        self.class.encode_call(function, args)
    }

    /// Run a read-only call against the latest block and decode the outputs
    pub async fn call(&self, function: &str, args: &[DynSolValue]) -> Result<Vec<DynSolValue>>
    where
        N::TransactionRequest: Default + TransactionBuilder<N>,
    {
        let call_data = self.class.encode_call(function, args)?;

        let mut tx = N::TransactionRequest::default();
        tx.set_to(self.address);
        tx.set_input(call_data);

        debug!(
            "Calling {} on {} at {}",
            function,
            self.class.name(),
            self.address
        );

        let result = self
            .provider
            .call(&tx)
            .block(BlockId::latest())
            .await
            .map_err(|e| {
                error!(
                    "Call to {} on {} failed: {}",
                    function,
                    self.class.name(),
                    e
                );
                ContractError::Provider(e.to_string())
            })?;

        self.class.decode_output(function, &result)
    }

    /// Send a state-changing transaction and wait for its receipt
    pub async fn send(
        &self,
        function: &str,
        args: &[DynSolValue],
        value: Option<U256>,
        gas: &GasSettings,
    ) -> Result<N::ReceiptResponse>
    where
        N::TransactionRequest: Default + TransactionBuilder<N>,
        N::ReceiptResponse: ReceiptResponse,
    {
        let resolved = self.class.function(function)?.signature();
        let call_data = self.class.encode_call(&resolved, args)?;

        let mut tx = N::TransactionRequest::default();
        tx.set_to(self.address);
        tx.set_input(call_data);
        if let Some(value) = value {
            tx.set_value(value);
        }
        gas.apply::<N>(&mut tx);

        TransactionLogger::log_submission(&resolved, self.class.name());
        TransactionLogger::log_transaction_details(
            &self.address.to_string(),
            Some(&resolved),
            gas.gas_limit,
        );

        let pending_tx = self.provider.send_transaction(tx).await.map_err(|e| {
            TransactionLogger::log_failure(&resolved, self.class.name(), &e.to_string());
            ContractError::Provider(e.to_string())
        })?;

        let tx_hash = *pending_tx.tx_hash();
        debug!("Submitted transaction: 0x{:x}", tx_hash);

        let receipt = pending_tx
            .get_receipt()
            .await
            .map_err(|e| ContractError::Provider(e.to_string()))?;

        if !receipt.status() {
            TransactionLogger::log_failure(&resolved, self.class.name(), "transaction reverted");
            return Err(ContractError::TransactionFailed { tx_hash });
        }

        TransactionLogger::log_confirmation(tx_hash, receipt.gas_used());
        Ok(receipt)
    }
}
