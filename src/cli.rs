use std::path::PathBuf;
use std::sync::Arc;

use alloy::{
    dyn_abi::DynSolValue,
    json_abi::{Param, StateMutability},
    network::{Ethereum, ReceiptResponse},
    primitives::{Address, U256},
    transports::http::{Client, Http},
};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::Value;
use tracing::info;

use milestone_contracts::config::MilestoneConfig;
use milestone_contracts::contracts::{
    coerce_params, dyn_sol_value_to_json, parse_cli_argument, ContractClass, MilestoneContract,
    MilestoneContracts,
};
use milestone_contracts::network::{GasSettings, NetworkManager};
use milestone_contracts::wallet::EnvVarStorage;
use milestone_contracts::SchemaSelection;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Contract bindings for LPMilestone, BridgedMilestone and MilestoneFactory",
    long_about = "Loads the compiled milestone contract artifacts (legacy abiDefinition/code or \
                  standard-json compilerOutput layout) and lets you inspect them, encode calls, \
                  deploy new instances and interact with deployed ones."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(short, long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Directory holding the contract artifacts (overrides the configuration)
    #[arg(long, value_name = "DIR", global = true)]
    pub artifacts_dir: Option<PathBuf>,

    /// Artifact schema: auto, legacy or standard (overrides the configuration)
    #[arg(long, global = true)]
    pub schema: Option<SchemaSelection>,

    /// Environment variable holding the private key when no network-specific one is set
    #[arg(short, long, default_value = "PRIVATE_KEY", global = true)]
    pub private_key_env: String,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the contract classes with their functions and events
    Inspect {
        /// Only show this contract
        contract: Option<MilestoneContract>,
    },
    /// Print the calldata for a function call
    Encode {
        contract: MilestoneContract,
        /// Function name, signature or selector
        function: String,
        /// Arguments, each parsed as JSON or taken as a string
        #[arg(allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// Print the creation code for a deployment
    DeployData {
        contract: MilestoneContract,
        /// Constructor arguments
        #[arg(allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// Deploy a new contract instance
    Deploy {
        contract: MilestoneContract,
        /// Network name from the configuration
        #[arg(short, long)]
        network: String,
        /// Gas limit override
        #[arg(long)]
        gas_limit: Option<u64>,
        /// Constructor arguments
        #[arg(allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// Call a read-only function on a deployed contract
    Call {
        contract: MilestoneContract,
        address: Address,
        function: String,
        /// Network name from the configuration
        #[arg(short, long)]
        network: String,
        #[arg(allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// Send a transaction to a deployed contract
    Send {
        contract: MilestoneContract,
        address: Address,
        function: String,
        /// Network name from the configuration
        #[arg(short, long)]
        network: String,
        /// Value to send, in wei
        #[arg(long)]
        value: Option<U256>,
        /// Gas limit override
        #[arg(long)]
        gas_limit: Option<u64>,
        #[arg(allow_hyphen_values = true)]
        args: Vec<String>,
    },
}

pub async fn run(cli: Cli, config: &MilestoneConfig, contracts: &MilestoneContracts) -> Result<()> {
    let key_storage = EnvVarStorage::with_fallback(cli.private_key_env);

    match cli.command {
        Commands::Inspect { contract } => {
            match contract {
                Some(contract) => print_class(contracts.get(contract)),
                None => contracts.iter().for_each(|(_, class)| print_class(class)),
            }
            Ok(())
        }
        Commands::Encode {
            contract,
            function,
            args,
        } => {
            let class = contracts.get(contract);
            let (signature, values) = function_args(class, &function, &args)?;
            let calldata = class.encode_call(&signature, &values)?;
            println!("0x{}", hex::encode(&calldata));
            Ok(())
        }
        Commands::DeployData { contract, args } => {
            let class = contracts.get(contract);
            let code = class.deploy_code(&constructor_args(class, &args)?)?;
            println!("0x{}", hex::encode(&code));
            Ok(())
        }
        Commands::Deploy {
            contract,
            network,
            gas_limit,
            args,
        } => {
            let class = contracts.get(contract);
            let values = constructor_args(class, &args)?;

            let manager = NetworkManager::new(&config.networks)?;
            let gas = gas_settings(&manager, &network, gas_limit)?;
            let signer = manager.load_signer(&network, &key_storage).await?;
            let (from, provider) = manager.signing_provider(&network, signer)?;

            info!("Deploying {} to {} from {}", class.name(), network, from);
            let deployed = class
                .deploy::<Http<Client>, Ethereum, _>(Arc::new(provider), &values, &gas)
                .await
                .with_context(|| format!("Failed to deploy {} on {}", class.name(), network))?;

            println!("{}", deployed.address());
            Ok(())
        }
        Commands::Call {
            contract,
            address,
            function,
            network,
            args,
        } => {
            let class = contracts.get(contract);
            let (signature, values) = function_args(class, &function, &args)?;

            let manager = NetworkManager::new(&config.networks)?;
            let provider = manager.get_provider(&network)?;
            let bound = class.at::<Http<Client>, Ethereum, _>(address, provider);

            let outputs = bound
                .call(&signature, &values)
                .await
                .with_context(|| format!("Failed to call {} on {}", signature, address))?;

            let json = Value::Array(outputs.iter().map(dyn_sol_value_to_json).collect());
            println!("{}", serde_json::to_string_pretty(&json)?);
            Ok(())
        }
        Commands::Send {
            contract,
            address,
            function,
            network,
            value,
            gas_limit,
            args,
        } => {
            let class = contracts.get(contract);
            let (signature, values) = function_args(class, &function, &args)?;

            let manager = NetworkManager::new(&config.networks)?;
            let gas = gas_settings(&manager, &network, gas_limit)?;
            let signer = manager.load_signer(&network, &key_storage).await?;
            let (_, provider) = manager.signing_provider(&network, signer)?;
            let bound = class.at::<Http<Client>, Ethereum, _>(address, Arc::new(provider));

            let receipt = bound
                .send(&signature, &values, value, &gas)
                .await
                .with_context(|| format!("Failed to send {} to {}", signature, address))?;

            println!("0x{:x}", receipt.transaction_hash());
            Ok(())
        }
    }
}

/// Resolve a function and convert its command-line arguments
fn function_args(
    class: &ContractClass,
    function: &str,
    raw: &[String],
) -> Result<(String, Vec<DynSolValue>)> {
    let resolved = class.function(function)?;
    let signature = resolved.signature();
    let json: Vec<Value> = raw.iter().map(|arg| parse_cli_argument(arg)).collect();
    let values = coerce_params(&signature, &resolved.inputs, &json)?;
    Ok((signature, values))
}

/// Convert command-line constructor arguments
fn constructor_args(class: &ContractClass, raw: &[String]) -> Result<Vec<DynSolValue>> {
    let target = format!("{} constructor", class.name());
    let inputs = class
        .abi()
        .constructor()
        .map(|ctor| ctor.inputs.as_slice())
        .unwrap_or_default();
    let json: Vec<Value> = raw.iter().map(|arg| parse_cli_argument(arg)).collect();
    Ok(coerce_params(&target, inputs, &json)?)
}

fn gas_settings(
    manager: &NetworkManager,
    network: &str,
    gas_limit: Option<u64>,
) -> Result<GasSettings> {
    let gas = manager.gas_settings(network)?;
    Ok(match gas_limit {
        Some(limit) => gas.with_gas_limit(limit),
        None => gas,
    })
}

fn print_class(class: &ContractClass) {
    let abi = class.abi();

    println!("{}", class.name());
    println!(
        "  bytecode: {} bytes{}",
        class.bytecode().len(),
        class
            .deployed_bytecode()
            .map(|code| format!(", runtime: {} bytes", code.len()))
            .unwrap_or_default()
    );

    if let Some(ctor) = abi.constructor() {
        println!("  constructor({})", param_types(&ctor.inputs));
    }

    println!("  functions:");
    for function in abi.functions() {
        let outputs = if function.outputs.is_empty() {
            String::new()
        } else {
            format!(" -> ({})", param_types(&function.outputs))
        };
        println!(
            "    {} {}{}  [0x{}]",
            function.signature(),
            mutability(function.state_mutability),
            outputs,
            hex::encode(function.selector())
        );
    }

    println!("  events:");
    for event in abi.events() {
        println!("    {}  [0x{:x}]", event.signature(), event.selector());
    }
}

fn param_types(params: &[Param]) -> String {
    params
        .iter()
        .map(|param| param.selector_type().into_owned())
        .collect::<Vec<_>>()
        .join(",")
}

fn mutability(state_mutability: StateMutability) -> &'static str {
    match state_mutability {
        StateMutability::Pure => "pure",
        StateMutability::View => "view",
        StateMutability::NonPayable => "nonpayable",
        StateMutability::Payable => "payable",
    }
}
