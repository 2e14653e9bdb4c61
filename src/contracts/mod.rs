pub mod abi_utils;
pub mod class;
pub mod error;
pub mod instance;
pub mod registry;

pub use abi_utils::{coerce_params, dyn_sol_value_to_json, json_to_dyn_sol_value, parse_cli_argument};
pub use class::{generate_class, ContractClass, DecodedLog};
pub use error::ContractError;
pub use instance::BoundContract;
pub use registry::{global, init_global, MilestoneContract, MilestoneContracts};
