//! Contract bindings for the milestone contracts
//!
//! Loads the compiled `LPMilestone`, `BridgedMilestone` and `MilestoneFactory`
//! artifacts and turns each into a [`ContractClass`] that can encode calls,
//! deploy new instances and bind to existing ones.
//!
//! ```no_run
//! use milestone_contracts::{MilestoneContracts, SchemaSelection};
//!
//! let contracts = MilestoneContracts::load("./dist/contracts", SchemaSelection::Auto)?;
//! let calldata = contracts
//!     .bridged_milestone()
//!     .encode_call_json("completed", &[])?;
//! # Ok::<(), milestone_contracts::MilestoneError>(())
//! ```

pub mod artifact;
pub mod config;
pub mod constants;
pub mod contracts;
pub mod error;
pub mod network;
pub mod utils;
pub mod wallet;

pub use artifact::{ArtifactError, ArtifactSchema, ContractArtifact, SchemaSelection};
pub use contracts::{
    generate_class, BoundContract, ContractClass, ContractError, DecodedLog, MilestoneContract,
    MilestoneContracts,
};
pub use error::MilestoneError;
