//! The three milestone contract classes
//!
//! `LPMilestone`, `BridgedMilestone` and `MilestoneFactory` are each loaded
//! from `<dir>/<Name>.json`. A process-wide registry can be initialised once
//! and then read from anywhere.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use once_cell::sync::OnceCell;
use tracing::info;

use super::class::ContractClass;
use crate::artifact::{ArtifactError, ContractArtifact, SchemaSelection};

/// The contracts shipped by this crate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MilestoneContract {
    LPMilestone,
    BridgedMilestone,
    MilestoneFactory,
}

impl MilestoneContract {
    pub const ALL: [MilestoneContract; 3] = [
        MilestoneContract::LPMilestone,
        MilestoneContract::BridgedMilestone,
        MilestoneContract::MilestoneFactory,
    ];

    /// Export name of the contract
    pub fn name(&self) -> &'static str {
        match self {
            Self::LPMilestone => "LPMilestone",
            Self::BridgedMilestone => "BridgedMilestone",
            Self::MilestoneFactory => "MilestoneFactory",
        }
    }

    /// File name of the artifact inside the artifacts directory
    pub fn artifact_file_name(&self) -> String {
        format!("{}.json", self.name())
    }
}

impl fmt::Display for MilestoneContract {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for MilestoneContract {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .collect::<String>()
            .to_lowercase();

        match normalized.as_str() {
            "lpmilestone" => Ok(Self::LPMilestone),
            "bridgedmilestone" => Ok(Self::BridgedMilestone),
            "milestonefactory" | "factory" => Ok(Self::MilestoneFactory),
            _ => Err(format!(
                "unknown contract '{s}' (expected LPMilestone, BridgedMilestone or MilestoneFactory)"
            )),
        }
    }
}

/// Contract classes for all three milestone contracts
#[derive(Debug, Clone)]
pub struct MilestoneContracts {
    lp_milestone: ContractClass,
    bridged_milestone: ContractClass,
    milestone_factory: ContractClass,
}

impl MilestoneContracts {
    /// Load all three artifacts from a directory.
    ///
    /// Fails on the first artifact that cannot be read.
    pub fn load(dir: impl AsRef<Path>, selection: SchemaSelection) -> Result<Self, ArtifactError> {
        let dir = dir.as_ref();
        let load = |contract: MilestoneContract| -> Result<ContractClass, ArtifactError> {
            let path = dir.join(contract.artifact_file_name());
            let artifact = ContractArtifact::from_file(&path, selection)?;
            info!(
                "Loaded {} from {:?} ({} schema)",
                contract, path, artifact.schema
            );
            Ok(ContractClass::from_artifact(artifact))
        };

        Ok(Self {
            lp_milestone: load(MilestoneContract::LPMilestone)?,
            bridged_milestone: load(MilestoneContract::BridgedMilestone)?,
            milestone_factory: load(MilestoneContract::MilestoneFactory)?,
        })
    }

    /// Assemble the registry from already generated classes
    pub fn from_classes(
        lp_milestone: ContractClass,
        bridged_milestone: ContractClass,
        milestone_factory: ContractClass,
    ) -> Self {
        Self {
            lp_milestone,
            bridged_milestone,
            milestone_factory,
        }
    }

    /// The `LPMilestone` export
    pub fn lp_milestone(&self) -> &ContractClass {
        &self.lp_milestone
    }

    /// The `BridgedMilestone` export
    pub fn bridged_milestone(&self) -> &ContractClass {
        &self.bridged_milestone
    }

    /// The `MilestoneFactory` export
    pub fn milestone_factory(&self) -> &ContractClass {
        &self.milestone_factory
    }

    pub fn get(&self, contract: MilestoneContract) -> &ContractClass {
        match contract {
            MilestoneContract::LPMilestone => &self.lp_milestone,
            MilestoneContract::BridgedMilestone => &self.bridged_milestone,
            MilestoneContract::MilestoneFactory => &self.milestone_factory,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (MilestoneContract, &ContractClass)> {
        MilestoneContract::ALL
            .into_iter()
            .map(move |contract| (contract, self.get(contract)))
    }
}

static REGISTRY: OnceCell<MilestoneContracts> = OnceCell::new();

/// Load the process-wide registry.
///
/// Only the first successful call reads artifacts; later calls return the
/// registry that is already loaded and ignore their arguments.
pub fn init_global(
    dir: impl AsRef<Path>,
    selection: SchemaSelection,
) -> Result<&'static MilestoneContracts, ArtifactError> {
    REGISTRY.get_or_try_init(|| MilestoneContracts::load(dir, selection))
}

/// The process-wide registry, if it has been loaded
pub fn global() -> Option<&'static MilestoneContracts> {
    REGISTRY.get()
}
