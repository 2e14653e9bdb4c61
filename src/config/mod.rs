pub mod models;
pub mod parser;
#[cfg(test)]
mod tests;

pub use models::{ArtifactsConfig, GasConfig, MilestoneConfig, Network};
pub use parser::*;
