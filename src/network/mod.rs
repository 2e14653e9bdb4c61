pub mod gas;
pub mod provider;

pub use gas::{gwei_to_wei, GasPricing, GasSettings};
pub use provider::{EthProvider, NetworkError, NetworkManager};
