pub mod key_storage;

pub use key_storage::{EnvVarStorage, KeyStorage};
