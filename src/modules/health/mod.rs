// Liveness and readiness probes. No identity required.

pub mod controllers;
pub mod probe;

pub use probe::{MySqlStorageProbe, StorageProbe};
