//! Data layer for the instance registry.

pub mod instance;

pub use instance::{Instance, InstanceState, NewInstance};
