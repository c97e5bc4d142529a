//! Infrastructure layer - concrete implementations of the domain ports

pub mod cache;
pub mod deeplx;
mod factory;
pub mod logging;

pub use factory::{ProviderFactory, ServiceType};
