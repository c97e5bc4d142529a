//! DeepLX upstream - retrying client and canonical-format provider

mod client;
mod provider;

pub use client::{DeepLxClient, DeepLxClientConfig, DeepLxResponse, TranslationOutcome};
pub use provider::DeepLxProvider;
