//! Domain layer - models, ports, and errors

pub mod cache;
mod error;
pub mod translation;

pub use error::DomainError;
pub use translation::{
    TranslationField, TranslationProvider, TranslationRequest, TranslationResponse,
};
