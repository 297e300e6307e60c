//! Emission errors.

use thiserror::Error;

/// Errors that can occur while rendering resources.
#[derive(Debug, Error)]
pub enum EmitError {
    #[error("duplicate symbol `{symbol}` generated for '{first}' and '{second}'")]
    DuplicateSymbol {
        symbol: String,
        first: String,
        second: String,
    },

    #[error("symbol `{symbol}` generated for '{identifier}' is reserved for the resource index")]
    ReservedSymbol { symbol: String, identifier: String },

    #[error("no contents for '{identifier}'")]
    MissingContents { identifier: String },
}

/// Result type alias for emission.
pub type Result<T> = std::result::Result<T, EmitError>;
