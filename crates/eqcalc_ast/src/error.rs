//! Error types for eqcalc_ast crate.

use thiserror::Error;

/// Ways a term can violate a signature.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SignatureError {
    /// The symbol has no declared arity
    #[error("function symbol '{symbol}' is not part of the signature")]
    UnknownSymbol { symbol: String },

    /// The symbol is applied to the wrong number of arguments
    #[error("function symbol '{symbol}' expects {expected} argument(s) but was applied to {found}")]
    ArityMismatch {
        symbol: String,
        expected: usize,
        found: usize,
    },
}
