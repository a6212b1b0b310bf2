//! The five inference rules of equational reasoning.
//!
//! Every rule is a pure function: inputs are borrowed, never modified, and
//! the result is a fresh [`Equation`](eqcalc_ast::Equation). Only
//! transitivity can fail.

pub mod chain;
pub mod error;
pub mod rules;

pub use chain::transitivity_chain;
pub use error::{EqualityMismatch, InferenceError};
pub use rules::{
    congruence, reflexivity, reflexivity_of_sides, substitution, symmetry, transitivity,
};
