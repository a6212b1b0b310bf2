//! Symbolic terms and equations.
//!
//! A [`Term`] is a variable or a function symbol applied to argument terms.
//! An [`Equation`] pairs two terms. Both are immutable values; every
//! operation that "changes" a term builds a new one.

pub mod equation;
pub mod error;
pub mod signature;
pub mod span;
pub mod substitution;
pub mod term;

pub use equation::Equation;
pub use error::SignatureError;
pub use signature::{equation_matches_signature, matches_signature, Signature};
pub use span::Span;
pub use substitution::Substitution;
pub use term::Term;
