//! Core session primitives: the equation store and reference resolution.

pub mod store;
pub mod types;

pub use store::{Entry, EquationStore};
pub use types::{EntryId, ResolveError};
