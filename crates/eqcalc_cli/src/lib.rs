//! Equational calculator front end.
//!
//! [`repl::ReplCore`] owns one equation store and executes calculator
//! commands against it, returning structured replies. The `eqcalc` binary
//! wraps it in an interactive line editor or a batch reader.

pub mod completer;
pub mod config;
pub mod repl;
