use std::rc::Rc;

use eqcalc_ast::Term;
use thiserror::Error;

/// Two adjacent sides that transitivity needed to be equal but weren't.
///
/// Positions are 1-based indices into the list of equations handed to the
/// rule: the right side of `left_position` failed to match the left side of
/// `right_position`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Equations {left_position} and {right_position} don't have matching adjacent sides ({left_side} vs. {right_side})")]
pub struct EqualityMismatch {
    pub left_position: usize,
    pub right_position: usize,
    pub left_side: Rc<Term>,
    pub right_side: Rc<Term>,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InferenceError {
    #[error(transparent)]
    EqualityMismatch(#[from] EqualityMismatch),
    #[error("{} pair(s) of adjacent sides don't match", .0.len())]
    ChainMismatch(Vec<EqualityMismatch>),
    #[error("Expected at least two equations, got {0}")]
    ChainTooShort(usize),
}
