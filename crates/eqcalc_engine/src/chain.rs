//! Transitivity over a list of equations.

use std::rc::Rc;

use eqcalc_ast::Equation;

use crate::error::{EqualityMismatch, InferenceError};

/// Combine `e_1, ..., e_n` (n >= 2) left to right into `lhs(e_1) = rhs(e_n)`.
///
/// Every adjacent pair is checked, including the ones after a failure, so
/// the error lists all mismatching positions at once.
pub fn transitivity_chain<'e, I>(equations: I) -> Result<Equation, InferenceError>
where
    I: IntoIterator<Item = &'e Equation>,
{
    let equations: Vec<&Equation> = equations.into_iter().collect();
    if equations.len() < 2 {
        return Err(InferenceError::ChainTooShort(equations.len()));
    }

    let mismatches: Vec<EqualityMismatch> = equations
        .windows(2)
        .enumerate()
        .filter(|(_, pair)| pair[0].rhs != pair[1].lhs)
        .map(|(i, pair)| EqualityMismatch {
            left_position: i + 1,
            right_position: i + 2,
            left_side: Rc::clone(&pair[0].rhs),
            right_side: Rc::clone(&pair[1].lhs),
        })
        .collect();

    if !mismatches.is_empty() {
        tracing::debug!(count = mismatches.len(), "transitivity chain rejected");
        return Err(InferenceError::ChainMismatch(mismatches));
    }

    let first = equations[0];
    let last = equations[equations.len() - 1];
    Ok(Equation::new(Rc::clone(&first.lhs), Rc::clone(&last.rhs)))
}
