use std::rc::Rc;

use eqcalc_ast::{Equation, Substitution, Term};
use tracing::trace;

use crate::error::EqualityMismatch;

/// `t = t`
pub fn reflexivity(term: &Rc<Term>) -> Equation {
    trace!(term = %term, "reflexivity");
    Equation::new(Rc::clone(term), Rc::clone(term))
}

/// Reflexivity for each side of an existing equation: `(l = l, r = r)`.
pub fn reflexivity_of_sides(equation: &Equation) -> (Equation, Equation) {
    (reflexivity(&equation.lhs), reflexivity(&equation.rhs))
}

/// `a = b` gives `b = a`
pub fn symmetry(equation: &Equation) -> Equation {
    trace!(equation = %equation, "symmetry");
    Equation::new(Rc::clone(&equation.rhs), Rc::clone(&equation.lhs))
}

/// `a = b` and `b = c` give `a = c`.
///
/// The right side of `first` must be structurally equal to the left side of
/// `second`; otherwise the mismatch names positions 1 and 2 and both sides.
pub fn transitivity(first: &Equation, second: &Equation) -> Result<Equation, EqualityMismatch> {
    if first.rhs != second.lhs {
        tracing::debug!(left = %first.rhs, right = %second.lhs, "transitivity mismatch");
        return Err(EqualityMismatch {
            left_position: 1,
            right_position: 2,
            left_side: Rc::clone(&first.rhs),
            right_side: Rc::clone(&second.lhs),
        });
    }
    Ok(Equation::new(Rc::clone(&first.lhs), Rc::clone(&second.rhs)))
}

/// `a_i = b_i` for each i gives `f(a_1, ..., a_n) = f(b_1, ..., b_n)`.
///
/// Argument order follows the order of `equations`. With no equations both
/// sides are the constant `f`.
pub fn congruence<'e, I>(symbol: &str, equations: I) -> Equation
where
    I: IntoIterator<Item = &'e Equation>,
{
    let (lhs, rhs): (Vec<_>, Vec<_>) = equations
        .into_iter()
        .map(|eq| (Rc::clone(&eq.lhs), Rc::clone(&eq.rhs)))
        .unzip();
    trace!(symbol, arity = lhs.len(), "congruence");
    Equation::new(Term::app(symbol, lhs), Term::app(symbol, rhs))
}

/// Apply `mapping` to both sides.
pub fn substitution(equation: &Equation, mapping: &Substitution) -> Equation {
    trace!(equation = %equation, mapping = %mapping, "substitution");
    Equation::new(
        equation.lhs.substitute(mapping),
        equation.rhs.substitute(mapping),
    )
}
