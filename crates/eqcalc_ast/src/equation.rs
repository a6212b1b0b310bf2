use std::fmt;
use std::rc::Rc;

use crate::Term;

/// An ordered pair of terms, read as "lhs is claimed equal to rhs".
///
/// There is no implicit symmetry: `(a, b)` and `(b, a)` are different
/// equations unless `a == b`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Equation {
    pub lhs: Rc<Term>, // Left Hand Side
    pub rhs: Rc<Term>, // Right Hand Side
}

impl Equation {
    pub fn new(lhs: Rc<Term>, rhs: Rc<Term>) -> Self {
        Self { lhs, rhs }
    }
}

impl fmt::Display for Equation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <=> {}", self.lhs, self.rhs)
    }
}
