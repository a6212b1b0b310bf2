//! Variable-to-term mappings.

use std::collections::BTreeMap;
use std::fmt;
use std::ops::{Deref, DerefMut};
use std::rc::Rc;

use crate::Term;

/// A mapping from variable names to the terms that replace them.
///
/// Ordered by variable name so display and iteration are deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Substitution(BTreeMap<String, Rc<Term>>);

impl Substitution {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Deref for Substitution {
    type Target = BTreeMap<String, Rc<Term>>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for Substitution {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

/// Later pairs win when a variable is bound twice.
impl FromIterator<(String, Rc<Term>)> for Substitution {
    fn from_iter<I: IntoIterator<Item = (String, Rc<Term>)>>(iter: I) -> Self {
        Substitution(iter.into_iter().collect())
    }
}

impl fmt::Display for Substitution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (name, term)) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{} := {}", name, term)?;
        }
        write!(f, "}}")
    }
}
