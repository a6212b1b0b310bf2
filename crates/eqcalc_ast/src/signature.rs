//! Arity signatures and the post-hoc validator.
//!
//! Parsing never checks arities. A [`Signature`] can be used afterwards to
//! confirm that every application in a term or equation uses its function
//! symbol with the declared number of arguments.

use std::collections::BTreeMap;

use crate::error::SignatureError;
use crate::{Equation, Term};

/// Mapping from function symbols to their arities.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Signature {
    arities: BTreeMap<String, usize>,
}

impl Signature {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare (or redeclare) the arity of a symbol.
    pub fn declare(&mut self, symbol: impl Into<String>, arity: usize) {
        self.arities.insert(symbol.into(), arity);
    }

    pub fn arity(&self, symbol: &str) -> Option<usize> {
        self.arities.get(symbol).copied()
    }

    pub fn len(&self) -> usize {
        self.arities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arities.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, usize)> for Signature {
    fn from_iter<I: IntoIterator<Item = (S, usize)>>(iter: I) -> Self {
        let mut sig = Signature::new();
        for (symbol, arity) in iter {
            sig.declare(symbol, arity);
        }
        sig
    }
}

/// Check every application in `term` against `signature`.
///
/// Variables always match. Reports the first offending application in
/// pre-order.
pub fn matches_signature(term: &Term, signature: &Signature) -> Result<(), SignatureError> {
    match term {
        Term::Variable(_) => Ok(()),
        Term::Application(symbol, args) => {
            let expected = signature
                .arity(symbol)
                .ok_or_else(|| SignatureError::UnknownSymbol {
                    symbol: symbol.clone(),
                })?;
            if expected != args.len() {
                return Err(SignatureError::ArityMismatch {
                    symbol: symbol.clone(),
                    expected,
                    found: args.len(),
                });
            }
            args.iter()
                .try_for_each(|arg| matches_signature(arg, signature))
        }
    }
}

/// Both sides of the equation must match.
pub fn equation_matches_signature(
    equation: &Equation,
    signature: &Signature,
) -> Result<(), SignatureError> {
    matches_signature(&equation.lhs, signature)?;
    matches_signature(&equation.rhs, signature)
}
