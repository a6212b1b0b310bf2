//! Append-only equation storage.
//!
//! Ids are assigned in insertion order starting at 1 and are never reused
//! or renumbered. A store is an ordinary owned value: each session holds its
//! own, and sharing one across threads needs outside serialization.

use eqcalc_ast::Equation;

use crate::types::{EntryId, ResolveError};

/// A stored equation with its id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub id: EntryId,
    pub equation: Equation,
}

/// Storage for equations with auto-incrementing ids.
#[derive(Debug, Clone, Default)]
pub struct EquationStore {
    entries: Vec<Entry>,
}

impl EquationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an equation and return its id.
    pub fn push(&mut self, equation: Equation) -> EntryId {
        let id = self.next_id();
        tracing::trace!(id, equation = %equation, "storing equation");
        self.entries.push(Entry { id, equation });
        id
    }

    /// Look up an equation; `None` for `0` or anything past the last id.
    pub fn get(&self, id: EntryId) -> Option<&Equation> {
        let index = usize::try_from(id).ok()?.checked_sub(1)?;
        self.entries.get(index).map(|entry| &entry.equation)
    }

    pub fn contains(&self, id: EntryId) -> bool {
        self.get(id).is_some()
    }

    /// Resolve a batch of references.
    ///
    /// Either every reference resolves (result in request order, duplicates
    /// kept) or the error lists every reference that did not.
    pub fn resolve_all(&self, ids: &[EntryId]) -> Result<Vec<&Equation>, ResolveError> {
        let mut found = Vec::with_capacity(ids.len());
        let mut missing = Vec::new();
        for &id in ids {
            match self.get(id) {
                Some(equation) => found.push(equation),
                None => missing.push(id),
            }
        }
        if missing.is_empty() {
            Ok(found)
        } else {
            tracing::debug!(?missing, "unresolved references");
            Err(ResolveError::NotFound(missing))
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The id the next pushed equation will get.
    pub fn next_id(&self) -> EntryId {
        self.entries.len() as EntryId + 1
    }

    /// All entries in insertion order.
    pub fn entries(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter()
    }
}
