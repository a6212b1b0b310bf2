/// 1-based identifier of a stored equation, written `@N`.
pub type EntryId = u64;

/// Error during reference resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// References to non-existent entries, in the order they were requested.
    NotFound(Vec<EntryId>),
}

impl std::fmt::Display for ResolveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResolveError::NotFound(ids) if ids.len() == 1 => {
                write!(f, "The referenced equation @{} doesn't exist", ids[0])
            }
            ResolveError::NotFound(ids) => {
                let refs: Vec<String> = ids.iter().map(|id| format!("@{}", id)).collect();
                write!(f, "The following references are invalid: {}", refs.join(", "))
            }
        }
    }
}

impl std::error::Error for ResolveError {}
