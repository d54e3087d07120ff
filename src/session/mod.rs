//! Repository session abstraction.
//!
//! Endpoints read user identity and namespace mappings through the
//! [`RepositorySession`] trait. The production repository is out of scope;
//! the harness serves an [`InMemorySession`] fixture instead.

use std::collections::HashMap;

/// Error reported by repository session operations.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// The underlying repository rejected or failed the access.
    #[error("repository access failed: {0}")]
    Access(String),

    /// The requested namespace prefix is not registered.
    #[error("unknown namespace prefix: {0}")]
    UnknownPrefix(String),
}

/// Read-only view of a content-repository session.
///
/// Covers exactly the session state the test endpoints consume: the
/// authenticated user id and the prefix→URI namespace registry.
pub trait RepositorySession: Send + Sync {
    /// Identity of the user this session is bound to.
    ///
    /// # Errors
    ///
    /// Returns a [`SessionError`] when the repository cannot be reached.
    fn user_id(&self) -> Result<String, SessionError>;

    /// All namespace prefixes known to the session.
    ///
    /// Enumeration order is unspecified.
    ///
    /// # Errors
    ///
    /// Returns a [`SessionError`] when the repository cannot be reached.
    fn namespace_prefixes(&self) -> Result<Vec<String>, SessionError>;

    /// Resolve a prefix to its registered namespace URI.
    ///
    /// # Errors
    ///
    /// Returns a [`SessionError`] when the prefix is unknown or the
    /// repository cannot be reached.
    fn namespace_uri(&self, prefix: &str) -> Result<String, SessionError>;
}

/// In-memory session fixture with a fixed user id and namespace map.
#[derive(Debug, Clone, Default)]
pub struct InMemorySession {
    user_id: String,
    namespaces: HashMap<String, String>,
}

impl InMemorySession {
    /// Create a session bound to the given user id.
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            namespaces: HashMap::new(),
        }
    }

    /// Register a namespace mapping on the session.
    pub fn with_namespace(mut self, prefix: impl Into<String>, uri: impl Into<String>) -> Self {
        self.namespaces.insert(prefix.into(), uri.into());
        self
    }
}

impl RepositorySession for InMemorySession {
    fn user_id(&self) -> Result<String, SessionError> {
        Ok(self.user_id.clone())
    }

    fn namespace_prefixes(&self) -> Result<Vec<String>, SessionError> {
        Ok(self.namespaces.keys().cloned().collect())
    }

    fn namespace_uri(&self, prefix: &str) -> Result<String, SessionError> {
        self.namespaces
            .get(prefix)
            .cloned()
            .ok_or_else(|| SessionError::UnknownPrefix(prefix.to_string()))
    }
}
