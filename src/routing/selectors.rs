//! Selector-based handler matching.

use crate::routing::RequestPathInfo;

/// Registration of a handler under a selector/extension combination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorBinding {
    /// Name reported by the no-op handler when the binding matches.
    pub name: String,
    /// Selector tokens the request must carry, in order.
    pub selectors: Vec<String>,
    /// Extension the request must carry.
    pub extension: String,
}

impl SelectorBinding {
    /// Create a binding.
    pub fn new(name: impl Into<String>, selectors: &[&str], extension: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            selectors: selectors.iter().map(|s| (*s).to_string()).collect(),
            extension: extension.into(),
        }
    }

    fn matches(&self, info: &RequestPathInfo) -> bool {
        info.extension.as_deref() == Some(self.extension.as_str())
            && info.selectors == self.selectors
    }
}

/// Ordered registry of selector bindings.
///
/// Stands in for the routing layer of the production web framework: given a
/// decomposed request path, the first binding whose selector sequence and
/// extension both match wins. Matching is exact and order-sensitive; a
/// request carrying a subset, superset, or reordering of a binding's
/// selectors does not reach it.
#[derive(Debug, Clone, Default)]
pub struct SelectorRegistry {
    bindings: Vec<SelectorBinding>,
}

impl SelectorRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            bindings: Vec::new(),
        }
    }

    /// Register a binding. Earlier registrations win on overlap.
    pub fn register(&mut self, binding: SelectorBinding) {
        self.bindings.push(binding);
    }

    /// Find the first binding matching the decomposed path.
    pub fn resolve(&self, info: &RequestPathInfo) -> Option<&SelectorBinding> {
        self.bindings.iter().find(|binding| binding.matches(info))
    }
}
