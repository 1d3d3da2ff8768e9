use std::collections::HashMap;

/// Expand/collapse state for explorer tree nodes, keyed by node key.
///
/// One instance is owned per top-level explorer view and passed where it is
/// needed; keeping the lifetime explicit avoids the hidden-global variant of
/// this state. Node keys are stable across rebuilds, so state survives
/// filter changes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExplorerState {
    expanded: HashMap<String, bool>,
}

impl ExplorerState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Unset keys read as collapsed.
    pub fn is_expanded(&self, key: &str) -> bool {
        self.expanded.get(key).copied().unwrap_or(false)
    }

    pub fn expand(&mut self, key: impl Into<String>) {
        self.expanded.insert(key.into(), true);
    }

    pub fn collapse(&mut self, key: impl Into<String>) {
        self.expanded.insert(key.into(), false);
    }

    pub fn toggle(&mut self, key: impl Into<String>) {
        let key = key.into();
        let next = !self.is_expanded(&key);
        self.expanded.insert(key, next);
    }

    pub fn set_expanded(&mut self, key: impl Into<String>, value: bool) {
        self.expanded.insert(key.into(), value);
    }

    /// Expands several nodes at once, e.g. every database on first render.
    pub fn expand_all<I>(&mut self, keys: I)
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        for key in keys {
            self.expanded.insert(key.into(), true);
        }
    }

    /// `true` when the key has been explicitly set rather than defaulted.
    pub fn has_explicit_state(&self, key: &str) -> bool {
        self.expanded.contains_key(key)
    }
}
