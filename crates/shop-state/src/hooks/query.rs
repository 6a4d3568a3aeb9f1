//! Change detection for dependency keys.

/// Remembers the last key a fetch fired for.
///
/// Mirrors an effect with a dependency list: the first key always fires,
/// after that only a different key does.
#[derive(Debug, Clone)]
pub struct DerivedQuery<K> {
    last: Option<K>,
}

impl<K> Default for DerivedQuery<K> {
    fn default() -> Self {
        Self { last: None }
    }
}

impl<K: PartialEq + Clone> DerivedQuery<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` (and records `key`) when `key` differs from the last one.
    pub fn should_fetch(&mut self, key: &K) -> bool {
        if self.last.as_ref() == Some(key) {
            return false;
        }
        self.last = Some(key.clone());
        true
    }

    pub fn last(&self) -> Option<&K> {
        self.last.as_ref()
    }

    /// Forget the last key so the next `should_fetch` fires.
    pub fn invalidate(&mut self) {
        self.last = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_key_fires() {
        let mut q = DerivedQuery::new();
        assert!(q.should_fetch(&1));
        assert_eq!(q.last(), Some(&1));
    }

    #[test]
    fn test_same_key_does_not_refire() {
        let mut q = DerivedQuery::new();
        assert!(q.should_fetch(&"a"));
        assert!(!q.should_fetch(&"a"));
        assert!(q.should_fetch(&"b"));
        assert!(q.should_fetch(&"a"));
    }

    #[test]
    fn test_invalidate() {
        let mut q = DerivedQuery::new();
        q.should_fetch(&3);
        q.invalidate();
        assert!(q.should_fetch(&3));
    }
}
