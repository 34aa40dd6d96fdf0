use std::any::type_name;
use std::fmt;

/// Read handle on a piece of state.
///
/// Views never own their state; they hold a store and narrow it for their
/// children with [`Store::scope`].
pub struct Store<'a, S> {
    state: &'a S,
}

impl<'a, S> Store<'a, S> {
    /// Store over `state`.
    pub const fn new(state: &'a S) -> Self {
        Self { state }
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> &'a S {
        self.state
    }

    /// Narrows the store to a part of its state. Yields nothing when
    /// `narrow` does, e.g. when asked for a variant that is not active.
    pub fn scope<C>(&self, narrow: impl FnOnce(&'a S) -> Option<&'a C>) -> Option<Store<'a, C>> {
        let child = narrow(self.state);
        if child.is_none() {
            tracing::trace!(
                parent = type_name::<S>(),
                child = type_name::<C>(),
                "store scope did not match the current state"
            );
        }
        child.map(Store::new)
    }
}

impl<S> Clone for Store<'_, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S> Copy for Store<'_, S> {}

impl<S: fmt::Debug> fmt::Debug for Store<'_, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store").field("state", self.state).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    enum Tab {
        Counter(u32),
        Label { text: String },
        Closed,
    }

    fn counter(tab: &Tab) -> Option<&u32> {
        match tab {
            Tab::Counter(count) => Some(count),
            _ => None,
        }
    }

    #[test]
    fn test_scope_to_active_variant() {
        let tab = Tab::Counter(3);
        let store = Store::new(&tab);
        let child = store.scope(counter).unwrap();
        assert_eq!(*child.state(), 3);
    }

    #[test]
    fn test_scope_to_inactive_variant_is_none() {
        let tab = Tab::Label { text: "hi".to_owned() };
        assert!(Store::new(&tab).scope(counter).is_none());

        let closed = Tab::Closed;
        assert!(Store::new(&closed).scope(counter).is_none());
    }

    #[test]
    fn test_store_is_copy() {
        let tab = Tab::Closed;
        let store = Store::new(&tab);
        let copy = store;
        assert_eq!(store.state(), copy.state());
        assert_eq!(format!("{copy:?}"), "Store { state: Closed }");
    }
}
