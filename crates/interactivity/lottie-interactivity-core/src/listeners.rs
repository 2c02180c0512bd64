//! Ordered listener registry shared by the state machine and position feeds.

use std::fmt;

use crate::ids::{IdAllocator, ListenerId};

type Callback<T> = Box<dyn FnMut(&T)>;

/// Listeners are invoked synchronously, in subscription order.
///
/// A callback must not re-enter the object that owns this registry; the
/// owner is mutably borrowed for the duration of [`Listeners::emit`].
pub struct Listeners<T> {
    ids: IdAllocator,
    entries: Vec<(ListenerId, Callback<T>)>,
}

impl<T> Default for Listeners<T> {
    fn default() -> Self {
        Self {
            ids: IdAllocator::new(),
            entries: Vec::new(),
        }
    }
}

impl<T> fmt::Debug for Listeners<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listeners")
            .field("count", &self.entries.len())
            .finish()
    }
}

impl<T> Listeners<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, callback: Box<dyn FnMut(&T)>) -> ListenerId {
        let id = self.ids.alloc_listener();
        self.entries.push((id, callback));
        id
    }

    /// Returns false when the id was never registered or is already gone.
    pub fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(lid, _)| *lid != id);
        self.entries.len() != before
    }

    pub fn emit(&mut self, value: &T) {
        for (_, cb) in self.entries.iter_mut() {
            cb(value);
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
