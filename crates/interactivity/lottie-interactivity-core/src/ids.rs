//! Identifiers and a simple allocator for subscriptions.

use serde::{Deserialize, Serialize};

/// Handle returned by every `subscribe` call; pass it back to `unsubscribe`.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct ListenerId(pub u32);

/// Monotonic allocator for ListenerId.
/// IDs are never reused within one allocator, so a stale handle cannot
/// remove a newer listener.
#[derive(Default, Debug)]
pub struct IdAllocator {
    next_listener: u32,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn alloc_listener(&mut self) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener = self.next_listener.wrapping_add(1);
        id
    }
}
