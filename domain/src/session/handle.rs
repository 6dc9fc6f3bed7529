//! Opaque model-side conversation handle.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// Reference to the model gateway's memory of one role's session.
///
/// Only the gateway that created a handle can look inside it (via
/// [`downcast_ref`](Self::downcast_ref) with its own state type). Handles
/// are immutable values: a gateway returns a fresh handle after each
/// successful exchange instead of mutating the one it was given.
#[derive(Clone)]
pub struct ConversationHandle {
    state: Arc<dyn Any + Send + Sync>,
}

impl ConversationHandle {
    pub fn new<T: Any + Send + Sync>(state: T) -> Self {
        Self {
            state: Arc::new(state),
        }
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.state.downcast_ref::<T>()
    }

    /// True when both handles refer to the same gateway state.
    pub fn same_as(&self, other: &ConversationHandle) -> bool {
        Arc::ptr_eq(&self.state, &other.state)
    }
}

impl fmt::Debug for ConversationHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ConversationHandle(..)")
    }
}
