//! Interrogation session domain.
//!
//! - [`entities::Message`] / [`entities::Transcript`]: append-only per-role history
//! - [`handle::ConversationHandle`]: opaque model-side memory reference
//! - [`store::SessionStore`]: per-role transcript, summary, and handle

pub mod entities;
pub mod handle;
pub mod store;
