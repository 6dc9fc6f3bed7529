//! Gemini adapter
//!
//! Implements the [`ModelGateway`](interrogation_application::ModelGateway)
//! port over the Generative Language REST API (`generateContent`).
//!
//! - [`protocol`]: request/response wire types
//! - [`error`]: status, transport, and empty-reply classification
//! - [`conversation`]: per-role conversation state behind the opaque handle
//! - [`gateway`]: the HTTP adapter itself
//!
//! Persona conversations are represented by [`GeminiConversation`], stored
//! inside the opaque handle the application layer keeps per role.

pub mod conversation;
pub mod error;
pub mod gateway;
pub mod protocol;

pub use conversation::GeminiConversation;
pub use gateway::GeminiGateway;
