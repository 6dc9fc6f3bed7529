//! Infrastructure layer for interrogation-sim
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod export;
pub mod gemini;
pub mod logging;

// Re-export commonly used types
pub use config::{
    ConfigLoader, FileConfig, FileGeminiConfig, FileLoggingConfig, FileOutputConfig,
    FileReplConfig,
};
pub use export::TextFileExporter;
pub use gemini::{GeminiConversation, GeminiGateway};
pub use logging::JsonlConversationLogger;
