//! Port definitions (interfaces for external adapters)

pub mod conversation_logger;
pub mod model_gateway;
pub mod progress;
pub mod transcript_exporter;
