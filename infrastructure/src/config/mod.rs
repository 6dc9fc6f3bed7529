//! Configuration file loading for interrogation-sim
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. Environment variables: `INTERROGATION_<SECTION>__<KEY>`
//! 2. `--config <path>` specified file
//! 3. Project root: `./interrogation.toml` or `./.interrogation.toml`
//! 4. Global: `$XDG_CONFIG_HOME/interrogation-sim/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    FileConfig, FileGeminiConfig, FileLoggingConfig, FileOutputConfig, FileReplConfig,
};
pub use loader::ConfigLoader;
