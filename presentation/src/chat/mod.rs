//! Interactive interrogation module
//!
//! Provides a readline-based interface for building a case and questioning
//! the characters.

mod command;
mod repl;

pub use command::ReplCommand;
pub use repl::InvestigationRepl;
