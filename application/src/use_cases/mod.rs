//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod conduct_turn;
pub mod investigation;
pub mod run_case_pipeline;

#[cfg(test)]
pub(crate) mod test_support;
