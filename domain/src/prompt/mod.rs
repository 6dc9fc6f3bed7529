//! Prompt templates sent to the generative model.

pub mod template;

pub use template::{NO_PRIOR_STATEMENTS, OVERVIEW_UNAVAILABLE, PromptTemplate};
