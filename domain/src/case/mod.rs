//! Case domain: structured case details and the complaint letter.

pub mod entities;
pub mod parsing;
