//! Core domain primitives shared by every module.

pub mod credential;
pub mod error;
