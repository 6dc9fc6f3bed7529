//! Progress reporting for model calls

pub mod reporter;
