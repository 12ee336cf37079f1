//! CLI command implementations.

pub mod apply;
pub mod common;
pub mod evolve;
pub mod measure;
pub mod version;
