//! Shared startup plumbing: logging setup and runtime environment checks.

pub mod env;
pub mod utils;
