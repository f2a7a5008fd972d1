//! Core types and utilities for ashiba
//!
//! This is the foundation crate (Layer 0) that all other ashiba crates depend on.
//! It provides:
//! - Path types (AbsPath, RelPath)
//! - Base error types
//!
//! This crate has no dependencies on other ashiba crates.

pub mod error;
pub mod path;

pub use error::{Error, Result};
pub use path::{AbsPath, RelPath};
