//! # Booklog Common
//!
//! Shared types, error handling, and logging for booklog.
//!
//! This crate provides the foundational types used across all other crates
//! in the booklog workspace: the normalized reading row, the workspace-wide
//! error type, and the tracing subscriber setup.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod logging;
pub mod types;

#[cfg(any(test, feature = "testing"))]
pub mod test_utils;

pub use error::*;
pub use logging::*;
pub use types::*;
