//! # Booklog
//!
//! Pulls a Notion reading log, charts pages read per day, and writes the
//! Markdown table of finished books for a static site.
//!
//! This is the main binary crate; it wires the fetch, table, chart, and
//! report stages into a single run.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod pipeline;

pub use error::*;
pub use pipeline::*;
