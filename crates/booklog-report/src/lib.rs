//! # Booklog Report
//!
//! Renders the reading table as Markdown for the site and writes every
//! output file the run produces.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod markdown;
pub mod writer;

pub use markdown::*;
pub use writer::*;
