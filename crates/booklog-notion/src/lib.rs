//! # Booklog Notion
//!
//! Pulls the reading-log database from Notion and turns its heterogeneous
//! page records into a sorted table of finished books.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod record;
pub mod table;

pub use client::*;
pub use record::*;
pub use table::*;

/// One Notion page object exactly as the query endpoint returned it.
pub type RawRecord = serde_json::Value;
