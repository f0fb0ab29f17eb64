//! # Booklog Graphs
//!
//! Turns the reading table into a per-day reading-rate series and renders
//! it: an interactive Plotly chart for the site and a static SVG preview
//! drawn with plotters.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod chart;
pub mod interpolate;
pub mod preview;
pub mod traits;

pub use chart::*;
pub use interpolate::*;
pub use preview::*;
pub use traits::*;
