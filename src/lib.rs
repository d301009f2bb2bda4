//! Mood journal with a persisted history and a line chart of how the mood changes over time.
//! Entries are kept in a local store, printed as a short history and drawn onto any [chart::Canvas],
//! an SVG one included.
//!

pub mod chart;
pub mod cli;
pub mod mood;
pub mod storage;
pub mod utils;
