//! Application layer module
//!
//! Presentation of crawl results for the command line.

pub mod report;

pub use report::{render_detail, render_summary};
