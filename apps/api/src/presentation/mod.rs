//! Browser-facing pages and the downloadable analysis report.

pub mod handlers;
pub mod pages;
pub mod report;
