//! ragerank-report — leaderboard rendering.
//!
//! Turns a teacher collection into history chart series, a self-contained
//! HTML page, or a JSON export.

pub mod chart;
pub mod html;
pub mod json;

pub use chart::HistorySeries;
pub use html::{generate_html, write_html_report};
pub use json::LeaderboardExport;
