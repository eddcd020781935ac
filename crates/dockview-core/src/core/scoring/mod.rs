//! Score extraction and ranking.
//!
//! - [`priority`] - The ordered list of property names that may hold a score
//! - [`extractor`] - Per-entry score determination with comment-text fallback
//! - [`ranking`] - Stable score ordering with unknown scores trailing

pub mod extractor;
pub mod priority;
pub mod ranking;
