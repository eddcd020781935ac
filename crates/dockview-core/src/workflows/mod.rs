//! # Workflows Module
//!
//! End-to-end procedures built from [`crate::core`] and [`crate::engine`].
//!
//! - **Review Workflow** ([`review`]) - Parse a pose batch, score and describe
//!   every entry, apply the property filter and rank the survivors.

pub mod review;
