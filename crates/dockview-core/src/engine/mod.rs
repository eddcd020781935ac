//! # Engine Module
//!
//! Run-time machinery around the pure scoring core: validated settings, the
//! property filter, binding-site estimation, the rescoring seam and progress
//! reporting.
//!
//! - **Configuration** ([`config`]) - Review settings with a validating builder
//! - **Filtering** ([`filter`]) - Molecular weight, logP and score bounds
//! - **Binding Site** ([`binding_site`]) - Docking box from receptor residues
//! - **Rescoring** ([`rescoring`]) - Attaching external tool results to records
//! - **Progress Monitoring** ([`progress`]) - Callback-based progress events
//! - **Error Handling** ([`error`]) - The error type returned by workflows

pub mod binding_site;
pub mod config;
pub mod error;
pub mod filter;
pub mod progress;
pub mod rescoring;
