//! # Core Module
//!
//! Stateless building blocks of the pose review library.
//!
//! - **Data Models** ([`models`]) - Ligand records, property values, receptor atoms and binding sites
//! - **File I/O** ([`io`]) - SDF and PDB readers, ranked SDF and CSV writers
//! - **Scoring** ([`scoring`]) - Score key priority, score extraction and ranking
//! - **Descriptors** ([`descriptors`]) - Molecular weight and lipophilicity per ligand
//! - **Profiles** ([`profiles`]) - Registry of known receptors and their docking boxes
//!
//! Nothing in this module keeps state between calls; orchestration lives in
//! [`crate::engine`] and [`crate::workflows`].

pub mod descriptors;
pub mod io;
pub mod models;
pub mod profiles;
pub mod scoring;
