//! # DockView Core Library
//!
//! Headless core of a docking pose viewer: reads ligand pose batches and
//! receptor structures, extracts one docking score per pose and ranks the
//! batch deterministically.
//!
//! ## Architecture
//!
//! - **[`core`]: The Foundation.** Stateless data models (`LigandRecord`,
//!   `ProteinStructure`), SDF/PDB/CSV I/O, descriptors and the score extractor
//!   and ranker.
//!
//! - **[`engine`]: Run-time Machinery.** Validated configuration, property
//!   filters, binding-site estimation, the rescoring seam and progress events.
//!
//! - **[`workflows`]: The Public API.** Complete procedures such as
//!   [`workflows::review::run`], which turns an SDF stream into a ranking.

pub mod core;
pub mod engine;
pub mod workflows;
