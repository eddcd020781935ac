//! # Core Models Module
//!
//! Plain data structures shared by the readers, the scoring layer and the
//! workflows.
//!
//! ## Key Components
//!
//! - [`ligand`] - Ligand pose records, typed property maps, extracted scores and
//!   rescoring results
//! - [`protein`] - Receptor atoms and docking search boxes
//! - [`topology`] - Ligand connection tables (atoms with formal charges, bonds)
//!
//! ## Usage
//!
//! ```ignore
//! use dockview::core::models::ligand::{LigandRecord, PropertyMap};
//!
//! let props: PropertyMap = [("affinity", "-8.5")].into_iter().collect();
//! let record = LigandRecord::new(0, "lig-1", "").with_properties(props);
//! ```

pub mod ligand;
pub mod protein;
pub mod topology;
