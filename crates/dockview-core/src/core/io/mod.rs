//! Reading and writing of structure and result files.
//!
//! Readers and writers are unit structs implementing the shared traits in
//! [`traits`], so callers can switch formats without changing call sites.
//!
//! - [`sdf`] - Ligand pose batches (V2000 and V3000 molfiles with data items)
//! - [`pdb`] - Receptor coordinates
//! - [`export`] - Tabular export of a ranking

pub mod export;
pub mod pdb;
pub mod sdf;
pub mod traits;
