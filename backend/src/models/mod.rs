//! Database models for the SGE Retail Management Platform
//!
//! Re-exports models from the shared crate

pub use shared::models::*;
