//! Shared types and models for the SGE Retail Management Platform
//!
//! This crate contains types shared between the backend and other
//! components of the system.

pub mod models;
pub mod reporting;
pub mod types;
pub mod validation;

pub use models::*;
pub use types::*;
pub use validation::*;
