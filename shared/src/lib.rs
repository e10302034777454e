//! Shared types and the risk-pipeline core for the Agri Advisory Platform
//!
//! This crate contains the domain models exchanged between components of the
//! system, plus the pure (no-I/O) scoring logic: feature extraction from
//! weather forecasts, risk indices, and advisory composition.

pub mod advisory;
pub mod features;
pub mod models;
pub mod risk;
pub mod types;
pub mod validation;

pub use advisory::*;
pub use features::*;
pub use models::*;
pub use risk::*;
pub use types::*;
pub use validation::*;
