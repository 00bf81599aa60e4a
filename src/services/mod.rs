//! Core services.
//!
//! - `source`: Chain-scoped access to events and transactions
//! - `transformation`: Post-processing of fetched records

pub mod source;
pub mod transformation;
