//! Typed access to on-chain data served by the thirdweb Insight indexing service.
//!
//! The crate exposes chain-scoped [`services::source::SourceClient`]s for events
//! and transactions. Queries are described with strongly typed filters, ordering,
//! pagination and aggregation options that are encoded into the query-string
//! dialect of the remote service.
//!
//! - `models`: Query options, records and configuration
//! - `services`: Sources and transformations
//! - `utils`: HTTP client, logging, metrics and parsing helpers

pub mod models;
pub mod services;
pub mod utils;
