//! Data sources over the remote indexing service.
//!
//! - [`BaseSource`]: request building, dispatch and response parsing
//! - [`EventsSource`] / [`TransactionsSource`]: the concrete sources
//! - [`Source`]: both sources behind one value
//! - [`encoder`]: translation of query options into query parameters

mod base;
mod client;
pub mod encoder;
mod error;
mod events;
mod facade;
mod params;
mod transactions;

pub use base::BaseSource;
pub use client::SourceClient;
pub use encoder::{encode_aggregation_query, encode_query, EncodeQuery};
pub use error::SourceError;
pub use events::EventsSource;
pub use facade::Source;
pub use params::QueryParams;
pub use transactions::TransactionsSource;
