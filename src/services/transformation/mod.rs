//! Post-processing of source responses.
//!
//! A [`Transformation`] turns the output of one or more source calls into another
//! shape, e.g. merging the pages fetched from several chains.

mod combine_events;

use async_trait::async_trait;

pub use combine_events::CombineEventsTransformation;

/// Trait for transformations over fetched data
#[async_trait]
pub trait Transformation<T, R>: Send + Sync
where
	T: Send + 'static,
{
	type Error: std::error::Error + Send + Sync + 'static;

	async fn transform(&self, data: T) -> Result<R, Self::Error>;
}
