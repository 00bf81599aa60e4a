//! Merging of event pages.

use async_trait::async_trait;
use std::{cmp::Reverse, convert::Infallible};
use tracing::debug;

use crate::{
	models::{Event, SourceResponse},
	services::transformation::Transformation,
};

/// Flattens several event responses into a single list, newest first.
///
/// Events sharing a timestamp keep the order in which they were received.
#[derive(Debug, Clone, Copy, Default)]
pub struct CombineEventsTransformation;

impl CombineEventsTransformation {
	pub fn new() -> Self {
		Self
	}
}

#[async_trait]
impl Transformation<Vec<SourceResponse<Event>>, Vec<Event>> for CombineEventsTransformation {
	type Error = Infallible;

	async fn transform(&self, data: Vec<SourceResponse<Event>>) -> Result<Vec<Event>, Infallible> {
		let mut events: Vec<Event> = data
			.into_iter()
			.flat_map(|response| response.data)
			.collect();
		events.sort_by_key(|event| Reverse(event.block_timestamp));

		debug!(events = events.len(), "combined event responses");
		Ok(events)
	}
}
