//! Records exposed by the sources and the envelopes they arrive in.

mod event;
mod response;
mod transaction;

use serde::{Deserialize, Serialize};
use std::fmt;

pub use event::{Event, EventFilterField};
pub use response::{SourceAggregatedResponse, SourceMeta, SourceResponse};
pub use transaction::{Transaction, TransactionFilterField};

/// The remote resource a source reads from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceResource {
	Events,
	Transactions,
}

impl SourceResource {
	/// Path segment of the resource
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Events => "events",
			Self::Transactions => "transactions",
		}
	}
}

impl fmt::Display for SourceResource {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}
