//! Event (log) records.

use serde::{Deserialize, Serialize};

use crate::models::{query::filter_fields, SourceResource};

filter_fields! {
	/// Fields an events query can filter, sort or group on
	pub enum EventFilterField for SourceResource::Events {
		BlockNumber => "block_number",
		BlockHash => "block_hash",
		BlockTimestamp => "block_timestamp",
		TransactionHash => "transaction_hash",
		TransactionIndex => "transaction_index",
		LogIndex => "log_index",
		Address => "address",
		Data => "data",
		Topic0 => "topic_0",
		Topic1 => "topic_1",
		Topic2 => "topic_2",
		Topic3 => "topic_3",
	}
}

/// An event emitted by a contract.
///
/// The remote record carries up to four discrete topic slots. They are exposed as
/// an ordered `topics` list in which `None` marks an empty slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "WireEvent")]
pub struct Event {
	pub chain_id: u64,
	pub block_number: u64,
	pub block_hash: String,
	pub block_timestamp: u64,
	pub transaction_hash: String,
	pub transaction_index: u64,
	pub log_index: u64,
	pub address: String,
	pub data: String,
	pub topics: Vec<Option<String>>,
}

impl Event {
	/// The event signature hash, i.e. the first topic
	pub fn signature(&self) -> Option<&str> {
		self.topics.first().and_then(|topic| topic.as_deref())
	}
}

/// Event as received from the remote service
#[derive(Deserialize)]
struct WireEvent {
	chain_id: u64,
	block_number: u64,
	block_hash: String,
	block_timestamp: u64,
	transaction_hash: String,
	transaction_index: u64,
	log_index: u64,
	address: String,
	data: String,
	#[serde(default)]
	topics: Option<Vec<Option<String>>>,
	#[serde(default)]
	topic_0: Option<String>,
	#[serde(default)]
	topic_1: Option<String>,
	#[serde(default)]
	topic_2: Option<String>,
	#[serde(default)]
	topic_3: Option<String>,
}

impl TryFrom<WireEvent> for Event {
	type Error = String;

	fn try_from(wire: WireEvent) -> Result<Self, Self::Error> {
		let topics = match (wire.topics, wire.topic_0) {
			(_, Some(topic_0)) => vec![Some(topic_0), wire.topic_1, wire.topic_2, wire.topic_3],
			(Some(topics), None) => topics,
			(None, None) => {
				return Err(format!(
					"event {}:{} has neither `topics` nor `topic_0`",
					wire.transaction_hash, wire.log_index
				))
			}
		};

		Ok(Self {
			chain_id: wire.chain_id,
			block_number: wire.block_number,
			block_hash: wire.block_hash,
			block_timestamp: wire.block_timestamp,
			transaction_hash: wire.transaction_hash,
			transaction_index: wire.transaction_index,
			log_index: wire.log_index,
			address: wire.address,
			data: wire.data,
			topics,
		})
	}
}
