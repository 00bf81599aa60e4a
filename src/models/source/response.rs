//! Response envelopes returned by the remote service.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Pagination and context metadata accompanying every response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceMeta {
	pub chain_id: u64,
	#[serde(default)]
	pub address: Option<String>,
	#[serde(default)]
	pub signature: Option<String>,
	pub page: u64,
	pub limit: u64,
	pub total_items: u64,
	pub total_pages: u64,
}

/// One page of records
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceResponse<R> {
	pub meta: SourceMeta,
	pub data: Vec<R>,
}

/// Aggregation results, one map per group from label to computed value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceAggregatedResponse<R> {
	pub meta: SourceMeta,
	pub aggregations: Vec<HashMap<String, R>>,
}
