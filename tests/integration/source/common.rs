//! Shared fixtures for source integration tests.
//!
//! The remote service addresses each chain through its own subdomain. The mock
//! server only listens on a loopback address, so the HTTP client resolves the
//! chain subdomains of `insight.test` to it.

use insight_blueprint::{models::SourceConfig, services::source::Source};
use serde_json::{json, Value};
use std::net::SocketAddr;

pub const CLIENT_ID: &str = "test-client";
pub const TEST_DOMAIN: &str = "insight.test";
pub const TRANSFER_TOPIC: &str =
	"0xddf252ad1be2c89b69c2b068fc378daa952ba7f163c4a11628f55a4df523b3ef";

/// Path of `resource` for the test client
pub fn resource_path(resource: &str) -> String {
	format!("/v1/{}/{}", CLIENT_ID, resource)
}

/// Host header sent for `chain_id`
pub fn chain_host(server: &mockito::ServerGuard, chain_id: &str) -> String {
	let port = server
		.host_with_port()
		.parse::<SocketAddr>()
		.unwrap()
		.port();
	format!("{}.{}:{}", chain_id, TEST_DOMAIN, port)
}

/// Creates a source whose requests for `chains` land on `server`
pub fn create_test_source(server: &mockito::ServerGuard, chains: &[&str]) -> Source {
	let addr = server.host_with_port().parse::<SocketAddr>().unwrap();

	let mut builder = reqwest::Client::builder();
	for chain in chains {
		builder = builder.resolve(&format!("{}.{}", chain, TEST_DOMAIN), addr);
	}
	let client = builder.build().unwrap();

	let config = SourceConfig::new(CLIENT_ID)
		.with_scheme("http")
		.with_host(format!("{}:{}", TEST_DOMAIN, addr.port()));

	Source::with_client(config, client)
}

pub fn meta_json(chain_id: u64, page: u64, limit: u64, total_items: u64) -> Value {
	let total_pages = if limit == 0 {
		0
	} else {
		total_items.div_ceil(limit)
	};
	json!({
		"chain_id": chain_id,
		"address": null,
		"signature": null,
		"page": page,
		"limit": limit,
		"total_items": total_items,
		"total_pages": total_pages
	})
}

/// An event in the flattened topic layout used by the remote service
pub fn event_json(chain_id: u64, block_timestamp: u64, log_index: u64) -> Value {
	json!({
		"chain_id": chain_id,
		"block_number": 19000000 + log_index,
		"block_hash": "0xblock",
		"block_timestamp": block_timestamp,
		"transaction_hash": format!("0xtx{}", log_index),
		"transaction_index": 0,
		"log_index": log_index,
		"address": "0xdac17f958d2ee523a2206206994597c13d831ec7",
		"data": "0x00000000000000000000000000000000000000000000000000000000000003e8",
		"topic_0": TRANSFER_TOPIC,
		"topic_1": "0x000000000000000000000000000000000000000000000000000000000000dead",
		"topic_2": null,
		"topic_3": null
	})
}

pub fn transaction_json(chain_id: u64, hash: &str, status: Option<u64>) -> Value {
	json!({
		"chain_id": chain_id,
		"hash": hash,
		"nonce": 1,
		"block_hash": "0xblock",
		"block_number": 19000000,
		"block_timestamp": 1700000000,
		"transaction_index": 2,
		"from_address": "0xfrom",
		"to_address": "0xto",
		"value": "1000000000000000000",
		"gas": 21000,
		"gas_price": "30000000000",
		"data": "0x",
		"function_selector": "0x",
		"max_fee_per_gas": "40000000000",
		"max_priority_fee_per_gas": "1000000000",
		"transaction_type": 2,
		"r": "0x1",
		"s": "0x2",
		"v": "0x0",
		"access_list": null,
		"contract_address": null,
		"gas_used": status.map(|_| 21000),
		"cumulative_gas_used": status.map(|_| 42000),
		"effective_gas_price": status.map(|_| "30000000000"),
		"blob_gas_used": null,
		"blob_gas_price": null,
		"logs_bloom": null,
		"status": status
	})
}
