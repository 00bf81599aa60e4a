use crate::integration::source::common::{create_test_source, meta_json, resource_path};

use insight_blueprint::{
	models::{SourceConfig, CLIENT_ID_VAR},
	services::source::{Source, SourceClient, SourceError},
	utils::metrics::SOURCE_REQUESTS_TOTAL,
};
use serde_json::json;

#[tokio::test]
async fn test_sources_share_configuration() {
	let mut server = mockito::Server::new_async().await;
	let events = server
		.mock("GET", resource_path("events").as_str())
		.with_status(200)
		.with_body(json!({ "meta": meta_json(1, 0, 100, 0), "data": [] }).to_string())
		.create_async()
		.await;
	let transactions = server
		.mock("GET", resource_path("transactions").as_str())
		.with_status(200)
		.with_body(json!({ "meta": meta_json(1, 0, 100, 0), "data": [] }).to_string())
		.create_async()
		.await;

	let source = create_test_source(&server, &["1"]);

	let (events_result, transactions_result) =
		tokio::join!(source.events.get("1", None), source.transactions.get("1", None));

	assert!(events_result.is_ok());
	assert!(transactions_result.is_ok());
	events.assert_async().await;
	transactions.assert_async().await;
}

#[tokio::test]
async fn test_requests_are_counted_by_outcome() {
	let mut server = mockito::Server::new_async().await;
	let mock = server
		.mock("GET", resource_path("transactions").as_str())
		.with_status(503)
		.with_body("unavailable")
		.create_async()
		.await;

	let counter = SOURCE_REQUESTS_TOTAL.with_label_values(&["transactions", "transport_error"]);
	let before = counter.get();

	let source = create_test_source(&server, &["1"]);
	let result = source.transactions.get("1", None).await;

	assert!(matches!(result, Err(SourceError::Transport { status: 503, .. })));
	assert!(counter.get() > before);
	mock.assert_async().await;
}

#[test]
fn test_new_rejects_invalid_configuration() {
	let result = Source::new(SourceConfig::new(""));
	assert!(matches!(result, Err(SourceError::Config(_))));
}

#[test]
fn test_configuration_from_lookup() {
	let config = SourceConfig::from_lookup(|name| {
		(name == CLIENT_ID_VAR).then(|| "from-env".to_string())
	})
	.unwrap();

	assert_eq!(config.client_id.as_str(), "from-env");
	assert!(Source::new(config).is_ok());
}
