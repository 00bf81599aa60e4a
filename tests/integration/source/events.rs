use crate::integration::source::common::{
	chain_host, create_test_source, event_json, meta_json, resource_path, TRANSFER_TOPIC,
};

use insight_blueprint::{
	models::{
		AggregationQueryOptions, EventFilterField, Filter, Filters, OrderBy, QueryOptions,
	},
	services::{
		source::{SourceClient, SourceError},
		transformation::{CombineEventsTransformation, Transformation},
	},
};
use mockito::Matcher;
use serde_json::{json, Value};

#[tokio::test]
async fn test_get_events_encodes_query() {
	let mut server = mockito::Server::new_async().await;
	let mock = server
		.mock("GET", resource_path("events").as_str())
		.match_query(Matcher::Exact(
			"filter_address=0xdac17f958d2ee523a2206206994597c13d831ec7\
			 &filter_block_number_gte=19000000&limit=2\
			 &sort_by=block_number&sort_by=log_index&sort_order=desc"
				.to_string(),
		))
		.with_status(200)
		.with_header("content-type", "application/json")
		.with_body(
			json!({
				"meta": meta_json(1, 0, 2, 2),
				"data": [event_json(1, 1700000100, 1), event_json(1, 1700000000, 0)]
			})
			.to_string(),
		)
		.create_async()
		.await;

	let source = create_test_source(&server, &["1"]);
	let options = QueryOptions::new()
		.filters(
			Filters::new()
				.with(
					EventFilterField::Address,
					Filter::equals("0xdac17f958d2ee523a2206206994597c13d831ec7"),
				)
				.with(EventFilterField::BlockNumber, Filter::gte(19000000u64)),
		)
		.order_by(OrderBy::desc([
			EventFilterField::BlockNumber,
			EventFilterField::LogIndex,
		]))
		.limit(2);

	let response = source.events.get("1", Some(&options)).await.unwrap();

	assert_eq!(response.meta.chain_id, 1);
	assert_eq!(response.meta.limit, 2);
	assert_eq!(response.data.len(), 2);
	assert_eq!(response.data[0].log_index, 1);
	assert_eq!(response.data[0].signature(), Some(TRANSFER_TOPIC));
	assert_eq!(response.data[0].topics.len(), 4);
	assert_eq!(response.data[0].topics[2], None);
	mock.assert_async().await;
}

#[tokio::test]
async fn test_get_events_without_options_sends_no_parameters() {
	let mut server = mockito::Server::new_async().await;
	let mock = server
		.mock("GET", resource_path("events").as_str())
		.match_query(Matcher::Exact(String::new()))
		.with_status(200)
		.with_body(json!({ "meta": meta_json(1, 0, 100, 0), "data": [] }).to_string())
		.create_async()
		.await;

	let source = create_test_source(&server, &["1"]);
	let response = source.events.get("1", None).await.unwrap();

	assert!(response.data.is_empty());
	assert_eq!(response.meta.total_items, 0);
	mock.assert_async().await;
}

#[tokio::test]
async fn test_get_aggregated_events() {
	let mut server = mockito::Server::new_async().await;
	let mock = server
		.mock("GET", resource_path("events").as_str())
		.match_query(Matcher::AllOf(vec![
			Matcher::UrlEncoded("filter_topic_0".into(), TRANSFER_TOPIC.into()),
			Matcher::UrlEncoded("group_by".into(), "address".into()),
			Matcher::UrlEncoded("aggregate".into(), "count() AS transfers".into()),
		]))
		.with_status(200)
		.with_body(
			json!({
				"meta": meta_json(1, 0, 100, 2),
				"aggregations": [
					{ "address": "0xa", "transfers": 12 },
					{ "address": "0xb", "transfers": 3 }
				]
			})
			.to_string(),
		)
		.create_async()
		.await;

	let source = create_test_source(&server, &["1"]);
	let options = AggregationQueryOptions::new(["count() AS transfers"])
		.query(QueryOptions::new().filters(
			Filters::new().with(EventFilterField::Topic0, Filter::equals(TRANSFER_TOPIC)),
		))
		.group_by([EventFilterField::Address]);

	let response = source
		.events
		.get_aggregated::<Value>("1", Some(&options))
		.await
		.unwrap();

	assert_eq!(response.aggregations.len(), 2);
	assert_eq!(response.aggregations[0]["transfers"], json!(12));
	assert_eq!(response.aggregations[1]["address"], json!("0xb"));
	mock.assert_async().await;
}

#[tokio::test]
async fn test_get_events_server_error() {
	let mut server = mockito::Server::new_async().await;
	let mock = server
		.mock("GET", resource_path("events").as_str())
		.with_status(500)
		.with_body("boom")
		.create_async()
		.await;

	let source = create_test_source(&server, &["1"]);
	let result = source.events.get("1", None).await;

	match result {
		Err(SourceError::Transport { status, body }) => {
			assert_eq!(status, 500);
			assert!(body.contains("boom"));
		}
		other => panic!("expected a transport error, got {:?}", other),
	}
	mock.assert_async().await;
}

#[tokio::test]
async fn test_get_events_malformed_body() {
	let mut server = mockito::Server::new_async().await;
	let mock = server
		.mock("GET", resource_path("events").as_str())
		.with_status(200)
		.with_body("{\"meta\": ")
		.create_async()
		.await;

	let source = create_test_source(&server, &["1"]);
	let result = source.events.get("1", None).await;

	assert!(matches!(result, Err(SourceError::Parse(_))));
	mock.assert_async().await;
}

#[tokio::test]
async fn test_get_events_record_without_topics() {
	let mut server = mockito::Server::new_async().await;
	let mut event = event_json(1, 1700000000, 0);
	for slot in ["topic_0", "topic_1", "topic_2", "topic_3"] {
		event.as_object_mut().unwrap().remove(slot);
	}
	let mock = server
		.mock("GET", resource_path("events").as_str())
		.with_status(200)
		.with_body(json!({ "meta": meta_json(1, 0, 1, 1), "data": [event] }).to_string())
		.create_async()
		.await;

	let source = create_test_source(&server, &["1"]);
	let result = source.events.get("1", None).await;

	assert!(matches!(result, Err(SourceError::Parse(_))));
	mock.assert_async().await;
}

#[tokio::test]
async fn test_invalid_chain_id_sends_no_request() {
	let mut server = mockito::Server::new_async().await;
	let mock = server
		.mock("GET", Matcher::Any)
		.expect(0)
		.create_async()
		.await;

	let source = create_test_source(&server, &["1"]);
	let result = source.events.get("1.evil", None).await;

	assert!(matches!(result, Err(SourceError::InvalidUrl(_))));
	mock.assert_async().await;
}

#[tokio::test]
async fn test_concurrent_chains_are_combined_newest_first() {
	let mut server = mockito::Server::new_async().await;
	let mainnet = server
		.mock("GET", resource_path("events").as_str())
		.match_header("host", chain_host(&server, "1").as_str())
		.match_query(Matcher::UrlEncoded("limit".into(), "10".into()))
		.with_status(200)
		.with_body(
			json!({
				"meta": meta_json(1, 0, 10, 2),
				"data": [event_json(1, 300, 0), event_json(1, 100, 1)]
			})
			.to_string(),
		)
		.create_async()
		.await;
	let polygon = server
		.mock("GET", resource_path("events").as_str())
		.match_header("host", chain_host(&server, "137").as_str())
		.match_query(Matcher::UrlEncoded("limit".into(), "10".into()))
		.with_status(200)
		.with_body(
			json!({
				"meta": meta_json(137, 0, 10, 1),
				"data": [event_json(137, 200, 2)]
			})
			.to_string(),
		)
		.create_async()
		.await;

	let source = create_test_source(&server, &["1", "137"]);
	let options = QueryOptions::new().limit(10);

	let (first, second) = tokio::join!(
		source.events.get("1", Some(&options)),
		source.events.get("137", Some(&options))
	);
	let responses = vec![first.unwrap(), second.unwrap()];
	assert_eq!(responses[1].meta.chain_id, 137);

	let events = CombineEventsTransformation::new()
		.transform(responses)
		.await
		.unwrap();

	let order: Vec<(u64, u64)> = events
		.iter()
		.map(|event| (event.chain_id, event.block_timestamp))
		.collect();
	assert_eq!(order, vec![(1, 300), (137, 200), (1, 100)]);
	mainnet.assert_async().await;
	polygon.assert_async().await;
}
