//! Command-line client for the Insight data sources.
//!
//! Queries events or transactions on one or more chains and prints the JSON
//! responses to stdout. Logs go to stderr.
//!
//! # Flow
//! 1. Loads environment variables, including `THIRDWEB_CLIENT_ID`, from `.env`
//! 2. Parses filters, ordering, pagination and aggregation from the arguments
//! 3. Issues one request per chain concurrently
//! 4. Prints the responses; events from several chains are merged newest first
//! 5. With `--metrics`, keeps serving metrics until Ctrl+C

use insight_blueprint::{
	models::{
		AggregationQueryOptions, EventFilterField, FilterField, Filters, OrderBy, Pagination,
		QueryOptions, SortDirection, SourceAggregatedResponse, SourceResponse,
		TransactionFilterField,
	},
	services::{
		source::{Source, SourceClient, SourceError},
		transformation::{CombineEventsTransformation, Transformation},
	},
	utils::{
		logging::setup_logging_with_writer,
		metrics::server::create_metrics_server,
		parsing::{parse_field_list, parse_filter_expression},
	},
};

use anyhow::Context;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use dotenvy::dotenv;
use futures::future::try_join_all;
use serde::Serialize;
use serde_json::Value;
use std::env::var;
use tracing::{error, info, instrument};

const DEFAULT_METRICS_ADDRESS: &str = "127.0.0.1:8081";

/// A parsed query, plain or aggregated
enum Query<F: FilterField> {
	Plain(QueryOptions<F>),
	Aggregated(AggregationQueryOptions<F>),
}

fn query_args() -> Vec<Arg> {
	vec![
		Arg::new("chain")
			.long("chain")
			.short('c')
			.help("Chain id to query; repeat to query several chains")
			.value_name("CHAIN_ID")
			.required(true)
			.action(ArgAction::Append),
		Arg::new("filter")
			.long("filter")
			.short('f')
			.help("Filter as field=value, field:op=value (gte, gt, lte, lt, ne) or field:in=a,b")
			.value_name("EXPR")
			.action(ArgAction::Append),
		Arg::new("sort-by")
			.long("sort-by")
			.help("Field to sort on; repeat or separate with commas for a composite key")
			.value_name("FIELD")
			.action(ArgAction::Append),
		Arg::new("sort-order")
			.long("sort-order")
			.help("Sort direction")
			.value_parser(["asc", "desc"])
			.value_name("ORDER"),
		Arg::new("page")
			.long("page")
			.help("Page to fetch")
			.value_parser(value_parser!(u64))
			.value_name("PAGE"),
		Arg::new("limit")
			.long("limit")
			.help("Number of records per page")
			.value_parser(value_parser!(u64))
			.value_name("LIMIT"),
		Arg::new("group-by")
			.long("group-by")
			.help("Field to group aggregations by; repeat or separate with commas")
			.value_name("FIELD")
			.action(ArgAction::Append),
		Arg::new("aggregate")
			.long("aggregate")
			.help("Aggregation expression such as count() or sum(value); repeatable")
			.value_name("EXPR")
			.action(ArgAction::Append),
	]
}

fn build_cli() -> Command {
	Command::new("insight-blueprint")
		.version(env!("CARGO_PKG_VERSION"))
		.about("Queries indexed events and transactions across chains.")
		.subcommand_required(true)
		.arg(
			Arg::new("log-level")
				.long("log-level")
				.help("Set log level (trace, debug, info, warn, error)")
				.value_name("LEVEL")
				.global(true),
		)
		.arg(
			Arg::new("metrics")
				.long("metrics")
				.help("Serve metrics and keep running after the query until Ctrl+C")
				.action(ArgAction::SetTrue)
				.global(true),
		)
		.arg(
			Arg::new("metrics-address")
				.long("metrics-address")
				.help("Address to start the metrics server on (default: 127.0.0.1:8081)")
				.value_name("HOST:PORT")
				.global(true),
		)
		.subcommand(
			Command::new("events")
				.about("Query contract events")
				.args(query_args()),
		)
		.subcommand(
			Command::new("transactions")
				.about("Query transactions")
				.args(query_args()),
		)
}

fn strings<'a>(matches: &'a ArgMatches, id: &str) -> impl Iterator<Item = &'a str> {
	matches
		.get_many::<String>(id)
		.into_iter()
		.flatten()
		.map(String::as_str)
}

fn fields<F: FilterField>(matches: &ArgMatches, id: &str) -> Result<Vec<F>, SourceError> {
	let mut fields = Vec::new();
	for list in strings(matches, id) {
		fields.extend(parse_field_list::<F>(list)?);
	}
	Ok(fields)
}

/// Builds query options for the field set `F` from subcommand arguments
fn parse_query<F: FilterField>(matches: &ArgMatches) -> Result<Query<F>, SourceError> {
	let mut filters = Filters::new();
	for expr in strings(matches, "filter") {
		let (field, filter) = parse_filter_expression::<F>(expr)?;
		filters.push(field, filter);
	}

	let mut options = QueryOptions::new().filters(filters);

	let sort_fields = fields::<F>(matches, "sort-by")?;
	let sort_order = matches
		.get_one::<String>("sort-order")
		.map(|order| order.parse::<SortDirection>())
		.transpose()
		.map_err(|e| SourceError::invalid_query(e))?;
	if !sort_fields.is_empty() {
		let mut order_by = OrderBy::new(sort_fields);
		if let Some(direction) = sort_order {
			order_by = order_by.direction(direction);
		}
		options = options.order_by(order_by);
	} else if sort_order.is_some() {
		return Err(SourceError::invalid_query("--sort-order requires --sort-by"));
	}

	let page = matches.get_one::<u64>("page").copied();
	let limit = matches.get_one::<u64>("limit").copied();
	if page.is_some() || limit.is_some() {
		options = options.pagination(Pagination { page, limit });
	}

	let group_by = fields::<F>(matches, "group-by")?;
	let aggregation: Vec<&str> = strings(matches, "aggregate").collect();
	if aggregation.is_empty() {
		if !group_by.is_empty() {
			return Err(SourceError::invalid_query("--group-by requires --aggregate"));
		}
		return Ok(Query::Plain(options));
	}

	Ok(Query::Aggregated(
		AggregationQueryOptions::new(aggregation)
			.query(options)
			.group_by(group_by),
	))
}

/// Fetches one page per chain, concurrently
async fn fetch_pages<S: SourceClient>(
	source: &S,
	chains: &[String],
	options: &QueryOptions<S::Field>,
) -> Result<Vec<SourceResponse<S::Record>>, SourceError> {
	try_join_all(chains.iter().map(|chain| source.get(chain, Some(options)))).await
}

/// Fetches aggregations per chain, concurrently
async fn fetch_aggregations<S: SourceClient>(
	source: &S,
	chains: &[String],
	options: &AggregationQueryOptions<S::Field>,
) -> Result<Vec<SourceAggregatedResponse<Value>>, SourceError> {
	try_join_all(
		chains
			.iter()
			.map(|chain| source.get_aggregated::<Value>(chain, Some(options))),
	)
	.await
}

/// A single response is printed as is, several as an array
fn to_output<T: Serialize>(mut responses: Vec<T>) -> anyhow::Result<Value> {
	let value = if responses.len() == 1 {
		serde_json::to_value(responses.remove(0))?
	} else {
		serde_json::to_value(responses)?
	};
	Ok(value)
}

async fn run_query<S>(source: &S, chains: &[String], query: Query<S::Field>) -> anyhow::Result<Value>
where
	S: SourceClient,
	S::Record: Serialize,
{
	match query {
		Query::Plain(options) => to_output(fetch_pages(source, chains, &options).await?),
		Query::Aggregated(options) => to_output(fetch_aggregations(source, chains, &options).await?),
	}
}

#[instrument(skip_all)]
async fn run(source: &Source, name: &str, matches: &ArgMatches) -> anyhow::Result<Value> {
	let chains: Vec<String> = strings(matches, "chain").map(str::to_string).collect();
	info!(chains = ?chains, "Querying {}", name);

	match name {
		"events" => match parse_query::<EventFilterField>(matches)? {
			Query::Plain(options) if chains.len() > 1 => {
				let responses = fetch_pages(&source.events, &chains, &options).await?;
				let events = CombineEventsTransformation::new()
					.transform(responses)
					.await?;
				Ok(serde_json::to_value(events)?)
			}
			query => run_query(&source.events, &chains, query).await,
		},
		"transactions" => {
			let query = parse_query::<TransactionFilterField>(matches)?;
			run_query(&source.transactions, &chains, query).await
		}
		other => anyhow::bail!("Unknown command '{}'", other),
	}
}

/// Main entry point for the command-line client.
///
/// # Errors
/// Returns an error if the configuration is missing, the arguments are invalid or
/// any request fails.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
	let matches = build_cli().get_matches();

	// Load environment variables from .env file
	dotenv().ok();

	// stdout carries the query output
	setup_logging_with_writer(
		std::io::stderr,
		matches.get_one::<String>("log-level").map(String::as_str),
	)
	.unwrap_or_else(|e| {
		eprintln!("Failed to setup logging: {}", e);
	});

	let metrics_enabled =
		matches.get_flag("metrics") || var("METRICS_ENABLED").map(|v| v == "true").unwrap_or(false);

	let metrics_server = if metrics_enabled {
		let metrics_address = matches
			.get_one::<String>("metrics-address")
			.cloned()
			.unwrap_or_else(|| DEFAULT_METRICS_ADDRESS.to_string());
		match create_metrics_server(metrics_address) {
			Ok(server) => Some(tokio::spawn(server)),
			Err(e) => {
				error!("Failed to create metrics server: {}", e);
				None
			}
		}
	} else {
		None
	};

	let source = Source::from_env().context("Failed to initialize data sources")?;

	let (name, sub_matches) = matches
		.subcommand()
		.ok_or_else(|| anyhow::anyhow!("A subcommand is required"))?;
	let output = run(&source, name, sub_matches).await?;
	println!("{}", serde_json::to_string_pretty(&output)?);

	if let Some(metrics_task) = metrics_server {
		info!("Query finished, serving metrics until Ctrl+C");
		tokio::select! {
			result = tokio::signal::ctrl_c() => {
				if let Err(e) = result {
					error!("Error waiting for Ctrl+C: {}", e);
				}
				info!("Shutdown signal received");
			}
			result = metrics_task => {
				match result {
					Ok(Err(e)) => error!("Metrics server error: {}", e),
					Err(e) => error!("Metrics server task failed: {}", e),
					Ok(Ok(())) => info!("Metrics server stopped"),
				}
			}
		}
	}

	Ok(())
}
