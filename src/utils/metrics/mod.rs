//! Metrics module for the application.
//!
//! - This module contains the global Prometheus registry.
//! - Defines the source request metrics.

pub mod server;
use lazy_static::lazy_static;
use prometheus::{Encoder, HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry, TextEncoder};

lazy_static! {
	// Global Prometheus registry.
	pub static ref REGISTRY: Registry = Registry::new();

	// Counter of source requests by resource and outcome.
	pub static ref SOURCE_REQUESTS_TOTAL: IntCounterVec = {
		let counter = IntCounterVec::new(
			Opts::new("source_requests_total", "Total number of data source requests"),
			&["resource", "outcome"]
		).unwrap();
		REGISTRY.register(Box::new(counter.clone())).unwrap();
		counter
	};

	// Histogram of source request durations by resource.
	pub static ref SOURCE_REQUEST_DURATION_SECONDS: HistogramVec = {
		let histogram = HistogramVec::new(
			HistogramOpts::new(
				"source_request_duration_seconds",
				"Duration of data source requests in seconds"
			),
			&["resource"]
		).unwrap();
		REGISTRY.register(Box::new(histogram.clone())).unwrap();
		histogram
	};
}

/// Gather all metrics and encode into the provided format.
pub fn gather_metrics() -> Result<Vec<u8>, Box<dyn std::error::Error>> {
	let encoder = TextEncoder::new();
	let metric_families = REGISTRY.gather();
	let mut buffer = Vec::new();
	encoder.encode(&metric_families, &mut buffer)?;
	Ok(buffer)
}
