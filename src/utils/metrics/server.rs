//! Metrics server module
//!
//! This module provides an HTTP server exposing Prometheus metrics for scraping
//! and a liveness endpoint.

use actix_web::middleware::{Compress, DefaultHeaders, NormalizePath};
use actix_web::{web, App, HttpResponse, HttpServer, Responder};
use serde_json::json;
use tracing::{error, info};

use crate::utils::metrics::gather_metrics;

/// Metrics endpoint handler
async fn metrics_handler() -> impl Responder {
	match gather_metrics() {
		Ok(buffer) => HttpResponse::Ok()
			.content_type("text/plain; version=0.0.4; charset=utf-8")
			.body(buffer),
		Err(e) => {
			error!("Error gathering metrics: {}", e);
			HttpResponse::InternalServerError().finish()
		}
	}
}

/// Liveness endpoint handler
async fn health_handler() -> impl Responder {
	HttpResponse::Ok().json(json!({ "status": "ok" }))
}

// Create metrics server
pub fn create_metrics_server(bind_address: String) -> std::io::Result<actix_web::dev::Server> {
	info!("Starting metrics server on {}", bind_address);

	Ok(HttpServer::new(|| {
		App::new()
			.wrap(Compress::default())
			.wrap(NormalizePath::trim())
			.wrap(DefaultHeaders::new())
			.route("/metrics", web::get().to(metrics_handler))
			.route("/health", web::get().to(health_handler))
	})
	.workers(1)
	.bind(bind_address)?
	.shutdown_timeout(5)
	.run())
}
