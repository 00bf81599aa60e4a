//! Logging utilities for the application
//!
//! Logging goes through `tracing`; `setup_logging` installs a `tracing_subscriber`
//! formatter writing to stdout, filtered by `RUST_LOG` or by a fallback level.
use tracing::Subscriber;
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

/// Level used when neither `RUST_LOG` nor an explicit level is provided
pub const DEFAULT_LOG_LEVEL: &str = "info";

type SetupResult = Result<(), Box<dyn std::error::Error + Send + Sync + 'static>>;

/// Builds the filter: `RUST_LOG` wins, then `fallback_level`, then [`DEFAULT_LOG_LEVEL`]
pub fn build_env_filter(fallback_level: Option<&str>) -> EnvFilter {
	EnvFilter::try_from_default_env()
		.unwrap_or_else(|_| EnvFilter::new(fallback_level.unwrap_or(DEFAULT_LOG_LEVEL)))
}

/// Creates the subscriber without installing it
pub fn create_subscriber<W>(writer: W, filter: EnvFilter) -> impl Subscriber + Send + Sync
where
	W: for<'writer> fmt::MakeWriter<'writer> + Send + Sync + 'static,
{
	tracing_subscriber::registry().with(filter).with(
		fmt::layer()
			.with_writer(writer)
			.event_format(
				fmt::format()
					.with_level(true)
					.with_target(true)
					.with_thread_ids(false)
					.with_thread_names(false)
					.with_ansi(false)
					.compact(),
			)
			.fmt_fields(fmt::format::PrettyFields::new()),
	)
}

/// Setup logging to stdout
pub fn setup_logging(fallback_level: Option<&str>) -> SetupResult {
	setup_logging_with_writer(std::io::stdout, fallback_level)
}

/// Setup logging with a custom writer
pub fn setup_logging_with_writer<W>(writer: W, fallback_level: Option<&str>) -> SetupResult
where
	W: for<'writer> fmt::MakeWriter<'writer> + Send + Sync + 'static,
{
	create_subscriber(writer, build_env_filter(fallback_level)).try_init()?;
	Ok(())
}
