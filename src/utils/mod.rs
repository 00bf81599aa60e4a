//! Utility modules for common functionality.
//!
//! This module provides various utility functions and types that are used across
//! the application. Currently includes:
//!
//! - http: Construction of the shared HTTP client
//! - logging: Logging utilities
//! - metrics: Metrics utilities
//! - parsing: Parsing of textual query forms

pub mod http;
pub mod logging;
pub mod metrics;
pub mod parsing;
