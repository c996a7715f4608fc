mod cli;
pub mod config;
pub mod event_bus;
pub mod graphql_api;
mod prometheus_metrics;

#[cfg(feature = "tests")]
pub mod test_utils;

pub use cli::CliOptions;
pub use prometheus_metrics::{metrics, PrometheusExporter, PrometheusMetrics};

pub const BOOKSHELF_VERSION: &str = env!("CARGO_PKG_VERSION");
