use std::net::Ipv4Addr;

use anyhow::Context;
use async_graphql_axum::{GraphQL, GraphQLSubscription};
use axum::Router;
use bookshelf_lib::config::Config;
use bookshelf_lib::event_bus::EventBus;
use bookshelf_lib::graphql_api::{self, ApiSchema, ApiSchemaContext};
use bookshelf_lib::{CliOptions, PrometheusExporter, BOOKSHELF_VERSION};
use bookshelf_store::Store;
use clap::Parser;
use tokio::net::TcpListener;
use tracing::*;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    info!(version = BOOKSHELF_VERSION, "Starting Bookshelf");

    info!("Parse options");
    let cli_options = CliOptions::parse();

    let config = load_config(&cli_options)?;

    info!("Initialize store");
    let dataset = config.dataset.load()?;
    let store = Store::new(dataset).context("invalid dataset")?;
    let event_bus = EventBus::new();

    // Prometheus metrics.
    let _exporter = PrometheusExporter::from_config(&config)?;

    let api_schema = graphql_api::api_schema(ApiSchemaContext::new(store, event_bus));
    let listener = TcpListener::bind((Ipv4Addr::UNSPECIFIED, config.graphql.port)).await?;
    info!(port = config.graphql.port, "GraphQL API listening");

    // Listen to requests forever.
    axum::serve(listener, axum_server(api_schema)).await?;

    Ok(())
}

/// Reads the configuration file, if any, and applies command-line overrides.
fn load_config(cli_options: &CliOptions) -> anyhow::Result<Config> {
    let mut config = match &cli_options.config {
        Some(path) => {
            info!(path = %path.display(), "Loading configuration file");
            Config::read(path)?
        }
        None => {
            info!("No configuration file given, using defaults");
            Config::default()
        }
    };
    if let Some(port) = cli_options.port {
        config.graphql.port = port;
    }

    Ok(config)
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
}

/// Queries and mutations are POSTed to `/graphql`; subscriptions upgrade a
/// GET on the same path to a WebSocket.
fn axum_server(api_schema: ApiSchema) -> Router<()> {
    use axum::routing::{get, get_service};

    axum::Router::new()
        .route("/", get(|| async { "Ready to roll!" }))
        .route(
            "/graphql",
            get_service(GraphQLSubscription::new(api_schema.clone()))
                .post_service(GraphQL::new(api_schema)),
        )
}
