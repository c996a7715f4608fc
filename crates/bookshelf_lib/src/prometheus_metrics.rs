use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};
use std::sync::OnceLock;

// It's important to use the exported crate `prometheus_exporter::prometheus`
// instead of `prometheus`, as different versions of that crate have
// incompatible global registries.
use prometheus_exporter::prometheus;
use tracing::info;

use crate::config::Config;

pub struct PrometheusMetrics {
    pub mutations: prometheus::IntCounterVec,
    pub events_published: prometheus::IntCounterVec,
    pub events_dropped: prometheus::IntCounterVec,
    pub active_subscriptions: prometheus::IntGaugeVec,
}

static METRICS: OnceLock<PrometheusMetrics> = OnceLock::new();

/// Metrics registered on the default registry, which is the one
/// [`PrometheusExporter`] serves.
pub fn metrics() -> &'static PrometheusMetrics {
    METRICS.get_or_init(|| PrometheusMetrics::new(prometheus::default_registry().clone()))
}

impl PrometheusMetrics {
    pub(crate) fn new(registry: prometheus::Registry) -> Self {
        let mutations = prometheus::register_int_counter_vec_with_registry!(
            "bookshelf_mutations",
            "Number of executed GraphQL mutations",
            &["operation"],
            registry
        )
        .unwrap();
        let events_published = prometheus::register_int_counter_vec_with_registry!(
            "bookshelf_events_published",
            "Number of events published on the event bus",
            &["topic"],
            registry
        )
        .unwrap();
        let events_dropped = prometheus::register_int_counter_vec_with_registry!(
            "bookshelf_events_dropped",
            "Number of events published while no listener was subscribed",
            &["topic"],
            registry
        )
        .unwrap();
        let active_subscriptions = prometheus::register_int_gauge_vec_with_registry!(
            "bookshelf_active_subscriptions",
            "Number of live event bus listeners",
            &["topic"],
            registry
        )
        .unwrap();

        Self {
            mutations,
            events_published,
            events_dropped,
            active_subscriptions,
        }
    }
}

/// Serves the default registry at `http://0.0.0.0:{prometheusPort}/metrics`
/// until dropped.
#[derive(Debug)]
pub struct PrometheusExporter {
    binding: SocketAddr,
    _exporter: prometheus_exporter::Exporter,
}

impl PrometheusExporter {
    /// Starts the exporter configured by `config`, or returns `None` when
    /// `prometheusPort` is 0.
    pub fn from_config(config: &Config) -> anyhow::Result<Option<Self>> {
        if config.prometheus_port == 0 {
            info!("Prometheus exporter disabled");
            return Ok(None);
        }

        let binding = SocketAddr::V4(SocketAddrV4::new(
            Ipv4Addr::UNSPECIFIED,
            config.prometheus_port,
        ));
        let mut builder = prometheus_exporter::Builder::new(binding);
        builder.with_registry(prometheus::default_registry().clone());
        let exporter = builder.start()?;

        info!(port = binding.port(), "Prometheus exporter started");
        Ok(Some(Self {
            binding,
            _exporter: exporter,
        }))
    }

    pub fn port(&self) -> u16 {
        self.binding.port()
    }
}
