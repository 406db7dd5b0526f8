use crate::config::Config;
use axum::http::Request;
use opentelemetry::{global, KeyValue};
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::{runtime, trace as sdktrace, Resource};
use tracing::Span;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Registry};

pub const SEAT_PURCHASES_TOTAL: &str = "seat_purchases_total";
pub const LOCK_ACQUISITIONS_TOTAL: &str = "lock_acquisitions_total";
pub const CINEMAS_CREATED_TOTAL: &str = "cinemas_created_total";

const DEFAULT_FILTER: &str = "cinema_seats=debug,tower_http=debug,sqlx=warn";

/// Flushes pending spans when dropped.
pub struct ObservabilityGuard;

impl Drop for ObservabilityGuard {
    fn drop(&mut self) {
        shutdown();
    }
}

pub fn init(config: &Config) -> anyhow::Result<ObservabilityGuard> {
    init_tracing(config)?;
    init_metrics(config)?;
    Ok(ObservabilityGuard)
}

fn init_tracing(config: &Config) -> anyhow::Result<()> {
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_thread_ids(true)
        .with_target(true);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| DEFAULT_FILTER.into());

    // Optional OTLP layer for distributed tracing
    if let Some(endpoint) = &config.otel_exporter_endpoint {
        let exporter = opentelemetry_otlp::new_exporter()
            .tonic()
            .with_endpoint(endpoint);

        let tracer = opentelemetry_otlp::new_pipeline()
            .tracing()
            .with_exporter(exporter)
            .with_trace_config(sdktrace::config().with_resource(Resource::new(vec![
                KeyValue::new("service.name", config.service_name.clone()),
                KeyValue::new("service.instance.id", config.instance_id.clone()),
                KeyValue::new("cinema.lock.backend", lock_backend(config)),
                KeyValue::new("cinema.lock.ttl_ms", config.lock_ttl.as_millis() as i64),
            ])))
            .install_batch(runtime::Tokio)?;

        let otel_layer = tracing_opentelemetry::layer().with_tracer(tracer);

        Registry::default()
            .with(env_filter)
            .with(fmt_layer)
            .with(otel_layer)
            .init();
    } else {
        Registry::default().with(env_filter).with(fmt_layer).init();
    }

    Ok(())
}

fn init_metrics(config: &Config) -> anyhow::Result<()> {
    let Some(port) = config.metrics_port else {
        tracing::info!("METRICS_PORT not set, Prometheus exporter disabled");
        return Ok(());
    };

    metrics_exporter_prometheus::PrometheusBuilder::new()
        .with_http_listener(([0, 0, 0, 0], port))
        .install()?;
    describe_metrics();

    tracing::info!("Metrics exporter (Prometheus) started on port {}", port);
    Ok(())
}

fn describe_metrics() {
    metrics::describe_counter!(
        SEAT_PURCHASES_TOTAL,
        "Purchase attempts by kind (single, consecutive) and outcome"
    );
    metrics::describe_counter!(
        LOCK_ACQUISITIONS_TOTAL,
        "Seat lock acquisition attempts by outcome (acquired, contended, unavailable)"
    );
    metrics::describe_counter!(CINEMAS_CREATED_TOTAL, "Cinemas created");
}

/// Name of the lock backend `config` selects.
pub fn lock_backend(config: &Config) -> &'static str {
    if config.redis_url.is_some() {
        "redis"
    } else {
        "database"
    }
}

/// Span for one HTTP request, tagged with the cinema it addresses.
pub fn request_span<B>(request: &Request<B>) -> Span {
    let path = request.uri().path();
    tracing::info_span!(
        "http_request",
        method = %request.method(),
        path = %path,
        cinema_id = cinema_id_from_path(path).unwrap_or("-"),
    )
}

/// `/cinemas/<id>[/...]` yields `<id>`.
fn cinema_id_from_path(path: &str) -> Option<&str> {
    let mut segments = path.trim_start_matches('/').split('/');
    match (segments.next(), segments.next()) {
        (Some("cinemas"), Some(id)) if !id.is_empty() => Some(id),
        _ => None,
    }
}

pub fn shutdown() {
    global::shutdown_tracer_provider();
}
