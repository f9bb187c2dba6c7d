use std::time::Duration;

use opentelemetry::{global, metrics::MetricsError, trace::TraceError, KeyValue};
use opentelemetry_sdk::{
	metrics::{
		reader::{DefaultAggregationSelector, DefaultTemporalitySelector},
		PeriodicReader, SdkMeterProvider,
	},
	runtime,
	trace::{BatchConfig, Sampler, Tracer},
	Resource,
};
use opentelemetry_semantic_conventions::{
	resource::{DEPLOYMENT_ENVIRONMENT, SERVICE_NAME, SERVICE_VERSION},
	SCHEMA_URL,
};
use tracing_opentelemetry::MetricsLayer;
use tracing_subscriber::{
	filter::ParseError, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

use crate::config::Config;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("failed to build metrics exporter: {0}")]
	Metrics(#[from] MetricsError),
	#[error("failed to build trace exporter: {0}")]
	Trace(#[from] TraceError),
	#[error("invalid log filter: {0}")]
	Filter(#[from] ParseError),
}

fn resource() -> Resource {
	let environment = if cfg!(debug_assertions) {
		"development"
	} else {
		"production"
	};

	Resource::from_schema_url(
		[
			KeyValue::new(SERVICE_NAME, env!("CARGO_PKG_NAME")),
			KeyValue::new(SERVICE_VERSION, env!("CARGO_PKG_VERSION")),
			KeyValue::new(DEPLOYMENT_ENVIRONMENT, environment),
		],
		SCHEMA_URL,
	)
}

/// Exports the `monotonic_counter.*` and `histogram.*` fields of tracing
/// events, such as the number of trips created.
fn init_meter_provider(config: &Config) -> Result<SdkMeterProvider, Error> {
	let exporter = opentelemetry_otlp::new_exporter()
		.tonic()
		.build_metrics_exporter(
			Box::new(DefaultAggregationSelector::new()),
			Box::new(DefaultTemporalitySelector::new()),
		)?;

	let reader = PeriodicReader::builder(exporter, runtime::Tokio)
		.with_interval(Duration::from_secs(config.otel_export_interval_secs))
		.build();

	let meter_provider = SdkMeterProvider::builder()
		.with_resource(resource())
		.with_reader(reader);

	// also print metrics locally
	#[cfg(debug_assertions)]
	let meter_provider = meter_provider.with_reader(
		PeriodicReader::builder(
			opentelemetry_stdout::MetricsExporter::default(),
			runtime::Tokio,
		)
		.build(),
	);

	let meter_provider = meter_provider.build();

	global::set_meter_provider(meter_provider.clone());

	Ok(meter_provider)
}

fn init_tracer(config: &Config) -> Result<Tracer, Error> {
	let sampler = Sampler::ParentBased(Box::new(Sampler::TraceIdRatioBased(
		config.otel_sample_ratio,
	)));

	let tracer = opentelemetry_otlp::new_pipeline()
		.tracing()
		.with_trace_config(
			opentelemetry_sdk::trace::Config::default()
				.with_sampler(sampler)
				.with_resource(resource()),
		)
		.with_batch_config(BatchConfig::default())
		.with_exporter(opentelemetry_otlp::new_exporter().tonic())
		.install_batch(runtime::Tokio)?;

	Ok(tracer)
}

/// Initializes the global tracing subscriber.
///
/// Logs are always written to stdout, filtered by `RUST_LOG`. When
/// OpenTelemetry is enabled, spans and metrics are exported over OTLP as
/// well, and the returned guard flushes them when dropped.
pub fn init(config: &Config) -> Result<Option<OtelGuard>, Error> {
	let filter = EnvFilter::try_new(&config.log_filter)?;
	let registry = tracing_subscriber::registry()
		.with(filter)
		.with(tracing_subscriber::fmt::layer().with_ansi(true));

	if !config.otel_enabled {
		registry.init();

		return Ok(None);
	}

	let meter_provider = init_meter_provider(config)?;

	registry
		.with(MetricsLayer::new(meter_provider.clone()))
		.with(tracing_opentelemetry::layer().with_tracer(init_tracer(config)?))
		.init();

	Ok(Some(OtelGuard { meter_provider }))
}

pub struct OtelGuard {
	meter_provider: SdkMeterProvider,
}

impl Drop for OtelGuard {
	fn drop(&mut self) {
		if let Err(err) = self.meter_provider.shutdown() {
			eprintln!("{err:?}");
		}

		global::shutdown_tracer_provider();
	}
}
