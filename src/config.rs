use std::{env, net::IpAddr, str::FromStr};

use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "info,trip_share=debug";

/// An error raised while reading configuration from the environment.
#[derive(Debug, thiserror::Error)]
#[error("invalid {name}: {reason}")]
pub struct Error {
	name: &'static str,
	reason: String,
}

/// Runtime configuration, read from the environment (and `.env`, if present).
#[derive(Debug, Clone)]
pub struct Config {
	/// PostgreSQL connection string. Documents are kept in memory if unset.
	pub database_url: Option<String>,
	pub host: IpAddr,
	pub port: u16,
	/// Default `tracing` filter, overridden by `RUST_LOG`.
	pub log_filter: String,
	/// Export traces and metrics over OTLP.
	pub otel_enabled: bool,
	/// Share of root traces that are exported, between 0 and 1.
	pub otel_sample_ratio: f64,
	pub otel_export_interval_secs: u64,
	/// Time for one request of the quota to be replenished.
	pub rate_limit_period_ms: u64,
	pub rate_limit_burst: u32,
	pub rate_limit_cleanup_secs: u64,
}

impl Config {
	pub fn from_env() -> Result<Self, Error> {
		Ok(Self {
			database_url: env::var("DATABASE_URL").ok().filter(|url| !url.is_empty()),
			host: parse("HOST", "127.0.0.1")?,
			port: parse("PORT", "5000")?,
			log_filter: log_filter(
				env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
			)?,
			otel_enabled: parse("OTEL_ENABLED", "false")?,
			otel_sample_ratio: parse("OTEL_SAMPLE_RATIO", "1.0")?,
			otel_export_interval_secs: parse("OTEL_EXPORT_INTERVAL_SECS", "5")?,
			rate_limit_period_ms: parse("RATE_LIMIT_PERIOD_MS", "100")?,
			rate_limit_burst: parse("RATE_LIMIT_BURST", "50")?,
			rate_limit_cleanup_secs: parse("RATE_LIMIT_CLEANUP_SECS", "60")?,
		})
	}
}

fn parse<T>(name: &'static str, default: &str) -> Result<T, Error>
where
	T: FromStr,
	T::Err: std::fmt::Display,
{
	let value = env::var(name).unwrap_or_else(|_| default.into());

	value.parse().map_err(|e: T::Err| Error {
		name,
		reason: format!("{value:?}: {e}"),
	})
}

/// Rejects filter directives that `tracing_subscriber` cannot parse.
fn log_filter(value: String) -> Result<String, Error> {
	match EnvFilter::try_new(&value) {
		Ok(_) => Ok(value),
		Err(e) => Err(Error {
			name: "RUST_LOG",
			reason: format!("{value:?}: {e}"),
		}),
	}
}
