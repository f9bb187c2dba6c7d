use std::{sync::Arc, time::Duration};

use axum::{
	body::Body,
	response::{IntoResponse, Response},
};
use governor::middleware::StateInformationMiddleware;
use tower_governor::{
	governor::{GovernorConfig, GovernorConfigBuilder},
	key_extractor::PeerIpKeyExtractor,
	GovernorError,
};

use crate::{config::Config, error::AppError};

/// A per-client quota, keyed by the peer address of the connection.
pub type Limiter = Arc<GovernorConfig<PeerIpKeyExtractor, StateInformationMiddleware>>;

/// Builds the quota applied to every route. Responses carry the
/// `x-ratelimit-*` headers.
///
/// Returns [`None`] if the configured period or burst size is zero.
pub fn from_config(config: &Config) -> Option<Limiter> {
	GovernorConfigBuilder::default()
		.per_millisecond(config.rate_limit_period_ms)
		.burst_size(config.rate_limit_burst)
		.use_headers()
		.error_handler(error_handler)
		.finish()
		.map(Arc::new)
}

/// Periodically prunes clients that have not been seen for a while.
pub fn spawn_cleanup(limiter: &Limiter, every: Duration) {
	let state = limiter.limiter().clone();

	tokio::spawn(async move {
		let mut interval = tokio::time::interval(every.max(Duration::from_secs(1)));

		loop {
			interval.tick().await;

			tracing::debug!(clients = state.len(), "pruning rate limit state");

			state.retain_recent();
		}
	});
}

fn error_handler(error: GovernorError) -> Response<Body> {
	AppError::from(error).into_response()
}

#[cfg(test)]
mod test {
	use crate::config::Config;

	fn config(period: u64, burst: u32) -> Config {
		Config {
			database_url: None,
			host: [127, 0, 0, 1].into(),
			port: 5000,
			log_filter: "info".into(),
			otel_enabled: false,
			otel_sample_ratio: 1.0,
			otel_export_interval_secs: 5,
			rate_limit_period_ms: period,
			rate_limit_burst: burst,
			rate_limit_cleanup_secs: 60,
		}
	}

	#[test]
	fn test_from_config() {
		assert!(super::from_config(&config(100, 50)).is_some());
		assert!(super::from_config(&config(0, 50)).is_none());
		assert!(super::from_config(&config(100, 0)).is_none());
	}
}
