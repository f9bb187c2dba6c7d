#![warn(clippy::pedantic)]

mod config;
mod error;
mod extract;
mod openapi;
mod ratelimit;
mod route;
mod session;
mod store;
mod trace;

#[cfg(test)]
mod test;

use std::{net::SocketAddr, sync::Arc, time::Duration};

use argon2::Argon2;
use tower_governor::GovernorLayer;

/// The document store shared by every handler.
pub type Database = Arc<dyn store::Store>;
pub type AppState = State;

/// The shared application state.
///
/// This should contain all shared dependencies that handlers need to access,
/// such as the document store or a hash configuration (if it's expensive to create).
#[derive(Clone, axum::extract::FromRef)]
pub struct State {
	pub database: Database,
	pub hasher: Argon2<'static>,
}

#[derive(Debug, thiserror::Error)]
enum Error {
	#[error(transparent)]
	Config(#[from] config::Error),
	#[error(transparent)]
	Trace(#[from] trace::Error),
	#[error(transparent)]
	Store(#[from] store::Error),
	#[error("failed to serve: {0}")]
	Io(#[from] std::io::Error),
}

#[tokio::main]
async fn main() -> Result<(), Error> {
	dotenvy::dotenv().ok();

	let config = config::Config::from_env()?;
	let _guard = trace::init(&config)?;

	let database: Database = if let Some(url) = &config.database_url {
		Arc::new(store::PgStore::connect(url).await?)
	} else {
		tracing::warn!("DATABASE_URL is not set, documents will only be kept in memory");
		Arc::new(store::MemoryStore::new())
	};

	let state = State {
		database,
		hasher: Argon2::default(),
	};

	let mut app = route::app(state);

	if let Some(limiter) = ratelimit::from_config(&config) {
		ratelimit::spawn_cleanup(
			&limiter,
			Duration::from_secs(config.rate_limit_cleanup_secs),
		);
		app = app.layer(GovernorLayer { config: limiter });
	} else {
		tracing::warn!("rate limiting is disabled");
	}

	let listener = tokio::net::TcpListener::bind((config.host, config.port)).await?;

	tracing::info!("listening on {}", listener.local_addr()?);

	axum::serve(
		listener,
		app.into_make_service_with_connect_info::<SocketAddr>(),
	)
	.await?;

	Ok(())
}
