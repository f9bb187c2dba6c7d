use std::sync::Arc;

use aide::{
	axum::{routing::get, ApiRouter},
	openapi::OpenApi,
};
use axum::{Extension, Router};
use tower::ServiceBuilder;
use tower_http::{
	compression::CompressionLayer,
	cors::CorsLayer,
	request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
	trace::TraceLayer,
};

use crate::{openapi, AppState};

pub mod auth;
pub mod mark;
pub mod model;
pub mod point;
pub mod profile;
pub mod trip;

/// Builds the full application router, including the generated `OpenAPI` document.
pub fn app(state: AppState) -> Router {
	let mut api = OpenApi::default();

	ApiRouter::new()
		.nest("/api/users", auth::user_routes())
		.nest("/api/auth", auth::routes())
		.nest("/api/trips", trip::routes())
		.nest("/api/points", point::routes())
		.nest("/api/marks", mark::routes())
		.nest("/api/tripProfile", profile::routes())
		.route("/", get(|| async { "API Running" }))
		.route("/docs/api.json", get(openapi::serve))
		.finish_api_with(&mut api, openapi::docs)
		.layer(
			ServiceBuilder::new()
				.layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
				.layer(TraceLayer::new_for_http())
				.layer(PropagateRequestIdLayer::x_request_id())
				.layer(CorsLayer::permissive())
				.layer(CompressionLayer::new()),
		)
		.layer(Extension(Arc::new(api)))
		.with_state(state)
}
