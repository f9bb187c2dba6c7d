use std::sync::Arc;

use aide::{
	axum::IntoApiResponse,
	openapi::{ApiKeyLocation, OpenApi, SecurityScheme, Tag},
	transform::TransformOpenApi,
};
use axum::{response::IntoResponse, Extension};

use crate::{error, extract::Json, session};

pub const SECURITY_SCHEME_BEARER: &str = "Bearer";
pub const SECURITY_SCHEME_SESSION: &str = "Session";

pub mod tag {
	pub const AUTH: &str = "Auth";
	pub const TRIP: &str = "Trip";
	pub const POINT: &str = "Point";
	pub const MARK: &str = "Mark";
	pub const PROFILE: &str = "Trip Profile";
}

pub fn docs(api: TransformOpenApi) -> TransformOpenApi {
	api.title("Trip Share API")
		.summary("Share trips, points and comments with other travellers")
		.description(include_str!("../README.md"))
		.tag(Tag {
			name: tag::AUTH.into(),
			description: Some("User registration and sessions".into()),
			..Default::default()
		})
		.tag(Tag {
			name: tag::TRIP.into(),
			description: Some("Trips, likes and comments".into()),
			..Default::default()
		})
		.tag(Tag {
			name: tag::POINT.into(),
			description: Some("Points placed on a trip".into()),
			..Default::default()
		})
		.tag(Tag {
			name: tag::MARK.into(),
			description: Some("Annotations left on a point".into()),
			..Default::default()
		})
		.tag(Tag {
			name: tag::PROFILE.into(),
			description: Some("Trips saved by a user".into()),
			..Default::default()
		})
		.security_scheme(
			SECURITY_SCHEME_BEARER,
			SecurityScheme::Http {
				scheme: "bearer".into(),
				bearer_format: None,
				description: Some("A session token returned by login or registration".into()),
				extensions: Default::default(),
			},
		)
		.security_scheme(
			SECURITY_SCHEME_SESSION,
			SecurityScheme::ApiKey {
				location: ApiKeyLocation::Cookie,
				name: session::COOKIE_NAME.into(),
				description: Some("A user session cookie".into()),
				extensions: Default::default(),
			},
		)
		.default_response_with::<Json<error::ErrorBody>, _>(|res| {
			res.example(error::ErrorBody::message("Trip not found"))
		})
}

/// Serves the generated document, which is attached to every request as an extension.
pub async fn serve(Extension(api): Extension<Arc<OpenApi>>) -> impl IntoApiResponse {
	Json(api.as_ref()).into_response()
}
