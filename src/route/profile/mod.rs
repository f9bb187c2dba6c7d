use aide::axum::{
	routing::{get_with, put_with},
	ApiRouter,
};
use axum::http::StatusCode;

use crate::{error, AppState};

pub mod model;
pub mod route;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("There is no profile for this user")]
	NoProfile,
	#[error("Trip not found")]
	UnknownTrip,
	#[error("Trip already saved")]
	AlreadySaved,
	#[error("Trip has not been saved")]
	NotSaved,
	#[error("Profile was modified by another request, please retry")]
	Modified,
}

pub type RouteError = error::RouteError<Error>;

pub fn routes() -> ApiRouter<AppState> {
	use route::*;

	ApiRouter::new()
		.api_route("/me", get_with(get_my_profile, get_my_profile_docs))
		.api_route("/user/:user_id", get_with(get_profile, get_profile_docs))
		.api_route(
			"/trips/:id",
			put_with(save_trip, save_trip_docs).delete_with(unsave_trip, unsave_trip_docs),
		)
}

impl error::ErrorShape for Error {
	fn status(&self) -> StatusCode {
		match self {
			Self::NoProfile | Self::UnknownTrip => StatusCode::NOT_FOUND,
			Self::AlreadySaved | Self::NotSaved => StatusCode::BAD_REQUEST,
			Self::Modified => StatusCode::CONFLICT,
		}
	}
}
