use axum::extract::State;
use macros::route;

use crate::{
	extract::{Json, Path, Session},
	openapi::tag,
	route::model::object_id,
	store, Database,
};

use super::{model, Error, RouteError};

async fn store_profile(
	database: &Database,
	profile: &model::TripProfile,
) -> Result<(), RouteError> {
	database.save_profile(profile).await.map_err(|e| match e {
		store::Error::VersionMismatch => Error::Modified.into(),
		e => e.into(),
	})
}

/// Get own profile
/// Returns the trips saved by the authenticated user.
#[route(tag = tag::PROFILE)]
pub async fn get_my_profile(
	State(database): State<Database>,
	session: Session,
) -> Result<Json<model::TripProfile>, RouteError> {
	let profile = database
		.find_profile(session.user.id)
		.await?
		.ok_or(Error::NoProfile)?;

	Ok(Json(profile))
}

/// Get user profile
/// Returns the trips saved by any user.
#[route(tag = tag::PROFILE)]
pub async fn get_profile(
	State(database): State<Database>,
	_session: Session,
	Path(path): Path<model::UserInput>,
) -> Result<Json<model::TripProfile>, RouteError> {
	let user = object_id(&path.user_id).ok_or(Error::NoProfile)?;
	let profile = database
		.find_profile(user)
		.await?
		.ok_or(Error::NoProfile)?;

	Ok(Json(profile))
}

/// Save trip
/// Saves a trip to the authenticated user's profile, creating the profile if needed.
#[route(tag = tag::PROFILE)]
pub async fn save_trip(
	State(database): State<Database>,
	session: Session,
	Path(path): Path<model::IdInput>,
) -> Result<Json<model::TripProfile>, RouteError> {
	let trip = object_id(&path.id).ok_or(Error::UnknownTrip)?;

	if database.find_trip(trip).await?.is_none() {
		return Err(Error::UnknownTrip.into());
	}

	let mut profile = database
		.find_profile(session.user.id)
		.await?
		.unwrap_or_else(|| model::TripProfile::new(session.user.id));

	profile.save(trip)?;
	store_profile(&database, &profile).await?;

	Ok(Json(profile))
}

/// Unsave trip
/// Removes a trip from the authenticated user's profile.
#[route(tag = tag::PROFILE)]
pub async fn unsave_trip(
	State(database): State<Database>,
	session: Session,
	Path(path): Path<model::IdInput>,
) -> Result<Json<model::TripProfile>, RouteError> {
	let trip = object_id(&path.id).ok_or(Error::UnknownTrip)?;
	let mut profile = database
		.find_profile(session.user.id)
		.await?
		.ok_or(Error::NoProfile)?;

	profile.unsave(trip)?;
	store_profile(&database, &profile).await?;

	Ok(Json(profile))
}
