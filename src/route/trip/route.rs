use axum::extract::State;
use macros::route;

use crate::{
	extract::{Json, Path, Session},
	openapi::tag,
	route::model::object_id,
	Database,
};

use super::{model, Error, RouteError};

/// Loads a trip by its raw path id, treating malformed ids as unknown.
pub async fn load_trip(database: &Database, id: &str) -> Result<model::Trip, RouteError> {
	let id = object_id(id).ok_or(Error::UnknownTrip)?;

	database
		.find_trip(id)
		.await?
		.ok_or_else(|| Error::UnknownTrip.into())
}

/// Get all trips
/// Returns every trip, newest first.
#[route(tag = tag::TRIP)]
pub async fn get_trips(
	State(database): State<Database>,
	_session: Session,
) -> Result<Json<Vec<model::Trip>>, RouteError> {
	Ok(Json(database.list_trips().await?))
}

/// Get single trip
/// Returns a single trip by its unique id.
#[route(tag = tag::TRIP)]
pub async fn get_trip(
	State(database): State<Database>,
	_session: Session,
	Path(path): Path<model::IdInput>,
) -> Result<Json<model::Trip>, RouteError> {
	Ok(Json(load_trip(&database, &path.id).await?))
}

/// Create trip
/// Creates a new trip owned by the authenticated user. The user's name and avatar are copied onto the trip.
#[route(tag = tag::TRIP)]
pub async fn create_trip(
	State(database): State<Database>,
	session: Session,
	Json(input): Json<model::CreateTripInput>,
) -> Result<Json<model::Trip>, RouteError> {
	let trip = model::Trip::new(&session.user, input);

	database.insert_trip(&trip).await?;

	tracing::info!(
		monotonic_counter.trips_created = 1_u64,
		trip = %trip.id,
		user = %trip.user,
		"created trip"
	);

	Ok(Json(trip))
}

/// Delete trip
/// Deletes a trip created by the authenticated user. Its comments and points are deleted with it.
#[route(tag = tag::TRIP)]
pub async fn delete_trip(
	State(database): State<Database>,
	session: Session,
	Path(path): Path<model::IdInput>,
) -> Result<Json<model::Removed>, RouteError> {
	let trip = load_trip(&database, &path.id).await?;

	trip.ensure_owner(session.user.id)?;

	if !database.delete_trip(trip.id).await? {
		return Err(Error::UnknownTrip.into());
	}

	Ok(Json(model::Removed { msg: "Trip removed" }))
}

/// Like trip
/// Likes a trip on behalf of the authenticated user, returning the updated likes.
#[route(tag = tag::TRIP)]
pub async fn like_trip(
	State(database): State<Database>,
	session: Session,
	Path(path): Path<model::IdInput>,
) -> Result<Json<Vec<model::Like>>, RouteError> {
	let mut trip = load_trip(&database, &path.id).await?;

	trip.like(session.user.id)?;
	database.save_trip(&trip).await?;

	Ok(Json(trip.likes))
}

/// Unlike trip
/// Removes the authenticated user's like from a trip, returning the updated likes.
#[route(tag = tag::TRIP)]
pub async fn unlike_trip(
	State(database): State<Database>,
	session: Session,
	Path(path): Path<model::IdInput>,
) -> Result<Json<Vec<model::Like>>, RouteError> {
	let mut trip = load_trip(&database, &path.id).await?;

	trip.unlike(session.user.id)?;
	database.save_trip(&trip).await?;

	Ok(Json(trip.likes))
}

/// Comment on trip
/// Adds a comment to a trip, returning the updated comments.
#[route(tag = tag::TRIP)]
pub async fn create_comment(
	State(database): State<Database>,
	session: Session,
	Path(path): Path<model::IdInput>,
	Json(input): Json<model::CreateCommentInput>,
) -> Result<Json<Vec<model::Comment>>, RouteError> {
	let mut trip = load_trip(&database, &path.id).await?;

	trip.add_comment(model::Comment::new(&session.user, input.text));
	database.save_trip(&trip).await?;

	Ok(Json(trip.comments))
}

/// Delete comment
/// Deletes a comment written by the authenticated user, returning the remaining comments.
#[route(tag = tag::TRIP)]
pub async fn delete_comment(
	State(database): State<Database>,
	session: Session,
	Path(path): Path<model::CommentPath>,
) -> Result<Json<Vec<model::Comment>>, RouteError> {
	let mut trip = load_trip(&database, &path.id).await?;
	let comment = object_id(&path.comment_id).ok_or(Error::UnknownComment)?;

	trip.remove_comment(comment, session.user.id)?;
	database.save_trip(&trip).await?;

	Ok(Json(trip.comments))
}
