use axum::extract::State;
use macros::route;

use crate::{
	extract::{Json, Path, Session},
	openapi::tag,
	route::{model::object_id, trip::route::load_trip},
	Database,
};

use super::{model, Error, RouteError};

/// Add point
/// Places a point on a trip and saves it, returning the updated trip.
#[route(tag = tag::POINT)]
pub async fn create_point(
	State(database): State<Database>,
	session: Session,
	Path(path): Path<model::IdInput>,
	Json(input): Json<model::CreatePointInput>,
) -> Result<Json<model::Trip>, RouteError> {
	let mut trip = load_trip(&database, &path.id).await?;

	// both coordinates are required by validation
	trip.add_point(model::Point::new(
		session.user.id,
		input.coord_x.unwrap_or_default(),
		input.coord_y.unwrap_or_default(),
	));
	database.save_trip(&trip).await?;

	Ok(Json(trip))
}

/// Delete point
/// Deletes a point placed by the authenticated user, returning the remaining points.
#[route(tag = tag::POINT)]
pub async fn delete_point(
	State(database): State<Database>,
	session: Session,
	Path(path): Path<model::PointPath>,
) -> Result<Json<Vec<model::Point>>, RouteError> {
	let mut trip = load_trip(&database, &path.id).await?;
	let point = object_id(&path.point_id).ok_or(Error::UnknownPoint)?;

	trip.remove_point(point, session.user.id)?;
	database.save_trip(&trip).await?;

	Ok(Json(trip.points))
}
