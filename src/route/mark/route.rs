use axum::extract::State;
use macros::route;
use uuid::Uuid;

use crate::{
	extract::{Json, Path, Session},
	openapi::tag,
	route::model::object_id,
	Database,
};

use super::{model, Error, RouteError};

/// Loads a mark written by `user` on the given point.
async fn load_own_mark(
	database: &Database,
	path: &model::MarkPath,
	user: Uuid,
) -> Result<model::Mark, RouteError> {
	let (Some(point), Some(id)) = (object_id(&path.point_id), object_id(&path.mark_id)) else {
		return Err(Error::UnknownMark.into());
	};

	let mark = database
		.find_mark(id)
		.await?
		.filter(|mark| mark.point == point)
		.ok_or(Error::UnknownMark)?;

	if mark.user != user {
		return Err(Error::Unauthorized.into());
	}

	Ok(mark)
}

/// Get marks
/// Returns every mark left on a point, newest first.
#[route(tag = tag::MARK)]
pub async fn get_marks(
	State(database): State<Database>,
	_session: Session,
	Path(path): Path<model::PointInput>,
) -> Result<Json<Vec<model::Mark>>, RouteError> {
	let Some(point) = object_id(&path.point_id) else {
		return Ok(Json(Vec::new()));
	};

	Ok(Json(database.list_marks(point).await?))
}

/// Create mark
/// Leaves a mark on a point on behalf of the authenticated user.
#[route(tag = tag::MARK)]
pub async fn create_mark(
	State(database): State<Database>,
	session: Session,
	Path(path): Path<model::PointInput>,
	Json(input): Json<model::CreateMark>,
) -> Result<Json<model::Mark>, RouteError> {
	let point = object_id(&path.point_id).ok_or(Error::UnknownPoint)?;
	let mark = model::Mark::new(session.user.id, point, input);

	database.insert_mark(&mark).await?;

	Ok(Json(mark))
}

/// Update mark
/// Updates a mark written by the authenticated user. Missing fields are left unchanged.
#[route(tag = tag::MARK)]
pub async fn update_mark(
	State(database): State<Database>,
	session: Session,
	Path(path): Path<model::MarkPath>,
	Json(input): Json<model::UpdateMark>,
) -> Result<Json<model::Mark>, RouteError> {
	let mut mark = load_own_mark(&database, &path, session.user.id).await?;

	mark.apply(input);
	database.save_mark(&mark).await?;

	Ok(Json(mark))
}

/// Delete mark
/// Deletes a mark written by the authenticated user.
#[route(tag = tag::MARK)]
pub async fn delete_mark(
	State(database): State<Database>,
	session: Session,
	Path(path): Path<model::MarkPath>,
) -> Result<Json<model::Removed>, RouteError> {
	let mark = load_own_mark(&database, &path, session.user.id).await?;

	database.delete_mark(mark.id).await?;

	Ok(Json(model::Removed { msg: "Mark removed" }))
}
