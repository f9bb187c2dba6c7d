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
	#[error("Mark not found")]
	UnknownMark,
	#[error("Point not found")]
	UnknownPoint,
	#[error("User not authorized")]
	Unauthorized,
}

pub type RouteError = error::RouteError<Error>;

pub fn routes() -> ApiRouter<AppState> {
	use route::*;

	ApiRouter::new()
		.api_route(
			"/:point_id",
			get_with(get_marks, get_marks_docs).post_with(create_mark, create_mark_docs),
		)
		.api_route(
			"/:point_id/:mark_id",
			put_with(update_mark, update_mark_docs).delete_with(delete_mark, delete_mark_docs),
		)
}

impl error::ErrorShape for Error {
	fn status(&self) -> StatusCode {
		match self {
			Self::UnknownMark | Self::UnknownPoint => StatusCode::NOT_FOUND,
			Self::Unauthorized => StatusCode::UNAUTHORIZED,
		}
	}
}

#[cfg(test)]
mod test {
	use crate::test::*;

	#[tokio::test]
	async fn test_mark_lifecycle() {
		let app = app();
		let owner = register(&app, "john").await;
		let other = register(&app, "jane").await;
		let point = uuid::Uuid::now_v7();

		let response = app
			.post(&format!("/api/marks/{point}"))
			.add_header(AUTHORIZATION, bearer(&owner.token))
			.json(&json!({ "title": "Summit", "description": "Windy" }))
			.await;

		assert_eq!(response.status_code(), 200);

		let mark = response.json::<Value>();
		let mark_id = mark["_id"].as_str().unwrap().to_string();

		assert_eq!(mark["user"], owner.id);
		assert_eq!(mark["point"], point.to_string());

		let response = app
			.get(&format!("/api/marks/{point}"))
			.add_header(AUTHORIZATION, bearer(&other.token))
			.await;

		assert_eq!(response.status_code(), 200);
		assert_eq!(response.json::<Value>(), json!([mark]));

		let response = app
			.put(&format!("/api/marks/{point}/{mark_id}"))
			.add_header(AUTHORIZATION, bearer(&other.token))
			.json(&json!({ "title": "Mine now" }))
			.await;

		assert_eq!(response.status_code(), 401);
		assert_eq!(response.json::<Value>(), json!({ "msg": "User not authorized" }));

		let response = app
			.put(&format!("/api/marks/{point}/{mark_id}"))
			.add_header(AUTHORIZATION, bearer(&owner.token))
			.json(&json!({ "photos": "summit.jpg" }))
			.await;

		assert_eq!(response.status_code(), 200);

		let updated = response.json::<Value>();

		assert_eq!(updated["title"], "Summit");
		assert_eq!(updated["description"], "Windy");
		assert_eq!(updated["photos"], "summit.jpg");

		let response = app
			.delete(&format!("/api/marks/{point}/{mark_id}"))
			.add_header(AUTHORIZATION, bearer(&owner.token))
			.await;

		assert_eq!(response.status_code(), 200);
		assert_eq!(response.json::<Value>(), json!({ "msg": "Mark removed" }));

		let response = app
			.delete(&format!("/api/marks/{point}/{mark_id}"))
			.add_header(AUTHORIZATION, bearer(&owner.token))
			.await;

		assert_eq!(response.status_code(), 404);
		assert_eq!(response.json::<Value>(), json!({ "msg": "Mark not found" }));
	}

	#[tokio::test]
	async fn test_malformed_point() {
		let app = app();
		let user = register(&app, "john").await;

		let response = app
			.get("/api/marks/not-a-point")
			.add_header(AUTHORIZATION, bearer(&user.token))
			.await;

		assert_eq!(response.status_code(), 200);
		assert_eq!(response.json::<Value>(), json!([]));

		let response = app
			.post("/api/marks/not-a-point")
			.add_header(AUTHORIZATION, bearer(&user.token))
			.json(&json!({ "title": "Summit" }))
			.await;

		assert_eq!(response.status_code(), 404);
		assert_eq!(response.json::<Value>(), json!({ "msg": "Point not found" }));
	}

	#[tokio::test]
	async fn test_long_title() {
		let app = app();
		let user = register(&app, "john").await;
		let title = "a".repeat(200);

		let response = app
			.post(&format!("/api/marks/{}", uuid::Uuid::now_v7()))
			.add_header(AUTHORIZATION, bearer(&user.token))
			.json(&json!({ "title": title }))
			.await;

		assert_eq!(response.status_code(), 200);
		assert_eq!(response.json::<Value>()["title"], title);
	}
}
