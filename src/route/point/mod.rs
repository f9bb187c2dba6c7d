use aide::axum::{
	routing::{delete_with, post_with},
	ApiRouter,
};

use crate::AppState;

pub mod model;
pub mod route;

pub use super::trip::{Error, RouteError};

pub fn routes() -> ApiRouter<AppState> {
	use route::*;

	ApiRouter::new()
		.api_route("/:id", post_with(create_point, create_point_docs))
		.api_route("/:id/:point_id", delete_with(delete_point, delete_point_docs))
}

#[cfg(test)]
mod test {
	use crate::test::*;

	#[tokio::test]
	async fn test_points_are_saved() {
		let app = app();
		let owner = register(&app, "john").await;
		let other = register(&app, "jane").await;

		let trip = create_trip(&app, &owner).await;
		let id = trip["_id"].as_str().unwrap();

		let response = app
			.post(&format!("/api/points/{id}"))
			.add_header(AUTHORIZATION, bearer(&other.token))
			.json(&json!({ "coordX": 38.7 }))
			.await;

		assert_eq!(response.status_code(), 400);

		let errors = response.json::<Value>()["errors"].clone();

		assert_eq!(errors.as_array().unwrap().len(), 1);
		assert_eq!(errors[0]["msg"], "Coordinate Y is required");

		let response = app
			.post(&format!("/api/points/{id}"))
			.add_header(AUTHORIZATION, bearer(&other.token))
			.json(&json!({ "coordX": 38.7, "coordY": -9.1 }))
			.await;

		assert_eq!(response.status_code(), 200);

		let point = response.json::<Value>()["points"][0].clone();

		assert_eq!(point["user"], other.id);
		assert_eq!(point["coordX"], 38.7);

		let response = app
			.get(&format!("/api/trips/{id}"))
			.add_header(AUTHORIZATION, bearer(&owner.token))
			.await;

		assert_eq!(response.json::<Value>()["points"], json!([point]));

		let point_id = point["_id"].as_str().unwrap();

		let response = app
			.delete(&format!("/api/points/{id}/{point_id}"))
			.add_header(AUTHORIZATION, bearer(&owner.token))
			.await;

		assert_eq!(response.status_code(), 401);

		let response = app
			.delete(&format!("/api/points/{id}/{point_id}"))
			.add_header(AUTHORIZATION, bearer(&other.token))
			.await;

		assert_eq!(response.status_code(), 200);
		assert_eq!(response.json::<Value>(), json!([]));

		let response = app
			.delete(&format!("/api/points/{id}/{point_id}"))
			.add_header(AUTHORIZATION, bearer(&other.token))
			.await;

		assert_eq!(response.status_code(), 404);
		assert_eq!(response.json::<Value>(), json!({ "msg": "Point doesn't exist" }));
	}

	#[tokio::test]
	async fn test_remove_older_point() {
		let app = app();
		let user = register(&app, "john").await;

		let trip = create_trip(&app, &user).await;
		let id = trip["_id"].as_str().unwrap();

		let older = app
			.post(&format!("/api/points/{id}"))
			.add_header(AUTHORIZATION, bearer(&user.token))
			.json(&json!({ "coordX": 1.0, "coordY": 2.0 }))
			.await
			.json::<Value>()["points"][0]
			.clone();

		let newer = app
			.post(&format!("/api/points/{id}"))
			.add_header(AUTHORIZATION, bearer(&user.token))
			.json(&json!({ "coordX": 3.0, "coordY": 4.0 }))
			.await
			.json::<Value>()["points"][0]
			.clone();

		let older_id = older["_id"].as_str().unwrap();

		let response = app
			.delete(&format!("/api/points/{id}/{older_id}"))
			.add_header(AUTHORIZATION, bearer(&user.token))
			.await;

		assert_eq!(response.status_code(), 200);
		assert_eq!(response.json::<Value>(), json!([newer]));
	}
}
