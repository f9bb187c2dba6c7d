use aide::axum::{
	routing::{delete_with, get_with, post_with, put_with},
	ApiRouter,
};
use axum::http::StatusCode;

use crate::{error, AppState};

pub mod model;
pub mod route;

/// An error that can occur while working with a trip or its embedded documents.
///
/// The messages are presented to the client.
#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Trip not found")]
	UnknownTrip,
	#[error("User not authorized")]
	Unauthorized,
	#[error("Post already liked")]
	AlreadyLiked,
	#[error("Trip has not yet been liked")]
	NotLiked,
	#[error("Comment doesn't exist")]
	UnknownComment,
	#[error("Point doesn't exist")]
	UnknownPoint,
}

pub type RouteError = error::RouteError<Error>;

pub fn routes() -> ApiRouter<AppState> {
	use route::*;

	ApiRouter::new()
		.api_route(
			"/",
			get_with(get_trips, get_trips_docs).post_with(create_trip, create_trip_docs),
		)
		.api_route(
			"/:id",
			get_with(get_trip, get_trip_docs).delete_with(delete_trip, delete_trip_docs),
		)
		.api_route("/like/:id", put_with(like_trip, like_trip_docs))
		.api_route("/unlike/:id", put_with(unlike_trip, unlike_trip_docs))
		.api_route("/comment/:id", post_with(create_comment, create_comment_docs))
		.api_route(
			"/comment/:id/:comment_id",
			delete_with(delete_comment, delete_comment_docs),
		)
}

impl error::ErrorShape for Error {
	fn status(&self) -> StatusCode {
		match self {
			Self::UnknownTrip | Self::UnknownComment | Self::UnknownPoint => StatusCode::NOT_FOUND,
			Self::Unauthorized => StatusCode::UNAUTHORIZED,
			Self::AlreadyLiked | Self::NotLiked => StatusCode::BAD_REQUEST,
		}
	}
}

#[cfg(test)]
mod test {
	use crate::test::*;

	#[tokio::test]
	async fn test_create_and_list() {
		let app = app();
		let user = register(&app, "john").await;

		let trip = create_trip(&app, &user).await;

		assert_eq!(trip["user"], user.id);
		assert_eq!(trip["name"], "john");
		assert_eq!(trip["likes"], json!([]));
		assert_eq!(trip["comments"], json!([]));

		let second = create_trip(&app, &user).await;

		let response = app
			.get("/api/trips")
			.add_header(AUTHORIZATION, bearer(&user.token))
			.await;

		assert_eq!(response.status_code(), 200);

		let trips = response.json::<Value>();

		assert_eq!(trips.as_array().unwrap().len(), 2);
		assert_eq!(trips[0]["_id"], second["_id"]);
		assert_eq!(trips[1]["_id"], trip["_id"]);
	}

	#[tokio::test]
	async fn test_create_requires_fields() {
		let app = app();
		let user = register(&app, "john").await;

		let response = app
			.post("/api/trips")
			.add_header(AUTHORIZATION, bearer(&user.token))
			.json(&json!({ "title": "Lisbon", "price": 10 }))
			.await;

		assert_eq!(response.status_code(), 400);

		let errors = response.json::<Value>()["errors"]
			.as_array()
			.unwrap()
			.iter()
			.map(|error| error["msg"].as_str().unwrap().to_string())
			.collect::<Vec<_>>();

		assert!(errors.contains(&"Description is required".to_string()));
		assert!(errors.contains(&"Photos is required".to_string()));
		assert!(!errors.contains(&"Title is required".to_string()));
	}

	#[tokio::test]
	async fn test_unknown_trip() {
		let app = app();
		let user = register(&app, "john").await;

		for id in ["not-an-id", "0190a0a4-0000-7000-8000-000000000000"] {
			let response = app
				.get(&format!("/api/trips/{id}"))
				.add_header(AUTHORIZATION, bearer(&user.token))
				.await;

			assert_eq!(response.status_code(), 404);
			assert_eq!(response.json::<Value>(), json!({ "msg": "Trip not found" }));
		}
	}

	#[tokio::test]
	async fn test_delete_only_by_owner() {
		let app = app();
		let owner = register(&app, "john").await;
		let other = register(&app, "jane").await;

		let trip = create_trip(&app, &owner).await;
		let path = format!("/api/trips/{}", trip["_id"].as_str().unwrap());

		let response = app
			.delete(&path)
			.add_header(AUTHORIZATION, bearer(&other.token))
			.await;

		assert_eq!(response.status_code(), 401);
		assert_eq!(response.json::<Value>(), json!({ "msg": "User not authorized" }));

		let response = app
			.get(&path)
			.add_header(AUTHORIZATION, bearer(&other.token))
			.await;

		assert_eq!(response.status_code(), 200);

		let response = app
			.delete(&path)
			.add_header(AUTHORIZATION, bearer(&owner.token))
			.await;

		assert_eq!(response.status_code(), 200);
		assert_eq!(response.json::<Value>(), json!({ "msg": "Trip removed" }));

		let response = app
			.get(&path)
			.add_header(AUTHORIZATION, bearer(&owner.token))
			.await;

		assert_eq!(response.status_code(), 404);
	}

	#[tokio::test]
	async fn test_like_and_unlike() {
		let app = app();
		let user = register(&app, "john").await;

		let trip = create_trip(&app, &user).await;
		let id = trip["_id"].as_str().unwrap();

		let response = app
			.put(&format!("/api/trips/unlike/{id}"))
			.add_header(AUTHORIZATION, bearer(&user.token))
			.await;

		assert_eq!(response.status_code(), 400);
		assert_eq!(
			response.json::<Value>(),
			json!({ "msg": "Trip has not yet been liked" })
		);

		let response = app
			.put(&format!("/api/trips/like/{id}"))
			.add_header(AUTHORIZATION, bearer(&user.token))
			.await;

		assert_eq!(response.status_code(), 200);

		let likes = response.json::<Value>();

		assert_eq!(likes.as_array().unwrap().len(), 1);
		assert_eq!(likes[0]["user"], user.id);

		let response = app
			.put(&format!("/api/trips/like/{id}"))
			.add_header(AUTHORIZATION, bearer(&user.token))
			.await;

		assert_eq!(response.status_code(), 400);
		assert_eq!(response.json::<Value>(), json!({ "msg": "Post already liked" }));

		let response = app
			.put(&format!("/api/trips/unlike/{id}"))
			.add_header(AUTHORIZATION, bearer(&user.token))
			.await;

		assert_eq!(response.status_code(), 200);
		assert_eq!(response.json::<Value>(), json!([]));
	}

	#[tokio::test]
	async fn test_comments() {
		let app = app();
		let owner = register(&app, "john").await;
		let other = register(&app, "jane").await;

		let trip = create_trip(&app, &owner).await;
		let id = trip["_id"].as_str().unwrap();

		let response = app
			.post(&format!("/api/trips/comment/{id}"))
			.add_header(AUTHORIZATION, bearer(&owner.token))
			.json(&json!({ "text": "" }))
			.await;

		assert_eq!(response.status_code(), 400);
		assert_eq!(
			response.json::<Value>(),
			json!({ "errors": [{ "msg": "Text is required", "param": "text" }] })
		);

		let response = app
			.post(&format!("/api/trips/comment/{id}"))
			.add_header(AUTHORIZATION, bearer(&owner.token))
			.json(&json!({ "text": "Great trip" }))
			.await;

		assert_eq!(response.status_code(), 200);

		let comments = response.json::<Value>();
		let comment = comments[0]["_id"].as_str().unwrap().to_string();

		assert_eq!(comments[0]["text"], "Great trip");
		assert_eq!(comments[0]["name"], "john");

		let response = app
			.delete(&format!("/api/trips/comment/{id}/{comment}"))
			.add_header(AUTHORIZATION, bearer(&other.token))
			.await;

		assert_eq!(response.status_code(), 401);

		let response = app
			.delete(&format!("/api/trips/comment/{id}/{}", uuid::Uuid::now_v7()))
			.add_header(AUTHORIZATION, bearer(&owner.token))
			.await;

		assert_eq!(response.status_code(), 404);
		assert_eq!(response.json::<Value>(), json!({ "msg": "Comment doesn't exist" }));

		let response = app
			.delete(&format!("/api/trips/comment/{id}/{comment}"))
			.add_header(AUTHORIZATION, bearer(&owner.token))
			.await;

		assert_eq!(response.status_code(), 200);
		assert_eq!(response.json::<Value>(), json!([]));
	}
}
