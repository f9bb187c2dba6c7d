use std::sync::Arc;

use argon2::Argon2;
use axum_test::TestServer;

pub use axum::http::{
	header::{HeaderName, AUTHORIZATION},
	HeaderValue,
};
pub use serde_json::{json, Value};

use crate::{route, store::MemoryStore, State};

pub const X_AUTH_TOKEN: HeaderName = HeaderName::from_static("x-auth-token");

/// A registered user, along with a valid session token.
pub struct TestUser {
	pub id: String,
	pub token: String,
}

/// Creates a test server backed by an empty in-memory store.
pub fn app() -> TestServer {
	let state = State {
		database: Arc::new(MemoryStore::new()),
		hasher: Argon2::default(),
	};

	TestServer::new(route::app(state)).unwrap()
}

pub fn bearer(token: &str) -> HeaderValue {
	HeaderValue::from_str(&format!("Bearer {token}")).unwrap()
}

/// Registers `{name}@example.com` and returns its id and session token.
pub async fn register(app: &TestServer, name: &str) -> TestUser {
	let response = app
		.post("/api/users")
		.json(&json!({
			"name": name,
			"email": format!("{name}@example.com"),
			"password": "hunter2hunter",
		}))
		.await;

	assert_eq!(response.status_code(), 200);

	let token = response.json::<Value>()["token"]
		.as_str()
		.unwrap()
		.to_string();

	let response = app
		.get("/api/auth")
		.add_header(AUTHORIZATION, bearer(&token))
		.await;

	let id = response.json::<Value>()["_id"]
		.as_str()
		.unwrap()
		.to_string();

	TestUser { id, token }
}

/// Creates a trip owned by `user` and returns its JSON representation.
pub async fn create_trip(app: &TestServer, user: &TestUser) -> Value {
	let response = app
		.post("/api/trips")
		.add_header(AUTHORIZATION, bearer(&user.token))
		.json(&json!({
			"title": "Lisbon",
			"description": "Three days by the river",
			"price": 450,
			"photos": "https://example.com/lisbon.jpg",
		}))
		.await;

	assert_eq!(response.status_code(), 200);

	response.json::<Value>()
}
