use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// A single user.
#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct User {
	/// The unique identifier of the user.
	#[serde(rename = "_id")]
	pub id: Uuid,
	/// The name that is displayed to the public.
	pub name: String,
	/// The user's email address, used for logging in.
	#[serde(skip)]
	pub email: String,
	/// A link to the user's avatar image.
	pub avatar: Option<String>,
	/// The hashed password.
	#[serde(skip)]
	pub password: Vec<u8>,
	/// The registration time of the user.
	pub date: DateTime<Utc>,
}

/// A session token, sent back as a bearer token on every private route.
#[derive(Serialize, JsonSchema)]
pub struct Token {
	pub token: Uuid,
}

#[derive(Deserialize, Validate, JsonSchema)]
pub struct LoginInput {
	#[validate(email(message = "Please include a valid email"))]
	#[serde(default)]
	pub email: String,
	#[validate(length(min = 1, message = "Password is required"))]
	#[serde(default)]
	pub password: String,
}

#[derive(Deserialize, Validate, JsonSchema)]
pub struct RegisterInput {
	/// The name that is displayed to the public.
	#[validate(length(min = 1, max = 64, message = "Name is required"))]
	#[serde(default)]
	pub name: String,
	#[validate(email(message = "Please include a valid email"))]
	#[serde(default)]
	pub email: String,
	#[validate(length(
		min = 6,
		max = 128,
		message = "Please enter a password with 6 or more characters"
	))]
	#[serde(default)]
	pub password: String,
	/// A link to the user's avatar image.
	#[validate(length(max = 512, message = "Avatar must be at most 512 characters"))]
	pub avatar: Option<String>,
}
