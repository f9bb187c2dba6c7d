use macros::model;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// An annotation left by a user on a point.
#[model]
#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema, Validate)]
pub struct Mark {
	/// The unique identifier of the mark.
	#[serde(rename = "_id", skip_deserializing)]
	pub id: Uuid,
	/// The user that wrote the mark.
	#[serde(skip_deserializing)]
	pub user: Uuid,
	/// The point the mark is attached to.
	#[serde(skip_deserializing)]
	pub point: Uuid,
	#[validate(length(min = 1, message = "Title is required"))]
	#[serde(default)]
	pub title: String,
	pub description: Option<String>,
	/// An encoded reference to the mark's photos.
	pub photos: Option<String>,
}

#[derive(Debug, Deserialize, Validate, JsonSchema)]
pub struct PointInput {
	pub point_id: String,
}

#[derive(Debug, Deserialize, Validate, JsonSchema)]
pub struct MarkPath {
	pub point_id: String,
	pub mark_id: String,
}

#[derive(Serialize, JsonSchema)]
pub struct Removed {
	pub msg: &'static str,
}

impl Mark {
	pub fn new(user: Uuid, point: Uuid, input: CreateMark) -> Self {
		Self {
			id: Uuid::now_v7(),
			user,
			point,
			title: input.title,
			description: input.description,
			photos: input.photos,
		}
	}

	/// Overwrites every field present in `input`.
	pub fn apply(&mut self, input: UpdateMark) {
		if let Some(title) = input.title {
			self.title = title;
		}

		if input.description.is_some() {
			self.description = input.description;
		}

		if input.photos.is_some() {
			self.photos = input.photos;
		}
	}
}
