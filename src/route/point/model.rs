pub use crate::route::{
	model::IdInput,
	trip::model::{Point, Trip},
};

use schemars::JsonSchema;
use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, JsonSchema)]
pub struct CreatePointInput {
	#[validate(required(message = "Coordinate X is required"))]
	#[serde(rename = "coordX")]
	pub coord_x: Option<f64>,
	#[validate(required(message = "Coordinate Y is required"))]
	#[serde(rename = "coordY")]
	pub coord_y: Option<f64>,
}

#[derive(Debug, Deserialize, Validate, JsonSchema)]
pub struct PointPath {
	/// The trip the point belongs to.
	pub id: String,
	pub point_id: String,
}
