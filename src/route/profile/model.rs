pub use crate::route::model::IdInput;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::Error;

/// The trips a user has saved. Each user has at most one profile.
#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct TripProfile {
	#[serde(rename = "_id")]
	pub id: Uuid,
	/// The user that owns the profile.
	pub user: Uuid,
	/// The saved trip ids, newest first.
	pub trips: Vec<Uuid>,
	/// Incremented on every save. Zero until the profile is first stored.
	#[serde(skip)]
	pub version: i64,
}

#[derive(Debug, Deserialize, Validate, JsonSchema)]
pub struct UserInput {
	pub user_id: String,
}

impl TripProfile {
	pub fn new(user: Uuid) -> Self {
		Self {
			id: Uuid::now_v7(),
			user,
			trips: Vec::new(),
			version: 0,
		}
	}

	pub fn save(&mut self, trip: Uuid) -> Result<(), Error> {
		if self.trips.contains(&trip) {
			return Err(Error::AlreadySaved);
		}

		self.trips.insert(0, trip);
		Ok(())
	}

	pub fn unsave(&mut self, trip: Uuid) -> Result<(), Error> {
		let index = self
			.trips
			.iter()
			.position(|id| *id == trip)
			.ok_or(Error::NotSaved)?;

		self.trips.remove(index);
		Ok(())
	}
}
