pub use crate::route::model::IdInput;

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::Error;
use crate::route::auth::model::User;

/// A single trip, shared by a user.
///
/// Likes, comments and points are embedded in the trip and kept newest first.
#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct Trip {
	/// The unique identifier of the trip.
	#[serde(rename = "_id")]
	pub id: Uuid,
	/// The user that created the trip.
	pub user: Uuid,
	/// The creator's name at the time the trip was created.
	pub name: String,
	/// The creator's avatar at the time the trip was created.
	pub avatar: Option<String>,
	pub title: String,
	pub description: String,
	pub price: f64,
	/// An encoded reference to the trip's photos.
	pub photos: String,
	pub likes: Vec<Like>,
	pub comments: Vec<Comment>,
	pub points: Vec<Point>,
	/// The creation time of the trip.
	pub date: DateTime<Utc>,
	/// Incremented on every save, used to detect concurrent writes.
	#[serde(skip)]
	pub version: i64,
}

/// A like left on a trip. A user likes a trip at most once.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, JsonSchema)]
pub struct Like {
	#[serde(rename = "_id")]
	pub id: Uuid,
	pub user: Uuid,
}

/// A comment left on a trip.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, JsonSchema)]
pub struct Comment {
	#[serde(rename = "_id")]
	pub id: Uuid,
	/// The author of the comment.
	pub user: Uuid,
	pub text: String,
	/// The author's name at the time of commenting.
	pub name: String,
	pub avatar: Option<String>,
	pub date: DateTime<Utc>,
}

/// A coordinate pair placed on a trip by a user.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, JsonSchema)]
pub struct Point {
	#[serde(rename = "_id")]
	pub id: Uuid,
	/// The user that placed the point.
	pub user: Uuid,
	#[serde(rename = "coordX")]
	pub coord_x: f64,
	#[serde(rename = "coordY")]
	pub coord_y: f64,
}

#[derive(Debug, Deserialize, Validate, JsonSchema)]
pub struct CreateTripInput {
	#[validate(length(min = 1, message = "Title is required"))]
	#[serde(default)]
	pub title: String,
	#[validate(length(min = 1, message = "Description is required"))]
	#[serde(default)]
	pub description: String,
	#[validate(required(message = "Price is required"))]
	pub price: Option<f64>,
	/// An encoded reference to the trip's photos.
	#[validate(length(min = 1, message = "Photos is required"))]
	#[serde(default)]
	pub photos: String,
}

#[derive(Debug, Deserialize, Validate, JsonSchema)]
pub struct CreateCommentInput {
	#[validate(length(min = 1, message = "Text is required"))]
	#[serde(default)]
	pub text: String,
}

#[derive(Debug, Deserialize, Validate, JsonSchema)]
pub struct CommentPath {
	/// The trip the comment belongs to.
	pub id: String,
	pub comment_id: String,
}

#[derive(Serialize, JsonSchema)]
pub struct Removed {
	pub msg: &'static str,
}

impl Trip {
	/// Creates a trip owned by `user`, copying their name and avatar.
	///
	/// `input` must already be validated.
	pub fn new(user: &User, input: CreateTripInput) -> Self {
		Self {
			id: Uuid::now_v7(),
			user: user.id,
			name: user.name.clone(),
			avatar: user.avatar.clone(),
			title: input.title,
			description: input.description,
			price: input.price.unwrap_or_default(),
			photos: input.photos,
			likes: Vec::new(),
			comments: Vec::new(),
			points: Vec::new(),
			date: Utc::now(),
			version: 0,
		}
	}

	/// Fails with [`Error::Unauthorized`] unless `user` created the trip.
	pub fn ensure_owner(&self, user: Uuid) -> Result<(), Error> {
		if self.user == user {
			Ok(())
		} else {
			Err(Error::Unauthorized)
		}
	}

	pub fn is_liked_by(&self, user: Uuid) -> bool {
		self.likes.iter().any(|like| like.user == user)
	}

	pub fn like(&mut self, user: Uuid) -> Result<(), Error> {
		if self.is_liked_by(user) {
			return Err(Error::AlreadyLiked);
		}

		self.likes.insert(0, Like::new(user));
		Ok(())
	}

	pub fn unlike(&mut self, user: Uuid) -> Result<(), Error> {
		let index = self
			.likes
			.iter()
			.position(|like| like.user == user)
			.ok_or(Error::NotLiked)?;

		self.likes.remove(index);
		Ok(())
	}

	pub fn add_comment(&mut self, comment: Comment) {
		self.comments.insert(0, comment);
	}

	/// Removes the comment with the given id, as long as `user` wrote it.
	pub fn remove_comment(&mut self, comment: Uuid, user: Uuid) -> Result<Comment, Error> {
		let index = self
			.comments
			.iter()
			.position(|c| c.id == comment)
			.ok_or(Error::UnknownComment)?;

		if self.comments[index].user != user {
			return Err(Error::Unauthorized);
		}

		Ok(self.comments.remove(index))
	}

	pub fn add_point(&mut self, point: Point) {
		self.points.insert(0, point);
	}

	/// Removes the point with the given id, as long as `user` placed it.
	pub fn remove_point(&mut self, point: Uuid, user: Uuid) -> Result<Point, Error> {
		let index = self
			.points
			.iter()
			.position(|p| p.id == point)
			.ok_or(Error::UnknownPoint)?;

		if self.points[index].user != user {
			return Err(Error::Unauthorized);
		}

		Ok(self.points.remove(index))
	}
}

impl Like {
	pub fn new(user: Uuid) -> Self {
		Self {
			id: Uuid::now_v7(),
			user,
		}
	}
}

impl Comment {
	/// Creates a comment by `user`, copying their name and avatar.
	pub fn new(user: &User, text: String) -> Self {
		Self {
			id: Uuid::now_v7(),
			user: user.id,
			text,
			name: user.name.clone(),
			avatar: user.avatar.clone(),
			date: Utc::now(),
		}
	}
}

impl Point {
	pub fn new(user: Uuid, coord_x: f64, coord_y: f64) -> Self {
		Self {
			id: Uuid::now_v7(),
			user,
			coord_x,
			coord_y,
		}
	}
}

#[cfg(test)]
mod test {
	use super::*;

	fn user(name: &str) -> User {
		User {
			id: Uuid::now_v7(),
			name: name.into(),
			email: format!("{name}@example.com"),
			avatar: Some(format!("https://example.com/{name}.png")),
			password: Vec::new(),
			date: Utc::now(),
		}
	}

	fn trip(owner: &User) -> Trip {
		Trip::new(
			owner,
			CreateTripInput {
				title: "A".into(),
				description: "B".into(),
				price: Some(10.0),
				photos: "x.jpg".into(),
			},
		)
	}

	#[test]
	fn test_new_trip_copies_profile() {
		let owner = user("john");
		let trip = trip(&owner);

		assert_eq!(trip.user, owner.id);
		assert_eq!(trip.name, owner.name);
		assert_eq!(trip.avatar, owner.avatar);
		assert!(trip.likes.is_empty());
		assert!(trip.comments.is_empty());
	}

	#[test]
	fn test_like_once_per_user() {
		let owner = user("john");
		let mut trip = trip(&owner);

		trip.like(owner.id).unwrap();

		assert!(matches!(trip.like(owner.id), Err(Error::AlreadyLiked)));
		assert_eq!(trip.likes.len(), 1);
	}

	#[test]
	fn test_unlike_removes_own_like() {
		let john = user("john");
		let jane = user("jane");
		let mut trip = trip(&john);

		trip.like(john.id).unwrap();
		trip.like(jane.id).unwrap();
		trip.unlike(john.id).unwrap();

		assert_eq!(trip.likes.len(), 1);
		assert_eq!(trip.likes[0].user, jane.id);
	}

	#[test]
	fn test_unlike_without_like() {
		let john = user("john");
		let jane = user("jane");
		let mut trip = trip(&john);

		trip.like(jane.id).unwrap();

		assert!(matches!(trip.unlike(john.id), Err(Error::NotLiked)));
		assert_eq!(trip.likes.len(), 1);
	}

	#[test]
	fn test_remove_comment_by_its_own_id() {
		let john = user("john");
		let mut trip = trip(&john);

		let first = Comment::new(&john, "first".into());
		let second = Comment::new(&john, "second".into());
		let first_id = first.id;

		trip.add_comment(first);
		trip.add_comment(second);

		// the newest comment sits at the front, so removing the older one
		// must not touch index 0
		let removed = trip.remove_comment(first_id, john.id).unwrap();

		assert_eq!(removed.text, "first");
		assert_eq!(trip.comments.len(), 1);
		assert_eq!(trip.comments[0].text, "second");
	}

	#[test]
	fn test_remove_comment_checks_author() {
		let john = user("john");
		let jane = user("jane");
		let mut trip = trip(&john);

		let comment = Comment::new(&jane, "hi".into());
		let id = comment.id;

		trip.add_comment(comment);

		assert!(matches!(
			trip.remove_comment(id, john.id),
			Err(Error::Unauthorized)
		));
		assert!(matches!(
			trip.remove_comment(Uuid::now_v7(), jane.id),
			Err(Error::UnknownComment)
		));
		assert_eq!(trip.comments.len(), 1);
	}

	#[test]
	fn test_remove_point() {
		let john = user("john");
		let jane = user("jane");
		let mut trip = trip(&john);

		let mine = Point::new(john.id, 1.0, 2.0);
		let theirs = Point::new(jane.id, 3.0, 4.0);
		let (mine_id, theirs_id) = (mine.id, theirs.id);

		trip.add_point(mine);
		trip.add_point(theirs);

		assert!(matches!(
			trip.remove_point(theirs_id, john.id),
			Err(Error::Unauthorized)
		));

		trip.remove_point(mine_id, john.id).unwrap();

		assert_eq!(trip.points.len(), 1);
		assert_eq!(trip.points[0].id, theirs_id);
	}

	#[test]
	fn test_remove_one_of_several_points() {
		let john = user("john");
		let mut trip = trip(&john);

		let older = Point::new(john.id, 1.0, 2.0);
		let newer = Point::new(john.id, 3.0, 4.0);
		let (older_id, newer_id) = (older.id, newer.id);

		trip.add_point(older);
		trip.add_point(newer);

		let removed = trip.remove_point(older_id, john.id).unwrap();

		assert_eq!(removed.id, older_id);
		assert_eq!(trip.points.len(), 1);
		assert_eq!(trip.points[0].id, newer_id);
	}

	#[test]
	fn test_point_serializes_coordinates() {
		let point = Point::new(Uuid::nil(), 1.5, -2.0);
		let value = serde_json::to_value(&point).unwrap();

		assert_eq!(value["coordX"], 1.5);
		assert_eq!(value["coordY"], -2.0);
		assert!(value.get("_id").is_some());
	}
}
