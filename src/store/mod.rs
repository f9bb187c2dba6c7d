mod memory;
mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

use uuid::Uuid;

use crate::route::{
	auth::model::User, mark::model::Mark, profile::model::TripProfile, trip::model::Trip,
};

/// An error raised by a [`Store`] implementation.
#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("database error: {0}")]
	Database(#[from] sqlx::Error),
	#[error("migration error: {0}")]
	Migrate(#[from] sqlx::migrate::MigrateError),
	/// The document changed between being loaded and being saved.
	#[error("document was modified concurrently")]
	VersionMismatch,
	/// The document was deleted between being loaded and being saved.
	#[error("document no longer exists")]
	NotFound,
	/// A unique key, named by the field, is already taken.
	#[error("duplicate key {0}")]
	Duplicate(&'static str),
}

/// Document persistence used by every route.
///
/// Relationships between documents are plain identifiers, so no
/// operation here cascades to other collections.
#[axum::async_trait]
pub trait Store: Send + Sync {
	/// Inserts a new user, failing with [`Error::Duplicate`] if the email is taken.
	async fn insert_user(&self, user: &User) -> Result<(), Error>;
	async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, Error>;

	/// Opens a new session for the user, returning its token.
	async fn insert_session(&self, user: Uuid) -> Result<Uuid, Error>;
	async fn find_session_user(&self, session: Uuid) -> Result<Option<User>, Error>;
	async fn delete_session(&self, session: Uuid) -> Result<(), Error>;

	async fn insert_trip(&self, trip: &Trip) -> Result<(), Error>;
	/// Returns every trip, newest first.
	async fn list_trips(&self) -> Result<Vec<Trip>, Error>;
	async fn find_trip(&self, id: Uuid) -> Result<Option<Trip>, Error>;
	/// Persists the embedded likes, comments and points of a trip.
	///
	/// The save only succeeds if the stored version still equals
	/// `trip.version`, otherwise [`Error::VersionMismatch`] is returned
	/// and nothing is written. A trip that no longer exists fails with
	/// [`Error::NotFound`].
	async fn save_trip(&self, trip: &Trip) -> Result<(), Error>;
	/// Deletes a trip, returning `false` if it did not exist.
	async fn delete_trip(&self, id: Uuid) -> Result<bool, Error>;

	async fn insert_mark(&self, mark: &Mark) -> Result<(), Error>;
	/// Returns the marks attached to a point, newest first.
	async fn list_marks(&self, point: Uuid) -> Result<Vec<Mark>, Error>;
	async fn find_mark(&self, id: Uuid) -> Result<Option<Mark>, Error>;
	async fn save_mark(&self, mark: &Mark) -> Result<(), Error>;
	async fn delete_mark(&self, id: Uuid) -> Result<bool, Error>;

	async fn find_profile(&self, user: Uuid) -> Result<Option<TripProfile>, Error>;
	/// Inserts or replaces the profile owned by `profile.user`.
	///
	/// A profile with version 0 is only inserted if the user has none yet.
	/// Otherwise the stored version must equal `profile.version`. Either
	/// conflict fails with [`Error::VersionMismatch`].
	async fn save_profile(&self, profile: &TripProfile) -> Result<(), Error>;
}
