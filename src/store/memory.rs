use std::collections::HashMap;

use tokio::sync::RwLock;
use uuid::Uuid;

use super::{Error, Store};
use crate::route::{
	auth::model::User, mark::model::Mark, profile::model::TripProfile, trip::model::Trip,
};

/// A [`Store`] that keeps every document in process memory.
///
/// Used when no database is configured, and by the test suite.
#[derive(Default)]
pub struct MemoryStore {
	inner: RwLock<Inner>,
}

#[derive(Default)]
struct Inner {
	users: HashMap<Uuid, User>,
	sessions: HashMap<Uuid, Uuid>,
	trips: HashMap<Uuid, Trip>,
	marks: HashMap<Uuid, Mark>,
	profiles: HashMap<Uuid, TripProfile>,
}

impl MemoryStore {
	pub fn new() -> Self {
		Self::default()
	}
}

#[axum::async_trait]
impl Store for MemoryStore {
	async fn insert_user(&self, user: &User) -> Result<(), Error> {
		let mut inner = self.inner.write().await;

		if inner.users.values().any(|u| u.email == user.email) {
			return Err(Error::Duplicate("email"));
		}

		inner.users.insert(user.id, user.clone());
		Ok(())
	}

	async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, Error> {
		let inner = self.inner.read().await;

		Ok(inner.users.values().find(|u| u.email == email).cloned())
	}

	async fn insert_session(&self, user: Uuid) -> Result<Uuid, Error> {
		let session = Uuid::new_v4();

		self.inner.write().await.sessions.insert(session, user);
		Ok(session)
	}

	async fn find_session_user(&self, session: Uuid) -> Result<Option<User>, Error> {
		let inner = self.inner.read().await;

		Ok(inner
			.sessions
			.get(&session)
			.and_then(|user| inner.users.get(user))
			.cloned())
	}

	async fn delete_session(&self, session: Uuid) -> Result<(), Error> {
		self.inner.write().await.sessions.remove(&session);
		Ok(())
	}

	async fn insert_trip(&self, trip: &Trip) -> Result<(), Error> {
		self.inner.write().await.trips.insert(trip.id, trip.clone());
		Ok(())
	}

	async fn list_trips(&self) -> Result<Vec<Trip>, Error> {
		let mut trips = self
			.inner
			.read()
			.await
			.trips
			.values()
			.cloned()
			.collect::<Vec<_>>();

		trips.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| b.id.cmp(&a.id)));
		Ok(trips)
	}

	async fn find_trip(&self, id: Uuid) -> Result<Option<Trip>, Error> {
		Ok(self.inner.read().await.trips.get(&id).cloned())
	}

	async fn save_trip(&self, trip: &Trip) -> Result<(), Error> {
		let mut inner = self.inner.write().await;

		let stored = inner.trips.get_mut(&trip.id).ok_or(Error::NotFound)?;

		if stored.version != trip.version {
			return Err(Error::VersionMismatch);
		}

		stored.likes.clone_from(&trip.likes);
		stored.comments.clone_from(&trip.comments);
		stored.points.clone_from(&trip.points);
		stored.version += 1;

		Ok(())
	}

	async fn delete_trip(&self, id: Uuid) -> Result<bool, Error> {
		Ok(self.inner.write().await.trips.remove(&id).is_some())
	}

	async fn insert_mark(&self, mark: &Mark) -> Result<(), Error> {
		self.inner.write().await.marks.insert(mark.id, mark.clone());
		Ok(())
	}

	async fn list_marks(&self, point: Uuid) -> Result<Vec<Mark>, Error> {
		let mut marks = self
			.inner
			.read()
			.await
			.marks
			.values()
			.filter(|mark| mark.point == point)
			.cloned()
			.collect::<Vec<_>>();

		marks.sort_by(|a, b| b.id.cmp(&a.id));
		Ok(marks)
	}

	async fn find_mark(&self, id: Uuid) -> Result<Option<Mark>, Error> {
		Ok(self.inner.read().await.marks.get(&id).cloned())
	}

	async fn save_mark(&self, mark: &Mark) -> Result<(), Error> {
		self.inner.write().await.marks.insert(mark.id, mark.clone());
		Ok(())
	}

	async fn delete_mark(&self, id: Uuid) -> Result<bool, Error> {
		Ok(self.inner.write().await.marks.remove(&id).is_some())
	}

	async fn find_profile(&self, user: Uuid) -> Result<Option<TripProfile>, Error> {
		Ok(self.inner.read().await.profiles.get(&user).cloned())
	}

	async fn save_profile(&self, profile: &TripProfile) -> Result<(), Error> {
		let mut inner = self.inner.write().await;
		let stored = inner.profiles.get(&profile.user).map_or(0, |stored| stored.version);

		if stored != profile.version {
			return Err(Error::VersionMismatch);
		}

		inner.profiles.insert(
			profile.user,
			TripProfile {
				version: profile.version + 1,
				..profile.clone()
			},
		);

		Ok(())
	}
}
