use chrono::{DateTime, Utc};
use sqlx::{postgres::PgPoolOptions, types::Json, PgPool};
use uuid::Uuid;

use super::{Error, Store};
use crate::route::{
	auth::model::User,
	mark::model::Mark,
	profile::model::TripProfile,
	trip::model::{Comment, Like, Point, Trip},
};

/// A [`Store`] backed by PostgreSQL.
///
/// The embedded collections of a trip are stored as JSONB columns, so a
/// trip is always read and written as a single row.
pub struct PgStore {
	pool: PgPool,
}

impl PgStore {
	/// Connects to the database and applies any pending migrations.
	pub async fn connect(url: &str) -> Result<Self, Error> {
		let pool = PgPoolOptions::new().max_connections(10).connect(url).await?;

		sqlx::migrate!("./migrations").run(&pool).await?;

		Ok(Self { pool })
	}
}

#[derive(sqlx::FromRow)]
struct UserRow {
	id: Uuid,
	name: String,
	email: String,
	avatar: Option<String>,
	password: Vec<u8>,
	created_at: DateTime<Utc>,
}

impl From<UserRow> for User {
	fn from(row: UserRow) -> Self {
		Self {
			id: row.id,
			name: row.name,
			email: row.email,
			avatar: row.avatar,
			password: row.password,
			date: row.created_at,
		}
	}
}

#[derive(sqlx::FromRow)]
struct TripRow {
	id: Uuid,
	user_id: Uuid,
	name: String,
	avatar: Option<String>,
	title: String,
	description: String,
	price: f64,
	photos: String,
	likes: Json<Vec<Like>>,
	comments: Json<Vec<Comment>>,
	points: Json<Vec<Point>>,
	created_at: DateTime<Utc>,
	version: i64,
}

impl From<TripRow> for Trip {
	fn from(row: TripRow) -> Self {
		Self {
			id: row.id,
			user: row.user_id,
			name: row.name,
			avatar: row.avatar,
			title: row.title,
			description: row.description,
			price: row.price,
			photos: row.photos,
			likes: row.likes.0,
			comments: row.comments.0,
			points: row.points.0,
			date: row.created_at,
			version: row.version,
		}
	}
}

#[derive(sqlx::FromRow)]
struct MarkRow {
	id: Uuid,
	user_id: Uuid,
	point_id: Uuid,
	title: String,
	description: Option<String>,
	photos: Option<String>,
}

impl From<MarkRow> for Mark {
	fn from(row: MarkRow) -> Self {
		Self {
			id: row.id,
			user: row.user_id,
			point: row.point_id,
			title: row.title,
			description: row.description,
			photos: row.photos,
		}
	}
}

#[derive(sqlx::FromRow)]
struct ProfileRow {
	id: Uuid,
	user_id: Uuid,
	trips: Vec<Uuid>,
	version: i64,
}

impl From<ProfileRow> for TripProfile {
	fn from(row: ProfileRow) -> Self {
		Self {
			id: row.id,
			user: row.user_id,
			trips: row.trips,
			version: row.version,
		}
	}
}

#[axum::async_trait]
impl Store for PgStore {
	async fn insert_user(&self, user: &User) -> Result<(), Error> {
		sqlx::query(
			r#"
				INSERT INTO "user" (id, name, email, avatar, password, created_at)
				VALUES ($1, $2, $3, $4, $5, $6)
			"#,
		)
		.bind(user.id)
		.bind(&user.name)
		.bind(&user.email)
		.bind(&user.avatar)
		.bind(&user.password)
		.bind(user.date)
		.execute(&self.pool)
		.await
		.map_err(|e| match e {
			sqlx::Error::Database(ref d) if d.constraint() == Some("user_email_key") => {
				Error::Duplicate("email")
			}
			e => Error::Database(e),
		})?;

		Ok(())
	}

	async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, Error> {
		let user = sqlx::query_as::<_, UserRow>(r#"SELECT * FROM "user" WHERE email = $1"#)
			.bind(email)
			.fetch_optional(&self.pool)
			.await?;

		Ok(user.map(User::from))
	}

	async fn insert_session(&self, user: Uuid) -> Result<Uuid, Error> {
		let session = sqlx::query_scalar::<_, Uuid>(
			"INSERT INTO session (id, user_id) VALUES ($1, $2) RETURNING id",
		)
		.bind(Uuid::new_v4())
		.bind(user)
		.fetch_one(&self.pool)
		.await?;

		Ok(session)
	}

	async fn find_session_user(&self, session: Uuid) -> Result<Option<User>, Error> {
		let user = sqlx::query_as::<_, UserRow>(
			r#"
				SELECT * FROM "user" WHERE id = (
					SELECT user_id FROM session WHERE id = $1
				)
			"#,
		)
		.bind(session)
		.fetch_optional(&self.pool)
		.await?;

		Ok(user.map(User::from))
	}

	async fn delete_session(&self, session: Uuid) -> Result<(), Error> {
		sqlx::query("DELETE FROM session WHERE id = $1")
			.bind(session)
			.execute(&self.pool)
			.await?;

		Ok(())
	}

	async fn insert_trip(&self, trip: &Trip) -> Result<(), Error> {
		sqlx::query(
			r#"
				INSERT INTO trip (
					id, user_id, name, avatar, title, description, price, photos,
					likes, comments, points, created_at, version
				)
				VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
			"#,
		)
		.bind(trip.id)
		.bind(trip.user)
		.bind(&trip.name)
		.bind(&trip.avatar)
		.bind(&trip.title)
		.bind(&trip.description)
		.bind(trip.price)
		.bind(&trip.photos)
		.bind(Json(&trip.likes))
		.bind(Json(&trip.comments))
		.bind(Json(&trip.points))
		.bind(trip.date)
		.bind(trip.version)
		.execute(&self.pool)
		.await?;

		Ok(())
	}

	async fn list_trips(&self) -> Result<Vec<Trip>, Error> {
		let trips = sqlx::query_as::<_, TripRow>(
			"SELECT * FROM trip ORDER BY created_at DESC, id DESC",
		)
		.fetch_all(&self.pool)
		.await?;

		Ok(trips.into_iter().map(Trip::from).collect())
	}

	async fn find_trip(&self, id: Uuid) -> Result<Option<Trip>, Error> {
		let trip = sqlx::query_as::<_, TripRow>("SELECT * FROM trip WHERE id = $1")
			.bind(id)
			.fetch_optional(&self.pool)
			.await?;

		Ok(trip.map(Trip::from))
	}

	async fn save_trip(&self, trip: &Trip) -> Result<(), Error> {
		let status = sqlx::query(
			r#"
				UPDATE trip
				SET likes = $1, comments = $2, points = $3, version = version + 1
				WHERE id = $4 AND version = $5
			"#,
		)
		.bind(Json(&trip.likes))
		.bind(Json(&trip.comments))
		.bind(Json(&trip.points))
		.bind(trip.id)
		.bind(trip.version)
		.execute(&self.pool)
		.await?;

		if status.rows_affected() == 0 {
			let exists: bool = sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM trip WHERE id = $1)")
				.bind(trip.id)
				.fetch_one(&self.pool)
				.await?;

			return Err(if exists {
				Error::VersionMismatch
			} else {
				Error::NotFound
			});
		}

		Ok(())
	}

	async fn delete_trip(&self, id: Uuid) -> Result<bool, Error> {
		let status = sqlx::query("DELETE FROM trip WHERE id = $1")
			.bind(id)
			.execute(&self.pool)
			.await?;

		Ok(status.rows_affected() > 0)
	}

	async fn insert_mark(&self, mark: &Mark) -> Result<(), Error> {
		sqlx::query(
			r#"
				INSERT INTO mark (id, user_id, point_id, title, description, photos)
				VALUES ($1, $2, $3, $4, $5, $6)
			"#,
		)
		.bind(mark.id)
		.bind(mark.user)
		.bind(mark.point)
		.bind(&mark.title)
		.bind(&mark.description)
		.bind(&mark.photos)
		.execute(&self.pool)
		.await?;

		Ok(())
	}

	async fn list_marks(&self, point: Uuid) -> Result<Vec<Mark>, Error> {
		let marks = sqlx::query_as::<_, MarkRow>(
			"SELECT * FROM mark WHERE point_id = $1 ORDER BY id DESC",
		)
		.bind(point)
		.fetch_all(&self.pool)
		.await?;

		Ok(marks.into_iter().map(Mark::from).collect())
	}

	async fn find_mark(&self, id: Uuid) -> Result<Option<Mark>, Error> {
		let mark = sqlx::query_as::<_, MarkRow>("SELECT * FROM mark WHERE id = $1")
			.bind(id)
			.fetch_optional(&self.pool)
			.await?;

		Ok(mark.map(Mark::from))
	}

	async fn save_mark(&self, mark: &Mark) -> Result<(), Error> {
		sqlx::query(
			r#"
				UPDATE mark
				SET title = $1, description = $2, photos = $3
				WHERE id = $4
			"#,
		)
		.bind(&mark.title)
		.bind(&mark.description)
		.bind(&mark.photos)
		.bind(mark.id)
		.execute(&self.pool)
		.await?;

		Ok(())
	}

	async fn delete_mark(&self, id: Uuid) -> Result<bool, Error> {
		let status = sqlx::query("DELETE FROM mark WHERE id = $1")
			.bind(id)
			.execute(&self.pool)
			.await?;

		Ok(status.rows_affected() > 0)
	}

	async fn find_profile(&self, user: Uuid) -> Result<Option<TripProfile>, Error> {
		let profile =
			sqlx::query_as::<_, ProfileRow>("SELECT * FROM trip_profile WHERE user_id = $1")
				.bind(user)
				.fetch_optional(&self.pool)
				.await?;

		Ok(profile.map(TripProfile::from))
	}

	async fn save_profile(&self, profile: &TripProfile) -> Result<(), Error> {
		if profile.version == 0 {
			sqlx::query(
				r#"
					INSERT INTO trip_profile (id, user_id, trips, version)
					VALUES ($1, $2, $3, 1)
				"#,
			)
			.bind(profile.id)
			.bind(profile.user)
			.bind(&profile.trips)
			.execute(&self.pool)
			.await
			.map_err(|e| match e {
				sqlx::Error::Database(ref d)
					if d.constraint() == Some("trip_profile_user_id_key") =>
				{
					Error::VersionMismatch
				}
				e => Error::Database(e),
			})?;

			return Ok(());
		}

		let status = sqlx::query(
			r#"
				UPDATE trip_profile
				SET trips = $1, version = version + 1
				WHERE user_id = $2 AND version = $3
			"#,
		)
		.bind(&profile.trips)
		.bind(profile.user)
		.bind(profile.version)
		.execute(&self.pool)
		.await?;

		if status.rows_affected() == 0 {
			return Err(Error::VersionMismatch);
		}

		Ok(())
	}
}
