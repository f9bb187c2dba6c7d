use aide::axum::{
	routing::{get_with, post_with},
	ApiRouter,
};
use axum::http::StatusCode;

use crate::{error, AppState};

pub mod model;
pub mod route;

/// An error that can occur during authentication.
///
/// Note that the messages are presented to the client, so they should not contain
/// sensitive information.
#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Invalid credentials")]
	InvalidCredentials,
	#[error("password validation error")]
	Argon(#[from] argon2::Error),
	#[error("No token, authorization denied")]
	NoToken,
	#[error("Token is not valid")]
	InvalidToken,
	#[error("User already exists")]
	EmailTaken,
}

pub type RouteError = error::RouteError<Error>;

/// Routes mounted under `/api/users`.
pub fn user_routes() -> ApiRouter<AppState> {
	use route::*;

	ApiRouter::new().api_route("/", post_with(register, register_docs))
}

/// Routes mounted under `/api/auth`.
pub fn routes() -> ApiRouter<AppState> {
	use route::*;

	ApiRouter::new().api_route(
		"/",
		get_with(get_me, get_me_docs)
			.post_with(login, login_docs)
			.delete_with(logout, logout_docs),
	)
}

impl error::ErrorShape for Error {
	fn status(&self) -> StatusCode {
		match self {
			Self::InvalidCredentials | Self::NoToken | Self::InvalidToken => {
				StatusCode::UNAUTHORIZED
			}
			Self::Argon(..) => StatusCode::INTERNAL_SERVER_ERROR,
			Self::EmailTaken => StatusCode::CONFLICT,
		}
	}

	fn body(&self) -> error::ErrorBody {
		match self {
			Self::Argon(..) => error::ErrorBody::message("Server Error"),
			_ => error::ErrorBody::message(self.to_string()),
		}
	}
}
