use aide::OperationInput;
use axum::{
	extract::{FromRef, FromRequestParts},
	http::{header, request, HeaderMap},
};

use uuid::Uuid;

use crate::{
	error::RouteError,
	openapi::{SECURITY_SCHEME_BEARER, SECURITY_SCHEME_SESSION},
	route::auth,
	session, Database,
};

pub const AUTHORIZATION_PREFIX: &str = "Bearer ";
pub const AUTH_TOKEN_HEADER: &str = "x-auth-token";

/// Extracts the session and related user from the request.
///
/// The session token is read from, in order, the `Authorization: Bearer`
/// header, the `x-auth-token` header and the session cookie.
///
/// If none is present, a [`auth::Error::NoToken`] is returned.
/// If the token is malformed or unknown, a [`auth::Error::InvalidToken`] is returned.
///
/// ```rust
/// async fn route(session: Session) {
///   println!("{:?}", session.user);
/// }
/// ```
#[derive(Debug)]
pub struct Session {
	pub id: Uuid,
	pub user: auth::model::User,
}

/// Finds the raw session token in the request headers.
fn token(headers: &HeaderMap) -> Option<&str> {
	// non-UTF-8 values read as an empty, invalid token
	if let Some(value) = headers.get(header::AUTHORIZATION) {
		let value = value.to_str().unwrap_or_default();

		return Some(value.strip_prefix(AUTHORIZATION_PREFIX).unwrap_or(value));
	}

	if let Some(value) = headers.get(AUTH_TOKEN_HEADER) {
		return Some(value.to_str().unwrap_or_default());
	}

	headers
		.get_all(header::COOKIE)
		.into_iter()
		.filter_map(|value| value.to_str().ok())
		.flat_map(cookie::Cookie::split_parse)
		.filter_map(Result::ok)
		.find(|cookie| cookie.name() == session::COOKIE_NAME)
		.and_then(|cookie| cookie.value_raw())
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for Session
where
	Database: FromRef<S>,
	S: Sync + Send,
{
	type Rejection = RouteError<auth::Error>;

	/// Extracts the session from the request using a bearer token or session cookie.
	async fn from_request_parts(
		parts: &mut request::Parts,
		state: &S,
	) -> Result<Self, Self::Rejection> {
		let token = token(&parts.headers).ok_or(auth::Error::NoToken)?;
		let id = Uuid::try_parse(token.trim()).map_err(|_| auth::Error::InvalidToken)?;

		let database = Database::from_ref(state);
		let user = database
			.find_session_user(id)
			.await?
			.ok_or(auth::Error::InvalidToken)?;

		Ok(Session { id, user })
	}
}

impl OperationInput for Session {
	/// Operation input for the session extractor.
	///
	/// This adds a bearer token or session cookie requirement to the `OpenAPI` operation.
	fn operation_input(_ctx: &mut aide::gen::GenContext, operation: &mut aide::openapi::Operation) {
		operation.security.extend([
			[(SECURITY_SCHEME_BEARER.to_string(), Vec::new())]
				.into_iter()
				.collect(),
			[(SECURITY_SCHEME_SESSION.to_string(), Vec::new())]
				.into_iter()
				.collect(),
		]);
	}
}

#[cfg(test)]
mod test {
	use axum::http::{HeaderMap, HeaderValue};

	use super::*;

	#[test]
	fn test_token_sources() {
		let mut headers = HeaderMap::new();

		assert_eq!(token(&headers), None);

		headers.insert(
			header::COOKIE,
			HeaderValue::from_static("theme=dark; session=abc"),
		);
		assert_eq!(token(&headers), Some("abc"));

		headers.insert(AUTH_TOKEN_HEADER, HeaderValue::from_static("def"));
		assert_eq!(token(&headers), Some("def"));

		headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer ghi"));
		assert_eq!(token(&headers), Some("ghi"));
	}

	#[test]
	fn test_non_utf8_header_is_present() {
		let mut headers = HeaderMap::new();

		headers.insert(
			header::AUTHORIZATION,
			HeaderValue::from_bytes(b"Bearer \xff").unwrap(),
		);
		assert_eq!(token(&headers), Some(""));

		headers.remove(header::AUTHORIZATION);
		headers.insert(AUTH_TOKEN_HEADER, HeaderValue::from_bytes(b"\xff").unwrap());
		assert_eq!(token(&headers), Some(""));
	}
}
