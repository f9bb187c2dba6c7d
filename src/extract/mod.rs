mod session;

pub use session::Session;

use aide::OperationIo;
use axum::{
	body::{Body, Bytes},
	extract::{FromRequest, FromRequestParts, Request},
	http::{request, Response},
	response::IntoResponse,
};
use schemars::JsonSchema;
use serde::de;

use crate::error::AppError;

/// Extractor that deserializes a JSON body and validates it.
///
/// The `Content-Type` header is not checked, and an empty body is read as `{}`,
/// so a missing body is reported field by field through validation.
///
/// ```rust
/// async fn route(Json(trip): Json<CreateTripInput>) {
///   // ...
/// }
/// ```
#[derive(OperationIo)]
#[aide(
	input_with = "axum_jsonschema::Json<T>",
	output_with = "axum_jsonschema::Json<T>",
	json_schema
)]
pub struct Json<T>(pub T);

impl<T> IntoResponse for Json<T>
where
	T: serde::Serialize,
{
	fn into_response(self) -> Response<Body> {
		axum::extract::Json(self.0).into_response()
	}
}

fn parse_body<T: de::DeserializeOwned>(bytes: &[u8]) -> serde_json::Result<T> {
	if bytes.iter().all(u8::is_ascii_whitespace) {
		serde_json::from_slice(b"{}")
	} else {
		serde_json::from_slice(bytes)
	}
}

fn validated<T: validator::Validate>(value: T) -> Result<T, AppError> {
	value.validate()?;
	Ok(value)
}

#[axum::async_trait]
impl<T, S> FromRequest<S> for Json<T>
where
	T: de::DeserializeOwned + validator::Validate + JsonSchema + 'static,
	S: Send + Sync,
{
	type Rejection = AppError;

	async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
		let bytes = Bytes::from_request(req, state).await?;

		Ok(Self(validated(parse_body(&bytes)?)?))
	}
}

/// Extractor that deserializes a path parameter and validates it.
///
/// ```rust
/// async fn route(Path(path): Path<IdInput>) {
///   // ...
/// }
/// ```
#[derive(OperationIo)]
#[aide(
	input_with = "axum::extract::Path<T>",
	output_with = "axum_jsonschema::Json<T>",
	json_schema
)]
pub struct Path<T>(pub T);

#[axum::async_trait]
impl<T, S> FromRequestParts<S> for Path<T>
where
	T: de::DeserializeOwned + validator::Validate + Send,
	S: Send + Sync,
{
	type Rejection = AppError;

	async fn from_request_parts(
		parts: &mut request::Parts,
		state: &S,
	) -> Result<Self, Self::Rejection> {
		let axum::extract::Path(path) =
			axum::extract::Path::<T>::from_request_parts(parts, state).await?;

		Ok(Self(validated(path)?))
	}
}

#[cfg(test)]
mod test {
	use crate::route::trip::model::CreateCommentInput;

	#[test]
	fn test_empty_body_is_validated() {
		let input = super::parse_body::<CreateCommentInput>(b"").unwrap();
		let error = super::validated(input).unwrap_err();

		assert_eq!(error.status(), 400);
		assert_eq!(
			serde_json::to_value(error.body()).unwrap(),
			serde_json::json!({ "errors": [{ "msg": "Text is required", "param": "text" }] })
		);
	}

	#[test]
	fn test_malformed_body() {
		assert!(super::parse_body::<CreateCommentInput>(b"{\"text\":").is_err());
	}
}
