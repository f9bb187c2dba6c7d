use std::borrow::Cow;

use aide::OperationOutput;
use axum::{
	body::Body,
	extract::rejection,
	http::{Response, StatusCode},
	response::IntoResponse,
	Json,
};
use schemars::JsonSchema;
use serde::Serialize;
use tower_governor::GovernorError;

use crate::store;

/// A single field-level message presented to the client.
#[derive(Debug, Serialize, JsonSchema)]
pub struct Message {
	/// The human readable error message.
	pub msg: Cow<'static, str>,
	/// The request field that caused the error, if any.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub param: Option<Cow<'static, str>>,
}

impl Message {
	pub fn new(msg: impl Into<Cow<'static, str>>) -> Self {
		Self {
			msg: msg.into(),
			param: None,
		}
	}

	pub fn param(mut self, param: impl Into<Cow<'static, str>>) -> Self {
		self.param = Some(param.into());
		self
	}
}

/// The JSON body of every error response.
#[derive(Debug, Serialize, JsonSchema)]
#[serde(untagged)]
pub enum ErrorBody {
	/// A single failure, such as an unknown resource.
	Message { msg: Cow<'static, str> },
	/// One or more failures tied to request fields.
	Errors { errors: Vec<Message> },
}

impl ErrorBody {
	pub fn message(msg: impl Into<Cow<'static, str>>) -> Self {
		Self::Message { msg: msg.into() }
	}
}

/// Describes how a route-specific error is presented to the client.
///
/// The [`std::fmt::Display`] implementation is used as the default message,
/// so it must not contain sensitive information.
pub trait ErrorShape: std::error::Error {
	fn status(&self) -> StatusCode;

	fn body(&self) -> ErrorBody {
		ErrorBody::message(self.to_string())
	}
}

/// Error type shared by every route.
///
/// The Display trait is not sent to the client, so it can show
/// sensitive information.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
	#[error("validation error: {0}")]
	Validation(#[from] validator::ValidationErrors),
	#[error("body error: {0}")]
	Body(#[from] rejection::BytesRejection),
	#[error("json error: {0}")]
	Json(#[from] serde_json::Error),
	#[error("path error: {0}")]
	Path(#[from] rejection::PathRejection),
	#[error("store error: {0}")]
	Store(#[from] store::Error),
	#[error("rate limit error: {0:?}")]
	RateLimit(GovernorError),
}

impl From<GovernorError> for AppError {
	fn from(error: GovernorError) -> Self {
		Self::RateLimit(error)
	}
}

impl AppError {
	pub fn status(&self) -> StatusCode {
		match self {
			Self::Validation(..) | Self::Json(..) | Self::Path(..) => StatusCode::BAD_REQUEST,
			Self::Body(error) => error.status(),
			Self::Store(store::Error::VersionMismatch | store::Error::Duplicate(..)) => {
				StatusCode::CONFLICT
			}
			Self::Store(store::Error::NotFound) => StatusCode::NOT_FOUND,
			Self::Store(..) => StatusCode::INTERNAL_SERVER_ERROR,
			Self::RateLimit(GovernorError::TooManyRequests { .. }) => StatusCode::TOO_MANY_REQUESTS,
			Self::RateLimit(..) => StatusCode::INTERNAL_SERVER_ERROR,
		}
	}

	pub fn body(&self) -> ErrorBody {
		match self {
			Self::Validation(errors) => {
				let mut messages = errors
					.field_errors()
					.into_iter()
					.flat_map(|(field, errors)| {
						let field = field.to_string();

						errors.iter().map(move |error| {
							let msg = error
								.message
								.clone()
								.unwrap_or_else(|| Cow::Owned(format!("{field} is invalid")));

							Message::new(msg).param(field.clone())
						})
					})
					.collect::<Vec<_>>();

				messages.sort_by(|a, b| a.param.cmp(&b.param));

				ErrorBody::Errors { errors: messages }
			}
			Self::Body(error) => ErrorBody::Errors {
				errors: vec![Message::new(error.body_text())],
			},
			Self::Json(error) => ErrorBody::Errors {
				errors: vec![Message::new(format!("Invalid JSON body: {error}"))],
			},
			Self::Path(error) => ErrorBody::Errors {
				errors: vec![Message::new(error.body_text())],
			},
			Self::Store(store::Error::VersionMismatch) => {
				ErrorBody::message("Trip was modified by another request, please retry")
			}
			Self::Store(store::Error::NotFound) => ErrorBody::message("Trip not found"),
			Self::Store(store::Error::Duplicate(..)) => ErrorBody::message("Resource already exists"),
			Self::RateLimit(GovernorError::TooManyRequests { .. }) => {
				ErrorBody::message("Too many requests")
			}
			Self::Store(..) | Self::RateLimit(..) => ErrorBody::message("Server Error"),
		}
	}
}

impl IntoResponse for AppError {
	fn into_response(self) -> Response<Body> {
		let status = self.status();

		if status.is_server_error() {
			tracing::error!(error = %self, "request failed");
		}

		(status, Json(self.body())).into_response()
	}
}

/// The error returned by a route handler: either a failure specific to
/// the route, or one shared by the whole application.
#[derive(Debug)]
pub enum RouteError<T> {
	App(AppError),
	Route(T),
}

impl<T: ErrorShape> From<T> for RouteError<T> {
	fn from(error: T) -> Self {
		Self::Route(error)
	}
}

impl<T> From<AppError> for RouteError<T> {
	fn from(error: AppError) -> Self {
		Self::App(error)
	}
}

impl<T> From<store::Error> for RouteError<T> {
	fn from(error: store::Error) -> Self {
		Self::App(AppError::Store(error))
	}
}

impl<T> From<validator::ValidationErrors> for RouteError<T> {
	fn from(error: validator::ValidationErrors) -> Self {
		Self::App(AppError::Validation(error))
	}
}

impl<T: ErrorShape> IntoResponse for RouteError<T> {
	fn into_response(self) -> Response<Body> {
		match self {
			Self::App(error) => error.into_response(),
			Self::Route(error) => (error.status(), Json(error.body())).into_response(),
		}
	}
}

impl<T> OperationOutput for RouteError<T> {
	type Inner = ErrorBody;
}
