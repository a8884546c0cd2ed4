//! API error type and [`axum::response::IntoResponse`] implementation.
//!
//! Every non-success response carries a JSON body `{"message": "..."}` whose
//! text clients surface to operators unmodified.

use axum::{
  Json,
  extract::rejection::{JsonRejection, PathRejection, QueryRejection},
  http::StatusCode,
  response::{IntoResponse, Response},
};
use precinct_core::{ErrorKind, StoreError};
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("{0}")]
  NotFound(String),

  #[error("{0}")]
  BadRequest(String),

  #[error("{0}")]
  Conflict(String),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl ApiError {
  /// Map a backend failure onto a status: domain violations keep their
  /// message, anything else becomes an opaque 500.
  pub fn from_store<E: StoreError>(e: E) -> Self {
    match e.domain().map(|d| (d.kind(), d.to_string())) {
      Some((ErrorKind::NotFound, m)) => Self::NotFound(m),
      Some((ErrorKind::Conflict, m)) => Self::Conflict(m),
      Some((ErrorKind::Invalid, m)) => Self::BadRequest(m),
      None => Self::Store(Box::new(e)),
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, message) = match &self {
      ApiError::NotFound(m) => (StatusCode::NOT_FOUND, m.clone()),
      ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, m.clone()),
      ApiError::Conflict(m) => (StatusCode::CONFLICT, m.clone()),
      ApiError::Store(e) => {
        tracing::error!(error = %e, "store failure");
        (StatusCode::INTERNAL_SERVER_ERROR, "internal storage error".to_string())
      }
    };
    (status, Json(json!({ "message": message }))).into_response()
  }
}

impl From<JsonRejection> for ApiError {
  fn from(rejection: JsonRejection) -> Self {
    Self::BadRequest(rejection.body_text())
  }
}

impl From<PathRejection> for ApiError {
  fn from(rejection: PathRejection) -> Self {
    Self::BadRequest(rejection.body_text())
  }
}

impl From<QueryRejection> for ApiError {
  fn from(rejection: QueryRejection) -> Self {
    Self::BadRequest(rejection.body_text())
  }
}
