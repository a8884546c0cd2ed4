//! Error types for `precinct-client`.

use std::fmt;

use reqwest::StatusCode;
use thiserror::Error;

/// A failed call against the Precinct API.
#[derive(Debug, Error)]
pub enum ClientError {
  /// The server answered with a non-success status. `message` is the
  /// server's own text.
  #[error("{message}")]
  Api { status: StatusCode, message: String },

  /// The request never produced a usable response.
  #[error("request failed: {0}")]
  Http(#[from] reqwest::Error),
}

impl ClientError {
  pub fn status(&self) -> Option<StatusCode> {
    match self {
      Self::Api { status, .. } => Some(*status),
      Self::Http(e) => e.status(),
    }
  }
}

/// Which mutation a pending flag guards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationKind {
  Assign,
  Remove,
  Post,
  Delete,
}

impl fmt::Display for MutationKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(match self {
      Self::Assign => "an assignment",
      Self::Remove => "a removal",
      Self::Post => "posting",
      Self::Delete => "a deletion",
    })
  }
}

/// What an operator is shown when a workflow step fails.
///
/// Every variant is non-fatal and displayed the same way; none is retried
/// automatically.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorkflowError {
  /// Rejected locally before any request was made.
  #[error("{0}")]
  Validation(String),

  /// The server refused the change because it would break an invariant.
  #[error("{0}")]
  Conflict(String),

  /// Any other failure reported by (or on the way to) the server.
  #[error("{0}")]
  Transport(String),

  /// The same mutation is still in flight.
  #[error("{0} is already in progress")]
  Pending(MutationKind),
}

impl From<ClientError> for WorkflowError {
  fn from(e: ClientError) -> Self {
    match e {
      ClientError::Api { status: StatusCode::CONFLICT, message } => {
        Self::Conflict(message)
      }
      ClientError::Api { message, .. } => Self::Transport(message),
      ClientError::Http(e) => Self::Transport(e.to_string()),
    }
  }
}
