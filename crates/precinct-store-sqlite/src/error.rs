//! Error type for `precinct-store-sqlite`.

use precinct_core::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// A domain rule was violated; the store itself is healthy.
  #[error(transparent)]
  Core(#[from] precinct_core::Error),

  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("uuid parse error: {0}")]
  Uuid(#[from] uuid::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  #[error("corrupt row: {0}")]
  Decode(String),
}

impl StoreError for Error {
  fn domain(&self) -> Option<&precinct_core::Error> {
    match self {
      Self::Core(e) => Some(e),
      _ => None,
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
