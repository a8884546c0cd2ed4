//! Error types for `precinct-core`.

use thiserror::Error;
use uuid::Uuid;

/// A violation of a domain rule. Storage backends report these unchanged so
/// the HTTP layer can map them onto status codes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
  #[error("society not found: {0}")]
  SocietyNotFound(Uuid),

  #[error("user not found: {0}")]
  UserNotFound(Uuid),

  #[error("announcement not found: {0}")]
  AnnouncementNotFound(Uuid),

  #[error("user {0} does not have admin privileges")]
  NotAnAdmin(Uuid),

  #[error("society {society} already has admin {admin} assigned")]
  SocietyHasAdmin { society: Uuid, admin: Uuid },

  #[error("admin {admin} is already assigned to society {society}")]
  AdminAlreadyAssigned { admin: Uuid, society: Uuid },

  #[error("society {0} has no admin assigned")]
  NoAdminAssigned(Uuid),

  #[error("email address is already registered: {0}")]
  EmailTaken(String),

  #[error("invalid input: {0}")]
  Invalid(String),
}

/// Coarse classification of a domain error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
  NotFound,
  Conflict,
  Invalid,
}

impl Error {
  pub fn kind(&self) -> ErrorKind {
    match self {
      Self::SocietyNotFound(_)
      | Self::UserNotFound(_)
      | Self::AnnouncementNotFound(_) => ErrorKind::NotFound,
      Self::SocietyHasAdmin { .. }
      | Self::AdminAlreadyAssigned { .. }
      | Self::NoAdminAssigned(_)
      | Self::EmailTaken(_) => ErrorKind::Conflict,
      Self::NotAnAdmin(_) | Self::Invalid(_) => ErrorKind::Invalid,
    }
  }
}

/// Implemented by backend error types so callers can recover the domain
/// error (if any) from an otherwise opaque failure.
pub trait StoreError: std::error::Error + Send + Sync + 'static {
  /// The domain rule that was violated, or `None` for infrastructure
  /// failures (I/O, corrupt rows, ...).
  fn domain(&self) -> Option<&Error>;
}

impl StoreError for Error {
  fn domain(&self) -> Option<&Error> { Some(self) }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
