//! The `SocietyStore` trait.
//!
//! Implemented by storage backends (e.g. `precinct-store-sqlite`). The HTTP
//! layer (`precinct-api`) depends on this abstraction, not on any concrete
//! backend.

use std::future::Future;

use uuid::Uuid;

use crate::{
  announcement::{Announcement, NewAnnouncement},
  error::StoreError,
  society::Society,
  user::{NewUser, User},
};

/// Abstraction over a Precinct storage backend.
///
/// The backend is the single source of truth for the one-admin-per-society
/// invariant: [`assign_admin`](Self::assign_admin) must check and write in
/// one atomic step so concurrent operators cannot both succeed.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait SocietyStore: Send + Sync {
  type Error: StoreError;

  // ── Users ─────────────────────────────────────────────────────────────

  /// Create and persist a user. Fails if the email is already registered.
  fn add_user(
    &self,
    input: NewUser,
  ) -> impl Future<Output = Result<User, Self::Error>> + Send + '_;

  /// Retrieve a user by UUID. Returns `None` if not found.
  fn get_user(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<User>, Self::Error>> + Send + '_;

  /// Every user with the admin role, ordered by last then first name.
  fn list_admins(
    &self,
  ) -> impl Future<Output = Result<Vec<User>, Self::Error>> + Send + '_;

  /// Admins that no society currently references.
  fn list_unassigned_admins(
    &self,
  ) -> impl Future<Output = Result<Vec<User>, Self::Error>> + Send + '_;

  // ── Societies ─────────────────────────────────────────────────────────

  /// Create and persist a society with no admin.
  fn add_society(
    &self,
    name: String,
  ) -> impl Future<Output = Result<Society, Self::Error>> + Send + '_;

  fn get_society(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Society>, Self::Error>> + Send + '_;

  /// All societies, ordered by name.
  fn list_societies(
    &self,
  ) -> impl Future<Output = Result<Vec<Society>, Self::Error>> + Send + '_;

  // ── Assignment ────────────────────────────────────────────────────────

  /// Bind `admin_id` to `society_id` and return the updated society.
  ///
  /// Fails if either record is missing, if the user is not an admin, if the
  /// society already has an admin, or if the admin already administers
  /// another society.
  fn assign_admin(
    &self,
    society_id: Uuid,
    admin_id: Uuid,
  ) -> impl Future<Output = Result<Society, Self::Error>> + Send + '_;

  /// Clear the admin of `society_id` and return the updated society.
  ///
  /// Fails if the society is missing or has no admin.
  fn remove_admin(
    &self,
    society_id: Uuid,
  ) -> impl Future<Output = Result<Society, Self::Error>> + Send + '_;

  // ── Announcements ─────────────────────────────────────────────────────

  /// Persist an announcement. Fails if `society_id` names an unknown
  /// society.
  fn post_announcement(
    &self,
    input: NewAnnouncement,
  ) -> impl Future<Output = Result<Announcement, Self::Error>> + Send + '_;

  /// Announcements newest first. With `society_id`, only those addressed to
  /// that society or to every society.
  fn list_announcements(
    &self,
    society_id: Option<Uuid>,
  ) -> impl Future<Output = Result<Vec<Announcement>, Self::Error>> + Send + '_;

  /// Delete an announcement. Fails if it does not exist.
  fn delete_announcement(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;
}
