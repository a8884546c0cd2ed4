//! The remote calls the console depends on.
//!
//! [`crate::client::ApiClient`] implements it over HTTP. The cache and the
//! workflows are generic over it so they can be driven without a network.

use std::future::Future;

use precinct_core::{
  announcement::{Announcement, NewAnnouncement},
  society::Society,
  user::User,
};
use uuid::Uuid;

use crate::error::ClientError;

pub trait SocietyApi: Send + Sync {
  /// `GET /api/admins/unassigned`
  fn unassigned_admins(
    &self,
  ) -> impl Future<Output = Result<Vec<User>, ClientError>> + Send + '_;

  /// `GET /api/admins`
  fn admins(&self) -> impl Future<Output = Result<Vec<User>, ClientError>> + Send + '_;

  /// `GET /api/societies`
  fn societies(
    &self,
  ) -> impl Future<Output = Result<Vec<Society>, ClientError>> + Send + '_;

  /// `POST /api/societies/{society_id}/assign-admin`
  fn assign_admin(
    &self,
    society_id: Uuid,
    admin_id: Uuid,
  ) -> impl Future<Output = Result<Society, ClientError>> + Send + '_;

  /// `DELETE /api/societies/{society_id}/admin`
  fn remove_admin(
    &self,
    society_id: Uuid,
  ) -> impl Future<Output = Result<Society, ClientError>> + Send + '_;

  /// `GET /api/announcements`
  fn announcements(
    &self,
  ) -> impl Future<Output = Result<Vec<Announcement>, ClientError>> + Send + '_;

  /// `POST /api/announcements`
  fn post_announcement(
    &self,
    input: NewAnnouncement,
  ) -> impl Future<Output = Result<Announcement, ClientError>> + Send + '_;

  /// `DELETE /api/announcements/{id}`
  fn delete_announcement(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<(), ClientError>> + Send + '_;
}
