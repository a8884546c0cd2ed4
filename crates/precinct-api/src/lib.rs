//! JSON REST API for Precinct.
//!
//! Exposes an axum [`Router`] backed by any
//! [`precinct_core::store::SocietyStore`]. Auth, TLS, and transport concerns
//! are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", precinct_api::api_router(store.clone()))
//! ```

pub mod announcements;
pub mod error;
pub mod extract;
pub mod societies;
pub mod users;

use std::sync::Arc;

use axum::{
  Router,
  routing::{delete, get, post},
};
use precinct_core::store::SocietyStore;

pub use error::ApiError;

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: SocietyStore + 'static,
{
  Router::new()
    // Users
    .route("/admins", get(users::list_admins::<S>))
    .route("/admins/unassigned", get(users::list_unassigned::<S>))
    .route("/users", post(users::create::<S>))
    .route("/users/{id}", get(users::get_one::<S>))
    // Societies
    .route("/societies", get(societies::list::<S>).post(societies::create::<S>))
    .route("/societies/{id}", get(societies::get_one::<S>))
    .route("/societies/{id}/assign-admin", post(societies::assign_admin::<S>))
    .route("/societies/{id}/admin", delete(societies::remove_admin::<S>))
    // Announcements
    .route(
      "/announcements",
      get(announcements::list::<S>).post(announcements::create::<S>),
    )
    .route("/announcements/{id}", delete(announcements::delete_one::<S>))
    .with_state(store)
}

// ─── Router tests ─────────────────────────────────────────────────────────────
