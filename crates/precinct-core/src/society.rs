//! Societies and the derived admin assignment.
//!
//! The assignment relation is not stored on its own: it is the `admin_id`
//! field of a [`Society`]. A present `admin_id` must reference an admin that
//! no other society references.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Society {
  pub society_id: Uuid,
  pub name:       String,
  /// The assigned admin. Absent (or `null` on the wire) means unassigned.
  #[serde(default)]
  pub admin_id:   Option<Uuid>,
  pub created_at: DateTime<Utc>,
}

impl Society {
  pub fn has_admin(&self) -> bool { self.admin_id.is_some() }
}

/// Body of `POST /societies`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSociety {
  pub name: String,
}

/// Body of `POST /societies/{id}/assign-admin`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignAdmin {
  pub admin_id: Uuid,
}
