//! Announcements posted to one society or to every society.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Announcement {
  pub announcement_id: Uuid,
  /// Target society; `None` addresses every society.
  #[serde(default)]
  pub society_id:      Option<Uuid>,
  pub title:           String,
  pub body:            String,
  pub created_at:      DateTime<Utc>,
}

/// Input to [`crate::store::SocietyStore::post_announcement`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAnnouncement {
  #[serde(default)]
  pub society_id: Option<Uuid>,
  pub title:      String,
  #[serde(default)]
  pub body:       String,
}

impl NewAnnouncement {
  /// Trim the title and reject it when blank.
  pub fn validate(mut self) -> Result<Self> {
    self.title = self.title.trim().to_string();
    if self.title.is_empty() {
      return Err(Error::Invalid("announcement title is required".into()));
    }
    Ok(self)
  }
}
