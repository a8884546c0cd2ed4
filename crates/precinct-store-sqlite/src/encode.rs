//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as fixed-width RFC 3339 strings (nanosecond
//! precision, `Z` suffix) so that lexical order equals chronological order.
//! UUIDs are stored as hyphenated lowercase strings.

use chrono::{DateTime, SecondsFormat, Utc};
use precinct_core::{
  announcement::Announcement,
  society::Society,
  user::{Role, User},
};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Uuid ─────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

fn decode_opt_uuid(s: Option<String>) -> Result<Option<Uuid>> {
  s.as_deref().map(decode_uuid).transpose()
}

// ─── DateTime<Utc> ────────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String {
  dt.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Role ─────────────────────────────────────────────────────────────────────

pub fn encode_role(r: Role) -> &'static str {
  match r {
    Role::Admin => "admin",
    Role::Resident => "resident",
  }
}

pub fn decode_role(s: &str) -> Result<Role> {
  match s {
    "admin" => Ok(Role::Admin),
    "resident" => Ok(Role::Resident),
    other => Err(Error::Decode(format!("unknown role: {other:?}"))),
  }
}

// ─── Raw rows ─────────────────────────────────────────────────────────────────

/// Column list matching [`RawUser::from_row`].
pub const USER_COLUMNS: &str =
  "user_id, first_name, last_name, email, role, created_at";

pub struct RawUser {
  pub user_id:    String,
  pub first_name: String,
  pub last_name:  String,
  pub email:      String,
  pub role:       String,
  pub created_at: String,
}

impl RawUser {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      user_id:    row.get(0)?,
      first_name: row.get(1)?,
      last_name:  row.get(2)?,
      email:      row.get(3)?,
      role:       row.get(4)?,
      created_at: row.get(5)?,
    })
  }

  pub fn into_user(self) -> Result<User> {
    Ok(User {
      user_id:    decode_uuid(&self.user_id)?,
      first_name: self.first_name,
      last_name:  self.last_name,
      email:      self.email,
      role:       decode_role(&self.role)?,
      created_at: decode_dt(&self.created_at)?,
    })
  }
}

/// Column list matching [`RawSociety::from_row`].
pub const SOCIETY_COLUMNS: &str = "society_id, name, admin_id, created_at";

pub struct RawSociety {
  pub society_id: String,
  pub name:       String,
  pub admin_id:   Option<String>,
  pub created_at: String,
}

impl RawSociety {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      society_id: row.get(0)?,
      name:       row.get(1)?,
      admin_id:   row.get(2)?,
      created_at: row.get(3)?,
    })
  }

  pub fn into_society(self) -> Result<Society> {
    Ok(Society {
      society_id: decode_uuid(&self.society_id)?,
      name:       self.name,
      admin_id:   decode_opt_uuid(self.admin_id)?,
      created_at: decode_dt(&self.created_at)?,
    })
  }
}

/// Column list matching [`RawAnnouncement::from_row`].
pub const ANNOUNCEMENT_COLUMNS: &str =
  "announcement_id, society_id, title, body, created_at";

pub struct RawAnnouncement {
  pub announcement_id: String,
  pub society_id:      Option<String>,
  pub title:           String,
  pub body:            String,
  pub created_at:      String,
}

impl RawAnnouncement {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      announcement_id: row.get(0)?,
      society_id:      row.get(1)?,
      title:           row.get(2)?,
      body:            row.get(3)?,
      created_at:      row.get(4)?,
    })
  }

  pub fn into_announcement(self) -> Result<Announcement> {
    Ok(Announcement {
      announcement_id: decode_uuid(&self.announcement_id)?,
      society_id:      decode_opt_uuid(self.society_id)?,
      title:           self.title,
      body:            self.body,
      created_at:      decode_dt(&self.created_at)?,
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn encoded_timestamps_sort_chronologically() {
    // A whole second would encode as "...00Z" under the automatic format,
    // which sorts after "...00.5Z".
    let whole = DateTime::parse_from_rfc3339("2024-03-01T10:00:00Z")
      .unwrap()
      .with_timezone(&Utc);
    let half = DateTime::parse_from_rfc3339("2024-03-01T10:00:00.5Z")
      .unwrap()
      .with_timezone(&Utc);
    assert!(encode_dt(whole) < encode_dt(half));
    assert_eq!(decode_dt(&encode_dt(half)).unwrap(), half);
  }

  #[test]
  fn unknown_role_is_rejected() {
    assert!(decode_role("superuser").is_err());
  }
}
