//! Users: the accounts that may administer a society.
//!
//! Users are provisioned outside the assignment workflow; from the
//! workflow's point of view they are read-only.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Error, Result};

/// The privilege level of a user account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
  /// May be assigned as the admin of one society.
  Admin,
  Resident,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
  pub user_id:    Uuid,
  pub first_name: String,
  pub last_name:  String,
  pub email:      String,
  pub role:       Role,
  pub created_at: DateTime<Utc>,
}

impl User {
  /// `"First Last"`, trimmed when either part is empty.
  pub fn display_name(&self) -> String {
    format!("{} {}", self.first_name, self.last_name)
      .trim()
      .to_string()
  }

  pub fn is_admin(&self) -> bool { self.role == Role::Admin }
}

/// Input to [`crate::store::SocietyStore::add_user`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
  pub first_name: String,
  pub last_name:  String,
  pub email:      String,
  pub role:       Role,
}

impl NewUser {
  pub fn admin(
    first_name: impl Into<String>,
    last_name: impl Into<String>,
    email: impl Into<String>,
  ) -> Self {
    Self {
      first_name: first_name.into(),
      last_name:  last_name.into(),
      email:      email.into(),
      role:       Role::Admin,
    }
  }

  /// Trim every field and reject blank names or an address without `@`.
  pub fn validate(mut self) -> Result<Self> {
    self.first_name = self.first_name.trim().to_string();
    self.last_name = self.last_name.trim().to_string();
    self.email = self.email.trim().to_lowercase();

    if self.first_name.is_empty() && self.last_name.is_empty() {
      return Err(Error::Invalid("a user needs a first or last name".into()));
    }
    if !self.email.contains('@') {
      return Err(Error::Invalid(format!(
        "not an email address: {:?}",
        self.email
      )));
    }
    Ok(self)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn validate_normalises_email() {
    let u = NewUser::admin(" Ada ", "Lovelace", " ADA@Example.com ")
      .validate()
      .unwrap();
    assert_eq!(u.first_name, "Ada");
    assert_eq!(u.email, "ada@example.com");
  }

  #[test]
  fn validate_rejects_missing_at() {
    let err = NewUser::admin("Ada", "Lovelace", "ada.example.com")
      .validate()
      .unwrap_err();
    assert!(matches!(err, Error::Invalid(_)));
  }

  #[test]
  fn user_serialises_camel_case() {
    let user = User {
      user_id:    Uuid::nil(),
      first_name: "Grace".into(),
      last_name:  "Hopper".into(),
      email:      "grace@example.com".into(),
      role:       Role::Admin,
      created_at: Utc::now(),
    };
    let json = serde_json::to_value(&user).unwrap();
    assert_eq!(json["firstName"], "Grace");
    assert_eq!(json["role"], "admin");
    assert_eq!(user.display_name(), "Grace Hopper");
  }
}
