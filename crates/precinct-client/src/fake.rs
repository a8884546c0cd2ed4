//! In-memory [`SocietyApi`] used by the unit tests.
//!
//! Applies the same assignment rules as the server, counts calls per
//! endpoint, and can be told to fail the next call to an endpoint.

use std::{collections::HashMap, sync::Mutex};

use chrono::Utc;
use precinct_core::{
  Error, ErrorKind,
  announcement::{Announcement, NewAnnouncement},
  society::Society,
  user::{Role, User},
};
use reqwest::StatusCode;
use uuid::Uuid;

use crate::{api::SocietyApi, error::ClientError};

pub const S1: Uuid = Uuid::from_u128(0x51);
pub const S2: Uuid = Uuid::from_u128(0x52);
pub const S3: Uuid = Uuid::from_u128(0x53);
pub const U1: Uuid = Uuid::from_u128(0x01);
pub const U2: Uuid = Uuid::from_u128(0x02);
pub const RESIDENT: Uuid = Uuid::from_u128(0x0f);

#[derive(Default)]
struct State {
  users:         Vec<User>,
  societies:     Vec<Society>,
  announcements: Vec<Announcement>,
  calls:         HashMap<&'static str, usize>,
  failures:      HashMap<&'static str, (StatusCode, String)>,
}

#[derive(Default)]
pub struct FakeApi {
  state: Mutex<State>,
}

fn user(id: Uuid, first: &str, last: &str, role: Role) -> User {
  User {
    user_id: id,
    first_name: first.into(),
    last_name: last.into(),
    email: format!("{}@example.org", first.to_lowercase()),
    role,
    created_at: Utc::now(),
  }
}

fn society(id: Uuid, name: &str, admin_id: Option<Uuid>) -> Society {
  Society {
    society_id: id,
    name: name.into(),
    admin_id,
    created_at: Utc::now(),
  }
}

fn rejected(e: Error) -> ClientError {
  let status = match e.kind() {
    ErrorKind::NotFound => StatusCode::NOT_FOUND,
    ErrorKind::Conflict => StatusCode::CONFLICT,
    ErrorKind::Invalid => StatusCode::BAD_REQUEST,
  };
  ClientError::Api { status, message: e.to_string() }
}

impl FakeApi {
  /// `S1` and `S3` without an admin, `S2` run by `U1`, `U2` unassigned,
  /// plus one resident.
  pub fn seeded() -> Self {
    let state = State {
      users: vec![
        user(U1, "Ada", "Lovelace", Role::Admin),
        user(U2, "Grace", "Hopper", Role::Admin),
        user(RESIDENT, "Rita", "Resident", Role::Resident),
      ],
      societies: vec![
        society(S1, "Ashgrove", None),
        society(S2, "Birchwood", Some(U1)),
        society(S3, "Cedar Row", None),
      ],
      ..Default::default()
    };
    Self { state: Mutex::new(state) }
  }

  pub fn calls(&self, endpoint: &str) -> usize {
    let state = self.state.lock().unwrap();
    state.calls.get(endpoint).copied().unwrap_or(0)
  }

  pub fn total_calls(&self) -> usize {
    self.state.lock().unwrap().calls.values().sum()
  }

  /// Make the next call to `endpoint` answer `status` with `message`.
  pub fn fail_next(&self, endpoint: &'static str, status: u16, message: &str) {
    let status = StatusCode::from_u16(status).unwrap();
    self
      .state
      .lock()
      .unwrap()
      .failures
      .insert(endpoint, (status, message.to_string()));
  }

  /// Let an admin change happen behind the client's back.
  pub fn set_admin(&self, society_id: Uuid, admin_id: Option<Uuid>) {
    let mut state = self.state.lock().unwrap();
    if let Some(s) = state.societies.iter_mut().find(|s| s.society_id == society_id) {
      s.admin_id = admin_id;
    }
  }

  fn enter(&self, endpoint: &'static str) -> Result<std::sync::MutexGuard<'_, State>, ClientError> {
    let mut state = self.state.lock().unwrap();
    *state.calls.entry(endpoint).or_default() += 1;
    match state.failures.remove(endpoint) {
      Some((status, message)) => Err(ClientError::Api { status, message }),
      None => Ok(state),
    }
  }
}

impl State {
  fn assign(&mut self, society_id: Uuid, admin_id: Uuid) -> Result<Society, Error> {
    let user = self
      .users
      .iter()
      .find(|u| u.user_id == admin_id)
      .ok_or(Error::UserNotFound(admin_id))?;
    if !user.is_admin() {
      return Err(Error::NotAnAdmin(admin_id));
    }
    if let Some(other) = self.societies.iter().find(|s| s.admin_id == Some(admin_id)) {
      return Err(Error::AdminAlreadyAssigned {
        admin:   admin_id,
        society: other.society_id,
      });
    }
    let target = self
      .societies
      .iter_mut()
      .find(|s| s.society_id == society_id)
      .ok_or(Error::SocietyNotFound(society_id))?;
    if let Some(admin) = target.admin_id {
      return Err(Error::SocietyHasAdmin { society: society_id, admin });
    }
    target.admin_id = Some(admin_id);
    Ok(target.clone())
  }

  fn remove(&mut self, society_id: Uuid) -> Result<Society, Error> {
    let target = self
      .societies
      .iter_mut()
      .find(|s| s.society_id == society_id)
      .ok_or(Error::SocietyNotFound(society_id))?;
    if target.admin_id.take().is_none() {
      return Err(Error::NoAdminAssigned(society_id));
    }
    Ok(target.clone())
  }
}

impl SocietyApi for FakeApi {
  async fn unassigned_admins(&self) -> Result<Vec<User>, ClientError> {
    let state = self.enter("unassigned_admins")?;
    Ok(
      state
        .users
        .iter()
        .filter(|u| u.is_admin())
        .filter(|u| !state.societies.iter().any(|s| s.admin_id == Some(u.user_id)))
        .cloned()
        .collect(),
    )
  }

  async fn admins(&self) -> Result<Vec<User>, ClientError> {
    let state = self.enter("admins")?;
    Ok(state.users.iter().filter(|u| u.is_admin()).cloned().collect())
  }

  async fn societies(&self) -> Result<Vec<Society>, ClientError> {
    let state = self.enter("societies")?;
    Ok(state.societies.clone())
  }

  async fn assign_admin(&self, society_id: Uuid, admin_id: Uuid) -> Result<Society, ClientError> {
    let mut state = self.enter("assign_admin")?;
    state.assign(society_id, admin_id).map_err(rejected)
  }

  async fn remove_admin(&self, society_id: Uuid) -> Result<Society, ClientError> {
    let mut state = self.enter("remove_admin")?;
    state.remove(society_id).map_err(rejected)
  }

  async fn announcements(&self) -> Result<Vec<Announcement>, ClientError> {
    let state = self.enter("announcements")?;
    Ok(state.announcements.iter().rev().cloned().collect())
  }

  async fn post_announcement(&self, input: NewAnnouncement) -> Result<Announcement, ClientError> {
    let mut state = self.enter("post_announcement")?;
    let input = input.validate().map_err(rejected)?;
    let announcement = Announcement {
      announcement_id: Uuid::new_v4(),
      society_id:      input.society_id,
      title:           input.title,
      body:            input.body,
      created_at:      Utc::now(),
    };
    state.announcements.push(announcement.clone());
    Ok(announcement)
  }

  async fn delete_announcement(&self, id: Uuid) -> Result<(), ClientError> {
    let mut state = self.enter("delete_announcement")?;
    let before = state.announcements.len();
    state.announcements.retain(|a| a.announcement_id != id);
    if state.announcements.len() == before {
      return Err(rejected(Error::AnnouncementNotFound(id)));
    }
    Ok(())
  }
}
