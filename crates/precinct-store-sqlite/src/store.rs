//! [`SqliteStore`], the SQLite implementation of [`SocietyStore`].

use std::path::Path;

use chrono::Utc;
use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use precinct_core::{
  announcement::{Announcement, NewAnnouncement},
  society::Society,
  store::SocietyStore,
  user::{NewUser, Role, User},
  Error as CoreError,
};

use crate::{
  encode::{
    decode_uuid, encode_dt, encode_role, encode_uuid, RawAnnouncement,
    RawSociety, RawUser, ANNOUNCEMENT_COLUMNS, SOCIETY_COLUMNS, USER_COLUMNS,
  },
  schema::SCHEMA,
  Error, Result,
};

// ─── Rejections ──────────────────────────────────────────────────────────────

/// Why a transaction refused to write. Produced inside the database thread
/// with raw column values and turned into a [`CoreError`] afterwards.
enum Rejection {
  SocietyNotFound,
  UserNotFound,
  NotAnAdmin,
  /// The society already references this admin.
  SocietyHasAdmin(String),
  /// The admin is referenced by this other society.
  AdminAssignedTo(String),
  NoAdminAssigned,
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Precinct store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Fetch a single society row by its encoded id.
  async fn society_by_id(&self, id: Uuid) -> Result<Option<Society>> {
    let id_str = encode_uuid(id);
    let raw: Option<RawSociety> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {SOCIETY_COLUMNS} FROM societies WHERE society_id = ?1"),
              rusqlite::params![id_str],
              RawSociety::from_row,
            )
            .optional()?,
        )
      })
      .await?;
    raw.map(RawSociety::into_society).transpose()
  }

  async fn users_where(&self, filter: &'static str) -> Result<Vec<User>> {
    let raws: Vec<RawUser> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {USER_COLUMNS} FROM users u
           WHERE {filter}
           ORDER BY u.last_name, u.first_name, u.email"
        ))?;
        let rows = stmt
          .query_map([], RawUser::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    raws.into_iter().map(RawUser::into_user).collect()
  }
}

fn reject(rejection: Rejection, society_id: Uuid, user_id: Uuid) -> Error {
  let core = match rejection {
    Rejection::SocietyNotFound => CoreError::SocietyNotFound(society_id),
    Rejection::UserNotFound => CoreError::UserNotFound(user_id),
    Rejection::NotAnAdmin => CoreError::NotAnAdmin(user_id),
    Rejection::NoAdminAssigned => CoreError::NoAdminAssigned(society_id),
    Rejection::SocietyHasAdmin(admin) => match decode_uuid(&admin) {
      Ok(admin) => CoreError::SocietyHasAdmin { society: society_id, admin },
      Err(e) => return e,
    },
    Rejection::AdminAssignedTo(other) => match decode_uuid(&other) {
      Ok(society) => CoreError::AdminAlreadyAssigned { admin: user_id, society },
      Err(e) => return e,
    },
  };
  Error::Core(core)
}

// ─── SocietyStore impl ───────────────────────────────────────────────────────

impl SocietyStore for SqliteStore {
  type Error = Error;

  // ── Users ─────────────────────────────────────────────────────────────────

  async fn add_user(&self, input: NewUser) -> Result<User> {
    let input = input.validate()?;
    let user = User {
      user_id:    Uuid::new_v4(),
      first_name: input.first_name,
      last_name:  input.last_name,
      email:      input.email,
      role:       input.role,
      created_at: Utc::now(),
    };

    let id_str    = encode_uuid(user.user_id);
    let first     = user.first_name.clone();
    let last      = user.last_name.clone();
    let email     = user.email.clone();
    let role_str  = encode_role(user.role).to_owned();
    let at_str    = encode_dt(user.created_at);

    let inserted: bool = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let taken = tx
          .query_row(
            "SELECT 1 FROM users WHERE email = ?1",
            rusqlite::params![email],
            |_| Ok(true),
          )
          .optional()?
          .unwrap_or(false);
        if taken {
          return Ok(false);
        }
        tx.execute(
          "INSERT INTO users (user_id, first_name, last_name, email, role, created_at)
           VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
          rusqlite::params![id_str, first, last, email, role_str, at_str],
        )?;
        tx.commit()?;
        Ok(true)
      })
      .await?;

    if !inserted {
      return Err(CoreError::EmailTaken(user.email).into());
    }
    tracing::debug!(user_id = %user.user_id, role = ?user.role, "user added");
    Ok(user)
  }

  async fn get_user(&self, id: Uuid) -> Result<Option<User>> {
    let id_str = encode_uuid(id);
    let raw: Option<RawUser> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {USER_COLUMNS} FROM users WHERE user_id = ?1"),
              rusqlite::params![id_str],
              RawUser::from_row,
            )
            .optional()?,
        )
      })
      .await?;
    raw.map(RawUser::into_user).transpose()
  }

  async fn list_admins(&self) -> Result<Vec<User>> {
    self.users_where("u.role = 'admin'").await
  }

  async fn list_unassigned_admins(&self) -> Result<Vec<User>> {
    self
      .users_where(
        "u.role = 'admin'
           AND NOT EXISTS (SELECT 1 FROM societies s WHERE s.admin_id = u.user_id)",
      )
      .await
  }

  // ── Societies ─────────────────────────────────────────────────────────────

  async fn add_society(&self, name: String) -> Result<Society> {
    let name = name.trim().to_string();
    if name.is_empty() {
      return Err(CoreError::Invalid("society name is required".into()).into());
    }

    let society = Society {
      society_id: Uuid::new_v4(),
      name,
      admin_id:   None,
      created_at: Utc::now(),
    };

    let id_str   = encode_uuid(society.society_id);
    let name_str = society.name.clone();
    let at_str   = encode_dt(society.created_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO societies (society_id, name, admin_id, created_at)
           VALUES (?1, ?2, NULL, ?3)",
          rusqlite::params![id_str, name_str, at_str],
        )?;
        Ok(())
      })
      .await?;

    tracing::debug!(society_id = %society.society_id, "society added");
    Ok(society)
  }

  async fn get_society(&self, id: Uuid) -> Result<Option<Society>> {
    self.society_by_id(id).await
  }

  async fn list_societies(&self) -> Result<Vec<Society>> {
    let raws: Vec<RawSociety> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {SOCIETY_COLUMNS} FROM societies ORDER BY name, society_id"
        ))?;
        let rows = stmt
          .query_map([], RawSociety::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    raws.into_iter().map(RawSociety::into_society).collect()
  }

  // ── Assignment ────────────────────────────────────────────────────────────

  async fn assign_admin(&self, society_id: Uuid, admin_id: Uuid) -> Result<Society> {
    let society_str = encode_uuid(society_id);
    let admin_str   = encode_uuid(admin_id);

    // Every check and the write share one transaction; the connection
    // thread serialises concurrent callers.
    let outcome: std::result::Result<RawSociety, Rejection> = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;

        let current: Option<Option<String>> = tx
          .query_row(
            "SELECT admin_id FROM societies WHERE society_id = ?1",
            rusqlite::params![society_str],
            |r| r.get(0),
          )
          .optional()?;
        let current = match current {
          None => return Ok(Err(Rejection::SocietyNotFound)),
          Some(c) => c,
        };
        if let Some(existing) = current {
          return Ok(Err(Rejection::SocietyHasAdmin(existing)));
        }

        let role: Option<String> = tx
          .query_row(
            "SELECT role FROM users WHERE user_id = ?1",
            rusqlite::params![admin_str],
            |r| r.get(0),
          )
          .optional()?;
        match role.as_deref() {
          None => return Ok(Err(Rejection::UserNotFound)),
          Some(r) if r != encode_role(Role::Admin) => {
            return Ok(Err(Rejection::NotAnAdmin));
          }
          Some(_) => {}
        }

        let elsewhere: Option<String> = tx
          .query_row(
            "SELECT society_id FROM societies WHERE admin_id = ?1",
            rusqlite::params![admin_str],
            |r| r.get(0),
          )
          .optional()?;
        if let Some(other) = elsewhere {
          return Ok(Err(Rejection::AdminAssignedTo(other)));
        }

        tx.execute(
          "UPDATE societies SET admin_id = ?1
           WHERE society_id = ?2 AND admin_id IS NULL",
          rusqlite::params![admin_str, society_str],
        )?;

        let updated = tx.query_row(
          &format!("SELECT {SOCIETY_COLUMNS} FROM societies WHERE society_id = ?1"),
          rusqlite::params![society_str],
          RawSociety::from_row,
        )?;
        tx.commit()?;
        Ok(Ok(updated))
      })
      .await?;

    match outcome {
      Ok(raw) => {
        tracing::info!(%society_id, %admin_id, "admin assigned");
        raw.into_society()
      }
      Err(rejection) => Err(reject(rejection, society_id, admin_id)),
    }
  }

  async fn remove_admin(&self, society_id: Uuid) -> Result<Society> {
    let society_str = encode_uuid(society_id);

    let outcome: std::result::Result<RawSociety, Rejection> = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;

        let current: Option<Option<String>> = tx
          .query_row(
            "SELECT admin_id FROM societies WHERE society_id = ?1",
            rusqlite::params![society_str],
            |r| r.get(0),
          )
          .optional()?;
        match current {
          None => return Ok(Err(Rejection::SocietyNotFound)),
          Some(None) => return Ok(Err(Rejection::NoAdminAssigned)),
          Some(Some(_)) => {}
        }

        tx.execute(
          "UPDATE societies SET admin_id = NULL WHERE society_id = ?1",
          rusqlite::params![society_str],
        )?;

        let updated = tx.query_row(
          &format!("SELECT {SOCIETY_COLUMNS} FROM societies WHERE society_id = ?1"),
          rusqlite::params![society_str],
          RawSociety::from_row,
        )?;
        tx.commit()?;
        Ok(Ok(updated))
      })
      .await?;

    match outcome {
      Ok(raw) => {
        tracing::info!(%society_id, "admin removed");
        raw.into_society()
      }
      Err(Rejection::NoAdminAssigned) => {
        Err(CoreError::NoAdminAssigned(society_id).into())
      }
      Err(_) => Err(CoreError::SocietyNotFound(society_id).into()),
    }
  }

  // ── Announcements ─────────────────────────────────────────────────────────

  async fn post_announcement(&self, input: NewAnnouncement) -> Result<Announcement> {
    let input = input.validate()?;

    if let Some(sid) = input.society_id
      && self.society_by_id(sid).await?.is_none()
    {
      return Err(CoreError::SocietyNotFound(sid).into());
    }

    let announcement = Announcement {
      announcement_id: Uuid::new_v4(),
      society_id:      input.society_id,
      title:           input.title,
      body:            input.body,
      created_at:      Utc::now(),
    };

    let id_str      = encode_uuid(announcement.announcement_id);
    let society_str = announcement.society_id.map(encode_uuid);
    let title       = announcement.title.clone();
    let body        = announcement.body.clone();
    let at_str      = encode_dt(announcement.created_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO announcements (announcement_id, society_id, title, body, created_at)
           VALUES (?1, ?2, ?3, ?4, ?5)",
          rusqlite::params![id_str, society_str, title, body, at_str],
        )?;
        Ok(())
      })
      .await?;

    Ok(announcement)
  }

  async fn list_announcements(&self, society_id: Option<Uuid>) -> Result<Vec<Announcement>> {
    let society_str = society_id.map(encode_uuid);

    let raws: Vec<RawAnnouncement> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {ANNOUNCEMENT_COLUMNS} FROM announcements
           WHERE ?1 IS NULL OR society_id IS NULL OR society_id = ?1
           ORDER BY created_at DESC, rowid DESC"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![society_str], RawAnnouncement::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawAnnouncement::into_announcement).collect()
  }

  async fn delete_announcement(&self, id: Uuid) -> Result<()> {
    let id_str = encode_uuid(id);
    let deleted = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "DELETE FROM announcements WHERE announcement_id = ?1",
          rusqlite::params![id_str],
        )?)
      })
      .await?;

    if deleted == 0 {
      return Err(CoreError::AnnouncementNotFound(id).into());
    }
    Ok(())
  }
}
