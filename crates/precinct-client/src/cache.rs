//! Server-state cache with typed keys and a typed invalidation registry.
//!
//! Each cached collection is described by a [`Query`] marker, and each
//! mutation by a [`Mutation`] marker listing the keys it makes stale. The
//! console never writes an entry directly; entries only come from a fetch,
//! and a successful mutation drops its declared keys so the next read
//! refetches.

use std::{
  future::Future,
  sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
  },
  time::Duration,
};

use moka::future::Cache;
use precinct_core::{announcement::Announcement, society::Society, user::User};

use crate::{api::SocietyApi, error::ClientError};

/// How long a cached collection may be served before it is refetched.
pub const DEFAULT_TTL: Duration = Duration::from_secs(60);

/// Identifies one server-backed collection.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum QueryKey {
  UnassignedAdmins,
  Admins,
  Societies,
  Announcements,
}

impl QueryKey {
  pub const ALL: [QueryKey; 4] = [
    QueryKey::UnassignedAdmins,
    QueryKey::Admins,
    QueryKey::Societies,
    QueryKey::Announcements,
  ];

  fn index(self) -> usize {
    match self {
      Self::UnassignedAdmins => 0,
      Self::Admins => 1,
      Self::Societies => 2,
      Self::Announcements => 3,
    }
  }
}

/// Cached value types.
#[derive(Debug, Clone)]
pub enum CacheValue {
  Users(Arc<Vec<User>>),
  Societies(Arc<Vec<Society>>),
  Announcements(Arc<Vec<Announcement>>),
}

// ─── Registry ─────────────────────────────────────────────────────────────────

/// A cacheable read against the API.
pub trait Query {
  const KEY: QueryKey;
  type Output: Send + Sync + 'static;

  fn fetch<A: SocietyApi>(
    api: &A,
  ) -> impl Future<Output = Result<Self::Output, ClientError>> + Send + '_;

  fn wrap(value: Arc<Self::Output>) -> CacheValue;

  fn unwrap(value: CacheValue) -> Option<Arc<Self::Output>>;
}

/// A write against the API, and the cached collections it makes stale.
pub trait Mutation {
  const INVALIDATES: &'static [QueryKey];
}

pub mod queries {
  use super::*;

  pub struct UnassignedAdmins;
  pub struct Admins;
  pub struct Societies;
  pub struct Announcements;

  impl Query for UnassignedAdmins {
    const KEY: QueryKey = QueryKey::UnassignedAdmins;
    type Output = Vec<User>;

    fn fetch<A: SocietyApi>(
      api: &A,
    ) -> impl Future<Output = Result<Vec<User>, ClientError>> + Send + '_ {
      api.unassigned_admins()
    }

    fn wrap(value: Arc<Vec<User>>) -> CacheValue { CacheValue::Users(value) }

    fn unwrap(value: CacheValue) -> Option<Arc<Vec<User>>> {
      match value {
        CacheValue::Users(v) => Some(v),
        _ => None,
      }
    }
  }

  impl Query for Admins {
    const KEY: QueryKey = QueryKey::Admins;
    type Output = Vec<User>;

    fn fetch<A: SocietyApi>(
      api: &A,
    ) -> impl Future<Output = Result<Vec<User>, ClientError>> + Send + '_ {
      api.admins()
    }

    fn wrap(value: Arc<Vec<User>>) -> CacheValue { CacheValue::Users(value) }

    fn unwrap(value: CacheValue) -> Option<Arc<Vec<User>>> {
      match value {
        CacheValue::Users(v) => Some(v),
        _ => None,
      }
    }
  }

  impl Query for Societies {
    const KEY: QueryKey = QueryKey::Societies;
    type Output = Vec<Society>;

    fn fetch<A: SocietyApi>(
      api: &A,
    ) -> impl Future<Output = Result<Vec<Society>, ClientError>> + Send + '_ {
      api.societies()
    }

    fn wrap(value: Arc<Vec<Society>>) -> CacheValue { CacheValue::Societies(value) }

    fn unwrap(value: CacheValue) -> Option<Arc<Vec<Society>>> {
      match value {
        CacheValue::Societies(v) => Some(v),
        _ => None,
      }
    }
  }

  impl Query for Announcements {
    const KEY: QueryKey = QueryKey::Announcements;
    type Output = Vec<Announcement>;

    fn fetch<A: SocietyApi>(
      api: &A,
    ) -> impl Future<Output = Result<Vec<Announcement>, ClientError>> + Send + '_ {
      api.announcements()
    }

    fn wrap(value: Arc<Vec<Announcement>>) -> CacheValue {
      CacheValue::Announcements(value)
    }

    fn unwrap(value: CacheValue) -> Option<Arc<Vec<Announcement>>> {
      match value {
        CacheValue::Announcements(v) => Some(v),
        _ => None,
      }
    }
  }
}

pub mod mutations {
  use super::*;

  pub struct AssignAdmin;
  pub struct RemoveAdmin;
  pub struct PostAnnouncement;
  pub struct DeleteAnnouncement;

  impl Mutation for AssignAdmin {
    const INVALIDATES: &'static [QueryKey] =
      &[QueryKey::UnassignedAdmins, QueryKey::Societies];
  }

  impl Mutation for RemoveAdmin {
    const INVALIDATES: &'static [QueryKey] =
      &[QueryKey::UnassignedAdmins, QueryKey::Societies];
  }

  impl Mutation for PostAnnouncement {
    const INVALIDATES: &'static [QueryKey] = &[QueryKey::Announcements];
  }

  impl Mutation for DeleteAnnouncement {
    const INVALIDATES: &'static [QueryKey] = &[QueryKey::Announcements];
  }
}

// ─── QueryCache ───────────────────────────────────────────────────────────────

/// Shared cache of server-backed collections.
///
/// Cheap to clone; clones share entries. Every key carries a generation
/// counter that invalidation bumps, so a fetch that started before an
/// invalidation never leaves its stale result behind.
#[derive(Clone)]
pub struct QueryCache {
  entries:     Cache<QueryKey, CacheValue>,
  generations: Arc<[AtomicU64; 4]>,
}

impl Default for QueryCache {
  fn default() -> Self { Self::new(DEFAULT_TTL) }
}

impl QueryCache {
  pub fn new(ttl: Duration) -> Self {
    let entries = Cache::builder()
      .time_to_live(ttl)
      .build();
    Self {
      entries,
      generations: Arc::new(Default::default()),
    }
  }

  fn generation(&self, key: QueryKey) -> u64 {
    self.generations[key.index()].load(Ordering::Acquire)
  }

  /// Return the cached collection for `Q`, fetching it on a miss.
  pub async fn fetch<Q: Query, A: SocietyApi>(
    &self,
    api: &A,
  ) -> Result<Arc<Q::Output>, ClientError> {
    if let Some(hit) = self.peek::<Q>().await {
      tracing::debug!(key = ?Q::KEY, "cache hit");
      return Ok(hit);
    }

    let started = self.generation(Q::KEY);
    let value = Arc::new(Q::fetch(api).await?);
    tracing::debug!(key = ?Q::KEY, "cache fill");

    if self.generation(Q::KEY) == started {
      self.entries.insert(Q::KEY, Q::wrap(value.clone())).await;
      // an invalidation may have landed between the check and the insert
      if self.generation(Q::KEY) != started {
        self.entries.invalidate(&Q::KEY).await;
      }
    }
    Ok(value)
  }

  /// The cached collection for `Q`, without fetching.
  pub async fn peek<Q: Query>(&self) -> Option<Arc<Q::Output>> {
    self.entries.get(&Q::KEY).await.and_then(Q::unwrap)
  }

  /// Drop every key `M` declares.
  pub async fn invalidate_for<M: Mutation>(&self) {
    for key in M::INVALIDATES {
      self.invalidate(*key).await;
    }
  }

  pub async fn invalidate_all(&self) {
    for key in QueryKey::ALL {
      self.invalidate(key).await;
    }
  }

  async fn invalidate(&self, key: QueryKey) {
    self.generations[key.index()].fetch_add(1, Ordering::AcqRel);
    self.entries.invalidate(&key).await;
    tracing::debug!(?key, "invalidated");
  }
}
