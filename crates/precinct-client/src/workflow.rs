//! The admin-assignment workflow.
//!
//! A mutation is split in three so the console can keep its event loop
//! responsive: `begin_*` validates and marks the mutation pending, the
//! returned `Pending*` value performs the request (typically on a spawned
//! task), and `finish_*` clears the pending flag and applies the outcome.
//! The workflow never edits cached collections itself; success invalidates
//! the keys the mutation declares and the next read refetches.

use std::sync::Arc;

use precinct_core::{society::Society, user::User};
use uuid::Uuid;

use crate::{
  api::SocietyApi,
  cache::{
    QueryCache,
    mutations::{AssignAdmin, RemoveAdmin},
    queries,
  },
  error::{ClientError, MutationKind, WorkflowError},
};

// ─── Derived state ────────────────────────────────────────────────────────────

/// Societies split by whether an admin is assigned. Order follows the input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Partitions {
  pub with_admin:    Vec<Society>,
  pub without_admin: Vec<Society>,
}

pub fn partition(societies: &[Society]) -> Partitions {
  let (with_admin, without_admin) = societies
    .iter()
    .cloned()
    .partition(|s| s.has_admin());
  Partitions { with_admin, without_admin }
}

/// Whether the assignment controls can be offered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignmentControls {
  Ready,
  NoUnassignedAdmins,
  NoAdminlessSocieties,
}

impl AssignmentControls {
  /// The informational message shown in place of the controls.
  pub fn message(self) -> Option<&'static str> {
    match self {
      Self::Ready => None,
      Self::NoUnassignedAdmins => {
        Some("No unassigned admins: every admin is assigned to a society.")
      }
      Self::NoAdminlessSocieties => {
        Some("No admin-less societies: every society already has an admin.")
      }
    }
  }
}

pub fn controls(unassigned: &[User], without_admin: &[Society]) -> AssignmentControls {
  if unassigned.is_empty() {
    AssignmentControls::NoUnassignedAdmins
  } else if without_admin.is_empty() {
    AssignmentControls::NoAdminlessSocieties
  } else {
    AssignmentControls::Ready
  }
}

/// Everything the assignments screen renders, read through the cache.
#[derive(Debug, Clone)]
pub struct Snapshot {
  pub unassigned: Arc<Vec<User>>,
  pub partitions: Partitions,
  pub controls:   AssignmentControls,
}

/// Read both collections through `cache` and derive the partitions and
/// controls.
pub async fn load_snapshot<A: SocietyApi>(
  api: &A,
  cache: &QueryCache,
) -> Result<Snapshot, WorkflowError> {
  let (unassigned, societies) = tokio::try_join!(
    cache.fetch::<queries::UnassignedAdmins, _>(api),
    cache.fetch::<queries::Societies, _>(api),
  )?;
  let partitions = partition(&societies);
  let controls = controls(&unassigned, &partitions.without_admin);
  Ok(Snapshot { unassigned, partitions, controls })
}

// ─── In-flight requests ───────────────────────────────────────────────────────

/// An assignment that passed validation and is waiting to be sent.
pub struct PendingAssign<A> {
  api:        Arc<A>,
  society_id: Uuid,
  admin_id:   Uuid,
}

impl<A: SocietyApi> PendingAssign<A> {
  pub async fn run(self) -> Result<Society, ClientError> {
    self.api.assign_admin(self.society_id, self.admin_id).await
  }
}

/// A removal that passed validation and is waiting to be sent.
pub struct PendingRemove<A> {
  api:        Arc<A>,
  society_id: Uuid,
}

impl<A: SocietyApi> PendingRemove<A> {
  pub async fn run(self) -> Result<Society, ClientError> {
    self.api.remove_admin(self.society_id).await
  }
}

// ─── Workflow ─────────────────────────────────────────────────────────────────

/// Selection and pending state for one assignments screen.
pub struct AssignmentWorkflow<A> {
  api:              Arc<A>,
  cache:            QueryCache,
  selected_admin:   Option<Uuid>,
  selected_society: Option<Uuid>,
  assign_pending:   bool,
  remove_pending:   bool,
}

impl<A: SocietyApi> AssignmentWorkflow<A> {
  pub fn new(api: Arc<A>, cache: QueryCache) -> Self {
    Self {
      api,
      cache,
      selected_admin: None,
      selected_society: None,
      assign_pending: false,
      remove_pending: false,
    }
  }

  pub async fn snapshot(&self) -> Result<Snapshot, WorkflowError> {
    load_snapshot(&*self.api, &self.cache).await
  }

  pub fn select_admin(&mut self, admin_id: Option<Uuid>) { self.selected_admin = admin_id; }

  pub fn select_society(&mut self, society_id: Option<Uuid>) {
    self.selected_society = society_id;
  }

  pub fn selected_admin(&self) -> Option<Uuid> { self.selected_admin }

  pub fn selected_society(&self) -> Option<Uuid> { self.selected_society }

  /// Drop selections that are no longer in the assignable partitions of
  /// `snapshot`.
  pub fn retain_selection(&mut self, snapshot: &Snapshot) {
    if let Some(admin_id) = self.selected_admin
      && !snapshot.unassigned.iter().any(|u| u.user_id == admin_id)
    {
      self.selected_admin = None;
    }
    if let Some(society_id) = self.selected_society
      && !snapshot
        .partitions
        .without_admin
        .iter()
        .any(|s| s.society_id == society_id)
    {
      self.selected_society = None;
    }
  }

  pub fn is_assign_pending(&self) -> bool { self.assign_pending }

  pub fn is_remove_pending(&self) -> bool { self.remove_pending }

  // ── Assign ────────────────────────────────────────────────────────────────

  pub fn begin_assign(&mut self) -> Result<PendingAssign<A>, WorkflowError> {
    if self.assign_pending {
      return Err(WorkflowError::Pending(MutationKind::Assign));
    }
    let (Some(admin_id), Some(society_id)) = (self.selected_admin, self.selected_society)
    else {
      return Err(WorkflowError::Validation(
        "selection required: choose an admin and a society".into(),
      ));
    };

    self.assign_pending = true;
    Ok(PendingAssign {
      api: self.api.clone(),
      society_id,
      admin_id,
    })
  }

  pub async fn finish_assign(
    &mut self,
    outcome: Result<Society, ClientError>,
  ) -> Result<Society, WorkflowError> {
    self.assign_pending = false;
    let society = outcome.inspect_err(|e| {
      tracing::debug!(error = %e, "assignment rejected");
    })?;

    tracing::info!(society = %society.society_id, admin = ?society.admin_id, "admin assigned");
    self.selected_admin = None;
    self.selected_society = None;
    self.cache.invalidate_for::<AssignAdmin>().await;
    Ok(society)
  }

  /// Assign the selected admin to the selected society.
  pub async fn assign(&mut self) -> Result<Society, WorkflowError> {
    let pending = self.begin_assign()?;
    let outcome = pending.run().await;
    self.finish_assign(outcome).await
  }

  // ── Remove ────────────────────────────────────────────────────────────────

  pub fn begin_remove(&mut self, society: &Society) -> Result<PendingRemove<A>, WorkflowError> {
    if self.remove_pending {
      return Err(WorkflowError::Pending(MutationKind::Remove));
    }
    if !society.has_admin() {
      return Err(WorkflowError::Validation(format!(
        "{} has no admin to remove",
        society.name
      )));
    }

    self.remove_pending = true;
    Ok(PendingRemove {
      api:        self.api.clone(),
      society_id: society.society_id,
    })
  }

  pub async fn finish_remove(
    &mut self,
    outcome: Result<Society, ClientError>,
  ) -> Result<Society, WorkflowError> {
    self.remove_pending = false;
    let society = outcome?;

    tracing::info!(society = %society.society_id, "admin removed");
    self.cache.invalidate_for::<RemoveAdmin>().await;
    Ok(society)
  }

  /// Clear the admin of `society`.
  pub async fn remove(&mut self, society: &Society) -> Result<Society, WorkflowError> {
    let pending = self.begin_remove(society)?;
    let outcome = pending.run().await;
    self.finish_remove(outcome).await
  }
}
