//! Posting and deleting announcements, with the same begin/run/finish split
//! as [`crate::workflow::AssignmentWorkflow`].

use std::sync::Arc;

use precinct_core::announcement::{Announcement, NewAnnouncement};
use uuid::Uuid;

use crate::{
  api::SocietyApi,
  cache::{
    QueryCache,
    mutations::{DeleteAnnouncement, PostAnnouncement},
    queries,
  },
  error::{ClientError, MutationKind, WorkflowError},
};

/// Every announcement, newest first, read through `cache`.
pub async fn load_announcements<A: SocietyApi>(
  api: &A,
  cache: &QueryCache,
) -> Result<Arc<Vec<Announcement>>, WorkflowError> {
  Ok(cache.fetch::<queries::Announcements, _>(api).await?)
}

pub struct PendingPost<A> {
  api:   Arc<A>,
  input: NewAnnouncement,
}

impl<A: SocietyApi> PendingPost<A> {
  pub async fn run(self) -> Result<Announcement, ClientError> {
    self.api.post_announcement(self.input).await
  }
}

pub struct PendingDelete<A> {
  api: Arc<A>,
  id:  Uuid,
}

impl<A: SocietyApi> PendingDelete<A> {
  pub async fn run(self) -> Result<(), ClientError> {
    self.api.delete_announcement(self.id).await
  }
}

pub struct AnnouncementBoard<A> {
  api:            Arc<A>,
  cache:          QueryCache,
  post_pending:   bool,
  delete_pending: bool,
}

impl<A: SocietyApi> AnnouncementBoard<A> {
  pub fn new(api: Arc<A>, cache: QueryCache) -> Self {
    Self {
      api,
      cache,
      post_pending: false,
      delete_pending: false,
    }
  }

  pub async fn list(&self) -> Result<Arc<Vec<Announcement>>, WorkflowError> {
    load_announcements(&*self.api, &self.cache).await
  }

  pub fn is_post_pending(&self) -> bool { self.post_pending }

  pub fn is_delete_pending(&self) -> bool { self.delete_pending }

  pub fn begin_post(&mut self, input: NewAnnouncement) -> Result<PendingPost<A>, WorkflowError> {
    if self.post_pending {
      return Err(WorkflowError::Pending(MutationKind::Post));
    }
    let input = input
      .validate()
      .map_err(|e| WorkflowError::Validation(e.to_string()))?;

    self.post_pending = true;
    Ok(PendingPost { api: self.api.clone(), input })
  }

  pub async fn finish_post(
    &mut self,
    outcome: Result<Announcement, ClientError>,
  ) -> Result<Announcement, WorkflowError> {
    self.post_pending = false;
    let announcement = outcome?;
    self.cache.invalidate_for::<PostAnnouncement>().await;
    Ok(announcement)
  }

  pub async fn post(&mut self, input: NewAnnouncement) -> Result<Announcement, WorkflowError> {
    let pending = self.begin_post(input)?;
    let outcome = pending.run().await;
    self.finish_post(outcome).await
  }

  pub fn begin_delete(&mut self, id: Uuid) -> Result<PendingDelete<A>, WorkflowError> {
    if self.delete_pending {
      return Err(WorkflowError::Pending(MutationKind::Delete));
    }
    self.delete_pending = true;
    Ok(PendingDelete { api: self.api.clone(), id })
  }

  pub async fn finish_delete(&mut self, outcome: Result<(), ClientError>) -> Result<(), WorkflowError> {
    self.delete_pending = false;
    outcome?;
    self.cache.invalidate_for::<DeleteAnnouncement>().await;
    Ok(())
  }

  pub async fn delete(&mut self, id: Uuid) -> Result<(), WorkflowError> {
    let pending = self.begin_delete(id)?;
    let outcome = pending.run().await;
    self.finish_delete(outcome).await
  }
}
