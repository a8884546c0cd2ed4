//! End-to-end tests: the real client against the real API over loopback HTTP.

use std::sync::Arc;

use axum::Router;
use precinct_core::{
  announcement::NewAnnouncement,
  user::{NewUser, Role},
};
use precinct_store_sqlite::SqliteStore;
use reqwest::StatusCode;
use tokio::net::TcpListener;
use uuid::Uuid;

use crate::{
  announcements::AnnouncementBoard,
  workflow::{AssignmentControls, AssignmentWorkflow},
  *,
};

async fn serve() -> ApiClient {
  let store = Arc::new(SqliteStore::open_in_memory().await.unwrap());
  let app = Router::new().nest("/api", precinct_api::api_router(store));
  let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
  let addr = listener.local_addr().unwrap();
  tokio::spawn(async move { axum::serve(listener, app).await });

  ApiClient::new(ApiConfig {
    base_url: format!("http://{addr}/"),
    username: String::new(),
    password: String::new(),
  })
  .unwrap()
}

#[tokio::test]
async fn assignment_round_trip_over_http() {
  let client = serve().await;
  let u1 = client
    .create_user(&NewUser::admin("Ada", "Lovelace", "ada@example.org"))
    .await
    .unwrap();
  let u2 = client
    .create_user(&NewUser::admin("Grace", "Hopper", "grace@example.org"))
    .await
    .unwrap();
  let s1 = client.create_society("Ashgrove").await.unwrap();
  let s2 = client.create_society("Birchwood").await.unwrap();
  let s3 = client.create_society("Cedar Row").await.unwrap();
  client.assign_admin(s2.society_id, u1.user_id).await.unwrap();

  let api = Arc::new(client);
  let mut wf = AssignmentWorkflow::new(api.clone(), QueryCache::default());
  let snap = wf.snapshot().await.unwrap();
  assert_eq!(snap.partitions.with_admin.len(), 1);
  assert_eq!(snap.unassigned.len(), 1);

  wf.select_admin(Some(u2.user_id));
  wf.select_society(Some(s3.society_id));
  wf.assign().await.unwrap();

  let snap = wf.snapshot().await.unwrap();
  let without: Vec<Uuid> = snap
    .partitions
    .without_admin
    .iter()
    .map(|s| s.society_id)
    .collect();
  assert_eq!(without, vec![s1.society_id]);
  assert_eq!(snap.controls, AssignmentControls::NoUnassignedAdmins);

  let s2 = snap
    .partitions
    .with_admin
    .iter()
    .find(|s| s.society_id == s2.society_id)
    .cloned()
    .unwrap();
  wf.remove(&s2).await.unwrap();

  let snap = wf.snapshot().await.unwrap();
  assert_eq!(snap.unassigned.len(), 1);
  assert_eq!(snap.unassigned[0].user_id, u1.user_id);
  assert_eq!(snap.partitions.without_admin.len(), 2);
}

#[tokio::test]
async fn server_conflict_message_reaches_the_operator() {
  let client = serve().await;
  let admin = client
    .create_user(&NewUser::admin("Ada", "Lovelace", "ada@example.org"))
    .await
    .unwrap();
  let taken = client.create_society("Ashgrove").await.unwrap();
  let other = client.create_society("Birchwood").await.unwrap();
  client
    .assign_admin(taken.society_id, admin.user_id)
    .await
    .unwrap();

  let mut wf = AssignmentWorkflow::new(Arc::new(client), QueryCache::default());
  wf.select_admin(Some(admin.user_id));
  wf.select_society(Some(other.society_id));

  let err = wf.assign().await.unwrap_err();
  assert_eq!(
    err,
    WorkflowError::Conflict(format!(
      "admin {} is already assigned to society {}",
      admin.user_id, taken.society_id
    ))
  );
}

#[tokio::test]
async fn api_errors_carry_status_and_message() {
  let client = serve().await;
  let missing = Uuid::new_v4();

  let err = client.remove_admin(missing).await.unwrap_err();
  assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
  assert_eq!(err.to_string(), format!("society not found: {missing}"));

  let resident = client
    .create_user(&NewUser {
      first_name: "Rita".into(),
      last_name:  "Resident".into(),
      email:      "rita@example.org".into(),
      role:       Role::Resident,
    })
    .await
    .unwrap();
  let society = client.create_society("Ashgrove").await.unwrap();
  let err = client
    .assign_admin(society.society_id, resident.user_id)
    .await
    .unwrap_err();
  assert_eq!(err.status(), Some(StatusCode::BAD_REQUEST));
}

#[tokio::test]
async fn announcements_over_http() {
  let client = serve().await;
  let society = client.create_society("Ashgrove").await.unwrap();
  let mut board = AnnouncementBoard::new(Arc::new(client), QueryCache::default());

  board
    .post(NewAnnouncement {
      society_id: None,
      title:      "Welcome".into(),
      body:       String::new(),
    })
    .await
    .unwrap();
  let local = board
    .post(NewAnnouncement {
      society_id: Some(society.society_id),
      title:      "Lift maintenance".into(),
      body:       "Thursday morning.".into(),
    })
    .await
    .unwrap();

  let list = board.list().await.unwrap();
  assert_eq!(list.len(), 2);
  assert_eq!(list[0].announcement_id, local.announcement_id);

  board.delete(local.announcement_id).await.unwrap();
  assert_eq!(board.list().await.unwrap().len(), 1);
}
