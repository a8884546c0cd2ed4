//! Integration tests for `SqliteStore` against an in-memory database.

use precinct_core::{
  Error as CoreError, ErrorKind, StoreError as _,
  announcement::NewAnnouncement,
  store::SocietyStore,
  user::{NewUser, Role},
};
use uuid::Uuid;

use crate::{Error, SqliteStore};

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn admin(first: &str) -> NewUser {
  NewUser::admin(first, "Admin", format!("{}@example.com", first.to_lowercase()))
}

fn domain(err: &Error) -> &CoreError {
  err.domain().expect("expected a domain error")
}

// ─── Users ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn add_and_get_user() {
  let s = store().await;

  let user = s.add_user(admin("Uma")).await.unwrap();
  assert_eq!(user.role, Role::Admin);

  let fetched = s.get_user(user.user_id).await.unwrap().unwrap();
  assert_eq!(fetched, user);
}

#[tokio::test]
async fn get_user_missing_returns_none() {
  let s = store().await;
  assert!(s.get_user(Uuid::new_v4()).await.unwrap().is_none());
}

#[tokio::test]
async fn duplicate_email_is_a_conflict() {
  let s = store().await;
  s.add_user(admin("Uma")).await.unwrap();

  let err = s.add_user(admin("Uma")).await.unwrap_err();
  assert_eq!(domain(&err).kind(), ErrorKind::Conflict);
}

#[tokio::test]
async fn residents_are_not_listed_as_admins() {
  let s = store().await;
  s.add_user(admin("Uma")).await.unwrap();
  s.add_user(NewUser {
    first_name: "Rex".into(),
    last_name:  "Resident".into(),
    email:      "rex@example.com".into(),
    role:       Role::Resident,
  })
  .await
  .unwrap();

  let admins = s.list_admins().await.unwrap();
  assert_eq!(admins.len(), 1);
  assert_eq!(admins[0].first_name, "Uma");
  assert_eq!(s.list_unassigned_admins().await.unwrap().len(), 1);
}

// ─── Societies ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn societies_are_listed_by_name() {
  let s = store().await;
  s.add_society("Willow Heights".into()).await.unwrap();
  s.add_society("Birch Grove".into()).await.unwrap();

  let names: Vec<_> = s
    .list_societies()
    .await
    .unwrap()
    .into_iter()
    .map(|soc| soc.name)
    .collect();
  assert_eq!(names, ["Birch Grove", "Willow Heights"]);
}

#[tokio::test]
async fn blank_society_name_is_rejected() {
  let s = store().await;
  let err = s.add_society("   ".into()).await.unwrap_err();
  assert_eq!(domain(&err).kind(), ErrorKind::Invalid);
}

// ─── Assignment ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn assign_sets_admin_and_leaves_unassigned_pool() {
  let s = store().await;
  let society = s.add_society("Maple Court".into()).await.unwrap();
  let uma = s.add_user(admin("Uma")).await.unwrap();

  let updated = s.assign_admin(society.society_id, uma.user_id).await.unwrap();
  assert_eq!(updated.admin_id, Some(uma.user_id));

  let fetched = s.get_society(society.society_id).await.unwrap().unwrap();
  assert_eq!(fetched.admin_id, Some(uma.user_id));
  assert!(s.list_unassigned_admins().await.unwrap().is_empty());
  assert_eq!(s.list_admins().await.unwrap().len(), 1);
}

#[tokio::test]
async fn assign_to_society_with_admin_is_rejected() {
  let s = store().await;
  let society = s.add_society("Maple Court".into()).await.unwrap();
  let uma = s.add_user(admin("Uma")).await.unwrap();
  let vic = s.add_user(admin("Vic")).await.unwrap();
  s.assign_admin(society.society_id, uma.user_id).await.unwrap();

  let err = s.assign_admin(society.society_id, vic.user_id).await.unwrap_err();
  assert_eq!(
    domain(&err),
    &CoreError::SocietyHasAdmin { society: society.society_id, admin: uma.user_id }
  );

  // The losing admin stays in the pool; the society keeps its admin.
  let pool = s.list_unassigned_admins().await.unwrap();
  assert_eq!(pool.len(), 1);
  assert_eq!(pool[0].user_id, vic.user_id);
}

#[tokio::test]
async fn admin_cannot_administer_two_societies() {
  let s = store().await;
  let first = s.add_society("Maple Court".into()).await.unwrap();
  let second = s.add_society("Oak Row".into()).await.unwrap();
  let uma = s.add_user(admin("Uma")).await.unwrap();
  s.assign_admin(first.society_id, uma.user_id).await.unwrap();

  let err = s.assign_admin(second.society_id, uma.user_id).await.unwrap_err();
  assert_eq!(
    domain(&err),
    &CoreError::AdminAlreadyAssigned { admin: uma.user_id, society: first.society_id }
  );
  let second = s.get_society(second.society_id).await.unwrap().unwrap();
  assert!(second.admin_id.is_none());
}

#[tokio::test]
async fn assign_unknown_records_is_not_found() {
  let s = store().await;
  let society = s.add_society("Maple Court".into()).await.unwrap();
  let uma = s.add_user(admin("Uma")).await.unwrap();

  let err = s.assign_admin(Uuid::new_v4(), uma.user_id).await.unwrap_err();
  assert_eq!(domain(&err).kind(), ErrorKind::NotFound);

  let missing = Uuid::new_v4();
  let err = s.assign_admin(society.society_id, missing).await.unwrap_err();
  assert_eq!(domain(&err), &CoreError::UserNotFound(missing));
}

#[tokio::test]
async fn assign_resident_is_rejected() {
  let s = store().await;
  let society = s.add_society("Maple Court".into()).await.unwrap();
  let rex = s
    .add_user(NewUser {
      first_name: "Rex".into(),
      last_name:  "Resident".into(),
      email:      "rex@example.com".into(),
      role:       Role::Resident,
    })
    .await
    .unwrap();

  let err = s.assign_admin(society.society_id, rex.user_id).await.unwrap_err();
  assert_eq!(domain(&err), &CoreError::NotAnAdmin(rex.user_id));
}

#[tokio::test]
async fn concurrent_assignments_to_one_society_admit_one_winner() {
  let s = store().await;
  let society = s.add_society("Maple Court".into()).await.unwrap();
  let uma = s.add_user(admin("Uma")).await.unwrap();
  let vic = s.add_user(admin("Vic")).await.unwrap();

  let (a, b) = tokio::join!(
    s.assign_admin(society.society_id, uma.user_id),
    s.assign_admin(society.society_id, vic.user_id),
  );
  assert!(a.is_ok() ^ b.is_ok(), "exactly one assignment must win");
  assert_eq!(s.list_unassigned_admins().await.unwrap().len(), 1);
}

#[tokio::test]
async fn remove_clears_admin_and_returns_to_pool() {
  let s = store().await;
  let society = s.add_society("Maple Court".into()).await.unwrap();
  let uma = s.add_user(admin("Uma")).await.unwrap();
  s.assign_admin(society.society_id, uma.user_id).await.unwrap();

  let updated = s.remove_admin(society.society_id).await.unwrap();
  assert!(updated.admin_id.is_none());
  let pool = s.list_unassigned_admins().await.unwrap();
  assert_eq!(pool.len(), 1);
  assert_eq!(pool[0].user_id, uma.user_id);
}

#[tokio::test]
async fn remove_without_admin_is_a_conflict() {
  let s = store().await;
  let society = s.add_society("Maple Court".into()).await.unwrap();

  let err = s.remove_admin(society.society_id).await.unwrap_err();
  assert_eq!(domain(&err), &CoreError::NoAdminAssigned(society.society_id));

  let err = s.remove_admin(Uuid::new_v4()).await.unwrap_err();
  assert_eq!(domain(&err).kind(), ErrorKind::NotFound);
}

// ─── Announcements ───────────────────────────────────────────────────────────

fn notice(society_id: Option<Uuid>, title: &str) -> NewAnnouncement {
  NewAnnouncement {
    society_id,
    title: title.into(),
    body: String::new(),
  }
}

#[tokio::test]
async fn announcements_are_newest_first() {
  let s = store().await;
  s.post_announcement(notice(None, "first")).await.unwrap();
  s.post_announcement(notice(None, "second")).await.unwrap();
  s.post_announcement(notice(None, "third")).await.unwrap();

  let titles: Vec<_> = s
    .list_announcements(None)
    .await
    .unwrap()
    .into_iter()
    .map(|a| a.title)
    .collect();
  assert_eq!(titles, ["third", "second", "first"]);
}

#[tokio::test]
async fn society_filter_includes_broadcasts() {
  let s = store().await;
  let maple = s.add_society("Maple Court".into()).await.unwrap();
  let oak = s.add_society("Oak Row".into()).await.unwrap();
  s.post_announcement(notice(None, "everyone")).await.unwrap();
  s.post_announcement(notice(Some(maple.society_id), "maple only"))
    .await
    .unwrap();
  s.post_announcement(notice(Some(oak.society_id), "oak only"))
    .await
    .unwrap();

  let maple_titles: Vec<_> = s
    .list_announcements(Some(maple.society_id))
    .await
    .unwrap()
    .into_iter()
    .map(|a| a.title)
    .collect();
  assert_eq!(maple_titles, ["maple only", "everyone"]);
  assert_eq!(s.list_announcements(None).await.unwrap().len(), 3);
}

#[tokio::test]
async fn announcement_for_unknown_society_is_not_found() {
  let s = store().await;
  let err = s
    .post_announcement(notice(Some(Uuid::new_v4()), "hello"))
    .await
    .unwrap_err();
  assert_eq!(domain(&err).kind(), ErrorKind::NotFound);
}

#[tokio::test]
async fn delete_announcement() {
  let s = store().await;
  let a = s.post_announcement(notice(None, "gone soon")).await.unwrap();

  s.delete_announcement(a.announcement_id).await.unwrap();
  assert!(s.list_announcements(None).await.unwrap().is_empty());

  let err = s.delete_announcement(a.announcement_id).await.unwrap_err();
  assert_eq!(domain(&err), &CoreError::AnnouncementNotFound(a.announcement_id));
}
