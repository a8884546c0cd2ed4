//! Application state machine and event dispatcher.
//!
//! Key handling never waits on the network: mutations and reloads run on
//! spawned tasks and report back as [`Message`]s, which the event loop feeds
//! to [`App::handle_message`].

use std::{fmt::Display, sync::Arc};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use fuzzy_matcher::{FuzzyMatcher, skim::SkimMatcherV2};
use precinct_client::{
  ApiClient, ClientError, QueryCache, WorkflowError,
  announcements::{self, AnnouncementBoard},
  cache::queries,
  workflow::{self, AssignmentControls, AssignmentWorkflow, Snapshot},
};
use precinct_core::{
  announcement::{Announcement, NewAnnouncement},
  society::Society,
  user::User,
};
use tokio::sync::mpsc::UnboundedSender;
use uuid::Uuid;

// ─── Screen ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
  Assignments,
  Announcements,
}

/// The panes of the assignments screen, left to right.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pane {
  Unassigned,
  Adminless,
  Assigned,
}

impl Pane {
  fn index(self) -> usize {
    match self {
      Self::Unassigned => 0,
      Self::Adminless => 1,
      Self::Assigned => 2,
    }
  }
}

/// What keystrokes currently mean.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
  Normal,
  /// Typing a society filter.
  Filter,
  ComposeTitle,
  ComposeBody,
}

/// A finished background request.
pub enum Message {
  Snapshot(Result<Snapshot, WorkflowError>),
  Admins(Result<Arc<Vec<User>>, ClientError>),
  Announcements(Result<Arc<Vec<Announcement>>, WorkflowError>),
  Assigned(Result<Society, ClientError>),
  Removed(Result<Society, ClientError>),
  Posted(Result<Announcement, ClientError>),
  Deleted(Result<(), ClientError>),
}

/// An announcement being composed.
#[derive(Debug, Default, Clone)]
pub struct Draft {
  pub title:      String,
  pub body:       String,
  /// `None` addresses every society.
  pub society_id: Option<Uuid>,
}

// ─── App ──────────────────────────────────────────────────────────────────────

/// Top-level application state.
pub struct App {
  pub screen: Screen,
  pub pane:   Pane,
  pub mode:   Mode,

  /// Latest assignment data; `None` until the first load finishes.
  pub snapshot: Option<Snapshot>,

  /// Every admin, for naming the admin of an assigned society.
  pub admins: Arc<Vec<User>>,

  /// Announcements, newest first.
  pub announcements: Arc<Vec<Announcement>>,

  /// Cursor per assignments pane, indexed by [`Pane`].
  pub cursors: [usize; 3],

  pub announcement_cursor: usize,

  /// Fuzzy filter over both society panes.
  pub filter: String,

  pub draft: Draft,

  /// Error waiting to be dismissed with Esc.
  pub notification: Option<String>,

  /// One-line status message shown in the status bar.
  pub status_msg: String,

  pub workflow: AssignmentWorkflow<ApiClient>,
  pub board:    AnnouncementBoard<ApiClient>,

  api:   Arc<ApiClient>,
  cache: QueryCache,
  tx:    UnboundedSender<Message>,
}

impl App {
  pub fn new(client: ApiClient, tx: UnboundedSender<Message>) -> Self {
    let api = Arc::new(client);
    let cache = QueryCache::default();
    Self {
      screen: Screen::Assignments,
      pane: Pane::Unassigned,
      mode: Mode::Normal,
      snapshot: None,
      admins: Arc::default(),
      announcements: Arc::default(),
      cursors: [0; 3],
      announcement_cursor: 0,
      filter: String::new(),
      draft: Draft::default(),
      notification: None,
      status_msg: "Loading…".into(),
      workflow: AssignmentWorkflow::new(api.clone(), cache.clone()),
      board: AnnouncementBoard::new(api.clone(), cache.clone()),
      api,
      cache,
      tx,
    }
  }

  // ── Data loading ──────────────────────────────────────────────────────────

  /// Reload every collection through the cache; only stale keys hit the
  /// network.
  pub fn refresh(&self) { self.spawn_load(false); }

  /// Drop the whole cache and reload.
  fn reload(&self) { self.spawn_load(true); }

  fn spawn_load(&self, force: bool) {
    let (api, cache, tx) = (self.api.clone(), self.cache.clone(), self.tx.clone());
    tokio::spawn(async move {
      if force {
        cache.invalidate_all().await;
      }
      let snapshot = workflow::load_snapshot(&*api, &cache).await;
      tx.send(Message::Snapshot(snapshot)).ok();
      let admins = cache.fetch::<queries::Admins, _>(&*api).await;
      tx.send(Message::Admins(admins)).ok();
      let list = announcements::load_announcements(&*api, &cache).await;
      tx.send(Message::Announcements(list)).ok();
    });
  }

  pub async fn handle_message(&mut self, message: Message) {
    match message {
      Message::Snapshot(Ok(snapshot)) => {
        self.workflow.retain_selection(&snapshot);
        self.snapshot = Some(snapshot);
        self.status_msg.clear();
        self.clamp_cursors();
      }
      Message::Admins(Ok(admins)) => self.admins = admins,
      Message::Announcements(Ok(list)) => {
        self.announcements = list;
        self.announcement_cursor = self
          .announcement_cursor
          .min(self.announcements.len().saturating_sub(1));
      }
      Message::Snapshot(Err(e)) | Message::Announcements(Err(e)) => self.notify(e),
      Message::Admins(Err(e)) => self.notify(e),

      Message::Assigned(outcome) => match self.workflow.finish_assign(outcome).await {
        Ok(society) => {
          self.status_msg = format!(
            "Assigned {} to {}",
            self.admin_name(society.admin_id),
            society.name
          );
          self.refresh();
        }
        Err(e) => self.notify(e),
      },
      Message::Removed(outcome) => match self.workflow.finish_remove(outcome).await {
        Ok(society) => {
          self.status_msg = format!("Removed the admin of {}", society.name);
          self.refresh();
        }
        Err(e) => self.notify(e),
      },
      Message::Posted(outcome) => match self.board.finish_post(outcome).await {
        Ok(announcement) => {
          self.status_msg = format!("Posted \"{}\"", announcement.title);
          self.draft = Draft::default();
          self.announcement_cursor = 0;
          self.refresh();
        }
        Err(e) => self.notify(e),
      },
      Message::Deleted(outcome) => match self.board.finish_delete(outcome).await {
        Ok(()) => {
          self.status_msg = "Announcement deleted".into();
          self.refresh();
        }
        Err(e) => self.notify(e),
      },
    }
  }

  fn notify(&mut self, error: impl Display) {
    let message = error.to_string();
    tracing::warn!(%message, "operation failed");
    self.status_msg.clear();
    self.notification = Some(message);
  }

  // ── Views ─────────────────────────────────────────────────────────────────

  pub fn controls(&self) -> AssignmentControls {
    self
      .snapshot
      .as_ref()
      .map_or(AssignmentControls::Ready, |s| s.controls)
  }

  pub fn unassigned(&self) -> &[User] {
    self
      .snapshot
      .as_ref()
      .map(|s| s.unassigned.as_slice())
      .unwrap_or_default()
  }

  /// Societies shown in `pane`, narrowed by the filter.
  pub fn societies(&self, pane: Pane) -> Vec<&Society> {
    let Some(snapshot) = &self.snapshot else {
      return Vec::new();
    };
    let list = match pane {
      Pane::Unassigned => return Vec::new(),
      Pane::Adminless => &snapshot.partitions.without_admin,
      Pane::Assigned => &snapshot.partitions.with_admin,
    };
    if self.filter.is_empty() {
      return list.iter().collect();
    }
    let matcher = SkimMatcherV2::default();
    list
      .iter()
      .filter(|s| matcher.fuzzy_match(&s.name, &self.filter).is_some())
      .collect()
  }

  /// Every society, ordered by name.
  pub fn all_societies(&self) -> Vec<&Society> {
    let Some(snapshot) = &self.snapshot else {
      return Vec::new();
    };
    let mut all: Vec<&Society> = snapshot
      .partitions
      .with_admin
      .iter()
      .chain(&snapshot.partitions.without_admin)
      .collect();
    all.sort_by(|a, b| a.name.cmp(&b.name));
    all
  }

  pub fn admin_name(&self, admin_id: Option<Uuid>) -> String {
    admin_id
      .and_then(|id| {
        self
          .admins
          .iter()
          .chain(self.unassigned())
          .find(|u| u.user_id == id)
      })
      .map(User::display_name)
      .unwrap_or_else(|| "(unknown admin)".into())
  }

  pub fn society_name(&self, society_id: Option<Uuid>) -> String {
    match society_id {
      None => "all societies".into(),
      Some(id) => self
        .all_societies()
        .into_iter()
        .find(|s| s.society_id == id)
        .map(|s| s.name.clone())
        .unwrap_or_else(|| id.to_string()),
    }
  }

  pub fn cursor(&self, pane: Pane) -> usize { self.cursors[pane.index()] }

  fn pane_len(&self, pane: Pane) -> usize {
    match pane {
      Pane::Unassigned => self.unassigned().len(),
      _ => self.societies(pane).len(),
    }
  }

  /// Panes that can take focus. Degenerate states hide the first two.
  fn focusable(&self) -> &'static [Pane] {
    match self.controls() {
      AssignmentControls::Ready => &[Pane::Unassigned, Pane::Adminless, Pane::Assigned],
      _ => &[Pane::Assigned],
    }
  }

  fn clamp_cursors(&mut self) {
    for pane in [Pane::Unassigned, Pane::Adminless, Pane::Assigned] {
      let len = self.pane_len(pane);
      let cursor = &mut self.cursors[pane.index()];
      *cursor = (*cursor).min(len.saturating_sub(1));
    }
    if !self.focusable().contains(&self.pane) {
      self.pane = Pane::Assigned;
    }
  }

  // ── Key handling ──────────────────────────────────────────────────────────

  /// Process a key event. Returns `true` to continue, `false` to quit.
  pub fn handle_key(&mut self, key: KeyEvent) -> bool {
    // Global: Ctrl-C quits from anywhere.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
      return false;
    }

    match self.mode {
      Mode::Filter => self.handle_filter_key(key),
      Mode::ComposeTitle | Mode::ComposeBody => self.handle_compose_key(key),
      Mode::Normal => self.handle_normal_key(key),
    }
  }

  fn handle_normal_key(&mut self, key: KeyEvent) -> bool {
    match key.code {
      KeyCode::Char('q') => return false,
      KeyCode::Esc => {
        if self.notification.take().is_none() {
          self.filter.clear();
          self.clamp_cursors();
        }
      }
      KeyCode::Char('1') => self.screen = Screen::Assignments,
      KeyCode::Char('2') => self.screen = Screen::Announcements,
      KeyCode::F(5) => {
        self.status_msg = "Reloading…".into();
        self.reload();
      }
      _ => match self.screen {
        Screen::Assignments => self.handle_assignments_key(key),
        Screen::Announcements => self.handle_announcements_key(key),
      },
    }
    true
  }

  fn handle_filter_key(&mut self, key: KeyEvent) -> bool {
    match key.code {
      KeyCode::Esc => {
        self.mode = Mode::Normal;
        self.filter.clear();
      }
      KeyCode::Enter => self.mode = Mode::Normal,
      KeyCode::Backspace => {
        self.filter.pop();
      }
      KeyCode::Char(c) => self.filter.push(c),
      _ => {}
    }
    self.cursors[Pane::Adminless.index()] = 0;
    self.cursors[Pane::Assigned.index()] = 0;
    true
  }

  fn handle_assignments_key(&mut self, key: KeyEvent) {
    match key.code {
      KeyCode::Tab | KeyCode::Right | KeyCode::Char('l') => self.cycle_pane(1),
      KeyCode::BackTab | KeyCode::Left | KeyCode::Char('h') => self.cycle_pane(-1),

      KeyCode::Down | KeyCode::Char('j') => {
        let len = self.pane_len(self.pane);
        let cursor = &mut self.cursors[self.pane.index()];
        if *cursor + 1 < len {
          *cursor += 1;
        }
      }
      KeyCode::Up | KeyCode::Char('k') => {
        let cursor = &mut self.cursors[self.pane.index()];
        *cursor = cursor.saturating_sub(1);
      }

      KeyCode::Char(' ') | KeyCode::Enter => self.toggle_selection(),
      KeyCode::Char('a') => self.submit_assign(),
      KeyCode::Char('r') if self.pane == Pane::Assigned => self.submit_remove(),
      KeyCode::Char('/') => {
        self.mode = Mode::Filter;
        self.filter.clear();
      }
      _ => {}
    }
  }

  fn cycle_pane(&mut self, step: isize) {
    let panes = self.focusable();
    let at = panes.iter().position(|p| *p == self.pane).unwrap_or(0);
    let next = (at as isize + step).rem_euclid(panes.len() as isize) as usize;
    self.pane = panes[next];
  }

  fn toggle_selection(&mut self) {
    let cursor = self.cursor(self.pane);
    match self.pane {
      Pane::Unassigned => {
        let Some(id) = self.unassigned().get(cursor).map(|u| u.user_id) else {
          return;
        };
        let next = (self.workflow.selected_admin() != Some(id)).then_some(id);
        self.workflow.select_admin(next);
      }
      Pane::Adminless => {
        let Some(id) = self
          .societies(Pane::Adminless)
          .get(cursor)
          .map(|s| s.society_id)
        else {
          return;
        };
        let next = (self.workflow.selected_society() != Some(id)).then_some(id);
        self.workflow.select_society(next);
      }
      Pane::Assigned => {}
    }
  }

  fn submit_assign(&mut self) {
    if self.workflow.is_assign_pending() || self.controls() != AssignmentControls::Ready {
      return;
    }
    match self.workflow.begin_assign() {
      Ok(pending) => {
        self.status_msg = "Assigning…".into();
        let tx = self.tx.clone();
        tokio::spawn(async move {
          tx.send(Message::Assigned(pending.run().await)).ok();
        });
      }
      Err(e) => self.notify(e),
    }
  }

  fn submit_remove(&mut self) {
    if self.workflow.is_remove_pending() {
      return;
    }
    let Some(society) = self
      .societies(Pane::Assigned)
      .get(self.cursor(Pane::Assigned))
      .map(|s| (*s).clone())
    else {
      return;
    };
    match self.workflow.begin_remove(&society) {
      Ok(pending) => {
        self.status_msg = format!("Removing the admin of {}…", society.name);
        let tx = self.tx.clone();
        tokio::spawn(async move {
          tx.send(Message::Removed(pending.run().await)).ok();
        });
      }
      Err(e) => self.notify(e),
    }
  }

  fn handle_announcements_key(&mut self, key: KeyEvent) {
    match key.code {
      KeyCode::Down | KeyCode::Char('j') => {
        if self.announcement_cursor + 1 < self.announcements.len() {
          self.announcement_cursor += 1;
        }
      }
      KeyCode::Up | KeyCode::Char('k') => {
        self.announcement_cursor = self.announcement_cursor.saturating_sub(1);
      }
      // A draft survives a failed post so it can be resubmitted.
      KeyCode::Char('n') => self.mode = Mode::ComposeTitle,
      KeyCode::Char('d') => self.submit_delete(),
      _ => {}
    }
  }

  fn handle_compose_key(&mut self, key: KeyEvent) -> bool {
    match (self.mode, key.code) {
      (_, KeyCode::Esc) => {
        self.mode = Mode::Normal;
        self.draft = Draft::default();
      }
      (_, KeyCode::Tab) => self.cycle_target(),
      (Mode::ComposeTitle, KeyCode::Enter) => self.mode = Mode::ComposeBody,
      (Mode::ComposeBody, KeyCode::Enter) => self.submit_post(),
      (Mode::ComposeTitle, KeyCode::Backspace) => {
        self.draft.title.pop();
      }
      (Mode::ComposeBody, KeyCode::Backspace) => {
        self.draft.body.pop();
      }
      (Mode::ComposeTitle, KeyCode::Char(c)) => self.draft.title.push(c),
      (Mode::ComposeBody, KeyCode::Char(c)) => self.draft.body.push(c),
      _ => {}
    }
    true
  }

  /// Step the draft's target through "all societies" and then each society.
  fn cycle_target(&mut self) {
    let ids: Vec<Uuid> = self.all_societies().iter().map(|s| s.society_id).collect();
    self.draft.society_id = match self.draft.society_id {
      None => ids.first().copied(),
      Some(current) => ids
        .iter()
        .position(|id| *id == current)
        .and_then(|i| ids.get(i + 1))
        .copied(),
    };
  }

  fn submit_post(&mut self) {
    if self.board.is_post_pending() {
      return;
    }
    let input = NewAnnouncement {
      society_id: self.draft.society_id,
      title:      self.draft.title.clone(),
      body:       self.draft.body.clone(),
    };
    match self.board.begin_post(input) {
      Ok(pending) => {
        self.mode = Mode::Normal;
        self.status_msg = "Posting…".into();
        let tx = self.tx.clone();
        tokio::spawn(async move {
          tx.send(Message::Posted(pending.run().await)).ok();
        });
      }
      Err(e) => {
        self.mode = Mode::ComposeTitle;
        self.notify(e);
      }
    }
  }

  fn submit_delete(&mut self) {
    if self.board.is_delete_pending() {
      return;
    }
    let Some(id) = self
      .announcements
      .get(self.announcement_cursor)
      .map(|a| a.announcement_id)
    else {
      return;
    };
    match self.board.begin_delete(id) {
      Ok(pending) => {
        self.status_msg = "Deleting…".into();
        let tx = self.tx.clone();
        tokio::spawn(async move {
          tx.send(Message::Deleted(pending.run().await)).ok();
        });
      }
      Err(e) => self.notify(e),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  use chrono::Utc;
  use precinct_client::ApiConfig;
  use precinct_core::user::Role;
  use tokio::sync::mpsc;

  fn app() -> App {
    let client = ApiClient::new(ApiConfig {
      base_url: "http://127.0.0.1:9".into(),
      username: String::new(),
      password: String::new(),
    })
    .unwrap();
    let (tx, _rx) = mpsc::unbounded_channel();
    App::new(client, tx)
  }

  fn society(n: u128, name: &str, admin_id: Option<Uuid>) -> Society {
    Society {
      society_id: Uuid::from_u128(n),
      name: name.into(),
      admin_id,
      created_at: Utc::now(),
    }
  }

  fn admin(n: u128, first: &str) -> User {
    User {
      user_id: Uuid::from_u128(n),
      first_name: first.into(),
      last_name: "Admin".into(),
      email: format!("{}@example.org", first.to_lowercase()),
      role: Role::Admin,
      created_at: Utc::now(),
    }
  }

  fn loaded(unassigned: Vec<User>, societies: Vec<Society>) -> App {
    let mut app = app();
    let partitions = workflow::partition(&societies);
    let controls = workflow::controls(&unassigned, &partitions.without_admin);
    app.snapshot = Some(Snapshot {
      unassigned: Arc::new(unassigned),
      partitions,
      controls,
    });
    app.clamp_cursors();
    app
  }

  fn press(app: &mut App, code: KeyCode) -> bool {
    app.handle_key(KeyEvent::new(code, KeyModifiers::NONE))
  }

  #[test]
  fn assign_without_selection_shows_notification() {
    let mut app = app();
    press(&mut app, KeyCode::Char('a'));

    let note = app.notification.clone().unwrap();
    assert!(note.starts_with("selection required"));
    assert!(!app.workflow.is_assign_pending());

    press(&mut app, KeyCode::Esc);
    assert!(app.notification.is_none());
  }

  #[test]
  fn space_toggles_selection() {
    let mut app = loaded(vec![admin(1, "Grace")], vec![society(10, "Ashgrove", None)]);

    press(&mut app, KeyCode::Char(' '));
    assert_eq!(app.workflow.selected_admin(), Some(Uuid::from_u128(1)));
    press(&mut app, KeyCode::Char(' '));
    assert_eq!(app.workflow.selected_admin(), None);

    press(&mut app, KeyCode::Tab);
    assert_eq!(app.pane, Pane::Adminless);
    press(&mut app, KeyCode::Enter);
    assert_eq!(app.workflow.selected_society(), Some(Uuid::from_u128(10)));
  }

  #[test]
  fn filter_narrows_society_panes() {
    let mut app = loaded(vec![admin(1, "Grace")], vec![
      society(10, "Ashgrove", None),
      society(11, "Birchwood", None),
      society(12, "Birch Lane", Some(Uuid::from_u128(2))),
    ]);

    press(&mut app, KeyCode::Char('/'));
    for c in "birch".chars() {
      press(&mut app, KeyCode::Char(c));
    }
    press(&mut app, KeyCode::Enter);

    assert_eq!(app.mode, Mode::Normal);
    let names: Vec<&str> = app
      .societies(Pane::Adminless)
      .iter()
      .map(|s| s.name.as_str())
      .collect();
    assert_eq!(names, vec!["Birchwood"]);
    assert_eq!(app.societies(Pane::Assigned).len(), 1);
  }

  #[test]
  fn degenerate_state_limits_focus_to_assigned_pane() {
    let mut app = loaded(Vec::new(), vec![society(10, "Ashgrove", Some(Uuid::from_u128(1)))]);
    assert_eq!(app.controls(), AssignmentControls::NoUnassignedAdmins);
    assert_eq!(app.pane, Pane::Assigned);

    press(&mut app, KeyCode::Tab);
    assert_eq!(app.pane, Pane::Assigned);
  }

  #[test]
  fn assign_key_is_inert_while_controls_are_hidden() {
    let mut app = loaded(vec![admin(1, "Grace")], vec![society(10, "Ashgrove", None)]);
    press(&mut app, KeyCode::Char(' '));
    press(&mut app, KeyCode::Tab);
    press(&mut app, KeyCode::Char(' '));

    let societies = vec![society(10, "Ashgrove", None)];
    let partitions = workflow::partition(&societies);
    app.snapshot = Some(Snapshot {
      unassigned: Arc::default(),
      controls: workflow::controls(&[], &partitions.without_admin),
      partitions,
    });
    assert_eq!(app.controls(), AssignmentControls::NoUnassignedAdmins);

    press(&mut app, KeyCode::Char('a'));
    assert!(!app.workflow.is_assign_pending());
    assert!(app.notification.is_none());
    assert_eq!(app.status_msg, "Loading…");
  }

  #[tokio::test]
  async fn fresh_snapshot_drops_stale_selections() {
    let mut app = loaded(vec![admin(1, "Grace"), admin(2, "Ada")], vec![
      society(10, "Ashgrove", None),
      society(11, "Birchwood", None),
    ]);
    press(&mut app, KeyCode::Char(' '));
    press(&mut app, KeyCode::Tab);
    press(&mut app, KeyCode::Char(' '));
    assert_eq!(app.workflow.selected_admin(), Some(Uuid::from_u128(1)));
    assert_eq!(app.workflow.selected_society(), Some(Uuid::from_u128(10)));

    let societies = vec![
      society(10, "Ashgrove", Some(Uuid::from_u128(1))),
      society(11, "Birchwood", None),
    ];
    let unassigned = vec![admin(2, "Ada")];
    let partitions = workflow::partition(&societies);
    let controls = workflow::controls(&unassigned, &partitions.without_admin);
    app
      .handle_message(Message::Snapshot(Ok(Snapshot {
        unassigned: Arc::new(unassigned),
        partitions,
        controls,
      })))
      .await;

    assert_eq!(app.workflow.selected_admin(), None);
    assert_eq!(app.workflow.selected_society(), None);
  }

  #[test]
  fn compose_target_cycles_through_societies() {
    let mut app = loaded(vec![admin(1, "Grace")], vec![
      society(11, "Birchwood", None),
      society(10, "Ashgrove", None),
    ]);
    press(&mut app, KeyCode::Char('2'));
    press(&mut app, KeyCode::Char('n'));
    assert_eq!(app.mode, Mode::ComposeTitle);

    press(&mut app, KeyCode::Tab);
    assert_eq!(app.society_name(app.draft.society_id), "Ashgrove");
    press(&mut app, KeyCode::Tab);
    assert_eq!(app.society_name(app.draft.society_id), "Birchwood");
    press(&mut app, KeyCode::Tab);
    assert_eq!(app.draft.society_id, None);
  }

  #[test]
  fn blank_title_returns_to_title_entry() {
    let mut app = app();
    press(&mut app, KeyCode::Char('2'));
    press(&mut app, KeyCode::Char('n'));
    press(&mut app, KeyCode::Enter);
    press(&mut app, KeyCode::Enter);

    assert_eq!(app.mode, Mode::ComposeTitle);
    assert!(app.notification.is_some());
    assert!(!app.board.is_post_pending());
  }
}
