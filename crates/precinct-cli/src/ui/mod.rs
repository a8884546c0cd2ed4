//! TUI rendering for every screen.

pub mod announcements;
pub mod assignments;

use chrono::Local;
use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use crate::app::{App, Mode, Screen};

// ─── Root draw ────────────────────────────────────────────────────────────────

/// Main draw function called each frame.
pub fn draw(f: &mut Frame, app: &App) {
  let area = f.area();

  // Vertical stack: header, body, status bar.
  let rows = Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Length(1), // header
      Constraint::Min(0),    // body
      Constraint::Length(1), // status bar
    ])
    .split(area);

  draw_header(f, rows[0], app);
  match app.screen {
    Screen::Assignments => assignments::draw(f, rows[1], app),
    Screen::Announcements => announcements::draw(f, rows[1], app),
  }
  draw_status(f, rows[2], app);

  if let Some(message) = &app.notification {
    draw_notification(f, rows[1], message);
  }
}

/// Border style for a pane, brighter when it has focus.
pub(crate) fn pane_block(title: String, focused: bool) -> Block<'static> {
  let colour = if focused { Color::Cyan } else { Color::DarkGray };
  Block::default()
    .title(title)
    .borders(Borders::ALL)
    .border_style(Style::default().fg(colour))
}

pub(crate) fn cursor_style() -> Style {
  Style::default()
    .bg(Color::Blue)
    .fg(Color::White)
    .add_modifier(Modifier::BOLD)
}

// ─── Header ───────────────────────────────────────────────────────────────────

fn draw_header(f: &mut Frame, area: Rect, app: &App) {
  let date = Local::now().format("%Y-%m-%d").to_string();

  let tab = |label: &'static str, screen: Screen| {
    let style = if app.screen == screen {
      Style::default()
        .fg(Color::Black)
        .bg(Color::Cyan)
        .add_modifier(Modifier::BOLD)
    } else {
      Style::default().fg(Color::White)
    };
    Span::styled(label, style)
  };

  let left = vec![
    Span::styled(
      " precinct  ",
      Style::default()
        .fg(Color::White)
        .add_modifier(Modifier::BOLD),
    ),
    tab(" [1] assignments ", Screen::Assignments),
    Span::raw(" "),
    tab(" [2] announcements ", Screen::Announcements),
  ];
  let right = Span::styled(format!("{date} "), Style::default().fg(Color::DarkGray));

  let left_width: usize = left.iter().map(|s| s.content.chars().count()).sum();
  let pad = (area.width as usize)
    .saturating_sub(left_width)
    .saturating_sub(right.content.len());

  let mut spans = left;
  spans.push(Span::raw(" ".repeat(pad)));
  spans.push(right);

  let block = Block::default().style(Style::default().bg(Color::DarkGray));
  let inner = block.inner(area);
  f.render_widget(block, area);
  f.render_widget(Paragraph::new(Line::from(spans)), inner);
}

// ─── Status bar ───────────────────────────────────────────────────────────────

fn draw_status(f: &mut Frame, area: Rect, app: &App) {
  let (mode_label, hints) = match (app.mode, app.screen) {
    (Mode::Filter, _) => ("FILTER", "Type to filter societies  Enter keep  Esc clear"),
    (Mode::ComposeTitle, _) => ("TITLE", "Enter next  Tab target  Esc cancel"),
    (Mode::ComposeBody, _) => ("BODY", "Enter post  Tab target  Esc cancel"),
    (Mode::Normal, Screen::Assignments) => (
      "NORMAL",
      "Tab pane  ↑↓/jk move  Space select  a assign  r remove  / filter  F5 reload  q quit",
    ),
    (Mode::Normal, Screen::Announcements) => (
      "NORMAL",
      "↑↓/jk move  n new  d delete  F5 reload  q quit",
    ),
  };

  let status = if app.status_msg.is_empty() {
    hints.to_string()
  } else {
    app.status_msg.clone()
  };

  let mode_span = Span::styled(
    format!(" {mode_label} "),
    Style::default()
      .fg(Color::Black)
      .bg(Color::Cyan)
      .add_modifier(Modifier::BOLD),
  );
  let hint_span = Span::styled(format!("  {status}"), Style::default().fg(Color::DarkGray));

  f.render_widget(
    Paragraph::new(Line::from(vec![mode_span, hint_span])).style(Style::default().bg(Color::Black)),
    area,
  );
}

// ─── Notification ─────────────────────────────────────────────────────────────

fn draw_notification(f: &mut Frame, area: Rect, message: &str) {
  let width = area.width.saturating_sub(4).min(64);
  let height = area.height.min(5);
  let popup = Rect {
    x: area.x + (area.width.saturating_sub(width)) / 2,
    y: area.y + (area.height.saturating_sub(height)) / 2,
    width,
    height,
  };

  let block = Block::default()
    .title(" Error  [Esc] dismiss ")
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::Red));
  let inner = block.inner(popup);
  f.render_widget(Clear, popup);
  f.render_widget(block, popup);
  f.render_widget(
    Paragraph::new(message.to_string()).wrap(Wrap { trim: true }),
    inner,
  );
}
