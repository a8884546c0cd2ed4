//! Assignments screen: unassigned admins, admin-less societies, and
//! societies with an admin.

use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{List, ListItem, ListState, Paragraph, Wrap},
};

use super::{cursor_style, pane_block};
use crate::app::{App, Mode, Pane};

pub fn draw(f: &mut Frame, area: Rect, app: &App) {
  if app.snapshot.is_none() {
    f.render_widget(
      Paragraph::new("Loading…").style(Style::default().fg(Color::DarkGray)),
      area,
    );
    return;
  }

  match app.controls().message() {
    None => {
      let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
          Constraint::Percentage(30),
          Constraint::Percentage(30),
          Constraint::Percentage(40),
        ])
        .split(area);
      draw_unassigned(f, cols[0], app);
      draw_societies(f, cols[1], app, Pane::Adminless);
      draw_societies(f, cols[2], app, Pane::Assigned);
    }
    Some(message) => {
      let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);
      draw_degenerate(f, cols[0], message);
      draw_societies(f, cols[1], app, Pane::Assigned);
    }
  }
}

fn draw_degenerate(f: &mut Frame, area: Rect, message: &str) {
  let block = pane_block(" Assign ".into(), false);
  let inner = block.inner(area);
  f.render_widget(block, area);
  f.render_widget(
    Paragraph::new(vec![
      Line::from(""),
      Line::from(Span::styled(
        message.to_string(),
        Style::default().fg(Color::Yellow),
      )),
    ])
    .wrap(Wrap { trim: true }),
    inner,
  );
}

fn draw_unassigned(f: &mut Frame, area: Rect, app: &App) {
  let admins = app.unassigned();
  let selected = app.workflow.selected_admin();

  let items: Vec<ListItem> = admins
    .iter()
    .map(|u| {
      let marker = if selected == Some(u.user_id) { "● " } else { "  " };
      ListItem::new(Line::from(vec![
        Span::styled(marker, Style::default().fg(Color::Green)),
        Span::raw(u.display_name()),
        Span::styled(format!("  {}", u.email), Style::default().fg(Color::DarkGray)),
      ]))
    })
    .collect();

  let title = format!(" Unassigned admins ({}) ", admins.len());
  draw_list(f, area, app, Pane::Unassigned, title, items);
}

fn draw_societies(f: &mut Frame, area: Rect, app: &App, pane: Pane) {
  let societies = app.societies(pane);
  let selected = app.workflow.selected_society();

  let items: Vec<ListItem> = societies
    .iter()
    .map(|s| {
      let mut spans = Vec::with_capacity(3);
      if pane == Pane::Adminless {
        let marker = if selected == Some(s.society_id) { "● " } else { "  " };
        spans.push(Span::styled(marker, Style::default().fg(Color::Green)));
      }
      spans.push(Span::raw(s.name.clone()));
      if pane == Pane::Assigned {
        spans.push(Span::styled(
          format!("  {}", app.admin_name(s.admin_id)),
          Style::default().fg(Color::DarkGray),
        ));
      }
      ListItem::new(Line::from(spans))
    })
    .collect();

  let label = match pane {
    Pane::Adminless => "Without admin",
    _ => "With admin",
  };
  let title = if app.filter.is_empty() {
    format!(" {label} ({}) ", societies.len())
  } else {
    format!(" {label} ({}) /{} ", societies.len(), app.filter)
  };
  draw_list(f, area, app, pane, title, items);
}

fn draw_list(f: &mut Frame, area: Rect, app: &App, pane: Pane, title: String, items: Vec<ListItem>) {
  let focused = app.pane == pane && app.mode == Mode::Normal;
  let block = pane_block(title, focused);

  let mut state = ListState::default();
  state.select((!items.is_empty()).then(|| app.cursor(pane)));

  let highlight = if focused {
    cursor_style()
  } else {
    Style::default().add_modifier(Modifier::BOLD)
  };
  f.render_stateful_widget(
    List::new(items).block(block).highlight_style(highlight),
    area,
    &mut state,
  );
}
