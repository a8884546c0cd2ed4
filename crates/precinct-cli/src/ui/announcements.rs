//! Announcements screen: the list on the left, the selected announcement or
//! the compose form on the right.

use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{List, ListItem, ListState, Paragraph, Wrap},
};

use super::{cursor_style, pane_block};
use crate::app::{App, Mode};

pub fn draw(f: &mut Frame, area: Rect, app: &App) {
  let cols = Layout::default()
    .direction(Direction::Horizontal)
    .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
    .split(area);

  draw_list(f, cols[0], app);
  match app.mode {
    Mode::ComposeTitle | Mode::ComposeBody => draw_compose(f, cols[1], app),
    _ => draw_detail(f, cols[1], app),
  }
}

fn draw_list(f: &mut Frame, area: Rect, app: &App) {
  let items: Vec<ListItem> = app
    .announcements
    .iter()
    .map(|a| {
      ListItem::new(Line::from(vec![
        Span::styled(
          a.created_at.format("%Y-%m-%d  ").to_string(),
          Style::default().fg(Color::DarkGray),
        ),
        Span::raw(a.title.clone()),
      ]))
    })
    .collect();

  let title = format!(" Announcements ({}) ", app.announcements.len());
  let focused = app.mode == Mode::Normal;

  let mut state = ListState::default();
  state.select((!items.is_empty()).then_some(app.announcement_cursor));
  f.render_stateful_widget(
    List::new(items)
      .block(pane_block(title, focused))
      .highlight_style(cursor_style()),
    area,
    &mut state,
  );
}

fn draw_detail(f: &mut Frame, area: Rect, app: &App) {
  let block = pane_block(" Detail ".into(), false);
  let inner = block.inner(area);
  f.render_widget(block, area);

  let Some(a) = app.announcements.get(app.announcement_cursor) else {
    f.render_widget(
      Paragraph::new("No announcements. Press n to write one.")
        .style(Style::default().fg(Color::DarkGray)),
      inner,
    );
    return;
  };

  let lines = vec![
    Line::from(Span::styled(
      a.title.clone(),
      Style::default().add_modifier(Modifier::BOLD),
    )),
    Line::from(Span::styled(
      format!(
        "to {}  ·  {}",
        app.society_name(a.society_id),
        a.created_at.format("%Y-%m-%d %H:%M")
      ),
      Style::default().fg(Color::DarkGray),
    )),
    Line::from(""),
    Line::from(a.body.clone()),
  ];
  f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
}

fn draw_compose(f: &mut Frame, area: Rect, app: &App) {
  let block = pane_block(" New announcement ".into(), true);
  let inner = block.inner(area);
  f.render_widget(block, area);

  let field = |label: &'static str, value: &str, active: bool| {
    let cursor = if active { "_" } else { "" };
    let style = if active {
      Style::default().fg(Color::Yellow)
    } else {
      Style::default()
    };
    Line::from(vec![
      Span::styled(
        format!("{label:<8}"),
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
      ),
      Span::styled(format!("{value}{cursor}"), style),
    ])
  };

  let lines = vec![
    field("to", &app.society_name(app.draft.society_id), false),
    field("title", &app.draft.title, app.mode == Mode::ComposeTitle),
    field("body", &app.draft.body, app.mode == Mode::ComposeBody),
  ];
  f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
}
