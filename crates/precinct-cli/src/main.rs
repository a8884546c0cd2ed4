//! `precinct`: operator console for the Precinct society service.
//!
//! # Usage
//!
//! ```
//! precinct --url http://localhost:8080 --user operator --password secret
//! precinct --config ~/.config/precinct/config.toml
//! precinct add-admin Ada Lovelace ada@example.org
//! precinct add-society "Birchwood Court"
//! ```

mod app;
mod ui;

use std::{fs::File, io, path::PathBuf, sync::Mutex, time::Duration};

use anyhow::{Context, Result};
use app::{App, Message};
use clap::{Parser, Subcommand};
use crossterm::{
  event::{self, Event},
  execute,
  terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use precinct_client::{ApiClient, ApiConfig};
use precinct_core::user::NewUser;
use ratatui::{Terminal, backend::CrosstermBackend};
use serde::Deserialize;
use tokio::sync::mpsc;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "precinct", about = "Operator console for Precinct")]
struct Args {
  /// Path to a TOML config file (url, username, password).
  #[arg(short, long, value_name = "FILE")]
  config: Option<PathBuf>,

  /// Base URL of the precinct server (default: http://localhost:8080).
  #[arg(long, env = "PRECINCT_URL")]
  url: Option<String>,

  /// API username.
  #[arg(long, env = "PRECINCT_USER")]
  user: Option<String>,

  /// API password (plaintext).
  #[arg(long, env = "PRECINCT_PASSWORD")]
  password: Option<String>,

  /// Write logs to this file. The console owns the terminal, so nothing is
  /// logged without it.
  #[arg(long, value_name = "FILE")]
  log_file: Option<PathBuf>,

  #[command(subcommand)]
  command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Register a user with admin privileges.
  AddAdmin {
    first_name: String,
    last_name:  String,
    email:      String,
  },
  /// Create a society with no admin.
  AddSociety { name: String },
}

// ─── Config file ──────────────────────────────────────────────────────────────

/// Shape of the optional TOML config file.
#[derive(Deserialize, Default)]
struct ConfigFile {
  #[serde(default)]
  url:      String,
  #[serde(default)]
  username: String,
  #[serde(default)]
  password: String,
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  let args = Args::parse();

  if let Some(path) = &args.log_file {
    let file = File::create(path)
      .with_context(|| format!("creating log file {}", path.display()))?;
    tracing_subscriber::fmt()
      .with_env_filter(
        EnvFilter::builder()
          .with_default_directive(LevelFilter::INFO.into())
          .from_env_lossy(),
      )
      .with_ansi(false)
      .with_writer(Mutex::new(file))
      .init();
  }

  let file_cfg: ConfigFile = if let Some(path) = &args.config {
    let raw = std::fs::read_to_string(path)
      .with_context(|| format!("reading config file {}", path.display()))?;
    toml::from_str(&raw).context("parsing config file")?
  } else {
    ConfigFile::default()
  };

  // CLI flags override config file, which overrides defaults.
  let api_config = ApiConfig {
    base_url: args
      .url
      .or_else(|| (!file_cfg.url.is_empty()).then(|| file_cfg.url.clone()))
      .unwrap_or_else(|| "http://localhost:8080".to_string()),
    username: args
      .user
      .or_else(|| (!file_cfg.username.is_empty()).then(|| file_cfg.username.clone()))
      .unwrap_or_default(),
    password: args
      .password
      .or_else(|| (!file_cfg.password.is_empty()).then(|| file_cfg.password.clone()))
      .unwrap_or_default(),
  };

  let client = ApiClient::new(api_config)?;

  match args.command {
    Some(command) => run_command(&client, command).await,
    None => run_console(client).await,
  }
}

// ─── Provisioning ─────────────────────────────────────────────────────────────

async fn run_command(client: &ApiClient, command: Command) -> Result<()> {
  match command {
    Command::AddAdmin { first_name, last_name, email } => {
      let user = client
        .create_user(&NewUser::admin(first_name, last_name, email))
        .await
        .context("creating admin")?;
      println!("{}  {} <{}>", user.user_id, user.display_name(), user.email);
    }
    Command::AddSociety { name } => {
      let society = client
        .create_society(&name)
        .await
        .context("creating society")?;
      println!("{}  {}", society.society_id, society.name);
    }
  }
  Ok(())
}

// ─── Console ──────────────────────────────────────────────────────────────────

async fn run_console(client: ApiClient) -> Result<()> {
  let (tx, rx) = mpsc::unbounded_channel();
  let mut app = App::new(client, tx);
  app.refresh();

  // Set up the terminal.
  enable_raw_mode().context("enabling raw mode")?;
  let mut stdout = io::stdout();
  execute!(stdout, EnterAlternateScreen).context("entering alternate screen")?;
  let backend = CrosstermBackend::new(stdout);
  let mut terminal = Terminal::new(backend).context("creating terminal")?;

  let run_result = run_event_loop(&mut terminal, &mut app, rx).await;

  // Restore terminal regardless of result.
  disable_raw_mode().ok();
  execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
  terminal.show_cursor().ok();

  run_result
}

// ─── Event loop ───────────────────────────────────────────────────────────────

async fn run_event_loop(
  terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
  app: &mut App,
  mut rx: mpsc::UnboundedReceiver<Message>,
) -> Result<()> {
  loop {
    terminal.draw(|f| ui::draw(f, app)).context("drawing frame")?;

    // Results of finished requests.
    while let Ok(message) = rx.try_recv() {
      app.handle_message(message).await;
    }

    // Poll for an event, yielding control to tokio while waiting.
    let maybe_event = tokio::task::block_in_place(|| {
      if event::poll(Duration::from_millis(50))? {
        Ok::<_, io::Error>(Some(event::read()?))
      } else {
        Ok(None)
      }
    })?;

    if let Some(Event::Key(key)) = maybe_event
      && !app.handle_key(key)
    {
      break;
    }
  }

  Ok(())
}
