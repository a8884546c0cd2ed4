//! HTTP server wiring for Precinct.
//!
//! Nests [`precinct_api::api_router`] under `/api`, guards it with optional
//! HTTP Basic auth, and adds request tracing.

pub mod auth;

use std::{path::PathBuf, sync::Arc};

use axum::{Router, middleware, routing::get};
use precinct_core::store::SocietyStore;
use serde::Deserialize;
use tower_http::trace::TraceLayer;

use auth::AuthConfig;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `PRECINCT_*` environment variables.
#[derive(Deserialize, Clone, Debug)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:               String,
  #[serde(default = "default_port")]
  pub port:               u16,
  #[serde(default = "default_store_path")]
  pub store_path:         PathBuf,
  /// Both auth fields must be set to enable Basic auth.
  pub auth_username:      Option<String>,
  pub auth_password_hash: Option<String>,
}

fn default_host() -> String { "127.0.0.1".to_string() }

fn default_port() -> u16 { 8080 }

fn default_store_path() -> PathBuf { PathBuf::from("precinct.sqlite3") }

impl ServerConfig {
  pub fn auth(&self) -> Option<AuthConfig> {
    match (&self.auth_username, &self.auth_password_hash) {
      (Some(username), Some(password_hash)) => Some(AuthConfig {
        username:      username.clone(),
        password_hash: password_hash.clone(),
      }),
      _ => None,
    }
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the full application router.
///
/// `/health` is always open; everything under `/api` requires credentials
/// when `auth` is `Some`.
pub fn router<S>(store: Arc<S>, auth: Option<AuthConfig>) -> Router
where
  S: SocietyStore + 'static,
{
  let mut api = precinct_api::api_router(store);
  if let Some(auth) = auth {
    api = api.layer(middleware::from_fn_with_state(
      Arc::new(auth),
      auth::require_auth,
    ));
  }

  Router::new()
    .route("/health", get(|| async { "ok" }))
    .nest("/api", api)
    .layer(TraceLayer::new_for_http())
}

// ─── Integration tests ────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  use argon2::{Argon2, PasswordHasher, password_hash::SaltString};
  use axum::{
    body::Body,
    http::{Request, StatusCode, header},
  };
  use base64::Engine as _;
  use base64::engine::general_purpose::STANDARD as B64;
  use precinct_store_sqlite::SqliteStore;
  use rand_core::OsRng;
  use tower::ServiceExt as _;

  async fn app(password: Option<&str>) -> Router {
    let store = SqliteStore::open_in_memory().await.unwrap();
    let auth = password.map(|p| {
      let salt = SaltString::generate(&mut OsRng);
      AuthConfig {
        username:      "operator".to_string(),
        password_hash: Argon2::default()
          .hash_password(p.as_bytes(), &salt)
          .unwrap()
          .to_string(),
      }
    });
    router(Arc::new(store), auth)
  }

  fn get_req(uri: &str, auth: Option<(&str, &str)>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some((u, p)) = auth {
      builder = builder.header(
        header::AUTHORIZATION,
        format!("Basic {}", B64.encode(format!("{u}:{p}"))),
      );
    }
    builder.body(Body::empty()).unwrap()
  }

  #[tokio::test]
  async fn health_is_open() {
    let app = app(Some("secret")).await;
    let resp = app.oneshot(get_req("/health", None)).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
  }

  #[tokio::test]
  async fn api_requires_credentials_when_configured() {
    let app = app(Some("secret")).await;

    let resp = app
      .clone()
      .oneshot(get_req("/api/societies", None))
      .await
      .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert!(resp.headers().contains_key(header::WWW_AUTHENTICATE));

    let resp = app
      .oneshot(get_req("/api/societies", Some(("operator", "secret"))))
      .await
      .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
  }

  #[tokio::test]
  async fn api_is_open_without_auth_config() {
    let app = app(None).await;
    let resp = app
      .oneshot(get_req("/api/admins/unassigned", None))
      .await
      .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
  }

  #[test]
  fn auth_needs_both_fields() {
    let cfg = ServerConfig {
      host:               default_host(),
      port:               default_port(),
      store_path:         default_store_path(),
      auth_username:      Some("operator".into()),
      auth_password_hash: None,
    };
    assert!(cfg.auth().is_none());
  }
}
