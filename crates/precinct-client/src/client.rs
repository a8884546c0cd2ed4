//! Async HTTP client wrapping the Precinct JSON API.

use std::time::Duration;

use precinct_core::{
  announcement::{Announcement, NewAnnouncement},
  society::{AssignAdmin, NewSociety, Society},
  user::{NewUser, User},
};
use reqwest::{Client, RequestBuilder, Response};
use serde::{Deserialize, de::DeserializeOwned};
use uuid::Uuid;

use crate::{api::SocietyApi, error::ClientError};

/// Connection settings for the Precinct API.
#[derive(Debug, Clone)]
pub struct ApiConfig {
  pub base_url: String,
  pub username: String,
  pub password: String,
}

/// Async HTTP client for the Precinct JSON REST API.
///
/// Cheap to clone; the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct ApiClient {
  client: Client,
  config: ApiConfig,
}

/// The error body every non-success response carries.
#[derive(Deserialize)]
struct ErrorBody {
  message: String,
}

impl ApiClient {
  pub fn new(config: ApiConfig) -> Result<Self, ClientError> {
    let client = Client::builder().timeout(Duration::from_secs(30)).build()?;
    Ok(Self { client, config })
  }

  pub fn base_url(&self) -> &str { &self.config.base_url }

  fn url(&self, path: &str) -> String {
    format!(
      "{}/api{}",
      self.config.base_url.trim_end_matches('/'),
      path
    )
  }

  fn auth(&self, req: RequestBuilder) -> RequestBuilder {
    if self.config.username.is_empty() {
      req
    } else {
      req.basic_auth(&self.config.username, Some(&self.config.password))
    }
  }

  /// Send `req` and turn a non-success status into [`ClientError::Api`].
  async fn send(&self, req: RequestBuilder) -> Result<Response, ClientError> {
    let resp = self.auth(req).send().await?;
    let status = resp.status();
    if status.is_success() {
      return Ok(resp);
    }

    let text = resp.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&text)
      .ok()
      .map(|b| b.message)
      .filter(|m| !m.is_empty())
      .or_else(|| {
        let trimmed = text.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
      })
      .unwrap_or_else(|| {
        status
          .canonical_reason()
          .unwrap_or("request failed")
          .to_string()
      });
    tracing::debug!(%status, %message, "API call rejected");
    Err(ClientError::Api { status, message })
  }

  async fn send_json<T: DeserializeOwned>(&self, req: RequestBuilder) -> Result<T, ClientError> {
    Ok(self.send(req).await?.json().await?)
  }

  // ── Provisioning ──────────────────────────────────────────────────────────

  /// `POST /api/users`
  pub async fn create_user(&self, input: &NewUser) -> Result<User, ClientError> {
    self
      .send_json(self.client.post(self.url("/users")).json(input))
      .await
  }

  /// `POST /api/societies`
  pub async fn create_society(&self, name: &str) -> Result<Society, ClientError> {
    let body = NewSociety { name: name.to_string() };
    self
      .send_json(self.client.post(self.url("/societies")).json(&body))
      .await
  }
}

impl SocietyApi for ApiClient {
  async fn unassigned_admins(&self) -> Result<Vec<User>, ClientError> {
    self
      .send_json(self.client.get(self.url("/admins/unassigned")))
      .await
  }

  async fn admins(&self) -> Result<Vec<User>, ClientError> {
    self.send_json(self.client.get(self.url("/admins"))).await
  }

  async fn societies(&self) -> Result<Vec<Society>, ClientError> {
    self.send_json(self.client.get(self.url("/societies"))).await
  }

  async fn assign_admin(&self, society_id: Uuid, admin_id: Uuid) -> Result<Society, ClientError> {
    let url = self.url(&format!("/societies/{society_id}/assign-admin"));
    self
      .send_json(self.client.post(url).json(&AssignAdmin { admin_id }))
      .await
  }

  async fn remove_admin(&self, society_id: Uuid) -> Result<Society, ClientError> {
    let url = self.url(&format!("/societies/{society_id}/admin"));
    self.send_json(self.client.delete(url)).await
  }

  async fn announcements(&self) -> Result<Vec<Announcement>, ClientError> {
    self.send_json(self.client.get(self.url("/announcements"))).await
  }

  async fn post_announcement(&self, input: NewAnnouncement) -> Result<Announcement, ClientError> {
    self
      .send_json(self.client.post(self.url("/announcements")).json(&input))
      .await
  }

  async fn delete_announcement(&self, id: Uuid) -> Result<(), ClientError> {
    let url = self.url(&format!("/announcements/{id}"));
    self.send(self.client.delete(url)).await?;
    Ok(())
  }
}
