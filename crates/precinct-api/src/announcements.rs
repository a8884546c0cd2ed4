//! Handlers for `/announcements` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/announcements` | Optional `?societyId=`; newest first |
//! | `POST`   | `/announcements` | Body: [`NewAnnouncement`]; returns 201 |
//! | `DELETE` | `/announcements/:id` | 204, or 404 if unknown |

use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use precinct_core::{
  announcement::{Announcement, NewAnnouncement},
  store::SocietyStore,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
  error::ApiError,
  extract::{ApiJson, ApiPath, ApiQuery},
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListParams {
  /// Restrict to one society (plus announcements addressed to all).
  pub society_id: Option<Uuid>,
}

/// `GET /announcements[?societyId=<id>]`
pub async fn list<S>(
  State(store): State<Arc<S>>,
  ApiQuery(params): ApiQuery<ListParams>,
) -> Result<Json<Vec<Announcement>>, ApiError>
where
  S: SocietyStore,
{
  let announcements = store
    .list_announcements(params.society_id)
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(announcements))
}

/// `POST /announcements` — body: `{"societyId":null,"title":"...","body":"..."}`
pub async fn create<S>(
  State(store): State<Arc<S>>,
  ApiJson(body): ApiJson<NewAnnouncement>,
) -> Result<impl IntoResponse, ApiError>
where
  S: SocietyStore,
{
  let announcement = store
    .post_announcement(body)
    .await
    .map_err(ApiError::from_store)?;
  Ok((StatusCode::CREATED, Json(announcement)))
}

/// `DELETE /announcements/:id`
pub async fn delete_one<S>(
  State(store): State<Arc<S>>,
  ApiPath(id): ApiPath<Uuid>,
) -> Result<StatusCode, ApiError>
where
  S: SocietyStore,
{
  store
    .delete_announcement(id)
    .await
    .map_err(ApiError::from_store)?;
  Ok(StatusCode::NO_CONTENT)
}
