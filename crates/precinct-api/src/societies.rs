//! Handlers for `/societies` endpoints, including admin assignment.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/societies` | Ordered by name |
//! | `POST`   | `/societies` | Body: `{"name":"..."}` |
//! | `GET`    | `/societies/:id` | 404 if not found |
//! | `POST`   | `/societies/:id/assign-admin` | Body: `{"adminId":"..."}`; 409 on invariant violation |
//! | `DELETE` | `/societies/:id/admin` | 409 if no admin is assigned |

use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use precinct_core::{
  society::{AssignAdmin, NewSociety, Society},
  store::SocietyStore,
};
use uuid::Uuid;

use crate::{
  error::ApiError,
  extract::{ApiJson, ApiPath},
};

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /societies`
pub async fn list<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<Society>>, ApiError>
where
  S: SocietyStore,
{
  let societies = store.list_societies().await.map_err(ApiError::from_store)?;
  Ok(Json(societies))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /societies` — body: `{"name":"Maple Court"}`
pub async fn create<S>(
  State(store): State<Arc<S>>,
  ApiJson(body): ApiJson<NewSociety>,
) -> Result<impl IntoResponse, ApiError>
where
  S: SocietyStore,
{
  let society = store
    .add_society(body.name)
    .await
    .map_err(ApiError::from_store)?;
  Ok((StatusCode::CREATED, Json(society)))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /societies/:id`
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<Society>, ApiError>
where
  S: SocietyStore,
{
  let society = store
    .get_society(id)
    .await
    .map_err(ApiError::from_store)?
    .ok_or_else(|| ApiError::NotFound(format!("society not found: {id}")))?;
  Ok(Json(society))
}

// ─── Assignment ───────────────────────────────────────────────────────────────

/// `POST /societies/:id/assign-admin` — body: `{"adminId":"<uuid>"}`
pub async fn assign_admin<S>(
  State(store): State<Arc<S>>,
  ApiPath(society_id): ApiPath<Uuid>,
  ApiJson(body): ApiJson<AssignAdmin>,
) -> Result<Json<Society>, ApiError>
where
  S: SocietyStore,
{
  let society = store
    .assign_admin(society_id, body.admin_id)
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(society))
}

/// `DELETE /societies/:id/admin`
pub async fn remove_admin<S>(
  State(store): State<Arc<S>>,
  ApiPath(society_id): ApiPath<Uuid>,
) -> Result<Json<Society>, ApiError>
where
  S: SocietyStore,
{
  let society = store
    .remove_admin(society_id)
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(society))
}
