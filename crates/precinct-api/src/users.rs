//! Handlers for `/admins` and `/users` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/admins` | Every user with the admin role |
//! | `GET`  | `/admins/unassigned` | Admins not bound to any society |
//! | `POST` | `/users` | Body: [`NewUser`]; returns 201 + stored user |
//! | `GET`  | `/users/:id` | 404 if not found |

use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use precinct_core::{
  store::SocietyStore,
  user::{NewUser, User},
};
use uuid::Uuid;

use crate::{
  error::ApiError,
  extract::{ApiJson, ApiPath},
};

/// `GET /admins`
pub async fn list_admins<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<User>>, ApiError>
where
  S: SocietyStore,
{
  let admins = store.list_admins().await.map_err(ApiError::from_store)?;
  Ok(Json(admins))
}

/// `GET /admins/unassigned`
pub async fn list_unassigned<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<User>>, ApiError>
where
  S: SocietyStore,
{
  let admins = store
    .list_unassigned_admins()
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(admins))
}

/// `POST /users` — body: `{"firstName":..,"lastName":..,"email":..,"role":"admin"}`
pub async fn create<S>(
  State(store): State<Arc<S>>,
  ApiJson(body): ApiJson<NewUser>,
) -> Result<impl IntoResponse, ApiError>
where
  S: SocietyStore,
{
  let user = store.add_user(body).await.map_err(ApiError::from_store)?;
  Ok((StatusCode::CREATED, Json(user)))
}

/// `GET /users/:id`
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<User>, ApiError>
where
  S: SocietyStore,
{
  let user = store
    .get_user(id)
    .await
    .map_err(ApiError::from_store)?
    .ok_or_else(|| ApiError::NotFound(format!("user not found: {id}")))?;
  Ok(Json(user))
}
