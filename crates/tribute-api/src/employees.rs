//! Handlers for `/employees` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/employees` | Full roster in insertion order |
//! | `POST`   | `/employees` | Body: [`NewEmployee`]; returns 201 + stored employee |
//! | `GET`    | `/employees/{id}` | Single employee |
//! | `PUT`    | `/employees/{id}` | Body: [`NewEmployee`]; replaces every field |
//! | `DELETE` | `/employees/{id}` | 204 on success |

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use tribute_core::{
  employee::{Employee, NewEmployee},
  store::TributeStore,
};
use uuid::Uuid;

use crate::{ApiState, error::ApiError};

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /employees`
pub async fn list<S>(
  State(state): State<ApiState<S>>,
) -> Result<Json<Vec<Employee>>, ApiError>
where
  S: TributeStore,
{
  let employees = state.store.list_employees().await.map_err(ApiError::store)?;
  Ok(Json(employees))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /employees` — returns 201 + the stored [`Employee`].
pub async fn create<S>(
  State(state): State<ApiState<S>>,
  Json(body): Json<NewEmployee>,
) -> Result<impl IntoResponse, ApiError>
where
  S: TributeStore,
{
  validate(&body)?;
  let employee = state.store.add_employee(body).await.map_err(ApiError::store)?;
  tracing::info!(employee_id = %employee.employee_id, "employee added");
  Ok((StatusCode::CREATED, Json(employee)))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /employees/{id}`
pub async fn get_one<S>(
  State(state): State<ApiState<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<Employee>, ApiError>
where
  S: TributeStore,
{
  let employee = state
    .store
    .get_employee(id)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| not_found(id))?;
  Ok(Json(employee))
}

// ─── Update ───────────────────────────────────────────────────────────────────

/// `PUT /employees/{id}`
pub async fn update<S>(
  State(state): State<ApiState<S>>,
  Path(id): Path<Uuid>,
  Json(body): Json<NewEmployee>,
) -> Result<Json<Employee>, ApiError>
where
  S: TributeStore,
{
  validate(&body)?;
  let employee = state
    .store
    .update_employee(id, body)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| not_found(id))?;
  Ok(Json(employee))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /employees/{id}`
pub async fn delete<S>(
  State(state): State<ApiState<S>>,
  Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError>
where
  S: TributeStore,
{
  if state.store.remove_employee(id).await.map_err(ApiError::store)? {
    tracing::info!(employee_id = %id, "employee removed");
    Ok(StatusCode::NO_CONTENT)
  } else {
    Err(not_found(id))
  }
}

fn not_found(id: Uuid) -> ApiError {
  ApiError::NotFound(format!("employee {id} not found"))
}

fn validate(body: &NewEmployee) -> Result<(), ApiError> {
  if body.name.trim().is_empty() {
    return Err(ApiError::BadRequest("name must not be empty".into()));
  }
  Ok(())
}
