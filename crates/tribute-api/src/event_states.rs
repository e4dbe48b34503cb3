//! Handlers for `/event-states` endpoints.
//!
//! These are how the gift-selection and tribute-card workflows record
//! progress against a projected event. The id in the path is the event id
//! exactly as it appears on the projected event.

use std::collections::HashMap;

use axum::{
  Json,
  extract::{Path, State},
};
use serde::Deserialize;
use tribute_core::{
  event::{EventState, EventStateUpdate, EventStatus},
  store::TributeStore,
};

use crate::{ApiState, error::ApiError};

/// `GET /event-states`
pub async fn list<S>(
  State(state): State<ApiState<S>>,
) -> Result<Json<HashMap<String, EventState>>, ApiError>
where
  S: TributeStore,
{
  let states = state.store.list_event_states().await.map_err(ApiError::store)?;
  Ok(Json(states))
}

/// `GET /event-states/{id}`
pub async fn get_one<S>(
  State(state): State<ApiState<S>>,
  Path(id): Path<String>,
) -> Result<Json<EventState>, ApiError>
where
  S: TributeStore,
{
  let found = state
    .store
    .get_event_state(&id)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::NotFound(format!("no state recorded for {id}")))?;
  Ok(Json(found))
}

/// JSON body accepted by `PUT /event-states/{id}`.
#[derive(Debug, Deserialize)]
pub struct EventStateBody {
  pub status:           EventStatus,
  pub selected_gift_id: Option<String>,
  pub card_id:          Option<String>,
}

/// `PUT /event-states/{id}` — insert or replace.
pub async fn put_one<S>(
  State(state): State<ApiState<S>>,
  Path(id): Path<String>,
  Json(body): Json<EventStateBody>,
) -> Result<Json<EventState>, ApiError>
where
  S: TributeStore,
{
  if !id.starts_with("evt_") {
    return Err(ApiError::BadRequest(format!("{id:?} is not an event id")));
  }

  let update = EventStateUpdate {
    event_id:         id,
    status:           body.status,
    selected_gift_id: body.selected_gift_id,
    card_id:          body.card_id,
  };
  let recorded = state
    .store
    .record_event_state(update)
    .await
    .map_err(ApiError::store)?;

  tracing::info!(event_id = %recorded.event_id, status = %recorded.status, "event state recorded");
  Ok(Json(recorded))
}
