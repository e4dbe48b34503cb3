//! Handler for `GET /events` — the projected list of upcoming celebrations.
//!
//! The roster and the recorded states are read once, then handed to the pure
//! projector together with a window pinned to a single "today".

use axum::{
  Json,
  extract::{Query, State},
};
use chrono::NaiveDate;
use serde::Deserialize;
use tribute_core::{
  event::{EventType, GiftEvent},
  projector::{Window, project, project_from_now},
  store::TributeStore,
};

use crate::{ApiState, error::ApiError};

#[derive(Debug, Deserialize, Default)]
pub struct EventsParams {
  /// Lookahead in days. Defaults to the configured value; negative is an
  /// error.
  pub days:  Option<i64>,
  /// Anchor date (`YYYY-MM-DD`). Defaults to the server's local date.
  pub today: Option<NaiveDate>,
  /// Comma-separated event types to keep, e.g. `birthday,leaving`.
  pub types: Option<String>,
}

/// `GET /events[?days=...][&today=...][&types=...]`
pub async fn handler<S>(
  State(state): State<ApiState<S>>,
  Query(params): Query<EventsParams>,
) -> Result<Json<Vec<GiftEvent>>, ApiError>
where
  S: TributeStore,
{
  let days = match params.days {
    None => state.lookahead_days,
    Some(d) => u32::try_from(d).map_err(|_| {
      ApiError::BadRequest(format!("days must be between 0 and {}, got {d}", u32::MAX))
    })?,
  };
  let types = params.types.as_deref().map(parse_types).transpose()?;

  let employees = state.store.list_employees().await.map_err(ApiError::store)?;
  let event_states = state.store.list_event_states().await.map_err(ApiError::store)?;

  let mut events = match params.today {
    Some(today) => {
      let window = Window::new(today, days).map_err(bad_request)?;
      project(&employees, &event_states, window)
    }
    None => project_from_now(&employees, &event_states, days).map_err(bad_request)?,
  };
  if let Some(types) = types {
    events.retain(|e| types.contains(&e.event_type));
  }

  tracing::debug!(
    today = ?params.today,
    days,
    employees = employees.len(),
    events = events.len(),
    "projected events"
  );
  Ok(Json(events))
}

fn parse_types(s: &str) -> Result<Vec<EventType>, ApiError> {
  s.split(',')
    .map(str::trim)
    .filter(|t| !t.is_empty())
    .map(|t| t.parse::<EventType>().map_err(bad_request))
    .collect()
}

fn bad_request(e: tribute_core::Error) -> ApiError {
  ApiError::BadRequest(e.to_string())
}
