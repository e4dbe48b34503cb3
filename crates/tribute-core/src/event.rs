//! Event types — projected celebrations and the durable state recorded
//! against them.
//!
//! A [`GiftEvent`] is a view: it is recomputed on every read and never
//! stored. The only durable record is the [`EventState`] row, joined back to
//! the view by the deterministic id built in [`event_id`].

use std::{fmt, str::FromStr};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::Error;

// ─── Event type ──────────────────────────────────────────────────────────────

/// The kind of occasion an event celebrates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
  Birthday,
  Anniversary,
  Leaving,
  Christmas,
}

impl EventType {
  /// The string stored in the database and used in JSON.
  /// Must match the `rename_all = "snake_case"` serde tags above.
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Birthday => "birthday",
      Self::Anniversary => "anniversary",
      Self::Leaving => "leaving",
      Self::Christmas => "christmas",
    }
  }

  /// Prefix of the event id for this type.
  fn id_prefix(self) -> &'static str {
    match self {
      Self::Birthday => "evt_bd",
      Self::Anniversary => "evt_anv",
      Self::Leaving => "evt_leave",
      Self::Christmas => "evt_xmas",
    }
  }

  /// Whether the event recurs every year. One-time events carry no year in
  /// their id.
  pub fn is_recurring(self) -> bool { !matches!(self, Self::Leaving) }
}

impl fmt::Display for EventType {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for EventType {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "birthday" => Ok(Self::Birthday),
      "anniversary" => Ok(Self::Anniversary),
      "leaving" => Ok(Self::Leaving),
      "christmas" => Ok(Self::Christmas),
      other => Err(Error::UnknownEventType(other.to_owned())),
    }
  }
}

// ─── Status ──────────────────────────────────────────────────────────────────

/// Workflow progress against a single event.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum EventStatus {
  #[default]
  Upcoming,
  PendingAction,
  Completed,
}

impl EventStatus {
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Upcoming => "upcoming",
      Self::PendingAction => "pending_action",
      Self::Completed => "completed",
    }
  }
}

impl fmt::Display for EventStatus {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for EventStatus {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "upcoming" => Ok(Self::Upcoming),
      "pending_action" => Ok(Self::PendingAction),
      "completed" => Ok(Self::Completed),
      other => Err(Error::UnknownStatus(other.to_owned())),
    }
  }
}

// ─── Identity ────────────────────────────────────────────────────────────────

/// Build the deterministic id for an occurrence.
///
/// The id depends only on `(event_type, employee_id, year)`, so repeated
/// projections within a year rejoin the same [`EventState`]. Leaving events
/// ignore `year`: an employee has at most one scheduled leaving date.
pub fn event_id(event_type: EventType, employee_id: Uuid, year: i32) -> String {
  let prefix = event_type.id_prefix();
  if event_type.is_recurring() {
    format!("{prefix}_{employee_id}_{year}")
  } else {
    format!("{prefix}_{employee_id}")
  }
}

// ─── Durable state ───────────────────────────────────────────────────────────

/// Recorded progress against a projected event, keyed by its id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventState {
  pub event_id:         String,
  pub status:           EventStatus,
  pub selected_gift_id: Option<String>,
  pub card_id:          Option<String>,
  /// Server-assigned; refreshed on every write.
  pub updated_at:       DateTime<Utc>,
}

/// Input to [`crate::store::TributeStore::record_event_state`].
/// `updated_at` is always set by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventStateUpdate {
  pub event_id:         String,
  pub status:           EventStatus,
  pub selected_gift_id: Option<String>,
  pub card_id:          Option<String>,
}

impl EventStateUpdate {
  pub fn new(event_id: impl Into<String>, status: EventStatus) -> Self {
    Self {
      event_id: event_id.into(),
      status,
      selected_gift_id: None,
      card_id: None,
    }
  }
}

// ─── Projected view ──────────────────────────────────────────────────────────

/// A single upcoming occurrence, annotated with any recorded state.
/// Never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GiftEvent {
  pub id:               String,
  pub employee_id:      Uuid,
  #[serde(rename = "type")]
  pub event_type:       EventType,
  /// Serialised as `YYYY-MM-DD`.
  pub date:             NaiveDate,
  pub status:           EventStatus,
  pub selected_gift_id: Option<String>,
  pub card_id:          Option<String>,
}
