//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings, calendar dates as `YYYY-MM-DD`
//! and UUIDs as hyphenated lowercase strings. Anything that fails to decode is
//! an error; nothing read back is silently defaulted.

use chrono::{DateTime, NaiveDate, Utc};
use tribute_core::{
  employee::Employee,
  event::{EventState, EventStatus},
};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Uuid ─────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── DateTime<Utc> ────────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── NaiveDate ────────────────────────────────────────────────────────────────

const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn encode_date(d: NaiveDate) -> String { d.format(DATE_FORMAT).to_string() }

pub fn decode_date(s: &str) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(s, DATE_FORMAT)
    .map_err(|e| Error::DateParse(format!("{s:?}: {e}")))
}

// ─── EventStatus ──────────────────────────────────────────────────────────────

pub fn encode_status(s: EventStatus) -> &'static str { s.as_str() }

pub fn decode_status(s: &str) -> Result<EventStatus> { Ok(s.parse()?) }

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw strings read directly from an `employees` row.
pub struct RawEmployee {
  pub employee_id:   String,
  pub name:          String,
  pub email:         Option<String>,
  pub date_of_birth: String,
  pub start_date:    String,
  pub leaving_date:  Option<String>,
}

impl RawEmployee {
  /// Column list matching [`RawEmployee::from_row`].
  pub const COLUMNS: &'static str =
    "employee_id, name, email, date_of_birth, start_date, leaving_date";

  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      employee_id:   row.get(0)?,
      name:          row.get(1)?,
      email:         row.get(2)?,
      date_of_birth: row.get(3)?,
      start_date:    row.get(4)?,
      leaving_date:  row.get(5)?,
    })
  }

  pub fn into_employee(self) -> Result<Employee> {
    Ok(Employee {
      employee_id:   decode_uuid(&self.employee_id)?,
      name:          self.name,
      email:         self.email,
      date_of_birth: decode_date(&self.date_of_birth)?,
      start_date:    decode_date(&self.start_date)?,
      leaving_date:  self.leaving_date.as_deref().map(decode_date).transpose()?,
    })
  }
}

/// Raw strings read directly from an `event_states` row.
pub struct RawEventState {
  pub event_id:         String,
  pub status:           String,
  pub selected_gift_id: Option<String>,
  pub card_id:          Option<String>,
  pub updated_at:       String,
}

impl RawEventState {
  /// Column list matching [`RawEventState::from_row`].
  pub const COLUMNS: &'static str =
    "event_id, status, selected_gift_id, card_id, updated_at";

  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      event_id:         row.get(0)?,
      status:           row.get(1)?,
      selected_gift_id: row.get(2)?,
      card_id:          row.get(3)?,
      updated_at:       row.get(4)?,
    })
  }

  pub fn into_event_state(self) -> Result<EventState> {
    Ok(EventState {
      event_id:         self.event_id,
      status:           decode_status(&self.status)?,
      selected_gift_id: self.selected_gift_id,
      card_id:          self.card_id,
      updated_at:       decode_dt(&self.updated_at)?,
    })
  }
}
