//! [`SqliteStore`] — the SQLite implementation of [`TributeStore`].

use std::{collections::HashMap, path::Path};

use chrono::Utc;
use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use tribute_core::{
  employee::{Employee, NewEmployee},
  event::{EventState, EventStateUpdate},
  store::TributeStore,
};

use crate::{
  encode::{
    RawEmployee, RawEventState, encode_date, encode_dt, encode_status,
    encode_uuid,
  },
  schema::SCHEMA,
  Result,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Tribute store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted. The store is
/// opened explicitly by the caller and passed to whatever needs it; there is
/// no process-wide handle.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    tracing::debug!(path = %path.display(), "opened sqlite store");
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Run arbitrary SQL against the connection, bypassing the encoders.
  #[cfg(test)]
  pub(crate) async fn execute_raw(&self, sql: &'static str) -> Result<()> {
    self
      .conn
      .call(move |conn| {
        conn.execute_batch(sql)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── TributeStore impl ───────────────────────────────────────────────────────

impl TributeStore for SqliteStore {
  type Error = crate::Error;

  // ── Employees ─────────────────────────────────────────────────────────────

  async fn add_employee(&self, input: NewEmployee) -> Result<Employee> {
    let employee = input.into_employee(Uuid::new_v4());

    let id_str      = encode_uuid(employee.employee_id);
    let name        = employee.name.clone();
    let email       = employee.email.clone();
    let dob_str     = encode_date(employee.date_of_birth);
    let start_str   = encode_date(employee.start_date);
    let leaving_str = employee.leaving_date.map(encode_date);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO employees (
             employee_id, name, email, date_of_birth, start_date, leaving_date
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
          rusqlite::params![id_str, name, email, dob_str, start_str, leaving_str],
        )?;
        Ok(())
      })
      .await?;

    Ok(employee)
  }

  async fn get_employee(&self, id: Uuid) -> Result<Option<Employee>> {
    let id_str = encode_uuid(id);
    let sql = format!(
      "SELECT {} FROM employees WHERE employee_id = ?1",
      RawEmployee::COLUMNS
    );

    let raw: Option<RawEmployee> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(&sql, rusqlite::params![id_str], RawEmployee::from_row)
            .optional()?,
        )
      })
      .await?;

    raw.map(RawEmployee::into_employee).transpose()
  }

  async fn list_employees(&self) -> Result<Vec<Employee>> {
    let sql = format!("SELECT {} FROM employees ORDER BY seq", RawEmployee::COLUMNS);

    let raws: Vec<RawEmployee> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map([], RawEmployee::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawEmployee::into_employee).collect()
  }

  async fn update_employee(
    &self,
    id:    Uuid,
    input: NewEmployee,
  ) -> Result<Option<Employee>> {
    let employee = input.into_employee(id);

    let id_str      = encode_uuid(id);
    let name        = employee.name.clone();
    let email       = employee.email.clone();
    let dob_str     = encode_date(employee.date_of_birth);
    let start_str   = encode_date(employee.start_date);
    let leaving_str = employee.leaving_date.map(encode_date);

    let changed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE employees
             SET name = ?2, email = ?3, date_of_birth = ?4,
                 start_date = ?5, leaving_date = ?6
           WHERE employee_id = ?1",
          rusqlite::params![id_str, name, email, dob_str, start_str, leaving_str],
        )?)
      })
      .await?;

    Ok((changed > 0).then_some(employee))
  }

  async fn remove_employee(&self, id: Uuid) -> Result<bool> {
    let id_str = encode_uuid(id);

    let removed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "DELETE FROM employees WHERE employee_id = ?1",
          rusqlite::params![id_str],
        )?)
      })
      .await?;

    Ok(removed > 0)
  }

  // ── Event states ──────────────────────────────────────────────────────────

  async fn get_event_state(&self, event_id: &str) -> Result<Option<EventState>> {
    let id = event_id.to_owned();
    let sql = format!(
      "SELECT {} FROM event_states WHERE event_id = ?1",
      RawEventState::COLUMNS
    );

    let raw: Option<RawEventState> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(&sql, rusqlite::params![id], RawEventState::from_row)
            .optional()?,
        )
      })
      .await?;

    raw.map(RawEventState::into_event_state).transpose()
  }

  async fn list_event_states(&self) -> Result<HashMap<String, EventState>> {
    let sql = format!("SELECT {} FROM event_states", RawEventState::COLUMNS);

    let raws: Vec<RawEventState> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map([], RawEventState::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws
      .into_iter()
      .map(|raw| -> Result<(String, EventState)> {
        let state = raw.into_event_state()?;
        Ok((state.event_id.clone(), state))
      })
      .collect()
  }

  async fn record_event_state(&self, update: EventStateUpdate) -> Result<EventState> {
    let state = EventState {
      event_id:         update.event_id,
      status:           update.status,
      selected_gift_id: update.selected_gift_id,
      card_id:          update.card_id,
      updated_at:       Utc::now(),
    };

    let id         = state.event_id.clone();
    let status_str = encode_status(state.status);
    let gift       = state.selected_gift_id.clone();
    let card       = state.card_id.clone();
    let at_str     = encode_dt(state.updated_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO event_states (
             event_id, status, selected_gift_id, card_id, updated_at
           ) VALUES (?1, ?2, ?3, ?4, ?5)
           ON CONFLICT (event_id) DO UPDATE SET
             status           = excluded.status,
             selected_gift_id = excluded.selected_gift_id,
             card_id          = excluded.card_id,
             updated_at       = excluded.updated_at",
          rusqlite::params![id, status_str, gift, card, at_str],
        )?;
        Ok(())
      })
      .await?;

    Ok(state)
  }
}
