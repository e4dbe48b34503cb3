//! The `TributeStore` trait.
//!
//! The trait is implemented by storage backends (e.g. `tribute-store-sqlite`).
//! Higher layers (`tribute-api`) depend on this abstraction, not on any
//! concrete backend.

use std::{collections::HashMap, future::Future};

use uuid::Uuid;

use crate::{
  employee::{Employee, NewEmployee},
  event::{EventState, EventStateUpdate},
};

/// Abstraction over a Tribute store backend: the employee roster plus the
/// durable per-event workflow state.
///
/// Projected events are never stored; only [`EventState`] rows persist.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait TributeStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Employees ─────────────────────────────────────────────────────────

  /// Create and persist a new employee with a store-assigned id.
  fn add_employee(
    &self,
    input: NewEmployee,
  ) -> impl Future<Output = Result<Employee, Self::Error>> + Send + '_;

  /// Retrieve an employee by id. Returns `None` if not found.
  fn get_employee(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Employee>, Self::Error>> + Send + '_;

  /// The full roster, in insertion order.
  fn list_employees(
    &self,
  ) -> impl Future<Output = Result<Vec<Employee>, Self::Error>> + Send + '_;

  /// Replace every field of an existing employee. Returns `None` if not
  /// found.
  fn update_employee(
    &self,
    id: Uuid,
    input: NewEmployee,
  ) -> impl Future<Output = Result<Option<Employee>, Self::Error>> + Send + '_;

  /// Remove an employee. Returns `false` if not found. Recorded event states
  /// are left untouched.
  fn remove_employee(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  // ── Event states ──────────────────────────────────────────────────────

  /// Retrieve the recorded state for an event id.
  fn get_event_state<'a>(
    &'a self,
    event_id: &'a str,
  ) -> impl Future<Output = Result<Option<EventState>, Self::Error>> + Send + 'a;

  /// Every recorded state, keyed by event id.
  fn list_event_states(
    &self,
  ) -> impl Future<Output = Result<HashMap<String, EventState>, Self::Error>>
  + Send
  + '_;

  /// Insert or replace the state for `update.event_id`. The `updated_at`
  /// timestamp is set by the store.
  fn record_event_state(
    &self,
    update: EventStateUpdate,
  ) -> impl Future<Output = Result<EventState, Self::Error>> + Send + '_;
}
