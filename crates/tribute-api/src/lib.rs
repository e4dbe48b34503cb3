//! JSON REST API for Tribute.
//!
//! Exposes an axum [`Router`] backed by any [`tribute_core::store::TributeStore`].
//! Auth, TLS, and transport concerns are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", tribute_api::api_router(ApiState::new(store, 30)))
//! ```

pub mod employees;
pub mod error;
pub mod event_states;
pub mod events;

use std::sync::Arc;

use axum::{Router, routing::get};
use tribute_core::store::TributeStore;

pub use error::ApiError;

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all handlers.
#[derive(Clone)]
pub struct ApiState<S: TributeStore> {
  pub store:          Arc<S>,
  /// Lookahead applied to `GET /events` when `days` is absent.
  pub lookahead_days: u32,
}

impl<S: TributeStore> ApiState<S> {
  pub fn new(store: Arc<S>, lookahead_days: u32) -> Self {
    Self { store, lookahead_days }
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build a fully-materialised API router for `state`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(state: ApiState<S>) -> Router<()>
where
  S: TributeStore + Clone + Send + Sync + 'static,
{
  Router::new()
    // Roster
    .route("/employees", get(employees::list::<S>).post(employees::create::<S>))
    .route(
      "/employees/{id}",
      get(employees::get_one::<S>)
        .put(employees::update::<S>)
        .delete(employees::delete::<S>),
    )
    // Recorded workflow state
    .route("/event-states", get(event_states::list::<S>))
    .route(
      "/event-states/{id}",
      get(event_states::get_one::<S>).put(event_states::put_one::<S>),
    )
    // Projection
    .route("/events", get(events::handler::<S>))
    .with_state(state)
}

// ─── Integration tests ────────────────────────────────────────────────────────
