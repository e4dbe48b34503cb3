//! Error types for `tribute-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("date {0} is too close to the end of the calendar to project from")]
  DateOutOfRange(chrono::NaiveDate),

  #[error("unknown event status: {0:?}")]
  UnknownStatus(String),

  #[error("unknown event type: {0:?}")]
  UnknownEventType(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
