//! Employee — the roster entry every celebration is derived from.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A member of the roster. Only the three dates matter to the projector; the
/// rest is carried for the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
  pub employee_id:   Uuid,
  pub name:          String,
  pub email:         Option<String>,
  pub date_of_birth: NaiveDate,
  /// First day of employment; drives work anniversaries.
  pub start_date:    NaiveDate,
  /// Presence signals a scheduled departure.
  pub leaving_date:  Option<NaiveDate>,
}

/// Input to [`crate::store::TributeStore::add_employee`] and
/// [`crate::store::TributeStore::update_employee`].
/// `employee_id` is always assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewEmployee {
  pub name:          String,
  #[serde(default)]
  pub email:         Option<String>,
  pub date_of_birth: NaiveDate,
  pub start_date:    NaiveDate,
  #[serde(default)]
  pub leaving_date:  Option<NaiveDate>,
}

impl NewEmployee {
  /// Convenience constructor with the optional fields left empty.
  pub fn new(
    name: impl Into<String>,
    date_of_birth: NaiveDate,
    start_date: NaiveDate,
  ) -> Self {
    Self {
      name: name.into(),
      email: None,
      date_of_birth,
      start_date,
      leaving_date: None,
    }
  }

  /// Attach an id, producing the stored form.
  pub fn into_employee(self, employee_id: Uuid) -> Employee {
    Employee {
      employee_id,
      name: self.name,
      email: self.email,
      date_of_birth: self.date_of_birth,
      start_date: self.start_date,
      leaving_date: self.leaving_date,
    }
  }
}
