//! The event projector — turns the roster into the list of upcoming
//! celebrations.
//!
//! Projection is a pure function of the roster, the recorded event states and
//! a [`Window`]. The window pins "today" once per call so every candidate in a
//! single projection is classified against the same date.

use std::collections::HashMap;

use chrono::{Datelike, Days, Local, NaiveDate};

use crate::{
  Error, Result,
  employee::Employee,
  event::{EventState, EventStatus, EventType, GiftEvent, event_id},
};

/// Lookahead used when the caller doesn't specify one.
pub const DEFAULT_LOOKAHEAD_DAYS: u32 = 30;

const CHRISTMAS: (u32, u32) = (12, 25);

// ─── Window ──────────────────────────────────────────────────────────────────

/// The span of days, starting at `today` inclusive, in which occurrences are
/// reported.
///
/// A window can only be built when next year's December 31 is representable,
/// so every rollover from it stays inside chrono's calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
  today: NaiveDate,
  days:  u32,
}

impl Window {
  pub fn new(today: NaiveDate, days: u32) -> Result<Self> {
    let last_rollover = today
      .year()
      .checked_add(1)
      .and_then(|year| NaiveDate::from_ymd_opt(year, 12, 31));
    match last_rollover {
      Some(_) => Ok(Self { today, days }),
      None => Err(Error::DateOutOfRange(today)),
    }
  }

  /// A window anchored at the local calendar date, sampled once.
  pub fn from_now(days: u32) -> Result<Self> {
    Self::new(Local::now().date_naive(), days)
  }

  pub fn today(&self) -> NaiveDate { self.today }

  pub fn days(&self) -> u32 { self.days }

  /// Signed whole days from `today` to `date`.
  pub fn days_until(&self, date: NaiveDate) -> i64 {
    date.signed_duration_since(self.today).num_days()
  }

  /// Whether `date` falls on `today` or within `days` after it.
  pub fn contains(&self, date: NaiveDate) -> bool {
    let diff = self.days_until(date);
    (0..=i64::from(self.days)).contains(&diff)
  }

  /// The next occurrence of a yearly `(month, day)` on or after `today`.
  ///
  /// This year's date is used unless it is strictly before `today`, in which
  /// case the occurrence rolls forward one year. An occurrence on `today`
  /// itself is never rolled. `None` only for a `(month, day)` that names no
  /// calendar day.
  pub fn next_occurrence(&self, month: u32, day: u32) -> Option<NaiveDate> {
    let year = self.today.year();
    let this_year = occurrence_in(year, month, day)?;
    if this_year < self.today {
      occurrence_in(year + 1, month, day)
    } else {
      Some(this_year)
    }
  }

  /// [`Window::next_occurrence`], kept only if it falls inside the window.
  fn upcoming(&self, month: u32, day: u32) -> Option<NaiveDate> {
    self
      .next_occurrence(month, day)
      .filter(|date| self.contains(*date))
  }
}

/// The calendar date of `(month, day)` in `year`.
///
/// A day past the end of the month overflows into the next one, so February
/// 29 lands on March 1 in non-leap years.
fn occurrence_in(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
  NaiveDate::from_ymd_opt(year, month, day).or_else(|| {
    NaiveDate::from_ymd_opt(year, month, 1)?
      .checked_add_days(Days::new(u64::from(day.saturating_sub(1))))
  })
}

// ─── Projection ──────────────────────────────────────────────────────────────

/// Compute every birthday, anniversary, leaving date and Christmas that falls
/// inside `window`, joined against `event_states` and sorted by date.
///
/// `event_states` is only read. Events sharing a date keep the order in which
/// they were produced: roster order, then birthday, anniversary, leaving,
/// Christmas.
pub fn project(
  employees: &[Employee],
  event_states: &HashMap<String, EventState>,
  window: Window,
) -> Vec<GiftEvent> {
  let mut events = Vec::new();

  for employee in employees {
    let dob = employee.date_of_birth;
    if let Some(birthday) = window.upcoming(dob.month(), dob.day()) {
      events.push(annotate(employee, EventType::Birthday, birthday, event_states));
    }

    let start = employee.start_date;
    if let Some(anniversary) = window.upcoming(start.month(), start.day()) {
      events.push(annotate(
        employee,
        EventType::Anniversary,
        anniversary,
        event_states,
      ));
    }

    if let Some(leaving) = employee.leaving_date
      && window.contains(leaving)
    {
      events.push(annotate(employee, EventType::Leaving, leaving, event_states));
    }

    if let Some(christmas) = window.next_occurrence(CHRISTMAS.0, CHRISTMAS.1) {
      let gone_by_christmas =
        employee.leaving_date.is_some_and(|leaving| leaving < christmas);
      if !gone_by_christmas && window.contains(christmas) {
        events.push(annotate(
          employee,
          EventType::Christmas,
          christmas,
          event_states,
        ));
      }
    }
  }

  // `sort_by_key` is stable, so same-day events keep production order.
  events.sort_by_key(|event| event.date);
  events
}

/// [`project`] against the local calendar date.
pub fn project_from_now(
  employees: &[Employee],
  event_states: &HashMap<String, EventState>,
  days: u32,
) -> Result<Vec<GiftEvent>> {
  Ok(project(employees, event_states, Window::from_now(days)?))
}

fn annotate(
  employee: &Employee,
  event_type: EventType,
  date: NaiveDate,
  event_states: &HashMap<String, EventState>,
) -> GiftEvent {
  let id = event_id(event_type, employee.employee_id, date.year());
  let (status, selected_gift_id, card_id) = match event_states.get(&id) {
    Some(state) => (
      state.status,
      state.selected_gift_id.clone(),
      state.card_id.clone(),
    ),
    None => (EventStatus::Upcoming, None, None),
  };

  GiftEvent {
    id,
    employee_id: employee.employee_id,
    event_type,
    date,
    status,
    selected_gift_id,
    card_id,
  }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use chrono::Utc;
  use uuid::Uuid;

  use super::*;

  fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
  }

  fn employee(dob: NaiveDate, start: NaiveDate) -> Employee {
    Employee {
      employee_id:   Uuid::new_v4(),
      name:          "Ada Lovelace".into(),
      email:         None,
      date_of_birth: dob,
      start_date:    start,
      leaving_date:  None,
    }
  }

  fn state(
    id: &str,
    status: EventStatus,
    gift: Option<&str>,
    card: Option<&str>,
  ) -> EventState {
    EventState {
      event_id:         id.to_owned(),
      status,
      selected_gift_id: gift.map(str::to_owned),
      card_id:          card.map(str::to_owned),
      updated_at:       Utc::now(),
    }
  }

  fn window(today: NaiveDate, days: u32) -> Window {
    Window::new(today, days).unwrap()
  }

  fn of_type(events: &[GiftEvent], t: EventType) -> Vec<&GiftEvent> {
    events.iter().filter(|e| e.event_type == t).collect()
  }

  // ── Window ──────────────────────────────────────────────────────────────

  #[test]
  fn next_occurrence_today_is_not_rolled() {
    let w = window(date(2026, 3, 10), 30);
    assert_eq!(w.next_occurrence(3, 10), Some(date(2026, 3, 10)));
  }

  #[test]
  fn next_occurrence_passed_rolls_one_year() {
    let w = window(date(2026, 3, 10), 30);
    assert_eq!(w.next_occurrence(3, 9), Some(date(2027, 3, 9)));
    assert_eq!(w.next_occurrence(1, 1), Some(date(2027, 1, 1)));
  }

  #[test]
  fn next_occurrence_feb_29_in_non_leap_year_is_march_1() {
    let w = window(date(2026, 2, 1), 30);
    assert_eq!(w.next_occurrence(2, 29), Some(date(2026, 3, 1)));
  }

  #[test]
  fn next_occurrence_feb_29_rolls_into_leap_year() {
    let w = window(date(2027, 3, 2), 365);
    assert_eq!(w.next_occurrence(2, 29), Some(date(2028, 2, 29)));
  }

  #[test]
  fn window_bounds_are_inclusive() {
    let w = window(date(2026, 3, 10), 5);
    assert!(w.contains(date(2026, 3, 10)));
    assert!(w.contains(date(2026, 3, 15)));
    assert!(!w.contains(date(2026, 3, 16)));
    assert!(!w.contains(date(2026, 3, 9)));
  }

  #[test]
  fn window_in_the_last_representable_year_is_rejected() {
    let today = date(NaiveDate::MAX.year(), 12, 30);
    let err = Window::new(today, 1).unwrap_err();
    assert!(matches!(err, Error::DateOutOfRange(d) if d == today));
  }

  #[test]
  fn window_just_before_the_last_year_is_accepted() {
    let today = date(NaiveDate::MAX.year() - 1, 12, 30);
    let w = window(today, 1);
    assert_eq!(w.next_occurrence(12, 25), Some(date(today.year() + 1, 12, 25)));
  }

  #[test]
  fn project_from_now_uses_the_local_date() {
    let today = Local::now().date_naive();
    let dob = date(2000, today.month(), today.day());
    let e = employee(dob, date(2020, 1, 1));

    let events = project_from_now(&[e], &HashMap::new(), 0).unwrap();
    let birthdays = of_type(&events, EventType::Birthday);
    assert_eq!(birthdays.len(), 1);
    assert_eq!(birthdays[0].date.month(), today.month());
    assert_eq!(birthdays[0].date.day(), today.day());
  }

  // ── Birthdays ───────────────────────────────────────────────────────────

  #[test]
  fn birthday_example_within_window() {
    let e = employee(date(1990, 3, 15), date(2020, 9, 1));
    let events =
      project(&[e.clone()], &HashMap::new(), window(date(2026, 3, 10), 30));

    let birthdays = of_type(&events, EventType::Birthday);
    assert_eq!(birthdays.len(), 1);
    let bd = birthdays[0];
    assert_eq!(bd.date, date(2026, 3, 15));
    assert_eq!(bd.id, format!("evt_bd_{}_2026", e.employee_id));
    assert_eq!(bd.status, EventStatus::Upcoming);
    assert!(bd.selected_gift_id.is_none());
    assert!(bd.card_id.is_none());
  }

  #[test]
  fn birthday_today_is_included_with_zero_lookahead() {
    let today = date(2026, 6, 1);
    let e = employee(date(1985, 6, 1), date(2020, 1, 15));
    let events = project(&[e], &HashMap::new(), window(today, 0));

    let birthdays = of_type(&events, EventType::Birthday);
    assert_eq!(birthdays.len(), 1);
    assert_eq!(birthdays[0].date, today);
  }

  #[test]
  fn birthday_already_passed_uses_next_year() {
    let e = employee(date(1990, 1, 5), date(2020, 9, 1));
    let events =
      project(&[e.clone()], &HashMap::new(), window(date(2026, 3, 10), 365));

    let birthdays = of_type(&events, EventType::Birthday);
    assert_eq!(birthdays.len(), 1);
    assert_eq!(birthdays[0].date, date(2027, 1, 5));
    assert_eq!(birthdays[0].id, format!("evt_bd_{}_2027", e.employee_id));
  }

  #[test]
  fn birthday_outside_window_is_skipped() {
    let e = employee(date(1990, 5, 1), date(2020, 9, 1));
    let events = project(&[e], &HashMap::new(), window(date(2026, 3, 10), 30));
    assert!(of_type(&events, EventType::Birthday).is_empty());
  }

  // ── Anniversaries ───────────────────────────────────────────────────────

  #[test]
  fn anniversary_uses_start_date() {
    let e = employee(date(1990, 8, 1), date(2019, 3, 20));
    let events =
      project(&[e.clone()], &HashMap::new(), window(date(2026, 3, 10), 30));

    let anniversaries = of_type(&events, EventType::Anniversary);
    assert_eq!(anniversaries.len(), 1);
    assert_eq!(anniversaries[0].date, date(2026, 3, 20));
    assert_eq!(anniversaries[0].id, format!("evt_anv_{}_2026", e.employee_id));
  }

  #[test]
  fn anniversary_already_passed_uses_next_year() {
    let e = employee(date(1990, 8, 1), date(2018, 2, 1));
    let events =
      project(&[e.clone()], &HashMap::new(), window(date(2026, 3, 10), 365));

    let anniversaries = of_type(&events, EventType::Anniversary);
    assert_eq!(anniversaries.len(), 1);
    assert_eq!(anniversaries[0].date, date(2027, 2, 1));
    assert_eq!(anniversaries[0].id, format!("evt_anv_{}_2027", e.employee_id));
  }

  // ── Leaving ─────────────────────────────────────────────────────────────

  #[test]
  fn leaving_within_window_has_no_year_suffix() {
    let mut e = employee(date(1990, 8, 1), date(2019, 8, 1));
    e.leaving_date = Some(date(2026, 3, 31));
    let events =
      project(&[e.clone()], &HashMap::new(), window(date(2026, 3, 10), 30));

    let leaving = of_type(&events, EventType::Leaving);
    assert_eq!(leaving.len(), 1);
    assert_eq!(leaving[0].id, format!("evt_leave_{}", e.employee_id));
    assert_eq!(leaving[0].date, date(2026, 3, 31));
  }

  #[test]
  fn leaving_in_the_past_is_not_emitted() {
    let mut e = employee(date(1990, 8, 1), date(2019, 8, 1));
    e.leaving_date = Some(date(2026, 3, 5));
    let events = project(&[e], &HashMap::new(), window(date(2026, 3, 10), 30));
    assert!(of_type(&events, EventType::Leaving).is_empty());
  }

  #[test]
  fn leaving_is_not_rolled_to_next_year() {
    let mut e = employee(date(1990, 8, 1), date(2019, 8, 1));
    e.leaving_date = Some(date(2025, 3, 15));
    let events = project(&[e], &HashMap::new(), window(date(2026, 3, 10), 30));
    assert!(of_type(&events, EventType::Leaving).is_empty());
  }

  #[test]
  fn leaving_is_stable_across_calls_on_the_same_day() {
    let mut e = employee(date(1990, 8, 1), date(2019, 8, 1));
    e.leaving_date = Some(date(2026, 3, 20));
    let roster = [e];
    let window = window(date(2026, 3, 10), 30);

    let first = project(&roster, &HashMap::new(), window);
    let second = project(&roster, &HashMap::new(), window);

    let first = of_type(&first, EventType::Leaving);
    let second = of_type(&second, EventType::Leaving);
    assert_eq!(first.len(), 1);
    assert_eq!(first, second);
  }

  // ── Christmas ───────────────────────────────────────────────────────────

  #[test]
  fn christmas_emitted_once_without_leaving_date() {
    let e = employee(date(1990, 8, 1), date(2019, 8, 1));
    let events =
      project(&[e.clone()], &HashMap::new(), window(date(2026, 12, 1), 30));

    let xmas = of_type(&events, EventType::Christmas);
    assert_eq!(xmas.len(), 1);
    assert_eq!(xmas[0].date, date(2026, 12, 25));
    assert_eq!(xmas[0].id, format!("evt_xmas_{}_2026", e.employee_id));
  }

  #[test]
  fn christmas_skipped_when_leaving_before_it() {
    let mut e = employee(date(1990, 8, 1), date(2019, 8, 1));
    e.leaving_date = Some(date(2026, 12, 20));
    let events = project(&[e], &HashMap::new(), window(date(2026, 12, 1), 30));

    assert!(of_type(&events, EventType::Christmas).is_empty());
    assert_eq!(of_type(&events, EventType::Leaving).len(), 1);
  }

  #[test]
  fn christmas_kept_when_leaving_on_christmas_day() {
    let mut e = employee(date(1990, 8, 1), date(2019, 8, 1));
    e.leaving_date = Some(date(2026, 12, 25));
    let events = project(&[e], &HashMap::new(), window(date(2026, 12, 1), 30));
    assert_eq!(of_type(&events, EventType::Christmas).len(), 1);
  }

  #[test]
  fn christmas_after_the_25th_rolls_to_next_year() {
    let e = employee(date(1990, 8, 1), date(2019, 8, 1));
    let events =
      project(&[e.clone()], &HashMap::new(), window(date(2026, 12, 27), 365));

    let xmas = of_type(&events, EventType::Christmas);
    assert_eq!(xmas.len(), 1);
    assert_eq!(xmas[0].date, date(2027, 12, 25));
    assert_eq!(xmas[0].id, format!("evt_xmas_{}_2027", e.employee_id));
  }

  #[test]
  fn christmas_next_year_excluded_by_leaving_date_this_year() {
    let mut e = employee(date(1990, 8, 1), date(2019, 8, 1));
    e.leaving_date = Some(date(2027, 1, 10));
    let events = project(&[e], &HashMap::new(), window(date(2026, 12, 27), 365));
    assert!(of_type(&events, EventType::Christmas).is_empty());
  }

  // ── State join ──────────────────────────────────────────────────────────

  #[test]
  fn recorded_state_is_joined_by_id() {
    let e = employee(date(1990, 3, 15), date(2020, 9, 1));
    let id = format!("evt_bd_{}_2026", e.employee_id);
    let states = HashMap::from([(
      id.clone(),
      state(&id, EventStatus::Completed, Some("gift-7"), Some("card-3")),
    )]);

    let events = project(&[e], &states, window(date(2026, 3, 10), 30));
    let bd = of_type(&events, EventType::Birthday)[0];
    assert_eq!(bd.status, EventStatus::Completed);
    assert_eq!(bd.selected_gift_id.as_deref(), Some("gift-7"));
    assert_eq!(bd.card_id.as_deref(), Some("card-3"));
  }

  #[test]
  fn state_from_a_previous_year_is_not_joined() {
    let e = employee(date(1990, 3, 15), date(2020, 9, 1));
    let old = format!("evt_bd_{}_2025", e.employee_id);
    let states =
      HashMap::from([(old.clone(), state(&old, EventStatus::Completed, None, None))]);

    let events = project(&[e], &states, window(date(2026, 3, 10), 30));
    let bd = of_type(&events, EventType::Birthday)[0];
    assert_eq!(bd.status, EventStatus::Upcoming);
  }

  #[test]
  fn state_never_changes_dates_or_types() {
    let mut e = employee(date(1990, 3, 15), date(2019, 3, 20));
    e.leaving_date = Some(date(2026, 4, 1));
    let roster = [e.clone()];
    let window = window(date(2026, 3, 10), 30);

    let without = project(&roster, &HashMap::new(), window);

    let leave_id = format!("evt_leave_{}", e.employee_id);
    let states = HashMap::from([(
      leave_id.clone(),
      state(&leave_id, EventStatus::PendingAction, Some("flowers"), None),
    )]);
    let with = project(&roster, &states, window);

    assert_eq!(without.len(), with.len());
    for (a, b) in without.iter().zip(&with) {
      assert_eq!(a.id, b.id);
      assert_eq!(a.date, b.date);
      assert_eq!(a.event_type, b.event_type);
    }
    let leaving = of_type(&with, EventType::Leaving)[0];
    assert_eq!(leaving.status, EventStatus::PendingAction);
    assert_eq!(leaving.selected_gift_id.as_deref(), Some("flowers"));
    assert_eq!(states.len(), 1);
  }

  // ── Ordering ────────────────────────────────────────────────────────────

  #[test]
  fn output_is_sorted_by_date() {
    let today = date(2026, 12, 1);
    let mut a = employee(date(1990, 12, 30), date(2019, 12, 3));
    a.leaving_date = Some(date(2026, 12, 28));
    let b = employee(date(1988, 12, 2), date(2021, 12, 25));
    let c = employee(date(1975, 12, 1), date(2010, 12, 15));

    let events = project(&[a, b, c], &HashMap::new(), window(today, 30));

    assert!(!events.is_empty());
    assert!(events.windows(2).all(|w| w[0].date <= w[1].date));
    assert_eq!(events[0].date, today);
  }

  #[test]
  fn same_day_events_keep_roster_order() {
    let a = employee(date(1990, 3, 15), date(2020, 9, 1));
    let b = employee(date(1991, 3, 15), date(2020, 9, 1));
    let events = project(
      &[a.clone(), b.clone()],
      &HashMap::new(),
      window(date(2026, 3, 10), 30),
    );

    let birthdays = of_type(&events, EventType::Birthday);
    assert_eq!(birthdays[0].employee_id, a.employee_id);
    assert_eq!(birthdays[1].employee_id, b.employee_id);
  }

  #[test]
  fn empty_roster_projects_nothing() {
    let events =
      project(&[], &HashMap::new(), window(date(2026, 12, 20), 30));
    assert!(events.is_empty());
  }

  // ── Serialisation ───────────────────────────────────────────────────────

  #[test]
  fn gift_event_json_shape() {
    let e = employee(date(1990, 3, 15), date(2020, 9, 1));
    let events =
      project(&[e], &HashMap::new(), window(date(2026, 3, 10), 30));
    let json = serde_json::to_value(&events[0]).unwrap();

    assert_eq!(json["type"], "birthday");
    assert_eq!(json["date"], "2026-03-15");
    assert_eq!(json["status"], "upcoming");
  }
}
