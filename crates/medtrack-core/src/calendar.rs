//! Calendar-day status projection and month-grid arithmetic.
//!
//! This is a different aggregation granularity than the daily dashboard:
//! one label per calendar day, derived from the full adherence history.

use std::collections::{BTreeMap, HashMap, HashSet};

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
  adherence::{AdherenceRecord, DoseStatus},
  reminder::Reminder,
};

// ─── Day status ──────────────────────────────────────────────────────────────

/// Day-level aggregate vocabulary for the month grid.
///
/// Coarser than the per-reminder [`DoseStatus`]; the two are separate types
/// on purpose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayStatus {
  /// Every reminder has a `taken` record for the day.
  Full,
  /// Some reminders are taken but others are still pending.
  Partial,
  /// At least one reminder has an explicit `missed` record for the day.
  Missed,
}

// ─── Projection ──────────────────────────────────────────────────────────────

/// Project the full adherence history into a per-day status map.
///
/// Aggregation rule, applied uniformly: any `missed` record makes the day
/// `Missed`; otherwise a `taken` record for every reminder makes it `Full`;
/// any other day with records is `Partial`. Days without records are absent
/// from the map. Orphaned records are ignored, and duplicate same-day
/// records resolve last-write-wins exactly as in the daily reconciliation.
pub fn project_history(
  reminders: &[Reminder],
  records:   &[AdherenceRecord],
) -> BTreeMap<NaiveDate, DayStatus> {
  let known: HashSet<Uuid> = reminders.iter().map(|r| r.reminder_id).collect();

  let mut days: BTreeMap<NaiveDate, HashMap<Uuid, DoseStatus>> = BTreeMap::new();
  for rec in records {
    if !known.contains(&rec.reminder_id) {
      continue;
    }
    days
      .entry(rec.date)
      .or_default()
      .insert(rec.reminder_id, rec.status);
  }

  let total = known.len();
  days
    .into_iter()
    .map(|(date, statuses)| {
      let any_missed = statuses.values().any(|s| *s == DoseStatus::Missed);
      let taken = statuses
        .values()
        .filter(|s| **s == DoseStatus::Taken)
        .count();

      let status = if any_missed {
        DayStatus::Missed
      } else if total > 0 && taken == total {
        DayStatus::Full
      } else {
        DayStatus::Partial
      };
      (date, status)
    })
    .collect()
}

// ─── Month navigation ────────────────────────────────────────────────────────

/// A `(year, month)` pair for the month grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthRef {
  pub year:  i32,
  /// 1-based; always in `1..=12`.
  pub month: u32,
}

impl MonthRef {
  /// The month containing `date`.
  pub fn of(date: NaiveDate) -> Self {
    Self {
      year:  date.year(),
      month: date.month(),
    }
  }

  /// Move by `offset` months, normalised across year boundaries in both
  /// directions (month −1 from January is December of the previous year).
  #[must_use]
  pub fn shift(self, offset: i32) -> Self {
    let index = self.year * 12 + self.month as i32 - 1 + offset;
    Self {
      year:  index.div_euclid(12),
      month: (index.rem_euclid(12) + 1) as u32,
    }
  }

  /// The first day of the month.
  pub fn first_day(self) -> NaiveDate {
    // month stays in 1..=12 for values built via `of` and `shift`.
    NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
  }

  /// Number of days in the month, accounting for leap years.
  pub fn days(self) -> u32 {
    match self.month {
      1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
      4 | 6 | 9 | 11 => 30,
      _ => {
        if is_leap_year(self.year) {
          29
        } else {
          28
        }
      }
    }
  }
}

fn is_leap_year(year: i32) -> bool {
  (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}
