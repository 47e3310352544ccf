//! The reconciliation engine — merges the prescription plan with the
//! adherence event log into a per-day schedule view plus statistics.
//!
//! Reconciliation is a pure function of its inputs and a fixed logical day;
//! it never fails. Data-integrity anomalies (duplicate same-day records,
//! records referencing an unknown reminder) resolve deterministically
//! instead of aborting the pass.

use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
  adherence::{AdherenceRecord, DoseStatus},
  reminder::Reminder,
};

// ─── Derived view types ──────────────────────────────────────────────────────

/// One reminder's slot in the daily schedule. `status == None` means the
/// dose is still pending for the day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyScheduleItem {
  pub reminder_id:  Uuid,
  pub drug:         String,
  pub dosage:       String,
  pub instructions: String,
  pub times:        Vec<String>,
  pub status:       Option<DoseStatus>,
}

/// Aggregate counts for a single day's schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statistics {
  pub taken:             u32,
  pub missed:            u32,
  /// Number of reminders in the plan, not the number of records — a
  /// reminder with no record yet still counts toward the denominator.
  pub total:             u32,
  pub adherence_percent: u32,
}

impl Statistics {
  /// `round(100 * taken / total)`. An empty plan counts as fully adherent.
  pub fn percent(taken: u32, total: u32) -> u32 {
    if total == 0 {
      100
    } else {
      ((f64::from(taken) / f64::from(total)) * 100.0).round() as u32
    }
  }
}

/// The derived dashboard snapshot — never persisted, rebuilt on every
/// reconciliation pass and mutated only by [`DashboardView::with_recorded`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardView {
  /// The logical day the pass was computed for. Fixed once per pass so a
  /// pass spanning midnight stays internally consistent.
  pub day:      NaiveDate,
  pub schedule: Vec<DailyScheduleItem>,
  pub stats:    Statistics,
}

// ─── Reconciliation ──────────────────────────────────────────────────────────

/// Merge `reminders` and `records` into the schedule view for `day`.
///
/// Records for other days are excluded entirely (they feed only the
/// calendar projection). Records referencing a reminder not present in
/// `reminders` are skipped so orphaned events can never inflate the counts.
/// Should a reminder somehow carry two records for the same day, the last
/// one in `records` wins. Item ordering follows `reminders`.
pub fn reconcile(
  day:       NaiveDate,
  reminders: &[Reminder],
  records:   &[AdherenceRecord],
) -> DashboardView {
  let known: HashSet<Uuid> = reminders.iter().map(|r| r.reminder_id).collect();

  let mut statuses: HashMap<Uuid, DoseStatus> = HashMap::new();
  for rec in records {
    if rec.date != day || !known.contains(&rec.reminder_id) {
      continue;
    }
    // Last write wins on duplicates.
    statuses.insert(rec.reminder_id, rec.status);
  }

  let taken = statuses
    .values()
    .filter(|s| **s == DoseStatus::Taken)
    .count() as u32;
  let missed = statuses
    .values()
    .filter(|s| **s == DoseStatus::Missed)
    .count() as u32;
  let total = reminders.len() as u32;

  let schedule = reminders
    .iter()
    .map(|r| DailyScheduleItem {
      reminder_id:  r.reminder_id,
      drug:         r.drug_name.clone(),
      dosage:       r.dosage.clone(),
      instructions: r.frequency.display().to_owned(),
      times:        r.times.clone(),
      status:       statuses.get(&r.reminder_id).copied(),
    })
    .collect();

  DashboardView {
    day,
    schedule,
    stats: Statistics {
      taken,
      missed,
      total,
      adherence_percent: Statistics::percent(taken, total),
    },
  }
}

// ─── Speculative delta ───────────────────────────────────────────────────────

impl DashboardView {
  /// Apply a status change as a pure snapshot-to-snapshot delta.
  ///
  /// Exactly the item matching `reminder_id` changes (matched by id, not
  /// position); the matching counter is bumped by one and the percentage is
  /// recomputed against the unchanged total. Re-recording the status the
  /// item already shows is a no-op delta. The delta does not know whether
  /// the reminder had the *opposite* status recorded, which ought to be
  /// decremented — the authoritative reload after every write corrects any
  /// resulting skew. If no item matches, the snapshot is returned
  /// unchanged.
  #[must_use]
  pub fn with_recorded(&self, reminder_id: Uuid, status: DoseStatus) -> Self {
    let matched = self
      .schedule
      .iter()
      .find(|i| i.reminder_id == reminder_id);
    match matched {
      None => return self.clone(),
      Some(item) if item.status == Some(status) => return self.clone(),
      Some(_) => {}
    }

    let mut next = self.clone();
    for item in &mut next.schedule {
      if item.reminder_id == reminder_id {
        item.status = Some(status);
      }
    }
    match status {
      DoseStatus::Taken => next.stats.taken += 1,
      DoseStatus::Missed => next.stats.missed += 1,
    }
    next.stats.adherence_percent =
      Statistics::percent(next.stats.taken, next.stats.total);
    next
  }
}
