//! Adherence events — the mutable half of the reconciliation.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Per-reminder, per-day outcome vocabulary.
///
/// Distinct from [`crate::calendar::DayStatus`], which aggregates a whole
/// calendar day; the two vocabularies are kept as separate types and are
/// never merged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DoseStatus {
  Taken,
  Missed,
}

/// A logged event stating whether a reminder was taken or missed on a
/// specific logical day.
///
/// At most one record exists per `(reminder_id, date)` — recording a new
/// status for the same reminder and day overwrites, it never appends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdherenceRecord {
  pub reminder_id: Uuid,
  /// The calendar date the event belongs to, independent of the wall-clock
  /// recording time.
  pub date:        NaiveDate,
  pub status:      DoseStatus,
}
