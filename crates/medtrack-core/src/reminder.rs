//! Reminder — the immutable prescription plan item.
//!
//! Reminders are created by a prescriber action, read-only to the engine,
//! and never deleted. Everything the daily view shows about a medication
//! is copied from here.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// How often a medication is scheduled.
///
/// Informational only to the engine: the daily view lists every reminder
/// regardless of frequency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Frequency {
  Daily,
  TwiceDaily,
  Weekly,
}

impl Frequency {
  /// Display string shown as a schedule item's instructions line.
  pub fn display(self) -> &'static str {
    match self {
      Self::Daily => "Daily",
      Self::TwiceDaily => "Twice daily",
      Self::Weekly => "Weekly",
    }
  }
}

/// A standing prescription entry defining a drug, dosage, and schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reminder {
  pub reminder_id: Uuid,
  pub patient_id:  Uuid,
  pub drug_name:   String,
  pub dosage:      String,
  pub frequency:   Frequency,
  /// Ordered times of day (`HH:MM`). Empty means "unscheduled/daily".
  pub times:       Vec<String>,
  /// Free-text course length, e.g. "7 days".
  pub duration:    Option<String>,
  /// Why the medication was prescribed.
  pub reason:      Option<String>,
  /// Server-assigned timestamp; never changes after creation.
  pub created_at:  DateTime<Utc>,
}

/// Input to [`crate::store::ScheduleStore::add_reminder`].
/// `reminder_id` and `created_at` are always set by the store.
#[derive(Debug, Clone, Deserialize)]
pub struct NewReminder {
  pub patient_id: Uuid,
  pub drug_name:  String,
  pub dosage:     String,
  pub frequency:  Frequency,
  #[serde(default)]
  pub times:      Vec<String>,
  pub duration:   Option<String>,
  pub reason:     Option<String>,
}
