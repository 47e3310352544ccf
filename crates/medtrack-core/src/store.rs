//! The `ScheduleStore` trait and the caregiver-roster entry type.
//!
//! The trait is implemented by storage backends (e.g.
//! `medtrack-store-sqlite`). Higher layers (`medtrack-session`,
//! `medtrack-api`) depend on this abstraction, not on any concrete backend.

use std::future::Future;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
  adherence::AdherenceRecord,
  reminder::{NewReminder, Reminder},
};

// ─── Roster entry ────────────────────────────────────────────────────────────

/// A patient as seen on a caregiver's roster. Read-only to this crate;
/// account provisioning happens elsewhere.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Patient {
  pub patient_id: Uuid,
  pub username:   String,
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over the schedule and adherence store backend.
///
/// Reminders are append-only from this crate's perspective. Adherence
/// writes are upserts keyed on `(reminder_id, date)`: recording a new
/// status for the same reminder and day overwrites, it never appends. That
/// single-writer-wins-last-write rule is the store-level enforcement of the
/// one-record-per-reminder-per-day invariant.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (tokio with axum).
pub trait ScheduleStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// All reminders for a patient, in creation order.
  fn fetch_reminders(
    &self,
    patient_id: Uuid,
  ) -> impl Future<Output = Result<Vec<Reminder>, Self::Error>> + Send + '_;

  /// The full adherence history for a patient, all dates.
  fn fetch_adherence(
    &self,
    patient_id: Uuid,
  ) -> impl Future<Output = Result<Vec<AdherenceRecord>, Self::Error>> + Send + '_;

  /// Upsert one adherence record; last write wins per `(reminder_id, date)`.
  fn write_adherence(
    &self,
    record: AdherenceRecord,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Create and persist a new reminder (a prescriber action).
  /// `reminder_id` and `created_at` are assigned by the store.
  fn add_reminder(
    &self,
    input: NewReminder,
  ) -> impl Future<Output = Result<Reminder, Self::Error>> + Send + '_;

  /// The roster of patients monitored by a caregiver.
  fn fetch_patients_for(
    &self,
    caregiver_id: Uuid,
  ) -> impl Future<Output = Result<Vec<Patient>, Self::Error>> + Send + '_;
}
