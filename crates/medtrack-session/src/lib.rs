//! In-memory view sessions over a [`medtrack_core::store::ScheduleStore`].
//!
//! A session owns the derived `{schedule, stats}` snapshot for one patient
//! and keeps it consistent with the store: full rebuilds via reconciliation
//! passes, speculative local patches for immediate feedback, and
//! rollback-by-reload when a write fails. One logical actor mutates a
//! session at a time; there is no locking discipline here.

pub mod caregiver;
pub mod patient;

pub use caregiver::{CalendarSource, CaregiverSession};
pub use patient::PatientSession;

use medtrack_core::Error;

/// Wrap a store fetch failure, logging it on the way through.
pub(crate) fn fetch_err<E>(collection: &'static str, source: E) -> Error
where
  E: std::error::Error + Send + Sync + 'static,
{
  tracing::warn!(collection, error = %source, "fetch failed");
  Error::Fetch { collection, source: Box::new(source) }
}
