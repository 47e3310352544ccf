//! The per-patient dashboard session and optimistic update coordinator.

use std::{collections::BTreeMap, sync::Arc};

use chrono::{Local, NaiveDate};
use medtrack_core::{
  Error, Result,
  adherence::{AdherenceRecord, DoseStatus},
  calendar::{DayStatus, project_history},
  reconcile::{DashboardView, reconcile},
  store::ScheduleStore,
};
use uuid::Uuid;

use crate::fetch_err;

/// One patient's live dashboard state.
///
/// The snapshot is mutated in exactly two ways: replaced wholesale by a
/// reconciliation pass, or replaced by the pure speculative delta in
/// [`PatientSession::record_status`]. Nothing else touches it.
pub struct PatientSession<S> {
  store:      Arc<S>,
  patient_id: Uuid,
  /// Latest derived snapshot; `None` until the first successful refresh.
  view:       Option<DashboardView>,
  /// One-line user-visible notice shown after a failure.
  notice:     Option<String>,
}

impl<S: ScheduleStore> PatientSession<S> {
  pub fn new(store: Arc<S>, patient_id: Uuid) -> Self {
    Self {
      store,
      patient_id,
      view: None,
      notice: None,
    }
  }

  /// The latest snapshot, if any refresh has succeeded yet.
  pub fn view(&self) -> Option<&DashboardView> {
    self.view.as_ref()
  }

  /// The pending user-visible notice, if any.
  pub fn notice(&self) -> Option<&str> {
    self.notice.as_deref()
  }

  // ── Reconciliation ────────────────────────────────────────────────────────

  /// Run a full reconciliation pass for the current logical day.
  pub async fn refresh(&mut self) -> Result<&DashboardView> {
    // The day is pinned once here; a pass spanning midnight stays
    // internally consistent.
    let day = Local::now().date_naive();
    self.refresh_for(day).await
  }

  /// Run a full reconciliation pass pinned to an explicit day.
  ///
  /// On a fetch failure the previous (possibly stale) snapshot is left
  /// untouched rather than cleared.
  pub async fn refresh_for(&mut self, day: NaiveDate) -> Result<&DashboardView> {
    let reminders = self
      .store
      .fetch_reminders(self.patient_id)
      .await
      .map_err(|e| self.fetch_failed("reminders", e))?;
    let records = self
      .store
      .fetch_adherence(self.patient_id)
      .await
      .map_err(|e| self.fetch_failed("adherence records", e))?;

    self.notice = None;
    Ok(self.view.insert(reconcile(day, &reminders, &records)))
  }

  fn fetch_failed(&mut self, collection: &'static str, source: S::Error) -> Error {
    self.notice = Some(format!("Could not refresh your {collection}."));
    fetch_err(collection, source)
  }

  // ── Optimistic status recording ───────────────────────────────────────────

  /// Record that a reminder was taken or missed today.
  ///
  /// The ordering here is load-bearing: the local patch lands before the
  /// persist call so the view gives immediate feedback, and a failed
  /// persist rolls back by reloading the authoritative store — there is no
  /// targeted undo. Calling twice with the same arguments is safe: the
  /// store upserts on `(reminder_id, date)` and the second local patch is
  /// a no-op delta.
  pub async fn record_status(
    &mut self,
    reminder_id: Uuid,
    status: DoseStatus,
  ) -> Result<()> {
    let day = match self.view.as_ref() {
      Some(v) => v.day,
      None => self.refresh().await?.day,
    };

    // 1. Local apply: a new speculative snapshot replaces the current one.
    if let Some(v) = self.view.take() {
      self.view = Some(v.with_recorded(reminder_id, status));
    }

    // 2. Persist against the snapshot's logical day.
    let record = AdherenceRecord { reminder_id, date: day, status };
    if let Err(e) = self.store.write_adherence(record).await {
      tracing::warn!(
        reminder_id = %reminder_id,
        error = %e,
        "adherence write failed; resynchronising from the store"
      );
      let write_err = Error::Write(Box::new(e));

      // 3. Rollback: discard the speculative patch by reloading the truth.
      // If the reload itself fails, the stale view stays per fetch policy
      // and the next successful pass resynchronises.
      let _ = self.refresh().await;
      self.notice =
        Some("Could not save your update; your schedule was reloaded.".into());
      return Err(write_err);
    }

    // On success no further action is needed: the local state will be
    // confirmed, not corrected, by the next reconciliation pass.
    Ok(())
  }

  // ── Calendar ──────────────────────────────────────────────────────────────

  /// Project the patient's full adherence history for the month grid.
  pub async fn calendar(&self) -> Result<BTreeMap<NaiveDate, DayStatus>> {
    let reminders = self
      .store
      .fetch_reminders(self.patient_id)
      .await
      .map_err(|e| fetch_err("reminders", e))?;
    let records = self
      .store
      .fetch_adherence(self.patient_id)
      .await
      .map_err(|e| fetch_err("adherence records", e))?;

    Ok(project_history(&reminders, &records))
  }
}
