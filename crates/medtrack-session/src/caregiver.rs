//! Read-only caregiver views: the patient roster and per-patient data.

use std::{collections::BTreeMap, sync::Arc};

use chrono::{Local, NaiveDate};
use medtrack_core::{
  Result,
  calendar::{DayStatus, project_history},
  reconcile::{DashboardView, reconcile},
  store::{Patient, ScheduleStore},
};
use uuid::Uuid;

use crate::fetch_err;

/// Where a calendar view gets its day statuses from.
pub enum CalendarSource {
  /// Fetch the patient's history and project it.
  Patient(Uuid),
  /// Day statuses the caller already holds (e.g. a screen that fetched the
  /// patient's data itself). Used verbatim; nothing is re-fetched or
  /// re-aggregated.
  Supplied(BTreeMap<NaiveDate, DayStatus>),
}

/// A caregiver's window onto their patients. Holds no snapshot of its own;
/// every view is rebuilt on request.
pub struct CaregiverSession<S> {
  store:        Arc<S>,
  caregiver_id: Uuid,
}

impl<S: ScheduleStore> CaregiverSession<S> {
  pub fn new(store: Arc<S>, caregiver_id: Uuid) -> Self {
    Self { store, caregiver_id }
  }

  /// The patients this caregiver monitors.
  pub async fn roster(&self) -> Result<Vec<Patient>> {
    self
      .store
      .fetch_patients_for(self.caregiver_id)
      .await
      .map_err(|e| fetch_err("patient roster", e))
  }

  /// A monitored patient's dashboard for the current logical day.
  pub async fn patient_dashboard(&self, patient_id: Uuid) -> Result<DashboardView> {
    let day = Local::now().date_naive();
    let reminders = self
      .store
      .fetch_reminders(patient_id)
      .await
      .map_err(|e| fetch_err("reminders", e))?;
    let records = self
      .store
      .fetch_adherence(patient_id)
      .await
      .map_err(|e| fetch_err("adherence records", e))?;

    Ok(reconcile(day, &reminders, &records))
  }

  /// A month-grid mapping for a patient, or for data the caller supplied.
  pub async fn patient_calendar(
    &self,
    source: CalendarSource,
  ) -> Result<BTreeMap<NaiveDate, DayStatus>> {
    match source {
      CalendarSource::Supplied(map) => Ok(map),
      CalendarSource::Patient(patient_id) => {
        let reminders = self
          .store
          .fetch_reminders(patient_id)
          .await
          .map_err(|e| fetch_err("reminders", e))?;
        let records = self
          .store
          .fetch_adherence(patient_id)
          .await
          .map_err(|e| fetch_err("adherence records", e))?;
        Ok(project_history(&reminders, &records))
      }
    }
  }
}
