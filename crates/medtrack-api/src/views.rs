//! Handlers for the derived read models.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET` | `/dashboard/:patient_id` | Reconciled view for the server's today |
//! | `GET` | `/calendar/:patient_id` | `date -> DayStatus` over the full history |

use std::{collections::BTreeMap, sync::Arc};

use axum::{
  Json,
  extract::{Path, State},
};
use chrono::{Local, NaiveDate};
use medtrack_core::{
  calendar::{DayStatus, project_history},
  reconcile::{DashboardView, reconcile},
  store::ScheduleStore,
};
use uuid::Uuid;

use crate::error::ApiError;

// ─── Dashboard ───────────────────────────────────────────────────────────────

/// `GET /dashboard/:patient_id`
///
/// The logical day is pinned to the server's local date once per request,
/// so a midnight rollover mid-request cannot split the view.
pub async fn dashboard<S>(
  State(store): State<Arc<S>>,
  Path(patient_id): Path<Uuid>,
) -> Result<Json<DashboardView>, ApiError>
where
  S: ScheduleStore,
{
  let today = Local::now().date_naive();

  let reminders = store
    .fetch_reminders(patient_id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  let records = store
    .fetch_adherence(patient_id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;

  Ok(Json(reconcile(today, &reminders, &records)))
}

// ─── Calendar ────────────────────────────────────────────────────────────────

/// `GET /calendar/:patient_id`
pub async fn calendar<S>(
  State(store): State<Arc<S>>,
  Path(patient_id): Path<Uuid>,
) -> Result<Json<BTreeMap<NaiveDate, DayStatus>>, ApiError>
where
  S: ScheduleStore,
{
  let reminders = store
    .fetch_reminders(patient_id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  let records = store
    .fetch_adherence(patient_id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;

  Ok(Json(project_history(&reminders, &records)))
}
