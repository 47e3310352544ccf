//! Handlers for `/reminders` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/reminders` | Body: a prescription; 201 + the stored reminder |
//! | `GET`  | `/reminders/:patient_id` | Plan in creation order |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use medtrack_core::{
  reminder::{NewReminder, Reminder},
  store::ScheduleStore,
};
use uuid::Uuid;

use crate::error::ApiError;

// ─── Create ──────────────────────────────────────────────────────────────────

/// `POST /reminders` — create a prescription reminder.
///
/// `reminder_id` and `created_at` in the response are server-assigned.
pub async fn create<S>(
  State(store): State<Arc<S>>,
  Json(body): Json<NewReminder>,
) -> Result<impl IntoResponse, ApiError>
where
  S: ScheduleStore,
{
  if body.drug_name.trim().is_empty() {
    return Err(ApiError::BadRequest("drug_name must not be empty".into()));
  }
  if body.dosage.trim().is_empty() {
    return Err(ApiError::BadRequest("dosage must not be empty".into()));
  }

  let reminder = store
    .add_reminder(body)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok((StatusCode::CREATED, Json(reminder)))
}

// ─── List ────────────────────────────────────────────────────────────────────

/// `GET /reminders/:patient_id`
pub async fn list<S>(
  State(store): State<Arc<S>>,
  Path(patient_id): Path<Uuid>,
) -> Result<Json<Vec<Reminder>>, ApiError>
where
  S: ScheduleStore,
{
  let reminders = store
    .fetch_reminders(patient_id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(reminders))
}
