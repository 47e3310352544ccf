//! Handlers for `/adherence` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/adherence` | Upsert one record; responds `{"success": true}` |
//! | `GET`  | `/adherence/:patient_id` | Full history, all dates |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
};
use medtrack_core::{adherence::AdherenceRecord, store::ScheduleStore};
use serde_json::{Value, json};
use uuid::Uuid;

use crate::error::ApiError;

// ─── Record ──────────────────────────────────────────────────────────────────

/// `POST /adherence` — record a dose status for a day.
///
/// Writing again for the same `(reminder_id, date)` overwrites; there is
/// never more than one record per reminder per day.
pub async fn record<S>(
  State(store): State<Arc<S>>,
  Json(record): Json<AdherenceRecord>,
) -> Result<Json<Value>, ApiError>
where
  S: ScheduleStore,
{
  store
    .write_adherence(record)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(json!({ "success": true })))
}

// ─── List ────────────────────────────────────────────────────────────────────

/// `GET /adherence/:patient_id`
pub async fn list<S>(
  State(store): State<Arc<S>>,
  Path(patient_id): Path<Uuid>,
) -> Result<Json<Vec<AdherenceRecord>>, ApiError>
where
  S: ScheduleStore,
{
  let records = store
    .fetch_adherence(patient_id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(records))
}
