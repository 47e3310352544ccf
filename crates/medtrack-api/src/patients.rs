//! Handler for the `/patients` roster endpoint.

use std::sync::Arc;

use axum::{
  Json,
  extract::{Query, State},
};
use medtrack_core::store::{Patient, ScheduleStore};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct RosterParams {
  pub caregiver_id: Uuid,
}

/// `GET /patients?caregiver_id=<id>` — the patients a caregiver monitors.
pub async fn roster<S>(
  State(store): State<Arc<S>>,
  Query(params): Query<RosterParams>,
) -> Result<Json<Vec<Patient>>, ApiError>
where
  S: ScheduleStore,
{
  let patients = store
    .fetch_patients_for(params.caregiver_id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(patients))
}
