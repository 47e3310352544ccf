//! JSON REST API for medtrack.
//!
//! Exposes an axum [`Router`] backed by any [`medtrack_core::store::ScheduleStore`].
//! Auth, TLS, and transport concerns are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api/v1", medtrack_api::api_router(store.clone()))
//! ```

pub mod adherence;
pub mod error;
pub mod patients;
pub mod reminders;
pub mod views;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post},
};
use medtrack_core::store::ScheduleStore;

pub use error::ApiError;

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: ScheduleStore + 'static,
{
  Router::new()
    // Roster
    .route("/patients", get(patients::roster::<S>))
    // Prescription plan
    .route("/reminders", post(reminders::create::<S>))
    .route("/reminders/{patient_id}", get(reminders::list::<S>))
    // Adherence log
    .route("/adherence", post(adherence::record::<S>))
    .route("/adherence/{patient_id}", get(adherence::list::<S>))
    // Derived read models
    .route("/dashboard/{patient_id}", get(views::dashboard::<S>))
    .route("/calendar/{patient_id}", get(views::calendar::<S>))
    .with_state(store)
}
