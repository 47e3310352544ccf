//! Error type for `medtrack-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),

  #[error("uuid parse error: {0}")]
  Uuid(#[from] uuid::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  #[error("unknown status label: {0:?}")]
  UnknownStatus(String),

  #[error("unknown frequency label: {0:?}")]
  UnknownFrequency(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
