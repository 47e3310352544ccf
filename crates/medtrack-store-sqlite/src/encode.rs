//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings and logical days as
//! `YYYY-MM-DD`. Times-of-day lists are stored as compact JSON. UUIDs are
//! stored as hyphenated lowercase strings.

use chrono::{DateTime, NaiveDate, Utc};
use medtrack_core::{
  adherence::{AdherenceRecord, DoseStatus},
  reminder::{Frequency, Reminder},
  store::Patient,
};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Uuid ────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── NaiveDate (logical day) ─────────────────────────────────────────────────

pub fn encode_date(d: NaiveDate) -> String { d.format("%Y-%m-%d").to_string() }

pub fn decode_date(s: &str) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(s, "%Y-%m-%d")
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── DoseStatus ──────────────────────────────────────────────────────────────

pub fn encode_status(s: DoseStatus) -> &'static str {
  match s {
    DoseStatus::Taken => "taken",
    DoseStatus::Missed => "missed",
  }
}

pub fn decode_status(s: &str) -> Result<DoseStatus> {
  match s {
    "taken" => Ok(DoseStatus::Taken),
    "missed" => Ok(DoseStatus::Missed),
    other => Err(Error::UnknownStatus(other.to_owned())),
  }
}

// ─── Frequency ───────────────────────────────────────────────────────────────

pub fn encode_frequency(f: Frequency) -> &'static str {
  match f {
    Frequency::Daily => "daily",
    Frequency::TwiceDaily => "twice_daily",
    Frequency::Weekly => "weekly",
  }
}

pub fn decode_frequency(s: &str) -> Result<Frequency> {
  match s {
    "daily" => Ok(Frequency::Daily),
    "twice_daily" => Ok(Frequency::TwiceDaily),
    "weekly" => Ok(Frequency::Weekly),
    other => Err(Error::UnknownFrequency(other.to_owned())),
  }
}

// ─── Times of day ────────────────────────────────────────────────────────────

pub fn encode_times(times: &[String]) -> Result<String> {
  Ok(serde_json::to_string(times)?)
}

pub fn decode_times(s: &str) -> Result<Vec<String>> {
  Ok(serde_json::from_str(s)?)
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw strings read directly from a `reminders` row.
pub struct RawReminder {
  pub reminder_id: String,
  pub patient_id:  String,
  pub drug_name:   String,
  pub dosage:      String,
  pub frequency:   String,
  pub times:       String,
  pub duration:    Option<String>,
  pub reason:      Option<String>,
  pub created_at:  String,
}

impl RawReminder {
  pub fn into_reminder(self) -> Result<Reminder> {
    Ok(Reminder {
      reminder_id: decode_uuid(&self.reminder_id)?,
      patient_id:  decode_uuid(&self.patient_id)?,
      drug_name:   self.drug_name,
      dosage:      self.dosage,
      frequency:   decode_frequency(&self.frequency)?,
      times:       decode_times(&self.times)?,
      duration:    self.duration,
      reason:      self.reason,
      created_at:  decode_dt(&self.created_at)?,
    })
  }
}

/// Raw strings read directly from an `adherence` row.
pub struct RawAdherence {
  pub reminder_id: String,
  pub date:        String,
  pub status:      String,
}

impl RawAdherence {
  pub fn into_record(self) -> Result<AdherenceRecord> {
    Ok(AdherenceRecord {
      reminder_id: decode_uuid(&self.reminder_id)?,
      date:        decode_date(&self.date)?,
      status:      decode_status(&self.status)?,
    })
  }
}

/// Raw strings read directly from a `patients` row.
pub struct RawPatient {
  pub patient_id: String,
  pub username:   String,
}

impl RawPatient {
  pub fn into_patient(self) -> Result<Patient> {
    Ok(Patient {
      patient_id: decode_uuid(&self.patient_id)?,
      username:   self.username,
    })
  }
}
