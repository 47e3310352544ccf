//! [`SqliteStore`] — the SQLite implementation of [`ScheduleStore`].

use std::path::Path;

use chrono::Utc;
use uuid::Uuid;

use medtrack_core::{
  adherence::AdherenceRecord,
  reminder::{NewReminder, Reminder},
  store::{Patient, ScheduleStore},
};

use crate::{
  Result,
  encode::{
    RawAdherence, RawPatient, RawReminder, encode_date, encode_dt,
    encode_frequency, encode_status, encode_times, encode_uuid,
  },
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A medtrack schedule store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Create and persist a patient record.
  ///
  /// Roster seeding only — credentials and account provisioning live
  /// outside this store.
  pub async fn add_patient(
    &self,
    username: &str,
    caregiver_id: Option<Uuid>,
  ) -> Result<Patient> {
    let patient = Patient {
      patient_id: Uuid::new_v4(),
      username:   username.to_owned(),
    };

    let id_str        = encode_uuid(patient.patient_id);
    let username_str  = patient.username.clone();
    let caregiver_str = caregiver_id.map(encode_uuid);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO patients (patient_id, username, caregiver_id)
           VALUES (?1, ?2, ?3)",
          rusqlite::params![id_str, username_str, caregiver_str],
        )?;
        Ok(())
      })
      .await?;

    Ok(patient)
  }
}

// ─── ScheduleStore impl ──────────────────────────────────────────────────────

impl ScheduleStore for SqliteStore {
  type Error = crate::Error;

  async fn fetch_reminders(&self, patient_id: Uuid) -> Result<Vec<Reminder>> {
    let patient_str = encode_uuid(patient_id);

    let raws: Vec<RawReminder> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT reminder_id, patient_id, drug_name, dosage, frequency,
                  times, duration, reason, created_at
           FROM reminders
           WHERE patient_id = ?1
           ORDER BY rowid",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![patient_str], |row| {
            Ok(RawReminder {
              reminder_id: row.get(0)?,
              patient_id:  row.get(1)?,
              drug_name:   row.get(2)?,
              dosage:      row.get(3)?,
              frequency:   row.get(4)?,
              times:       row.get(5)?,
              duration:    row.get(6)?,
              reason:      row.get(7)?,
              created_at:  row.get(8)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawReminder::into_reminder).collect()
  }

  async fn fetch_adherence(&self, patient_id: Uuid) -> Result<Vec<AdherenceRecord>> {
    let patient_str = encode_uuid(patient_id);

    let raws: Vec<RawAdherence> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT a.reminder_id, a.date, a.status
           FROM adherence a
           JOIN reminders r ON r.reminder_id = a.reminder_id
           WHERE r.patient_id = ?1
           ORDER BY a.date, a.rowid",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![patient_str], |row| {
            Ok(RawAdherence {
              reminder_id: row.get(0)?,
              date:        row.get(1)?,
              status:      row.get(2)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawAdherence::into_record).collect()
  }

  async fn write_adherence(&self, record: AdherenceRecord) -> Result<()> {
    let reminder_str = encode_uuid(record.reminder_id);
    let date_str     = encode_date(record.date);
    let status_str   = encode_status(record.status).to_owned();

    self
      .conn
      .call(move |conn| {
        // Last write wins per (reminder, day).
        conn.execute(
          "INSERT INTO adherence (reminder_id, date, status)
           VALUES (?1, ?2, ?3)
           ON CONFLICT (reminder_id, date) DO UPDATE SET status = excluded.status",
          rusqlite::params![reminder_str, date_str, status_str],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn add_reminder(&self, input: NewReminder) -> Result<Reminder> {
    let reminder = Reminder {
      reminder_id: Uuid::new_v4(),
      patient_id:  input.patient_id,
      drug_name:   input.drug_name,
      dosage:      input.dosage,
      frequency:   input.frequency,
      times:       input.times,
      duration:    input.duration,
      reason:      input.reason,
      created_at:  Utc::now(),
    };

    let reminder_str  = encode_uuid(reminder.reminder_id);
    let patient_str   = encode_uuid(reminder.patient_id);
    let drug_name     = reminder.drug_name.clone();
    let dosage        = reminder.dosage.clone();
    let frequency_str = encode_frequency(reminder.frequency).to_owned();
    let times_str     = encode_times(&reminder.times)?;
    let duration      = reminder.duration.clone();
    let reason        = reminder.reason.clone();
    let created_str   = encode_dt(reminder.created_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO reminders (
             reminder_id, patient_id, drug_name, dosage, frequency,
             times, duration, reason, created_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
          rusqlite::params![
            reminder_str,
            patient_str,
            drug_name,
            dosage,
            frequency_str,
            times_str,
            duration,
            reason,
            created_str,
          ],
        )?;
        Ok(())
      })
      .await?;

    Ok(reminder)
  }

  async fn fetch_patients_for(&self, caregiver_id: Uuid) -> Result<Vec<Patient>> {
    let caregiver_str = encode_uuid(caregiver_id);

    let raws: Vec<RawPatient> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT patient_id, username
           FROM patients
           WHERE caregiver_id = ?1
           ORDER BY username",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![caregiver_str], |row| {
            Ok(RawPatient {
              patient_id: row.get(0)?,
              username:   row.get(1)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawPatient::into_patient).collect()
  }
}
