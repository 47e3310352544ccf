//! Tests for the pure reconciliation, projection, and month arithmetic.

use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use crate::{
  adherence::{AdherenceRecord, DoseStatus},
  calendar::{DayStatus, MonthRef, project_history},
  reconcile::{Statistics, reconcile},
  reminder::{Frequency, Reminder},
};

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
  NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn reminder(patient_id: Uuid, drug: &str) -> Reminder {
  Reminder {
    reminder_id: Uuid::new_v4(),
    patient_id,
    drug_name: drug.into(),
    dosage: "500mg".into(),
    frequency: Frequency::Daily,
    times: vec!["08:00".into()],
    duration: None,
    reason: None,
    created_at: Utc::now(),
  }
}

fn record(reminder_id: Uuid, date: NaiveDate, status: DoseStatus) -> AdherenceRecord {
  AdherenceRecord { reminder_id, date, status }
}

// ─── Reconciliation ──────────────────────────────────────────────────────────

#[test]
fn empty_history_gives_all_pending() {
  let patient = Uuid::new_v4();
  let today = day(2024, 3, 10);
  let reminders = vec![reminder(patient, "Metformin"), reminder(patient, "VitaminD")];

  let view = reconcile(today, &reminders, &[]);

  assert_eq!(
    view.stats,
    Statistics { taken: 0, missed: 0, total: 2, adherence_percent: 0 }
  );
  assert!(view.schedule.iter().all(|i| i.status.is_none()));
}

#[test]
fn one_taken_record_gives_half_adherence() {
  let patient = Uuid::new_v4();
  let today = day(2024, 3, 10);
  let reminders = vec![reminder(patient, "Metformin"), reminder(patient, "VitaminD")];
  let records = vec![record(reminders[0].reminder_id, today, DoseStatus::Taken)];

  let view = reconcile(today, &reminders, &records);

  assert_eq!(
    view.stats,
    Statistics { taken: 1, missed: 0, total: 2, adherence_percent: 50 }
  );
  assert_eq!(view.schedule[0].status, Some(DoseStatus::Taken));
  assert_eq!(view.schedule[1].status, None);
}

#[test]
fn empty_plan_counts_as_fully_adherent() {
  let today = day(2024, 3, 10);
  let stray = record(Uuid::new_v4(), today, DoseStatus::Taken);

  let view = reconcile(today, &[], &[stray]);

  assert_eq!(view.stats.total, 0);
  assert_eq!(view.stats.adherence_percent, 100);
  assert!(view.schedule.is_empty());
}

#[test]
fn taken_plus_unaccounted_equals_total() {
  let patient = Uuid::new_v4();
  let today = day(2024, 3, 10);
  let reminders: Vec<_> = (0..5).map(|_| reminder(patient, "Drug")).collect();
  let records = vec![
    record(reminders[0].reminder_id, today, DoseStatus::Taken),
    record(reminders[1].reminder_id, today, DoseStatus::Missed),
    record(reminders[2].reminder_id, today, DoseStatus::Taken),
  ];

  let view = reconcile(today, &reminders, &records);

  let unaccounted = view
    .schedule
    .iter()
    .filter(|i| i.status != Some(DoseStatus::Taken))
    .count() as u32;
  assert_eq!(view.stats.taken + unaccounted, view.stats.total);
  assert_eq!(view.stats.total, reminders.len() as u32);
}

#[test]
fn records_for_other_days_are_excluded() {
  let patient = Uuid::new_v4();
  let today = day(2024, 3, 10);
  let reminders = vec![reminder(patient, "Metformin")];
  let records = vec![
    record(reminders[0].reminder_id, day(2024, 3, 9), DoseStatus::Taken),
    record(reminders[0].reminder_id, day(2024, 3, 11), DoseStatus::Missed),
  ];

  let view = reconcile(today, &reminders, &records);

  assert_eq!(view.stats.taken, 0);
  assert_eq!(view.stats.missed, 0);
  assert_eq!(view.schedule[0].status, None);
}

#[test]
fn orphaned_records_never_inflate_counts() {
  let patient = Uuid::new_v4();
  let today = day(2024, 3, 10);
  let reminders = vec![reminder(patient, "Metformin")];
  let records = vec![
    record(reminders[0].reminder_id, today, DoseStatus::Taken),
    // References a reminder that is not in the plan.
    record(Uuid::new_v4(), today, DoseStatus::Taken),
  ];

  let view = reconcile(today, &reminders, &records);

  assert_eq!(view.stats.taken, 1);
  assert_eq!(view.stats.adherence_percent, 100);
}

#[test]
fn duplicate_same_day_records_resolve_last_wins() {
  let patient = Uuid::new_v4();
  let today = day(2024, 3, 10);
  let reminders = vec![reminder(patient, "Metformin")];
  let records = vec![
    record(reminders[0].reminder_id, today, DoseStatus::Taken),
    record(reminders[0].reminder_id, today, DoseStatus::Missed),
  ];

  let view = reconcile(today, &reminders, &records);

  assert_eq!(view.schedule[0].status, Some(DoseStatus::Missed));
  assert_eq!(view.stats.taken, 0);
  assert_eq!(view.stats.missed, 1);
}

#[test]
fn percentage_rounds_to_nearest() {
  assert_eq!(Statistics::percent(1, 3), 33);
  assert_eq!(Statistics::percent(2, 3), 67);
  assert_eq!(Statistics::percent(1, 8), 13);
  assert_eq!(Statistics::percent(0, 0), 100);
}

#[test]
fn item_ordering_follows_reminder_fetch_order() {
  let patient = Uuid::new_v4();
  let today = day(2024, 3, 10);
  let reminders = vec![
    reminder(patient, "Zolpidem"),
    reminder(patient, "Atorvastatin"),
    reminder(patient, "Metformin"),
  ];

  let view = reconcile(today, &reminders, &[]);

  let drugs: Vec<_> = view.schedule.iter().map(|i| i.drug.as_str()).collect();
  assert_eq!(drugs, ["Zolpidem", "Atorvastatin", "Metformin"]);
}

// ─── Speculative delta ───────────────────────────────────────────────────────

#[test]
fn with_recorded_patches_one_item_and_the_stats() {
  let patient = Uuid::new_v4();
  let today = day(2024, 3, 10);
  let reminders = vec![reminder(patient, "Metformin"), reminder(patient, "VitaminD")];
  let view = reconcile(today, &reminders, &[]);

  let patched = view.with_recorded(reminders[1].reminder_id, DoseStatus::Taken);

  assert_eq!(patched.schedule[0].status, None);
  assert_eq!(patched.schedule[1].status, Some(DoseStatus::Taken));
  assert_eq!(
    patched.stats,
    Statistics { taken: 1, missed: 0, total: 2, adherence_percent: 50 }
  );
  // The original snapshot is untouched.
  assert_eq!(view.stats.taken, 0);
}

#[test]
fn with_recorded_unknown_reminder_is_a_no_op() {
  let patient = Uuid::new_v4();
  let today = day(2024, 3, 10);
  let reminders = vec![reminder(patient, "Metformin")];
  let view = reconcile(today, &reminders, &[]);

  let patched = view.with_recorded(Uuid::new_v4(), DoseStatus::Missed);

  assert_eq!(patched, view);
}

#[test]
fn repeating_the_same_patch_is_a_no_op_delta() {
  let patient = Uuid::new_v4();
  let today = day(2024, 3, 10);
  let reminders = vec![reminder(patient, "Metformin"), reminder(patient, "VitaminD")];
  let view = reconcile(today, &reminders, &[]);

  let once = view.with_recorded(reminders[0].reminder_id, DoseStatus::Taken);
  let twice = once.with_recorded(reminders[0].reminder_id, DoseStatus::Taken);

  assert_eq!(twice, once);
  assert_eq!(twice.stats.taken, 1);
}

#[test]
fn conflicting_patches_double_count_until_reloaded() {
  // Two local patches with different statuses for the same reminder do not
  // know about each other; the counters skew until the next full pass.
  let patient = Uuid::new_v4();
  let today = day(2024, 3, 10);
  let reminders = vec![reminder(patient, "Metformin")];
  let view = reconcile(today, &reminders, &[]);

  let skewed = view
    .with_recorded(reminders[0].reminder_id, DoseStatus::Taken)
    .with_recorded(reminders[0].reminder_id, DoseStatus::Missed);

  assert_eq!(skewed.stats.taken + skewed.stats.missed, 2);
  assert_eq!(skewed.stats.total, 1);

  // One reconciliation pass over the authoritative record restores the
  // invariant.
  let records = vec![record(reminders[0].reminder_id, today, DoseStatus::Missed)];
  let reloaded = reconcile(today, &reminders, &records);
  assert_eq!(reloaded.stats.taken + reloaded.stats.missed, 1);
}

// ─── Calendar projection ─────────────────────────────────────────────────────

#[test]
fn full_day_requires_every_reminder_taken() {
  let patient = Uuid::new_v4();
  let reminders = vec![reminder(patient, "A"), reminder(patient, "B")];
  let d = day(2024, 3, 1);
  let records = vec![
    record(reminders[0].reminder_id, d, DoseStatus::Taken),
    record(reminders[1].reminder_id, d, DoseStatus::Taken),
  ];

  let map = project_history(&reminders, &records);
  assert_eq!(map.get(&d), Some(&DayStatus::Full));
}

#[test]
fn partial_day_when_some_doses_pending() {
  let patient = Uuid::new_v4();
  let reminders = vec![reminder(patient, "A"), reminder(patient, "B")];
  let d = day(2024, 3, 1);
  let records = vec![record(reminders[0].reminder_id, d, DoseStatus::Taken)];

  let map = project_history(&reminders, &records);
  assert_eq!(map.get(&d), Some(&DayStatus::Partial));
}

#[test]
fn any_missed_record_marks_the_day_missed() {
  let patient = Uuid::new_v4();
  let reminders = vec![reminder(patient, "A"), reminder(patient, "B")];
  let d = day(2024, 3, 1);
  let records = vec![
    record(reminders[0].reminder_id, d, DoseStatus::Taken),
    record(reminders[1].reminder_id, d, DoseStatus::Missed),
  ];

  let map = project_history(&reminders, &records);
  assert_eq!(map.get(&d), Some(&DayStatus::Missed));
}

#[test]
fn days_without_records_are_absent() {
  let patient = Uuid::new_v4();
  let reminders = vec![reminder(patient, "A")];
  let records = vec![record(
    reminders[0].reminder_id,
    day(2024, 3, 1),
    DoseStatus::Taken,
  )];

  let map = project_history(&reminders, &records);
  assert_eq!(map.len(), 1);
  assert!(!map.contains_key(&day(2024, 3, 2)));
}

#[test]
fn projection_spans_the_full_history() {
  let patient = Uuid::new_v4();
  let reminders = vec![reminder(patient, "A")];
  let records = vec![
    record(reminders[0].reminder_id, day(2024, 1, 5), DoseStatus::Taken),
    record(reminders[0].reminder_id, day(2024, 2, 14), DoseStatus::Missed),
    record(reminders[0].reminder_id, day(2024, 3, 1), DoseStatus::Taken),
  ];

  let map = project_history(&reminders, &records);
  assert_eq!(map.get(&day(2024, 1, 5)), Some(&DayStatus::Full));
  assert_eq!(map.get(&day(2024, 2, 14)), Some(&DayStatus::Missed));
  assert_eq!(map.get(&day(2024, 3, 1)), Some(&DayStatus::Full));
}

#[test]
fn projection_ignores_orphaned_records() {
  let patient = Uuid::new_v4();
  let reminders = vec![reminder(patient, "A")];
  let records = vec![record(Uuid::new_v4(), day(2024, 3, 1), DoseStatus::Missed)];

  let map = project_history(&reminders, &records);
  assert!(map.is_empty());
}

// ─── Month navigation ────────────────────────────────────────────────────────

#[test]
fn shift_normalises_across_year_boundaries() {
  let jan = MonthRef { year: 2024, month: 1 };
  assert_eq!(jan.shift(-1), MonthRef { year: 2023, month: 12 });

  let dec = MonthRef { year: 2023, month: 12 };
  assert_eq!(dec.shift(1), MonthRef { year: 2024, month: 1 });

  assert_eq!(jan.shift(-13), MonthRef { year: 2022, month: 12 });
  assert_eq!(jan.shift(25), MonthRef { year: 2026, month: 2 });
}

#[test]
fn shift_is_reversible_from_any_reference() {
  for year in [1999, 2000, 2023, 2024] {
    for month in 1..=12 {
      let m = MonthRef { year, month };
      assert_eq!(m.shift(1).shift(-1), m);
      assert_eq!(m.shift(-7).shift(7), m);
    }
  }
}

#[test]
fn month_lengths_honour_leap_years() {
  assert_eq!(MonthRef { year: 2024, month: 2 }.days(), 29);
  assert_eq!(MonthRef { year: 2023, month: 2 }.days(), 28);
  assert_eq!(MonthRef { year: 1900, month: 2 }.days(), 28);
  assert_eq!(MonthRef { year: 2000, month: 2 }.days(), 29);
  assert_eq!(MonthRef { year: 2024, month: 4 }.days(), 30);
  assert_eq!(MonthRef { year: 2024, month: 12 }.days(), 31);
}

#[test]
fn month_ref_of_a_date() {
  assert_eq!(
    MonthRef::of(day(2024, 7, 19)),
    MonthRef { year: 2024, month: 7 }
  );
}

#[test]
fn first_day_survives_a_shift() {
  let m = MonthRef { year: 2024, month: 1 };
  assert_eq!(m.first_day(), day(2024, 1, 1));
  assert_eq!(m.shift(-1).first_day(), day(2023, 12, 1));
}
