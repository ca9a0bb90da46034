use super::types::{GenerateOptions, Violation, ViolationKind};
use super::Scheduler;
use crate::calendar::week_start;
use crate::model::{ScheduleEntry, ShiftCode, Staff};
use chrono::{Duration, NaiveDate};
use std::collections::BTreeMap;

/// Passe un planning au crible des règles de service.
///
/// Relevées : double affectation un même jour, travail au lendemain d'une
/// nuit, enchaînement au-delà de la limite, dépassement d'heures cible,
/// dépassement du mix 2×8 h + 2×12 h (semaine pleine à 40 h uniquement),
/// affectation un jour d'indisponibilité.
pub(super) fn detect_violations(
    scheduler: &Scheduler,
    entries: &[ScheduleEntry],
    opts: GenerateOptions,
) -> Vec<Violation> {
    let mut out = Vec::new();

    for person in scheduler.staff() {
        let mut days: BTreeMap<NaiveDate, Vec<ShiftCode>> = BTreeMap::new();
        for e in entries.iter().filter(|e| e.staff_id == person.id) {
            days.entry(e.date).or_default().push(e.shift);
        }
        if days.is_empty() {
            continue;
        }

        for (date, shifts) in &days {
            if shifts.len() > 1 {
                out.push(violation(person, *date, ViolationKind::DoubleBooking));
            }
            if scheduler.is_unavailable(&person.id, *date) {
                out.push(violation(person, *date, ViolationKind::UnavailableDay));
            }
            let next = *date + Duration::days(1);
            if shifts.iter().any(|s| s.is_night()) && days.contains_key(&next) {
                out.push(violation(person, next, ViolationKind::NightRest));
            }
        }

        let mut streak = 0u32;
        let mut prev: Option<NaiveDate> = None;
        for date in days.keys() {
            streak = match prev {
                Some(p) if *date - p == Duration::days(1) => streak + 1,
                _ => 1,
            };
            if streak == opts.max_consecutive_days + 1 {
                out.push(violation(person, *date, ViolationKind::StreakExceeded));
            }
            prev = Some(*date);
        }

        let mut weeks: BTreeMap<NaiveDate, (u32, u32, u32)> = BTreeMap::new();
        for (date, shifts) in &days {
            let bucket = weeks.entry(week_start(*date)).or_default();
            for s in shifts {
                bucket.0 += s.hours();
                match s.hours() {
                    8 => bucket.1 += 1,
                    _ => bucket.2 += 1,
                }
            }
        }
        for (monday, (hours, eight, twelve)) in weeks {
            if hours > person.target_hours {
                out.push(violation(person, monday, ViolationKind::HoursExceeded));
            }
            let full_week =
                person.target_hours == 40 && !scheduler.has_time_off_in_week(&person.id, monday);
            if full_week && (eight > 2 || twelve > 2) {
                out.push(violation(person, monday, ViolationKind::MixExceeded));
            }
        }
    }

    out
}

fn violation(person: &Staff, date: NaiveDate, kind: ViolationKind) -> Violation {
    Violation {
        staff_id: person.id.clone(),
        date,
        kind,
    }
}
