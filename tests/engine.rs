#![forbid(unsafe_code)]
use chrono::NaiveDate;
use std::collections::HashMap;
use wardroster::scheduler::{GenerateOptions, RoleTarget, SchedError, SkipReason};
use wardroster::{
    Role, ScheduleEntry, Scheduler, ShiftCode, ShiftRequest, Staff, StaffId, Unavailability,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn member(id: &str, role: Role) -> Staff {
    Staff {
        id: StaffId::new(id),
        name: id.to_string(),
        role,
        target_hours: 40,
    }
}

fn ward_roster(caregivers: usize, assistants: usize) -> Vec<Staff> {
    let mut staff = Vec::new();
    for i in 0..caregivers {
        staff.push(member(&format!("c{i:02}"), Role::Caregiver));
    }
    for i in 0..assistants {
        staff.push(member(&format!("a{i:02}"), Role::Assistant));
    }
    staff
}

fn solo_options() -> GenerateOptions {
    GenerateOptions {
        caregiver_target: RoleTarget { min: 1, max: 1 },
        assistant_target: RoleTarget { min: 0, max: 0 },
        ..GenerateOptions::default()
    }
}

#[test]
fn full_roster_week_meets_quotas_and_caps() {
    let scheduler = Scheduler::new(ward_roster(16, 6), &[], Vec::new());
    let monday = date(2026, 1, 5);
    let sunday = date(2026, 1, 11);

    let gen = scheduler
        .generate(&[], monday, sunday, GenerateOptions::default())
        .unwrap();

    assert!(gen.report.shortfalls.is_empty());
    assert_eq!(gen.report.assigned_shifts, 7 * (8 + 3));

    let mut day = monday;
    while day <= sunday {
        let caregivers = gen
            .entries
            .iter()
            .filter(|e| e.date == day && e.staff_id.as_str().starts_with('c'))
            .count();
        let assistants = gen
            .entries
            .iter()
            .filter(|e| e.date == day && e.staff_id.as_str().starts_with('a'))
            .count();
        assert_eq!(caregivers, 8, "caregivers on {day}");
        assert_eq!(assistants, 3, "assistants on {day}");
        day = day.succ_opt().unwrap();
    }

    // jamais deux entrées le même jour pour un même membre
    let mut seen = HashMap::new();
    for e in &gen.entries {
        assert!(
            seen.insert((e.staff_id.clone(), e.date), e.shift).is_none(),
            "double booking for {} on {}",
            e.staff_id.as_str(),
            e.date
        );
    }

    // semaine pleine à 40 h : au plus 2×8 h et 2×12 h, total ≤ 40 h
    let mut per_staff: HashMap<StaffId, (u32, u32, u32)> = HashMap::new();
    for e in &gen.entries {
        let t = per_staff.entry(e.staff_id.clone()).or_default();
        t.0 += e.shift.hours();
        match e.shift.hours() {
            8 => t.1 += 1,
            _ => t.2 += 1,
        }
    }
    for (id, (hours, eight, twelve)) in per_staff {
        assert!(hours <= 40, "{} works {hours}h", id.as_str());
        assert!(eight <= 2, "{} has {eight} eight-hour shifts", id.as_str());
        assert!(twelve <= 2, "{} has {twelve} twelve-hour shifts", id.as_str());
    }
}

#[test]
fn generation_is_deterministic() {
    let monday = date(2026, 1, 5);
    let sunday = date(2026, 1, 11);

    let first = Scheduler::new(ward_roster(16, 6), &[], Vec::new())
        .generate(&[], monday, sunday, GenerateOptions::default())
        .unwrap();
    let second = Scheduler::new(ward_roster(16, 6), &[], Vec::new())
        .generate(&[], monday, sunday, GenerateOptions::default())
        .unwrap();

    assert_eq!(first.entries, second.entries);
    assert_eq!(
        first.report.assigned_shifts,
        second.report.assigned_shifts
    );
}

#[test]
fn understaffed_day_records_shortfalls_without_error() {
    let scheduler = Scheduler::new(ward_roster(2, 1), &[], Vec::new());
    let day = date(2026, 1, 5);

    let gen = scheduler
        .generate(&[], day, day, GenerateOptions::default())
        .unwrap();

    // 2 soignants sur 7, 1 assistant sur 2 : déficits consignés, pas d'échec
    assert_eq!(gen.entries.len(), 3);
    assert_eq!(gen.report.shortfalls.len(), 4);
    assert!(gen.report.shortfalls.iter().all(|s| s.date == day));
}

#[test]
fn unavailable_day_is_excluded_and_mix_relaxed() {
    let cara = member("cara", Role::Caregiver);
    let wednesday = date(2026, 1, 7);
    let unavailability = vec![Unavailability {
        staff_id: cara.id.clone(),
        date: wednesday,
    }];

    let scheduler = Scheduler::new(vec![cara], &unavailability, Vec::new());
    let gen = scheduler
        .generate(&[], date(2026, 1, 5), date(2026, 1, 11), solo_options())
        .unwrap();

    assert!(gen.entries.iter().all(|e| e.date != wednesday));

    // quota de mix levé : trois 12 h la même semaine, plafond d'heures tenu
    let twelves = gen.entries.iter().filter(|e| e.shift.hours() == 12).count();
    let hours: u32 = gen.entries.iter().map(|e| e.shift.hours()).sum();
    assert_eq!(gen.entries.len(), 3);
    assert_eq!(twelves, 3);
    assert!(hours <= 40);
}

#[test]
fn eligible_request_is_honored_verbatim() {
    let cara = member("cara", Role::Caregiver);
    let wednesday = date(2026, 1, 7);
    let requests = vec![ShiftRequest {
        staff_id: cara.id.clone(),
        date: wednesday,
        shift: ShiftCode::TwoPTenP,
    }];

    let scheduler = Scheduler::new(vec![cara], &[], requests);
    let gen = scheduler
        .generate(&[], wednesday, wednesday, solo_options())
        .unwrap();

    assert_eq!(gen.entries.len(), 1);
    assert_eq!(gen.entries[0].shift, ShiftCode::TwoPTenP);
    assert!(gen.report.skipped_requests.is_empty());
}

#[test]
fn night_request_rejected_when_next_day_already_scheduled() {
    let cara = member("cara", Role::Caregiver);
    let friday = date(2026, 1, 9);
    let requests = vec![ShiftRequest {
        staff_id: cara.id.clone(),
        date: friday,
        shift: ShiftCode::TenPSixA,
    }];
    // déjà planifiée le samedi, hors plage
    let history = vec![ScheduleEntry {
        staff_id: cara.id.clone(),
        date: date(2026, 1, 10),
        shift: ShiftCode::SixATwoP,
    }];

    let scheduler = Scheduler::new(vec![cara], &[], requests);
    let gen = scheduler
        .generate(&history, friday, friday, solo_options())
        .unwrap();

    // le vœu de nuit est écarté, les passes normales reprennent la main
    assert_eq!(gen.report.skipped_requests.len(), 1);
    assert_eq!(
        gen.report.skipped_requests[0].reason,
        SkipReason::OverCapacity
    );
    assert_eq!(gen.entries.len(), 1);
    assert_eq!(gen.entries[0].date, friday);
    assert_ne!(gen.entries[0].shift, ShiftCode::TenPSixA);
}

#[test]
fn night_shift_forces_rest_the_next_day() {
    let cara = member("cara", Role::Caregiver);
    let monday = date(2026, 1, 5);
    let requests = vec![ShiftRequest {
        staff_id: cara.id.clone(),
        date: monday,
        shift: ShiftCode::SixPSixA,
    }];

    let scheduler = Scheduler::new(vec![cara], &[], requests);
    let gen = scheduler
        .generate(&[], monday, date(2026, 1, 7), solo_options())
        .unwrap();

    let by_date: HashMap<NaiveDate, ShiftCode> =
        gen.entries.iter().map(|e| (e.date, e.shift)).collect();
    assert_eq!(by_date.get(&monday), Some(&ShiftCode::SixPSixA));
    assert!(!by_date.contains_key(&date(2026, 1, 6)), "rest after night");
    assert!(by_date.contains_key(&date(2026, 1, 7)), "eligible again");
}

#[test]
fn consecutive_days_capped_at_four() {
    // cible 60 h pour que le plafond d'heures ne masque pas l'enchaînement
    let cara = member("cara", Role::Caregiver).with_target_hours(60);
    let scheduler = Scheduler::new(vec![cara], &[], Vec::new());

    let gen = scheduler
        .generate(&[], date(2026, 1, 5), date(2026, 1, 11), solo_options())
        .unwrap();

    // lun–jeu travaillés, vendredi imposé au repos
    assert!(gen.entries.iter().all(|e| e.date != date(2026, 1, 9)));

    let mut worked: Vec<NaiveDate> = gen.entries.iter().map(|e| e.date).collect();
    worked.sort();
    let mut streak = 1;
    for pair in worked.windows(2) {
        streak = if pair[1] == pair[0].succ_opt().unwrap() {
            streak + 1
        } else {
            1
        };
        assert!(streak <= 4);
    }
}

#[test]
fn lookback_window_seeds_weekly_hours_and_mix() {
    let cara = member("cara", Role::Caregiver);
    // 24 h déjà travaillées en début de semaine, deux 12 h
    let history = vec![
        ScheduleEntry {
            staff_id: cara.id.clone(),
            date: date(2026, 1, 5),
            shift: ShiftCode::SixASixP,
        },
        ScheduleEntry {
            staff_id: cara.id.clone(),
            date: date(2026, 1, 6),
            shift: ShiftCode::SixASixP,
        },
    ];

    let scheduler = Scheduler::new(vec![cara], &[], Vec::new());
    let gen = scheduler
        .generate(&history, date(2026, 1, 8), date(2026, 1, 9), solo_options())
        .unwrap();

    // quota de 12 h atteint : la suite de la semaine bascule sur du 8 h
    assert_eq!(gen.entries.len(), 2);
    assert!(gen.entries.iter().all(|e| e.shift.hours() == 8));
    // l'historique d'amorçage n'est jamais réémis
    assert!(gen.entries.iter().all(|e| e.date >= date(2026, 1, 8)));
}

#[test]
fn night_in_history_blocks_first_range_day() {
    let cara = member("cara", Role::Caregiver);
    let history = vec![ScheduleEntry {
        staff_id: cara.id.clone(),
        date: date(2026, 1, 7),
        shift: ShiftCode::SixPSixA,
    }];

    let scheduler = Scheduler::new(vec![cara], &[], Vec::new());
    let gen = scheduler
        .generate(&history, date(2026, 1, 8), date(2026, 1, 9), solo_options())
        .unwrap();

    assert!(gen.entries.iter().all(|e| e.date != date(2026, 1, 8)));
    assert!(gen.entries.iter().any(|e| e.date == date(2026, 1, 9)));
}

#[test]
fn supervisors_are_never_scheduled() {
    let mut staff = ward_roster(1, 0);
    staff.push(member("boss", Role::Supervisor));

    let scheduler = Scheduler::new(staff, &[], Vec::new());
    let day = date(2026, 1, 5);
    let gen = scheduler
        .generate(&[], day, day, GenerateOptions::default())
        .unwrap();

    assert!(gen.entries.iter().all(|e| e.staff_id.as_str() != "boss"));
}

#[test]
fn reversed_range_is_refused() {
    let scheduler = Scheduler::new(ward_roster(1, 0), &[], Vec::new());
    let err = scheduler
        .generate(
            &[],
            date(2026, 1, 9),
            date(2026, 1, 5),
            GenerateOptions::default(),
        )
        .unwrap_err();
    assert!(matches!(err, SchedError::InvalidRange));
}

#[test]
fn request_for_unknown_staff_is_refused() {
    let day = date(2026, 1, 5);
    let requests = vec![ShiftRequest {
        staff_id: StaffId::new("ghost"),
        date: day,
        shift: ShiftCode::SixASixP,
    }];

    let scheduler = Scheduler::new(ward_roster(1, 0), &[], requests);
    let err = scheduler
        .generate(&[], day, day, GenerateOptions::default())
        .unwrap_err();
    assert!(matches!(err, SchedError::UnknownStaff(_)));
}
