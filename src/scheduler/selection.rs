use super::state::ConstraintState;
use super::types::SHIFT_PRIORITY;
use super::Scheduler;
use crate::model::{Staff, ShiftCode};
use chrono::{Duration, NaiveDate};

/// Contrôle de capacité : ce membre peut-il prendre ce créneau ?
///
/// 1. Anticipation de nuit : une nuit est refusée si le lendemain est déjà
///    planifié.
/// 2. Semaine avec indisponibilité : quota de mix levé, seul le plafond
///    d'heures cible tient.
/// 3. Sinon : plafond d'heures, et pour une cible de 40 h, au plus deux
///    créneaux de 12 h et deux de 8 h par semaine.
pub(super) fn can_take_shift(
    scheduler: &Scheduler,
    state: &ConstraintState,
    person: &Staff,
    shift: ShiftCode,
    date: NaiveDate,
    week: NaiveDate,
) -> bool {
    if shift.is_night() && state.is_assigned(&person.id, date + Duration::days(1)) {
        return false;
    }

    let current_hours = state.week_hours(&person.id, week);

    if scheduler.has_time_off_in_week(&person.id, week) {
        return current_hours + shift.hours() <= person.target_hours;
    }

    if current_hours + shift.hours() > person.target_hours {
        return false;
    }
    if person.target_hours == 40 {
        let mix = state.week_mix(&person.id, week);
        if shift.hours() == 12 && mix.twelve_hour >= 2 {
            return false;
        }
        if shift.hours() == 8 && mix.eight_hour >= 2 {
            return false;
        }
    }
    true
}

/// Meilleur créneau pour un membre éligible ce jour.
///
/// Semaine pleine (cible 40 h, aucune indisponibilité) : le mix équilibré
/// prime — 12 h tant que le compte de 12 h est sous 2, puis 8 h tant que le
/// compte de 8 h est sous 2, enfin l'ordre de priorité global. Sinon la
/// liste de préférences s'applique telle quelle, ou à défaut l'ordre global
/// reclassé vers le créneau le moins servi du jour.
pub(super) fn best_shift(
    scheduler: &Scheduler,
    state: &ConstraintState,
    person: &Staff,
    date: NaiveDate,
    week: NaiveDate,
    preferred: Option<&[ShiftCode]>,
) -> Option<ShiftCode> {
    let has_time_off = scheduler.has_time_off_in_week(&person.id, week);

    let ordered: Vec<ShiftCode> = if !has_time_off && person.target_hours == 40 {
        let mix = state.week_mix(&person.id, week);
        if mix.twelve_hour < 2 {
            hours_first(preferred.unwrap_or(&SHIFT_PRIORITY), 12)
        } else if mix.eight_hour < 2 {
            hours_first(preferred.unwrap_or(&SHIFT_PRIORITY), 8)
        } else {
            preferred.unwrap_or(&SHIFT_PRIORITY).to_vec()
        }
    } else {
        match preferred {
            Some(list) => list.to_vec(),
            None => {
                // étale les affectations du jour entre créneaux ; tri stable,
                // l'ordre de priorité départage
                let mut codes = SHIFT_PRIORITY.to_vec();
                codes.sort_by_key(|code| state.shift_count(date, *code));
                codes
            }
        }
    };

    ordered
        .into_iter()
        .find(|shift| can_take_shift(scheduler, state, person, *shift, date, week))
}

/// Reclasse une liste de créneaux : durée demandée d'abord, ordre relatif
/// conservé.
fn hours_first(codes: &[ShiftCode], hours: u32) -> Vec<ShiftCode> {
    let mut ordered: Vec<ShiftCode> = codes.iter().copied().filter(|c| c.hours() == hours).collect();
    ordered.extend(codes.iter().copied().filter(|c| c.hours() != hours));
    ordered
}
