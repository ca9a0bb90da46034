use super::state::ConstraintState;
use super::{GenerateOptions, Scheduler};
use crate::model::{Role, Staff, StaffId};
use chrono::{Duration, NaiveDate};
use std::collections::HashSet;

/// Meilleur candidat affectable ce jour pour un rôle donné.
///
/// Filtres, tous bloquants : rôle exact, pas d'indisponibilité ce jour,
/// enchaînement sous la limite, pas déjà affecté, pas de nuit la veille.
/// `specific` restreint à un seul membre (passe de pré-affectation) ;
/// `skipped` écarte les membres déjà passés dans la passe courante.
///
/// Sans cible nommée, les candidats sont classés par heures hebdomadaires
/// croissantes ; le tri est stable, l'ordre du registre départage les
/// ex æquo.
pub(super) fn best_candidate<'a>(
    scheduler: &'a Scheduler,
    state: &ConstraintState,
    role: Role,
    date: NaiveDate,
    week: NaiveDate,
    specific: Option<&StaffId>,
    skipped: &HashSet<StaffId>,
    opts: GenerateOptions,
) -> Option<&'a Staff> {
    let yesterday = date - Duration::days(1);

    let mut candidates: Vec<&Staff> = scheduler
        .staff()
        .iter()
        .filter(|person| {
            if let Some(id) = specific {
                if &person.id != id {
                    return false;
                }
            }
            if person.role != role {
                return false;
            }
            if skipped.contains(&person.id) {
                return false;
            }
            if scheduler.is_unavailable(&person.id, date) {
                return false;
            }
            if state.streak(&person.id) >= opts.max_consecutive_days {
                return false;
            }
            if state.is_assigned(&person.id, date) {
                return false;
            }
            if state
                .shift_on(&person.id, yesterday)
                .is_some_and(|shift| shift.is_night())
            {
                return false;
            }
            true
        })
        .collect();

    if specific.is_none() {
        candidates.sort_by_key(|person| state.week_hours(&person.id, week));
    }

    candidates.first().copied()
}
