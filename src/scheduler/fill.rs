use super::state::ConstraintState;
use super::types::{Shortfall, TargetKind};
use super::{eligibility, selection, GenerateOptions, Scheduler};
use crate::model::{Role, ShiftCode};
use chrono::NaiveDate;
use std::collections::HashSet;

/// Remplit un rôle jusqu'à sa cible du jour.
///
/// Un membre éligible sans créneau valable est écarté de la passe courante
/// seulement : il reste candidat pour les passes suivantes du même jour.
/// Plus aucun candidat sous la cible ⇒ déficit consigné, jamais d'erreur.
pub(super) fn fill_day(
    scheduler: &Scheduler,
    state: &mut ConstraintState,
    role: Role,
    kind: TargetKind,
    date: NaiveDate,
    week: NaiveDate,
    preferred: Option<&[ShiftCode]>,
    opts: GenerateOptions,
    shortfalls: &mut Vec<Shortfall>,
) {
    let targets = opts.target_for(role);
    let target = match kind {
        TargetKind::Min => targets.min,
        TargetKind::Max => targets.max,
    };

    let mut passed_over: HashSet<_> = HashSet::new();

    loop {
        let assigned = state.role_count(date, role);
        if assigned >= target {
            return;
        }

        let Some(person) = eligibility::best_candidate(
            scheduler,
            state,
            role,
            date,
            week,
            None,
            &passed_over,
            opts,
        ) else {
            shortfalls.push(Shortfall {
                date,
                role,
                kind,
                assigned,
                target,
            });
            return;
        };

        match selection::best_shift(scheduler, state, person, date, week, preferred) {
            Some(shift) => state.record(person, date, shift),
            None => {
                passed_over.insert(person.id.clone());
            }
        }
    }
}
