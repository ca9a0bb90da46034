use super::types::{ShiftMix, WeeklyHours};
use crate::calendar::week_start;
use crate::model::{Role, ScheduleEntry, ShiftCode, Staff, StaffId};
use chrono::{Duration, NaiveDate};
use std::collections::HashMap;

/// État de contraintes d'une génération : heures hebdomadaires, mix 8 h/12 h,
/// enchaînements de jours, plus les index `(membre, jour)` et `(jour, rôle)`.
///
/// Toute affectation passe par [`ConstraintState::record`] : heures, mix et
/// index sont mis à jour d'un bloc avant le contrôle d'éligibilité suivant.
#[derive(Debug)]
pub(super) struct ConstraintState {
    hours: HashMap<StaffId, HashMap<NaiveDate, u32>>,
    mix: HashMap<StaffId, HashMap<NaiveDate, ShiftMix>>,
    streak: HashMap<StaffId, u32>,
    by_day: HashMap<(StaffId, NaiveDate), ShiftCode>,
    role_counts: HashMap<(NaiveDate, Role), u32>,
    shift_counts: HashMap<(NaiveDate, ShiftCode), u32>,
    entries: Vec<ScheduleEntry>,
}

impl ConstraintState {
    /// Amorce l'état depuis l'historique. Les heures et le mix ne sont
    /// alimentés que par la fenêtre `[start − 7 j, start)` ; toute entrée
    /// hors plage reste indexée par jour pour les règles d'adjacence
    /// (nuit la veille, anticipation de nuit). Les entrées de membres
    /// inconnus ne comptent pas et n'interrompent rien.
    pub fn seed(
        staff: &[Staff],
        history: &[ScheduleEntry],
        start: NaiveDate,
        end: NaiveDate,
    ) -> Self {
        let mut state = Self {
            hours: HashMap::new(),
            mix: HashMap::new(),
            streak: HashMap::new(),
            by_day: HashMap::new(),
            role_counts: HashMap::new(),
            shift_counts: HashMap::new(),
            entries: Vec::new(),
        };
        for s in staff {
            state.hours.insert(s.id.clone(), HashMap::new());
            state.mix.insert(s.id.clone(), HashMap::new());
            state.streak.insert(s.id.clone(), 0);
        }

        let lookback_start = start - Duration::days(7);
        for entry in history {
            if entry.date >= start && entry.date <= end {
                // la plage cible doit avoir été purgée par l'appelant
                continue;
            }
            if !state.hours.contains_key(&entry.staff_id) {
                continue;
            }
            state
                .by_day
                .insert((entry.staff_id.clone(), entry.date), entry.shift);
            state.entries.push(entry.clone());

            if entry.date >= lookback_start && entry.date < start {
                let week = week_start(entry.date);
                state.add_hours_and_mix(&entry.staff_id, week, entry.shift);
            }
        }
        state
    }

    fn add_hours_and_mix(&mut self, id: &StaffId, week: NaiveDate, shift: ShiftCode) {
        if let Some(weeks) = self.hours.get_mut(id) {
            *weeks.entry(week).or_insert(0) += shift.hours();
        }
        if let Some(weeks) = self.mix.get_mut(id) {
            let mix = weeks.entry(week).or_default();
            match shift.hours() {
                8 => mix.eight_hour += 1,
                _ => mix.twelve_hour += 1,
            }
        }
    }

    /// Valide une affectation : entrée ajoutée et compteurs à jour, en une
    /// seule étape.
    pub fn record(&mut self, staff: &Staff, date: NaiveDate, shift: ShiftCode) {
        self.entries.push(ScheduleEntry {
            staff_id: staff.id.clone(),
            date,
            shift,
        });
        self.by_day.insert((staff.id.clone(), date), shift);
        *self.role_counts.entry((date, staff.role)).or_insert(0) += 1;
        *self.shift_counts.entry((date, shift)).or_insert(0) += 1;
        self.add_hours_and_mix(&staff.id, week_start(date), shift);
    }

    pub fn week_hours(&self, id: &StaffId, week: NaiveDate) -> u32 {
        self.hours
            .get(id)
            .and_then(|w| w.get(&week))
            .copied()
            .unwrap_or(0)
    }

    pub fn week_mix(&self, id: &StaffId, week: NaiveDate) -> ShiftMix {
        self.mix
            .get(id)
            .and_then(|w| w.get(&week))
            .copied()
            .unwrap_or_default()
    }

    pub fn streak(&self, id: &StaffId) -> u32 {
        self.streak.get(id).copied().unwrap_or(0)
    }

    pub fn is_assigned(&self, id: &StaffId, date: NaiveDate) -> bool {
        self.by_day.contains_key(&(id.clone(), date))
    }

    pub fn shift_on(&self, id: &StaffId, date: NaiveDate) -> Option<ShiftCode> {
        self.by_day.get(&(id.clone(), date)).copied()
    }

    pub fn role_count(&self, date: NaiveDate, role: Role) -> u32 {
        self.role_counts.get(&(date, role)).copied().unwrap_or(0)
    }

    pub fn shift_count(&self, date: NaiveDate, shift: ShiftCode) -> u32 {
        self.shift_counts.get(&(date, shift)).copied().unwrap_or(0)
    }

    /// Fin de journée : +1 pour les membres affectés, remise à zéro sinon.
    pub fn update_streaks(&mut self, staff: &[Staff], date: NaiveDate) {
        for s in staff {
            let worked = self.by_day.contains_key(&(s.id.clone(), date));
            let counter = self.streak.entry(s.id.clone()).or_insert(0);
            if worked {
                *counter += 1;
            } else {
                *counter = 0;
            }
        }
    }

    /// Relevé d'heures trié pour le rapport.
    pub fn weekly_hours_snapshot(&self) -> WeeklyHours {
        self.hours
            .iter()
            .map(|(id, weeks)| {
                let weeks = weeks.iter().map(|(w, h)| (*w, *h)).collect();
                (id.clone(), weeks)
            })
            .collect()
    }

    /// Entrées de la plage demandée ; l'historique d'amorçage n'est jamais
    /// réécrit.
    pub fn into_range_entries(self, start: NaiveDate, end: NaiveDate) -> Vec<ScheduleEntry> {
        self.entries
            .into_iter()
            .filter(|e| e.date >= start && e.date <= end)
            .collect()
    }
}
