mod audit;
mod eligibility;
mod fill;
mod selection;
mod state;
mod types;

pub use types::{
    GenerateOptions, Generation, GenerationReport, RoleTarget, SchedError, ShiftMix, Shortfall,
    SkipReason, SkippedRequest, TargetKind, Violation, ViolationKind, WeeklyHours,
    AM_SHIFT_PREFERENCE, SHIFT_PRIORITY,
};

use crate::calendar::{week_dates, week_start};
use crate::model::{Role, ScheduleEntry, ShiftCode, ShiftRequest, Staff, StaffId, Unavailability};
use anyhow::anyhow;
use chrono::NaiveDate;
use state::ConstraintState;
use std::collections::{HashMap, HashSet};

/// Moteur d'affectation : registre figé du personnel planifiable,
/// indisponibilités et vœux indexés, puis génération jour par jour.
///
/// Séquentiel de bout en bout ; une génération traite sa plage entière sans
/// partager d'état mutable. Deux générations concurrentes sur la même plage
/// relèvent de la discipline de l'appelant.
#[derive(Debug, Default)]
pub struct Scheduler {
    staff: Vec<Staff>,
    unavailability: HashMap<StaffId, HashSet<NaiveDate>>,
    requests: Vec<ShiftRequest>,
}

impl Scheduler {
    /// Construit le moteur sur un instantané des entrées. Les superviseurs
    /// sont écartés d'emblée.
    pub fn new(
        staff: Vec<Staff>,
        unavailability: &[Unavailability],
        requests: Vec<ShiftRequest>,
    ) -> Self {
        let staff: Vec<Staff> = staff
            .into_iter()
            .filter(|s| s.role.is_schedulable())
            .collect();

        let mut map: HashMap<StaffId, HashSet<NaiveDate>> = HashMap::new();
        for u in unavailability {
            map.entry(u.staff_id.clone()).or_default().insert(u.date);
        }

        Self {
            staff,
            unavailability: map,
            requests,
        }
    }

    pub fn staff(&self) -> &[Staff] {
        &self.staff
    }

    pub(crate) fn is_unavailable(&self, id: &StaffId, date: NaiveDate) -> bool {
        self.unavailability
            .get(id)
            .is_some_and(|dates| dates.contains(&date))
    }

    /// Indisponibilité quelque part dans la semaine de `monday` ⇒ le quota
    /// de mix est levé pour cette semaine.
    pub(crate) fn has_time_off_in_week(&self, id: &StaffId, monday: NaiveDate) -> bool {
        let Some(dates) = self.unavailability.get(id) else {
            return false;
        };
        week_dates(monday).iter().any(|d| dates.contains(d))
    }

    /// Génère les affectations de `[start, end]`.
    ///
    /// Amorçage depuis l'historique (fenêtre de 7 jours pour heures et mix),
    /// puis par jour : pré-affectation des vœux, quatre passes de
    /// remplissage dans l'ordre fixe soignant/min, assistant/min,
    /// soignant/max (préférence matin), assistant/max, et mise à jour des
    /// enchaînements. Les déficits et vœux écartés sont consignés dans le
    /// rapport, pas signalés en erreur.
    pub fn generate(
        &self,
        history: &[ScheduleEntry],
        start: NaiveDate,
        end: NaiveDate,
        opts: GenerateOptions,
    ) -> Result<Generation, SchedError> {
        if end < start {
            return Err(SchedError::InvalidRange);
        }
        for req in &self.requests {
            if req.date >= start
                && req.date <= end
                && !self.staff.iter().any(|s| s.id == req.staff_id)
            {
                return Err(SchedError::UnknownStaff(req.staff_id.as_str().to_owned()));
            }
        }

        let mut state = ConstraintState::seed(&self.staff, history, start, end);

        let mut requests_by_day: HashMap<NaiveDate, Vec<&ShiftRequest>> = HashMap::new();
        for req in &self.requests {
            requests_by_day.entry(req.date).or_default().push(req);
        }

        let mut shortfalls = Vec::new();
        let mut skipped_requests = Vec::new();

        let mut date = start;
        while date <= end {
            let week = week_start(date);

            if let Some(day_requests) = requests_by_day.get(&date) {
                for &req in day_requests {
                    self.preassign(req, &mut state, date, week, opts, &mut skipped_requests);
                }
            }

            let passes: [(Role, TargetKind, Option<&[ShiftCode]>); 4] = [
                (Role::Caregiver, TargetKind::Min, None),
                (Role::Assistant, TargetKind::Min, None),
                (Role::Caregiver, TargetKind::Max, Some(&AM_SHIFT_PREFERENCE)),
                (Role::Assistant, TargetKind::Max, None),
            ];
            for (role, kind, preferred) in passes {
                fill::fill_day(
                    self,
                    &mut state,
                    role,
                    kind,
                    date,
                    week,
                    preferred,
                    opts,
                    &mut shortfalls,
                );
            }

            state.update_streaks(&self.staff, date);

            date = date
                .succ_opt()
                .ok_or_else(|| SchedError::Other(anyhow!("date overflow")))?;
        }

        let weekly_hours = state.weekly_hours_snapshot();
        let entries = state.into_range_entries(start, end);
        let report = GenerationReport {
            message: "schedule generated with all staffing rules applied".to_owned(),
            assigned_shifts: entries.len(),
            weekly_hours,
            shortfalls,
            skipped_requests,
        };
        Ok(Generation { entries, report })
    }

    /// Passe de pré-affectation d'un vœu : éligibilité ciblée puis contrôle
    /// de capacité sur le créneau demandé. Un refus est consigné et le
    /// membre retombe dans les passes normales du jour.
    fn preassign(
        &self,
        req: &ShiftRequest,
        state: &mut ConstraintState,
        date: NaiveDate,
        week: NaiveDate,
        opts: GenerateOptions,
        skipped: &mut Vec<SkippedRequest>,
    ) {
        let Some(person) = self.staff.iter().find(|s| s.id == req.staff_id) else {
            return;
        };

        let eligible = eligibility::best_candidate(
            self,
            state,
            person.role,
            date,
            week,
            Some(&person.id),
            &HashSet::new(),
            opts,
        )
        .is_some();

        if !eligible {
            skipped.push(SkippedRequest {
                staff_id: req.staff_id.clone(),
                date,
                shift: req.shift,
                reason: SkipReason::Ineligible,
            });
            return;
        }

        if selection::can_take_shift(self, state, person, req.shift, date, week) {
            state.record(person, date, req.shift);
        } else {
            skipped.push(SkippedRequest {
                staff_id: req.staff_id.clone(),
                date,
                shift: req.shift,
                reason: SkipReason::OverCapacity,
            });
        }
    }

    /// Audit d'un planning existant contre les règles de service.
    pub fn audit(&self, entries: &[ScheduleEntry], opts: GenerateOptions) -> Vec<Violation> {
        audit::detect_violations(self, entries, opts)
    }
}
