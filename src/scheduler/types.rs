use crate::model::{Role, ScheduleEntry, ShiftCode, StaffId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Ordre de priorité global : 12 h d'abord, journée longue avant courte,
/// la nuit courte en dernier.
pub const SHIFT_PRIORITY: [ShiftCode; 5] = [
    ShiftCode::SixASixP,
    ShiftCode::SixPSixA,
    ShiftCode::SixATwoP,
    ShiftCode::TwoPTenP,
    ShiftCode::TenPSixA,
];

/// Créneaux du matin, préférés pour la passe « max » des soignants.
pub const AM_SHIFT_PREFERENCE: [ShiftCode; 3] = [
    ShiftCode::SixASixP,
    ShiftCode::SixATwoP,
    ShiftCode::TwoPTenP,
];

/// Effectif quotidien visé pour un rôle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleTarget {
    pub min: u32,
    pub max: u32,
}

/// Cible résolue par la passe de remplissage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TargetKind {
    Min,
    Max,
}

/// Options de génération
#[derive(Debug, Clone, Copy)]
pub struct GenerateOptions {
    pub max_consecutive_days: u32,
    pub caregiver_target: RoleTarget,
    pub assistant_target: RoleTarget,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            max_consecutive_days: 4,
            caregiver_target: RoleTarget { min: 7, max: 8 },
            assistant_target: RoleTarget { min: 2, max: 3 },
        }
    }
}

impl GenerateOptions {
    pub fn target_for(&self, role: Role) -> RoleTarget {
        match role {
            Role::Caregiver => self.caregiver_target,
            Role::Assistant => self.assistant_target,
            Role::Supervisor => RoleTarget { min: 0, max: 0 },
        }
    }
}

/// Répartition hebdomadaire 8 h / 12 h d'un membre.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShiftMix {
    pub eight_hour: u32,
    pub twelve_hour: u32,
}

/// Jour/rôle resté sous la cible faute de candidats. Résultat accepté,
/// jamais une erreur.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shortfall {
    pub date: NaiveDate,
    pub role: Role,
    pub kind: TargetKind,
    pub assigned: u32,
    pub target: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkipReason {
    /// Filtre d'éligibilité non passé (indispo, enchaînement, nuit la veille,
    /// déjà affecté).
    Ineligible,
    /// Le créneau demandé ne passe pas le contrôle de capacité.
    OverCapacity,
}

/// Vœu non honoré, conservé pour le rapport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedRequest {
    pub staff_id: StaffId,
    pub date: NaiveDate,
    pub shift: ShiftCode,
    pub reason: SkipReason,
}

/// Relevé d'heures : membre → lundi de semaine → heures cumulées.
pub type WeeklyHours = BTreeMap<StaffId, BTreeMap<NaiveDate, u32>>;

/// Bilan d'une génération.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationReport {
    pub message: String,
    pub assigned_shifts: usize,
    pub weekly_hours: WeeklyHours,
    pub shortfalls: Vec<Shortfall>,
    pub skipped_requests: Vec<SkippedRequest>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViolationKind {
    DoubleBooking,
    NightRest,
    StreakExceeded,
    HoursExceeded,
    MixExceeded,
    UnavailableDay,
}

/// Entorse aux règles relevée par l'audit d'un planning existant.
#[derive(Debug, Clone)]
pub struct Violation {
    pub staff_id: StaffId,
    pub date: NaiveDate,
    pub kind: ViolationKind,
}

/// Résultat terminal d'une génération : les affectations de la plage
/// demandée et le bilan pour l'appelant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Generation {
    pub entries: Vec<ScheduleEntry>,
    pub report: GenerationReport,
}

#[derive(Error, Debug)]
pub enum SchedError {
    #[error("invalid date range: end must not precede start")]
    InvalidRange,
    #[error("unknown staff in request: {0}")]
    UnknownStaff(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
