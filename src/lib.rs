#![forbid(unsafe_code)]
//! Wardroster — planification locale de gardes de service (sans BD).
//!
//! - Stockage fichiers (JSON/CSV).
//! - Moteur glouton jour par jour : quotas par rôle, plafonds d'heures
//!   hebdomadaires, mix 8 h/12 h, repos après nuit, enchaînements limités.
//! - Continuité avec les plannings antérieurs via une fenêtre de 7 jours.
//! - Dates calendaires pures (`NaiveDate`) ; aucun fuseau en jeu.

pub mod calendar;
pub mod io;
pub mod model;
pub mod report;
pub mod scheduler;
pub mod storage;

pub use calendar::{day_key, week_key, week_start};
pub use model::{
    Dataset, Role, ScheduleEntry, ShiftCode, ShiftRequest, Staff, StaffId, Unavailability,
    SHIFT_CATALOG,
};
pub use report::{SummaryRenderer, TextSummary};
pub use scheduler::{
    GenerateOptions, Generation, GenerationReport, SchedError, Scheduler, Shortfall,
    SkippedRequest, Violation, ViolationKind,
};
pub use storage::{JsonStorage, Storage};
