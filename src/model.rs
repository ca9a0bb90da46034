use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifiant fort pour Staff
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StaffId(String);

impl StaffId {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().to_owned())
    }
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Rôle d'un membre du personnel. Les superviseurs ne sont jamais
/// planifiés automatiquement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Caregiver,
    Assistant,
    Supervisor,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Caregiver => "Caregiver",
            Role::Assistant => "Assistant",
            Role::Supervisor => "Supervisor",
        }
    }

    pub fn is_schedulable(&self) -> bool {
        !matches!(self, Role::Supervisor)
    }
}

impl std::str::FromStr for Role {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "caregiver" => Ok(Role::Caregiver),
            "assistant" => Ok(Role::Assistant),
            "supervisor" => Ok(Role::Supervisor),
            other => Err(format!("unknown role: {other}")),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Catalogue fixe des créneaux. "6P6A" et "10P6A" sont des nuits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ShiftCode {
    #[serde(rename = "6A6P")]
    SixASixP,
    #[serde(rename = "6A2P")]
    SixATwoP,
    #[serde(rename = "2P10P")]
    TwoPTenP,
    #[serde(rename = "6P6A")]
    SixPSixA,
    #[serde(rename = "10P6A")]
    TenPSixA,
}

/// Les cinq créneaux, dans l'ordre du catalogue.
pub const SHIFT_CATALOG: [ShiftCode; 5] = [
    ShiftCode::SixASixP,
    ShiftCode::SixATwoP,
    ShiftCode::TwoPTenP,
    ShiftCode::SixPSixA,
    ShiftCode::TenPSixA,
];

impl ShiftCode {
    pub fn code(&self) -> &'static str {
        match self {
            ShiftCode::SixASixP => "6A6P",
            ShiftCode::SixATwoP => "6A2P",
            ShiftCode::TwoPTenP => "2P10P",
            ShiftCode::SixPSixA => "6P6A",
            ShiftCode::TenPSixA => "10P6A",
        }
    }

    /// Durée en heures (8 ou 12).
    pub fn hours(&self) -> u32 {
        match self {
            ShiftCode::SixASixP | ShiftCode::SixPSixA => 12,
            ShiftCode::SixATwoP | ShiftCode::TwoPTenP | ShiftCode::TenPSixA => 8,
        }
    }

    /// Nuit ⇒ repos obligatoire le lendemain.
    pub fn is_night(&self) -> bool {
        matches!(self, ShiftCode::SixPSixA | ShiftCode::TenPSixA)
    }
}

impl std::str::FromStr for ShiftCode {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SHIFT_CATALOG
            .iter()
            .copied()
            .find(|c| c.code().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown shift code: {s}"))
    }
}

impl std::fmt::Display for ShiftCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

fn default_target_hours() -> u32 {
    40
}

/// Membre du personnel (immuable pendant une génération)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Staff {
    pub id: StaffId,
    pub name: String,
    pub role: Role,
    #[serde(default = "default_target_hours")]
    pub target_hours: u32,
}

impl Staff {
    pub fn new<N: Into<String>>(name: N, role: Role) -> Self {
        Self {
            id: StaffId::random(),
            name: name.into(),
            role,
            target_hours: default_target_hours(),
        }
    }

    pub fn with_target_hours(mut self, hours: u32) -> Self {
        self.target_hours = hours;
        self
    }
}

/// Indisponibilité ferme pour une date (exclusion dure).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unavailability {
    pub staff_id: StaffId,
    pub date: NaiveDate,
}

/// Vœu de créneau (préférence souple, honorée seulement si les règles passent).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftRequest {
    pub staff_id: StaffId,
    pub date: NaiveDate,
    pub shift: ShiftCode,
}

/// Affectation produite : une entrée par membre et par date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    pub staff_id: StaffId,
    pub date: NaiveDate,
    pub shift: ShiftCode,
}

/// Jeu de données complet persisté sur disque.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Dataset {
    #[serde(default)]
    pub staff: Vec<Staff>,
    #[serde(default)]
    pub unavailability: Vec<Unavailability>,
    #[serde(default)]
    pub requests: Vec<ShiftRequest>,
    #[serde(default)]
    pub schedule: Vec<ScheduleEntry>,
}

impl Dataset {
    pub fn find_staff_by_id<'a>(&'a self, id: &StaffId) -> Option<&'a Staff> {
        self.staff.iter().find(|s| &s.id == id)
    }
    pub fn find_staff_by_name<'a>(&'a self, name: &str) -> Option<&'a Staff> {
        self.staff.iter().find(|s| s.name == name)
    }

    /// Membres planifiables (tous sauf superviseurs).
    pub fn schedulable_staff(&self) -> Vec<Staff> {
        self.staff
            .iter()
            .filter(|s| s.role.is_schedulable())
            .cloned()
            .collect()
    }

    /// Purge les affectations de `[start, end]` avant une régénération ;
    /// le moteur ne fusionne pas avec des entrées déjà présentes dans la plage.
    pub fn clear_schedule_range(&mut self, start: NaiveDate, end: NaiveDate) {
        self.schedule.retain(|e| e.date < start || e.date > end);
    }
}
