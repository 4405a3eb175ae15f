use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// How often a medication is taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MedicationFrequency {
    OnceDaily,
    TwiceDaily,
    ThreeTimesDaily,
    FourTimesDaily,
    EveryOtherDay,
    Weekly,
    AsNeeded,
    Custom,
}

impl MedicationFrequency {
    pub fn label(&self) -> &'static str {
        match self {
            Self::OnceDaily => "Once daily",
            Self::TwiceDaily => "Twice daily",
            Self::ThreeTimesDaily => "Three times daily",
            Self::FourTimesDaily => "Four times daily",
            Self::EveryOtherDay => "Every other day",
            Self::Weekly => "Weekly",
            Self::AsNeeded => "As needed",
            Self::Custom => "Custom schedule",
        }
    }
}

/// One intake time within a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedicationTime {
    pub hour: u8,
    pub minute: u8,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

/// A medication with its reminder schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Medication {
    pub id: Uuid,
    pub name: String,
    pub dosage: String,
    pub frequency: MedicationFrequency,
    pub start_date: NaiveDate,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    pub times: Vec<MedicationTime>,
    #[serde(default)]
    pub notes: String,
    pub active: bool,
}
