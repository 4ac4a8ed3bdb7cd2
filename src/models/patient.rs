use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::clinical::{Allergy, Condition, Immunization, Medication};
use super::demographics::Demographics;
use super::encounter::Encounter;
use super::enums::{ComplexityTier, ConditionStatus, HealthTrajectory, MedicationStatus};
use super::growth::GrowthMeasurement;

/// Age-appropriate social history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SocialHistory {
    pub living_situation: String,
    pub household_size: u8,
    pub school_name: Option<String>,
    pub grade_level: Option<String>,
}

/// The complete generated patient record. Root object handed to export
/// collaborators; carries no generator internals (seeds, stubs, channels).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Patient {
    pub id: String,
    pub demographics: Demographics,
    pub social_history: SocialHistory,
    pub health_trajectory: HealthTrajectory,
    pub complexity_tier: ComplexityTier,
    pub problem_list: Vec<Condition>,
    pub medication_list: Vec<Medication>,
    pub allergy_list: Vec<Allergy>,
    pub immunization_record: Vec<Immunization>,
    pub encounters: Vec<Encounter>,
    pub growth_data: Vec<GrowthMeasurement>,
    pub engine_version: String,
    pub generated_at: NaiveDateTime,
}

impl Patient {
    pub fn active_conditions(&self) -> impl Iterator<Item = &Condition> {
        self.problem_list
            .iter()
            .filter(|c| c.clinical_status == ConditionStatus::Active)
    }

    pub fn active_medications(&self) -> impl Iterator<Item = &Medication> {
        self.medication_list
            .iter()
            .filter(|m| m.status == MedicationStatus::Active)
    }

    pub fn encounter_by_id(&self, id: &str) -> Option<&Encounter> {
        self.encounters.iter().find(|e| e.id == id)
    }
}
