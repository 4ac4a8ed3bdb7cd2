use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::enums::{
    AllergyCategory, AllergySeverity, ConditionStatus, MedicationStatus,
};
use super::short_id;

/// A coded concept: coding system, code value, display text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodeableConcept {
    pub system: String,
    pub code: String,
    pub display: String,
}

impl CodeableConcept {
    pub fn icd10(code: &str, display: &str) -> Self {
        Self {
            system: crate::knowledge::ICD10_SYSTEM.to_string(),
            code: code.to_string(),
            display: display.to_string(),
        }
    }

    pub fn cvx(code: &str, display: &str) -> Self {
        Self {
            system: crate::knowledge::CVX_SYSTEM.to_string(),
            code: code.to_string(),
            display: display.to_string(),
        }
    }

    pub fn rxnorm(code: &str, display: &str) -> Self {
        Self {
            system: crate::knowledge::RXNORM_SYSTEM.to_string(),
            code: code.to_string(),
            display: display.to_string(),
        }
    }
}

impl std::fmt::Display for CodeableConcept {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.display, self.code)
    }
}

/// A problem-list entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Condition {
    pub id: String,
    pub display_name: String,
    /// Absent when the messiness layer omits the code on purpose.
    pub code: Option<CodeableConcept>,
    pub clinical_status: ConditionStatus,
    pub onset_date: NaiveDate,
    pub abatement_date: Option<NaiveDate>,
}

impl Condition {
    pub fn active(display_name: &str, code: CodeableConcept, onset_date: NaiveDate) -> Self {
        Self {
            id: short_id(),
            display_name: display_name.to_string(),
            code: Some(code),
            clinical_status: ConditionStatus::Active,
            onset_date,
            abatement_date: None,
        }
    }
}

/// A prescription or medication-list entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Medication {
    pub id: String,
    pub code: Option<CodeableConcept>,
    pub display_name: String,
    pub status: MedicationStatus,
    pub dose: String,
    pub frequency: String,
    pub route: String,
    pub prn: bool,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub indication: Option<String>,
    pub discontinuation_reason: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AllergyReaction {
    pub manifestation: String,
    pub severity: AllergySeverity,
}

/// An allergy or intolerance record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Allergy {
    pub id: String,
    pub display_name: String,
    pub category: AllergyCategory,
    pub code: Option<CodeableConcept>,
    pub criticality: String,
    pub reactions: Vec<AllergyReaction>,
    pub onset_date: Option<NaiveDate>,
}

/// An administered vaccine dose.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Immunization {
    pub id: String,
    pub vaccine_code: CodeableConcept,
    pub display_name: String,
    pub date: NaiveDate,
    pub dose_number: u8,
}

/// The clinician attached to generated encounters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Provider {
    pub id: String,
    pub name: String,
    pub credentials: String,
    pub specialty: String,
}

/// The clinic attached to generated encounters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Location {
    pub id: String,
    pub name: String,
    pub kind: String,
}
