use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::clinical::{CodeableConcept, Immunization, Location, Medication, Provider};
use super::enums::{EncounterType, PlanCategory};
use super::growth::GrowthPercentiles;

/// Vital signs recorded at one encounter. Blood pressure is absent below
/// 36 months; body measurements are present only when a growth measurement
/// was taken at the visit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VitalSigns {
    pub temperature_f: f64,
    pub heart_rate: u32,
    pub respiratory_rate: u32,
    pub blood_pressure_systolic: Option<u32>,
    pub blood_pressure_diastolic: Option<u32>,
    pub oxygen_saturation: f64,
    pub weight_kg: Option<f64>,
    pub height_cm: Option<f64>,
    pub head_circumference_cm: Option<f64>,
}

/// Physical examination findings by body system.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PhysicalExam {
    pub general: Option<String>,
    pub heent: Option<String>,
    pub neck: Option<String>,
    pub cardiovascular: Option<String>,
    pub respiratory: Option<String>,
    pub abdomen: Option<String>,
    pub musculoskeletal: Option<String>,
    pub skin: Option<String>,
    pub neurological: Option<String>,
}

/// One assessment line for an encounter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Assessment {
    pub diagnosis: String,
    /// Absent when the messiness layer omits the code on purpose.
    pub code: Option<CodeableConcept>,
    pub is_primary: bool,
}

/// One item of the treatment plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanItem {
    pub category: PlanCategory,
    pub description: String,
    pub details: Option<String>,
}

impl PlanItem {
    pub fn new(category: PlanCategory, description: &str) -> Self {
        Self {
            category,
            description: description.to_string(),
            details: None,
        }
    }

    pub fn with_details(category: PlanCategory, description: &str, details: &str) -> Self {
        Self {
            category,
            description: description.to_string(),
            details: Some(details.to_string()),
        }
    }
}

/// A fully materialized clinical encounter. Immutable after creation; the
/// messiness pass builds a derived copy rather than editing in place.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Encounter {
    pub id: String,
    pub date: NaiveDateTime,
    pub encounter_type: EncounterType,
    pub chief_complaint: String,
    pub provider: Provider,
    pub location: Location,
    pub vital_signs: VitalSigns,
    pub physical_exam: PhysicalExam,
    pub assessment: Vec<Assessment>,
    pub plan: Vec<PlanItem>,
    pub prescriptions: Vec<Medication>,
    pub immunizations_given: Vec<Immunization>,
    pub growth_percentiles: Option<GrowthPercentiles>,
    pub anticipatory_guidance: Vec<String>,
    pub narrative_note: Option<String>,
}

impl Encounter {
    pub fn primary_assessment(&self) -> Option<&Assessment> {
        self.assessment.iter().find(|a| a.is_primary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plan_item_constructors() {
        let item = PlanItem::new(PlanCategory::FollowUp, "Return in 3 months");
        assert!(item.details.is_none());
        let item = PlanItem::with_details(
            PlanCategory::Education,
            "Anticipatory guidance provided",
            "Safe sleep practices",
        );
        assert_eq!(item.details.as_deref(), Some("Safe sleep practices"));
    }
}
