//! Narrative note generation seam.
//!
//! The enrichment collaborator (an external LLM service) is optional: the
//! engine calls through the `NarrativeClient` trait and substitutes the
//! built-in template note whenever the collaborator is absent or fails.
//! A failed enrichment never corrupts or skips structured generation.

use crate::error::GenerationError;
use crate::models::{age_description, Demographics, Encounter};

/// Structured context handed to the enrichment collaborator alongside the
/// prompt. Collaborators return plain text.
#[derive(Debug, Clone)]
pub struct NarrativeContext {
    pub patient_name: String,
    pub age_description: String,
    pub sex: String,
    pub visit_type: String,
    pub chief_complaint: String,
    pub vitals_summary: String,
    pub exam_summary: String,
    pub assessment_summary: String,
    pub plan_summary: String,
}

impl NarrativeContext {
    pub fn from_encounter(
        encounter: &Encounter,
        demographics: &Demographics,
        age_months: u32,
    ) -> Self {
        let vs = &encounter.vital_signs;
        let mut vitals_parts = vec![
            format!("Temp {}F", vs.temperature_f),
            format!("HR {}", vs.heart_rate),
            format!("RR {}", vs.respiratory_rate),
            format!("SpO2 {}%", vs.oxygen_saturation),
        ];
        if let Some(weight) = vs.weight_kg {
            vitals_parts.push(format!("Wt {weight}kg"));
        }

        let pe = &encounter.physical_exam;
        let exam_summary = [
            ("General", &pe.general),
            ("HEENT", &pe.heent),
            ("CV", &pe.cardiovascular),
            ("Resp", &pe.respiratory),
            ("Abd", &pe.abdomen),
            ("Skin", &pe.skin),
        ]
        .iter()
        .filter_map(|(label, finding)| {
            finding.as_ref().map(|f| format!("{label}: {f}"))
        })
        .collect::<Vec<_>>()
        .join("; ");

        Self {
            patient_name: demographics.full_name(),
            age_description: age_description(age_months),
            sex: demographics.sex_at_birth.as_str().to_string(),
            visit_type: encounter.encounter_type.display(),
            chief_complaint: encounter.chief_complaint.clone(),
            vitals_summary: vitals_parts.join(", "),
            exam_summary,
            assessment_summary: encounter
                .assessment
                .iter()
                .map(|a| a.diagnosis.clone())
                .collect::<Vec<_>>()
                .join(", "),
            plan_summary: encounter
                .plan
                .iter()
                .map(|p| p.description.clone())
                .collect::<Vec<_>>()
                .join("; "),
        }
    }
}

/// Narrative enrichment collaborator. Implementations are blocking; the
/// engine treats any error as `EnrichmentUnavailable` and falls back.
pub trait NarrativeClient {
    fn generate_note(&self, context: &NarrativeContext) -> Result<String, GenerationError>;
}

/// Deterministic template note, the non-LLM fallback path.
pub fn template_note(
    encounter: &Encounter,
    demographics: &Demographics,
    age_months: u32,
) -> String {
    let mut note = format!(
        "PATIENT: {}\nDATE: {}\nVISIT TYPE: {}\n\nCHIEF COMPLAINT: {}\n\n\
         HISTORY OF PRESENT ILLNESS:\n{} {} presenting for {}.\n\nVITAL SIGNS:\n",
        demographics.full_name(),
        encounter.date.format("%Y-%m-%d"),
        encounter.encounter_type.display(),
        encounter.chief_complaint,
        age_description(age_months),
        demographics.sex_at_birth.as_str(),
        encounter.chief_complaint.to_lowercase(),
    );

    let vs = &encounter.vital_signs;
    note.push_str(&format!("Temperature: {}F\n", vs.temperature_f));
    note.push_str(&format!("Heart Rate: {} bpm\n", vs.heart_rate));
    note.push_str(&format!("Respiratory Rate: {}\n", vs.respiratory_rate));
    if let (Some(sys), Some(dia)) = (vs.blood_pressure_systolic, vs.blood_pressure_diastolic) {
        note.push_str(&format!("Blood Pressure: {sys}/{dia} mmHg\n"));
    }
    note.push_str(&format!("O2 Saturation: {}%\n", vs.oxygen_saturation));
    if let Some(weight) = vs.weight_kg {
        note.push_str(&format!("Weight: {weight} kg\n"));
    }
    if let Some(height) = vs.height_cm {
        note.push_str(&format!("Height: {height} cm\n"));
    }

    if let Some(gp) = &encounter.growth_percentiles {
        note.push_str("\nGROWTH PERCENTILES:\n");
        if let Some(p) = gp.weight_percentile {
            note.push_str(&format!("Weight: {p}th percentile\n"));
        }
        if let Some(p) = gp.height_percentile {
            note.push_str(&format!("Height: {p}th percentile\n"));
        }
        if let Some(p) = gp.hc_percentile {
            note.push_str(&format!("Head Circumference: {p}th percentile\n"));
        }
        if let Some(p) = gp.bmi_percentile {
            note.push_str(&format!("BMI: {p}th percentile\n"));
        }
    }

    note.push_str("\nPHYSICAL EXAMINATION:\n");
    let pe = &encounter.physical_exam;
    for (label, finding) in [
        ("General", &pe.general),
        ("HEENT", &pe.heent),
        ("Neck", &pe.neck),
        ("Cardiovascular", &pe.cardiovascular),
        ("Respiratory", &pe.respiratory),
        ("Abdomen", &pe.abdomen),
        ("Musculoskeletal", &pe.musculoskeletal),
        ("Skin", &pe.skin),
        ("Neurological", &pe.neurological),
    ] {
        if let Some(f) = finding {
            note.push_str(&format!("{label}: {f}\n"));
        }
    }

    note.push_str("\nASSESSMENT:\n");
    for (i, a) in encounter.assessment.iter().enumerate() {
        note.push_str(&format!("{}. {}\n", i + 1, a.diagnosis));
    }

    note.push_str("\nPLAN:\n");
    for p in &encounter.plan {
        note.push_str(&format!("- {}", p.description));
        if let Some(details) = &p.details {
            note.push_str(&format!(": {details}"));
        }
        note.push('\n');
    }

    if !encounter.immunizations_given.is_empty() {
        note.push_str("\nIMMUNIZATIONS ADMINISTERED:\n");
        for imm in &encounter.immunizations_given {
            note.push_str(&format!("- {}\n", imm.display_name));
        }
    }

    if !encounter.anticipatory_guidance.is_empty() {
        note.push_str("\nANTICIPATORY GUIDANCE:\n");
        for guidance in &encounter.anticipatory_guidance {
            note.push_str(&format!("- {guidance}\n"));
        }
    }

    note.push_str(&format!(
        "\nSigned: {}, {}\n",
        encounter.provider.name, encounter.provider.credentials
    ));

    note
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::GenContext;
    use crate::engine::{materialize_encounter, EncounterStub, LifeArc};
    use crate::models::*;
    use chrono::NaiveDate;

    struct FailingClient;

    impl NarrativeClient for FailingClient {
        fn generate_note(&self, _context: &NarrativeContext) -> Result<String, GenerationError> {
            Err(GenerationError::EnrichmentUnavailable("offline".into()))
        }
    }

    fn sample_encounter() -> (Encounter, Demographics) {
        let demographics = Demographics {
            given_name: "Luna".into(),
            family_name: "Smith".into(),
            date_of_birth: NaiveDate::from_ymd_opt(2020, 6, 1).unwrap(),
            sex_at_birth: Sex::Female,
            race: "White".into(),
            ethnicity: "Not Hispanic or Latino".into(),
            preferred_language: "English".into(),
            address: Address {
                line1: "14 Pine Court".into(),
                city: "Fairview".into(),
                state: "IL".into(),
                postal_code: "60010".into(),
                country: "US".into(),
            },
            phone: "(555) 321-7788".into(),
            emergency_contact: Contact {
                name: "Grace Smith".into(),
                relationship: "Mother".into(),
                phone: "(555) 321-7789".into(),
            },
            legal_guardian: None,
        };
        let stub = EncounterStub {
            date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            encounter_type: EncounterType::WellChild,
            reason: "Well-child visit - 4 year old".into(),
            conditions_to_address: vec![],
            is_new_condition_diagnosis: false,
            new_condition: None,
        };
        let provider = Provider {
            id: short_id(),
            name: "Dr. Emily Patel".into(),
            credentials: "MD".into(),
            specialty: "Pediatrics".into(),
        };
        let location = Location {
            id: short_id(),
            name: "Main Street Pediatrics".into(),
            kind: "Outpatient clinic".into(),
        };
        let mut ctx = GenContext::from_seed(Some(42));
        let encounter = materialize_encounter(
            &stub,
            &demographics,
            48,
            None,
            &LifeArc::healthy(),
            &provider,
            &location,
            &mut ctx,
        );
        (encounter, demographics)
    }

    #[test]
    fn template_note_covers_the_standard_sections() {
        let (encounter, demographics) = sample_encounter();
        let note = template_note(&encounter, &demographics, 48);
        assert!(note.contains("PATIENT: Luna Smith"));
        assert!(note.contains("CHIEF COMPLAINT:"));
        assert!(note.contains("VITAL SIGNS:"));
        assert!(note.contains("PHYSICAL EXAMINATION:"));
        assert!(note.contains("ASSESSMENT:"));
        assert!(note.contains("PLAN:"));
        assert!(note.contains("Signed: Dr. Emily Patel, MD"));
    }

    #[test]
    fn context_summarizes_the_encounter() {
        let (encounter, demographics) = sample_encounter();
        let context = NarrativeContext::from_encounter(&encounter, &demographics, 48);
        assert_eq!(context.patient_name, "Luna Smith");
        assert_eq!(context.age_description, "4 year old");
        assert!(context.vitals_summary.contains("HR"));
        assert!(context.exam_summary.contains("General:"));
    }

    #[test]
    fn failing_client_errors_cleanly() {
        let (encounter, demographics) = sample_encounter();
        let context = NarrativeContext::from_encounter(&encounter, &demographics, 48);
        let err = FailingClient.generate_note(&context).unwrap_err();
        assert!(matches!(err, GenerationError::EnrichmentUnavailable(_)));
    }
}
