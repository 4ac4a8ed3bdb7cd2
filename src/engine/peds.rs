use chrono::{Local, NaiveDate};

use crate::config::ENGINE_VERSION;
use crate::error::GenerationError;
use crate::growth::GrowthTrajectory;
use crate::models::{
    short_id, ComplexityTier, Demographics, GenerationSeed, GrowthMeasurement, Patient,
};
use crate::narrative::NarrativeClient;

use super::common::{
    apply_messiness, apply_narratives, build_allergies, build_problem_list, default_location,
    default_provider, extract_resolved_history, generate_demographics, generate_social_history,
};
use super::context::GenContext;
use super::encounter::materialize_encounter;
use super::life_arc::{generate_life_arc, LifeArc};
use super::timeline::{generate_timeline, Timeline};
use super::GenerationEngine;

/// Ages without an explicit request are drawn uniformly from birth to 21.
const MAX_RANDOM_AGE_MONTHS: u32 = 252;

/// Pediatric patient generation engine: birth through age 21.
///
/// Orchestrates the generators in strict order: demographics, life arc,
/// timeline, then encounter materialization in chronological order with the
/// growth trajectory threaded through the preventive visits, and finally
/// narrative and messiness passes.
pub struct PedsEngine {
    narrative_client: Option<Box<dyn NarrativeClient>>,
}

impl PedsEngine {
    pub fn new() -> Self {
        Self {
            narrative_client: None,
        }
    }

    /// Attach a narrative enrichment collaborator. The engine falls back to
    /// template notes whenever the collaborator fails.
    pub fn with_narrative_client(client: Box<dyn NarrativeClient>) -> Self {
        Self {
            narrative_client: Some(client),
        }
    }

    fn resolve_age_months(seed: &GenerationSeed, ctx: &mut GenContext) -> u32 {
        seed.requested_age_months()
            .unwrap_or_else(|| ctx.int_between(0, MAX_RANDOM_AGE_MONTHS as i64) as u32)
    }
}

impl Default for PedsEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl GenerationEngine for PedsEngine {
    fn generate(&self, seed: &GenerationSeed) -> Result<Patient, GenerationError> {
        seed.validate()?;

        let mut ctx = GenContext::from_seed(seed.random_seed);
        let today = seed
            .reference_date
            .unwrap_or_else(|| Local::now().date_naive());

        let age_months = Self::resolve_age_months(seed, &mut ctx);
        let demographics = generate_demographics(age_months, seed, today, &mut ctx);
        let social_history = generate_social_history(&demographics, today, &mut ctx);

        let life_arc = self.generate_life_arc(&demographics, seed, today, &mut ctx);
        let timeline = self.generate_timeline(&demographics, &life_arc, seed, today, &mut ctx);

        let mut growth = GrowthTrajectory::from_population(demographics.sex_at_birth, &mut ctx);
        let provider = default_provider("Pediatrics", &mut ctx);
        let location = default_location("Main Street Pediatrics");

        let mut encounters = Vec::with_capacity(timeline.stubs.len());
        let mut growth_data: Vec<GrowthMeasurement> = Vec::new();
        let mut immunization_record = Vec::new();

        for stub in &timeline.stubs {
            let days_old = (stub.date - demographics.date_of_birth).num_days();
            let months_old = (days_old / 30).max(0) as u32;

            if stub.encounter_type.is_preventive() {
                let sample = growth.generate_measurement(months_old, &mut ctx)?;
                growth_data.push(GrowthMeasurement {
                    id: short_id(),
                    date: stub.date,
                    age_in_days: days_old,
                    weight_kg: sample.weight_kg,
                    height_cm: sample.height_cm,
                    head_circumference_cm: sample.head_circumference_cm,
                    bmi: sample.bmi,
                });
            }

            let encounter = materialize_encounter(
                stub,
                &demographics,
                months_old,
                growth_data.last(),
                &life_arc,
                &provider,
                &location,
                &mut ctx,
            );
            immunization_record.extend(encounter.immunizations_given.iter().cloned());
            encounters.push(encounter);
        }

        if seed.include_narrative_notes {
            apply_narratives(
                &mut encounters,
                &demographics,
                self.narrative_client.as_deref(),
            );
        }

        let mut allergy_list = build_allergies(&timeline.discovered_allergies, &mut ctx);
        let allergy_names: Vec<String> =
            allergy_list.iter().map(|a| a.display_name.clone()).collect();

        let encounters = apply_messiness(
            encounters,
            &demographics,
            &life_arc,
            &allergy_names,
            seed.messiness_level,
            &mut ctx,
        );

        let mut problem_list = build_problem_list(&life_arc, demographics.date_of_birth);
        let (resolved_conditions, past_medications) =
            extract_resolved_history(&encounters, &mut ctx);
        problem_list.extend(resolved_conditions);
        allergy_list.sort_by(|a, b| a.onset_date.cmp(&b.onset_date));

        let complexity_tier = ComplexityTier::from_condition_count(life_arc.conditions.len());

        tracing::info!(
            age_months,
            encounters = encounters.len(),
            growth_points = growth_data.len(),
            conditions = life_arc.conditions.len(),
            tier = complexity_tier.as_str(),
            messiness = seed.messiness_level.severity(),
            "pediatric patient generated"
        );

        Ok(Patient {
            id: short_id(),
            demographics,
            social_history,
            health_trajectory: life_arc.health_trajectory,
            complexity_tier,
            problem_list,
            medication_list: past_medications,
            allergy_list,
            immunization_record,
            encounters,
            growth_data,
            engine_version: ENGINE_VERSION.to_string(),
            generated_at: Local::now().naive_local(),
        })
    }

    fn generate_life_arc(
        &self,
        demographics: &Demographics,
        seed: &GenerationSeed,
        today: NaiveDate,
        ctx: &mut GenContext,
    ) -> LifeArc {
        generate_life_arc(demographics.age_months_on(today), seed, ctx)
    }

    fn generate_timeline(
        &self,
        demographics: &Demographics,
        life_arc: &LifeArc,
        seed: &GenerationSeed,
        today: NaiveDate,
        ctx: &mut GenContext,
    ) -> Timeline {
        generate_timeline(demographics, life_arc, seed, today, ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EncounterType, HealthTrajectory, MessinessLevel, Sex};
    use crate::narrative::{NarrativeClient, NarrativeContext};

    fn fixed_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 1).unwrap()
    }

    fn seed_for(age_years: u32, random_seed: u64) -> GenerationSeed {
        GenerationSeed {
            age_years: Some(age_years),
            random_seed: Some(random_seed),
            reference_date: Some(fixed_date()),
            ..Default::default()
        }
    }

    #[test]
    fn two_year_old_with_seed_42_has_encounters_and_growth() {
        let patient = PedsEngine::new().generate(&seed_for(2, 42)).unwrap();
        assert!(!patient.encounters.is_empty());
        assert!(!patient.growth_data.is_empty());
        let age_years = patient.demographics.age_years_on(fixed_date());
        assert!(age_years == 1 || age_years == 2, "age_years {age_years}");
    }

    #[test]
    fn asthma_patient_has_asthma_visits() {
        let seed = GenerationSeed {
            age_years: Some(8),
            conditions: Some(vec!["Asthma".into()]),
            complexity_tier: Some(crate::models::ComplexityTier::Tier1),
            random_seed: Some(42),
            reference_date: Some(fixed_date()),
            ..Default::default()
        };
        let patient = PedsEngine::new().generate(&seed).unwrap();

        assert!(patient.health_trajectory != HealthTrajectory::Healthy);
        assert!(patient
            .problem_list
            .iter()
            .any(|c| c.display_name.eq_ignore_ascii_case("asthma")));
        let related = patient.encounters.iter().filter(|e| {
            let reason = e.chief_complaint.to_lowercase();
            reason.contains("asthma") || reason.contains("follow-up")
        });
        assert!(related.count() >= 1);
    }

    #[test]
    fn infant_growth_includes_head_circumference() {
        let seed = GenerationSeed {
            age_months: Some(6),
            random_seed: Some(42),
            reference_date: Some(fixed_date()),
            ..Default::default()
        };
        let patient = PedsEngine::new().generate(&seed).unwrap();
        let with_hc = patient
            .growth_data
            .iter()
            .filter(|g| g.head_circumference_cm.is_some())
            .count();
        assert!(with_hc > 0);
        let age = patient.demographics.age_months_on(fixed_date());
        assert!((5..=7).contains(&age), "age_months {age}");
    }

    #[test]
    fn generation_is_deterministic_for_a_fixed_seed() {
        let a = PedsEngine::new().generate(&seed_for(5, 42)).unwrap();
        let b = PedsEngine::new().generate(&seed_for(5, 42)).unwrap();

        assert_eq!(a.demographics.full_name(), b.demographics.full_name());
        assert_eq!(a.encounters.len(), b.encounters.len());
        for (ea, eb) in a.encounters.iter().zip(b.encounters.iter()) {
            assert_eq!(ea.date, eb.date);
            assert_eq!(ea.chief_complaint, eb.chief_complaint);
            assert_eq!(ea.vital_signs.heart_rate, eb.vital_signs.heart_rate);
        }
        assert_eq!(a.growth_data.len(), b.growth_data.len());
        for (ga, gb) in a.growth_data.iter().zip(b.growth_data.iter()) {
            assert_eq!(ga.weight_kg, gb.weight_kg);
            assert_eq!(ga.height_cm, gb.height_cm);
        }
    }

    #[test]
    fn different_seeds_differ() {
        let a = PedsEngine::new().generate(&seed_for(5, 42)).unwrap();
        let b = PedsEngine::new().generate(&seed_for(5, 43)).unwrap();
        let dates_a: Vec<_> = a.encounters.iter().map(|e| e.date).collect();
        let dates_b: Vec<_> = b.encounters.iter().map(|e| e.date).collect();
        assert_ne!(dates_a, dates_b);
    }

    #[test]
    fn encounters_are_chronological() {
        let patient = PedsEngine::new().generate(&seed_for(10, 7)).unwrap();
        for pair in patient.encounters.windows(2) {
            assert!(pair[0].date.date() <= pair[1].date.date());
        }
        for encounter in &patient.encounters {
            assert!(encounter.date.date() <= fixed_date());
        }
    }

    #[test]
    fn encounter_cap_is_honored() {
        let seed = GenerationSeed {
            age_years: Some(10),
            encounter_count: Some(4),
            random_seed: Some(42),
            reference_date: Some(fixed_date()),
            ..Default::default()
        };
        let patient = PedsEngine::new().generate(&seed).unwrap();
        assert_eq!(patient.encounters.len(), 4);
    }

    #[test]
    fn conflicting_seed_fails_before_any_work() {
        let seed = GenerationSeed {
            age_years: Some(2),
            age_months: Some(30),
            random_seed: Some(42),
            ..Default::default()
        };
        let err = PedsEngine::new().generate(&seed).unwrap_err();
        assert!(matches!(err, GenerationError::InvalidGenerationSeed(_)));
    }

    #[test]
    fn narratives_are_attached_by_default() {
        let patient = PedsEngine::new().generate(&seed_for(3, 42)).unwrap();
        assert!(patient
            .encounters
            .iter()
            .all(|e| e.narrative_note.is_some()));
        let note = patient.encounters[0].narrative_note.as_ref().unwrap();
        assert!(note.contains("VITAL SIGNS:"));
    }

    #[test]
    fn narratives_can_be_suppressed() {
        let seed = GenerationSeed {
            include_narrative_notes: false,
            ..seed_for(3, 42)
        };
        let patient = PedsEngine::new().generate(&seed).unwrap();
        assert!(patient
            .encounters
            .iter()
            .all(|e| e.narrative_note.is_none()));
    }

    struct OfflineClient;

    impl NarrativeClient for OfflineClient {
        fn generate_note(&self, _: &NarrativeContext) -> Result<String, GenerationError> {
            Err(GenerationError::EnrichmentUnavailable("no credentials".into()))
        }
    }

    #[test]
    fn failed_enrichment_falls_back_to_template_notes() {
        let engine = PedsEngine::with_narrative_client(Box::new(OfflineClient));
        let patient = engine.generate(&seed_for(3, 42)).unwrap();
        for encounter in &patient.encounters {
            let note = encounter.narrative_note.as_ref().unwrap();
            assert!(note.contains("PATIENT:"), "template fallback expected");
        }
    }

    #[test]
    fn messiness_level_zero_matches_pristine_output() {
        let pristine = PedsEngine::new().generate(&seed_for(4, 42)).unwrap();
        let explicit = PedsEngine::new()
            .generate(&GenerationSeed {
                messiness_level: MessinessLevel::Pristine,
                ..seed_for(4, 42)
            })
            .unwrap();
        for (a, b) in pristine.encounters.iter().zip(explicit.encounters.iter()) {
            assert_eq!(a.narrative_note, b.narrative_note);
            assert_eq!(a.vital_signs.temperature_f, b.vital_signs.temperature_f);
        }
    }

    #[test]
    fn immunization_record_aggregates_visit_doses() {
        let patient = PedsEngine::new().generate(&seed_for(2, 42)).unwrap();
        let from_encounters: usize = patient
            .encounters
            .iter()
            .map(|e| e.immunizations_given.len())
            .sum();
        assert_eq!(patient.immunization_record.len(), from_encounters);
        assert!(patient.immunization_record.len() > 0, "2-year-old should have vaccines");
    }

    #[test]
    fn preventive_visits_carry_growth_percentiles() {
        let patient = PedsEngine::new().generate(&seed_for(2, 42)).unwrap();
        let preventive_with_growth = patient
            .encounters
            .iter()
            .filter(|e| e.encounter_type.is_preventive())
            .filter(|e| e.growth_percentiles.is_some())
            .count();
        assert!(preventive_with_growth > 0);
        for encounter in &patient.encounters {
            if encounter.encounter_type == EncounterType::AcuteIllness {
                assert!(encounter.growth_percentiles.is_none());
            }
        }
    }

    #[test]
    fn sex_is_honored() {
        let seed = GenerationSeed {
            sex: Some(Sex::Female),
            ..seed_for(6, 42)
        };
        let patient = PedsEngine::new().generate(&seed).unwrap();
        assert_eq!(patient.demographics.sex_at_birth, Sex::Female);
    }
}
