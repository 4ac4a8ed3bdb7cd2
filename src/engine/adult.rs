use chrono::{Duration, Local, NaiveDate};

use crate::config::{ENGINE_VERSION, PEDIATRIC_CUTOFF_MONTHS};
use crate::error::GenerationError;
use crate::models::{
    short_id, ComplexityTier, Demographics, EncounterType, GenerationSeed, HealthTrajectory,
    Patient,
};
use crate::narrative::NarrativeClient;

use super::common::{
    apply_messiness, apply_narratives, build_allergies, build_problem_list, default_location,
    default_provider, extract_resolved_history, generate_demographics, generate_social_history,
};
use super::context::GenContext;
use super::encounter::materialize_encounter;
use super::life_arc::{ConditionOnset, LifeArc};
use super::timeline::{condition_stubs, EncounterStub, Timeline};

/// Random adult ages fall between 22 and 65 years.
const MAX_RANDOM_ADULT_MONTHS: u32 = 780;

/// Chronic conditions plausible for the adult pool.
static ADULT_CONDITIONS: &[&str] = &[
    "Hypertension",
    "Hyperlipidemia",
    "Type 2 Diabetes",
    "Asthma",
    "Anxiety",
    "Depression",
    "Obesity",
];

static ADULT_ACUTE_REASONS: &[&str] = &[
    "Upper Respiratory Infection",
    "Back pain",
    "Urinary Tract Infection",
    "Rash",
    "Headache",
    "Joint pain",
    "Viral Gastroenteritis",
    "Fatigue",
];

/// Adult patient generation engine: age 22 and up.
///
/// A deliberately lean sibling of `PedsEngine`: annual physicals instead of
/// the well-child calendar, a slower acute cadence, no growth trajectory.
pub struct AdultEngine {
    narrative_client: Option<Box<dyn NarrativeClient>>,
}

impl AdultEngine {
    pub fn new() -> Self {
        Self {
            narrative_client: None,
        }
    }

    pub fn with_narrative_client(client: Box<dyn NarrativeClient>) -> Self {
        Self {
            narrative_client: Some(client),
        }
    }

    fn resolve_age_months(seed: &GenerationSeed, ctx: &mut GenContext) -> u32 {
        seed.requested_age_months().unwrap_or_else(|| {
            ctx.int_between(PEDIATRIC_CUTOFF_MONTHS as i64, MAX_RANDOM_ADULT_MONTHS as i64) as u32
        })
    }
}

impl Default for AdultEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl super::GenerationEngine for AdultEngine {
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

        let provider = default_provider("Internal Medicine", &mut ctx);
        let location = default_location("Primary Care Associates");

        let mut encounters = Vec::with_capacity(timeline.stubs.len());
        for stub in &timeline.stubs {
            let months_old = demographics.age_months_on(stub.date);
            let encounter = materialize_encounter(
                stub,
                &demographics,
                months_old,
                None,
                &life_arc,
                &provider,
                &location,
                &mut ctx,
            );
            encounters.push(encounter);
        }

        if seed.include_narrative_notes {
            apply_narratives(
                &mut encounters,
                &demographics,
                self.narrative_client.as_deref(),
            );
        }

        let allergy_list = build_allergies(&timeline.discovered_allergies, &mut ctx);
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

        let complexity_tier = ComplexityTier::from_condition_count(life_arc.conditions.len());

        tracing::info!(
            age_months,
            encounters = encounters.len(),
            conditions = life_arc.conditions.len(),
            tier = complexity_tier.as_str(),
            "adult patient generated"
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
            immunization_record: Vec::new(),
            encounters,
            growth_data: Vec::new(),
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
        let age_months = demographics.age_months_on(today);

        let names: Vec<String> = if let Some(requested) = &seed.conditions {
            requested.clone()
        } else {
            let tier = seed.complexity_tier.unwrap_or_else(|| {
                *ctx.pick_weighted(&[
                    (ComplexityTier::Tier0, 50),
                    (ComplexityTier::Tier1, 30),
                    (ComplexityTier::Tier2, 15),
                    (ComplexityTier::Tier3, 5),
                ])
            });
            let count = match tier {
                ComplexityTier::Tier0 => 0,
                ComplexityTier::Tier1 => 1,
                ComplexityTier::Tier2 => ctx.int_between(2, 3) as usize,
                ComplexityTier::Tier3 => ctx.int_between(3, 5) as usize,
            };
            ctx.sample(ADULT_CONDITIONS, count)
                .into_iter()
                .map(str::to_string)
                .collect()
        };

        let onset_floor = PEDIATRIC_CUTOFF_MONTHS.min(age_months);
        let conditions: Vec<ConditionOnset> = names
            .into_iter()
            .map(|name| ConditionOnset {
                name,
                onset_months: ctx.int_between(onset_floor as i64, age_months as i64) as u32,
            })
            .collect();

        LifeArc {
            health_trajectory: HealthTrajectory::from_condition_count(conditions.len()),
            conditions,
        }
    }

    fn generate_timeline(
        &self,
        demographics: &Demographics,
        life_arc: &LifeArc,
        seed: &GenerationSeed,
        today: NaiveDate,
        ctx: &mut GenContext,
    ) -> Timeline {
        let current_age_months = demographics.age_months_on(today);
        let age_years = demographics.age_years_on(today);
        let years_history = (age_years.saturating_sub(18)).min(15);

        let mut stubs = Vec::new();

        // Annual wellness visits, most recent year first in source order.
        for year_offset in 1..=years_history {
            let date =
                today - Duration::days(year_offset as i64 * 365 + ctx.int_between(-30, 30));
            if date > today || date < demographics.date_of_birth {
                continue;
            }
            stubs.push(EncounterStub {
                date,
                encounter_type: EncounterType::AnnualPhysical,
                reason: "Annual physical examination".into(),
                conditions_to_address: vec![],
                is_new_condition_diagnosis: false,
                new_condition: None,
            });
        }

        // Acute visits: healthier adults come in about every other year.
        let rate = if life_arc.conditions.is_empty() { 0.5 } else { 1.5 };
        for year in 0..years_history {
            let visits = (rate + ctx.uniform(0.0, 1.0)).floor() as usize;
            for _ in 0..visits {
                let date = today
                    - Duration::days(year as i64 * 365 + ctx.int_between(0, 364));
                if date > today {
                    continue;
                }
                stubs.push(EncounterStub {
                    date,
                    encounter_type: EncounterType::AcuteIllness,
                    reason: (*ctx.pick(ADULT_ACUTE_REASONS)).to_string(),
                    conditions_to_address: vec![],
                    is_new_condition_diagnosis: false,
                    new_condition: None,
                });
            }
        }

        condition_stubs(
            demographics.date_of_birth,
            current_age_months,
            today,
            life_arc,
            ctx,
            &mut stubs,
        );

        stubs.sort_by_key(|s| s.date);
        if let Some(cap) = seed.encounter_count {
            stubs.truncate(cap);
        }

        Timeline {
            stubs,
            discovered_allergies: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::GenerationEngine;

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
    fn adult_gets_annual_physicals_not_well_child_visits() {
        let patient = AdultEngine::new().generate(&seed_for(40, 42)).unwrap();
        assert!(!patient.encounters.is_empty());
        assert!(patient
            .encounters
            .iter()
            .any(|e| e.encounter_type == EncounterType::AnnualPhysical));
        assert!(!patient
            .encounters
            .iter()
            .any(|e| e.encounter_type == EncounterType::WellChild));
        assert!(patient.growth_data.is_empty());
    }

    #[test]
    fn adult_encounters_are_sorted_and_historical() {
        let patient = AdultEngine::new().generate(&seed_for(35, 7)).unwrap();
        for pair in patient.encounters.windows(2) {
            assert!(pair[0].date.date() <= pair[1].date.date());
        }
        for encounter in &patient.encounters {
            assert!(encounter.date.date() <= fixed_date());
        }
    }

    #[test]
    fn adult_conditions_come_from_the_adult_pool() {
        let seed = GenerationSeed {
            complexity_tier: Some(ComplexityTier::Tier2),
            ..seed_for(50, 42)
        };
        let patient = AdultEngine::new().generate(&seed).unwrap();
        for condition in patient.problem_list.iter().filter(|c| {
            c.clinical_status == crate::models::ConditionStatus::Active
        }) {
            assert!(
                ADULT_CONDITIONS
                    .iter()
                    .any(|name| condition.display_name.contains(name)),
                "unexpected adult condition {}",
                condition.display_name
            );
        }
    }

    #[test]
    fn adult_generation_is_deterministic() {
        let a = AdultEngine::new().generate(&seed_for(45, 42)).unwrap();
        let b = AdultEngine::new().generate(&seed_for(45, 42)).unwrap();
        assert_eq!(a.encounters.len(), b.encounters.len());
        for (ea, eb) in a.encounters.iter().zip(b.encounters.iter()) {
            assert_eq!(ea.date, eb.date);
            assert_eq!(ea.chief_complaint, eb.chief_complaint);
        }
    }
}
