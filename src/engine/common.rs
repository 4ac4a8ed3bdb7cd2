//! Generation steps shared by the pediatric and adult engines:
//! demographics and social history synthesis, narrative application, the
//! messiness pass, and resolved-history extraction.

use chrono::{Duration, NaiveDate};

use crate::knowledge::{
    acute_reason_code, condition_code, CITIES, ETHNICITIES, FAMILY_NAMES, FEMALE_FIRST_NAMES,
    MALE_FIRST_NAMES, PROVIDER_FAMILY_NAMES, PROVIDER_FIRST_NAMES, RACES, STATES, STREET_NAMES,
    STREET_SUFFIXES,
};
use crate::messiness::{MessinessContext, MessinessInjector};
use crate::models::{
    short_id, Address, Allergy, AllergyCategory, AllergyReaction, AllergySeverity,
    CodeableConcept, Condition, ConditionStatus, Contact, Demographics, Encounter, EncounterType,
    GenerationSeed, Location, Medication, MedicationStatus, MessinessLevel, Provider, Sex,
    SocialHistory,
};
use crate::narrative::{template_note, NarrativeClient, NarrativeContext};

use super::context::GenContext;
use super::life_arc::LifeArc;
use super::timeline::DiscoveredAllergy;

/// Minors have a legal guardian on file.
const GUARDIAN_MAX_MONTHS: u32 = 216;

pub(crate) fn generate_phone(ctx: &mut GenContext) -> String {
    format!(
        "({}) {}-{}",
        ctx.int_between(200, 999),
        ctx.int_between(200, 999),
        ctx.int_between(1000, 9999)
    )
}

fn first_name_for(sex: Sex, ctx: &mut GenContext) -> String {
    let pool = match sex {
        Sex::Male => MALE_FIRST_NAMES,
        Sex::Female => FEMALE_FIRST_NAMES,
    };
    (*ctx.pick(pool)).to_string()
}

/// Synthesize demographics for the resolved age.
pub(crate) fn generate_demographics(
    age_months: u32,
    seed: &GenerationSeed,
    today: NaiveDate,
    ctx: &mut GenContext,
) -> Demographics {
    let sex = seed.sex.unwrap_or_else(|| {
        if ctx.chance(0.5) {
            Sex::Male
        } else {
            Sex::Female
        }
    });

    let date_of_birth = today - Duration::days(age_months as i64 * 30);
    let given_name = first_name_for(sex, ctx);
    let family_name = (*ctx.pick(FAMILY_NAMES)).to_string();

    let address = Address {
        line1: format!(
            "{} {} {}",
            ctx.int_between(100, 9999),
            ctx.pick(STREET_NAMES),
            ctx.pick(STREET_SUFFIXES)
        ),
        city: (*ctx.pick(CITIES)).to_string(),
        state: seed
            .state
            .clone()
            .unwrap_or_else(|| (*ctx.pick(STATES)).to_string()),
        postal_code: format!("{}", ctx.int_between(10000, 99999)),
        country: "US".into(),
    };

    let parent_sex = if ctx.chance(0.5) { Sex::Male } else { Sex::Female };
    let parent_name = format!("{} {}", first_name_for(parent_sex, ctx), family_name);
    let emergency_contact = Contact {
        name: parent_name,
        relationship: if parent_sex == Sex::Female {
            "Mother".into()
        } else {
            "Father".into()
        },
        phone: generate_phone(ctx),
    };

    let legal_guardian = (age_months < GUARDIAN_MAX_MONTHS).then(|| emergency_contact.clone());

    Demographics {
        given_name,
        family_name,
        date_of_birth,
        sex_at_birth: sex,
        race: (*ctx.pick(RACES)).to_string(),
        ethnicity: (*ctx.pick(ETHNICITIES)).to_string(),
        preferred_language: "English".into(),
        address,
        phone: generate_phone(ctx),
        emergency_contact,
        legal_guardian,
    }
}

fn grade_for_age(age_years: u32) -> Option<String> {
    let grade = match age_years {
        5 => return Some("Kindergarten".into()),
        6 => "1st",
        7 => "2nd",
        8 => "3rd",
        9..=17 => return Some(format!("{}th grade", age_years - 5)),
        _ => return None,
    };
    Some(format!("{grade} grade"))
}

pub(crate) fn generate_social_history(
    demographics: &Demographics,
    today: NaiveDate,
    ctx: &mut GenContext,
) -> SocialHistory {
    let age_years = demographics.age_years_on(today);
    let minor = age_years < 18;

    let (school_name, grade_level) = if (3..5).contains(&age_years) {
        (Some("Little Stars Preschool".to_string()), Some("Preschool".to_string()))
    } else if (5..18).contains(&age_years) {
        let tier = match age_years {
            5..=10 => "Elementary",
            11..=13 => "Middle",
            _ => "High",
        };
        (
            Some(format!("{} {} School", demographics.address.city, tier)),
            grade_for_age(age_years),
        )
    } else {
        (None, None)
    };

    SocialHistory {
        living_situation: if minor {
            "Lives with parents".into()
        } else {
            "Lives independently".into()
        },
        household_size: if minor {
            ctx.int_between(2, 5) as u8
        } else {
            ctx.int_between(1, 4) as u8
        },
        school_name,
        grade_level,
    }
}

pub(crate) fn default_provider(specialty: &str, ctx: &mut GenContext) -> Provider {
    Provider {
        id: short_id(),
        name: format!(
            "Dr. {} {}",
            ctx.pick(PROVIDER_FIRST_NAMES),
            ctx.pick(PROVIDER_FAMILY_NAMES)
        ),
        credentials: "MD".into(),
        specialty: specialty.into(),
    }
}

pub(crate) fn default_location(name: &str) -> Location {
    Location {
        id: short_id(),
        name: name.into(),
        kind: "Outpatient clinic".into(),
    }
}

/// Attach narrative notes: enrichment collaborator first when present,
/// template fallback always available. An enrichment failure is logged and
/// never fails the patient.
pub(crate) fn apply_narratives(
    encounters: &mut [Encounter],
    demographics: &Demographics,
    narrative_client: Option<&dyn NarrativeClient>,
) {
    for encounter in encounters.iter_mut() {
        let age_months = demographics.age_months_on(encounter.date.date());
        let note = match narrative_client {
            Some(client) => {
                let context = NarrativeContext::from_encounter(encounter, demographics, age_months);
                match client.generate_note(&context) {
                    Ok(note) => note,
                    Err(err) => {
                        tracing::warn!(
                            error = %err,
                            encounter = %encounter.id,
                            "narrative enrichment failed, using template note"
                        );
                        template_note(encounter, demographics, age_months)
                    }
                }
            }
            None => template_note(encounter, demographics, age_months),
        };
        encounter.narrative_note = Some(note);
    }
}

/// Final messiness pass: replace each encounter with its derived messy copy.
pub(crate) fn apply_messiness(
    encounters: Vec<Encounter>,
    demographics: &Demographics,
    life_arc: &LifeArc,
    allergy_names: &[String],
    level: MessinessLevel,
    ctx: &mut GenContext,
) -> Vec<Encounter> {
    if level == MessinessLevel::Pristine {
        return encounters;
    }
    let injector = MessinessInjector::new(level);
    let conditions = life_arc.condition_names();

    encounters
        .into_iter()
        .map(|encounter| {
            let age_months = demographics.age_months_on(encounter.date.date());
            let cx = MessinessContext {
                sex: demographics.sex_at_birth,
                age_months,
                conditions: &conditions,
                allergies: allergy_names,
            };
            injector.apply_to_encounter(&encounter, &cx, ctx)
        })
        .collect()
}

/// Problem-list entries for the life arc's chronic conditions.
pub(crate) fn build_problem_list(
    life_arc: &LifeArc,
    date_of_birth: NaiveDate,
) -> Vec<Condition> {
    life_arc
        .conditions
        .iter()
        .map(|cond| {
            let onset_date = date_of_birth + Duration::days(cond.onset_months as i64 * 30);
            Condition::active(&cond.name, condition_code(&cond.name), onset_date)
        })
        .collect()
}

/// Allergy records for medication allergies discovered as life events.
pub(crate) fn build_allergies(
    discovered: &[DiscoveredAllergy],
    ctx: &mut GenContext,
) -> Vec<Allergy> {
    static MANIFESTATIONS: &[&str] = &["Rash", "Hives", "Itching", "Swelling", "Nausea"];

    discovered
        .iter()
        .map(|found| {
            let severity = if ctx.chance(0.5) {
                AllergySeverity::Mild
            } else {
                AllergySeverity::Moderate
            };
            Allergy {
                id: short_id(),
                display_name: format!("{} allergy", found.substance),
                category: AllergyCategory::Medication,
                code: Some(CodeableConcept::rxnorm(&found.rxnorm, &found.substance)),
                criticality: if ctx.chance(0.5) { "low".into() } else { "high".into() },
                reactions: vec![AllergyReaction {
                    manifestation: (*ctx.pick(MANIFESTATIONS)).to_string(),
                    severity,
                }],
                onset_date: Some(found.discovered_on),
            }
        })
        .collect()
}

/// Extract resolved conditions and past medications from acute encounters:
/// acute diagnoses resolve 7-14 days later; prescriptions complete their
/// course (or stop, for PRN medications).
pub(crate) fn extract_resolved_history(
    encounters: &[Encounter],
    ctx: &mut GenContext,
) -> (Vec<Condition>, Vec<Medication>) {
    let mut resolved = Vec::new();
    let mut past_medications = Vec::new();
    let mut seen_diagnoses: Vec<String> = Vec::new();
    let mut seen_medications: Vec<String> = Vec::new();

    for encounter in encounters {
        if encounter.encounter_type != EncounterType::AcuteIllness {
            continue;
        }

        for assessment in &encounter.assessment {
            let key = assessment.diagnosis.trim().to_lowercase();
            if seen_diagnoses.contains(&key) {
                continue;
            }
            seen_diagnoses.push(key);

            let onset = encounter.date.date();
            let abatement = onset + Duration::days(ctx.int_between(7, 14));
            resolved.push(Condition {
                id: short_id(),
                display_name: assessment.diagnosis.clone(),
                code: Some(acute_reason_code(&assessment.diagnosis)),
                clinical_status: ConditionStatus::Resolved,
                onset_date: onset,
                abatement_date: Some(abatement),
            });
        }

        for rx in &encounter.prescriptions {
            let key = format!("{}_{}", rx.display_name, rx.start_date);
            if seen_medications.contains(&key) {
                continue;
            }
            seen_medications.push(key);

            let status = if rx.prn {
                MedicationStatus::Stopped
            } else {
                MedicationStatus::Completed
            };
            let course_days = if rx.display_name.to_lowercase().contains("amox") {
                10
            } else {
                7
            };
            past_medications.push(Medication {
                status,
                end_date: Some(
                    rx.end_date
                        .unwrap_or(rx.start_date + Duration::days(course_days)),
                ),
                discontinuation_reason: Some(if status == MedicationStatus::Completed {
                    "Course completed".into()
                } else {
                    "No longer needed".into()
                }),
                ..rx.clone()
            });
        }
    }

    (resolved, past_medications)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 1).unwrap()
    }

    #[test]
    fn minors_get_a_guardian() {
        let mut ctx = GenContext::from_seed(Some(42));
        let demo = generate_demographics(60, &GenerationSeed::default(), today(), &mut ctx);
        assert!(demo.legal_guardian.is_some());
        // 30-day months drift slightly against calendar months.
        let age = demo.age_months_on(today());
        assert!((58..=60).contains(&age), "age {age}");
    }

    #[test]
    fn adults_have_no_guardian() {
        let mut ctx = GenContext::from_seed(Some(42));
        let demo = generate_demographics(300, &GenerationSeed::default(), today(), &mut ctx);
        assert!(demo.legal_guardian.is_none());
    }

    #[test]
    fn seed_sex_and_state_are_honored() {
        let mut ctx = GenContext::from_seed(Some(42));
        let seed = GenerationSeed {
            sex: Some(Sex::Female),
            state: Some("OR".into()),
            ..Default::default()
        };
        let demo = generate_demographics(60, &seed, today(), &mut ctx);
        assert_eq!(demo.sex_at_birth, Sex::Female);
        assert_eq!(demo.address.state, "OR");
    }

    #[test]
    fn school_age_children_get_a_school() {
        let mut ctx = GenContext::from_seed(Some(42));
        // 96 thirty-day months lands at 7 calendar years.
        let demo = generate_demographics(96, &GenerationSeed::default(), today(), &mut ctx);
        let social = generate_social_history(&demo, today(), &mut ctx);
        assert!(social.school_name.as_deref().unwrap().contains("School"));
        assert_eq!(social.grade_level.as_deref(), Some("2nd grade"));
        assert_eq!(social.living_situation, "Lives with parents");
    }

    #[test]
    fn infants_have_no_school() {
        let mut ctx = GenContext::from_seed(Some(42));
        let demo = generate_demographics(12, &GenerationSeed::default(), today(), &mut ctx);
        let social = generate_social_history(&demo, today(), &mut ctx);
        assert!(social.school_name.is_none());
        assert!(social.grade_level.is_none());
    }

    #[test]
    fn problem_list_carries_codes_and_onsets() {
        let arc = LifeArc {
            health_trajectory: crate::models::HealthTrajectory::SingleChronic,
            conditions: vec![super::super::life_arc::ConditionOnset {
                name: "Asthma".into(),
                onset_months: 30,
            }],
        };
        let dob = NaiveDate::from_ymd_opt(2018, 1, 1).unwrap();
        let problems = build_problem_list(&arc, dob);
        assert_eq!(problems.len(), 1);
        assert_eq!(problems[0].code.as_ref().unwrap().code, "J45.20");
        assert_eq!(problems[0].onset_date, dob + Duration::days(900));
    }

    #[test]
    fn discovered_allergies_become_records() {
        let mut ctx = GenContext::from_seed(Some(42));
        let discovered = vec![DiscoveredAllergy {
            substance: "Amoxicillin".into(),
            rxnorm: "723".into(),
            discovered_on: NaiveDate::from_ymd_opt(2023, 4, 1).unwrap(),
        }];
        let allergies = build_allergies(&discovered, &mut ctx);
        assert_eq!(allergies.len(), 1);
        assert_eq!(allergies[0].display_name, "Amoxicillin allergy");
        assert_eq!(allergies[0].category, AllergyCategory::Medication);
        assert_eq!(allergies[0].reactions.len(), 1);
    }
}
