use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::knowledge::{acute_min_months, Season, INFANT_ILLNESS_POOL, LIFE_EVENTS};
use crate::models::{Demographics, EncounterType, GenerationSeed};

use super::context::GenContext;
use super::life_arc::LifeArc;

/// Fixed preventive visit calendar, ages in months (AAP-aligned).
pub static WELL_CHILD_SCHEDULE: &[u32] = &[
    0, 1, 2, 4, 6, 9, 12, 15, 18, 24, 30, 36, 48, 60, 72, 84, 96, 108, 120, 132, 144, 156, 168,
    180, 192, 204, 216, 228, 240, 252,
];

/// Expected acute illness visits per year by age band in months.
static ACUTE_VISIT_BANDS: &[((u32, u32), f64)] = &[
    ((0, 12), 6.0),
    ((12, 36), 4.0),
    ((36, 72), 3.0),
    ((72, 144), 2.0),
    ((144, 264), 1.0),
];

/// Routine acute illness visits start after the newborn period.
const MIN_ACUTE_AGE_MONTHS: u32 = 2;

/// A scheduled-but-not-yet-detailed visit. Created in bulk here, consumed
/// exactly once by the encounter materializer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncounterStub {
    pub date: NaiveDate,
    pub encounter_type: EncounterType,
    pub reason: String,
    pub conditions_to_address: Vec<String>,
    pub is_new_condition_diagnosis: bool,
    pub new_condition: Option<String>,
}

impl EncounterStub {
    fn visit(date: NaiveDate, encounter_type: EncounterType, reason: String) -> Self {
        Self {
            date,
            encounter_type,
            reason,
            conditions_to_address: Vec::new(),
            is_new_condition_diagnosis: false,
            new_condition: None,
        }
    }
}

/// A medication allergy discovered as a life event; becomes an allergy
/// record on the patient rather than an encounter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscoveredAllergy {
    pub substance: String,
    pub rxnorm: String,
    pub discovered_on: NaiveDate,
}

/// The fully materialized schedule for one patient.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Timeline {
    pub stubs: Vec<EncounterStub>,
    pub discovered_allergies: Vec<DiscoveredAllergy>,
}

pub(crate) fn date_at_age(dob: NaiveDate, age_months: u32) -> NaiveDate {
    dob + Duration::days(age_months as i64 * 30)
}

/// Weighted seasonal illness selection, filtered to age-plausible labels
/// with an infant fallback pool.
pub fn seasonal_illness(date: NaiveDate, age_months: u32, ctx: &mut GenContext) -> String {
    let pool = Season::from_month(date.month()).illness_pool();
    let eligible: Vec<(&str, u32)> = pool
        .iter()
        .copied()
        .filter(|(name, _)| acute_min_months(name) <= age_months)
        .collect();
    let chosen = if eligible.is_empty() {
        ctx.pick_weighted(INFANT_ILLNESS_POOL)
    } else {
        ctx.pick_weighted(&eligible)
    };
    chosen.to_string()
}

fn preventive_stubs(
    dob: NaiveDate,
    current_age_months: u32,
    today: NaiveDate,
    ctx: &mut GenContext,
    out: &mut Vec<EncounterStub>,
) {
    for &visit_age in WELL_CHILD_SCHEDULE {
        if visit_age > current_age_months {
            break;
        }
        let scheduled = date_at_age(dob, visit_age);
        if scheduled > today {
            continue;
        }
        // Families are rarely exactly on time.
        let date = scheduled + Duration::days(ctx.int_between(-7, 14));
        let date = date.min(today).max(dob);
        let encounter_type = if visit_age == 0 {
            EncounterType::Newborn
        } else {
            EncounterType::WellChild
        };
        let reason = format!(
            "Well-child visit - {}",
            crate::models::age_description(visit_age)
        );
        out.push(EncounterStub::visit(date, encounter_type, reason));
    }
}

fn acute_stubs(
    dob: NaiveDate,
    current_age_months: u32,
    today: NaiveDate,
    ctx: &mut GenContext,
    out: &mut Vec<EncounterStub>,
) {
    for &((band_start, band_end), rate) in ACUTE_VISIT_BANDS {
        if current_age_months < band_start {
            continue;
        }
        let start = band_start.max(MIN_ACUTE_AGE_MONTHS);
        let end = current_age_months.min(band_end);
        if end <= start {
            continue;
        }
        let months_in_band = (end - start) as f64;
        let expected = months_in_band / 12.0 * rate;
        // Randomized rounding keeps the expectation unbiased.
        let actual = (expected + ctx.uniform(0.0, 1.0)).floor() as usize;

        for _ in 0..actual {
            let visit_age = ctx.int_between(start as i64, end as i64) as u32;
            let date = date_at_age(dob, visit_age) + Duration::days(ctx.int_between(0, 29));
            if date > today {
                continue;
            }
            let reason = seasonal_illness(date, visit_age, ctx);
            out.push(EncounterStub::visit(date, EncounterType::AcuteIllness, reason));
        }
    }
}

pub(crate) fn condition_stubs(
    dob: NaiveDate,
    current_age_months: u32,
    today: NaiveDate,
    life_arc: &LifeArc,
    ctx: &mut GenContext,
    out: &mut Vec<EncounterStub>,
) {
    for condition in &life_arc.conditions {
        if condition.onset_months > current_age_months {
            continue;
        }

        let diagnosis_date = date_at_age(dob, condition.onset_months);
        if diagnosis_date <= today {
            out.push(EncounterStub {
                date: diagnosis_date,
                encounter_type: EncounterType::ChronicFollowup,
                reason: format!(
                    "Evaluation for {} symptoms",
                    condition.name.to_lowercase()
                ),
                conditions_to_address: vec![condition.name.clone()],
                is_new_condition_diagnosis: true,
                new_condition: Some(condition.name.clone()),
            });
        }

        // First follow-up lands sooner than the steady 3-6 month cadence.
        let mut follow_up_age = condition.onset_months + ctx.int_between(2, 4) as u32;
        while follow_up_age < current_age_months {
            let date = date_at_age(dob, follow_up_age);
            if date <= today {
                out.push(EncounterStub {
                    date,
                    encounter_type: EncounterType::ChronicFollowup,
                    reason: format!("{} follow-up", condition.name),
                    conditions_to_address: vec![condition.name.clone()],
                    is_new_condition_diagnosis: false,
                    new_condition: None,
                });
            }
            follow_up_age += ctx.int_between(3, 6) as u32;
        }
    }
}

/// Per year of life, roll every life event's adjusted annual rate. Injury
/// events produce stubs; allergy discovery produces an allergy record.
fn life_event_stubs(
    demographics: &Demographics,
    current_age_months: u32,
    today: NaiveDate,
    ctx: &mut GenContext,
    out: &mut Vec<EncounterStub>,
    allergies: &mut Vec<DiscoveredAllergy>,
) {
    let dob = demographics.date_of_birth;
    let sex = demographics.sex_at_birth;

    for age_year in 0..=(current_age_months / 12) {
        let year_start = age_year * 12;
        let year_end = ((age_year + 1) * 12).min(current_age_months);
        if year_end <= year_start && age_year > 0 {
            continue;
        }

        for event in LIFE_EVENTS {
            if !ctx.chance(event.adjusted_rate(sex, year_start)) {
                continue;
            }
            let event_age = ctx.int_between(year_start as i64, year_end.max(year_start) as i64) as u32;
            let date = date_at_age(dob, event_age) + Duration::days(ctx.int_between(0, 29));
            if date > today {
                continue;
            }

            let weighted: Vec<((&str, u32, &str), u32)> =
                event.variants.iter().map(|v| (*v, v.1)).collect();
            let (name, _, code) = *ctx.pick_weighted(&weighted);

            match event.encounter_type {
                Some(encounter_type) => {
                    out.push(EncounterStub::visit(date, encounter_type, name.to_string()));
                }
                None => {
                    allergies.push(DiscoveredAllergy {
                        substance: name.to_string(),
                        rxnorm: code.to_string(),
                        discovered_on: date,
                    });
                }
            }
        }
    }
}

/// Produce the full, date-ordered encounter schedule by overlaying the
/// preventive calendar, the seasonal acute sampler, condition-driven
/// follow-ups, and the life-event overlay. A zero-stub timeline is valid
/// for patients too young for any scheduled visit.
pub fn generate_timeline(
    demographics: &Demographics,
    life_arc: &LifeArc,
    seed: &GenerationSeed,
    today: NaiveDate,
    ctx: &mut GenContext,
) -> Timeline {
    let dob = demographics.date_of_birth;
    let current_age_months = demographics.age_months_on(today);

    let mut stubs = Vec::new();
    let mut discovered_allergies = Vec::new();

    preventive_stubs(dob, current_age_months, today, ctx, &mut stubs);
    acute_stubs(dob, current_age_months, today, ctx, &mut stubs);
    condition_stubs(dob, current_age_months, today, life_arc, ctx, &mut stubs);
    life_event_stubs(
        demographics,
        current_age_months,
        today,
        ctx,
        &mut stubs,
        &mut discovered_allergies,
    );

    stubs.sort_by_key(|s| s.date);

    // Earliest-first truncation when the caller caps the encounter count.
    if let Some(cap) = seed.encounter_count {
        stubs.truncate(cap);
    }

    tracing::debug!(
        stubs = stubs.len(),
        allergies = discovered_allergies.len(),
        age_months = current_age_months,
        "timeline generated"
    );

    Timeline {
        stubs,
        discovered_allergies,
    }
}
