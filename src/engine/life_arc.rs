use serde::{Deserialize, Serialize};

use crate::knowledge::{
    chronic_condition, comorbidities_of, CHRONIC_CONDITIONS, INFANT_CONDITIONS,
};
use crate::models::{ComplexityTier, GenerationSeed, HealthTrajectory};

use super::context::GenContext;

/// Onset age cap: chronic conditions surface by 10 years in this model.
const ONSET_CAP_MONTHS: u32 = 120;

/// Earliest generic onset when the condition has no table minimum.
const DEFAULT_MIN_ONSET_MONTHS: u32 = 6;

/// Weighted tier distribution when the caller pins nothing:
/// healthy / single-chronic / multi-chronic / complex.
static TIER_WEIGHTS: &[(ComplexityTier, u32)] = &[
    (ComplexityTier::Tier0, 60),
    (ComplexityTier::Tier1, 25),
    (ComplexityTier::Tier2, 12),
    (ComplexityTier::Tier3, 3),
];

/// A condition with its onset age.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConditionOnset {
    pub name: String,
    pub onset_months: u32,
}

/// High-level life trajectory for a patient. Immutable once produced;
/// consumed by the timeline generator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LifeArc {
    pub health_trajectory: HealthTrajectory,
    pub conditions: Vec<ConditionOnset>,
}

impl LifeArc {
    pub fn healthy() -> Self {
        Self {
            health_trajectory: HealthTrajectory::Healthy,
            conditions: Vec::new(),
        }
    }

    pub fn condition_names(&self) -> Vec<String> {
        self.conditions.iter().map(|c| c.name.clone()).collect()
    }

    pub fn has_condition(&self, name: &str) -> bool {
        self.conditions
            .iter()
            .any(|c| c.name.eq_ignore_ascii_case(name))
    }
}

/// Decide the complexity tier: explicit caller tier, then explicit condition
/// list, then the weighted population distribution.
fn resolve_tier(seed: &GenerationSeed, ctx: &mut GenContext) -> ComplexityTier {
    if let Some(tier) = seed.complexity_tier {
        return tier;
    }
    if let Some(conditions) = &seed.conditions {
        return if conditions.len() <= 1 {
            ComplexityTier::Tier1
        } else {
            ComplexityTier::Tier2
        };
    }
    *ctx.pick_weighted(TIER_WEIGHTS)
}

/// Single comorbidity expansion pass: each selected condition rolls its
/// associated pairs once, appending new conditions on success. Appended
/// conditions do not roll their own associations (not a fixed point).
fn apply_comorbidity_clustering(conditions: &mut Vec<String>, ctx: &mut GenContext) {
    let seeds: Vec<String> = conditions.clone();
    for condition in seeds {
        for (associated, probability) in comorbidities_of(&condition) {
            let already = conditions
                .iter()
                .any(|c| c.eq_ignore_ascii_case(associated));
            if !already && ctx.chance(*probability) {
                conditions.push((*associated).to_string());
            }
        }
    }
}

fn sample_onset(condition: &str, age_months: u32, ctx: &mut GenContext) -> u32 {
    let table_min = chronic_condition(condition)
        .map(|c| c.min_months)
        .unwrap_or(DEFAULT_MIN_ONSET_MONTHS);
    let max_onset = age_months.min(ONSET_CAP_MONTHS);
    let min_onset = table_min.min(max_onset);
    ctx.int_between(min_onset as i64, max_onset.max(min_onset) as i64) as u32
}

/// Generate the life arc: tier, conditions with comorbidity clustering,
/// and onset ages. The final trajectory label comes from the final
/// condition count, not the initially drawn tier.
pub fn generate_life_arc(
    age_months: u32,
    seed: &GenerationSeed,
    ctx: &mut GenContext,
) -> LifeArc {
    let tier = resolve_tier(seed, ctx);

    let mut names: Vec<String> = Vec::new();
    if let Some(requested) = &seed.conditions {
        names = requested.clone();
        apply_comorbidity_clustering(&mut names, ctx);
    } else if tier != ComplexityTier::Tier0 {
        let mut pool: Vec<&str> = CHRONIC_CONDITIONS
            .iter()
            .filter(|c| c.min_months <= age_months)
            .map(|c| c.name)
            .collect();

        // Young infants: fall back to the infant-appropriate set.
        if pool.len() < 3 {
            pool = INFANT_CONDITIONS
                .iter()
                .copied()
                .filter(|name| {
                    chronic_condition(name)
                        .map(|c| c.min_months <= age_months)
                        .unwrap_or(false)
                })
                .collect();
        }
        if pool.is_empty() {
            return LifeArc::healthy();
        }

        let count = match tier {
            ComplexityTier::Tier0 => 0,
            ComplexityTier::Tier1 => 1,
            ComplexityTier::Tier2 => ctx.int_between(2, 3) as usize,
            ComplexityTier::Tier3 => ctx.int_between(3, 5) as usize,
        };
        names = ctx
            .sample(&pool, count)
            .into_iter()
            .map(str::to_string)
            .collect();
        apply_comorbidity_clustering(&mut names, ctx);
    }

    let conditions: Vec<ConditionOnset> = names
        .into_iter()
        .map(|name| {
            let onset_months = sample_onset(&name, age_months, ctx);
            ConditionOnset { name, onset_months }
        })
        .collect();

    LifeArc {
        health_trajectory: HealthTrajectory::from_condition_count(conditions.len()),
        conditions,
    }
}
