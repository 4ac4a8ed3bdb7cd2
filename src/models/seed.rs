use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::GenerationError;

use super::enums::{ComplexityTier, MessinessLevel, Sex};

/// Input parameters for patient generation. Every field is optional;
/// unspecified fields are drawn from population defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationSeed {
    /// Age in whole years.
    pub age_years: Option<u32>,
    /// Age in months, for infants. Must agree with `age_years` when both set.
    pub age_months: Option<u32>,
    pub sex: Option<Sex>,
    pub state: Option<String>,
    /// Conditions to include by display name.
    pub conditions: Option<Vec<String>>,
    pub complexity_tier: Option<ComplexityTier>,
    /// Cap on the number of encounters. Truncates the sorted timeline to the
    /// earliest N visits.
    pub encounter_count: Option<usize>,
    #[serde(default)]
    pub messiness_level: MessinessLevel,
    #[serde(default = "default_true")]
    pub include_narrative_notes: bool,
    /// Seed for the random generator context. Same seed and parameters
    /// reproduce an identical patient.
    pub random_seed: Option<u64>,
    /// Generation-time "today". Defaults to the local date; fixing it makes
    /// runs reproducible across days.
    pub reference_date: Option<NaiveDate>,
}

fn default_true() -> bool {
    true
}

impl Default for GenerationSeed {
    fn default() -> Self {
        Self {
            age_years: None,
            age_months: None,
            sex: None,
            state: None,
            conditions: None,
            complexity_tier: None,
            encounter_count: None,
            messiness_level: MessinessLevel::Pristine,
            include_narrative_notes: true,
            random_seed: None,
            reference_date: None,
        }
    }
}

impl GenerationSeed {
    /// Reject contradictory parameters before any generation work begins.
    pub fn validate(&self) -> Result<(), GenerationError> {
        if let (Some(years), Some(months)) = (self.age_years, self.age_months) {
            if years * 12 != months {
                return Err(GenerationError::InvalidGenerationSeed(format!(
                    "age_years {years} and age_months {months} disagree"
                )));
            }
        }
        if let Some(0) = self.encounter_count {
            return Err(GenerationError::InvalidGenerationSeed(
                "encounter_count must be at least 1 when set".into(),
            ));
        }
        Ok(())
    }

    /// Requested age in months, when the caller pinned one.
    pub fn requested_age_months(&self) -> Option<u32> {
        self.age_years.map(|y| y * 12).or(self.age_months)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_seed_is_valid() {
        assert!(GenerationSeed::default().validate().is_ok());
    }

    #[test]
    fn agreeing_ages_are_valid() {
        let seed = GenerationSeed {
            age_years: Some(2),
            age_months: Some(24),
            ..Default::default()
        };
        assert!(seed.validate().is_ok());
        assert_eq!(seed.requested_age_months(), Some(24));
    }

    #[test]
    fn conflicting_ages_are_rejected() {
        let seed = GenerationSeed {
            age_years: Some(2),
            age_months: Some(30),
            ..Default::default()
        };
        let err = seed.validate().unwrap_err();
        assert!(matches!(err, GenerationError::InvalidGenerationSeed(_)));
    }

    #[test]
    fn zero_encounter_cap_is_rejected() {
        let seed = GenerationSeed {
            encounter_count: Some(0),
            ..Default::default()
        };
        assert!(seed.validate().is_err());
    }

    #[test]
    fn years_take_priority_for_age_resolution() {
        let seed = GenerationSeed {
            age_years: Some(5),
            ..Default::default()
        };
        assert_eq!(seed.requested_age_months(), Some(60));

        let seed = GenerationSeed {
            age_months: Some(6),
            ..Default::default()
        };
        assert_eq!(seed.requested_age_months(), Some(6));
    }
}
