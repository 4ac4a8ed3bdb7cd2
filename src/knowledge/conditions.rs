/// Definition of a chronic condition available to the life arc generator.
#[derive(Debug, Clone, Copy)]
pub struct ChronicCondition {
    pub name: &'static str,
    /// Earliest plausible onset, in months.
    pub min_months: u32,
    /// Conditions that cluster with this one: (associated condition,
    /// probability of appending it during the clustering pass).
    pub comorbidities: &'static [(&'static str, f64)],
}

/// The chronic condition pool. Comorbidity probabilities reflect known
/// clinical clustering: the atopic march (eczema, food allergy, asthma,
/// allergic rhinitis), obesity-asthma, and ADHD-anxiety-depression.
pub static CHRONIC_CONDITIONS: &[ChronicCondition] = &[
    ChronicCondition {
        name: "Asthma",
        min_months: 12,
        comorbidities: &[("Eczema", 0.40), ("Allergic Rhinitis", 0.35)],
    },
    ChronicCondition {
        name: "Eczema",
        min_months: 3,
        comorbidities: &[("Food Allergy", 0.35), ("Asthma", 0.30)],
    },
    ChronicCondition {
        name: "Allergic Rhinitis",
        min_months: 24,
        comorbidities: &[("Asthma", 0.20)],
    },
    ChronicCondition {
        name: "Food Allergy",
        min_months: 6,
        comorbidities: &[("Eczema", 0.30)],
    },
    ChronicCondition {
        name: "ADHD",
        min_months: 48,
        comorbidities: &[("Anxiety", 0.30)],
    },
    ChronicCondition {
        name: "Anxiety",
        min_months: 72,
        comorbidities: &[("Depression", 0.20)],
    },
    ChronicCondition {
        name: "Depression",
        min_months: 132,
        comorbidities: &[("Anxiety", 0.35)],
    },
    ChronicCondition {
        name: "Obesity",
        min_months: 24,
        comorbidities: &[("Asthma", 0.35), ("Anxiety", 0.20)],
    },
    ChronicCondition {
        name: "Constipation",
        min_months: 6,
        comorbidities: &[],
    },
    ChronicCondition {
        name: "Recurrent Otitis Media",
        min_months: 6,
        comorbidities: &[],
    },
    ChronicCondition {
        name: "GERD",
        min_months: 1,
        comorbidities: &[],
    },
    ChronicCondition {
        name: "Type 1 Diabetes",
        min_months: 12,
        comorbidities: &[],
    },
    ChronicCondition {
        name: "Seizure Disorder",
        min_months: 6,
        comorbidities: &[],
    },
];

/// Conditions appropriate for infants when the main pool is mostly
/// age-ineligible.
pub static INFANT_CONDITIONS: &[&str] = &["Eczema", "GERD", "Food Allergy"];

pub fn chronic_condition(name: &str) -> Option<&'static ChronicCondition> {
    CHRONIC_CONDITIONS
        .iter()
        .find(|c| c.name.eq_ignore_ascii_case(name))
}

/// Comorbidity pairs for a condition, empty when none are known.
pub fn comorbidities_of(name: &str) -> &'static [(&'static str, f64)] {
    chronic_condition(name).map(|c| c.comorbidities).unwrap_or(&[])
}

/// Minimum age in months before an acute illness label is plausible.
/// Unlisted illnesses have no minimum.
pub fn acute_min_months(illness: &str) -> u32 {
    match illness {
        "Acute Otitis Media" => 6,
        "Swimmer's Ear" => 12,
        "Croup" => 6,
        "Influenza" => 6,
        "Insect Bite Reaction" => 6,
        "Strep Pharyngitis" => 24,
        "Seasonal Allergies" => 24,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_case_insensitive() {
        assert!(chronic_condition("asthma").is_some());
        assert!(chronic_condition("ASTHMA").is_some());
        assert!(chronic_condition("gout").is_none());
    }

    #[test]
    fn comorbidity_probabilities_are_probabilities() {
        for cond in CHRONIC_CONDITIONS {
            for (associated, p) in cond.comorbidities {
                assert!(*p > 0.0 && *p < 1.0, "{associated} probability {p}");
            }
        }
    }

    #[test]
    fn comorbid_conditions_exist_in_the_pool() {
        for cond in CHRONIC_CONDITIONS {
            for (associated, _) in cond.comorbidities {
                assert!(
                    chronic_condition(associated).is_some(),
                    "{} clusters with unknown condition {associated}",
                    cond.name
                );
            }
        }
    }

    #[test]
    fn infant_conditions_are_infant_eligible() {
        for name in INFANT_CONDITIONS {
            let cond = chronic_condition(name).unwrap();
            assert!(cond.min_months <= 6, "{name} not available by 6 months");
        }
    }

    #[test]
    fn acute_minimums() {
        assert_eq!(acute_min_months("Acute Otitis Media"), 6);
        assert_eq!(acute_min_months("Viral Syndrome"), 0);
    }
}
