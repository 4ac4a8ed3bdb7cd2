use crate::models::{EncounterType, Sex};

/// A randomly occurring life event: injury classes produce encounter stubs,
/// allergy discovery produces an allergy record.
#[derive(Debug, Clone, Copy)]
pub struct LifeEvent {
    pub key: &'static str,
    /// Baseline annual probability before modifiers.
    pub annual_rate: f64,
    /// None when the event does not produce an encounter.
    pub encounter_type: Option<EncounterType>,
    /// (male multiplier, female multiplier); None for sex-neutral events.
    pub sex_modifier: Option<(f64, f64)>,
    /// Rate multipliers by age band in months: ((min, max), multiplier).
    pub age_modifiers: &'static [((u32, u32), f64)],
    /// Weighted variants: (display name, weight, code). The code is ICD-10
    /// for injuries and RxNorm for allergy discovery substances.
    pub variants: &'static [(&'static str, u32, &'static str)],
}

impl LifeEvent {
    /// Annual rate adjusted for the patient's sex and age band.
    pub fn adjusted_rate(&self, sex: Sex, age_months_start: u32) -> f64 {
        let sex_mod = match self.sex_modifier {
            Some((male, female)) => match sex {
                Sex::Male => male,
                Sex::Female => female,
            },
            None => 1.0,
        };
        let age_mod = self
            .age_modifiers
            .iter()
            .find(|((min, max), _)| *min <= age_months_start && age_months_start < *max)
            .map(|(_, m)| *m)
            .unwrap_or(1.0);
        self.annual_rate * sex_mod * age_mod
    }
}

/// Evidence-based pediatric life event rates (annual probabilities).
pub static LIFE_EVENTS: &[LifeEvent] = &[
    LifeEvent {
        key: "fracture",
        annual_rate: 0.02,
        encounter_type: Some(EncounterType::Emergency),
        sex_modifier: Some((1.4, 0.7)),
        age_modifiers: &[
            ((0, 24), 0.3),
            ((24, 72), 0.7),
            ((72, 120), 1.0),
            ((120, 168), 1.5),
            ((168, 264), 1.0),
        ],
        variants: &[
            ("Distal radius fracture", 30, "S52.501A"),
            ("Clavicle fracture", 15, "S42.001A"),
            ("Finger fracture", 15, "S62.600A"),
            ("Distal humerus fracture", 12, "S42.401A"),
            ("Tibial fracture", 10, "S82.201A"),
            ("Ankle fracture", 10, "S82.891A"),
            ("Toe fracture", 8, "S92.501A"),
        ],
    },
    LifeEvent {
        key: "laceration",
        annual_rate: 0.025,
        encounter_type: Some(EncounterType::UrgentCare),
        sex_modifier: Some((1.3, 0.8)),
        age_modifiers: &[
            ((0, 24), 0.5),
            ((24, 72), 1.2),
            ((72, 144), 1.0),
            ((144, 264), 0.8),
        ],
        variants: &[
            ("Forehead laceration", 25, "S01.81XA"),
            ("Chin laceration", 20, "S01.81XA"),
            ("Finger laceration", 20, "S61.219A"),
            ("Knee laceration", 15, "S81.01XA"),
            ("Scalp laceration", 10, "S01.01XA"),
            ("Lip laceration", 10, "S01.511A"),
        ],
    },
    LifeEvent {
        key: "concussion",
        annual_rate: 0.01,
        encounter_type: Some(EncounterType::Emergency),
        sex_modifier: Some((1.2, 0.9)),
        age_modifiers: &[
            ((0, 60), 0.4),
            ((60, 120), 0.8),
            ((120, 168), 1.5),
            ((168, 264), 1.3),
        ],
        variants: &[
            ("Concussion without loss of consciousness", 70, "S06.0X0A"),
            ("Concussion with brief loss of consciousness", 30, "S06.0X1A"),
        ],
    },
    LifeEvent {
        key: "medication_allergy_discovery",
        annual_rate: 0.015,
        encounter_type: None,
        sex_modifier: None,
        age_modifiers: &[],
        variants: &[
            ("Amoxicillin", 40, "723"),
            ("Penicillin", 25, "7984"),
            ("Sulfonamide", 15, "10831"),
            ("Ibuprofen", 10, "5640"),
            ("Cephalosporin", 10, "2176"),
        ],
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boys_fracture_more_than_girls() {
        let fracture = LIFE_EVENTS.iter().find(|e| e.key == "fracture").unwrap();
        let boys = fracture.adjusted_rate(Sex::Male, 130);
        let girls = fracture.adjusted_rate(Sex::Female, 130);
        assert!(boys > girls);
    }

    #[test]
    fn fracture_peaks_in_early_adolescence() {
        let fracture = LIFE_EVENTS.iter().find(|e| e.key == "fracture").unwrap();
        let toddler = fracture.adjusted_rate(Sex::Male, 12);
        let teen = fracture.adjusted_rate(Sex::Male, 140);
        assert!(teen > toddler);
    }

    #[test]
    fn allergy_discovery_is_sex_and_age_neutral() {
        let event = LIFE_EVENTS
            .iter()
            .find(|e| e.key == "medication_allergy_discovery")
            .unwrap();
        assert!(event.encounter_type.is_none());
        assert_eq!(
            event.adjusted_rate(Sex::Male, 12),
            event.adjusted_rate(Sex::Female, 200)
        );
    }

    #[test]
    fn variant_weights_are_positive() {
        for event in LIFE_EVENTS {
            assert!(!event.variants.is_empty());
            assert!(event.variants.iter().all(|(_, w, _)| *w > 0));
        }
    }
}
