use serde::{Deserialize, Serialize};

/// Sex recorded at birth. Drives growth curve selection, name pools,
/// and pronoun handling in generated text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    pub fn as_str(self) -> &'static str {
        match self {
            Sex::Male => "male",
            Sex::Female => "female",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "male" => Some(Sex::Male),
            "female" => Some(Sex::Female),
            _ => None,
        }
    }

    pub fn pronoun_subject(self) -> &'static str {
        match self {
            Sex::Male => "he",
            Sex::Female => "she",
        }
    }
}

/// Overall chart complexity, assigned from the final condition count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ComplexityTier {
    #[serde(rename = "tier-0")]
    Tier0,
    #[serde(rename = "tier-1")]
    Tier1,
    #[serde(rename = "tier-2")]
    Tier2,
    #[serde(rename = "tier-3")]
    Tier3,
}

impl ComplexityTier {
    pub fn as_str(self) -> &'static str {
        match self {
            ComplexityTier::Tier0 => "tier-0",
            ComplexityTier::Tier1 => "tier-1",
            ComplexityTier::Tier2 => "tier-2",
            ComplexityTier::Tier3 => "tier-3",
        }
    }

    /// Tier implied by a final condition count: 0, 1, 2-3, 4+.
    pub fn from_condition_count(count: usize) -> Self {
        match count {
            0 => ComplexityTier::Tier0,
            1 => ComplexityTier::Tier1,
            2..=3 => ComplexityTier::Tier2,
            _ => ComplexityTier::Tier3,
        }
    }
}

/// Health trajectory classification carried on the life arc.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthTrajectory {
    Healthy,
    SingleChronic,
    MultipleChronic,
    Complex,
}

impl HealthTrajectory {
    pub fn as_str(self) -> &'static str {
        match self {
            HealthTrajectory::Healthy => "healthy",
            HealthTrajectory::SingleChronic => "single_chronic",
            HealthTrajectory::MultipleChronic => "multiple_chronic",
            HealthTrajectory::Complex => "complex",
        }
    }

    /// Label implied by a final condition count.
    pub fn from_condition_count(count: usize) -> Self {
        match count {
            0 => HealthTrajectory::Healthy,
            1 => HealthTrajectory::SingleChronic,
            2..=3 => HealthTrajectory::MultipleChronic,
            _ => HealthTrajectory::Complex,
        }
    }
}

/// Kind of clinical visit. Preventive types trigger growth measurements,
/// immunizations, and anticipatory guidance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EncounterType {
    Newborn,
    WellChild,
    AnnualPhysical,
    AcuteIllness,
    ChronicFollowup,
    UrgentCare,
    Emergency,
}

impl EncounterType {
    pub fn as_str(self) -> &'static str {
        match self {
            EncounterType::Newborn => "newborn",
            EncounterType::WellChild => "well-child",
            EncounterType::AnnualPhysical => "annual-physical",
            EncounterType::AcuteIllness => "acute-illness",
            EncounterType::ChronicFollowup => "chronic-followup",
            EncounterType::UrgentCare => "urgent-care",
            EncounterType::Emergency => "emergency",
        }
    }

    /// Scheduled preventive visits: well-child, newborn, adult annual.
    pub fn is_preventive(self) -> bool {
        matches!(
            self,
            EncounterType::Newborn | EncounterType::WellChild | EncounterType::AnnualPhysical
        )
    }

    /// Unscheduled visits for a new complaint.
    pub fn is_acute(self) -> bool {
        matches!(
            self,
            EncounterType::AcuteIllness | EncounterType::UrgentCare | EncounterType::Emergency
        )
    }

    pub fn display(self) -> String {
        self.as_str()
            .split('-')
            .map(|w| {
                let mut chars = w.chars();
                match chars.next() {
                    Some(c) => c.to_uppercase().collect::<String>() + chars.as_str(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConditionStatus {
    Active,
    Resolved,
}

impl ConditionStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ConditionStatus::Active => "active",
            ConditionStatus::Resolved => "resolved",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MedicationStatus {
    Active,
    Completed,
    Stopped,
}

impl MedicationStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            MedicationStatus::Active => "active",
            MedicationStatus::Completed => "completed",
            MedicationStatus::Stopped => "stopped",
        }
    }
}

/// Category of a treatment plan item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PlanCategory {
    Medication,
    Referral,
    Education,
    FollowUp,
    Procedure,
    Other,
}

impl PlanCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            PlanCategory::Medication => "medication",
            PlanCategory::Referral => "referral",
            PlanCategory::Education => "education",
            PlanCategory::FollowUp => "follow-up",
            PlanCategory::Procedure => "procedure",
            PlanCategory::Other => "other",
        }
    }
}

/// Severity of injected documentation artifacts, pristine through hazardous.
/// Each level strictly adds behavior on top of the lower levels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessinessLevel {
    #[default]
    Pristine,
    RealWorld,
    BusyClinic,
    NeedsReconciliation,
    SafetyLandmines,
    ChartFromHell,
}

impl MessinessLevel {
    /// Clamp an integer severity 0-5 onto a level.
    pub fn from_severity(severity: u8) -> Self {
        match severity {
            0 => MessinessLevel::Pristine,
            1 => MessinessLevel::RealWorld,
            2 => MessinessLevel::BusyClinic,
            3 => MessinessLevel::NeedsReconciliation,
            4 => MessinessLevel::SafetyLandmines,
            _ => MessinessLevel::ChartFromHell,
        }
    }

    pub fn severity(self) -> u8 {
        match self {
            MessinessLevel::Pristine => 0,
            MessinessLevel::RealWorld => 1,
            MessinessLevel::BusyClinic => 2,
            MessinessLevel::NeedsReconciliation => 3,
            MessinessLevel::SafetyLandmines => 4,
            MessinessLevel::ChartFromHell => 5,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            MessinessLevel::Pristine => "Pristine",
            MessinessLevel::RealWorld => "Real World",
            MessinessLevel::BusyClinic => "Busy Clinic",
            MessinessLevel::NeedsReconciliation => "Needs Reconciliation",
            MessinessLevel::SafetyLandmines => "Safety Landmines",
            MessinessLevel::ChartFromHell => "Chart From Hell",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AllergyCategory {
    Medication,
    Food,
    Environment,
}

impl AllergyCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            AllergyCategory::Medication => "medication",
            AllergyCategory::Food => "food",
            AllergyCategory::Environment => "environment",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AllergySeverity {
    Mild,
    Moderate,
    Severe,
}

impl AllergySeverity {
    pub fn as_str(self) -> &'static str {
        match self {
            AllergySeverity::Mild => "mild",
            AllergySeverity::Moderate => "moderate",
            AllergySeverity::Severe => "severe",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sex_roundtrip() {
        assert_eq!(Sex::from_str("male"), Some(Sex::Male));
        assert_eq!(Sex::from_str("female"), Some(Sex::Female));
        assert_eq!(Sex::from_str("other"), None);
        assert_eq!(Sex::Male.as_str(), "male");
    }

    #[test]
    fn tier_from_count() {
        assert_eq!(ComplexityTier::from_condition_count(0), ComplexityTier::Tier0);
        assert_eq!(ComplexityTier::from_condition_count(1), ComplexityTier::Tier1);
        assert_eq!(ComplexityTier::from_condition_count(3), ComplexityTier::Tier2);
        assert_eq!(ComplexityTier::from_condition_count(5), ComplexityTier::Tier3);
    }

    #[test]
    fn trajectory_from_count() {
        assert_eq!(HealthTrajectory::from_condition_count(0), HealthTrajectory::Healthy);
        assert_eq!(HealthTrajectory::from_condition_count(1), HealthTrajectory::SingleChronic);
        assert_eq!(HealthTrajectory::from_condition_count(2), HealthTrajectory::MultipleChronic);
    }

    #[test]
    fn preventive_classification() {
        assert!(EncounterType::WellChild.is_preventive());
        assert!(EncounterType::Newborn.is_preventive());
        assert!(!EncounterType::AcuteIllness.is_preventive());
        assert!(EncounterType::Emergency.is_acute());
    }

    #[test]
    fn encounter_type_display() {
        assert_eq!(EncounterType::WellChild.display(), "Well Child");
        assert_eq!(EncounterType::AcuteIllness.display(), "Acute Illness");
    }

    #[test]
    fn messiness_levels_are_ordered() {
        assert!(MessinessLevel::Pristine < MessinessLevel::RealWorld);
        assert!(MessinessLevel::SafetyLandmines < MessinessLevel::ChartFromHell);
        assert_eq!(MessinessLevel::from_severity(3), MessinessLevel::NeedsReconciliation);
        assert_eq!(MessinessLevel::from_severity(9), MessinessLevel::ChartFromHell);
        assert_eq!(MessinessLevel::ChartFromHell.severity(), 5);
        assert_eq!(MessinessLevel::default(), MessinessLevel::Pristine);
    }

    #[test]
    fn encounter_type_serialization_roundtrip() {
        let types = vec![
            EncounterType::Newborn,
            EncounterType::WellChild,
            EncounterType::AnnualPhysical,
            EncounterType::AcuteIllness,
            EncounterType::ChronicFollowup,
            EncounterType::UrgentCare,
            EncounterType::Emergency,
        ];
        for t in types {
            let json = serde_json::to_string(&t).unwrap();
            let back: EncounterType = serde_json::from_str(&json).unwrap();
            assert_eq!(back, t);
        }
    }
}
