use crate::models::CodeableConcept;

/// ICD-10-CM code reserved for conditions with no specific mapping.
pub const UNSPECIFIED_ILLNESS_CODE: &str = "R69";

/// Diagnosis codes for chronic conditions, keyed by lowercase display name.
static CHRONIC_CODES: &[(&str, &str, &str)] = &[
    ("asthma", "J45.20", "Mild intermittent asthma, uncomplicated"),
    ("adhd", "F90.2", "Attention-deficit hyperactivity disorder, combined type"),
    ("eczema", "L30.9", "Dermatitis, unspecified"),
    ("allergic rhinitis", "J30.9", "Allergic rhinitis, unspecified"),
    ("anxiety", "F41.1", "Generalized anxiety disorder"),
    ("food allergy", "T78.1", "Other adverse food reactions, not elsewhere classified"),
    ("obesity", "E66.9", "Obesity, unspecified"),
    ("constipation", "K59.00", "Constipation, unspecified"),
    ("recurrent otitis media", "H66.90", "Otitis media, unspecified"),
    ("depression", "F32.9", "Major depressive disorder, single episode, unspecified"),
    ("gerd", "K21.9", "Gastro-esophageal reflux disease without esophagitis"),
    ("type 1 diabetes", "E10.9", "Type 1 diabetes mellitus without complications"),
    ("type 2 diabetes", "E11.9", "Type 2 diabetes mellitus without complications"),
    ("seizure disorder", "G40.909", "Epilepsy, unspecified, not intractable"),
    ("epilepsy", "G40.909", "Epilepsy, unspecified, not intractable"),
    ("hypertension", "I10", "Essential (primary) hypertension"),
    ("hyperlipidemia", "E78.5", "Hyperlipidemia, unspecified"),
];

/// Diagnosis codes for acute illness reasons, keyed by lowercase label.
static ACUTE_CODES: &[(&str, &str, &str)] = &[
    ("acute otitis media", "H66.90", "Otitis media, unspecified"),
    ("upper respiratory infection", "J06.9", "Acute upper respiratory infection, unspecified"),
    ("fever", "R50.9", "Fever, unspecified"),
    ("viral syndrome", "B34.9", "Viral infection, unspecified"),
    ("viral gastroenteritis", "A09", "Infectious gastroenteritis and colitis, unspecified"),
    ("pharyngitis", "J02.9", "Acute pharyngitis, unspecified"),
    ("strep pharyngitis", "J02.0", "Streptococcal pharyngitis"),
    ("bronchiolitis", "J21.9", "Acute bronchiolitis, unspecified"),
    ("croup", "J05.0", "Acute obstructive laryngitis [croup]"),
    ("conjunctivitis", "H10.9", "Unspecified conjunctivitis"),
    ("influenza", "J11.1", "Influenza with other respiratory manifestations"),
    ("hand foot mouth disease", "B08.4", "Enteroviral vesicular stomatitis with exanthem"),
    ("rash", "R21", "Rash and other nonspecific skin eruption"),
    ("insect bite reaction", "T14.0", "Superficial injury of unspecified body region"),
    ("swimmer's ear", "H60.339", "Swimmer's ear, unspecified ear"),
    ("sinusitis", "J01.90", "Acute sinusitis, unspecified"),
    ("pneumonia", "J18.9", "Pneumonia, unspecified organism"),
    ("urinary tract infection", "N39.0", "Urinary tract infection, site not specified"),
];

/// Resolve a chronic condition name to its diagnosis code. Unknown names
/// fall back to the generic unspecified-illness code; generation continues.
pub fn condition_code(name: &str) -> CodeableConcept {
    let key = name.trim().to_lowercase();
    match CHRONIC_CODES.iter().find(|(k, _, _)| *k == key) {
        Some((_, code, display)) => CodeableConcept::icd10(code, display),
        None => {
            tracing::warn!(condition = name, "no diagnosis code on file, using R69");
            CodeableConcept::icd10(UNSPECIFIED_ILLNESS_CODE, name)
        }
    }
}

/// Resolve an acute illness label to its diagnosis code, matching on the
/// label or any known label contained in it.
pub fn acute_reason_code(reason: &str) -> CodeableConcept {
    let key = reason.trim().to_lowercase();
    let hit = ACUTE_CODES
        .iter()
        .find(|(k, _, _)| *k == key)
        .or_else(|| ACUTE_CODES.iter().find(|(k, _, _)| key.contains(k)));
    match hit {
        Some((_, code, display)) => CodeableConcept::icd10(code, display),
        None => CodeableConcept::icd10(UNSPECIFIED_ILLNESS_CODE, reason),
    }
}

/// Whether a chronic condition has a real (non-fallback) mapping.
pub fn has_condition_code(name: &str) -> bool {
    let key = name.trim().to_lowercase();
    CHRONIC_CODES.iter().any(|(k, _, _)| *k == key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chronic_lookup_is_case_insensitive() {
        let code = condition_code("Asthma");
        assert_eq!(code.code, "J45.20");
        let code = condition_code("  ADHD ");
        assert_eq!(code.code, "F90.2");
    }

    #[test]
    fn unknown_condition_falls_back_to_r69() {
        let code = condition_code("Dragon Pox");
        assert_eq!(code.code, UNSPECIFIED_ILLNESS_CODE);
        assert_eq!(code.display, "Dragon Pox");
        assert!(!has_condition_code("Dragon Pox"));
    }

    #[test]
    fn acute_lookup_matches_substrings() {
        let code = acute_reason_code("Acute Otitis Media");
        assert_eq!(code.code, "H66.90");
        let code = acute_reason_code("Evaluation of upper respiratory infection symptoms");
        assert_eq!(code.code, "J06.9");
    }
}
