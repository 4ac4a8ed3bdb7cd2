//! Pattern tables for documentation-noise injection. Read-only knowledge,
//! grouped by the severity level that activates each table.

/// Term to abbreviation candidates. The last entry in each candidate list is
/// the unabbreviated form and is never chosen.
pub static ABBREVIATIONS: &[(&str, &[&str])] = &[
    ("patient", &["pt", "pt.", "patient"]),
    ("history", &["hx", "h/o", "history"]),
    ("diagnosis", &["dx", "Dx", "diagnosis"]),
    ("treatment", &["tx", "Tx", "treatment"]),
    ("prescription", &["rx", "Rx", "prescription"]),
    ("symptoms", &["sx", "Sx", "symptoms"]),
    ("without", &["w/o", "without"]),
    ("bilateral", &["b/l", "bilat", "bilateral"]),
    ("temperature", &["temp", "T", "temperature"]),
    ("blood pressure", &["BP", "b/p", "blood pressure"]),
    ("heart rate", &["HR", "heart rate"]),
    ("respiratory rate", &["RR", "resp rate", "respiratory rate"]),
    ("years old", &["y/o", "yo", "years old"]),
    ("months old", &["m/o", "mo", "months old"]),
    ("complains of", &["c/o", "complains of"]),
    ("no known allergies", &["NKA", "NKDA", "no known allergies"]),
    ("within normal limits", &["WNL", "wnl", "within normal limits"]),
    ("as needed", &["prn", "PRN", "as needed"]),
    ("twice daily", &["BID", "bid", "twice daily"]),
    ("three times daily", &["TID", "tid", "three times daily"]),
    ("by mouth", &["PO", "po", "by mouth"]),
];

/// Stale copy-forward fragments that only fit infants.
pub static ZOMBIE_INFANT_FRAGMENTS: &[&str] = &[
    "Fontanelle is soft and flat.",
    "Anterior fontanelle open and flat.",
    "Umbilical cord stump clean and dry.",
    "Moro reflex present and symmetric.",
    "Primitive reflexes intact.",
];

/// Universally stale boilerplate (never ordered, long since resolved).
pub static ZOMBIE_UNIVERSAL_FRAGMENTS: &[&str] = &[
    "Follow up in 2 weeks.",
    "Labs pending.",
    "Referral to specialist sent.",
    "Patient counseled on smoking cessation.",
    "Continue current medications.",
];

/// Voice-to-text homophone and drug-name substitutions.
pub static DICTATION_ERRORS: &[(&str, &[&str])] = &[
    ("ileum", &["ilium"]),
    ("peroneal", &["perineal"]),
    ("hypotension", &["hypertension"]),
    ("dysphagia", &["dysphasia"]),
    ("reflex", &["reflux"]),
    ("oral", &["aural"]),
    ("mucous", &["mucus"]),
    ("discrete", &["discreet"]),
    ("palpation", &["palpitation"]),
    ("perfusion", &["profusion"]),
    ("celexa", &["celebrex"]),
    ("zantac", &["zyrtec"]),
    ("lamictal", &["lamisil"]),
    ("klonopin", &["clonidine"]),
];

/// Pronoun and gendered-word swaps, applied as template copy-paste errors.
/// Trailing spaces on pronouns avoid rewriting words like "held".
pub static PRONOUN_SWAPS_MALE_TO_FEMALE: &[(&str, &str)] = &[
    ("He ", "She "),
    ("he ", "she "),
    ("His ", "Her "),
    ("his ", "her "),
    ("him ", "her "),
    ("boy", "girl"),
    ("son", "daughter"),
];

pub static PRONOUN_SWAPS_FEMALE_TO_MALE: &[(&str, &str)] = &[
    ("She ", "He "),
    ("she ", "he "),
    ("Her ", "His "),
    ("her ", "his "),
    ("girl", "boy"),
    ("daughter", "son"),
];

/// Exam findings that do not fit the patient's recorded sex.
pub static WRONG_SEX_FINDINGS_FOR_MALE: &[&str] = &[
    "Ovaries non-palpable.",
    "Uterus not enlarged.",
    "Last menstrual period: N/A",
];

pub static WRONG_SEX_FINDINGS_FOR_FEMALE: &[&str] = &[
    "Testes descended bilaterally.",
    "Prostate exam deferred.",
];

/// ISMP dangerous-abbreviation rewrites: (safe form, dangerous form).
pub static ISMP_TRAILING_ZERO: &[(&str, &str)] = &[
    ("5 mg", "5.0 mg"),
    ("1 mg", "1.0 mg"),
    ("2 mg", "2.0 mg"),
];

pub static ISMP_NO_LEADING_ZERO: &[(&str, &str)] = &[
    ("0.5 mg", ".5 mg"),
    ("0.25 mg", ".25 mg"),
    ("0.1 mg", ".1 mg"),
];

pub static ISMP_U_FOR_UNITS: &[(&str, &str)] = &[
    ("10 units", "10U"),
    ("4 units", "4U"),
    ("6 units", "6U"),
];

pub static ISMP_QD_CONFUSION: &[(&str, &str)] = &[
    ("daily", "QD"),
    ("every day", "q.d."),
];

pub static ISMP_QOD_CONFUSION: &[(&str, &str)] = &[("every other day", "QOD")];

pub static ISMP_MCG_AMBIGUITY: &[(&str, &str)] = &[("mcg", "\u{3bc}g")];

/// Allergen class to medications that conflict with it.
pub static ALLERGY_RX_CONFLICTS: &[(&str, &[&str])] = &[
    ("penicillin", &["amoxicillin", "ampicillin", "augmentin", "penicillin VK"]),
    ("amoxicillin", &["amoxicillin", "augmentin"]),
    ("sulfa", &["bactrim", "septra", "sulfamethoxazole"]),
    ("sulfonamide", &["bactrim", "septra", "sulfamethoxazole"]),
    ("cephalosporin", &["cephalexin", "keflex", "cefdinir"]),
    ("ibuprofen", &["ibuprofen", "naproxen"]),
    ("nsaid", &["ibuprofen", "naproxen", "meloxicam"]),
    ("aspirin", &["aspirin", "excedrin"]),
];

/// Conditions whose codes drift to clinically-plausible-but-wrong codes:
/// (condition fragment, wrong code candidates).
pub static IMPLICIT_DIAGNOSIS_PATTERNS: &[(&str, &[&str])] = &[
    ("asthma", &["R05", "R06.2", "J06.9"]),
    ("adhd", &["R41.840", "F90.9"]),
    ("allergic rhinitis", &["J00", "R09.81"]),
    ("eczema", &["L29.9", "R21"]),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn abbreviation_lists_end_with_the_original() {
        for (term, candidates) in ABBREVIATIONS {
            assert!(candidates.len() >= 2, "{term} needs at least one abbreviation");
            assert_eq!(
                candidates.last().unwrap().to_lowercase(),
                term.to_lowercase(),
                "last candidate for {term} must be the unabbreviated form"
            );
        }
    }

    #[test]
    fn ismp_pairs_actually_differ() {
        for table in [
            ISMP_TRAILING_ZERO,
            ISMP_NO_LEADING_ZERO,
            ISMP_U_FOR_UNITS,
            ISMP_QD_CONFUSION,
            ISMP_QOD_CONFUSION,
            ISMP_MCG_AMBIGUITY,
        ] {
            for (safe, dangerous) in table {
                assert_ne!(safe, dangerous);
            }
        }
    }

    #[test]
    fn conflict_classes_have_candidates() {
        for (class, meds) in ALLERGY_RX_CONFLICTS {
            assert!(!meds.is_empty(), "{class} has no conflicting medications");
        }
    }
}
