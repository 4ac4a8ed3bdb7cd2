use regex::Regex;

use crate::engine::GenContext;
use crate::models::{
    Encounter, Medication, MedicationStatus, MessinessLevel, PlanCategory, PlanItem, Sex,
    short_id,
};

use super::tables::*;

/// Texts shorter than this pass through untouched.
const MIN_TEXT_LEN: usize = 20;

/// Zombie fragments need room to hide.
const MIN_ZOMBIE_TEXT_LEN: usize = 50;

/// Ephemeral per-injection context. Not persisted.
#[derive(Debug, Clone, Copy)]
pub struct MessinessContext<'a> {
    pub sex: Sex,
    pub age_months: u32,
    pub conditions: &'a [String],
    pub allergies: &'a [String],
}

/// Injects realistic chart artifacts at a configured severity level.
///
/// Levels are strictly additive; level 0 is the identity transform. All
/// injections are probabilistic and independent per call, drawing from the
/// shared generator context. A missing matchable pattern is a silent no-op.
pub struct MessinessInjector {
    level: MessinessLevel,
}

impl MessinessInjector {
    pub fn new(level: MessinessLevel) -> Self {
        Self { level }
    }

    pub fn level(&self) -> MessinessLevel {
        self.level
    }

    fn contains_ci(text: &str, needle: &str) -> bool {
        text.to_lowercase().contains(&needle.to_lowercase())
    }

    /// Replace the first case-insensitive occurrence only.
    fn replace_first_ci(text: &str, needle: &str, replacement: &str) -> String {
        match Regex::new(&format!("(?i){}", regex::escape(needle))) {
            Ok(re) => re.replace(text, replacement).to_string(),
            Err(_) => text.to_string(),
        }
    }

    /// Level 1+: swap terms for their chart abbreviations, ~40% per matched
    /// term, first occurrence only.
    fn inject_abbreviations(&self, text: &str, ctx: &mut GenContext) -> String {
        let mut result = text.to_string();
        for (term, candidates) in ABBREVIATIONS {
            if Self::contains_ci(&result, term) && ctx.chance(0.4) {
                let abbrevs = &candidates[..candidates.len() - 1];
                let chosen = ctx.pick(abbrevs);
                result = Self::replace_first_ci(&result, term, chosen);
            }
        }
        result
    }

    /// Level 2+: insert stale copy-forward fragments at random sentence
    /// positions. Infant fragments only appear in charts past 24 months,
    /// where they are clearly stale.
    fn inject_zombie_fragments(
        &self,
        text: &str,
        cx: &MessinessContext,
        ctx: &mut GenContext,
    ) -> String {
        if text.trim().len() < MIN_ZOMBIE_TEXT_LEN {
            return text.to_string();
        }

        let mut fragments: Vec<&str> = Vec::new();
        if cx.age_months > 24 && ctx.chance(0.3) {
            fragments.extend(ctx.sample(ZOMBIE_INFANT_FRAGMENTS, 2));
        }
        if ctx.chance(0.4) {
            fragments.extend(ctx.sample(ZOMBIE_UNIVERSAL_FRAGMENTS, 2));
        }
        if fragments.is_empty() {
            return text.to_string();
        }

        let mut sentences: Vec<String> = text.split(". ").map(str::to_string).collect();
        for fragment in fragments {
            let fragment = fragment.trim_end_matches('.').to_string();
            if ctx.chance(0.5) {
                let pos = ctx.int_between(0, sentences.len() as i64) as usize;
                sentences.insert(pos.min(sentences.len()), fragment);
            } else {
                sentences.push(fragment);
            }
        }
        sentences.join(". ")
    }

    /// Level 4+: voice-to-text homophone and drug-name substitutions.
    fn inject_dictation_errors(&self, text: &str, ctx: &mut GenContext) -> String {
        let mut result = text.to_string();
        for (correct, wrongs) in DICTATION_ERRORS {
            if Self::contains_ci(&result, correct) && ctx.chance(0.3) {
                let wrong = ctx.pick(wrongs);
                result = Self::replace_first_ci(&result, correct, wrong);
            }
        }
        result
    }

    /// Level 4+: swap one pronoun to the wrong sex, 30% gate, one swap per
    /// text block.
    fn inject_pronoun_errors(
        &self,
        text: &str,
        cx: &MessinessContext,
        ctx: &mut GenContext,
    ) -> String {
        if !ctx.chance(0.3) {
            return text.to_string();
        }
        let swaps = match cx.sex {
            Sex::Male => PRONOUN_SWAPS_MALE_TO_FEMALE,
            Sex::Female => PRONOUN_SWAPS_FEMALE_TO_MALE,
        };
        let mut result = text.to_string();
        for (correct, wrong) in swaps {
            if result.contains(correct) && ctx.chance(0.3) {
                result = result.replacen(correct, wrong, 1);
                break;
            }
        }
        result
    }

    /// Level 5+: ISMP dangerous-abbreviation rewrites.
    fn inject_ismp_violations(&self, text: &str, ctx: &mut GenContext) -> String {
        let mut result = text.to_string();
        for (safe, dangerous) in ISMP_TRAILING_ZERO.iter().chain(ISMP_NO_LEADING_ZERO) {
            if result.contains(safe) && ctx.chance(0.4) {
                result = result.replacen(safe, dangerous, 1);
            }
        }
        for (safe, dangerous) in ISMP_U_FOR_UNITS.iter().chain(ISMP_MCG_AMBIGUITY) {
            if result.contains(safe) && ctx.chance(0.4) {
                result = result.replacen(safe, dangerous, 1);
            }
        }
        for (safe, dangerous) in ISMP_QD_CONFUSION.iter().chain(ISMP_QOD_CONFUSION) {
            if Self::contains_ci(&result, safe) && ctx.chance(0.3) {
                result = Self::replace_first_ci(&result, safe, dangerous);
            }
        }
        result
    }

    /// Perturb free text according to the configured level. Level 0 and
    /// short texts are returned unchanged.
    pub fn inject_text(
        &self,
        text: &str,
        cx: &MessinessContext,
        ctx: &mut GenContext,
    ) -> String {
        if self.level == MessinessLevel::Pristine || text.trim().len() < MIN_TEXT_LEN {
            return text.to_string();
        }

        let mut result = text.to_string();
        if self.level >= MessinessLevel::RealWorld {
            result = self.inject_abbreviations(&result, ctx);
        }
        if self.level >= MessinessLevel::BusyClinic {
            result = self.inject_zombie_fragments(&result, cx, ctx);
        }
        if self.level >= MessinessLevel::SafetyLandmines {
            result = self.inject_dictation_errors(&result, ctx);
            result = self.inject_pronoun_errors(&result, cx, ctx);
        }
        if self.level >= MessinessLevel::ChartFromHell {
            result = self.inject_ismp_violations(&result, ctx);
        }
        result
    }

    /// Level 2+: duplicate one sentence (copy-paste redundancy), 20% gate.
    pub fn add_redundant_text(&self, text: &str, ctx: &mut GenContext) -> String {
        if self.level < MessinessLevel::BusyClinic || !ctx.chance(0.2) {
            return text.to_string();
        }
        let sentences: Vec<&str> = text.split(". ").collect();
        if sentences.len() <= 3 {
            return text.to_string();
        }
        let idx = ctx.int_between(0, sentences.len() as i64 - 1) as usize;
        let mut out: Vec<&str> = Vec::with_capacity(sentences.len() + 1);
        for (i, sentence) in sentences.iter().enumerate() {
            out.push(sentence);
            if i == idx {
                out.push(sentence);
            }
        }
        out.join(". ")
    }

    /// Level 4+: truncate one sentence mid-way (dictation cut-off), 15% gate.
    pub fn inject_incomplete_sentence(&self, text: &str, ctx: &mut GenContext) -> String {
        if self.level < MessinessLevel::SafetyLandmines || !ctx.chance(0.15) {
            return text.to_string();
        }
        let mut sentences: Vec<String> = text.split(". ").map(str::to_string).collect();
        if sentences.len() <= 2 {
            return text.to_string();
        }
        let idx = ctx.int_between(1, sentences.len() as i64 - 1) as usize;
        let words: Vec<String> = sentences[idx]
            .split_whitespace()
            .map(str::to_string)
            .collect();
        if words.len() > 4 {
            let cut = ctx.int_between(2, words.len() as i64 - 2) as usize;
            sentences[idx] = words[..cut].join(" ");
        }
        sentences.join(". ")
    }

    /// Level 3+: drop the diagnosis code entirely. Condition-specific 40%
    /// for known drift-prone conditions, 15% generic baseline.
    pub fn should_omit_diagnosis_code(&self, condition: &str, ctx: &mut GenContext) -> bool {
        if self.level < MessinessLevel::NeedsReconciliation {
            return false;
        }
        let lower = condition.to_lowercase();
        let matched = IMPLICIT_DIAGNOSIS_PATTERNS
            .iter()
            .any(|(fragment, _)| lower.contains(fragment));
        if matched {
            ctx.chance(0.4)
        } else {
            ctx.chance(0.15)
        }
    }

    /// Level 3+: substitute a clinically-plausible-but-wrong code, 30%
    /// within matched condition families.
    pub fn wrong_diagnosis_code(
        &self,
        condition: &str,
        ctx: &mut GenContext,
    ) -> Option<&'static str> {
        if self.level < MessinessLevel::NeedsReconciliation {
            return None;
        }
        let lower = condition.to_lowercase();
        for (fragment, wrong_codes) in IMPLICIT_DIAGNOSIS_PATTERNS {
            if lower.contains(fragment) && ctx.chance(0.3) {
                return Some(*ctx.pick(wrong_codes));
            }
        }
        None
    }

    /// Level 3+: contradict a structured vital in the narrative, ~25% gate.
    /// A normal temperature gains a febrile narrative; a febrile reading is
    /// normalized while the text claims "afebrile"; a normal blood pressure
    /// gains a hypertensive narrative.
    pub fn vitals_contradiction(
        &self,
        temperature_f: f64,
        systolic_bp: Option<u32>,
        ctx: &mut GenContext,
    ) -> (Option<f64>, Option<String>) {
        if self.level < MessinessLevel::NeedsReconciliation || !ctx.chance(0.25) {
            return (None, None);
        }

        if ctx.chance(0.5) {
            if temperature_f < 100.0 {
                let claimed = ctx.uniform(101.0, 104.0);
                return (None, Some(format!("febrile to {claimed:.1}")));
            }
            return (Some(98.6), Some("afebrile today".to_string()));
        }

        if let Some(systolic) = systolic_bp {
            if systolic < 140 {
                let claimed_sys = ctx.int_between(150, 180);
                let claimed_dia = ctx.int_between(90, 110);
                return (
                    None,
                    Some(format!("hypertensive at {claimed_sys}/{claimed_dia}")),
                );
            }
        }
        (None, None)
    }

    /// Level 4+: an exam finding that does not fit the patient's sex, 30%.
    pub fn wrong_sex_finding(&self, sex: Sex, ctx: &mut GenContext) -> Option<&'static str> {
        if self.level < MessinessLevel::SafetyLandmines || !ctx.chance(0.3) {
            return None;
        }
        let findings = match sex {
            Sex::Male => WRONG_SEX_FINDINGS_FOR_MALE,
            Sex::Female => WRONG_SEX_FINDINGS_FOR_FEMALE,
        };
        Some(*ctx.pick(findings))
    }

    /// Level 5: a medication conflicting with a recorded allergy, ~20%
    /// when an allergy class matches.
    pub fn allergy_conflict(
        &self,
        allergies: &[String],
        ctx: &mut GenContext,
    ) -> Option<&'static str> {
        if self.level < MessinessLevel::ChartFromHell {
            return None;
        }
        for allergy in allergies {
            let lower = allergy.to_lowercase();
            for (class, meds) in ALLERGY_RX_CONFLICTS {
                if lower.contains(class) && ctx.chance(0.2) {
                    return Some(*ctx.pick(meds));
                }
            }
        }
        None
    }

    /// Apply the full messiness pass to an encounter, producing a derived
    /// copy. The original is left untouched so history can be audited.
    pub fn apply_to_encounter(
        &self,
        encounter: &Encounter,
        cx: &MessinessContext,
        ctx: &mut GenContext,
    ) -> Encounter {
        let mut derived = encounter.clone();
        if self.level == MessinessLevel::Pristine {
            return derived;
        }

        if let Some(note) = derived.narrative_note.take() {
            let mut note = self.inject_text(&note, cx, ctx);
            note = self.add_redundant_text(&note, ctx);
            note = self.inject_incomplete_sentence(&note, ctx);
            if let Some(finding) = self.wrong_sex_finding(cx.sex, ctx) {
                note = format!("{}\n\n{finding}", note.trim_end());
            }
            derived.narrative_note = Some(note);
        }

        let (temp_override, contradiction) = self.vitals_contradiction(
            derived.vital_signs.temperature_f,
            derived.vital_signs.blood_pressure_systolic,
            ctx,
        );
        if let Some(temp) = temp_override {
            derived.vital_signs.temperature_f = temp;
        }
        if let Some(text) = contradiction {
            let claim = format!("Clinically {text}.");
            derived.narrative_note = Some(match derived.narrative_note.take() {
                Some(note) => format!("{}\n{claim}", note.trim_end()),
                None => claim,
            });
        }

        for assessment in &mut derived.assessment {
            if self.should_omit_diagnosis_code(&assessment.diagnosis, ctx) {
                assessment.code = None;
            } else if let Some(wrong) = self.wrong_diagnosis_code(&assessment.diagnosis, ctx) {
                if let Some(code) = &mut assessment.code {
                    code.code = wrong.to_string();
                    code.display = assessment.diagnosis.clone();
                }
            }
        }

        if let Some(conflicting_med) = self.allergy_conflict(cx.allergies, ctx) {
            derived.plan.push(PlanItem::new(
                PlanCategory::Medication,
                &format!("{conflicting_med} prescribed"),
            ));
            derived.prescriptions.push(Medication {
                id: short_id(),
                code: None,
                display_name: conflicting_med.to_string(),
                status: MedicationStatus::Active,
                dose: "per package".into(),
                frequency: "as directed".into(),
                route: "oral".into(),
                prn: false,
                start_date: derived.date.date(),
                end_date: None,
                indication: None,
                discontinuation_reason: None,
            });
        }

        derived
    }
}
