//! Encounter materializer: expands a scheduling stub into a full clinical
//! encounter. Pure apart from the random draws, which all come from the
//! shared generator context.

use chrono::NaiveDate;

use crate::growth::{
    calculate_bmi_percentile, calculate_hc_percentile, calculate_height_percentile,
    calculate_weight_percentile,
};
use crate::knowledge::{
    doses_due_at, guidance_for, guidance_list_for, vital_ranges_for, BP_MIN_AGE_MONTHS,
};
use crate::models::{
    age_description, short_id, Assessment, CodeableConcept, Demographics, Encounter,
    EncounterType, GrowthMeasurement, GrowthPercentiles, Immunization, Location, Medication,
    MedicationStatus, PhysicalExam, PlanCategory, PlanItem, Provider, VitalSigns,
};

use super::context::GenContext;
use super::life_arc::LifeArc;
use super::timeline::EncounterStub;

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Sample vitals uniformly within the middle 80% of the age band's normal
/// range. Temperature and oxygen saturation keep one decimal, the rest are
/// whole numbers. Blood pressure is omitted below 36 months.
pub fn generate_vitals(age_months: u32, ctx: &mut GenContext) -> VitalSigns {
    let ranges = vital_ranges_for(age_months);

    let mut middle = |low: f64, high: f64| {
        let margin = (high - low) * 0.1;
        ctx.uniform(low + margin, high - margin)
    };

    let temperature_f = round1(middle(ranges.temperature_f.0, ranges.temperature_f.1));
    let heart_rate = middle(ranges.heart_rate.0, ranges.heart_rate.1).round() as u32;
    let respiratory_rate =
        middle(ranges.respiratory_rate.0, ranges.respiratory_rate.1).round() as u32;
    let oxygen_saturation = round1(middle(
        ranges.oxygen_saturation.0,
        ranges.oxygen_saturation.1,
    ));

    let (systolic, diastolic) = if age_months >= BP_MIN_AGE_MONTHS {
        (
            Some(middle(ranges.systolic_bp.0, ranges.systolic_bp.1).round() as u32),
            Some(middle(ranges.diastolic_bp.0, ranges.diastolic_bp.1).round() as u32),
        )
    } else {
        (None, None)
    };

    VitalSigns {
        temperature_f,
        heart_rate,
        respiratory_rate,
        blood_pressure_systolic: systolic,
        blood_pressure_diastolic: diastolic,
        oxygen_saturation,
        weight_kg: None,
        height_cm: None,
        head_circumference_cm: None,
    }
}

fn well_visit_exam() -> PhysicalExam {
    PhysicalExam {
        general: Some("Well-appearing, well-nourished, in no acute distress".into()),
        heent: Some(
            "Normocephalic, atraumatic. Pupils equal, round, reactive. TMs clear bilaterally. \
             Oropharynx clear."
                .into(),
        ),
        neck: Some("Supple, no lymphadenopathy".into()),
        cardiovascular: Some("Regular rate and rhythm, no murmur".into()),
        respiratory: Some("Clear to auscultation bilaterally, no wheezes, rales, or rhonchi".into()),
        abdomen: Some("Soft, non-tender, non-distended, no hepatosplenomegaly".into()),
        musculoskeletal: Some("Normal tone and strength, moves all extremities well".into()),
        skin: Some("Warm, dry, no rashes".into()),
        neurological: Some("Alert, appropriate for age, normal tone".into()),
    }
}

/// Acute template with keyword-triggered substitutions against the default
/// findings.
fn acute_visit_exam(reason: &str) -> PhysicalExam {
    let reason_lower = reason.to_lowercase();
    let mut exam = PhysicalExam {
        general: Some("Alert, in no acute distress".into()),
        heent: Some("Normocephalic, atraumatic".into()),
        cardiovascular: Some("Regular rate and rhythm".into()),
        respiratory: Some("Clear to auscultation bilaterally".into()),
        ..Default::default()
    };

    if reason_lower.contains("respiratory") || reason_lower.contains("uri") {
        exam.heent = Some(
            "Nasal congestion with clear rhinorrhea. Oropharynx mildly erythematous without \
             exudate."
                .into(),
        );
    } else if reason_lower.contains("otitis") || reason_lower.contains("ear") {
        exam.heent = Some("Right TM erythematous and bulging with poor light reflex".into());
    } else if reason_lower.contains("pharyngitis") || reason_lower.contains("strep") {
        exam.heent =
            Some("Tonsillar erythema and exudate, tender anterior cervical adenopathy".into());
    } else if reason_lower.contains("bronchiolitis") || reason_lower.contains("croup") {
        exam.respiratory =
            Some("Scattered wheezes and coarse breath sounds, mild subcostal retractions".into());
    } else if reason_lower.contains("rash") || reason_lower.contains("bite") {
        exam.skin = Some("Erythematous papular rash, no vesicles, no petechiae".into());
    } else if reason_lower.contains("gastroenteritis") {
        exam.abdomen = Some("Soft, mild diffuse tenderness, no rebound, active bowel sounds".into());
    }

    exam
}

fn assessments_for(
    stub: &EncounterStub,
    age_months: u32,
    life_arc: &LifeArc,
) -> Vec<Assessment> {
    let mut assessments = Vec::new();

    let primary = match stub.encounter_type {
        EncounterType::Newborn => Assessment {
            diagnosis: "Healthy newborn".into(),
            code: Some(CodeableConcept::icd10(
                "Z00.110",
                "Health examination for newborn under 8 days old",
            )),
            is_primary: true,
        },
        EncounterType::WellChild => Assessment {
            diagnosis: format!("Well-child examination - {}", age_description(age_months)),
            code: Some(CodeableConcept::icd10(
                "Z00.129",
                "Encounter for routine child health examination without abnormal findings",
            )),
            is_primary: true,
        },
        EncounterType::AnnualPhysical => Assessment {
            diagnosis: "Annual physical examination".into(),
            code: Some(CodeableConcept::icd10(
                "Z00.00",
                "Encounter for general adult medical examination without abnormal findings",
            )),
            is_primary: true,
        },
        _ => Assessment {
            diagnosis: stub.reason.clone(),
            code: Some(crate::knowledge::acute_reason_code(&stub.reason)),
            is_primary: true,
        },
    };
    assessments.push(primary);

    for condition in &stub.conditions_to_address {
        if life_arc.has_condition(condition) {
            let status = if stub.is_new_condition_diagnosis {
                "newly diagnosed"
            } else {
                "stable"
            };
            assessments.push(Assessment {
                diagnosis: format!("{condition}, {status}"),
                code: Some(crate::knowledge::condition_code(condition)),
                is_primary: false,
            });
        }
    }

    assessments
}

/// Plan and prescriptions for an acute illness, keyed by reason substring.
/// Unmatched reasons fall back to generic supportive care.
fn acute_illness_plan(
    reason: &str,
    weight_kg: Option<f64>,
    encounter_date: NaiveDate,
) -> (Vec<PlanItem>, Vec<Medication>) {
    let reason_lower = reason.to_lowercase();
    let mut plan = Vec::new();
    let mut prescriptions = Vec::new();

    if reason_lower.contains("respiratory")
        || reason_lower.contains("uri")
        || reason_lower.contains("cold")
    {
        plan.push(PlanItem::new(
            PlanCategory::Other,
            "Supportive care with rest and hydration",
        ));
        plan.push(PlanItem::new(
            PlanCategory::Medication,
            "Acetaminophen or ibuprofen as needed for fever/discomfort",
        ));
        plan.push(PlanItem::new(
            PlanCategory::Education,
            "Return precautions reviewed: difficulty breathing, high fever >72hrs, worsening symptoms",
        ));
    } else if reason_lower.contains("otitis") || reason_lower.contains("ear") {
        let dose_description = match weight_kg {
            // 90 mg/kg/day divided BID, capped at the adult 4g/day.
            Some(weight) => {
                let daily = (90.0 * weight).min(4000.0);
                format!("Amoxicillin {:.0}mg/day divided BID x 10 days", daily)
            }
            None => "Amoxicillin 90mg/kg/day divided BID x 10 days".to_string(),
        };
        plan.push(PlanItem::new(PlanCategory::Medication, &dose_description));
        plan.push(PlanItem::new(
            PlanCategory::Medication,
            "Ibuprofen for pain management",
        ));
        plan.push(PlanItem::new(
            PlanCategory::FollowUp,
            "Return if no improvement in 48-72 hours",
        ));
        prescriptions.push(Medication {
            id: short_id(),
            code: Some(CodeableConcept::rxnorm("723", "Amoxicillin")),
            display_name: "Amoxicillin".into(),
            status: MedicationStatus::Active,
            dose: dose_description,
            frequency: "twice daily".into(),
            route: "oral".into(),
            prn: false,
            start_date: encounter_date,
            end_date: None,
            indication: Some("Acute otitis media".into()),
            discontinuation_reason: None,
        });
    } else if reason_lower.contains("gastroenteritis")
        || reason_lower.contains("vomiting")
        || reason_lower.contains("diarrhea")
    {
        plan.push(PlanItem::new(
            PlanCategory::Education,
            "Oral rehydration with small frequent amounts of fluids",
        ));
        plan.push(PlanItem::new(
            PlanCategory::Education,
            "Advance diet as tolerated as symptoms improve",
        ));
        plan.push(PlanItem::new(
            PlanCategory::Education,
            "Return if unable to keep fluids down, bloody stool, or signs of dehydration",
        ));
    } else if reason_lower.contains("fever") {
        plan.push(PlanItem::new(
            PlanCategory::Medication,
            "Acetaminophen or ibuprofen for temperature control",
        ));
        plan.push(PlanItem::new(
            PlanCategory::Education,
            "Monitor for source of infection, return if fever persists >3 days",
        ));
        plan.push(PlanItem::new(
            PlanCategory::FollowUp,
            "Follow up as needed if symptoms worsen",
        ));
    } else if reason_lower.contains("rash") || reason_lower.contains("bite") {
        plan.push(PlanItem::new(
            PlanCategory::Other,
            "Topical care as appropriate for rash type",
        ));
        plan.push(PlanItem::new(
            PlanCategory::Education,
            "Return if rash spreads, becomes painful, or child develops fever",
        ));
    } else if reason_lower.contains("conjunctivitis") || reason_lower.contains("pink eye") {
        plan.push(PlanItem::new(
            PlanCategory::Medication,
            "Antibiotic eye drops if bacterial; supportive care if viral",
        ));
        plan.push(PlanItem::new(
            PlanCategory::Education,
            "Good hand hygiene to prevent spread",
        ));
    } else {
        plan.push(PlanItem::new(
            PlanCategory::Other,
            "Supportive care with rest and hydration",
        ));
        plan.push(PlanItem::new(
            PlanCategory::FollowUp,
            "Return if symptoms worsen or do not improve in 3-5 days",
        ));
    }

    (plan, prescriptions)
}

/// Plan items for chronic condition management, keyed by condition name.
fn chronic_condition_plan(condition: &str, is_new_diagnosis: bool) -> Vec<PlanItem> {
    let lower = condition.to_lowercase();
    let mut plan = Vec::new();

    if lower.contains("asthma") {
        if is_new_diagnosis {
            plan.push(PlanItem::new(
                PlanCategory::Medication,
                "Start albuterol inhaler PRN for rescue",
            ));
            plan.push(PlanItem::new(
                PlanCategory::Education,
                "Asthma education provided: triggers, inhaler technique, action plan",
            ));
            plan.push(PlanItem::new(
                PlanCategory::Referral,
                "Consider pulmonology referral if poorly controlled",
            ));
        } else {
            plan.push(PlanItem::new(
                PlanCategory::Medication,
                "Continue current asthma regimen",
            ));
            plan.push(PlanItem::new(
                PlanCategory::Other,
                "Asthma well controlled, continue current management",
            ));
        }
        plan.push(PlanItem::new(
            PlanCategory::FollowUp,
            "Return in 3 months for asthma review",
        ));
    } else if lower.contains("adhd") {
        if is_new_diagnosis {
            plan.push(PlanItem::new(
                PlanCategory::Education,
                "ADHD education provided; discussed behavioral strategies",
            ));
            plan.push(PlanItem::new(
                PlanCategory::Medication,
                "Consider starting methylphenidate after discussion with family",
            ));
        } else {
            plan.push(PlanItem::new(
                PlanCategory::Other,
                "Review medication efficacy and side effects",
            ));
            plan.push(PlanItem::new(
                PlanCategory::Medication,
                "Continue current ADHD medication regimen",
            ));
        }
        plan.push(PlanItem::new(
            PlanCategory::FollowUp,
            "Return in 1-3 months for medication review",
        ));
    } else if lower.contains("eczema") || lower.contains("dermatitis") {
        if is_new_diagnosis {
            plan.push(PlanItem::new(
                PlanCategory::Medication,
                "Start topical corticosteroid for flares",
            ));
            plan.push(PlanItem::new(
                PlanCategory::Education,
                "Skin care education: moisturize frequently, avoid triggers",
            ));
        } else {
            plan.push(PlanItem::new(
                PlanCategory::Medication,
                "Continue emollient therapy and topical steroids as needed",
            ));
        }
        plan.push(PlanItem::new(
            PlanCategory::FollowUp,
            "Return if flares not controlled or signs of infection",
        ));
    } else if lower.contains("allergy") || lower.contains("allergic") {
        plan.push(PlanItem::new(
            PlanCategory::Medication,
            "Antihistamine as needed for symptoms",
        ));
        plan.push(PlanItem::new(
            PlanCategory::Education,
            "Allergen avoidance strategies discussed",
        ));
        if lower.contains("food") {
            plan.push(PlanItem::new(
                PlanCategory::Medication,
                "Epinephrine auto-injector prescribed; training provided",
            ));
        }
    } else if lower.contains("anxiety") || lower.contains("depression") {
        plan.push(PlanItem::new(
            PlanCategory::Referral,
            "Counseling/therapy referral for CBT",
        ));
        plan.push(PlanItem::new(
            PlanCategory::Education,
            "Discussed coping strategies and relaxation techniques",
        ));
        plan.push(PlanItem::new(
            PlanCategory::FollowUp,
            "Follow up in 4-6 weeks to assess progress",
        ));
    } else if lower.contains("obesity") {
        plan.push(PlanItem::new(
            PlanCategory::Education,
            "Nutrition counseling; goal of modest lifestyle changes",
        ));
        plan.push(PlanItem::new(
            PlanCategory::Referral,
            "Refer to dietitian for comprehensive nutrition plan",
        ));
        plan.push(PlanItem::new(
            PlanCategory::FollowUp,
            "Return in 3 months for weight check",
        ));
    } else if lower.contains("constipation") {
        plan.push(PlanItem::new(
            PlanCategory::Education,
            "Increase fiber and fluid intake",
        ));
        plan.push(PlanItem::new(
            PlanCategory::Medication,
            "Osmotic laxative as needed",
        ));
    } else {
        plan.push(PlanItem::new(
            PlanCategory::Medication,
            "Continue current medication regimen",
        ));
        plan.push(PlanItem::new(
            PlanCategory::FollowUp,
            "Return in 3-6 months for condition review",
        ));
    }

    plan
}

fn immunizations_for(age_months: u32, date: NaiveDate) -> Vec<Immunization> {
    doses_due_at(age_months)
        .iter()
        .map(|dose| Immunization {
            id: short_id(),
            vaccine_code: CodeableConcept::cvx(dose.cvx, dose.name),
            display_name: dose.name.to_string(),
            date,
            dose_number: dose.dose_number,
        })
        .collect()
}

/// Percentile block from the latest growth measurement. Age windows are
/// checked up front, so the curve lookups cannot fail here.
fn growth_percentiles_for(
    growth: &GrowthMeasurement,
    age_months: u32,
    demographics: &Demographics,
) -> GrowthPercentiles {
    let sex = demographics.sex_at_birth;
    GrowthPercentiles {
        weight_percentile: calculate_weight_percentile(growth.weight_kg, age_months, sex)
            .ok()
            .map(|r| r.percentile),
        height_percentile: calculate_height_percentile(growth.height_cm, age_months, sex)
            .ok()
            .map(|r| r.percentile),
        hc_percentile: growth
            .head_circumference_cm
            .filter(|_| age_months <= crate::config::HC_MAX_MONTHS)
            .and_then(|hc| calculate_hc_percentile(hc, age_months, sex).ok())
            .map(|r| r.percentile),
        bmi_percentile: growth
            .bmi
            .filter(|_| age_months >= crate::config::BMI_MIN_MONTHS)
            .and_then(|bmi| calculate_bmi_percentile(bmi, age_months, sex).ok())
            .map(|r| r.percentile),
    }
}

/// Expand a stub into a full encounter. The growth trajectory has already
/// produced the latest measurement when the visit calls for one.
#[allow(clippy::too_many_arguments)]
pub fn materialize_encounter(
    stub: &EncounterStub,
    demographics: &Demographics,
    age_months: u32,
    latest_growth: Option<&GrowthMeasurement>,
    life_arc: &LifeArc,
    provider: &Provider,
    location: &Location,
    ctx: &mut GenContext,
) -> Encounter {
    let mut vitals = generate_vitals(age_months, ctx);
    if let Some(growth) = latest_growth {
        vitals.weight_kg = Some(growth.weight_kg);
        vitals.height_cm = Some(growth.height_cm);
        vitals.head_circumference_cm = growth.head_circumference_cm;
    }

    let physical_exam = if stub.encounter_type.is_preventive() {
        well_visit_exam()
    } else {
        acute_visit_exam(&stub.reason)
    };

    let assessment = assessments_for(stub, age_months, life_arc);

    let mut plan = Vec::new();
    let mut prescriptions = Vec::new();
    match stub.encounter_type {
        EncounterType::Newborn | EncounterType::WellChild => {
            plan.push(PlanItem::with_details(
                PlanCategory::Education,
                "Anticipatory guidance provided",
                guidance_for(age_months),
            ));
            plan.push(PlanItem::new(
                PlanCategory::FollowUp,
                "Return for next well-child visit",
            ));
        }
        EncounterType::AnnualPhysical => {
            plan.push(PlanItem::new(
                PlanCategory::Education,
                "Health maintenance counseling provided",
            ));
            plan.push(PlanItem::new(
                PlanCategory::FollowUp,
                "Return in 1 year for annual examination",
            ));
        }
        EncounterType::AcuteIllness | EncounterType::UrgentCare | EncounterType::Emergency => {
            let weight = latest_growth.map(|g| g.weight_kg);
            let (acute_plan, acute_rx) =
                acute_illness_plan(&stub.reason, weight, stub.date);
            plan = acute_plan;
            prescriptions = acute_rx;
        }
        EncounterType::ChronicFollowup => {
            for condition in &stub.conditions_to_address {
                plan.extend(chronic_condition_plan(condition, stub.is_new_condition_diagnosis));
            }
            if plan.is_empty() {
                plan.push(PlanItem::new(
                    PlanCategory::FollowUp,
                    "Continue current management",
                ));
                plan.push(PlanItem::new(
                    PlanCategory::FollowUp,
                    "Return in 3-6 months or sooner if symptoms worsen",
                ));
            }
        }
    }

    let immunizations_given = if stub.encounter_type.is_preventive() {
        immunizations_for(age_months, stub.date)
    } else {
        Vec::new()
    };

    let anticipatory_guidance = match stub.encounter_type {
        EncounterType::Newborn | EncounterType::WellChild => guidance_list_for(age_months),
        _ => Vec::new(),
    };

    let growth_percentiles = latest_growth
        .filter(|_| stub.encounter_type.is_preventive())
        .map(|g| growth_percentiles_for(g, age_months, demographics));

    let hour = ctx.int_between(8, 16) as u32;
    let date = stub
        .date
        .and_hms_opt(hour, 0, 0)
        .unwrap_or_else(|| stub.date.and_time(chrono::NaiveTime::default()));

    Encounter {
        id: short_id(),
        date,
        encounter_type: stub.encounter_type,
        chief_complaint: stub.reason.clone(),
        provider: provider.clone(),
        location: location.clone(),
        vital_signs: vitals,
        physical_exam,
        assessment,
        plan,
        prescriptions,
        immunizations_given,
        growth_percentiles,
        anticipatory_guidance,
        narrative_note: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Address, Contact, Sex};
    use chrono::NaiveDate;

    fn demographics() -> Demographics {
        Demographics {
            given_name: "Mia".into(),
            family_name: "Garcia".into(),
            date_of_birth: NaiveDate::from_ymd_opt(2022, 3, 1).unwrap(),
            sex_at_birth: Sex::Female,
            race: "White".into(),
            ethnicity: "Hispanic or Latino".into(),
            preferred_language: "English".into(),
            address: Address {
                line1: "88 Park Avenue".into(),
                city: "Madison".into(),
                state: "WI".into(),
                postal_code: "53703".into(),
                country: "US".into(),
            },
            phone: "(555) 404-1000".into(),
            emergency_contact: Contact {
                name: "Rosa Garcia".into(),
                relationship: "Mother".into(),
                phone: "(555) 404-1001".into(),
            },
            legal_guardian: None,
        }
    }

    fn provider() -> Provider {
        Provider {
            id: short_id(),
            name: "Dr. Sarah Chen".into(),
            credentials: "MD".into(),
            specialty: "Pediatrics".into(),
        }
    }

    fn location() -> Location {
        Location {
            id: short_id(),
            name: "Main Street Pediatrics".into(),
            kind: "Outpatient clinic".into(),
        }
    }

    fn well_stub(age_months: u32) -> EncounterStub {
        EncounterStub {
            date: NaiveDate::from_ymd_opt(2023, 3, 1).unwrap(),
            encounter_type: if age_months == 0 {
                EncounterType::Newborn
            } else {
                EncounterType::WellChild
            },
            reason: format!("Well-child visit - {}", age_description(age_months)),
            conditions_to_address: vec![],
            is_new_condition_diagnosis: false,
            new_condition: None,
        }
    }

    #[test]
    fn vitals_fall_inside_normal_ranges() {
        let mut ctx = GenContext::from_seed(Some(42));
        for age in [0u32, 6, 24, 60, 120, 200] {
            let vitals = generate_vitals(age, &mut ctx);
            let ranges = vital_ranges_for(age);
            assert!(vitals.temperature_f >= ranges.temperature_f.0);
            assert!(vitals.temperature_f <= ranges.temperature_f.1);
            assert!((vitals.heart_rate as f64) >= ranges.heart_rate.0 - 1.0);
            assert!((vitals.heart_rate as f64) <= ranges.heart_rate.1 + 1.0);
        }
    }

    #[test]
    fn bp_omitted_below_36_months() {
        let mut ctx = GenContext::from_seed(Some(42));
        let young = generate_vitals(24, &mut ctx);
        assert!(young.blood_pressure_systolic.is_none());
        let older = generate_vitals(48, &mut ctx);
        assert!(older.blood_pressure_systolic.is_some());
        assert!(older.blood_pressure_diastolic.is_some());
    }

    #[test]
    fn well_visit_gets_guidance_and_exam() {
        let mut ctx = GenContext::from_seed(Some(42));
        let enc = materialize_encounter(
            &well_stub(12),
            &demographics(),
            12,
            None,
            &LifeArc::healthy(),
            &provider(),
            &location(),
            &mut ctx,
        );
        assert!(enc.physical_exam.general.as_deref().unwrap().contains("Well-appearing"));
        assert!(!enc.anticipatory_guidance.is_empty());
        assert!(enc
            .plan
            .iter()
            .any(|p| p.description.contains("Anticipatory guidance")));
        assert!(!enc.immunizations_given.is_empty(), "12-month vaccines due");
    }

    #[test]
    fn acute_uri_swaps_the_oropharynx_line() {
        let mut ctx = GenContext::from_seed(Some(42));
        let stub = EncounterStub {
            date: NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
            encounter_type: EncounterType::AcuteIllness,
            reason: "Upper Respiratory Infection".into(),
            conditions_to_address: vec![],
            is_new_condition_diagnosis: false,
            new_condition: None,
        };
        let enc = materialize_encounter(
            &stub,
            &demographics(),
            22,
            None,
            &LifeArc::healthy(),
            &provider(),
            &location(),
            &mut ctx,
        );
        assert!(enc
            .physical_exam
            .heent
            .as_deref()
            .unwrap()
            .contains("erythematous"));
        assert!(enc.immunizations_given.is_empty());
        assert!(enc.growth_percentiles.is_none());
    }

    #[test]
    fn otitis_produces_weight_based_amoxicillin() {
        let growth = GrowthMeasurement {
            id: short_id(),
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            age_in_days: 660,
            weight_kg: 12.0,
            height_cm: 84.0,
            head_circumference_cm: Some(48.0),
            bmi: None,
        };
        let mut ctx = GenContext::from_seed(Some(42));
        let stub = EncounterStub {
            date: NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
            encounter_type: EncounterType::AcuteIllness,
            reason: "Acute Otitis Media".into(),
            conditions_to_address: vec![],
            is_new_condition_diagnosis: false,
            new_condition: None,
        };
        let enc = materialize_encounter(
            &stub,
            &demographics(),
            22,
            Some(&growth),
            &LifeArc::healthy(),
            &provider(),
            &location(),
            &mut ctx,
        );
        assert_eq!(enc.prescriptions.len(), 1);
        let rx = &enc.prescriptions[0];
        assert_eq!(rx.display_name, "Amoxicillin");
        // 90 mg/kg/day at 12 kg = 1080 mg/day.
        assert!(rx.dose.contains("1080"));
    }

    #[test]
    fn chronic_followup_plans_by_condition() {
        let plan = chronic_condition_plan("Asthma", true);
        assert!(plan.iter().any(|p| p.description.contains("albuterol")));
        let plan = chronic_condition_plan("Asthma", false);
        assert!(plan.iter().any(|p| p.description.contains("Continue")));
        let plan = chronic_condition_plan("Something Unmapped", false);
        assert!(plan.iter().any(|p| p.category == PlanCategory::FollowUp));
    }

    #[test]
    fn unknown_reason_gets_supportive_care() {
        let (plan, rx) = acute_illness_plan("Mystery Complaint", None, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert!(plan.iter().any(|p| p.description.contains("Supportive care")));
        assert!(rx.is_empty());
    }

    #[test]
    fn growth_percentiles_respect_age_windows() {
        let growth = GrowthMeasurement {
            id: short_id(),
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            age_in_days: 1230,
            weight_kg: 16.0,
            height_cm: 101.0,
            head_circumference_cm: None,
            bmi: Some(15.7),
        };
        let pct = growth_percentiles_for(&growth, 41, &demographics());
        assert!(pct.weight_percentile.is_some());
        assert!(pct.height_percentile.is_some());
        assert!(pct.hc_percentile.is_none(), "no HC percentile past 36 months");
        assert!(pct.bmi_percentile.is_some());
    }
}
