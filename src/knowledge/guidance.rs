/// Anticipatory guidance topics keyed by visit age in months. Lookups take
/// the nearest age on file.
static GUIDANCE_BY_AGE: &[(u32, &str)] = &[
    (0, "Safe sleep practices, feeding support, newborn care"),
    (2, "Tummy time, reading to baby, car seat safety"),
    (4, "Starting solids at 6 months, developmental milestones"),
    (6, "Choking hazards, baby-proofing home, dental care"),
    (12, "Toddler safety, language development, limit screen time"),
    (24, "Toilet training readiness, discipline strategies, outdoor play"),
    (48, "School readiness, healthy eating habits, physical activity"),
    (72, "Homework routines, peer relationships, internet safety"),
    (132, "Puberty education, mental health awareness, substance avoidance"),
];

/// Guidance topics for a visit age, as one comma-separated line.
pub fn guidance_for(age_months: u32) -> &'static str {
    GUIDANCE_BY_AGE
        .iter()
        .min_by_key(|(age, _)| age.abs_diff(age_months))
        .map(|(_, g)| *g)
        .unwrap_or("Age-appropriate guidance provided")
}

/// Guidance topics for a visit age, split into individual items.
pub fn guidance_list_for(age_months: u32) -> Vec<String> {
    guidance_for(age_months)
        .split(',')
        .map(|g| g.trim().to_string())
        .collect()
}
