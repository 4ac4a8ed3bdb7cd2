/// Normal vital-sign ranges for one age band. Each field is (low, high).
#[derive(Debug, Clone, Copy)]
pub struct VitalRanges {
    pub heart_rate: (f64, f64),
    pub respiratory_rate: (f64, f64),
    pub systolic_bp: (f64, f64),
    pub diastolic_bp: (f64, f64),
    pub temperature_f: (f64, f64),
    pub oxygen_saturation: (f64, f64),
}

static NEONATE: VitalRanges = VitalRanges {
    heart_rate: (100.0, 160.0),
    respiratory_rate: (30.0, 60.0),
    systolic_bp: (60.0, 90.0),
    diastolic_bp: (30.0, 60.0),
    temperature_f: (97.5, 99.5),
    oxygen_saturation: (95.0, 100.0),
};

static INFANT: VitalRanges = VitalRanges {
    heart_rate: (100.0, 150.0),
    respiratory_rate: (25.0, 40.0),
    systolic_bp: (80.0, 100.0),
    diastolic_bp: (50.0, 70.0),
    temperature_f: (97.5, 99.5),
    oxygen_saturation: (95.0, 100.0),
};

static TODDLER: VitalRanges = VitalRanges {
    heart_rate: (90.0, 130.0),
    respiratory_rate: (20.0, 30.0),
    systolic_bp: (90.0, 105.0),
    diastolic_bp: (55.0, 70.0),
    temperature_f: (97.5, 99.5),
    oxygen_saturation: (95.0, 100.0),
};

static PRESCHOOL: VitalRanges = VitalRanges {
    heart_rate: (80.0, 120.0),
    respiratory_rate: (18.0, 25.0),
    systolic_bp: (95.0, 110.0),
    diastolic_bp: (60.0, 75.0),
    temperature_f: (97.5, 99.5),
    oxygen_saturation: (95.0, 100.0),
};

static SCHOOL_AGE: VitalRanges = VitalRanges {
    heart_rate: (70.0, 110.0),
    respiratory_rate: (16.0, 22.0),
    systolic_bp: (100.0, 120.0),
    diastolic_bp: (60.0, 80.0),
    temperature_f: (97.5, 99.5),
    oxygen_saturation: (95.0, 100.0),
};

static ADOLESCENT: VitalRanges = VitalRanges {
    heart_rate: (60.0, 100.0),
    respiratory_rate: (12.0, 20.0),
    systolic_bp: (110.0, 130.0),
    diastolic_bp: (65.0, 85.0),
    temperature_f: (97.5, 99.5),
    oxygen_saturation: (95.0, 100.0),
};

static ADULT: VitalRanges = VitalRanges {
    heart_rate: (60.0, 100.0),
    respiratory_rate: (12.0, 20.0),
    systolic_bp: (110.0, 140.0),
    diastolic_bp: (70.0, 90.0),
    temperature_f: (97.5, 99.5),
    oxygen_saturation: (95.0, 100.0),
};

/// Normal ranges for an age, banded neonate through adult.
pub fn vital_ranges_for(age_months: u32) -> &'static VitalRanges {
    match age_months {
        0 => &NEONATE,
        1..=11 => &INFANT,
        12..=35 => &TODDLER,
        36..=71 => &PRESCHOOL,
        72..=143 => &SCHOOL_AGE,
        144..=215 => &ADOLESCENT,
        _ => &ADULT,
    }
}

/// Blood pressure is not routinely measured below this age.
pub const BP_MIN_AGE_MONTHS: u32 = 36;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bands_cover_all_ages() {
        for age in [0, 1, 11, 12, 35, 36, 71, 72, 143, 144, 215, 216, 400] {
            let ranges = vital_ranges_for(age);
            assert!(ranges.heart_rate.0 < ranges.heart_rate.1);
        }
    }

    #[test]
    fn heart_rate_slows_with_age() {
        assert!(vital_ranges_for(0).heart_rate.0 > vital_ranges_for(200).heart_rate.0);
    }

    #[test]
    fn neonate_breathes_faster_than_adolescent() {
        assert!(
            vital_ranges_for(0).respiratory_rate.1 > vital_ranges_for(180).respiratory_rate.1
        );
    }
}
