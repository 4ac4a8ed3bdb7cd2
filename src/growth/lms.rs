//! LMS-method growth chart calculations over CDC 2000 reference curves.
//!
//! The LMS method expresses growth as three age-indexed shape parameters:
//! L (Box-Cox power / skew), M (median), S (coefficient of variation).
//!
//! z = ((value/M)^L - 1) / (L * S)   when L != 0
//! z = ln(value/M) / S               when L == 0
//!
//! Percentile = Phi(z) * 100, with Phi the standard normal CDF.
//! Tables are sampled key points; lookups between rows interpolate each
//! parameter linearly, and lookups outside the table clamp to the boundary
//! row. Head circumference and BMI have hard age windows instead.

use serde::{Deserialize, Serialize};
use statrs::distribution::{ContinuousCDF, Normal};

use crate::config::{BMI_MIN_MONTHS, HC_MAX_MONTHS};
use crate::error::GenerationError;
use crate::models::Sex;

/// Measurement families with a reference curve on file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeasurementKind {
    Weight,
    Height,
    HeadCircumference,
    Bmi,
}

impl MeasurementKind {
    pub fn label(self) -> &'static str {
        match self {
            MeasurementKind::Weight => "weight",
            MeasurementKind::Height => "height",
            MeasurementKind::HeadCircumference => "head circumference",
            MeasurementKind::Bmi => "BMI",
        }
    }
}

/// Result of a percentile calculation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GrowthAssessment {
    pub value: f64,
    pub percentile: f64,
    pub z_score: f64,
    pub interpretation: String,
}

// Rows are (age_months, L, M, S).
type LmsRow = (u32, f64, f64, f64);

static WEIGHT_MALE: &[LmsRow] = &[
    (0, -0.3053, 3.530, 0.1514),
    (1, 0.0977, 4.470, 0.1359),
    (2, 0.1890, 5.380, 0.1296),
    (3, 0.1346, 6.123, 0.1256),
    (6, -0.0171, 7.934, 0.1215),
    (9, -0.1667, 9.180, 0.1182),
    (12, -0.2714, 10.15, 0.1149),
    (18, -0.3823, 11.47, 0.1127),
    (24, -0.4242, 12.59, 0.1139),
    (36, -0.4669, 14.34, 0.1198),
    (48, -0.5614, 16.33, 0.1307),
    (60, -0.7159, 18.62, 0.1441),
    (72, -0.8876, 20.93, 0.1555),
    (84, -1.0100, 23.39, 0.1644),
    (96, -1.0682, 25.94, 0.1722),
    (108, -1.0708, 28.58, 0.1803),
    (120, -1.0240, 31.44, 0.1893),
    (132, -0.9476, 34.77, 0.1979),
    (144, -0.8693, 38.91, 0.2044),
    (156, -0.8237, 43.87, 0.2082),
    (168, -0.8247, 49.49, 0.2091),
    (180, -0.8659, 55.38, 0.2070),
    (192, -0.9402, 60.98, 0.2016),
    (204, -1.0346, 65.89, 0.1934),
    (216, -1.1413, 70.11, 0.1837),
    (228, -1.2545, 73.71, 0.1737),
    (240, -1.3686, 76.78, 0.1642),
];

static WEIGHT_FEMALE: &[LmsRow] = &[
    (0, -0.3821, 3.399, 0.1433),
    (1, 0.1744, 4.187, 0.1319),
    (2, 0.3421, 5.030, 0.1253),
    (3, 0.3181, 5.720, 0.1216),
    (6, 0.0813, 7.351, 0.1192),
    (9, -0.0810, 8.475, 0.1175),
    (12, -0.1887, 9.363, 0.1162),
    (18, -0.3076, 10.67, 0.1165),
    (24, -0.3523, 11.91, 0.1202),
    (36, -0.3964, 13.86, 0.1294),
    (48, -0.4995, 16.06, 0.1411),
    (60, -0.6602, 18.48, 0.1522),
    (72, -0.8193, 20.93, 0.1612),
    (84, -0.9386, 23.53, 0.1691),
    (96, -0.9953, 26.31, 0.1774),
    (108, -0.9883, 29.34, 0.1868),
    (120, -0.9237, 32.78, 0.1970),
    (132, -0.8150, 36.90, 0.2068),
    (144, -0.6885, 41.74, 0.2141),
    (156, -0.5772, 47.00, 0.2173),
    (168, -0.5079, 52.11, 0.2163),
    (180, -0.4868, 56.56, 0.2116),
    (192, -0.5076, 60.08, 0.2042),
    (204, -0.5573, 62.68, 0.1954),
    (216, -0.6252, 64.52, 0.1865),
    (228, -0.7040, 65.81, 0.1784),
    (240, -0.7893, 66.75, 0.1714),
];

static HEIGHT_MALE: &[LmsRow] = &[
    (0, 0.3487, 49.99, 0.0379),
    (1, 0.1550, 54.72, 0.0370),
    (2, 0.0093, 58.42, 0.0365),
    (3, -0.0928, 61.43, 0.0363),
    (6, -0.2623, 67.62, 0.0358),
    (9, -0.3040, 72.03, 0.0356),
    (12, -0.2847, 75.75, 0.0356),
    (18, -0.1884, 82.39, 0.0357),
    (24, -0.0554, 87.78, 0.0363),
    (36, 0.1957, 96.10, 0.0393),
    (48, 0.2708, 102.9, 0.0417),
    (60, 0.2204, 109.2, 0.0432),
    (72, 0.1080, 115.1, 0.0445),
    (84, -0.0168, 120.8, 0.0457),
    (96, -0.1368, 126.2, 0.0468),
    (108, -0.2427, 131.5, 0.0479),
    (120, -0.3254, 136.8, 0.0490),
    (132, -0.3816, 142.4, 0.0500),
    (144, -0.4097, 148.7, 0.0505),
    (156, -0.4134, 155.5, 0.0502),
    (168, -0.3994, 162.2, 0.0489),
    (180, -0.3757, 168.1, 0.0465),
    (192, -0.3502, 172.7, 0.0437),
    (204, -0.3295, 175.8, 0.0412),
    (216, -0.3173, 177.6, 0.0396),
    (228, -0.3134, 178.6, 0.0386),
    (240, -0.3155, 179.1, 0.0382),
];

static HEIGHT_FEMALE: &[LmsRow] = &[
    (0, 0.3809, 49.29, 0.0379),
    (1, 0.1700, 53.69, 0.0369),
    (2, 0.0178, 57.07, 0.0365),
    (3, -0.0858, 59.80, 0.0361),
    (6, -0.2777, 65.73, 0.0353),
    (9, -0.3379, 70.11, 0.0350),
    (12, -0.3433, 73.96, 0.0349),
    (18, -0.2962, 80.80, 0.0352),
    (24, -0.2046, 86.40, 0.0362),
    (36, 0.0047, 94.86, 0.0399),
    (48, 0.0884, 101.8, 0.0428),
    (60, 0.0696, 108.4, 0.0449),
    (72, -0.0049, 114.6, 0.0467),
    (84, -0.0919, 120.6, 0.0484),
    (96, -0.1759, 126.4, 0.0502),
    (108, -0.2483, 132.0, 0.0519),
    (120, -0.3033, 137.5, 0.0537),
    (132, -0.3380, 143.3, 0.0553),
    (144, -0.3547, 149.4, 0.0560),
    (156, -0.3600, 155.0, 0.0556),
    (168, -0.3607, 159.5, 0.0540),
    (180, -0.3608, 162.5, 0.0518),
    (192, -0.3616, 164.2, 0.0498),
    (204, -0.3632, 165.0, 0.0484),
    (216, -0.3655, 165.4, 0.0477),
    (228, -0.3684, 165.6, 0.0474),
    (240, -0.3718, 165.7, 0.0473),
];

static HC_MALE: &[LmsRow] = &[
    (0, 1.8758, 34.71, 0.0369),
    (1, 1.3893, 37.31, 0.0349),
    (2, 1.0199, 39.21, 0.0338),
    (3, 0.7459, 40.56, 0.0331),
    (6, 0.2426, 43.34, 0.0318),
    (9, -0.0100, 45.19, 0.0311),
    (12, -0.1532, 46.55, 0.0308),
    (18, -0.2902, 48.15, 0.0304),
    (24, -0.3510, 49.27, 0.0303),
    (36, -0.3934, 50.65, 0.0305),
];

static HC_FEMALE: &[LmsRow] = &[
    (0, 2.1539, 33.88, 0.0359),
    (1, 1.5817, 36.42, 0.0341),
    (2, 1.1416, 38.22, 0.0331),
    (3, 0.8108, 39.53, 0.0324),
    (6, 0.2618, 42.17, 0.0312),
    (9, -0.0362, 43.93, 0.0306),
    (12, -0.2078, 45.23, 0.0304),
    (18, -0.3685, 46.76, 0.0303),
    (24, -0.4463, 47.84, 0.0304),
    (36, -0.5101, 49.13, 0.0308),
];

static BMI_MALE: &[LmsRow] = &[
    (24, -0.7766, 16.42, 0.0861),
    (36, -1.2236, 15.79, 0.0823),
    (48, -1.4997, 15.48, 0.0839),
    (60, -1.6315, 15.34, 0.0885),
    (72, -1.6623, 15.32, 0.0950),
    (84, -1.6293, 15.44, 0.1024),
    (96, -1.5635, 15.72, 0.1102),
    (108, -1.4867, 16.15, 0.1178),
    (120, -1.4143, 16.72, 0.1250),
    (132, -1.3563, 17.44, 0.1311),
    (144, -1.3159, 18.30, 0.1360),
    (156, -1.2932, 19.27, 0.1394),
    (168, -1.2865, 20.29, 0.1413),
    (180, -1.2926, 21.29, 0.1417),
    (192, -1.3074, 22.21, 0.1407),
    (204, -1.3268, 23.02, 0.1388),
    (216, -1.3467, 23.69, 0.1364),
    (228, -1.3651, 24.22, 0.1339),
    (240, -1.3815, 24.63, 0.1317),
];

static BMI_FEMALE: &[LmsRow] = &[
    (24, -0.6075, 16.13, 0.0917),
    (36, -0.9803, 15.58, 0.0890),
    (48, -1.1963, 15.29, 0.0903),
    (60, -1.2959, 15.17, 0.0942),
    (72, -1.3224, 15.17, 0.0997),
    (84, -1.3064, 15.32, 0.1063),
    (96, -1.2716, 15.59, 0.1132),
    (108, -1.2353, 16.00, 0.1200),
    (120, -1.2062, 16.53, 0.1264),
    (132, -1.1882, 17.20, 0.1319),
    (144, -1.1814, 18.00, 0.1361),
    (156, -1.1839, 18.88, 0.1389),
    (168, -1.1929, 19.79, 0.1401),
    (180, -1.2053, 20.66, 0.1399),
    (192, -1.2183, 21.43, 0.1388),
    (204, -1.2301, 22.07, 0.1373),
    (216, -1.2399, 22.56, 0.1358),
    (228, -1.2475, 22.93, 0.1346),
    (240, -1.2531, 23.20, 0.1338),
];

/// L is treated as zero (log-normal branch) below this magnitude.
const L_EPSILON: f64 = 1e-10;

fn table_for(kind: MeasurementKind, sex: Sex) -> &'static [LmsRow] {
    match (kind, sex) {
        (MeasurementKind::Weight, Sex::Male) => WEIGHT_MALE,
        (MeasurementKind::Weight, Sex::Female) => WEIGHT_FEMALE,
        (MeasurementKind::Height, Sex::Male) => HEIGHT_MALE,
        (MeasurementKind::Height, Sex::Female) => HEIGHT_FEMALE,
        (MeasurementKind::HeadCircumference, Sex::Male) => HC_MALE,
        (MeasurementKind::HeadCircumference, Sex::Female) => HC_FEMALE,
        (MeasurementKind::Bmi, Sex::Male) => BMI_MALE,
        (MeasurementKind::Bmi, Sex::Female) => BMI_FEMALE,
    }
}

/// Reject ages outside a measurement kind's defined window. Weight and
/// height clamp instead (the reference range covers the whole pediatric
/// span), so only head circumference and BMI can fail here.
fn check_age_window(kind: MeasurementKind, age_months: u32) -> Result<(), GenerationError> {
    match kind {
        MeasurementKind::HeadCircumference if age_months > HC_MAX_MONTHS => {
            Err(GenerationError::UnsupportedAgeRange {
                measure: kind.label(),
                age_months,
            })
        }
        MeasurementKind::Bmi if age_months < BMI_MIN_MONTHS => {
            Err(GenerationError::UnsupportedAgeRange {
                measure: kind.label(),
                age_months,
            })
        }
        _ => Ok(()),
    }
}

/// Interpolated (L, M, S) for an age: exact row, boundary clamp, or linear
/// interpolation between the bracketing rows.
fn lms_at(kind: MeasurementKind, sex: Sex, age_months: u32) -> Result<(f64, f64, f64), GenerationError> {
    check_age_window(kind, age_months)?;
    let table = table_for(kind, sex);

    let first = table[0];
    let last = table[table.len() - 1];
    if age_months <= first.0 {
        return Ok((first.1, first.2, first.3));
    }
    if age_months >= last.0 {
        return Ok((last.1, last.2, last.3));
    }

    let upper_idx = table
        .iter()
        .position(|row| row.0 >= age_months)
        .unwrap_or(table.len() - 1);
    let (ua, ul, um, us) = table[upper_idx];
    if ua == age_months {
        return Ok((ul, um, us));
    }
    let (la, ll, lm, ls) = table[upper_idx - 1];

    let t = (age_months - la) as f64 / (ua - la) as f64;
    Ok((
        ll + t * (ul - ll),
        lm + t * (um - lm),
        ls + t * (us - ls),
    ))
}

fn z_from_value(value: f64, l: f64, m: f64, s: f64) -> f64 {
    if l.abs() < L_EPSILON {
        (value / m).ln() / s
    } else {
        ((value / m).powf(l) - 1.0) / (l * s)
    }
}

fn value_from_z(z: f64, l: f64, m: f64, s: f64) -> f64 {
    if l.abs() < L_EPSILON {
        m * (z * s).exp()
    } else {
        m * (1.0 + l * s * z).powf(1.0 / l)
    }
}

fn std_normal() -> Normal {
    // Unit normal construction cannot fail.
    Normal::new(0.0, 1.0).unwrap()
}

fn percentile_from_z(z: f64) -> f64 {
    std_normal().cdf(z) * 100.0
}

fn z_from_percentile(percentile: f64) -> f64 {
    std_normal().inverse_cdf(percentile / 100.0)
}

fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

fn interpret(kind: MeasurementKind, percentile: f64) -> String {
    if kind == MeasurementKind::Bmi {
        return if percentile < 5.0 {
            "Underweight (<5th percentile)".to_string()
        } else if percentile < 85.0 {
            "Healthy weight (5th-85th percentile)".to_string()
        } else if percentile < 95.0 {
            "Overweight (85th-95th percentile)".to_string()
        } else {
            "Obese (>=95th percentile)".to_string()
        };
    }

    let measure = kind.label();
    if percentile < 3.0 {
        format!("Very low {measure} (<3rd percentile)")
    } else if percentile < 10.0 {
        format!("Low {measure} (3rd-10th percentile)")
    } else if percentile < 25.0 {
        format!("Low-normal {measure} (10th-25th percentile)")
    } else if percentile <= 75.0 {
        format!("Normal {measure} (25th-75th percentile)")
    } else if percentile <= 90.0 {
        format!("High-normal {measure} (75th-90th percentile)")
    } else if percentile <= 97.0 {
        format!("High {measure} (90th-97th percentile)")
    } else {
        format!("Very high {measure} (>97th percentile)")
    }
}

/// Assess a raw measurement against the reference curve for its kind.
pub fn percentile_of(
    kind: MeasurementKind,
    value: f64,
    age_months: u32,
    sex: Sex,
) -> Result<GrowthAssessment, GenerationError> {
    let (l, m, s) = lms_at(kind, sex, age_months)?;
    let z = z_from_value(value, l, m, s);
    let percentile = percentile_from_z(z);
    Ok(GrowthAssessment {
        value,
        percentile: round_to(percentile, 1),
        z_score: round_to(z, 2),
        interpretation: interpret(kind, percentile),
    })
}

/// Generate the measurement value sitting at a target percentile.
pub fn value_at_percentile(
    kind: MeasurementKind,
    percentile: f64,
    age_months: u32,
    sex: Sex,
) -> Result<f64, GenerationError> {
    let (l, m, s) = lms_at(kind, sex, age_months)?;
    let z = z_from_percentile(percentile);
    let value = value_from_z(z, l, m, s);
    Ok(match kind {
        MeasurementKind::Weight => round_to(value, 2),
        _ => round_to(value, 1),
    })
}

/// BMI from weight and height, rounded to one decimal.
pub fn bmi_from(weight_kg: f64, height_cm: f64) -> f64 {
    let height_m = height_cm / 100.0;
    round_to(weight_kg / (height_m * height_m), 1)
}

pub fn calculate_weight_percentile(
    weight_kg: f64,
    age_months: u32,
    sex: Sex,
) -> Result<GrowthAssessment, GenerationError> {
    percentile_of(MeasurementKind::Weight, weight_kg, age_months, sex)
}

pub fn calculate_height_percentile(
    height_cm: f64,
    age_months: u32,
    sex: Sex,
) -> Result<GrowthAssessment, GenerationError> {
    percentile_of(MeasurementKind::Height, height_cm, age_months, sex)
}

pub fn calculate_hc_percentile(
    hc_cm: f64,
    age_months: u32,
    sex: Sex,
) -> Result<GrowthAssessment, GenerationError> {
    percentile_of(MeasurementKind::HeadCircumference, hc_cm, age_months, sex)
}

pub fn calculate_bmi_percentile(
    bmi: f64,
    age_months: u32,
    sex: Sex,
) -> Result<GrowthAssessment, GenerationError> {
    percentile_of(MeasurementKind::Bmi, bmi, age_months, sex)
}
