use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One anthropometric measurement point in the patient's growth history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GrowthMeasurement {
    pub id: String,
    pub date: NaiveDate,
    pub age_in_days: i64,
    pub weight_kg: f64,
    pub height_cm: f64,
    /// Only recorded through 36 months.
    pub head_circumference_cm: Option<f64>,
    /// Only derived from 24 months.
    pub bmi: Option<f64>,
}

/// Percentiles attached to a preventive encounter, computed from the latest
/// growth measurement.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GrowthPercentiles {
    pub weight_percentile: Option<f64>,
    pub height_percentile: Option<f64>,
    pub hc_percentile: Option<f64>,
    pub bmi_percentile: Option<f64>,
}
