use serde::{Deserialize, Serialize};

use crate::config::{
    BMI_MIN_MONTHS, CHANNEL_CEILING, CHANNEL_FLOOR, DEFAULT_GROWTH_VARIANCE, HC_MAX_MONTHS,
    STARTING_PERCENTILE_CEILING, STARTING_PERCENTILE_FLOOR,
};
use crate::engine::GenContext;
use crate::error::GenerationError;
use crate::models::Sex;

use super::lms::{bmi_from, value_at_percentile, MeasurementKind};

/// One generated measurement set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeasurementSample {
    pub weight_kg: f64,
    pub height_cm: f64,
    pub head_circumference_cm: Option<f64>,
    pub bmi: Option<f64>,
}

/// Per-patient growth state: one percentile channel per measurement kind.
///
/// A patient generally tracks along the same percentile lines; each
/// measurement drifts the channels with bounded Gaussian noise, blending
/// 85% new position with 15% previous for channel tracking, then samples
/// the reference curve at the drifted percentile. The only component with
/// encounter-to-encounter state; thread it in chronological order.
pub struct GrowthTrajectory {
    sex: Sex,
    weight_channel: f64,
    height_channel: f64,
    hc_channel: f64,
    variance: f64,
    history: Vec<(u32, MeasurementSample)>,
}

impl GrowthTrajectory {
    pub fn new(
        sex: Sex,
        weight_percentile: f64,
        height_percentile: f64,
        hc_percentile: f64,
        variance: f64,
    ) -> Self {
        Self {
            sex,
            weight_channel: weight_percentile,
            height_channel: height_percentile,
            hc_channel: hc_percentile,
            variance: variance.clamp(0.0, 1.0),
            history: Vec::new(),
        }
    }

    /// Starting channels drawn from the population: N(50, 20) for weight and
    /// height, N(50, 15) for head circumference, clamped to [5, 95].
    pub fn from_population(sex: Sex, ctx: &mut GenContext) -> Self {
        let clamp = |p: f64| p.clamp(STARTING_PERCENTILE_FLOOR, STARTING_PERCENTILE_CEILING);
        Self::new(
            sex,
            clamp(ctx.gauss(50.0, 20.0)),
            clamp(ctx.gauss(50.0, 20.0)),
            clamp(ctx.gauss(50.0, 15.0)),
            DEFAULT_GROWTH_VARIANCE,
        )
    }

    fn drift(&self, current: f64, ctx: &mut GenContext) -> f64 {
        let drifted = current + ctx.gauss(0.0, self.variance * 15.0);
        (drifted * 0.85 + current * 0.15).clamp(CHANNEL_FLOOR, CHANNEL_CEILING)
    }

    /// Generate a measurement set at the given age and record it in the
    /// trajectory history. Head circumference stops at 36 months; BMI is
    /// derived from the generated weight and height from 24 months.
    pub fn generate_measurement(
        &mut self,
        age_months: u32,
        ctx: &mut GenContext,
    ) -> Result<MeasurementSample, GenerationError> {
        self.weight_channel = self.drift(self.weight_channel, ctx);
        self.height_channel = self.drift(self.height_channel, ctx);

        let weight_kg =
            value_at_percentile(MeasurementKind::Weight, self.weight_channel, age_months, self.sex)?;
        let height_cm =
            value_at_percentile(MeasurementKind::Height, self.height_channel, age_months, self.sex)?;

        let head_circumference_cm = if age_months <= HC_MAX_MONTHS {
            self.hc_channel = self.drift(self.hc_channel, ctx);
            Some(value_at_percentile(
                MeasurementKind::HeadCircumference,
                self.hc_channel,
                age_months,
                self.sex,
            )?)
        } else {
            None
        };

        let bmi = if age_months >= BMI_MIN_MONTHS {
            Some(bmi_from(weight_kg, height_cm))
        } else {
            None
        };

        let sample = MeasurementSample {
            weight_kg,
            height_cm,
            head_circumference_cm,
            bmi,
        };
        self.history.push((age_months, sample.clone()));
        Ok(sample)
    }

    /// Current channel percentiles (weight, height, head circumference).
    pub fn channels(&self) -> (f64, f64, f64) {
        (self.weight_channel, self.height_channel, self.hc_channel)
    }

    /// Append-only measurement history, oldest first.
    pub fn history(&self) -> &[(u32, MeasurementSample)] {
        &self.history
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> GenContext {
        GenContext::from_seed(Some(42))
    }

    #[test]
    fn measurements_grow_with_age() {
        let mut ctx = ctx();
        let mut traj = GrowthTrajectory::new(Sex::Male, 50.0, 50.0, 50.0, 0.3);
        let m1 = traj.generate_measurement(2, &mut ctx).unwrap();
        let m2 = traj.generate_measurement(6, &mut ctx).unwrap();
        let m3 = traj.generate_measurement(12, &mut ctx).unwrap();
        assert!(m1.weight_kg < m2.weight_kg && m2.weight_kg < m3.weight_kg);
        assert!(m1.height_cm < m2.height_cm && m2.height_cm < m3.height_cm);
    }

    #[test]
    fn channels_stay_bounded_under_heavy_drift() {
        for variance in [0.0, 0.3, 0.7, 1.0] {
            let mut ctx = GenContext::from_seed(Some(7));
            let mut traj = GrowthTrajectory::new(Sex::Female, 95.0, 5.0, 50.0, variance);
            for _ in 0..200 {
                let _ = traj.generate_measurement(24, &mut ctx).unwrap();
                let (w, h, hc) = traj.channels();
                for channel in [w, h, hc] {
                    assert!(
                        (CHANNEL_FLOOR..=CHANNEL_CEILING).contains(&channel),
                        "variance {variance}: channel {channel} out of bounds"
                    );
                }
            }
        }
    }

    #[test]
    fn hc_suppressed_after_36_months() {
        let mut ctx = ctx();
        let mut traj = GrowthTrajectory::new(Sex::Male, 50.0, 50.0, 50.0, 0.3);
        let at_36 = traj.generate_measurement(36, &mut ctx).unwrap();
        assert!(at_36.head_circumference_cm.is_some());
        let at_40 = traj.generate_measurement(40, &mut ctx).unwrap();
        assert!(at_40.head_circumference_cm.is_none());
    }

    #[test]
    fn bmi_starts_at_24_months() {
        let mut ctx = ctx();
        let mut traj = GrowthTrajectory::new(Sex::Female, 50.0, 50.0, 50.0, 0.3);
        let at_18 = traj.generate_measurement(18, &mut ctx).unwrap();
        assert!(at_18.bmi.is_none());
        let at_24 = traj.generate_measurement(24, &mut ctx).unwrap();
        let bmi = at_24.bmi.unwrap();
        assert_eq!(bmi, bmi_from(at_24.weight_kg, at_24.height_cm));
    }

    #[test]
    fn history_is_append_only_and_ordered() {
        let mut ctx = ctx();
        let mut traj = GrowthTrajectory::new(Sex::Male, 50.0, 50.0, 50.0, 0.3);
        for age in [0, 2, 4, 6, 9, 12] {
            traj.generate_measurement(age, &mut ctx).unwrap();
        }
        assert_eq!(traj.history().len(), 6);
        let ages: Vec<u32> = traj.history().iter().map(|(a, _)| *a).collect();
        assert_eq!(ages, vec![0, 2, 4, 6, 9, 12]);
    }

    #[test]
    fn population_start_is_clamped() {
        for seed in 0..20 {
            let mut ctx = GenContext::from_seed(Some(seed));
            let traj = GrowthTrajectory::from_population(Sex::Male, &mut ctx);
            let (w, h, hc) = traj.channels();
            for channel in [w, h, hc] {
                assert!((5.0..=95.0).contains(&channel));
            }
        }
    }

    #[test]
    fn fixed_seed_reproduces_measurements() {
        let run = |seed: u64| {
            let mut ctx = GenContext::from_seed(Some(seed));
            let mut traj = GrowthTrajectory::from_population(Sex::Female, &mut ctx);
            (0..6)
                .map(|i| traj.generate_measurement(i * 6, &mut ctx).unwrap().weight_kg)
                .collect::<Vec<_>>()
        };
        assert_eq!(run(99), run(99));
    }
}
