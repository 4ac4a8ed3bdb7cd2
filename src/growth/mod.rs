//! Growth-chart statistics and per-patient growth trajectories.
//!
//! `lms` is the pure percentile model: LMS-parameterized reference curves
//! mapping (measurement, age, sex) to z-scores and percentiles and back.
//! `trajectory` is the stateful side: percentile channels with bounded
//! random-walk drift, producing temporally coherent measurement series.

mod lms;
mod trajectory;

pub use lms::*;
pub use trajectory::*;
