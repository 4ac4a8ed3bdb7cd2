//! Patient generation engines.
//!
//! The engines orchestrate the generators (life arc, timeline, growth,
//! encounter materializer, messiness) into complete synthetic patients.
//! `GenerationEngine` is the capability seam; `engine_for_seed` routes a
//! seed to the pediatric or adult implementation.

mod adult;
mod common;
mod context;
mod encounter;
mod life_arc;
mod peds;
mod timeline;

pub use adult::AdultEngine;
pub use context::GenContext;
pub use encounter::{generate_vitals, materialize_encounter};
pub use life_arc::{generate_life_arc, ConditionOnset, LifeArc};
pub use peds::PedsEngine;
pub use timeline::{
    generate_timeline, seasonal_illness, DiscoveredAllergy, EncounterStub, Timeline,
    WELL_CHILD_SCHEDULE,
};

use chrono::NaiveDate;

use crate::config::PEDIATRIC_CUTOFF_MONTHS;
use crate::error::GenerationError;
use crate::models::{Demographics, GenerationSeed, Patient};

/// Capability interface for patient generation engines. Concrete engines
/// are independent implementations, not variants of a shared base.
pub trait GenerationEngine {
    /// Generate a complete patient record. Either fully completes or fails
    /// before any encounter is materialized.
    fn generate(&self, seed: &GenerationSeed) -> Result<Patient, GenerationError>;

    /// Generate the high-level life trajectory.
    fn generate_life_arc(
        &self,
        demographics: &Demographics,
        seed: &GenerationSeed,
        today: NaiveDate,
        ctx: &mut GenContext,
    ) -> LifeArc;

    /// Generate the date-ordered encounter schedule.
    fn generate_timeline(
        &self,
        demographics: &Demographics,
        life_arc: &LifeArc,
        seed: &GenerationSeed,
        today: NaiveDate,
        ctx: &mut GenContext,
    ) -> Timeline;
}

/// Route a seed to the engine for its age range: under 22 years is
/// pediatric, everything else adult. Unspecified ages default to pediatric.
pub fn engine_for_seed(seed: &GenerationSeed) -> Box<dyn GenerationEngine> {
    match seed.requested_age_months() {
        Some(age) if age >= PEDIATRIC_CUTOFF_MONTHS => Box::new(AdultEngine::new()),
        _ => Box::new(PedsEngine::new()),
    }
}
