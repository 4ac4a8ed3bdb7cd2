use thiserror::Error;

/// Errors surfaced by the generation core.
///
/// Only `UnsupportedAgeRange` and `InvalidGenerationSeed` abort work.
/// `UnresolvedConditionCode` and `EnrichmentUnavailable` describe recoverable
/// situations: callers inside the crate fall back (generic code, template
/// note) and log instead of failing the patient.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// A percentile or measurement request outside the measurement kind's
    /// valid age window. Never silently clamped for head circumference or BMI.
    #[error("{measure} reference curves are not defined at {age_months} months")]
    UnsupportedAgeRange {
        measure: &'static str,
        age_months: u32,
    },

    /// A condition name with no entry in the diagnosis code table.
    #[error("no diagnosis code on file for condition '{0}'")]
    UnresolvedConditionCode(String),

    /// The narrative enrichment collaborator is absent or failed.
    #[error("narrative enrichment unavailable: {0}")]
    EnrichmentUnavailable(String),

    /// Caller-provided seed parameters contradict each other. Surfaced
    /// before any generation work begins.
    #[error("invalid generation seed: {0}")]
    InvalidGenerationSeed(String),
}
