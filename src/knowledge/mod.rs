//! Static clinical knowledge tables: condition definitions, diagnosis codes,
//! comorbidity probabilities, seasonal illness pools, the vaccine schedule,
//! vital-sign normal ranges, life-event rates, and name pools.
//!
//! Everything here is versioned configuration data: loaded once at compile
//! time, read-only thereafter. Generators consume these tables and never
//! mutate them.

mod codes;
mod conditions;
mod guidance;
mod life_events;
mod names;
mod seasonal;
mod vaccines;
mod vitals;

pub use codes::*;
pub use conditions::*;
pub use guidance::*;
pub use life_events::*;
pub use names::*;
pub use seasonal::*;
pub use vaccines::*;
pub use vitals::*;

pub const ICD10_SYSTEM: &str = "http://hl7.org/fhir/sid/icd-10-cm";
pub const CVX_SYSTEM: &str = "http://hl7.org/fhir/sid/cvx";
pub const RXNORM_SYSTEM: &str = "http://www.nlm.nih.gov/research/umls/rxnorm";
