//! Chartsmith generates longitudinal synthetic patient records.
//!
//! The generative core is three coupled pieces: a timeline engine that
//! decides when clinical encounters happen, a growth engine that decides
//! what the body measurements are at each point, and a messiness layer that
//! decides how faithfully the resulting record is documented. Everything is
//! deterministic given a random seed.
//!
//! ```no_run
//! use chartsmith::engine::{engine_for_seed, GenerationEngine};
//! use chartsmith::models::GenerationSeed;
//!
//! let seed = GenerationSeed {
//!     age_years: Some(2),
//!     random_seed: Some(42),
//!     ..Default::default()
//! };
//! let patient = engine_for_seed(&seed).generate(&seed).unwrap();
//! assert!(!patient.encounters.is_empty());
//! ```
//!
//! Interfaces (CLI, HTTP, exporters) and the narrative LLM are external
//! collaborators: exporters consume the serde-serializable [`models::Patient`],
//! and enrichment plugs in behind [`narrative::NarrativeClient`] with a
//! built-in template fallback.

pub mod config;
pub mod engine;
pub mod error;
pub mod growth;
pub mod knowledge;
pub mod messiness;
pub mod models;
pub mod narrative;

pub use engine::{engine_for_seed, GenerationEngine};
pub use error::GenerationError;
pub use models::{GenerationSeed, Patient};
