//! Chart messiness injection: realistic EHR documentation artifacts at five
//! additive severity levels, from pristine teaching charts to deliberately
//! hazardous ones.
//!
//! The injector runs last in the generation pipeline and never feeds back
//! into scheduling or growth state. It produces derived copies of
//! encounters rather than mutating them in place.

mod injector;
mod tables;

pub use injector::{MessinessContext, MessinessInjector};
pub use tables::*;
