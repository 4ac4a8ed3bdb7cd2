use tracing_subscriber::EnvFilter;

/// Engine-level constants
pub const ENGINE_NAME: &str = "Chartsmith";
pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Patients under this age (in months) route to the pediatric engine.
pub const PEDIATRIC_CUTOFF_MONTHS: u32 = 264;

/// Growth percentile channels never drift outside these bounds.
pub const CHANNEL_FLOOR: f64 = 3.0;
pub const CHANNEL_CEILING: f64 = 97.0;

/// Starting percentiles drawn from the population are clamped to this band.
pub const STARTING_PERCENTILE_FLOOR: f64 = 5.0;
pub const STARTING_PERCENTILE_CEILING: f64 = 95.0;

/// Default drift variance coefficient for growth trajectories.
pub const DEFAULT_GROWTH_VARIANCE: f64 = 0.3;

/// Head circumference curves cover 0-36 months.
pub const HC_MAX_MONTHS: u32 = 36;

/// BMI-for-age curves start at 24 months.
pub const BMI_MIN_MONTHS: u32 = 24;

/// Default log filter when RUST_LOG is unset.
pub fn default_log_filter() -> &'static str {
    "chartsmith=info"
}

/// Initialize tracing for binaries and harnesses embedding the crate.
/// Library callers that install their own subscriber skip this.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(default_log_filter())),
        )
        .try_init();
}
