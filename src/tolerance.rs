//! Tolerance windows used to decide whether a peak matches a target.
//!
//! Both windows are absolute and symmetric: the m/z window is in Daltons and the
//! retention time window in minutes. Targets may carry their own retention time
//! tolerance, in which case [`ToleranceConfig::default_retime_tolerance`] is only
//! used for targets that leave it null.

use serde::{Deserialize, Serialize};

use crate::error::IdentificationError;

/// Default m/z tolerance in Da
pub const DEFAULT_MASS_TOLERANCE: f64 = 0.002;

/// Default retention time tolerance in minutes
pub const DEFAULT_RETIME_TOLERANCE: f64 = 0.5;

/// Tolerance windows for peak-to-target matching
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToleranceConfig {
    /// Absolute m/z window (Da), applied symmetrically
    pub mass_tolerance: f64,

    /// Retention time window (minutes) for targets without their own tolerance
    pub default_retime_tolerance: f64,
}

impl Default for ToleranceConfig {
    fn default() -> Self {
        Self {
            mass_tolerance: DEFAULT_MASS_TOLERANCE,
            default_retime_tolerance: DEFAULT_RETIME_TOLERANCE,
        }
    }
}

impl ToleranceConfig {
    /// Create a validated tolerance configuration
    pub fn new(mass_tolerance: f64, default_retime_tolerance: f64) -> Result<Self, IdentificationError> {
        let config = Self {
            mass_tolerance,
            default_retime_tolerance,
        };
        config.validate()?;
        Ok(config)
    }

    /// Override the m/z tolerance
    pub fn with_mass_tolerance(mut self, mass_tolerance: f64) -> Self {
        self.mass_tolerance = mass_tolerance;
        self
    }

    /// Override the default retention time tolerance
    pub fn with_default_retime_tolerance(mut self, default_retime_tolerance: f64) -> Self {
        self.default_retime_tolerance = default_retime_tolerance;
        self
    }

    /// Check that both tolerances are strictly positive and finite
    pub fn validate(&self) -> Result<(), IdentificationError> {
        check_positive("mass_tolerance", self.mass_tolerance)?;
        check_positive("default_retime_tolerance", self.default_retime_tolerance)
    }

    /// Retention time tolerance for a target, falling back to the default
    #[inline]
    pub fn retime_tolerance_for(&self, target_tolerance: Option<f64>) -> f64 {
        target_tolerance.unwrap_or(self.default_retime_tolerance)
    }
}

fn check_positive(name: &str, value: f64) -> Result<(), IdentificationError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(IdentificationError::InvalidConfig(format!(
            "{name} must be strictly positive and finite, got {value}"
        )))
    }
}
