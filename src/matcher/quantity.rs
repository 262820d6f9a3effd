use crate::table::{ExperimentalPeak, TargetCompound};
use crate::tolerance::ToleranceConfig;

/// A per-quantity tolerance predicate between a peak and a target.
///
/// The distance is always `|peak - target|` and the comparison is strict: a
/// distance equal to the tolerance does not connect. A target without a
/// reference value is unconstrained and connects to every peak.
pub trait MatchQuantity: Sync {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Value measured on the peak
    fn peak_value(&self, peak: &ExperimentalPeak) -> f64;

    /// Reference value of the target, `None` when unconstrained
    fn target_value(&self, target: &TargetCompound) -> Option<f64>;

    /// Tolerance window applied to this target
    fn tolerance(&self, target: &TargetCompound) -> f64;

    /// Absolute distance, `None` when the target is unconstrained
    #[inline]
    fn distance(&self, peak: &ExperimentalPeak, target: &TargetCompound) -> Option<f64> {
        self.target_value(target)
            .map(|reference| (self.peak_value(peak) - reference).abs())
    }

    /// Whether the pair is connected for this quantity
    #[inline]
    fn connects(&self, peak: &ExperimentalPeak, target: &TargetCompound) -> bool {
        match self.distance(peak, target) {
            // NaN distances compare false and never connect
            Some(distance) => distance < self.tolerance(target),
            None => true,
        }
    }
}

/// m/z with one absolute window for every target
#[derive(Debug, Clone, Copy)]
pub struct MzQuantity {
    /// Window in Da
    pub tolerance: f64,
}

impl MzQuantity {
    /// m/z quantity from the configured mass tolerance
    pub fn from_config(config: &ToleranceConfig) -> Self {
        Self {
            tolerance: config.mass_tolerance,
        }
    }
}

impl MatchQuantity for MzQuantity {
    fn name(&self) -> &'static str {
        "m/z"
    }

    #[inline]
    fn peak_value(&self, peak: &ExperimentalPeak) -> f64 {
        peak.mz
    }

    #[inline]
    fn target_value(&self, target: &TargetCompound) -> Option<f64> {
        Some(target.mz)
    }

    #[inline]
    fn tolerance(&self, _target: &TargetCompound) -> f64 {
        self.tolerance
    }
}

/// Retention time with per-target windows
#[derive(Debug, Clone, Copy)]
pub struct RetentionTimeQuantity {
    /// Window in minutes for targets that do not carry their own
    pub default_tolerance: f64,
}

impl RetentionTimeQuantity {
    /// Retention time quantity from the configured default tolerance
    pub fn from_config(config: &ToleranceConfig) -> Self {
        Self {
            default_tolerance: config.default_retime_tolerance,
        }
    }
}

impl MatchQuantity for RetentionTimeQuantity {
    fn name(&self) -> &'static str {
        "retention time"
    }

    #[inline]
    fn peak_value(&self, peak: &ExperimentalPeak) -> f64 {
        peak.retention_time
    }

    #[inline]
    fn target_value(&self, target: &TargetCompound) -> Option<f64> {
        target.retention_time
    }

    #[inline]
    fn tolerance(&self, target: &TargetCompound) -> f64 {
        target.retention_time_tolerance.unwrap_or(self.default_tolerance)
    }
}
