use std::fmt;

#[cfg(feature = "colorized_output")]
use console::style;

/// Aspect of the inputs covered by a check, in reporting order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CheckKind {
    /// Tolerances are strictly positive and finite
    Tolerances,
    /// Peak table parses with the fixed schema
    PeakSchema,
    /// Grand total intensity can serve as the ppm denominator
    TotalIntensity,
    /// Target table parses with the fixed schema
    TargetSchema,
    /// Targets carry a usable m/z
    TargetMz,
    /// Targets carry a reference retention time
    TargetRetentionTime,
    /// Compound IDs are unique
    CompoundIds,
}

impl CheckKind {
    /// Short label used in reports
    pub fn label(self) -> &'static str {
        match self {
            CheckKind::Tolerances => "tolerances",
            CheckKind::PeakSchema => "peak table",
            CheckKind::TotalIntensity => "total intensity",
            CheckKind::TargetSchema => "target table",
            CheckKind::TargetMz => "target m/z",
            CheckKind::TargetRetentionTime => "target retention time",
            CheckKind::CompoundIds => "compound ids",
        }
    }
}

/// Outcome of one check with its detail message
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Usable as is
    Pass(String),
    /// Usable, but some targets will behave specially
    Warn(String),
    /// Identification would fail
    Fail(String),
}

impl Outcome {
    fn tag(&self) -> &'static str {
        match self {
            Outcome::Pass(_) => "pass",
            Outcome::Warn(_) => "warn",
            Outcome::Fail(_) => "FAIL",
        }
    }

    /// Detail message
    pub fn detail(&self) -> &str {
        match self {
            Outcome::Pass(detail) | Outcome::Warn(detail) | Outcome::Fail(detail) => detail,
        }
    }
}

/// Outcomes of the checks run over one peak table and one target table
#[derive(Debug, Clone)]
pub struct ValidationReport {
    /// Label of the peak table
    pub peak_source: String,
    /// Label of the target table
    pub target_source: String,
    checks: Vec<(CheckKind, Outcome)>,
}

impl ValidationReport {
    /// Empty report for the given inputs
    pub fn new(peak_source: impl Into<String>, target_source: impl Into<String>) -> Self {
        Self {
            peak_source: peak_source.into(),
            target_source: target_source.into(),
            checks: Vec::new(),
        }
    }

    /// Record a check outcome, keeping checks in reporting order
    pub fn record(&mut self, kind: CheckKind, outcome: Outcome) {
        let position = self.checks.partition_point(|(k, _)| *k <= kind);
        self.checks.insert(position, (kind, outcome));
    }

    /// Recorded checks in reporting order
    pub fn checks(&self) -> &[(CheckKind, Outcome)] {
        &self.checks
    }

    /// Outcome of a check, `None` when it did not run
    pub fn outcome(&self, kind: CheckKind) -> Option<&Outcome> {
        self.checks.iter().find(|(k, _)| *k == kind).map(|(_, o)| o)
    }

    /// Checks that failed
    pub fn failures(&self) -> Vec<CheckKind> {
        self.kinds_where(|o| matches!(o, Outcome::Fail(_)))
    }

    /// Checks that passed with a warning
    pub fn warnings(&self) -> Vec<CheckKind> {
        self.kinds_where(|o| matches!(o, Outcome::Warn(_)))
    }

    /// Whether identification would be rejected
    pub fn has_failures(&self) -> bool {
        self.checks.iter().any(|(_, o)| matches!(o, Outcome::Fail(_)))
    }

    fn kinds_where(&self, keep: impl Fn(&Outcome) -> bool) -> Vec<CheckKind> {
        self.checks.iter().filter(|(_, o)| keep(o)).map(|(k, _)| *k).collect()
    }

    fn render(&self, paint: impl Fn(&Outcome) -> String) -> String {
        let width = self.checks.iter().map(|(k, _)| k.label().len()).max().unwrap_or(0);

        let mut out = format!("peaks:   {}\ntargets: {}\n\n", self.peak_source, self.target_source);
        for (kind, outcome) in &self.checks {
            out.push_str(&format!(
                "{}  {:<width$}  {}\n",
                paint(outcome),
                kind.label(),
                outcome.detail()
            ));
        }

        out.push('\n');
        let verdict = match (self.failures().len(), self.warnings().len()) {
            (0, 0) => "inputs ready for identification".to_string(),
            (0, warned) => format!("inputs ready for identification ({} warnings)", warned),
            (failed, _) => format!("inputs rejected: {} checks failed", failed),
        };
        out.push_str(&verdict);
        out.push('\n');
        out
    }

    /// Report text with colored status tags
    pub fn format_colored(&self) -> String {
        #[cfg(feature = "colorized_output")]
        {
            self.render(|outcome| {
                let tag = format!("[{}]", outcome.tag());
                match outcome {
                    Outcome::Pass(_) => style(tag).green().to_string(),
                    Outcome::Warn(_) => style(tag).yellow().to_string(),
                    Outcome::Fail(_) => style(tag).red().bold().to_string(),
                }
            })
        }

        #[cfg(not(feature = "colorized_output"))]
        {
            self.to_string()
        }
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(|outcome| format!("[{}]", outcome.tag())))
    }
}
