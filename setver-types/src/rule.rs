use camino::Utf8PathBuf;

/// How a matched region is rewritten.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Replacement {
    /// The string is substituted literally. `$` has no special meaning, so
    /// values such as `$OPENAPI_GENERATOR_VERSION="7.12.0"` survive intact.
    Verbatim(String),

    /// The string may reference capture groups (`$1`, `${name}`) from the
    /// rule's pattern.
    Template(String),
}

/// One propagation rule: rewrite every match of `pattern` in `target`.
///
/// `pattern` is a regex source string; compilation happens in the edit
/// engine so a rule stays cheap to construct and to list.
#[derive(Debug, Clone)]
pub struct Rule {
    /// Path of the file to rewrite, relative to the run root.
    pub target: Utf8PathBuf,
    pub pattern: String,
    pub replacement: Replacement,
}

impl Rule {
    pub fn verbatim(
        target: impl Into<Utf8PathBuf>,
        pattern: impl Into<String>,
        replacement: impl Into<String>,
    ) -> Self {
        Self {
            target: target.into(),
            pattern: pattern.into(),
            replacement: Replacement::Verbatim(replacement.into()),
        }
    }

    pub fn template(
        target: impl Into<Utf8PathBuf>,
        pattern: impl Into<String>,
        replacement: impl Into<String>,
    ) -> Self {
        Self {
            target: target.into(),
            pattern: pattern.into(),
            replacement: Replacement::Template(replacement.into()),
        }
    }
}

/// Whether applying a rule changed its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleStatus {
    Updated,
    Unchanged,
}

/// Result of applying one rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleOutcome {
    pub target: Utf8PathBuf,
    pub status: RuleStatus,
}

impl RuleOutcome {
    pub fn is_updated(&self) -> bool {
        self.status == RuleStatus::Updated
    }

    /// The operator-facing status line for this outcome.
    pub fn report_line(&self) -> String {
        match self.status {
            RuleStatus::Updated => format!("Updated {}", self.target),
            RuleStatus::Unchanged => format!("No changes needed in {}", self.target),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Replacement, Rule, RuleOutcome, RuleStatus};
    use camino::Utf8PathBuf;

    #[test]
    fn constructors_pick_the_replacement_mode() {
        let v = Rule::verbatim("Dockerfile", "a", "b");
        assert_eq!(v.replacement, Replacement::Verbatim("b".to_string()));

        let t = Rule::template("Dockerfile", "(a)", "$1");
        assert_eq!(t.replacement, Replacement::Template("$1".to_string()));
    }

    #[test]
    fn report_lines_match_the_interface() {
        let updated = RuleOutcome {
            target: Utf8PathBuf::from("Dockerfile.deploy"),
            status: RuleStatus::Updated,
        };
        assert_eq!(updated.report_line(), "Updated Dockerfile.deploy");
        assert!(updated.is_updated());

        let unchanged = RuleOutcome {
            target: Utf8PathBuf::from("oapigen.sh"),
            status: RuleStatus::Unchanged,
        };
        assert_eq!(unchanged.report_line(), "No changes needed in oapigen.sh");
        assert!(!unchanged.is_updated());
    }
}
