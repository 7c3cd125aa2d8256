//! Substitution engine for setver propagation rules.
//!
//! Responsibilities:
//! - Apply rules to target files (in place, or in memory for dry runs).
//! - Report per-rule whether the target changed.
//! - Generate a unified diff preview of the whole run.

mod error;

pub use error::{EditError, EditResult};

use camino::{Utf8Path, Utf8PathBuf};
use diffy::PatchFormatter;
use fs_err as fs;
use regex::{NoExpand, Regex};
use setver_types::{Replacement, Rule, RuleOutcome, RuleStatus};
use std::collections::BTreeMap;
use tracing::debug;

#[derive(Debug, Clone, Default)]
pub struct ApplyOptions {
    /// Compute outcomes and the diff preview without writing anything.
    pub dry_run: bool,
}

/// Result of applying a rule sequence.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    /// One entry per rule, in catalog order.
    pub outcomes: Vec<RuleOutcome>,
    /// Unified diff over all files the run changed; empty when nothing did.
    pub patch: String,
}

impl RunOutcome {
    pub fn updated_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_updated()).count()
    }
}

/// Replace every non-overlapping match of the rule's pattern in `contents`.
///
/// Pure; does not touch the filesystem. A single left-to-right pass, so a
/// replacement never creates text that an earlier position re-matches.
pub fn substitute(contents: &str, rule: &Rule) -> EditResult<String> {
    let re = Regex::new(&rule.pattern).map_err(|e| EditError::Pattern {
        path: rule.target.clone(),
        message: e.to_string(),
    })?;

    let new = match &rule.replacement {
        Replacement::Verbatim(s) => re.replace_all(contents, NoExpand(s)),
        Replacement::Template(s) => re.replace_all(contents, s.as_str()),
    };
    Ok(new.into_owned())
}

/// Apply a single rule to its target on disk.
///
/// The file is read in full, rewritten in memory, and written back only when
/// the result differs from the original. No handle outlives the call.
pub fn apply_rule(root: &Utf8Path, rule: &Rule) -> EditResult<RuleOutcome> {
    let abs = abs_path(root, &rule.target);
    let old = read_target(&abs, &rule.target)?;
    let new = substitute(&old, rule)?;

    let status = if new != old {
        fs::write(&abs, &new).map_err(|e| EditError::Io {
            action: "write",
            path: rule.target.clone(),
            source: e,
        })?;
        RuleStatus::Updated
    } else {
        RuleStatus::Unchanged
    };

    Ok(RuleOutcome {
        target: rule.target.clone(),
        status,
    })
}

/// Apply a rule sequence in order, stopping at the first error.
///
/// Files rewritten by earlier rules keep their new contents when a later rule
/// fails; there is no rollback across the batch.
pub fn apply_rules(root: &Utf8Path, rules: &[Rule], opts: &ApplyOptions) -> EditResult<RunOutcome> {
    let mut before: BTreeMap<Utf8PathBuf, String> = BTreeMap::new();
    let mut current: BTreeMap<Utf8PathBuf, String> = BTreeMap::new();
    let mut outcomes = Vec::with_capacity(rules.len());

    for rule in rules {
        let abs = abs_path(root, &rule.target);

        // Dry runs read through an overlay so later rules on the same file
        // see the edits of earlier ones; real runs re-read from disk, one
        // scoped read-modify-write per rule.
        let old = match current.get(&rule.target) {
            Some(s) if opts.dry_run => s.clone(),
            _ => read_target(&abs, &rule.target)?,
        };
        before
            .entry(rule.target.clone())
            .or_insert_with(|| old.clone());

        let new = substitute(&old, rule)?;
        let status = if new != old {
            debug!(path = %rule.target, pattern = %rule.pattern, "pattern matched, rewriting");
            if !opts.dry_run {
                fs::write(&abs, &new).map_err(|e| EditError::Io {
                    action: "write",
                    path: rule.target.clone(),
                    source: e,
                })?;
            }
            current.insert(rule.target.clone(), new);
            RuleStatus::Updated
        } else {
            current.insert(rule.target.clone(), old);
            RuleStatus::Unchanged
        };

        outcomes.push(RuleOutcome {
            target: rule.target.clone(),
            status,
        });
    }

    let patch = render_patch(&before, &current);
    Ok(RunOutcome { outcomes, patch })
}

fn abs_path(root: &Utf8Path, rel: &Utf8Path) -> Utf8PathBuf {
    if rel.is_absolute() {
        rel.to_path_buf()
    } else {
        root.join(rel)
    }
}

fn read_target(abs: &Utf8Path, rel: &Utf8Path) -> EditResult<String> {
    fs::read_to_string(abs).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            EditError::TargetMissing {
                path: rel.to_path_buf(),
            }
        } else {
            EditError::Io {
                action: "read",
                path: rel.to_path_buf(),
                source: e,
            }
        }
    })
}

fn render_patch(
    before: &BTreeMap<Utf8PathBuf, String>,
    after: &BTreeMap<Utf8PathBuf, String>,
) -> String {
    let mut out = String::new();
    let formatter = PatchFormatter::new();

    for (path, old) in before {
        let new = after.get(path).unwrap_or(old);
        if old == new {
            continue;
        }

        out.push_str(&format!("diff --git a/{0} b/{0}\n", path));
        out.push_str(&format!("--- a/{0}\n+++ b/{0}\n", path));

        let patch = diffy::create_patch(old, new);
        out.push_str(&formatter.fmt_patch(&patch).to_string());
        if !out.ends_with('\n') {
            out.push('\n');
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::substitute;
    use pretty_assertions::assert_eq;
    use setver_types::Rule;

    #[test]
    fn verbatim_replaces_every_match() {
        let rule = Rule::verbatim(
            "Dockerfile",
            r#"LABEL version="\d+\.\d+\.\d+""#,
            r#"LABEL version="9.9.9""#,
        );
        let out = substitute(
            "LABEL version=\"1.0.0\"\nLABEL version=\"1.0.1\"\n",
            &rule,
        )
        .expect("substitute");
        assert_eq!(out, "LABEL version=\"9.9.9\"\nLABEL version=\"9.9.9\"\n");
    }

    #[test]
    fn verbatim_does_not_expand_dollar_sequences() {
        // PowerShell variables look like capture group references.
        let rule = Rule::verbatim(
            "oapigen.ps1",
            r#"\$OPENAPI_GENERATOR_VERSION="\d+\.\d+\.\d+""#,
            r#"$OPENAPI_GENERATOR_VERSION="7.12.0""#,
        );
        let out = substitute("$OPENAPI_GENERATOR_VERSION=\"7.11.0\"\n", &rule).expect("substitute");
        assert_eq!(out, "$OPENAPI_GENERATOR_VERSION=\"7.12.0\"\n");
    }

    #[test]
    fn template_expands_capture_groups() {
        let rule = Rule::template(
            ".github/workflows/main.yml",
            r"tags:\s*(\S+):\d+\.\d+\.\d+",
            "tags: ${1}:2.0.1",
        );
        let out = substitute("          tags: registry.example.org/api:1.9.0\n", &rule)
            .expect("substitute");
        assert_eq!(out, "          tags: registry.example.org/api:2.0.1\n");
    }

    #[test]
    fn unmatched_pattern_returns_input_unchanged() {
        let rule = Rule::verbatim("Dockerfile", r#"LABEL version="\d+\.\d+\.\d+""#, "x");
        let input = "FROM scratch\n";
        assert_eq!(substitute(input, &rule).expect("substitute"), input);
    }

    #[test]
    fn invalid_pattern_is_reported() {
        let rule = Rule::verbatim("Dockerfile", "(unclosed", "x");
        let err = substitute("", &rule).expect_err("bad regex");
        assert!(err.to_string().contains("invalid pattern"));
    }
}
