//! The fixed propagation rule catalog.
//!
//! Patterns are coupled to the exact spacing and quoting conventions of the
//! target files; a value that drifts from those conventions stops matching
//! and surfaces as "No changes needed".

use setver_types::{Rule, Variables};

pub const CONTAINER_DEPLOY: &str = "Dockerfile.deploy";
pub const CONTAINER: &str = "Dockerfile";
pub const MANIFEST: &str = "Cargo.toml";
pub const CI_WORKFLOW: &str = ".github/workflows/main.yml";
pub const GENERATOR_SH: &str = "oapigen.sh";
pub const GENERATOR_PS1: &str = "oapigen.ps1";

/// Dotted-numeric version matcher.
const DOTTED: &str = r"\d+\.\d+\.\d+";

/// Build the rule catalog for one run.
///
/// Declaration order is execution and reporting order.
pub fn builtin_rules(vars: &Variables) -> Vec<Rule> {
    let version = &vars.version.version;
    let oapigen = &vars.openapi.oapigen_version;
    let spec = &vars.openapi.oapi_spec;

    vec![
        // version.version
        Rule::verbatim(
            CONTAINER_DEPLOY,
            format!(r#"LABEL version="{DOTTED}""#),
            format!(r#"LABEL version="{version}""#),
        ),
        Rule::verbatim(
            CONTAINER,
            format!(r#"LABEL version="{DOTTED}""#),
            format!(r#"LABEL version="{version}""#),
        ),
        Rule::verbatim(
            MANIFEST,
            format!(r#"version\s*=\s*"{DOTTED}""#),
            format!(r#"version = "{version}""#),
        ),
        // The image name is whatever the workflow pushes; only the tag moves.
        Rule::template(
            CI_WORKFLOW,
            format!(r"tags:\s*(\S+):{DOTTED}"),
            format!("tags: ${{1}}:{version}"),
        ),
        // openapi.oapigen-version
        Rule::verbatim(
            CONTAINER_DEPLOY,
            format!(r#"ENV OPENAPI_GENERATOR_VERSION="{DOTTED}""#),
            format!(r#"ENV OPENAPI_GENERATOR_VERSION="{oapigen}""#),
        ),
        Rule::verbatim(
            GENERATOR_SH,
            format!(r#"OPENAPI_GENERATOR_VERSION="{DOTTED}""#),
            format!(r#"OPENAPI_GENERATOR_VERSION="{oapigen}""#),
        ),
        Rule::verbatim(
            GENERATOR_PS1,
            format!(r#"\$OPENAPI_GENERATOR_VERSION="{DOTTED}""#),
            format!(r#"$OPENAPI_GENERATOR_VERSION="{oapigen}""#),
        ),
        // openapi.oapi-spec
        Rule::verbatim(
            CONTAINER_DEPLOY,
            r#"ENV SPEC_PATH="https://.*""#,
            format!(r#"ENV SPEC_PATH="{spec}""#),
        ),
        Rule::verbatim(
            GENERATOR_SH,
            r#"SPEC_PATH="https://.*""#,
            format!(r#"SPEC_PATH="{spec}""#),
        ),
        Rule::verbatim(
            GENERATOR_PS1,
            r#"\$SPEC_PATH="https://.*""#,
            format!(r#"$SPEC_PATH="{spec}""#),
        ),
    ]
}
