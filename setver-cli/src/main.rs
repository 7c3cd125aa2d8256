mod catalog;

use anyhow::Context;
use camino::Utf8PathBuf;
use clap::Parser;
use setver_edit::{ApplyOptions, apply_rules};
use setver_vars::{VARIABLES_FILE_NAME, load_variables};
use std::process::ExitCode;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "setver",
    version,
    about = "Propagates versions from variables.toml into build descriptors and generator scripts."
)]
struct Cli {
    /// Directory the rule targets and the configuration file resolve against.
    #[arg(long, default_value = ".")]
    root: Utf8PathBuf,

    /// Configuration file, relative to --root unless absolute.
    #[arg(long, default_value = VARIABLES_FILE_NAME)]
    config: Utf8PathBuf,

    /// Report and preview changes without writing anything.
    #[arg(long, default_value_t = false)]
    dry_run: bool,
}

fn main() -> ExitCode {
    if let Err(e) = real_main() {
        error!("{:?}", e);
        return ExitCode::from(1);
    }
    ExitCode::from(0)
}

fn real_main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let config_path = if cli.config.is_absolute() {
        cli.config.clone()
    } else {
        cli.root.join(&cli.config)
    };

    let vars = load_variables(&config_path).context("load configuration")?;
    debug!(
        version = %vars.version.version,
        oapigen = %vars.openapi.oapigen_version,
        "configuration loaded"
    );

    let rules = catalog::builtin_rules(&vars);
    let opts = ApplyOptions {
        dry_run: cli.dry_run,
    };
    let run = apply_rules(&cli.root, &rules, &opts).context("apply rules")?;

    for outcome in &run.outcomes {
        println!("{}", outcome.report_line());
    }
    if cli.dry_run && !run.patch.is_empty() {
        print!("{}", run.patch);
    }

    debug!(updated = run.updated_count(), "run complete");
    Ok(())
}
