//! `xmdoc generate` command implementation.

use std::path::PathBuf;

use clap::Args;
use xmdoc_config::{CliSettings, Config};
use xmdoc_gen::{GenerateError, GenerationResult, generate};
use xmdoc_render::Newline;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the generate command.
#[derive(Args)]
pub(crate) struct GenerateArgs {
    /// Assembly metadata artifact (JSON).
    artifact: PathBuf,

    /// Output directory for the generated Markdown tree.
    output: PathBuf,

    /// Path to configuration file (default: auto-discover xmdoc.toml).
    #[arg(long)]
    config: Option<PathBuf>,

    /// XML documentation file (default: the artifact's .xml sibling).
    #[arg(long)]
    xml: Option<PathBuf>,

    /// Report what would change without writing anything.
    #[arg(long)]
    dry_run: bool,

    /// Fail if the output directory differs from the rendered pages.
    #[arg(long, conflicts_with = "dry_run")]
    verify: bool,

    /// Delete managed files that are no longer rendered.
    #[arg(long)]
    clean: bool,

    /// Newline convention for rendered output.
    #[arg(long, value_parser = parse_newline)]
    newline: Option<Newline>,

    /// Assembly whose documentation lives in a sibling directory
    /// (repeatable).
    #[arg(long = "external", value_name = "NAME")]
    external_assemblies: Vec<String>,

    /// Source symbol map for "defined in" links (JSON).
    #[arg(long)]
    source_symbols: Option<PathBuf>,

    /// Suppress everything except errors.
    #[arg(short, long)]
    pub quiet: bool,

    /// Enable verbose output.
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,
}

fn parse_newline(value: &str) -> Result<Newline, String> {
    match value {
        "lf" => Ok(Newline::Lf),
        "platform" => Ok(Newline::Platform),
        other => Err(format!("invalid newline '{other}' (expected lf or platform)")),
    }
}

impl GenerateArgs {
    /// Execute the generate command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or any pipeline stage
    /// fails, including a verification mismatch.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new(self.quiet);

        let cli_settings = CliSettings {
            dry_run: self.dry_run,
            verify: self.verify,
            clean: self.clean.then_some(true),
            newline: self.newline,
            external_assemblies: self.external_assemblies,
            xml_path: self.xml,
            source_symbols: self.source_symbols,
        };
        let config = Config::load(self.config.as_deref())?;
        let settings = config.settings(&cli_settings);

        match generate(&self.artifact, &self.output, &settings) {
            Ok(result) => {
                report(&output, &result, settings.dry_run);
                Ok(())
            }
            Err(GenerateError::VerificationFailed { result }) => {
                for path in result.added.iter().chain(&result.changed).chain(&result.removed) {
                    output.info(&format!("  differs: {path}"));
                }
                Err(GenerateError::VerificationFailed { result }.into())
            }
            Err(err) => Err(err.into()),
        }
    }
}

fn report(output: &Output, result: &GenerationResult, dry_run: bool) {
    for message in &result.messages {
        output.warning(message);
    }

    let verb = |past: &'static str, conditional: &'static str| {
        if dry_run { conditional } else { past }
    };
    for path in &result.added {
        output.info(&format!("  {} {path}", verb("added", "would add")));
    }
    for path in &result.changed {
        output.info(&format!("  {} {path}", verb("updated", "would update")));
    }
    for path in &result.removed {
        output.info(&format!("  {} {path}", verb("removed", "would remove")));
    }

    if result.is_clean() {
        output.success("Documentation is up to date");
    } else {
        output.success(&format!(
            "{}: {} added, {} changed, {} removed",
            if dry_run { "Dry run" } else { "Done" },
            result.added.len(),
            result.changed.len(),
            result.removed.len()
        ));
    }
}
