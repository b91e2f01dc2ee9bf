use std::io::Write;
use std::path::Path;
use std::process::ExitCode;

use anyhow::Context;
use colored::Colorize;
use tracing::info;

use docdiff_convert::{ConverterRegistry, TextConverter};
use docdiff_engine::{DiffEngine, DiffResult};
use docdiff_render::{percent, render, render_bytes};
use docdiff_types::NormalizedDocument;

use crate::cli::Cli;
use crate::config::CliConfig;

/// How a comparison ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Identical,
    Different,
}

impl Outcome {
    pub fn exit_code(self) -> ExitCode {
        match self {
            Self::Identical => ExitCode::SUCCESS,
            Self::Different => ExitCode::from(1),
        }
    }
}

/// Convert both inputs, diff them, and write the requested output.
pub fn run(cli: &Cli, stdout: &mut dyn Write, stderr: &mut dyn Write) -> anyhow::Result<Outcome> {
    let config = CliConfig::resolve(cli)?;
    let registry = ConverterRegistry::with_text(TextConverter::new(config.engine.line_height));
    let engine = DiffEngine::new(config.engine.clone())?;

    let old = load(&registry, &cli.old, cli.quiet, stderr)?;
    let new = load(&registry, &cli.new, cli.quiet, stderr)?;
    let result = engine.compare(old, new)?;
    info!(
        similarity = result.similarity_ratio,
        hunks = result.hunks.len(),
        changed = result.stats.changed(),
        "comparison finished"
    );

    let outcome = if result.has_changes() {
        Outcome::Different
    } else {
        Outcome::Identical
    };
    if cli.quiet && outcome == Outcome::Identical {
        return Ok(outcome);
    }
    if cli.summary {
        write_summary(&result, config.render.color, stdout)?;
        return Ok(outcome);
    }

    if let Some(path) = &cli.output {
        let rendered = render_bytes(config.format, &result, &config.render)?;
        std::fs::write(path, &rendered).with_context(|| format!("cannot write output to {}", path.display()))?;
        if !cli.quiet {
            writeln!(stderr, "Output written to: {}", path.display())?;
        }
        return Ok(outcome);
    }

    let rendered = render(config.format, &result, &config.render)?;
    if rendered.ends_with('\n') {
        write!(stdout, "{rendered}")?;
    } else if !rendered.is_empty() {
        writeln!(stdout, "{rendered}")?;
    }
    Ok(outcome)
}

fn load(
    registry: &ConverterRegistry,
    path: &Path,
    quiet: bool,
    stderr: &mut dyn Write,
) -> anyhow::Result<NormalizedDocument> {
    if !quiet {
        let name = path.file_name().unwrap_or(path.as_os_str()).to_string_lossy();
        writeln!(stderr, "Converting {name}...")?;
    }
    Ok(registry.load(path)?)
}

fn write_summary(result: &DiffResult, color: bool, out: &mut dyn Write) -> anyhow::Result<()> {
    let stats = &result.stats;
    let paint = |text: String, style: fn(&str) -> colored::ColoredString| {
        if color {
            style(&text).to_string()
        } else {
            text
        }
    };
    writeln!(out, "Similarity: {}", paint(percent(result.similarity_ratio), |s| s.cyan()))?;
    writeln!(out, "Insertions: {}", paint(stats.insertions.to_string(), |s| s.green()))?;
    writeln!(out, "Deletions:  {}", paint(stats.deletions.to_string(), |s| s.red()))?;
    writeln!(out, "Modifications: {}", paint(stats.modifications.to_string(), |s| s.yellow()))?;
    Ok(())
}
