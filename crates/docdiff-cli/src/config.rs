use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use docdiff_engine::{DiffMode, EngineConfig};
use docdiff_render::{OutputFormat, RenderOptions};

use crate::cli::Cli;

/// Settings read from a `--config` TOML file.
///
/// Every field is optional in the file; command-line flags override it.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    pub format: OutputFormat,
    pub engine: EngineConfig,
    pub render: RenderOptions,
}

impl CliConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("cannot read config file {}", path.display()))?;
        toml::from_str(&text).with_context(|| format!("invalid config file {}", path.display()))
    }

    /// The file at `--config` if given, else defaults, with flags applied.
    pub fn resolve(cli: &Cli) -> anyhow::Result<Self> {
        let base = match &cli.config {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        Ok(base.apply(cli))
    }

    /// Override settings with the flags present on the command line.
    pub fn apply(mut self, cli: &Cli) -> Self {
        if let Some(format) = cli.format {
            self.format = format;
        }
        if let Some(context) = cli.context {
            self.engine.context_lines = context;
            self.render.context = Some(context);
        }
        if cli.block_diff {
            self.engine.mode = DiffMode::Blocks;
        }
        if let Some(algorithm) = cli.algorithm {
            self.engine.algorithm = algorithm;
        }
        if let Some(line_height) = cli.line_height {
            self.engine.line_height = line_height;
        }
        if let Some(max) = cli.max_lines {
            self.engine.max_items = Some(max);
        }
        // Files never receive escape codes.
        if cli.no_color || cli.output.is_some() {
            self.render.color = false;
        }
        self
    }
}
