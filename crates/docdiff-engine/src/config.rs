use serde::{Deserialize, Serialize};

use docdiff_types::DEFAULT_LINE_HEIGHT;

use crate::align::Algorithm;
use crate::error::{EngineError, EngineResult};
use crate::result::DiffMode;

/// Configuration for the diff engine.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Whether to compare lines or positional blocks.
    pub mode: DiffMode,
    /// Matching strategy for the sequence aligner.
    pub algorithm: Algorithm,
    /// Line pitch used to estimate a block's line when it declares none.
    pub line_height: f64,
    /// Context lines around changes in unified output.
    pub context_lines: usize,
    /// Maximum items per document; larger inputs are rejected before
    /// alignment. `None` disables the cap.
    pub max_items: Option<usize>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            mode: DiffMode::Lines,
            algorithm: Algorithm::Lcs,
            line_height: DEFAULT_LINE_HEIGHT,
            context_lines: 3,
            max_items: None,
        }
    }
}

impl EngineConfig {
    /// Default configuration comparing positional blocks.
    pub fn block_mode() -> Self {
        Self {
            mode: DiffMode::Blocks,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> EngineResult<()> {
        if !self.line_height.is_finite() || self.line_height <= 0.0 {
            return Err(EngineError::InvalidConfig(format!(
                "line_height must be a positive number, got {}",
                self.line_height
            )));
        }
        if self.max_items == Some(0) {
            return Err(EngineError::InvalidConfig(
                "max_items must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
