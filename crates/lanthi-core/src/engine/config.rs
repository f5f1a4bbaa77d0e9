use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_MIN_BOUNDARY_CONFIDENCE: f64 = 3.0;
pub const DEFAULT_NEIGHBOURHOOD_RANGE: u64 = 10_000;
pub const DEFAULT_MAX_PRECURSOR_LENGTH: usize = 120;
pub const DEFAULT_TOOL_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Error, PartialEq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),

    #[error("Invalid value for '{parameter}': {reason}")]
    InvalidValue {
        parameter: &'static str,
        reason: String,
    },
}

/// Location and limits of the external motif-scoring tool.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoringToolConfig {
    pub executable: PathBuf,
    pub motif_file: PathBuf,
    pub timeout: Duration,
}

/// Settings for one prediction run. Read-only once the run starts.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Whether the external motif-scoring tool may be consulted.
    pub motif_scoring_enabled: bool,
    /// Minimum `-log10(p)` a refiner boundary needs to override the
    /// fixed-rule split.
    pub min_boundary_confidence: f64,
    /// Maximum distance in nucleotides between a precursor and its
    /// modifying enzyme.
    pub neighbourhood_range: u64,
    /// Translations longer than this are never treated as precursors.
    pub max_precursor_length: usize,
    pub scoring_tool: Option<ScoringToolConfig>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            motif_scoring_enabled: false,
            min_boundary_confidence: DEFAULT_MIN_BOUNDARY_CONFIDENCE,
            neighbourhood_range: DEFAULT_NEIGHBOURHOOD_RANGE,
            max_precursor_length: DEFAULT_MAX_PRECURSOR_LENGTH,
            scoring_tool: None,
        }
    }
}

#[derive(Default)]
pub struct EngineConfigBuilder {
    motif_scoring_enabled: Option<bool>,
    min_boundary_confidence: Option<f64>,
    neighbourhood_range: Option<u64>,
    max_precursor_length: Option<usize>,
    tool_executable: Option<PathBuf>,
    motif_file: Option<PathBuf>,
    tool_timeout: Option<Duration>,
}

impl EngineConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn motif_scoring_enabled(mut self, enabled: bool) -> Self {
        self.motif_scoring_enabled = Some(enabled);
        self
    }
    pub fn min_boundary_confidence(mut self, confidence: f64) -> Self {
        self.min_boundary_confidence = Some(confidence);
        self
    }
    pub fn neighbourhood_range(mut self, range: u64) -> Self {
        self.neighbourhood_range = Some(range);
        self
    }
    pub fn max_precursor_length(mut self, length: usize) -> Self {
        self.max_precursor_length = Some(length);
        self
    }
    pub fn tool_executable(mut self, path: PathBuf) -> Self {
        self.tool_executable = Some(path);
        self
    }
    pub fn motif_file(mut self, path: PathBuf) -> Self {
        self.motif_file = Some(path);
        self
    }
    pub fn tool_timeout(mut self, timeout: Duration) -> Self {
        self.tool_timeout = Some(timeout);
        self
    }

    pub fn build(self) -> Result<EngineConfig, ConfigError> {
        let motif_scoring_enabled = self
            .motif_scoring_enabled
            .ok_or(ConfigError::MissingParameter("motif_scoring_enabled"))?;

        let min_boundary_confidence = self
            .min_boundary_confidence
            .unwrap_or(DEFAULT_MIN_BOUNDARY_CONFIDENCE);
        if !min_boundary_confidence.is_finite() || min_boundary_confidence < 0.0 {
            return Err(ConfigError::InvalidValue {
                parameter: "min_boundary_confidence",
                reason: format!("must be a non-negative number, got {min_boundary_confidence}"),
            });
        }

        let max_precursor_length = self
            .max_precursor_length
            .unwrap_or(DEFAULT_MAX_PRECURSOR_LENGTH);
        if max_precursor_length == 0 {
            return Err(ConfigError::InvalidValue {
                parameter: "max_precursor_length",
                reason: "must be greater than zero".to_string(),
            });
        }

        let timeout = self.tool_timeout.unwrap_or(DEFAULT_TOOL_TIMEOUT);
        if timeout.is_zero() {
            return Err(ConfigError::InvalidValue {
                parameter: "tool_timeout",
                reason: "must be greater than zero".to_string(),
            });
        }

        let scoring_tool = if motif_scoring_enabled {
            Some(ScoringToolConfig {
                executable: self
                    .tool_executable
                    .ok_or(ConfigError::MissingParameter("tool_executable"))?,
                motif_file: self
                    .motif_file
                    .ok_or(ConfigError::MissingParameter("motif_file"))?,
                timeout,
            })
        } else {
            None
        };

        Ok(EngineConfig {
            motif_scoring_enabled,
            min_boundary_confidence,
            neighbourhood_range: self
                .neighbourhood_range
                .unwrap_or(DEFAULT_NEIGHBOURHOOD_RANGE),
            max_precursor_length,
            scoring_tool,
        })
    }
}
