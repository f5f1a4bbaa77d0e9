use crate::cli::{FimoToggle, PredictArgs};
use crate::error::{CliError, Result};
use lanthipred::engine::config::{EngineConfig, EngineConfigBuilder};
use lanthipred::engine::error::EngineError;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;
use tracing::debug;

/// Executable looked up on `PATH` when none is configured.
const DEFAULT_FIMO_EXECUTABLE: &str = "fimo";

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialMotifScoringConfig {
    enabled: Option<bool>,
    executable: Option<PathBuf>,
    #[serde(rename = "motif-file")]
    motif_file: Option<PathBuf>,
    #[serde(rename = "timeout-secs")]
    timeout_secs: Option<u64>,
    #[serde(rename = "min-confidence")]
    min_confidence: Option<f64>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialPrecursorConfig {
    #[serde(rename = "neighbourhood-range")]
    neighbourhood_range: Option<u64>,
    #[serde(rename = "max-length")]
    max_length: Option<usize>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct PartialEngineConfig {
    #[serde(rename = "motif-scoring")]
    motif_scoring: Option<PartialMotifScoringConfig>,
    precursors: Option<PartialPrecursorConfig>,
    /// Directory relative paths in the file are resolved against.
    #[serde(skip)]
    base_dir: Option<PathBuf>,
}

impl PartialEngineConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })?;
        config.base_dir = path.parent().map(Path::to_path_buf);
        Ok(config)
    }

    pub fn merge_with_cli(mut self, args: &PredictArgs) -> Result<EngineConfig> {
        self.apply_set_values(&args.set_values)?;

        let scoring = self.motif_scoring.take().unwrap_or_default();
        let precursors = self.precursors.take().unwrap_or_default();

        let motif_file = args
            .motif_file
            .clone()
            .or_else(|| scoring.motif_file.map(|p| self.resolve(p)));
        let executable = args
            .fimo_path
            .clone()
            .or_else(|| scoring.executable.map(|p| self.resolve_executable(p)))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_FIMO_EXECUTABLE));

        let enabled = Self::merge_enabled(args.fimo, scoring.enabled, motif_file.is_some());
        debug!(enabled, ?motif_file, ?executable, "Resolved motif-scoring settings.");

        let mut builder = EngineConfigBuilder::new()
            .motif_scoring_enabled(enabled)
            .tool_executable(executable);
        if let Some(path) = motif_file {
            builder = builder.motif_file(path);
        }
        if let Some(secs) = scoring.timeout_secs {
            builder = builder.tool_timeout(Duration::from_secs(secs));
        }
        if let Some(confidence) = scoring.min_confidence {
            builder = builder.min_boundary_confidence(confidence);
        }
        if let Some(range) = precursors.neighbourhood_range {
            builder = builder.neighbourhood_range(range);
        }
        if let Some(length) = precursors.max_length {
            builder = builder.max_precursor_length(length);
        }

        Ok(builder.build().map_err(EngineError::from)?)
    }

    fn merge_enabled(cli_flags: FimoToggle, file_val: Option<bool>, has_motif_file: bool) -> bool {
        if cli_flags.with_fimo {
            true
        } else if cli_flags.without_fimo {
            false
        } else {
            file_val.unwrap_or(has_motif_file)
        }
    }

    fn resolve(&self, path: PathBuf) -> PathBuf {
        match &self.base_dir {
            Some(dir) if path.is_relative() => dir.join(path),
            _ => path,
        }
    }

    /// Bare executable names stay as-is so they are searched on `PATH`.
    fn resolve_executable(&self, path: PathBuf) -> PathBuf {
        if path.components().count() > 1 {
            self.resolve(path)
        } else {
            path
        }
    }

    fn apply_set_values(&mut self, set_values: &[String]) -> Result<()> {
        for kv_pair in set_values {
            let Some((key, value_str)) = kv_pair.split_once('=') else {
                return Err(CliError::Config(format!(
                    "Invalid --set format: '{}'. Expected KEY=VALUE.",
                    kv_pair
                )));
            };

            match key {
                "motif-scoring.enabled" => {
                    self.scoring().enabled = Some(parse_value(key, value_str)?);
                }
                "motif-scoring.executable" => {
                    self.scoring().executable = Some(PathBuf::from(value_str));
                }
                "motif-scoring.motif-file" => {
                    self.scoring().motif_file = Some(PathBuf::from(value_str));
                }
                "motif-scoring.timeout-secs" => {
                    self.scoring().timeout_secs = Some(parse_value(key, value_str)?);
                }
                "motif-scoring.min-confidence" => {
                    self.scoring().min_confidence = Some(parse_value(key, value_str)?);
                }
                "precursors.neighbourhood-range" => {
                    self.precursors
                        .get_or_insert_with(Default::default)
                        .neighbourhood_range = Some(parse_value(key, value_str)?);
                }
                "precursors.max-length" => {
                    self.precursors
                        .get_or_insert_with(Default::default)
                        .max_length = Some(parse_value(key, value_str)?);
                }
                _ => {
                    return Err(CliError::Config(format!(
                        "Unsupported configuration key for --set: '{}'",
                        key
                    )));
                }
            }
        }
        Ok(())
    }

    fn scoring(&mut self) -> &mut PartialMotifScoringConfig {
        self.motif_scoring.get_or_insert_with(Default::default)
    }
}

fn parse_value<T: FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| CliError::Config(format!("Invalid value for {}: {}", key, value)))
}
