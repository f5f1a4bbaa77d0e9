//! Leader/core boundary refinement through an external motif-scoring tool.
//!
//! The prediction workflow holds a [`BoundaryScorer`] capability. When motif
//! scoring is disabled it holds a [`NullScorer`]; otherwise a [`FimoScorer`]
//! that runs MEME Suite's `fimo` against a cleavage-site motif file. Tool
//! failures are reported as [`ToolError`] and never abort a prediction.

use crate::engine::config::ScoringToolConfig;
use serde::Deserialize;
use std::fs::{self, File};
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};
use std::thread;
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::debug;

const POLL_INTERVAL: Duration = Duration::from_millis(20);
const QUERY_NAME: &str = "query";
/// `fimo` prints p-values below its precision as 0; they score as this.
const P_VALUE_FLOOR: f64 = 1e-30;

/// A proposed leader/core split from the refiner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundaryScore {
    /// Number of leader residues; the core starts at this index.
    pub position: usize,
    pub confidence: f64,
    /// Upper bound on ring closures, when the scorer can estimate one.
    ///
    /// [`FimoScorer`] only locates the cleavage motif and always leaves this
    /// `None`; it is filled by scorers that model the core as well.
    pub bridge_hint: Option<usize>,
}

#[derive(Debug, Error)]
pub enum ToolError {
    #[error("Motif-scoring tool '{0}' was not found")]
    NotFound(PathBuf),

    #[error("Motif-scoring tool exited with {status}: {stderr}")]
    Failed { status: String, stderr: String },

    #[error("Motif-scoring tool did not finish within {0:?}")]
    TimedOut(Duration),

    #[error("I/O error while running motif-scoring tool: {0}")]
    Io(#[from] io::Error),

    #[error("Could not parse motif-scoring output: {0}")]
    Parse(String),
}

/// Capability that proposes a leader/core boundary for a precursor.
pub trait BoundaryScorer: Send + Sync {
    fn name(&self) -> &'static str;

    /// Returns `Ok(None)` when the tool finds no usable boundary.
    fn score_leader_core_boundary(&self, sequence: &str) -> Result<Option<BoundaryScore>, ToolError>;
}

/// Scorer used when motif scoring is disabled. Never proposes a boundary.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullScorer;

impl BoundaryScorer for NullScorer {
    fn name(&self) -> &'static str {
        "none"
    }

    fn score_leader_core_boundary(&self, _sequence: &str) -> Result<Option<BoundaryScore>, ToolError> {
        Ok(None)
    }
}

/// One row of `fimo --text` output.
#[derive(Debug, Clone, PartialEq)]
pub struct FimoHit {
    pub motif_id: String,
    pub sequence_name: String,
    pub start: usize,
    pub stop: usize,
    pub score: f64,
    pub p_value: f64,
}

#[derive(Debug, Deserialize)]
struct FimoRow {
    #[serde(alias = "pattern name")]
    motif_id: String,
    #[serde(alias = "sequence name")]
    sequence_name: String,
    start: usize,
    stop: usize,
    score: f64,
    #[serde(rename = "p-value")]
    p_value: f64,
}

/// Parses the tab-separated output of `fimo --text`.
///
/// Columns are matched by header name, so both the current layout and the
/// older `#pattern name` layout are accepted.
pub fn parse_fimo_output(text: &str) -> Result<Vec<FimoHit>, ToolError> {
    let cleaned = text.trim_start_matches('#');
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(cleaned.as_bytes());

    let mut hits = Vec::new();
    for row in reader.deserialize::<FimoRow>() {
        let row = row.map_err(|e| ToolError::Parse(e.to_string()))?;
        hits.push(FimoHit {
            motif_id: row.motif_id,
            sequence_name: row.sequence_name,
            start: row.start,
            stop: row.stop,
            score: row.score,
            p_value: row.p_value,
        });
    }
    Ok(hits)
}

/// Converts the best FIMO hit into a boundary proposal. The cleavage motif
/// ends at the last leader residue, so the 1-based `stop` coordinate is the
/// leader length.
pub fn best_boundary(hits: &[FimoHit]) -> Option<BoundaryScore> {
    hits.iter()
        .filter(|hit| hit.sequence_name == QUERY_NAME && hit.p_value >= 0.0)
        .min_by(|a, b| a.p_value.total_cmp(&b.p_value))
        .map(|hit| BoundaryScore {
            position: hit.stop,
            confidence: -hit.p_value.max(P_VALUE_FLOOR).log10(),
            bridge_hint: None,
        })
}

/// Runs MEME Suite `fimo` with a cleavage-site motif file.
#[derive(Debug, Clone)]
pub struct FimoScorer {
    executable: PathBuf,
    motif_file: PathBuf,
    timeout: Duration,
}

impl FimoScorer {
    pub fn new(executable: PathBuf, motif_file: PathBuf, timeout: Duration) -> Self {
        Self {
            executable,
            motif_file,
            timeout,
        }
    }

    pub fn from_config(config: &ScoringToolConfig) -> Self {
        Self::new(
            config.executable.clone(),
            config.motif_file.clone(),
            config.timeout,
        )
    }

    /// Whether the executable can be located, either as a path or on `PATH`.
    pub fn is_available(&self) -> bool {
        locate_executable(&self.executable).is_some()
    }

    fn run_tool(&self, workdir: &Path, query: &Path) -> Result<String, ToolError> {
        let stdout_path = workdir.join("fimo.out");
        let stderr_path = workdir.join("fimo.err");

        let mut child = Command::new(&self.executable)
            .arg("--text")
            .arg("--verbosity")
            .arg("1")
            .arg(&self.motif_file)
            .arg(query)
            .stdin(Stdio::null())
            .stdout(Stdio::from(File::create(&stdout_path)?))
            .stderr(Stdio::from(File::create(&stderr_path)?))
            .spawn()
            .map_err(|e| {
                if e.kind() == ErrorKind::NotFound {
                    ToolError::NotFound(self.executable.clone())
                } else {
                    ToolError::Io(e)
                }
            })?;

        let started = Instant::now();
        let status: ExitStatus = loop {
            if let Some(status) = child.try_wait()? {
                break status;
            }
            if started.elapsed() >= self.timeout {
                let _ = child.kill();
                let _ = child.wait();
                return Err(ToolError::TimedOut(self.timeout));
            }
            thread::sleep(POLL_INTERVAL);
        };

        if !status.success() {
            let stderr = fs::read_to_string(&stderr_path).unwrap_or_default();
            return Err(ToolError::Failed {
                status: status.to_string(),
                stderr: stderr.trim().to_string(),
            });
        }
        Ok(fs::read_to_string(&stdout_path)?)
    }
}

impl BoundaryScorer for FimoScorer {
    fn name(&self) -> &'static str {
        "fimo"
    }

    fn score_leader_core_boundary(&self, sequence: &str) -> Result<Option<BoundaryScore>, ToolError> {
        let workdir = tempfile::tempdir()?;
        let query = workdir.path().join("query.fasta");
        fs::write(&query, format!(">{QUERY_NAME}\n{sequence}\n"))?;

        let output = self.run_tool(workdir.path(), &query)?;
        let hits = parse_fimo_output(&output)?;
        debug!(hits = hits.len(), "Parsed motif-scoring output.");
        Ok(best_boundary(&hits))
    }
}

fn locate_executable(executable: &Path) -> Option<PathBuf> {
    if executable.components().count() > 1 {
        return executable.is_file().then(|| executable.to_path_buf());
    }
    let paths = std::env::var_os("PATH")?;
    std::env::split_paths(&paths)
        .map(|dir| dir.join(executable))
        .find(|candidate| candidate.is_file())
}
