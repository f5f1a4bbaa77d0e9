pub mod predict;
pub mod restore;

use crate::error::{CliError, Result};
use lanthipred::core::io::json::JsonRecordFile;
use lanthipred::core::io::traits::RecordFile;
use lanthipred::core::models::record::Record;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use tracing::info;

pub(crate) fn read_record(path: &Path) -> Result<Record> {
    info!("Reading record from {:?}", path);
    JsonRecordFile::read_from_path(path).map_err(|e| CliError::FileParsing {
        path: path.to_path_buf(),
        source: e.into(),
    })
}

pub(crate) fn write_record(record: &Record, path: &Path) -> Result<()> {
    info!("Writing annotated record to {:?}", path);
    JsonRecordFile::write_to_path(record, path)
        .map_err(|e| CliError::Other(anyhow::anyhow!("Failed to write {:?}: {}", path, e)))
}

pub(crate) fn read_json(path: &Path) -> Result<serde_json::Value> {
    let reader = BufReader::new(File::open(path)?);
    serde_json::from_reader(reader).map_err(|e| CliError::FileParsing {
        path: path.to_path_buf(),
        source: e.into(),
    })
}

pub(crate) fn write_json(value: &serde_json::Value, path: &Path) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, value)
        .map_err(|e| CliError::Other(anyhow::anyhow!("Failed to serialize results: {}", e)))?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}
