use crate::core::io::traits::RecordFile;
use crate::core::models::record::Record;
use std::io::{self, BufRead, Write};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum JsonRecordError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub struct JsonRecordFile;

impl RecordFile for JsonRecordFile {
    type Error = JsonRecordError;

    fn read_from(reader: &mut impl BufRead) -> Result<Record, Self::Error> {
        Ok(serde_json::from_reader(reader)?)
    }

    fn write_to(record: &Record, writer: &mut impl Write) -> Result<(), Self::Error> {
        serde_json::to_writer_pretty(&mut *writer, record)?;
        writeln!(writer)?;
        Ok(())
    }
}
