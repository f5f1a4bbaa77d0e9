//! Provides input/output functionality for genomic records.
//!
//! Records are exchanged with the surrounding pipeline as JSON documents. The
//! [`traits::RecordFile`] trait keeps the format behind a common interface so
//! additional formats can be added without touching callers.

pub mod json;
pub mod traits;
