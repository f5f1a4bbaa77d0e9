//! # Workflows Module
//!
//! High-level entry points that run a complete lanthipeptide analysis on one
//! record.
//!
//! ## Overview
//!
//! [`predict`] walks every lanthipeptide cluster of a record, groups
//! precursor candidates with the modifying enzyme that processes them, and
//! drives the engine tasks for each precursor. The predictions are collected
//! in a [`results::LanthiResults`] container, which can be merged back into
//! the record or serialized and restored later.
//!
//! ## Architecture
//!
//! - **Prediction Workflow** ([`predict`]) - Cluster grouping, leader/core
//!   split, modification enumeration and classification per precursor.
//! - **Results Container** ([`results`]) - Per-cluster locus sets and
//!   per-locus motif lists with merge and JSON round-trip support.

pub mod predict;
pub mod results;
