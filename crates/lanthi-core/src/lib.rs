//! # lanthipred
//!
//! Prediction of lanthipeptide precursors, their post-translational
//! modifications and resulting masses from annotated gene clusters.
//!
//! ## Architectural Philosophy
//!
//! The library follows a three-layer architecture:
//!
//! - **[`core`]: The Foundation.** Stateless data: the genomic record model,
//!   enzyme roles, the predicted prepeptide, the residue mass table and
//!   record I/O.
//!
//! - **[`engine`]: The Logic Core.** Run configuration, the optional motif
//!   refiner capability, and the per-precursor tasks (cleavage split,
//!   modification enumeration, classification).
//!
//! - **[`workflows`]: The Public API.** The prediction workflow that walks a
//!   record's clusters, and the results container that merges predictions
//!   back into the record or round-trips them through JSON.

pub mod core;
pub mod engine;
pub mod workflows;
