//! # Core Models Module
//!
//! The data structures the prediction engine reads and produces.
//!
//! ## Key Components
//!
//! - [`record`] - Genomic record with CDS features, gene clusters and the
//!   annotations attached to them
//! - [`roles`] - Biosynthetic enzyme roles and the profile-domain table that
//!   resolves them
//! - [`peptide`] - Predicted prepeptides, peptide classes and tailoring
//!   modifications
//!
//! ## Usage
//!
//! ```ignore
//! use lanthipred::core::models::record::{CdsFeature, Cluster, Location, Record, Strand};
//!
//! let mut record = Record::new("NC_000000");
//! record.add_cds_feature(
//!     CdsFeature::new("nisB", Location::new(200, 3200, Strand::Forward)?)
//!         .with_domains(&["Lant_dehydr_N", "Lant_dehydr_C"]),
//! )?;
//! record.add_cluster(Cluster::new(1, &["lanthipeptide"], &["nisB"]))?;
//! ```

pub mod peptide;
pub mod record;
pub mod roles;
