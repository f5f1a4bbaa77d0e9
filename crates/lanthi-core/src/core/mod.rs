//! # Core Module
//!
//! Stateless building blocks of the lanthipeptide engine: the record and
//! peptide data models, the residue mass tables, and record I/O.
//!
//! ## Architecture
//!
//! - **Data Models** ([`models`]) - Records, clusters, CDS features, enzyme
//!   roles and predicted prepeptides
//! - **Mass Data** ([`chemistry`]) - Monoisotopic and average residue masses
//!   and modification deltas
//! - **File I/O** ([`io`]) - Reading and writing records as JSON
//!
//! Nothing in this layer holds mutable global state; the mass tables are
//! static and may be shared freely between threads.

pub mod chemistry;
pub mod io;
pub mod models;
