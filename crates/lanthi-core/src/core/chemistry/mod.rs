//! # Chemistry Module
//!
//! Static mass data for peptide residues and the tailoring modifications that
//! lanthipeptide biosynthesis applies to them.
//!
//! The tables are read-only and safe to share across threads. Every lookup of
//! an unrecognized code fails with
//! [`UnknownResidueError`](masses::UnknownResidueError), which indicates a
//! defect upstream rather than a recoverable data problem.

pub mod masses;
