//! Per-precursor prediction stages.
//!
//! Each submodule implements one step of turning a precursor translation into
//! a predicted lanthipeptide: locating the leader/core cleavage site,
//! enumerating ring closures and tailoring modifications with their masses,
//! and assigning the structural class from the modifying-enzyme complement.

pub mod classification;
pub mod cleavage;
pub mod modification;
