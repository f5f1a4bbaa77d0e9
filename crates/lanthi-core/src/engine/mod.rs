//! # Engine Module
//!
//! Stateless building blocks of a lanthipeptide prediction run.
//!
//! ## Overview
//!
//! The engine turns one precursor translation plus the enzyme complement of
//! its cluster into a predicted leader/core split, ring count, tailoring
//! modifications and masses. The workflows layer drives these pieces per
//! cluster and per precursor.
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - Run settings and the external tool switch
//! - **Boundary Refinement** ([`refiner`]) - The optional motif-scoring capability
//! - **Tasks** ([`tasks`]) - Cleavage split, modification enumeration, classification
//! - **Progress Monitoring** ([`progress`]) - Progress reporting for callers
//! - **Error Handling** ([`error`]) - Engine-specific error types

pub mod config;
pub mod error;
pub mod progress;
pub mod refiner;
pub mod tasks;
