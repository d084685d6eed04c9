//! Core domain logic for the grindlog poker bankroll tracker.
//!
//! The UI layers (mobile and web) are thin shells over this crate: domain
//! models, the offline mutation queue, bankroll reconciliation, derived
//! statistics, and the shared formatting/validation utilities.

pub mod bankroll;
pub mod errors;
pub mod queue;
pub mod sessions;
pub mod sites;
pub mod statistics;
pub mod sync;
pub mod utils;
