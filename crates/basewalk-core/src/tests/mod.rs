//! Test module for determinism and integration tests.
//!
//! This module exercises the full frame step end to end:
//! - **Determinism tests**: Verify same inputs produce bit-identical state
//! - **Integration tests**: Drive complete scenarios through `Simulation`
//! - **Helper functions**: Utilities for test setup
//!
//! # Test Structure
//!
//! - `determinism.rs`: Hash equality across runs and reset round trips
//! - `integration.rs`: Jump arcs, visits, completion, block edits, look
//! - `helpers.rs`: Test setup utilities and factory functions

mod helpers;

// Re-export for convenience
pub use helpers::*;
