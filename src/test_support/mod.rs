//! Test utilities for submake unit tests.
//!
//! Provides descriptor fixtures shared by the builder and emitter tests.

pub mod fixtures;

pub use fixtures::*;
