//! High-level operations.
//!
//! This module contains the implementation of submake commands.

pub mod doctor;
pub mod generate;
pub mod interactive;

pub use doctor::{doctor, format_report, CheckResult, DoctorReport};
pub use generate::{companion_path, generate, GenerateOptions, GenerateOutcome};
pub use interactive::prompt_descriptors;
