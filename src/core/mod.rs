//! Core data structures for submake.
//!
//! This module contains the foundational types:
//! - Build-system kinds and their typed options
//! - Dependency descriptors
//! - The configuration file format
//! - The dependency graph between submodules

pub mod build_system;
pub mod descriptor;
pub mod errors;
pub mod graph;
pub mod manifest;

pub use build_system::{BuildSystem, BuildSystemKind, RawBuildOptions};
pub use descriptor::DependencyDescriptor;
pub use errors::DescriptorError;
pub use graph::{order_descriptors, TargetOrder};
pub use manifest::{Manifest, SubmoduleSpec};
