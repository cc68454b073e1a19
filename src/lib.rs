//! submake - Makefile generator for git submodule dependencies
//!
//! This crate turns a list of submodule descriptors (name, URL, build system
//! and build options) into a Makefile that fetches each submodule and
//! builds and installs it system-wide, locally, or as a debug build.

pub mod builder;
pub mod core;
pub mod emit;
pub mod ops;
pub mod util;

/// Descriptor fixtures for unit tests.
#[cfg(test)]
pub mod test_support;

pub use core::{
    BuildSystem, BuildSystemKind, DependencyDescriptor, DescriptorError, Manifest, TargetOrder,
};
pub use emit::MakefileGenerator;
pub use util::config::Settings;
