//! Descriptor construction errors.

use miette::Diagnostic;
use thiserror::Error;

/// Error raised while turning raw configuration into descriptors.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum DescriptorError {
    #[error("invalid build system: `{name}`")]
    #[diagnostic(
        code(submake::descriptor::invalid_build_system),
        help("valid build systems: cmake, autoconf, make, meson")
    )]
    InvalidBuildSystem { name: String },

    #[error("invalid submodule name: `{name}`")]
    #[diagnostic(
        code(submake::descriptor::invalid_name),
        help("names are used for make targets and variables; use letters, digits, `-`, `_` or `.`")
    )]
    InvalidName { name: String },

    #[error("submodules `{first}` and `{second}` both use the make variable `{variable}`")]
    #[diagnostic(
        code(submake::descriptor::variable_clash),
        help("rename one of them; names are upper-cased and `-`/`.` become `_` in variable names")
    )]
    VariableClash {
        first: String,
        second: String,
        variable: String,
    },

    #[error("dependency cycle between submodules: {}", members.join(" -> "))]
    #[diagnostic(
        code(submake::descriptor::dependency_cycle),
        help("remove one of the `dependencies` entries, or generate with `--order input`")
    )]
    DependencyCycle { members: Vec<String> },
}
