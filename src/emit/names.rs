//! Target names.
//!
//! Every target name in the generated Makefile comes from one of these
//! functions, so the emitted targets and the help text cannot drift apart.

use crate::builder::InstallMode;
use crate::core::descriptor::DependencyDescriptor;

pub const ALL: &str = "all";
pub const LOCAL: &str = "local";
pub const SUBMODULES: &str = "submodules";
pub const UPDATE_SUBMODULES: &str = "update-submodules";
pub const CLEAN: &str = "clean";
pub const DISTCLEAN: &str = "distclean";
pub const CHECK_DEPS: &str = "check-deps";
pub const INSTALL_DEPS: &str = "install-deps";
pub const HELP: &str = "help";

/// `<name>-submodule`
pub fn fetch(desc: &DependencyDescriptor) -> String {
    format!("{}-submodule", desc.name())
}

/// The per-descriptor build target for `mode`.
pub fn mode_target(desc: &DependencyDescriptor, mode: InstallMode) -> String {
    match mode {
        InstallMode::System => desc.name().to_string(),
        InstallMode::Local => format!("{}-local", desc.name()),
        InstallMode::Dev => format!("{}-dev", desc.name()),
    }
}

/// `clean-<name>`
pub fn clean(desc: &DependencyDescriptor) -> String {
    format!("clean-{}", desc.name())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::build_system::BuildSystemKind;
    use crate::test_support::descriptor_of_kind;

    #[test]
    fn test_target_names() {
        let desc = descriptor_of_kind("glog", BuildSystemKind::CMake);
        assert_eq!(fetch(&desc), "glog-submodule");
        assert_eq!(mode_target(&desc, InstallMode::System), "glog");
        assert_eq!(mode_target(&desc, InstallMode::Local), "glog-local");
        assert_eq!(mode_target(&desc, InstallMode::Dev), "glog-dev");
        assert_eq!(clean(&desc), "clean-glog");
    }
}
