//! Host tool checks.
//!
//! `submake doctor` looks for the same tools the generated `check-deps`
//! target probes, so missing tools show up before `make` is ever run.
//!
//! ```bash
//! submake doctor deps.json
//! submake doctor --verbose
//! ```

use std::collections::BTreeMap;
use std::fmt::Write;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::core::descriptor::DependencyDescriptor;
use crate::emit::toolcheck::{kinds_present, required_tools, Tool};

/// Result of a single tool check.
#[derive(Debug, Clone)]
pub struct CheckResult {
    /// Executable looked up on `PATH`
    pub name: String,

    pub passed: bool,

    /// Human-readable status message
    pub message: String,

    /// Resolved location of the tool
    pub path: Option<PathBuf>,

    pub duration: Duration,
}

impl CheckResult {
    pub fn pass(name: impl Into<String>, message: impl Into<String>) -> Self {
        CheckResult {
            name: name.into(),
            passed: true,
            message: message.into(),
            path: None,
            duration: Duration::ZERO,
        }
    }

    pub fn fail(name: impl Into<String>, message: impl Into<String>) -> Self {
        CheckResult {
            name: name.into(),
            passed: false,
            message: message.into(),
            path: None,
            duration: Duration::ZERO,
        }
    }

    pub fn with_path(mut self, path: PathBuf) -> Self {
        self.path = Some(path);
        self
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }
}

/// Summary of all tool checks.
#[derive(Debug, Clone, Default)]
pub struct DoctorReport {
    pub checks: Vec<CheckResult>,

    pub total_duration: Duration,

    /// Host information shown in verbose output
    pub environment: BTreeMap<String, String>,
}

impl DoctorReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, check: CheckResult) {
        self.checks.push(check);
    }

    pub fn all_passed(&self) -> bool {
        self.checks.iter().all(|c| c.passed)
    }

    pub fn passed_count(&self) -> usize {
        self.checks.iter().filter(|c| c.passed).count()
    }

    pub fn failed_count(&self) -> usize {
        self.checks.iter().filter(|c| !c.passed).count()
    }

    /// Names of the tools that were not found.
    pub fn missing(&self) -> Vec<&str> {
        self.checks
            .iter()
            .filter(|c| !c.passed)
            .map(|c| c.name.as_str())
            .collect()
    }
}

/// Check every tool the Makefile for `descriptors` would need.
pub fn doctor(descriptors: &[DependencyDescriptor]) -> DoctorReport {
    let start = Instant::now();
    let mut report = DoctorReport::new();

    report
        .environment
        .insert("os".to_string(), std::env::consts::OS.to_string());
    report
        .environment
        .insert("arch".to_string(), std::env::consts::ARCH.to_string());

    for tool in required_tools(&kinds_present(descriptors)) {
        report.add(check_tool(&tool));
    }

    report.total_duration = start.elapsed();
    report
}

fn check_tool(tool: &Tool) -> CheckResult {
    let start = Instant::now();

    match which::which(tool.command) {
        Ok(path) => {
            tracing::debug!("found {} at {}", tool.command, path.display());
            CheckResult::pass(tool.command, format!("{} is available", tool.label))
                .with_path(path)
                .with_duration(start.elapsed())
        }
        Err(_) => CheckResult::fail(tool.command, format!("{} is not installed", tool.label))
            .with_duration(start.elapsed()),
    }
}

/// Format the report for display.
pub fn format_report(report: &DoctorReport, verbose: bool) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "submake doctor");
    let _ = writeln!(output, "==============\n");

    if verbose {
        let unknown = "unknown".to_string();
        let _ = writeln!(output, "Environment:");
        let _ = writeln!(
            output,
            "  OS: {} ({})\n",
            report.environment.get("os").unwrap_or(&unknown),
            report.environment.get("arch").unwrap_or(&unknown)
        );
    }

    let _ = writeln!(output, "Tools:");
    for check in &report.checks {
        let status = if check.passed { "[OK]" } else { "[!!]" };
        let _ = writeln!(output, "  {} {}", status, check.name);

        if verbose || !check.passed {
            let _ = writeln!(output, "      {}", check.message);
        }
        if verbose {
            if let Some(path) = &check.path {
                let _ = writeln!(output, "      Path: {}", path.display());
            }
            let _ = writeln!(output, "      Took: {:.1?}", check.duration);
        }
    }

    let _ = writeln!(
        output,
        "\nSummary: {} found, {} missing",
        report.passed_count(),
        report.failed_count()
    );
    if verbose {
        let _ = writeln!(output, "Checked in {:.1?}", report.total_duration);
    }
    if report.all_passed() {
        let _ = writeln!(output, "\nAll tools found. Run `make check-deps` to confirm.");
    } else {
        let _ = writeln!(output, "\nMissing: {}", report.missing().join(", "));
        let _ = writeln!(output, "Run `make install-deps` to install missing tools.");
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::build_system::BuildSystemKind;
    use crate::test_support::{alpha_beta, descriptor_of_kind};

    #[test]
    fn test_report_counts() {
        let mut report = DoctorReport::new();
        report.add(CheckResult::pass("git", "git is available"));
        report.add(CheckResult::fail("meson", "meson is not installed"));

        assert!(!report.all_passed());
        assert_eq!(report.passed_count(), 1);
        assert_eq!(report.failed_count(), 1);
        assert_eq!(report.missing(), ["meson"]);
    }

    #[test]
    fn test_checks_follow_required_tools() {
        let report = doctor(&alpha_beta());
        let names: Vec<&str> = report.checks.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["cmake", "make", "gcc", "git"]);
    }

    #[test]
    fn test_meson_checks_ninja() {
        let report = doctor(&[descriptor_of_kind("pixman", BuildSystemKind::Meson)]);
        let names: Vec<&str> = report.checks.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["meson", "ninja", "make", "gcc", "git"]);
    }

    #[test]
    fn test_format_report_lists_missing_tools() {
        let mut report = DoctorReport::new();
        report.add(CheckResult::pass("git", "git is available").with_path("/usr/bin/git".into()));
        report.add(CheckResult::fail("cmake", "CMake is not installed"));

        let text = format_report(&report, false);
        assert!(text.contains("  [OK] git\n"));
        assert!(text.contains("  [!!] cmake\n      CMake is not installed\n"));
        assert!(!text.contains("/usr/bin/git"));
        assert!(text.contains("Summary: 1 found, 1 missing"));
        assert!(text.contains("\nMissing: cmake\n"));
        assert!(!text.contains("Took:"));
        assert!(!text.contains("Checked in"));

        let verbose = format_report(&report, true);
        assert!(verbose.contains("Path: /usr/bin/git"));
        assert!(verbose.contains("Took: "));
        assert!(verbose.contains("Checked in "));
    }
}
