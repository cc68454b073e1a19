//! Recipe steps.
//!
//! A [`Step`] is one logical recipe line of a Makefile target. Long commands
//! are split over continuation lines, one argument per line.

use std::fmt;

/// Separator between a command and its continued arguments.
const CONTINUATION: &str = " \\\n\t\t";

/// One shell step in a target recipe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Command echoed by make before it runs
    Run(String),
    /// Command run without echo (`@` prefix)
    Quiet(String),
    /// Message printed with `@echo`
    Echo(String),
    /// Command whose failure is ignored by make (`-` prefix)
    Tolerant(String),
}

impl Step {
    /// A command with each argument on its own continuation line.
    pub fn command<I, S>(head: impl Into<String>, args: I) -> Step
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut line = head.into();
        for arg in args {
            line.push_str(CONTINUATION);
            line.push_str(arg.as_ref());
        }
        Step::Run(line)
    }

    /// `cd <dir> && <command>`.
    pub fn in_dir(dir: &str, command: impl AsRef<str>) -> Step {
        Step::Run(format!("cd {} && {}", dir, command.as_ref()))
    }

    /// The shell text of this step, without the make prefix.
    pub fn text(&self) -> &str {
        match self {
            Step::Run(s) | Step::Quiet(s) | Step::Echo(s) | Step::Tolerant(s) => s,
        }
    }

    /// Render as tab-indented recipe text (no trailing newline).
    pub fn render(&self) -> String {
        match self {
            Step::Run(s) => format!("\t{}", s),
            Step::Quiet(s) => format!("\t@{}", s),
            Step::Echo(s) => format!("\t@echo \"{}\"", s.replace('"', "\\\"")),
            Step::Tolerant(s) => format!("\t-{}", s),
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// Render a step list as recipe lines joined by newlines.
pub fn render_steps(steps: &[Step]) -> String {
    steps
        .iter()
        .map(Step::render)
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_prefixes() {
        assert_eq!(Step::Run("make".into()).render(), "\tmake");
        assert_eq!(Step::Quiet("mkdir -p b".into()).render(), "\t@mkdir -p b");
        assert_eq!(Step::Tolerant("git rm -f x".into()).render(), "\t-git rm -f x");
        assert_eq!(Step::Echo("hello".into()).render(), "\t@echo \"hello\"");
    }

    #[test]
    fn test_echo_escapes_quotes() {
        assert_eq!(
            Step::Echo("say \"hi\"".into()).render(),
            "\t@echo \"say \\\"hi\\\"\""
        );
    }

    #[test]
    fn test_command_continuation() {
        let step = Step::command("cmake ..", ["-DA=1", "-DB=2"]);
        assert_eq!(step.render(), "\tcmake .. \\\n\t\t-DA=1 \\\n\t\t-DB=2");
    }

    #[test]
    fn test_command_without_args() {
        let step = Step::command("ninja", Vec::<String>::new());
        assert_eq!(step, Step::Run("ninja".into()));
    }

    #[test]
    fn test_in_dir() {
        assert_eq!(
            Step::in_dir("$(A_DIR)", "$(MAKE)").text(),
            "cd $(A_DIR) && $(MAKE)"
        );
    }
}
