//! Line-oriented Makefile writer.

use crate::builder::{render_steps, Step};

/// Accumulates Makefile text.
#[derive(Debug, Default)]
pub struct MakefileWriter {
    out: String,
}

impl MakefileWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one line.
    pub fn line(&mut self, line: impl AsRef<str>) -> &mut Self {
        self.out.push_str(line.as_ref());
        self.out.push('\n');
        self
    }

    pub fn blank(&mut self) -> &mut Self {
        self.line("")
    }

    /// Append a `# ...` comment line.
    pub fn comment(&mut self, text: &str) -> &mut Self {
        self.line(format!("# {}", text))
    }

    /// Append a `.PHONY` target with its prerequisites and recipe.
    pub fn phony<S: AsRef<str>>(&mut self, name: &str, prereqs: &[S], steps: &[Step]) -> &mut Self {
        self.line(format!(".PHONY: {}", name));

        let prereqs: Vec<&str> = prereqs.iter().map(|p| p.as_ref()).collect();
        if prereqs.is_empty() {
            self.line(format!("{}:", name));
        } else {
            self.line(format!("{}: {}", name, prereqs.join(" ")));
        }

        if !steps.is_empty() {
            self.line(render_steps(steps));
        }
        self
    }

    pub fn finish(self) -> String {
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phony_target() {
        let mut w = MakefileWriter::new();
        w.phony(
            "all",
            &["a", "b"],
            &[Step::Echo("done".into())],
        );
        assert_eq!(w.finish(), ".PHONY: all\nall: a b\n\t@echo \"done\"\n");
    }

    #[test]
    fn test_phony_without_prereqs_or_steps() {
        let mut w = MakefileWriter::new();
        w.phony::<&str>("noop", &[], &[]).blank().comment("end");
        assert_eq!(w.finish(), ".PHONY: noop\nnoop:\n\n# end\n");
    }
}
