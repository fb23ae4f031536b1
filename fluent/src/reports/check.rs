//! Check command report data structures.

use std::path::PathBuf;

use super::output::{Output, Report};

/// Resolution summary of one buildable type.
#[derive(Debug)]
pub struct BuildableSummary {
    pub fqn: String,
    /// Concrete buildable types assignable to this one.
    pub descendants: Vec<String>,
    /// Other types reached through nested builders.
    pub nested: usize,
    /// Branches cut by the resolver limits.
    pub truncated: usize,
}

/// Report data from manifest validation.
#[derive(Debug)]
pub struct CheckReport {
    /// Path to the config file.
    pub config_path: PathBuf,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub infos: Vec<String>,
    /// Empty when validation failed.
    pub buildables: Vec<BuildableSummary>,
}

impl CheckReport {
    /// Whether the check passed (no errors).
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

impl Report for CheckReport {
    fn render(&self, out: &mut dyn Output) {
        for error in &self.errors {
            out.warning(&format!("error: {}", error));
        }
        for warning in &self.warnings {
            out.warning(&format!("warning: {}", warning));
        }
        for info in &self.infos {
            out.preformatted(&format!("info: {}", info));
        }

        if !self.warnings.is_empty() || !self.errors.is_empty() || !self.infos.is_empty() {
            out.newline();
        }

        if !self.is_valid() {
            return;
        }

        out.preformatted(&format!("✓ {} is valid", self.config_path.display()));
        out.newline();

        let count = self.buildables.len();
        out.section(&format!(
            "{} buildable type{}",
            count,
            if count == 1 { "" } else { "s" }
        ));
        for buildable in &self.buildables {
            let mut line = buildable.fqn.clone();
            if !buildable.descendants.is_empty() {
                line.push_str(&format!(" <- {}", buildable.descendants.join(", ")));
            }
            if buildable.nested > 0 {
                line.push_str(&format!(" ({} nested)", buildable.nested));
            }
            if buildable.truncated > 0 {
                line.push_str(&format!(" [{} truncated]", buildable.truncated));
            }
            out.list_item(&line);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::RecordingOutput;

    #[test]
    fn test_render_valid() {
        let report = CheckReport {
            config_path: PathBuf::from("fluent.toml"),
            errors: Vec::new(),
            warnings: Vec::new(),
            infos: Vec::new(),
            buildables: vec![
                BuildableSummary {
                    fqn: "com.example.Shape".to_string(),
                    descendants: vec!["com.example.Circle".to_string()],
                    nested: 0,
                    truncated: 0,
                },
                BuildableSummary {
                    fqn: "com.example.Drawing".to_string(),
                    descendants: Vec::new(),
                    nested: 1,
                    truncated: 2,
                },
            ],
        };

        let mut out = RecordingOutput::default();
        report.render(&mut out);
        assert_eq!(
            out.lines,
            [
                "✓ fluent.toml is valid",
                "",
                "2 buildable types:",
                "  - com.example.Shape <- com.example.Circle",
                "  - com.example.Drawing (1 nested) [2 truncated]",
            ]
        );
    }

    #[test]
    fn test_render_invalid() {
        let report = CheckReport {
            config_path: PathBuf::from("fluent.toml"),
            errors: vec!["duplicate type 'com.example.A'".to_string()],
            warnings: Vec::new(),
            infos: Vec::new(),
            buildables: Vec::new(),
        };

        let mut out = RecordingOutput::default();
        report.render(&mut out);
        assert_eq!(out.lines, ["error: duplicate type 'com.example.A'", ""]);
    }
}
