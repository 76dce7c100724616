use crate::classifier::UpdateCounts;
use std::io::{self, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// `total;security`, or just `total` without a security repository
    Machine,
    Human,
}

/// Renders update counts for monitoring wrappers or people
#[derive(Debug, Clone, Copy)]
pub struct Reporter {
    format: OutputFormat,
    quiet: bool,
}

impl Reporter {
    pub fn new(format: OutputFormat, quiet: bool) -> Self {
        Self { format, quiet }
    }

    /// The report text, or `None` when quiet mode suppresses it
    pub fn render(&self, counts: &UpdateCounts) -> Option<String> {
        if self.quiet && counts.total() == 0 {
            return None;
        }

        let text = match (self.format, *counts) {
            (OutputFormat::Machine, UpdateCounts::WithSecurity { total, security }) => {
                format!("{total};{security}\n")
            }
            (OutputFormat::Machine, UpdateCounts::TotalOnly { total }) => format!("{total}\n"),
            (OutputFormat::Human, UpdateCounts::WithSecurity { total, security }) => format!(
                "{total} packages can be updated.\n{security} updates are security updates.\n"
            ),
            (OutputFormat::Human, UpdateCounts::TotalOnly { total }) => {
                format!("{total} packages can be updated.\n")
            }
        };

        Some(text)
    }

    pub fn write_to<W: Write>(&self, counts: &UpdateCounts, out: &mut W) -> io::Result<()> {
        if let Some(text) = self.render(counts) {
            out.write_all(text.as_bytes())?;
            out.flush()?;
        }
        Ok(())
    }
}
