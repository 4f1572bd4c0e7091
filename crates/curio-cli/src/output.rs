//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use curio_domain::{Clause, Priority, Rfp, RfpStatus, StoredClause};
use curio_extractor::ExtractionResult;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Longest clause text shown in a table cell
const TEXT_WIDTH: usize = 72;

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format the result of extracting one document.
    pub fn format_extraction(&self, result: &ExtractionResult) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(result)?),
            OutputFormat::Quiet => Ok(clause_texts(&result.clauses)),
            OutputFormat::Table => {
                let mut output = self.format_clauses_table(&result.clauses);
                output.push('\n');
                output.push_str(&self.info(&extraction_summary(result)));
                Ok(output)
            }
        }
    }

    /// Format stored clauses.
    pub fn format_stored_clauses(&self, clauses: &[StoredClause]) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(clauses)?),
            OutputFormat::Quiet => Ok(clauses
                .iter()
                .map(|c| c.id.to_string())
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Table => {
                if clauses.is_empty() {
                    return Ok(self.colorize("No clauses found.", "yellow"));
                }

                let mut builder = Builder::default();
                builder.push_record(["ID", "RFP", "Priority", "Category", "Text"]);
                for stored in clauses {
                    builder.push_record([
                        short_id(&stored.id.to_string()),
                        short_id(&stored.rfp_id.to_string()),
                        self.priority_label(stored.clause.priority()),
                        stored.clause.category().to_string(),
                        truncate(stored.clause.text(), TEXT_WIDTH),
                    ]);
                }
                Ok(self.render(builder))
            }
        }
    }

    /// Format RFP records.
    pub fn format_rfps(&self, rfps: &[Rfp]) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(rfps)?),
            OutputFormat::Quiet => Ok(rfps
                .iter()
                .map(|r| r.id.to_string())
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Table => {
                if rfps.is_empty() {
                    return Ok(self.colorize("No RFPs found.", "yellow"));
                }

                let mut builder = Builder::default();
                builder.push_record(["ID", "Title", "Organization", "Status", "Clauses", "File"]);
                for rfp in rfps {
                    builder.push_record([
                        rfp.id.to_string(),
                        rfp.title.clone(),
                        rfp.organization.clone(),
                        self.status_label(rfp.status),
                        rfp.clauses_count.to_string(),
                        rfp.file_name.clone(),
                    ]);
                }
                Ok(self.render(builder))
            }
        }
    }

    /// Format a single RFP record.
    pub fn format_rfp(&self, rfp: &Rfp) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(rfp)?),
            _ => self.format_rfps(std::slice::from_ref(rfp)),
        }
    }

    fn format_clauses_table(&self, clauses: &[Clause]) -> String {
        if clauses.is_empty() {
            return self.colorize("No clauses found.", "yellow");
        }

        let mut builder = Builder::default();
        builder.push_record(["#", "Priority", "Category", "Page", "Section", "Text"]);
        for (i, clause) in clauses.iter().enumerate() {
            builder.push_record([
                (i + 1).to_string(),
                self.priority_label(clause.priority()),
                clause.category().to_string(),
                clause.page_number().map(|p| p.to_string()).unwrap_or_default(),
                clause.section().unwrap_or_default().to_string(),
                truncate(clause.text(), TEXT_WIDTH),
            ]);
        }
        self.render(builder)
    }

    fn render(&self, builder: Builder) -> String {
        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));
        table.to_string()
    }

    fn priority_label(&self, priority: Priority) -> String {
        let color = match priority {
            Priority::Must => "red",
            Priority::Should => "yellow",
            Priority::May => "blue",
        };
        self.colorize(priority.as_str(), color)
    }

    fn status_label(&self, status: RfpStatus) -> String {
        let color = match status {
            RfpStatus::Parsed => "green",
            RfpStatus::Uploaded => "cyan",
            RfpStatus::Error => "red",
        };
        self.colorize(status.as_str(), color)
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Whether messages besides the main output should be printed.
    pub fn is_quiet(&self) -> bool {
        self.format != OutputFormat::Table
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            "cyan" => text.cyan().to_string(),
            _ => text.to_string(),
        }
    }
}

fn extraction_summary(result: &ExtractionResult) -> String {
    let mut summary = format!("{} clause(s)", result.clauses.len());
    if let Some(pages) = result.total_pages {
        summary.push_str(&format!(", {} page(s)", pages));
    }
    if let Some(files) = result.files_processed {
        summary.push_str(&format!(", {} archive file(s)", files));
    }
    summary
}

fn clause_texts(clauses: &[Clause]) -> String {
    clauses
        .iter()
        .map(Clause::text)
        .collect::<Vec<_>>()
        .join("\n")
}

fn short_id(id: &str) -> String {
    id.chars().take(8).collect()
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut truncated: String = text.chars().take(width - 1).collect();
    truncated.push('…');
    truncated
}

#[cfg(test)]
mod tests {
    use super::*;
    use curio_domain::{Category, RecordId};

    fn sample_result() -> ExtractionResult {
        ExtractionResult {
            clauses: vec![
                Clause::new(
                    "Training must include CPR certification for 4 hours",
                    Category::Duration,
                    Priority::Must,
                )
                .with_page_number(1),
                Clause::new(
                    "Participants should practice using an AED",
                    Category::Other,
                    Priority::Should,
                )
                .with_section("From: docs/scope.pdf"),
            ],
            total_pages: Some(2),
            files_processed: None,
        }
    }

    fn sample_rfp() -> Rfp {
        Rfp {
            id: RecordId::new(),
            title: "CPR Training".to_string(),
            organization: "Lake County".to_string(),
            description: String::new(),
            file_url: "/files/uploads/1-cpr.pdf".to_string(),
            file_name: "cpr.pdf".to_string(),
            status: RfpStatus::Parsed,
            clauses_count: 2,
            created_at: 1_700_000_000,
            updated_at: 1_700_000_000,
        }
    }

    #[test]
    fn test_extraction_table() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_extraction(&sample_result()).unwrap();
        assert!(output.contains("Priority"));
        assert!(output.contains("must"));
        assert!(output.contains("From: docs/scope.pdf"));
        assert!(output.contains("2 clause(s), 2 page(s)"));
    }

    #[test]
    fn test_extraction_json() {
        let formatter = Formatter::new(OutputFormat::Json, false);
        let output = formatter.format_extraction(&sample_result()).unwrap();
        let json: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(json["total_pages"], 2);
        assert_eq!(json["clauses"][0]["priority"], "must");
        assert_eq!(json["clauses"][0]["category"], "duration");
        assert_eq!(json["clauses"][0]["page_number"], 1);
    }

    #[test]
    fn test_extraction_quiet() {
        let formatter = Formatter::new(OutputFormat::Quiet, false);
        let output = formatter.format_extraction(&sample_result()).unwrap();
        assert_eq!(output.lines().count(), 2);
        assert!(output.starts_with("Training must include"));
    }

    #[test]
    fn test_empty_extraction() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter
            .format_extraction(&ExtractionResult::empty())
            .unwrap();
        assert!(output.contains("No clauses found"));
    }

    #[test]
    fn test_rfps_table_and_quiet() {
        let rfp = sample_rfp();
        let table = Formatter::new(OutputFormat::Table, false)
            .format_rfps(std::slice::from_ref(&rfp))
            .unwrap();
        assert!(table.contains("CPR Training"));
        assert!(table.contains("parsed"));

        let quiet = Formatter::new(OutputFormat::Quiet, false)
            .format_rfp(&rfp)
            .unwrap();
        assert_eq!(quiet, rfp.id.to_string());
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdefghij", 5), "abcd…");
        assert_eq!(truncate("ééééé", 3).chars().count(), 3);
    }

    #[test]
    fn test_colorize_disabled() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        assert_eq!(formatter.success("test"), "✓ test");
    }
}
