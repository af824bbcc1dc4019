//! Output formatting for check reports and the language table
//!
//! JSON and YAML mirror the HTTP API; the human format is a compact
//! terminal rendering.

use anyhow::{Context, Result};

use crate::aggregate::AggregateReport;
use crate::checker::Finding;
use crate::registry::LanguageProfile;

const RULE: &str = "\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Yaml,
    Human,
}

pub struct OutputFormatter {
    format: OutputFormat,
}

impl OutputFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn format_report(&self, report: &AggregateReport) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                serde_json::to_string_pretty(report).context("Failed to serialize report to JSON")
            }
            OutputFormat::Yaml => {
                serde_yaml::to_string(report).context("Failed to serialize report to YAML")
            }
            OutputFormat::Human => Ok(self.report_human(report)),
        }
    }

    pub fn format_languages<'a>(
        &self,
        profiles: impl IntoIterator<Item = &'a LanguageProfile>,
    ) -> Result<String> {
        let profiles: Vec<&LanguageProfile> = profiles.into_iter().collect();
        match self.format {
            OutputFormat::Json => serde_json::to_string_pretty(&profiles)
                .context("Failed to serialize languages to JSON"),
            OutputFormat::Yaml => {
                serde_yaml::to_string(&profiles).context("Failed to serialize languages to YAML")
            }
            OutputFormat::Human => Ok(self.languages_human(&profiles)),
        }
    }

    fn report_human(&self, report: &AggregateReport) -> String {
        let mut output = String::new();

        if report.all_sources_failed() {
            output.push_str("\u{26A0} No backend answered\n");
        } else if report.is_clean() {
            output.push_str("\u{2713} No issues found\n");
        } else {
            output.push_str(&format!("\u{2717} {} issue(s) found\n", report.findings.len()));
        }
        output.push_str(RULE);
        output.push_str("\n\n");

        output.push_str(&format!("Language:   {} [{}]\n", report.language, report.detected_language));
        if report.requested_language != report.detected_language {
            output.push_str(&format!("Requested:  {}\n", report.requested_language));
        }
        output.push_str(&format!("Accuracy:   {}\n", report.accuracy));
        output.push_str(&format!(
            "Sources:    {}/{} answered ({})\n",
            report.sources_consulted.len(),
            report.sources_attempted,
            if report.sources_consulted.is_empty() {
                "none".to_string()
            } else {
                report.sources_consulted.join(", ")
            }
        ));

        if !report.findings.is_empty() {
            output.push('\n');
            for (i, finding) in report.findings.iter().enumerate() {
                output.push_str(&finding_human(i + 1, finding));
            }
        }

        output
    }

    fn languages_human(&self, profiles: &[&LanguageProfile]) -> String {
        let mut output = String::new();
        output.push_str("Supported Languages\n");
        output.push_str(RULE);
        output.push('\n');

        for profile in profiles {
            output.push_str(&format!(
                "{:<6} {:<28} {:>4}  {}\n",
                profile.tag,
                profile.display_name,
                profile.accuracy,
                profile.backend_ids.join(", ")
            ));
        }

        output
    }
}

fn finding_human(index: usize, finding: &Finding) -> String {
    let mut out = format!(
        "{}. [{}] \"{}\" at {}+{}\n",
        index, finding.category, finding.original_text, finding.offset, finding.length
    );
    out.push_str(&format!("   \u{251C}\u{2500} {}\n", finding.message));
    if !finding.suggestions.is_empty() {
        out.push_str(&format!(
            "   \u{251C}\u{2500} Suggestions: {}\n",
            finding.suggestions.join(", ")
        ));
    }
    out.push_str(&format!("   \u{2514}\u{2500} Source: {}\n", finding.source_id));
    out
}
