//! Run report printed after drafting.

use std::fmt::Write as _;

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::Serialize;

use crate::input::{BoothContact, DuplicateEmail};

/// Output format for the run report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text format.
    #[default]
    Text,
    /// JSON format.
    Json,
    /// YAML format.
    Yaml,
}

/// A résumé owner who already received an email in an earlier batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlreadyContacted {
    /// Canonical address shared by both résumés.
    pub email: String,
    /// PDFs in the current batch.
    pub pdfs: Vec<String>,
    /// PDFs in the already-contacted directory.
    pub done_pdfs: Vec<String>,
}

/// Booth visitor statistics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BoothSummary {
    /// Visitors whose address appears in a résumé.
    pub contacts: Vec<BoothContact>,
    /// Booth résumés in the current batch with a strong match.
    pub needing_email: usize,
    /// Booth résumés in the already-contacted directory.
    pub already_contacted: usize,
    /// Booth résumés whose owners may not be U.S. residents.
    pub not_us: usize,
}

/// Number of drafts written to one directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirectoryCount {
    /// Directory name relative to the résumé directory.
    pub directory: String,
    /// Drafts written.
    pub drafts: usize,
}

/// How many weak-only résumés mention a keyword.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeywordHits {
    /// Normalized keyword.
    pub keyword: String,
    /// Résumés mentioning it.
    pub resumes: usize,
}

/// Everything a coordinator needs to know about one run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunReport {
    /// Résumés read from the input directory.
    pub resumes: usize,
    /// Canonical emails shared by several résumés.
    pub duplicate_emails: Vec<DuplicateEmail>,
    /// Résumés skipped because their owner was already contacted.
    pub already_contacted: Vec<AlreadyContacted>,
    /// Booth visitor statistics.
    pub booth: BoothSummary,
    /// Drafts written per directory, sorted by directory.
    pub drafts: Vec<DirectoryCount>,
    /// Text résumés whose PDF original could not be found.
    pub missing_pdfs: Vec<String>,
    /// Résumés with weak matches only.
    pub weak_only: usize,
    /// Most common keywords among weak-only résumés.
    pub top_weak_keywords: Vec<KeywordHits>,
    /// Generic emails written, when running in generic mode.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generic_emails: Option<usize>,
}

impl RunReport {
    /// Total drafts written across directories.
    pub fn total_drafts(&self) -> usize {
        self.drafts.iter().map(|d| d.drafts).sum()
    }

    /// Renders the report in the requested format.
    pub fn render(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Text => Ok(self.render_text()),
            OutputFormat::Json => {
                serde_json::to_string_pretty(self).context("Failed to serialize report to JSON")
            }
            OutputFormat::Yaml => {
                serde_yaml::to_string(self).context("Failed to serialize report to YAML")
            }
        }
    }

    /// Human-readable summary.
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Resumes read: {}", self.resumes);

        for duplicate in &self.duplicate_emails {
            let _ = writeln!(
                out,
                "Email duplicate: {} {}",
                duplicate.email,
                duplicate.pdfs.join(" ")
            );
        }

        for contacted in &self.already_contacted {
            let _ = writeln!(
                out,
                "Already contacted: {} {} matches done resume {}",
                contacted.email,
                contacted.pdfs.join(" "),
                contacted.done_pdfs.join(" ")
            );
        }

        if let Some(count) = self.generic_emails {
            let _ = writeln!(out, "Generic emails written: {count}");
            return out;
        }

        if !self.booth.contacts.is_empty() {
            let _ = writeln!(out, "Booth contacts with a resume: {}", self.booth.contacts.len());
            let _ = writeln!(
                out,
                "Booth visitors who need an email: {}",
                self.booth.needing_email
            );
            let _ = writeln!(
                out,
                "Booth visitors already contacted: {}",
                self.booth.already_contacted
            );
            let _ = writeln!(
                out,
                "Booth visitors who may be non-U.S. residents: {}",
                self.booth.not_us
            );
        }

        let _ = writeln!(out, "Drafts written: {}", self.total_drafts());
        for directory in &self.drafts {
            let _ = writeln!(out, "  {}: {}", directory.directory, directory.drafts);
        }

        for pdf in &self.missing_pdfs {
            let _ = writeln!(out, "Could not find pdf file for {pdf}");
        }

        let _ = writeln!(out, "Resumes with weak matches only: {}", self.weak_only);
        if !self.top_weak_keywords.is_empty() {
            let keywords: Vec<String> = self
                .top_weak_keywords
                .iter()
                .map(|hits| format!("{} ({})", hits.keyword, hits.resumes))
                .collect();
            let _ = writeln!(out, "Top weak-match keywords: {}", keywords.join(", "));
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> RunReport {
        RunReport {
            resumes: 3,
            drafts: vec![
                DirectoryCount {
                    directory: "emails-ceph".to_string(),
                    drafts: 2,
                },
                DirectoryCount {
                    directory: "mixed".to_string(),
                    drafts: 1,
                },
            ],
            missing_pdfs: vec!["lost.txt".to_string()],
            weak_only: 1,
            top_weak_keywords: vec![KeywordHits {
                keyword: "python".to_string(),
                resumes: 1,
            }],
            ..RunReport::default()
        }
    }

    #[test]
    fn text_report_lists_directories() {
        let text = sample().render_text();
        assert!(text.contains("Drafts written: 3\n"));
        assert!(text.contains("  emails-ceph: 2\n"));
        assert!(text.contains("Could not find pdf file for lost.txt\n"));
        assert!(text.contains("Top weak-match keywords: python (1)\n"));
        assert!(!text.contains("Booth"));
    }

    #[test]
    fn json_report_round_trips_fields() {
        let json = sample().render(OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["resumes"], 3);
        assert_eq!(value["drafts"][1]["directory"], "mixed");
        assert!(value.get("generic_emails").is_none());
    }

    #[test]
    fn yaml_report_renders() {
        let yaml = sample().render(OutputFormat::Yaml).unwrap();
        assert!(yaml.contains("weak_only: 1"));
    }

    #[test]
    fn generic_report_stops_after_count() {
        let report = RunReport {
            resumes: 2,
            generic_emails: Some(2),
            ..RunReport::default()
        };
        let text = report.render_text();
        assert!(text.contains("Generic emails written: 2"));
        assert!(!text.contains("Drafts written"));
    }
}
