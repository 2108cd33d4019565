//! Text résumés paired with their PDF originals.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use anyhow::{Context, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use regex::Regex;
use serde::Serialize;
use tracing::{debug, warn};

/// Index of a résumé within the batch it was loaded in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResumeId(pub usize);

#[allow(clippy::unwrap_used)] // Compile-time constant regex pattern
static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\w.+-]+@[\w-]+(?:\.[\w-]+)+").unwrap());

/// Extracts email addresses in order of appearance.
pub fn extract_emails(text: &str) -> Vec<String> {
    EMAIL_PATTERN
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// One ingested résumé.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resume {
    /// Name of the text file, e.g. `jane-doe.txt`.
    pub text_file_name: String,
    /// Name of the PDF original, e.g. `jane-doe.pdf`.
    pub pdf_file_name: String,
    /// Full text contents.
    pub text: String,
    /// Addresses found in the text; the first one is canonical.
    pub emails: Vec<String>,
}

impl Resume {
    /// Builds a résumé from its text file name and contents.
    pub fn new(text_file_name: impl Into<String>, text: impl Into<String>) -> Self {
        let text_file_name = text_file_name.into();
        let text = text.into();
        let pdf_file_name = format!("{}.pdf", file_stem(&text_file_name));
        let emails = extract_emails(&text);

        Self {
            text_file_name,
            pdf_file_name,
            text,
            emails,
        }
    }

    /// Text file name without its extension.
    pub fn stem(&self) -> &str {
        file_stem(&self.text_file_name)
    }

    /// First extracted address, usually the owner's.
    pub fn canonical_email(&self) -> Option<&str> {
        self.emails.first().map(String::as_str)
    }

    /// File name of the email draft written for this résumé.
    pub fn email_file_name(&self) -> String {
        format!("{}-email.txt", self.stem())
    }
}

fn file_stem(file_name: &str) -> &str {
    Path::new(file_name)
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or(file_name)
}

/// Text résumés, skipping drafts written by earlier runs.
fn resume_file_filter() -> Result<(GlobSet, GlobSet)> {
    let include = GlobSetBuilder::new()
        .add(Glob::new("*.txt")?)
        .build()
        .context("Failed to build resume file pattern")?;
    let exclude = GlobSetBuilder::new()
        .add(Glob::new("*-email.txt")?)
        .add(Glob::new("*-email-tam.txt")?)
        .build()
        .context("Failed to build email draft pattern")?;
    Ok((include, exclude))
}

/// Reads every text résumé in `dir`, sorted by file name.
pub fn read_resume_dir<P: AsRef<Path>>(dir: P) -> Result<Vec<Resume>> {
    let dir = dir.as_ref();
    let (include, exclude) = resume_file_filter()?;

    let entries = fs::read_dir(dir)
        .with_context(|| format!("Failed to read resume directory: {}", dir.display()))?;

    let mut names = Vec::new();
    for entry in entries {
        let entry = entry
            .with_context(|| format!("Failed to read entry in directory: {}", dir.display()))?;
        if !entry.file_type().map(|t| t.is_file()).unwrap_or(false) {
            continue;
        }
        let Some(name) = entry.file_name().to_str().map(str::to_string) else {
            warn!("Skipping non UTF-8 file name in {}", dir.display());
            continue;
        };
        if include.is_match(&name) && !exclude.is_match(&name) {
            names.push(name);
        }
    }
    names.sort();

    let mut resumes = Vec::with_capacity(names.len());
    for name in names {
        let path = dir.join(&name);
        let bytes =
            fs::read(&path).with_context(|| format!("Failed to read resume: {}", path.display()))?;
        let resume = Resume::new(name, String::from_utf8_lossy(&bytes));
        if resume.emails.is_empty() {
            debug!("No email address found in {}", resume.text_file_name);
        }
        resumes.push(resume);
    }

    debug!("Found {} resume files in {}", resumes.len(), dir.display());
    Ok(resumes)
}

/// A canonical email shared by more than one résumé.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DuplicateEmail {
    /// The shared address.
    pub email: String,
    /// PDFs of the résumés that list it first.
    pub pdfs: Vec<String>,
}

/// Finds canonical emails used by more than one résumé, sorted by address.
pub fn duplicate_emails(resumes: &[Resume]) -> Vec<DuplicateEmail> {
    let mut by_email: BTreeMap<&str, Vec<String>> = BTreeMap::new();
    for resume in resumes {
        if let Some(email) = resume.canonical_email() {
            by_email
                .entry(email)
                .or_default()
                .push(resume.pdf_file_name.clone());
        }
    }

    by_email
        .into_iter()
        .filter(|(_, pdfs)| pdfs.len() > 1)
        .map(|(email, pdfs)| DuplicateEmail {
            email: email.to_string(),
            pdfs,
        })
        .collect()
}
