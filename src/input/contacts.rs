//! People who stopped by the booth, read from a CSV export.

use std::collections::BTreeSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use super::resume::Resume;

/// Column holding the visitor's address.
const EMAIL_COLUMN: &str = "Email";

#[derive(Debug, Deserialize)]
struct ContactRow {
    #[serde(rename = "Email")]
    email: String,
}

/// Parses booth contact emails from CSV. The `Email` column is required.
pub fn parse_booth_emails<R: Read>(reader: R) -> Result<Vec<String>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = csv_reader
        .headers()
        .context("Failed to read contact list header")?;
    if !headers.iter().any(|header| header == EMAIL_COLUMN) {
        anyhow::bail!("Contact list has no '{EMAIL_COLUMN}' column");
    }

    let mut emails = Vec::new();
    for (index, record) in csv_reader.deserialize::<ContactRow>().enumerate() {
        let row = record.with_context(|| format!("Invalid contact list row {}", index + 1))?;
        if !row.email.is_empty() {
            emails.push(row.email);
        }
    }

    Ok(emails)
}

/// Reads booth contact emails from a CSV file.
pub fn read_booth_emails<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("Failed to open contact list: {}", path.display()))?;
    parse_booth_emails(file)
        .with_context(|| format!("Failed to parse contact list: {}", path.display()))
}

/// A booth visitor whose address appears in at least one résumé.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoothContact {
    /// Address from the contact list.
    pub email: String,
    /// PDFs of the résumés that mention it.
    pub pdfs: Vec<String>,
}

/// Pairs contact emails with the résumés that mention them. Contacts
/// without a résumé are dropped.
pub fn find_booth_contacts(emails: &[String], resumes: &[Resume]) -> Vec<BoothContact> {
    emails
        .iter()
        .filter_map(|email| {
            let pdfs: BTreeSet<&str> = resumes
                .iter()
                .filter(|resume| resume.emails.iter().any(|e| e.eq_ignore_ascii_case(email)))
                .map(|resume| resume.pdf_file_name.as_str())
                .collect();
            if pdfs.is_empty() {
                return None;
            }
            Some(BoothContact {
                email: email.clone(),
                pdfs: pdfs.into_iter().map(str::to_string).collect(),
            })
        })
        .collect()
}

/// PDFs of résumés owned by booth visitors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoothList {
    pdfs: BTreeSet<String>,
}

impl BoothList {
    /// Collects the PDFs of every contact.
    pub fn from_contacts<'a, I>(contacts: I) -> Self
    where
        I: IntoIterator<Item = &'a BoothContact>,
    {
        Self {
            pdfs: contacts
                .into_iter()
                .flat_map(|contact| contact.pdfs.iter().cloned())
                .collect(),
        }
    }

    /// True when the résumé's owner stopped by the booth.
    pub fn contains(&self, pdf_file_name: &str) -> bool {
        self.pdfs.contains(pdf_file_name)
    }

    /// All booth PDFs, sorted.
    pub fn pdfs(&self) -> impl Iterator<Item = &str> {
        self.pdfs.iter().map(String::as_str)
    }

    /// Number of booth PDFs.
    pub fn len(&self) -> usize {
        self.pdfs.len()
    }

    /// True when nobody on the list has a résumé.
    pub fn is_empty(&self) -> bool {
        self.pdfs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_email_column() {
        let csv = "Name,Email\nAda, ada@example.com \nGrace,\n\"Hopper, G\",grace@example.com\n";
        let emails = parse_booth_emails(csv.as_bytes()).unwrap();
        assert_eq!(emails, vec!["ada@example.com", "grace@example.com"]);
    }

    #[test]
    fn missing_email_column_is_an_error() {
        let csv = "Name,Address\nAda,ada@example.com\n";
        let err = parse_booth_emails(csv.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("Email"));
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(read_booth_emails(dir.path().join("booth.csv")).is_err());
    }

    #[test]
    fn contacts_resolve_to_resume_pdfs() {
        let resumes = vec![
            Resume::new("ada.txt", "Ada@Example.com"),
            Resume::new("ada-v2.txt", "ada@example.com"),
            Resume::new("bob.txt", "bob@example.com"),
        ];
        let emails = vec!["ada@example.com".to_string(), "zed@example.com".to_string()];

        let contacts = find_booth_contacts(&emails, &resumes);
        assert_eq!(
            contacts,
            vec![BoothContact {
                email: "ada@example.com".to_string(),
                pdfs: vec!["ada-v2.pdf".to_string(), "ada.pdf".to_string()],
            }]
        );

        let booth = BoothList::from_contacts(&contacts);
        assert!(booth.contains("ada.pdf"));
        assert!(!booth.contains("bob.pdf"));
        assert_eq!(booth.len(), 2);
    }
}
