//! Drafting run over one résumé directory.

use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use super::plan::{Destination, GENERIC_DIR};
use super::report::{AlreadyContacted, BoothSummary, DirectoryCount, KeywordHits, RunReport};
use crate::catalog::Catalog;
use crate::compose::InvitationComposer;
use crate::email::EmailTemplate;
use crate::input::{
    duplicate_emails, find_booth_contacts, read_booth_emails, read_resume_dir, BoothContact,
    BoothList, Resume,
};
use crate::matching::{Classification, Classifier};

/// Number of keywords listed in the weak-match summary.
const TOP_WEAK_KEYWORDS: usize = 10;

/// Inputs of a drafting run.
#[derive(Debug, Clone, Default)]
pub struct DraftOptions {
    /// Directory of text résumés and their PDFs.
    pub dir: PathBuf,
    /// Booth contact CSV.
    pub csv: Option<PathBuf>,
    /// Résumés already emailed in an earlier batch.
    pub done: Option<PathBuf>,
    /// Résumés whose owners may not be U.S. residents.
    pub notus: Option<PathBuf>,
    /// Write generic emails instead of invitations.
    pub generic: bool,
}

/// Classifies a résumé directory and writes email drafts next to it.
pub struct OutreachRun<'a> {
    catalog: &'a Catalog,
    template: &'a EmailTemplate,
}

impl<'a> OutreachRun<'a> {
    /// Creates a run over `catalog` using `template` for the boilerplate.
    pub fn new(catalog: &'a Catalog, template: &'a EmailTemplate) -> Self {
        Self { catalog, template }
    }

    /// Executes the run and returns its report.
    pub fn execute(&self, options: &DraftOptions) -> Result<RunReport> {
        let resumes = read_resume_dir(&options.dir)?;
        info!(
            "Read {} resumes from {}",
            resumes.len(),
            options.dir.display()
        );

        let duplicates = duplicate_emails(&resumes);
        for duplicate in &duplicates {
            warn!(
                "Email {} appears in {}",
                duplicate.email,
                duplicate.pdfs.join(", ")
            );
        }

        let done = read_optional_dir(options.done.as_deref())?;
        let notus = read_optional_dir(options.notus.as_deref())?;
        let already_contacted = already_contacted(&resumes, &done);

        let mut report = RunReport {
            resumes: resumes.len(),
            duplicate_emails: duplicates,
            already_contacted,
            ..RunReport::default()
        };

        if options.generic {
            report.generic_emails = Some(self.write_generic(&options.dir, &resumes)?);
            return Ok(report);
        }

        let booth = match &options.csv {
            Some(csv) => {
                let emails = read_booth_emails(csv)?;
                debug!("Read {} booth contacts from {}", emails.len(), csv.display());
                let mut contacts = find_booth_contacts(&emails, &resumes);
                contacts.extend(find_booth_contacts(&emails, &done));
                contacts.extend(find_booth_contacts(&emails, &notus));
                contacts
            }
            None => Vec::new(),
        };
        let booth_list = BoothList::from_contacts(&booth);

        let classifier = Classifier::new(self.catalog)?;
        let classification = classifier.classify(&resumes);

        let contacted: HashSet<String> = report
            .already_contacted
            .iter()
            .flat_map(|entry| entry.pdfs.iter().cloned())
            .collect();

        let composer = InvitationComposer::new(self.catalog, self.template.program.as_str());
        let generic_dir = options.dir.join(GENERIC_DIR);
        let mut counts: BTreeMap<String, usize> = BTreeMap::new();
        for (id, matches) in classification.resumes() {
            let resume = &resumes[id.0];
            if contacted.contains(&resume.pdf_file_name) {
                debug!("Skipping {}, already contacted", resume.pdf_file_name);
                continue;
            }
            let Some(destination) = Destination::for_matches(matches, self.catalog) else {
                let email = self.template.generic(resume.canonical_email());
                write_email(&generic_dir, &resume.email_file_name(), &email)?;
                *counts.entry(GENERIC_DIR.to_string()).or_default() += 1;
                continue;
            };

            let dir_name = destination.dir_name();
            let target = options.dir.join(&dir_name);
            if !copy_pdf(&options.dir, &target, &resume.pdf_file_name)? {
                warn!("Could not find pdf file for {}", resume.text_file_name);
                report.missing_pdfs.push(resume.text_file_name.clone());
                continue;
            }

            let Some(invitation) = composer.compose(destination.invitation_kind(), matches) else {
                continue;
            };
            let at_booth = booth_list.contains(&resume.pdf_file_name);
            let email = self
                .template
                .assemble(&resume.emails, at_booth, &invitation);
            write_email(&target, &resume.email_file_name(), &email)?;
            *counts.entry(dir_name).or_default() += 1;
        }

        report.drafts = counts
            .into_iter()
            .map(|(directory, drafts)| DirectoryCount { directory, drafts })
            .collect();
        report.booth = booth_summary(booth, &booth_list, &resumes, &classification, &done, &notus);
        let (weak_only, top_weak_keywords) = weak_keyword_hits(&classification);
        report.weak_only = weak_only;
        report.top_weak_keywords = top_weak_keywords;

        info!("Wrote {} drafts", report.total_drafts());
        Ok(report)
    }

    fn write_generic(&self, dir: &Path, resumes: &[Resume]) -> Result<usize> {
        let target = dir.join(GENERIC_DIR);
        for resume in resumes {
            let email = self.template.generic(resume.canonical_email());
            write_email(&target, &resume.email_file_name(), &email)?;
        }
        info!("Wrote {} generic emails", resumes.len());
        Ok(resumes.len())
    }
}

fn read_optional_dir(dir: Option<&Path>) -> Result<Vec<Resume>> {
    match dir {
        Some(dir) => read_resume_dir(dir),
        None => Ok(Vec::new()),
    }
}

/// Current résumés whose canonical email belongs to an already-contacted
/// résumé, sorted by address.
fn already_contacted(resumes: &[Resume], done: &[Resume]) -> Vec<AlreadyContacted> {
    let mut done_pdfs: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for resume in done {
        if let Some(email) = resume.canonical_email() {
            done_pdfs
                .entry(email.to_ascii_lowercase())
                .or_default()
                .push(resume.pdf_file_name.clone());
        }
    }

    let mut current: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for resume in resumes {
        let Some(email) = resume.canonical_email() else {
            continue;
        };
        let key = email.to_ascii_lowercase();
        if done_pdfs.contains_key(&key) {
            current
                .entry(key)
                .or_default()
                .push(resume.pdf_file_name.clone());
        }
    }

    current
        .into_iter()
        .map(|(email, pdfs)| {
            let done_pdfs = done_pdfs.remove(&email).unwrap_or_default();
            AlreadyContacted {
                email,
                pdfs,
                done_pdfs,
            }
        })
        .collect()
}

/// Copies `pdf` from `source` into `target`. Returns false when the source
/// PDF does not exist; an existing copy is left alone.
fn copy_pdf(source: &Path, target: &Path, pdf: &str) -> Result<bool> {
    let destination = target.join(pdf);
    if destination.exists() {
        return Ok(true);
    }
    let origin = source.join(pdf);
    if !origin.is_file() {
        return Ok(false);
    }
    fs::create_dir_all(target)
        .with_context(|| format!("Failed to create directory: {}", target.display()))?;
    fs::copy(&origin, &destination).with_context(|| {
        format!(
            "Failed to copy {} to {}",
            origin.display(),
            destination.display()
        )
    })?;
    Ok(true)
}

fn write_email(target: &Path, file_name: &str, email: &str) -> Result<()> {
    fs::create_dir_all(target)
        .with_context(|| format!("Failed to create directory: {}", target.display()))?;
    let path = target.join(file_name);
    fs::write(&path, email).with_context(|| format!("Failed to write email: {}", path.display()))?;
    debug!("Wrote {}", path.display());
    Ok(())
}

fn booth_summary(
    contacts: Vec<BoothContact>,
    booth_list: &BoothList,
    resumes: &[Resume],
    classification: &Classification,
    done: &[Resume],
    notus: &[Resume],
) -> BoothSummary {
    let needing_email = classification
        .resumes()
        .filter(|(id, matches)| {
            !matches.strong.is_empty() && booth_list.contains(&resumes[id.0].pdf_file_name)
        })
        .count();
    let count_in = |group: &[Resume]| {
        group
            .iter()
            .filter(|resume| booth_list.contains(&resume.pdf_file_name))
            .count()
    };

    BoothSummary {
        already_contacted: count_in(done),
        not_us: count_in(notus),
        needing_email,
        contacts,
    }
}

/// Counts, for résumés with no strong match, how many mention each weak
/// keyword. Returns the number of such résumés and the most common keywords.
fn weak_keyword_hits(classification: &Classification) -> (usize, Vec<KeywordHits>) {
    let mut weak_only = 0;
    let mut hits: BTreeMap<String, usize> = BTreeMap::new();
    for (_, matches) in classification.resumes() {
        if !matches.strong.is_empty() || matches.weak.is_empty() {
            continue;
        }
        weak_only += 1;
        let keywords: BTreeSet<&String> =
            matches.weak.iter().flat_map(|m| m.keywords.iter()).collect();
        for keyword in keywords {
            *hits.entry(keyword.clone()).or_default() += 1;
        }
    }

    let mut ranked: Vec<KeywordHits> = hits
        .into_iter()
        .map(|(keyword, resumes)| KeywordHits { keyword, resumes })
        .collect();
    ranked.sort_by(|a, b| b.resumes.cmp(&a.resumes).then_with(|| a.keyword.cmp(&b.keyword)));
    ranked.truncate(TOP_WEAK_KEYWORDS);
    (weak_only, ranked)
}
