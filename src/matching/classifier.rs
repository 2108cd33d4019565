//! Strong/weak classification of every résumé against every project.

use std::collections::BTreeSet;

use anyhow::Result;
use serde::Serialize;
use tracing::debug;

use super::keyword::KeywordMatcher;
use crate::catalog::{Catalog, ProjectId};
use crate::input::{Resume, ResumeId};

/// Outcome of a résumé/project pair that matched at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchStrength {
    /// Every criterion was satisfied.
    Strong,
    /// Some, but not all, criteria were satisfied.
    Weak,
}

/// A project matched by a résumé, with the keywords that were found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectMatch {
    /// Matched project.
    pub project: ProjectId,
    /// Union of matched keywords across all criteria, normalized and sorted.
    pub keywords: BTreeSet<String>,
}

/// Résumé-side match records, in catalog order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResumeMatches {
    /// Projects whose every criterion matched.
    pub strong: Vec<ProjectMatch>,
    /// Projects with at least one, but not every, criterion matched.
    pub weak: Vec<ProjectMatch>,
}

impl ResumeMatches {
    /// True when the résumé matched nothing.
    pub fn is_empty(&self) -> bool {
        self.strong.is_empty() && self.weak.is_empty()
    }

    /// Strength recorded for `project`, if any.
    pub fn strength_of(&self, project: ProjectId) -> Option<MatchStrength> {
        if self.strong.iter().any(|m| m.project == project) {
            Some(MatchStrength::Strong)
        } else if self.weak.iter().any(|m| m.project == project) {
            Some(MatchStrength::Weak)
        } else {
            None
        }
    }
}

/// Project-side match records, in résumé order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectMatches {
    /// Résumés that strong-matched the project.
    pub strong: Vec<ResumeId>,
    /// Résumés that weak-matched the project.
    pub weak: Vec<ResumeId>,
}

/// Result of classifying a batch of résumés.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    resumes: Vec<ResumeMatches>,
    projects: Vec<ProjectMatches>,
}

impl Classification {
    /// Match records of one résumé.
    pub fn for_resume(&self, id: ResumeId) -> &ResumeMatches {
        &self.resumes[id.0]
    }

    /// Match records of one project.
    pub fn for_project(&self, id: ProjectId) -> &ProjectMatches {
        &self.projects[id.0]
    }

    /// Iterates résumé records with their ids.
    pub fn resumes(&self) -> impl Iterator<Item = (ResumeId, &ResumeMatches)> {
        self.resumes
            .iter()
            .enumerate()
            .map(|(index, matches)| (ResumeId(index), matches))
    }

    /// Number of résumés with at least one strong match.
    pub fn strong_resume_count(&self) -> usize {
        self.resumes.iter().filter(|m| !m.strong.is_empty()).count()
    }
}

/// Runs the keyword matcher over every résumé/project pair.
pub struct Classifier<'c> {
    catalog: &'c Catalog,
    matcher: KeywordMatcher,
}

impl<'c> Classifier<'c> {
    /// Compiles the catalog's keyword patterns.
    pub fn new(catalog: &'c Catalog) -> Result<Self> {
        Ok(Self {
            catalog,
            matcher: KeywordMatcher::new(catalog)?,
        })
    }

    /// Classifies a single résumé/project pair.
    pub fn classify_pair(
        &self,
        project: ProjectId,
        text: &str,
    ) -> Option<(MatchStrength, BTreeSet<String>)> {
        let result = self.matcher.match_project(project, text);
        if result.all_satisfied() {
            Some((MatchStrength::Strong, result.keywords()))
        } else if result.any_satisfied() {
            Some((MatchStrength::Weak, result.keywords()))
        } else {
            None
        }
    }

    /// Classifies one text against the whole catalog.
    pub fn classify_text(&self, text: &str) -> ResumeMatches {
        let mut matches = ResumeMatches::default();
        for (project, _) in self.catalog.iter() {
            match self.classify_pair(project, text) {
                Some((MatchStrength::Strong, keywords)) => {
                    matches.strong.push(ProjectMatch { project, keywords });
                }
                Some((MatchStrength::Weak, keywords)) => {
                    matches.weak.push(ProjectMatch { project, keywords });
                }
                None => {}
            }
        }
        matches
    }

    /// Classifies every résumé, recording both résumé-side and project-side lists.
    pub fn classify(&self, resumes: &[Resume]) -> Classification {
        let mut projects = vec![ProjectMatches::default(); self.catalog.len()];
        let mut records = Vec::with_capacity(resumes.len());

        for (index, resume) in resumes.iter().enumerate() {
            let id = ResumeId(index);
            let matches = self.classify_text(&resume.text);

            for m in &matches.strong {
                projects[m.project.0].strong.push(id);
            }
            for m in &matches.weak {
                projects[m.project.0].weak.push(id);
            }

            debug!(
                resume = %resume.text_file_name,
                strong = matches.strong.len(),
                weak = matches.weak.len(),
                "Classified resume"
            );
            records.push(matches);
        }

        Classification {
            resumes: records,
            projects,
        }
    }
}
