//! Invitation paragraph built from a résumé's strong matches.
//!
//! The best-fit project is the strong match with the fewest matched
//! keywords: a match on fewer, more specific keywords makes the headline.
//! Remaining matches are announced in "You may also be interested in..."
//! sentences, one per organization.

use std::collections::BTreeSet;

use serde::Serialize;

use super::text::{join_list, wrap_paragraphs, LINE_WIDTH};
use crate::catalog::{Catalog, Project};
use crate::matching::{ProjectMatch, ResumeMatches};

/// Shape of the invitation a résumé receives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InvitationKind {
    /// All strong matches belong to one organization.
    Strong,
    /// Strong matches span several organizations.
    Mixed,
    /// No strong match; only the generic message is sent.
    Weak,
}

impl InvitationKind {
    /// Chooses the invitation shape from a résumé's match profile.
    pub fn for_matches(matches: &ResumeMatches, catalog: &Catalog) -> Self {
        let mut names = matches
            .strong
            .iter()
            .map(|m| catalog.project(m.project).name.as_str());

        match names.next() {
            None => Self::Weak,
            Some(first) if names.all(|name| name == first) => Self::Strong,
            Some(_) => Self::Mixed,
        }
    }
}

/// Sorts strong matches by ascending keyword count, keeping catalog order on ties.
pub fn rank_matches(strong: &[ProjectMatch]) -> Vec<&ProjectMatch> {
    let mut ranked: Vec<&ProjectMatch> = strong.iter().collect();
    ranked.sort_by_key(|m| m.keywords.len());
    ranked
}

/// Matched keywords the applicant may see, in sorted order.
pub fn visible_keywords<'k>(project: &Project, keywords: &'k BTreeSet<String>) -> Vec<&'k str> {
    keywords
        .iter()
        .filter(|keyword| !project.is_suppressed(keyword))
        .map(String::as_str)
        .collect()
}

/// "You may also be interested in the <name> internship(s) to ..." without
/// the final period. Several descriptions are chained with
/// "or the internship to". Projects lacking a description contribute the
/// name only.
pub fn also_interested(name: &str, descriptions: &[&str]) -> String {
    match descriptions {
        [] => format!("You may also be interested in the {name} internship"),
        [only] => format!("You may also be interested in the {name} internship to {only}"),
        _ => format!(
            "You may also be interested in the {name} internships to {}",
            descriptions.join(" or the internship to ")
        ),
    }
}

/// Groups projects by organization in order of first appearance, so each
/// organization is announced once.
fn group_by_organization<'c>(
    catalog: &'c Catalog,
    matches: &[&ProjectMatch],
) -> Vec<(&'c str, Vec<&'c str>)> {
    let mut groups: Vec<(&str, Vec<&str>)> = Vec::new();
    for m in matches {
        let project = catalog.project(m.project);
        let index = match groups.iter().position(|(name, _)| *name == project.name) {
            Some(index) => index,
            None => {
                groups.push((project.name.as_str(), Vec::new()));
                groups.len() - 1
            }
        };
        if let Some(description) = project.description.as_deref() {
            groups[index].1.push(description);
        }
    }
    groups
}

/// Composes invitation paragraphs against a catalog.
pub struct InvitationComposer<'c> {
    catalog: &'c Catalog,
    program: String,
    width: usize,
}

impl<'c> InvitationComposer<'c> {
    /// Creates a composer naming `program` in the headline.
    pub fn new(catalog: &'c Catalog, program: impl Into<String>) -> Self {
        Self {
            catalog,
            program: program.into(),
            width: LINE_WIDTH,
        }
    }

    /// Overrides the wrap width.
    #[must_use]
    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    /// Headline sentence for the best-fit project, without the final period.
    pub fn headline(&self, project: &Project, keywords: &BTreeSet<String>) -> String {
        let mut sentence = format!(
            "Based on your resume, if you're eligible for {}, it looks like you might be a good fit for an internship with {}",
            self.program, project.name
        );
        if let Some(short) = &project.short {
            sentence.push_str(&format!(" ({short})"));
        }

        let Some(description) = &project.description else {
            return sentence;
        };
        sentence.push_str(&format!(" which is offering an internship to {description}"));

        let visible = visible_keywords(project, keywords);
        if !visible.is_empty() {
            sentence.push_str(" that involves working with ");
            sentence.push_str(&join_list(&visible, "and"));
        }

        sentence
    }

    /// Composes the wrapped invitation paragraph, or `None` for résumés
    /// that only get the generic message.
    pub fn compose(&self, kind: InvitationKind, matches: &ResumeMatches) -> Option<String> {
        if kind == InvitationKind::Weak {
            return None;
        }

        let ranked = rank_matches(&matches.strong);
        let (best, rest) = ranked.split_first()?;
        let best_project = self.catalog.project(best.project);

        let mut sentences = vec![self.headline(best_project, &best.keywords)];

        if !rest.is_empty() {
            match kind {
                InvitationKind::Strong => {
                    let descriptions: Vec<&str> = rest
                        .iter()
                        .filter_map(|m| self.catalog.project(m.project).description.as_deref())
                        .collect();
                    sentences.push(also_interested(&best_project.name, &descriptions));
                }
                InvitationKind::Mixed => {
                    for (name, descriptions) in group_by_organization(self.catalog, rest) {
                        sentences.push(also_interested(name, &descriptions));
                    }
                }
                InvitationKind::Weak => {}
            }
        }

        let paragraph = sentences
            .iter()
            .map(|sentence| format!("{sentence}."))
            .collect::<Vec<_>>()
            .join(" ");

        Some(wrap_paragraphs(&paragraph, self.width))
    }
}
