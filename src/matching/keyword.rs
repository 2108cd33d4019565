//! Whole-word, case-insensitive keyword search.
//!
//! Every catalog term is compiled once into a [`TermPattern`]. A match only
//! counts when it is not glued to neighbouring token characters, which keeps
//! `linux` from matching inside `linuxy` and `C` from matching inside `C++`.

use std::collections::BTreeSet;

use anyhow::{Context, Result};
use regex::{Regex, RegexBuilder};

use crate::catalog::{Catalog, Criterion, ProjectId};

/// Characters that extend a token. `+` and `#` are included so that language
/// names such as `C++` and `C#` are distinct tokens from `C`.
fn is_token_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '_' | '+' | '#')
}

/// Returns true when `text[start..end]` is not adjacent to a token character.
fn is_bounded(text: &str, start: usize, end: usize) -> bool {
    let before = text[..start].chars().next_back();
    let after = text[end..].chars().next();
    !before.is_some_and(is_token_char) && !after.is_some_and(is_token_char)
}

/// Byte index just past the character at `index`; past the end of `text`
/// when `index` is the end.
fn next_char_boundary(text: &str, index: usize) -> usize {
    text[index..]
        .chars()
        .next()
        .map_or(text.len() + 1, |c| index + c.len_utf8())
}

/// Lowercases a matched occurrence and collapses inner whitespace.
pub fn normalize_keyword(occurrence: &str) -> String {
    occurrence
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// A single compiled catalog term.
#[derive(Debug, Clone)]
pub struct TermPattern {
    regex: Regex,
}

impl TermPattern {
    /// Compiles a literal term. Whitespace inside the term matches any run
    /// of whitespace, since PDF-to-text conversion breaks lines arbitrarily.
    pub fn compile(term: &str) -> Result<Self, regex::Error> {
        let pattern = term
            .split_whitespace()
            .map(regex::escape)
            .collect::<Vec<_>>()
            .join(r"\s+");

        let regex = RegexBuilder::new(&pattern)
            .case_insensitive(true)
            .build()?;

        Ok(Self { regex })
    }

    /// Iterates the bounded occurrences of this term in `text`. After a
    /// glued match the search resumes one character later, so an overlapping
    /// bounded occurrence is still found.
    pub fn occurrences<'t>(&'t self, text: &'t str) -> impl Iterator<Item = &'t str> + 't {
        let mut start = 0;
        std::iter::from_fn(move || {
            while start <= text.len() {
                let m = self.regex.find_at(text, start)?;
                let retry = next_char_boundary(text, m.start());
                if is_bounded(text, m.start(), m.end()) {
                    start = m.end().max(retry);
                    return Some(m.as_str());
                }
                start = retry;
            }
            None
        })
    }
}

/// Compiled alternation of terms for one criterion.
#[derive(Debug, Clone)]
struct CriterionPattern {
    terms: Vec<TermPattern>,
}

impl CriterionPattern {
    fn compile(criterion: &Criterion) -> Result<Self, regex::Error> {
        let terms = criterion
            .terms()
            .iter()
            .map(|term| TermPattern::compile(term))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { terms })
    }

    fn matched_keywords(&self, text: &str) -> BTreeSet<String> {
        self.terms
            .iter()
            .flat_map(|term| term.occurrences(text))
            .map(normalize_keyword)
            .collect()
    }
}

/// Per-criterion result of matching one text against one project.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CriteriaMatch {
    /// Keywords found for each criterion, in criterion order.
    pub per_criterion: Vec<BTreeSet<String>>,
}

impl CriteriaMatch {
    /// Every criterion found at least one keyword. A project without
    /// criteria is never fully satisfied.
    pub fn all_satisfied(&self) -> bool {
        !self.per_criterion.is_empty() && self.per_criterion.iter().all(|set| !set.is_empty())
    }

    /// At least one criterion found a keyword.
    pub fn any_satisfied(&self) -> bool {
        self.per_criterion.iter().any(|set| !set.is_empty())
    }

    /// Union of all matched keywords.
    pub fn keywords(&self) -> BTreeSet<String> {
        self.per_criterion.iter().flatten().cloned().collect()
    }
}

/// Keyword patterns for every project of a catalog.
#[derive(Debug, Clone)]
pub struct KeywordMatcher {
    projects: Vec<Vec<CriterionPattern>>,
}

impl KeywordMatcher {
    /// Compiles every term of the catalog.
    pub fn new(catalog: &Catalog) -> Result<Self> {
        let projects = catalog
            .iter()
            .map(|(_, project)| {
                project
                    .keywords
                    .iter()
                    .map(CriterionPattern::compile)
                    .collect::<Result<Vec<_>, _>>()
                    .with_context(|| {
                        format!("Failed to compile keywords for project '{}'", project.name)
                    })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { projects })
    }

    /// Evaluates every criterion of `project` against `text`.
    pub fn match_project(&self, project: ProjectId, text: &str) -> CriteriaMatch {
        CriteriaMatch {
            per_criterion: self.projects[project.0]
                .iter()
                .map(|criterion| criterion.matched_keywords(text))
                .collect(),
        }
    }
}
