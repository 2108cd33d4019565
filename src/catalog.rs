//! Internship project catalog.
//!
//! The catalog is loaded from embedded YAML (or a user-supplied file) and is
//! immutable for the rest of the run. Projects are addressed by their
//! position in the catalog through [`ProjectId`].

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Embedded default catalog.
pub const PROJECTS_YAML: &str = include_str!("templates/projects.yaml");

/// Catalog validation errors.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum CatalogError {
    /// Catalog contains no projects at all.
    #[error("Project catalog is empty")]
    Empty,

    /// Project has a blank organization name.
    #[error("Project at index {index} has an empty name")]
    EmptyName {
        /// Position of the project in the catalog.
        index: usize,
    },

    /// Criterion has no terms.
    #[error("Project '{project}' has an empty keyword criterion at position {criterion}")]
    EmptyCriterion {
        /// Organization name of the offending project.
        project: String,
        /// Position of the criterion within the project.
        criterion: usize,
    },

    /// Criterion contains a blank term, which would match everywhere.
    #[error("Project '{project}' has a blank keyword term in criterion {criterion}")]
    BlankTerm {
        /// Organization name of the offending project.
        project: String,
        /// Position of the criterion within the project.
        criterion: usize,
    },
}

/// Index of a project within its catalog. Only [`Catalog::iter`] hands
/// these out:
///
/// ```compile_fail
/// let id = resume_matcher::catalog::ProjectId(0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ProjectId(pub(crate) usize);

/// One required slot of a project's keyword rule: any of its terms satisfies it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(from = "CriterionRepr", into = "Vec<String>")]
pub struct Criterion {
    terms: Vec<String>,
}

/// Accepted YAML shapes for a criterion: `"a|b"` or `["a", "b"]`.
#[derive(Deserialize)]
#[serde(untagged)]
enum CriterionRepr {
    Alternation(String),
    Terms(Vec<String>),
}

impl From<CriterionRepr> for Criterion {
    fn from(repr: CriterionRepr) -> Self {
        match repr {
            CriterionRepr::Alternation(alternation) => Self::parse(&alternation),
            CriterionRepr::Terms(terms) => Self::new(terms),
        }
    }
}

impl From<Criterion> for Vec<String> {
    fn from(criterion: Criterion) -> Self {
        criterion.terms
    }
}

impl Criterion {
    /// Creates a criterion from individual terms.
    pub fn new<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            terms: terms.into_iter().map(Into::into).collect(),
        }
    }

    /// Parses a `|`-separated alternation such as `"shell|bash|command-line"`.
    pub fn parse(alternation: &str) -> Self {
        Self::new(alternation.split('|').map(str::trim))
    }

    /// Alternative terms, in declaration order.
    pub fn terms(&self) -> &[String] {
        &self.terms
    }
}

/// A single internship offered by an organization.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Project {
    /// Organization name; several projects may share it.
    pub name: String,
    /// Short clause about the organization, shown on first mention.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short: Option<String>,
    /// What the intern would do. Without it the project is mentioned by name only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Ordered keyword criteria.
    #[serde(default)]
    pub keywords: Vec<Criterion>,
    /// Terms that may drive matching but are never shown to the applicant.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub printskip: Vec<String>,
}

impl Project {
    /// Creates a project whose criteria are given as `|`-separated alternations.
    pub fn new(name: impl Into<String>, criteria: &[&str]) -> Self {
        Self {
            name: name.into(),
            short: None,
            description: None,
            keywords: criteria.iter().map(|c| Criterion::parse(c)).collect(),
            printskip: Vec::new(),
        }
    }

    /// Sets the short organization clause.
    #[must_use]
    pub fn with_short(mut self, short: impl Into<String>) -> Self {
        self.short = Some(short.into());
        self
    }

    /// Sets the internship description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the suppressed keyword list.
    #[must_use]
    pub fn with_printskip(mut self, printskip: &[&str]) -> Self {
        self.printskip = printskip.iter().map(|s| (*s).to_string()).collect();
        self
    }

    /// Returns true when `keyword` must not be shown to the applicant.
    pub fn is_suppressed(&self, keyword: &str) -> bool {
        let keyword = keyword.to_lowercase();
        self.printskip
            .iter()
            .any(|skip| skip.to_lowercase() == keyword)
    }

    fn validate(&self, index: usize) -> Result<(), CatalogError> {
        if self.name.trim().is_empty() {
            return Err(CatalogError::EmptyName { index });
        }

        for (criterion_index, criterion) in self.keywords.iter().enumerate() {
            if criterion.terms.is_empty() {
                return Err(CatalogError::EmptyCriterion {
                    project: self.name.clone(),
                    criterion: criterion_index,
                });
            }
            if criterion.terms.iter().any(|term| term.trim().is_empty()) {
                return Err(CatalogError::BlankTerm {
                    project: self.name.clone(),
                    criterion: criterion_index,
                });
            }
        }

        Ok(())
    }
}

/// On-disk catalog layout.
#[derive(Debug, Deserialize, Serialize)]
struct CatalogFile {
    projects: Vec<Project>,
}

/// Ordered, validated list of projects.
#[derive(Debug, Clone)]
pub struct Catalog {
    projects: Vec<Project>,
}

impl Catalog {
    /// Builds a catalog after validating every project.
    pub fn new(projects: Vec<Project>) -> Result<Self, CatalogError> {
        if projects.is_empty() {
            return Err(CatalogError::Empty);
        }
        for (index, project) in projects.iter().enumerate() {
            project.validate(index)?;
        }
        Ok(Self { projects })
    }

    /// Loads the catalog compiled into the binary.
    pub fn embedded() -> Result<Self> {
        Self::from_yaml(PROJECTS_YAML).context("Failed to load embedded project catalog")
    }

    /// Parses and validates a catalog from YAML text.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let file: CatalogFile =
            serde_yaml::from_str(yaml).context("Failed to parse project catalog YAML")?;
        Ok(Self::new(file.projects)?)
    }

    /// Loads a catalog from a YAML file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).with_context(|| {
            format!("Failed to read project catalog: {}", path.as_ref().display())
        })?;

        Self::from_yaml(&content)
            .with_context(|| format!("Invalid project catalog: {}", path.as_ref().display()))
    }

    /// Loads `path` when given, the embedded catalog otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from_file(path),
            None => Self::embedded(),
        }
    }

    /// Returns the project with the given id.
    ///
    /// Ids are only produced by [`Catalog::iter`], so lookups with an id
    /// from this catalog cannot miss.
    pub fn project(&self, id: ProjectId) -> &Project {
        &self.projects[id.0]
    }

    /// Iterates projects in catalog order together with their ids.
    pub fn iter(&self) -> impl Iterator<Item = (ProjectId, &Project)> {
        self.projects
            .iter()
            .enumerate()
            .map(|(index, project)| (ProjectId(index), project))
    }

    /// Number of projects.
    pub fn len(&self) -> usize {
        self.projects.len()
    }

    /// Always false for a validated catalog; provided for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    /// Distinct organization names in order of first appearance, with project counts.
    pub fn organizations(&self) -> Vec<(&str, usize)> {
        let mut organizations: Vec<(&str, usize)> = Vec::new();
        for project in &self.projects {
            match organizations
                .iter_mut()
                .find(|(name, _)| *name == project.name)
            {
                Some((_, count)) => *count += 1,
                None => organizations.push((project.name.as_str(), 1)),
            }
        }
        organizations
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_catalog_loads() {
        let catalog = Catalog::embedded().unwrap();
        assert!(catalog.len() > 40);

        let (_, first) = catalog.iter().next().unwrap();
        assert_eq!(first.name, "Cadasta");
        assert_eq!(first.short.as_deref(), Some("a property rights tool"));
    }

    #[test]
    fn alternation_criteria_are_split() {
        let catalog = Catalog::embedded().unwrap();
        let debian = catalog
            .iter()
            .map(|(_, p)| p)
            .find(|p| p.description.as_deref() == Some("improve the Debian test database and website"))
            .unwrap();

        assert_eq!(debian.keywords.len(), 4);
        assert_eq!(
            debian.keywords[3].terms(),
            &["shell".to_string(), "bash".to_string(), "command-line".to_string()]
        );
    }

    #[test]
    fn criterion_accepts_list_form() {
        let yaml = r#"
projects:
  - name: Example
    keywords:
      - ["rust", "go"]
      - "linux"
"#;
        let catalog = Catalog::from_yaml(yaml).unwrap();
        let project = catalog.project(ProjectId(0));
        assert_eq!(project.keywords[0].terms(), &["rust".to_string(), "go".to_string()]);
        assert_eq!(project.keywords[1].terms(), &["linux".to_string()]);
        assert!(project.description.is_none());
        assert!(project.printskip.is_empty());
    }

    #[test]
    fn project_without_description_is_allowed() {
        let catalog = Catalog::embedded().unwrap();
        let mozilla = catalog
            .iter()
            .map(|(_, p)| p)
            .find(|p| p.name == "Mozilla")
            .unwrap();
        assert!(mozilla.description.is_none());
    }

    #[test]
    fn suppression_is_case_insensitive() {
        let project = Project::new("Ceph", &["linux"]).with_printskip(&["Linux"]);
        assert!(project.is_suppressed("linux"));
        assert!(project.is_suppressed("LINUX"));
        assert!(!project.is_suppressed("python"));
    }

    #[test]
    fn empty_catalog_is_rejected() {
        assert_eq!(Catalog::new(Vec::new()).unwrap_err(), CatalogError::Empty);
    }

    #[test]
    fn blank_name_is_rejected() {
        let err = Catalog::new(vec![Project::new("  ", &["rust"])]).unwrap_err();
        assert_eq!(err, CatalogError::EmptyName { index: 0 });
    }

    #[test]
    fn blank_term_is_rejected() {
        let err = Catalog::new(vec![Project::new("Xen", &["c|"])]).unwrap_err();
        assert_eq!(
            err,
            CatalogError::BlankTerm {
                project: "Xen".to_string(),
                criterion: 0
            }
        );
    }

    #[test]
    fn empty_criterion_is_rejected() {
        let mut project = Project::new("Xen", &[]);
        project.keywords.push(Criterion::new(Vec::<String>::new()));
        let err = Catalog::new(vec![project]).unwrap_err();
        assert_eq!(
            err,
            CatalogError::EmptyCriterion {
                project: "Xen".to_string(),
                criterion: 0
            }
        );
    }

    #[test]
    fn project_with_no_criteria_is_valid() {
        let catalog = Catalog::new(vec![Project::new("Empty", &[])]).unwrap();
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn organizations_are_counted_in_order() {
        let catalog = Catalog::new(vec![
            Project::new("Wine", &["c"]),
            Project::new("QEMU", &["c"]),
            Project::new("Wine", &["opengl"]),
        ])
        .unwrap();
        assert_eq!(catalog.organizations(), vec![("Wine", 2), ("QEMU", 1)]);
    }

    #[test]
    fn load_from_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let result = Catalog::load_from_file(dir.path().join("missing.yaml"));
        assert!(result.is_err());
    }
}
