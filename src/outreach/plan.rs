//! Where each résumé's draft is filed.

use crate::catalog::Catalog;
use crate::compose::InvitationKind;
use crate::matching::ResumeMatches;

/// Directory shared by résumés that strong-match several organizations.
pub const MIXED_DIR: &str = "mixed";

/// Directory for generic emails.
pub const GENERIC_DIR: &str = "generic-todo";

/// Lowercases an organization name and joins its words with hyphens.
pub fn organization_slug(name: &str) -> String {
    name.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
}

/// Output bucket of a résumé with at least one strong match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    /// Every strong match belongs to this organization.
    Organization(String),
    /// Strong matches span several organizations.
    Mixed,
}

impl Destination {
    /// Picks the bucket for a résumé; `None` when it has no strong match.
    pub fn for_matches(matches: &ResumeMatches, catalog: &Catalog) -> Option<Self> {
        match InvitationKind::for_matches(matches, catalog) {
            InvitationKind::Strong => matches
                .strong
                .first()
                .map(|m| Self::Organization(catalog.project(m.project).name.clone())),
            InvitationKind::Mixed => Some(Self::Mixed),
            InvitationKind::Weak => None,
        }
    }

    /// Invitation shape used for drafts filed here.
    pub fn invitation_kind(&self) -> InvitationKind {
        match self {
            Self::Organization(_) => InvitationKind::Strong,
            Self::Mixed => InvitationKind::Mixed,
        }
    }

    /// Directory name relative to the résumé directory.
    pub fn dir_name(&self) -> String {
        match self {
            Self::Organization(name) => format!("emails-{}", organization_slug(name)),
            Self::Mixed => MIXED_DIR.to_string(),
        }
    }
}
