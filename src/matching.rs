//! Keyword matching and résumé/project classification.

pub mod classifier;
pub mod keyword;

pub use classifier::{
    Classification, Classifier, MatchStrength, ProjectMatch, ProjectMatches, ResumeMatches,
};
pub use keyword::{CriteriaMatch, KeywordMatcher};
