//! # resume-matcher
//!
//! Matches résumés against a catalog of internship projects and drafts
//! invitation emails.
//!
//! ## Quick Start
//!
//! ```rust
//! use resume_matcher::catalog::Catalog;
//! use resume_matcher::matching::Classifier;
//!
//! let catalog = Catalog::embedded().unwrap();
//! let classifier = Classifier::new(&catalog).unwrap();
//! let matches = classifier.classify_text("Linux, Python and distributed systems");
//! assert!(!matches.strong.is_empty());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod catalog;
pub mod cli;
pub mod compose;
pub mod email;
pub mod input;
pub mod matching;
pub mod outreach;
pub mod utils;

pub use crate::cli::Cli;

/// The current version of resume-matcher.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
