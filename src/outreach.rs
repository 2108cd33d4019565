//! Batch outreach: classify a résumé directory and write email drafts.

pub mod plan;
pub mod report;
pub mod run;

pub use plan::{organization_slug, Destination};
pub use report::{OutputFormat, RunReport};
pub use run::{DraftOptions, OutreachRun};
