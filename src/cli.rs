//! CLI interface for resume-matcher.

use anyhow::Result;
use clap::{Parser, Subcommand};

pub mod catalog;
pub mod draft;

/// resume-matcher: matches résumés to internship projects and drafts invitations.
#[derive(Parser)]
#[command(name = "resume-matcher")]
#[command(
    about = "Matches résumés to internship projects and drafts invitation emails",
    long_about = None
)]
#[command(version)]
pub struct Cli {
    /// The main command to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Main command categories.
#[derive(Subcommand)]
pub enum Commands {
    /// Classifies a résumé directory and writes email drafts.
    Draft(draft::DraftCommand),
    /// Project catalog inspection.
    Catalog(catalog::CatalogCommand),
}

impl Cli {
    /// Executes the CLI command.
    pub fn execute(self) -> Result<()> {
        match self.command {
            Commands::Draft(draft_cmd) => draft_cmd.execute(),
            Commands::Catalog(catalog_cmd) => catalog_cmd.execute(),
        }
    }
}
