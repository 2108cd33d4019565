//! Draft command.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::debug;

use crate::catalog::Catalog;
use crate::email::EmailTemplate;
use crate::outreach::{DraftOptions, OutputFormat, OutreachRun};
use crate::utils::settings::{Settings, CATALOG_VAR, TEMPLATE_VAR};

/// Classifies every résumé in a directory and writes email drafts.
#[derive(Parser)]
pub struct DraftCommand {
    /// Directory of text résumés and their PDFs.
    pub dir: PathBuf,

    /// Booth contact CSV with an `Email` column.
    #[arg(long, value_name = "FILE")]
    pub csv: Option<PathBuf>,

    /// Directory of résumés already emailed; their owners are skipped.
    #[arg(long, value_name = "DIR")]
    pub done: Option<PathBuf>,

    /// Directory of résumés whose owners may not be U.S. residents.
    #[arg(long, value_name = "DIR")]
    pub notus: Option<PathBuf>,

    /// Project catalog YAML replacing the embedded one.
    #[arg(long, value_name = "FILE")]
    pub catalog: Option<PathBuf>,

    /// Email template YAML replacing the embedded one.
    #[arg(long, value_name = "FILE")]
    pub template: Option<PathBuf>,

    /// Writes generic emails for every résumé instead of invitations.
    #[arg(long)]
    pub generic: bool,

    /// Report format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

impl DraftCommand {
    /// Executes the draft command.
    pub fn execute(self) -> Result<()> {
        let settings = Settings::load()?;
        let catalog_path = settings.resolve_path(self.catalog, CATALOG_VAR);
        let template_path = settings.resolve_path(self.template, TEMPLATE_VAR);
        debug!(
            catalog = ?catalog_path,
            template = ?template_path,
            "Resolved configuration files"
        );

        let catalog = Catalog::load(catalog_path.as_deref())?;
        let template = EmailTemplate::load(template_path.as_deref())?;

        let options = DraftOptions {
            dir: self.dir,
            csv: self.csv,
            done: self.done,
            notus: self.notus,
            generic: self.generic,
        };
        let report = OutreachRun::new(&catalog, &template).execute(&options)?;

        print!("{}", report.render(self.format)?);
        Ok(())
    }
}
