//! Catalog-related CLI commands.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::catalog::{Catalog, PROJECTS_YAML};

/// Catalog operations.
#[derive(Parser)]
pub struct CatalogCommand {
    /// Catalog subcommand to execute.
    #[command(subcommand)]
    pub command: CatalogSubcommands,
}

/// Catalog subcommands.
#[derive(Subcommand)]
pub enum CatalogSubcommands {
    /// Shows the embedded projects.yaml catalog.
    Show(ShowCommand),
    /// Validates a catalog file and summarizes it by organization.
    Check(CheckCommand),
}

/// Show command options.
#[derive(Parser)]
pub struct ShowCommand {}

/// Check command options.
#[derive(Parser)]
pub struct CheckCommand {
    /// Catalog YAML file to validate.
    pub file: PathBuf,
}

impl CatalogCommand {
    /// Executes the catalog command.
    pub fn execute(self) -> Result<()> {
        match self.command {
            CatalogSubcommands::Show(show_cmd) => show_cmd.execute(),
            CatalogSubcommands::Check(check_cmd) => check_cmd.execute(),
        }
    }
}

impl ShowCommand {
    /// Executes the show command.
    pub fn execute(self) -> Result<()> {
        println!("{PROJECTS_YAML}");
        Ok(())
    }
}

impl CheckCommand {
    /// Executes the check command.
    pub fn execute(self) -> Result<()> {
        let catalog = Catalog::load_from_file(&self.file)?;
        print!("{}", summarize(&catalog));
        Ok(())
    }
}

fn summarize(catalog: &Catalog) -> String {
    let mut out = format!("{} projects\n", catalog.len());
    for (name, count) in catalog.organizations() {
        out.push_str(&format!("  {name}: {count}\n"));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Project;

    #[test]
    fn summary_lists_organizations_in_catalog_order() {
        let catalog = Catalog::new(vec![
            Project::new("Wine", &["opengl"]),
            Project::new("Ceph", &["linux"]),
            Project::new("Wine", &["directx"]),
        ])
        .unwrap();
        assert_eq!(summarize(&catalog), "3 projects\n  Wine: 2\n  Ceph: 1\n");
    }
}
