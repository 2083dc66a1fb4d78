//! Rules command implementation.
//!
//! Lists the rules a lint run would use, after configuration.

use std::path::PathBuf;

use clap::Args;

use crate::config::Config;
use crate::error::Result;
use crate::output::{display_path, Printer};

/// List the rules that would run
#[derive(Args, Debug)]
pub struct RulesArgs {
    /// Config file (default: ./tgmlint.yaml if present)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Also show the prefix categories
    #[arg(long)]
    pub categories: bool,
}

pub fn run(args: RulesArgs, printer: &Printer) -> Result<()> {
    let cwd = std::env::current_dir()?;
    let (config, config_path) = Config::discover(args.config.as_deref(), &cwd)?;
    if let Some(path) = &config_path {
        printer.info("Config", &printer.cyan(&display_path(path)));
    }

    let registry = config.build_registry()?;
    for rule in registry.all() {
        printer.info(rule.id(), &printer.dim(rule.description()));
    }

    if args.categories {
        let categories = config.categories();
        for name in categories.names() {
            if let Some(set) = categories.get(name) {
                printer.info(name, &set.prefixes().join(", "));
            }
        }
    }

    Ok(())
}
