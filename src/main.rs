use clap::Parser;
use miette::Result;
use tgmlint::cli::{Cli, Commands};
use tgmlint::output::Printer;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let printer = Printer::new();

    match cli.command {
        Commands::Lint(args) => tgmlint::cli::lint::run(args, &printer)?,
        Commands::Rules(args) => tgmlint::cli::rules::run(args, &printer)?,
        Commands::Completions(args) => tgmlint::cli::completions::run(args)?,
    }

    Ok(())
}
