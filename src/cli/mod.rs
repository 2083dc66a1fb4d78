pub mod completions;
pub mod lint;
pub mod rules;

use clap::{Parser, Subcommand};

/// tgmlint - Lint TGM/DMM tile maps
#[derive(Parser, Debug)]
#[command(name = "tgmlint")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Lint map files and print one line per diagnostic
    Lint(lint::LintArgs),

    /// List the rules that would run
    Rules(rules::RulesArgs),

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_dmm_file_spellings() {
        for flag in ["--dmm-file", "--dmm_file"] {
            let cli = Cli::try_parse_from(["tgmlint", "lint", flag, "maps/station.dmm"]).unwrap();
            let Commands::Lint(args) = cli.command else {
                panic!("expected lint");
            };
            assert_eq!(args.dmm_files, vec![PathBuf::from("maps/station.dmm")]);
        }
    }

    #[test]
    fn test_lint_requires_a_file() {
        assert!(Cli::try_parse_from(["tgmlint", "lint"]).is_err());
    }

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
