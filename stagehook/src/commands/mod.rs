mod check;
mod compile;
mod completions;
mod plugins;

use check::CheckCommand;
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use compile::CompileCommand;
use completions::CompletionsCommand;
use eyre::Result;
use plugins::PluginsCommand;

/// Extension trait for exiting on source-set errors with pretty formatting
pub(crate) trait UnwrapOrExit<T> {
    fn unwrap_or_exit(self) -> T;
}

impl<T> UnwrapOrExit<T> for stagehook_units::Result<T> {
    fn unwrap_or_exit(self) -> T {
        match self {
            Ok(v) => v,
            Err(e) => {
                eprintln!("{:?}", miette::Report::new(*e));
                std::process::exit(stagehook_core::ExitStatus::CmdErr.code());
            }
        }
    }
}

/// Report format for commands that support machine-readable output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum Format {
    #[default]
    Text,
    Json,
}

#[derive(Parser)]
#[command(name = "stagehook")]
#[command(version)]
#[command(about = "Run static analyses as compiler plugins")]
pub(crate) struct Cli {
    /// Increase log verbosity (-v, -vv, -vvv); RUST_LOG overrides
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn verbosity(&self) -> u8 {
        self.verbose
    }

    pub fn run(&self) -> Result<()> {
        match &self.command {
            Commands::Compile(cmd) => cmd.run(),
            Commands::Check(cmd) => cmd.run(),
            Commands::Plugins(cmd) => cmd.run(),
            Commands::Completions(cmd) => cmd.run(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a source set with the bundled plugins
    Compile(CompileCommand),

    /// Validate units.toml without compiling
    Check(CheckCommand),

    /// List bundled plugins and the flags they claim
    Plugins(PluginsCommand),

    /// Generate shell completions
    Completions(CompletionsCommand),
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_trailing_flags_reach_plugins() {
        let cli = Cli::try_parse_from([
            "stagehook",
            "-vv",
            "compile",
            "--units",
            "set.toml",
            "--Werror",
            "--",
            "--check=strict",
            "-d",
            "out",
        ])
        .unwrap();

        assert_eq!(cli.verbosity(), 2);
        let Commands::Compile(cmd) = &cli.command else {
            panic!("expected compile");
        };
        assert_eq!(cmd.flags, ["--check=strict", "-d", "out"]);
        assert!(cmd.warnings_as_errors);
        assert_eq!(cmd.units.to_str(), Some("set.toml"));
    }
}
