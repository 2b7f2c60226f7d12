use std::path::PathBuf;

use clap::Args;
use eyre::Result;
use stagehook_units::UnitsToml;

use super::{Format, UnwrapOrExit};
use crate::{
    ops,
    reports::{CompileReport, Report, TerminalOutput},
};

#[derive(Args)]
pub struct CompileCommand {
    /// Path to units.toml (defaults to ./units.toml)
    #[arg(short, long, default_value = "units.toml")]
    pub units: PathBuf,

    /// Treat warnings as errors
    #[arg(long = "Werror")]
    pub warnings_as_errors: bool,

    /// Output format for the run report
    #[arg(long, value_enum, default_value_t = Format::Text)]
    pub format: Format,

    /// Compiler flags; plugins claim theirs, the rest become host options
    #[arg(last = true, allow_hyphen_values = true)]
    pub flags: Vec<String>,
}

impl CompileCommand {
    pub fn run(&self) -> Result<()> {
        let units_toml = UnitsToml::open(&self.units).unwrap_or_exit();
        let run = ops::compile(
            units_toml.source_set(),
            &self.flags,
            self.warnings_as_errors,
        )?;
        let report = CompileReport::new(&self.units, run);

        match self.format {
            Format::Text => report.render(&mut TerminalOutput::new()),
            Format::Json => println!("{}", serde_json::to_string_pretty(&report.to_json())?),
        }

        // The one place a failed run's message reaches the user
        if let Some(message) = report.run.outcome.message() {
            eprintln!("error: {}", message);
        }

        let status = report.run.outcome.status();
        if !status.is_ok() {
            std::process::exit(status.code());
        }
        Ok(())
    }
}
