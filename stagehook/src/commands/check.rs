use std::path::PathBuf;

use clap::Args;
use eyre::Result;
use stagehook_units::UnitsToml;

use super::UnwrapOrExit;
use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct CheckCommand {
    /// Path to units.toml (defaults to ./units.toml)
    #[arg(short, long, default_value = "units.toml")]
    pub units: PathBuf,
}

impl CheckCommand {
    /// Run the check command
    pub fn run(&self) -> Result<()> {
        let units_toml = UnitsToml::open(&self.units).unwrap_or_exit();
        let report = ops::check(&units_toml);
        report.render(&mut TerminalOutput::new());
        Ok(())
    }
}
