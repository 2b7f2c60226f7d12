use clap::Args;
use eyre::Result;

use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct PluginsCommand {}

impl PluginsCommand {
    pub fn run(&self) -> Result<()> {
        ops::plugins().render(&mut TerminalOutput::new());
        Ok(())
    }
}
