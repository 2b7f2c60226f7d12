//! Plugin contract shared by stagehook hosts and analyses.
//!
//! A host compiler drives registered [`Plugin`]s through a fixed lifecycle:
//!
//! 1. [`Plugin::process_args`] claims plugin flags before any context exists
//! 2. [`Plugin::initialize_context`] and [`Plugin::init`] run once
//! 3. [`Plugin::post_attribute`] and [`Plugin::post_flow`] run per unit
//! 4. [`Plugin::finish`] runs once at teardown
//!
//! Any callback may abort the whole run through the escalation channel
//! ([`raise_fatal`]), which survives the host's own error wrapping and
//! surfaces as an exact exit status and message.
//!
//! # Module Organization
//!
//! - [`args`] - flag claiming helpers and [`InvalidCommandLine`]
//! - [`context`] - typed shared state and task listeners
//! - [`env`] - the attributed per-unit view handed to callbacks

pub mod args;
pub mod context;
mod diagnostic;
mod driver;
pub mod env;
mod escalation;
mod log;
mod plugin;
mod status;

pub use args::InvalidCommandLine;
pub use context::{CompilerContext, TaskEvent, TaskListener, TaskStage};
pub use diagnostic::{Diagnostic, Severity};
pub use driver::Driver;
pub use env::{Env, Phase};
pub use escalation::{Escalation, raise_fatal};
pub use log::Log;
pub use plugin::{FlagInfo, Plugin, PluginContext, PluginInfo};
pub use status::{ExitStatus, TerminalStatus};
