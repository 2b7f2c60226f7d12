//! Bundled static analyses for stagehook compiler hosts.
//!
//! Every plugin is disabled or advisory by default and configured through
//! the flags it claims during argument processing.
//!
//! # Plugins
//!
//! - [`StrictDepsPlugin`] - imports from packages that are not direct dependencies
//! - [`ImportCyclesPlugin`] - cycles between source packages
//! - [`NamingPlugin`] - package and type naming conventions
//! - [`PhaseTracePlugin`] - writes a trace of every callback to disk

mod import_cycles;
mod naming;
mod phase_trace;
mod strict_deps;

pub use import_cycles::{CycleMode, ImportCyclesPlugin, PackageGraph};
pub use naming::NamingPlugin;
pub use phase_trace::{CallbackSnapshot, PhaseTracePlugin, TRACE_FILE};
pub use strict_deps::{CheckMode, StrictDepsPlugin};
use stagehook_core::Plugin;

/// Every bundled plugin, in the order a host should register them.
///
/// The trace plugin comes last so its snapshots include what the other
/// plugins reported for the same callback.
pub fn bundled() -> Vec<Box<dyn Plugin>> {
    vec![
        Box::new(StrictDepsPlugin::default()),
        Box::new(ImportCyclesPlugin::default()),
        Box::new(NamingPlugin::default()),
        Box::new(PhaseTracePlugin::default()),
    ]
}
