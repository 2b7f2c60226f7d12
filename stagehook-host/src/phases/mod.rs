//! Built-in host phases.
//!
//! Each unit passes through both phases in order; plugins are called after
//! each one:
//!
//! - [`attribute`] - resolves imports against source units and the classpath
//! - [`flow`] - finds unreachable statements and methods that fall through

mod attribute;
mod flow;

pub use attribute::attribute;
pub use flow::flow;
use stagehook_core::Phase;

/// Information about a host phase.
#[derive(Debug, Clone, Copy)]
pub struct PhaseInfo {
    pub phase: Phase,
    pub description: &'static str,
}

/// The host phases in execution order.
pub const PHASES: &[PhaseInfo] = &[
    PhaseInfo {
        phase: Phase::Attribute,
        description: "Resolve imports against source units and the classpath",
    },
    PhaseInfo {
        phase: Phase::Flow,
        description: "Check statement reachability in method bodies",
    },
];
