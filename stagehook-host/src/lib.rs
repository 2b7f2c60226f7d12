//! Reference compiler host for stagehook plugins.
//!
//! The [`Compiler`] lowers a [`SourceSet`](stagehook_units::SourceSet) into
//! unit trees and drives registered plugins through the full lifecycle:
//!
//! - Explicit phase boundaries (attribute → flow, per unit)
//! - Plugin callbacks after each phase, in registration order
//! - A shared diagnostic log and compiler context
//! - Escalations recovered from the error chain into a [`RunOutcome`]
//!
//! # Example
//!
//! ```ignore
//! use stagehook_host::Compiler;
//!
//! let report = Compiler::new(&source_set)
//!     .plugin(MyPlugin::default())?
//!     .run(&args);
//!
//! std::process::exit(report.outcome.status().code());
//! ```

mod compiler;
mod error;
mod lifecycle;
mod lower;
mod outcome;
pub mod phases;
mod symbols;

pub use compiler::{Compiler, HOST_NAME};
pub use error::HostError;
pub use lifecycle::{Lifecycle, LifecycleError, LifecycleState};
pub use lower::lower_units;
pub use outcome::{RunOutcome, RunReport};
pub use symbols::SymbolTable;
