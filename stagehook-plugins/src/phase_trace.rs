//! Callback trace plugin for debugging plugin pipelines.
//!
//! This module provides a plugin that captures the host state after each
//! callback and writes the whole trace to disk when the run finishes.

use std::{
    fs,
    path::{Path, PathBuf},
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
};

use eyre::{Result, WrapErr};
use serde::Serialize;
use stagehook_core::{
    CompilerContext, Diagnostic, Env, FlagInfo, InvalidCommandLine, Phase, Plugin, PluginContext,
    TaskEvent, TaskListener, TerminalStatus, args::take_flag, raise_fatal,
};

const TRACE_DIR_FLAG: &str = "--trace-dir";

/// Name of the file written to the trace directory.
pub const TRACE_FILE: &str = "trace.json";

/// The host state right after one plugin callback.
#[derive(Debug, Clone, Serialize)]
pub struct CallbackSnapshot {
    /// The callback that just ran, e.g. `post_flow`.
    pub callback: &'static str,

    /// The phase the callback followed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phase: Option<Phase>,

    /// The unit the callback ran for.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,

    /// Host task events observed so far.
    pub task_events: usize,

    /// Diagnostics reported since the previous snapshot.
    pub diagnostics: Vec<Diagnostic>,
}

#[derive(Serialize)]
struct TraceFile<'a> {
    host: &'a str,
    version: &'a str,
    task_events: usize,
    snapshots: &'a [CallbackSnapshot],
}

/// Counts host task events for the trace.
struct EventCounter(Arc<AtomicUsize>);

impl TaskListener for EventCounter {
    fn on_event(&mut self, event: &TaskEvent) {
        self.0.fetch_add(1, Ordering::Relaxed);
        tracing::trace!(
            phase = %event.phase,
            unit = %event.unit,
            stage = ?event.stage,
            "task event"
        );
    }
}

/// A plugin that captures host state after each callback.
///
/// Enabled with `--trace-dir=<dir>`; writes [`TRACE_FILE`] into that
/// directory from `finish`. A run that escalates never reaches `finish`, so
/// it leaves no trace.
///
/// Each snapshot holds only the diagnostics added since the one before it;
/// concatenating them in order gives the full log.
#[derive(Debug, Default)]
pub struct PhaseTracePlugin {
    output_dir: Option<PathBuf>,
    events: Arc<AtomicUsize>,
    snapshots: Vec<CallbackSnapshot>,
    /// Log entries already handed to a snapshot.
    recorded: usize,
}

impl PhaseTracePlugin {
    /// Create a trace plugin that writes to a directory.
    pub fn with_output_dir(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: Some(output_dir.into()),
            ..Self::default()
        }
    }

    pub fn output_dir(&self) -> Option<&Path> {
        self.output_dir.as_deref()
    }

    /// Get all collected snapshots.
    pub fn snapshots(&self) -> &[CallbackSnapshot] {
        &self.snapshots
    }

    fn capture(&mut self, callback: &'static str, env: Option<&Env<'_>>, cx: &PluginContext<'_>) {
        if self.output_dir.is_none() {
            return;
        }
        let all = cx.log.diagnostics();
        let diagnostics = all.get(self.recorded..).unwrap_or_default().to_vec();
        self.recorded = all.len();

        self.snapshots.push(CallbackSnapshot {
            callback,
            phase: env.map(Env::phase),
            unit: env.map(|env| env.path().to_string()),
            task_events: self.events.load(Ordering::Relaxed),
            diagnostics,
        });
    }

    fn write_to_dir(&self, dir: &Path, cx: &PluginContext<'_>) -> Result<PathBuf> {
        let trace = TraceFile {
            host: cx.driver.name(),
            version: cx.driver.version(),
            task_events: self.events.load(Ordering::Relaxed),
            snapshots: &self.snapshots,
        };
        let json = serde_json::to_string_pretty(&trace).wrap_err("failed to serialize trace")?;

        let path = dir.join(TRACE_FILE);
        if let Err(err) = fs::create_dir_all(dir).and_then(|()| fs::write(&path, json)) {
            return raise_fatal(
                TerminalStatus::SysErr,
                format!("cannot write trace to '{}': {}", path.display(), err),
            );
        }

        Ok(path)
    }
}

impl Plugin for PhaseTracePlugin {
    fn name(&self) -> &'static str {
        "phase-trace"
    }

    fn description(&self) -> &'static str {
        "Write a JSON trace of every plugin callback"
    }

    fn flags(&self) -> &'static [FlagInfo] {
        &[FlagInfo {
            name: TRACE_DIR_FLAG,
            value: Some("dir"),
            help: "Directory to write trace.json to",
        }]
    }

    fn process_args(&mut self, args: &[String]) -> Result<Vec<String>, InvalidCommandLine> {
        let (dir, rest) = take_flag(args, TRACE_DIR_FLAG)?;
        if let Some(dir) = dir {
            self.output_dir = Some(PathBuf::from(dir));
        }
        Ok(rest)
    }

    fn initialize_context(&mut self, context: &mut CompilerContext) -> Result<()> {
        if self.output_dir.is_some() {
            context.add_listener(EventCounter(self.events.clone()));
        }
        Ok(())
    }

    fn init(&mut self, cx: &mut PluginContext<'_>) -> Result<()> {
        self.capture("init", None, cx);
        Ok(())
    }

    fn post_attribute(&mut self, env: &Env<'_>, cx: &mut PluginContext<'_>) -> Result<()> {
        self.capture("post_attribute", Some(env), cx);
        Ok(())
    }

    fn post_flow(&mut self, env: &Env<'_>, cx: &mut PluginContext<'_>) -> Result<()> {
        self.capture("post_flow", Some(env), cx);
        Ok(())
    }

    fn finish(&mut self, cx: &mut PluginContext<'_>) -> Result<()> {
        let Some(dir) = self.output_dir.clone() else {
            return Ok(());
        };

        self.capture("finish", None, cx);
        let path = self.write_to_dir(&dir, cx)?;
        tracing::info!(path = %path.display(), snapshots = self.snapshots.len(), "trace written");
        Ok(())
    }
}
