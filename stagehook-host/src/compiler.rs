//! Compiler orchestrator.

use eyre::{Result, WrapErr};
use stagehook_core::{
    CompilerContext, Driver, Env, Escalation, ExitStatus, InvalidCommandLine, Log, Phase, Plugin,
    PluginContext, TaskEvent, env::UnitTree,
};
use stagehook_units::SourceSet;
use tracing::{debug, debug_span, info, info_span, warn};

use crate::{
    HostError, Lifecycle, LifecycleState, RunOutcome, RunReport, SymbolTable, lower_units, phases,
};

/// Name the host reports through [`Driver::name`].
pub const HOST_NAME: &str = "stagehook";

/// Host-owned state lent to plugins through [`PluginContext`].
struct Session {
    context: CompilerContext,
    log: Log,
    driver: Driver,
}

impl Session {
    fn cx(&mut self) -> PluginContext<'_> {
        PluginContext::new(&mut self.context, &mut self.log, &self.driver)
    }
}

/// The reference compiler.
///
/// The compiler lowers a source set into unit trees, then for each unit runs
/// the attribute and flow phases, calling every plugin after each phase.
/// Plugins are consumed by [`Compiler::run`], so no plugin instance outlives
/// its run.
///
/// # Example
///
/// ```ignore
/// let report = Compiler::new(&source_set)
///     .plugin(StrictDepsPlugin::default())?
///     .plugin(ImportCyclesPlugin::default())?
///     .run(&args);
/// ```
pub struct Compiler {
    units: Vec<UnitTree>,
    symbols: SymbolTable,
    plugins: Vec<Box<dyn Plugin>>,
    warnings_as_errors: bool,
}

impl Compiler {
    /// Create a compiler for a source set, with no plugins.
    pub fn new(source_set: &SourceSet) -> Self {
        let units = lower_units(source_set);
        let symbols = SymbolTable::new(&units, &source_set.classpath);
        Self {
            units,
            symbols,
            plugins: Vec::new(),
            warnings_as_errors: false,
        }
    }

    /// Register a plugin. Callbacks run in registration order.
    ///
    /// # Errors
    ///
    /// Returns [`HostError::DuplicatePlugin`] if a plugin with the same name
    /// is already registered.
    pub fn plugin(self, plugin: impl Plugin + 'static) -> Result<Self, HostError> {
        self.boxed_plugin(Box::new(plugin))
    }

    /// Register an already boxed plugin.
    pub fn boxed_plugin(mut self, plugin: Box<dyn Plugin>) -> Result<Self, HostError> {
        let name = plugin.name();
        if self.plugins.iter().any(|p| p.name() == name) {
            return Err(HostError::DuplicatePlugin { name });
        }
        self.plugins.push(plugin);
        Ok(self)
    }

    /// Treat every warning as an error.
    pub fn warnings_as_errors(mut self, enabled: bool) -> Self {
        self.warnings_as_errors = enabled;
        self
    }

    /// Names of the registered plugins, in registration order.
    pub fn plugin_names(&self) -> Vec<&'static str> {
        self.plugins.iter().map(|p| p.name()).collect()
    }

    /// Run the compiler with the given command-line flags.
    ///
    /// Executes the lifecycle in order:
    /// 1. every plugin claims its flags; the rest become host options
    /// 2. every plugin initializes the shared context, then `init`
    /// 3. per unit: attribute, plugin `post_attribute`, flow, plugin `post_flow`
    /// 4. every plugin `finish`es
    ///
    /// The first error any callback returns stops the run. An escalation in
    /// its chain becomes [`RunOutcome::Aborted`]; anything else is
    /// [`RunOutcome::Crashed`].
    pub fn run(self, args: &[String]) -> RunReport {
        let Compiler {
            units,
            symbols,
            mut plugins,
            warnings_as_errors,
        } = self;

        let _span = info_span!("run", units = units.len(), plugins = plugins.len()).entered();
        let mut lifecycle = Lifecycle::new();

        let options = match process_args(&mut plugins, args) {
            Ok(options) => options,
            Err(err) => {
                debug!(flag = err.flag(), "command line rejected");
                return RunReport {
                    outcome: RunOutcome::InvalidCommandLine(err),
                    diagnostics: Vec::new(),
                    state: lifecycle.state(),
                    units_compiled: 0,
                };
            }
        };

        let mut session = Session {
            context: CompilerContext::new(),
            log: Log::new(),
            driver: Driver::new(HOST_NAME, env!("CARGO_PKG_VERSION"))
                .with_options(options)
                .with_units(units.iter().map(|u| u.path.clone()).collect()),
        };
        session.log.set_warnings_as_errors(warnings_as_errors);

        let mut units_compiled = 0;
        let result = lifecycle
            .advance(LifecycleState::ArgsProcessed)
            .map_err(eyre::Report::from)
            .and_then(|()| {
                drive(
                    &mut plugins,
                    &units,
                    &symbols,
                    &mut session,
                    &mut lifecycle,
                    &mut units_compiled,
                )
            });

        let outcome = match result {
            Ok(()) => {
                let status = if session.log.has_errors() {
                    ExitStatus::Error
                } else {
                    ExitStatus::Ok
                };
                RunOutcome::Completed { status }
            }
            Err(report) => {
                if let Err(err) = lifecycle.abort() {
                    warn!(%err, "run failed outside the active lifecycle");
                }
                classify(report)
            }
        };

        info!(
            status = %outcome.status(),
            state = %lifecycle.state(),
            units_compiled,
            "run complete"
        );

        RunReport {
            outcome,
            diagnostics: session.log.into_diagnostics(),
            state: lifecycle.state(),
            units_compiled,
        }
    }
}

/// Let every plugin claim its flags, in registration order.
///
/// Each plugin sees only the flags the plugins before it left over, so a
/// flag recognized by two plugins goes to the first one registered.
fn process_args(
    plugins: &mut [Box<dyn Plugin>],
    args: &[String],
) -> Result<Vec<String>, InvalidCommandLine> {
    let mut remaining = args.to_vec();
    for plugin in plugins.iter_mut() {
        let rest = plugin.process_args(&remaining)?;
        debug!(
            plugin = plugin.name(),
            claimed = remaining.len().saturating_sub(rest.len()),
            "processed arguments"
        );
        remaining = rest;
    }
    Ok(remaining)
}

/// Drive the run from initialization to teardown.
fn drive(
    plugins: &mut [Box<dyn Plugin>],
    units: &[UnitTree],
    symbols: &SymbolTable,
    session: &mut Session,
    lifecycle: &mut Lifecycle,
    units_compiled: &mut usize,
) -> Result<()> {
    for plugin in plugins.iter_mut() {
        plugin
            .initialize_context(&mut session.context)
            .wrap_err_with(|| {
                format!("plugin '{}' failed to initialize the context", plugin.name())
            })?;
    }
    for plugin in plugins.iter_mut() {
        plugin
            .init(&mut session.cx())
            .wrap_err_with(|| format!("plugin '{}' failed to initialize", plugin.name()))?;
    }
    lifecycle.advance(LifecycleState::Initialized)?;

    lifecycle.advance(LifecycleState::PhaseLoop)?;
    for unit in units {
        compile_unit(plugins, unit, symbols, session)
            .wrap_err_with(|| format!("failed to compile '{}'", unit.path))?;
        *units_compiled += 1;
    }

    for plugin in plugins.iter_mut() {
        plugin
            .finish(&mut session.cx())
            .wrap_err_with(|| format!("plugin '{}' failed to finish", plugin.name()))?;
    }
    lifecycle.advance(LifecycleState::Finished)?;

    Ok(())
}

/// Run both phases for one unit, calling plugins after each.
fn compile_unit(
    plugins: &mut [Box<dyn Plugin>],
    unit: &UnitTree,
    symbols: &SymbolTable,
    session: &mut Session,
) -> Result<()> {
    let _span = debug_span!("unit", path = %unit.path).entered();

    session.context.notify(&TaskEvent::started(Phase::Attribute, &unit.path));
    let resolved = phases::attribute(unit, symbols, &mut session.log);
    session.context.notify(&TaskEvent::finished(Phase::Attribute, &unit.path));

    dispatch(plugins, &Env::attributed(unit, &resolved), session)?;

    session.context.notify(&TaskEvent::started(Phase::Flow, &unit.path));
    let facts = phases::flow(unit, &mut session.log);
    session.context.notify(&TaskEvent::finished(Phase::Flow, &unit.path));

    dispatch(plugins, &Env::flowed(unit, &resolved, &facts), session)
}

/// Call every plugin's callback for the phase that just completed.
fn dispatch(plugins: &mut [Box<dyn Plugin>], env: &Env<'_>, session: &mut Session) -> Result<()> {
    let phase = env.phase();

    for plugin in plugins.iter_mut() {
        debug!(plugin = plugin.name(), %phase, "calling plugin");
        let mut cx = session.cx();
        let result = match phase {
            Phase::Attribute => plugin.post_attribute(env, &mut cx),
            Phase::Flow => plugin.post_flow(env, &mut cx),
        };
        result.wrap_err_with(|| format!("plugin '{}' failed after {}", plugin.name(), phase))?;
    }

    Ok(())
}

/// Turn the error that stopped a run into its outcome.
fn classify(report: eyre::Report) -> RunOutcome {
    match Escalation::find(&report) {
        Some(escalation) => {
            info!(status = %escalation.status(), "run aborted by escalation");
            RunOutcome::Aborted(escalation.clone())
        }
        None => {
            let message = report
                .chain()
                .map(|cause| cause.to_string())
                .collect::<Vec<_>>()
                .join(": ");
            debug!(%message, "run crashed");
            RunOutcome::Crashed { message }
        }
    }
}
