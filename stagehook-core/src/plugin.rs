//! The plugin trait every static analysis implements.

use eyre::Result;

use crate::{CompilerContext, Driver, Env, InvalidCommandLine, Log};

/// The shared host state lent to a plugin for the duration of one callback.
///
/// The host owns the context, the log and the driver; plugins only ever hold
/// them through this borrow, which ends when the callback returns.
pub struct PluginContext<'a> {
    pub context: &'a mut CompilerContext,
    pub log: &'a mut Log,
    pub driver: &'a Driver,
}

impl<'a> PluginContext<'a> {
    pub fn new(context: &'a mut CompilerContext, log: &'a mut Log, driver: &'a Driver) -> Self {
        Self {
            context,
            log,
            driver,
        }
    }
}

/// A flag a plugin claims during argument processing.
#[derive(Debug, Clone, Copy)]
pub struct FlagInfo {
    /// The flag as typed, e.g. `--check`.
    pub name: &'static str,
    /// Placeholder for the value, `None` for switches.
    pub value: Option<&'static str>,
    pub help: &'static str,
}

/// Information about a plugin.
#[derive(Debug, Clone)]
pub struct PluginInfo {
    pub name: &'static str,
    pub description: &'static str,
    pub flags: &'static [FlagInfo],
}

/// A static analysis that hooks into the host compiler's pipeline.
///
/// Every callback has a no-op default, so a plugin overrides only the
/// phases it cares about. The host calls them in this order:
///
/// 1. [`process_args`](Plugin::process_args) for every plugin
/// 2. [`initialize_context`](Plugin::initialize_context) for every plugin
/// 3. [`init`](Plugin::init) for every plugin
/// 4. per unit: [`post_attribute`](Plugin::post_attribute) for every plugin,
///    then [`post_flow`](Plugin::post_flow) for every plugin
/// 5. [`finish`](Plugin::finish) for every plugin
///
/// Within a step, plugins run in registration order. Returning the error
/// produced by [`raise_fatal`](crate::raise_fatal) from any callback aborts
/// the run: no further callbacks run, `finish` included.
///
/// # Example
///
/// ```
/// use eyre::Result;
/// use stagehook_core::{Env, Plugin, PluginContext};
///
/// struct CountUnits(usize);
///
/// impl Plugin for CountUnits {
///     fn name(&self) -> &'static str { "count-units" }
///
///     fn post_flow(&mut self, _env: &Env<'_>, _cx: &mut PluginContext<'_>) -> Result<()> {
///         self.0 += 1;
///         Ok(())
///     }
///
///     fn finish(&mut self, cx: &mut PluginContext<'_>) -> Result<()> {
///         cx.log.note(self.name(), format!("{} units", self.0));
///         Ok(())
///     }
/// }
/// ```
pub trait Plugin: Send {
    /// The name of this plugin (for diagnostics and registration).
    fn name(&self) -> &'static str;

    /// A human-readable description of what this plugin checks.
    fn description(&self) -> &'static str {
        ""
    }

    /// The flags this plugin claims in [`process_args`](Plugin::process_args).
    fn flags(&self) -> &'static [FlagInfo] {
        &[]
    }

    /// Claim this plugin's flags.
    ///
    /// Called before any compiler context exists. Returns the flags that do
    /// not belong to this plugin, in their original order.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidCommandLine`] if a recognized flag is malformed.
    fn process_args(&mut self, args: &[String]) -> Result<Vec<String>, InvalidCommandLine> {
        Ok(args.to_vec())
    }

    /// Customize the shared context once every plugin has processed its
    /// arguments, e.g. to install a task listener.
    #[allow(unused_variables)]
    fn initialize_context(&mut self, context: &mut CompilerContext) -> Result<()> {
        Ok(())
    }

    /// One-time setup once the context, log and driver all exist.
    #[allow(unused_variables)]
    fn init(&mut self, cx: &mut PluginContext<'_>) -> Result<()> {
        Ok(())
    }

    /// Called for each unit right after symbol resolution.
    ///
    /// # Errors
    ///
    /// Return an escalation to abort the run.
    #[allow(unused_variables)]
    fn post_attribute(&mut self, env: &Env<'_>, cx: &mut PluginContext<'_>) -> Result<()> {
        Ok(())
    }

    /// Called for each unit right after dataflow and reachability checks.
    ///
    /// # Errors
    ///
    /// Return an escalation to abort the run.
    #[allow(unused_variables)]
    fn post_flow(&mut self, env: &Env<'_>, cx: &mut PluginContext<'_>) -> Result<()> {
        Ok(())
    }

    /// Called once after every unit has been processed, before the host
    /// discards its state. Used for reports spanning the whole run.
    #[allow(unused_variables)]
    fn finish(&mut self, cx: &mut PluginContext<'_>) -> Result<()> {
        Ok(())
    }

    /// Get information about this plugin.
    fn info(&self) -> PluginInfo {
        PluginInfo {
            name: self.name(),
            description: self.description(),
            flags: self.flags(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Bare;

    impl Plugin for Bare {
        fn name(&self) -> &'static str {
            "bare"
        }
    }

    #[test]
    fn test_default_process_args_is_pass_through() {
        let args: Vec<String> = vec!["--check=strict".into(), "-d".into(), "out".into()];
        let rest = Bare.process_args(&args).unwrap();
        assert_eq!(rest, args);
        assert!(Bare.process_args(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_default_callbacks_are_no_ops() {
        let mut context = CompilerContext::new();
        let mut log = Log::new();
        let driver = Driver::new("test", "0");
        let mut plugin = Bare;

        plugin.initialize_context(&mut context).unwrap();
        let mut cx = PluginContext::new(&mut context, &mut log, &driver);
        plugin.init(&mut cx).unwrap();
        plugin.finish(&mut cx).unwrap();

        assert!(log.is_empty());
        assert_eq!(context.listener_count(), 0);
    }

    #[test]
    fn test_info() {
        let info = Bare.info();
        assert_eq!(info.name, "bare");
        assert!(info.description.is_empty());
        assert!(info.flags.is_empty());
    }
}
