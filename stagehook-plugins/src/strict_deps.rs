//! Strict dependency checking.

use std::str::FromStr;

use eyre::Result;
use indexmap::{IndexMap, IndexSet};
use stagehook_core::{
    Diagnostic, Env, FlagInfo, InvalidCommandLine, Plugin, PluginContext, TerminalStatus,
    args::{parse_choice, take_flag, take_multi_flag},
    env::SymbolOrigin,
    raise_fatal,
};

const CHECK_FLAG: &str = "--check";
const DIRECT_DEP_FLAG: &str = "--direct-dep";

/// How classpath imports from undeclared packages are treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CheckMode {
    /// Report errors and abort the run at teardown.
    Strict,
    /// Report warnings.
    Warn,
    #[default]
    Off,
}

impl FromStr for CheckMode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "strict" => Ok(CheckMode::Strict),
            "warn" => Ok(CheckMode::Warn),
            "off" => Ok(CheckMode::Off),
            _ => Err(()),
        }
    }
}

/// Plugin that flags classpath imports from packages that are not declared
/// direct dependencies.
///
/// A package counts as a direct dependency if it, or a package it is nested
/// in, was passed with `--direct-dep`. Imports resolved from source units are
/// never checked.
#[derive(Debug, Default)]
pub struct StrictDepsPlugin {
    mode: CheckMode,
    direct: Vec<String>,
    /// Undeclared package -> units importing from it.
    missing: IndexMap<String, IndexSet<String>>,
}

/// Whether `name` is a dotted package name such as `com.lib`.
fn is_package_name(name: &str) -> bool {
    name.split('.').all(|segment| {
        let mut chars = segment.chars();
        chars
            .next()
            .is_some_and(|c| c.is_alphabetic() || c == '_' || c == '$')
            && chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
    })
}

impl StrictDepsPlugin {
    pub fn new(mode: CheckMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    pub fn with_direct_dep(mut self, package: impl Into<String>) -> Self {
        self.direct.push(package.into());
        self
    }

    pub fn mode(&self) -> CheckMode {
        self.mode
    }

    pub fn direct_deps(&self) -> &[String] {
        &self.direct
    }

    fn is_direct(&self, package: &str) -> bool {
        self.direct.iter().any(|dep| {
            package == dep
                || package
                    .strip_prefix(dep.as_str())
                    .is_some_and(|rest| rest.starts_with('.'))
        })
    }
}

impl Plugin for StrictDepsPlugin {
    fn name(&self) -> &'static str {
        "strict-deps"
    }

    fn description(&self) -> &'static str {
        "Check that classpath imports come from declared direct dependencies"
    }

    fn flags(&self) -> &'static [FlagInfo] {
        &[
            FlagInfo {
                name: CHECK_FLAG,
                value: Some("strict|warn|off"),
                help: "How to treat imports from undeclared packages (default: off)",
            },
            FlagInfo {
                name: DIRECT_DEP_FLAG,
                value: Some("package"),
                help: "Declare a direct dependency; may be repeated",
            },
        ]
    }

    fn process_args(&mut self, args: &[String]) -> Result<Vec<String>, InvalidCommandLine> {
        let (mode, rest) = take_flag(args, CHECK_FLAG)?;
        if let Some(mode) = mode {
            self.mode = parse_choice(CHECK_FLAG, &mode, "strict, warn or off")?;
        }

        let (deps, rest) = take_multi_flag(&rest, DIRECT_DEP_FLAG)?;
        if let Some(bad) = deps.iter().find(|dep| !is_package_name(dep)) {
            return Err(InvalidCommandLine::InvalidValue {
                flag: DIRECT_DEP_FLAG.into(),
                value: bad.clone(),
                expected: "a qualified package name".into(),
            });
        }
        self.direct.extend(deps);

        Ok(rest)
    }

    fn post_attribute(&mut self, env: &Env<'_>, cx: &mut PluginContext<'_>) -> Result<()> {
        if self.mode == CheckMode::Off {
            return Ok(());
        }

        for resolved in env.resolved_imports() {
            let package = &resolved.import.package;
            if resolved.origin != SymbolOrigin::Classpath || self.is_direct(package) {
                continue;
            }

            let message = format!(
                "'{}' is provided by '{}', which is not a direct dependency",
                resolved.import, package
            );
            let diagnostic = match self.mode {
                CheckMode::Strict => Diagnostic::error(self.name(), message),
                _ => Diagnostic::warning(self.name(), message),
            };
            cx.log.report(
                diagnostic
                    .in_unit(env.path())
                    .at(format!("import {}", resolved.import)),
            );

            self.missing
                .entry(package.clone())
                .or_default()
                .insert(env.path().to_string());
        }

        Ok(())
    }

    fn finish(&mut self, cx: &mut PluginContext<'_>) -> Result<()> {
        if self.missing.is_empty() {
            return Ok(());
        }

        let list = self
            .missing
            .keys()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ");

        for (package, units) in &self.missing {
            cx.log.note(
                self.name(),
                format!(
                    "'{}' is used by {} unit(s) but not declared with {}",
                    package,
                    units.len(),
                    DIRECT_DEP_FLAG
                ),
            );
        }
        tracing::info!(packages = %list, "undeclared dependencies found");

        if self.mode == CheckMode::Strict {
            return raise_fatal(
                TerminalStatus::Error,
                format!("missing direct dependencies: {}", list),
            );
        }

        Ok(())
    }
}
