//! Naming convention checks.

use eyre::Result;
use stagehook_core::{
    Diagnostic, Env, FlagInfo, InvalidCommandLine, Plugin, PluginContext, args::take_switch,
};

const NAMING_FLAG: &str = "--naming";

/// Plugin that warns about packages and types that break naming conventions.
///
/// Packages should be lowercase dot-separated identifiers: `com.app`,
/// `net.http2`, `org.my_lib`. Types should be UpperCamelCase: `Main`,
/// `HttpClient`, `Utf8Decoder`.
#[derive(Debug, Default)]
pub struct NamingPlugin {
    enabled: bool,
}

impl NamingPlugin {
    pub fn enabled() -> Self {
        Self { enabled: true }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

impl Plugin for NamingPlugin {
    fn name(&self) -> &'static str {
        "naming"
    }

    fn description(&self) -> &'static str {
        "Check package and type names follow Java conventions"
    }

    fn flags(&self) -> &'static [FlagInfo] {
        &[FlagInfo {
            name: NAMING_FLAG,
            value: None,
            help: "Enable naming convention warnings",
        }]
    }

    fn process_args(&mut self, args: &[String]) -> Result<Vec<String>, InvalidCommandLine> {
        let (enabled, rest) = take_switch(args, NAMING_FLAG)?;
        self.enabled |= enabled;
        Ok(rest)
    }

    fn post_attribute(&mut self, env: &Env<'_>, cx: &mut PluginContext<'_>) -> Result<()> {
        if !self.enabled {
            return Ok(());
        }

        let package = env.package();
        if !is_package_name(package) {
            cx.log.report(
                Diagnostic::warning(
                    self.name(),
                    format!(
                        "package '{}' should be lowercase (e.g., 'com.app' not 'com.App')",
                        package
                    ),
                )
                .in_unit(env.path())
                .at(format!("package {}", package)),
            );
        }

        for ty in &env.tree().types {
            if !is_upper_camel_case(ty) {
                cx.log.report(
                    Diagnostic::warning(
                        self.name(),
                        format!(
                            "type '{}' should use UpperCamelCase (e.g., 'HttpClient' not 'http_client')",
                            ty
                        ),
                    )
                    .in_unit(env.path())
                    .at(format!("type {}", ty)),
                );
            }
        }

        Ok(())
    }
}

fn is_package_segment(s: &str) -> bool {
    let mut chars = s.chars();
    // Must start with lowercase letter
    match chars.next() {
        Some(c) if c.is_ascii_lowercase() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
}

fn is_package_name(s: &str) -> bool {
    !s.is_empty() && s.split('.').all(is_package_segment)
}

fn is_upper_camel_case(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_uppercase() => {}
        _ => return false,
    }
    // No separators; acronyms like `URLParser` are tolerated
    chars.all(|c| c.is_ascii_alphanumeric())
}
