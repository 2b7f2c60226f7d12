//! Compile operation - a full plugin run.

use eyre::{Context, Result};
use stagehook_host::{Compiler, RunReport};
use stagehook_units::SourceSet;

/// Execute the compile operation.
///
/// Registers every bundled plugin and runs the reference host. A failed run
/// is still `Ok`; its outcome is in the report.
pub fn compile(
    source_set: &SourceSet,
    flags: &[String],
    warnings_as_errors: bool,
) -> Result<RunReport> {
    let mut compiler = Compiler::new(source_set).warnings_as_errors(warnings_as_errors);
    for plugin in stagehook_plugins::bundled() {
        compiler = compiler
            .boxed_plugin(plugin)
            .wrap_err("Failed to register bundled plugins")?;
    }

    tracing::debug!(plugins = ?compiler.plugin_names(), ?flags, "starting compilation");
    Ok(compiler.run(flags))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compile_passes_flags_to_plugins() {
        let set: SourceSet = r#"
            [[classpath]]
            package = "com.lib"
            types = ["Util"]

            [[unit]]
            path = "Main.java"
            package = "app"
            imports = ["com.lib.Util"]
        "#
        .parse()
        .unwrap();
        let flags: Vec<String> = vec!["--check=warn".into(), "-d".into(), "out".into()];

        let report = compile(&set, &flags, false).unwrap();
        assert!(report.outcome.is_success());
        let warnings = report
            .diagnostics
            .iter()
            .filter(|d| d.severity.is_warning())
            .count();
        assert_eq!(warnings, 1);

        let report = compile(&set, &flags, true).unwrap();
        assert!(!report.outcome.is_success());
    }
}
