//! Plugins command report data structures.

use stagehook_core::PluginInfo;

use super::output::{Output, Report};

/// Report data listing the bundled plugins.
#[derive(Debug)]
pub struct PluginsReport {
    pub plugins: Vec<PluginInfo>,
}

impl Report for PluginsReport {
    fn render(&self, out: &mut dyn Output) {
        out.title("Plugins");

        for plugin in &self.plugins {
            out.newline();
            out.section(plugin.name);
            out.preformatted(&format!("  {}", plugin.description));
            for flag in plugin.flags {
                let usage = match flag.value {
                    Some(value) => format!("{}=<{}>", flag.name, value),
                    None => flag.name.to_string(),
                };
                out.list_item(&format!("{}  {}", usage, flag.help));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ops, reports::BufferOutput};

    #[test]
    fn test_render_bundled() {
        insta::assert_snapshot!(BufferOutput::render(&ops::plugins()), @r"
        Plugins
        =======

        strict-deps:
          Check that classpath imports come from declared direct dependencies
          - --check=<strict|warn|off>  How to treat imports from undeclared packages (default: off)
          - --direct-dep=<package>  Declare a direct dependency; may be repeated

        import-cycles:
          Detect import cycles between source packages
          - --import-cycles=<fatal|warn|off>  How to treat import cycles (default: warn)

        naming:
          Check package and type names follow Java conventions
          - --naming  Enable naming convention warnings

        phase-trace:
          Write a JSON trace of every plugin callback
          - --trace-dir=<dir>  Directory to write trace.json to
        ");
    }
}
