//! Import cycle detection between source packages.

use std::{collections::VecDeque, str::FromStr};

use eyre::Result;
use indexmap::{IndexMap, IndexSet};
use stagehook_core::{
    Diagnostic, Env, FlagInfo, InvalidCommandLine, Plugin, PluginContext, TerminalStatus,
    args::{parse_choice, take_flag},
    env::SymbolOrigin,
    raise_fatal,
};

const IMPORT_CYCLES_FLAG: &str = "--import-cycles";

/// How a detected import cycle is treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CycleMode {
    /// Abort the run on the first cycle.
    Fatal,
    /// Report one warning per distinct cycle.
    #[default]
    Warn,
    Off,
}

impl FromStr for CycleMode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fatal" => Ok(CycleMode::Fatal),
            "warn" => Ok(CycleMode::Warn),
            "off" => Ok(CycleMode::Off),
            _ => Err(()),
        }
    }
}

/// Import edges between source packages, shared through the compiler
/// context.
#[derive(Debug, Default)]
pub struct PackageGraph {
    edges: IndexMap<String, IndexSet<String>>,
}

impl PackageGraph {
    /// Add an edge, returning false if it was already present.
    pub fn add_edge(&mut self, from: &str, to: &str) -> bool {
        self.edges
            .entry(from.to_string())
            .or_default()
            .insert(to.to_string())
    }

    pub fn edge_count(&self) -> usize {
        self.edges.values().map(IndexSet::len).sum()
    }

    /// Shortest path from `from` to `to`, both ends included.
    pub fn path(&self, from: &str, to: &str) -> Option<Vec<String>> {
        let mut parents: IndexMap<&str, &str> = IndexMap::new();
        let mut queue = VecDeque::from([from]);

        while let Some(node) = queue.pop_front() {
            if node == to {
                let mut path = vec![node.to_string()];
                let mut current = node;
                while let Some(&parent) = parents.get(current) {
                    path.push(parent.to_string());
                    current = parent;
                }
                path.reverse();
                return Some(path);
            }

            for next in self.edges.get(node).into_iter().flatten() {
                let next = next.as_str();
                if next != from && !parents.contains_key(next) {
                    parents.insert(next, node);
                    queue.push_back(next);
                }
            }
        }

        None
    }
}

/// A cycle rotated so that its smallest package comes first.
fn canonical(mut cycle: Vec<String>) -> Vec<String> {
    if let Some(start) = cycle
        .iter()
        .enumerate()
        .min_by(|a, b| a.1.cmp(b.1))
        .map(|(i, _)| i)
    {
        cycle.rotate_left(start);
    }
    cycle
}

fn render(cycle: &[String]) -> String {
    let mut parts: Vec<&str> = cycle.iter().map(String::as_str).collect();
    if let Some(first) = cycle.first() {
        parts.push(first);
    }
    parts.join(" -> ")
}

/// Plugin that detects import cycles between the packages of this
/// compilation.
///
/// Edges are added as units reach the flow phase, so a cycle is reported at
/// the unit that closes it.
#[derive(Debug, Default)]
pub struct ImportCyclesPlugin {
    mode: CycleMode,
    cycles: IndexSet<Vec<String>>,
}

impl ImportCyclesPlugin {
    pub fn new(mode: CycleMode) -> Self {
        Self {
            mode,
            cycles: IndexSet::new(),
        }
    }

    pub fn mode(&self) -> CycleMode {
        self.mode
    }
}

impl Plugin for ImportCyclesPlugin {
    fn name(&self) -> &'static str {
        "import-cycles"
    }

    fn description(&self) -> &'static str {
        "Detect import cycles between source packages"
    }

    fn flags(&self) -> &'static [FlagInfo] {
        &[FlagInfo {
            name: IMPORT_CYCLES_FLAG,
            value: Some("fatal|warn|off"),
            help: "How to treat import cycles (default: warn)",
        }]
    }

    fn process_args(&mut self, args: &[String]) -> Result<Vec<String>, InvalidCommandLine> {
        let (mode, rest) = take_flag(args, IMPORT_CYCLES_FLAG)?;
        if let Some(mode) = mode {
            self.mode = parse_choice(IMPORT_CYCLES_FLAG, &mode, "fatal, warn or off")?;
        }
        Ok(rest)
    }

    fn post_flow(&mut self, env: &Env<'_>, cx: &mut PluginContext<'_>) -> Result<()> {
        if self.mode == CycleMode::Off {
            return Ok(());
        }

        let package = env.package();
        let graph = cx.context.get_or_default::<PackageGraph>();

        let mut found = Vec::new();
        for resolved in env.resolved_imports() {
            let target = resolved.import.package.as_str();
            if !matches!(resolved.origin, SymbolOrigin::Source { .. })
                || target == package
                || !graph.add_edge(package, target)
            {
                continue;
            }

            if let Some(mut path) = graph.path(target, package) {
                // Drop the closing node; the cycle starts at `package`.
                path.pop();
                let mut cycle = vec![package.to_string()];
                cycle.extend(path);
                found.push(canonical(cycle));
            }
        }

        for cycle in found {
            if !self.cycles.insert(cycle.clone()) {
                continue;
            }
            let rendered = render(&cycle);
            tracing::debug!(unit = env.path(), cycle = %rendered, "import cycle found");

            match self.mode {
                CycleMode::Fatal => {
                    cx.log.report(
                        Diagnostic::note(self.name(), format!("import cycle: {}", rendered))
                            .in_unit(env.path()),
                    );
                    return raise_fatal(TerminalStatus::Error, "illegal import cycle");
                }
                _ => cx.log.report(
                    Diagnostic::warning(self.name(), format!("import cycle: {}", rendered))
                        .in_unit(env.path()),
                ),
            }
        }

        Ok(())
    }

    fn finish(&mut self, cx: &mut PluginContext<'_>) -> Result<()> {
        if self.mode == CycleMode::Off {
            return Ok(());
        }

        let edges = cx
            .context
            .get::<PackageGraph>()
            .map_or(0, PackageGraph::edge_count);
        cx.log.note(
            self.name(),
            format!(
                "{} import cycle(s) across {} package edge(s)",
                self.cycles.len(),
                edges
            ),
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_graph_path() {
        let mut graph = PackageGraph::default();
        graph.add_edge("a", "b");
        graph.add_edge("b", "c");
        graph.add_edge("c", "a");
        graph.add_edge("b", "d");

        assert_eq!(graph.path("b", "a"), Some(strings(&["b", "c", "a"])));
        assert_eq!(graph.path("d", "a"), None);
        assert_eq!(graph.edge_count(), 4);
        assert!(!graph.add_edge("a", "b"));
    }

    #[test]
    fn test_canonical_rotation() {
        assert_eq!(canonical(strings(&["c", "a", "b"])), strings(&["a", "b", "c"]));
        assert_eq!(render(&strings(&["a", "b"])), "a -> b -> a");
    }

    #[test]
    fn test_process_args() {
        let mut plugin = ImportCyclesPlugin::default();
        assert_eq!(plugin.mode(), CycleMode::Warn);

        let rest = plugin
            .process_args(&strings(&["-d", "out", "--import-cycles=fatal"]))
            .unwrap();

        assert_eq!(rest, ["-d", "out"]);
        assert_eq!(plugin.mode(), CycleMode::Fatal);
    }

    #[test]
    fn test_process_args_rejects_unknown_mode() {
        let mut plugin = ImportCyclesPlugin::default();
        let err = plugin
            .process_args(&strings(&["--import-cycles=sometimes"]))
            .unwrap_err();
        assert_eq!(err.flag(), "--import-cycles");
    }
}
