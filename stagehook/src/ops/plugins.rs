//! Plugins operation - bundled plugin listing.

use crate::reports::PluginsReport;

pub fn plugins() -> PluginsReport {
    PluginsReport {
        plugins: stagehook_plugins::bundled()
            .iter()
            .map(|plugin| plugin.info())
            .collect(),
    }
}
