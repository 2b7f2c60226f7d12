//! Read-only handle describing the host compiler.

/// The host compiler driving a run.
///
/// Options are the command-line flags left over after every plugin has
/// claimed its own.
#[derive(Debug, Clone, Default)]
pub struct Driver {
    name: String,
    version: String,
    options: Vec<String>,
    units: Vec<String>,
}

impl Driver {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            options: Vec::new(),
            units: Vec::new(),
        }
    }

    pub fn with_options(mut self, options: Vec<String>) -> Self {
        self.options = options;
        self
    }

    pub fn with_units(mut self, units: Vec<String>) -> Self {
        self.units = units;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Host options in command-line order.
    pub fn options(&self) -> &[String] {
        &self.options
    }

    /// Paths of the units being compiled, in compilation order.
    pub fn units(&self) -> &[String] {
        &self.units
    }

    /// Check whether a host option is present.
    pub fn has_option(&self, flag: &str) -> bool {
        self.options
            .iter()
            .any(|o| o == flag || o.strip_prefix(flag).is_some_and(|r| r.starts_with('=')))
    }

    /// The value of a host option given as `flag value` or `flag=value`.
    pub fn option_value(&self, flag: &str) -> Option<&str> {
        let mut iter = self.options.iter();
        while let Some(option) = iter.next() {
            if option == flag {
                return iter.next().map(String::as_str);
            }
            if let Some(value) = option.strip_prefix(flag).and_then(|r| r.strip_prefix('=')) {
                return Some(value);
            }
        }
        None
    }
}
