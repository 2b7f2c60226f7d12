use std::path::{Path, PathBuf};

use crate::{Result, SourceSet};

/// Represents a units.toml file with both raw content and parsed source set.
pub struct UnitsToml {
    path: PathBuf,
    content: String,
    source_set: SourceSet,
}

impl UnitsToml {
    /// Open and parse a units.toml file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let content = std::fs::read_to_string(&path).map_err(|e| {
            Box::new(crate::Error::Io {
                path: path.clone(),
                source: e,
            })
        })?;
        let filename = path.display().to_string();
        let source_set = SourceSet::from_str_with_filename(&content, &filename)?;

        Ok(Self {
            path,
            content,
            source_set,
        })
    }

    /// Get the file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the raw content.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Get the parsed source set.
    pub fn source_set(&self) -> &SourceSet {
        &self.source_set
    }

    /// Consume the file, returning the parsed source set.
    pub fn into_source_set(self) -> SourceSet {
        self.source_set
    }
}
