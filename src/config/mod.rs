//! Specification model and the JSON loader that reads it from disk.

pub mod model;

use std::{
    fs,
    path::{Path, PathBuf},
};

pub use model::{
    AccountSpec, AmountSpec, ChartKind, ChartSpec, DateSpec, KindSpec, ProjectionSpec,
    ScheduledTransactionSpec, TransferSpec,
};

use crate::errors::{ProjectionError, Result};
use crate::utils::paths;

/// Resolves and reads the projection specification file.
#[derive(Debug, Clone)]
pub struct SpecLoader {
    path: PathBuf,
}

impl SpecLoader {
    /// Uses `path` when given, otherwise the default location under the
    /// application data directory.
    pub fn new(path: Option<PathBuf>) -> Self {
        Self {
            path: path.unwrap_or_else(paths::default_spec_file),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<ProjectionSpec> {
        if !self.path.exists() {
            return Err(ProjectionError::InvalidSpec(format!(
                "specification `{}` not found",
                self.path.display()
            )));
        }
        let data = fs::read_to_string(&self.path)?;
        let spec = ProjectionSpec::from_json(&data)?;
        tracing::debug!(
            path = %self.path.display(),
            accounts = spec.accounts.len(),
            "loaded projection specification"
        );
        Ok(spec)
    }
}
