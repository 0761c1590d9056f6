//! File-backed catalogue: a JSON document plus an optional comparison CSV.

use anyhow::{Context, Result};
use delegate_core::catalog::{Catalog, CatalogData, StaticCatalog};
use delegate_core::fixtures::demo_catalog;
use delegate_core::model::{
    ActivityLogEntry, ComparisonRow, ConstraintType, Integration, Metric, ProgressStep,
    ReasoningEntry, Recommendation, Task,
};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::comparison_csv::parse_comparison_csv;

/// A validated catalogue and the file it came from.
#[derive(Debug, Clone)]
pub struct FileCatalog {
    source: PathBuf,
    inner: StaticCatalog,
}

impl FileCatalog {
    /// Load and validate `path`. When `comparison` is given its rows
    /// replace the document's `comparison` table.
    pub fn load(path: impl AsRef<Path>, comparison: Option<&Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut data = read_catalog_data(path)?;
        if let Some(csv_path) = comparison {
            data.comparison = parse_comparison_csv(csv_path)?;
        }
        let inner = StaticCatalog::new(data)
            .with_context(|| format!("validating {}", path.display()))?;
        info!(
            path = %path.display(),
            tasks = inner.all_tasks().len(),
            recommendations = inner.recommendations().len(),
            "catalog loaded"
        );
        Ok(Self {
            source: path.to_path_buf(),
            inner,
        })
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn data(&self) -> &CatalogData {
        self.inner.data()
    }
}

impl Catalog for FileCatalog {
    fn all_tasks(&self) -> &[Task] {
        self.inner.all_tasks()
    }
    fn constraint_types(&self) -> &[ConstraintType] {
        self.inner.constraint_types()
    }
    fn all_integrations(&self) -> &[Integration] {
        self.inner.all_integrations()
    }
    fn activity_log(&self) -> &[ActivityLogEntry] {
        self.inner.activity_log()
    }
    fn reasoning_log(&self) -> &[ReasoningEntry] {
        self.inner.reasoning_log()
    }
    fn recommendations(&self) -> &[Recommendation] {
        self.inner.recommendations()
    }
    fn comparison_rows(&self) -> &[ComparisonRow] {
        self.inner.comparison_rows()
    }
    fn metrics(&self) -> &[Metric] {
        self.inner.metrics()
    }
    fn steps(&self) -> &[ProgressStep] {
        self.inner.steps()
    }
    fn current_annual_premium(&self) -> u32 {
        self.inner.current_annual_premium()
    }
}

/// Parse a catalogue document without validating it.
pub fn read_catalog_data(path: &Path) -> Result<CatalogData> {
    let raw = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parsing {}", path.display()))
}

/// Parse and validate, reporting the first broken invariant.
pub fn check_catalog(path: &Path) -> Result<CatalogData> {
    let data = read_catalog_data(path)?;
    data.validate()
        .with_context(|| format!("validating {}", path.display()))?;
    Ok(data)
}

/// Write the built-in demo catalogue as pretty JSON.
pub fn export_demo(mut out: impl Write) -> Result<()> {
    serde_json::to_writer_pretty(&mut out, &demo_catalog()).context("serializing demo catalog")?;
    writeln!(out)?;
    Ok(())
}
