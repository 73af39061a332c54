//! Persistence of the result bundle and its metadata sidecar.
//!
//! Layout under the output directory:
//! - `analysis_results.json`: the `ResultBundle`, exactly six top-level keys
//! - `analysis_results.meta.json`: `BundleMetadata` (provenance and status)
//!
//! Both files are written atomically (write `.tmp`, rename into place). The
//! sidecar carries a `schema_version`; newer versions are rejected on load.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use stocklens_core::domain::TimeSeriesTable;
use thiserror::Error;
use tracing::debug;

use crate::config::AnalysisParams;
use crate::result::{ModuleName, ModuleStatus, ResultBundle};

/// Current schema version for persisted artifacts.
pub const SCHEMA_VERSION: u32 = 1;

pub const BUNDLE_FILE: &str = "analysis_results.json";
pub const META_FILE: &str = "analysis_results.meta.json";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to create output directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported schema version {found} (max supported: {supported})")]
    UnsupportedSchema { found: u32, supported: u32 },
}

fn default_schema_version() -> u32 {
    SCHEMA_VERSION
}

/// Status line for one module in the sidecar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleRecord {
    pub module: ModuleName,
    #[serde(flatten)]
    pub status: ModuleStatus,
}

/// Provenance of a persisted bundle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BundleMetadata {
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    pub generated_at: NaiveDateTime,
    pub input_path: PathBuf,
    pub rows: usize,
    pub first_date: Option<NaiveDate>,
    pub last_date: Option<NaiveDate>,
    /// BLAKE3 over the validated table.
    pub dataset_hash: String,
    pub parameters: AnalysisParams,
    pub modules: Vec<ModuleRecord>,
    #[serde(default)]
    pub warnings: Vec<String>,
}

impl BundleMetadata {
    pub fn describe(
        input_path: &Path,
        params: &AnalysisParams,
        table: &TimeSeriesTable,
        bundle: &ResultBundle,
    ) -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            generated_at: chrono::Local::now().naive_local(),
            input_path: input_path.to_path_buf(),
            rows: table.len(),
            first_date: table.first_date(),
            last_date: table.last_date(),
            dataset_hash: table.dataset_hash(),
            parameters: *params,
            modules: bundle
                .statuses()
                .into_iter()
                .map(|(module, status)| ModuleRecord { module, status })
                .collect(),
            warnings: table.warnings().to_vec(),
        }
    }
}

// ─── JSON ───────────────────────────────────────────────────────────

/// Serialize a bundle to pretty JSON.
pub fn bundle_to_json(bundle: &ResultBundle) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(bundle)?)
}

pub fn bundle_from_json(json: &str) -> Result<ResultBundle, ExportError> {
    Ok(serde_json::from_str(json)?)
}

/// Deserialize metadata, rejecting unknown schema versions.
pub fn metadata_from_json(json: &str) -> Result<BundleMetadata, ExportError> {
    let meta: BundleMetadata = serde_json::from_str(json)?;
    if meta.schema_version > SCHEMA_VERSION {
        return Err(ExportError::UnsupportedSchema {
            found: meta.schema_version,
            supported: SCHEMA_VERSION,
        });
    }
    Ok(meta)
}

// ─── Files ──────────────────────────────────────────────────────────

/// Sidecar path for a bundle file: same directory, `META_FILE` name.
pub fn meta_path_for(bundle_path: &Path) -> PathBuf {
    bundle_path.with_file_name(META_FILE)
}

/// Write the bundle and its sidecar into `output_dir`.
///
/// Returns the path of the bundle file.
pub fn save_bundle(
    bundle: &ResultBundle,
    metadata: &BundleMetadata,
    output_dir: &Path,
) -> Result<PathBuf, ExportError> {
    fs::create_dir_all(output_dir).map_err(|source| ExportError::CreateDir {
        path: output_dir.to_path_buf(),
        source,
    })?;

    let bundle_path = output_dir.join(BUNDLE_FILE);
    write_atomic(&bundle_path, &bundle_to_json(bundle)?)?;
    write_atomic(
        &meta_path_for(&bundle_path),
        &serde_json::to_string_pretty(metadata)?,
    )?;

    debug!(path = %bundle_path.display(), "bundle written");
    Ok(bundle_path)
}

pub fn load_bundle(path: &Path) -> Result<ResultBundle, ExportError> {
    bundle_from_json(&read(path)?)
}

pub fn load_metadata(path: &Path) -> Result<BundleMetadata, ExportError> {
    metadata_from_json(&read(path)?)
}

fn read(path: &Path) -> Result<String, ExportError> {
    fs::read_to_string(path).map_err(|source| ExportError::Read {
        path: path.to_path_buf(),
        source,
    })
}

fn write_atomic(path: &Path, contents: &str) -> Result<(), ExportError> {
    let tmp_path = path.with_extension("json.tmp");
    fs::write(&tmp_path, contents).map_err(|source| ExportError::Write {
        path: tmp_path.clone(),
        source,
    })?;
    fs::rename(&tmp_path, path).map_err(|source| {
        let _ = fs::remove_file(&tmp_path);
        ExportError::Write {
            path: path.to_path_buf(),
            source,
        }
    })
}
