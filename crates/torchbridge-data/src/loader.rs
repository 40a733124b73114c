//! Reading and writing preset library files.
//!
//! A library file holds a list of presets. JSON and RON files hold the list
//! at the top level; TOML files hold it under the `presets` key. Entries are
//! read as raw values and validated by the core importer, so one malformed
//! entry does not sink the rest of the file.
//!
//! RON entries use struct syntax, `(name: "…", bridgeWidth: 2, …)`, with the
//! sides written as strings. They are read into [`RawPreset`] first, so the
//! file must have that overall shape; the field values are still judged by
//! the importer.

use std::path::{Path, PathBuf};

use serde_json::Value;
use torchbridge_core::import::{ImportReport, import_configurations};
use torchbridge_core::preset::Preset;
use torchbridge_core::repository::PresetRepository;
use tracing::{debug, info};

use crate::schema::{PresetData, RawPreset, TomlLibrary};

/// Key holding the preset list in TOML libraries.
pub const TOML_PRESETS_KEY: &str = "presets";

// ===========================================================================
// Errors
// ===========================================================================

/// Errors that can occur while reading or writing a preset library.
#[derive(Debug, thiserror::Error)]
pub enum DataLoadError {
    /// The file has an extension we don't support.
    #[error("unsupported format for file: {file}")]
    UnsupportedFormat { file: PathBuf },

    /// The file could not be parsed in its declared format.
    #[error("parse error in {file}: {detail}")]
    Parse { file: PathBuf, detail: String },

    /// A TOML library lacks its `presets` table array.
    #[error("missing key '{key}' in {file}")]
    MissingKey { file: PathBuf, key: &'static str },

    /// The preset list is not a list.
    #[error("expected a list of presets in {file}")]
    NotAnArray { file: PathBuf },

    /// Presets could not be serialized for writing.
    #[error("serialize error for {file}: {detail}")]
    Serialize { file: PathBuf, detail: String },

    /// An I/O error occurred.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

// ===========================================================================
// Format detection
// ===========================================================================

/// Supported library file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Ron,
    Toml,
    Json,
}

/// Detect the format of a file based on its extension.
pub fn detect_format(path: &Path) -> Result<Format, DataLoadError> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("ron") => Ok(Format::Ron),
        Some("toml") => Ok(Format::Toml),
        Some("json") => Ok(Format::Json),
        _ => Err(DataLoadError::UnsupportedFormat {
            file: path.to_path_buf(),
        }),
    }
}

// ===========================================================================
// Reading
// ===========================================================================

fn parse_error(path: &Path, detail: impl ToString) -> DataLoadError {
    DataLoadError::Parse {
        file: path.to_path_buf(),
        detail: detail.to_string(),
    }
}

/// Read the raw, unvalidated preset entries of a library file.
pub fn read_raw_presets(path: &Path) -> Result<Vec<Value>, DataLoadError> {
    let format = detect_format(path)?;
    let content = std::fs::read_to_string(path)?;

    let list = match format {
        Format::Json => serde_json::from_str::<Value>(&content).map_err(|e| parse_error(path, e))?,
        Format::Ron => {
            let entries: Vec<RawPreset> =
                ron::from_str(&content).map_err(|e| parse_error(path, e))?;
            Value::Array(entries.into_iter().map(Value::from).collect())
        }
        Format::Toml => {
            let table: toml::Value = toml::from_str(&content).map_err(|e| parse_error(path, e))?;
            let presets = table
                .get(TOML_PRESETS_KEY)
                .ok_or_else(|| DataLoadError::MissingKey {
                    file: path.to_path_buf(),
                    key: TOML_PRESETS_KEY,
                })?;
            serde_json::to_value(presets).map_err(|e| parse_error(path, e))?
        }
    };

    match list {
        Value::Array(entries) => {
            debug!(file = %path.display(), entries = entries.len(), "read preset library");
            Ok(entries)
        }
        _ => Err(DataLoadError::NotAnArray {
            file: path.to_path_buf(),
        }),
    }
}

/// Read a library file and validate every entry.
///
/// File-level problems (I/O, syntax, wrong shape) are errors. Entry-level
/// problems end up in the report's `failed` list.
pub fn load_presets(path: &Path) -> Result<ImportReport, DataLoadError> {
    let raw = read_raw_presets(path)?;
    let report = import_configurations(&raw);
    info!(
        file = %path.display(),
        loaded = report.successful.len(),
        rejected = report.failed.len(),
        "loaded preset library"
    );
    Ok(report)
}

/// Build a repository from the built-in library plus every valid preset in
/// the given files, in order. Names already taken are kept as they are.
pub fn load_library<P: AsRef<Path>>(
    paths: impl IntoIterator<Item = P>,
) -> Result<(PresetRepository, Vec<ImportReport>), DataLoadError> {
    let mut repository = PresetRepository::builtin();
    let mut reports = Vec::new();
    for path in paths {
        let raw = read_raw_presets(path.as_ref())?;
        reports.push(repository.import(&raw));
    }
    Ok((repository, reports))
}

// ===========================================================================
// Writing
// ===========================================================================

/// Write presets to a library file in the format its extension names.
pub fn write_presets(path: &Path, presets: &[Preset]) -> Result<(), DataLoadError> {
    let format = detect_format(path)?;
    let data: Vec<PresetData> = presets.iter().map(PresetData::from).collect();
    let serialize_error = |detail: String| DataLoadError::Serialize {
        file: path.to_path_buf(),
        detail,
    };

    let content = match format {
        Format::Json => {
            serde_json::to_string_pretty(&data).map_err(|e| serialize_error(e.to_string()))?
        }
        // Written through the loose form so sides land as strings.
        Format::Ron => {
            let raw: Vec<RawPreset> = data.iter().map(RawPreset::from).collect();
            ron::ser::to_string_pretty(&raw, ron::ser::PrettyConfig::default())
                .map_err(|e| serialize_error(e.to_string()))?
        }
        Format::Toml => toml::to_string_pretty(&TomlLibrary { presets: data })
            .map_err(|e| serialize_error(e.to_string()))?,
    };

    std::fs::write(path, content)?;
    debug!(file = %path.display(), presets = presets.len(), "wrote preset library");
    Ok(())
}

// ===========================================================================
// Tests
// ===========================================================================
