//! # File I/O Module
//!
//! Design file operations with safety features:
//! - **Atomic saves**: write to `<path>.tmp`, fsync, rename over the target
//! - **Tolerant loads**: unknown keys ignored, missing keys keep prior values
//! - **Version validation**: when a `meta` block is present its schema
//!   version must be compatible
//!
//! ## Example
//!
//! ```rust,no_run
//! use alula_core::design::Design;
//! use alula_core::config::VehicleType;
//! use alula_core::file_io::{load_design, save_design};
//! use std::path::Path;
//!
//! let design = Design::new(VehicleType::Glider);
//! let path = Path::new("glider.json");
//!
//! save_design(&design, path)?;
//! let loaded = load_design(path)?;
//! assert_eq!(loaded.config, design.config);
//! # Ok::<(), alula_core::errors::AlulaError>(())
//! ```

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::config::InputMap;
use crate::design::{Design, DesignMeta, SCHEMA_VERSION};
use crate::errors::{AlulaError, AlulaResult};
use crate::weight_balance::ComponentRow;

/// On-disk shape of a design.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DesignFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<DesignMeta>,

    /// Persisted key → value (numbers are written as strings)
    #[serde(default)]
    pub main_inputs: InputMap,

    /// Replaces the whole table when present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component_weights: Option<Vec<ComponentRow>>,
}

/// Save a design with atomic write semantics.
///
/// The save process:
/// 1. Serialize the design to pretty JSON
/// 2. Write to `<path>.tmp`
/// 3. Sync to disk (fsync)
/// 4. Rename over `path`
pub fn save_design(design: &Design, path: &Path) -> AlulaResult<()> {
    save_design_file(&design.to_file(), path)
}

/// Write an already-built [`DesignFile`] atomically.
pub fn save_design_file(file: &DesignFile, path: &Path) -> AlulaResult<()> {
    let json = serde_json::to_string_pretty(file).map_err(|e| AlulaError::serialization(e.to_string()))?;

    let tmp_path = tmp_path_for(path);

    write_synced(&tmp_path, json.as_bytes())
        .and_then(|()| {
            fs::rename(&tmp_path, path)
                .map_err(|e| AlulaError::file_error("rename to final", path.display().to_string(), e.to_string()))
        })
        .map_err(|e| {
            // Never leave a partial temp file behind
            let _ = fs::remove_file(&tmp_path);
            e
        })
}

fn write_synced(tmp_path: &Path, bytes: &[u8]) -> AlulaResult<()> {
    let fail = |action: &str, e: std::io::Error| {
        AlulaError::file_error(action, tmp_path.display().to_string(), e.to_string())
    };
    let mut tmp_file = File::create(tmp_path).map_err(|e| fail("create temp file", e))?;
    tmp_file.write_all(bytes).map_err(|e| fail("write temp file", e))?;
    tmp_file.sync_all().map_err(|e| fail("sync temp file", e))
}

/// Read and validate a design file without applying it.
///
/// # Returns
///
/// * `Ok(DesignFile)` - Parsed file
/// * `Err(AlulaError::VersionMismatch)` - `meta.version` is incompatible
/// * `Err(AlulaError::SerializationError)` - Not a JSON object of the expected shape
/// * `Err(AlulaError::FileError)` - I/O error
pub fn read_design_file(path: &Path) -> AlulaResult<DesignFile> {
    let mut file =
        File::open(path).map_err(|e| AlulaError::file_error("open", path.display().to_string(), e.to_string()))?;

    let mut contents = String::new();
    file.read_to_string(&mut contents)
        .map_err(|e| AlulaError::file_error("read", path.display().to_string(), e.to_string()))?;

    parse_design_file(&contents)
        .map_err(|e| match e {
            AlulaError::SerializationError { reason } => {
                AlulaError::serialization(format!("Invalid design file {}: {}", path.display(), reason))
            }
            other => other,
        })
}

/// Parse design file text and validate its schema version.
pub fn parse_design_file(contents: &str) -> AlulaResult<DesignFile> {
    let file: DesignFile = serde_json::from_str(contents).map_err(|e| AlulaError::serialization(e.to_string()))?;
    if let Some(meta) = &file.meta {
        validate_version(&meta.version)?;
    }
    Ok(file)
}

/// Load a design, starting from Fixed Wing defaults.
pub fn load_design(path: &Path) -> AlulaResult<Design> {
    let file = read_design_file(path)?;
    Ok(Design::from_file(&file))
}

/// Merge a design file into an existing design.
///
/// The file is read and validated before anything is touched, so on any
/// error `design` is left exactly as it was.
pub fn load_design_into(design: &mut Design, path: &Path) -> AlulaResult<()> {
    let file = read_design_file(path)?;
    design.apply_file(&file);
    Ok(())
}

/// Validate that a file version is compatible with the current schema.
pub fn validate_version(file_version: &str) -> AlulaResult<()> {
    let mismatch = || AlulaError::VersionMismatch {
        file_version: file_version.to_string(),
        expected_version: SCHEMA_VERSION.to_string(),
    };

    let file_parts: Vec<u32> = file_version.split('.').filter_map(|p| p.parse().ok()).collect();
    let current_parts: Vec<u32> = SCHEMA_VERSION.split('.').filter_map(|p| p.parse().ok()).collect();

    if file_parts.is_empty() || current_parts.is_empty() {
        return Err(mismatch());
    }

    // Major version must match
    if file_parts[0] != current_parts[0] {
        return Err(mismatch());
    }

    // For 0.x versions the file's minor version must not be newer than ours
    if current_parts[0] == 0 && file_parts.len() > 1 && current_parts.len() > 1 && file_parts[1] > current_parts[1] {
        return Err(mismatch());
    }

    Ok(())
}

/// `<path>.tmp` alongside the target
fn tmp_path_for(path: &Path) -> PathBuf {
    let mut name: OsString = path.file_name().map(OsString::from).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
