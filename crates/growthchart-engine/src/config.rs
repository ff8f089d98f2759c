use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use growthchart_reference::manifest::{DatasetManifest, ManifestEntry};

use crate::error::ConfigError;

/// Current config version. Bump this when adding fields or changing shape.
/// Each bump requires a corresponding entry in [`migrate`].
const CURRENT_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Schema version. Missing or 0 = pre-versioned config.
    #[serde(default)]
    pub config_version: u32,
    /// Directory holding the reference JSON files.
    pub dataset_dir: PathBuf,
    /// Label of the reference bundle, carried into the store for logging.
    /// Added in v1.
    pub dataset_version: String,
    /// Files making up the bundle. Added in v1; older configs get the
    /// built-in manifest.
    pub tables: Vec<ManifestEntry>,
}

impl EngineConfig {
    pub fn new(dataset_dir: impl Into<PathBuf>) -> Self {
        Self {
            config_version: CURRENT_VERSION,
            dataset_dir: dataset_dir.into(),
            dataset_version: "unversioned".to_string(),
            tables: DatasetManifest::builtin().entries,
        }
    }

    pub fn manifest(&self) -> DatasetManifest {
        DatasetManifest::new(self.tables.clone())
    }
}

pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    let base = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
    Ok(base.join("growthchart").join("config.json"))
}

pub fn load_config(path: &Path) -> Result<EngineConfig, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    // Parse as raw JSON so we can run migrations before deserializing.
    let json: serde_json::Value = serde_json::from_str(&contents)?;
    let on_disk_version = json
        .get("config_version")
        .and_then(|v| v.as_u64())
        .unwrap_or(0) as u32;

    let migrated = migrate(json, on_disk_version)?;
    let config: EngineConfig = serde_json::from_value(migrated)?;
    Ok(config)
}

/// Run sequential migrations from `from_version` up to [`CURRENT_VERSION`].
fn migrate(
    mut json: serde_json::Value,
    from_version: u32,
) -> Result<serde_json::Value, ConfigError> {
    if from_version > CURRENT_VERSION {
        return Err(ConfigError::NewerVersion {
            found: from_version,
            supported: CURRENT_VERSION,
        });
    }

    // v0 → v1: add dataset_version and the table manifest
    if from_version < 1 {
        let obj = json.as_object_mut().ok_or(ConfigError::NotAnObject)?;
        obj.entry("dataset_version")
            .or_insert(serde_json::Value::String("unversioned".to_string()));
        if !obj.contains_key("tables") {
            obj.insert(
                "tables".to_string(),
                serde_json::to_value(DatasetManifest::builtin().entries)?,
            );
        }
        obj.insert(
            "config_version".to_string(),
            serde_json::Value::Number(1.into()),
        );
        tracing::debug!("migrated config v0 → v1 (added dataset_version, tables)");
    }

    Ok(json)
}

pub fn save_config(path: &Path, config: &EngineConfig) -> Result<(), ConfigError> {
    let io_err = |source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(io_err)?;
    }

    // Always write the current version, regardless of what was loaded.
    let mut stamped = config.clone();
    stamped.config_version = CURRENT_VERSION;
    let json = serde_json::to_string_pretty(&stamped)?;

    // Write to a temp file then rename for atomicity
    let tmp_path = path.with_extension("json.tmp");
    std::fs::write(&tmp_path, json.as_bytes()).map_err(io_err)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(&tmp_path, std::fs::Permissions::from_mode(0o600))
            .map_err(io_err)?;
    }

    std::fs::rename(&tmp_path, path).map_err(io_err)?;

    tracing::info!(path = %path.display(), "config saved");
    Ok(())
}
