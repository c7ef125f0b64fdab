//! Depot configuration file loading and saving.
//!
//! Depot definitions live in a single YAML file (`~/.mason/depots.yml` by
//! default) mapping depot names to [`DepotConfig`] entries. The acquisition
//! core only consumes fully populated configs; this module is the thin
//! persistence collaborator the CLI needs to be usable end to end.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::depot::DepotConfig;
use crate::error::{MasonError, Result};

/// Loads and saves named depot configurations.
#[derive(Debug, Clone)]
pub struct DepotFile {
    path: PathBuf,
}

impl DepotFile {
    /// The default depot file at `~/.mason/depots.yml`.
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("~"))
            .join(".mason")
            .join("depots.yml")
    }

    /// Open a depot file at the default location.
    pub fn new() -> Self {
        Self {
            path: Self::default_path(),
        }
    }

    /// Open a depot file at an explicit path (tests, `--depots` override).
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Where this depot file lives.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load all configured depots. A missing file is an empty set.
    pub fn load(&self) -> Result<BTreeMap<String, DepotConfig>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let content = fs::read_to_string(&self.path)?;
        serde_yaml::from_str(&content).map_err(|e| MasonError::ConfigParseError {
            path: self.path.clone(),
            message: e.to_string(),
        })
    }

    /// Load one depot by name.
    pub fn get(&self, name: &str) -> Result<DepotConfig> {
        self.load()?
            .remove(name)
            .ok_or_else(|| MasonError::UnknownDepot {
                name: name.to_string(),
            })
    }

    /// Add or replace a depot entry and persist the file.
    pub fn upsert(&self, config: DepotConfig) -> Result<()> {
        let mut depots = self.load()?;
        depots.insert(config.name.clone(), config);
        self.save(&depots)
    }

    /// Remove a depot entry and persist the file. Returns whether it existed.
    pub fn remove(&self, name: &str) -> Result<bool> {
        let mut depots = self.load()?;
        let existed = depots.remove(name).is_some();
        if existed {
            self.save(&depots)?;
        }
        Ok(existed)
    }

    fn save(&self, depots: &BTreeMap<String, DepotConfig>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_yaml::to_string(depots)
            .map_err(|e| MasonError::Other(anyhow::anyhow!("Failed to serialize depots: {}", e)))?;
        fs::write(&self.path, content)?;
        Ok(())
    }
}

impl Default for DepotFile {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn depot_file(temp: &TempDir) -> DepotFile {
        DepotFile::at(temp.path().join("depots.yml"))
    }

    #[test]
    fn missing_file_loads_as_empty() {
        let temp = TempDir::new().unwrap();
        let file = depot_file(&temp);
        assert!(file.load().unwrap().is_empty());
    }

    #[test]
    fn upsert_then_get_round_trips() {
        let temp = TempDir::new().unwrap();
        let file = depot_file(&temp);
        file.upsert(DepotConfig::new(
            "mainline",
            "purduesigbots/pros",
            "github-releases",
        ))
        .unwrap();

        let config = file.get("mainline").unwrap();
        assert_eq!(config.location, "purduesigbots/pros");
        assert_eq!(config.registrar, "github-releases");
    }

    #[test]
    fn upsert_replaces_existing_entry() {
        let temp = TempDir::new().unwrap();
        let file = depot_file(&temp);
        file.upsert(DepotConfig::new("d", "old/repo", "github-releases"))
            .unwrap();
        file.upsert(DepotConfig::new("d", "new/repo", "github-releases"))
            .unwrap();

        assert_eq!(file.load().unwrap().len(), 1);
        assert_eq!(file.get("d").unwrap().location, "new/repo");
    }

    #[test]
    fn get_unknown_depot_errors() {
        let temp = TempDir::new().unwrap();
        let file = depot_file(&temp);
        let err = file.get("nope").unwrap_err();
        assert!(matches!(err, MasonError::UnknownDepot { .. }));
    }

    #[test]
    fn remove_reports_whether_entry_existed() {
        let temp = TempDir::new().unwrap();
        let file = depot_file(&temp);
        file.upsert(DepotConfig::new("d", "a/b", "github-releases"))
            .unwrap();

        assert!(file.remove("d").unwrap());
        assert!(!file.remove("d").unwrap());
        assert!(file.load().unwrap().is_empty());
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("depots.yml");
        fs::write(&path, "not: [valid: mapping").unwrap();
        let err = DepotFile::at(&path).load().unwrap_err();
        assert!(matches!(err, MasonError::ConfigParseError { .. }));
    }

    #[test]
    fn registrar_options_survive_round_trip() {
        let temp = TempDir::new().unwrap();
        let file = depot_file(&temp);
        let mut config = DepotConfig::new("d", "a/b", "github-releases");
        config
            .registrar_options
            .insert("include_prerelease".into(), serde_json::json!(true));
        file.upsert(config).unwrap();

        let loaded = file.get("d").unwrap();
        assert_eq!(
            loaded.registrar_options.get("include_prerelease"),
            Some(&serde_json::json!(true))
        );
    }
}
