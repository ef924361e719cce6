use std::fs;
use std::path::{Path, PathBuf};

use ark_settings_engine::species::DEFAULT_SPECIES;
use ark_settings_engine::Mode;
use serde::{Deserialize, Serialize};

/// Generator preferences. Command-line flags override every field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorSettings {
    // Output
    #[serde(rename = "output.directory")]
    pub output_directory: Option<PathBuf>,  // None = current directory

    // Mode
    #[serde(rename = "mode.default")]
    pub default_mode: Mode,

    // Calculator
    #[serde(rename = "calculator.species")]
    pub species: String,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            output_directory: None,
            default_mode: Mode::Basic,
            species: DEFAULT_SPECIES.to_string(),
        }
    }
}

const DEFAULT_FILE: &str = r#"{
    // Where generate writes GameUserSettings.ini and Game.ini
    // null = current directory
    "output.directory": null,

    // "basic" or "advanced"
    "mode.default": "basic",

    // Species used by calc when --species is not given
    "calculator.species": "Argentavis"
}
"#;

impl GeneratorSettings {
    /// Get the settings file path
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("ark-settings");
        config_dir.join("settings.json")
    }

    /// Load settings from disk, falling back to defaults. The first run
    /// writes a commented default file.
    pub fn load() -> Self {
        let path = Self::config_path();

        if !path.exists() {
            if let Err(e) = Self::create_default_file(&path) {
                log::warn!("could not write default {}: {e}", path.display());
            }
            return Self::default();
        }

        match Self::load_from(&path) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("{e}; using default settings");
                Self::default()
            }
        }
    }

    /// Strict load of one file.
    pub fn load_from(path: &Path) -> Result<Self, String> {
        let contents = fs::read_to_string(path)
            .map_err(|e| format!("error reading {}: {e}", path.display()))?;

        // Strip comments (lines starting with //)
        let cleaned: String = contents
            .lines()
            .filter(|line| !line.trim().starts_with("//"))
            .collect::<Vec<_>>()
            .join("\n");

        serde_json::from_str(&cleaned)
            .map_err(|e| format!("error parsing {}: {e}", path.display()))
    }

    pub fn save_to(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| e.to_string())?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|e| e.to_string())?;
        fs::write(path, json).map_err(|e| e.to_string())
    }

    /// Output directory, or `.` when unset.
    pub fn output_dir(&self) -> PathBuf {
        self.output_directory
            .clone()
            .unwrap_or_else(|| PathBuf::from("."))
    }

    fn create_default_file(path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| e.to_string())?;
        }
        fs::write(path, DEFAULT_FILE).map_err(|e| e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn default_file_parses_to_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");
        GeneratorSettings::create_default_file(&path).unwrap();
        assert_eq!(GeneratorSettings::load_from(&path).unwrap(), GeneratorSettings::default());
    }

    #[test]
    fn save_then_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");
        let settings = GeneratorSettings {
            output_directory: Some(PathBuf::from("/srv/ark/config")),
            default_mode: Mode::Advanced,
            species: "Rex".into(),
        };
        settings.save_to(&path).unwrap();
        assert_eq!(GeneratorSettings::load_from(&path).unwrap(), settings);
    }

    #[test]
    fn missing_keys_take_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "{\n  // only the mode\n  \"mode.default\": \"advanced\"\n}\n").unwrap();
        let settings = GeneratorSettings::load_from(&path).unwrap();
        assert_eq!(settings.default_mode, Mode::Advanced);
        assert_eq!(settings.species, "Argentavis");
        assert_eq!(settings.output_dir(), PathBuf::from("."));
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "{ \"mode.default\": \"expert\" }").unwrap();
        assert!(GeneratorSettings::load_from(&path).unwrap_err().contains("error parsing"));
    }
}
