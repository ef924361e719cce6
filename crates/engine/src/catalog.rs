use std::collections::{HashMap, HashSet};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SettingsError;
use crate::value::{SettingValue, ValueType};

/// Embedded table of every configurable key.
const BUILTIN_CATALOG: &str = include_str!("../data/catalog.toml");

/// Key that carries the mod list. Present in both modes, always exported last.
pub const ACTIVE_MODS_KEY: &str = "ActiveMods";

/// Key whose value must name an entry of the event table.
pub const ACTIVE_EVENT_KEY: &str = "ActiveEvent";

// ---------------------------------------------------------------------------
// Section + Mode
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Section {
    /// `[ServerSettings]` in GameUserSettings.ini
    ServerSettings,
    /// `[/script/shootergame.shootergamemode]` in Game.ini
    GameMode,
}

impl Section {
    pub const ALL: [Section; 2] = [Section::ServerSettings, Section::GameMode];

    /// Literal INI header, without brackets.
    pub fn header(&self) -> &'static str {
        match self {
            Self::ServerSettings => "ServerSettings",
            Self::GameMode => "/script/shootergame.shootergamemode",
        }
    }

    /// File the section is written to by default.
    pub fn file_name(&self) -> &'static str {
        match self {
            Self::ServerSettings => "GameUserSettings.ini",
            Self::GameMode => "Game.ini",
        }
    }

    /// Short name used on the command line.
    pub fn short_name(&self) -> &'static str {
        match self {
            Self::ServerSettings => "server",
            Self::GameMode => "game",
        }
    }

    /// Resolve an INI header. Header names are matched case-insensitively,
    /// since the game itself treats them that way.
    pub fn from_header(header: &str) -> Option<Section> {
        Self::ALL
            .into_iter()
            .find(|s| s.header().eq_ignore_ascii_case(header.trim()))
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.header())
    }
}

impl FromStr for Section {
    type Err = SettingsError;

    /// Accepts the short names (`server`, `game`) or a full header.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "server" | "serversettings" => Ok(Self::ServerSettings),
            "game" => Ok(Self::GameMode),
            _ => Self::from_header(s).ok_or_else(|| SettingsError::UnknownSection(s.to_string())),
        }
    }
}

/// Visibility tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Curated subset of keys (default)
    #[default]
    Basic,
    /// Every key in the catalog
    Advanced,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Basic => write!(f, "basic"),
            Self::Advanced => write!(f, "advanced"),
        }
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "basic" => Ok(Self::Basic),
            "advanced" => Ok(Self::Advanced),
            other => Err(format!("unknown mode '{other}' (expected basic or advanced)")),
        }
    }
}

// ---------------------------------------------------------------------------
// Definitions
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SettingDefinition {
    pub section: Section,
    pub key: String,
    pub value_type: ValueType,
    pub default_value: SettingValue,
    pub description: String,
    /// Shown and exported in basic mode
    pub basic_tier: bool,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CatalogFile {
    section: Vec<SectionRecord>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SectionRecord {
    name: String,
    setting: Vec<SettingRecord>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SettingRecord {
    key: String,
    default: SettingValue,
    #[serde(default)]
    basic: bool,
    #[serde(default)]
    description: String,
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

/// Immutable table of setting definitions, built once per process.
#[derive(Debug, Clone)]
pub struct SettingsCatalog {
    /// Definitions per section in declaration order.
    sections: HashMap<Section, Vec<SettingDefinition>>,
    /// (section, key) -> position in `sections[section]`.
    index: HashMap<(Section, String), usize>,
}

impl SettingsCatalog {
    /// Parse and validate the embedded catalog.
    pub fn builtin() -> Result<Self, SettingsError> {
        Self::from_toml(BUILTIN_CATALOG)
    }

    pub fn from_toml(input: &str) -> Result<Self, SettingsError> {
        let file: CatalogFile =
            toml::from_str(input).map_err(|e| SettingsError::CatalogParse(e.to_string()))?;

        let mut sections: HashMap<Section, Vec<SettingDefinition>> = HashMap::new();
        let mut index = HashMap::new();

        for record in file.section {
            let section = Section::from_header(&record.name).ok_or_else(|| {
                SettingsError::CatalogValidation(format!("unknown section '{}'", record.name))
            })?;
            if sections.contains_key(&section) {
                return Err(SettingsError::CatalogValidation(format!(
                    "section '{section}' declared twice"
                )));
            }

            let mut defs = Vec::with_capacity(record.setting.len());
            for setting in record.setting {
                if setting.key.trim().is_empty() {
                    return Err(SettingsError::CatalogValidation(format!(
                        "empty key in section '{section}'"
                    )));
                }
                let slot = (section, setting.key.clone());
                if index.contains_key(&slot) {
                    return Err(SettingsError::CatalogValidation(format!(
                        "key '{}' declared twice in section '{section}'",
                        setting.key
                    )));
                }
                index.insert(slot, defs.len());
                defs.push(SettingDefinition {
                    section,
                    value_type: setting.default.value_type(),
                    key: setting.key,
                    default_value: setting.default,
                    description: setting.description,
                    basic_tier: setting.basic,
                });
            }
            sections.insert(section, defs);
        }

        let catalog = Self { sections, index };
        catalog.validate()?;
        Ok(catalog)
    }

    fn validate(&self) -> Result<(), SettingsError> {
        for section in Section::ALL {
            let defs = self.sections.get(&section).ok_or_else(|| {
                SettingsError::CatalogValidation(format!("section '{section}' is missing"))
            })?;

            let basic = defs.iter().filter(|d| d.basic_tier).count();
            if basic == 0 {
                return Err(SettingsError::CatalogValidation(format!(
                    "section '{section}' has no basic keys"
                )));
            }
            if basic == defs.len() {
                return Err(SettingsError::CatalogValidation(format!(
                    "section '{section}' has no advanced-only keys"
                )));
            }
        }

        let mods = self
            .lookup(Section::ServerSettings, ACTIVE_MODS_KEY)
            .map_err(|_| {
                SettingsError::CatalogValidation(format!("'{ACTIVE_MODS_KEY}' is missing"))
            })?;
        if mods.value_type != ValueType::String || !mods.basic_tier {
            return Err(SettingsError::CatalogValidation(format!(
                "'{ACTIVE_MODS_KEY}' must be a basic string setting"
            )));
        }

        Ok(())
    }

    pub fn lookup(&self, section: Section, key: &str) -> Result<&SettingDefinition, SettingsError> {
        self.index
            .get(&(section, key.to_string()))
            .and_then(|&i| self.sections.get(&section).and_then(|defs| defs.get(i)))
            .ok_or_else(|| SettingsError::NotFound {
                section,
                key: key.to_string(),
            })
    }

    pub fn contains(&self, section: Section, key: &str) -> bool {
        self.index.contains_key(&(section, key.to_string()))
    }

    /// Every definition of `section`, in declaration order.
    pub fn definitions(&self, section: Section) -> &[SettingDefinition] {
        self.sections.get(&section).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Definitions visible in `mode`, in declaration order.
    pub fn definitions_in_mode(
        &self,
        section: Section,
        mode: Mode,
    ) -> impl Iterator<Item = &SettingDefinition> {
        self.definitions(section)
            .iter()
            .filter(move |d| mode == Mode::Advanced || d.basic_tier)
    }

    /// Keys visible in `mode`, in declaration order.
    pub fn keys_in_mode(&self, section: Section, mode: Mode) -> Vec<&str> {
        self.definitions_in_mode(section, mode)
            .map(|d| d.key.as_str())
            .collect()
    }

    /// Sections that declare `key`.
    pub fn sections_for_key(&self, key: &str) -> Vec<Section> {
        Section::ALL
            .into_iter()
            .filter(|&s| self.contains(s, key))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"
[[section]]
name = "ServerSettings"

[[section.setting]]
key = "DifficultyOffset"
default = 0.2
basic = true
description = "Base difficulty."

[[section.setting]]
key = "RCONPort"
default = 27020

[[section.setting]]
key = "ActiveMods"
default = ""
basic = true

[[section]]
name = "/script/shootergame.shootergamemode"

[[section.setting]]
key = "MatingIntervalMultiplier"
default = 1.0
basic = true

[[section.setting]]
key = "bDisableLootCrates"
default = false
"#;

    #[test]
    fn builtin_catalog_loads() {
        let catalog = SettingsCatalog::builtin().unwrap();
        assert_eq!(catalog.definitions(Section::ServerSettings).len(), 132);
        assert_eq!(catalog.definitions(Section::GameMode).len(), 101);
        assert_eq!(catalog.len(), 233);
    }

    #[test]
    fn builtin_keeps_last_default_for_repeated_keys() {
        let catalog = SettingsCatalog::builtin().unwrap();
        let port = catalog.lookup(Section::ServerSettings, "RCONPort").unwrap();
        assert_eq!(port.default_value, SettingValue::Int(27020));
        let buffer = catalog
            .lookup(Section::ServerSettings, "RCONServerGameLogBuffer")
            .unwrap();
        assert_eq!(buffer.value_type, ValueType::Float);
        let tamed = catalog.lookup(Section::ServerSettings, "MaxTamedDinos").unwrap();
        assert_eq!(tamed.default_value, SettingValue::Float(5000.0));
        let game_tamed = catalog.lookup(Section::GameMode, "MaxTamedDinos").unwrap();
        assert_eq!(game_tamed.default_value, SettingValue::Int(4000));
    }

    #[test]
    fn builtin_basic_server_keys_in_declaration_order() {
        let catalog = SettingsCatalog::builtin().unwrap();
        let keys = catalog.keys_in_mode(Section::ServerSettings, Mode::Basic);
        assert_eq!(
            keys,
            vec![
                "DifficultyOffset",
                "MaxPlayers",
                "ServerPassword",
                "ServerAdminPassword",
                "ServerName",
                "ServerHardcore",
                "DinoDamageMultiplier",
                "PlayerDamageMultiplier",
                "XPMultiplier",
                "TamingSpeedMultiplier",
                "HarvestAmountMultiplier",
                "DayCycleSpeedScale",
                "serverPVE",
                "TheMaxStructuresInRange",
                "ShowMapPlayerLocation",
                "ActiveEvent",
                "ActiveMods",
            ]
        );
    }

    #[test]
    fn builtin_basic_game_keys() {
        let catalog = SettingsCatalog::builtin().unwrap();
        assert_eq!(
            catalog.keys_in_mode(Section::GameMode, Mode::Basic),
            vec![
                "MatingIntervalMultiplier",
                "EggHatchSpeedMultiplier",
                "BabyMatureSpeedMultiplier",
                "BabyImprintingStatScaleMultiplier",
                "MaxTamedDinos",
                "GlobalSpoilingTimeMultiplier",
                "PvEStructureDecayPeriodMultiplier",
            ]
        );
    }

    #[test]
    fn basic_is_strict_subset_of_advanced() {
        let catalog = SettingsCatalog::builtin().unwrap();
        for section in Section::ALL {
            let basic = catalog.keys_in_mode(section, Mode::Basic);
            let advanced: HashSet<&str> =
                catalog.keys_in_mode(section, Mode::Advanced).into_iter().collect();
            assert!(!basic.is_empty());
            assert!(basic.len() < advanced.len());
            assert!(basic.iter().all(|k| advanced.contains(k)));
        }
    }

    #[test]
    fn advanced_mode_is_declaration_order() {
        let catalog = SettingsCatalog::from_toml(MINIMAL).unwrap();
        assert_eq!(
            catalog.keys_in_mode(Section::ServerSettings, Mode::Advanced),
            vec!["DifficultyOffset", "RCONPort", "ActiveMods"]
        );
        assert_eq!(
            catalog.keys_in_mode(Section::ServerSettings, Mode::Basic),
            vec!["DifficultyOffset", "ActiveMods"]
        );
    }

    #[test]
    fn lookup_reports_not_found() {
        let catalog = SettingsCatalog::from_toml(MINIMAL).unwrap();
        let err = catalog.lookup(Section::GameMode, "RCONPort").unwrap_err();
        assert_eq!(
            err,
            SettingsError::NotFound {
                section: Section::GameMode,
                key: "RCONPort".into()
            }
        );
    }

    #[test]
    fn lookup_reads_types_from_defaults() {
        let catalog = SettingsCatalog::from_toml(MINIMAL).unwrap();
        let def = catalog.lookup(Section::GameMode, "bDisableLootCrates").unwrap();
        assert_eq!(def.value_type, ValueType::Bool);
        assert!(!def.basic_tier);
        assert_eq!(def.description, "");
    }

    #[test]
    fn reject_duplicate_key() {
        let input = MINIMAL.replace("key = \"RCONPort\"", "key = \"DifficultyOffset\"");
        let err = SettingsCatalog::from_toml(&input).unwrap_err();
        assert!(err.to_string().contains("declared twice"));
    }

    #[test]
    fn reject_missing_active_mods() {
        let input = MINIMAL.replace("key = \"ActiveMods\"", "key = \"SomethingElse\"");
        let err = SettingsCatalog::from_toml(&input).unwrap_err();
        assert!(err.to_string().contains("ActiveMods"));
    }

    #[test]
    fn reject_section_without_advanced_keys() {
        let input = MINIMAL.replace(
            "key = \"bDisableLootCrates\"\ndefault = false",
            "key = \"bDisableLootCrates\"\ndefault = false\nbasic = true",
        );
        let err = SettingsCatalog::from_toml(&input).unwrap_err();
        assert!(err.to_string().contains("advanced-only"));
    }

    #[test]
    fn reject_unknown_section() {
        let input = MINIMAL.replace("name = \"ServerSettings\"", "name = \"SessionSettings\"");
        assert!(matches!(
            SettingsCatalog::from_toml(&input),
            Err(SettingsError::CatalogValidation(_))
        ));
    }

    #[test]
    fn reject_malformed_toml() {
        assert!(matches!(
            SettingsCatalog::from_toml("[[section]\nname ="),
            Err(SettingsError::CatalogParse(_))
        ));
    }

    #[test]
    fn section_parsing() {
        assert_eq!("server".parse::<Section>().unwrap(), Section::ServerSettings);
        assert_eq!("game".parse::<Section>().unwrap(), Section::GameMode);
        assert_eq!(
            "/Script/ShooterGame.ShooterGameMode".parse::<Section>().unwrap(),
            Section::GameMode
        );
        assert!("session".parse::<Section>().is_err());
    }

    #[test]
    fn sections_for_shared_key() {
        let catalog = SettingsCatalog::builtin().unwrap();
        assert_eq!(
            catalog.sections_for_key("MaxTamedDinos"),
            vec![Section::ServerSettings, Section::GameMode]
        );
        assert_eq!(catalog.sections_for_key("RCONPort"), vec![Section::ServerSettings]);
        assert!(catalog.sections_for_key("NoSuchKey").is_empty());
    }
}
