//! Current setting values keyed by (section, key).

use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;

use crate::catalog::{Mode, Section, SettingDefinition, SettingsCatalog};
use crate::error::SettingsError;
use crate::value::SettingValue;

/// Mutable values for one session. Keys never set read as their catalog
/// default; every stored entry resolves to exactly one definition.
#[derive(Debug, Clone)]
pub struct ValueStore {
    catalog: Arc<SettingsCatalog>,
    values: HashMap<(Section, String), SettingValue>,
}

impl ValueStore {
    pub fn new(catalog: Arc<SettingsCatalog>) -> Self {
        Self {
            catalog,
            values: HashMap::new(),
        }
    }

    pub fn catalog(&self) -> &SettingsCatalog {
        &self.catalog
    }

    /// Current value, or the definition's default if never set.
    pub fn get(&self, section: Section, key: &str) -> Result<&SettingValue, SettingsError> {
        let def = self.catalog.lookup(section, key)?;
        Ok(self
            .values
            .get(&(section, key.to_string()))
            .unwrap_or(&def.default_value))
    }

    /// Overwrite a value. Validation happens before the write, so a failed
    /// call leaves the previous value in place.
    pub fn set(&mut self, section: Section, key: &str, value: SettingValue) -> Result<(), SettingsError> {
        let def = self.catalog.lookup(section, key)?;
        check_value(def, &value)?;
        log::debug!("set [{section}] {key} = {value}");
        self.values.insert((section, key.to_string()), value);
        Ok(())
    }

    /// Parse `raw` with the key's declared type, then `set` it.
    pub fn set_raw(&mut self, section: Section, key: &str, raw: &str) -> Result<(), SettingsError> {
        let value = parse_for(self.catalog.lookup(section, key)?, raw)?;
        self.set(section, key, value)
    }

    /// Drop every edit; all keys read as defaults again.
    pub fn reset(&mut self) {
        self.values.clear();
    }

    /// Keys whose value differs from the default, in declaration order.
    pub fn overrides(&self) -> Vec<(Section, &str, &SettingValue)> {
        let mut out = Vec::new();
        for section in Section::ALL {
            for def in self.catalog.definitions(section) {
                if let Some(value) = self.values.get(&(section, def.key.clone())) {
                    if *value != def.default_value {
                        out.push((section, def.key.as_str(), value));
                    }
                }
            }
        }
        out
    }

    /// Owned copy of the values visible in `mode`. Later edits to the store
    /// never show up in a snapshot that was already taken.
    pub fn snapshot(&self, mode: Mode) -> Snapshot {
        let sections = Section::ALL
            .into_iter()
            .map(|section| {
                let entries = self
                    .catalog
                    .definitions_in_mode(section, mode)
                    .map(|def| {
                        let value = self
                            .values
                            .get(&(section, def.key.clone()))
                            .unwrap_or(&def.default_value)
                            .clone();
                        (def.key.clone(), value)
                    })
                    .collect();
                SnapshotSection { section, entries }
            })
            .collect();
        Snapshot { mode, sections }
    }
}

pub(crate) fn check_value(def: &SettingDefinition, value: &SettingValue) -> Result<(), SettingsError> {
    let found = value.value_type();
    if found != def.value_type {
        return Err(SettingsError::TypeMismatch {
            section: def.section,
            key: def.key.clone(),
            expected: def.value_type,
            found,
        });
    }
    if let SettingValue::Float(v) = value {
        if !v.is_finite() {
            return Err(SettingsError::InvalidValue {
                section: def.section,
                key: def.key.clone(),
                raw: v.to_string(),
                reason: "number must be finite".into(),
            });
        }
    }
    Ok(())
}

pub(crate) fn parse_for(def: &SettingDefinition, raw: &str) -> Result<SettingValue, SettingsError> {
    SettingValue::parse_as(def.value_type, raw).map_err(|reason| SettingsError::InvalidValue {
        section: def.section,
        key: def.key.clone(),
        raw: raw.to_string(),
        reason,
    })
}

// ---------------------------------------------------------------------------
// Snapshot
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SnapshotSection {
    pub section: Section,
    /// (key, value) in `keys_in_mode` order
    pub entries: Vec<(String, SettingValue)>,
}

/// Ordered (section, key) -> value mapping for one mode.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub mode: Mode,
    pub sections: Vec<SnapshotSection>,
}

impl Snapshot {
    pub fn section(&self, section: Section) -> Option<&SnapshotSection> {
        self.sections.iter().find(|s| s.section == section)
    }

    pub fn get(&self, section: Section, key: &str) -> Option<&SettingValue> {
        self.section(section)?
            .entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.sections.iter().map(|s| s.entries.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
