//! Import: apply parsed INI sections back onto a store and mod list.

use serde::Serialize;

use crate::catalog::{Section, ACTIVE_EVENT_KEY, ACTIVE_MODS_KEY};
use crate::error::SettingsError;
use crate::events;
use crate::export::IniSection;
use crate::mods::ModList;
use crate::store::{parse_for, ValueStore};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedEntry {
    pub header: String,
    /// None when the whole section was skipped
    pub key: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportReport {
    pub applied: usize,
    pub mods: usize,
    pub skipped: Vec<SkippedEntry>,
}

/// Assign every known key in `sections`. Unknown sections, keys and
/// ActiveEvent names are skipped and reported; a value that does not parse aborts the import.
/// Nothing is written unless every value parses.
pub fn apply(
    store: &mut ValueStore,
    mods: &mut ModList,
    sections: &[IniSection],
) -> Result<ImportReport, SettingsError> {
    let mut next_store = store.clone();
    let mut next_mods = mods.clone();
    let mut report = ImportReport::default();

    for ini in sections {
        let Some(section) = ini.section() else {
            log::warn!("skipping unknown section [{}]", ini.header);
            report.skipped.push(SkippedEntry {
                header: ini.header.clone(),
                key: None,
            });
            continue;
        };

        for (key, raw) in &ini.entries {
            if section == Section::ServerSettings && key == ACTIVE_MODS_KEY {
                next_mods.from_csv(raw)?;
                report.mods = next_mods.len();
                continue;
            }
            let Ok(def) = next_store.catalog().lookup(section, key) else {
                log::warn!("skipping unknown key '{key}' in [{section}]");
                report.skipped.push(SkippedEntry {
                    header: ini.header.clone(),
                    key: Some(key.clone()),
                });
                continue;
            };
            if section == Section::ServerSettings && key == ACTIVE_EVENT_KEY {
                if let Err(e) = events::find(raw) {
                    log::warn!("skipping {key} in [{section}]: {e}");
                    report.skipped.push(SkippedEntry {
                        header: ini.header.clone(),
                        key: Some(key.clone()),
                    });
                    continue;
                }
            }
            let value = parse_for(def, raw)?;
            next_store.set(section, key, value)?;
            report.applied += 1;
        }
    }

    *store = next_store;
    *mods = next_mods;
    log::info!(
        "imported {} values and {} mods ({} skipped)",
        report.applied,
        report.mods,
        report.skipped.len()
    );
    Ok(report)
}
