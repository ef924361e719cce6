//! Mode-filtered projection of the store for presentation.

use serde::Serialize;

use crate::catalog::{Mode, Section, SettingDefinition, ACTIVE_MODS_KEY};
use crate::mods::ModList;
use crate::store::ValueStore;
use crate::value::SettingValue;

/// One control's worth of data: what the key is and what it holds now.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewRow<'a> {
    #[serde(flatten)]
    pub definition: &'a SettingDefinition,
    pub value: SettingValue,
    pub modified: bool,
}

pub struct ModeView<'a> {
    store: &'a ValueStore,
    mods: &'a ModList,
    mode: Mode,
}

impl<'a> ModeView<'a> {
    pub fn new(store: &'a ValueStore, mods: &'a ModList, mode: Mode) -> Self {
        Self { store, mods, mode }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Rows of `section` visible in this mode, in catalog order. The
    /// `ActiveMods` row always reflects the mod list.
    pub fn rows(&self, section: Section) -> Vec<ViewRow<'a>> {
        let store = self.store;
        let mods = self.mods;
        store
            .catalog()
            .definitions_in_mode(section, self.mode)
            .map(|definition| {
                let value = if section == Section::ServerSettings && definition.key == ACTIVE_MODS_KEY {
                    SettingValue::Str(mods.to_csv())
                } else {
                    store
                        .get(section, &definition.key)
                        .cloned()
                        .unwrap_or_else(|_| definition.default_value.clone())
                };
                let modified = value != definition.default_value;
                ViewRow { definition, value, modified }
            })
            .collect()
    }

    pub fn keys(&self, section: Section) -> Vec<&'a str> {
        let store: &'a ValueStore = self.store;
        store.catalog().keys_in_mode(section, self.mode)
    }
}
