//! One editing session: the boundary a presentation layer talks to.

use std::sync::Arc;

use crate::calc::{self, DerivedStats};
use crate::catalog::{Mode, Section, SettingsCatalog, ACTIVE_EVENT_KEY, ACTIVE_MODS_KEY};
use crate::error::SettingsError;
use crate::events;
use crate::export::{self, ExportedConfig, IniSection};
use crate::import::{self, ImportReport};
use crate::mods::ModList;
use crate::species::{self, SpeciesProfile, DEFAULT_SPECIES};
use crate::store::{parse_for, ValueStore};
use crate::view::ModeView;

pub struct SettingsSession {
    store: ValueStore,
    mods: ModList,
    mode: Mode,
    species: &'static SpeciesProfile,
}

impl SettingsSession {
    /// Fresh session: catalog defaults, no mods, basic mode, default species.
    pub fn new(catalog: Arc<SettingsCatalog>) -> Result<Self, SettingsError> {
        Ok(Self {
            store: ValueStore::new(catalog),
            mods: ModList::new(),
            mode: Mode::default(),
            species: species::find(DEFAULT_SPECIES)?,
        })
    }

    pub fn catalog(&self) -> &SettingsCatalog {
        self.store.catalog()
    }

    pub fn store(&self) -> &ValueStore {
        &self.store
    }

    pub fn mods(&self) -> &ModList {
        &self.mods
    }

    pub fn mods_mut(&mut self) -> &mut ModList {
        &mut self.mods
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
    }

    pub fn species(&self) -> &'static SpeciesProfile {
        self.species
    }

    pub fn select_species(&mut self, name: &str) -> Result<&'static SpeciesProfile, SettingsError> {
        self.species = species::find(name)?;
        Ok(self.species)
    }

    /// Rows for the current mode.
    pub fn render_catalog(&self) -> ModeView<'_> {
        ModeView::new(&self.store, &self.mods, self.mode)
    }

    /// Apply a raw edit from a control. Returns fresh derived stats when the
    /// key feeds the calculator and every rate is usable. A rate that is not
    /// positive is refused before anything is stored.
    pub fn on_edit(
        &mut self,
        section: Section,
        key: &str,
        raw: &str,
    ) -> Result<Option<DerivedStats>, SettingsError> {
        if section == Section::ServerSettings && key == ACTIVE_MODS_KEY {
            self.mods.from_csv(raw)?;
            return Ok(None);
        }

        let value = parse_for(self.store.catalog().lookup(section, key)?, raw)?;
        if section == Section::ServerSettings && key == ACTIVE_EVENT_KEY {
            if let Some(name) = value.as_str() {
                events::find(name)?;
            }
        }
        if let (Some(name), Some(v)) = (calc::multiplier_name(section, key), value.as_f64()) {
            calc::check_multiplier(name, v)?;
        }
        self.store.set(section, key, value)?;
        if !calc::affects_derived(section, key) {
            return Ok(None);
        }

        // Another rate may still be unusable (loaded from a file); the edit
        // stands either way.
        match self.derived() {
            Ok(stats) => {
                log::debug!(
                    "recomputed {}: taming {:.1} min, max wild level {:.0}",
                    stats.species,
                    stats.taming_time,
                    stats.max_wild_level
                );
                Ok(Some(stats))
            }
            Err(e) => {
                log::warn!("derived stats unavailable: {e}");
                Ok(None)
            }
        }
    }

    /// Derived stats for the selected species at the current rates.
    pub fn derived(&self) -> Result<DerivedStats, SettingsError> {
        calc::derived_from_store(self.species, &self.store)
    }

    /// Snapshot the current mode and export it with the mod list.
    pub fn on_generate(&self) -> ExportedConfig {
        export::export(&self.store.snapshot(self.mode), &self.mods)
    }

    /// Load previously generated sections into this session.
    pub fn import(&mut self, sections: &[IniSection]) -> Result<ImportReport, SettingsError> {
        import::apply(&mut self.store, &mut self.mods, sections)
    }

    /// Defaults everywhere, empty mod list, basic mode.
    pub fn reset(&mut self) {
        self.store.reset();
        self.mods.clear();
        self.mode = Mode::Basic;
    }
}
