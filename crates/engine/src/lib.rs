//! `ark-settings-engine`: settings core for the server config generator.
//!
//! Pure crate: holds the setting catalog, current values, the mod list and
//! the derived-stat calculator, and turns them into the two INI sections.
//! Writing files is left to the caller.

pub mod calc;
pub mod catalog;
pub mod error;
pub mod events;
pub mod export;
pub mod import;
pub mod mods;
pub mod session;
pub mod species;
pub mod store;
pub mod value;
pub mod view;

pub use calc::{compute_derived, DerivedStats, Multipliers};
pub use catalog::{Mode, Section, SettingDefinition, SettingsCatalog};
pub use error::SettingsError;
pub use export::{export, ExportedConfig, IniSection};
pub use import::ImportReport;
pub use mods::ModList;
pub use session::SettingsSession;
pub use species::SpeciesProfile;
pub use store::{Snapshot, ValueStore};
pub use value::{SettingValue, ValueType};
pub use view::ModeView;
