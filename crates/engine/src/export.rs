//! Export: snapshot + mod list -> the two ordered INI sections.

use serde::Serialize;

use crate::catalog::{Mode, Section, ACTIVE_MODS_KEY};
use crate::mods::ModList;
use crate::store::Snapshot;

/// A section header with its `key = value` lines, values already rendered.
/// Used both for export output and for sections parsed back from disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IniSection {
    pub header: String,
    pub entries: Vec<(String, String)>,
}

impl IniSection {
    pub fn new(header: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            entries: Vec::new(),
        }
    }

    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.push((key.into(), value.into()));
    }

    /// Known section this header names, if any.
    pub fn section(&self) -> Option<Section> {
        Section::from_header(&self.header)
    }

    /// Last value written for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }
}

/// The two generated files' contents.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportedConfig {
    pub mode: Mode,
    /// `[ServerSettings]`, destined for GameUserSettings.ini
    pub game_user_settings: IniSection,
    /// `[/script/shootergame.shootergamemode]`, destined for Game.ini
    pub game: IniSection,
}

impl ExportedConfig {
    pub fn section(&self, section: Section) -> &IniSection {
        match section {
            Section::ServerSettings => &self.game_user_settings,
            Section::GameMode => &self.game,
        }
    }

    /// (section, contents) in file order.
    pub fn files(&self) -> [(Section, &IniSection); 2] {
        [
            (Section::ServerSettings, &self.game_user_settings),
            (Section::GameMode, &self.game),
        ]
    }
}

/// Render `snapshot` for its mode. `ActiveMods` comes from `mods`, is
/// written once, and is always the last ServerSettings entry.
pub fn export(snapshot: &Snapshot, mods: &ModList) -> ExportedConfig {
    let mut game_user_settings = render_section(snapshot, Section::ServerSettings);
    game_user_settings.push(ACTIVE_MODS_KEY, mods.to_csv());
    let game = render_section(snapshot, Section::GameMode);

    log::info!(
        "exported {} mode: {} server keys, {} game keys, {} mods",
        snapshot.mode,
        game_user_settings.entries.len(),
        game.entries.len(),
        mods.len()
    );

    ExportedConfig {
        mode: snapshot.mode,
        game_user_settings,
        game,
    }
}

fn render_section(snapshot: &Snapshot, section: Section) -> IniSection {
    let mut out = IniSection::new(section.header());
    if let Some(values) = snapshot.section(section) {
        for (key, value) in &values.entries {
            if section == Section::ServerSettings && key == ACTIVE_MODS_KEY {
                continue;
            }
            out.push(key.clone(), value.to_string());
        }
    }
    out
}
