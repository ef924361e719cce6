use std::sync::Arc;

use ark_settings_engine::{Mode, Section, SettingValue, SettingsCatalog, SettingsSession};
use ark_settings_io::{read_config, write_config};
use tempfile::tempdir;

fn session() -> SettingsSession {
    SettingsSession::new(Arc::new(SettingsCatalog::builtin().unwrap())).unwrap()
}

#[test]
fn advanced_files_reimport_into_fresh_session() {
    let dir = tempdir().unwrap();

    let mut source = session();
    source.set_mode(Mode::Advanced);
    source.on_edit(Section::ServerSettings, "ServerName", " Ragnarok PvE ").unwrap();
    source.on_edit(Section::ServerSettings, "XPMultiplier", "2.5").unwrap();
    source.on_edit(Section::GameMode, "bDisableLootCrates", "true").unwrap();
    source.mods_mut().add("928595").unwrap();
    source.mods_mut().add("731604").unwrap();
    let exported = source.on_generate();
    write_config(dir.path(), &exported).unwrap();

    let mut target = session();
    target.set_mode(Mode::Advanced);
    let report = target.import(&read_config(dir.path()).unwrap()).unwrap();
    assert!(report.skipped.is_empty());
    assert_eq!(report.mods, 2);
    assert_eq!(target.on_generate(), exported);
    assert_eq!(
        target.store().get(Section::GameMode, "bDisableLootCrates").unwrap(),
        &SettingValue::Bool(true)
    );
    assert_eq!(
        target.store().get(Section::ServerSettings, "ServerName").unwrap(),
        &SettingValue::Str(" Ragnarok PvE ".into())
    );
}

#[test]
fn hand_edited_file_with_extra_sections() {
    let dir = tempdir().unwrap();
    std::fs::write(
        dir.path().join("GameUserSettings.ini"),
        "[ServerSettings]\r\nMaxPlayers=40\r\nActiveMods = 1, 2\r\n\r\n[SessionSettings]\r\nSessionName=Mine\r\n",
    )
    .unwrap();
    std::fs::write(
        dir.path().join("Game.ini"),
        "; tuned by hand\n[/Script/ShooterGame.ShooterGameMode]\nMaxTamedDinos = 1200\nNotAKey = 3\n",
    )
    .unwrap();

    let mut s = session();
    let report = s.import(&read_config(dir.path()).unwrap()).unwrap();
    assert_eq!(report.applied, 2);
    assert_eq!(report.mods, 2);
    assert_eq!(report.skipped.len(), 2);

    let out = s.on_generate();
    assert_eq!(out.game_user_settings.get("MaxPlayers"), Some("40"));
    assert_eq!(out.game_user_settings.get("ActiveMods"), Some("1,2"));
    assert_eq!(out.game.get("MaxTamedDinos"), Some("1200"));
}
