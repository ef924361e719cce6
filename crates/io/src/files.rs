//! Reading and writing the generated files on disk.

use std::fs;
use std::path::{Path, PathBuf};

use ark_settings_engine::{ExportedConfig, IniSection, Section};

use crate::error::{ExportIoError, IniError};
use crate::ini;

/// Write both files into `dir`, creating it if needed. Returns the written
/// paths in file order.
pub fn write_config(dir: &Path, config: &ExportedConfig) -> Result<Vec<PathBuf>, ExportIoError> {
    fs::create_dir_all(dir).map_err(|e| ExportIoError::new(dir, e))?;

    let mut written = Vec::with_capacity(2);
    for (section, contents) in config.files() {
        let path = dir.join(section.file_name());
        fs::write(&path, ini::render(contents)).map_err(|e| ExportIoError::new(&path, e))?;
        log::info!("wrote {} ({} keys)", path.display(), contents.entries.len());
        written.push(path);
    }
    Ok(written)
}

/// Read the two files `write_config` produces from `dir`. Each file must
/// contain its section; other sections in the same file are passed through
/// so the importer can report them.
pub fn read_config(dir: &Path) -> Result<Vec<IniSection>, IniError> {
    let mut out = Vec::new();
    for section in Section::ALL {
        let path = dir.join(section.file_name());
        let sections = read_sections(&path)?;
        if !sections.iter().any(|s| s.section() == Some(section)) {
            return Err(IniError::MissingSection(section.header().to_string()));
        }
        out.extend(sections);
    }
    Ok(out)
}

/// Parse one INI file.
pub fn read_sections(path: &Path) -> Result<Vec<IniSection>, IniError> {
    let text = read_file_as_utf8(path)?;
    ini::parse(&text).map_err(|e| match e {
        IniError::Parse { line, message } => IniError::Parse {
            line,
            message: format!("{}: {message}", path.display()),
        },
        other => other,
    })
}

/// Read a file as UTF-8, falling back to Windows-1252 for files saved by
/// older Windows editors.
pub fn read_file_as_utf8(path: &Path) -> Result<String, ExportIoError> {
    let bytes = fs::read(path).map_err(|e| ExportIoError::new(path, e))?;
    match String::from_utf8(bytes) {
        Ok(s) => Ok(s),
        Err(e) => {
            log::debug!("{} is not UTF-8, decoding as Windows-1252", path.display());
            let bytes = e.into_bytes();
            let (decoded, _, _) = encoding_rs::WINDOWS_1252.decode(&bytes);
            Ok(decoded.into_owned())
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use ark_settings_engine::{Mode, ModList, SettingsCatalog, ValueStore};
    use tempfile::tempdir;

    use super::*;

    fn exported() -> ExportedConfig {
        let store = ValueStore::new(Arc::new(SettingsCatalog::builtin().unwrap()));
        let mut mods = ModList::new();
        mods.add("928595").unwrap();
        ark_settings_engine::export(&store.snapshot(Mode::Basic), &mods)
    }

    #[test]
    fn writes_both_files() {
        let dir = tempdir().unwrap();
        let paths = write_config(dir.path(), &exported()).unwrap();
        assert_eq!(paths.len(), 2);
        assert!(paths[0].ends_with("GameUserSettings.ini"));
        assert!(paths[1].ends_with("Game.ini"));

        let text = fs::read_to_string(&paths[0]).unwrap();
        assert!(text.starts_with("[ServerSettings]\nDifficultyOffset = 0.2\n"));
        assert!(text.ends_with("ActiveMods = 928595\n\n"));
    }

    #[test]
    fn creates_missing_directory() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        write_config(&nested, &exported()).unwrap();
        assert!(nested.join("Game.ini").exists());
    }

    #[test]
    fn write_failure_names_the_path() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("file");
        fs::write(&blocker, "x").unwrap();
        let err = write_config(&blocker, &exported()).unwrap_err();
        assert_eq!(err.path, blocker);
    }

    #[test]
    fn read_back_what_was_written() {
        let dir = tempdir().unwrap();
        let config = exported();
        write_config(dir.path(), &config).unwrap();
        let sections = read_config(dir.path()).unwrap();
        assert_eq!(sections, vec![config.game_user_settings, config.game]);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempdir().unwrap();
        assert!(matches!(read_config(dir.path()), Err(IniError::Io(_))));
    }

    #[test]
    fn file_without_its_section() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("GameUserSettings.ini"), "[SessionSettings]\nSessionName = x\n").unwrap();
        fs::write(dir.path().join("Game.ini"), "[/script/shootergame.shootergamemode]\n").unwrap();
        match read_config(dir.path()) {
            Err(IniError::MissingSection(h)) => assert_eq!(h, "ServerSettings"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn windows_1252_fallback() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("GameUserSettings.ini");
        // "Caf\xe9" in Windows-1252
        fs::write(&path, b"[ServerSettings]\r\nServerName = Caf\xe9\r\n").unwrap();
        let sections = read_sections(&path).unwrap();
        assert_eq!(sections[0].get("ServerName"), Some("Caf\u{e9}"));
    }
}
