//! CLI Exit Code Registry
//!
//! This is the single source of truth for all `arkgen` exit codes.
//! Exit codes are part of the shell contract; scripts rely on them.
//!
//! # Exit Code Ranges
//!
//! | Range   | Domain           | Description                              |
//! |---------|------------------|------------------------------------------|
//! | 0       | Universal        | Success                                  |
//! | 1       | Universal        | General error (unspecified)              |
//! | 2       | Universal        | CLI usage error (bad args, ambiguous key) |
//! | 3       | Universal        | File read/write failure                  |
//! | 4       | Universal        | Malformed INI or settings file           |
//! | 10-19   | settings         | Setting/mod/calculator validation        |
//!
//! # Adding New Exit Codes
//!
//! 1. Add the constant in the appropriate range
//! 2. Document what triggers it
//! 3. Update the table above
//! 4. Map it in `settings_exit_code` if it comes from the engine

use ark_settings_engine::SettingsError;

// =============================================================================
// Universal (0-4)
// =============================================================================

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
/// Avoid using this; prefer a specific error code.
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, unqualified key declared in both sections.
pub const EXIT_USAGE: u8 = 2;

/// I/O error - an INI or settings file could not be read or written.
pub const EXIT_IO: u8 = 3;

/// Parse error - INI text or settings.json is malformed.
pub const EXIT_PARSE: u8 = 4;

// =============================================================================
// Settings (10-19)
// =============================================================================

/// Unknown setting key or section.
pub const EXIT_SETTING_UNKNOWN: u8 = 10;

/// Value does not parse as the key's type, or is not finite.
pub const EXIT_SETTING_INVALID: u8 = 11;

/// Mod id rejected (non-numeric, duplicate, bad index).
pub const EXIT_MOD_INVALID: u8 = 12;

/// A rate multiplier the calculator cannot use (zero, negative).
pub const EXIT_MULTIPLIER_INVALID: u8 = 13;

/// Unknown species or event name.
pub const EXIT_UNKNOWN_NAME: u8 = 14;

/// The built-in catalog failed to load.
pub const EXIT_CATALOG: u8 = 15;

/// Map an engine error to its exit code.
pub fn settings_exit_code(err: &SettingsError) -> u8 {
    match err {
        SettingsError::NotFound { .. } | SettingsError::UnknownSection(_) => EXIT_SETTING_UNKNOWN,
        SettingsError::TypeMismatch { .. } | SettingsError::InvalidValue { .. } => {
            EXIT_SETTING_INVALID
        }
        SettingsError::InvalidModId(_)
        | SettingsError::DuplicateModId(_)
        | SettingsError::IndexOutOfRange { .. } => EXIT_MOD_INVALID,
        SettingsError::InvalidMultiplier { .. } => EXIT_MULTIPLIER_INVALID,
        SettingsError::UnknownSpecies(_) | SettingsError::UnknownEvent(_) => EXIT_UNKNOWN_NAME,
        SettingsError::CatalogParse(_) | SettingsError::CatalogValidation(_) => EXIT_CATALOG,
    }
}
