use std::fmt;

use crate::catalog::Section;
use crate::value::ValueType;

#[derive(Debug, Clone, PartialEq)]
pub enum SettingsError {
    /// Key is not declared in the catalog for this section.
    NotFound { section: Section, key: String },
    /// Value type disagrees with the key's declared type.
    TypeMismatch {
        section: Section,
        key: String,
        expected: ValueType,
        found: ValueType,
    },
    /// Raw text cannot be read as the key's type, or a float is not finite.
    InvalidValue {
        section: Section,
        key: String,
        raw: String,
        reason: String,
    },
    /// Mod id is not made of decimal digits only.
    InvalidModId(String),
    /// Mod id is already in the list.
    DuplicateModId(String),
    /// Mod list position outside the list.
    IndexOutOfRange { index: usize, len: usize },
    /// Calculator multiplier that would divide by zero or go negative.
    InvalidMultiplier { name: &'static str, value: f64 },
    /// Section header that is neither of the two known sections.
    UnknownSection(String),
    UnknownSpecies(String),
    UnknownEvent(String),
    /// Embedded or supplied catalog TOML failed to deserialize.
    CatalogParse(String),
    /// Catalog deserialized but breaks a structural rule.
    CatalogValidation(String),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound { section, key } => {
                write!(f, "unknown setting '{key}' in [{section}]")
            }
            Self::TypeMismatch { section, key, expected, found } => {
                write!(f, "[{section}] {key}: expected {expected} value, got {found}")
            }
            Self::InvalidValue { section, key, raw, reason } => {
                write!(f, "[{section}] {key}: invalid value '{raw}' ({reason})")
            }
            Self::InvalidModId(id) => write!(f, "mod id must be numeric, got '{id}'"),
            Self::DuplicateModId(id) => write!(f, "mod {id} is already in the list"),
            Self::IndexOutOfRange { index, len } => {
                write!(f, "mod index {index} out of range (list has {len} entries)")
            }
            Self::InvalidMultiplier { name, value } => {
                write!(f, "{name} must be a positive number, got {value}")
            }
            Self::UnknownSection(name) => write!(f, "unknown section: {name}"),
            Self::UnknownSpecies(name) => write!(f, "unknown species: {name}"),
            Self::UnknownEvent(name) => write!(f, "unknown event: {name}"),
            Self::CatalogParse(msg) => write!(f, "catalog parse error: {msg}"),
            Self::CatalogValidation(msg) => write!(f, "catalog validation error: {msg}"),
        }
    }
}

impl std::error::Error for SettingsError {}
