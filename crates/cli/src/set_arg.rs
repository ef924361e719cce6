// --set KEY=VALUE / --set SECTION:KEY=VALUE

use std::str::FromStr;

use ark_settings_engine::{Section, SettingsCatalog, SettingsError};

#[derive(Debug, Clone, PartialEq)]
pub struct SetArg {
    pub section: Option<Section>,
    pub key: String,
    pub value: String,
}

impl FromStr for SetArg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Values may contain ':' and '=', so split on the first '=' first.
        let (target, value) = s
            .split_once('=')
            .ok_or_else(|| format!("expected KEY=VALUE, got '{s}'"))?;

        let (section, key) = match target.split_once(':') {
            Some((section, key)) => {
                let section = section.parse::<Section>().map_err(|e| e.to_string())?;
                (Some(section), key)
            }
            None => (None, target),
        };

        let key = key.trim();
        if key.is_empty() {
            return Err(format!("missing key in '{s}'"));
        }
        Ok(Self {
            section,
            key: key.to_string(),
            value: value.to_string(),
        })
    }
}

/// Why a bare key could not be placed in a section.
#[derive(Debug, PartialEq)]
pub enum Unresolved {
    Unknown(SettingsError),
    Ambiguous,
}

impl SetArg {
    /// The explicit section, or the one section declaring the key.
    pub fn resolve(&self, catalog: &SettingsCatalog) -> Result<Section, Unresolved> {
        if let Some(section) = self.section {
            return Ok(section);
        }
        match catalog.sections_for_key(&self.key).as_slice() {
            [only] => Ok(*only),
            [] => Err(Unresolved::Unknown(SettingsError::NotFound {
                section: Section::ServerSettings,
                key: self.key.clone(),
            })),
            _ => Err(Unresolved::Ambiguous),
        }
    }
}
