//! Reference creature timings used by the breeding/taming calculator.

use serde::Serialize;

use crate::error::SettingsError;

/// Base timings at 1.0x rates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SpeciesProfile {
    pub name: &'static str,
    pub base_taming_minutes: f64,
    pub base_maturation_hours: f64,
    pub imprint_interval_hours: f64,
    pub max_imprint_percent: f64,
    pub incubation_minutes: f64,
    pub mating_cooldown_hours: f64,
}

pub const DEFAULT_SPECIES: &str = "Argentavis";

const fn profile(
    name: &'static str,
    taming: f64,
    maturation: f64,
    imprint_interval: f64,
    incubation: f64,
    mating: f64,
) -> SpeciesProfile {
    SpeciesProfile {
        name,
        base_taming_minutes: taming,
        base_maturation_hours: maturation,
        imprint_interval_hours: imprint_interval,
        max_imprint_percent: 100.0,
        incubation_minutes: incubation,
        mating_cooldown_hours: mating,
    }
}

pub static SPECIES: &[SpeciesProfile] = &[
    profile("Argentavis", 180.0, 48.0, 8.0, 120.0, 18.0),
    profile("Rex", 240.0, 72.0, 8.0, 180.0, 18.0),
    profile("Spino", 300.0, 96.0, 8.0, 240.0, 18.0),
    profile("Giga", 360.0, 120.0, 8.0, 300.0, 18.0),
    profile("Titanosaur", 480.0, 168.0, 12.0, 480.0, 24.0),
    profile("Megalodon", 120.0, 36.0, 6.0, 90.0, 12.0),
    profile("Mosasaurus", 180.0, 60.0, 8.0, 150.0, 18.0),
    profile("Plesiosaur", 150.0, 48.0, 6.0, 120.0, 15.0),
    profile("Therizino", 210.0, 84.0, 8.0, 180.0, 18.0),
    profile("Thylacoleo", 90.0, 30.0, 6.0, 75.0, 12.0),
];

/// Case-insensitive lookup by name.
pub fn find(name: &str) -> Result<&'static SpeciesProfile, SettingsError> {
    SPECIES
        .iter()
        .find(|p| p.name.eq_ignore_ascii_case(name.trim()))
        .ok_or_else(|| SettingsError::UnknownSpecies(name.to_string()))
}
