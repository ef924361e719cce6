//! Derived breeding/taming statistics: pure functions over a species
//! profile and the rate multipliers currently in the store.

use serde::Serialize;

use crate::catalog::Section;
use crate::error::SettingsError;
use crate::species::SpeciesProfile;
use crate::store::ValueStore;

pub const TAMING_KEY: (Section, &str) = (Section::ServerSettings, "TamingSpeedMultiplier");
pub const MATURATION_KEY: (Section, &str) = (Section::GameMode, "BabyMatureSpeedMultiplier");
pub const IMPRINT_KEY: (Section, &str) = (Section::GameMode, "BabyImprintingStatScaleMultiplier");
pub const HATCH_KEY: (Section, &str) = (Section::GameMode, "EggHatchSpeedMultiplier");
pub const MATING_KEY: (Section, &str) = (Section::GameMode, "MatingIntervalMultiplier");
pub const DIFFICULTY_OFFSET_KEY: (Section, &str) = (Section::ServerSettings, "DifficultyOffset");
pub const DIFFICULTY_OVERRIDE_KEY: (Section, &str) =
    (Section::ServerSettings, "OverrideOfficialDifficulty");

const CALC_KEYS: [(Section, &str); 7] = [
    TAMING_KEY,
    MATURATION_KEY,
    IMPRINT_KEY,
    HATCH_KEY,
    MATING_KEY,
    DIFFICULTY_OFFSET_KEY,
    DIFFICULTY_OVERRIDE_KEY,
];

/// Wild level cap at difficulty 0, and levels added per difficulty point.
const BASE_WILD_LEVEL: f64 = 150.0;
const LEVELS_PER_DIFFICULTY: f64 = 30.0;

const MULTIPLIER_KEYS: [(Section, &str); 5] =
    [TAMING_KEY, MATURATION_KEY, IMPRINT_KEY, HATCH_KEY, MATING_KEY];

/// True when editing this key changes `compute_derived`'s inputs.
pub fn affects_derived(section: Section, key: &str) -> bool {
    CALC_KEYS.iter().any(|&(s, k)| s == section && k == key)
}

/// Catalog name of the rate multiplier at (section, key), if it is one.
pub fn multiplier_name(section: Section, key: &str) -> Option<&'static str> {
    MULTIPLIER_KEYS
        .iter()
        .find(|&&(s, k)| s == section && k == key)
        .map(|&(_, k)| k)
}

/// A usable multiplier is positive and finite.
pub fn check_multiplier(name: &'static str, value: f64) -> Result<(), SettingsError> {
    // Also catches NaN, which fails every comparison.
    if !(value > 0.0 && value.is_finite()) {
        return Err(SettingsError::InvalidMultiplier { name, value });
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Multipliers {
    pub taming: f64,
    pub maturation: f64,
    pub imprint: f64,
    pub hatch: f64,
    pub mating: f64,
}

impl Default for Multipliers {
    fn default() -> Self {
        Self {
            taming: 1.0,
            maturation: 1.0,
            imprint: 1.0,
            hatch: 1.0,
            mating: 1.0,
        }
    }
}

impl Multipliers {
    pub fn from_store(store: &ValueStore) -> Result<Self, SettingsError> {
        Ok(Self {
            taming: read_f64(store, TAMING_KEY)?,
            maturation: read_f64(store, MATURATION_KEY)?,
            imprint: read_f64(store, IMPRINT_KEY)?,
            hatch: read_f64(store, HATCH_KEY)?,
            mating: read_f64(store, MATING_KEY)?,
        })
    }

    fn validate(&self) -> Result<(), SettingsError> {
        let named = [
            (TAMING_KEY.1, self.taming),
            (MATURATION_KEY.1, self.maturation),
            (IMPRINT_KEY.1, self.imprint),
            (HATCH_KEY.1, self.hatch),
            (MATING_KEY.1, self.mating),
        ];
        for (name, value) in named {
            check_multiplier(name, value)?;
        }
        Ok(())
    }
}

/// Difficulty inputs as stored: the offset, and the official override
/// which wins whenever it is above zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Difficulty {
    pub offset: f64,
    pub override_official: f64,
}

impl Difficulty {
    pub fn from_store(store: &ValueStore) -> Result<Self, SettingsError> {
        Ok(Self {
            offset: read_f64(store, DIFFICULTY_OFFSET_KEY)?,
            override_official: read_f64(store, DIFFICULTY_OVERRIDE_KEY)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DerivedStats {
    pub species: String,
    /// minutes
    pub taming_time: f64,
    /// hours
    pub maturation_time: f64,
    /// hours between imprints
    pub imprint_interval: f64,
    /// percent, unclamped
    pub max_imprint_percent: f64,
    /// minutes
    pub incubation_time: f64,
    /// hours
    pub mating_cooldown: f64,
    pub effective_difficulty: f64,
    pub max_wild_level: f64,
}

impl DerivedStats {
    /// `max_imprint_percent` clamped to what the game can actually apply.
    pub fn capped_imprint_percent(&self) -> f64 {
        self.max_imprint_percent.clamp(0.0, 100.0)
    }

    pub fn imprint_exceeds_cap(&self) -> bool {
        self.max_imprint_percent > 100.0
    }
}

/// Scale a species' base timings by the rate multipliers.
///
/// Every multiplier must be positive and finite; a zero would otherwise
/// divide through to infinity.
pub fn compute_derived(
    profile: &SpeciesProfile,
    multipliers: &Multipliers,
    difficulty_offset: f64,
    difficulty_override: f64,
) -> Result<DerivedStats, SettingsError> {
    multipliers.validate()?;

    let effective_difficulty = if difficulty_override > 0.0 {
        difficulty_override
    } else {
        difficulty_offset
    };

    Ok(DerivedStats {
        species: profile.name.to_string(),
        taming_time: profile.base_taming_minutes / multipliers.taming,
        maturation_time: profile.base_maturation_hours / multipliers.maturation,
        imprint_interval: profile.imprint_interval_hours / multipliers.imprint,
        max_imprint_percent: profile.max_imprint_percent * multipliers.imprint,
        incubation_time: profile.incubation_minutes / multipliers.hatch,
        mating_cooldown: profile.mating_cooldown_hours / multipliers.mating,
        effective_difficulty,
        max_wild_level: BASE_WILD_LEVEL + effective_difficulty * LEVELS_PER_DIFFICULTY,
    })
}

/// `compute_derived` with every input read from `store`.
pub fn derived_from_store(
    profile: &SpeciesProfile,
    store: &ValueStore,
) -> Result<DerivedStats, SettingsError> {
    let multipliers = Multipliers::from_store(store)?;
    let difficulty = Difficulty::from_store(store)?;
    compute_derived(profile, &multipliers, difficulty.offset, difficulty.override_official)
}

fn read_f64(store: &ValueStore, (section, key): (Section, &str)) -> Result<f64, SettingsError> {
    let value = store.get(section, key)?;
    value.as_f64().ok_or_else(|| SettingsError::TypeMismatch {
        section,
        key: key.to_string(),
        expected: crate::value::ValueType::Float,
        found: value.value_type(),
    })
}
