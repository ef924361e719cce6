//! Typed setting values and their INI text form.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Declared type of a catalog key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    Bool,
    Int,
    Float,
    String,
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool => write!(f, "bool"),
            Self::Int => write!(f, "int"),
            Self::Float => write!(f, "float"),
            Self::String => write!(f, "string"),
        }
    }
}

/// A setting value. Variant order matters for untagged deserialization:
/// a TOML integer must land in `Int` before `Float` gets a chance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SettingValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

impl SettingValue {
    pub fn value_type(&self) -> ValueType {
        match self {
            Self::Bool(_) => ValueType::Bool,
            Self::Int(_) => ValueType::Int,
            Self::Float(_) => ValueType::Float,
            Self::Str(_) => ValueType::String,
        }
    }

    /// Parse raw text (a user edit or an INI value) as `ty`.
    ///
    /// Returns the human-readable reason on failure; callers attach the
    /// section and key.
    pub fn parse_as(ty: ValueType, raw: &str) -> Result<Self, String> {
        match ty {
            ValueType::Bool => {
                let trimmed = raw.trim();
                if trimmed.eq_ignore_ascii_case("true") {
                    Ok(Self::Bool(true))
                } else if trimmed.eq_ignore_ascii_case("false") {
                    Ok(Self::Bool(false))
                } else {
                    Err("expected True or False".into())
                }
            }
            ValueType::Int => raw
                .trim()
                .parse::<i64>()
                .map(Self::Int)
                .map_err(|e| format!("not an integer: {e}")),
            ValueType::Float => {
                let v = raw
                    .trim()
                    .parse::<f64>()
                    .map_err(|e| format!("not a number: {e}"))?;
                if !v.is_finite() {
                    return Err("number must be finite".into());
                }
                Ok(Self::Float(v))
            }
            ValueType::String => Ok(Self::Str(raw.to_string())),
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(v) => Some(*v),
            Self::Int(v) => Some(*v as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }
}

/// INI text form: `True`/`False`, plain integers, floats that always carry
/// a fractional part, strings verbatim.
impl fmt::Display for SettingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(true) => write!(f, "True"),
            Self::Bool(false) => write!(f, "False"),
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{}", format_float(*v)),
            Self::Str(s) => write!(f, "{s}"),
        }
    }
}

/// Shortest round-trip decimal, with `.0` appended to whole numbers so the
/// key still reads as a float (`1.0`, not `1`).
pub fn format_float(v: f64) -> String {
    let s = v.to_string();
    if !v.is_finite() || s.contains('.') {
        s
    } else {
        format!("{s}.0")
    }
}
