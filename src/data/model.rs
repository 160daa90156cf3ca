use std::fmt;

use serde::{Deserialize, Deserializer};
use serde_json::Value as JsonValue;

// ---------------------------------------------------------------------------
// Geolocation – optional landing coordinates
// ---------------------------------------------------------------------------

/// Landing coordinates as reported by the dataset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geolocation {
    pub latitude: f64,
    pub longitude: f64,
}

impl Geolocation {
    /// Interpret a raw `geolocation` value.
    ///
    /// Anything that is not an object carrying both coordinates (a missing
    /// key, `null`, `false`, an empty string, a partial object) is treated as
    /// "no location".
    pub fn from_json(value: &JsonValue) -> Option<Self> {
        let obj = value.as_object()?;
        let latitude = json_number(obj.get("latitude")?)?;
        let longitude = json_number(obj.get("longitude")?)?;
        Some(Geolocation {
            latitude,
            longitude,
        })
    }
}

impl fmt::Display for Geolocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.latitude, self.longitude)
    }
}

// ---------------------------------------------------------------------------
// MeteoriteRecord – one row of the remote dataset
// ---------------------------------------------------------------------------

/// A single meteorite landing as returned by the open-data endpoint.
///
/// Socrata encodes numbers as JSON strings, so `mass` and the coordinates go
/// through lenient deserialisers. Fields not listed here are ignored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MeteoriteRecord {
    #[serde(default)]
    pub name: String,
    /// Composition class, e.g. `L6` or `Iron, IIIAB`.
    #[serde(default)]
    pub recclass: String,
    /// Mass in grams. `NaN` when the dataset value is present but not numeric.
    #[serde(default, deserialize_with = "de_mass")]
    pub mass: Option<f64>,
    /// `Fell` or `Found`.
    #[serde(default)]
    pub fall: String,
    #[serde(default, deserialize_with = "de_geolocation")]
    pub geolocation: Option<Geolocation>,
}

fn de_mass<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = JsonValue::deserialize(deserializer)?;
    Ok(match value {
        JsonValue::Null => None,
        other => Some(json_number(&other).unwrap_or(f64::NAN)),
    })
}

fn de_geolocation<'de, D>(deserializer: D) -> Result<Option<Geolocation>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = JsonValue::deserialize(deserializer)?;
    Ok(Geolocation::from_json(&value))
}

/// Read a number that may arrive either as a JSON number or a numeric string.
fn json_number(value: &JsonValue) -> Option<f64> {
    match value {
        JsonValue::Number(n) => n.as_f64(),
        JsonValue::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}
