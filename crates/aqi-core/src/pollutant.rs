//! Pollutant identities and metadata.
//!
//! The declaration order of [`Pollutant`] is the column order the
//! regression model was trained on. Every positional conversion in the
//! crate goes through [`Pollutant::ALL`] or [`Pollutant::index`].

use serde::{Deserialize, Serialize};

/// Number of model input features.
pub const FEATURE_COUNT: usize = 11;

/// One of the eleven pollutants fed to the PM2.5 model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Enum))]
pub enum Pollutant {
    #[serde(rename = "PM10")]
    Pm10,
    #[serde(rename = "NO")]
    No,
    #[serde(rename = "NO2")]
    No2,
    #[serde(rename = "NOx")]
    Nox,
    #[serde(rename = "NH3")]
    Nh3,
    #[serde(rename = "CO")]
    Co,
    #[serde(rename = "SO2")]
    So2,
    #[serde(rename = "O3")]
    O3,
    Benzene,
    Toluene,
    Xylene,
}

/// Concentration unit a reading must be supplied in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Enum))]
pub enum Unit {
    MicrogramsPerCubicMetre,
    MilligramsPerCubicMetre,
}

impl Unit {
    /// Display symbol.
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::MicrogramsPerCubicMetre => "µg/m³",
            Self::MilligramsPerCubicMetre => "mg/m³",
        }
    }
}

impl std::fmt::Display for Unit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.symbol())
    }
}

impl Pollutant {
    /// All pollutants in model input order.
    pub const ALL: [Pollutant; FEATURE_COUNT] = [
        Self::Pm10,
        Self::No,
        Self::No2,
        Self::Nox,
        Self::Nh3,
        Self::Co,
        Self::So2,
        Self::O3,
        Self::Benzene,
        Self::Toluene,
        Self::Xylene,
    ];

    /// Position in the model input vector.
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Canonical feature name, as the model artifact spells it.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Pm10 => "PM10",
            Self::No => "NO",
            Self::No2 => "NO2",
            Self::Nox => "NOx",
            Self::Nh3 => "NH3",
            Self::Co => "CO",
            Self::So2 => "SO2",
            Self::O3 => "O3",
            Self::Benzene => "Benzene",
            Self::Toluene => "Toluene",
            Self::Xylene => "Xylene",
        }
    }

    /// Human-readable label for forms and tables.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Pm10 => "Coarse Particles",
            Self::No => "Nitric Oxide",
            Self::No2 => "Nitrogen Dioxide",
            Self::Nox => "Nitrogen Oxides",
            Self::Nh3 => "Ammonia",
            Self::Co => "Carbon Monoxide",
            Self::So2 => "Sulfur Dioxide",
            Self::O3 => "Ozone",
            Self::Benzene => "Benzene (C6H6)",
            Self::Toluene => "Toluene (C7H8)",
            Self::Xylene => "Xylene (C8H10)",
        }
    }

    /// Unit the model was trained with. No conversion is ever applied.
    pub fn unit(&self) -> Unit {
        match self {
            Self::Co => Unit::MilligramsPerCubicMetre,
            _ => Unit::MicrogramsPerCubicMetre,
        }
    }

    /// Short health note.
    pub fn description(&self) -> &'static str {
        match self {
            Self::Pm10 => "Coarse particles that penetrate the lungs and bloodstream.",
            Self::No | Self::No2 | Self::Nox => {
                "Traffic emissions that form smog and acid rain."
            }
            Self::Nh3 => "Agricultural and waste emissions that seed secondary particulates.",
            Self::Co => "Reduces oxygen delivery to the body.",
            Self::So2 => "Emitted by coal burning; causes respiratory irritation.",
            Self::O3 => "Ground-level ozone that harms lungs and crops.",
            Self::Benzene | Self::Toluene | Self::Xylene => {
                "Industrial solvent with long-term health effects."
            }
        }
    }

    /// Pre-filled form value.
    pub fn default_value(&self) -> f64 {
        match self {
            Self::Pm10 => 100.0,
            Self::No => 50.0,
            Self::No2 => 30.0,
            Self::Nox => 60.0,
            Self::Nh3 => 20.0,
            Self::Co => 2.0,
            Self::So2 => 15.0,
            Self::O3 => 40.0,
            Self::Benzene => 5.0,
            Self::Toluene => 4.0,
            Self::Xylene => 3.0,
        }
    }

    /// Upper end of the range monitoring stations usually report.
    ///
    /// Readings above this are accepted but logged.
    pub fn typical_max(&self) -> f64 {
        match self {
            Self::Pm10 => 600.0,
            Self::No | Self::No2 | Self::Nox => 500.0,
            Self::Nh3 => 200.0,
            Self::Co => 50.0,
            Self::So2 | Self::O3 => 300.0,
            Self::Benzene | Self::Toluene | Self::Xylene => 50.0,
        }
    }

    /// Resolve a pollutant from a user- or artifact-supplied name.
    ///
    /// Case, separators and Unicode subscripts are ignored, so `"NO₂"`,
    /// `"no2"` and `"NO_2"` all resolve to [`Pollutant::No2`].
    pub fn from_name(name: &str) -> Option<Self> {
        let key: String = name
            .trim()
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' ' | '.'))
            .map(|c| match c {
                '₀'..='₉' => char::from_digit(c as u32 - '₀' as u32, 10).unwrap_or(c),
                _ => c.to_ascii_lowercase(),
            })
            .collect();

        match key.as_str() {
            "pm10" => Some(Self::Pm10),
            "no" => Some(Self::No),
            "no2" => Some(Self::No2),
            "nox" => Some(Self::Nox),
            "nh3" => Some(Self::Nh3),
            "co" => Some(Self::Co),
            "so2" => Some(Self::So2),
            "o3" => Some(Self::O3),
            "benzene" | "c6h6" => Some(Self::Benzene),
            "toluene" | "c7h8" => Some(Self::Toluene),
            "xylene" | "c8h10" => Some(Self::Xylene),
            _ => None,
        }
    }
}

impl std::fmt::Display for Pollutant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for Pollutant {
    type Err = crate::InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| crate::InputError::UnknownField {
            field: s.to_string(),
        })
    }
}
