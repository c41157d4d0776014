//! Alert tiers and location-aware advisories.

use serde::{Deserialize, Serialize};

use crate::{AqiCategory, InputError, InputResult};

/// Coarse grouping of AQI categories for user-facing alerts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
#[cfg_attr(feature = "uniffi", derive(uniffi::Enum))]
pub enum AlertTier {
    /// Good, Moderate
    Info,
    /// Unhealthy for Sensitive Groups, Unhealthy
    Warning,
    /// Very Unhealthy, Hazardous
    Critical,
}

impl AlertTier {
    /// Map a category severity rank (0..=5) to its tier.
    pub fn from_severity_rank(rank: u8) -> Self {
        match rank {
            0 | 1 => Self::Info,
            2 | 3 => Self::Warning,
            _ => Self::Critical,
        }
    }

    /// Categories that map to this tier.
    pub fn categories(&self) -> Vec<AqiCategory> {
        AqiCategory::ALL
            .into_iter()
            .filter(|c| c.alert_tier() == *self)
            .collect()
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Info => "INFO",
            Self::Warning => "WARNING",
            Self::Critical => "CRITICAL",
        }
    }

    /// Advisory sentence for a place, or a generic subject when none is given.
    pub fn advisory(&self, location: Option<&Location>) -> String {
        let subject = location
            .map(|l| l.display_name().to_string())
            .unwrap_or_else(|| "This area".to_string());
        match self {
            Self::Info => format!(
                "{subject} has relatively clean air. Keep promoting green habits."
            ),
            Self::Warning => format!(
                "{subject} air quality is concerning. Sensitive groups should reduce outdoor exposure."
            ),
            Self::Critical => format!("{subject} air quality is dangerous. Take urgent action."),
        }
    }
}

impl From<AqiCategory> for AlertTier {
    fn from(category: AqiCategory) -> Self {
        category.alert_tier()
    }
}

impl std::fmt::Display for AlertTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A named place an assessment refers to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Location {
    display_name: String,
}

impl Location {
    /// Trim and title-case a city name. Blank names are rejected.
    pub fn new(name: &str) -> InputResult<Self> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(InputError::EmptyLocation);
        }
        Ok(Self {
            display_name: title_case(trimmed),
        })
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }
}

impl TryFrom<String> for Location {
    type Error = InputError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<Location> for String {
    fn from(location: Location) -> Self {
        location.display_name
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.display_name)
    }
}

/// Uppercase the first letter of every alphabetic run, lowercase the rest.
fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_word = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(c);
            in_word = false;
        }
    }
    out
}

#[cfg(feature = "uniffi")]
#[uniffi::export]
pub fn alert_tier_for(category: AqiCategory) -> AlertTier {
    category.alert_tier()
}
