//! AQI categories and the PM2.5 breakpoint table.
//!
//! Classification is a lookup over [`PM25_BREAKPOINTS`], sorted by upper
//! bound. A value equal to a bound belongs to the lower category.
//!
//! These are the PM2.5 concentration breakpoints (µg/m³), not the 0–500
//! index scale.

use serde::{Deserialize, Serialize};

use crate::{AlertTier, InputError, InputResult};

/// Upper end of the displayed scale for the open-ended top band.
pub const SCALE_DISPLAY_MAX: f64 = 500.0;

/// Axis length used when placing an estimate on the scale.
pub const SCALE_AXIS_MAX: f64 = 300.0;

/// Health-risk category for a PM2.5 concentration.
///
/// Serializes as its display name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Enum))]
pub enum AqiCategory {
    Good,
    Moderate,
    #[serde(rename = "Unhealthy for Sensitive Groups")]
    UnhealthyForSensitiveGroups,
    Unhealthy,
    #[serde(rename = "Very Unhealthy")]
    VeryUnhealthy,
    Hazardous,
}

/// Display color token for a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "uniffi", derive(uniffi::Enum))]
pub enum CategoryColor {
    Green,
    Yellow,
    Orange,
    Red,
    Purple,
    Maroon,
}

impl CategoryColor {
    /// Color token, usable as a CSS color name.
    pub fn token(&self) -> &'static str {
        match self {
            Self::Green => "green",
            Self::Yellow => "yellow",
            Self::Orange => "orange",
            Self::Red => "red",
            Self::Purple => "purple",
            Self::Maroon => "maroon",
        }
    }

    /// Hex value (without `#`) from the standard AQI palette.
    pub fn hex(&self) -> &'static str {
        match self {
            Self::Green => "00E400",
            Self::Yellow => "FFFF00",
            Self::Orange => "FF7E00",
            Self::Red => "FF0000",
            Self::Purple => "8F3F97",
            Self::Maroon => "7E0023",
        }
    }
}

impl AqiCategory {
    /// All categories, least to most severe.
    pub const ALL: [AqiCategory; 6] = [
        Self::Good,
        Self::Moderate,
        Self::UnhealthyForSensitiveGroups,
        Self::Unhealthy,
        Self::VeryUnhealthy,
        Self::Hazardous,
    ];

    /// Ordinal from 0 (Good) to 5 (Hazardous).
    pub fn severity_rank(&self) -> u8 {
        *self as u8
    }

    /// Display name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Good => "Good",
            Self::Moderate => "Moderate",
            Self::UnhealthyForSensitiveGroups => "Unhealthy for Sensitive Groups",
            Self::Unhealthy => "Unhealthy",
            Self::VeryUnhealthy => "Very Unhealthy",
            Self::Hazardous => "Hazardous",
        }
    }

    /// Compact name for narrow layouts.
    pub fn short_name(&self) -> &'static str {
        match self {
            Self::UnhealthyForSensitiveGroups => "Sensitive",
            Self::VeryUnhealthy => "V. Unhealthy",
            other => other.name(),
        }
    }

    pub fn color(&self) -> CategoryColor {
        match self {
            Self::Good => CategoryColor::Green,
            Self::Moderate => CategoryColor::Yellow,
            Self::UnhealthyForSensitiveGroups => CategoryColor::Orange,
            Self::Unhealthy => CategoryColor::Red,
            Self::VeryUnhealthy => CategoryColor::Purple,
            Self::Hazardous => CategoryColor::Maroon,
        }
    }

    /// Health message shown alongside the category.
    pub fn message(&self) -> &'static str {
        match self {
            Self::Good => "Excellent! Air quality is clean and fresh.",
            Self::Moderate => "Acceptable air quality, minor risk to sensitive individuals.",
            Self::UnhealthyForSensitiveGroups => {
                "Some people with lung conditions may feel discomfort."
            }
            Self::Unhealthy => "Everyone may experience health effects; limit outdoor activities.",
            Self::VeryUnhealthy => "Serious health risks, avoid outdoor exposure.",
            Self::Hazardous => "Dangerous levels! Immediate health warnings issued.",
        }
    }

    /// Coarse alert tier for this category.
    pub fn alert_tier(&self) -> AlertTier {
        AlertTier::from_severity_rank(self.severity_rank())
    }
}

impl std::fmt::Display for AqiCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Inclusive upper bound of a category.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Breakpoint {
    pub upper: f64,
    pub category: AqiCategory,
}

/// PM2.5 breakpoints (µg/m³), ascending. The last bound is open.
pub const PM25_BREAKPOINTS: [Breakpoint; 6] = [
    Breakpoint {
        upper: 12.0,
        category: AqiCategory::Good,
    },
    Breakpoint {
        upper: 35.4,
        category: AqiCategory::Moderate,
    },
    Breakpoint {
        upper: 55.4,
        category: AqiCategory::UnhealthyForSensitiveGroups,
    },
    Breakpoint {
        upper: 150.4,
        category: AqiCategory::Unhealthy,
    },
    Breakpoint {
        upper: 250.4,
        category: AqiCategory::VeryUnhealthy,
    },
    Breakpoint {
        upper: f64::INFINITY,
        category: AqiCategory::Hazardous,
    },
];

/// Classify a PM2.5 concentration.
///
/// Total over the reals: negative values are [`AqiCategory::Good`] and
/// `+inf` is [`AqiCategory::Hazardous`]. Only NaN is rejected.
pub fn classify(pm25: f64) -> InputResult<AqiCategory> {
    if pm25.is_nan() {
        return Err(InputError::NanEstimate);
    }
    // First breakpoint whose bound is >= pm25; the infinite last bound
    // guarantees an in-range index.
    let idx = PM25_BREAKPOINTS.partition_point(|bp| bp.upper < pm25);
    Ok(PM25_BREAKPOINTS[idx].category)
}

/// One band of the AQI reference scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScaleBand {
    pub category: AqiCategory,
    /// Exclusive lower bound (0 for the first band).
    pub lower: f64,
    /// Inclusive upper bound; `None` for the open top band.
    pub upper: Option<f64>,
}

impl ScaleBand {
    /// Upper bound for drawing, capping the open band.
    pub fn display_upper(&self) -> f64 {
        self.upper.unwrap_or(SCALE_DISPLAY_MAX)
    }

    pub fn width(&self) -> f64 {
        self.display_upper() - self.lower
    }
}

/// The six bands of the PM2.5 scale, least to most severe.
pub fn aqi_scale() -> Vec<ScaleBand> {
    let mut lower = 0.0;
    PM25_BREAKPOINTS
        .iter()
        .map(|bp| {
            let upper = bp.upper.is_finite().then_some(bp.upper);
            let band = ScaleBand {
                category: bp.category,
                lower,
                upper,
            };
            lower = bp.upper;
            band
        })
        .collect()
}

/// Fractional position of `pm25` along a `0..=SCALE_AXIS_MAX` axis,
/// clamped to `[0, 1]`.
pub fn scale_position(pm25: f64) -> f64 {
    if pm25.is_nan() {
        return 0.0;
    }
    (pm25 / SCALE_AXIS_MAX).clamp(0.0, 1.0)
}

#[cfg(feature = "uniffi")]
#[uniffi::export]
pub fn classify_pm25(pm25: f64) -> Result<AqiCategory, crate::AqiError> {
    Ok(classify(pm25)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn breakpoints_sorted_and_ranked() {
        for pair in PM25_BREAKPOINTS.windows(2) {
            assert!(pair[0].upper < pair[1].upper);
            assert_eq!(
                pair[0].category.severity_rank() + 1,
                pair[1].category.severity_rank()
            );
        }
        assert_eq!(PM25_BREAKPOINTS.len(), AqiCategory::ALL.len());
    }

    #[test]
    fn boundaries_belong_to_lower_category() {
        assert_eq!(classify(12.0).unwrap(), AqiCategory::Good);
        assert_eq!(classify(35.4).unwrap(), AqiCategory::Moderate);
        assert_eq!(
            classify(55.4).unwrap(),
            AqiCategory::UnhealthyForSensitiveGroups
        );
        assert_eq!(classify(150.4).unwrap(), AqiCategory::Unhealthy);
        assert_eq!(classify(250.4).unwrap(), AqiCategory::VeryUnhealthy);
    }

    #[test]
    fn negative_and_infinite_estimates() {
        assert_eq!(classify(-5.0).unwrap(), AqiCategory::Good);
        assert_eq!(classify(f64::NEG_INFINITY).unwrap(), AqiCategory::Good);
        assert_eq!(classify(f64::INFINITY).unwrap(), AqiCategory::Hazardous);
        assert_eq!(classify(f64::NAN), Err(InputError::NanEstimate));
    }

    #[test]
    fn category_metadata() {
        let ranks: Vec<u8> = AqiCategory::ALL.iter().map(|c| c.severity_rank()).collect();
        assert_eq!(ranks, vec![0, 1, 2, 3, 4, 5]);

        let colors: Vec<&str> = AqiCategory::ALL.iter().map(|c| c.color().token()).collect();
        assert_eq!(
            colors,
            vec!["green", "yellow", "orange", "red", "purple", "maroon"]
        );
        assert_eq!(
            AqiCategory::UnhealthyForSensitiveGroups.to_string(),
            "Unhealthy for Sensitive Groups"
        );
    }

    #[test]
    fn scale_bands_are_contiguous() {
        let bands = aqi_scale();
        assert_eq!(bands.len(), 6);
        assert_eq!(bands[0].lower, 0.0);
        for pair in bands.windows(2) {
            assert_eq!(pair[0].upper, Some(pair[1].lower));
        }
        assert_eq!(bands[5].upper, None);
        assert_eq!(bands[5].display_upper(), SCALE_DISPLAY_MAX);
        assert!((bands[1].width() - 23.4).abs() < 1e-9);
    }

    #[test]
    fn scale_position_clamps() {
        assert_eq!(scale_position(-10.0), 0.0);
        assert_eq!(scale_position(150.0), 0.5);
        assert_eq!(scale_position(1000.0), 1.0);
    }

    #[test]
    fn color_serializes_as_token() {
        let json = serde_json::to_string(&CategoryColor::Maroon).unwrap();
        assert_eq!(json, "\"maroon\"");
    }

    #[test]
    fn category_serializes_as_display_name() {
        for category in AqiCategory::ALL {
            let json = serde_json::to_value(category).unwrap();
            assert_eq!(json, category.name());
            let back: AqiCategory = serde_json::from_value(json).unwrap();
            assert_eq!(back, category);
        }
    }
}
