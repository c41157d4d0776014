//! Pollutant readings and the model input vector.
//!
//! Readings are held as named fields and only become positional at the
//! predictor boundary, via [`build`]. The conversion is the single place
//! where column order matters.

use serde::{Deserialize, Serialize};

use crate::{InputError, InputResult, Pollutant, FEATURE_COUNT};

/// Eleven pollutant concentrations for one prediction request.
///
/// Units follow [`Pollutant::unit`]: µg/m³ except CO in mg/m³.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct PollutantReading {
    #[serde(alias = "PM10")]
    pub pm10: f64,
    #[serde(alias = "NO")]
    pub no: f64,
    #[serde(alias = "NO2")]
    pub no2: f64,
    #[serde(alias = "NOx")]
    pub nox: f64,
    #[serde(alias = "NH3")]
    pub nh3: f64,
    #[serde(alias = "CO")]
    pub co: f64,
    #[serde(alias = "SO2")]
    pub so2: f64,
    #[serde(alias = "O3")]
    pub o3: f64,
    #[serde(alias = "Benzene")]
    pub benzene: f64,
    #[serde(alias = "Toluene")]
    pub toluene: f64,
    #[serde(alias = "Xylene")]
    pub xylene: f64,
}

impl PollutantReading {
    /// Reading pre-filled with each pollutant's form default.
    pub fn form_defaults() -> Self {
        Self::from_fn(|p| p.default_value())
    }

    /// Build a reading by evaluating `f` for every pollutant.
    pub fn from_fn(mut f: impl FnMut(Pollutant) -> f64) -> Self {
        let mut values = [0.0; FEATURE_COUNT];
        for p in Pollutant::ALL {
            values[p.index()] = f(p);
        }
        Self::from_array(values)
    }

    /// Build a reading from values already in model input order.
    pub fn from_array(values: [f64; FEATURE_COUNT]) -> Self {
        let [pm10, no, no2, nox, nh3, co, so2, o3, benzene, toluene, xylene] = values;
        Self {
            pm10,
            no,
            no2,
            nox,
            nh3,
            co,
            so2,
            o3,
            benzene,
            toluene,
            xylene,
        }
    }

    /// Build a reading from `(name, value)` pairs in any order.
    ///
    /// Names resolve through [`Pollutant::from_name`]. Every pollutant must
    /// appear exactly once.
    pub fn from_pairs<I, S>(pairs: I) -> InputResult<Self>
    where
        I: IntoIterator<Item = (S, f64)>,
        S: AsRef<str>,
    {
        let mut slots: [Option<f64>; FEATURE_COUNT] = [None; FEATURE_COUNT];

        for (name, value) in pairs {
            let name = name.as_ref();
            let pollutant = Pollutant::from_name(name).ok_or_else(|| InputError::UnknownField {
                field: name.to_string(),
            })?;
            let slot = &mut slots[pollutant.index()];
            if slot.is_some() {
                return Err(InputError::DuplicateField {
                    field: pollutant.name().to_string(),
                });
            }
            *slot = Some(value);
        }

        let mut values = [0.0; FEATURE_COUNT];
        for p in Pollutant::ALL {
            values[p.index()] = slots[p.index()].ok_or_else(|| InputError::MissingField {
                field: p.name().to_string(),
            })?;
        }
        Ok(Self::from_array(values))
    }

    /// Parse a JSON object keyed by pollutant name.
    pub fn from_json(json: &str) -> InputResult<Self> {
        serde_json::from_str(json).map_err(|e| InputError::Malformed(e.to_string()))
    }

    /// Concentration of one pollutant.
    pub fn get(&self, pollutant: Pollutant) -> f64 {
        match pollutant {
            Pollutant::Pm10 => self.pm10,
            Pollutant::No => self.no,
            Pollutant::No2 => self.no2,
            Pollutant::Nox => self.nox,
            Pollutant::Nh3 => self.nh3,
            Pollutant::Co => self.co,
            Pollutant::So2 => self.so2,
            Pollutant::O3 => self.o3,
            Pollutant::Benzene => self.benzene,
            Pollutant::Toluene => self.toluene,
            Pollutant::Xylene => self.xylene,
        }
    }

    /// `(pollutant, value)` pairs in model input order.
    pub fn entries(&self) -> impl Iterator<Item = (Pollutant, f64)> + '_ {
        Pollutant::ALL.into_iter().map(move |p| (p, self.get(p)))
    }

    /// Check every reading is finite and non-negative.
    pub fn validate(&self) -> InputResult<()> {
        for (pollutant, value) in self.entries() {
            if !value.is_finite() {
                return Err(InputError::NotFinite { pollutant, value });
            }
            if value < 0.0 {
                return Err(InputError::Negative { pollutant, value });
            }
        }
        Ok(())
    }

    /// Pollutants whose reading exceeds [`Pollutant::typical_max`].
    pub fn unusual_readings(&self) -> Vec<Pollutant> {
        self.entries()
            .filter(|(p, v)| *v > p.typical_max())
            .map(|(p, _)| p)
            .collect()
    }
}

impl Default for PollutantReading {
    fn default() -> Self {
        Self::form_defaults()
    }
}

/// Positional model input.
///
/// Can only be produced by [`build`], so its arity and order always match
/// [`Pollutant::ALL`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector([f64; FEATURE_COUNT]);

impl FeatureVector {
    /// Values in model input order.
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Values as a fixed-size array.
    pub fn to_array(&self) -> [f64; FEATURE_COUNT] {
        self.0
    }

    /// Value for one pollutant.
    pub fn get(&self, pollutant: Pollutant) -> f64 {
        self.0[pollutant.index()]
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    /// Dot product with a coefficient row.
    pub fn dot(&self, coefficients: &[f64; FEATURE_COUNT]) -> f64 {
        self.0
            .iter()
            .zip(coefficients.iter())
            .map(|(x, w)| x * w)
            .sum()
    }
}

/// Validate a reading and lay it out in model input order.
pub fn build(reading: &PollutantReading) -> InputResult<FeatureVector> {
    reading.validate()?;
    let mut values = [0.0; FEATURE_COUNT];
    for (pollutant, value) in reading.entries() {
        values[pollutant.index()] = value;
    }
    Ok(FeatureVector(values))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sequential() -> PollutantReading {
        PollutantReading::from_fn(|p| p.index() as f64)
    }

    #[test]
    fn build_preserves_canonical_order() {
        let vector = build(&sequential()).unwrap();
        assert_eq!(vector.len(), FEATURE_COUNT);
        for (i, value) in vector.as_slice().iter().enumerate() {
            assert_eq!(*value, i as f64);
        }
    }

    #[test]
    fn build_accepts_zero() {
        let reading = PollutantReading::from_fn(|_| 0.0);
        assert!(build(&reading).is_ok());
    }

    #[test]
    fn build_rejects_negative() {
        let mut reading = PollutantReading::form_defaults();
        reading.o3 = -0.1;
        assert_eq!(
            build(&reading),
            Err(InputError::Negative {
                pollutant: Pollutant::O3,
                value: -0.1
            })
        );
    }

    #[test]
    fn build_rejects_non_finite() {
        let mut reading = PollutantReading::form_defaults();
        reading.co = f64::INFINITY;
        assert!(matches!(
            build(&reading),
            Err(InputError::NotFinite {
                pollutant: Pollutant::Co,
                ..
            })
        ));

        reading.co = f64::NAN;
        assert!(matches!(build(&reading), Err(InputError::NotFinite { .. })));
    }

    #[test]
    fn from_pairs_any_order() {
        let mut pairs: Vec<(&str, f64)> = Pollutant::ALL
            .iter()
            .map(|p| (p.name(), p.index() as f64))
            .collect();
        pairs.reverse();
        let reading = PollutantReading::from_pairs(pairs).unwrap();
        assert_eq!(reading, sequential());
    }

    #[test]
    fn from_pairs_reports_missing() {
        let pairs: Vec<(&str, f64)> = Pollutant::ALL
            .iter()
            .filter(|p| **p != Pollutant::Toluene)
            .map(|p| (p.name(), 1.0))
            .collect();
        assert_eq!(
            PollutantReading::from_pairs(pairs),
            Err(InputError::MissingField {
                field: "Toluene".to_string()
            })
        );
    }

    #[test]
    fn from_pairs_reports_duplicate_and_unknown() {
        let dup = vec![("NO2", 1.0), ("no₂", 2.0)];
        assert_eq!(
            PollutantReading::from_pairs(dup),
            Err(InputError::DuplicateField {
                field: "NO2".to_string()
            })
        );

        let unknown = vec![("PM2.5", 1.0)];
        assert!(matches!(
            PollutantReading::from_pairs(unknown),
            Err(InputError::UnknownField { .. })
        ));
    }

    #[test]
    fn from_json_accepts_canonical_keys() {
        let json = r#"{"Xylene":3,"Toluene":4,"Benzene":5,"O3":40,"SO2":15,"CO":2,
                       "NH3":20,"NOx":60,"NO2":30,"NO":50,"PM10":100}"#;
        let reading = PollutantReading::from_json(json).unwrap();
        assert_eq!(reading, PollutantReading::form_defaults());
    }

    #[test]
    fn from_json_reports_missing_field() {
        let err = PollutantReading::from_json(r#"{"pm10": 1.0}"#).unwrap_err();
        match err {
            InputError::Malformed(msg) => assert!(msg.contains("missing field")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn unusual_readings_flags_values_above_range() {
        let mut reading = PollutantReading::form_defaults();
        assert!(reading.unusual_readings().is_empty());
        reading.pm10 = 900.0;
        assert_eq!(reading.unusual_readings(), vec![Pollutant::Pm10]);
    }

    #[test]
    fn dot_product() {
        let vector = build(&PollutantReading::from_fn(|_| 2.0)).unwrap();
        let weights = [0.5; FEATURE_COUNT];
        assert!((vector.dot(&weights) - 11.0).abs() < 1e-12);
    }
}
