//! Feature vector, model loading and end-to-end assessment tests

mod common;

use std::io::Write;

use aqi_core::{
    build, classify, compute_pm25_assessment, load, AlertTier, AqiCategory, AqiError,
    InputError, LinearModel, ModelError, Pollutant, PollutantReading, Predictor, FEATURE_COUNT,
};
use common::fixtures::{artifact_json, reference_reading, shipped_model_path};
use proptest::prelude::*;

// === Feature Vector ===

#[test]
fn test_build_reference_reading_order() {
    let vector = build(&reference_reading()).unwrap();
    assert_eq!(vector.len(), FEATURE_COUNT);
    assert_eq!(
        vector.to_array(),
        [100.0, 50.0, 30.0, 60.0, 20.0, 2.0, 15.0, 40.0, 5.0, 4.0, 3.0]
    );
}

#[test]
fn test_form_defaults_equal_reference_reading() {
    assert_eq!(PollutantReading::form_defaults(), reference_reading());
}

proptest! {
    #[test]
    fn test_build_order_independent_of_input_order(
        values in prop::array::uniform11(0.0f64..1000.0),
        order in Just((0..FEATURE_COUNT).collect::<Vec<_>>()).prop_shuffle(),
    ) {
        let pairs: Vec<(&str, f64)> = order
            .iter()
            .map(|&i| (Pollutant::ALL[i].name(), values[i]))
            .collect();
        let reading = PollutantReading::from_pairs(pairs).unwrap();
        let vector = build(&reading).unwrap();

        prop_assert_eq!(vector.len(), FEATURE_COUNT);
        prop_assert_eq!(vector.to_array(), values);
        for p in Pollutant::ALL {
            prop_assert_eq!(vector.get(p), values[p.index()]);
        }
    }

    #[test]
    fn test_any_negative_reading_is_rejected(
        idx in 0usize..FEATURE_COUNT,
        value in -1000.0f64..-0.001,
    ) {
        let mut values = [1.0; FEATURE_COUNT];
        values[idx] = value;
        let result = build(&PollutantReading::from_array(values));
        let is_negative_error = matches!(
            result,
            Err(InputError::Negative { pollutant, .. }) if pollutant == Pollutant::ALL[idx]
        );
        prop_assert!(is_negative_error);
    }
}

// === Model Loading ===

#[test]
fn test_shipped_model_loads() {
    let model = LinearModel::load(shipped_model_path()).unwrap();
    assert_eq!(model.target(), "PM2.5");
    assert!((model.coefficient(Pollutant::Co) - 2.8).abs() < 1e-12);
}

#[test]
fn test_load_from_temp_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "{}", artifact_json(&[1.0; FEATURE_COUNT], 0.5)).unwrap();

    let predictor = load(file.path()).unwrap();
    let vector = build(&PollutantReading::from_fn(|_| 1.0)).unwrap();
    let estimate = predictor.predict(&vector).unwrap();
    assert!((estimate - 11.5).abs() < 1e-12);
}

#[test]
fn test_corrupt_artifact_is_model_unavailable() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "\u{80}\u{80} definitely not a model").unwrap();

    let err = load(file.path()).err().unwrap();
    assert!(matches!(err, ModelError::Malformed { .. }));

    let wrapped: AqiError = err.into();
    assert!(wrapped.to_string().starts_with("Model unavailable"));
}

#[test]
fn test_missing_artifact_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let err = load(dir.path().join("missing.json")).err().unwrap();
    assert!(matches!(err, ModelError::NotFound { .. }));
}

// === End-to-End ===

#[test]
fn test_reference_reading_end_to_end() {
    let predictor = load(shipped_model_path()).unwrap();
    let assessment = compute_pm25_assessment(predictor.as_ref(), &reference_reading()).unwrap();

    assert!(assessment.estimate.is_finite());
    assert_eq!(assessment.category, classify(assessment.estimate).unwrap());
    assert_eq!(
        assessment.alert_tier,
        AlertTier::from_severity_rank(assessment.category.severity_rank())
    );

    // 4.2 + Σ wᵢ·xᵢ for the shipped artifact
    assert!((assessment.estimate - 54.09).abs() < 1e-9);
    assert_eq!(
        assessment.category,
        AqiCategory::UnhealthyForSensitiveGroups
    );
    assert_eq!(assessment.alert_tier, AlertTier::Warning);
}

#[test]
fn test_invalid_input_propagates() {
    let predictor = load(shipped_model_path()).unwrap();
    let mut reading = reference_reading();
    reading.benzene = f64::NAN;

    let err = compute_pm25_assessment(predictor.as_ref(), &reading).unwrap_err();
    assert!(matches!(
        err,
        AqiError::InvalidInput(InputError::NotFinite {
            pollutant: Pollutant::Benzene,
            ..
        })
    ));
}

#[test]
fn test_handle_is_shareable_across_threads() {
    let predictor = load(shipped_model_path()).unwrap();
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let predictor = predictor.clone();
            std::thread::spawn(move || {
                let reading = PollutantReading::from_fn(|_| i as f64 * 10.0);
                compute_pm25_assessment(predictor.as_ref(), &reading).map(|a| a.estimate)
            })
        })
        .collect();

    for handle in handles {
        assert!(handle.join().unwrap().is_ok());
    }
}
