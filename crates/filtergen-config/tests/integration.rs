//! Integration tests for filtergen-config.
//!
//! Covers the file round trip, validation through the public API, and driving
//! the candidate search and realization from a loaded configuration.

use filtergen_config::{ConfigError, GeneratorConfig, MAX_STAGES, ValidationError};
use filtergen_core::{FilterFamily, Topology, generate};
use filtergen_design::realize_all;
use tempfile::TempDir;

#[test]
fn save_and_load_round_trip() {
    let temp_dir = TempDir::new().expect("should create temp dir");
    let path = temp_dir.path().join("nested").join("dir").join("filtergen.toml");

    let config = GeneratorConfig {
        stages: 4,
        families: vec!["butterworth".to_string()],
        topologies: vec!["sallen-key".to_string(), "rc".to_string()],
        cutoff_hz: 2000.0,
        ..GeneratorConfig::default()
    };
    config.save(&path).expect("should save");
    assert!(path.is_file());

    let loaded = GeneratorConfig::load(&path).expect("should load");
    assert_eq!(loaded, config);
}

#[test]
fn load_missing_file_reports_path() {
    let temp_dir = TempDir::new().expect("should create temp dir");
    let path = temp_dir.path().join("absent.toml");
    match GeneratorConfig::load(&path) {
        Err(ConfigError::ReadFile { path: p, .. }) => assert_eq!(p, path),
        other => panic!("expected ReadFile, got {other:?}"),
    }
}

#[test]
fn legacy_tags_drive_the_search() {
    let config = GeneratorConfig::from_toml(
        r#"
        stages = 3
        families = ["Butterworth", "3dbCheb"]
        topologies = ["Sallen-Key_LP"]
        "#,
    )
    .unwrap();
    let spec = config.generator_spec().unwrap();
    assert_eq!(spec.families, [FilterFamily::Butterworth, FilterFamily::Chebyshev]);
    assert_eq!(spec.topologies, [Topology::SallenKey]);

    let run = generate(&spec).unwrap();
    assert_eq!(run.report.family_assignments, 8);
    assert!(!run.candidates.is_empty());

    let realized = realize_all(&run.candidates, &config.design_params(), &config.pole_source());
    assert!(realized.iter().all(Result::is_ok));
}

#[test]
fn oversized_search_is_rejected() {
    let config = GeneratorConfig {
        stages: MAX_STAGES + 1,
        ..GeneratorConfig::default()
    };
    let err = config.generator_spec().unwrap_err();
    assert!(matches!(
        err,
        ConfigError::Validation(ValidationError::TooManyStages { .. })
    ));
}

#[test]
fn invalid_file_aggregates_errors() {
    let config = GeneratorConfig::from_toml(
        r#"
        families = ["butterworth", "butterworth", "elliptic"]
        load_name = ""
        capacitance = 0.0
        "#,
    )
    .unwrap();
    match config.validate() {
        Err(ConfigError::Validation(ValidationError::Multiple(errors))) => {
            assert_eq!(errors.len(), 4, "{errors:?}");
        }
        other => panic!("expected aggregated errors, got {other:?}"),
    }
}
