//! Tests for tracker configuration.

use super::*;

#[test]
fn test_toml_parsing() {
    let toml = r#"
        requested_solutions = 100
        schedule_repeat_limit = 4
        rc_onlines_desired_count = 10
        leg_to_track = 1
        coverage = "sop_counting"
        queue_iterations_limit = 250

        [priorities]
        earlier = 50
        less_connections = 60
    "#;

    let config = TrackerConfig::from_toml_str(toml).unwrap();
    assert_eq!(config.requested_solutions, 100);
    assert_eq!(config.srl_limit(), Some(4));
    assert_eq!(config.rc_onlines_desired_count, Some(10));
    assert_eq!(config.leg_to_track, Some(1));
    assert_eq!(config.coverage, CoverageMode::SopCounting);
    assert_eq!(config.queue_iterations_limit, 250);
    assert_eq!(config.priorities.earlier, 50);
    assert_eq!(config.priorities.less_connections, 60);
    assert_eq!(config.priorities.all_sops, 600);
    assert!(config.validate().is_ok());
}

#[test]
fn test_yaml_parsing() {
    let yaml = r#"
        requested_solutions: 20
        schedule_repeat_limit: 2
        coverage: unique_sops
        priorities:
          mct_combinable: 450
    "#;

    let config = TrackerConfig::from_yaml_str(yaml).unwrap();
    assert_eq!(config.requested_solutions, 20);
    assert_eq!(config.srl_limit(), Some(2));
    assert_eq!(config.coverage, CoverageMode::UniqueSops);
    assert_eq!(config.priorities.mct_combinable, 450);
}

#[test]
fn test_defaults() {
    let config = TrackerConfig::from_toml_str("").unwrap();
    assert_eq!(config, TrackerConfig::default());
    assert_eq!(config.requested_solutions, 1);
    assert_eq!(config.srl_limit(), None);
    assert_eq!(config.queue_iterations_limit, 1000);
    assert!((config.srl_balance_coefficient - 0.0004).abs() < f64::EPSILON);
}

#[test]
fn test_zero_limit_disables_srl() {
    let config = TrackerConfig::new().with_schedule_repeat_limit(0);
    assert_eq!(config.srl_limit(), None);
}

#[test]
fn test_builder() {
    let config = TrackerConfig::new()
        .with_requested_solutions(30)
        .with_schedule_repeat_limit(3)
        .with_rc_onlines_desired_count(5)
        .with_leg_to_track(0)
        .with_coverage(CoverageMode::SopCounting)
        .with_queue_iterations_limit(10);

    assert_eq!(config.requested_solutions, 30);
    assert_eq!(config.srl_limit(), Some(3));
    assert_eq!(config.rc_onlines_desired_count, Some(5));
    assert_eq!(config.leg_to_track, Some(0));
    assert_eq!(config.queue_iterations_limit, 10);
}

#[test]
fn test_validate_rejects_zero_solutions() {
    let config = TrackerConfig::new().with_requested_solutions(0);
    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains("requested_solutions"));
}

#[test]
fn test_validate_rejects_duplicate_priorities() {
    let priorities = PriorityConfig {
        earlier: 200,
        ..PriorityConfig::default()
    };
    let config = TrackerConfig::new().with_priorities(priorities);
    let err = config.validate().unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
    assert!(err.to_string().contains("'less_connections' and 'earlier'"));
}

#[test]
fn test_validate_rejects_negative_coefficient() {
    let config = TrackerConfig {
        srl_balance_coefficient: -1.0,
        ..TrackerConfig::default()
    };
    assert!(config.validate().is_err());
}

#[test]
fn test_load_missing_file() {
    let result = TrackerConfig::load("/nonexistent/ibf.yaml");
    assert!(matches!(result, Err(ConfigError::Io(_))));
}

#[test]
fn test_into_ibf_error() {
    let invalid: IbfError = ConfigError::Invalid("bad".to_string()).into();
    assert!(matches!(invalid, IbfError::InvalidConfiguration(_)));

    let parse: IbfError = TrackerConfig::from_toml_str("requested_solutions = \"x\"")
        .unwrap_err()
        .into();
    assert!(matches!(parse, IbfError::Config(_)));
}
