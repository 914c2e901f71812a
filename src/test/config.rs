use crate::error::SimError;
use crate::experiment::ExperimentConfig;
use crate::sim::ServicePolicy;

#[test]
fn default_config_matches_standard_experiment() {
    let cfg = ExperimentConfig::default();
    assert_eq!(cfg.lambdas, vec![0.5, 0.8, 0.9, 0.99]);
    assert_eq!(cfg.runs, 100);
    assert_eq!(cfg.horizon, 10_000.0);
    assert_eq!(cfg.seed, None);
    assert_eq!(cfg.threads, 1);
    assert_eq!(
        cfg.policies,
        vec![ServicePolicy::EXPONENTIAL, ServicePolicy::CONSTANT]
    );
    assert!(cfg.validate().is_ok());
}

#[test]
fn config_parses_partial_json_with_defaults() {
    let raw = r#"
    {
        "runs": 5,
        "seed": 9,
        "policies": [ { "kind": "constant", "value": 1.0 } ]
    }
    "#;
    let cfg = ExperimentConfig::from_json_str(raw).expect("parse config");
    assert_eq!(cfg.runs, 5);
    assert_eq!(cfg.seed, Some(9));
    assert_eq!(cfg.policies, vec![ServicePolicy::CONSTANT]);
    assert_eq!(cfg.lambdas, vec![0.5, 0.8, 0.9, 0.99]);
    assert_eq!(cfg.horizon, 10_000.0);
}

#[test]
fn config_roundtrips_through_json() {
    let cfg = ExperimentConfig {
        lambdas: vec![0.3],
        runs: 3,
        horizon: 50.0,
        seed: Some(1),
        threads: 2,
        policies: vec![ServicePolicy::Exponential { mean: 0.5 }],
    };
    let raw = serde_json::to_string(&cfg).expect("serialize");
    assert_eq!(ExperimentConfig::from_json_str(&raw).expect("parse"), cfg);
}

#[test]
fn malformed_config_is_config_error() {
    let err = ExperimentConfig::from_json_str("{ \"runs\": \"many\" }").expect_err("bad");
    assert!(matches!(err, SimError::Config(_)));
    let err = ExperimentConfig::load(std::path::Path::new("/nonexistent/mm1.json"))
        .expect_err("missing");
    assert!(matches!(err, SimError::Config(_)));
}

#[test]
fn validate_rejects_bad_parameters() {
    let base = ExperimentConfig::default();

    let cases: Vec<(ExperimentConfig, &str)> = vec![
        (
            ExperimentConfig {
                lambdas: vec![0.5, 0.0],
                ..base.clone()
            },
            "lambda",
        ),
        (
            ExperimentConfig {
                lambdas: vec![],
                ..base.clone()
            },
            "lambdas",
        ),
        (
            ExperimentConfig {
                runs: 0,
                ..base.clone()
            },
            "runs",
        ),
        (
            ExperimentConfig {
                horizon: -1.0,
                ..base.clone()
            },
            "horizon",
        ),
        (
            ExperimentConfig {
                threads: 0,
                ..base.clone()
            },
            "threads",
        ),
        (
            ExperimentConfig {
                policies: vec![ServicePolicy::Exponential { mean: -2.0 }],
                ..base.clone()
            },
            "service_mean",
        ),
    ];
    for (cfg, field) in cases {
        match cfg.validate() {
            Err(SimError::InvalidParameter { name, .. }) => assert_eq!(name, field),
            other => panic!("expected InvalidParameter for {field}, got {other:?}"),
        }
    }
}
