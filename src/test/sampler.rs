use crate::error::SimError;
use crate::sim::{
    ConstSampler, ExpSampler, Sampler, SequenceSampler, ServicePolicy, ServiceSampler,
    theoretical_response_time,
};
use rand::SeedableRng;
use rand_pcg::Pcg64;

#[test]
fn sequence_sampler_cycles_through_values() {
    let mut s = SequenceSampler::new(vec![1.0, 2.0, 3.0]);
    let got: Vec<f64> = (0..7).map(|_| s.sample()).collect();
    assert_eq!(got, vec![1.0, 2.0, 3.0, 1.0, 2.0, 3.0, 1.0]);
}

#[test]
fn exp_sampler_is_positive_with_expected_mean() {
    let mut s = ExpSampler::with_rate(2.0, Pcg64::seed_from_u64(42)).expect("sampler");
    let n = 200_000;
    let mut sum = 0.0;
    for _ in 0..n {
        let v = s.sample();
        assert!(v >= 0.0);
        sum += v;
    }
    let mean = sum / n as f64;
    assert!((mean - 0.5).abs() < 0.01, "mean = {mean}");
}

#[test]
fn exp_sampler_same_seed_same_draws() {
    let mut a = ExpSampler::with_mean(1.0, Pcg64::seed_from_u64(7)).expect("a");
    let mut b = ExpSampler::with_mean(1.0, Pcg64::seed_from_u64(7)).expect("b");
    for _ in 0..100 {
        assert_eq!(a.sample(), b.sample());
    }
}

#[test]
fn exp_sampler_rejects_non_positive_rate() {
    for rate in [0.0, -1.0, f64::NAN, f64::INFINITY] {
        assert!(matches!(
            ExpSampler::with_rate(rate, Pcg64::seed_from_u64(0)),
            Err(SimError::InvalidParameter { name: "rate", .. })
        ));
    }
    assert!(matches!(
        ExpSampler::with_mean(0.0, Pcg64::seed_from_u64(0)),
        Err(SimError::InvalidParameter { name: "mean", .. })
    ));
}

#[test]
fn service_policy_builds_matching_sampler() {
    let mut c = ServicePolicy::CONSTANT
        .sampler(Pcg64::seed_from_u64(1))
        .expect("constant");
    assert!(matches!(c, ServiceSampler::Constant(ConstSampler(v)) if v == 1.0));
    assert_eq!(c.sample(), 1.0);

    let e = ServicePolicy::EXPONENTIAL
        .sampler(Pcg64::seed_from_u64(1))
        .expect("exponential");
    assert!(matches!(e, ServiceSampler::Exponential(_)));

    let bad = ServicePolicy::Constant { value: 0.0 };
    assert!(bad.sampler(Pcg64::seed_from_u64(1)).is_err());
}

#[test]
fn policy_response_time_follows_pollaczek_khinchine() {
    // M/M/1: 1/(1-ρ)
    assert_eq!(ServicePolicy::EXPONENTIAL.response_time(0.5), Some(2.0));
    // M/D/1: 1 + ρ/(2(1-ρ))
    assert_eq!(ServicePolicy::CONSTANT.response_time(0.5), Some(1.5));
    let w = ServicePolicy::CONSTANT.response_time(0.9).expect("stable");
    assert!((w - 5.5).abs() < 1e-9);
    assert_eq!(ServicePolicy::EXPONENTIAL.response_time(1.0), None);
    assert_eq!(ServicePolicy::Exponential { mean: 2.0 }.response_time(0.5), None);
}

#[test]
fn theoretical_response_time_is_one_over_one_minus_lambda() {
    assert_eq!(theoretical_response_time(0.5), Some(2.0));
    let w = theoretical_response_time(0.8).expect("stable");
    assert!((w - 5.0).abs() < 1e-9);
    let w = theoretical_response_time(0.99).expect("stable");
    assert!((w - 100.0).abs() < 1e-6);
    assert_eq!(theoretical_response_time(1.0), None);
    assert_eq!(theoretical_response_time(1.5), None);
}

#[test]
fn service_policy_serializes_with_kind_tag() {
    let raw = serde_json::to_string(&ServicePolicy::CONSTANT).expect("serialize");
    assert_eq!(raw, r#"{"kind":"constant","value":1.0}"#);
    let p: ServicePolicy =
        serde_json::from_str(r#"{"kind":"exponential","mean":2.5}"#).expect("parse");
    assert_eq!(p, ServicePolicy::Exponential { mean: 2.5 });
    assert_eq!(p.name(), "exponential");
    assert_eq!(p.second_moment(), 12.5);
}
