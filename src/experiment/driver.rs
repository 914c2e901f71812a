//! 实验驱动的执行部分
//!
//! 每次仿真独立播种；同一 λ 的 N 次仿真可分摊到多个线程。

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;
use tracing::{debug, info};

use super::config::{ExperimentConfig, validate_horizon, validate_lambda, validate_runs};
use super::report::{ExperimentReport, LambdaResult, PolicyReport};
use crate::error::{SimError, SimResult};
use crate::sim::{ExpSampler, RunOutcome, ServicePolicy, Simulator};

/// 第 `run` 次仿真的种子，只依赖 (base, λ, run)，与线程数无关。
///
/// 两种服务策略在同一 λ、同一次序号下使用相同的种子（公共随机数）。
pub fn run_seed(base: u64, lambda: f64, run: usize) -> u64 {
    splitmix64(splitmix64(base ^ splitmix64(lambda.to_bits())) ^ run as u64)
}

fn splitmix64(mut z: u64) -> u64 {
    z = z.wrapping_add(0x9e37_79b9_7f4a_7c15);
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}

fn single_run(lambda: f64, policy: ServicePolicy, horizon: f64, seed: u64) -> SimResult<RunOutcome> {
    let mut rng = Pcg64::seed_from_u64(seed);
    let interarrival = ExpSampler::with_rate(lambda, Pcg64::from_rng(&mut rng))?;
    let service = policy.sampler(Pcg64::from_rng(&mut rng))?;
    Simulator::new(lambda, horizon)?.run(interarrival, service)
}

/// 对同一 λ 重复 `runs` 次仿真（单线程）。
pub fn run_simulation(
    lambda: f64,
    policy: ServicePolicy,
    horizon: f64,
    runs: usize,
    seed: u64,
) -> SimResult<LambdaResult> {
    run_simulation_with_threads(lambda, policy, horizon, runs, seed, 1)
}

/// 同 [`run_simulation`]，把各次仿真分摊到 `threads` 个线程；结果与线程数无关。
#[tracing::instrument(skip(policy), fields(policy = policy.name()))]
pub fn run_simulation_with_threads(
    lambda: f64,
    policy: ServicePolicy,
    horizon: f64,
    runs: usize,
    seed: u64,
    threads: usize,
) -> SimResult<LambdaResult> {
    validate_lambda(lambda)?;
    validate_horizon(horizon)?;
    validate_runs(runs)?;
    policy.validate()?;
    if threads == 0 {
        return Err(SimError::invalid("threads", 0, "must be > 0"));
    }

    let outcomes = if threads == 1 || runs == 1 {
        (0..runs)
            .map(|run| single_run(lambda, policy, horizon, run_seed(seed, lambda, run)))
            .collect::<SimResult<Vec<_>>>()?
    } else {
        run_parallel(lambda, policy, horizon, runs, seed, threads)?
    };

    let result = LambdaResult::from_outcomes(lambda, policy, &outcomes);
    debug!(
        simulated_mean = result.simulated_mean,
        total_events = result.total_events,
        "λ 测量完成"
    );
    Ok(result)
}

fn run_parallel(
    lambda: f64,
    policy: ServicePolicy,
    horizon: f64,
    runs: usize,
    seed: u64,
    threads: usize,
) -> SimResult<Vec<RunOutcome>> {
    let threads = threads.min(runs);
    let chunk = runs.div_ceil(threads);

    let chunks: Vec<SimResult<Vec<RunOutcome>>> = std::thread::scope(|s| {
        let handles: Vec<_> = (0..threads)
            .map(|t| {
                let lo = t * chunk;
                let hi = (lo + chunk).min(runs);
                s.spawn(move || {
                    (lo..hi)
                        .map(|run| single_run(lambda, policy, horizon, run_seed(seed, lambda, run)))
                        .collect::<SimResult<Vec<_>>>()
                })
            })
            .collect();
        handles
            .into_iter()
            .map(|h| match h.join() {
                Ok(r) => r,
                Err(panic) => std::panic::resume_unwind(panic),
            })
            .collect()
    });

    // 按线程顺序拼接即为 run 序号顺序，求和顺序因此与单线程一致
    let mut outcomes = Vec::with_capacity(runs);
    for c in chunks {
        outcomes.extend(c?);
    }
    Ok(outcomes)
}

/// 按配置运行全部策略与 λ。
#[tracing::instrument(skip(cfg), fields(runs = cfg.runs, horizon = cfg.horizon))]
pub fn run_experiment(cfg: &ExperimentConfig) -> SimResult<ExperimentReport> {
    cfg.validate()?;
    let seed = cfg.seed.unwrap_or_else(|| rand::rng().random());
    info!(seed, lambdas = ?cfg.lambdas, "开始实验");

    let mut policies = Vec::with_capacity(cfg.policies.len());
    for &policy in &cfg.policies {
        let mut results = Vec::with_capacity(cfg.lambdas.len());
        for &lambda in &cfg.lambdas {
            info!(policy = policy.name(), lambda, "运行 λ");
            results.push(run_simulation_with_threads(
                lambda,
                policy,
                cfg.horizon,
                cfg.runs,
                seed,
                cfg.threads,
            )?);
        }
        policies.push(PolicyReport { policy, results });
    }

    info!("实验完成");
    Ok(ExperimentReport {
        seed,
        runs: cfg.runs,
        horizon: cfg.horizon,
        policies,
    })
}
