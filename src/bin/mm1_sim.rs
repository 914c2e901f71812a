//! 单服务台队列仿真
//!
//! 对每个 λ 分别以指数服务时间和常数服务时间重复仿真，打印仿真均值与理论响应时间。

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use mm1_sim::SimResult;
use mm1_sim::experiment::{ExperimentConfig, run_experiment};
use mm1_sim::sim::ServicePolicy;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum PolicyArg {
    Exponential,
    Constant,
    Both,
}

#[derive(Debug, Parser)]
#[command(name = "mm1-sim", about = "单服务台队列仿真：仿真均值 vs 理论响应时间")]
struct Args {
    /// 实验配置 JSON；命令行参数覆盖其中的字段
    #[arg(long)]
    config: Option<PathBuf>,

    /// 到达率列表，逗号分隔
    #[arg(long, value_delimiter = ',')]
    lambdas: Option<Vec<f64>>,

    /// 每个 λ 的仿真次数
    #[arg(long)]
    runs: Option<usize>,

    /// 每次仿真的停止时间
    #[arg(long)]
    horizon: Option<f64>,

    #[arg(long)]
    seed: Option<u64>,

    #[arg(long)]
    threads: Option<usize>,

    /// 服务时间策略
    #[arg(long, value_enum)]
    policy: Option<PolicyArg>,

    /// 服务时间均值（两种策略共用）
    #[arg(long)]
    service_mean: Option<f64>,

    /// 以 JSON 输出结果
    #[arg(long)]
    json: bool,
}

/// 只按类型筛选配置中的策略，保留其均值；配置中没有该类型时使用均值 1.0。
fn select_policies(configured: &[ServicePolicy], policy: PolicyArg) -> Vec<ServicePolicy> {
    let kinds: &[ServicePolicy] = match policy {
        PolicyArg::Exponential => &[ServicePolicy::EXPONENTIAL],
        PolicyArg::Constant => &[ServicePolicy::CONSTANT],
        PolicyArg::Both => &[ServicePolicy::EXPONENTIAL, ServicePolicy::CONSTANT],
    };
    let mut out = Vec::new();
    for fallback in kinds {
        let matching: Vec<ServicePolicy> = configured
            .iter()
            .copied()
            .filter(|p| p.name() == fallback.name())
            .collect();
        if matching.is_empty() {
            out.push(*fallback);
        } else {
            out.extend(matching);
        }
    }
    out
}

fn build_config(args: &Args) -> SimResult<ExperimentConfig> {
    let mut cfg = match &args.config {
        Some(path) => ExperimentConfig::load(path)?,
        None => ExperimentConfig::default(),
    };
    if let Some(lambdas) = &args.lambdas {
        cfg.lambdas = lambdas.clone();
    }
    if let Some(runs) = args.runs {
        cfg.runs = runs;
    }
    if let Some(horizon) = args.horizon {
        cfg.horizon = horizon;
    }
    if args.seed.is_some() {
        cfg.seed = args.seed;
    }
    if let Some(threads) = args.threads {
        cfg.threads = threads;
    }
    match (args.policy, args.service_mean) {
        (policy, Some(mean)) => {
            let exp = ServicePolicy::Exponential { mean };
            let constant = ServicePolicy::Constant { value: mean };
            cfg.policies = match policy.unwrap_or(PolicyArg::Both) {
                PolicyArg::Exponential => vec![exp],
                PolicyArg::Constant => vec![constant],
                PolicyArg::Both => vec![exp, constant],
            };
        }
        (Some(policy), None) => cfg.policies = select_policies(&cfg.policies, policy),
        (None, None) => {}
    }
    Ok(cfg)
}

fn run(args: &Args) -> SimResult<String> {
    let cfg = build_config(args)?;
    let report = run_experiment(&cfg)?;
    if args.json {
        serde_json::to_string_pretty(&report).map_err(|e| mm1_sim::SimError::Config(e.to_string()))
    } else {
        Ok(report.render_text())
    }
}

fn main() -> ExitCode {
    // 日志写到 stderr，stdout 只留结果
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();

    let args = Args::parse();
    match run(&args) {
        Ok(out) => {
            print!("{out}");
            if args.json {
                println!();
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "仿真失败");
            eprintln!("error: {e}");
            ExitCode::from(2)
        }
    }
}
