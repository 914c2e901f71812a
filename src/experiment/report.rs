//! 实验结果与文本输出。

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::sim::{RunOutcome, ServicePolicy, theoretical_response_time};

/// 单个 λ、单种策略下 N 次仿真的汇总。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LambdaResult {
    pub lambda: f64,
    pub policy: ServicePolicy,
    pub runs: usize,
    /// 各次 `area / clock / λ` 的平均值
    pub simulated_mean: f64,
    /// 各次结果的样本标准差
    pub std_dev: f64,
    /// 95% 置信区间半宽
    pub ci95_half_width: f64,
    /// 各次 `area / clock` 的平均值
    pub mean_in_system: f64,
    /// `1 / (1 - λ)`；λ ≥ 1 时为空
    pub theoretical_response_time: Option<f64>,
    /// 按服务时间策略的 Pollaczek–Khinchine 响应时间
    pub policy_response_time: Option<f64>,
    /// 相对 `theoretical_response_time` 的误差百分比；λ ≥ 1 时为空
    pub relative_error_pct: Option<f64>,
    pub total_events: u64,
}

impl LambdaResult {
    pub(crate) fn from_outcomes(lambda: f64, policy: ServicePolicy, outcomes: &[RunOutcome]) -> Self {
        let n = outcomes.len() as f64;
        let simulated_mean = outcomes.iter().map(|o| o.result).sum::<f64>() / n;
        let mean_in_system = outcomes.iter().map(|o| o.mean_in_system).sum::<f64>() / n;
        let std_dev = if outcomes.len() > 1 {
            let ss: f64 = outcomes
                .iter()
                .map(|o| (o.result - simulated_mean).powi(2))
                .sum();
            (ss / (n - 1.0)).sqrt()
        } else {
            0.0
        };
        let theoretical = theoretical_response_time(lambda);
        Self {
            lambda,
            policy,
            runs: outcomes.len(),
            simulated_mean,
            std_dev,
            ci95_half_width: 1.96 * std_dev / n.sqrt(),
            mean_in_system,
            theoretical_response_time: theoretical,
            policy_response_time: policy.response_time(lambda),
            relative_error_pct: theoretical.map(|t| relative_error_pct(simulated_mean, t)),
            total_events: outcomes.iter().map(|o| o.events).sum(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyReport {
    pub policy: ServicePolicy,
    pub results: Vec<LambdaResult>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperimentReport {
    pub seed: u64,
    pub runs: usize,
    pub horizon: f64,
    pub policies: Vec<PolicyReport>,
}

/// `|simulated - theoretical| / theoretical × 100`
pub fn relative_error_pct(simulated: f64, theoretical: f64) -> f64 {
    (simulated - theoretical).abs() / theoretical * 100.0
}

pub const DIVIDER: &str = "-----";

fn fmt_opt(v: Option<f64>) -> String {
    match v {
        Some(v) => format!("{v:.2}"),
        None => "inf".to_string(),
    }
}

impl ExperimentReport {
    /// 每种策略一段，段之间以 `-----` 分隔；数值保留两位小数。
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        for (i, p) in self.policies.iter().enumerate() {
            if i > 0 {
                let _ = writeln!(out, "{DIVIDER}");
            }
            let _ = writeln!(out, "service_time={} mean={}", p.policy.name(), p.policy.mean());
            for r in &p.results {
                let _ = writeln!(
                    out,
                    "lambda={} simulation={:.2} response_time={} error={} (±{:.2})",
                    r.lambda,
                    r.simulated_mean,
                    fmt_opt(r.theoretical_response_time),
                    r.relative_error_pct
                        .map_or_else(|| "n/a".to_string(), |e| format!("{e:.2}%")),
                    r.ci95_half_width,
                );
            }
        }
        out
    }
}
