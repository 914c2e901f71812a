//! 实验配置
//!
//! 可从 JSON 读取；缺省字段使用 [`ExperimentConfig::default`]。

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{SimError, SimResult};
use crate::sim::ServicePolicy;

pub const DEFAULT_LAMBDAS: [f64; 4] = [0.5, 0.8, 0.9, 0.99];
pub const DEFAULT_RUNS: usize = 100;
pub const DEFAULT_HORIZON: f64 = 10_000.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperimentConfig {
    /// 到达率集合
    pub lambdas: Vec<f64>,
    /// 每个 λ 的仿真次数
    pub runs: usize,
    /// 每次仿真的停止时间
    pub horizon: f64,
    /// 基础随机种子；为空时随机选取
    pub seed: Option<u64>,
    /// 每个 λ 的仿真分摊到的线程数
    pub threads: usize,
    pub policies: Vec<ServicePolicy>,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            lambdas: DEFAULT_LAMBDAS.to_vec(),
            runs: DEFAULT_RUNS,
            horizon: DEFAULT_HORIZON,
            seed: None,
            threads: 1,
            policies: vec![ServicePolicy::EXPONENTIAL, ServicePolicy::CONSTANT],
        }
    }
}

impl ExperimentConfig {
    pub fn from_json_str(raw: &str) -> SimResult<Self> {
        serde_json::from_str(raw).map_err(|e| SimError::Config(e.to_string()))
    }

    pub fn load(path: &Path) -> SimResult<Self> {
        let raw = fs::read_to_string(path)
            .map_err(|e| SimError::Config(format!("read {}: {e}", path.display())))?;
        Self::from_json_str(&raw)
    }

    /// 在任何仿真开始之前检查参数。
    pub fn validate(&self) -> SimResult<()> {
        if self.lambdas.is_empty() {
            return Err(SimError::invalid("lambdas", "[]", "must not be empty"));
        }
        for &lambda in &self.lambdas {
            validate_lambda(lambda)?;
        }
        validate_runs(self.runs)?;
        validate_horizon(self.horizon)?;
        if self.threads == 0 {
            return Err(SimError::invalid("threads", 0, "must be > 0"));
        }
        if self.policies.is_empty() {
            return Err(SimError::invalid("policies", "[]", "must not be empty"));
        }
        for policy in &self.policies {
            policy.validate()?;
        }
        Ok(())
    }
}

pub(crate) fn validate_lambda(lambda: f64) -> SimResult<()> {
    if !(lambda.is_finite() && lambda > 0.0) {
        return Err(SimError::invalid("lambda", lambda, "must be finite and > 0"));
    }
    Ok(())
}

pub(crate) fn validate_runs(runs: usize) -> SimResult<()> {
    if runs == 0 {
        return Err(SimError::invalid("runs", runs, "must be > 0"));
    }
    Ok(())
}

pub(crate) fn validate_horizon(horizon: f64) -> SimResult<()> {
    if !(horizon.is_finite() && horizon > 0.0) {
        return Err(SimError::invalid("horizon", horizon, "must be finite and > 0"));
    }
    Ok(())
}
