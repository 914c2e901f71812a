//! 随机变量采样
//!
//! 到达间隔服从速率为 λ 的指数分布；服务时间按 [`ServicePolicy`] 为指数分布或常数。
//! 每个采样器持有自己的 `Pcg64`，不同次仿真之间互不共享。

use rand_distr::{Distribution, Exp};
use rand_pcg::Pcg64;
use serde::{Deserialize, Serialize};

use crate::error::{SimError, SimResult};

/// 产生严格为正的时间间隔。
pub trait Sampler {
    fn sample(&mut self) -> f64;
}

impl<S: Sampler + ?Sized> Sampler for &mut S {
    fn sample(&mut self) -> f64 {
        (**self).sample()
    }
}

/// 指数分布采样器。
#[derive(Debug, Clone)]
pub struct ExpSampler {
    dist: Exp<f64>,
    rng: Pcg64,
}

impl ExpSampler {
    /// 速率为 `rate`（均值 `1 / rate`）。
    pub fn with_rate(rate: f64, rng: Pcg64) -> SimResult<Self> {
        if !(rate.is_finite() && rate > 0.0) {
            return Err(SimError::invalid("rate", rate, "must be finite and > 0"));
        }
        let dist = Exp::new(rate).map_err(|_| SimError::invalid("rate", rate, "rejected by Exp"))?;
        Ok(Self { dist, rng })
    }

    pub fn with_mean(mean: f64, rng: Pcg64) -> SimResult<Self> {
        if !(mean.is_finite() && mean > 0.0) {
            return Err(SimError::invalid("mean", mean, "must be finite and > 0"));
        }
        Self::with_rate(1.0 / mean, rng)
    }
}

impl Sampler for ExpSampler {
    fn sample(&mut self) -> f64 {
        self.dist.sample(&mut self.rng)
    }
}

/// 常数采样器。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstSampler(pub f64);

impl Sampler for ConstSampler {
    fn sample(&mut self) -> f64 {
        self.0
    }
}

/// 循环返回固定序列，用于可复现的测试。
#[derive(Debug, Clone)]
pub struct SequenceSampler {
    values: Vec<f64>,
    idx: usize,
}

impl SequenceSampler {
    pub fn new(values: Vec<f64>) -> Self {
        assert!(!values.is_empty(), "SequenceSampler needs at least one value");
        Self { values, idx: 0 }
    }
}

impl Sampler for SequenceSampler {
    fn sample(&mut self) -> f64 {
        let v = self.values[self.idx];
        self.idx = (self.idx + 1) % self.values.len();
        v
    }
}

/// 服务时间策略。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ServicePolicy {
    Exponential { mean: f64 },
    Constant { value: f64 },
}

impl ServicePolicy {
    pub const EXPONENTIAL: ServicePolicy = ServicePolicy::Exponential { mean: 1.0 };
    pub const CONSTANT: ServicePolicy = ServicePolicy::Constant { value: 1.0 };

    pub fn name(&self) -> &'static str {
        match self {
            ServicePolicy::Exponential { .. } => "exponential",
            ServicePolicy::Constant { .. } => "constant",
        }
    }

    /// E[S]
    pub fn mean(&self) -> f64 {
        match *self {
            ServicePolicy::Exponential { mean } => mean,
            ServicePolicy::Constant { value } => value,
        }
    }

    /// E[S²]
    pub fn second_moment(&self) -> f64 {
        match *self {
            ServicePolicy::Exponential { mean } => 2.0 * mean * mean,
            ServicePolicy::Constant { value } => value * value,
        }
    }

    pub fn validate(&self) -> SimResult<()> {
        let m = self.mean();
        if !(m.is_finite() && m > 0.0) {
            return Err(SimError::invalid("service_mean", m, "must be finite and > 0"));
        }
        Ok(())
    }

    /// M/G/1 平均响应时间（Pollaczek–Khinchine）。ρ ≥ 1 时队列不稳定，返回 `None`。
    pub fn response_time(&self, lambda: f64) -> Option<f64> {
        let rho = lambda * self.mean();
        if rho >= 1.0 {
            return None;
        }
        Some(self.mean() + lambda * self.second_moment() / (2.0 * (1.0 - rho)))
    }

    pub fn sampler(&self, rng: Pcg64) -> SimResult<ServiceSampler> {
        self.validate()?;
        Ok(match *self {
            ServicePolicy::Exponential { mean } => {
                ServiceSampler::Exponential(ExpSampler::with_mean(mean, rng)?)
            }
            ServicePolicy::Constant { value } => ServiceSampler::Constant(ConstSampler(value)),
        })
    }
}

#[derive(Debug, Clone)]
pub enum ServiceSampler {
    Exponential(ExpSampler),
    Constant(ConstSampler),
}

impl Sampler for ServiceSampler {
    fn sample(&mut self) -> f64 {
        match self {
            ServiceSampler::Exponential(s) => s.sample(),
            ServiceSampler::Constant(s) => s.sample(),
        }
    }
}

/// M/M/1（服务均值 1）的理论响应时间 `1 / (1 - λ)`；λ ≥ 1 时为 `None`。
pub fn theoretical_response_time(lambda: f64) -> Option<f64> {
    if lambda >= 1.0 {
        return None;
    }
    Some(1.0 / (1.0 - lambda))
}
