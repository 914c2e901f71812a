//! 实验驱动
//!
//! 对每个 λ、每种服务时间策略重复运行仿真 N 次，汇总平均值并附上理论值。

mod config;
mod driver;
mod report;

pub use config::ExperimentConfig;
pub use driver::{run_experiment, run_seed, run_simulation, run_simulation_with_threads};
pub use report::{DIVIDER, ExperimentReport, LambdaResult, PolicyReport, relative_error_pct};
