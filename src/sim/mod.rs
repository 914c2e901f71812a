//! 仿真核心模块
//!
//! 此模块包含单服务台队列仿真的核心组件：仿真时间、事件、采样器、时间加权统计与仿真引擎。

// 子模块声明
mod event;
mod sampler;
mod scheduled_event;
mod simulator;
mod stats;
mod time;

// 重新导出公共接口
pub use event::{Event, EventKind};
pub use sampler::{
    ConstSampler, ExpSampler, Sampler, SequenceSampler, ServicePolicy, ServiceSampler,
    theoretical_response_time,
};
pub use scheduled_event::ScheduledEvent;
pub use simulator::{ProcessedEvent, RunObserver, RunOutcome, Simulator};
pub use stats::TimeWeighted;
pub use time::SimTime;
