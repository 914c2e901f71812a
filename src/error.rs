//! 错误类型
//!
//! 仿真库所有可失败的接口都返回 `SimResult<T>`。`EmptyQueue` 与
//! `DepartureFromEmptySystem` 表示调度不变量被破坏（缺陷），其余为参数或配置错误。

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimError {
    /// 从空的事件集合中取事件。
    #[error("event queue is empty")]
    EmptyQueue,

    /// 驱动层参数非法，在任何一次仿真开始之前拒绝。
    #[error("invalid parameter `{name}` = {value}: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: String,
        reason: &'static str,
    },

    /// 调度时间早于最近一次取出的事件时间。
    #[error("cannot schedule event at t={requested} when current time is t={current}")]
    NonCausalEvent { requested: f64, current: f64 },

    #[error("event time {0} is not finite")]
    InvalidEventTime(f64),

    /// 系统内没有顾客时处理了离开事件。
    #[error("departure at t={at} with no customer in system")]
    DepartureFromEmptySystem { at: f64 },

    #[error("config error: {0}")]
    Config(String),
}

impl SimError {
    pub(crate) fn invalid(name: &'static str, value: impl ToString, reason: &'static str) -> Self {
        SimError::InvalidParameter {
            name,
            value: value.to_string(),
            reason,
        }
    }
}

pub type SimResult<T> = Result<T, SimError>;
