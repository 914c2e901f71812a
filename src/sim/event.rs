//! 事件
//!
//! 单服务台队列只有两类事件：到达与离开。

use serde::{Deserialize, Serialize};

use super::time::SimTime;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Arrival,
    Departure,
}

/// 待处理事件：类型 + 触发时间。处理后即丢弃。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Event {
    pub kind: EventKind,
    pub time: SimTime,
}

impl Event {
    pub fn arrival(time: SimTime) -> Event {
        Event {
            kind: EventKind::Arrival,
            time,
        }
    }

    pub fn departure(time: SimTime) -> Event {
        Event {
            kind: EventKind::Departure,
            time,
        }
    }
}
