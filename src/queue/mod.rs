//! 待处理事件集合（Event scheduler）
//!
//! 引擎只依赖 [`EventScheduler`] 能力接口，底层结构可以替换：
//! 默认使用二叉堆，另提供每次插入后稳定排序的有序列表实现。

use crate::error::{SimError, SimResult};
use crate::sim::{Event, EventKind, SimTime};

mod heap;
mod sorted_list;

pub use heap::HeapScheduler;
pub use sorted_list::SortedListScheduler;

/// 事件调度器抽象
pub trait EventScheduler: std::fmt::Debug {
    /// 插入：时间必须有限，且不早于最近一次取出的事件时间。
    fn insert(&mut self, event: Event) -> SimResult<()>;
    /// 取出时间最小的事件；同一时刻按插入顺序。
    fn extract_earliest(&mut self) -> SimResult<Event>;
    /// 查看时间最小的事件但不取出。
    fn peek(&self) -> Option<&Event>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 最早的某类待处理事件的时间。
    fn earliest_of(&self, kind: EventKind) -> Option<SimTime>;
}

/// 两种实现共享的插入检查。
fn check_insert(event: &Event, now: SimTime) -> SimResult<()> {
    if !event.time.is_finite() {
        return Err(SimError::InvalidEventTime(event.time.as_f64()));
    }
    if event.time < now {
        return Err(SimError::NonCausalEvent {
            requested: event.time.as_f64(),
            current: now.as_f64(),
        });
    }
    Ok(())
}
