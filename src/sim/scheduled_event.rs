//! 调度事件
//!
//! 为事件附加插入序号，保证同一时刻的事件按插入顺序（FIFO）取出。

use super::event::Event;
use std::cmp::Ordering;

/// 调度事件，包含序列号和事件本身。
#[derive(Debug, Clone, Copy)]
pub struct ScheduledEvent {
    pub(crate) seq: u64,
    pub(crate) ev: Event,
}

// BinaryHeap 是 max-heap；我们需要最小时间优先，因此反向比较。
impl Ord for ScheduledEvent {
    fn cmp(&self, other: &Self) -> Ordering {
        match self.ev.time.cmp(&other.ev.time) {
            Ordering::Equal => self.seq.cmp(&other.seq),
            ord => ord,
        }
        .reverse()
    }
}

impl PartialOrd for ScheduledEvent {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for ScheduledEvent {
    fn eq(&self, other: &Self) -> bool {
        self.ev.time == other.ev.time && self.seq == other.seq
    }
}

impl Eq for ScheduledEvent {}
