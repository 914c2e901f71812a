//! 有序列表调度器
//!
//! 追加后按时间对整个列表做稳定排序，同一时刻保持插入顺序。
//! 单服务台模型中只有两个待处理事件，足够使用。

use super::{EventScheduler, check_insert};
use crate::error::{SimError, SimResult};
use crate::sim::{Event, EventKind, SimTime};

#[derive(Debug, Default)]
pub struct SortedListScheduler {
    now: SimTime,
    events: Vec<Event>,
}

impl SortedListScheduler {
    pub fn new() -> Self {
        Self::default()
    }
}

impl EventScheduler for SortedListScheduler {
    fn insert(&mut self, event: Event) -> SimResult<()> {
        check_insert(&event, self.now)?;
        self.events.push(event);
        self.events.sort_by_key(|ev| ev.time);
        Ok(())
    }

    fn extract_earliest(&mut self) -> SimResult<Event> {
        if self.events.is_empty() {
            return Err(SimError::EmptyQueue);
        }
        let ev = self.events.remove(0);
        self.now = ev.time;
        Ok(ev)
    }

    fn peek(&self) -> Option<&Event> {
        self.events.first()
    }

    fn len(&self) -> usize {
        self.events.len()
    }

    fn earliest_of(&self, kind: EventKind) -> Option<SimTime> {
        self.events.iter().find(|ev| ev.kind == kind).map(|ev| ev.time)
    }
}
