//! 二叉堆调度器
//!
//! insert / extract_earliest 均为 O(log n)。

use std::collections::BinaryHeap;

use tracing::trace;

use super::{EventScheduler, check_insert};
use crate::error::{SimError, SimResult};
use crate::sim::{Event, EventKind, ScheduledEvent, SimTime};

#[derive(Debug, Default)]
pub struct HeapScheduler {
    now: SimTime,
    next_seq: u64,
    q: BinaryHeap<ScheduledEvent>,
}

impl HeapScheduler {
    pub fn new() -> Self {
        Self::default()
    }
}

impl EventScheduler for HeapScheduler {
    fn insert(&mut self, event: Event) -> SimResult<()> {
        check_insert(&event, self.now)?;
        let seq = self.next_seq;
        self.next_seq = self.next_seq.wrapping_add(1);
        trace!(kind = ?event.kind, at = %event.time, seq, "调度事件");
        self.q.push(ScheduledEvent { seq, ev: event });
        Ok(())
    }

    fn extract_earliest(&mut self) -> SimResult<Event> {
        let item = self.q.pop().ok_or(SimError::EmptyQueue)?;
        self.now = item.ev.time;
        Ok(item.ev)
    }

    fn peek(&self) -> Option<&Event> {
        self.q.peek().map(|item| &item.ev)
    }

    fn len(&self) -> usize {
        self.q.len()
    }

    fn earliest_of(&self, kind: EventKind) -> Option<SimTime> {
        self.q
            .iter()
            .filter(|item| item.ev.kind == kind)
            .map(|item| item.ev.time)
            .min()
    }
}
