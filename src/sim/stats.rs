//! 时间加权统计
//!
//! 累积 ∫ level(t) dt：每次事件时刻把上一段区间的面积加入。

use super::time::SimTime;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TimeWeighted {
    area: f64,
    last: SimTime,
}

impl TimeWeighted {
    /// `level` 在 `[last, now]` 上保持不变。
    pub fn advance(&mut self, now: SimTime, level: u64) {
        self.area += level as f64 * now.since(self.last);
        self.last = now;
    }

    pub fn area(&self) -> f64 {
        self.area
    }

    pub fn last(&self) -> SimTime {
        self.last
    }
}
