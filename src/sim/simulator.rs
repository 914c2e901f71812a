//! 仿真引擎
//!
//! 单服务台队列的一次完整仿真：从两个种子事件开始，循环取出最早事件、更新顾客数、
//! 调度后续事件，直到时钟越过 horizon。

use serde::Serialize;
use tracing::{debug, trace};

use super::event::{Event, EventKind};
use super::sampler::Sampler;
use super::stats::TimeWeighted;
use super::time::SimTime;
use crate::error::{SimError, SimResult};
use crate::queue::{EventScheduler, HeapScheduler};

/// 一次已处理的事件及处理后的状态。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProcessedEvent {
    pub event: Event,
    pub customers: u64,
    /// 处理完毕（包括新事件插入）后的待处理事件数。
    pub pending: usize,
    pub area: f64,
}

/// 逐事件观察者。
pub trait RunObserver {
    fn on_event(&mut self, rec: &ProcessedEvent);
}

impl RunObserver for () {
    fn on_event(&mut self, _rec: &ProcessedEvent) {}
}

impl RunObserver for Vec<ProcessedEvent> {
    fn on_event(&mut self, rec: &ProcessedEvent) {
        self.push(*rec);
    }
}

/// 一次仿真的结果。
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RunOutcome {
    /// ∫ customers dt
    pub area: f64,
    /// 结束时钟（第一个越过 horizon 的事件时间）。
    pub clock: f64,
    /// area / clock
    pub mean_in_system: f64,
    /// area / clock / λ
    pub result: f64,
    pub events: u64,
    pub final_customers: u64,
}

/// 事件驱动仿真器：维护时钟、顾客数与事件队列。
#[derive(Debug)]
pub struct Simulator<Q: EventScheduler = HeapScheduler> {
    lambda: f64,
    horizon: SimTime,
    clock: SimTime,
    customers: u64,
    stats: TimeWeighted,
    events: u64,
    q: Q,
}

impl Simulator<HeapScheduler> {
    pub fn new(lambda: f64, horizon: f64) -> SimResult<Self> {
        Self::with_scheduler(lambda, horizon, HeapScheduler::new())
    }
}

impl<Q: EventScheduler> Simulator<Q> {
    pub fn with_scheduler(lambda: f64, horizon: f64, q: Q) -> SimResult<Self> {
        if !(lambda.is_finite() && lambda > 0.0) {
            return Err(SimError::invalid("lambda", lambda, "must be finite and > 0"));
        }
        if !(horizon.is_finite() && horizon > 0.0) {
            return Err(SimError::invalid("horizon", horizon, "must be finite and > 0"));
        }
        if !q.is_empty() {
            return Err(SimError::invalid("scheduler", q.len(), "must start empty"));
        }
        Ok(Self {
            lambda,
            horizon: SimTime(horizon),
            clock: SimTime::ZERO,
            customers: 0,
            stats: TimeWeighted::default(),
            events: 0,
            q,
        })
    }

    /// 运行到 horizon。
    pub fn run<A: Sampler, S: Sampler>(
        self,
        interarrival: A,
        service: S,
    ) -> SimResult<RunOutcome> {
        self.run_observed(interarrival, service, &mut ())
    }

    /// 运行到 horizon，每处理一个事件回调一次 `obs`。
    pub fn run_observed<A: Sampler, S: Sampler>(
        mut self,
        mut interarrival: A,
        mut service: S,
        obs: &mut dyn RunObserver,
    ) -> SimResult<RunOutcome> {
        // 第一个顾客在 t=0 到达；离开事件直接以一次服务时间作为种子。
        self.q.insert(Event::arrival(SimTime::ZERO))?;
        self.q.insert(Event::departure(SimTime::ZERO + service.sample()))?;

        while self.clock <= self.horizon {
            let ev = self.step(&mut interarrival, &mut service)?;
            let rec = ProcessedEvent {
                event: ev,
                customers: self.customers,
                pending: self.q.len(),
                area: self.stats.area(),
            };
            trace!(kind = ?ev.kind, at = %ev.time, customers = self.customers, "处理事件");
            obs.on_event(&rec);
        }

        let area = self.stats.area();
        let clock = self.clock.as_f64();
        let mean_in_system = area / clock;
        let outcome = RunOutcome {
            area,
            clock,
            mean_in_system,
            // 人·时间/时间 再除以 λ，得到以时间计的量
            result: mean_in_system / self.lambda,
            events: self.events,
            final_customers: self.customers,
        };
        debug!(
            lambda = self.lambda,
            events = outcome.events,
            clock,
            result = outcome.result,
            "单次仿真完成"
        );
        Ok(outcome)
    }

    fn step<A: Sampler, S: Sampler>(
        &mut self,
        interarrival: &mut A,
        service: &mut S,
    ) -> SimResult<Event> {
        let ev = self.q.extract_earliest()?;
        self.clock = ev.time;
        self.stats.advance(self.clock, self.customers);
        self.events += 1;

        match ev.kind {
            EventKind::Arrival => {
                self.customers += 1;
                self.q.insert(Event::arrival(ev.time + interarrival.sample()))?;
            }
            EventKind::Departure => {
                self.customers = self
                    .customers
                    .checked_sub(1)
                    .ok_or(SimError::DepartureFromEmptySystem {
                        at: ev.time.as_f64(),
                    })?;
                let start = if self.customers == 0 {
                    // 队列已空：下一次服务从下一个到达开始
                    self.q
                        .earliest_of(EventKind::Arrival)
                        .ok_or(SimError::EmptyQueue)?
                } else {
                    ev.time
                };
                self.q.insert(Event::departure(start + service.sample()))?;
            }
        }
        Ok(ev)
    }
}
