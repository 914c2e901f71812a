use crate::error::SimError;
use crate::queue::{EventScheduler, HeapScheduler, SortedListScheduler};
use crate::sim::{Event, EventKind, SimTime};

fn drain(q: &mut dyn EventScheduler) -> Vec<Event> {
    let mut out = Vec::new();
    while !q.is_empty() {
        out.push(q.extract_earliest().expect("non-empty"));
    }
    out
}

fn orders_by_time_then_insertion(q: &mut dyn EventScheduler) {
    q.insert(Event::arrival(SimTime(10.0))).expect("insert");
    q.insert(Event::departure(SimTime(5.0))).expect("insert");
    q.insert(Event::departure(SimTime(10.0))).expect("insert");
    q.insert(Event::arrival(SimTime(7.5))).expect("insert");
    assert_eq!(q.len(), 4);
    assert_eq!(q.peek().map(|e| e.time), Some(SimTime(5.0)));

    let got = drain(q);
    assert_eq!(
        got,
        vec![
            Event::departure(SimTime(5.0)),
            Event::arrival(SimTime(7.5)),
            Event::arrival(SimTime(10.0)),
            Event::departure(SimTime(10.0)),
        ]
    );
}

#[test]
fn heap_scheduler_orders_by_time_then_insertion() {
    orders_by_time_then_insertion(&mut HeapScheduler::new());
}

#[test]
fn sorted_list_scheduler_orders_by_time_then_insertion() {
    orders_by_time_then_insertion(&mut SortedListScheduler::new());
}

#[test]
fn extract_from_empty_scheduler_is_empty_queue_error() {
    let mut heap = HeapScheduler::new();
    assert_eq!(heap.extract_earliest(), Err(SimError::EmptyQueue));
    let mut list = SortedListScheduler::new();
    assert_eq!(list.extract_earliest(), Err(SimError::EmptyQueue));
    assert!(heap.is_empty() && list.is_empty());
    assert!(heap.peek().is_none());
}

#[test]
fn scheduler_rejects_events_before_last_extracted_time() {
    let mut q = HeapScheduler::new();
    q.insert(Event::arrival(SimTime(4.0))).expect("insert");
    q.extract_earliest().expect("extract");

    let err = q.insert(Event::departure(SimTime(3.0))).expect_err("past event");
    assert_eq!(
        err,
        SimError::NonCausalEvent {
            requested: 3.0,
            current: 4.0
        }
    );
    // 同一时刻允许
    assert!(q.insert(Event::departure(SimTime(4.0))).is_ok());
}

#[test]
fn scheduler_rejects_non_finite_times() {
    let mut q = SortedListScheduler::new();
    assert!(matches!(
        q.insert(Event::arrival(SimTime(f64::NAN))),
        Err(SimError::InvalidEventTime(_))
    ));
    assert_eq!(
        q.insert(Event::arrival(SimTime(f64::INFINITY))),
        Err(SimError::InvalidEventTime(f64::INFINITY))
    );
    assert!(q.is_empty());
}

#[test]
fn earliest_of_finds_pending_arrival_behind_departure() {
    for q in [
        &mut HeapScheduler::new() as &mut dyn EventScheduler,
        &mut SortedListScheduler::new(),
    ] {
        q.insert(Event::departure(SimTime(1.0))).expect("insert");
        q.insert(Event::arrival(SimTime(6.0))).expect("insert");
        q.insert(Event::arrival(SimTime(2.0))).expect("insert");
        assert_eq!(q.earliest_of(EventKind::Arrival), Some(SimTime(2.0)));
        assert_eq!(q.earliest_of(EventKind::Departure), Some(SimTime(1.0)));
        q.extract_earliest().expect("extract");
        assert_eq!(q.earliest_of(EventKind::Departure), None);
    }
}
