use super::*;
use crate::bus::EventBus;
use serde_json::json;
use std::sync::Mutex;

fn counting_subscriber(bus: &EventBus, name: &str) -> (Arc<Mutex<u32>>, Subscription) {
    let count = Arc::new(Mutex::new(0));
    let counter = Arc::clone(&count);
    let sub = bus
        .subscribe(name, move |_: &Value| *counter.lock().unwrap() += 1)
        .unwrap();
    (count, sub)
}

#[test]
fn unsubscribe_stops_delivery() {
    let bus = EventBus::new();
    let (count, sub) = counting_subscriber(&bus, "tick");

    bus.publish("tick", json!(1));
    assert_eq!(*count.lock().unwrap(), 1);

    sub.unsubscribe();

    bus.publish("tick", json!(2));
    assert_eq!(*count.lock().unwrap(), 1);
}

#[test]
fn unsubscribe_is_idempotent() {
    let bus = EventBus::new();
    let (count, sub) = counting_subscriber(&bus, "tick");

    sub.unsubscribe();
    sub.unsubscribe();

    bus.publish("tick", json!(1));
    assert_eq!(*count.lock().unwrap(), 0);
    assert_eq!(bus.subscriber_count(), 0);
}

#[test]
fn unsubscribe_removes_entry_from_bus() {
    let bus = EventBus::new();
    let (_count, sub) = counting_subscriber(&bus, "tick");
    assert_eq!(bus.subscriber_count(), 1);
    assert!(sub.is_active());

    sub.unsubscribe();

    assert_eq!(bus.subscriber_count(), 0);
    assert!(!sub.is_active());
}

#[test]
fn dropping_handle_does_not_cancel() {
    let bus = EventBus::new();
    let (count, sub) = counting_subscriber(&bus, "tick");

    drop(sub);

    bus.publish("tick", json!(1));
    assert_eq!(*count.lock().unwrap(), 1);
    assert_eq!(bus.subscriber_count(), 1);
}

#[test]
fn callback_can_unsubscribe_later_subscription() {
    let bus = EventBus::new();

    // s1 runs first and cancels s2 mid-dispatch
    let victim: Arc<Mutex<Option<Subscription>>> = Arc::new(Mutex::new(None));
    let slot = Arc::clone(&victim);
    let _s1 = bus
        .subscribe("tick", move |_: &Value| {
            if let Some(sub) = slot.lock().unwrap().as_ref() {
                sub.unsubscribe();
            }
        })
        .unwrap();

    let (count, s2) = counting_subscriber(&bus, "tick");
    *victim.lock().unwrap() = Some(s2);

    bus.publish("tick", json!(1));

    assert_eq!(*count.lock().unwrap(), 0);
    assert_eq!(bus.subscriber_count(), 1);
}

#[test]
fn unsubscribe_after_bus_dropped_is_noop() {
    let bus = EventBus::new();
    let (_count, sub) = counting_subscriber(&bus, "tick");

    drop(bus);

    // Registry is gone; this must not fail
    sub.unsubscribe();
    assert!(!sub.is_active());
}

#[test]
fn handle_exposes_registration_details() {
    let bus = EventBus::new();
    let sub = bus.subscribe("queue:item:added", |_: &Value| {}).unwrap();
    let other = bus.subscribe("queue:item:added", |_: &Value| {}).unwrap();

    assert_eq!(sub.event_name(), "queue:item:added");
    assert!(sub.is_active());
    assert_ne!(sub.id(), other.id());
}
