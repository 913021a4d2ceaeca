use hrhub_event_bus::{EventBus, EventBusError, EventReceiverExt};
use std::time::Duration;

#[derive(Clone, Debug, PartialEq, Eq)]
struct SectionTouched(usize);

#[derive(Clone, Debug, PartialEq, Eq)]
struct ReportRebuilt(&'static str);

#[tokio::test]
async fn test_event_flow() {
    let bus = EventBus::new();
    let mut rx = bus.subscribe::<SectionTouched>().unwrap();

    assert_eq!(bus.publish(SectionTouched(42)).unwrap(), 1);

    let received = rx.recv_event().await.unwrap();
    assert_eq!(*received, SectionTouched(42));
}

#[tokio::test]
async fn test_publish_without_subscribers_is_not_an_error() {
    let bus = EventBus::new();
    assert_eq!(bus.publish(SectionTouched(1)).unwrap(), 0);
}

#[tokio::test]
async fn test_receiver_lagged_recovery() {
    let bus = EventBus::new();
    let capacity = 2;
    let mut rx = bus.subscribe_with_capacity::<SectionTouched>(capacity).unwrap();

    let total_messages = 100;
    for i in 0..total_messages {
        bus.publish(SectionTouched(i)).unwrap();
    }

    let first = rx.recv_event().await.expect("should recover from lag");
    assert!(
        first.0 >= total_messages - capacity,
        "expected the fresh tail of the buffer, got {}",
        first.0
    );

    let second = rx.recv_event().await.expect("should continue receiving");
    assert_eq!(second.0, first.0 + 1);
}

#[tokio::test]
async fn test_multiple_subscribers_receive_the_same_event() {
    let bus = EventBus::new();
    let mut rx1 = bus.subscribe::<SectionTouched>().unwrap();
    let mut rx2 = bus.subscribe::<SectionTouched>().unwrap();

    assert_eq!(bus.publish(SectionTouched(100)).unwrap(), 2);

    assert_eq!(rx1.recv_event().await.unwrap().0, 100);
    assert_eq!(rx2.recv_event().await.unwrap().0, 100);
}

#[tokio::test]
async fn test_event_types_are_isolated() {
    let bus = EventBus::new();
    let mut touched = bus.subscribe::<SectionTouched>().unwrap();
    let mut rebuilt = bus.subscribe::<ReportRebuilt>().unwrap();

    bus.publish(ReportRebuilt("coverage")).unwrap();
    bus.publish(SectionTouched(7)).unwrap();

    assert_eq!(touched.recv_event().await.unwrap().0, 7);
    assert_eq!(rebuilt.recv_event().await.unwrap().0, "coverage");
}

#[tokio::test]
async fn test_zero_capacity_is_rejected() {
    let bus = EventBus::new();
    let err = bus.subscribe_with_capacity::<SectionTouched>(0).unwrap_err();
    assert!(matches!(err, EventBusError::InvalidCapacity { .. }));
}

#[tokio::test]
async fn test_shutdown_closes_receivers() {
    let bus = EventBus::new();
    let mut rx = bus.subscribe::<SectionTouched>().unwrap();

    assert_eq!(bus.shutdown(), 1);

    let closed = tokio::time::timeout(Duration::from_secs(1), rx.recv_event()).await.unwrap();
    assert!(closed.is_none());
}
