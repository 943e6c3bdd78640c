#[cfg(test)]
mod tests {
    use confhub_event_bus::*;
    use std::time::Duration;

    #[derive(Clone, Debug, PartialEq, Eq)]
    struct SeatReleased(pub usize);

    #[derive(Clone, Debug, PartialEq, Eq)]
    struct SpeakerScheduled(pub &'static str);

    #[tokio::test]
    async fn test_queue_preserves_order() {
        let bus = EventBus::new();
        let mut rx = bus.consume::<SpeakerScheduled>(4).unwrap();

        for name in ["Ada", "Grace", "Barbara"] {
            bus.enqueue(SpeakerScheduled(name)).unwrap();
        }

        assert_eq!(rx.next_event().await.unwrap().0, "Ada");
        assert_eq!(rx.next_event().await.unwrap().0, "Grace");
        assert_eq!(rx.next_event().await.unwrap().0, "Barbara");
    }

    #[tokio::test]
    async fn test_event_types_are_isolated() {
        let bus = EventBus::new();
        let mut seats = bus.consume::<SeatReleased>(4).unwrap();
        let mut speakers = bus.consume::<SpeakerScheduled>(4).unwrap();

        bus.enqueue(SeatReleased(7)).unwrap();
        bus.enqueue(SpeakerScheduled("Ada")).unwrap();

        assert_eq!(seats.next_event().await.unwrap().0, 7);
        assert_eq!(speakers.next_event().await.unwrap().0, "Ada");
    }

    #[tokio::test]
    async fn test_queue_keeps_events_until_consumer_arrives() {
        let bus = EventBus::new();
        bus.enqueue(SpeakerScheduled("Early")).unwrap();

        let mut rx = bus.consume::<SpeakerScheduled>(DEFAULT_CAPACITY).unwrap();
        assert_eq!(rx.recv().await.unwrap().0, "Early");
    }

    #[tokio::test]
    async fn test_queue_receiver_only_once() {
        let bus = EventBus::new();
        let _rx = bus.consume::<SpeakerScheduled>(1).unwrap();

        let second = bus.consume::<SpeakerScheduled>(1);
        assert!(matches!(second, Err(EventBusError::ReceiverTaken { .. })));
    }

    #[tokio::test]
    async fn test_full_queue_rejects_event() {
        let bus = EventBus::new();
        let _rx = bus.consume::<SeatReleased>(1).unwrap();

        bus.enqueue(SeatReleased(1)).unwrap();
        let overflow = bus.enqueue(SeatReleased(2));
        assert!(matches!(overflow, Err(EventBusError::ChannelFull { .. })));
    }

    #[tokio::test]
    async fn test_dropped_consumer_closes_queue() {
        let bus = EventBus::new();
        let rx = bus.consume::<SeatReleased>(4).unwrap();
        drop(rx);

        let result = bus.enqueue(SeatReleased(3));
        assert!(matches!(result, Err(EventBusError::ChannelClosed { .. })));
    }

    #[tokio::test]
    async fn test_shutdown_closes_all_channels() {
        let bus = EventBus::new();
        let mut seats = bus.consume::<SeatReleased>(4).unwrap();
        let mut speakers = bus.consume::<SpeakerScheduled>(4).unwrap();
        bus.enqueue(SeatReleased(1)).unwrap();

        assert_eq!(bus.shutdown(), 2);

        assert_eq!(seats.next_event().await.unwrap().0, 1);
        assert!(seats.next_event().await.is_none());
        assert!(speakers.next_event().await.is_none());
    }

    #[tokio::test]
    async fn test_concurrent_enqueuers() {
        let bus = EventBus::new();
        let mut rx = bus.consume::<SeatReleased>(256).unwrap();

        let first = bus.clone();
        let a = tokio::spawn(async move {
            for i in 0..50 {
                first.enqueue(SeatReleased(i)).unwrap();
            }
        });
        let second = bus.clone();
        let b = tokio::spawn(async move {
            for i in 50..100 {
                second.enqueue(SeatReleased(i)).unwrap();
            }
        });
        a.await.unwrap();
        b.await.unwrap();

        let mut received = 0;
        while tokio::time::timeout(Duration::from_millis(100), rx.recv()).await.is_ok_and(|e| e.is_some()) {
            received += 1;
        }
        assert_eq!(received, 100);
    }

    #[tokio::test]
    async fn test_invalid_capacity_rejected() {
        let bus = EventBus::new();

        let result = bus.consume::<SpeakerScheduled>(0);
        assert!(matches!(result, Err(EventBusError::InvalidCapacity { .. })));
    }
}
