// Communication channels lock-free

use crate::messaging::notification::Notification;
use crate::midi::event::SequencerEvent;
use ringbuf::{HeapRb, traits::Split};

// Sequencer → engine. Strict FIFO: delivery order is dispatch order,
// which is what makes replaying a fixed event list deterministic.
pub type EventProducer = ringbuf::HeapProd<SequencerEvent>;
pub type EventConsumer = ringbuf::HeapCons<SequencerEvent>;

pub fn create_event_channel(capacity: usize) -> (EventProducer, EventConsumer) {
    let rb = HeapRb::<SequencerEvent>::new(capacity);
    rb.split()
}

// Engine → presentation layer.
pub type NotificationProducer = ringbuf::HeapProd<Notification>;
pub type NotificationConsumer = ringbuf::HeapCons<Notification>;

pub fn create_notification_channel(
    capacity: usize,
) -> (NotificationProducer, NotificationConsumer) {
    let rb = HeapRb::<Notification>::new(capacity);
    rb.split()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ringbuf::traits::{Consumer, Producer};

    #[test]
    fn test_event_channel_preserves_order() {
        let (mut tx, mut rx) = create_event_channel(8);

        tx.try_push(SequencerEvent::note_on("C4", 0, 0)).unwrap();
        tx.try_push(SequencerEvent::note_on("E4", 0, 0)).unwrap();
        tx.try_push(SequencerEvent::note_off("C4", 0, 0)).unwrap();

        assert_eq!(rx.try_pop().unwrap().note_name, "C4");
        assert_eq!(rx.try_pop().unwrap().note_name, "E4");
        let third = rx.try_pop().unwrap();
        assert_eq!(third.note_name, "C4");
        assert!(rx.try_pop().is_none());
    }

    #[test]
    fn test_event_channel_capacity_is_bounded() {
        let (mut tx, _rx) = create_event_channel(2);

        assert!(tx.try_push(SequencerEvent::other(0, 0)).is_ok());
        assert!(tx.try_push(SequencerEvent::other(0, 0)).is_ok());
        assert!(tx.try_push(SequencerEvent::other(0, 0)).is_err());
    }
}
