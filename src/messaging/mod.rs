// Messaging module - lock-free channels between collaborators

pub mod channels;
pub mod notification;

pub use channels::{
    EventConsumer, EventProducer, NotificationConsumer, NotificationProducer,
    create_event_channel, create_notification_channel,
};
pub use notification::{Notification, NotificationCategory, NotificationLevel};
