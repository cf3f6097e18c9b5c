// MyMidi Player - Library exports for tests and benchmarks

pub mod config;
pub mod instrument;
pub mod messaging;
pub mod midi;
pub mod playback;
pub mod sequencer;

// Re-export commonly used types for convenience
pub use config::{ConfigError, EngineConfig};
pub use instrument::{
    Instrument, InstrumentError, InstrumentHandle, InstrumentRegistry, InstrumentResult,
    InstrumentSource, LoadingState, VoiceId,
};
pub use messaging::channels::{
    EventConsumer, EventProducer, NotificationConsumer, NotificationProducer,
    create_event_channel, create_notification_channel,
};
pub use messaging::notification::{Notification, NotificationCategory, NotificationLevel};
pub use midi::event::{EventKind, NoteAction, SequencerEvent, translate};
pub use midi::note_key::NoteKey;
pub use playback::controller::{PlaybackController, PlaybackState, SessionState};
pub use playback::voice_tracker::VoiceTracker;
pub use sequencer::Sequencer;
