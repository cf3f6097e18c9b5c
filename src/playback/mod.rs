// Playback module - session orchestration and voice bookkeeping

pub mod controller;
pub mod voice_tracker;

pub use controller::{PlaybackController, PlaybackState, SessionState};
pub use voice_tracker::VoiceTracker;
