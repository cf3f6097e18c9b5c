// Instrument contracts - playable voice sources and their acquisition

use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

/// Opaque identifier of a single sounding voice instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VoiceId(Uuid);

impl VoiceId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for VoiceId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for VoiceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A loaded, ready-to-play instrument voice source.
///
/// Implementations are provided by the embedding application (soundfont
/// renderer, synth, test fake). `Send + Sync` because handles are shared
/// read-only across the session once loading completes.
pub trait Instrument: Send + Sync {
    fn name(&self) -> &str;

    /// Start a new voice for the given note name.
    fn play(&self, note_name: &str) -> VoiceId;

    /// Stop a voice previously returned by `play`. Stopping an unknown or
    /// already finished voice must be a no-op.
    fn stop(&self, voice: VoiceId);
}

/// Shared handle to a loaded instrument. Owned by the registry, shared
/// read-only with the dispatch path for the life of the session.
pub type InstrumentHandle = Arc<dyn Instrument>;

/// Acquisition of instruments, one per channel.
///
/// Acquisition may be slow (network fetch, disk decode) and is issued
/// from worker threads during preload, hence `Send + Sync`.
pub trait InstrumentSource: Send + Sync {
    fn acquire(&self, channel: u8) -> Result<InstrumentHandle, String>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_voice_ids_are_unique() {
        let a = VoiceId::new();
        let b = VoiceId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn test_voice_id_copy_equality() {
        let a = VoiceId::new();
        let b = a;
        assert_eq!(a, b);
    }
}
