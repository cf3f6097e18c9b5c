// Voice tracker - currently sounding voices keyed by note identity

use crate::instrument::{InstrumentHandle, VoiceId};
use crate::midi::note_key::NoteKey;
use std::collections::HashMap;

/// A sounding voice together with the instrument that produced it.
struct ActiveVoice {
    instrument: InstrumentHandle,
    voice: VoiceId,
}

/// Registry of currently sounding voices for one playback session.
///
/// A single (note name, track, channel) identity can legitimately hold
/// several sounding voices at once (the same note struck again before
/// its release). A NoteOff must release all of them together; matching a
/// single remembered handle is how notes get stuck.
#[derive(Default)]
pub struct VoiceTracker {
    active: HashMap<NoteKey, Vec<ActiveVoice>>,
}

impl VoiceTracker {
    pub fn new() -> Self {
        Self {
            active: HashMap::new(),
        }
    }

    /// Register a newly started voice under its note identity. Appends,
    /// never overwrites.
    pub fn start(&mut self, key: NoteKey, instrument: InstrumentHandle, voice: VoiceId) {
        self.active.entry(key).or_default().push(ActiveVoice {
            instrument,
            voice,
        });
    }

    /// Stop and forget every voice under the key.
    ///
    /// Returns how many voices were stopped. Zero (unknown key, or key
    /// already released) is a normal occurrence at stream boundaries,
    /// not an error. Calling twice in succession stops the voices once
    /// and returns 0 the second time.
    pub fn stop_all(&mut self, key: &NoteKey) -> usize {
        let Some(voices) = self.active.remove(key) else {
            return 0;
        };
        let stopped = voices.len();
        for active in voices {
            active.instrument.stop(active.voice);
        }
        stopped
    }

    /// Stop every voice across all identities. Used by the transport
    /// stop command; returns how many voices were released.
    pub fn stop_everything(&mut self) -> usize {
        let mut stopped = 0;
        for (_, voices) in self.active.drain() {
            stopped += voices.len();
            for active in voices {
                active.instrument.stop(active.voice);
            }
        }
        stopped
    }

    pub fn active_voice_count(&self) -> usize {
        self.active.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }
}
