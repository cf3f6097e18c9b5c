// Note identity - matches NoteOn/NoteOff pairs across retriggers

use std::fmt;

/// Canonical identity of "the same note being played".
///
/// Two events carrying the same note name, track and channel address the
/// same note slot, even when several presses overlap before a release.
/// Value-equality only; never allocated per-voice.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NoteKey {
    pub note_name: String,
    pub track: usize,
    pub channel: u8,
}

impl NoteKey {
    pub fn new(note_name: impl Into<String>, track: usize, channel: u8) -> Self {
        Self {
            note_name: note_name.into(),
            track,
            channel,
        }
    }
}

impl fmt::Display for NoteKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}_{}", self.note_name, self.track, self.channel)
    }
}
