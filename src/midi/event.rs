// Sequencer event vocabulary and note action translation

use crate::midi::instrument_name::instrument_name;
use crate::midi::note_key::NoteKey;

/// Kind of event delivered by the sequencer.
///
/// `Other` covers every vocabulary item the playback engine does not act
/// on (tempo changes, controllers, meta events).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    NoteOn,
    NoteOff,
    Other,
}

/// Raw event delivered by the external sequencer, one per dispatch tick.
/// Timing is implicit: the sequencer clock decides when it arrives.
#[derive(Debug, Clone)]
pub struct SequencerEvent {
    pub kind: EventKind,
    pub channel: u8,
    pub track: usize,
    pub note_name: String,
}

impl SequencerEvent {
    pub fn note_on(note_name: impl Into<String>, track: usize, channel: u8) -> Self {
        Self {
            kind: EventKind::NoteOn,
            channel,
            track,
            note_name: note_name.into(),
        }
    }

    pub fn note_off(note_name: impl Into<String>, track: usize, channel: u8) -> Self {
        Self {
            kind: EventKind::NoteOff,
            channel,
            track,
            note_name: note_name.into(),
        }
    }

    pub fn other(track: usize, channel: u8) -> Self {
        Self {
            kind: EventKind::Other,
            channel,
            track,
            note_name: String::new(),
        }
    }
}

/// Playback action derived from a single raw event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteAction {
    NoteOn {
        key: NoteKey,
        instrument_name: &'static str,
        channel: u8,
        note_name: String,
    },
    NoteOff {
        key: NoteKey,
        instrument_name: &'static str,
        channel: u8,
        note_name: String,
    },
    /// Silent no-op downstream, not an error.
    Ignored,
}

/// Classify a raw sequencer event into a playback action.
///
/// Pure classification only: no instrument lookup, no I/O. Note events
/// carry the resolved identity and the instrument name implied by their
/// channel; everything else maps to `Ignored`.
pub fn translate(event: &SequencerEvent) -> NoteAction {
    match event.kind {
        EventKind::NoteOn => NoteAction::NoteOn {
            key: NoteKey::new(event.note_name.clone(), event.track, event.channel),
            instrument_name: instrument_name(event.channel),
            channel: event.channel,
            note_name: event.note_name.clone(),
        },
        EventKind::NoteOff => NoteAction::NoteOff {
            key: NoteKey::new(event.note_name.clone(), event.track, event.channel),
            instrument_name: instrument_name(event.channel),
            channel: event.channel,
            note_name: event.note_name.clone(),
        },
        EventKind::Other => NoteAction::Ignored,
    }
}
