// MIDI module - sequencer event vocabulary and note identity

pub mod event;
pub mod instrument_name;
pub mod note_key;

pub use event::{EventKind, NoteAction, SequencerEvent, translate};
pub use instrument_name::{PERCUSSION_CHANNEL, instrument_name};
pub use note_key::NoteKey;
