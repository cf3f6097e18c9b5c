// Instrument module - loading lifecycle and channel lookup

pub mod registry;
pub mod source;

pub use registry::{InstrumentRegistry, LoadingState};
pub use source::{Instrument, InstrumentHandle, InstrumentSource, VoiceId};

use thiserror::Error;

/// Instrument lifecycle and lookup errors
#[derive(Debug, Error)]
pub enum InstrumentError {
    /// A required instrument could not be acquired during preload.
    /// Fatal to the session: playback cannot proceed with gaps.
    #[error("instrument for channel {channel} could not be loaded: {cause}")]
    LoadFailed { channel: u8, cause: String },

    /// Lookup attempted before load completion. Contract violation,
    /// never a recoverable runtime condition.
    #[error("instrument registry is not ready")]
    RegistryNotReady,

    /// A dispatched note referenced a channel with no loaded instrument.
    /// Recovered locally: the event is dropped and playback continues.
    #[error("no instrument loaded for channel {channel}")]
    Missing { channel: u8 },
}

pub type InstrumentResult<T> = Result<T, InstrumentError>;
