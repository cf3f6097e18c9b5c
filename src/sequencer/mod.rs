// Sequencer contract - the external component that owns the MIDI file

/// Transport and preload contract of the external sequencer.
///
/// The sequencer parses the MIDI file and owns its clock. It delivers
/// `SequencerEvent`s in playback order by pushing them into the engine's
/// event channel. The engine never implements these primitives, it only
/// invokes them; buffering of events while the transport is not running
/// is the sequencer clock's business.
pub trait Sequencer {
    /// Distinct channels referenced by the decoded file, used to preload
    /// every instrument before playback may begin.
    fn referenced_channels(&self) -> Vec<u8>;

    /// Start or resume the clock.
    fn play(&mut self);

    /// Freeze the clock, keeping the position.
    fn pause(&mut self);

    /// Stop the clock and reset the position.
    fn stop(&mut self);
}
