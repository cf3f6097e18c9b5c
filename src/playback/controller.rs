// Playback controller - session state machine and event dispatch

use crate::config::EngineConfig;
use crate::instrument::{
    InstrumentError, InstrumentRegistry, InstrumentResult, InstrumentSource, LoadingState,
};
use crate::messaging::channels::{
    EventConsumer, EventProducer, NotificationConsumer, NotificationProducer,
    create_event_channel, create_notification_channel,
};
use crate::messaging::notification::{Notification, NotificationCategory};
use crate::midi::event::{NoteAction, SequencerEvent, translate};
use crate::playback::voice_tracker::VoiceTracker;
use crate::sequencer::Sequencer;
use ringbuf::traits::{Consumer, Producer};
use std::sync::Arc;

/// Session state machine of a playback controller.
///
/// `Stopped` and `Errored` are terminal: a new session requires a new
/// controller bound to a new file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    LoadingInstruments,
    Ready,
    Playing,
    Paused,
    Stopped,
    Errored,
}

impl SessionState {
    pub fn is_playing(&self) -> bool {
        matches!(self, SessionState::Playing)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, SessionState::Stopped | SessionState::Errored)
    }
}

/// Transport-facing view of the session, for the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    Stopped,
    Playing,
    Paused,
}

/// Top-level state machine for one playback session. Routes translated
/// events to their instruments and gates dispatch on load completion;
/// the registry and voice tracker are owned here, never shared between
/// sessions.
///
/// State transitions happen only through the operations below, never
/// implicitly. Per-event dispatch problems are absorbed locally so one
/// bad event never aborts the file's playback; only instrument preload
/// failure is fatal to the session.
pub struct PlaybackController<S: Sequencer> {
    sequencer: S,
    registry: InstrumentRegistry,
    voices: VoiceTracker,
    events: EventConsumer,
    notifications: NotificationProducer,
    state: SessionState,
    dropped_notifications: u64,
}

impl<S: Sequencer> PlaybackController<S> {
    pub fn new(
        sequencer: S,
        events: EventConsumer,
        notifications: NotificationProducer,
    ) -> Self {
        Self {
            sequencer,
            registry: InstrumentRegistry::new(),
            voices: VoiceTracker::new(),
            events,
            notifications,
            state: SessionState::Idle,
            dropped_notifications: 0,
        }
    }

    /// Build a controller together with the collaborator endpoints: the
    /// event producer for the sequencer and the notification consumer
    /// for the presentation layer.
    pub fn with_config(
        sequencer: S,
        config: &EngineConfig,
    ) -> (Self, EventProducer, NotificationConsumer) {
        let (event_tx, event_rx) = create_event_channel(config.event_channel_capacity);
        let (notification_tx, notification_rx) =
            create_notification_channel(config.notification_channel_capacity);
        (
            Self::new(sequencer, event_rx, notification_tx),
            event_tx,
            notification_rx,
        )
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn loading_state(&self) -> LoadingState {
        self.registry.state()
    }

    /// Transport-facing projection of the session state.
    pub fn playback_state(&self) -> PlaybackState {
        match self.state {
            SessionState::Playing => PlaybackState::Playing,
            SessionState::Paused => PlaybackState::Paused,
            _ => PlaybackState::Stopped,
        }
    }

    pub fn active_voice_count(&self) -> usize {
        self.voices.active_voice_count()
    }

    /// Notifications lost to a full channel since the session started.
    pub fn dropped_notifications(&self) -> u64 {
        self.dropped_notifications
    }

    /// Preload every instrument referenced by the file. `Idle →
    /// LoadingInstruments → Ready`, or `Errored` on failure,
    /// non-recoverable within this session.
    pub fn load_instruments(&mut self, source: &Arc<dyn InstrumentSource>) -> InstrumentResult<()> {
        if self.state != SessionState::Idle {
            log::warn!("load_instruments ignored in state {:?}", self.state);
            return Ok(());
        }

        self.state = SessionState::LoadingInstruments;
        let channels = self.sequencer.referenced_channels();

        match self.registry.load(source, &channels) {
            Ok(()) => {
                self.state = SessionState::Ready;
                log::info!("session ready, {} instruments loaded", self.registry.len());
                Ok(())
            }
            Err(failure) => {
                self.state = SessionState::Errored;
                self.notify(Notification::error(
                    NotificationCategory::Instrument,
                    failure.to_string(),
                ));
                Err(failure)
            }
        }
    }

    /// `Ready | Paused → Playing`. Anything else is a logged no-op.
    pub fn play(&mut self) {
        match self.state {
            SessionState::Ready | SessionState::Paused => {
                self.sequencer.play();
                self.state = SessionState::Playing;
                log::info!("playback started");
            }
            _ => log::warn!("play ignored in state {:?}", self.state),
        }
    }

    /// `Playing → Paused`. The clock freezes; sounding voices keep
    /// sounding. Pausing stops progression, it does not mute.
    pub fn pause(&mut self) {
        match self.state {
            SessionState::Playing => {
                self.sequencer.pause();
                self.state = SessionState::Paused;
                log::info!("playback paused");
            }
            _ => log::warn!("pause ignored in state {:?}", self.state),
        }
    }

    /// `Ready | Playing | Paused → Stopped`. Resets the sequencer clock
    /// and releases every tracked voice; queued events delivered after
    /// this point never produce new voices.
    pub fn stop(&mut self) {
        match self.state {
            SessionState::Ready | SessionState::Playing | SessionState::Paused => {
                self.sequencer.stop();
                let stopped = self.voices.stop_everything();
                self.state = SessionState::Stopped;
                log::info!("playback stopped, released {stopped} voices");
            }
            _ => log::warn!("stop ignored in state {:?}", self.state),
        }
    }

    /// Drain the event channel, dispatching each event strictly in
    /// delivery order. Returns the number of events examined.
    pub fn pump_events(&mut self) -> usize {
        let mut examined = 0;
        while let Some(event) = self.events.try_pop() {
            examined += 1;
            self.dispatch(event);
        }
        examined
    }

    fn dispatch(&mut self, event: SequencerEvent) {
        if self.state != SessionState::Playing {
            self.drop_event(&event);
            return;
        }

        match translate(&event) {
            NoteAction::NoteOn {
                key,
                instrument_name,
                channel,
                note_name,
            } => match self.registry.get(channel).map(Arc::clone) {
                Ok(instrument) => {
                    let voice = instrument.play(&note_name);
                    log::debug!("note on {key} -> voice {voice}");
                    self.voices.start(key, instrument, voice);
                }
                Err(InstrumentError::Missing { channel }) => {
                    log::warn!("{instrument_name} not loaded, dropping note on channel {channel}");
                    self.notify(Notification::warning(
                        NotificationCategory::Instrument,
                        format!("{instrument_name} not loaded (channel {channel})"),
                    ));
                }
                Err(failure) => {
                    // RegistryNotReady cannot happen while Playing
                    log::error!("dispatch contract violation: {failure}");
                }
            },
            NoteAction::NoteOff { key, .. } => {
                let stopped = self.voices.stop_all(&key);
                log::debug!("note off {key}, released {stopped} voices");
            }
            NoteAction::Ignored => {}
        }
    }

    fn drop_event(&mut self, event: &SequencerEvent) {
        match self.state {
            SessionState::Idle | SessionState::LoadingInstruments => {
                // Dropped, never queued: load completion gates dispatch
                log::warn!(
                    "event on channel {} dropped: instruments not loaded",
                    event.channel
                );
                self.notify(Notification::warning(
                    NotificationCategory::Playback,
                    format!(
                        "event on channel {} dropped: instruments not loaded",
                        event.channel
                    ),
                ));
            }
            _ => log::debug!("event dropped in state {:?}", self.state),
        }
    }

    fn notify(&mut self, notification: Notification) {
        // Never block on the presentation layer; a full ring drops
        if self.notifications.try_push(notification).is_err() {
            self.dropped_notifications += 1;
        }
    }
}
