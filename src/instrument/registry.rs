// Instrument registry - channel mapping with all-or-nothing preload

use crate::instrument::source::{InstrumentHandle, InstrumentSource};
use crate::instrument::{InstrumentError, InstrumentResult};
use std::collections::HashMap;
use std::sync::Arc;
use std::thread;

/// Loading lifecycle of the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadingState {
    Loading,
    Loaded,
    Errored,
}

/// Maps a channel to its loaded instrument.
///
/// The mapping is immutable once `Loaded` and may be read by any number
/// of dispatch calls without synchronization. Lookup before `Loaded` is
/// a contract violation and fails fast.
pub struct InstrumentRegistry {
    state: LoadingState,
    instruments: HashMap<u8, InstrumentHandle>,
}

impl InstrumentRegistry {
    pub fn new() -> Self {
        Self {
            state: LoadingState::Loading,
            instruments: HashMap::new(),
        }
    }

    pub fn state(&self) -> LoadingState {
        self.state
    }

    pub fn len(&self) -> usize {
        self.instruments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instruments.is_empty()
    }

    /// Acquire every referenced instrument, all-or-nothing.
    ///
    /// One worker thread per distinct channel; every worker is joined
    /// before the outcome is decided (a join, not a race). On any failure
    /// the registry transitions to `Errored` with no partial mapping
    /// observable, and the first failure in ascending channel order is
    /// returned. Failures are not retried here; the caller decides
    /// whether to start a new session.
    pub fn load(
        &mut self,
        source: &Arc<dyn InstrumentSource>,
        channels: &[u8],
    ) -> InstrumentResult<()> {
        self.state = LoadingState::Loading;
        self.instruments.clear();

        let mut distinct: Vec<u8> = channels.to_vec();
        distinct.sort_unstable();
        distinct.dedup();

        log::info!("preloading instruments for {} channels", distinct.len());

        let mut workers = Vec::with_capacity(distinct.len());
        for channel in distinct {
            let source = Arc::clone(source);
            workers.push((channel, thread::spawn(move || source.acquire(channel))));
        }

        let mut loaded: HashMap<u8, InstrumentHandle> = HashMap::new();
        let mut first_failure: Option<InstrumentError> = None;

        for (channel, worker) in workers {
            match worker.join() {
                Ok(Ok(instrument)) => {
                    log::debug!("channel {}: loaded {}", channel, instrument.name());
                    loaded.insert(channel, instrument);
                }
                Ok(Err(cause)) => {
                    log::error!("channel {channel}: instrument load failed: {cause}");
                    if first_failure.is_none() {
                        first_failure = Some(InstrumentError::LoadFailed { channel, cause });
                    }
                }
                Err(_) => {
                    log::error!("channel {channel}: instrument loader panicked");
                    if first_failure.is_none() {
                        first_failure = Some(InstrumentError::LoadFailed {
                            channel,
                            cause: "loader panicked".to_string(),
                        });
                    }
                }
            }
        }

        if let Some(failure) = first_failure {
            self.state = LoadingState::Errored;
            return Err(failure);
        }

        log::info!("instrument registry loaded ({} instruments)", loaded.len());
        self.instruments = loaded;
        self.state = LoadingState::Loaded;
        Ok(())
    }

    /// Look up the instrument for a channel on a `Loaded` registry.
    ///
    /// `RegistryNotReady` unless loading completed successfully; a stale
    /// or partial handle is never returned. `Missing` when loaded but the
    /// channel has no instrument.
    pub fn get(&self, channel: u8) -> InstrumentResult<&InstrumentHandle> {
        if self.state != LoadingState::Loaded {
            return Err(InstrumentError::RegistryNotReady);
        }
        self.instruments
            .get(&channel)
            .ok_or(InstrumentError::Missing { channel })
    }
}

impl Default for InstrumentRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instrument::source::{Instrument, VoiceId};
    use std::sync::Mutex;

    struct FakeInstrument {
        name: String,
    }

    impl Instrument for FakeInstrument {
        fn name(&self) -> &str {
            &self.name
        }

        fn play(&self, _note_name: &str) -> VoiceId {
            VoiceId::new()
        }

        fn stop(&self, _voice: VoiceId) {}
    }

    /// Source that fails for a configurable set of channels and records
    /// which channels were requested.
    struct FakeSource {
        failing_channels: Vec<u8>,
        requested: Mutex<Vec<u8>>,
    }

    impl FakeSource {
        fn new(failing_channels: Vec<u8>) -> Self {
            Self {
                failing_channels,
                requested: Mutex::new(Vec::new()),
            }
        }
    }

    impl InstrumentSource for FakeSource {
        fn acquire(&self, channel: u8) -> Result<InstrumentHandle, String> {
            self.requested.lock().unwrap().push(channel);
            if self.failing_channels.contains(&channel) {
                return Err(format!("fetch failed for channel {channel}"));
            }
            Ok(Arc::new(FakeInstrument {
                name: format!("instrument_{channel}"),
            }))
        }
    }

    #[test]
    fn test_successful_load() {
        let fake = Arc::new(FakeSource::new(vec![]));
        let source: Arc<dyn InstrumentSource> = fake.clone();
        let mut registry = InstrumentRegistry::new();

        registry.load(&source, &[0, 1, 2]).unwrap();

        assert_eq!(registry.state(), LoadingState::Loaded);
        assert_eq!(registry.len(), 3);
        assert_eq!(registry.get(1).unwrap().name(), "instrument_1");
    }

    #[test]
    fn test_duplicate_channels_acquired_once() {
        let fake = Arc::new(FakeSource::new(vec![]));
        let source: Arc<dyn InstrumentSource> = fake.clone();
        let mut registry = InstrumentRegistry::new();

        registry.load(&source, &[0, 0, 1, 1, 1]).unwrap();

        assert_eq!(registry.len(), 2);
        let mut requested = fake.requested.lock().unwrap().clone();
        requested.sort_unstable();
        assert_eq!(requested, vec![0, 1]);
    }

    #[test]
    fn test_load_is_all_or_nothing() {
        let fake = Arc::new(FakeSource::new(vec![1]));
        let source: Arc<dyn InstrumentSource> = fake.clone();
        let mut registry = InstrumentRegistry::new();

        let err = registry.load(&source, &[0, 1]).unwrap_err();

        match err {
            InstrumentError::LoadFailed { channel, .. } => assert_eq!(channel, 1),
            other => panic!("Expected LoadFailed, got {other:?}"),
        }
        assert_eq!(registry.state(), LoadingState::Errored);

        // Channel 0 loaded fine, but no partial state may be observable
        assert!(matches!(
            registry.get(0),
            Err(InstrumentError::RegistryNotReady)
        ));
    }

    #[test]
    fn test_first_failure_is_deterministic() {
        let fake = Arc::new(FakeSource::new(vec![3, 7]));
        let source: Arc<dyn InstrumentSource> = fake.clone();
        let mut registry = InstrumentRegistry::new();

        let err = registry.load(&source, &[7, 3, 0]).unwrap_err();

        match err {
            InstrumentError::LoadFailed { channel, .. } => assert_eq!(channel, 3),
            other => panic!("Expected LoadFailed, got {other:?}"),
        }
    }

    #[test]
    fn test_get_before_load_fails_fast() {
        let registry = InstrumentRegistry::new();
        assert!(matches!(
            registry.get(0),
            Err(InstrumentError::RegistryNotReady)
        ));
    }

    #[test]
    fn test_get_missing_channel() {
        let fake = Arc::new(FakeSource::new(vec![]));
        let source: Arc<dyn InstrumentSource> = fake.clone();
        let mut registry = InstrumentRegistry::new();

        registry.load(&source, &[0]).unwrap();

        assert!(matches!(
            registry.get(5),
            Err(InstrumentError::Missing { channel: 5 })
        ));
    }

    #[test]
    fn test_empty_channel_list_loads_empty() {
        let fake = Arc::new(FakeSource::new(vec![]));
        let source: Arc<dyn InstrumentSource> = fake.clone();
        let mut registry = InstrumentRegistry::new();

        registry.load(&source, &[]).unwrap();

        assert_eq!(registry.state(), LoadingState::Loaded);
        assert!(registry.is_empty());
    }
}
