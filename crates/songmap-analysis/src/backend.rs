use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use log::debug;
use songmap_core::ports::{AnalysisBackend, AnalysisContext, AnalysisError, StreamId, TapId};

use crate::analyser::{AnalyserConfig, FrequencyAnalyser};
use crate::feed::SampleFeed;

type FeedRegistry = Arc<Mutex<HashMap<StreamId, SampleFeed>>>;

/// Analysis backend over host-provided sample feeds.
///
/// The host registers a [`SampleFeed`] for every stream its pipeline loads;
/// contexts created here can only tap registered streams.
#[derive(Clone, Default)]
pub struct FftAnalysisBackend {
  feeds: FeedRegistry,
  config: AnalyserConfig,
}

impl FftAnalysisBackend {
  pub fn new(config: AnalyserConfig) -> Self {
    Self { feeds: FeedRegistry::default(), config }
  }

  pub fn register_stream(&self, stream: StreamId, feed: SampleFeed) {
    lock(&self.feeds).insert(stream, feed);
  }

  pub fn unregister_stream(&self, stream: StreamId) {
    lock(&self.feeds).remove(&stream);
  }
}

fn lock(feeds: &FeedRegistry) -> std::sync::MutexGuard<'_, HashMap<StreamId, SampleFeed>> {
  feeds.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl AnalysisBackend for FftAnalysisBackend {
  type Context = FftAnalysisContext;

  fn create_context(&mut self, fft_size: usize) -> Result<FftAnalysisContext, AnalysisError> {
    let config = self.config.clone().with_fft_size(fft_size);
    // Validate once up front so a bad size fails here and not on the first tap.
    FrequencyAnalyser::new(config.clone())?;

    Ok(FftAnalysisContext {
      feeds: self.feeds.clone(),
      window: vec![0.0; config.fft_size],
      config,
      taps: HashMap::new(),
      next_tap: 0,
      closed: false,
    })
  }
}

struct Tap {
  feed: SampleFeed,
  analyser: FrequencyAnalyser,
}

pub struct FftAnalysisContext {
  feeds: FeedRegistry,
  config: AnalyserConfig,
  window: Vec<f32>,
  taps: HashMap<TapId, Tap>,
  next_tap: u64,
  closed: bool,
}

impl FftAnalysisContext {
  pub fn tap_count(&self) -> usize {
    self.taps.len()
  }

  pub fn is_closed(&self) -> bool {
    self.closed
  }
}

impl AnalysisContext for FftAnalysisContext {
  fn connect_tap(&mut self, stream: StreamId) -> Result<TapId, AnalysisError> {
    if self.closed {
      return Err(AnalysisError::Unavailable("analysis context is closed".to_string()));
    }
    let feed = lock(&self.feeds).get(&stream).cloned().ok_or(AnalysisError::UnknownStream)?;
    let analyser = FrequencyAnalyser::new(self.config.clone())?;

    self.next_tap += 1;
    let id = TapId(self.next_tap);
    self.taps.insert(id, Tap { feed, analyser });
    debug!("Connected analyser tap {id:?} to {stream:?}");
    Ok(id)
  }

  fn disconnect_tap(&mut self, tap: TapId) {
    if self.taps.remove(&tap).is_some() {
      debug!("Disconnected analyser tap {tap:?}");
    }
  }

  fn frequency_bin_count(&self) -> usize {
    self.config.fft_size / 2
  }

  fn byte_frequency_data(&mut self, tap: TapId, out: &mut [u8]) {
    let Some(tap) = self.taps.get_mut(&tap) else {
      out.fill(0);
      return;
    };
    tap.feed.latest(&mut self.window);
    tap.analyser.process(&self.window);
    tap.analyser.byte_frequency_data(out);
  }

  fn close(&mut self) {
    self.taps.clear();
    self.closed = true;
  }
}
