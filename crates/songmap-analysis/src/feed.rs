use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};

/// Shared ring of the most recent mono PCM samples of one stream.
///
/// The audio thread pushes decoded samples; taps copy out the latest window.
/// Cloning shares the same buffer.
#[derive(Debug, Clone)]
pub struct SampleFeed {
  inner: Arc<Mutex<VecDeque<f32>>>,
  capacity: usize,
}

impl SampleFeed {
  pub fn new(capacity: usize) -> Self {
    Self { inner: Arc::new(Mutex::new(VecDeque::with_capacity(capacity))), capacity }
  }

  pub fn push(&self, samples: &[f32]) {
    let mut ring = self.lock();
    for &sample in samples {
      if ring.len() == self.capacity {
        ring.pop_front();
      }
      ring.push_back(sample);
    }
  }

  /// Copies the newest `out.len()` samples into `out`, zero-padding at the front.
  pub fn latest(&self, out: &mut [f32]) {
    let ring = self.lock();
    let available = ring.len().min(out.len());
    let pad = out.len() - available;

    out[..pad].fill(0.0);
    for (slot, sample) in out[pad..].iter_mut().zip(ring.iter().skip(ring.len() - available)) {
      *slot = *sample;
    }
  }

  pub fn clear(&self) {
    self.lock().clear();
  }

  fn lock(&self) -> MutexGuard<'_, VecDeque<f32>> {
    // A panicking producer leaves plain samples behind; keep reading them.
    self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn keeps_only_the_newest_samples() {
    let feed = SampleFeed::new(4);
    feed.push(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);

    let mut out = [0.0; 4];
    feed.latest(&mut out);
    assert_eq!(out, [3.0, 4.0, 5.0, 6.0]);
  }

  #[test]
  fn short_history_is_zero_padded() {
    let feed = SampleFeed::new(8);
    feed.clone().push(&[0.5, 0.25]);

    let mut out = [9.0; 4];
    feed.latest(&mut out);
    assert_eq!(out, [0.0, 0.0, 0.5, 0.25]);

    feed.clear();
    feed.latest(&mut out);
    assert_eq!(out, [0.0; 4]);
  }
}
