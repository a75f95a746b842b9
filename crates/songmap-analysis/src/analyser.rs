//! # Frequency Analyser
//!
//! Real-time spectrum of the most recent window of a stream, modelled after a
//! Web Audio `AnalyserNode`:
//! 1. Applies a Blackman window to the latest `fft_size` samples.
//! 2. Performs the FFT and normalizes magnitudes by `1 / fft_size`.
//! 3. Smooths each bin over time: `s = τ·s_prev + (1 − τ)·|X[k]|`.
//! 4. Maps `[min_decibels, max_decibels]` linearly onto bytes `0..=255`.

use num_traits::Zero;
use rustfft::{Fft, FftPlanner, num_complex::Complex};
use songmap_core::ports::AnalysisError;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct AnalyserConfig {
  /// Power of two in `32..=32768`. Bin count is half of it.
  pub fft_size: usize,
  /// `τ` in `[0, 1)`. Zero disables smoothing.
  pub smoothing_time_constant: f32,
  pub min_decibels: f32,
  pub max_decibels: f32,
}

impl Default for AnalyserConfig {
  fn default() -> Self {
    Self { fft_size: 256, smoothing_time_constant: 0.8, min_decibels: -100.0, max_decibels: -30.0 }
  }
}

impl AnalyserConfig {
  pub fn with_fft_size(mut self, fft_size: usize) -> Self {
    self.fft_size = fft_size;
    self
  }
}

pub struct FrequencyAnalyser {
  config: AnalyserConfig,
  fft: Arc<dyn Fft<f32>>,
  /// Pre-allocated scratch buffer, reused on every frame.
  scratch_buffer: Vec<Complex<f32>>,
  fft_buffer: Vec<Complex<f32>>,
  /// Pre-computed Blackman window.
  window: Vec<f32>,
  /// Smoothed linear magnitude per bin.
  smoothed: Vec<f32>,
}

impl FrequencyAnalyser {
  pub fn new(config: AnalyserConfig) -> Result<Self, AnalysisError> {
    let size = config.fft_size;
    if !size.is_power_of_two() || !(32..=32768).contains(&size) {
      return Err(AnalysisError::Internal(format!("fft size {size} must be a power of two in 32..=32768")));
    }
    if !(0.0..1.0).contains(&config.smoothing_time_constant) {
      return Err(AnalysisError::Internal(format!(
        "smoothing time constant {} must be in [0, 1)",
        config.smoothing_time_constant
      )));
    }
    if config.min_decibels >= config.max_decibels {
      return Err(AnalysisError::Internal("min_decibels must be below max_decibels".to_string()));
    }

    let mut planner = FftPlanner::new();
    let fft = planner.plan_fft_forward(size);
    let scratch_len = fft.get_inplace_scratch_len();

    // Blackman keeps leakage from loud low bins out of the quiet high ones.
    let window: Vec<f32> = apodize::blackman_iter(size).map(|x| x as f32).collect();

    Ok(Self {
      fft,
      scratch_buffer: vec![Complex::zero(); scratch_len],
      fft_buffer: vec![Complex::zero(); size],
      window,
      smoothed: vec![0.0; size / 2],
      config,
    })
  }

  pub fn fft_size(&self) -> usize {
    self.config.fft_size
  }

  pub fn frequency_bin_count(&self) -> usize {
    self.config.fft_size / 2
  }

  /// Analyses one window. `samples` must hold exactly `fft_size` values.
  pub fn process(&mut self, samples: &[f32]) {
    debug_assert_eq!(samples.len(), self.config.fft_size);

    for (i, slot) in self.fft_buffer.iter_mut().enumerate() {
      let sample = samples.get(i).copied().unwrap_or(0.0);
      *slot = Complex::new(sample * self.window[i], 0.0);
    }

    self.fft.process_with_scratch(&mut self.fft_buffer, &mut self.scratch_buffer);

    let tau = self.config.smoothing_time_constant;
    let scale = 1.0 / self.config.fft_size as f32;
    for (k, smoothed) in self.smoothed.iter_mut().enumerate() {
      let magnitude = self.fft_buffer[k].norm() * scale;
      let value = tau * *smoothed + (1.0 - tau) * magnitude;
      // A NaN/∞ input would poison the bin for every later frame.
      *smoothed = if value.is_finite() { value } else { 0.0 };
    }
  }

  /// Writes the current spectrum as bytes. Extra output slots are zeroed.
  pub fn byte_frequency_data(&self, out: &mut [u8]) {
    let min = self.config.min_decibels;
    let range = self.config.max_decibels - min;

    for (i, slot) in out.iter_mut().enumerate() {
      *slot = match self.smoothed.get(i) {
        Some(&magnitude) if magnitude > 0.0 => {
          let db = 20.0 * magnitude.log10();
          (255.0 * (db - min) / range).clamp(0.0, 255.0) as u8
        }
        _ => 0,
      };
    }
  }
}
