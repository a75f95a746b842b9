//! Frequency analysis backend for the marker visualizer.
//!
//! The host pushes decoded PCM for each stream into a [`SampleFeed`]; the
//! engine taps streams through [`FftAnalysisBackend`] and reads byte-scaled
//! frequency energy once per animation frame.

mod analyser;
mod backend;
mod feed;

pub use analyser::{AnalyserConfig, FrequencyAnalyser};
pub use backend::{FftAnalysisBackend, FftAnalysisContext};
pub use feed::SampleFeed;
