use crate::ports::{AnalysisBackend, AssetResolver, AudioPipeline, FrameScheduler, KeyBindings, MapSurface, Navigator};

/// Agrupa los tipos concretos de los colaboradores que inyecta la UI anfitriona.
///
/// Así el motor tiene un único parámetro genérico en lugar de uno por port.
pub trait Host {
  type Assets: AssetResolver;
  type Navigator: Navigator;
  type Map: MapSurface;
  type Pipeline: AudioPipeline;
  type Keys: KeyBindings;
  type Analysis: AnalysisBackend;
  type Frames: FrameScheduler;
}
