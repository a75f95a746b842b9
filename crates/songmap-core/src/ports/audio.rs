/// Identifica la fuente cargada en el pipeline.
///
/// Cambia con cada `load`, de modo que un tap o un evento del stream anterior
/// nunca se confunde con el actual.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StreamId(pub u64);

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
  #[error("invalid source: {0}")]
  InvalidSource(String),

  #[error("pipeline unavailable: {0}")]
  Unavailable(String),
}

/// Eventos asíncronos del pipeline, entregados por el host.
///
/// Cada evento va etiquetado con la generación con la que se hizo
/// `bind_events`; el coordinador descarta las generaciones viejas.
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineEvent {
  /// Metadatos cargados: ya se conoce la duración (segundos).
  MetadataLoaded { duration: f64 },
  TimeUpdate { position: f64 },
  /// La promesa de `play()` se resolvió.
  PlayStarted,
  /// La promesa de `play()` se rechazó (decodificación, permisos de autoplay, ...).
  PlayRejected { reason: String },
  /// Error de carga/decodificación de la fuente.
  LoadError { reason: String },
  Ended,
}

/// Port del pipeline de audio compartido (un solo stream activo).
///
/// Solo el `PlaybackCoordinator` lo toca.
pub trait AudioPipeline {
  /// Fija la fuente y empieza a cargarla.
  fn load(&mut self, url: &str) -> Result<StreamId, PipelineError>;
  /// Registra los observadores de carga/duración/error/fin.
  fn bind_events(&mut self, generation: u64);
  fn unbind_events(&mut self);
  /// Arranque asíncrono: el resultado llega como `PlayStarted` / `PlayRejected`.
  fn play(&mut self);
  fn pause(&mut self);
  /// Detiene y libera la fuente actual.
  fn stop(&mut self);
  fn seek(&mut self, position: f64);
  fn set_volume(&mut self, level: f32);
}
