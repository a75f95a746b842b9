use crate::ports::audio::StreamId;

/// Conexión del stream activo con el analizador.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TapId(pub u64);

/// Callback de animación pendiente.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameId(pub u64);

#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
  #[error("audio analysis unavailable: {0}")]
  Unavailable(String),

  #[error("unknown stream")]
  UnknownStream,

  #[error("internal error: {0}")]
  Internal(String),
}

/// Fábrica del contexto de análisis compartido.
///
/// El visualizador la usa una sola vez, de forma perezosa.
pub trait AnalysisBackend {
  type Context: AnalysisContext;

  fn create_context(&mut self, fft_size: usize) -> Result<Self::Context, AnalysisError>;
}

/// Contexto de análisis: conecta el stream a un analizador sin alterar la
/// salida audible (el tap es pass-through).
pub trait AnalysisContext {
  fn connect_tap(&mut self, stream: StreamId) -> Result<TapId, AnalysisError>;
  fn disconnect_tap(&mut self, tap: TapId);
  fn frequency_bin_count(&self) -> usize;
  /// Energía por banda en `0..=255`. `out` tiene `frequency_bin_count()` elementos.
  fn byte_frequency_data(&mut self, tap: TapId, out: &mut [u8]);
  fn close(&mut self);
}

/// Planificador de frames de animación del host (equivalente a `requestAnimationFrame`).
pub trait FrameScheduler {
  fn request_frame(&mut self) -> FrameId;
  fn cancel_frame(&mut self, frame: FrameId);
}
