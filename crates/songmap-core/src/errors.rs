// crates/songmap-core/src/errors.rs
use thiserror::Error;

use crate::domain::SongId;

/// Error genérico del núcleo de SongMap.
///
/// Ninguno es fatal: la UI que hospeda el motor los muestra como mensajes
/// recuperables (ver `PlaybackState::last_error`).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoreError {
  #[error("catalog error: {0}")]
  Catalog(String),

  /// Falta la referencia de audio/imagen o las coordenadas.
  #[error("missing asset for song {song}: {what}")]
  MissingAsset { song: SongId, what: &'static str },

  /// El pipeline de audio no pudo decodificar o reproducir la pista.
  #[error("failed to load audio: {0}")]
  LoadFailure(String),

  #[error("unknown song: {0}")]
  UnknownSong(SongId),

  #[error("invalid seek position: {0}")]
  InvalidSeek(String),

  #[error("invalid volume level: {0}")]
  InvalidVolume(f32),

  #[error("analysis error: {0}")]
  Analysis(String),
}
