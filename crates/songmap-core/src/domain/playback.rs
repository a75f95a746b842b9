use serde::Serialize;

use crate::domain::ids::SongId;
use crate::ports::audio::StreamId;

/// Fase del coordinador de reproducción.
///
/// ```text
/// Idle -> Loading -> Playing <-> Paused -> Idle
///                       |
///                       v
///                     Ended -> Idle
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum PlaybackPhase {
  #[default]
  Idle,
  /// Fuente cargada, esperando a que el pipeline confirme el arranque.
  Loading,
  Playing,
  Paused,
  /// La pista terminó. Es transitoria: el coordinador libera la fuente y
  /// vuelve a `Idle` con la posición a cero, conservando la selección.
  Ended,
}

/// Estado observable de la reproducción.
///
/// Lo escribe únicamente el `PlaybackCoordinator`; el resto solo lo lee.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlaybackState {
  pub current_song: Option<SongId>,
  pub phase: PlaybackPhase,
  /// Posición actual en segundos.
  pub position: f64,
  /// Duración en segundos, cuando el pipeline ya la conoce.
  pub duration: Option<f64>,
  /// Volumen en `[0, 1]`. Se mantiene entre pistas.
  pub volume: f32,
  /// Stream activo del pipeline compartido.
  #[serde(skip)]
  pub stream: Option<StreamId>,
  /// Último error visible para el usuario (no fatal).
  pub last_error: Option<String>,
}

impl PlaybackState {
  pub fn new(volume: f32) -> Self {
    Self {
      current_song: None,
      phase: PlaybackPhase::Idle,
      position: 0.0,
      duration: None,
      volume: volume.clamp(0.0, 1.0),
      stream: None,
      last_error: None,
    }
  }

  pub fn is_playing(&self) -> bool {
    self.phase == PlaybackPhase::Playing
  }

  pub fn is_current(&self, id: &SongId) -> bool {
    self.current_song.as_ref() == Some(id)
  }
}

impl Default for PlaybackState {
  fn default() -> Self {
    Self::new(1.0)
  }
}

/// Formatea segundos como `m:ss` para el mini-player.
///
/// Valores negativos o no finitos se muestran como `0:00`.
pub fn format_time(seconds: f64) -> String {
  let total = if seconds.is_finite() && seconds > 0.0 { seconds.floor() as u64 } else { 0 };
  format!("{}:{:02}", total / 60, total % 60)
}
