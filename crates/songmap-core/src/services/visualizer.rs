use log::{debug, warn};

use crate::domain::{SongId, VisualizerSettings};
use crate::ports::{AnalysisBackend, AnalysisContext, FrameId, FrameScheduler, StreamId, TapId};

/// Tap activo sobre el stream que suena.
#[derive(Debug)]
struct ActiveTap {
  song: SongId,
  stream: StreamId,
  tap: TapId,
  frame: FrameId,
}

/// Visualización de audio: convierte la energía del stream en una amplitud
/// `[0, 1]` por frame de animación.
///
/// Solo está activa mientras la reproducción está en `Playing`. El contexto
/// de análisis se crea una única vez, la primera vez que hace falta.
pub struct Visualizer<B: AnalysisBackend, F: FrameScheduler> {
  backend: B,
  frames: F,
  context: Option<B::Context>,
  settings: VisualizerSettings,
  active: Option<ActiveTap>,
  bins: Vec<u8>,
}

impl<B: AnalysisBackend, F: FrameScheduler> Visualizer<B, F> {
  pub fn new(backend: B, frames: F, settings: VisualizerSettings) -> Self {
    Self { backend, frames, context: None, settings, active: None, bins: Vec::new() }
  }

  /// Conecta el tap al stream de `song` y pide el primer frame.
  ///
  /// Si ya había un tap activo se desconecta antes. Devuelve `false` si la
  /// visualización está deshabilitada o el backend no está disponible; la
  /// reproducción sigue igual en ese caso.
  pub fn activate(&mut self, song: &SongId, stream: StreamId) -> bool {
    if !self.settings.enabled {
      return false;
    }
    if self.active.as_ref().is_some_and(|a| a.stream == stream && &a.song == song) {
      return true;
    }
    self.deactivate();

    if self.context.is_none() {
      match self.backend.create_context(self.settings.fft_size) {
        Ok(context) => self.context = Some(context),
        Err(e) => {
          warn!("Audio visualization unavailable: {e}");
          return false;
        }
      }
    }
    let Some(context) = self.context.as_mut() else {
      return false;
    };

    let tap = match context.connect_tap(stream) {
      Ok(tap) => tap,
      Err(e) => {
        warn!("Could not tap stream {stream:?} for {song}: {e}");
        return false;
      }
    };
    self.bins.resize(context.frequency_bin_count(), 0);

    let frame = self.frames.request_frame();
    debug!("Visualizer tapped {stream:?} for {song}");
    self.active = Some(ActiveTap { song: song.clone(), stream, tap, frame });
    true
  }

  /// Callback de frame. Devuelve la canción y su amplitud, y pide el siguiente frame.
  ///
  /// Un frame que no es el pendiente (cancelado o de un tap anterior) se ignora.
  pub fn on_frame(&mut self, frame: FrameId) -> Option<(SongId, f32)> {
    let active = self.active.as_mut().filter(|a| a.frame == frame)?;
    let context = self.context.as_mut()?;

    context.byte_frequency_data(active.tap, &mut self.bins);
    let amplitude = mean_amplitude(&self.bins);

    active.frame = self.frames.request_frame();
    Some((active.song.clone(), amplitude))
  }

  /// Cancela el frame pendiente y desconecta el tap.
  ///
  /// Devuelve la canción que estaba animándose, para resetear su marcador.
  pub fn deactivate(&mut self) -> Option<SongId> {
    let active = self.active.take()?;
    self.frames.cancel_frame(active.frame);
    if let Some(context) = self.context.as_mut() {
      context.disconnect_tap(active.tap);
    }
    debug!("Visualizer released {:?}", active.stream);
    Some(active.song)
  }

  /// Desactiva y cierra el contexto compartido.
  pub fn shutdown(&mut self) -> Option<SongId> {
    let song = self.deactivate();
    if let Some(mut context) = self.context.take() {
      context.close();
    }
    song
  }

  /// `(canción, stream)` que se está visualizando.
  pub fn active(&self) -> Option<(&SongId, StreamId)> {
    self.active.as_ref().map(|a| (&a.song, a.stream))
  }

  pub fn is_enabled(&self) -> bool {
    self.settings.enabled
  }
}

/// Media de las bandas normalizada a `[0, 1]`.
fn mean_amplitude(bins: &[u8]) -> f32 {
  if bins.is_empty() {
    return 0.0;
  }
  let sum: u32 = bins.iter().map(|b| u32::from(*b)).sum();
  sum as f32 / bins.len() as f32 / 255.0
}
