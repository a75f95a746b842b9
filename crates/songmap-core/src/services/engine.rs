//! Raíz de composición del núcleo.
//!
//! `DiscoveryEngine` es lo único con lo que habla la UI anfitriona: guarda la
//! colección y los criterios, y conecta filtro → marcadores → reproducción →
//! visualización. Todas las notificaciones asíncronas del host (estilo
//! cargado, eventos de audio, frames) entran como llamadas a sus métodos.

use log::{error, info};

use crate::domain::{
  CameraState, Facets, FilterCriteria, MapSettings, MapTheme, PlaybackState, PlayerSettings, Song, SongId,
  VisualizerSettings,
};
use crate::errors::CoreError;
use crate::ports::{CatalogService, FrameId, Host, Key, Navigator, PipelineEvent, PopupAction};
use crate::services::filter;
use crate::services::map_view::MapView;
use crate::services::markers::ReconcileOutcome;
use crate::services::playback::PlaybackCoordinator;
use crate::services::visualizer::Visualizer;

/// Colaboradores concretos que inyecta el host al construir el motor.
pub struct HostParts<H: Host> {
  pub assets: H::Assets,
  pub navigator: H::Navigator,
  pub map: H::Map,
  pub pipeline: H::Pipeline,
  pub keys: H::Keys,
  pub analysis: H::Analysis,
  pub frames: H::Frames,
}

pub struct DiscoveryEngine<H: Host> {
  assets: H::Assets,
  navigator: H::Navigator,
  view: MapView<H::Map>,
  playback: PlaybackCoordinator<H::Pipeline, H::Keys>,
  visualizer: Visualizer<H::Analysis, H::Frames>,

  songs: Vec<Song>,
  criteria: FilterCriteria,
  filtered: Vec<Song>,
  loading: bool,
  last_error: Option<String>,
}

impl<H: Host> DiscoveryEngine<H> {
  pub fn new(parts: HostParts<H>, map: MapSettings, player: PlayerSettings, visualizer: VisualizerSettings) -> Self {
    let view = MapView::new(parts.map, map, visualizer.max_scale_boost);

    Self {
      assets: parts.assets,
      navigator: parts.navigator,
      view,
      playback: PlaybackCoordinator::new(parts.pipeline, parts.keys, &player),
      visualizer: Visualizer::new(parts.analysis, parts.frames, visualizer),
      songs: Vec::new(),
      criteria: FilterCriteria::default(),
      filtered: Vec::new(),
      loading: false,
      last_error: None,
    }
  }

  // -------- CATÁLOGO / FILTROS --------

  /// Carga la colección completa desde el catálogo.
  ///
  /// Si falla, la colección anterior se mantiene y el error queda en `last_error`.
  pub async fn load_catalog<C>(&mut self, catalog: &C) -> Result<usize, CoreError>
  where
    C: CatalogService + ?Sized,
  {
    self.loading = true;
    let result = catalog.list_songs().await;
    self.loading = false;

    match result {
      Ok(songs) => {
        let count = songs.len();
        info!("Loaded {count} songs from the catalog");
        self.last_error = None;
        self.set_songs(songs);
        Ok(count)
      }
      Err(e) => {
        error!("Error fetching songs: {e}");
        self.last_error = Some("Failed to load songs. Please try again later.".to_string());
        Err(CoreError::Catalog(e.to_string()))
      }
    }
  }

  /// Reemplaza la colección (refresco del catálogo) y re-filtra.
  pub fn set_songs(&mut self, songs: Vec<Song>) {
    self.songs = songs;
    self.playback.set_library(&self.songs);
    self.refilter();
    self.sync_visualizer();
  }

  pub fn set_criteria(&mut self, criteria: FilterCriteria) -> &[Song] {
    self.criteria = criteria;
    self.refilter();
    &self.filtered
  }

  fn refilter(&mut self) -> ReconcileOutcome {
    self.filtered = filter::filter(&self.songs, &self.criteria);
    self.playback.set_display_order(self.filtered.iter().map(|s| s.id.clone()).collect());
    self.view.show(&self.filtered, &self.assets)
  }

  pub fn songs(&self) -> &[Song] {
    &self.songs
  }

  /// Resultado del filtro actual (lo que muestran la lista y el mapa).
  pub fn filtered(&self) -> &[Song] {
    &self.filtered
  }

  pub fn criteria(&self) -> &FilterCriteria {
    &self.criteria
  }

  pub fn facets(&self) -> Facets {
    filter::facets(&self.songs)
  }

  pub fn is_loading(&self) -> bool {
    self.loading
  }

  pub fn last_error(&self) -> Option<&str> {
    self.last_error.as_deref()
  }

  // -------- MAPA --------

  pub fn on_style_loaded(&mut self) -> Option<ReconcileOutcome> {
    let outcome = self.view.on_style_loaded(&self.assets);
    self.sync_visualizer();
    outcome
  }

  /// Cambia el estilo del mapa. Mientras carga, el marcador animado no existe
  /// y las amplitudes se descartan.
  pub fn set_theme(&mut self, theme: MapTheme) -> bool {
    self.view.set_theme(theme)
  }

  pub fn on_camera_moved(&mut self, camera: CameraState) {
    self.view.on_camera_moved(camera);
  }

  pub fn on_zoom_settled(&mut self, zoom: f64) -> Option<ReconcileOutcome> {
    self.view.on_zoom_settled(zoom, &self.assets)
  }

  pub fn map_view(&self) -> &MapView<H::Map> {
    &self.view
  }

  /// Botones del popup de un marcador.
  pub fn handle_popup_action(&mut self, action: PopupAction) -> Result<(), CoreError> {
    match action {
      PopupAction::Play(id) => self.toggle(&id),
      PopupAction::ViewDetails(id) => {
        self.navigator.go_to_song_detail(&id);
        Ok(())
      }
    }
  }

  // -------- REPRODUCCIÓN --------

  pub fn play(&mut self, id: &SongId) -> Result<(), CoreError> {
    let result = self.playback.play(id, &self.assets);
    self.sync_visualizer();
    result
  }

  pub fn toggle(&mut self, id: &SongId) -> Result<(), CoreError> {
    let result = self.playback.toggle(id, &self.assets);
    self.sync_visualizer();
    result
  }

  pub fn pause(&mut self) -> bool {
    let paused = self.playback.pause();
    self.sync_visualizer();
    paused
  }

  pub fn resume(&mut self) -> bool {
    let resumed = self.playback.resume();
    self.sync_visualizer();
    resumed
  }

  pub fn seek(&mut self, position: f64) -> Result<(), CoreError> {
    self.playback.seek(position)
  }

  pub fn set_volume(&mut self, level: f32) -> Result<(), CoreError> {
    self.playback.set_volume(level)
  }

  pub fn next(&mut self) -> Result<Option<SongId>, CoreError> {
    let result = self.playback.next(&self.assets);
    self.sync_visualizer();
    result
  }

  pub fn previous(&mut self) -> Result<Option<SongId>, CoreError> {
    let result = self.playback.previous(&self.assets);
    self.sync_visualizer();
    result
  }

  pub fn stop(&mut self) {
    self.playback.stop();
    self.sync_visualizer();
  }

  /// Cierra el mini-player.
  pub fn close_player(&mut self) {
    self.playback.close();
    self.sync_visualizer();
  }

  pub fn handle_key(&mut self, key: Key) -> Result<bool, CoreError> {
    let result = self.playback.handle_key(key, &self.assets);
    self.sync_visualizer();
    result
  }

  pub fn playback_state(&self) -> &PlaybackState {
    self.playback.state()
  }

  // -------- EVENTOS DEL HOST --------

  /// Evento del pipeline de audio, etiquetado con la generación de `bind_events`.
  pub fn on_pipeline_event(&mut self, generation: u64, event: PipelineEvent) -> bool {
    let applied = self.playback.handle_event(generation, event);
    self.sync_visualizer();
    applied
  }

  /// Callback de frame de animación.
  pub fn on_animation_frame(&mut self, frame: FrameId) {
    if let Some((song, amplitude)) = self.visualizer.on_frame(frame) {
      self.view.apply_amplitude(&song, amplitude);
    }
  }

  /// La vista se destruye: libera frame, tap, contexto, pipeline, teclado y marcadores.
  pub fn teardown(&mut self) {
    self.visualizer.shutdown();
    self.playback.teardown();
    self.view.teardown();
    info!("Discovery engine torn down");
  }

  /// Mantiene el visualizador enganchado exactamente al stream en `Playing`.
  fn sync_visualizer(&mut self) {
    let state = self.playback.state();
    let wanted = match (&state.current_song, state.stream) {
      (Some(song), Some(stream)) if state.is_playing() => Some((song.clone(), stream)),
      _ => None,
    };

    let current = self.visualizer.active().map(|(song, stream)| (song.clone(), stream));
    if current == wanted {
      return;
    }

    if self.visualizer.deactivate().is_some() {
      self.view.reset_marker_scale();
    }
    if let Some((song, stream)) = wanted {
      self.visualizer.activate(&song, stream);
    }
  }
}
