use log::{debug, info};

use crate::domain::{CameraState, MapSettings, MapTheme, Song, SongId};
use crate::ports::{AssetResolver, MapSurface};
use crate::services::markers::{MarkerLifecycleManager, ReconcileOutcome};

/// Estado de la vista de mapa: dueña del mapa, de la cámara y del tema activo.
///
/// Recargar el estilo resetea la cámara del mapa; `MapView` la captura antes
/// de cada cambio de tema y la restaura (sin animación) cuando el host avisa
/// de que el estilo nuevo terminó de cargar.
pub struct MapView<M: MapSurface> {
  map: M,
  theme: MapTheme,
  camera: CameraState,
  settings: MapSettings,
  markers: MarkerLifecycleManager,
  /// Último conjunto mostrado; se reconstruye tras cada cambio de estilo.
  shown: Vec<Song>,
  /// Cámara a restaurar cuando termine la transición de estilo en curso.
  restore: Option<CameraState>,
  zoom_bucket: usize,
}

impl<M: MapSurface> MapView<M> {
  pub fn new(map: M, settings: MapSettings, max_scale_boost: f32) -> Self {
    let markers = MarkerLifecycleManager::new(settings.fit_padding, max_scale_boost);
    let camera = settings.initial_camera;
    let zoom_bucket = density_bucket(&settings.density_thresholds, camera.zoom);

    Self {
      map,
      theme: settings.default_theme,
      camera,
      settings,
      markers,
      shown: Vec::new(),
      restore: None,
      zoom_bucket,
    }
  }

  /// Muestra `songs` en el mapa (o los deja en cola si el estilo no está listo).
  pub fn show<A: AssetResolver>(&mut self, songs: &[Song], assets: &A) -> ReconcileOutcome {
    self.shown = songs.to_vec();

    if self.restore.is_some() {
      self.markers.queue(self.shown.clone());
      return ReconcileOutcome::Deferred;
    }

    self.markers.reconcile(&mut self.map, songs, self.theme, assets)
  }

  /// Cambia el estilo del mapa conservando la cámara.
  ///
  /// Devuelve `false` si el tema ya estaba activo.
  pub fn set_theme(&mut self, theme: MapTheme) -> bool {
    if theme == self.theme {
      return false;
    }

    // Si ya había una transición en curso, la cámara buena es la capturada entonces.
    let camera = self.restore.unwrap_or_else(|| self.map.camera());
    self.camera = camera;

    self.markers.teardown(&mut self.map);
    self.theme = theme;
    self.map.set_style(&theme.style_url());
    self.restore = Some(camera);
    self.markers.queue(self.shown.clone());

    info!("Map theme changed to {} ({})", theme.display_name(), theme.style_id());
    true
  }

  /// Evento "style loaded" del mapa (carga inicial o tras `set_theme`).
  pub fn on_style_loaded<A: AssetResolver>(&mut self, assets: &A) -> Option<ReconcileOutcome> {
    if !self.map.is_style_loaded() {
      debug!("Style load event received but the map still reports a pending style");
      return None;
    }

    if let Some(camera) = self.restore.take() {
      let camera = CameraState::new(camera.center, camera.zoom.clamp(self.settings.min_zoom, self.settings.max_zoom));
      self.map.jump_to(camera);
      self.camera = camera;
    }

    self.markers.on_style_ready(&mut self.map, self.theme, assets)
  }

  /// El usuario movió la cámara (pan/zoom). Solo se registra.
  pub fn on_camera_moved(&mut self, camera: CameraState) {
    if self.restore.is_none() {
      self.camera = camera;
    }
  }

  /// Fin de un zoom: re-renderiza los marcadores si se cruzó un umbral de densidad.
  ///
  /// No hay clustering; esto es el punto de enganche para él.
  pub fn on_zoom_settled<A: AssetResolver>(&mut self, zoom: f64, assets: &A) -> Option<ReconcileOutcome> {
    self.camera.zoom = zoom;

    let bucket = density_bucket(&self.settings.density_thresholds, zoom);
    if bucket == self.zoom_bucket {
      return None;
    }
    self.zoom_bucket = bucket;

    debug!("Zoom {zoom:.2} crossed a density threshold, re-rendering markers");
    let songs = self.shown.clone();
    Some(self.show(&songs, assets))
  }

  pub fn apply_amplitude(&mut self, song: &SongId, amplitude: f32) {
    self.markers.apply_amplitude(&mut self.map, song, amplitude);
  }

  pub fn reset_marker_scale(&mut self) {
    self.markers.reset_scale(&mut self.map);
  }

  /// Quita todos los marcadores (la vista se va a destruir).
  pub fn teardown(&mut self) {
    self.markers.teardown(&mut self.map);
  }

  pub fn theme(&self) -> MapTheme {
    self.theme
  }

  /// Última cámara conocida.
  pub fn camera(&self) -> CameraState {
    self.camera
  }

  pub fn is_transitioning(&self) -> bool {
    self.restore.is_some()
  }

  pub fn markers(&self) -> &MarkerLifecycleManager {
    &self.markers
  }

  pub fn map(&self) -> &M {
    &self.map
  }
}

fn density_bucket(thresholds: &[f64], zoom: f64) -> usize {
  thresholds.iter().filter(|t| zoom >= **t).count()
}
