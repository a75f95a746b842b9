//! Ciclo de vida de los marcadores del mapa.
//!
//! Mantiene una correspondencia uno a uno entre el conjunto filtrado y los
//! marcadores vivos. Cada reconciliación quita todos los marcadores antes de
//! crear los nuevos, así nunca hay dos marcadores para la misma versión.

use log::{debug, warn};

use crate::domain::{GeoBounds, MapTheme, Song, SongId};
use crate::ports::{AssetResolver, MapSurface, MarkerHandle, MarkerSpec, PopupAction, PopupContent, PopupHandle};

/// Un marcador vivo en el mapa.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerState {
  pub song_id: SongId,
  pub marker: MarkerHandle,
  pub popup: PopupHandle,
  pub scale: f32,
}

/// Resultado de `reconcile`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcileOutcome {
  /// El estilo no estaba listo: el conjunto quedó en cola.
  Deferred,
  Applied {
    created: usize,
    skipped: usize,
    /// Esta pasada hizo el único auto-encuadre de la sesión.
    fitted: bool,
  },
}

pub struct MarkerLifecycleManager {
  markers: Vec<MarkerState>,
  /// Conjunto esperando a que el estilo termine de cargar. El más reciente gana.
  pending: Option<Vec<Song>>,
  auto_fit_done: bool,
  fit_padding: u32,
  max_scale_boost: f32,
}

impl MarkerLifecycleManager {
  pub fn new(fit_padding: u32, max_scale_boost: f32) -> Self {
    Self { markers: Vec::new(), pending: None, auto_fit_done: false, fit_padding, max_scale_boost }
  }

  /// Reconcilia los marcadores con `songs`, o lo deja en cola si el estilo no está cargado.
  pub fn reconcile<M, A>(&mut self, map: &mut M, songs: &[Song], theme: MapTheme, assets: &A) -> ReconcileOutcome
  where
    M: MapSurface,
    A: AssetResolver,
  {
    if !map.is_style_loaded() {
      debug!("Map style not ready, queueing {} songs for reconciliation", songs.len());
      self.pending = Some(songs.to_vec());
      return ReconcileOutcome::Deferred;
    }

    self.pending = None;
    self.apply(map, songs, theme, assets)
  }

  /// Señal de estilo listo: aplica el conjunto en cola, si lo hay.
  pub fn on_style_ready<M, A>(&mut self, map: &mut M, theme: MapTheme, assets: &A) -> Option<ReconcileOutcome>
  where
    M: MapSurface,
    A: AssetResolver,
  {
    let songs = self.pending.take()?;
    Some(self.reconcile(map, &songs, theme, assets))
  }

  /// Deja en cola un conjunto sin intentar aplicarlo (cambio de estilo en curso).
  pub fn queue(&mut self, songs: Vec<Song>) {
    self.pending = Some(songs);
  }

  pub fn has_pending(&self) -> bool {
    self.pending.is_some()
  }

  /// Quita todos los marcadores (y sus popups) del mapa.
  pub fn teardown<M: MapSurface>(&mut self, map: &mut M) {
    for state in self.markers.drain(..) {
      map.remove_popup(state.popup);
      map.remove_marker(state.marker);
    }
  }

  fn apply<M, A>(&mut self, map: &mut M, songs: &[Song], theme: MapTheme, assets: &A) -> ReconcileOutcome
  where
    M: MapSurface,
    A: AssetResolver,
  {
    // 1) Siempre quitar antes de añadir.
    self.teardown(map);

    let mut skipped = 0;
    let mut positions = Vec::with_capacity(songs.len());

    // 2) Un marcador por canción con coordenadas canónicas.
    for song in songs {
      let Some(position) = song.canonical_coordinates() else {
        warn!("Skipping song without coordinates: {}", song.id);
        skipped += 1;
        continue;
      };

      let marker = map.add_marker(MarkerSpec { position, color: theme.marker_color() });
      let popup = map.attach_popup(marker, popup_content(song, assets));
      self.markers.push(MarkerState { song_id: song.id.clone(), marker, popup, scale: 1.0 });
      positions.push(position);
    }

    // 3) Auto-encuadre: solo la primera vez que hay al menos un marcador.
    let mut fitted = false;
    if !self.auto_fit_done {
      if let Some(bounds) = GeoBounds::enclosing(positions) {
        map.fit_bounds(bounds, self.fit_padding);
        self.auto_fit_done = true;
        fitted = true;
      }
    }

    debug!("Reconciled markers: {} created, {} skipped", self.markers.len(), skipped);
    ReconcileOutcome::Applied { created: self.markers.len(), skipped, fitted }
  }

  /// Escala el marcador de `song` según la amplitud (`[0, 1]`) del visualizador.
  pub fn apply_amplitude<M: MapSurface>(&mut self, map: &mut M, song: &SongId, amplitude: f32) {
    let scale = 1.0 + amplitude.clamp(0.0, 1.0) * self.max_scale_boost;
    if let Some(state) = self.markers.iter_mut().find(|m| &m.song_id == song) {
      state.scale = scale;
      map.set_marker_scale(state.marker, scale);
    }
  }

  /// Devuelve a escala 1 cualquier marcador escalado.
  pub fn reset_scale<M: MapSurface>(&mut self, map: &mut M) {
    for state in self.markers.iter_mut().filter(|m| m.scale != 1.0) {
      state.scale = 1.0;
      map.set_marker_scale(state.marker, 1.0);
    }
  }

  pub fn marker_for(&self, song: &SongId) -> Option<&MarkerState> {
    self.markers.iter().find(|m| &m.song_id == song)
  }

  pub fn markers(&self) -> &[MarkerState] {
    &self.markers
  }

  pub fn len(&self) -> usize {
    self.markers.len()
  }

  pub fn is_empty(&self) -> bool {
    self.markers.is_empty()
  }

  pub fn auto_fit_done(&self) -> bool {
    self.auto_fit_done
  }
}

fn popup_content<A: AssetResolver>(song: &Song, assets: &A) -> PopupContent {
  let canonical = song.canonical();

  PopupContent {
    song_id: song.id.clone(),
    title: song.title.clone(),
    artist: song.original_artist.clone(),
    country: canonical.map(|v| v.country.clone()).unwrap_or_default(),
    language: canonical.map(|v| v.language.clone()).unwrap_or_default(),
    genre: song.genre.as_ref().map(|g| g.to_string()),
    image_url: assets.resolve_image_url(song.image_ref.as_deref()),
    actions: [PopupAction::Play(song.id.clone()), PopupAction::ViewDetails(song.id.clone())],
  }
}
