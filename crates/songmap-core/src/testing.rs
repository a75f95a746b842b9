//! Fakes de los ports y fixtures para los tests del núcleo.
//!
//! Cada fake guarda su estado en un `Rc<RefCell<..>>` compartido, así el test
//! conserva un clon y puede inspeccionar el recurso después de moverlo al motor.

use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};
use std::rc::Rc;

use async_trait::async_trait;

use crate::domain::{CameraState, Coordinates, GeoBounds, Genre, Song, SongId, SongVersion, Verification};
use crate::ports::{
  AnalysisBackend, AnalysisContext, AnalysisError, AssetResolver, AudioPipeline, CatalogError, CatalogService, FrameId,
  FrameScheduler, Host, KeyBindings, MapSurface, MarkerHandle, MarkerSpec, Navigator, PipelineError, PopupContent, PopupHandle, StreamId,
  TapId,
};

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

pub fn version(country: &str, language: &str, coords: Option<(f64, f64)>) -> SongVersion {
  SongVersion {
    country: country.to_string(),
    coordinates: coords.map(|(lat, lng)| Coordinates::new(lat, lng)),
    language: language.to_string(),
    audio_ref: Some(format!("uploads/audio/{}.mp3", country.to_lowercase().replace(' ', "-"))),
    lyrics: String::new(),
    uploaded_by: None,
    verification: Verification::default(),
  }
}

pub fn song(id: &str, title: &str, versions: Vec<SongVersion>) -> Song {
  Song {
    id: SongId::from(id),
    title: title.to_string(),
    original_artist: format!("Artist {id}"),
    original_language: "English".to_string(),
    original_lyrics: String::new(),
    genre: Some(Genre::Hymn),
    image_ref: None,
    versions,
  }
}

/// Tres canciones con coordenadas (Francia, Alemania, España).
pub fn three_songs() -> Vec<Song> {
  vec![
    song("1", "Amazing Grace", vec![version("France", "French", Some((48.85, 2.35)))]),
    song("2", "How Great Thou Art", vec![version("Germany", "German", Some((52.52, 13.40)))]),
    song("3", "Be Thou My Vision", vec![version("Spain", "Spanish", Some((40.41, -3.70)))]),
  ]
}

// ---------------------------------------------------------------------------
// Catálogo
// ---------------------------------------------------------------------------

/// Catálogo en memoria. Con `fail` responde como un backend caído.
#[derive(Clone, Default)]
pub struct FakeCatalog {
  pub songs: Vec<Song>,
  pub fail: bool,
}

#[async_trait]
impl CatalogService for FakeCatalog {
  async fn list_songs(&self) -> Result<Vec<Song>, CatalogError> {
    if self.fail {
      return Err(CatalogError::Http("connection refused".to_string()));
    }
    Ok(self.songs.clone())
  }

  async fn get_song(&self, id: &SongId) -> Result<Option<Song>, CatalogError> {
    Ok(self.songs.iter().find(|s| &s.id == id).cloned())
  }
}

// ---------------------------------------------------------------------------
// Assets / navegación
// ---------------------------------------------------------------------------

#[derive(Clone, Default)]
pub struct FakeAssets;

impl AssetResolver for FakeAssets {
  fn resolve_audio_url(&self, reference: Option<&str>) -> Option<String> {
    reference.filter(|r| !r.is_empty()).map(|r| format!("http://cdn.test/{r}"))
  }

  fn resolve_image_url(&self, reference: Option<&str>) -> String {
    match reference {
      Some(r) => format!("http://cdn.test/{r}"),
      None => "http://cdn.test/uploads/song-placeholder.jpg".to_string(),
    }
  }
}

#[derive(Clone, Default)]
pub struct FakeNavigator {
  pub visited: Rc<RefCell<Vec<SongId>>>,
}

impl Navigator for FakeNavigator {
  fn go_to_song_detail(&mut self, id: &SongId) {
    self.visited.borrow_mut().push(id.clone());
  }
}

// ---------------------------------------------------------------------------
// Mapa
// ---------------------------------------------------------------------------

pub struct MapLog {
  pub style_loaded: bool,
  pub style_url: String,
  pub camera: CameraState,
  pub markers: BTreeMap<u64, (MarkerSpec, f32)>,
  pub popups: BTreeMap<u64, (MarkerHandle, PopupContent)>,
  pub fit_calls: Vec<(GeoBounds, u32)>,
  pub jumps: Vec<CameraState>,
  pub markers_added: usize,
  next_id: u64,
}

impl MapLog {
  pub fn live_markers(&self) -> usize {
    self.markers.len()
  }

  pub fn popup_titles(&self) -> Vec<String> {
    self.popups.values().map(|(_, c)| c.title.clone()).collect()
  }
}

/// Cámara a la que salta el mapa al recargar el estilo.
pub const STYLE_RESET_CAMERA: CameraState = CameraState { center: Coordinates { lat: 0.0, lng: 0.0 }, zoom: 0.0 };

#[derive(Clone)]
pub struct FakeMap {
  pub log: Rc<RefCell<MapLog>>,
}

impl FakeMap {
  pub fn new(style_loaded: bool) -> Self {
    Self {
      log: Rc::new(RefCell::new(MapLog {
        style_loaded,
        style_url: String::new(),
        camera: CameraState::new(Coordinates::new(37.0902, -95.7129), 3.0),
        markers: BTreeMap::new(),
        popups: BTreeMap::new(),
        fit_calls: Vec::new(),
        jumps: Vec::new(),
        markers_added: 0,
        next_id: 1,
      })),
    }
  }

  /// Simula que el host terminó de cargar el estilo.
  pub fn finish_style_load(&self) {
    self.log.borrow_mut().style_loaded = true;
  }

  /// Simula un pan/zoom del usuario.
  pub fn user_moves_camera(&self, camera: CameraState) {
    self.log.borrow_mut().camera = camera;
  }
}

impl MapSurface for FakeMap {
  fn is_style_loaded(&self) -> bool {
    self.log.borrow().style_loaded
  }

  fn set_style(&mut self, style_url: &str) {
    let mut log = self.log.borrow_mut();
    log.style_url = style_url.to_string();
    log.style_loaded = false;
    log.camera = STYLE_RESET_CAMERA;
  }

  fn camera(&self) -> CameraState {
    self.log.borrow().camera
  }

  fn jump_to(&mut self, camera: CameraState) {
    let mut log = self.log.borrow_mut();
    log.camera = camera;
    log.jumps.push(camera);
  }

  fn fit_bounds(&mut self, bounds: GeoBounds, padding: u32) {
    self.log.borrow_mut().fit_calls.push((bounds, padding));
  }

  fn add_marker(&mut self, spec: MarkerSpec) -> MarkerHandle {
    let mut log = self.log.borrow_mut();
    let id = log.next_id;
    log.next_id += 1;
    log.markers.insert(id, (spec, 1.0));
    log.markers_added += 1;
    MarkerHandle(id)
  }

  fn remove_marker(&mut self, marker: MarkerHandle) {
    let removed = self.log.borrow_mut().markers.remove(&marker.0);
    assert!(removed.is_some(), "removing unknown marker {marker:?}");
  }

  fn attach_popup(&mut self, marker: MarkerHandle, content: PopupContent) -> PopupHandle {
    let mut log = self.log.borrow_mut();
    let id = log.next_id;
    log.next_id += 1;
    log.popups.insert(id, (marker, content));
    PopupHandle(id)
  }

  fn remove_popup(&mut self, popup: PopupHandle) {
    let removed = self.log.borrow_mut().popups.remove(&popup.0);
    assert!(removed.is_some(), "removing unknown popup {popup:?}");
  }

  fn set_marker_scale(&mut self, marker: MarkerHandle, scale: f32) {
    if let Some(entry) = self.log.borrow_mut().markers.get_mut(&marker.0) {
      entry.1 = scale;
    }
  }
}

// ---------------------------------------------------------------------------
// Audio
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct PipelineLog {
  pub source: Option<(StreamId, String)>,
  /// Generaciones con observadores registrados ahora mismo.
  pub bound: Vec<u64>,
  pub running: bool,
  pub volume: Option<f32>,
  pub seeks: Vec<f64>,
  pub loads: Vec<String>,
  pub fail_next_load: bool,
  next_stream: u64,
}

#[derive(Clone, Default)]
pub struct FakePipeline {
  pub log: Rc<RefCell<PipelineLog>>,
}

impl AudioPipeline for FakePipeline {
  fn load(&mut self, url: &str) -> Result<StreamId, PipelineError> {
    let mut log = self.log.borrow_mut();
    if std::mem::take(&mut log.fail_next_load) {
      return Err(PipelineError::InvalidSource(url.to_string()));
    }
    assert!(log.source.is_none(), "load while another source is attached");
    log.next_stream += 1;
    let id = StreamId(log.next_stream);
    log.source = Some((id, url.to_string()));
    log.loads.push(url.to_string());
    Ok(id)
  }

  fn bind_events(&mut self, generation: u64) {
    self.log.borrow_mut().bound.push(generation);
  }

  fn unbind_events(&mut self) {
    self.log.borrow_mut().bound.clear();
  }

  fn play(&mut self) {
    self.log.borrow_mut().running = true;
  }

  fn pause(&mut self) {
    self.log.borrow_mut().running = false;
  }

  fn stop(&mut self) {
    let mut log = self.log.borrow_mut();
    log.running = false;
    log.source = None;
  }

  fn seek(&mut self, position: f64) {
    self.log.borrow_mut().seeks.push(position);
  }

  fn set_volume(&mut self, level: f32) {
    self.log.borrow_mut().volume = Some(level);
  }
}

#[derive(Clone, Default)]
pub struct FakeKeys {
  pub bound: Rc<RefCell<bool>>,
}

impl KeyBindings for FakeKeys {
  fn bind(&mut self) {
    let mut bound = self.bound.borrow_mut();
    assert!(!*bound, "key listener bound twice");
    *bound = true;
  }

  fn unbind(&mut self) {
    *self.bound.borrow_mut() = false;
  }
}

// ---------------------------------------------------------------------------
// Análisis / frames
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct AnalysisLog {
  pub contexts_created: usize,
  pub closed: bool,
  pub taps: BTreeSet<u64>,
  pub tapped_streams: Vec<StreamId>,
  /// Valor que devuelve cada banda.
  pub level: u8,
  next_tap: u64,
}

#[derive(Clone, Default)]
pub struct FakeAnalysis {
  pub log: Rc<RefCell<AnalysisLog>>,
}

pub struct FakeContext {
  log: Rc<RefCell<AnalysisLog>>,
  bins: usize,
}

impl AnalysisBackend for FakeAnalysis {
  type Context = FakeContext;

  fn create_context(&mut self, fft_size: usize) -> Result<FakeContext, AnalysisError> {
    self.log.borrow_mut().contexts_created += 1;
    Ok(FakeContext { log: self.log.clone(), bins: fft_size / 2 })
  }
}

impl AnalysisContext for FakeContext {
  fn connect_tap(&mut self, stream: StreamId) -> Result<TapId, AnalysisError> {
    let mut log = self.log.borrow_mut();
    log.next_tap += 1;
    let id = log.next_tap;
    log.taps.insert(id);
    log.tapped_streams.push(stream);
    Ok(TapId(id))
  }

  fn disconnect_tap(&mut self, tap: TapId) {
    self.log.borrow_mut().taps.remove(&tap.0);
  }

  fn frequency_bin_count(&self) -> usize {
    self.bins
  }

  fn byte_frequency_data(&mut self, _tap: TapId, out: &mut [u8]) {
    out.fill(self.log.borrow().level);
  }

  fn close(&mut self) {
    self.log.borrow_mut().closed = true;
  }
}

#[derive(Default)]
pub struct FrameLog {
  pub pending: BTreeSet<u64>,
  next_frame: u64,
}

#[derive(Clone, Default)]
pub struct FakeFrames {
  pub log: Rc<RefCell<FrameLog>>,
}

impl FakeFrames {
  /// Frame pendiente más antiguo (el que el host dispararía ahora).
  pub fn next_pending(&self) -> Option<FrameId> {
    self.log.borrow().pending.iter().next().copied().map(FrameId)
  }

  /// Simula que el host ejecuta el callback: el frame deja de estar pendiente.
  pub fn fire(&self, frame: FrameId) {
    self.log.borrow_mut().pending.remove(&frame.0);
  }
}

impl FrameScheduler for FakeFrames {
  fn request_frame(&mut self) -> FrameId {
    let mut log = self.log.borrow_mut();
    log.next_frame += 1;
    let id = log.next_frame;
    log.pending.insert(id);
    FrameId(id)
  }

  fn cancel_frame(&mut self, frame: FrameId) {
    self.log.borrow_mut().pending.remove(&frame.0);
  }
}

// ---------------------------------------------------------------------------
// Host
// ---------------------------------------------------------------------------

pub struct FakeHost;

impl Host for FakeHost {
  type Assets = FakeAssets;
  type Navigator = FakeNavigator;
  type Map = FakeMap;
  type Pipeline = FakePipeline;
  type Keys = FakeKeys;
  type Analysis = FakeAnalysis;
  type Frames = FakeFrames;
}
