use crate::domain::{CameraState, Coordinates, GeoBounds, SongId};

/// Handle opaco de un marcador nativo del mapa.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MarkerHandle(pub u64);

/// Handle opaco del popup asociado a un marcador.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PopupHandle(pub u64);

/// Acción disparada desde un popup. La UI la devuelve a
/// `DiscoveryEngine::handle_popup_action`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PopupAction {
  Play(SongId),
  ViewDetails(SongId),
}

/// Contenido del popup de un marcador.
///
/// Es un modelo de datos: la UI decide cómo pintarlo.
#[derive(Debug, Clone, PartialEq)]
pub struct PopupContent {
  pub song_id: SongId,
  pub title: String,
  pub artist: String,
  pub country: String,
  pub language: String,
  pub genre: Option<String>,
  /// URL absoluta de la portada (o de la imagen por defecto).
  pub image_url: String,
  pub actions: [PopupAction; 2],
}

/// Marcador a crear en el mapa.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerSpec {
  pub position: Coordinates,
  pub color: &'static str,
}

/// Port del mapa interactivo (instancia única, propiedad de `MapView`).
///
/// `set_style` resetea la cámara como efecto lateral implícito: quien lo llama
/// debe capturarla antes y restaurarla con `jump_to` cuando el host notifique
/// que el estilo terminó de cargar.
pub trait MapSurface {
  fn is_style_loaded(&self) -> bool;
  fn set_style(&mut self, style_url: &str);

  fn camera(&self) -> CameraState;
  /// Mueve la cámara sin animación.
  fn jump_to(&mut self, camera: CameraState);
  /// Encuadra la caja con animación.
  fn fit_bounds(&mut self, bounds: GeoBounds, padding: u32);

  fn add_marker(&mut self, spec: MarkerSpec) -> MarkerHandle;
  fn remove_marker(&mut self, marker: MarkerHandle);
  fn attach_popup(&mut self, marker: MarkerHandle, content: PopupContent) -> PopupHandle;
  fn remove_popup(&mut self, popup: PopupHandle);
  fn set_marker_scale(&mut self, marker: MarkerHandle, scale: f32);
}
