use serde::{Deserialize, Serialize};

/// Punto geográfico en grados decimales.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Coordinates {
  pub lat: f64,
  pub lng: f64,
}

impl Coordinates {
  pub const ORIGIN: Coordinates = Coordinates { lat: 0.0, lng: 0.0 };

  pub fn new(lat: f64, lng: f64) -> Self {
    Self { lat, lng }
  }

  /// Ambas componentes son números finitos.
  pub fn is_finite(&self) -> bool {
    self.lat.is_finite() && self.lng.is_finite()
  }
}

/// Caja envolvente (suroeste / noreste) de un conjunto de puntos.
///
/// Se construye incrementalmente con [`GeoBounds::extend`], igual que un
/// `LngLatBounds` de una librería de mapas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoBounds {
  pub south_west: Coordinates,
  pub north_east: Coordinates,
}

impl GeoBounds {
  pub fn from_point(p: Coordinates) -> Self {
    Self { south_west: p, north_east: p }
  }

  pub fn extend(&mut self, p: Coordinates) {
    self.south_west.lat = self.south_west.lat.min(p.lat);
    self.south_west.lng = self.south_west.lng.min(p.lng);
    self.north_east.lat = self.north_east.lat.max(p.lat);
    self.north_east.lng = self.north_east.lng.max(p.lng);
  }

  /// Caja mínima que contiene todos los puntos; `None` si no hay ninguno.
  pub fn enclosing<I>(points: I) -> Option<Self>
  where
    I: IntoIterator<Item = Coordinates>,
  {
    let mut iter = points.into_iter();
    let mut bounds = GeoBounds::from_point(iter.next()?);
    for p in iter {
      bounds.extend(p);
    }
    Some(bounds)
  }

  pub fn contains(&self, p: Coordinates) -> bool {
    (self.south_west.lat..=self.north_east.lat).contains(&p.lat)
      && (self.south_west.lng..=self.north_east.lng).contains(&p.lng)
  }
}

/// Posición de la cámara del mapa.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraState {
  pub center: Coordinates,
  pub zoom: f64,
}

impl CameraState {
  pub fn new(center: Coordinates, zoom: f64) -> Self {
    Self { center, zoom }
  }
}
