use serde::{Deserialize, Serialize};

use crate::domain::geo::{CameraState, Coordinates};
use crate::domain::theme::MapTheme;

/// Ajustes del mapa y de los marcadores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapSettings {
  pub default_theme: MapTheme,
  /// Cámara inicial (centrada en Estados Unidos, como el mapa original).
  pub initial_camera: CameraState,
  pub min_zoom: f64,
  pub max_zoom: f64,
  /// Padding (px) del único auto-encuadre de la sesión.
  pub fit_padding: u32,
  /// Niveles de zoom en los que cambia la densidad de marcadores.
  pub density_thresholds: Vec<f64>,
}

impl Default for MapSettings {
  fn default() -> Self {
    Self {
      default_theme: MapTheme::Light,
      initial_camera: CameraState::new(Coordinates::new(37.0902, -95.7129), 3.0),
      min_zoom: 1.2,
      max_zoom: 15.0,
      fit_padding: 50,
      density_thresholds: vec![4.0, 8.0],
    }
  }
}

/// Ajustes del mini-player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerSettings {
  pub default_volume: f32,
  /// Paso de volumen de las flechas arriba/abajo.
  pub volume_step: f32,
}

impl Default for PlayerSettings {
  fn default() -> Self {
    Self { default_volume: 1.0, volume_step: 0.1 }
  }
}

/// Ajustes de la visualización de audio sobre los marcadores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisualizerSettings {
  pub enabled: bool,
  pub fft_size: usize,
  /// Escala extra máxima del marcador: `scale = 1 + amplitude * max_scale_boost`.
  pub max_scale_boost: f32,
}

impl Default for VisualizerSettings {
  fn default() -> Self {
    Self { enabled: true, fft_size: 256, max_scale_boost: 0.5 }
  }
}
