use log::debug;
use serde::{Deserialize, Serialize};
use songmap_core::domain::{MapSettings, PlayerSettings, VisualizerSettings};

use crate::backend::ConfigBackend;
use crate::paths::ConfigError;
use crate::CONFIG_BACKEND;

/// Ajustes del motor: secciones `[map]`, `[player]` y `[visualizer]` de songmap.toml.
///
/// Cada sección ausente se rellena con sus valores por defecto.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
  pub map: MapSettings,
  pub player: PlayerSettings,
  pub visualizer: VisualizerSettings,
}

impl EngineConfig {
  /// Carga usando el backend global.
  pub fn load() -> Result<Self, ConfigError> {
    Self::load_from(&*CONFIG_BACKEND)
  }

  /// Variante para tests: inyectar un backend distinto.
  pub fn load_from<B: ConfigBackend>(backend: &B) -> Result<Self, ConfigError> {
    let config = Self {
      map: backend.load_section_with_default("map")?,
      player: backend.load_section_with_default("player")?,
      visualizer: backend.load_section_with_default("visualizer")?,
    };
    debug!("Engine config loaded: theme {}", config.map.default_theme.style_id());
    Ok(config)
  }

  pub fn save_to<B: ConfigBackend>(&self, backend: &B) -> Result<(), ConfigError> {
    backend.save_section("map", &self.map)?;
    backend.save_section("player", &self.player)?;
    backend.save_section("visualizer", &self.visualizer)?;
    Ok(())
  }
}
