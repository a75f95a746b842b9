use serde::{Deserialize, Serialize};
use songmap_config::{CONFIG_BACKEND, ConfigBackend, ConfigError};

/// Sección `[catalog]` de songmap.toml.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
  /// Base del API de canciones (`GET {api_base_url}/songs`).
  pub api_base_url: String,
  /// Imagen para canciones sin portada.
  pub placeholder_image: String,
  pub timeout_secs: u64,
}

impl Default for CatalogConfig {
  fn default() -> Self {
    Self {
      api_base_url: "http://localhost:3000".to_string(),
      placeholder_image: "/uploads/song-placeholder.jpg".to_string(),
      timeout_secs: 10,
    }
  }
}

impl CatalogConfig {
  /// Carga desde la sección `[catalog]` usando el backend global.
  pub fn load() -> Result<Self, ConfigError> {
    Self::load_from(&*CONFIG_BACKEND)
  }

  /// Variante para tests: inyectar un backend distinto.
  pub fn load_from<B: ConfigBackend>(backend: &B) -> Result<Self, ConfigError> {
    backend.load_section_with_default("catalog")
  }

  pub fn save_to<B: ConfigBackend>(&self, backend: &B) -> Result<(), ConfigError> {
    backend.save_section("catalog", self)
  }
}
