use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

const STYLE_URL_PREFIX: &str = "mapbox://styles/mapbox/";

/// Estilo visual del mapa.
///
/// Cambiar de estilo recarga todo el estado de render del mapa (incluida la
/// cámara), por eso lo gestiona `MapView` y no la UI directamente.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum MapTheme {
  Dark,
  Streets,
  Outdoors,
  #[default]
  Light,
  Satellite,
  SatelliteStreets,
  NavigationDay,
  NavigationNight,
}

impl MapTheme {
  pub const ALL: [MapTheme; 8] = [
    MapTheme::Dark,
    MapTheme::Streets,
    MapTheme::Outdoors,
    MapTheme::Light,
    MapTheme::Satellite,
    MapTheme::SatelliteStreets,
    MapTheme::NavigationDay,
    MapTheme::NavigationNight,
  ];

  /// Identificador del estilo (`light-v11`, `dark-v11`, ...).
  pub fn style_id(&self) -> &'static str {
    match self {
      MapTheme::Dark => "dark-v11",
      MapTheme::Streets => "streets-v12",
      MapTheme::Outdoors => "outdoors-v12",
      MapTheme::Light => "light-v11",
      MapTheme::Satellite => "satellite-v9",
      MapTheme::SatelliteStreets => "satellite-streets-v12",
      MapTheme::NavigationDay => "navigation-day-v1",
      MapTheme::NavigationNight => "navigation-night-v1",
    }
  }

  pub fn style_url(&self) -> String {
    format!("{STYLE_URL_PREFIX}{}", self.style_id())
  }

  pub fn display_name(&self) -> &'static str {
    match self {
      MapTheme::Dark => "Dark",
      MapTheme::Streets => "Streets",
      MapTheme::Outdoors => "Outdoors",
      MapTheme::Light => "Light",
      MapTheme::Satellite => "Satellite",
      MapTheme::SatelliteStreets => "Satellite Streets",
      MapTheme::NavigationDay => "Navigation Day",
      MapTheme::NavigationNight => "Navigation Night",
    }
  }

  /// Color de los marcadores con este estilo.
  pub fn marker_color(&self) -> &'static str {
    match self {
      MapTheme::Streets | MapTheme::Light => "#ff0000",
      MapTheme::Outdoors | MapTheme::NavigationDay => "#ff6b6b",
      _ => "#ff4444",
    }
  }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown map theme: {0}")]
pub struct UnknownTheme(pub String);

impl FromStr for MapTheme {
  type Err = UnknownTheme;

  /// Acepta el id del estilo o la URL completa `mapbox://styles/mapbox/<id>`.
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let id = s.trim();
    let id = id.strip_prefix(STYLE_URL_PREFIX).unwrap_or(id);

    MapTheme::ALL.into_iter().find(|t| t.style_id() == id).ok_or_else(|| UnknownTheme(s.to_string()))
  }
}

impl TryFrom<String> for MapTheme {
  type Error = UnknownTheme;

  fn try_from(value: String) -> Result<Self, Self::Error> {
    value.parse()
  }
}

impl From<MapTheme> for String {
  fn from(theme: MapTheme) -> Self {
    theme.style_id().to_string()
  }
}

impl fmt::Display for MapTheme {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.display_name())
  }
}
