use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::{fmt, str::FromStr};

/// Categoría (género) de una canción.
///
/// El catálogo guarda la categoría como texto libre en minúsculas
/// (`hymn`, `worship`, ...). Los valores conocidos se normalizan y
/// cualquier otro valor se conserva tal cual en [`Genre::Custom`].
///
/// Esto significa que **parsear nunca falla**.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Genre {
  Hymn,
  Worship,
  Gospel,
  Praise,
  Contemporary,
  Traditional,
  Other,
  /// Valor no estándar recibido del catálogo.
  Custom(String),
}

impl Genre {
  /// Icono usado en la lista lateral y en los chips de filtro.
  pub fn icon(&self) -> &'static str {
    match self {
      Genre::Hymn => "📜",
      Genre::Contemporary => "🎸",
      Genre::Gospel => "🎹",
      Genre::Traditional => "🎻",
      _ => "🎵",
    }
  }

  /// Valor tal como lo guarda el catálogo.
  pub fn as_wire(&self) -> &str {
    match self {
      Genre::Hymn => "hymn",
      Genre::Worship => "worship",
      Genre::Gospel => "gospel",
      Genre::Praise => "praise",
      Genre::Contemporary => "contemporary",
      Genre::Traditional => "traditional",
      Genre::Other => "other",
      Genre::Custom(s) => s,
    }
  }
}

impl FromStr for Genre {
  type Err = std::convert::Infallible;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let normalized = s.trim().to_lowercase();

    let genre = match normalized.as_str() {
      "hymn" => Genre::Hymn,
      "worship" => Genre::Worship,
      "gospel" => Genre::Gospel,
      "praise" => Genre::Praise,
      "contemporary" => Genre::Contemporary,
      "traditional" => Genre::Traditional,
      "other" => Genre::Other,
      _ => Genre::Custom(s.trim().to_string()),
    };

    Ok(genre)
  }
}

impl fmt::Display for Genre {
  /// Nombre legible ("Hymn", "Worship", ...). `Custom` imprime el valor original.
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Genre::Hymn => write!(f, "Hymn"),
      Genre::Worship => write!(f, "Worship"),
      Genre::Gospel => write!(f, "Gospel"),
      Genre::Praise => write!(f, "Praise"),
      Genre::Contemporary => write!(f, "Contemporary"),
      Genre::Traditional => write!(f, "Traditional"),
      Genre::Other => write!(f, "Other"),
      Genre::Custom(s) => write!(f, "{s}"),
    }
  }
}

impl Serialize for Genre {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(self.as_wire())
  }
}

impl<'de> Deserialize<'de> for Genre {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    let raw = String::deserialize(deserializer)?;
    let Ok(genre) = raw.parse::<Genre>();
    Ok(genre)
  }
}
