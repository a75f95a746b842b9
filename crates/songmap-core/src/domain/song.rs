use serde::{Deserialize, Serialize};

use crate::domain::genre::Genre;
use crate::domain::geo::Coordinates;
use crate::domain::ids::{SongId, UserId};

/// La Canción (Song): la obra original más todas sus versiones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Song {
  /// Identificador asignado por el catálogo.
  pub id: SongId,
  pub title: String,
  /// Artista que interpretó la versión original.
  pub original_artist: String,
  pub original_language: String,
  pub original_lyrics: String,
  /// Categoría de la canción. Puede faltar en datos antiguos.
  pub genre: Option<Genre>,
  /// Referencia (relativa o absoluta) a la portada.
  pub image_ref: Option<String>,
  /// Versiones por país/idioma. La primera es la canónica.
  pub versions: Vec<SongVersion>,
}

impl Song {
  /// La versión canónica: la primera de la lista.
  ///
  /// Una canción sin versiones no se puede colocar en el mapa ni reproducir.
  pub fn canonical(&self) -> Option<&SongVersion> {
    self.versions.first()
  }

  /// Coordenadas de la versión canónica, si existen y son válidas.
  pub fn canonical_coordinates(&self) -> Option<Coordinates> {
    self.canonical().and_then(|v| v.coordinates).filter(Coordinates::is_finite)
  }

  pub fn canonical_country(&self) -> Option<&str> {
    self.canonical().map(|v| v.country.as_str()).filter(|c| !c.is_empty())
  }

  pub fn canonical_language(&self) -> Option<&str> {
    self.canonical().map(|v| v.language.as_str()).filter(|l| !l.is_empty())
  }

  /// Referencia de audio de la versión canónica (sin resolver).
  pub fn canonical_audio_ref(&self) -> Option<&str> {
    self.canonical().and_then(|v| v.audio_ref.as_deref()).filter(|a| !a.trim().is_empty())
  }
}

/// Una versión concreta de la canción (traducción, grabación local, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SongVersion {
  pub country: String,
  /// Posición en el mapa. Sin coordenadas la canción no tiene marcador,
  /// pero sigue apareciendo en la lista y en las búsquedas.
  pub coordinates: Option<Coordinates>,
  pub language: String,
  /// Referencia opaca al audio; la resuelve el `AssetResolver`.
  pub audio_ref: Option<String>,
  pub lyrics: String,
  pub uploaded_by: Option<UserId>,
  /// Estado de moderación. Lo gestiona el colaborador de moderación.
  pub verification: Verification,
}

/// Verificación de una versión por un moderador. Solo lectura para el núcleo.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Verification {
  pub verified: bool,
  pub verified_by: Option<UserId>,
  /// Marca de tiempo ISO-8601 tal como la entrega el catálogo.
  pub verified_at: Option<String>,
}
