//! Formato JSON del API de canciones.
//!
//! Los nombres de campo son los del servidor (`_id`, `originalArtist`,
//! `audioUrl`, ...). Estos tipos solo existen para decodificar; el resto del
//! sistema trabaja con los tipos de `songmap_core::domain`.

use serde::Deserialize;
use songmap_core::domain::{Coordinates, Genre, Song, SongId, SongVersion, UserId, Verification};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SongDto {
  #[serde(rename = "_id")]
  pub id: String,
  pub title: String,
  #[serde(default)]
  pub original_artist: String,
  #[serde(default)]
  pub original_language: String,
  #[serde(default)]
  pub original_lyrics: String,
  /// El servidor la llama `category`; algunos formularios envían `genre`.
  #[serde(alias = "genre")]
  pub category: Option<String>,
  pub image_url: Option<String>,
  #[serde(default)]
  pub versions: Vec<VersionDto>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionDto {
  #[serde(default)]
  pub country: String,
  pub coordinates: Option<CoordinatesDto>,
  #[serde(default)]
  pub language: String,
  pub audio_url: Option<String>,
  #[serde(default)]
  pub lyrics: String,
  pub uploaded_by: Option<UserRef>,
  #[serde(default)]
  pub verified: bool,
  pub verified_by: Option<UserRef>,
  pub verified_at: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CoordinatesDto {
  pub lat: Option<f64>,
  pub lng: Option<f64>,
}

/// Referencia a un usuario: id suelto o documento poblado (`{ _id, username }`).
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum UserRef {
  Id(String),
  Populated {
    #[serde(rename = "_id")]
    id: String,
  },
}

impl UserRef {
  fn into_id(self) -> UserId {
    match self {
      UserRef::Id(id) | UserRef::Populated { id, .. } => UserId::new(id),
    }
  }
}

impl From<SongDto> for Song {
  fn from(dto: SongDto) -> Self {
    let genre = dto.category.filter(|c| !c.trim().is_empty()).map(|c| {
      let Ok(genre) = c.parse::<Genre>();
      genre
    });

    Song {
      id: SongId::new(dto.id),
      title: dto.title,
      original_artist: dto.original_artist,
      original_language: dto.original_language,
      original_lyrics: dto.original_lyrics,
      genre,
      image_ref: dto.image_url.filter(|u| !u.trim().is_empty()),
      versions: dto.versions.into_iter().map(SongVersion::from).collect(),
    }
  }
}

impl From<VersionDto> for SongVersion {
  fn from(dto: VersionDto) -> Self {
    // Un par incompleto cuenta como "sin coordenadas".
    let coordinates = dto.coordinates.and_then(|c| Some(Coordinates::new(c.lat?, c.lng?)));

    SongVersion {
      country: dto.country,
      coordinates,
      language: dto.language,
      audio_ref: dto.audio_url.filter(|u| !u.trim().is_empty()),
      lyrics: dto.lyrics,
      uploaded_by: dto.uploaded_by.map(UserRef::into_id),
      verification: Verification {
        verified: dto.verified,
        verified_by: dto.verified_by.map(UserRef::into_id),
        verified_at: dto.verified_at,
      },
    }
  }
}
