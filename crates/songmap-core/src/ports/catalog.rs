use async_trait::async_trait;

use crate::domain::{Song, SongId};

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
  #[error("http error: {0}")]
  Http(String),

  #[error("decode error: {0}")]
  Decode(String),

  #[error("song not found")]
  NotFound,

  #[error("internal error: {0}")]
  Internal(String),
}

/// Port de lectura del catálogo de canciones.
///
/// Solo lectura desde el punto de vista del núcleo: crear, editar o borrar
/// canciones es cosa de la capa de persistencia.
#[async_trait]
pub trait CatalogService: Send + Sync {
  async fn list_songs(&self) -> Result<Vec<Song>, CatalogError>;

  /// `Ok(None)` si el catálogo no conoce el id.
  async fn get_song(&self, id: &SongId) -> Result<Option<Song>, CatalogError>;

  /// Canciones cuya versión canónica pertenece a `country`.
  ///
  /// Por defecto filtra `list_songs`; los adapters con endpoint propio lo sobreescriben.
  async fn songs_by_country(&self, country: &str) -> Result<Vec<Song>, CatalogError> {
    let songs = self.list_songs().await?;
    Ok(songs.into_iter().filter(|s| s.canonical_country() == Some(country)).collect())
  }
}
