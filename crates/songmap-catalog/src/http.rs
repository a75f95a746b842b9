use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info};
use serde::de::DeserializeOwned;
use songmap_core::domain::{Song, SongId};
use songmap_core::ports::{CatalogError, CatalogService};
use url::Url;

use crate::config::CatalogConfig;
use crate::models::SongDto;

/// Catálogo servido por el API REST de canciones.
///
/// `ureq` es bloqueante: cada petición corre en el pool de bloqueo de tokio.
#[derive(Clone)]
pub struct HttpCatalog {
  agent: ureq::Agent,
  api_base_url: Url,
}

impl HttpCatalog {
  pub fn new(config: &CatalogConfig) -> Result<Self, CatalogError> {
    let agent = ureq::AgentBuilder::new().timeout(Duration::from_secs(config.timeout_secs)).build();
    Ok(Self { agent, api_base_url: parse_base_url(&config.api_base_url)? })
  }

  /// `{api}/seg1/seg2...`, con cada segmento codificado por separado.
  fn endpoint(&self, segments: &[&str]) -> Result<Url, CatalogError> {
    let mut url = self.api_base_url.clone();
    url
      .path_segments_mut()
      .map_err(|_| CatalogError::Internal(format!("{} cannot be a base url", self.api_base_url)))?
      .pop_if_empty()
      .extend(segments);
    Ok(url)
  }

  /// GET decodificado como JSON. `Ok(None)` si el servidor responde 404.
  async fn fetch<T>(&self, segments: &[&str]) -> Result<Option<T>, CatalogError>
  where
    T: DeserializeOwned + Send + 'static,
  {
    let agent = self.agent.clone();
    let url = self.endpoint(segments)?;

    tokio::task::spawn_blocking(move || get_json(&agent, url.as_str()))
      .await
      .map_err(|e| CatalogError::Internal(e.to_string()))?
  }
}

/// Valida la URL base del API. Tiene que ser `http(s)` y admitir segmentos de ruta.
pub(crate) fn parse_base_url(raw: &str) -> Result<Url, CatalogError> {
  let url = Url::parse(raw.trim()).map_err(|e| CatalogError::Internal(format!("invalid api base url {raw:?}: {e}")))?;
  if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
    return Err(CatalogError::Internal(format!("api base url {raw:?} must be an http(s) url")));
  }
  Ok(url)
}

fn get_json<T: DeserializeOwned>(agent: &ureq::Agent, url: &str) -> Result<Option<T>, CatalogError> {
  debug!("GET {url}");

  let response = match agent.get(url).call() {
    Ok(response) => response,
    Err(ureq::Error::Status(404, _)) => return Ok(None),
    Err(ureq::Error::Status(code, _)) => return Err(CatalogError::Http(format!("{url} returned {code}"))),
    Err(e) => return Err(CatalogError::Http(e.to_string())),
  };

  let body = response.into_string().map_err(|e| CatalogError::Http(e.to_string()))?;
  serde_json::from_str(&body).map(Some).map_err(|e| CatalogError::Decode(e.to_string()))
}

fn into_songs(dtos: Vec<SongDto>) -> Vec<Song> {
  dtos.into_iter().map(Song::from).collect()
}

#[async_trait]
impl CatalogService for HttpCatalog {
  async fn list_songs(&self) -> Result<Vec<Song>, CatalogError> {
    let dtos: Vec<SongDto> = self.fetch(&["songs"]).await?.ok_or(CatalogError::NotFound)?;
    info!("Fetched {} songs", dtos.len());
    Ok(into_songs(dtos))
  }

  async fn get_song(&self, id: &SongId) -> Result<Option<Song>, CatalogError> {
    let dto: Option<SongDto> = self.fetch(&["songs", id.as_str()]).await?;
    Ok(dto.map(Song::from))
  }

  async fn songs_by_country(&self, country: &str) -> Result<Vec<Song>, CatalogError> {
    let dtos: Option<Vec<SongDto>> = self.fetch(&["songs", "country", country]).await?;
    Ok(dtos.map(into_songs).unwrap_or_default())
  }
}
