use log::{debug, warn};
use songmap_core::ports::{AssetResolver, CatalogError};

use crate::config::CatalogConfig;
use crate::http::parse_base_url;

/// Resuelve las referencias de audio e imagen del catálogo a URLs absolutas.
///
/// Los archivos se sirven desde la raíz del servidor, no desde el prefijo
/// `/api`, así que la base es la URL del API sin su último segmento `api`.
#[derive(Debug, Clone)]
pub struct UrlAssetResolver {
  base_url: String,
  placeholder: String,
}

impl UrlAssetResolver {
  pub fn new(api_base_url: &str, placeholder: &str) -> Result<Self, CatalogError> {
    let base_url = server_base(api_base_url)?;
    let mut resolver = Self { base_url, placeholder: String::new() };
    resolver.placeholder = resolver.join(placeholder);
    Ok(resolver)
  }

  pub fn from_config(config: &CatalogConfig) -> Result<Self, CatalogError> {
    Self::new(&config.api_base_url, &config.placeholder_image)
  }

  pub fn base_url(&self) -> &str {
    &self.base_url
  }

  fn join(&self, reference: &str) -> String {
    if is_absolute(reference) {
      return reference.to_string();
    }
    let clean = reference.replace('\\', "/");
    format!("{}/{}", self.base_url, clean.trim_start_matches('/'))
  }
}

/// `https://api.host/api/` -> `https://api.host`. Solo se quita un segmento
/// final `api`; el host y el resto de la ruta no se tocan.
fn server_base(api_base_url: &str) -> Result<String, CatalogError> {
  let mut url = parse_base_url(api_base_url)?;
  url.set_query(None);
  url.set_fragment(None);

  let ends_in_api = url.path_segments().and_then(|segments| segments.filter(|s| !s.is_empty()).last()) == Some("api");
  if let Ok(mut segments) = url.path_segments_mut() {
    segments.pop_if_empty();
    if ends_in_api {
      segments.pop();
    }
  }
  Ok(url.as_str().trim_end_matches('/').to_string())
}

fn is_absolute(reference: &str) -> bool {
  reference.starts_with("http://") || reference.starts_with("https://")
}

fn present(reference: Option<&str>) -> Option<&str> {
  reference.map(str::trim).filter(|r| !r.is_empty())
}

impl AssetResolver for UrlAssetResolver {
  fn resolve_audio_url(&self, reference: Option<&str>) -> Option<String> {
    let Some(reference) = present(reference) else {
      warn!("No audio URL provided");
      return None;
    };
    let url = self.join(reference);
    debug!("Constructed audio URL: {url}");
    Some(url)
  }

  fn resolve_image_url(&self, reference: Option<&str>) -> String {
    let Some(reference) = present(reference) else {
      return self.placeholder.clone();
    };
    // `/uploads/...` ya viene con la barra inicial.
    if reference.starts_with("/uploads/") {
      return format!("{}{reference}", self.base_url);
    }
    self.join(reference)
  }
}
