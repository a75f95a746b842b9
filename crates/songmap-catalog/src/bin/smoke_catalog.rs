use log::warn;
use songmap_catalog::{CatalogConfig, HttpCatalog, UrlAssetResolver};
use songmap_core::domain::FilterCriteria;
use songmap_core::ports::{AssetResolver, CatalogService};
use songmap_core::services::filter::{facets, filter};

/// Uso: `smoke_catalog [consulta] [país]`
#[tokio::main]
async fn main() {
  env_logger::init();

  let config = CatalogConfig::load().unwrap_or_else(|e| {
    warn!("No se pudo leer [catalog], usando valores por defecto: {e}");
    CatalogConfig::default()
  });
  let (catalog, assets) = match HttpCatalog::new(&config).and_then(|c| Ok((c, UrlAssetResolver::from_config(&config)?))) {
    Ok(pair) => pair,
    Err(e) => {
      eprintln!("Configuración [catalog] inválida: {e}");
      std::process::exit(1);
    }
  };

  let mut args = std::env::args().skip(1);
  let mut criteria = FilterCriteria::default().with_query(args.next().unwrap_or_default());
  if let Some(country) = args.next() {
    criteria = criteria.with_country(country);
  }

  let songs = match catalog.list_songs().await {
    Ok(songs) => songs,
    Err(e) => {
      eprintln!("Error al pedir canciones a {}: {e}", config.api_base_url);
      std::process::exit(1);
    }
  };

  let matches = filter(&songs, &criteria);
  println!("{} de {} canciones coinciden:", matches.len(), songs.len());
  for song in &matches {
    let audio = assets.resolve_audio_url(song.canonical_audio_ref()).unwrap_or_else(|| "-".to_string());
    println!(
      "{} | {} | {} | {}",
      song.title,
      song.original_artist,
      song.canonical_country().unwrap_or("?"),
      audio
    );
  }

  let facets = facets(&songs);
  println!("Idiomas: {}", facets.languages.join(", "));
  println!("Géneros: {}", facets.genres.iter().map(|g| g.to_string()).collect::<Vec<_>>().join(", "));
  println!("Países: {}", facets.countries.join(", "));
}
