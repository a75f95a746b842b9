//! Motor de filtrado: búsqueda libre + facetas (idioma / género / país).
//!
//! Función pura de sus entradas, sin I/O, así que se puede llamar en cada
//! pulsación de tecla sin debounce.

use crate::domain::{Facets, FilterCriteria, Song};

/// Devuelve las canciones que cumplen `criteria`, en el orden original.
pub fn filter(songs: &[Song], criteria: &FilterCriteria) -> Vec<Song> {
  if criteria.is_empty() {
    return songs.to_vec();
  }

  let query = criteria.normalized_query();
  songs.iter().filter(|song| matches(song, criteria, &query)).cloned().collect()
}

/// `query` ya viene normalizada (ver [`FilterCriteria::normalized_query`]).
fn matches(song: &Song, criteria: &FilterCriteria, query: &str) -> bool {
  let country = song.canonical_country();
  let language = song.canonical_language();

  // Sin versión canónica (o sin país) solo se descarta si hay filtro de país.
  if criteria.country_filter().is_some() && country.is_none() {
    return false;
  }

  let matches_query = query.is_empty() || {
    let genre = song.genre.as_ref().map(|g| g.to_string());
    [Some(song.title.as_str()), Some(song.original_artist.as_str()), country, language, genre.as_deref()]
      .into_iter()
      .flatten()
      .any(|field| field.to_lowercase().contains(query))
  };

  let matches_language = criteria.language_filter().is_none_or(|l| language == Some(l));
  let matches_genre = criteria.genre.as_ref().is_none_or(|g| song.genre.as_ref() == Some(g));
  let matches_country = criteria.country_filter().is_none_or(|c| country == Some(c));

  matches_query && matches_language && matches_genre && matches_country
}

/// Valores distintos para los desplegables de filtros.
pub fn facets(songs: &[Song]) -> Facets {
  let mut facets = Facets::default();

  for song in songs {
    if let Some(language) = song.canonical_language() {
      push_unique(&mut facets.languages, language.to_string());
    }
    if let Some(genre) = &song.genre {
      push_unique(&mut facets.genres, genre.clone());
    }
    if let Some(country) = song.canonical_country() {
      push_unique(&mut facets.countries, country.to_string());
    }
  }

  facets
}

fn push_unique<T: PartialEq>(values: &mut Vec<T>, value: T) {
  if !values.contains(&value) {
    values.push(value);
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::Genre;
  use crate::testing::{song, three_songs, version};

  fn catalog() -> Vec<Song> {
    let mut songs = three_songs();
    let mut gospel = song("4", "Oh Happy Day", vec![version("United States", "English", None)]);
    gospel.genre = Some(Genre::Gospel);
    songs.push(gospel);
    songs.push(song("5", "Untranslated", vec![]));
    songs
  }

  fn ids(songs: &[Song]) -> Vec<&str> {
    songs.iter().map(|s| s.id.as_str()).collect()
  }

  #[test]
  fn empty_criteria_returns_everything_in_order() {
    let songs = catalog();
    assert_eq!(filter(&songs, &FilterCriteria::default()), songs);
  }

  #[test]
  fn whitespace_query_counts_as_empty() {
    let songs = catalog();
    assert_eq!(filter(&songs, &FilterCriteria::default().with_query("   ")), songs);
  }

  #[test]
  fn query_matches_title_artist_country_language_and_genre() {
    let songs = catalog();

    assert_eq!(ids(&filter(&songs, &FilterCriteria::default().with_query("GRACE"))), ["1"]);
    assert_eq!(ids(&filter(&songs, &FilterCriteria::default().with_query("artist 3"))), ["3"]);
    assert_eq!(ids(&filter(&songs, &FilterCriteria::default().with_query("germ"))), ["2"]);
    assert_eq!(ids(&filter(&songs, &FilterCriteria::default().with_query("spanish"))), ["3"]);
    assert_eq!(ids(&filter(&songs, &FilterCriteria::default().with_query("gospel"))), ["4"]);
  }

  #[test]
  fn query_spaces_are_part_of_the_substring() {
    let songs = catalog();
    assert!(filter(&songs, &FilterCriteria::default().with_query("grace ")).is_empty());
    assert_eq!(ids(&filter(&songs, &FilterCriteria::default().with_query("amazing grace"))), ["1"]);
  }

  #[test]
  fn facets_combine_with_and() {
    let songs = catalog();
    let criteria = FilterCriteria::default().with_language("French").with_genre(Genre::Hymn);
    assert_eq!(ids(&filter(&songs, &criteria)), ["1"]);

    let criteria = criteria.with_country("Spain");
    assert!(filter(&songs, &criteria).is_empty());
  }

  #[test]
  fn songs_without_versions_only_drop_out_under_a_country_filter() {
    let songs = catalog();

    let by_title = filter(&songs, &FilterCriteria::default().with_query("untrans"));
    assert_eq!(ids(&by_title), ["5"]);

    let by_country = filter(&songs, &FilterCriteria::default().with_country("France"));
    assert_eq!(ids(&by_country), ["1"]);

    let by_language = filter(&songs, &FilterCriteria::default().with_language("English"));
    assert_eq!(ids(&by_language), ["4"]);
  }

  #[test]
  fn filtering_is_idempotent() {
    let songs = catalog();
    let all = [
      FilterCriteria::default().with_query("a"),
      FilterCriteria::default().with_genre(Genre::Hymn),
      FilterCriteria::default().with_query("e").with_country("Germany"),
      FilterCriteria::default().with_language("English").with_query("day"),
    ];

    for criteria in all {
      let once = filter(&songs, &criteria);
      assert_eq!(filter(&once, &criteria), once, "criteria {criteria:?}");
    }
  }

  #[test]
  fn france_song_filtered_by_germany_is_empty() {
    let songs = vec![song("1", "Song", vec![version("France", "French", Some((48.85, 2.35)))])];
    assert!(filter(&songs, &FilterCriteria::default().with_country("Germany")).is_empty());
  }

  #[test]
  fn facets_are_distinct_and_in_first_seen_order() {
    let mut songs = catalog();
    songs.push(song("6", "Another", vec![version("France", "French", None)]));

    let facets = facets(&songs);
    assert_eq!(facets.languages, ["French", "German", "Spanish", "English"]);
    assert_eq!(facets.countries, ["France", "Germany", "Spain", "United States"]);
    assert_eq!(facets.genres, [Genre::Hymn, Genre::Gospel]);
  }
}
