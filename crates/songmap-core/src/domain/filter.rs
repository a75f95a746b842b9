use serde::{Deserialize, Serialize};

use crate::domain::genre::Genre;

/// Criterios de búsqueda de la vista principal.
///
/// Todos los campos se combinan con AND; un campo vacío o `None` lo acepta todo.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterCriteria {
  /// Texto libre (subcadena, sin distinguir mayúsculas).
  pub query: String,
  pub language: Option<String>,
  pub genre: Option<Genre>,
  pub country: Option<String>,
}

impl FilterCriteria {
  pub fn with_query(mut self, query: impl Into<String>) -> Self {
    self.query = query.into();
    self
  }

  pub fn with_language(mut self, language: impl Into<String>) -> Self {
    self.language = Some(language.into());
    self
  }

  pub fn with_genre(mut self, genre: Genre) -> Self {
    self.genre = Some(genre);
    self
  }

  pub fn with_country(mut self, country: impl Into<String>) -> Self {
    self.country = Some(country.into());
    self
  }

  /// Consulta en minúsculas, sin recortar: los espacios forman parte de la
  /// subcadena buscada. Vacía si solo hay espacios.
  pub fn normalized_query(&self) -> String {
    if self.query.trim().is_empty() {
      return String::new();
    }
    self.query.to_lowercase()
  }

  pub fn language_filter(&self) -> Option<&str> {
    non_blank(self.language.as_deref())
  }

  pub fn country_filter(&self) -> Option<&str> {
    non_blank(self.country.as_deref())
  }

  /// Ningún criterio activo.
  pub fn is_empty(&self) -> bool {
    self.normalized_query().is_empty()
      && self.language_filter().is_none()
      && self.genre.is_none()
      && self.country_filter().is_none()
  }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
  value.map(str::trim).filter(|v| !v.is_empty())
}

/// Valores disponibles para los desplegables de filtros.
///
/// En orden de aparición en la colección, sin repetidos.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Facets {
  pub languages: Vec<String>,
  pub genres: Vec<Genre>,
  pub countries: Vec<String>,
}
