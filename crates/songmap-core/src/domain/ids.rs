use serde::{Deserialize, Serialize};
use std::fmt;

/// Identificador de una canción dentro del catálogo.
///
/// El catálogo es quien asigna los ids (p. ej. un ObjectId de documento), así que
/// para el núcleo es un string opaco: solo se compara y se muestra.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SongId(String);

impl SongId {
  pub fn new(id: impl Into<String>) -> Self {
    SongId(id.into())
  }

  /// Devuelve el id como `&str`.
  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl From<&str> for SongId {
  fn from(s: &str) -> Self {
    SongId(s.to_owned())
  }
}

impl From<String> for SongId {
  fn from(s: String) -> Self {
    SongId(s)
  }
}

impl fmt::Display for SongId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    self.0.fmt(f)
  }
}

/// Identidad de un usuario (quien subió una versión o quien la verificó).
///
/// Solo lectura para este núcleo: la gestiona el colaborador de identidad.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
  pub fn new(id: impl Into<String>) -> Self {
    UserId(id.into())
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl From<&str> for UserId {
  fn from(s: &str) -> Self {
    UserId(s.to_owned())
  }
}

impl fmt::Display for UserId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    self.0.fmt(f)
  }
}
