use crate::domain::SongId;

/// Colaborador de navegación (p. ej. el router de la UI).
pub trait Navigator {
  /// Abre la página de detalle de la canción.
  fn go_to_song_detail(&mut self, id: &SongId);
}
