/// Teclas con atajo en el mini-player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
  Space,
  ArrowLeft,
  ArrowRight,
  ArrowUp,
  ArrowDown,
}

/// Listener global de teclado del host.
///
/// `bind` registra el listener que reenvía las teclas a
/// `DiscoveryEngine::handle_key`; `unbind` lo quita. El coordinador garantiza
/// llamadas alternadas (nunca dos `bind` seguidos).
pub trait KeyBindings {
  fn bind(&mut self);
  fn unbind(&mut self);
}
