//! Coordinador de reproducción.
//!
//! Máquina de estados alrededor del único pipeline de audio. Nadie más toca el
//! pipeline: la UI lee `PlaybackState` y pide transiciones con estos métodos.

use std::collections::HashMap;

use log::{debug, error, info, warn};

use crate::domain::{PlaybackPhase, PlaybackState, PlayerSettings, Song, SongId};
use crate::errors::CoreError;
use crate::ports::{AssetResolver, AudioPipeline, Key, KeyBindings, PipelineEvent};

pub struct PlaybackCoordinator<P: AudioPipeline, K: KeyBindings> {
  pipeline: P,
  keys: K,
  keys_bound: bool,
  state: PlaybackState,
  /// Colección completa: la canción actual siempre está aquí.
  library: HashMap<SongId, Song>,
  /// Orden de la lista mostrada (para siguiente/anterior).
  display_order: Vec<SongId>,
  /// Generación de los observadores registrados en el pipeline.
  generation: u64,
  volume_step: f32,
}

impl<P: AudioPipeline, K: KeyBindings> PlaybackCoordinator<P, K> {
  pub fn new(pipeline: P, keys: K, settings: &PlayerSettings) -> Self {
    Self {
      pipeline,
      keys,
      keys_bound: false,
      state: PlaybackState::new(settings.default_volume),
      library: HashMap::new(),
      display_order: Vec::new(),
      generation: 0,
      volume_step: settings.volume_step,
    }
  }

  pub fn state(&self) -> &PlaybackState {
    &self.state
  }

  /// Generación vigente; los eventos del pipeline deben venir etiquetados con ella.
  pub fn generation(&self) -> u64 {
    self.generation
  }

  /// Reemplaza la colección completa.
  ///
  /// Si la canción actual ya no existe se detiene y se limpia la selección.
  pub fn set_library(&mut self, songs: &[Song]) {
    self.library = songs.iter().map(|s| (s.id.clone(), s.clone())).collect();

    if let Some(current) = &self.state.current_song {
      if !self.library.contains_key(current) {
        info!("Current song {current} left the catalog, closing the player");
        self.close();
      }
    }
  }

  /// Orden de la lista que ve el usuario (resultado del filtro).
  pub fn set_display_order(&mut self, ids: Vec<SongId>) {
    self.display_order = ids;
  }

  // -------- TRANSICIONES --------

  /// Carga y reproduce la versión canónica de `id`.
  pub fn play<A: AssetResolver>(&mut self, id: &SongId, assets: &A) -> Result<(), CoreError> {
    let Some(song) = self.library.get(id) else {
      warn!("Play requested for unknown song {id}");
      return Err(CoreError::UnknownSong(id.clone()));
    };
    let url = assets.resolve_audio_url(song.canonical_audio_ref());

    // Nunca dos streams a la vez: lo anterior se desmonta primero.
    self.detach();
    self.select(id.clone());

    let Some(url) = url else {
      warn!("No audio URL available for song: {id}");
      let err = CoreError::MissingAsset { song: id.clone(), what: "audio" };
      self.state.last_error = Some("No audio file available for this song".to_string());
      return Err(err);
    };

    let stream = match self.pipeline.load(&url) {
      Ok(stream) => stream,
      Err(e) => {
        error!("Audio load error for {url}: {e}");
        self.state.last_error = Some("Failed to load audio file. Please try again later.".to_string());
        return Err(CoreError::LoadFailure(e.to_string()));
      }
    };

    self.generation += 1;
    self.pipeline.bind_events(self.generation);
    self.pipeline.set_volume(self.state.volume);
    self.pipeline.play();

    self.state.stream = Some(stream);
    self.state.phase = PlaybackPhase::Loading;
    debug!("Loading {url} (generation {})", self.generation);
    Ok(())
  }

  /// Acción "play" del popup / lista: alterna si es la canción actual.
  pub fn toggle<A: AssetResolver>(&mut self, id: &SongId, assets: &A) -> Result<(), CoreError> {
    if self.state.is_current(id) {
      match self.state.phase {
        PlaybackPhase::Playing => {
          self.pause();
          return Ok(());
        }
        PlaybackPhase::Paused => {
          self.resume();
          return Ok(());
        }
        PlaybackPhase::Loading => return Ok(()),
        PlaybackPhase::Idle | PlaybackPhase::Ended => {}
      }
    }
    self.play(id, assets)
  }

  /// No hace nada fuera de `Playing`.
  pub fn pause(&mut self) -> bool {
    if self.state.phase != PlaybackPhase::Playing {
      return false;
    }
    self.pipeline.pause();
    self.state.phase = PlaybackPhase::Paused;
    true
  }

  /// No hace nada fuera de `Paused`.
  pub fn resume(&mut self) -> bool {
    if self.state.phase != PlaybackPhase::Paused {
      return false;
    }
    self.pipeline.play();
    self.state.phase = PlaybackPhase::Playing;
    true
  }

  /// Salta a `position` (segundos).
  ///
  /// Se rechaza sin tocar el estado si la duración no se conoce, si la
  /// posición no es finita o si cae fuera de `[0, duration]`.
  pub fn seek(&mut self, position: f64) -> Result<(), CoreError> {
    if !position.is_finite() {
      return Err(CoreError::InvalidSeek(format!("{position} is not a finite number")));
    }
    let Some(duration) = self.state.duration.filter(|_| self.state.stream.is_some()) else {
      return Err(CoreError::InvalidSeek("duration is not known yet".to_string()));
    };
    if !(0.0..=duration).contains(&position) {
      return Err(CoreError::InvalidSeek(format!("{position} is outside 0..={duration}")));
    }

    self.pipeline.seek(position);
    self.state.position = position;
    Ok(())
  }

  /// Fija el volumen en `[0, 1]`. Se aplica en cualquier fase y se conserva para la siguiente pista.
  pub fn set_volume(&mut self, level: f32) -> Result<(), CoreError> {
    if !level.is_finite() {
      return Err(CoreError::InvalidVolume(level));
    }
    let level = level.clamp(0.0, 1.0);
    self.state.volume = level;
    self.pipeline.set_volume(level);
    Ok(())
  }

  /// Siguiente canción de la lista mostrada (circular).
  pub fn next<A: AssetResolver>(&mut self, assets: &A) -> Result<Option<SongId>, CoreError> {
    self.play_adjacent(1, assets)
  }

  /// Canción anterior de la lista mostrada (circular).
  pub fn previous<A: AssetResolver>(&mut self, assets: &A) -> Result<Option<SongId>, CoreError> {
    self.play_adjacent(-1, assets)
  }

  fn play_adjacent<A: AssetResolver>(&mut self, step: isize, assets: &A) -> Result<Option<SongId>, CoreError> {
    let Some(target) = self.adjacent(step) else {
      return Ok(None);
    };
    self.play(&target, assets)?;
    Ok(Some(target))
  }

  fn adjacent(&self, step: isize) -> Option<SongId> {
    let current = self.state.current_song.as_ref()?;
    let len = self.display_order.len();
    if len == 0 {
      return None;
    }

    let index = match self.display_order.iter().position(|id| id == current) {
      Some(i) => (i as isize + step).rem_euclid(len as isize) as usize,
      // La actual ya no se muestra: se entra por el extremo correspondiente.
      None if step > 0 => 0,
      None => len - 1,
    };
    Some(self.display_order[index].clone())
  }

  /// Detiene la pista y vuelve a `Idle`, conservando la selección.
  pub fn stop(&mut self) {
    self.detach();
    self.state.phase = PlaybackPhase::Idle;
    self.state.position = 0.0;
  }

  /// Cierra el mini-player: detiene y limpia la selección.
  pub fn close(&mut self) {
    self.stop();
    self.state.current_song = None;
    self.state.duration = None;
    self.state.last_error = None;
    self.unbind_keys();
  }

  /// La vista se destruye: libera el pipeline y el listener de teclado.
  pub fn teardown(&mut self) {
    self.close();
  }

  // -------- EVENTOS DEL PIPELINE --------

  /// Aplica un evento del pipeline. Devuelve `false` si venía de una generación vieja.
  pub fn handle_event(&mut self, generation: u64, event: PipelineEvent) -> bool {
    if generation != self.generation || self.state.stream.is_none() {
      debug!("Ignoring stale pipeline event {event:?} (generation {generation})");
      return false;
    }

    match event {
      PipelineEvent::MetadataLoaded { duration } => {
        if duration.is_finite() && duration > 0.0 {
          self.state.duration = Some(duration);
        }
      }
      PipelineEvent::TimeUpdate { position } => {
        if position.is_finite() {
          self.state.position = position.max(0.0);
        }
      }
      PipelineEvent::PlayStarted => {
        if self.state.phase == PlaybackPhase::Loading {
          self.state.phase = PlaybackPhase::Playing;
        }
      }
      PipelineEvent::PlayRejected { reason } => {
        error!("Error playing audio: {reason}");
        self.fail("Failed to play audio. Please try again later.");
      }
      PipelineEvent::LoadError { reason } => {
        error!("Audio load error: {reason}");
        self.fail("Failed to load audio file. Please try again later.");
      }
      PipelineEvent::Ended => {
        self.state.phase = PlaybackPhase::Ended;
        if let Some(song) = &self.state.current_song {
          info!("Finished playing {song}");
        }
        // La selección se queda para el mini-player; la fuente se libera.
        self.stop();
      }
    }
    true
  }

  fn fail(&mut self, message: &str) {
    self.detach();
    self.state.phase = PlaybackPhase::Idle;
    self.state.position = 0.0;
    self.state.last_error = Some(message.to_string());
  }

  // -------- TECLADO --------

  /// Atajos del mini-player. Solo responden mientras hay una canción seleccionada.
  pub fn handle_key<A: AssetResolver>(&mut self, key: Key, assets: &A) -> Result<bool, CoreError> {
    if !self.keys_bound {
      return Ok(false);
    }
    let Some(current) = self.state.current_song.clone() else {
      return Ok(false);
    };

    match key {
      Key::Space => self.toggle(&current, assets)?,
      Key::ArrowRight => {
        self.next(assets)?;
      }
      Key::ArrowLeft => {
        self.previous(assets)?;
      }
      Key::ArrowUp => self.set_volume(self.state.volume + self.volume_step)?,
      Key::ArrowDown => self.set_volume(self.state.volume - self.volume_step)?,
    }
    Ok(true)
  }

  pub fn keys_bound(&self) -> bool {
    self.keys_bound
  }

  // -------- INTERNOS --------

  fn select(&mut self, id: SongId) {
    self.state.current_song = Some(id);
    self.state.phase = PlaybackPhase::Idle;
    self.state.position = 0.0;
    self.state.duration = None;
    self.state.last_error = None;
    if !self.keys_bound {
      self.keys.bind();
      self.keys_bound = true;
    }
  }

  /// Quita observadores y fuente del pipeline, si había algo cargado.
  fn detach(&mut self) {
    if self.state.stream.take().is_some() {
      self.pipeline.unbind_events();
      self.pipeline.stop();
    }
  }

  fn unbind_keys(&mut self) {
    if self.keys_bound {
      self.keys.unbind();
      self.keys_bound = false;
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::testing::{FakeAssets, FakeKeys, FakePipeline, song, three_songs};

  type Coordinator = PlaybackCoordinator<FakePipeline, FakeKeys>;

  fn coordinator() -> (Coordinator, FakePipeline, FakeKeys) {
    let pipeline = FakePipeline::default();
    let keys = FakeKeys::default();
    let mut c = PlaybackCoordinator::new(pipeline.clone(), keys.clone(), &PlayerSettings::default());
    let songs = three_songs();
    c.set_library(&songs);
    c.set_display_order(songs.iter().map(|s| s.id.clone()).collect());
    (c, pipeline, keys)
  }

  fn id(s: &str) -> SongId {
    SongId::from(s)
  }

  /// Reproduce `s` y simula que el pipeline arrancó con la duración dada.
  fn start(c: &mut Coordinator, s: &str, duration: f64) {
    c.play(&id(s), &FakeAssets).unwrap();
    let g = c.generation();
    c.handle_event(g, PipelineEvent::MetadataLoaded { duration });
    c.handle_event(g, PipelineEvent::PlayStarted);
  }

  #[test]
  fn play_goes_through_loading_to_playing() {
    let (mut c, pipeline, keys) = coordinator();

    c.play(&id("1"), &FakeAssets).unwrap();
    assert_eq!(c.state().phase, PlaybackPhase::Loading);
    assert_eq!(pipeline.log.borrow().loads, ["http://cdn.test/uploads/audio/france.mp3"]);
    assert!(*keys.bound.borrow());

    c.handle_event(c.generation(), PipelineEvent::PlayStarted);
    assert_eq!(c.state().phase, PlaybackPhase::Playing);
    assert!(pipeline.log.borrow().running);
  }

  #[test]
  fn missing_audio_never_enters_loading() {
    let (mut c, pipeline, _) = coordinator();
    let mut silent = song("9", "Silent", three_songs()[0].versions.clone());
    silent.versions[0].audio_ref = None;
    c.set_library(&[silent]);

    let err = c.play(&id("9"), &FakeAssets).unwrap_err();

    assert!(matches!(err, CoreError::MissingAsset { what: "audio", .. }));
    assert_eq!(c.state().phase, PlaybackPhase::Idle);
    assert!(c.state().last_error.is_some());
    assert!(pipeline.log.borrow().loads.is_empty());
  }

  #[test]
  fn rejected_start_returns_to_idle_with_an_error() {
    let (mut c, pipeline, _) = coordinator();
    c.play(&id("2"), &FakeAssets).unwrap();

    c.handle_event(c.generation(), PipelineEvent::PlayRejected { reason: "NotAllowedError".into() });

    assert_eq!(c.state().phase, PlaybackPhase::Idle);
    assert_eq!(c.state().last_error.as_deref(), Some("Failed to play audio. Please try again later."));
    assert!(pipeline.log.borrow().bound.is_empty());
    assert!(pipeline.log.borrow().source.is_none());
  }

  #[test]
  fn load_failure_is_reported_without_loading() {
    let (mut c, pipeline, _) = coordinator();
    pipeline.log.borrow_mut().fail_next_load = true;

    assert!(matches!(c.play(&id("1"), &FakeAssets), Err(CoreError::LoadFailure(_))));
    assert_eq!(c.state().phase, PlaybackPhase::Idle);
  }

  #[test]
  fn switching_songs_keeps_a_single_binding() {
    let (mut c, pipeline, _) = coordinator();
    start(&mut c, "1", 120.0);
    let old_generation = c.generation();

    c.play(&id("2"), &FakeAssets).unwrap();

    let log = pipeline.log.borrow();
    assert_eq!(log.bound, [c.generation()]);
    assert_eq!(log.source.as_ref().map(|(_, url)| url.as_str()), Some("http://cdn.test/uploads/audio/germany.mp3"));
    drop(log);

    // Eventos del stream anterior no afectan al nuevo.
    assert!(!c.handle_event(old_generation, PipelineEvent::Ended));
    assert_eq!(c.state().phase, PlaybackPhase::Loading);
  }

  #[test]
  fn pause_and_resume_are_no_ops_in_the_wrong_phase() {
    let (mut c, _, _) = coordinator();
    assert!(!c.pause());
    assert!(!c.resume());

    start(&mut c, "1", 100.0);
    assert!(!c.resume());
    assert!(c.pause());
    assert_eq!(c.state().phase, PlaybackPhase::Paused);
    assert!(!c.pause());
    assert!(c.resume());
    assert_eq!(c.state().phase, PlaybackPhase::Playing);
  }

  #[test]
  fn seek_out_of_range_is_rejected_without_mutation() {
    let (mut c, pipeline, _) = coordinator();
    start(&mut c, "1", 180.0);
    c.handle_event(c.generation(), PipelineEvent::TimeUpdate { position: 42.0 });
    let before = c.state().clone();

    assert!(c.seek(-5.0).is_err());
    assert!(c.seek(180.0 + 100.0).is_err());
    assert!(c.seek(f64::NAN).is_err());
    assert_eq!(c.state(), &before);
    assert!(pipeline.log.borrow().seeks.is_empty());

    c.seek(90.0).unwrap();
    assert_eq!(c.state().position, 90.0);
    assert_eq!(pipeline.log.borrow().seeks, [90.0]);
  }

  #[test]
  fn seek_needs_a_known_duration() {
    let (mut c, _, _) = coordinator();
    c.play(&id("1"), &FakeAssets).unwrap();
    assert!(matches!(c.seek(1.0), Err(CoreError::InvalidSeek(_))));
  }

  #[test]
  fn ended_track_returns_to_idle_and_keeps_the_selection() {
    let (mut c, pipeline, keys) = coordinator();
    start(&mut c, "1", 60.0);
    c.handle_event(c.generation(), PipelineEvent::TimeUpdate { position: 59.8 });
    c.handle_event(c.generation(), PipelineEvent::Ended);

    assert_eq!(c.state().phase, PlaybackPhase::Idle);
    assert_eq!(c.state().position, 0.0);
    assert_eq!(c.state().current_song, Some(id("1")));
    assert_eq!(c.state().stream, None);
    assert!(pipeline.log.borrow().source.is_none());
    assert!(pipeline.log.borrow().bound.is_empty());
    assert!(c.keys_bound());
    assert!(*keys.bound.borrow());
    assert!(matches!(c.seek(10.0), Err(CoreError::InvalidSeek(_))));

    let ended_generation = c.generation();
    c.toggle(&id("1"), &FakeAssets).unwrap();
    assert_eq!(c.state().phase, PlaybackPhase::Loading);
    assert!(c.generation() > ended_generation);
  }

  #[test]
  fn volume_is_clamped_and_carried_to_the_next_track() {
    let (mut c, pipeline, _) = coordinator();
    c.set_volume(1.7).unwrap();
    assert_eq!(c.state().volume, 1.0);
    c.set_volume(-0.2).unwrap();
    assert_eq!(c.state().volume, 0.0);
    assert!(c.set_volume(f32::INFINITY).is_err());

    c.set_volume(0.3).unwrap();
    c.play(&id("3"), &FakeAssets).unwrap();
    assert_eq!(pipeline.log.borrow().volume, Some(0.3));
  }

  #[test]
  fn next_and_previous_wrap_around() {
    let (mut c, _, _) = coordinator();

    c.play(&id("1"), &FakeAssets).unwrap();
    assert_eq!(c.previous(&FakeAssets).unwrap(), Some(id("3")));
    assert_eq!(c.next(&FakeAssets).unwrap(), Some(id("1")));

    c.play(&id("3"), &FakeAssets).unwrap();
    assert_eq!(c.next(&FakeAssets).unwrap(), Some(id("1")));
  }

  #[test]
  fn next_without_a_current_song_is_a_no_op() {
    let (mut c, pipeline, _) = coordinator();
    assert_eq!(c.next(&FakeAssets).unwrap(), None);
    assert_eq!(c.previous(&FakeAssets).unwrap(), None);
    assert!(pipeline.log.borrow().loads.is_empty());
  }

  #[test]
  fn next_from_a_hidden_song_enters_the_displayed_list() {
    let (mut c, _, _) = coordinator();
    c.play(&id("2"), &FakeAssets).unwrap();
    c.set_display_order(vec![id("1"), id("3")]);

    assert_eq!(c.next(&FakeAssets).unwrap(), Some(id("1")));
    c.play(&id("2"), &FakeAssets).unwrap();
    assert_eq!(c.previous(&FakeAssets).unwrap(), Some(id("3")));
  }

  #[test]
  fn keyboard_shortcuts_follow_the_selection() {
    let (mut c, _, keys) = coordinator();
    assert!(!c.handle_key(Key::Space, &FakeAssets).unwrap());

    start(&mut c, "1", 100.0);
    c.set_volume(0.5).unwrap();

    assert!(c.handle_key(Key::Space, &FakeAssets).unwrap());
    assert_eq!(c.state().phase, PlaybackPhase::Paused);
    c.handle_key(Key::ArrowUp, &FakeAssets).unwrap();
    assert!((c.state().volume - 0.6).abs() < 1e-6);
    c.handle_key(Key::ArrowDown, &FakeAssets).unwrap();
    c.handle_key(Key::ArrowDown, &FakeAssets).unwrap();
    assert!((c.state().volume - 0.4).abs() < 1e-6);
    c.handle_key(Key::ArrowRight, &FakeAssets).unwrap();
    assert_eq!(c.state().current_song, Some(id("2")));
    c.handle_key(Key::ArrowLeft, &FakeAssets).unwrap();
    assert_eq!(c.state().current_song, Some(id("1")));

    c.teardown();
    assert!(!*keys.bound.borrow());
    assert!(!c.handle_key(Key::Space, &FakeAssets).unwrap());
  }

  #[test]
  fn dropping_the_current_song_from_the_catalog_closes_the_player() {
    let (mut c, pipeline, keys) = coordinator();
    start(&mut c, "1", 100.0);

    c.set_library(&three_songs()[1..]);

    assert_eq!(c.state().current_song, None);
    assert_eq!(c.state().phase, PlaybackPhase::Idle);
    assert!(pipeline.log.borrow().source.is_none());
    assert!(!*keys.bound.borrow());
  }

  #[test]
  fn toggle_pauses_and_resumes_the_current_song() {
    let (mut c, pipeline, _) = coordinator();
    start(&mut c, "1", 100.0);

    c.toggle(&id("1"), &FakeAssets).unwrap();
    assert_eq!(c.state().phase, PlaybackPhase::Paused);
    c.toggle(&id("1"), &FakeAssets).unwrap();
    assert_eq!(c.state().phase, PlaybackPhase::Playing);
    assert_eq!(pipeline.log.borrow().loads.len(), 1);

    c.toggle(&id("2"), &FakeAssets).unwrap();
    assert_eq!(c.state().current_song, Some(id("2")));
    assert_eq!(c.state().phase, PlaybackPhase::Loading);
  }
}
