mod backend;
mod io;
mod model;
mod paths;

pub use backend::{ConfigBackend, TomlConfigBackend};
pub use model::EngineConfig;
pub use paths::{ConfigError, SongmapPaths};

use once_cell::sync::Lazy;

// Singleton de paths (SONGMAP_BASE_DIR / directorios del sistema)
pub static PATHS: Lazy<SongmapPaths> = Lazy::new(|| SongmapPaths::detect().expect("failed to init SongmapPaths"));

// Singleton del backend de config
pub static CONFIG_BACKEND: Lazy<TomlConfigBackend> = Lazy::new(|| TomlConfigBackend::new(PATHS.clone()));
