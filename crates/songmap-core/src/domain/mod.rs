pub mod filter;
pub mod genre;
pub mod geo;
pub mod ids;
pub mod playback;
pub mod settings;
pub mod song;
pub mod theme;

pub use filter::{Facets, FilterCriteria};
pub use genre::Genre;
pub use geo::{CameraState, Coordinates, GeoBounds};
pub use ids::{SongId, UserId};
pub use playback::{PlaybackPhase, PlaybackState};
pub use settings::{MapSettings, PlayerSettings, VisualizerSettings};
pub use song::{Song, SongVersion, Verification};
pub use theme::MapTheme;
