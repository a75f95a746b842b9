pub mod analysis;
pub mod assets;
pub mod audio;
pub mod catalog;
pub mod host;
pub mod keys;
pub mod map;
pub mod navigation;

pub use analysis::{AnalysisBackend, AnalysisContext, AnalysisError, FrameId, FrameScheduler, TapId};
pub use assets::AssetResolver;
pub use audio::{AudioPipeline, PipelineError, PipelineEvent, StreamId};
pub use catalog::{CatalogError, CatalogService};
pub use host::Host;
pub use keys::{Key, KeyBindings};
pub use map::{MapSurface, MarkerHandle, MarkerSpec, PopupAction, PopupContent, PopupHandle};
pub use navigation::Navigator;
