pub mod coordinates;
pub mod engine;
pub mod filter;
pub mod map_view;
pub mod markers;
pub mod playback;
pub mod visualizer;

pub use engine::{DiscoveryEngine, HostParts};
pub use map_view::MapView;
pub use markers::{MarkerLifecycleManager, MarkerState, ReconcileOutcome};
pub use playback::PlaybackCoordinator;
pub use visualizer::Visualizer;
