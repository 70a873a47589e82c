pub mod bounds;
pub mod engine;
pub mod flight;
pub mod options;
pub(crate) mod session;

pub use bounds::camera_for_bounds;
pub use engine::{normalize_bearing, Camera};
pub use flight::FlightPath;
pub use options::{
    AnimationOptions, BoundsCamera, CameraOptions, EaseToOptions, EdgeInsets, FitBoundsOptions,
    FlightOptions, FlyToOptions, Padding, PaddingEdges,
};
