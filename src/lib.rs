pub mod core;

pub use crate::core::flight::{
    FLIGHT_LIMITS, FlightLimits, FlightParams, ParamRange, Trajectory, compute_trajectory,
    compute_trajectory_with, mirror_lateral,
};
pub use crate::core::geometry::{Bounds, Point, get_bounds};
pub use crate::core::svg_path::to_svg_path;
pub use crate::core::tuning::ShapeTuning;
pub use crate::core::window::{
    FitResult, ForwardDirection, Viewport, fit_start_bottom_center,
    fit_start_bottom_center_fill_height,
};
