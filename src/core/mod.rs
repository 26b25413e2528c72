pub mod flight;
pub mod geometry;
pub mod svg_path;
pub mod tuning;
pub mod window;
