use std::fmt::Write;

use crate::core::geometry::Point;

/// Round half-up to two decimals.
fn round2(value: f64) -> f64 {
    (value * 100.0 + 0.5).floor() / 100.0
}

/// `"M x0 y0 L x1 y1 ..."` with every coordinate rounded to two decimals.
pub fn to_svg_path(points: &[Point]) -> String {
    let Some((first, rest)) = points.split_first() else {
        return String::new();
    };

    let mut d = format!("M {} {}", round2(first.x), round2(first.y));
    for p in rest {
        // Writing into a String cannot fail.
        let _ = write!(d, " L {} {}", round2(p.x), round2(p.y));
    }
    d
}
