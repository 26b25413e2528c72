use serde::{Deserialize, Serialize};

use crate::core::geometry::{Bounds, Point, get_bounds};

pub const DEFAULT_PADDING_PCT: f64 = 0.08;
pub const MAX_SCALE: f64 = 1e6;

const EPS: f64 = 1e-6;

/// Where world +Y ends up on screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ForwardDirection {
    /// World +Y moves toward smaller pixel Y.
    ScreenUp,
    /// World +Y moves toward larger pixel Y.
    ScreenDown,
}

/// Target pixel box for a fit.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    /// Margin as a fraction of a viewport dimension; `None` means 0.08.
    pub padding_pct: Option<f64>,
    /// `None` lets each fitting policy use its own default.
    pub forward: Option<ForwardDirection>,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1000.0, 600.0)
    }
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            padding_pct: None,
            forward: None,
        }
    }

    pub fn with_padding(mut self, padding_pct: f64) -> Self {
        self.padding_pct = Some(padding_pct);
        self
    }

    pub fn with_forward(mut self, forward: ForwardDirection) -> Self {
        self.forward = Some(forward);
        self
    }

    fn padding_fraction(&self) -> f64 {
        self.padding_pct.unwrap_or(DEFAULT_PADDING_PCT).clamp(0.0, 1.0)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FitResult {
    pub points: Vec<Point>,
    /// Pixels per world unit.
    pub scale: f64,
    pub width: f64,
    pub height: f64,
    /// Pixel position of the first input point.
    pub anchor: Point,
    pub view_box: String,
    pub world_width: f64,
    pub world_height: f64,
}

/// Distances from `start` to each side of `bounds`, never negative.
struct Extents {
    left: f64,
    right: f64,
    up: f64,
    down: f64,
}

impl Extents {
    fn around(start: Point, bounds: &Bounds) -> Self {
        Self {
            left: (start.x - bounds.min_x).max(0.0),
            right: (bounds.max_x - start.x).max(0.0),
            up: (bounds.max_y - start.y).max(0.0),
            down: (start.y - bounds.min_y).max(0.0),
        }
    }
}

/// Scale allowed by one side; a degenerate span does not constrain.
fn side_limit(budget_px: f64, span: f64) -> f64 {
    if span <= EPS {
        f64::INFINITY
    } else {
        budget_px / span
    }
}

fn remap(
    points: &[Point],
    start: Point,
    anchor: Point,
    scale: f64,
    forward: ForwardDirection,
) -> Vec<Point> {
    points
        .iter()
        .map(|p| {
            let dx = (p.x - start.x) * scale;
            let dy = (p.y - start.y) * scale;
            let y = match forward {
                ForwardDirection::ScreenUp => anchor.y - dy,
                ForwardDirection::ScreenDown => anchor.y + dy,
            };
            Point::new(anchor.x + dx, y)
        })
        .collect()
}

fn fit_result(
    points: Vec<Point>,
    scale: f64,
    viewport: &Viewport,
    anchor: Point,
    bounds: &Bounds,
) -> FitResult {
    FitResult {
        points,
        scale,
        width: viewport.width,
        height: viewport.height,
        anchor,
        view_box: format!("0 0 {} {}", viewport.width, viewport.height),
        world_width: bounds.width(),
        world_height: bounds.height(),
    }
}

/// Uniformly scale `points` so the whole path fits the viewport, with the
/// first point pinned at bottom-center (`padPx` above the bottom edge).
///
/// Defaults to [`ForwardDirection::ScreenUp`].
pub fn fit_start_bottom_center(points: &[Point], viewport: &Viewport) -> FitResult {
    let forward = viewport.forward.unwrap_or(ForwardDirection::ScreenUp);
    let pad_px = (viewport.width.min(viewport.height) * viewport.padding_fraction()).max(0.0);

    let bounds = get_bounds(points);
    let start = points.first().copied().unwrap_or(Point::ORIGIN);
    let extents = Extents::around(start, &bounds);

    let anchor = Point::new(viewport.width / 2.0, viewport.height - pad_px);

    let side_px = (anchor.x - pad_px).max(EPS);
    let up_px = (anchor.y - pad_px).max(EPS);
    let down_px = pad_px.max(EPS);

    let scale_x = side_limit(side_px, extents.left).min(side_limit(side_px, extents.right));
    let scale_y = side_limit(up_px, extents.up).min(side_limit(down_px, extents.down));
    let scale = scale_x.min(scale_y).min(MAX_SCALE).max(0.0);

    tracing::debug!(
        points = points.len(),
        scale,
        pad_px,
        ?forward,
        "fit start bottom-center"
    );

    let mapped = remap(points, start, anchor, scale, forward);
    fit_result(mapped, scale, viewport, anchor, &bounds)
}

/// Scale by forward extent alone so the path always spans the usable height.
/// Lateral content may overflow the horizontal edges.
///
/// Padding is a fraction of the height here, and the default orientation is
/// [`ForwardDirection::ScreenDown`].
pub fn fit_start_bottom_center_fill_height(points: &[Point], viewport: &Viewport) -> FitResult {
    let forward = viewport.forward.unwrap_or(ForwardDirection::ScreenDown);
    let pad_px = (viewport.height * viewport.padding_fraction()).max(0.0);

    let bounds = get_bounds(points);
    let start = points.first().copied().unwrap_or(Point::ORIGIN);
    let dy_up = (bounds.max_y - start.y).max(0.0);

    let anchor = Point::new(viewport.width / 2.0, viewport.height - pad_px);
    let usable_y = anchor.y - pad_px;
    let scale = (usable_y / dy_up.max(EPS)).max(0.0);

    tracing::debug!(
        points = points.len(),
        scale,
        pad_px,
        ?forward,
        "fit start bottom-center, fill height"
    );

    let mapped = remap(points, start, anchor, scale, forward);
    fit_result(mapped, scale, viewport, anchor, &bounds)
}

#[cfg(test)]
mod tests {
    use super::{
        ForwardDirection, MAX_SCALE, Viewport, fit_start_bottom_center,
        fit_start_bottom_center_fill_height,
    };
    use crate::core::flight::{FlightParams, compute_trajectory};
    use crate::core::geometry::Point;

    fn assert_close(actual: f64, expected: f64, tolerance: f64) {
        assert!(
            (actual - expected).abs() <= tolerance,
            "actual={actual}, expected={expected}, tolerance={tolerance}"
        );
    }

    fn vertical_pair() -> [Point; 2] {
        [Point::new(0.0, 0.0), Point::new(0.0, 1.0)]
    }

    #[test]
    fn up_budget_limits_a_vertical_segment() {
        let viewport = Viewport::new(1000.0, 600.0)
            .with_padding(0.08)
            .with_forward(ForwardDirection::ScreenUp);
        let fit = fit_start_bottom_center(&vertical_pair(), &viewport);

        assert_close(fit.scale, 504.0, 1e-9);
        assert_eq!(fit.points[0], Point::new(500.0, 552.0));
        assert_close(fit.points[1].x, 500.0, 1e-9);
        assert_close(fit.points[1].y, 552.0 - fit.scale, 1e-9);
        assert_close(fit.points[1].y, 48.0, 1e-9);
        assert_eq!(fit.view_box, "0 0 1000 600");
        assert_eq!((fit.width, fit.height), (1000.0, 600.0));
    }

    #[test]
    fn defaults_to_screen_up() {
        let fit = fit_start_bottom_center(&vertical_pair(), &Viewport::new(1000.0, 600.0));
        assert!(fit.points[1].y < fit.points[0].y);
    }

    #[test]
    fn screen_down_adds_forward_offset() {
        let viewport = Viewport::new(1000.0, 600.0).with_forward(ForwardDirection::ScreenDown);
        let fit = fit_start_bottom_center(&vertical_pair(), &viewport);
        assert_close(fit.points[1].y, 552.0 + fit.scale, 1e-9);
    }

    #[test]
    fn lateral_budget_can_bind() {
        let points = [Point::new(0.0, 0.0), Point::new(2.0, 0.1)];
        let fit = fit_start_bottom_center(&points, &Viewport::new(1000.0, 600.0));
        // right budget 452 over 2 units beats up budget 504 over 0.1.
        assert_close(fit.scale, 226.0, 1e-9);
        assert_close(fit.points[1].x, 952.0, 1e-9);
    }

    #[test]
    fn down_budget_is_the_padding() {
        let points = [Point::new(0.0, 0.0), Point::new(0.0, -1.0)];
        let fit = fit_start_bottom_center(&points, &Viewport::new(1000.0, 600.0));
        assert_close(fit.scale, 48.0, 1e-9);
        assert_close(fit.points[1].y, 600.0, 1e-9);
    }

    #[test]
    fn degenerate_input_hits_the_scale_cap() {
        let fit = fit_start_bottom_center(&[Point::new(3.0, 4.0)], &Viewport::default());
        assert_eq!(fit.scale, MAX_SCALE);
        assert_eq!(fit.points, vec![Point::new(500.0, 552.0)]);
    }

    #[test]
    fn empty_input_produces_empty_fit() {
        let fit = fit_start_bottom_center(&[], &Viewport::default());
        assert!(fit.points.is_empty());
        assert_eq!(fit.anchor, Point::new(500.0, 552.0));

        let fill = fit_start_bottom_center_fill_height(&[], &Viewport::default());
        assert!(fill.points.is_empty());
    }

    #[test]
    fn padding_is_clamped() {
        let viewport = Viewport::new(1000.0, 600.0).with_padding(3.0);
        let fit = fit_start_bottom_center(&vertical_pair(), &viewport);
        assert_eq!(fit.anchor, Point::new(500.0, 0.0));
        assert!(fit.scale >= 0.0);
    }

    #[test]
    fn trajectory_fits_inside_the_box() {
        let trajectory = compute_trajectory(FlightParams::new(12.0, 5.0, -3.0, 4.0));
        let viewport = Viewport::new(800.0, 800.0);
        let fit = fit_start_bottom_center(&trajectory, &viewport);

        assert_eq!(fit.points.len(), trajectory.len());
        assert_eq!(fit.points[0], Point::new(400.0, 800.0 - 64.0));
        for p in &fit.points {
            assert!(p.x >= 64.0 - 1e-6 && p.x <= 736.0 + 1e-6, "p={p:?}");
            assert!(p.y >= 64.0 - 1e-6 && p.y <= 800.0 + 1e-6, "p={p:?}");
        }
    }

    #[test]
    fn fill_height_uses_height_padding() {
        let viewport = Viewport::new(1000.0, 600.0).with_forward(ForwardDirection::ScreenUp);
        let fit = fit_start_bottom_center_fill_height(&vertical_pair(), &viewport);

        assert_eq!(fit.points[0], Point::new(500.0, 552.0));
        assert_close(fit.scale, 504.0, 1e-9);
        assert_close(fit.points[1].y, 48.0, 1e-9);
    }

    #[test]
    fn fill_height_anchor_on_wide_viewport() {
        let points = [Point::new(0.0, 0.0), Point::new(0.0, 2.0)];
        let viewport = Viewport::new(400.0, 1000.0).with_padding(0.1);

        let fill = fit_start_bottom_center_fill_height(&points, &viewport);
        assert_eq!(fill.anchor, Point::new(200.0, 900.0));
        assert_eq!(fill.points[0], fill.anchor);
        assert_close(fill.scale, 400.0, 1e-9);

        let fit = fit_start_bottom_center(&points, &viewport);
        assert_eq!(fit.anchor, Point::new(200.0, 960.0));
    }

    #[test]
    fn fill_height_defaults_to_screen_down() {
        let fit = fit_start_bottom_center_fill_height(&vertical_pair(), &Viewport::default());
        assert_close(fit.points[1].y, fit.anchor.y + fit.scale, 1e-9);
    }

    #[test]
    fn fill_height_ignores_lateral_extent() {
        let points = [Point::new(0.0, 0.0), Point::new(5.0, 1.0)];
        let viewport = Viewport::new(1000.0, 600.0).with_forward(ForwardDirection::ScreenUp);
        let fit = fit_start_bottom_center_fill_height(&points, &viewport);

        assert_close(fit.scale, 504.0, 1e-9);
        assert_close(fit.points[1].y, 48.0, 1e-9);
        assert!(fit.points[1].x > 1000.0);
        assert_close(fit.world_width, 5.0, 1e-12);
        assert_close(fit.world_height, 1.0, 1e-12);
    }
}
