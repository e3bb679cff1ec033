//! Core geometry types for placing a figure on a canvas.
//!
//! ## Rust Lesson #3: Structs & Derives
//!
//! The `#[derive(...)]` macro auto-generates common functionality:
//! - `Debug` = lets you print with `{:?}`
//! - `Clone` / `Copy` = small stack values can be duplicated implicitly
//! - `PartialEq` = can compare with `==`

/// A 2D point with x,y coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned bounding box in figure coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    /// Half-extent given to an axis whose samples are all equal.
    pub const DEGENERATE_HALF_EXTENT: f64 = 1.0;

    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self { min_x, min_y, max_x, max_y }
    }

    /// Bounding box of a set of points.
    ///
    /// Returns `None` for an empty set, and for sets where no coordinate is
    /// finite on some axis.
    pub fn of<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = Point>,
    {
        let mut bounds: Option<Bounds> = None;
        for p in points {
            if !p.x.is_finite() || !p.y.is_finite() {
                continue;
            }
            bounds = Some(match bounds {
                None => Bounds::new(p.x, p.y, p.x, p.y),
                Some(b) => Bounds::new(
                    b.min_x.min(p.x),
                    b.min_y.min(p.y),
                    b.max_x.max(p.x),
                    b.max_y.max(p.y),
                ),
            });
        }
        bounds
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    #[inline]
    pub fn center(&self) -> Point {
        Point::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    /// Widen any zero-extent axis to `DEGENERATE_HALF_EXTENT` around its center.
    ///
    /// A figure with `freq_x = 0` is a vertical segment; without this the
    /// viewport scale for x would divide by zero.
    pub fn non_degenerate(self) -> Self {
        let c = self.center();
        let (min_x, max_x) = if self.width() > 0.0 {
            (self.min_x, self.max_x)
        } else {
            (c.x - Self::DEGENERATE_HALF_EXTENT, c.x + Self::DEGENERATE_HALF_EXTENT)
        };
        let (min_y, max_y) = if self.height() > 0.0 {
            (self.min_y, self.max_y)
        } else {
            (c.y - Self::DEGENERATE_HALF_EXTENT, c.y + Self::DEGENERATE_HALF_EXTENT)
        };
        Bounds::new(min_x, min_y, max_x, max_y)
    }

    /// Grow each axis by `fraction` of its extent on both sides.
    pub fn with_margin(self, fraction: f64) -> Self {
        let dx = self.width() * fraction;
        let dy = self.height() * fraction;
        Bounds::new(self.min_x - dx, self.min_y - dy, self.max_x + dx, self.max_y + dy)
    }
}

/// Maps figure coordinates onto a pixel canvas.
///
/// Each axis is stretched independently to fill the canvas (no aspect lock),
/// and y is flipped so that larger y values are drawn higher up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    bounds: Bounds,
    width: f64,
    height: f64,
}

impl Viewport {
    /// Build a viewport for `bounds` on a `width` x `height` canvas.
    ///
    /// Degenerate bounds are widened first, so `map` is always finite for
    /// finite input.
    pub fn fit(bounds: Bounds, width: f64, height: f64) -> Self {
        Self {
            bounds: bounds.non_degenerate(),
            width,
            height,
        }
    }

    #[inline]
    pub fn map(&self, p: Point) -> Point {
        let b = &self.bounds;
        let sx = self.width / b.width();
        let sy = self.height / b.height();
        Point::new((p.x - b.min_x) * sx, self.height - (p.y - b.min_y) * sy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_of_points() {
        let b = Bounds::of([
            Point::new(0.0, 0.0),
            Point::new(10.0, -2.0),
            Point::new(4.0, 5.0),
        ]);
        assert_eq!(b, Some(Bounds::new(0.0, -2.0, 10.0, 5.0)));
    }

    #[test]
    fn bounds_of_nothing() {
        assert_eq!(Bounds::of(Vec::new()), None);
    }

    #[test]
    fn bounds_skip_non_finite() {
        let b = Bounds::of([Point::new(f64::NAN, 1.0), Point::new(2.0, 3.0)]);
        assert_eq!(b, Some(Bounds::new(2.0, 3.0, 2.0, 3.0)));
    }

    #[test]
    fn degenerate_axis_is_widened() {
        let b = Bounds::new(0.5, -1.0, 0.5, 1.0).non_degenerate();
        assert_eq!(b.min_x, -0.5);
        assert_eq!(b.max_x, 1.5);
        assert_eq!(b.min_y, -1.0);
        assert_eq!(b.max_y, 1.0);
    }

    #[test]
    fn margin_grows_both_sides() {
        let b = Bounds::new(-1.0, -1.0, 1.0, 1.0).with_margin(0.05);
        assert!((b.min_x + 1.1).abs() < 1e-12);
        assert!((b.max_y - 1.1).abs() < 1e-12);
    }

    #[test]
    fn viewport_maps_corners_and_flips_y() {
        let vp = Viewport::fit(Bounds::new(-1.0, -1.0, 1.0, 1.0), 400.0, 300.0);

        let bottom_left = vp.map(Point::new(-1.0, -1.0));
        assert_eq!(bottom_left, Point::new(0.0, 300.0));

        let top_right = vp.map(Point::new(1.0, 1.0));
        assert_eq!(top_right, Point::new(400.0, 0.0));

        let center = vp.map(Point::new(0.0, 0.0));
        assert_eq!(center, Point::new(200.0, 150.0));
    }

    #[test]
    fn viewport_on_vertical_segment_stays_finite() {
        let vp = Viewport::fit(Bounds::new(0.0, -1.0, 0.0, 1.0), 100.0, 100.0);
        let p = vp.map(Point::new(0.0, 0.0));
        assert!(p.x.is_finite() && p.y.is_finite());
        assert_eq!(p.x, 50.0);
    }
}
