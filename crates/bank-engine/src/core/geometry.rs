use glam::Vec2;
use serde::Serialize;

/// Axis-aligned rectangle in viewport space (y-up).
/// `min` is the bottom-left corner, `max` the top-right corner.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Build a rect from two opposite corners given in any order.
    pub fn from_corners(a: Vec2, b: Vec2) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    /// Whether either side has no positive length.
    pub fn is_empty(&self) -> bool {
        !(self.width() > 0.0 && self.height() > 0.0)
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    /// Length of the shorter side.
    pub fn shorter_side(&self) -> f32 {
        self.width().min(self.height())
    }

    pub fn bottom_left(&self) -> Vec2 {
        self.min
    }

    pub fn bottom_right(&self) -> Vec2 {
        Vec2::new(self.max.x, self.min.y)
    }

    pub fn top_left(&self) -> Vec2 {
        Vec2::new(self.min.x, self.max.y)
    }

    pub fn top_right(&self) -> Vec2 {
        self.max
    }

    /// Shrink uniformly by `amount` on every side.
    /// An axis that would invert collapses onto its center line instead.
    pub fn inset(&self, amount: f32) -> Self {
        let amount = if amount.is_finite() { amount.max(0.0) } else { 0.0 };
        let lo = self.min + Vec2::splat(amount);
        let hi = self.max - Vec2::splat(amount);
        let center = self.center();
        let min = Vec2::new(
            if lo.x > hi.x { center.x } else { lo.x },
            if lo.y > hi.y { center.y } else { lo.y },
        );
        let max = Vec2::new(
            if lo.x > hi.x { center.x } else { hi.x },
            if lo.y > hi.y { center.y } else { hi.y },
        );
        Self { min, max }
    }

    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }

    /// Whether `other` lies entirely inside this rect (edges inclusive).
    pub fn contains_rect(&self, other: &Rect) -> bool {
        self.contains(other.min) && self.contains(other.max)
    }

    /// Nearest point inside the rect.
    pub fn clamp_point(&self, point: Vec2) -> Vec2 {
        point.clamp(self.min, self.max)
    }

    /// Map a normalized `[0,1]²` coordinate into this rect.
    /// Endpoints map exactly onto the rect edges.
    pub fn denormalize(&self, normalized: Vec2) -> Vec2 {
        let n = normalized.clamp(Vec2::ZERO, Vec2::ONE);
        let p = self.min * (Vec2::ONE - n) + self.max * n;
        self.clamp_point(p)
    }

    /// Map a point in this rect to normalized coordinates.
    /// A zero-sized axis maps to 0.5.
    pub fn normalize(&self, point: Vec2) -> Vec2 {
        let size = self.size();
        let axis = |value: f32, min: f32, extent: f32| {
            if extent.abs() < f32::EPSILON {
                0.5
            } else {
                (value - min) / extent
            }
        };
        Vec2::new(
            axis(point.x, self.min.x, size.x),
            axis(point.y, self.min.y, size.y),
        )
    }
}

/// Fit an image of the given aspect ratio (width / height) into the viewport.
/// The result is centered and as large as possible without distortion.
/// A bad aspect falls back to the viewport's own; an empty viewport yields an empty rect.
pub fn aspect_fit(aspect: f32, viewport: Vec2) -> Rect {
    if !(viewport.x.is_finite() && viewport.y.is_finite()) || viewport.x <= 0.0 || viewport.y <= 0.0 {
        return Rect::default();
    }
    let aspect = if aspect.is_finite() && aspect > 0.0 {
        aspect
    } else {
        viewport.x / viewport.y
    };

    let image = Vec2::new(aspect, 1.0);
    let horiz_ratio = viewport.x / image.x;
    let vert_ratio = viewport.y / image.y;
    let scale = horiz_ratio.min(vert_ratio);
    let size = (image * scale).min(viewport);
    let origin = (viewport - size) * 0.5;
    Rect::new(origin, origin + size)
}

/// Mirror `point` across the infinite line through `a` and `b`.
/// Returns None when `a` and `b` coincide (squared length below `epsilon`).
pub fn reflect_across_line(point: Vec2, a: Vec2, b: Vec2, epsilon: f32) -> Option<Vec2> {
    let line = b - a;
    let len_sq = line.length_squared();
    if len_sq < epsilon {
        return None;
    }
    let t = (point - a).dot(line) / len_sq;
    let foot = a + line * t;
    Some(foot * 2.0 - point)
}

/// Intersect the ray from `origin` through `through` with the finite segment `p0`–`p1`.
///
/// Solves `origin + t·(through − origin) = p0 + u·(p1 − p0)` with the 2×2
/// cross-product determinant. Returns None when the ray and the segment are
/// parallel (`|det| < epsilon`), when the hit falls outside the segment
/// (`u ∉ [0,1]`), or when it lies behind the origin (`t < 0`).
pub fn ray_segment_intersection(
    origin: Vec2,
    through: Vec2,
    p0: Vec2,
    p1: Vec2,
    epsilon: f32,
) -> Option<Vec2> {
    let r = through - origin;
    let s = p1 - p0;
    let det = r.perp_dot(s);
    if det.abs() < epsilon {
        return None;
    }
    let q = p0 - origin;
    let t = q.perp_dot(s) / det;
    let u = q.perp_dot(r) / det;
    if t < 0.0 || !(0.0..=1.0).contains(&u) {
        return None;
    }
    Some(p0 + s * u)
}

/// Perpendicular distance from `point` to segment `p1`-`p2`, or None when the
/// point projects outside the segment or the segment is degenerate.
pub fn distance_within_segment(p1: Vec2, p2: Vec2, point: Vec2) -> Option<f32> {
    let line = p2 - p1;
    let len_sq = line.length_squared();
    if len_sq < 0.0001 {
        return None;
    }
    let t = (point - p1).dot(line) / len_sq;
    if !(0.0..=1.0).contains(&t) {
        return None;
    }
    Some((p1 + line * t).distance(point))
}
