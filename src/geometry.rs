//! Zoom geometry: translate and scale computation.
//!
//! Pure functions over CSS-pixel rectangles. Everything is computed from the
//! element's bounding rectangle and the viewport center; nothing here touches
//! the host.
//!
//! # Example
//!
//! ```
//! use zenzoom::{Rect, Vec2, compute_scale, compute_translate};
//!
//! let rect = Rect::new(100.0, 100.0, 200.0, 100.0);
//! let center = Vec2::new(500.0, 300.0);
//!
//! assert_eq!(compute_translate(rect, center), Vec2::new(150.0, 150.0));
//! assert_eq!(compute_scale(rect, center, 1.0, None).unwrap(), Vec2::splat(5.0));
//! ```

use thiserror::Error;

/// Halve a dimension.
#[inline]
pub fn half(v: f64) -> f64 {
    v / 2.0
}

/// A 2D vector. Used for translate offsets, per-axis scale factors and points.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Same value on both axes.
    pub const fn splat(v: f64) -> Self {
        Self { x: v, y: v }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl core::ops::Add for Vec2 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl core::ops::Sub for Vec2 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Width and height in CSS pixels.
#[derive(Copy, Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// A bounding rectangle in viewport coordinates.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.left + half(self.width), self.top + half(self.height))
    }

    /// True when the rectangle has a finite, strictly positive area.
    pub fn has_area(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

/// Geometry that cannot be turned into a visible transform.
#[derive(Copy, Clone, Debug, PartialEq, Error)]
pub enum GeometryError {
    /// The element has no usable area (not laid out, hidden, or collapsed).
    #[error("element rectangle {width}x{height} has no area")]
    DegenerateRect { width: f64, height: f64 },
    /// The computed scale is not a finite positive number.
    #[error("computed scale ({x}, {y}) is not finite and positive")]
    DegenerateScale { x: f64, y: f64 },
}

/// Vector that moves the center of `rect` onto `center`.
pub fn compute_translate(rect: Rect, center: Vec2) -> Vec2 {
    center - rect.center()
}

/// Scale factors that enlarge `rect` when zoomed.
///
/// With `custom_size`, each axis scales independently to reach that size.
/// Otherwise the scale is uniform: `scale_base` plus the smaller of the two
/// ratios of (viewport half-extent minus half the rect dimension) to half the
/// rect dimension, so the enlarged rect reaches the nearer viewport edge
/// before the base is added.
pub fn compute_scale(
    rect: Rect,
    center: Vec2,
    scale_base: f64,
    custom_size: Option<Size>,
) -> Result<Vec2, GeometryError> {
    if !rect.has_area() {
        return Err(GeometryError::DegenerateRect {
            width: rect.width,
            height: rect.height,
        });
    }

    let scale = match custom_size {
        Some(size) => Vec2::new(size.width / rect.width, size.height / rect.height),
        None => {
            let half_w = half(rect.width);
            let half_h = half(rect.height);
            let horizontal = (center.x - half_w) / half_w;
            let vertical = (center.y - half_h) / half_h;
            Vec2::splat(scale_base + horizontal.min(vertical))
        }
    };

    if !scale.is_finite() || scale.x <= 0.0 || scale.y <= 0.0 {
        return Err(GeometryError::DegenerateScale {
            x: scale.x,
            y: scale.y,
        });
    }
    Ok(scale)
}

/// Everything computed for one zoom-in.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ZoomGeometry {
    /// Inline bounding rectangle at the time of zoom-in.
    pub rect: Rect,
    /// Viewport center at the time of zoom-in.
    pub center: Vec2,
    pub translate: Vec2,
    pub scale: Vec2,
}

impl ZoomGeometry {
    /// Compute the full zoom geometry for `rect`.
    pub fn compute(
        rect: Rect,
        center: Vec2,
        scale_base: f64,
        custom_size: Option<Size>,
    ) -> Result<Self, GeometryError> {
        let scale = compute_scale(rect, center, scale_base, custom_size)?;
        Ok(Self {
            rect,
            center,
            translate: compute_translate(rect, center),
            scale,
        })
    }

    /// On-screen rectangle once the transform is applied.
    ///
    /// The transform origin is the element center, so the rect grows around
    /// its own center and is then translated.
    pub fn zoomed_rect(&self) -> Rect {
        let c = self.rect.center() + self.translate;
        let w = self.rect.width * self.scale.x;
        let h = self.rect.height * self.scale.y;
        Rect::new(c.x - half(w), c.y - half(h), w, h)
    }

    /// Translate and scale while tracking a pointer at `pointer`.
    ///
    /// The offset between the viewport center and the pointer is added to
    /// the zoom translate; `scale_extra` is added to both scale axes.
    pub fn shifted(&self, center: Vec2, pointer: Vec2, scale_extra: f64) -> (Vec2, Vec2) {
        let offset = center - pointer;
        (
            self.translate + offset,
            Vec2::new(self.scale.x + scale_extra, self.scale.y + scale_extra),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── translate ───────────────────────────────────────────────────────

    #[test]
    fn translate_reference_example() {
        let rect = Rect::new(100.0, 100.0, 200.0, 100.0);
        // rect center (200, 150) → viewport center (500, 300)
        assert_eq!(
            compute_translate(rect, Vec2::new(500.0, 300.0)),
            Vec2::new(150.0, 150.0)
        );
    }

    #[test]
    fn translate_already_centered_is_zero() {
        let rect = Rect::new(400.0, 250.0, 200.0, 100.0);
        assert_eq!(compute_translate(rect, Vec2::new(500.0, 300.0)), Vec2::ZERO);
    }

    #[test]
    fn translate_can_be_negative() {
        let rect = Rect::new(800.0, 500.0, 100.0, 100.0);
        let t = compute_translate(rect, Vec2::new(500.0, 300.0));
        assert_eq!(t, Vec2::new(-350.0, -250.0));
    }

    // ── scale ───────────────────────────────────────────────────────────

    #[test]
    fn scale_reference_example() {
        let rect = Rect::new(100.0, 100.0, 200.0, 100.0);
        // 1 + min((500-100)/100, (300-50)/50) = 1 + min(4, 5) = 5
        let s = compute_scale(rect, Vec2::new(500.0, 300.0), 1.0, None).unwrap();
        assert_eq!(s, Vec2::splat(5.0));
    }

    #[test]
    fn scale_height_constrains() {
        // Tall element: vertical ratio is the smaller one.
        let rect = Rect::new(0.0, 0.0, 100.0, 400.0);
        // horizontal (500-50)/50 = 9, vertical (300-200)/200 = 0.5
        let s = compute_scale(rect, Vec2::new(500.0, 300.0), 1.0, None).unwrap();
        assert_eq!(s, Vec2::splat(1.5));
    }

    #[test]
    fn scale_base_one_reaches_nearer_edge() {
        let rect = Rect::new(0.0, 0.0, 100.0, 400.0);
        let center = Vec2::new(500.0, 300.0);
        let g = ZoomGeometry::compute(rect, center, 1.0, None).unwrap();
        let z = g.zoomed_rect();
        // Vertical constrains: enlarged height is exactly the viewport height.
        assert!((z.height - 600.0).abs() < 1e-9);
        assert!(z.width <= 1000.0);
    }

    #[test]
    fn scale_custom_size_is_per_axis() {
        let rect = Rect::new(10.0, 10.0, 200.0, 100.0);
        let s = compute_scale(
            rect,
            Vec2::new(500.0, 300.0),
            1.0,
            Some(Size::new(800.0, 600.0)),
        )
        .unwrap();
        assert_eq!(s, Vec2::new(4.0, 6.0));
    }

    #[test]
    fn scale_custom_size_ignores_base() {
        let rect = Rect::new(0.0, 0.0, 100.0, 100.0);
        let a = compute_scale(rect, Vec2::ZERO, 1.0, Some(Size::new(300.0, 300.0))).unwrap();
        let b = compute_scale(rect, Vec2::ZERO, 7.0, Some(Size::new(300.0, 300.0))).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn scale_rejects_zero_width() {
        let rect = Rect::new(10.0, 10.0, 0.0, 100.0);
        assert_eq!(
            compute_scale(rect, Vec2::new(500.0, 300.0), 1.0, None),
            Err(GeometryError::DegenerateRect {
                width: 0.0,
                height: 100.0
            })
        );
    }

    #[test]
    fn scale_rejects_nan_height() {
        let rect = Rect::new(10.0, 10.0, 100.0, f64::NAN);
        assert!(matches!(
            compute_scale(rect, Vec2::new(500.0, 300.0), 1.0, None),
            Err(GeometryError::DegenerateRect { .. })
        ));
    }

    #[test]
    fn scale_rejects_zero_custom_size() {
        let rect = Rect::new(0.0, 0.0, 100.0, 100.0);
        assert!(matches!(
            compute_scale(rect, Vec2::ZERO, 1.0, Some(Size::new(0.0, 100.0))),
            Err(GeometryError::DegenerateScale { .. })
        ));
    }

    #[test]
    fn scale_rejects_collapsed_viewport() {
        // A zero-sized viewport drives the uniform scale to zero.
        let rect = Rect::new(0.0, 0.0, 100.0, 100.0);
        assert!(matches!(
            compute_scale(rect, Vec2::ZERO, 1.0, None),
            Err(GeometryError::DegenerateScale { .. })
        ));
    }

    // ── zoom geometry ───────────────────────────────────────────────────

    #[test]
    fn zoomed_rect_is_centered_on_viewport() {
        let g = ZoomGeometry::compute(
            Rect::new(100.0, 100.0, 200.0, 100.0),
            Vec2::new(500.0, 300.0),
            1.0,
            None,
        )
        .unwrap();
        let z = g.zoomed_rect();
        assert_eq!(z.center(), Vec2::new(500.0, 300.0));
        assert_eq!(z.size(), Size::new(1000.0, 500.0));
    }

    #[test]
    fn shifted_adds_pointer_offset_and_extra_scale() {
        let g = ZoomGeometry::compute(
            Rect::new(100.0, 100.0, 200.0, 100.0),
            Vec2::new(500.0, 300.0),
            1.0,
            None,
        )
        .unwrap();
        let (t, s) = g.shifted(Vec2::new(500.0, 300.0), Vec2::new(450.0, 320.0), 0.5);
        assert_eq!(t, Vec2::new(200.0, 130.0));
        assert_eq!(s, Vec2::splat(5.5));
    }

    #[test]
    fn error_messages_name_the_problem() {
        let e = GeometryError::DegenerateRect {
            width: 0.0,
            height: 5.0,
        };
        assert_eq!(e.to_string(), "element rectangle 0x5 has no area");
    }
}
