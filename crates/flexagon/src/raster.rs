//! Raster coverage: turning polygons and strokes into pixel masks.
//!
//! tiny-skia does the scan conversion. We render opaque black into a
//! scratch `Pixmap` with anti-aliasing OFF and keep only the alpha
//! channel, which gives a binary (0 / 255) coverage mask. Everything
//! downstream (wedge masks, guide lines) works from that mask, so the
//! RGBA images themselves never round-trip through premultiplied alpha.

use image::{Rgba, RgbaImage};
use tiny_skia::{FillRule, Paint, Path, PathBuilder, Pixmap, Stroke, Transform};

use crate::geometry::Point;

/// An axis-aligned pixel rectangle with exclusive right/bottom edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelBounds {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

impl PixelBounds {
    #[inline]
    pub fn width(&self) -> u32 {
        self.right - self.left
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.bottom - self.top
    }
}

/// Per-pixel coverage (0 = untouched, 255 = covered) at image resolution.
#[derive(Debug, Clone)]
pub struct Coverage {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Coverage {
    /// Rasterize the interior of a closed polygon.
    ///
    /// Returns `None` when the target has a zero dimension or the polygon
    /// has fewer than three points.
    pub fn polygon(width: u32, height: u32, points: &[Point]) -> Option<Self> {
        if points.len() < 3 {
            return None;
        }
        let path = build_path(&[points], true)?;
        let mut pixmap = Pixmap::new(width, height)?;
        pixmap.fill_path(
            &path,
            &solid_paint(),
            FillRule::Winding,
            Transform::identity(),
            None,
        );
        Some(Self::from_pixmap(&pixmap))
    }

    /// Rasterize a set of polylines stroked at `stroke_width` with butt caps.
    ///
    /// Each polyline is its own subpath, so dashes in one call stay
    /// separate. Zero-length polylines contribute nothing.
    pub fn strokes(
        width: u32,
        height: u32,
        polylines: &[&[Point]],
        closed: bool,
        stroke_width: f32,
    ) -> Option<Self> {
        let path = build_path(polylines, closed)?;
        let mut pixmap = Pixmap::new(width, height)?;
        let stroke = Stroke {
            width: stroke_width,
            ..Stroke::default()
        };
        pixmap.stroke_path(&path, &solid_paint(), &stroke, Transform::identity(), None);
        Some(Self::from_pixmap(&pixmap))
    }

    fn from_pixmap(pixmap: &Pixmap) -> Self {
        // Opaque black premultiplied is (0, 0, 0, a); alpha is the coverage.
        let data = pixmap.data().chunks_exact(4).map(|px| px[3]).collect();
        Self {
            width: pixmap.width(),
            height: pixmap.height(),
            data,
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Coverage at (x, y). Out-of-range coordinates read as 0.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> u8 {
        if x >= self.width || y >= self.height {
            return 0;
        }
        self.data[(y as usize) * (self.width as usize) + x as usize]
    }

    /// Number of covered pixels.
    pub fn covered(&self) -> usize {
        self.data.iter().filter(|&&c| c != 0).count()
    }

    /// Tight bounds of the covered pixels, or `None` if nothing is covered.
    pub fn bounds(&self) -> Option<PixelBounds> {
        bounds_where(self.width, self.height, |x, y| self.get(x, y) != 0)
    }
}

/// Tight bounds of the pixels for which `hit` is true.
///
/// Shared by mask cropping and the transparent-pixel trim so both agree
/// on what "bounding box" means.
pub fn bounds_where<F>(width: u32, height: u32, hit: F) -> Option<PixelBounds>
where
    F: Fn(u32, u32) -> bool,
{
    let mut left = u32::MAX;
    let mut top = u32::MAX;
    let mut right = 0;
    let mut bottom = 0;

    for y in 0..height {
        for x in 0..width {
            if hit(x, y) {
                left = left.min(x);
                top = top.min(y);
                right = right.max(x + 1);
                bottom = bottom.max(y + 1);
            }
        }
    }

    if left == u32::MAX {
        None
    } else {
        Some(PixelBounds { left, top, right, bottom })
    }
}

/// Composite `color` over `image` wherever `coverage` is set.
///
/// Coverage and image must be the same size; extra pixels on either side
/// are ignored.
pub fn paint(image: &mut RgbaImage, coverage: &Coverage, color: Rgba<u8>) {
    let width = image.width().min(coverage.width());
    let height = image.height().min(coverage.height());

    for y in 0..height {
        for x in 0..width {
            let c = coverage.get(x, y);
            if c == 0 {
                continue;
            }
            let alpha = (c as u32 * color[3] as u32 + 127) / 255;
            let pixel = image.get_pixel_mut(x, y);
            *pixel = blend(*pixel, color, alpha);
        }
    }
}

/// Source-over blend of `top` with effective alpha `alpha` (0..=255).
#[inline]
fn blend(bottom: Rgba<u8>, top: Rgba<u8>, alpha: u32) -> Rgba<u8> {
    if alpha >= 255 {
        return Rgba([top[0], top[1], top[2], 255]);
    }
    let inv = 255 - alpha;
    let mix = |t: u8, b: u8| ((t as u32 * alpha + b as u32 * inv + 127) / 255) as u8;
    let out_alpha = alpha + (bottom[3] as u32 * inv + 127) / 255;
    Rgba([
        mix(top[0], bottom[0]),
        mix(top[1], bottom[1]),
        mix(top[2], bottom[2]),
        out_alpha.min(255) as u8,
    ])
}

fn solid_paint() -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color_rgba8(0, 0, 0, 255);
    paint.anti_alias = false;
    paint
}

fn build_path(polylines: &[&[Point]], closed: bool) -> Option<Path> {
    let mut pb = PathBuilder::new();

    for points in polylines {
        let Some((first, rest)) = points.split_first() else {
            continue;
        };
        if rest.is_empty() {
            continue;
        }
        pb.move_to(first.x as f32, first.y as f32);
        for p in rest {
            pb.line_to(p.x as f32, p.y as f32);
        }
        if closed {
            pb.close();
        }
    }

    pb.finish()
}
