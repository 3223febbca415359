//! Hexagon decomposition: six triangular wedges from one square face.
//!
//! ```text
//!            v4 ______ v5
//!              /\    /\
//!             /  \  /  \
//!         v3 /____\/____\ v0      wedge k+1 = (v[k], v[k+1], center)
//!            \    /\    /
//!             \  /  \  /          wedge 1 = (v0, v1, c)  lower right
//!              \/____\/           wedge 2 = (v1, v2, c)  bottom
//!            v2        v1         ...
//! ```
//!
//! Vertex k sits at 60·k degrees from the center. With y pointing down
//! that walks clockwise on screen, starting at the rightmost vertex.

use image::{Rgba, RgbaImage};
use log::debug;

use crate::error::{FlexagonError, Result};
use crate::geometry::Point;
use crate::lines::{draw_dashed_line, draw_polygon_outline, DashStyle};
use crate::raster::Coverage;

/// Number of wedges (and vertices) in a hexagon.
pub const WEDGES_PER_FACE: usize = 6;

/// Colours and stroke widths for the printed guides.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GuideStyle {
    /// Colour of every guide line.
    pub color: Rgba<u8>,
    /// Stroke width of the hexagon outline.
    pub outline_width: f32,
    /// Dash pattern of the center-to-vertex fold lines.
    pub fold: DashStyle,
    /// Stroke width of the template's solid cut lines.
    pub cut_width: f32,
}

impl Default for GuideStyle {
    fn default() -> Self {
        Self {
            color: Rgba([128, 128, 128, 255]),
            outline_width: 2.0,
            fold: DashStyle::default(),
            cut_width: 3.0,
        }
    }
}

/// The regular hexagon inscribed in a square face.
#[derive(Clone, Debug, PartialEq)]
pub struct Hexagon {
    pub center: Point,
    pub radius: f64,
    pub vertices: [Point; WEDGES_PER_FACE],
}

impl Hexagon {
    /// Hexagon for a face of side `edge`.
    ///
    /// Center and radius use integer halves of the edge, so odd sizes
    /// round down exactly like the pixel grid does.
    pub fn inscribed(edge: u32) -> Self {
        let half = (edge / 2) as f64;
        let center = Point::new(half, half);
        let vertices = std::array::from_fn(|k| center.polar_offset(half, 60.0 * k as f64));
        Self {
            center,
            radius: half,
            vertices,
        }
    }

    /// Corners of wedge `i` (0-based): two adjacent vertices and the center.
    pub fn triangle(&self, i: usize) -> [Point; 3] {
        [
            self.vertices[i % WEDGES_PER_FACE],
            self.vertices[(i + 1) % WEDGES_PER_FACE],
            self.center,
        ]
    }
}

/// One triangular slice of a face.
#[derive(Clone, Debug)]
pub struct Wedge {
    /// 1-based wedge number within its face.
    pub index: u8,
    /// Top-left of the crop box in face coordinates.
    pub origin: (u32, u32),
    /// Masked pixels, transparent outside the triangle.
    pub image: RgbaImage,
}

/// Draw the hexagon outline and the dashed center-to-vertex fold lines.
pub fn draw_guides(image: &mut RgbaImage, hexagon: &Hexagon, style: &GuideStyle) {
    draw_polygon_outline(image, &hexagon.vertices, style.outline_width, style.color);
    for vertex in hexagon.vertices {
        draw_dashed_line(image, hexagon.center, vertex, &style.fold, style.color);
    }
}

/// Cut `image` into the six wedges of `hexagon`.
///
/// Each wedge copies exactly the pixels under its triangle mask into an
/// otherwise transparent image, cropped to the mask's bounding box.
pub fn extract_wedges(image: &RgbaImage, hexagon: &Hexagon) -> Result<[Wedge; WEDGES_PER_FACE]> {
    let (width, height) = image.dimensions();
    let mut wedges = Vec::with_capacity(WEDGES_PER_FACE);

    for i in 0..WEDGES_PER_FACE {
        let index = (i + 1) as u8;
        let empty = || FlexagonError::DegenerateGeometry(format!("wedge {} has an empty mask", index));

        let mask = Coverage::polygon(width, height, &hexagon.triangle(i)).ok_or_else(empty)?;
        let bounds = mask.bounds().ok_or_else(empty)?;

        // Copy straight into the cropped buffer; pixels outside the mask
        // stay (0, 0, 0, 0).
        let wedge_image = RgbaImage::from_fn(bounds.width(), bounds.height(), |x, y| {
            let (sx, sy) = (bounds.left + x, bounds.top + y);
            if mask.get(sx, sy) != 0 {
                *image.get_pixel(sx, sy)
            } else {
                Rgba([0, 0, 0, 0])
            }
        });

        wedges.push(Wedge {
            index,
            origin: (bounds.left, bounds.top),
            image: wedge_image,
        });
    }

    wedges
        .try_into()
        .map_err(|_| FlexagonError::DegenerateGeometry("hexagon did not yield six wedges".to_string()))
}

/// Annotate a square face with its guides and cut it into six wedges.
///
/// ## Rust Lesson #12: &mut borrows
///
/// The face is borrowed mutably because the guides are drawn onto it
/// before slicing, so they end up printed on the wedges. Nobody else can
/// touch the buffer while that borrow is live.
pub fn decompose(image: &mut RgbaImage, style: &GuideStyle) -> Result<[Wedge; WEDGES_PER_FACE]> {
    let (width, height) = image.dimensions();
    if width != height {
        return Err(FlexagonError::InvalidInput(format!(
            "face must be square, got {}x{}",
            width, height
        )));
    }

    let hexagon = Hexagon::inscribed(width);
    draw_guides(image, &hexagon, style);
    let wedges = extract_wedges(image, &hexagon)?;

    debug!(
        "decomposed {}x{} face into wedges {:?}",
        width,
        height,
        wedges.iter().map(|w| w.image.dimensions()).collect::<Vec<_>>()
    );
    Ok(wedges)
}
