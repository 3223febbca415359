//! Template assembly: three faces in, one printable strip out.
//!
//! Pipeline:
//! 1. Load each source, fit it to a `W`×`W` square, cut it into wedges.
//! 2. Allocate the white canvas.
//! 3. Paste the wedges row by row, in table order, each one rotated and
//!    trimmed first.
//! 4. Draw the three solid cut lines that close the silhouette.
//!
//! Nothing touches the disk until [`Template::save`], so a failure at any
//! earlier step leaves no output behind.

use std::collections::BTreeMap;
use std::path::Path;

use image::{imageops, imageops::FilterType, DynamicImage, GenericImageView, Rgba, RgbaImage};
use log::{debug, info};

use crate::error::{FlexagonError, Result};
use crate::geometry::Point;
use crate::hexagon::{decompose, GuideStyle, Wedge};
use crate::layout::{rows, WedgeId, FACES};
use crate::lines::draw_line;
use crate::normalize::rotate_and_crop;

/// Face edge length used when none is given.
pub const DEFAULT_FACE_WIDTH: u32 = 500;

/// Smallest source width/height that is accepted.
pub const MIN_SOURCE_SIDE: u32 = 2;

/// Knobs for building a template.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TemplateConfig {
    /// Edge length, in pixels, each face is fitted to before slicing.
    pub face_width: u32,
    /// Look of the fold and cut guides.
    pub guides: GuideStyle,
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self {
            face_width: DEFAULT_FACE_WIDTH,
            guides: GuideStyle::default(),
        }
    }
}

impl TemplateConfig {
    pub fn with_face_width(mut self, face_width: u32) -> Self {
        self.face_width = face_width;
        self
    }

    pub fn with_guides(mut self, guides: GuideStyle) -> Self {
        self.guides = guides;
        self
    }

    /// Reject settings no template can be built from.
    pub fn validate(&self) -> Result<()> {
        if self.face_width == 0 {
            return Err(FlexagonError::InvalidInput(
                "face width must be a positive number of pixels".to_string(),
            ));
        }
        Ok(())
    }
}

/// Where one wedge ended up on the canvas.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlacedWedge {
    pub id: WedgeId,
    pub rotation: f64,
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// A finished template: the canvas plus a record of every paste.
#[derive(Clone, Debug)]
pub struct Template {
    face_width: u32,
    canvas: RgbaImage,
    placements: Vec<PlacedWedge>,
}

impl Template {
    pub fn face_width(&self) -> u32 {
        self.face_width
    }

    pub fn canvas(&self) -> &RgbaImage {
        &self.canvas
    }

    pub fn placements(&self) -> &[PlacedWedge] {
        &self.placements
    }

    /// Write the canvas; the format follows the path's extension.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        self.canvas
            .save(path)
            .map_err(|source| FlexagonError::Write {
                path: path.to_path_buf(),
                source,
            })?;
        info!("wrote {}x{} template to {}", self.canvas.width(), self.canvas.height(), path.display());
        Ok(())
    }
}

/// Canvas size for faces of edge `face_width`: ⌊5.5·W/2⌋ × ⌊√3·W/2⌋.
///
/// The strip is five and a half triangle sides long and two triangle
/// heights tall, with a triangle side of W/2.
pub fn canvas_size(face_width: u32) -> (u32, u32) {
    let w = face_width as f64;
    let width = 5.5 * w / 2.0;
    let height = 2.0 * (0.5 * 3f64.sqrt() * w / 2.0);
    (width as u32, height as u32)
}

/// Center-crop `image` to a square, then scale it to `edge`×`edge`.
///
/// Excess is discarded rather than stretched, so faces keep their
/// proportions.
pub fn fit_square(image: &DynamicImage, edge: u32) -> RgbaImage {
    let (w, h) = image.dimensions();
    let side = w.min(h);
    let square = image.crop_imm((w - side) / 2, (h - side) / 2, side, side);
    square.resize_exact(edge, edge, FilterType::Lanczos3).to_rgba8()
}

/// Open one source image and fit it to an `edge`-sized face.
pub fn load_face<P: AsRef<Path>>(path: P, edge: u32) -> Result<RgbaImage> {
    let path = path.as_ref();
    let image = image::open(path).map_err(|source| FlexagonError::Decode {
        path: path.to_path_buf(),
        source,
    })?;

    let (w, h) = image.dimensions();
    if w < MIN_SOURCE_SIDE || h < MIN_SOURCE_SIDE {
        return Err(FlexagonError::InvalidInput(format!(
            "{} is {}x{}, need at least {}x{}",
            path.display(),
            w,
            h,
            MIN_SOURCE_SIDE,
            MIN_SOURCE_SIDE
        )));
    }

    debug!("loaded {} ({}x{})", path.display(), w, h);
    Ok(fit_square(&DynamicImage::ImageRgba8(image.into_rgba8()), edge))
}

/// Build a template from three image files.
///
/// Validates everything it can before decoding, then hands the fitted
/// faces to [`assemble`].
pub fn generate<P: AsRef<Path>>(paths: &[P], config: &TemplateConfig) -> Result<Template> {
    if paths.len() != FACES as usize {
        return Err(FlexagonError::InvalidInput(format!(
            "expected {} images, got {}",
            FACES,
            paths.len()
        )));
    }
    config.validate()?;

    let faces = paths
        .iter()
        .map(|p| load_face(p, config.face_width))
        .collect::<Result<Vec<_>>>()?;
    let faces: [RgbaImage; 3] = faces
        .try_into()
        .map_err(|_| FlexagonError::InvalidInput("expected three faces".to_string()))?;

    info!("loaded {} faces at {} px", FACES, config.face_width);
    assemble(faces, config)
}

/// Lay out the wedges of three fitted faces on a fresh canvas.
///
/// ## Rust Lesson #14: Moving out of a map
///
/// Wedges are *removed* from the store as they are pasted. If the table
/// ever named a wedge twice, the second `remove` would come back empty
/// and we fail loudly instead of printing a wrong strip.
pub fn assemble(faces: [RgbaImage; 3], config: &TemplateConfig) -> Result<Template> {
    config.validate()?;
    let edge = config.face_width;

    let mut store: BTreeMap<WedgeId, Wedge> = BTreeMap::new();
    for (face_index, mut face) in faces.into_iter().enumerate() {
        let face_no = (face_index + 1) as u8;
        if face.dimensions() != (edge, edge) {
            return Err(FlexagonError::InvalidInput(format!(
                "face {} is {}x{}, expected {}x{}",
                face_no,
                face.width(),
                face.height(),
                edge,
                edge
            )));
        }
        for wedge in decompose(&mut face, &config.guides)? {
            store.insert(WedgeId::new(face_no, wedge.index), wedge);
        }
    }

    let (width, height) = canvas_size(edge);
    info!("assembling {}x{} template", width, height);
    let mut canvas = RgbaImage::from_pixel(width, height, Rgba([255, 255, 255, 255]));

    let step = edge / 4;
    let starts = [(0, 0), (step, height / 2)];
    let mut placements = Vec::with_capacity(store.len());

    for (row, (x0, y)) in rows().into_iter().zip(starts) {
        let mut x = x0;
        for placement in row {
            let wedge = store.remove(&placement.id).ok_or_else(|| {
                FlexagonError::DegenerateGeometry(format!("{} is not available", placement.id))
            })?;

            let piece = rotate_and_crop(&wedge.image, placement.rotation);
            if piece.width() == 0 || piece.height() == 0 {
                return Err(FlexagonError::DegenerateGeometry(format!(
                    "{} is empty after rotating {}°",
                    placement.id, placement.rotation
                )));
            }

            imageops::overlay(&mut canvas, &piece, x as i64, y as i64);
            debug!(
                "placed {} at ({}, {}) rotated {}° size {}x{}",
                placement.id,
                x,
                y,
                placement.rotation,
                piece.width(),
                piece.height()
            );
            placements.push(PlacedWedge {
                id: placement.id,
                rotation: placement.rotation,
                x,
                y,
                width: piece.width(),
                height: piece.height(),
            });
            x += step;
        }
    }

    if !store.is_empty() {
        let left: Vec<String> = store.keys().map(|id| id.to_string()).collect();
        return Err(FlexagonError::DegenerateGeometry(format!(
            "layout left wedges unused: {}",
            left.join(", ")
        )));
    }

    draw_cut_lines(&mut canvas, edge, &config.guides);

    Ok(Template {
        face_width: edge,
        canvas,
        placements,
    })
}

/// The two end-cap diagonals and the bottom edge of the last cap.
fn draw_cut_lines(canvas: &mut RgbaImage, edge: u32, style: &GuideStyle) {
    let w = edge as f64;
    let height = canvas.height();
    let (mid, bottom) = ((height / 2) as f64, height as f64);
    let strip_end = (5.5 * w / 2.0).floor();

    let cuts = [
        (Point::new(0.0, mid), Point::new((edge / 4) as f64, bottom)),
        (Point::new(5.0 * w / 2.0, mid), Point::new(strip_end, bottom)),
        (Point::new((4.5 * w / 2.0).floor(), bottom), Point::new(strip_end, bottom)),
    ];
    for (start, end) in cuts {
        draw_line(canvas, start, end, style.cut_width, style.color);
    }
}
