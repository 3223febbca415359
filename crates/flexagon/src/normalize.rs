//! Wedge normalization: rotate, trim, and clear near-white pixels.
//!
//! A wedge cut from a face is a triangle on a transparent background.
//! Before it is pasted onto the template it gets rotated to its layout
//! orientation, re-cropped to the content that is actually there, and
//! scrubbed of near-white pixels so interpolation edges and paper-white
//! areas print as nothing instead of faint halos.
//!
//! Rotation is nearest-neighbour on purpose: it is exactly reproducible
//! and never invents colours that were not in the source.

use image::{imageops, Rgba, RgbaImage};

use crate::raster::{bounds_where, PixelBounds};

/// Fill for pixels exposed by rotation and for knocked-out white.
pub const CLEAR_WHITE: Rgba<u8> = Rgba([255, 255, 255, 0]);

/// Channels at or above this value (all of R, G and B) count as white.
pub const WHITE_THRESHOLD: u8 = 250;

/// Rotate `image` anticlockwise by `degrees` about its center, growing the
/// canvas so no content is clipped.
///
/// Multiples of 90° are exact transposes. Any other angle is resampled by
/// mapping each output pixel center back into the source and taking the
/// nearest pixel; exposed pixels become [`CLEAR_WHITE`].
pub fn rotate_expand(image: &RgbaImage, degrees: f64) -> RgbaImage {
    let angle = degrees.rem_euclid(360.0);

    // imageops rotates clockwise, so anticlockwise 90 is its 270.
    if angle == 0.0 {
        return image.clone();
    } else if angle == 90.0 {
        return imageops::rotate270(image);
    } else if angle == 180.0 {
        return imageops::rotate180(image);
    } else if angle == 270.0 {
        return imageops::rotate90(image);
    }

    let (w, h) = image.dimensions();
    let (wf, hf) = (w as f64, h as f64);

    // Inverse map (output -> input). Rounding the coefficients keeps
    // e.g. cos(60°) at exactly 0.5 so edges land on stable pixels.
    let theta = -angle.to_radians();
    let cos = round15(theta.cos());
    let sin = round15(theta.sin());
    let (a, b, d, e) = (cos, sin, -sin, cos);

    let (cx, cy) = (wf / 2.0, hf / 2.0);
    let mut c = a * -cx + b * -cy + cx;
    let mut f = d * -cx + e * -cy + cy;

    let corners = [(0.0, 0.0), (wf, 0.0), (wf, hf), (0.0, hf)];
    let xs = corners.map(|(x, y)| a * x + b * y + c);
    let ys = corners.map(|(x, y)| d * x + e * y + f);
    let new_w = xs.iter().copied().fold(f64::NEG_INFINITY, f64::max).ceil()
        - xs.iter().copied().fold(f64::INFINITY, f64::min).floor();
    let new_h = ys.iter().copied().fold(f64::NEG_INFINITY, f64::max).ceil()
        - ys.iter().copied().fold(f64::INFINITY, f64::min).floor();

    // Shift so the grown canvas stays centred on the source.
    let (tx, ty) = (-(new_w - wf) / 2.0, -(new_h - hf) / 2.0);
    (c, f) = (a * tx + b * ty + c, d * tx + e * ty + f);

    let (out_w, out_h) = (new_w.max(0.0) as u32, new_h.max(0.0) as u32);
    RgbaImage::from_fn(out_w, out_h, |x, y| {
        let (px, py) = (x as f64 + 0.5, y as f64 + 0.5);
        let sx = a * px + b * py + c;
        let sy = d * px + e * py + f;
        if sx < 0.0 || sy < 0.0 {
            return CLEAR_WHITE;
        }
        let (ix, iy) = (sx as u32, sy as u32);
        if ix < w && iy < h {
            *image.get_pixel(ix, iy)
        } else {
            CLEAR_WHITE
        }
    })
}

/// Bounds of every pixel that is not fully transparent.
pub fn opaque_bounds(image: &RgbaImage) -> Option<PixelBounds> {
    bounds_where(image.width(), image.height(), |x, y| image.get_pixel(x, y)[3] != 0)
}

/// Crop `image` to [`opaque_bounds`].
///
/// An image with no visible pixel trims to a 0×0 image rather than an
/// error; callers that need content check for that themselves.
pub fn trim_transparent(image: &RgbaImage) -> RgbaImage {
    match opaque_bounds(image) {
        Some(b) => imageops::crop_imm(image, b.left, b.top, b.width(), b.height()).to_image(),
        None => RgbaImage::new(0, 0),
    }
}

/// Turn every pixel whose R, G and B are all at least [`WHITE_THRESHOLD`]
/// into [`CLEAR_WHITE`], whatever its alpha was.
///
/// Bright highlights inside a face are punched out too; that is the
/// accepted cost of a plain threshold.
pub fn knock_out_white(image: &mut RgbaImage) {
    for px in image.chunks_exact_mut(4) {
        if px[0] >= WHITE_THRESHOLD && px[1] >= WHITE_THRESHOLD && px[2] >= WHITE_THRESHOLD {
            px.copy_from_slice(&CLEAR_WHITE.0);
        }
    }
}

/// Rotate a wedge, trim it to its content, and clear near-white pixels.
///
/// Deterministic: the same image and angle always give the same pixels.
pub fn rotate_and_crop(image: &RgbaImage, degrees: f64) -> RgbaImage {
    let rotated = rotate_expand(image, degrees);
    let mut cropped = trim_transparent(&rotated);
    knock_out_white(&mut cropped);
    cropped
}

#[inline]
fn round15(v: f64) -> f64 {
    (v * 1e15).round() / 1e15
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const RED: Rgba<u8> = Rgba([200, 30, 30, 255]);
    const CLEAR: Rgba<u8> = Rgba([0, 0, 0, 0]);

    /// A right triangle in the lower-left half of a `w`×`h` box, with a
    /// coloured gradient so orientation errors show up.
    fn wedge(w: u32, h: u32) -> RgbaImage {
        RgbaImage::from_fn(w, h, |x, y| {
            if x * (h - 1) <= y * (w - 1) {
                Rgba([(x * 7 % 200) as u8, (y * 5 % 200) as u8, 90, 255])
            } else {
                CLEAR
            }
        })
    }

    fn visible(image: &RgbaImage) -> usize {
        image.pixels().filter(|p| p[3] != 0).count()
    }

    #[test]
    fn zero_degrees_on_tight_wedge_is_identity() {
        let w = wedge(30, 20);
        assert_eq!(rotate_and_crop(&w, 0.0), w);
        assert_eq!(rotate_and_crop(&w, 360.0), w);
    }

    #[test]
    fn quarter_turns_are_exact() {
        let w = wedge(30, 20);
        let turned = rotate_and_crop(&w, 90.0);
        assert_eq!(turned.dimensions(), (20, 30));
        assert_eq!(rotate_and_crop(&turned, -90.0), w);

        let half = rotate_and_crop(&w, 180.0);
        assert_eq!(rotate_and_crop(&half, 180.0), w);
    }

    #[test]
    fn quarter_turn_is_anticlockwise() {
        // Single opaque pixel in the top-right corner moves to top-left.
        let mut img = RgbaImage::from_pixel(3, 2, CLEAR);
        img.put_pixel(2, 0, RED);
        let turned = rotate_expand(&img, 90.0);
        assert_eq!(turned.dimensions(), (2, 3));
        assert_eq!(*turned.get_pixel(0, 0), RED);
    }

    #[test]
    fn arbitrary_angle_round_trip_keeps_extent() {
        let w = wedge(40, 34);
        let there = rotate_and_crop(&w, 60.0);
        let back = rotate_and_crop(&there, -60.0);

        let (ow, oh) = w.dimensions();
        let (bw, bh) = back.dimensions();
        assert!(ow.abs_diff(bw) <= 2, "width {} vs {}", ow, bw);
        assert!(oh.abs_diff(bh) <= 2, "height {} vs {}", oh, bh);

        let (a, b) = (visible(&w) as f64, visible(&back) as f64);
        assert!((a - b).abs() / a < 0.1, "visible pixels {} vs {}", a, b);
    }

    #[test]
    fn expansion_fits_the_rotated_square() {
        let img = RgbaImage::from_pixel(10, 10, RED);
        let rotated = rotate_expand(&img, 45.0);
        // Rotated corners span -2.07..12.07, i.e. floor -3 to ceil 13.
        assert_eq!(rotated.dimensions(), (16, 16));
        // Corners of the grown canvas are exposed background.
        assert_eq!(*rotated.get_pixel(0, 0), CLEAR_WHITE);
        assert_eq!(*rotated.get_pixel(8, 8), RED);
    }

    #[test]
    fn all_background_trims_to_empty() {
        let img = RgbaImage::from_pixel(12, 9, CLEAR);
        let out = rotate_and_crop(&img, 33.0);
        assert_eq!(out.dimensions(), (0, 0));
    }

    #[test]
    fn trim_keeps_transparent_pixels_inside_the_box() {
        let mut img = RgbaImage::from_pixel(10, 10, CLEAR);
        img.put_pixel(2, 3, RED);
        img.put_pixel(6, 8, RED);
        let out = trim_transparent(&img);
        assert_eq!(out.dimensions(), (5, 6));
        assert_eq!(*out.get_pixel(0, 0), RED);
        assert_eq!(*out.get_pixel(4, 5), RED);
        assert_eq!(out.get_pixel(1, 1)[3], 0);
    }

    #[test]
    fn near_white_is_knocked_out() {
        let mut img = RgbaImage::from_pixel(3, 1, Rgba([250, 251, 255, 255]));
        img.put_pixel(1, 0, Rgba([249, 255, 255, 255]));
        img.put_pixel(2, 0, Rgba([255, 255, 255, 0]));
        knock_out_white(&mut img);
        assert_eq!(*img.get_pixel(0, 0), CLEAR_WHITE);
        assert_eq!(*img.get_pixel(1, 0), Rgba([249, 255, 255, 255]));
        assert_eq!(*img.get_pixel(2, 0), CLEAR_WHITE);
    }

    #[test]
    fn rotation_is_deterministic() {
        let w = wedge(50, 43);
        assert_eq!(rotate_and_crop(&w, 123.4), rotate_and_crop(&w, 123.4));
    }

    proptest! {
        #[test]
        fn no_visible_white_after_normalizing(angle in -720.0f64..720.0, shade in 240u8..=255) {
            let mut img = wedge(24, 21);
            // Paint a near-white band through the wedge.
            for x in 0..24 {
                img.put_pixel(x, 20, Rgba([shade, shade, shade, 255]));
            }
            let out = rotate_and_crop(&img, angle);
            for px in out.pixels() {
                let white = px[0] >= WHITE_THRESHOLD && px[1] >= WHITE_THRESHOLD && px[2] >= WHITE_THRESHOLD;
                prop_assert!(!(white && px[3] != 0), "visible white pixel {:?}", px);
            }
        }
    }
}
