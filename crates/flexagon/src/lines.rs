//! Guide line rendering: dashed fold lines and solid cut lines.
//!
//! Dashes are laid out in pure geometry first (`dash_segments`) and then
//! stroked in a single pass, one subpath per dash.

use image::{Rgba, RgbaImage};

use crate::geometry::{Line, Point};
use crate::raster::{paint, Coverage};

/// Dash pattern and stroke width for a dashed guide line.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DashStyle {
    /// Length of each solid dash, in pixels.
    pub dash_length: f64,
    /// Length of each gap between dashes, in pixels.
    pub gap_length: f64,
    /// Stroke width, in pixels.
    pub width: f32,
}

impl Default for DashStyle {
    fn default() -> Self {
        Self {
            dash_length: 10.0,
            gap_length: 5.0,
            width: 2.0,
        }
    }
}

impl DashStyle {
    pub fn with_dash_length(mut self, dash_length: f64) -> Self {
        self.dash_length = dash_length;
        self
    }

    pub fn with_gap_length(mut self, gap_length: f64) -> Self {
        self.gap_length = gap_length;
        self
    }

    pub fn with_width(mut self, width: f32) -> Self {
        self.width = width;
        self
    }
}

/// Split the segment `start -> end` into its solid dashes.
///
/// Walks the segment alternating `dash` and `gap` steps, starting with a
/// dash at `start`. The last step is clamped to the endpoint. A zero-length
/// segment, or a dash length that is not a positive finite number, yields
/// no dashes.
pub fn dash_segments(start: Point, end: Point, dash: f64, gap: f64) -> Vec<Line> {
    let distance = start.distance(end);
    if distance == 0.0 || !distance.is_finite() || !(dash > 0.0) || !dash.is_finite() {
        return Vec::new();
    }
    let gap = if gap.is_finite() { gap.max(0.0) } else { 0.0 };

    let unit_x = (end.x - start.x) / distance;
    let unit_y = (end.y - start.y) / distance;
    let at = |d: f64| Point::new(start.x + d * unit_x, start.y + d * unit_y);

    let mut segments = Vec::new();
    let mut travelled = 0.0;
    let mut drawing = true;

    while travelled < distance {
        let step = if drawing { dash } else { gap };
        let next = (travelled + step).min(distance);
        if drawing {
            segments.push(Line::between(at(travelled), at(next)));
        }
        travelled = next;
        drawing = !drawing;
    }

    segments
}

/// Draw a dashed line from `start` to `end` onto `image`.
///
/// A zero-length line is a no-op.
pub fn draw_dashed_line(
    image: &mut RgbaImage,
    start: Point,
    end: Point,
    style: &DashStyle,
    color: Rgba<u8>,
) {
    let dashes: Vec<[Point; 2]> = dash_segments(start, end, style.dash_length, style.gap_length)
        .into_iter()
        .map(|line| [line.start(), line.end()])
        .collect();
    let polylines: Vec<&[Point]> = dashes.iter().map(|d| d.as_slice()).collect();
    stroke(image, &polylines, false, style.width, color);
}

/// Draw a solid line from `start` to `end` onto `image`.
pub fn draw_line(image: &mut RgbaImage, start: Point, end: Point, width: f32, color: Rgba<u8>) {
    stroke(image, &[&[start, end]], false, width, color);
}

/// Draw the closed outline through `points` onto `image`.
pub fn draw_polygon_outline(image: &mut RgbaImage, points: &[Point], width: f32, color: Rgba<u8>) {
    stroke(image, &[points], true, width, color);
}

fn stroke(image: &mut RgbaImage, polylines: &[&[Point]], closed: bool, width: f32, color: Rgba<u8>) {
    // No coverage means nothing to draw: empty image or empty path.
    if let Some(coverage) = Coverage::strokes(image.width(), image.height(), polylines, closed, width) {
        paint(image, &coverage, color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
    const GREY: Rgba<u8> = Rgba([128, 128, 128, 255]);

    fn spans(lines: &[Line]) -> Vec<(f64, f64)> {
        lines.iter().map(|l| (l.x1, l.x2)).collect()
    }

    #[test]
    fn zero_length_is_noop() {
        let p = Point::new(3.0, 3.0);
        assert!(dash_segments(p, p, 10.0, 5.0).is_empty());

        let mut img = RgbaImage::from_pixel(8, 8, WHITE);
        draw_dashed_line(&mut img, p, p, &DashStyle::default(), GREY);
        assert!(img.pixels().all(|px| *px == WHITE));
    }

    #[test]
    fn dashes_alternate_from_start() {
        let segs = dash_segments(Point::new(0.0, 0.0), Point::new(40.0, 0.0), 10.0, 5.0);
        assert_eq!(spans(&segs), vec![(0.0, 10.0), (15.0, 25.0), (30.0, 40.0)]);
    }

    #[test]
    fn final_dash_is_truncated() {
        let segs = dash_segments(Point::new(0.0, 0.0), Point::new(20.0, 0.0), 10.0, 5.0);
        assert_eq!(spans(&segs), vec![(0.0, 10.0), (15.0, 20.0)]);
    }

    #[test]
    fn ending_inside_a_gap_draws_nothing_more() {
        let segs = dash_segments(Point::new(0.0, 0.0), Point::new(12.0, 0.0), 10.0, 5.0);
        assert_eq!(spans(&segs), vec![(0.0, 10.0)]);
    }

    #[test]
    fn non_positive_dash_yields_nothing() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(10.0, 0.0);
        assert!(dash_segments(a, b, 0.0, 5.0).is_empty());
        assert!(dash_segments(a, b, -1.0, 5.0).is_empty());
        assert!(dash_segments(a, b, f64::NAN, 5.0).is_empty());
    }

    #[test]
    fn dashed_line_leaves_gaps_unpainted() {
        let mut img = RgbaImage::from_pixel(40, 10, WHITE);
        draw_dashed_line(
            &mut img,
            Point::new(0.0, 5.0),
            Point::new(40.0, 5.0),
            &DashStyle::default(),
            GREY,
        );
        // Inside the first dash.
        assert_eq!(*img.get_pixel(5, 5), GREY);
        // Inside the first gap (10..15).
        assert_eq!(*img.get_pixel(12, 5), WHITE);
        // Inside the second dash (15..25).
        assert_eq!(*img.get_pixel(20, 4), GREY);
        // Far from the line.
        assert_eq!(*img.get_pixel(20, 0), WHITE);
    }

    #[test]
    fn custom_dash_style_changes_pattern_and_weight() {
        let style = DashStyle::default()
            .with_dash_length(4.0)
            .with_gap_length(4.0)
            .with_width(6.0);
        let mut img = RgbaImage::from_pixel(40, 20, WHITE);
        draw_dashed_line(&mut img, Point::new(0.0, 10.0), Point::new(40.0, 10.0), &style, GREY);
        // Three pixels off the centre line is still inside a 6px stroke.
        assert_eq!(*img.get_pixel(2, 7), GREY);
        assert_eq!(*img.get_pixel(2, 12), GREY);
        // The gap 4..8 is untouched, the dash 8..12 is not.
        assert_eq!(*img.get_pixel(6, 10), WHITE);
        assert_eq!(*img.get_pixel(10, 10), GREY);
    }

    #[test]
    fn polygon_outline_is_hollow() {
        let mut img = RgbaImage::from_pixel(20, 20, WHITE);
        let square = [
            Point::new(2.0, 2.0),
            Point::new(18.0, 2.0),
            Point::new(18.0, 18.0),
            Point::new(2.0, 18.0),
        ];
        draw_polygon_outline(&mut img, &square, 2.0, GREY);
        assert_eq!(*img.get_pixel(10, 2), GREY);
        assert_eq!(*img.get_pixel(2, 10), GREY);
        assert_eq!(*img.get_pixel(10, 10), WHITE);
    }

    #[test]
    fn solid_line_clips_at_image_edge() {
        let mut img = RgbaImage::from_pixel(10, 10, WHITE);
        draw_line(&mut img, Point::new(-5.0, 5.0), Point::new(50.0, 5.0), 3.0, GREY);
        assert_eq!(*img.get_pixel(0, 5), GREY);
        assert_eq!(*img.get_pixel(9, 5), GREY);
    }

    proptest! {
        #[test]
        fn dashes_stay_on_the_segment(
            x1 in -100.0f64..100.0, y1 in -100.0f64..100.0,
            x2 in -100.0f64..100.0, y2 in -100.0f64..100.0,
            dash in 0.5f64..20.0, gap in 0.0f64..20.0,
        ) {
            let start = Point::new(x1, y1);
            let end = Point::new(x2, y2);
            let total = start.distance(end);
            let segs = dash_segments(start, end, dash, gap);

            let mut drawn = 0.0;
            for seg in &segs {
                prop_assert!(seg.length() <= dash + 1e-9);
                prop_assert!(start.distance(seg.end()) <= total + 1e-9);
                drawn += seg.length();
            }
            prop_assert!(drawn <= total + 1e-9);
        }

        #[test]
        fn drawing_never_panics(
            x1 in -50.0f64..80.0, y1 in -50.0f64..80.0,
            x2 in -50.0f64..80.0, y2 in -50.0f64..80.0,
        ) {
            let mut img = RgbaImage::from_pixel(32, 32, WHITE);
            draw_dashed_line(&mut img, Point::new(x1, y1), Point::new(x2, y2), &DashStyle::default(), GREY);
        }
    }
}
