//! Coverage masks and compositing shared by all tools.
//!
//! A tool first marks which pixels its shape covers, then paints or erases
//! the whole mask in one pass. Overlapping parts of a shape (brush segment
//! joints, for example) are therefore composited exactly once, which keeps
//! semi-transparent colors from darkening where stamps overlap.

use egui::{Color32, Pos2, Rect, Vec2, pos2, vec2};
use image::{Rgba, RgbaImage};

use crate::surface::TRANSPARENT;

/// Pixels covered by a shape, clipped to a surface.
///
/// Pixel `(x, y)` is sampled at its center `(x + 0.5, y + 0.5)`.
#[derive(Debug, Clone)]
pub struct Coverage {
    surface_width: u32,
    surface_height: u32,
    mask: Vec<bool>,
}

impl Coverage {
    pub fn new(surface_width: u32, surface_height: u32) -> Self {
        Self {
            surface_width,
            surface_height,
            mask: vec![false; surface_width as usize * surface_height as usize],
        }
    }

    #[cfg(test)]
    fn for_image(image: &RgbaImage) -> Self {
        Self::new(image.width(), image.height())
    }

    pub fn is_covered(&self, x: u32, y: u32) -> bool {
        x < self.surface_width
            && y < self.surface_height
            && self.mask[self.index(x, y)]
    }

    #[cfg(test)]
    fn covered_count(&self) -> usize {
        self.mask.iter().filter(|covered| **covered).count()
    }

    pub fn is_empty(&self) -> bool {
        !self.mask.iter().any(|covered| *covered)
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.surface_width as usize + x as usize
    }

    /// Marks every pixel inside `bounds` whose center passes `inside`
    fn mark_where(&mut self, bounds: Rect, inside: impl Fn(Pos2) -> bool) {
        if !bounds.is_finite() || bounds.is_negative() {
            return;
        }
        let clamp_x = |v: f32| v.clamp(0.0, self.surface_width as f32) as u32;
        let clamp_y = |v: f32| v.clamp(0.0, self.surface_height as f32) as u32;
        let (x0, x1) = (clamp_x(bounds.min.x.floor()), clamp_x(bounds.max.x.ceil()));
        let (y0, y1) = (clamp_y(bounds.min.y.floor()), clamp_y(bounds.max.y.ceil()));

        for y in y0..y1 {
            for x in x0..x1 {
                if inside(pos2(x as f32 + 0.5, y as f32 + 0.5)) {
                    let index = self.index(x, y);
                    self.mask[index] = true;
                }
            }
        }
    }

    /// Round dot, used for single-point strokes and segment caps
    pub fn add_disc(&mut self, center: Pos2, diameter: f32) {
        let radius = (diameter / 2.0).max(0.5);
        let bounds = Rect::from_center_size(center, Vec2::splat(radius * 2.0));
        self.mark_where(bounds, |p| p.distance(center) <= radius);
    }

    /// Thick segment with round caps
    pub fn add_segment(&mut self, from: Pos2, to: Pos2, width: f32) {
        let radius = (width / 2.0).max(0.5);
        let bounds = Rect::from_two_pos(from, to).expand(radius);
        self.mark_where(bounds, |p| distance_to_segment(p, from, to) <= radius);
    }

    /// Connected thick segments. A single point yields a disc.
    pub fn add_polyline(&mut self, points: &[Pos2], width: f32) {
        match points {
            [] => {}
            [point] => self.add_disc(*point, width),
            _ => {
                for pair in points.windows(2) {
                    self.add_segment(pair[0], pair[1], width);
                }
            }
        }
    }

    pub fn add_filled_rect(&mut self, rect: Rect) {
        self.mark_where(rect, |p| contains_half_open(rect, p));
    }

    /// Band of thickness `width` centered on the rectangle's edge
    pub fn add_rect_outline(&mut self, rect: Rect, width: f32) {
        let half = (width / 2.0).max(0.5);
        let outer = rect.expand(half);
        let inner = rect.shrink(half);
        self.mark_where(outer, |p| {
            contains_half_open(outer, p) && !(inner.is_positive() && contains_half_open(inner, p))
        });
    }

    /// Ellipse inscribed in `rect`
    pub fn add_filled_ellipse(&mut self, rect: Rect) {
        let center = rect.center();
        let radii = rect.size() / 2.0;
        if radii.x <= 0.0 || radii.y <= 0.0 {
            return;
        }
        self.mark_where(rect, |p| inside_ellipse(p, center, radii));
    }

    /// Band of thickness `width` centered on the inscribed ellipse's edge
    pub fn add_ellipse_outline(&mut self, rect: Rect, width: f32) {
        let half = (width / 2.0).max(0.5);
        let center = rect.center();
        let radii = rect.size() / 2.0;
        let outer = radii + Vec2::splat(half);
        let inner = radii - Vec2::splat(half);
        let has_hole = inner.x > 0.0 && inner.y > 0.0;
        self.mark_where(rect.expand(half), |p| {
            inside_ellipse(p, center, outer) && !(has_hole && inside_ellipse(p, center, inner))
        });
    }

    /// Source-over composites `color` onto every covered pixel
    pub fn paint(&self, image: &mut RgbaImage, color: Color32) {
        let source = color.to_srgba_unmultiplied();
        if source[3] == 0 {
            return;
        }
        self.for_each_covered(image, |pixel| blend_over(pixel, source));
    }

    /// Sets every covered pixel to transparent
    pub fn erase(&self, image: &mut RgbaImage) {
        self.for_each_covered(image, |pixel| *pixel = TRANSPARENT);
    }

    fn for_each_covered(&self, image: &mut RgbaImage, mut apply: impl FnMut(&mut Rgba<u8>)) {
        let width = self.surface_width.min(image.width());
        let height = self.surface_height.min(image.height());
        for y in 0..height {
            for x in 0..width {
                if self.mask[self.index(x, y)] {
                    apply(image.get_pixel_mut(x, y));
                }
            }
        }
    }
}

fn contains_half_open(rect: Rect, p: Pos2) -> bool {
    rect.min.x <= p.x && p.x < rect.max.x && rect.min.y <= p.y && p.y < rect.max.y
}

fn inside_ellipse(p: Pos2, center: Pos2, radii: Vec2) -> bool {
    if radii.x <= 0.0 || radii.y <= 0.0 {
        return false;
    }
    let d = p - center;
    let n = vec2(d.x / radii.x, d.y / radii.y);
    n.length_sq() <= 1.0
}

/// Distance from a point to a line segment
pub fn distance_to_segment(point: Pos2, from: Pos2, to: Pos2) -> f32 {
    let line = to - from;
    let length_sq = line.length_sq();
    if length_sq == 0.0 {
        return point.distance(from);
    }
    let t = ((point - from).dot(line) / length_sq).clamp(0.0, 1.0);
    point.distance(from + line * t)
}

/// Straight-alpha "source over" for a single pixel
pub fn blend_over(destination: &mut Rgba<u8>, source: [u8; 4]) {
    let source_alpha = source[3] as f32 / 255.0;
    if source[3] == 255 {
        *destination = Rgba(source);
        return;
    }
    let destination_alpha = destination[3] as f32 / 255.0;
    let out_alpha = source_alpha + destination_alpha * (1.0 - source_alpha);
    if out_alpha <= 0.0 {
        *destination = TRANSPARENT;
        return;
    }
    let mut out = [0u8; 4];
    for channel in 0..3 {
        let value = (source[channel] as f32 * source_alpha
            + destination[channel] as f32 * destination_alpha * (1.0 - source_alpha))
            / out_alpha;
        out[channel] = value.round().clamp(0.0, 255.0) as u8;
    }
    out[3] = (out_alpha * 255.0).round().clamp(0.0, 255.0) as u8;
    *destination = Rgba(out);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filled_rect_footprint() {
        let mut coverage = Coverage::new(20, 20);
        coverage.add_filled_rect(Rect::from_min_max(pos2(2.0, 3.0), pos2(6.0, 5.0)));
        assert_eq!(coverage.covered_count(), 4 * 2);
        assert!(coverage.is_covered(2, 3));
        assert!(coverage.is_covered(5, 4));
        assert!(!coverage.is_covered(6, 4));
    }

    #[test]
    fn test_rect_outline_leaves_interior() {
        let mut coverage = Coverage::new(40, 40);
        coverage.add_rect_outline(Rect::from_min_max(pos2(5.0, 5.0), pos2(30.0, 30.0)), 2.0);
        assert!(coverage.is_covered(5, 15));
        assert!(coverage.is_covered(29, 15));
        assert!(!coverage.is_covered(15, 15));
        assert!(!coverage.is_covered(35, 35));
    }

    #[test]
    fn test_shapes_are_clipped_to_surface() {
        let mut coverage = Coverage::new(10, 10);
        coverage.add_disc(pos2(0.0, 0.0), 8.0);
        coverage.add_segment(pos2(-50.0, 5.0), pos2(50.0, 5.0), 2.0);
        assert!(coverage.is_covered(0, 0));
        assert!(coverage.is_covered(9, 5));
    }

    #[test]
    fn test_degenerate_filled_ellipse_is_empty() {
        let mut coverage = Coverage::new(10, 10);
        coverage.add_filled_ellipse(Rect::from_min_max(pos2(4.0, 4.0), pos2(4.0, 9.0)));
        assert!(coverage.is_empty());
    }

    #[test]
    fn test_distance_to_segment() {
        let from = pos2(0.0, 0.0);
        let to = pos2(10.0, 0.0);
        assert_eq!(distance_to_segment(pos2(5.0, 3.0), from, to), 3.0);
        assert_eq!(distance_to_segment(pos2(-4.0, 3.0), from, to), 5.0);
        assert!((distance_to_segment(pos2(1.0, 1.0), from, from) - 2f32.sqrt()).abs() < 1e-5);
    }

    #[test]
    fn test_blend_over_transparent_keeps_source() {
        let mut pixel = TRANSPARENT;
        blend_over(&mut pixel, [10, 20, 30, 128]);
        assert_eq!(pixel, Rgba([10, 20, 30, 128]));
    }

    #[test]
    fn test_paint_composites_each_pixel_once() {
        let mut image = RgbaImage::from_pixel(10, 10, TRANSPARENT);
        let mut coverage = Coverage::for_image(&image);
        coverage.add_polyline(&[pos2(1.0, 5.0), pos2(5.0, 5.0), pos2(9.0, 5.0)], 3.0);
        coverage.paint(&mut image, Color32::from_rgba_unmultiplied(255, 0, 0, 128));

        // (5, 5) sits under both segments, (2, 5) only under the first
        let joint = *image.get_pixel(5, 5);
        assert_eq!(joint, *image.get_pixel(2, 5));
        assert!(joint[3] > 0 && joint[3] < 255);
    }
}
