use bori_image::Image;

/// A position in image pixel coordinates.
///
/// The center of pixel `(x, y)` is at `(x + 0.5, y + 0.5)`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    /// The horizontal coordinate.
    pub x: f32,
    /// The vertical coordinate.
    pub y: f32,
}

impl Point {
    /// Create a new point.
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Scale both coordinates by `factor`.
    pub fn scaled(&self, factor: f32) -> Self {
        Self::new(self.x * factor, self.y * factor)
    }
}

impl From<(f32, f32)> for Point {
    fn from((x, y): (f32, f32)) -> Self {
        Self::new(x, y)
    }
}

/// Distance from `p` to the segment `a`-`b`.
#[inline]
fn distance_to_segment(p: Point, a: Point, b: Point) -> f32 {
    let (dx, dy) = (b.x - a.x, b.y - a.y);
    let len_sq = dx * dx + dy * dy;
    let t = if len_sq > 0.0 {
        (((p.x - a.x) * dx + (p.y - a.y) * dy) / len_sq).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let (cx, cy) = (a.x + t * dx, a.y + t * dy);
    ((p.x - cx).powi(2) + (p.y - cy).powi(2)).sqrt()
}

/// Paints an anti-aliased polyline into a coverage mask inplace.
///
/// The stroke has round caps and round joins. Every pixel whose center lies within
/// `width / 2` of the polyline is fully covered, with a one pixel wide linear falloff
/// outside of it. Coverage is composited over the existing mask values, so painting
/// never lowers a mask value. A single point paints a dot.
///
/// # Arguments
///
/// * `mask` - The mask to paint on.
/// * `points` - The polyline vertices in pixel coordinates. Points outside the mask are
///   allowed; the stroke is clipped.
/// * `width` - The stroke width in pixels. Non-positive widths paint nothing.
pub fn draw_stroke(mask: &mut Image<u8, 1>, points: &[Point], width: f32) {
    if points.is_empty() || mask.is_empty() || width.is_nan() || width <= 0.0 {
        return;
    }

    let reach = width / 2.0 + 0.5;

    // bounding box of the stroke, clipped to the mask
    let (mut min_x, mut min_y) = (f32::INFINITY, f32::INFINITY);
    let (mut max_x, mut max_y) = (f32::NEG_INFINITY, f32::NEG_INFINITY);
    for p in points {
        min_x = min_x.min(p.x);
        min_y = min_y.min(p.y);
        max_x = max_x.max(p.x);
        max_y = max_y.max(p.y);
    }

    let x0 = (min_x - reach).floor().max(0.0) as usize;
    let y0 = (min_y - reach).floor().max(0.0) as usize;
    let x1 = ((max_x + reach).ceil().max(0.0) as usize).min(mask.cols());
    let y1 = ((max_y + reach).ceil().max(0.0) as usize).min(mask.rows());
    if x0 >= x1 || y0 >= y1 {
        return;
    }

    let cols = mask.cols();
    let data = mask.as_slice_mut();

    for y in y0..y1 {
        for x in x0..x1 {
            let center = Point::new(x as f32 + 0.5, y as f32 + 0.5);

            let distance = match points {
                [p] => distance_to_segment(center, *p, *p),
                _ => points
                    .windows(2)
                    .map(|seg| distance_to_segment(center, seg[0], seg[1]))
                    .fold(f32::INFINITY, f32::min),
            };

            let coverage = (reach - distance).clamp(0.0, 1.0);
            if coverage <= 0.0 {
                continue;
            }

            let m = &mut data[y * cols + x];
            let value = *m as f32 + (255.0 - *m as f32) * coverage;
            *m = value.round().clamp(0.0, 255.0) as u8;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bori_image::ImageError;

    #[test]
    fn test_distance_to_segment() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(4.0, 0.0);
        assert_eq!(distance_to_segment(Point::new(2.0, 3.0), a, b), 3.0);
        assert_eq!(distance_to_segment(Point::new(7.0, 4.0), a, b), 5.0);
        assert_eq!(distance_to_segment(Point::new(3.0, 4.0), a, a), 5.0);
    }

    #[test]
    fn test_draw_stroke_horizontal() -> Result<(), ImageError> {
        let mut mask = Image::<u8, 1>::from_size_val([10, 10].into(), 0)?;
        draw_stroke(
            &mut mask,
            &[Point::new(2.0, 5.0), Point::new(8.0, 5.0)],
            2.0,
        );

        for x in 2..8 {
            assert_eq!(mask.get_pixel(x, 4, 0)?, &255);
            assert_eq!(mask.get_pixel(x, 5, 0)?, &255);
            assert_eq!(mask.get_pixel(x, 3, 0)?, &0);
            assert_eq!(mask.get_pixel(x, 6, 0)?, &0);
        }

        // round cap: partially covered corner next to the end point
        let cap = *mask.get_pixel(1, 4, 0)?;
        assert!(cap > 0 && cap < 255, "{cap}");
        assert_eq!(mask.get_pixel(0, 0, 0)?, &0);
        Ok(())
    }

    #[test]
    fn test_draw_stroke_single_point_dot() -> Result<(), ImageError> {
        let mut mask = Image::<u8, 1>::from_size_val([10, 10].into(), 0)?;
        draw_stroke(&mut mask, &[Point::new(5.0, 5.0)], 4.0);

        assert_eq!(mask.get_pixel(4, 4, 0)?, &255);
        assert_eq!(mask.get_pixel(5, 5, 0)?, &255);
        assert_eq!(mask.get_pixel(0, 0, 0)?, &0);
        assert_eq!(mask.get_pixel(9, 5, 0)?, &0);
        Ok(())
    }

    #[test]
    fn test_draw_stroke_never_erases() -> Result<(), ImageError> {
        let mut mask = Image::<u8, 1>::from_size_val([8, 8].into(), 100)?;
        let before = mask.clone();
        draw_stroke(
            &mut mask,
            &[Point::new(0.0, 0.0), Point::new(8.0, 8.0)],
            3.0,
        );
        for (a, b) in mask.as_slice().iter().zip(before.as_slice()) {
            assert!(a >= b);
        }
        assert_eq!(mask.get_pixel(3, 3, 0)?, &255);
        Ok(())
    }

    #[test]
    fn test_draw_stroke_clipped_and_degenerate() -> Result<(), ImageError> {
        let mut mask = Image::<u8, 1>::from_size_val([4, 4].into(), 0)?;

        draw_stroke(&mut mask, &[Point::new(-50.0, -50.0)], 10.0);
        draw_stroke(&mut mask, &[], 10.0);
        draw_stroke(&mut mask, &[Point::new(2.0, 2.0)], 0.0);
        draw_stroke(&mut mask, &[Point::new(2.0, 2.0)], f32::NAN);
        assert!(mask.as_slice().iter().all(|&v| v == 0));

        draw_stroke(
            &mut mask,
            &[Point::new(-10.0, 2.0), Point::new(20.0, 2.0)],
            2.0,
        );
        assert!((0..4).all(|x| mask.as_slice()[8 + x] == 255));
        Ok(())
    }

    #[test]
    fn test_point_helpers() {
        let p: Point = (2.0, 4.0).into();
        assert_eq!(p.scaled(0.25), Point::new(0.5, 1.0));
    }
}
