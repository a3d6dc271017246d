// Headless render target. Same view math as the live window, drawing into an
// RGBA buffer so tests and CLI-only builds can inspect output pixel by pixel.

use crate::poly::Poly;
use crate::surface::{Color, MARKER_RADIUS, Surface, View};

#[derive(Clone, Debug)]
pub struct RasterSurface {
    pub w: usize,
    pub h: usize,
    pub s: usize, // stride in bytes (w * 4)
    pub arr: Vec<u8>,
    view: View,
}

impl RasterSurface {
    pub fn new(w: usize, h: usize) -> Self {
        let s = w * 4;
        Self {
            w,
            h,
            s,
            arr: vec![0u8; s * h],
            view: View::new(w as f32, h as f32),
        }
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut View {
        &mut self.view
    }

    pub fn pixel(&self, x: usize, y: usize) -> [u8; 4] {
        let base = y * self.s + x * 4;
        [
            self.arr[base],
            self.arr[base + 1],
            self.arr[base + 2],
            self.arr[base + 3],
        ]
    }

    pub fn pixel_is(&self, x: usize, y: usize, color: Color) -> bool {
        let [r, g, b, _] = self.pixel(x, y);
        r == color.r && g == color.g && b == color.b
    }

    fn put(&mut self, x: i32, y: i32, color: Color) {
        if x < 0 || y < 0 || x >= self.w as i32 || y >= self.h as i32 {
            return;
        }
        let base = (y as usize) * self.s + (x as usize) * 4;
        self.arr[base] = color.r;
        self.arr[base + 1] = color.g;
        self.arr[base + 2] = color.b;
        self.arr[base + 3] = 255;
    }

    /// Strokes a device-space segment by stepping along the major axis.
    fn stroke_line(&mut self, x0: f32, y0: f32, x1: f32, y1: f32, color: Color) {
        let dx = x1 - x0;
        let dy = y1 - y0;
        let steps = dx.abs().max(dy.abs()).ceil().max(1.0) as i32;
        for i in 0..=steps {
            let t = (i as f32) / (steps as f32);
            let x = x0 + dx * t;
            let y = y0 + dy * t;
            self.put(x.round() as i32, y.round() as i32, color);
        }
    }

    fn fill_disc(&mut self, cx: f32, cy: f32, radius: f32, color: Color) {
        let r = radius.ceil() as i32;
        let cxi = cx.round() as i32;
        let cyi = cy.round() as i32;
        for dy in -r..=r {
            for dx in -r..=r {
                if ((dx * dx + dy * dy) as f32) <= radius * radius {
                    self.put(cxi + dx, cyi + dy, color);
                }
            }
        }
    }
}

impl Surface for RasterSurface {
    fn clear(&mut self) {
        self.arr.fill(0);
        for i in (3..self.arr.len()).step_by(4) {
            self.arr[i] = 255;
        }

        // Axes through the view origin, spanning the full drawable area.
        let (ox, oy) = self.view.to_screen(0.0, 0.0);
        self.stroke_line(ox, 0.0, ox, self.h as f32 - 1.0, Color::AXIS);
        self.stroke_line(0.0, oy, self.w as f32 - 1.0, oy, Color::AXIS);
    }

    fn draw(&mut self, poly: &Poly, color: Color) {
        let pts = poly.points();
        for i in 0..pts.len() {
            let a = pts[i];
            let b = pts[(i + 1) % pts.len()];
            let (x0, y0) = self.view.to_screen(a[0], a[1]);
            let (x1, y1) = self.view.to_screen(b[0], b[1]);
            self.stroke_line(x0, y0, x1, y1, color);
        }
        for p in pts {
            let (cx, cy) = self.view.to_screen(p[0], p[1]);
            self.fill_disc(cx, cy, MARKER_RADIUS, color);
        }
    }

    fn rescale(&mut self, w: f32, h: f32) {
        let w = (w.max(1.0)) as usize;
        let h = (h.max(1.0)) as usize;
        if w != self.w || h != self.h {
            self.w = w;
            self.h = h;
            self.s = w * 4;
            self.arr = vec![0u8; self.s * h];
        }
        self.view.rescale(w as f32, h as f32);
    }
}

#[cfg(feature = "im-io")]
impl RasterSurface {
    pub fn save_png<P: AsRef<std::path::Path>>(&self, path: P) -> image::ImageResult<()> {
        let img = image::RgbaImage::from_raw(self.w as u32, self.h as u32, self.arr.clone())
            .ok_or_else(|| {
                image::ImageError::Parameter(image::error::ParameterError::from_kind(
                    image::error::ParameterErrorKind::DimensionMismatch,
                ))
            })?;

        img.save_with_format(path, image::ImageFormat::Png)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::Scene;
    use crate::surface::render;
    use crate::test_helpers::{shape_bounds, snapshot_ascii};

    #[test]
    fn clear_draws_axes_through_the_centered_origin() {
        let mut raster = RasterSurface::new(400, 400);
        raster.clear();

        // Vertical axis at x=200, horizontal at y=200.
        assert!(raster.pixel_is(200, 0, Color::AXIS));
        assert!(raster.pixel_is(200, 399, Color::AXIS));
        assert!(raster.pixel_is(0, 200, Color::AXIS));
        assert!(raster.pixel_is(399, 200, Color::AXIS));
        // Off-axis stays background.
        assert_eq!(raster.pixel(10, 10), [0, 0, 0, 255]);
    }

    #[test]
    fn draw_strokes_the_closing_edge() {
        let mut raster = RasterSurface::new(400, 400);
        raster.clear();
        raster.draw(&Poly::unit_square(), Color::SHAPE);

        // Left edge (0,1)..(0,0) closes the loop: device x=200, y=100..200.
        assert!(raster.pixel_is(200, 150, Color::SHAPE));
        // Top edge of the square at logical y=1 -> device y=100.
        assert!(raster.pixel_is(250, 100, Color::SHAPE));
    }

    #[test]
    fn vertex_markers_are_filled_discs() {
        let mut raster = RasterSurface::new(400, 400);
        raster.clear();
        raster.draw(&Poly::new(vec![[1.0, 1.0]]), Color::SHAPE);

        // Logical (1,1) -> device (300, 100); the disc covers a few pixels
        // around the center, not just the outline.
        assert!(raster.pixel_is(300, 100, Color::SHAPE));
        assert!(raster.pixel_is(302, 102, Color::SHAPE));
        assert!(!raster.pixel_is(310, 110, Color::SHAPE));
    }

    #[test]
    fn rendered_square_shifts_by_the_translation() {
        let base_scene = Scene {
            base: Poly::unit_square(),
            list: crate::pipeline::TransformList::new(),
        };

        let mut translated_scene = base_scene.clone();
        translated_scene.list.add_translate(2.0, 0.0);

        let mut a = RasterSurface::new(800, 400);
        render(&mut a, &base_scene);
        let mut b = RasterSurface::new(800, 400);
        render(&mut b, &translated_scene);

        let (al, at, ar, ab) = shape_bounds(&a, Color::SHAPE).expect("shape drawn");
        let (bl, bt, br, bb) = shape_bounds(&b, Color::SHAPE).expect("shape drawn");

        // translate(2, 0) is 200 device pixels right, no vertical change.
        assert_eq!(bl, al + 200);
        assert_eq!(br, ar + 200);
        assert_eq!((bt, bb), (at, ab));
    }

    #[test]
    fn render_shows_ghost_and_shape_apart() {
        let scene = {
            let mut scene = Scene {
                base: Poly::unit_square(),
                list: crate::pipeline::TransformList::new(),
            };
            scene.list.add_translate(1.0, 0.0);
            scene
        };

        let mut raster = RasterSurface::new(600, 400);
        render(&mut raster, &scene);

        let ascii = snapshot_ascii(&raster, 50);
        // Ghost square sits on the origin, the shape one unit right. Both
        // rows of the snapshot must contain their own glyphs.
        assert!(ascii.contains('g'), "ghost missing:\n{ascii}");
        assert!(ascii.contains('#'), "shape missing:\n{ascii}");
        assert!(ascii.contains('+'), "axes missing:\n{ascii}");
    }

    #[test]
    fn rescale_reallocates_and_recenters() {
        let mut raster = RasterSurface::new(100, 100);
        raster.rescale(200.0, 200.0);
        assert_eq!((raster.w, raster.h), (200, 200));
        raster.clear();
        assert!(raster.pixel_is(100, 0, Color::AXIS));
    }
}
