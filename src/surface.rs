use crate::poly::Poly;
use crate::scene::Scene;

/// Logical-to-device scale: one logical unit is 100 device pixels.
pub const PX_PER_UNIT: f32 = 100.0;

/// Radius of the filled disc drawn at each vertex.
pub const MARKER_RADIUS: f32 = 5.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    /// The transformed polygon.
    pub const SHAPE: Color = Color {
        r: 0xe5,
        g: 0x37,
        b: 0x24,
    };
    /// The untransformed reference outline.
    pub const GHOST: Color = Color {
        r: 0x80,
        g: 0x80,
        b: 0x80,
    };
    pub const AXIS: Color = Color {
        r: 0x77,
        g: 0x77,
        b: 0x77,
    };
}

/// Maps logical coordinates onto a drawable area: origin centered, logical Y
/// up (screen Y grows downward, so Y flips around the center), plus a user
/// pan offset in device pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct View {
    pub w: f32,
    pub h: f32,
    pub off_x: f32,
    pub off_y: f32,
}

impl View {
    pub fn new(w: f32, h: f32) -> Self {
        Self {
            w,
            h,
            off_x: 0.0,
            off_y: 0.0,
        }
    }

    #[inline]
    pub fn to_screen(&self, x: f64, y: f64) -> (f32, f32) {
        (
            self.w / 2.0 + self.off_x + (x as f32) * PX_PER_UNIT,
            self.h / 2.0 + self.off_y - (y as f32) * PX_PER_UNIT,
        )
    }

    /// Updates the drawable area dimensions, keeping the pan offset.
    pub fn rescale(&mut self, w: f32, h: f32) {
        self.w = w;
        self.h = h;
    }

    pub fn pan(&mut self, dx: f32, dy: f32) {
        self.off_x += dx;
        self.off_y += dy;
    }
}

/// Drawing contract shared by the live window and the headless raster.
pub trait Surface {
    /// Resets the drawable area and redraws the coordinate axes.
    fn clear(&mut self);

    /// Strokes the closed outline and fills a marker at each vertex.
    fn draw(&mut self, poly: &Poly, color: Color);

    /// The untransformed base shape, in a muted color.
    fn draw_ghost(&mut self, poly: &Poly) {
        self.draw(poly, Color::GHOST);
    }

    /// Updates the visible area dimensions.
    fn rescale(&mut self, w: f32, h: f32);
}

/// One full render pass: axes, ghost, then the folded polygon. Safe to call
/// repeatedly; output derives solely from `scene`.
pub fn render(surface: &mut dyn Surface, scene: &Scene) {
    surface.clear();
    surface.draw_ghost(&scene.base);
    let shaped = scene.rendered();
    surface.draw(&shaped, Color::SHAPE);
}
