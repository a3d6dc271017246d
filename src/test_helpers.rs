use crate::raster::RasterSurface;
use crate::surface::Color;

pub fn assert_close(a: f64, b: f64, tol: f64) {
    assert!(
        (a - b).abs() <= tol,
        "expected {a} within {tol} of {b}"
    );
}

pub fn assert_close_f32(a: f32, b: f32, tol: f32) {
    assert!(
        (a - b).abs() <= tol,
        "expected {a} within {tol} of {b}"
    );
}

pub fn assert_points_close(got: &[[f64; 2]], want: &[[f64; 2]], tol: f64) {
    assert_eq!(got.len(), want.len(), "point count mismatch");
    for (i, (g, w)) in got.iter().zip(want).enumerate() {
        assert!(
            (g[0] - w[0]).abs() <= tol && (g[1] - w[1]).abs() <= tol,
            "point {i}: got ({}, {}), want ({}, {})",
            g[0],
            g[1],
            w[0],
            w[1]
        );
    }
}

/// Downsampled ASCII view of a raster for readable test failures. Each output
/// cell covers `cell` x `cell` pixels and the most interesting pixel wins:
/// '#' shape, 'g' ghost, '+' axis, '.' background.
pub fn snapshot_ascii(raster: &RasterSurface, cell: usize) -> String {
    assert!(cell > 0, "cell size must be positive");

    fn glyph(raster: &RasterSurface, x: usize, y: usize) -> char {
        if raster.pixel_is(x, y, Color::SHAPE) {
            '#'
        } else if raster.pixel_is(x, y, Color::GHOST) {
            'g'
        } else if raster.pixel_is(x, y, Color::AXIS) {
            '+'
        } else {
            '.'
        }
    }

    fn rank(c: char) -> u8 {
        match c {
            '#' => 3,
            'g' => 2,
            '+' => 1,
            _ => 0,
        }
    }

    let mut out = String::new();
    let mut y = 0;
    while y < raster.h {
        let mut x = 0;
        while x < raster.w {
            let mut best = '.';
            for py in y..(y + cell).min(raster.h) {
                for px in x..(x + cell).min(raster.w) {
                    let c = glyph(raster, px, py);
                    if rank(c) > rank(best) {
                        best = c;
                    }
                }
            }
            out.push(best);
            x += cell;
        }
        out.push('\n');
        y += cell;
    }
    out
}

/// Bounding box `(l, t, r, b)` (inclusive) of pixels matching `color`.
pub fn shape_bounds(raster: &RasterSurface, color: Color) -> Option<(usize, usize, usize, usize)> {
    let mut bounds: Option<(usize, usize, usize, usize)> = None;
    for y in 0..raster.h {
        for x in 0..raster.w {
            if raster.pixel_is(x, y, color) {
                bounds = Some(match bounds {
                    None => (x, y, x, y),
                    Some((l, t, r, b)) => (l.min(x), t.min(y), r.max(x), b.max(y)),
                });
            }
        }
    }
    bounds
}
