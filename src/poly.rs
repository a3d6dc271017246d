use crate::mat3::Mat3;

/// Ordered 2D vertex loop. The outline is implicitly closed: when drawn, the
/// last point connects back to the first.
///
/// `Clone` is the deep copy used by the render fold; a clone shares no point
/// storage with the original.
#[derive(Clone, Debug, PartialEq)]
pub struct Poly {
    points: Vec<[f64; 2]>,
}

impl Poly {
    pub fn new(points: Vec<[f64; 2]>) -> Self {
        debug_assert!(!points.is_empty(), "poly needs at least one point");
        Self { points }
    }

    /// The default base shape: the unit square with one corner at the origin.
    pub fn unit_square() -> Self {
        Self::new(vec![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]])
    }

    pub fn points(&self) -> &[[f64; 2]] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Applies `mat` to every vertex in place, each point treated as a
    /// homogeneous column vector `[x, y, 1]`.
    pub fn transform(&mut self, mat: &Mat3) {
        for p in &mut self.points {
            let (x, y) = mat.transform_point2(p[0], p[1]);
            *p = [x, y];
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::assert_points_close;

    #[test]
    fn clone_shares_no_storage_with_the_original() {
        let original = Poly::unit_square();
        let mut copy = original.clone();
        copy.transform(&Mat3::translate(5.0, 5.0));
        assert_eq!(original, Poly::unit_square());
        assert_ne!(copy, original);
    }

    #[test]
    fn transform_mutates_every_vertex_in_place() {
        let mut poly = Poly::unit_square();
        poly.transform(&Mat3::translate(2.0, 0.0));
        assert_points_close(
            poly.points(),
            &[[2.0, 0.0], [3.0, 0.0], [3.0, 1.0], [2.0, 1.0]],
            1e-9,
        );
    }

    #[test]
    fn transform_with_rotation_uses_homogeneous_form() {
        let mut poly = Poly::new(vec![[1.0, 0.0]]);
        poly.transform(&Mat3::rotate(90.0));
        assert_points_close(poly.points(), &[[0.0, 1.0]], 1e-9);
    }
}
