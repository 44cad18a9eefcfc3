/*

    Axis Aligned Bounding Box of a model and the framing
    transforms derived from it.

    The box is widened in place by `add` and mapped to a
    new box by `transform`. A default box is inverted
    (min > max on every axis) until the first `add`.

    @author: bartu
    @date: 9 Nov, 2025
*/

use std::fmt;

use rayon::prelude::*;

use crate::prelude::*;
use crate::interval::Interval;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min: Vector3,
    pub max: Vector3,
}

/// Uniform scale and translation that frame a box at the origin.
/// Applied as p -> scale * (p + translation).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Centering {
    pub scale: Float,
    pub translation: Vector3,
}

impl Centering {
    pub fn to_matrix(&self, z_up: bool) -> Matrix4 {
        if z_up {
            make_scale_translation_zup_to_yup(self.scale, self.translation)
        } else {
            make_scale_translation(self.scale, self.translation)
        }
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::new_empty()
    }
}

impl BoundingBox {

    /// "No box is known yet". Uses infinities so it is wider than
    /// anything in comparisons. Never `add` to a copy of this expecting
    /// finite arithmetic on the untouched axes.
    pub const INVALID: Self = Self::from_axis_sentinel(Interval::EMPTY);

    /// Empty box using the largest finite values as sentinels,
    /// so the first `add` sets real bounds on every axis.
    pub const fn new_empty() -> Self {
        Self::from_axis_sentinel(Interval::EMPTY_FINITE)
    }

    const fn from_axis_sentinel(axis: Interval) -> Self {
        Self {
            min: Vector3::splat(axis.min),
            max: Vector3::splat(axis.max),
        }
    }

    /// Stores the bounds as given, min <= max is not checked.
    pub fn new(min_x: Float, min_y: Float, min_z: Float, max_x: Float, max_y: Float, max_z: Float) -> Self {
        Self {
            min: Vector3::new(min_x, min_y, min_z),
            max: Vector3::new(max_x, max_y, max_z),
        }
    }

    pub fn from_corners(min: Vector3, max: Vector3) -> Self {
        Self { min, max }
    }

    pub fn from_points(points: &[Vector3]) -> Self {
        points.iter().copied().collect()
    }

    /// Same result as from_points, accumulated on the rayon pool.
    pub fn from_points_par(points: &[Vector3]) -> Self {
        points
            .par_iter()
            .fold(BoundingBox::default, |mut bbox, p| {
                bbox.add(*p);
                bbox
            })
            .reduce(BoundingBox::default, |mut a, b| {
                a.union_with(&b);
                a
            })
    }

    /// Widen each axis to include `point`. Never shrinks: a NaN
    /// coordinate leaves its axis untouched.
    #[inline]
    pub fn add(&mut self, point: Vector3) {
        for i in 0..3 {
            let mut axis = self.axis(i);
            axis.expand(point[i]);
            self.set_axis(i, axis);
        }
    }

    #[inline]
    pub fn add_xyz(&mut self, x: Float, y: Float, z: Float) {
        self.add(Vector3::new(x, y, z));
    }

    /// Widen to include another box. Empty boxes are ignored so their
    /// sentinels never leak into the result.
    pub fn union_with(&mut self, other: &BoundingBox) {
        if other.is_empty() {
            return;
        }
        self.add(other.min);
        self.add(other.max);
    }

    /// True if any axis is inverted (never widened, or INVALID).
    pub fn is_empty(&self) -> bool {
        (0..3).any(|i| !self.axis(i).validate())
    }

    pub fn contains(&self, point: Vector3) -> bool {
        (0..3).all(|i| self.axis(i).contains(point[i]))
    }

    pub fn size(&self) -> Vector3 {
        self.max - self.min
    }

    pub fn center(&self) -> Vector3 {
        self.min + self.size() * 0.5
    }

    /// Length of the space diagonal
    pub fn diagonal(&self) -> Float {
        self.max.distance(self.min)
    }

    /// Range of one axis, 0 = x, 1 = y, 2 = z. Panics on other indices.
    pub fn axis(&self, i: usize) -> Interval {
        Interval::new(self.min[i], self.max[i])
    }

    fn set_axis(&mut self, i: usize, axis: Interval) {
        self.min[i] = axis.min;
        self.max[i] = axis.max;
    }

    /// The 8 corners, bit 0/1/2 of the index selecting max on x/y/z.
    pub fn corners(&self) -> [Vector3; 8] {
        std::array::from_fn(|i| {
            Vector3::new(
                if i & 1 == 0 { self.min.x } else { self.max.x },
                if i & 2 == 0 { self.min.y } else { self.max.y },
                if i & 4 == 0 { self.min.z } else { self.max.z },
            )
        })
    }

    /// Scale and translation that move the center to the origin and
    /// make the diagonal `diagonal_size` long. A zero diagonal (single
    /// point) keeps scale 1.
    pub fn centering(&self, diagonal_size: Float) -> Centering {
        if self.is_empty() {
            debug!("Centering an empty bounding box {:?}, result will not be finite", self);
        }

        let diagonal = self.diagonal();
        let translation = -self.center();
        let scale = if diagonal == 0.0 {
            debug!("Degenerate bounding box at {:?}, keeping scale 1", self.min);
            1.0
        } else {
            diagonal_size / diagonal
        };

        Centering { scale, translation }
    }

    /// Matrix that centers the model at the origin and scales it to
    /// the given diagonal size. With `z_up` the model is also rotated
    /// from Z-up into the viewer's Y-up frame.
    pub fn get_centering_matrix(&self, diagonal_size: Float, z_up: bool) -> Matrix4 {
        self.centering(diagonal_size).to_matrix(z_up)
    }

    /// New box around the images of `min` and `max` only.
    ///
    /// WARNING: exact only for transforms that keep the box axis aligned
    /// (scale, translation, reflection). Under a rotation the result can
    /// miss parts of the transformed volume, use `transform_corners` there.
    pub fn transform(&self, transform: &Matrix4) -> BoundingBox {
        let t_min = transform_point(transform, &self.min);
        let t_max = transform_point(transform, &self.max);
        let mut result = BoundingBox::default();
        result.add(t_min);
        result.add(t_max);
        result
    }

    /// New box around the images of all 8 corners, tight for any affine map.
    pub fn transform_corners(&self, transform: &Matrix4) -> BoundingBox {
        self.corners()
            .iter()
            .map(|c| transform_point(transform, c))
            .collect()
    }
}

impl FromIterator<Vector3> for BoundingBox {
    fn from_iter<I: IntoIterator<Item = Vector3>>(iter: I) -> Self {
        let mut bbox = BoundingBox::default();
        bbox.extend(iter);
        bbox
    }
}

impl Extend<Vector3> for BoundingBox {
    fn extend<I: IntoIterator<Item = Vector3>>(&mut self, iter: I) {
        for p in iter {
            self.add(p);
        }
    }
}

impl fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "<empty>");
        }
        write!(
            f,
            "[{} {} {}] .. [{} {} {}]",
            self.min.x, self.min.y, self.min.z, self.max.x, self.max.y, self.max.z
        )
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn sample_points() -> Vec<Vector3> {
        vec![
            Vector3::new(1.0, -2.0, 0.5),
            Vector3::new(-3.0, 4.0, 2.0),
            Vector3::new(0.0, 0.0, -7.5),
            Vector3::new(2.5, 1.0, 1.0),
        ]
    }

    #[test]
    fn default_is_inverted_on_every_axis() {
        let bbox = BoundingBox::default();
        for i in 0..3 {
            assert!(bbox.min[i] > bbox.max[i]);
        }
        assert!(bbox.is_empty());
        assert!(BoundingBox::INVALID.is_empty());
        assert_eq!(BoundingBox::INVALID.min, Vector3::INFINITY);
    }

    #[test]
    fn single_point_gives_flat_box() {
        let p = Vector3::new(0.3, -1.0, 9.0);
        let mut bbox = BoundingBox::default();
        bbox.add(p);
        assert_eq!(bbox.min, p);
        assert_eq!(bbox.max, p);
        assert!(!bbox.is_empty());
        assert_eq!(bbox.diagonal(), 0.0);
    }

    #[test]
    fn add_tracks_per_axis_extrema() {
        let bbox = BoundingBox::from_points(&sample_points());
        assert_eq!(bbox.min, Vector3::new(-3.0, -2.0, -7.5));
        assert_eq!(bbox.max, Vector3::new(2.5, 4.0, 2.0));
    }

    #[test]
    fn add_is_order_independent() {
        let points = sample_points();
        let forward = BoundingBox::from_points(&points);

        let mut backward = BoundingBox::default();
        for p in points.iter().rev() {
            backward.add_xyz(p.x, p.y, p.z);
        }
        assert_eq!(forward, backward);

        // split and merge
        let mut left = BoundingBox::from_points(&points[..1]);
        let right = BoundingBox::from_points(&points[1..]);
        left.union_with(&right);
        assert_eq!(forward, left);
    }

    #[test]
    fn nan_coordinate_never_shrinks_the_box() {
        let mut bbox = BoundingBox::default();
        bbox.add_xyz(Float::NAN, 1.0, 1.0);
        assert!(!bbox.axis(0).validate());
        assert_eq!(bbox.axis(1), Interval::new(1.0, 1.0));

        bbox.add_xyz(2.0, 1.0, 1.0);
        assert_eq!(bbox.axis(0), Interval::new(2.0, 2.0));

        bbox.add_xyz(0.0, 1.0, 1.0);
        bbox.add_xyz(Float::NAN, Float::NAN, Float::NAN);
        bbox.add_xyz(1.0, 1.0, 1.0);
        assert_eq!(bbox, BoundingBox::new(0.0, 1.0, 1.0, 2.0, 1.0, 1.0));
    }

    #[test]
    fn empty_sentinels_come_from_interval() {
        assert_eq!(BoundingBox::default().axis(0), Interval::EMPTY_FINITE);
        assert_eq!(BoundingBox::INVALID.axis(2), Interval::EMPTY);
        assert_eq!(BoundingBox::default().min, Vector3::splat(Float::MAX));
        assert_eq!(BoundingBox::default().max, Vector3::splat(Float::MIN));
        assert!(!BoundingBox::INVALID.contains(Vector3::ZERO));
    }

    #[test]
    fn parallel_accumulation_matches_serial() {
        let points: Vec<Vector3> = (0..10_000)
            .map(|i| {
                let t = i as Float * 0.01;
                Vector3::new(t.sin() * 3.0, t.cos() - 1.0, t * 0.5 - 20.0)
            })
            .collect();
        assert_eq!(BoundingBox::from_points_par(&points), BoundingBox::from_points(&points));
        assert!(BoundingBox::from_points_par(&[]).is_empty());
    }

    #[test]
    fn union_ignores_empty_boxes() {
        let mut bbox = BoundingBox::new(0.0, 0.0, 0.0, 1.0, 1.0, 1.0);
        bbox.union_with(&BoundingBox::default());
        bbox.union_with(&BoundingBox::INVALID);
        assert_eq!(bbox, BoundingBox::new(0.0, 0.0, 0.0, 1.0, 1.0, 1.0));
    }

    #[test]
    fn explicit_corners_are_not_validated() {
        let bbox = BoundingBox::new(1.0, 1.0, 1.0, 0.0, 0.0, 0.0);
        assert_eq!(bbox.min, Vector3::ONE);
        assert_eq!(bbox.max, Vector3::ZERO);
        assert!(bbox.is_empty());
    }

    #[test]
    fn centering_degenerate_box_keeps_unit_scale() {
        let bbox = BoundingBox::new(0.0, 0.0, 0.0, 0.0, 0.0, 0.0);
        let c = bbox.centering(5.0);
        assert_eq!(c.scale, 1.0);
        assert_eq!(c.translation, Vector3::ZERO);

        // a single off-origin point is only moved to the origin
        let mut point = BoundingBox::default();
        point.add_xyz(2.0, -1.0, 4.0);
        let m = point.get_centering_matrix(5.0, false);
        assert!(transform_point(&m, &point.min).abs_diff_eq(Vector3::ZERO, 1e-12));
    }

    #[test]
    fn centering_symmetric_box() {
        let bbox = BoundingBox::new(-1.0, -1.0, -1.0, 1.0, 1.0, 1.0);
        let d = 4.0;
        let diagonal = 2.0 * (3.0 as Float).sqrt();
        assert!(approx_zero(bbox.diagonal() - diagonal));

        let c = bbox.centering(d);
        assert!(approx_zero(c.scale - d / diagonal));
        assert!(c.translation.abs_diff_eq(Vector3::ZERO, 1e-12));
    }

    #[test]
    fn centering_matrix_frames_box() {
        let bbox = BoundingBox::new(2.0, 3.0, -1.0, 6.0, 5.0, 3.0);
        let m = bbox.get_centering_matrix(1.0, false);

        assert!(transform_point(&m, &bbox.center()).abs_diff_eq(Vector3::ZERO, 1e-12));
        let framed = bbox.transform(&m);
        assert!(approx_zero(framed.diagonal() - 1.0));
        assert!(framed.center().abs_diff_eq(Vector3::ZERO, 1e-12));
    }

    #[test]
    fn centering_matrix_zup_puts_top_on_y() {
        let bbox = BoundingBox::new(0.0, 0.0, 0.0, 2.0, 2.0, 4.0);
        let c = bbox.centering(1.0);
        let m = bbox.get_centering_matrix(1.0, true);

        // offset of max from center is (1, 1, 2), remapped to (1, 2, -1)
        let top = transform_point(&m, &bbox.max);
        assert!(top.abs_diff_eq(Vector3::new(1.0, 2.0, -1.0) * c.scale, 1e-12));
        assert!(transform_point(&m, &bbox.center()).abs_diff_eq(Vector3::ZERO, 1e-12));
    }

    #[test]
    fn transform_identity_is_idempotent() {
        let bbox = BoundingBox::new(0.0, 0.0, 0.0, 1.0, 1.0, 1.0);
        let once = bbox.transform(&Matrix4::IDENTITY);
        assert_eq!(once, bbox);
        assert_eq!(once.transform(&Matrix4::IDENTITY), bbox);
    }

    #[test]
    fn transform_scale_and_reflection() {
        let bbox = BoundingBox::new(0.0, 0.0, 0.0, 1.0, 1.0, 1.0);
        let scaled = bbox.transform(&Matrix4::from_scale(Vector3::splat(2.0)));
        assert_eq!(scaled, BoundingBox::new(0.0, 0.0, 0.0, 2.0, 2.0, 2.0));

        // reflected corners swap, the result is still min <= max
        let mirrored = bbox.transform(&Matrix4::from_scale(Vector3::new(-1.0, 1.0, 1.0)));
        assert_eq!(mirrored, BoundingBox::new(-1.0, 0.0, 0.0, 0.0, 1.0, 1.0));
    }

    #[test]
    fn two_corner_transform_misses_rotated_volume() {
        let bbox = BoundingBox::new(0.0, 0.0, 0.0, 1.0, 1.0, 1.0);
        let rot = Matrix4::from_rotation_z(std::f64::consts::FRAC_PI_4);
        let rotated_x = transform_point(&rot, &Vector3::X);

        let approx = bbox.transform(&rot);
        assert!(!approx.contains(rotated_x));

        let tight = bbox.transform_corners(&rot);
        for c in bbox.corners() {
            let p = transform_point(&rot, &c);
            assert!(tight.axis(0).min - 1e-12 <= p.x && p.x <= tight.axis(0).max + 1e-12);
            assert!(tight.axis(1).min - 1e-12 <= p.y && p.y <= tight.axis(1).max + 1e-12);
        }
        assert!(approx_zero(tight.size().x - (2.0 as Float).sqrt()));
    }

    #[test]
    fn corners_and_axes() {
        let bbox = BoundingBox::new(-1.0, 0.0, 2.0, 1.0, 3.0, 4.0);
        let corners = bbox.corners();
        assert_eq!(corners[0], bbox.min);
        assert_eq!(corners[7], bbox.max);
        assert_eq!(corners[1], Vector3::new(1.0, 0.0, 2.0));
        assert_eq!(bbox.axis(1), Interval::new(0.0, 3.0));
        assert!(bbox.axis(2).contains(3.0));
        assert!(bbox.contains(Vector3::new(0.0, 3.0, 2.5)));
        assert!(!bbox.contains(Vector3::new(0.0, 3.1, 2.5)));
    }

    #[test]
    fn display_marks_empty_boxes() {
        assert_eq!(BoundingBox::default().to_string(), "<empty>");
        assert_eq!(BoundingBox::new(0.0, 0.0, 0.0, 1.0, 2.0, 3.0).to_string(), "[0 0 0] .. [1 2 3]");
    }
}
