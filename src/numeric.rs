/*

    Declare numeric types used throughout this repo
    and the few matrix constructors the framing code needs.

    WARNING: If you like to use f32 instead of f64
    during computations, every alias below has to switch
    to its f32 counterpart (Vec3, Vec4, Mat4), including
    the literals in ZUP_TO_YUP.

    Matrices are column-major (bevy_math), points are
    column vectors, so `a * b` applies b first.

    @date: 2 Oct, 2025
    @author: Bartu
*/

use bevy_math::{DMat4, DVec3, DVec4};
pub type Float = f64; // see the f32 WARNING above
pub type Vector3 = DVec3;
pub type Vector4 = DVec4;
pub type Matrix4 = DMat4;

/// Basis change from a Z-up model frame to the viewer's Y-up frame:
/// (x, y, z) -> (x, z, -y)
pub const ZUP_TO_YUP: Matrix4 = Matrix4::from_cols(
    Vector4::new(1.0, 0.0, 0.0, 0.0),
    Vector4::new(0.0, 0.0, -1.0, 0.0),
    Vector4::new(0.0, 1.0, 0.0, 0.0),
    Vector4::new(0.0, 0.0, 0.0, 1.0),
);

pub fn approx_zero(x: Float) -> bool {
    x.abs() < 1e-8
}

pub fn transform_point(mat: &Matrix4, v: &Vector3) -> Vector3 {
    let v4 = Vector4::new(v.x, v.y, v.z, 1.0);
    let r = *mat * v4;
    Vector3::new(r.x, r.y, r.z)
}

/// p -> scale * (p + translation)
pub fn make_scale_translation(scale: Float, translation: Vector3) -> Matrix4 {
    Matrix4::from_scale(Vector3::splat(scale)) * Matrix4::from_translation(translation)
}

/// Same as make_scale_translation, followed by the Z-up to Y-up remap.
pub fn make_scale_translation_zup_to_yup(scale: Float, translation: Vector3) -> Matrix4 {
    ZUP_TO_YUP * make_scale_translation(scale, translation)
}
