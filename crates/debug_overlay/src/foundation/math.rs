//! Math utilities and types
//!
//! Provides the fundamental math types used by the overlay. All geometry is
//! expressed with `nalgebra` single-precision types.

pub use nalgebra::{Matrix4, Quaternion, Unit, Vector3, Vector4};

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4D vector type
pub type Vec4 = Vector4<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// Quaternion type for rotations
pub type Quat = Unit<Quaternion<f32>>;

/// Full turn in radians
pub const TAU: f32 = std::f32::consts::TAU;

/// Build a translation * rotation * scale matrix.
pub fn trs(position: &Vec3, rotation: &Quat, scale: &Vec3) -> Mat4 {
    Mat4::new_translation(position)
        * rotation.to_homogeneous()
        * Mat4::new_nonuniform_scaling(scale)
}

/// Rotation whose local +Z axis points along `forward`.
///
/// Falls back to the Z axis as the up hint when `forward` is (anti)parallel to
/// +Y, and to identity for a zero-length direction.
pub fn look_rotation(forward: &Vec3) -> Quat {
    if forward.norm_squared() <= f32::EPSILON {
        return Quat::identity();
    }

    let dir = forward.normalize();
    let up = if dir.dot(&Vec3::y()).abs() > 0.999 {
        Vec3::z()
    } else {
        Vec3::y()
    };

    Quat::face_towards(&dir, &up)
}

/// Signed angle in degrees between `from` and `to`, measured around `axis`.
///
/// The magnitude is the unsigned angle between the two vectors; the sign is
/// positive when `from × to` points along `axis`.
pub fn signed_angle_deg(from: &Vec3, to: &Vec3, axis: &Vec3) -> f32 {
    let denominator = (from.norm_squared() * to.norm_squared()).sqrt();
    if denominator < 1e-15 {
        return 0.0;
    }

    let cos = (from.dot(to) / denominator).clamp(-1.0, 1.0);
    let unsigned = cos.acos().to_degrees();
    let cross = from.cross(to);
    let sign = if axis.dot(&cross) < 0.0 { -1.0 } else { 1.0 };
    unsigned * sign
}

/// First three components of a matrix column.
pub fn column3(matrix: &Mat4, index: usize) -> Vec3 {
    let column = matrix.column(index);
    Vec3::new(column[0], column[1], column[2])
}
