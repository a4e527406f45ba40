//! Quaternion and matrix helpers for transform composition.
//!
//! The scene graph composes orientations with [`compose`] and derives view
//! matrices with [`rigid_inverse`]. Everything else (axis rotations,
//! quaternion-to-matrix conversion, vector rotation) comes straight from
//! [`glam`] (`Quat::from_rotation_x/y/z`, `Mat4::from_quat`, `q * v`) and
//! is re-exported from the crate root.
//!
//! All angles are in radians.

use glam::{Mat4, Quat, Vec3};

/// Composes two rotations: the result applies `first`, then `second`.
///
/// The operand order is the whole point of this function existing. World
/// orientation is always built as `compose(local, parent_world)` — the
/// node's own rotation happens first, in the parent's frame. Swapping the
/// operands changes the rotation semantics of the entire tree.
///
/// The result is renormalized so that repeated composition (every frame,
/// for a spinning node) cannot drift the orientation off unit length.
///
/// # Example
///
/// ```
/// use arbor::{math, Quat};
///
/// let yaw = Quat::from_rotation_y(std::f32::consts::FRAC_PI_2);
/// let pitch = Quat::from_rotation_x(0.3);
///
/// // Pitch first (in the un-yawed frame), then yaw.
/// let orientation = math::compose(pitch, yaw);
/// assert!(orientation.is_normalized());
/// ```
pub fn compose(first: Quat, second: Quat) -> Quat {
    (second * first).normalize()
}

/// Fast inverse of a rotation + translation transform.
///
/// For a rigid transform (no scale) the inverse is the transposed rotation
/// applied after negating and rotating the translation. This is cheaper and
/// numerically steadier than a general 4x4 inverse, and is how cameras turn
/// a world transform into a view matrix.
///
/// # Example
///
/// ```
/// use arbor::{math, Mat4, Quat, Vec3};
///
/// let q = Quat::from_rotation_y(0.7);
/// let t = Vec3::new(1.0, 2.0, 3.0);
///
/// let inv = math::rigid_inverse(q, t);
/// let forward = Mat4::from_rotation_translation(q, t);
/// assert!((inv * forward).abs_diff_eq(Mat4::IDENTITY, 1e-5));
/// ```
pub fn rigid_inverse(orientation: Quat, translation: Vec3) -> Mat4 {
    let inverse = orientation.conjugate();
    Mat4::from_rotation_translation(inverse, inverse * -translation)
}

/// Extracts the rotation axis and angle from a quaternion.
///
/// At (or numerically indistinguishable from) the identity rotation there
/// is no meaningful axis; this returns `(Vec3::X, 0.0)` rather than a NaN
/// axis. That case comes up routinely — a camera looking straight down an
/// axis, a node that has not been rotated yet — so it is a defined
/// fallback, not an error.
pub fn axis_angle(q: Quat) -> (Vec3, f32) {
    let (axis, angle) = q.to_axis_angle();
    if angle.abs() < 1e-6 || !axis.is_finite() {
        (Vec3::X, 0.0)
    } else {
        (axis, angle)
    }
}

/// Normalizes a vector into a direction, or `None` for zero-length input.
///
/// Use this wherever a direction comes from subtraction of two points that
/// might coincide (look-at targets, movement deltas).
pub fn try_direction(v: Vec3) -> Option<Vec3> {
    v.try_normalize()
}
