//! Local transform state and the object/inertial mutation spaces.
//!
//! This module provides [`Transform`], the translation/orientation/scale
//! triple every scene node owns, and two borrow-scoped views over it:
//!
//! - [`ObjectSpace`] — inputs are expressed in the transform's *own rotated
//!   frame* ("translate forward" moves along the local -Z axis, wherever
//!   that currently points)
//! - [`InertialSpace`] — inputs are expressed in the *parent's unrotated
//!   axes* ("translate up" adds directly to Y, ignoring orientation)
//!
//! Both views mutate the same underlying fields; they differ only in how an
//! input vector or rotation is pre-transformed before being applied.
//!
//! # Transformation Order
//!
//! [`Transform::matrix()`] composes in the standard order:
//! **Scale → Rotate → Translate** (SRT). The mesh is scaled around its local
//! origin, rotated around its local origin, then translated into the
//! parent's space.
//!
//! # Example
//!
//! ```
//! use arbor::{Transform, Quat, Vec3};
//!
//! let mut t = Transform::new()
//!     .translation(Vec3::new(0.0, 2.0, 0.0))
//!     .orientation(Quat::from_rotation_y(std::f32::consts::FRAC_PI_2));
//!
//! // Slide one unit "forward" along wherever the transform is facing.
//! t.object().translate(Vec3::NEG_Z);
//!
//! // Hop one unit straight up, orientation notwithstanding.
//! t.inertial().translate(Vec3::Y);
//! ```

use glam::{Mat4, Quat, Vec3};

use crate::math;

/// A local transform: translation, orientation, and scale.
///
/// `Transform` is the local (parent-relative) state of a scene node. It has
/// no notion of dirtiness or parents — that bookkeeping belongs to the
/// [`SceneGraph`](crate::SceneGraph) that owns it.
///
/// # Builder Pattern
///
/// ```
/// use arbor::{Transform, Quat, Vec3};
///
/// let transform = Transform::new()
///     .translation(Vec3::new(0.0, 5.0, -10.0))
///     .orientation(Quat::from_rotation_y(std::f32::consts::PI / 4.0))
///     .uniform_scale(2.0);
/// ```
///
/// # Default Values
///
/// - `translation`: `(0, 0, 0)`
/// - `orientation`: identity quaternion (no rotation)
/// - `scale`: `(1, 1, 1)`
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    /// Translation relative to the parent.
    pub translation: Vec3,
    /// Orientation as a unit quaternion.
    pub orientation: Quat,
    /// Scale factors for each axis. Strictly per-node: scale never
    /// propagates to children in the scene graph.
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            translation: Vec3::ZERO,
            orientation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    /// Creates a new identity transform (origin, no rotation, unit scale).
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a transform at the given translation.
    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            ..Default::default()
        }
    }

    /// Sets the translation component.
    pub fn translation(mut self, translation: Vec3) -> Self {
        self.translation = translation;
        self
    }

    /// Sets the orientation component.
    ///
    /// For common rotations use glam's constructors:
    /// `Quat::from_rotation_x/y/z(angle)` or
    /// `Quat::from_axis_angle(axis, angle)`.
    pub fn orientation(mut self, orientation: Quat) -> Self {
        self.orientation = orientation;
        self
    }

    /// Sets non-uniform scale factors for each axis.
    pub fn scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    /// Sets uniform scale on all axes.
    pub fn uniform_scale(mut self, scale: f32) -> Self {
        self.scale = Vec3::splat(scale);
        self
    }

    /// Replaces the translation.
    pub fn set_translation(&mut self, translation: Vec3) {
        self.translation = translation;
    }

    /// Replaces the orientation. The quaternion is expected to be unit
    /// length; composition helpers renormalize on every update.
    pub fn set_orientation(&mut self, orientation: Quat) {
        self.orientation = orientation;
    }

    /// Replaces the scale.
    pub fn set_scale(&mut self, scale: Vec3) {
        self.scale = scale;
    }

    /// The local-to-parent matrix, composed in SRT order.
    ///
    /// # Example
    ///
    /// ```
    /// use arbor::{Transform, Vec3};
    ///
    /// let m = Transform::new()
    ///     .translation(Vec3::new(3.0, 0.0, 0.0))
    ///     .uniform_scale(2.0)
    ///     .matrix();
    ///
    /// // Scale happens about the origin, then translation.
    /// let p = m.transform_point3(Vec3::X);
    /// assert!(p.abs_diff_eq(Vec3::new(5.0, 0.0, 0.0), 1e-6));
    /// ```
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.orientation, self.translation)
    }

    /// A view that interprets inputs in this transform's own rotated frame.
    pub fn object(&mut self) -> ObjectSpace<'_> {
        ObjectSpace(self)
    }

    /// A view that interprets inputs in the parent's unrotated axes.
    pub fn inertial(&mut self) -> InertialSpace<'_> {
        InertialSpace(self)
    }
}

/// Mutates a [`Transform`] with inputs expressed in its own rotated frame.
///
/// "Forward" for an object-space translation is the local -Z axis after the
/// current orientation is applied — the direction the node is facing.
pub struct ObjectSpace<'a>(&'a mut Transform);

impl ObjectSpace<'_> {
    /// Translates along the transform's current local axes.
    pub fn translate(&mut self, v: Vec3) {
        self.0.translation += self.0.orientation * v;
    }

    /// Rotates in the local frame: the new rotation is applied first, then
    /// the existing orientation carries it into the parent's frame. This is
    /// the "pitch about my own X axis" composition.
    pub fn rotate(&mut self, q: Quat) {
        self.0.orientation = math::compose(q, self.0.orientation);
    }

    /// The local X axis in the parent's frame.
    pub fn x_axis(&self) -> Vec3 {
        self.0.orientation * Vec3::X
    }

    /// The local Y axis in the parent's frame.
    pub fn y_axis(&self) -> Vec3 {
        self.0.orientation * Vec3::Y
    }

    /// The local Z axis in the parent's frame.
    pub fn z_axis(&self) -> Vec3 {
        self.0.orientation * Vec3::Z
    }
}

/// Mutates a [`Transform`] with inputs expressed in the parent's unrotated
/// axes.
///
/// An inertial-space translation ignores the current orientation entirely:
/// `translate(Vec3::Y)` always moves one unit up the parent's Y axis.
pub struct InertialSpace<'a>(&'a mut Transform);

impl InertialSpace<'_> {
    /// Translates along the parent's axes.
    pub fn translate(&mut self, v: Vec3) {
        self.0.translation += v;
    }

    /// Rotates in the parent's frame: the existing orientation is applied
    /// first, then the new rotation. This is the "yaw about the world's Y
    /// axis" composition.
    pub fn rotate(&mut self, q: Quat) {
        self.0.orientation = math::compose(self.0.orientation, q);
    }
}
