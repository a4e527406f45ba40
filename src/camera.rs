//! Cameras: projection state plus view matrices derived from scene nodes.
//!
//! A [`Camera`] is a scene node with a projection specification attached.
//! The node gives it a place in the transform tree (cameras parent to
//! vehicles, rigs, or the root like any other node); the projection turns a
//! viewport into clip space.
//!
//! The view matrix is the *rigid inverse* of the node's resolved world
//! transform — transposed rotation plus negated, rotated translation — not
//! a general 4x4 inverse. Node scale deliberately does not leak into the
//! view.
//!
//! # Example
//!
//! ```
//! use arbor::{Camera, SceneGraph, Vec3};
//!
//! let mut scene = SceneGraph::new();
//! let rig = scene.spawn("camera rig");
//! scene.set_translation(rig, Vec3::new(0.0, 2.0, 10.0))?;
//!
//! let mut camera = Camera::perspective(rig, 60.0_f32.to_radians(), 16.0 / 9.0, 0.1, 1000.0);
//!
//! // On window resize:
//! camera.set_viewport(1920.0, 1080.0);
//!
//! let view = camera.view_matrix(&mut scene)?;
//! let proj = camera.projection_matrix();
//! let view_proj = proj * view;
//! # let _ = view_proj;
//! # Ok::<(), arbor::Error>(())
//! ```

use glam::Mat4;

use crate::error::Result;
use crate::math;
use crate::scene::{NodeId, SceneGraph};

/// Projection specification for a camera.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Projection {
    /// Perspective projection.
    Perspective {
        /// Vertical field of view in radians.
        fov_y: f32,
        /// Viewport width / height.
        aspect: f32,
        near: f32,
        far: f32,
    },
    /// Orthographic projection with explicit bounds.
    Orthographic {
        left: f32,
        right: f32,
        bottom: f32,
        top: f32,
        near: f32,
        far: f32,
    },
}

/// A projection attached to a scene node.
///
/// The projection matrix is cached and only recomputed after a parameter
/// change (`set_fov`, `set_clip_planes`, `set_viewport`, `set_projection`)
/// — the same mark-dirty-on-set pattern the scene nodes use for world
/// state.
#[derive(Clone, Debug)]
pub struct Camera {
    node: NodeId,
    projection: Projection,
    /// `None` while a parameter change is pending recompute.
    cached: Option<Mat4>,
}

impl Camera {
    /// Creates a perspective camera attached to `node`.
    ///
    /// `fov_y` is the vertical field of view in radians.
    pub fn perspective(node: NodeId, fov_y: f32, aspect: f32, near: f32, far: f32) -> Self {
        Self {
            node,
            projection: Projection::Perspective {
                fov_y,
                aspect,
                near,
                far,
            },
            cached: None,
        }
    }

    /// Creates an orthographic camera attached to `node`.
    pub fn orthographic(
        node: NodeId,
        left: f32,
        right: f32,
        bottom: f32,
        top: f32,
        near: f32,
        far: f32,
    ) -> Self {
        Self {
            node,
            projection: Projection::Orthographic {
                left,
                right,
                bottom,
                top,
                near,
                far,
            },
            cached: None,
        }
    }

    /// The scene node this camera reads its world transform from.
    pub fn node(&self) -> NodeId {
        self.node
    }

    /// The current projection specification.
    pub fn projection(&self) -> Projection {
        self.projection
    }

    /// Replaces the projection specification outright.
    pub fn set_projection(&mut self, projection: Projection) {
        self.projection = projection;
        self.cached = None;
    }

    /// Sets the vertical field of view in radians. No effect on an
    /// orthographic camera.
    pub fn set_fov(&mut self, fov_y: f32) {
        if let Projection::Perspective {
            fov_y: ref mut current,
            ..
        } = self.projection
        {
            *current = fov_y;
            self.cached = None;
        }
    }

    /// Sets the near and far clip planes.
    pub fn set_clip_planes(&mut self, new_near: f32, new_far: f32) {
        match &mut self.projection {
            Projection::Perspective { near, far, .. }
            | Projection::Orthographic { near, far, .. } => {
                *near = new_near;
                *far = new_far;
            }
        }
        self.cached = None;
    }

    /// Feeds a viewport resize into the projection.
    ///
    /// Updates the aspect ratio of a perspective projection; orthographic
    /// bounds are explicit and stay as set.
    pub fn set_viewport(&mut self, width: f32, height: f32) {
        if let Projection::Perspective { aspect, .. } = &mut self.projection {
            *aspect = width / height;
            self.cached = None;
        }
    }

    /// The projection matrix, recomputed only after a parameter change.
    pub fn projection_matrix(&mut self) -> Mat4 {
        *self.cached.get_or_insert_with(|| match self.projection {
            Projection::Perspective {
                fov_y,
                aspect,
                near,
                far,
            } => Mat4::perspective_rh(fov_y, aspect, near, far),
            Projection::Orthographic {
                left,
                right,
                bottom,
                top,
                near,
                far,
            } => Mat4::orthographic_rh(left, right, bottom, top, near, far),
        })
    }

    /// The view matrix: the rigid inverse of the node's resolved world
    /// rotation and translation.
    ///
    /// Takes the graph mutably because the read may resolve stale world
    /// caches along the node's ancestor chain.
    pub fn view_matrix(&self, scene: &mut SceneGraph) -> Result<Mat4> {
        let translation = scene.world_translation(self.node)?;
        let orientation = scene.world_orientation(self.node)?;
        Ok(math::rigid_inverse(orientation, translation))
    }

    /// `projection * view` in one call.
    pub fn view_projection_matrix(&mut self, scene: &mut SceneGraph) -> Result<Mat4> {
        let view = self.view_matrix(scene)?;
        Ok(self.projection_matrix() * view)
    }
}
