//! The render boundary: flattened draw lists and GPU-uploadable matrices.
//!
//! The scene graph does no drawing of its own. A renderer either walks the
//! tree directly with [`SceneGraph::visit`](crate::SceneGraph::visit), or
//! collects a [`DrawList`] — a flat snapshot of `(node, world matrix)`
//! pairs — and uploads the matrices in one go.
//!
//! [`RawMatrix`] is the wire format for that upload: `#[repr(C)]`,
//! column-major, castable to bytes with [`bytemuck`].
//!
//! # Example
//!
//! ```
//! use arbor::{DrawList, SceneGraph, Vec3};
//!
//! let mut scene = SceneGraph::new();
//! let root = scene.spawn("root");
//! let prop = scene.spawn("prop");
//! scene.add_child(root, prop)?;
//! scene.translate(prop, Vec3::new(0.0, 1.0, 0.0))?;
//!
//! let draws = DrawList::collect(&mut scene, root)?;
//! assert_eq!(draws.len(), 2);
//!
//! // Ready for a uniform/storage buffer upload:
//! let raw = draws.raw_matrices();
//! let bytes: &[u8] = bytemuck::cast_slice(&raw);
//! assert_eq!(bytes.len(), draws.len() * 64);
//! # Ok::<(), arbor::Error>(())
//! ```

use glam::Mat4;

use crate::error::Result;
use crate::scene::{NodeId, SceneGraph};

/// One node's worth of rendering input: its identity and resolved world
/// matrix.
#[derive(Clone, Copy, Debug)]
pub struct DrawItem {
    pub node: NodeId,
    pub world: Mat4,
}

/// A flattened pre-order snapshot of a subtree's resolved world matrices.
#[derive(Clone, Debug, Default)]
pub struct DrawList {
    items: Vec<DrawItem>,
}

impl DrawList {
    /// Collects the subtree under `root` (inclusive) into a draw list,
    /// resolving world matrices along the way.
    pub fn collect(scene: &mut SceneGraph, root: NodeId) -> Result<Self> {
        let mut items = Vec::new();
        scene.visit(root, |node, world| items.push(DrawItem { node, world }))?;
        Ok(Self { items })
    }

    /// The collected draw items, in traversal order.
    pub fn items(&self) -> &[DrawItem] {
        &self.items
    }

    /// Number of items in the list.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the list is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The world matrices as tightly packed GPU-uploadable values, in the
    /// same order as [`items`](DrawList::items).
    pub fn raw_matrices(&self) -> Vec<RawMatrix> {
        self.items.iter().map(|item| item.world.into()).collect()
    }
}

/// A column-major 4x4 matrix in GPU memory layout.
///
/// 64 bytes, `#[repr(C)]`, [`bytemuck::Pod`] — cast a slice of these
/// straight into a buffer upload.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct RawMatrix {
    pub columns: [[f32; 4]; 4],
}

impl From<Mat4> for RawMatrix {
    fn from(m: Mat4) -> Self {
        Self {
            columns: m.to_cols_array_2d(),
        }
    }
}

impl RawMatrix {
    /// This matrix as raw bytes.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }
}
