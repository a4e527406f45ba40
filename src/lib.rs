//! # Arbor
//!
//! **A lazy-caching 3D scene graph for Rust that gets out of your way.**
//!
//! Build a transform tree, mutate it freely, and read back world-space
//! state that is always correct and never recomputed more than it has to
//! be. Rendering stays yours: the graph hands your draw code resolved
//! world matrices and does nothing else.
//!
//! ## Quick Start
//!
//! ```
//! use arbor::*;
//!
//! fn main() -> arbor::Result<()> {
//!     let mut scene = SceneGraph::new();
//!
//!     let ship = scene.spawn("ship");
//!     let turret = scene.spawn("turret");
//!     scene.add_child(ship, turret)?;
//!     scene.translate(turret, Vec3::new(0.0, 1.5, 0.0))?;
//!
//!     // Fly the ship; the turret follows for free.
//!     scene.rotate_about_y(ship, 0.25)?;
//!     scene.translate_object(ship, Vec3::NEG_Z)?;
//!
//!     // Hand resolved matrices to whatever does the drawing.
//!     scene.visit(ship, |_node, _world| {
//!         // draw(node, world)
//!     })?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Philosophy
//!
//! - **Mutate now, resolve later** — transform mutations eagerly mark a
//!   subtree stale; world state recomputes lazily, on read, exactly once.
//! - **Handles, not references** — nodes live in the graph's arena and are
//!   addressed by copyable [`NodeId`]s. No reference cycles, no lifetime
//!   gymnastics, stale handles fail loudly.
//! - **Rendering is a visitor** — the graph calls your closure with
//!   `(node, world_matrix)` and leaves every GPU decision to you.
//! - **Structural errors are programmer errors** — removing a non-child or
//!   creating a cycle returns an [`Error`] immediately; the tree is never
//!   silently corrupted.
//!
//! ## Single-Threaded Contract
//!
//! The graph assumes one mutator and one reader on a single timeline. A
//! multi-threaded host must fully serialize scene mutation and traversal —
//! finish the simulation pass before the render pass reads.

mod camera;
mod error;
mod logging;
pub mod math;
mod render;
mod scene;
mod transform;

pub use camera::{Camera, Projection};
pub use error::{Error, Result};
pub use logging::init_logging;
pub use render::{DrawItem, DrawList, RawMatrix};
pub use scene::{Ancestors, NodeId, SceneGraph};
pub use transform::{InertialSpace, ObjectSpace, Transform};

// Re-export glam math types for convenience
pub use glam::{Mat3, Mat4, Quat, Vec2, Vec3, Vec4};
