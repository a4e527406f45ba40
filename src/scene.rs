//! The scene graph: a transform tree with lazy world-transform caching.
//!
//! A [`SceneGraph`] owns every node in an arena and hands out copyable
//! [`NodeId`] handles. Each node carries a local [`Transform`] plus a cached
//! world translation and orientation guarded by a dirty flag:
//!
//! - **Mutation** (translate/rotate/scale/re-parent) eagerly marks the node
//!   and its entire subtree dirty — O(subtree) at mutation time.
//! - **Reading** world state lazily resolves the dirty ancestor chain
//!   top-down, then returns the cache — O(dirty depth) at read time,
//!   amortized O(1) when the parent is already clean.
//!
//! A clean node's cache is always correct with respect to its parent's
//! current world state and its own local state. Roots resolve to their local
//! state, and a node detached from its parent is a root from the next read
//! onward.
//!
//! # Composition Rules
//!
//! World state composes child-first:
//!
//! ```text
//! world_translation = parent.world_translation
//!                   + parent.world_orientation * local_translation
//! world_orientation = compose(local_orientation, parent.world_orientation)
//! ```
//!
//! Scale is strictly per-node: a parent's scale never stretches child
//! offsets and never multiplies into child scale. A node's world matrix is
//! built from its own scale plus the composed rotation and translation.
//!
//! # Threading
//!
//! The graph is single-threaded by contract. Dirty propagation and lazy
//! resolution assume one mutator and one reader interleaved on a single
//! timeline; a multi-threaded host must fully serialize scene mutation and
//! traversal (finish the simulation pass before the render pass reads).
//!
//! # Example
//!
//! ```
//! use arbor::{SceneGraph, Vec3};
//!
//! let mut scene = SceneGraph::new();
//! let sun = scene.spawn("sun");
//! let planet = scene.spawn("planet");
//! scene.add_child(sun, planet)?;
//! scene.translate(planet, Vec3::new(10.0, 0.0, 0.0))?;
//!
//! // Spin the sun; the planet swings around it.
//! scene.rotate_about_y(sun, std::f32::consts::PI)?;
//! let p = scene.world_translation(planet)?;
//! assert!(p.abs_diff_eq(Vec3::new(-10.0, 0.0, 0.0), 1e-4));
//! # Ok::<(), arbor::Error>(())
//! ```

use std::collections::HashMap;

use glam::{Mat4, Quat, Vec3};
use tracing::debug;

use crate::error::{Error, Result};
use crate::math;
use crate::transform::Transform;

/// Handle to a node in a [`SceneGraph`].
///
/// Ids are plain copyable integers, unique for the lifetime of the graph
/// and never reused. A handle to a despawned node stays safe to hold;
/// operations on it return [`Error::UnknownNode`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u64);

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

struct Node {
    /// Diagnostics only: tracing events and error messages.
    name: String,
    transform: Transform,
    /// Non-owning back-reference, used for upward walks and resolution.
    parent: Option<NodeId>,
    /// Exclusively owned children. Order is an implementation detail;
    /// callers must not rely on sibling order.
    children: Vec<NodeId>,
    world_translation: Vec3,
    world_orientation: Quat,
    dirty: bool,
}

impl Node {
    fn new(name: String) -> Self {
        Self {
            name,
            transform: Transform::default(),
            parent: None,
            children: Vec::new(),
            world_translation: Vec3::ZERO,
            world_orientation: Quat::IDENTITY,
            dirty: true,
        }
    }
}

/// A tree of transform nodes with cached world-space state.
///
/// See the [module docs](self) for the caching model and composition rules.
///
/// Readers like [`world_matrix`](SceneGraph::world_matrix) take `&mut self`
/// because a read may resolve stale caches in place. That keeps the
/// resolve-on-read contract visible in the API instead of hiding it behind
/// interior mutability.
#[derive(Default)]
pub struct SceneGraph {
    nodes: HashMap<NodeId, Node>,
    next_id: u64,
}

impl SceneGraph {
    /// Creates an empty scene graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new root node with the given diagnostic name.
    ///
    /// The node starts dirty, at the origin, with identity orientation and
    /// unit scale.
    pub fn spawn(&mut self, name: impl Into<String>) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        let name = name.into();
        debug!(node = %id, name = %name, "spawned scene node");
        self.nodes.insert(id, Node::new(name));
        id
    }

    /// Number of live nodes in the graph.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the graph holds no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Whether `node` refers to a live node in this graph.
    pub fn contains(&self, node: NodeId) -> bool {
        self.nodes.contains_key(&node)
    }

    /// The node's diagnostic name.
    pub fn name(&self, node: NodeId) -> Result<&str> {
        Ok(&self.node(node)?.name)
    }

    /// The node's parent, or `None` for a root.
    pub fn parent(&self, node: NodeId) -> Result<Option<NodeId>> {
        Ok(self.node(node)?.parent)
    }

    /// The node's children.
    pub fn children(&self, node: NodeId) -> Result<&[NodeId]> {
        Ok(&self.node(node)?.children)
    }

    /// Walks from `node`'s parent up to the root.
    pub fn ancestors(&self, node: NodeId) -> Ancestors<'_> {
        Ancestors {
            graph: self,
            next: self.nodes.get(&node).and_then(|n| n.parent),
        }
    }

    /// Whether `node` appears on `other`'s ancestor chain.
    pub fn is_ancestor_of(&self, node: NodeId, other: NodeId) -> bool {
        self.ancestors(other).any(|a| a == node)
    }

    /// Read-only access to the node's local transform.
    ///
    /// Mutation goes through the graph ([`edit`](SceneGraph::edit) or the
    /// specific mutators) so the dirty flags stay truthful.
    pub fn transform(&self, node: NodeId) -> Result<&Transform> {
        Ok(&self.node(node)?.transform)
    }

    // ------------------------------------------------------------------
    // Structure
    // ------------------------------------------------------------------

    /// Attaches `child` under `parent`.
    ///
    /// If `child` already has a parent it is detached from it first — a
    /// node has at most one parent at a time, never two. The child's
    /// subtree is marked dirty so its world state re-resolves against the
    /// new parent on next read.
    ///
    /// # Errors
    ///
    /// [`Error::UnknownNode`] for a stale handle, [`Error::Cycle`] if
    /// `child` is `parent` itself or one of its ancestors.
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        self.node(parent)?;
        self.node(child)?;
        if child == parent || self.is_ancestor_of(child, parent) {
            return Err(Error::Cycle { parent, child });
        }

        if let Some(old_parent) = self.node(child)?.parent {
            self.detach(old_parent, child);
        }

        self.node_mut(parent)?.children.push(child);
        self.node_mut(child)?.parent = Some(parent);
        self.mark_dirty(child);
        debug!(parent = %parent, child = %child, "attached scene node");
        Ok(())
    }

    /// Detaches `child` from `parent`, leaving it (and its subtree) in the
    /// graph as a root.
    ///
    /// The detached subtree is marked dirty and resolves as a root from the
    /// next read onward.
    ///
    /// # Errors
    ///
    /// [`Error::UnknownNode`] for a stale handle, [`Error::NotAChild`] if
    /// `child` is not currently a child of `parent` — a checked
    /// precondition, never silently ignored.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        self.node(parent)?;
        if self.node(child)?.parent != Some(parent) {
            return Err(Error::NotAChild { parent, child });
        }

        self.detach(parent, child);
        self.node_mut(child)?.parent = None;
        self.mark_dirty(child);
        debug!(parent = %parent, child = %child, "detached scene node");
        Ok(())
    }

    /// Removes `node` and the entire subtree it exclusively owns.
    ///
    /// Handles into the removed subtree become stale and report
    /// [`Error::UnknownNode`] from then on.
    pub fn despawn(&mut self, node: NodeId) -> Result<()> {
        self.node(node)?;
        if let Some(parent) = self.node(node)?.parent {
            self.detach(parent, node);
        }

        let mut stack = vec![node];
        while let Some(id) = stack.pop() {
            if let Some(removed) = self.nodes.remove(&id) {
                debug!(node = %id, name = %removed.name, "despawned scene node");
                stack.extend(removed.children);
            }
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Local mutation (each call dirties the node's subtree)
    // ------------------------------------------------------------------

    /// Applies an arbitrary edit to the node's local transform, then marks
    /// the subtree dirty.
    ///
    /// This is the escape hatch behind every specific mutator below.
    ///
    /// # Example
    ///
    /// ```
    /// use arbor::{SceneGraph, Vec3};
    ///
    /// let mut scene = SceneGraph::new();
    /// let node = scene.spawn("crate");
    /// scene.edit(node, |t| t.set_scale(Vec3::splat(0.5)))?;
    /// # Ok::<(), arbor::Error>(())
    /// ```
    pub fn edit(&mut self, node: NodeId, f: impl FnOnce(&mut Transform)) -> Result<()> {
        f(&mut self.node_mut(node)?.transform);
        self.mark_dirty(node);
        Ok(())
    }

    /// Replaces the node's local translation.
    pub fn set_translation(&mut self, node: NodeId, translation: Vec3) -> Result<()> {
        self.edit(node, |t| t.set_translation(translation))
    }

    /// Replaces the node's local orientation.
    pub fn set_orientation(&mut self, node: NodeId, orientation: Quat) -> Result<()> {
        self.edit(node, |t| t.set_orientation(orientation))
    }

    /// Replaces the node's local scale. Scale is per-node only; it never
    /// propagates to children.
    pub fn set_scale(&mut self, node: NodeId, scale: Vec3) -> Result<()> {
        self.edit(node, |t| t.set_scale(scale))
    }

    /// Translates along the parent's unrotated axes (inertial space).
    pub fn translate(&mut self, node: NodeId, v: Vec3) -> Result<()> {
        self.edit(node, |t| t.inertial().translate(v))
    }

    /// Translates along the node's own rotated axes (object space).
    pub fn translate_object(&mut self, node: NodeId, v: Vec3) -> Result<()> {
        self.edit(node, |t| t.object().translate(v))
    }

    /// Rotates in the node's own frame (object space).
    pub fn rotate(&mut self, node: NodeId, q: Quat) -> Result<()> {
        self.edit(node, |t| t.object().rotate(q))
    }

    /// Rotates in the parent's frame (inertial space).
    pub fn rotate_inertial(&mut self, node: NodeId, q: Quat) -> Result<()> {
        self.edit(node, |t| t.inertial().rotate(q))
    }

    /// Rotates about the node's local X axis.
    pub fn rotate_about_x(&mut self, node: NodeId, radians: f32) -> Result<()> {
        self.rotate(node, Quat::from_rotation_x(radians))
    }

    /// Rotates about the node's local Y axis.
    pub fn rotate_about_y(&mut self, node: NodeId, radians: f32) -> Result<()> {
        self.rotate(node, Quat::from_rotation_y(radians))
    }

    /// Rotates about the node's local Z axis.
    pub fn rotate_about_z(&mut self, node: NodeId, radians: f32) -> Result<()> {
        self.rotate(node, Quat::from_rotation_z(radians))
    }

    // ------------------------------------------------------------------
    // World-space reads (resolve-if-dirty, then return the cache)
    // ------------------------------------------------------------------

    /// The node's translation in world space.
    pub fn world_translation(&mut self, node: NodeId) -> Result<Vec3> {
        self.resolve(node)?;
        Ok(self.nodes[&node].world_translation)
    }

    /// The node's orientation in world space.
    pub fn world_orientation(&mut self, node: NodeId) -> Result<Quat> {
        self.resolve(node)?;
        Ok(self.nodes[&node].world_orientation)
    }

    /// The node's full world matrix: its own scale, composed world
    /// rotation, and composed world translation in SRT order.
    pub fn world_matrix(&mut self, node: NodeId) -> Result<Mat4> {
        self.resolve(node)?;
        let n = &self.nodes[&node];
        Ok(Mat4::from_scale_rotation_translation(
            n.transform.scale,
            n.world_orientation,
            n.world_translation,
        ))
    }

    /// The node's local X axis expressed in its parent's frame.
    pub fn object_x_axis(&self, node: NodeId) -> Result<Vec3> {
        Ok(self.node(node)?.transform.orientation * Vec3::X)
    }

    /// The node's local Y axis expressed in its parent's frame.
    pub fn object_y_axis(&self, node: NodeId) -> Result<Vec3> {
        Ok(self.node(node)?.transform.orientation * Vec3::Y)
    }

    /// The node's local Z axis expressed in its parent's frame.
    pub fn object_z_axis(&self, node: NodeId) -> Result<Vec3> {
        Ok(self.node(node)?.transform.orientation * Vec3::Z)
    }

    /// The node's X axis in world space.
    pub fn world_x_axis(&mut self, node: NodeId) -> Result<Vec3> {
        Ok(self.world_orientation(node)? * Vec3::X)
    }

    /// The node's Y axis in world space.
    pub fn world_y_axis(&mut self, node: NodeId) -> Result<Vec3> {
        Ok(self.world_orientation(node)? * Vec3::Y)
    }

    /// The node's Z axis in world space.
    pub fn world_z_axis(&mut self, node: NodeId) -> Result<Vec3> {
        Ok(self.world_orientation(node)? * Vec3::Z)
    }

    // ------------------------------------------------------------------
    // Traversal
    // ------------------------------------------------------------------

    /// Depth-first pre-order traversal from `root`, handing each node's
    /// resolved world matrix to the visitor.
    ///
    /// This is the render boundary: the visitor is the external rendering
    /// collaborator, and all GPU state and draw calls belong to it.
    ///
    /// # Example
    ///
    /// ```
    /// use arbor::{SceneGraph, Vec3};
    ///
    /// let mut scene = SceneGraph::new();
    /// let root = scene.spawn("root");
    /// let child = scene.spawn("child");
    /// scene.add_child(root, child)?;
    ///
    /// let mut visited = Vec::new();
    /// scene.visit(root, |node, _world| visited.push(node))?;
    /// assert_eq!(visited, vec![root, child]);
    /// # Ok::<(), arbor::Error>(())
    /// ```
    pub fn visit(&mut self, root: NodeId, mut f: impl FnMut(NodeId, Mat4)) -> Result<()> {
        self.node(root)?;
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            let world = self.world_matrix(id)?;
            f(id, world);
            stack.extend(self.nodes[&id].children.iter().rev());
        }
        Ok(())
    }

    /// Notifies every node under `root` (inclusive) exactly once that the
    /// rendering context was lost.
    ///
    /// Render collaborators holding GPU-resident resources rebuild them in
    /// response; the graph's only responsibility is that the notification
    /// reaches each node exactly once per event.
    pub fn notify_context_lost(&mut self, root: NodeId, mut f: impl FnMut(NodeId)) -> Result<()> {
        self.node(root)?;
        debug!(root = %root, "notifying subtree of lost context");
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            f(id);
            stack.extend(self.nodes[&id].children.iter().rev());
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn node(&self, id: NodeId) -> Result<&Node> {
        self.nodes.get(&id).ok_or(Error::UnknownNode(id))
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut Node> {
        self.nodes.get_mut(&id).ok_or(Error::UnknownNode(id))
    }

    /// Removes `child` from `parent`'s child list. Callers have already
    /// validated the edge.
    fn detach(&mut self, parent: NodeId, child: NodeId) {
        if let Some(p) = self.nodes.get_mut(&parent) {
            p.children.retain(|&c| c != child);
        }
    }

    /// Eagerly marks `node` and every descendant dirty.
    ///
    /// The dirty set is downward-closed (a dirty node's subtree is always
    /// entirely dirty), so an already-dirty node prunes its whole branch.
    fn mark_dirty(&mut self, node: NodeId) {
        let mut stack = vec![node];
        while let Some(id) = stack.pop() {
            let n = self
                .nodes
                .get_mut(&id)
                .expect("dirty propagation reached a node missing from the arena");
            if n.dirty && id != node {
                continue;
            }
            n.dirty = true;
            stack.extend(n.children.iter().copied());
        }
    }

    /// Resolves `node`'s world state, recomputing the dirty ancestor chain
    /// top-down first.
    ///
    /// Because the dirty set is downward-closed, the first clean ancestor
    /// found walking upward has a fully clean chain above it.
    fn resolve(&mut self, node: NodeId) -> Result<()> {
        if !self.node(node)?.dirty {
            return Ok(());
        }

        let mut chain = vec![node];
        let mut current = node;
        while let Some(parent) = self.nodes[&current].parent {
            if !self.nodes[&parent].dirty {
                break;
            }
            chain.push(parent);
            current = parent;
        }

        for &id in chain.iter().rev() {
            let (world_translation, world_orientation) = match self.nodes[&id].parent {
                None => {
                    let local = &self.nodes[&id].transform;
                    (local.translation, local.orientation)
                }
                Some(parent) => {
                    let p = &self.nodes[&parent];
                    let local = &self.nodes[&id].transform;
                    (
                        p.world_translation + p.world_orientation * local.translation,
                        math::compose(local.orientation, p.world_orientation),
                    )
                }
            };
            let n = self
                .nodes
                .get_mut(&id)
                .expect("resolution reached a node missing from the arena");
            n.world_translation = world_translation;
            n.world_orientation = world_orientation;
            n.dirty = false;
        }
        Ok(())
    }
}

/// Iterator over a node's ancestor chain, nearest parent first.
///
/// Returned by [`SceneGraph::ancestors`].
pub struct Ancestors<'a> {
    graph: &'a SceneGraph,
    next: Option<NodeId>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        self.next = self.graph.nodes.get(&current).and_then(|n| n.parent);
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, PI};

    fn chain(scene: &mut SceneGraph, names: &[&str]) -> Vec<NodeId> {
        let ids: Vec<NodeId> = names.iter().map(|n| scene.spawn(*n)).collect();
        for pair in ids.windows(2) {
            scene.add_child(pair[0], pair[1]).unwrap();
        }
        ids
    }

    #[test]
    fn root_world_state_equals_local_state() {
        let mut scene = SceneGraph::new();
        let root = scene.spawn("root");
        scene.set_translation(root, Vec3::new(1.0, 2.0, 3.0)).unwrap();
        scene.set_orientation(root, Quat::from_rotation_z(0.3)).unwrap();

        assert_eq!(
            scene.world_translation(root).unwrap(),
            Vec3::new(1.0, 2.0, 3.0)
        );
        assert_eq!(
            scene.world_orientation(root).unwrap(),
            Quat::from_rotation_z(0.3)
        );
    }

    #[test]
    fn resolution_is_idempotent() {
        let mut scene = SceneGraph::new();
        let ids = chain(&mut scene, &["root", "a", "b"]);
        scene.rotate_about_y(ids[0], 0.37).unwrap();
        scene.set_translation(ids[1], Vec3::new(0.1, 0.2, 0.3)).unwrap();

        // Two reads with no mutation in between are bit-identical.
        let first = scene.world_matrix(ids[2]).unwrap();
        let second = scene.world_matrix(ids[2]).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn dirty_propagation_reaches_every_descendant() {
        let mut scene = SceneGraph::new();
        let ids = chain(&mut scene, &["root", "a", "b", "c"]);
        let fork = scene.spawn("fork");
        scene.add_child(ids[1], fork).unwrap();

        // Resolve everything, then move the root.
        for &id in ids.iter().chain([&fork]) {
            scene.world_matrix(id).unwrap();
        }
        scene.translate(ids[0], Vec3::new(5.0, 0.0, 0.0)).unwrap();

        // Every descendant observes the new root translation.
        for &id in ids.iter().chain([&fork]) {
            let p = scene.world_translation(id).unwrap();
            assert!(
                (p.x - 5.0).abs() < 1e-6,
                "{} saw stale x = {}",
                scene.name(id).unwrap(),
                p.x
            );
        }
    }

    #[test]
    fn world_translation_composes_through_rotation() {
        let mut scene = SceneGraph::new();
        let ids = chain(&mut scene, &["root", "child"]);
        scene.set_translation(ids[1], Vec3::new(10.0, 0.0, 0.0)).unwrap();
        scene.rotate_about_y(ids[0], FRAC_PI_2).unwrap();

        // The child's offset swings with the parent's yaw.
        let p = scene.world_translation(ids[1]).unwrap();
        assert!(p.abs_diff_eq(Vec3::new(0.0, 0.0, -10.0), 1e-4), "got {:?}", p);
    }

    #[test]
    fn reparenting_discards_old_parent_influence() {
        let mut scene = SceneGraph::new();
        let a = scene.spawn("a");
        let b = scene.spawn("b");
        let node = scene.spawn("node");
        scene.set_translation(a, Vec3::new(5.0, 0.0, 0.0)).unwrap();
        scene.set_translation(b, Vec3::new(0.0, 7.0, 0.0)).unwrap();
        scene.rotate_about_z(b, FRAC_PI_2).unwrap();
        scene.set_translation(node, Vec3::new(1.0, 0.0, 0.0)).unwrap();

        scene.add_child(a, node).unwrap();
        assert!(
            scene
                .world_translation(node)
                .unwrap()
                .abs_diff_eq(Vec3::new(6.0, 0.0, 0.0), 1e-5)
        );

        // Move the subtree from a to b; a's translation must be fully gone.
        scene.add_child(b, node).unwrap();
        assert_eq!(scene.parent(node).unwrap(), Some(b));
        assert!(scene.children(a).unwrap().is_empty());

        let expected = Vec3::new(0.0, 7.0, 0.0) + Quat::from_rotation_z(FRAC_PI_2) * Vec3::X;
        let p = scene.world_translation(node).unwrap();
        assert!(p.abs_diff_eq(expected, 1e-5), "got {:?}", p);
    }

    #[test]
    fn detached_node_resolves_as_root() {
        let mut scene = SceneGraph::new();
        let ids = chain(&mut scene, &["root", "child"]);
        scene.set_translation(ids[0], Vec3::new(100.0, 0.0, 0.0)).unwrap();
        scene.set_translation(ids[1], Vec3::new(1.0, 0.0, 0.0)).unwrap();
        scene.world_translation(ids[1]).unwrap();

        scene.remove_child(ids[0], ids[1]).unwrap();
        assert_eq!(scene.parent(ids[1]).unwrap(), None);
        assert_eq!(
            scene.world_translation(ids[1]).unwrap(),
            Vec3::new(1.0, 0.0, 0.0)
        );
    }

    #[test]
    fn rotation_round_trips_through_conjugate() {
        let mut scene = SceneGraph::new();
        let node = scene.spawn("node");
        let q = Quat::from_axis_angle(Vec3::new(0.3, 1.0, -0.2).normalize(), 0.8);

        let before = scene.world_orientation(node).unwrap();
        scene.rotate(node, q).unwrap();
        scene.rotate(node, q.conjugate()).unwrap();
        let after = scene.world_orientation(node).unwrap();

        assert!(before.abs_diff_eq(after, 1e-5));
    }

    #[test]
    fn axes_are_invariant_under_pure_translation() {
        let mut scene = SceneGraph::new();
        let node = scene.spawn("node");
        scene.rotate_about_y(node, 0.7).unwrap();

        let object_before = scene.object_x_axis(node).unwrap();
        let world_before = scene.world_x_axis(node).unwrap();

        scene.translate(node, Vec3::new(3.0, -2.0, 8.0)).unwrap();
        scene.translate_object(node, Vec3::NEG_Z).unwrap();

        assert_eq!(scene.object_x_axis(node).unwrap(), object_before);
        assert_eq!(scene.world_x_axis(node).unwrap(), world_before);
    }

    #[test]
    fn default_object_axes_are_standard_basis() {
        let mut scene = SceneGraph::new();
        let root = scene.spawn("root");
        assert_eq!(scene.object_x_axis(root).unwrap(), Vec3::X);
        assert_eq!(scene.object_y_axis(root).unwrap(), Vec3::Y);
        assert_eq!(scene.object_z_axis(root).unwrap(), Vec3::Z);
    }

    // A half-turn about Y flips world x axes down the tree, while the
    // child's own object axes stay put.
    #[test]
    fn parent_half_turn_flips_world_axes_not_object_axes() {
        let mut scene = SceneGraph::new();
        let ids = chain(&mut scene, &["root", "child"]);
        scene.rotate_about_y(ids[0], PI).unwrap();

        let root_x = scene.world_x_axis(ids[0]).unwrap();
        assert!(root_x.abs_diff_eq(Vec3::new(-1.0, 0.0, 0.0), 1e-5));

        assert_eq!(scene.object_x_axis(ids[1]).unwrap(), Vec3::X);
        let child_x = scene.world_x_axis(ids[1]).unwrap();
        assert!(child_x.abs_diff_eq(Vec3::new(-1.0, 0.0, 0.0), 1e-5));
    }

    // The documented scale policy: strictly per-node, no inheritance
    // through the tree.
    #[test]
    fn scale_is_per_node_only() {
        let mut scene = SceneGraph::new();
        let ids = chain(&mut scene, &["root", "a1", "b1"]);
        scene.set_scale(ids[0], Vec3::splat(2.0)).unwrap();
        scene.set_scale(ids[1], Vec3::splat(3.0)).unwrap();
        scene.set_scale(ids[2], Vec3::splat(4.0)).unwrap();
        scene.set_translation(ids[1], Vec3::new(1.0, 0.0, 0.0)).unwrap();
        scene.set_translation(ids[2], Vec3::new(0.0, 1.0, 0.0)).unwrap();

        // Parent scale does not stretch child offsets.
        assert!(
            scene
                .world_translation(ids[1])
                .unwrap()
                .abs_diff_eq(Vec3::new(1.0, 0.0, 0.0), 1e-6)
        );
        assert!(
            scene
                .world_translation(ids[2])
                .unwrap()
                .abs_diff_eq(Vec3::new(1.0, 1.0, 0.0), 1e-6)
        );

        // And the leaf's world matrix carries only its own scale.
        let p = scene.world_matrix(ids[2]).unwrap().transform_point3(Vec3::X);
        assert!(p.abs_diff_eq(Vec3::new(5.0, 1.0, 0.0), 1e-5), "got {:?}", p);
    }

    #[test]
    fn visit_is_preorder_and_passes_world_matrices() {
        let mut scene = SceneGraph::new();
        let root = scene.spawn("root");
        let left = scene.spawn("left");
        let right = scene.spawn("right");
        scene.add_child(root, left).unwrap();
        scene.add_child(root, right).unwrap();
        scene.translate(left, Vec3::X).unwrap();

        let mut seen = Vec::new();
        scene
            .visit(root, |id, world| seen.push((id, world)))
            .unwrap();

        assert_eq!(seen.len(), 3);
        assert_eq!(seen[0].0, root);
        let left_entry = seen.iter().find(|(id, _)| *id == left).unwrap();
        assert!(
            left_entry
                .1
                .abs_diff_eq(Mat4::from_translation(Vec3::X), 1e-6)
        );
    }

    #[test]
    fn context_lost_reaches_every_node_exactly_once() {
        let mut scene = SceneGraph::new();
        let ids = chain(&mut scene, &["root", "a", "b"]);
        let extra = scene.spawn("extra");
        scene.add_child(ids[0], extra).unwrap();

        let mut counts: HashMap<NodeId, usize> = HashMap::new();
        scene
            .notify_context_lost(ids[0], |id| *counts.entry(id).or_default() += 1)
            .unwrap();

        assert_eq!(counts.len(), 4);
        assert!(counts.values().all(|&c| c == 1));
    }

    #[test]
    fn despawn_removes_the_whole_subtree() {
        let mut scene = SceneGraph::new();
        let ids = chain(&mut scene, &["root", "a", "b"]);
        assert_eq!(scene.len(), 3);

        scene.despawn(ids[1]).unwrap();
        assert_eq!(scene.len(), 1);
        assert!(scene.contains(ids[0]));
        assert_eq!(
            scene.world_translation(ids[2]),
            Err(Error::UnknownNode(ids[2]))
        );
        assert!(scene.children(ids[0]).unwrap().is_empty());
    }

    #[test]
    fn remove_child_rejects_non_children() {
        let mut scene = SceneGraph::new();
        let a = scene.spawn("a");
        let b = scene.spawn("b");
        assert_eq!(
            scene.remove_child(a, b),
            Err(Error::NotAChild { parent: a, child: b })
        );
    }

    #[test]
    fn add_child_rejects_cycles() {
        let mut scene = SceneGraph::new();
        let ids = chain(&mut scene, &["root", "a", "b"]);

        assert_eq!(
            scene.add_child(ids[2], ids[0]),
            Err(Error::Cycle {
                parent: ids[2],
                child: ids[0]
            })
        );
        assert_eq!(
            scene.add_child(ids[1], ids[1]),
            Err(Error::Cycle {
                parent: ids[1],
                child: ids[1]
            })
        );
    }

    #[test]
    fn ancestors_walk_to_the_root() {
        let mut scene = SceneGraph::new();
        let ids = chain(&mut scene, &["root", "a", "b"]);
        let up: Vec<NodeId> = scene.ancestors(ids[2]).collect();
        assert_eq!(up, vec![ids[1], ids[0]]);
        assert!(scene.is_ancestor_of(ids[0], ids[2]));
        assert!(!scene.is_ancestor_of(ids[2], ids[0]));
    }
}
