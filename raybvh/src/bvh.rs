mod builder;
mod options;
mod stats;
mod validation;

use std::iter;

pub use self::options::*;
pub use self::stats::*;
pub use self::validation::*;
use crate::gpu;
use crate::utils::measure;

/// Bounding volume hierarchy over a triangle soup, flattened into an array of
/// nodes where node zero is the root.
#[derive(Clone, Debug, Default)]
pub struct Bvh {
    nodes: Vec<gpu::BvhNode>,
}

impl Bvh {
    /// Builds BVH over given triangles.
    ///
    /// Triangles get reordered in place so that each leaf covers a contiguous
    /// range of them - the caller should upload `triangles` only after this
    /// function returns.
    ///
    /// An empty `triangles` produces a single, empty root; see
    /// [`gpu::BvhNode::is_empty_root()`].
    ///
    /// # Panics
    ///
    /// Panics if there are more than `u32::MAX / 2` triangles, since nodes
    /// address both triangles and their children with `u32`s.
    pub fn build(triangles: &mut [gpu::Triangle], options: BvhOptions) -> Self {
        assert!(
            triangles.len() <= (u32::MAX / 2) as usize,
            "too many triangles to index them with u32: {}",
            triangles.len(),
        );

        log::info!("Building BVH; triangles = {}", triangles.len());

        let (nodes, tt) = measure(|| builder::run(triangles, options));
        let this = Self { nodes };

        log::info!("BVH built; nodes = {}, tt = {}", this.len(), tt);

        if log::log_enabled!(log::Level::Debug) {
            log::debug!("BVH stats: {}", this.stats());
        }

        if cfg!(debug_assertions) {
            if let Err(err) = this.validate(triangles) {
                panic!("BVH is corrupted: {err}");
            }
        }

        this
    }

    pub fn nodes(&self) -> &[gpu::BvhNode] {
        &self.nodes
    }

    pub fn into_nodes(self) -> Vec<gpu::BvhNode> {
        self.nodes
    }

    /// Returns the nodes in a form suitable for uploading into a buffer.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.nodes)
    }

    pub fn root(&self) -> &gpu::BvhNode {
        &self.nodes[0]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Visits all nodes in depth-first order, yielding `(node id, depth)`.
    pub fn walk(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        let mut stack = Vec::new();

        if !self.nodes.is_empty() {
            stack.push((0, 0));
        }

        iter::from_fn(move || {
            let (id, depth) = stack.pop()?;
            let node = self.nodes[id as usize];

            if node.is_internal() && !node.is_empty_root() {
                stack.push((node.right_id(), depth + 1));
                stack.push((node.left_id(), depth + 1));
            }

            Some((id, depth))
        })
    }

    /// Visits all childless nodes, yielding `(node id, depth)`.
    pub fn leaves(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        self.walk().filter(|(id, _)| {
            let node = self.nodes[*id as usize];

            node.is_leaf() || node.is_empty_root()
        })
    }
}
