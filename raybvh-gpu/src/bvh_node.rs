use core::ops::Range;

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

/// A single node of the flattened BVH.
///
/// `triangle_count` tells both kinds apart:
///
/// - `0` means an internal node, and `left_first` is then the index of its
///   left child (the right one always sits right after it),
/// - anything else means a leaf covering triangles
///   `left_first .. left_first + triangle_count`.
///
/// The only internal-looking node without children is the root of an empty
/// scene: since children are always appended after the root, it's the only
/// node with `triangle_count == 0` and `left_first == 0`. Its bounds are
/// inverted (`min > max`), so no ray can ever enter it anyway.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct BvhNode {
    pub min: Vec3,
    pub left_first: u32,
    pub max: Vec3,
    pub triangle_count: u32,
}

impl BvhNode {
    pub fn leaf(min: Vec3, max: Vec3, first: u32, count: u32) -> Self {
        Self {
            min,
            left_first: first,
            max,
            triangle_count: count,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.triangle_count > 0
    }

    pub fn is_internal(&self) -> bool {
        self.triangle_count == 0
    }

    pub fn is_empty_root(&self) -> bool {
        self.triangle_count == 0 && self.left_first == 0
    }

    pub fn left_id(&self) -> u32 {
        self.left_first
    }

    pub fn right_id(&self) -> u32 {
        self.left_first + 1
    }

    /// Range of triangles covered by this leaf; empty for internal nodes.
    pub fn triangles(&self) -> Range<usize> {
        if self.is_leaf() {
            let start = self.left_first as usize;

            start..(start + self.triangle_count as usize)
        } else {
            0..0
        }
    }

    /// Turns this node into an internal one, pointing at given left child.
    pub fn make_internal(&mut self, left_id: u32) {
        self.left_first = left_id;
        self.triangle_count = 0;
    }
}
