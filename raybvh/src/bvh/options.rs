/// Knobs controlling when [`Bvh::build()`](crate::Bvh::build) stops splitting.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BvhOptions {
    /// Nodes at this depth (root being at zero) are never split.
    pub max_depth: u32,

    /// Nodes with at most this many triangles are never split.
    pub leaf_triangles: u32,
}

impl BvhOptions {
    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_leaf_triangles(mut self, leaf_triangles: u32) -> Self {
        self.leaf_triangles = leaf_triangles;
        self
    }

    /// Returns whether a node holding `triangle_count` triangles, located at
    /// given depth, should get split.
    ///
    /// A single triangle is never split, whatever the options say.
    pub fn should_split(&self, triangle_count: u32, depth: u32) -> bool {
        triangle_count > 1
            && triangle_count > self.leaf_triangles
            && depth < self.max_depth
    }
}

impl Default for BvhOptions {
    fn default() -> Self {
        Self {
            max_depth: 20,
            leaf_triangles: 6,
        }
    }
}
