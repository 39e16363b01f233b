use std::fmt;

use super::Bvh;
use crate::{gpu, BoundingBox};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BvhStats {
    pub nodes: usize,
    pub leaves: usize,

    /// Depth of the deepest leaf, root being at zero.
    pub depth: u32,

    pub max_leaf_triangles: u32,

    /// Sum of all non-root nodes' half areas, relative to the root's half
    /// area; lower is better.
    pub sah_cost: f32,
}

impl Bvh {
    pub fn stats(&self) -> BvhStats {
        let mut stats = BvhStats::default();
        let mut total_area = 0.0;

        for (id, depth) in self.walk() {
            let node = self.nodes[id as usize];

            stats.nodes += 1;

            if id > 0 {
                total_area += bounds(&node).half_area();
            }

            if node.is_leaf() || node.is_empty_root() {
                stats.leaves += 1;
                stats.depth = stats.depth.max(depth);

                stats.max_leaf_triangles =
                    stats.max_leaf_triangles.max(node.triangle_count);
            }
        }

        let root_area =
            self.nodes.first().map_or(0.0, |root| bounds(root).half_area());

        if stats.leaves > 1 && root_area > 0.0 {
            stats.sah_cost = total_area / root_area;
        }

        stats
    }
}

fn bounds(node: &gpu::BvhNode) -> BoundingBox {
    BoundingBox::new(node.min, node.max)
}

impl fmt::Display for BvhStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "nodes = {}, leaves = {}, depth = {}, max-leaf-triangles = {}, sah-cost = {:.2}",
            self.nodes,
            self.leaves,
            self.depth,
            self.max_leaf_triangles,
            self.sah_cost,
        )
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use glam::{vec3, Vec3};

    use crate::{gpu, Bvh, BvhOptions};

    #[test]
    fn stats() {
        // ---
        // Case 1: Empty scene

        let target = Bvh::build(&mut [], BvhOptions::default()).stats();

        assert_eq!(1, target.nodes);
        assert_eq!(1, target.leaves);
        assert_eq!(0, target.depth);
        assert_eq!(0, target.max_leaf_triangles);
        assert_eq!(0.0, target.sah_cost);

        // ---
        // Case 2: Two unit cubes' worth of triangles, far away from each other

        let mut triangles: Vec<_> = [0.0, 9.0]
            .into_iter()
            .flat_map(|x| {
                let p = vec3(x, 0.0, 0.0);

                [
                    gpu::Triangle::new(
                        [p, p + Vec3::X, p + Vec3::Y],
                        Default::default(),
                    ),
                    gpu::Triangle::new(
                        [p + Vec3::ONE, p + Vec3::X, p + Vec3::Z],
                        Default::default(),
                    ),
                ]
            })
            .collect();

        let target = Bvh::build(
            &mut triangles,
            BvhOptions::default().with_leaf_triangles(2),
        )
        .stats();

        assert_eq!(3, target.nodes);
        assert_eq!(2, target.leaves);
        assert_eq!(1, target.depth);
        assert_eq!(2, target.max_leaf_triangles);

        // Each cube has half-area of 3, while the root spans 10x1x1
        assert_relative_eq!(6.0 / 21.0, target.sah_cost);

        assert_eq!(
            "nodes = 3, leaves = 2, depth = 1, max-leaf-triangles = 2, sah-cost = 0.29",
            target.to_string(),
        );
    }
}
