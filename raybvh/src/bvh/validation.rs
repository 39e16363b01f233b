use fxhash::FxHashSet;
use thiserror::Error;

use super::Bvh;
use crate::{gpu, BoundingBox};

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("BVH has no nodes")]
    MissingRoot,

    #[error("node {node} points at children {left} and {left} + 1, but there are only {len} nodes")]
    ChildOutOfBounds { node: u32, left: u32, len: usize },

    #[error("node {node} points at child {child}, which precedes it")]
    ChildBeforeParent { node: u32, child: u32 },

    #[error("node {node} is reachable more than once")]
    NodeRevisited { node: u32 },

    #[error("node {node} is unreachable from the root")]
    NodeUnreachable { node: u32 },

    #[error("leaf {node} covers triangles {start}..{end}, but there are only {len} triangles")]
    LeafOutOfBounds {
        node: u32,
        start: usize,
        end: usize,
        len: usize,
    },

    #[error("triangle {triangle} is covered by more than one leaf")]
    TriangleDuplicated { triangle: usize },

    #[error("triangle {triangle} is not covered by any leaf")]
    TriangleMissing { triangle: usize },

    #[error("node {node} doesn't contain all of its triangles")]
    TriangleNotContained { node: u32 },
}

impl Bvh {
    /// Checks whether this BVH is a correct index of given triangles.
    ///
    /// That is: all nodes form a single tree rooted at node zero, each
    /// triangle is covered by exactly one leaf and each node's bounds contain
    /// all of the triangles below it.
    pub fn validate(
        &self,
        triangles: &[gpu::Triangle],
    ) -> Result<(), ValidationError> {
        let Some(root) = self.nodes.first() else {
            return Err(ValidationError::MissingRoot);
        };

        let mut order = Vec::with_capacity(self.nodes.len());
        let mut visited = FxHashSet::default();
        let mut covered = vec![false; triangles.len()];
        let mut stack = vec![0];

        if root.is_empty_root() {
            stack.clear();
            visited.insert(0);
        }

        while let Some(id) = stack.pop() {
            if !visited.insert(id) {
                return Err(ValidationError::NodeRevisited { node: id });
            }

            order.push(id);

            let node = self.nodes[id as usize];

            if node.is_leaf() {
                let range = node.triangles();

                if range.end > triangles.len() {
                    return Err(ValidationError::LeafOutOfBounds {
                        node: id,
                        start: range.start,
                        end: range.end,
                        len: triangles.len(),
                    });
                }

                for triangle in range {
                    if covered[triangle] {
                        return Err(ValidationError::TriangleDuplicated {
                            triangle,
                        });
                    }

                    covered[triangle] = true;
                }
            } else {
                let left = node.left_id();

                // Checked before `right_id()`, which overflows on `u32::MAX`
                if (left as usize) >= self.nodes.len() - 1 {
                    return Err(ValidationError::ChildOutOfBounds {
                        node: id,
                        left,
                        len: self.nodes.len(),
                    });
                }

                if left <= id {
                    return Err(ValidationError::ChildBeforeParent {
                        node: id,
                        child: left,
                    });
                }

                stack.push(node.right_id());
                stack.push(left);
            }
        }

        if let Some(node) =
            (0..self.nodes.len() as u32).find(|id| !visited.contains(id))
        {
            return Err(ValidationError::NodeUnreachable { node });
        }

        if let Some(triangle) = covered.iter().position(|covered| !covered) {
            return Err(ValidationError::TriangleMissing { triangle });
        }

        // Children always come after their parents, so going through the
        // visiting order backwards sees each node only after its children
        let mut actual = vec![BoundingBox::default(); self.nodes.len()];

        for &id in order.iter().rev() {
            let node = self.nodes[id as usize];

            actual[id as usize] = if node.is_leaf() {
                triangles[node.triangles()]
                    .iter()
                    .flat_map(|triangle| triangle.positions())
                    .collect()
            } else {
                actual[node.left_id() as usize]
                    + actual[node.right_id() as usize]
            };

            let bounds = BoundingBox::new(node.min, node.max);

            if !bounds.contains(&actual[id as usize]) {
                return Err(ValidationError::TriangleNotContained { node: id });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use glam::{vec3, Vec3};

    use super::*;
    use crate::BvhOptions;

    fn triangles() -> Vec<gpu::Triangle> {
        (0..4)
            .map(|i| {
                let p = vec3(10.0 * (i as f32), 0.0, 0.0);

                gpu::Triangle::new(
                    [p, p + Vec3::X, p + Vec3::Y],
                    gpu::MaterialId::new(i),
                )
            })
            .collect()
    }

    fn bvh(triangles: &mut [gpu::Triangle]) -> Bvh {
        Bvh::build(triangles, BvhOptions::default().with_leaf_triangles(1))
    }

    #[test]
    fn valid() {
        let mut triangles = triangles();
        let target = bvh(&mut triangles);

        assert_eq!(7, target.len());
        assert_eq!(Ok(()), target.validate(&triangles));

        // ---

        let target = Bvh::build(&mut [], BvhOptions::default());

        assert_eq!(Ok(()), target.validate(&[]));
    }

    #[test]
    fn invalid() {
        let mut triangles = triangles();
        let valid = bvh(&mut triangles);

        // ---
        // Case 1: No nodes at all

        assert_eq!(
            Err(ValidationError::MissingRoot),
            Bvh::default().validate(&triangles),
        );

        // ---
        // Case 2: Empty root, but some triangles

        let target = Bvh::build(&mut [], BvhOptions::default());

        assert_eq!(
            Err(ValidationError::TriangleMissing { triangle: 0 }),
            target.validate(&triangles),
        );

        // ---
        // Case 3: Leaf pointing past the triangles

        assert_eq!(
            Err(ValidationError::LeafOutOfBounds {
                node: 6,
                start: 3,
                end: 4,
                len: 3,
            }),
            valid.validate(&triangles[..3]),
        );

        // ---
        // Case 4: Leaf covering someone else's triangle

        let mut target = valid.clone();

        target.nodes[6].left_first = 2;

        assert_eq!(
            Err(ValidationError::TriangleDuplicated { triangle: 2 }),
            target.validate(&triangles),
        );

        // ---
        // Case 5: Triangle outside of any leaf

        let mut more_triangles = triangles.clone();

        more_triangles.push(triangles[0]);

        assert_eq!(
            Err(ValidationError::TriangleMissing { triangle: 4 }),
            valid.validate(&more_triangles),
        );

        // ---
        // Case 6: Bounds too tight

        let mut target = valid.clone();

        target.nodes[0].max = Vec3::ZERO;

        assert_eq!(
            Err(ValidationError::TriangleNotContained { node: 0 }),
            target.validate(&triangles),
        );

        // ---
        // Case 7: Children out of bounds

        let mut target = valid.clone();

        target.nodes[2].make_internal(6);

        assert_eq!(
            Err(ValidationError::ChildOutOfBounds {
                node: 2,
                left: 6,
                len: 7,
            }),
            target.validate(&triangles),
        );

        // ---
        // Case 8: Children at the very end of the id space

        let mut target = valid.clone();

        target.nodes[0].make_internal(u32::MAX);

        assert_eq!(
            Err(ValidationError::ChildOutOfBounds {
                node: 0,
                left: u32::MAX,
                len: 7,
            }),
            target.validate(&triangles),
        );

        // ---
        // Case 9: Cycle

        let mut target = valid.clone();

        target.nodes[2].make_internal(1);

        assert_eq!(
            Err(ValidationError::ChildBeforeParent { node: 2, child: 1 }),
            target.validate(&triangles),
        );

        // ---
        // Case 10: Orphaned nodes

        let mut target = valid.clone();

        target.nodes.push(target.nodes[6]);

        assert_eq!(
            Err(ValidationError::NodeUnreachable { node: 7 }),
            target.validate(&triangles),
        );
    }
}
