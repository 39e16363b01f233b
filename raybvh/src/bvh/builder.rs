use std::collections::VecDeque;
use std::ops::Range;

use crate::{gpu, Axis, BoundingBox, BvhOptions, TriangleExt};

/// Constructs BVH by recursively splitting nodes at the spatial median of
/// their longest axis.
///
/// Instead of recursing, nodes yet-to-be-split are kept on a queue - each
/// split appends both children at the end of `nodes` and pushes them onto
/// the queue, so node ids stay stable throughout the entire process.
pub fn run(
    triangles: &mut [gpu::Triangle],
    options: BvhOptions,
) -> Vec<gpu::BvhNode> {
    // Each split produces two non-empty children, so a tree over `n`
    // triangles has at most `2n - 1` nodes
    let mut nodes =
        Vec::with_capacity((2 * triangles.len()).saturating_sub(1).max(1));

    nodes.push(leaf(triangles, 0..triangles.len()));

    let mut queue = VecDeque::from_iter([NodeRef::root()]);

    while let Some(node) = queue.pop_front() {
        if let Some((left, right)) =
            balance(&mut nodes, triangles, options, node)
        {
            queue.push_back(left);
            queue.push_back(right);
        }
    }

    nodes
}

fn balance(
    nodes: &mut Vec<gpu::BvhNode>,
    triangles: &mut [gpu::Triangle],
    options: BvhOptions,
    node_ref: NodeRef,
) -> Option<(NodeRef, NodeRef)> {
    let node = nodes[node_ref.id as usize];

    if !options.should_split(node.triangle_count, node_ref.depth) {
        return None;
    }

    let range = node.triangles();
    let bounds = BoundingBox::new(node.min, node.max);
    let split_by = Axis::longest(bounds.extent());

    let (pivot, strategy) =
        find_pivot(&mut triangles[range.clone()], split_by, bounds);

    if strategy != SplitStrategy::SpatialMedian {
        log::trace!(
            "Node {} fell back to {:?}; axis = {:?}, triangles = {}, pivot = {}",
            node_ref.id,
            strategy,
            split_by,
            range.len(),
            pivot,
        );
    }

    let pivot = range.start + pivot;
    let left_id = nodes.len() as u32;

    nodes.push(leaf(triangles, range.start..pivot));
    nodes.push(leaf(triangles, pivot..range.end));
    nodes[node_ref.id as usize].make_internal(left_id);

    Some((
        NodeRef {
            id: left_id,
            depth: node_ref.depth + 1,
        },
        NodeRef {
            id: left_id + 1,
            depth: node_ref.depth + 1,
        },
    ))
}

/// Partitions given triangles into two non-empty halves and returns the index
/// at which the right half begins.
///
/// Tries, in order:
///
/// - the spatial median of `bounds` along `split_by`,
/// - the mean of triangles' centroids along `split_by`,
/// - the middle of the slice, disregarding geometry at all.
///
/// The last one always succeeds for two or more triangles, which is what
/// guarantees that clustered or coincident geometry doesn't get stuck.
fn find_pivot(
    triangles: &mut [gpu::Triangle],
    split_by: Axis,
    bounds: BoundingBox,
) -> (usize, SplitStrategy) {
    let len = triangles.len();
    let is_valid = |pivot: usize| pivot > 0 && pivot < len;

    let pivot = partition(triangles, split_by, bounds.center()[split_by]);

    if is_valid(pivot) {
        return (pivot, SplitStrategy::SpatialMedian);
    }

    let mean = triangles
        .iter()
        .map(|triangle| triangle.center()[split_by])
        .sum::<f32>()
        / (len as f32);

    let pivot = partition(triangles, split_by, mean);

    if is_valid(pivot) {
        return (pivot, SplitStrategy::CentroidMean);
    }

    (len / 2, SplitStrategy::IndexMedian)
}

/// Moves triangles whose centroids lie before `split_at` to the front of the
/// slice and returns how many of them there are.
fn partition(
    triangles: &mut [gpu::Triangle],
    split_by: Axis,
    split_at: f32,
) -> usize {
    let mut pivot = 0;

    for i in 0..triangles.len() {
        if triangles[i].center()[split_by] < split_at {
            triangles.swap(i, pivot);
            pivot += 1;
        }
    }

    pivot
}

/// Creates a leaf covering given triangles, with bounds fitted exactly to
/// them.
fn leaf(triangles: &[gpu::Triangle], range: Range<usize>) -> gpu::BvhNode {
    let bounds: BoundingBox = triangles[range.clone()]
        .iter()
        .flat_map(|triangle| triangle.positions())
        .collect();

    gpu::BvhNode::leaf(
        bounds.min(),
        bounds.max(),
        range.start as u32,
        range.len() as u32,
    )
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum SplitStrategy {
    SpatialMedian,
    CentroidMean,
    IndexMedian,
}

#[derive(Clone, Copy, Debug)]
struct NodeRef {
    id: u32,
    depth: u32,
}

impl NodeRef {
    fn root() -> Self {
        Self { id: 0, depth: 0 }
    }
}
