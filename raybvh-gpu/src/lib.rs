//! Buffer layouts shared between the BVH builder and the ray-tracing shader
//! that reads its output.
//!
//! Every type here is `#[repr(C)]`, fixed-size and free of implicit padding,
//! so slices of them can be uploaded as-is.

mod bvh_node;
mod material;
mod triangle;

pub use self::bvh_node::*;
pub use self::material::*;
pub use self::triangle::*;
