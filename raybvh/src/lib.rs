//! CPU-side builder of bounding volume hierarchies over triangle soups.
//!
//! The builder consumes the caller's triangles, reorders them in place so that
//! each leaf's triangles are contiguous and produces a flat array of nodes
//! ready to be uploaded next to those triangles; see [`Bvh::build()`].

#![allow(clippy::len_without_is_empty)]

mod bvh;
mod utils;

pub use raybvh_gpu as gpu;

pub use self::bvh::*;
pub use self::utils::*;
