use bytemuck::{Pod, Zeroable};
use glam::Vec3;

use crate::MaterialId;

/// A triangle as seen by the shader.
///
/// Each position is followed by a 32-bit word so that every vertex starts at
/// a 16-byte boundary; the first one carries the material, the other two are
/// padding.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct Triangle {
    pub a: Vec3,
    pub material_id: MaterialId,
    pub b: Vec3,
    pub pad0: u32,
    pub c: Vec3,
    pub pad1: u32,
}

impl Triangle {
    pub fn new(positions: [Vec3; 3], material_id: MaterialId) -> Self {
        let [a, b, c] = positions;

        Self {
            a,
            material_id,
            b,
            pad0: 0,
            c,
            pad1: 0,
        }
    }

    pub fn position0(&self) -> Vec3 {
        self.a
    }

    pub fn position1(&self) -> Vec3 {
        self.b
    }

    pub fn position2(&self) -> Vec3 {
        self.c
    }

    pub fn positions(&self) -> [Vec3; 3] {
        [self.position0(), self.position1(), self.position2()]
    }

    pub fn material_id(&self) -> MaterialId {
        self.material_id
    }
}
