use std::ops::Index;

use glam::Vec3;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// Returns the axis along which `extent` is the longest.
    ///
    /// Ties resolve towards the earlier axis, so a cube splits along X.
    pub fn longest(extent: Vec3) -> Self {
        let mut axis = Self::X;

        if extent.y > extent[axis] {
            axis = Self::Y;
        }

        if extent.z > extent[axis] {
            axis = Self::Z;
        }

        axis
    }
}

impl Index<Axis> for Vec3 {
    type Output = f32;

    fn index(&self, index: Axis) -> &Self::Output {
        match index {
            Axis::X => &self.x,
            Axis::Y => &self.y,
            Axis::Z => &self.z,
        }
    }
}
