use std::ops::{Add, AddAssign};

use glam::Vec3;

/// Axis-aligned bounding box.
///
/// A default box is empty - its min is `+inf` and its max is `-inf`, so that
/// growing it by the first point collapses it exactly onto that point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox {
    min: Vec3,
    max: Vec3,
}

impl BoundingBox {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    pub fn min(&self) -> Vec3 {
        self.min
    }

    pub fn max(&self) -> Vec3 {
        self.max
    }

    pub fn extent(&self) -> Vec3 {
        self.max() - self.min()
    }

    pub fn center(&self) -> Vec3 {
        (self.min() + self.max()) * 0.5
    }

    pub fn half_area(&self) -> f32 {
        if !self.is_set() {
            return 0.0;
        }

        let extent = self.extent();

        extent.x * extent.y + extent.y * extent.z + extent.z * extent.x
    }

    /// Returns whether this box has been grown by at least one point.
    pub fn is_set(&self) -> bool {
        self.min.cmple(self.max).all()
    }

    pub fn contains_point(&self, p: Vec3) -> bool {
        self.min.cmple(p).all() && p.cmple(self.max).all()
    }

    pub fn contains(&self, other: &Self) -> bool {
        if !other.is_set() {
            return true;
        }

        self.contains_point(other.min) && self.contains_point(other.max)
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::new(Vec3::INFINITY, Vec3::NEG_INFINITY)
    }
}

impl AddAssign<Vec3> for BoundingBox {
    fn add_assign(&mut self, rhs: Vec3) {
        self.min = self.min.min(rhs);
        self.max = self.max.max(rhs);
    }
}

impl FromIterator<Vec3> for BoundingBox {
    fn from_iter<T>(iter: T) -> Self
    where
        T: IntoIterator<Item = Vec3>,
    {
        let mut this = Self::default();

        for item in iter {
            this += item;
        }

        this
    }
}

impl Add<Self> for BoundingBox {
    type Output = Self;

    fn add(mut self, rhs: Self) -> Self::Output {
        self += rhs;
        self
    }
}

impl AddAssign<Self> for BoundingBox {
    fn add_assign(&mut self, rhs: Self) {
        if rhs.is_set() {
            *self += rhs.min;
            *self += rhs.max;
        }
    }
}
