use glam::{Mat4, Vec3};

use crate::{gpu, BoundingBox};

pub trait TriangleExt {
    fn center(&self) -> Vec3;
    fn bounds(&self) -> BoundingBox;

    /// Bakes given model matrix into triangle's positions.
    fn with_xform(&self, xform: Mat4) -> Self;
}

impl TriangleExt for gpu::Triangle {
    fn center(&self) -> Vec3 {
        self.positions().iter().copied().sum::<Vec3>() / 3.0
    }

    fn bounds(&self) -> BoundingBox {
        self.positions().iter().copied().collect()
    }

    fn with_xform(&self, xform: Mat4) -> Self {
        let positions = self
            .positions()
            .map(|vertex| xform.transform_point3(vertex));

        gpu::Triangle::new(positions, self.material_id())
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use glam::{vec3, Quat};

    use super::*;

    fn triangle() -> gpu::Triangle {
        gpu::Triangle::new(
            [vec3(0.0, 0.0, 0.0), vec3(3.0, 0.0, 0.0), vec3(0.0, 6.0, -3.0)],
            gpu::MaterialId::new(7),
        )
    }

    #[test]
    fn center() {
        let center = triangle().center();

        assert_relative_eq!(1.0, center.x);
        assert_relative_eq!(2.0, center.y);
        assert_relative_eq!(-1.0, center.z);
    }

    #[test]
    fn bounds() {
        let bounds = triangle().bounds();

        assert_eq!(vec3(0.0, 0.0, -3.0), bounds.min());
        assert_eq!(vec3(3.0, 6.0, 0.0), bounds.max());
    }

    #[test]
    fn with_xform() {
        let xform = Mat4::from_scale_rotation_translation(
            Vec3::splat(2.0),
            Quat::IDENTITY,
            vec3(10.0, 0.0, 0.0),
        );

        let target = triangle().with_xform(xform);

        assert_eq!(vec3(10.0, 0.0, 0.0), target.position0());
        assert_eq!(vec3(16.0, 0.0, 0.0), target.position1());
        assert_eq!(vec3(10.0, 12.0, -6.0), target.position2());
        assert_eq!(gpu::MaterialId::new(7), target.material_id());
    }
}
