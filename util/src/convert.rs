//! Implements `Convert` functions between catalog records and `nalgebra`
//! types.
//!
//! Catalog positions are plain `{x, y, z}` records and rotations are Euler
//! angles in degrees. Maths code wants `nalgebra` points, vectors and
//! rotation matrices, so the [`Convert`] trait bridges the two without the
//! catalog crate itself depending on `nalgebra`.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

// External
use nalgebra::{Point3, Rotation3, Vector3};

// Internal
use ric_if::robot::{Position3D, Rotation3D};

// ------------------------------------------------------------------------------------------------
// TRAITS
// ------------------------------------------------------------------------------------------------

pub trait Convert<O> {
    fn convert(&self) -> O;
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl Convert<Point3<f64>> for Position3D {
    fn convert(&self) -> Point3<f64> {
        Point3::new(self.x, self.y, self.z)
    }
}

impl Convert<Vector3<f64>> for Position3D {
    fn convert(&self) -> Vector3<f64> {
        Vector3::new(self.x, self.y, self.z)
    }
}

impl Convert<Position3D> for Point3<f64> {
    fn convert(&self) -> Position3D {
        Position3D {
            x: self.x,
            y: self.y,
            z: self.z,
        }
    }
}

impl Convert<Position3D> for Vector3<f64> {
    fn convert(&self) -> Position3D {
        Position3D {
            x: self.x,
            y: self.y,
            z: self.z,
        }
    }
}

impl Convert<Rotation3<f64>> for Rotation3D {
    /// The catalog's x/y/z degrees map to roll/pitch/yaw radians.
    fn convert(&self) -> Rotation3<f64> {
        Rotation3::from_euler_angles(
            self.x.to_radians(),
            self.y.to_radians(),
            self.z.to_radians(),
        )
    }
}

impl Convert<Rotation3D> for Rotation3<f64> {
    fn convert(&self) -> Rotation3D {
        let (roll, pitch, yaw) = self.euler_angles();
        Rotation3D {
            x: roll.to_degrees(),
            y: pitch.to_degrees(),
            z: yaw.to_degrees(),
        }
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn positions_convert_both_ways() {
        let pos = Position3D {
            x: 1.0,
            y: -2.0,
            z: 0.5,
        };

        let point: Point3<f64> = pos.convert();
        assert_eq!(point, Point3::new(1.0, -2.0, 0.5));

        let back: Position3D = point.convert();
        assert_eq!(back, pos);

        let vec: Vector3<f64> = pos.convert();
        assert_eq!(vec, Vector3::new(1.0, -2.0, 0.5));
    }

    #[test]
    fn rotations_are_euler_degrees() {
        let rot = Rotation3D {
            x: 0.0,
            y: 0.0,
            z: 90.0,
        };

        // A 90 degree yaw takes +x onto +y
        let matrix: Rotation3<f64> = rot.convert();
        let rotated = matrix * Vector3::x();
        assert!((rotated - Vector3::y()).norm() < 1e-9);

        let back: Rotation3D = matrix.convert();
        assert!(back.x.abs() < 1e-9);
        assert!(back.y.abs() < 1e-9);
        assert!((back.z - 90.0).abs() < 1e-9);
    }
}
