//! Periodic boundary descriptions and minimum-image wrapping.
//!
//! A [`UnitCell`] describes the periodic box a structure lives in: none at all
//! (`Infinite`), an axis-aligned box (`Orthorhombic`), or a general
//! parallelepiped (`Triclinic`). The only algebra the rest of the crate needs
//! from it is minimum-image wrapping of displacement vectors, which the
//! geometry provider uses for every distance and angle computation.

use nalgebra::{Matrix3, Vector3};

/// Shape classification of a [`UnitCell`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellShape {
    /// No periodic boundaries; wrapping is the identity.
    Infinite,
    /// All three cell angles are 90 degrees.
    Orthorhombic,
    /// General cell with at least one non-right angle.
    Triclinic,
}

/// Periodic cell defined by three lengths (Å) and three angles (degrees).
///
/// The lattice vectors form the columns of the cell matrix: the first lies
/// along `x`, the second in the `xy` plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitCell {
    shape: CellShape,
    lengths: [f64; 3],
    angles: [f64; 3],
    matrix: Matrix3<f64>,
    inverse: Matrix3<f64>,
}

fn cell_matrix(lengths: [f64; 3], angles: [f64; 3]) -> Matrix3<f64> {
    let [a, b, c] = lengths;
    let alpha = angles[0].to_radians();
    let beta = angles[1].to_radians();
    let gamma = angles[2].to_radians();

    let bx = b * gamma.cos();
    let by = b * gamma.sin();
    let cx = c * beta.cos();
    let cy = c * (alpha.cos() - beta.cos() * gamma.cos()) / gamma.sin();
    let cz = (c * c - cx * cx - cy * cy).max(0.0).sqrt();

    Matrix3::new(a, bx, cx, 0.0, by, cy, 0.0, 0.0, cz)
}

impl UnitCell {
    /// Creates an infinite cell with no periodic boundaries.
    pub fn infinite() -> Self {
        Self {
            shape: CellShape::Infinite,
            lengths: [0.0; 3],
            angles: [90.0; 3],
            matrix: Matrix3::zeros(),
            inverse: Matrix3::zeros(),
        }
    }

    /// Creates an orthorhombic cell from three box lengths in ångströms.
    ///
    /// # Arguments
    ///
    /// * `a`, `b`, `c` - Box edge lengths along `x`, `y`, and `z`. Must be positive.
    pub fn orthorhombic(a: f64, b: f64, c: f64) -> Self {
        debug_assert!(
            a > 0.0 && b > 0.0 && c > 0.0,
            "Attempted to build an orthorhombic cell with a non-positive length"
        );
        let matrix = Matrix3::from_diagonal(&Vector3::new(a, b, c));
        Self {
            shape: CellShape::Orthorhombic,
            lengths: [a, b, c],
            angles: [90.0; 3],
            matrix,
            inverse: Matrix3::from_diagonal(&Vector3::new(1.0 / a, 1.0 / b, 1.0 / c)),
        }
    }

    /// Creates a triclinic cell from lengths (Å) and angles (degrees).
    ///
    /// When all three angles are exactly 90 degrees the cell is classified as
    /// orthorhombic instead.
    ///
    /// # Arguments
    ///
    /// * `lengths` - Edge lengths `[a, b, c]`. Must be positive.
    /// * `angles` - Cell angles `[alpha, beta, gamma]` in degrees, each in `(0, 180)`.
    pub fn triclinic(lengths: [f64; 3], angles: [f64; 3]) -> Self {
        if angles == [90.0; 3] {
            return Self::orthorhombic(lengths[0], lengths[1], lengths[2]);
        }
        debug_assert!(
            lengths.iter().all(|&l| l > 0.0),
            "Attempted to build a triclinic cell with a non-positive length"
        );
        debug_assert!(
            angles.iter().all(|&theta| theta > 0.0 && theta < 180.0),
            "Attempted to build a triclinic cell with an angle outside (0, 180)"
        );
        let matrix = cell_matrix(lengths, angles);
        let inverse = matrix
            .try_inverse()
            .expect("cell matrix from valid lengths and angles is invertible");
        Self {
            shape: CellShape::Triclinic,
            lengths,
            angles,
            matrix,
            inverse,
        }
    }

    /// Returns the shape classification of this cell.
    pub fn shape(&self) -> CellShape {
        self.shape
    }

    /// Returns the edge lengths `[a, b, c]` in ångströms.
    pub fn lengths(&self) -> [f64; 3] {
        self.lengths
    }

    /// Returns the cell angles `[alpha, beta, gamma]` in degrees.
    pub fn angles(&self) -> [f64; 3] {
        self.angles
    }

    /// Returns the cell matrix with lattice vectors as columns.
    pub fn matrix(&self) -> Matrix3<f64> {
        self.matrix
    }

    /// Returns the cell volume in cubic ångströms, zero for infinite cells.
    pub fn volume(&self) -> f64 {
        self.matrix.determinant().abs()
    }

    /// Wraps a displacement vector to its minimum-image representative.
    ///
    /// For infinite cells the vector is returned unchanged. For periodic cells
    /// the vector is reduced so every fractional component lies in `[-0.5, 0.5)`.
    ///
    /// # Arguments
    ///
    /// * `vector` - Cartesian displacement between two positions.
    ///
    /// # Returns
    ///
    /// The shortest periodic image of `vector`.
    pub fn wrap(&self, vector: Vector3<f64>) -> Vector3<f64> {
        match self.shape {
            CellShape::Infinite => vector,
            CellShape::Orthorhombic => {
                let [a, b, c] = self.lengths;
                Vector3::new(
                    vector.x - (vector.x / a).round() * a,
                    vector.y - (vector.y / b).round() * b,
                    vector.z - (vector.z / c).round() * c,
                )
            }
            CellShape::Triclinic => {
                let mut fractional = self.inverse * vector;
                fractional.x -= fractional.x.round();
                fractional.y -= fractional.y.round();
                fractional.z -= fractional.z.round();
                self.matrix * fractional
            }
        }
    }
}

impl Default for UnitCell {
    fn default() -> Self {
        Self::infinite()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_vector_close(got: Vector3<f64>, expected: Vector3<f64>) {
        assert!(
            (got - expected).norm() < 1e-9,
            "expected {:?}, got {:?}",
            expected,
            got
        );
    }

    #[test]
    fn infinite_cell_leaves_vectors_unchanged() {
        let cell = UnitCell::infinite();
        let vector = Vector3::new(100.0, -250.0, 4.2);

        assert_eq!(cell.shape(), CellShape::Infinite);
        assert_vector_close(cell.wrap(vector), vector);
        assert_eq!(cell.volume(), 0.0);
    }

    #[test]
    fn orthorhombic_wrap_reduces_each_axis_independently() {
        let cell = UnitCell::orthorhombic(10.0, 20.0, 30.0);

        assert_vector_close(
            cell.wrap(Vector3::new(12.0, -22.0, 46.0)),
            Vector3::new(2.0, -2.0, -14.0),
        );
        assert_vector_close(
            cell.wrap(Vector3::new(4.9, -9.9, 0.0)),
            Vector3::new(4.9, -9.9, 0.0),
        );
    }

    #[test]
    fn orthorhombic_volume_is_box_product() {
        let cell = UnitCell::orthorhombic(10.0, 20.0, 30.0);
        assert!((cell.volume() - 6000.0).abs() < 1e-9);
    }

    #[test]
    fn triclinic_with_right_angles_collapses_to_orthorhombic() {
        let cell = UnitCell::triclinic([10.0, 10.0, 10.0], [90.0, 90.0, 90.0]);
        assert_eq!(cell.shape(), CellShape::Orthorhombic);
    }

    #[test]
    fn triclinic_wrap_returns_shortest_image() {
        let cell = UnitCell::triclinic([10.0, 10.0, 10.0], [90.0, 90.0, 120.0]);

        // A displacement equal to one full lattice vector wraps to zero.
        let lattice_b = cell.matrix() * Vector3::new(0.0, 1.0, 0.0);
        assert_vector_close(cell.wrap(lattice_b), Vector3::zeros());

        // Small displacements are untouched.
        let small = Vector3::new(0.5, 0.25, -0.75);
        assert_vector_close(cell.wrap(small), small);
    }

    #[test]
    fn triclinic_matrix_reproduces_lengths_and_angles() {
        let lengths = [8.0, 9.0, 11.0];
        let angles = [80.0, 95.0, 105.0];
        let cell = UnitCell::triclinic(lengths, angles);
        let matrix = cell.matrix();

        let a = matrix.column(0).norm();
        let b = matrix.column(1).norm();
        let c = matrix.column(2).norm();
        assert!((a - lengths[0]).abs() < 1e-9);
        assert!((b - lengths[1]).abs() < 1e-9);
        assert!((c - lengths[2]).abs() < 1e-9);

        let cos_gamma = matrix.column(0).dot(&matrix.column(1)) / (a * b);
        let cos_alpha = matrix.column(1).dot(&matrix.column(2)) / (b * c);
        let cos_beta = matrix.column(0).dot(&matrix.column(2)) / (a * c);
        assert!((cos_gamma.acos().to_degrees() - angles[2]).abs() < 1e-6);
        assert!((cos_alpha.acos().to_degrees() - angles[0]).abs() < 1e-6);
        assert!((cos_beta.acos().to_degrees() - angles[1]).abs() < 1e-6);
    }

    #[test]
    fn default_cell_is_infinite() {
        assert_eq!(UnitCell::default().shape(), CellShape::Infinite);
    }
}
