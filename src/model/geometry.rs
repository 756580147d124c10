//! Geometry provider boundary consumed by bond guessing and selection evaluation.
//!
//! Anything that can hand out per-atom positions and wrap displacement vectors
//! through its periodic cell can act as a [`Geometry`] provider. The distance,
//! angle, dihedral, and out-of-plane measurements are provided methods built on
//! those two primitives, so implementors only supply storage access.

use super::types::Point;
use nalgebra::Vector3;

/// Read-only access to per-atom positions under periodic boundary conditions.
///
/// All provided measurements apply minimum-image wrapping to every displacement
/// before measuring, so they are correct for atoms that straddle the periodic
/// boundary.
pub trait Geometry {
    /// Returns the number of atoms positions are available for.
    fn size(&self) -> usize;

    /// Returns the Cartesian position of atom `i` in ångströms.
    fn position(&self, i: usize) -> Point;

    /// Wraps a displacement vector to its minimum periodic image.
    fn wrap(&self, vector: Vector3<f64>) -> Vector3<f64>;

    /// Computes the minimum-image distance between atoms `i` and `j`.
    ///
    /// # Returns
    ///
    /// The distance in ångströms.
    fn distance(&self, i: usize, j: usize) -> f64 {
        self.wrap(self.position(j) - self.position(i)).norm()
    }

    /// Computes the angle at vertex `j` formed by atoms `i`, `j`, and `k`.
    ///
    /// # Returns
    ///
    /// The angle in radians, in `[0, π]`.
    fn angle(&self, i: usize, j: usize, k: usize) -> f64 {
        let rji = self.wrap(self.position(i) - self.position(j));
        let rjk = self.wrap(self.position(k) - self.position(j));
        let cos = rji.dot(&rjk) / (rji.norm() * rjk.norm());
        cos.clamp(-1.0, 1.0).acos()
    }

    /// Computes the dihedral angle along the chain `i-j-k-m`.
    ///
    /// # Returns
    ///
    /// The signed torsion angle in radians, in `(-π, π]`.
    fn dihedral(&self, i: usize, j: usize, k: usize, m: usize) -> f64 {
        let rij = self.wrap(self.position(i) - self.position(j));
        let rjk = self.wrap(self.position(j) - self.position(k));
        let rkm = self.wrap(self.position(k) - self.position(m));
        let a = rij.cross(&rjk);
        let b = rjk.cross(&rkm);
        (rjk.norm() * rij.dot(&b)).atan2(a.dot(&b))
    }

    /// Computes the out-of-plane distance of atom `j` from the plane through
    /// `i`, `k`, and `m`.
    ///
    /// The sign follows the plane normal `(k - i) × (m - i)`. When the three
    /// plane atoms are collinear the plane is degenerate and the plain
    /// distance from `i` to `j` is returned.
    ///
    /// # Returns
    ///
    /// The signed distance in ångströms.
    fn out_of_plane(&self, i: usize, j: usize, k: usize, m: usize) -> f64 {
        let rji = self.wrap(self.position(j) - self.position(i));
        let rik = self.wrap(self.position(k) - self.position(i));
        let rim = self.wrap(self.position(m) - self.position(i));
        let normal = rik.cross(&rim);
        let norm = normal.norm();
        if norm < 1e-12 {
            rji.norm()
        } else {
            rji.dot(&normal) / norm
        }
    }
}
