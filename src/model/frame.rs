//! Structure snapshot pairing a topology with positions and a periodic cell.
//!
//! A [`Frame`] is what a trajectory reader produces for each step: the atom
//! graph plus one Cartesian position per atom, wrapped in whatever periodic
//! cell the step declares. It is the canonical [`Geometry`] implementation the
//! selection evaluator and bond guessing run against.

use super::atom::Atom;
use super::cell::UnitCell;
use super::connectivity::BondOrder;
use super::error::Error;
use super::geometry::Geometry;
use super::topology::Topology;
use super::types::Point;
use nalgebra::Vector3;

/// Topology, per-atom positions, and the active periodic cell.
///
/// The position list always has exactly one entry per topology atom; the
/// mutators on this type keep the two in sync, which is why the inner topology
/// is only handed out immutably.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    topology: Topology,
    positions: Vec<Point>,
    cell: UnitCell,
}

struct PositionsView<'a> {
    positions: &'a [Point],
    cell: &'a UnitCell,
}

impl Geometry for PositionsView<'_> {
    fn size(&self) -> usize {
        self.positions.len()
    }

    fn position(&self, i: usize) -> Point {
        self.positions[i]
    }

    fn wrap(&self, vector: Vector3<f64>) -> Vector3<f64> {
        self.cell.wrap(vector)
    }
}

impl Frame {
    /// Creates an empty frame with an infinite cell.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a frame from an existing topology, zero-filling every position.
    ///
    /// # Arguments
    ///
    /// * `topology` - Atom graph this frame snapshots.
    pub fn from_topology(topology: Topology) -> Self {
        let positions = vec![Point::origin(); topology.atom_count()];
        Self {
            topology,
            positions,
            cell: UnitCell::infinite(),
        }
    }

    /// Appends an atom with its position and returns the new index.
    ///
    /// # Arguments
    ///
    /// * `atom` - The atom to append to the topology.
    /// * `position` - Cartesian position in ångströms.
    pub fn add_atom(&mut self, atom: Atom, position: Point) -> usize {
        let index = self.topology.add_atom(atom);
        self.positions.push(position);
        index
    }

    /// Removes the atom at `index` together with its position.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidIndex`] when `index` is out of range.
    pub fn remove_atom(&mut self, index: usize) -> Result<Atom, Error> {
        let atom = self.topology.remove_atom(index)?;
        self.positions.remove(index);
        Ok(atom)
    }

    /// Adds a bond between atoms `i` and `j`. See [`Topology::add_bond`].
    pub fn add_bond(&mut self, i: usize, j: usize, order: BondOrder) -> Result<(), Error> {
        self.topology.add_bond(i, j, order)
    }

    /// Removes the bond between atoms `i` and `j`. See [`Topology::remove_bond`].
    pub fn remove_bond(&mut self, i: usize, j: usize) -> bool {
        self.topology.remove_bond(i, j)
    }

    /// Gives read access to the underlying topology.
    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    /// Looks up the atom at `index`. See [`Topology::atom`].
    pub fn atom(&self, index: usize) -> Option<&Atom> {
        self.topology.atom(index)
    }

    /// Looks up the atom at `index` for mutation. See [`Topology::atom_mut`].
    pub fn atom_mut(&mut self, index: usize) -> Option<&mut Atom> {
        self.topology.atom_mut(index)
    }

    /// Returns the number of atoms in this frame.
    pub fn atom_count(&self) -> usize {
        self.topology.atom_count()
    }

    /// Returns all positions in atom index order.
    pub fn positions(&self) -> &[Point] {
        &self.positions
    }

    /// Returns all positions for mutation, e.g. when loading the next step.
    pub fn positions_mut(&mut self) -> &mut [Point] {
        &mut self.positions
    }

    /// Returns the active periodic cell.
    pub fn cell(&self) -> &UnitCell {
        &self.cell
    }

    /// Replaces the active periodic cell.
    pub fn set_cell(&mut self, cell: UnitCell) {
        self.cell = cell;
    }

    /// Guesses bonds from this frame's positions and cell using the default
    /// tolerance. See [`Topology::guess_bonds_with_tolerance`].
    pub fn guess_bonds(&mut self) {
        let view = PositionsView {
            positions: &self.positions,
            cell: &self.cell,
        };
        self.topology.guess_bonds(&view);
    }
}

impl Geometry for Frame {
    fn size(&self) -> usize {
        self.positions.len()
    }

    fn position(&self, i: usize) -> Point {
        self.positions[i]
    }

    fn wrap(&self, vector: Vector3<f64>) -> Vector3<f64> {
        self.cell.wrap(vector)
    }
}
