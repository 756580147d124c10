//! Graph-based description of atoms, bonds, and everything derived from them.
//!
//! The topology owns the atom list and the canonical bond set, and keeps the
//! derived angle, dihedral, and improper lists materialized at all times. Every
//! mutation of the bond graph rebuilds the derived lists eagerly, trading a
//! little mutation cost for cheap, repeated reads during selection evaluation.
//! All collections stay sorted, so lookups are binary searches and iteration
//! order is reproducible.

use super::atom::Atom;
use super::connectivity::{Angle, Bond, BondOrder, Dihedral, Improper};
use super::error::Error;
use super::geometry::Geometry;
use super::residue::Residue;

/// Default multiplicative tolerance applied to the sum of covalent radii when
/// guessing bonds. Chosen so typical single bonds fall inside the cutoff while
/// non-bonded contacts stay outside.
pub const BOND_GUESS_TOLERANCE: f64 = 1.2;

/// Distance floor below which a pair is considered coincident rather than
/// bonded, in ångströms.
pub const BOND_GUESS_MIN_DISTANCE: f64 = 0.03;

/// Aggregate owning atoms, bonds, derived connectivity, and residues.
///
/// Atoms are addressed by dense zero-based indices. Removing an atom shifts
/// every higher index down by one across bonds, derived tuples, and residue
/// membership, exactly as if the atom had never existed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Topology {
    atoms: Vec<Atom>,
    bonds: Vec<Bond>,
    angles: Vec<Angle>,
    dihedrals: Vec<Dihedral>,
    impropers: Vec<Improper>,
    residues: Vec<Residue>,
}

impl Topology {
    /// Creates an empty topology.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a topology holding `natoms` placeholder atoms with empty names.
    ///
    /// Useful when connectivity matters but atom identities are unknown, e.g.
    /// when a trajectory format stores positions only.
    ///
    /// # Arguments
    ///
    /// * `natoms` - Number of placeholder atoms to create.
    pub fn with_atom_count(natoms: usize) -> Self {
        let mut topology = Self::new();
        topology.atoms.resize_with(natoms, || Atom::new("", ""));
        topology
    }

    /// Returns the number of atoms.
    pub fn atom_count(&self) -> usize {
        self.atoms.len()
    }

    /// Returns `true` when the topology holds no atoms.
    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    /// Looks up the atom at `index`.
    pub fn atom(&self, index: usize) -> Option<&Atom> {
        self.atoms.get(index)
    }

    /// Looks up the atom at `index` for mutation.
    pub fn atom_mut(&mut self, index: usize) -> Option<&mut Atom> {
        self.atoms.get_mut(index)
    }

    /// Returns all atoms in index order.
    pub fn atoms(&self) -> &[Atom] {
        &self.atoms
    }

    /// Appends an atom and returns its index.
    ///
    /// # Arguments
    ///
    /// * `atom` - The atom to append.
    ///
    /// # Returns
    ///
    /// The index assigned to the new atom.
    pub fn add_atom(&mut self, atom: Atom) -> usize {
        self.atoms.push(atom);
        self.atoms.len() - 1
    }

    /// Removes the atom at `index`, dropping bonds that touch it and shifting
    /// all higher indices down by one everywhere.
    ///
    /// # Arguments
    ///
    /// * `index` - Index of the atom to remove.
    ///
    /// # Returns
    ///
    /// The removed atom.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidIndex`] when `index` is out of range.
    pub fn remove_atom(&mut self, index: usize) -> Result<Atom, Error> {
        if index >= self.atoms.len() {
            return Err(Error::invalid_index(index, self.atoms.len()));
        }
        let atom = self.atoms.remove(index);

        let shift = |i: usize| if i > index { i - 1 } else { i };
        let renumbered: Vec<Bond> = self
            .bonds
            .iter()
            .filter(|bond| !bond.contains(index))
            .map(|bond| Bond::new(shift(bond.i()), shift(bond.j()), bond.order))
            .collect();
        self.bonds = renumbered;

        for residue in &mut self.residues {
            residue.renumber_after_removal(index);
        }

        self.recompute_derived();
        Ok(atom)
    }

    /// Adds a bond between atoms `i` and `j`.
    ///
    /// Adding an existing bond is a no-op, except that a known `order`
    /// replaces whatever order the bond carried before.
    ///
    /// # Arguments
    ///
    /// * `i` - First atom index.
    /// * `j` - Second atom index.
    /// * `order` - Bond order tag; pass [`BondOrder::Unknown`] when unavailable.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SelfBonded`] when `i == j` and [`Error::InvalidIndex`]
    /// when either index is out of range.
    pub fn add_bond(&mut self, i: usize, j: usize, order: BondOrder) -> Result<(), Error> {
        let natoms = self.atoms.len();
        if i == j {
            return Err(Error::SelfBonded { index: i });
        }
        if i >= natoms {
            return Err(Error::invalid_index(i, natoms));
        }
        if j >= natoms {
            return Err(Error::invalid_index(j, natoms));
        }

        let bond = Bond::new(i, j, order);
        match self.bonds.binary_search(&bond) {
            Ok(slot) => {
                if order != BondOrder::Unknown {
                    self.bonds[slot].order = order;
                }
            }
            Err(slot) => {
                self.bonds.insert(slot, bond);
                self.recompute_derived();
            }
        }
        Ok(())
    }

    /// Removes the bond between atoms `i` and `j` when present.
    ///
    /// The pair is order-insensitive; removing an absent bond is a no-op.
    ///
    /// # Returns
    ///
    /// `true` when a bond was removed.
    pub fn remove_bond(&mut self, i: usize, j: usize) -> bool {
        if i == j {
            return false;
        }
        let probe = Bond::new(i, j, BondOrder::Unknown);
        match self.bonds.binary_search(&probe) {
            Ok(slot) => {
                self.bonds.remove(slot);
                self.recompute_derived();
                true
            }
            Err(_) => false,
        }
    }

    /// Removes every bond, emptying all derived lists.
    pub fn clear_bonds(&mut self) {
        self.bonds.clear();
        self.recompute_derived();
    }

    /// Returns all bonds in canonical sorted order.
    pub fn bonds(&self) -> &[Bond] {
        &self.bonds
    }

    /// Returns all derived angles in canonical sorted order.
    pub fn angles(&self) -> &[Angle] {
        &self.angles
    }

    /// Returns all derived dihedrals in canonical sorted order.
    pub fn dihedrals(&self) -> &[Dihedral] {
        &self.dihedrals
    }

    /// Returns all derived impropers in canonical sorted order.
    pub fn impropers(&self) -> &[Improper] {
        &self.impropers
    }

    /// Reports whether atoms `i` and `j` are bonded.
    pub fn is_bond(&self, i: usize, j: usize) -> bool {
        i != j
            && self
                .bonds
                .binary_search(&Bond::new(i, j, BondOrder::Unknown))
                .is_ok()
    }

    /// Returns the order tag of the bond between `i` and `j`, when bonded.
    pub fn bond_order(&self, i: usize, j: usize) -> Option<BondOrder> {
        if i == j {
            return None;
        }
        self.bonds
            .binary_search(&Bond::new(i, j, BondOrder::Unknown))
            .ok()
            .map(|slot| self.bonds[slot].order)
    }

    /// Reports whether `(e1, vertex, e2)` forms a derived angle.
    pub fn is_angle(&self, e1: usize, vertex: usize, e2: usize) -> bool {
        if e1 == vertex || e2 == vertex || e1 == e2 {
            return false;
        }
        self.angles.binary_search(&Angle::new(e1, vertex, e2)).is_ok()
    }

    /// Reports whether `(a, b, c, d)` forms a derived dihedral.
    pub fn is_dihedral(&self, a: usize, b: usize, c: usize, d: usize) -> bool {
        let distinct = a != b && a != c && a != d && b != c && b != d && c != d;
        distinct
            && self
                .dihedrals
                .binary_search(&Dihedral::new(a, b, c, d))
                .is_ok()
    }

    /// Returns the bonded neighbors of atom `index` in ascending order.
    pub fn neighbors(&self, index: usize) -> Vec<usize> {
        let mut result = Vec::new();
        for bond in &self.bonds {
            if bond.i() == index {
                result.push(bond.j());
            } else if bond.j() == index {
                result.push(bond.i());
            }
        }
        result.sort_unstable();
        result
    }

    /// Adds a residue to this topology.
    ///
    /// # Arguments
    ///
    /// * `residue` - Residue whose members must not belong to any existing residue.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ResidueOverlap`] when a member atom is already owned
    /// by another residue, and [`Error::InvalidIndex`] when a member index is
    /// out of range.
    pub fn add_residue(&mut self, residue: Residue) -> Result<(), Error> {
        for index in residue.iter_atoms() {
            if index >= self.atoms.len() {
                return Err(Error::invalid_index(index, self.atoms.len()));
            }
            if self.residues.iter().any(|r| r.contains(index)) {
                return Err(Error::ResidueOverlap { index });
            }
        }
        self.residues.push(residue);
        Ok(())
    }

    /// Returns all residues in insertion order.
    pub fn residues(&self) -> &[Residue] {
        &self.residues
    }

    /// Finds the residue containing atom `index`, when any does.
    pub fn residue_for_atom(&self, index: usize) -> Option<&Residue> {
        self.residues.iter().find(|r| r.contains(index))
    }

    /// Reports whether two residues are linked by at least one bond crossing
    /// their member sets. A residue is always linked to itself.
    pub fn are_linked(&self, first: &Residue, second: &Residue) -> bool {
        if first == second {
            return true;
        }
        self.bonds.iter().any(|bond| {
            (first.contains(bond.i()) && second.contains(bond.j()))
                || (first.contains(bond.j()) && second.contains(bond.i()))
        })
    }

    /// Guesses bonds from interatomic distances using the default tolerance.
    ///
    /// See [`Topology::guess_bonds_with_tolerance`].
    pub fn guess_bonds(&mut self, geometry: &dyn Geometry) {
        self.guess_bonds_with_tolerance(geometry, BOND_GUESS_TOLERANCE);
    }

    /// Guesses bonds from interatomic distances.
    ///
    /// Every unordered pair of atoms whose chemical types both have a tabulated
    /// covalent radius is bonded when its minimum-image distance `d` satisfies
    /// `MIN < d <= tolerance * (r_i + r_j)`, with `MIN` the coincidence floor
    /// [`BOND_GUESS_MIN_DISTANCE`]. Atoms without a known radius are skipped.
    /// Guessed bonds carry [`BondOrder::Unknown`] and never replace the order
    /// of an existing bond. The procedure is a heuristic: unsuitable input
    /// yields few or no bonds, never an error.
    ///
    /// # Arguments
    ///
    /// * `geometry` - Position provider covering at least this topology's atoms.
    /// * `tolerance` - Multiplicative factor applied to the sum of covalent radii.
    pub fn guess_bonds_with_tolerance(&mut self, geometry: &dyn Geometry, tolerance: f64) {
        debug_assert!(
            geometry.size() >= self.atoms.len(),
            "Geometry provider covers {} atoms but the topology has {}",
            geometry.size(),
            self.atoms.len()
        );

        let radii: Vec<Option<f64>> = self.atoms.iter().map(Atom::covalent_radius).collect();

        let mut guessed = Vec::new();
        for i in 0..self.atoms.len() {
            let Some(radius_i) = radii[i] else { continue };
            for j in (i + 1)..self.atoms.len() {
                let Some(radius_j) = radii[j] else { continue };
                let distance = geometry.distance(i, j);
                if distance > BOND_GUESS_MIN_DISTANCE
                    && distance <= tolerance * (radius_i + radius_j)
                {
                    guessed.push((i, j));
                }
            }
        }

        for (i, j) in guessed {
            let _ = self.add_bond(i, j, BondOrder::Unknown);
        }
    }

    /// Rebuilds the angle, dihedral, and improper lists from the bond set.
    fn recompute_derived(&mut self) {
        let neighbors = self.neighbor_lists();

        self.angles.clear();
        for (vertex, adjacent) in neighbors.iter().enumerate() {
            for (slot, &e1) in adjacent.iter().enumerate() {
                for &e2 in &adjacent[slot + 1..] {
                    self.angles.push(Angle::new(e1, vertex, e2));
                }
            }
        }
        self.angles.sort_unstable();
        self.angles.dedup();

        self.dihedrals.clear();
        for bond in &self.bonds {
            let (b, c) = (bond.i(), bond.j());
            for &a in &neighbors[b] {
                if a == c {
                    continue;
                }
                for &d in &neighbors[c] {
                    if d == b || d == a {
                        continue;
                    }
                    self.dihedrals.push(Dihedral::new(a, b, c, d));
                }
            }
        }
        self.dihedrals.sort_unstable();
        self.dihedrals.dedup();

        self.impropers.clear();
        for (center, adjacent) in neighbors.iter().enumerate() {
            if let [s1, s2, s3] = adjacent[..] {
                self.impropers.push(Improper::new(s1, center, s2, s3));
            }
        }
        self.impropers.sort_unstable();
        self.impropers.dedup();
    }

    /// Builds per-atom adjacency lists, each sorted ascending.
    fn neighbor_lists(&self) -> Vec<Vec<usize>> {
        let mut lists = vec![Vec::new(); self.atoms.len()];
        for bond in &self.bonds {
            lists[bond.i()].push(bond.j());
            lists[bond.j()].push(bond.i());
        }
        // Bonds are sorted by canonical pair, so each list is already ascending.
        lists
    }
}
