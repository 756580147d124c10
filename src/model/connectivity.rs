//! Canonical bonded-interaction tuples: bonds, angles, dihedrals, and impropers.
//!
//! Every type in this module normalizes its atom indices on construction, so two
//! tuples describing the same physical connectivity always compare equal, hash
//! identically, and sort into the same position. The [`Topology`](super::topology::Topology)
//! relies on this to keep its derived lists deduplicated and binary-searchable.

use std::fmt;
use std::ops::Index;
use std::str::FromStr;

/// Chemical multiplicity tag carried by a bond.
///
/// The order is informational: it never participates in the identity of the
/// bonded pair, so replacing the order of an existing bond does not create a
/// second bond.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BondOrder {
    /// No order information available.
    #[default]
    Unknown,
    Single,
    Double,
    Triple,
    Quadruple,
    Aromatic,
    /// Amide linkage between a carbonyl carbon and a nitrogen.
    Amide,
}

impl fmt::Display for BondOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BondOrder::Unknown => "unknown",
            BondOrder::Single => "single",
            BondOrder::Double => "double",
            BondOrder::Triple => "triple",
            BondOrder::Quadruple => "quadruple",
            BondOrder::Aromatic => "aromatic",
            BondOrder::Amide => "amide",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for BondOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "unknown" => Ok(BondOrder::Unknown),
            "single" => Ok(BondOrder::Single),
            "double" => Ok(BondOrder::Double),
            "triple" => Ok(BondOrder::Triple),
            "quadruple" => Ok(BondOrder::Quadruple),
            "aromatic" => Ok(BondOrder::Aromatic),
            "amide" => Ok(BondOrder::Amide),
            _ => Err(format!("Invalid bond order: {}", s)),
        }
    }
}

/// Undirected bond connecting two atoms within a topology.
///
/// Bonds store canonical atom indices (ascending order) so equality, hashing,
/// and sorting remain stable regardless of the order in which the connection
/// was created. Identity is the index pair alone; `order` rides along and is
/// excluded from comparisons.
#[derive(Debug, Clone, Copy)]
pub struct Bond {
    data: [usize; 2],
    /// Chemical multiplicity assigned to the bond.
    pub order: BondOrder,
}

impl PartialEq for Bond {
    fn eq(&self, other: &Self) -> bool {
        self.data == other.data
    }
}

impl Eq for Bond {}

impl std::hash::Hash for Bond {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.data.hash(state);
    }
}

impl PartialOrd for Bond {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Bond {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.data.cmp(&other.data)
    }
}

impl Bond {
    /// Creates a new bond while canonicalizing the endpoint ordering.
    ///
    /// The smaller atom index is stored first so `Bond::new(i, j, o)` and
    /// `Bond::new(j, i, o)` are identical values.
    ///
    /// # Arguments
    ///
    /// * `i` - Index of one bonded atom.
    /// * `j` - Index of the partner atom. Must differ from `i`.
    /// * `order` - Chemical bond order describing multiplicity or aromaticity.
    pub fn new(i: usize, j: usize, order: BondOrder) -> Self {
        debug_assert!(i != j, "Attempted to bond atom {} to itself", i);
        Self {
            data: [i.min(j), i.max(j)],
            order,
        }
    }

    /// Returns the smaller atom index.
    pub fn i(&self) -> usize {
        self.data[0]
    }

    /// Returns the larger atom index.
    pub fn j(&self) -> usize {
        self.data[1]
    }

    /// Reports whether this bond touches atom `index`.
    pub fn contains(&self, index: usize) -> bool {
        self.data[0] == index || self.data[1] == index
    }

    /// Returns the canonical index pair for ordering and dedup, ignoring the order tag.
    pub(crate) fn pair(&self) -> [usize; 2] {
        self.data
    }
}

impl Index<usize> for Bond {
    type Output = usize;

    fn index(&self, index: usize) -> &usize {
        &self.data[index]
    }
}

/// Bending angle formed by a vertex atom bonded to two endpoint atoms.
///
/// Canonical form keeps the vertex fixed in the middle slot and orders the two
/// endpoints ascending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Angle {
    data: [usize; 3],
}

impl Angle {
    /// Creates a new angle while canonicalizing the endpoint ordering.
    ///
    /// # Arguments
    ///
    /// * `e1` - One endpoint atom, bonded to the vertex.
    /// * `vertex` - The shared atom in the middle.
    /// * `e2` - The other endpoint atom. All three indices must be distinct.
    pub fn new(e1: usize, vertex: usize, e2: usize) -> Self {
        debug_assert!(
            e1 != vertex && e2 != vertex && e1 != e2,
            "Attempted to build an angle with a repeated atom: ({}, {}, {})",
            e1,
            vertex,
            e2
        );
        Self {
            data: [e1.min(e2), vertex, e1.max(e2)],
        }
    }

    /// Returns the vertex atom shared by both bonds.
    pub fn vertex(&self) -> usize {
        self.data[1]
    }
}

impl Index<usize> for Angle {
    type Output = usize;

    fn index(&self, index: usize) -> &usize {
        &self.data[index]
    }
}

/// Torsion formed by a chain of four atoms `a-b-c-d` along three bonds.
///
/// Canonical form chooses the traversal direction so the first central atom has
/// a smaller index than the second; reversing the chain swaps each outer atom
/// together with its central partner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Dihedral {
    data: [usize; 4],
}

impl Dihedral {
    /// Creates a new dihedral while canonicalizing the traversal direction.
    ///
    /// # Arguments
    ///
    /// * `a` - Outer atom bonded to `b`.
    /// * `b` - First central atom.
    /// * `c` - Second central atom, bonded to `b`.
    /// * `d` - Outer atom bonded to `c`. All four indices must be distinct.
    pub fn new(a: usize, b: usize, c: usize, d: usize) -> Self {
        debug_assert!(
            a != b && a != c && a != d && b != c && b != d && c != d,
            "Attempted to build a dihedral with a repeated atom: ({}, {}, {}, {})",
            a,
            b,
            c,
            d
        );
        let data = if b < c { [a, b, c, d] } else { [d, c, b, a] };
        Self { data }
    }
}

impl Index<usize> for Dihedral {
    type Output = usize;

    fn index(&self, index: usize) -> &usize {
        &self.data[index]
    }
}

/// Out-of-plane arrangement of a central atom bonded to three substituents.
///
/// Canonical form keeps the center fixed in the second slot and orders the
/// three substituents ascending across the remaining slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Improper {
    data: [usize; 4],
}

impl Improper {
    /// Creates a new improper while canonicalizing the substituent ordering.
    ///
    /// # Arguments
    ///
    /// * `s1` - First substituent, bonded to the center.
    /// * `center` - The central atom.
    /// * `s2` - Second substituent.
    /// * `s3` - Third substituent. All four indices must be distinct.
    pub fn new(s1: usize, center: usize, s2: usize, s3: usize) -> Self {
        debug_assert!(
            s1 != center
                && s2 != center
                && s3 != center
                && s1 != s2
                && s1 != s3
                && s2 != s3,
            "Attempted to build an improper with a repeated atom: ({}, {}, {}, {})",
            s1,
            center,
            s2,
            s3
        );
        let mut subs = [s1, s2, s3];
        subs.sort_unstable();
        Self {
            data: [subs[0], center, subs[1], subs[2]],
        }
    }

    /// Returns the central atom bonded to all three substituents.
    pub fn center(&self) -> usize {
        self.data[1]
    }
}

impl Index<usize> for Improper {
    type Output = usize;

    fn index(&self, index: usize) -> &usize {
        &self.data[index]
    }
}
