//! Compiled selections and their evaluation against a topology.
//!
//! A [`Selection`] is compiled once from text, independent of any structure,
//! and can then be evaluated repeatedly. Evaluation enumerates candidate atom
//! tuples, either all ordered tuples of distinct indices (permutation kinds)
//! or exactly the tuples in the topology's derived connectivity lists
//! (connectivity kinds), and keeps those the predicate tree accepts, in
//! generation order.

use super::error::Error;
use super::expr::Expr;
use super::parser;
use crate::model::frame::Frame;
use crate::model::geometry::Geometry;
use crate::model::topology::Topology;
use std::fmt;
use std::ops::Index;
use std::str::FromStr;

/// Selection kind, fixing both the arity and the candidate generation strategy.
///
/// `Atoms`, `Pairs`, `Three`, and `Four` enumerate every ordered tuple of
/// distinct atom indices. `Bonds`, `Angles`, `Dihedrals`, and `Impropers` draw
/// candidates from the corresponding derived list of the topology, in its
/// canonical stored orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Atoms,
    Pairs,
    Three,
    Four,
    Bonds,
    Angles,
    Dihedrals,
    Impropers,
}

impl Kind {
    /// Returns the number of atom slots a selection of this kind matches.
    pub fn arity(&self) -> u8 {
        match self {
            Kind::Atoms => 1,
            Kind::Pairs | Kind::Bonds => 2,
            Kind::Three | Kind::Angles => 3,
            Kind::Four | Kind::Dihedrals | Kind::Impropers => 4,
        }
    }

    /// Resolves a kind keyword, including the `one` and `two` aliases.
    pub(crate) fn from_keyword(keyword: &str) -> Option<Kind> {
        match keyword {
            "atoms" | "one" => Some(Kind::Atoms),
            "pairs" | "two" => Some(Kind::Pairs),
            "three" => Some(Kind::Three),
            "four" => Some(Kind::Four),
            "bonds" => Some(Kind::Bonds),
            "angles" => Some(Kind::Angles),
            "dihedrals" => Some(Kind::Dihedrals),
            "impropers" => Some(Kind::Impropers),
            _ => None,
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Kind::Atoms => "atoms",
            Kind::Pairs => "pairs",
            Kind::Three => "three",
            Kind::Four => "four",
            Kind::Bonds => "bonds",
            Kind::Angles => "angles",
            Kind::Dihedrals => "dihedrals",
            Kind::Impropers => "impropers",
        };
        write!(f, "{}", name)
    }
}

/// Ordered, fixed-length tuple of atom indices produced by evaluation.
///
/// Equality and ordering are structural over the active elements, independent
/// of which selection produced the match.
#[derive(Debug, Clone, Copy)]
pub struct Match {
    size: u8,
    data: [usize; 4],
}

impl Match {
    /// Creates a match from a slice of 1 to 4 atom indices.
    ///
    /// # Arguments
    ///
    /// * `indices` - The matched atom indices, in slot order.
    pub fn new(indices: &[usize]) -> Self {
        debug_assert!(
            (1..=4).contains(&indices.len()),
            "A match holds between 1 and 4 atoms, not {}",
            indices.len()
        );
        let mut data = [0; 4];
        data[..indices.len()].copy_from_slice(indices);
        Self {
            size: indices.len() as u8,
            data,
        }
    }

    /// Returns the number of atom indices in this match.
    pub fn len(&self) -> usize {
        self.size as usize
    }

    /// Returns `false`: a match always holds at least one index.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Returns the active indices as a slice.
    pub fn as_slice(&self) -> &[usize] {
        &self.data[..self.size as usize]
    }

    /// Iterates over the active indices.
    pub fn iter(&self) -> std::iter::Copied<std::slice::Iter<'_, usize>> {
        self.as_slice().iter().copied()
    }
}

impl Index<usize> for Match {
    type Output = usize;

    fn index(&self, index: usize) -> &usize {
        debug_assert!(index < self.len(), "Match index {} out of bounds", index);
        &self.data[index]
    }
}

impl PartialEq for Match {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl Eq for Match {}

impl std::hash::Hash for Match {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.as_slice().hash(state);
    }
}

impl PartialOrd for Match {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Match {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.as_slice().cmp(other.as_slice())
    }
}

/// Compiled, reusable selection over atom tuples.
///
/// Compiling is independent of any structure; the same selection can be
/// evaluated against many topologies and frames. Equality is structural over
/// the kind and the predicate tree, so compiling the same text twice yields
/// equal selections.
#[derive(Debug, Clone)]
pub struct Selection {
    source: String,
    kind: Kind,
    ast: Expr,
}

impl Selection {
    /// Compiles a selection string.
    ///
    /// # Arguments
    ///
    /// * `selection` - Selection text following the grammar, with an optional
    ///   `kind:` prefix defaulting to `atoms`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Parse`] on malformed text and
    /// [`Error::InvalidReference`] when a `#n` exceeds the arity.
    pub fn new(selection: &str) -> Result<Self, Error> {
        let (kind, ast) = parser::parse(selection)?;
        Ok(Self {
            source: selection.to_string(),
            kind,
            ast,
        })
    }

    /// Returns the selection kind.
    pub fn kind(&self) -> Kind {
        self.kind
    }

    /// Returns the number of atom slots each match of this selection holds.
    pub fn arity(&self) -> u8 {
        self.kind.arity()
    }

    /// Returns the source text this selection was compiled from.
    pub fn string(&self) -> &str {
        &self.source
    }

    /// Evaluates this selection against a topology.
    ///
    /// Passing `None` for `geometry` is valid as long as the predicate tree
    /// uses no positions; geometry-dependent predicates then fail with
    /// [`Error::GeometryUnavailable`].
    ///
    /// # Arguments
    ///
    /// * `topology` - Structure to enumerate candidates from.
    /// * `geometry` - Position provider for geometry predicates, when available.
    ///
    /// # Returns
    ///
    /// All matches in generation order, without deduplication or resorting.
    pub fn evaluate(
        &self,
        topology: &Topology,
        geometry: Option<&dyn Geometry>,
    ) -> Result<Vec<Match>, Error> {
        if let Some(geometry) = geometry {
            debug_assert!(
                geometry.size() >= topology.atom_count(),
                "Geometry provider covers {} atoms but the topology has {}",
                geometry.size(),
                topology.atom_count()
            );
        }

        let natoms = topology.atom_count();
        let mut matches = Vec::new();
        let mut keep = |candidate: Match| -> Result<(), Error> {
            if self.ast.matches(topology, geometry, &candidate)? {
                matches.push(candidate);
            }
            Ok(())
        };

        match self.kind {
            Kind::Atoms => {
                for i in 0..natoms {
                    keep(Match::new(&[i]))?;
                }
            }
            Kind::Pairs => {
                for i in 0..natoms {
                    for j in 0..natoms {
                        if j == i {
                            continue;
                        }
                        keep(Match::new(&[i, j]))?;
                    }
                }
            }
            Kind::Three => {
                for i in 0..natoms {
                    for j in 0..natoms {
                        if j == i {
                            continue;
                        }
                        for k in 0..natoms {
                            if k == i || k == j {
                                continue;
                            }
                            keep(Match::new(&[i, j, k]))?;
                        }
                    }
                }
            }
            Kind::Four => {
                for i in 0..natoms {
                    for j in 0..natoms {
                        if j == i {
                            continue;
                        }
                        for k in 0..natoms {
                            if k == i || k == j {
                                continue;
                            }
                            for m in 0..natoms {
                                if m == i || m == j || m == k {
                                    continue;
                                }
                                keep(Match::new(&[i, j, k, m]))?;
                            }
                        }
                    }
                }
            }
            Kind::Bonds => {
                for bond in topology.bonds() {
                    keep(Match::new(&[bond[0], bond[1]]))?;
                }
            }
            Kind::Angles => {
                for angle in topology.angles() {
                    keep(Match::new(&[angle[0], angle[1], angle[2]]))?;
                }
            }
            Kind::Dihedrals => {
                for dihedral in topology.dihedrals() {
                    keep(Match::new(&[
                        dihedral[0],
                        dihedral[1],
                        dihedral[2],
                        dihedral[3],
                    ]))?;
                }
            }
            Kind::Impropers => {
                for improper in topology.impropers() {
                    keep(Match::new(&[
                        improper[0],
                        improper[1],
                        improper[2],
                        improper[3],
                    ]))?;
                }
            }
        }

        Ok(matches)
    }

    /// Evaluates this selection against a frame, using it both as the topology
    /// and as the geometry provider.
    pub fn evaluate_frame(&self, frame: &Frame) -> Result<Vec<Match>, Error> {
        self.evaluate(frame.topology(), Some(frame))
    }
}

impl FromStr for Selection {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Selection::new(s)
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.source)
    }
}

impl PartialEq for Selection {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.ast == other.ast
    }
}
