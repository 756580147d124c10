//! # mol-sieve
//!
//! **mol-sieve** is a pure-Rust library for representing molecular structures extracted from simulation trajectories and querying them with a compact selection language. The crate favors dense integer indexing, eager connectivity derivation, and clean error surfaces so analysis pipelines stay deterministic from structure construction to match enumeration.
//!
//! ## Features
//!
//! - **Index-based topology** – Atoms, canonical bonds, and residues addressed by dense indices, with angles, dihedrals, and impropers derived eagerly on every mutation and kept sorted for binary search.
//! - **Selection language** – Strings like `"name H and mass < 3.4"` or `"angles: name(#2) O"` compile once into reusable, immutable selections with a declared arity and candidate-generation strategy.
//! - **Geometry-aware evaluation** – Distance, angle, dihedral, and out-of-plane predicates run through a narrow [`Geometry`] trait with minimum-image wrapping in orthorhombic and triclinic cells.
//! - **Bond perception** – Covalent-radius based bond guessing over any geometry provider, with a documented, tunable tolerance.
//! - **Typed properties** – An open `bool`/`double`/`string`/3-vector property map on atoms and residues for format-specific annotations.
//!
//! ## Quick start
//!
//! ```
//! use mol_sieve::{Atom, BondOrder, Frame, Point, Selection};
//!
//! // Build a water molecule.
//! let mut frame = Frame::new();
//! frame.add_atom(Atom::with_symbol("O"), Point::new(0.0, 0.0, 0.0));
//! frame.add_atom(Atom::with_symbol("H"), Point::new(0.96, 0.0, 0.0));
//! frame.add_atom(Atom::with_symbol("H"), Point::new(-0.24, 0.93, 0.0));
//! frame.add_bond(0, 1, BondOrder::Single)?;
//! frame.add_bond(0, 2, BondOrder::Single)?;
//!
//! // One angle is derived from the two bonds.
//! assert_eq!(frame.topology().angles().len(), 1);
//!
//! // Compile once, evaluate per frame.
//! let hydrogens = Selection::new("name H")?;
//! let matches = hydrogens.evaluate_frame(&frame)?;
//! assert_eq!(matches.len(), 2);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod db;
mod model;

pub mod select;

pub use model::atom::Atom;
pub use model::cell::{CellShape, UnitCell};
pub use model::connectivity::{Angle, Bond, BondOrder, Dihedral, Improper};
pub use model::frame::Frame;
pub use model::geometry::Geometry;
pub use model::property::{PropertyMap, PropertyValue};
pub use model::residue::Residue;
pub use model::topology::{Topology, BOND_GUESS_MIN_DISTANCE, BOND_GUESS_TOLERANCE};
pub use model::types::Point;

pub use select::{Kind, Match, Selection};

pub use model::error::Error as TopologyError;
pub use select::Error as SelectionError;
