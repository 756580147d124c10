//! Fundamental atom representation comprising name, chemical type, and scalar attributes.
//!
//! This module defines the smallest structural unit used throughout `mol-sieve`. Atoms
//! live inside a [`Topology`](super::topology::Topology) and are referenced everywhere
//! else by their dense zero-based index. The chemical type doubles as the key into the
//! embedded element table, so masses and covalent radii resolve without any per-atom
//! bookkeeping by the caller.

use super::property::{PropertyMap, PropertyValue};
use crate::db;
use smol_str::SmolStr;
use std::fmt;

/// Labeled atom with immutable identity and mutable scalar attributes.
///
/// The `name` is the label a file format assigned to this particular atom (e.g. `CA`
/// or `OW2`); the `atom_type` is its chemical type, usually an element symbol. Mass
/// and charge stay mutable because trajectory formats routinely override them after
/// the atom has been created.
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    /// Atom name as it appears in structure or trajectory files (e.g., `CA`).
    pub name: SmolStr,
    /// Chemical type, typically an element symbol such as `H` or `Fe`.
    pub atom_type: SmolStr,
    /// Mass in unified atomic mass units.
    pub mass: f64,
    /// Partial charge in elementary charge units.
    pub charge: f64,
    properties: PropertyMap,
}

impl Atom {
    /// Creates a new atom from a name and a chemical type.
    ///
    /// When the type matches an element symbol in the embedded table, the mass is
    /// initialized from it; otherwise the mass starts at zero. The charge always
    /// starts at zero.
    ///
    /// # Arguments
    ///
    /// * `name` - Atom label such as `"CA"` or `"OW2"`.
    /// * `atom_type` - Chemical type, matched case-sensitively against element symbols.
    ///
    /// # Returns
    ///
    /// A fully initialized `Atom` instance.
    pub fn new(name: &str, atom_type: &str) -> Self {
        let mass = db::get_element(atom_type).map_or(0.0, |e| e.mass());
        Self {
            name: SmolStr::new(name),
            atom_type: SmolStr::new(atom_type),
            mass,
            charge: 0.0,
            properties: PropertyMap::new(),
        }
    }

    /// Creates an atom whose name and type are the same string.
    ///
    /// Convenient for structures where atoms are only labeled by element, as in
    /// most computational chemistry outputs.
    pub fn with_symbol(symbol: &str) -> Self {
        Self::new(symbol, symbol)
    }

    /// Returns the covalent radius for this atom's type, when tabulated.
    ///
    /// # Returns
    ///
    /// The radius in ångströms, or `None` when the type is not a known element.
    pub fn covalent_radius(&self) -> Option<f64> {
        db::get_element(&self.atom_type).and_then(|e| e.covalent_radius())
    }

    /// Stores an arbitrary named property on this atom.
    ///
    /// # Arguments
    ///
    /// * `name` - Property key.
    /// * `value` - Any type convertible into a [`PropertyValue`].
    pub fn set_property(&mut self, name: &str, value: impl Into<PropertyValue>) {
        self.properties.set(name, value);
    }

    /// Looks up a named property on this atom.
    pub fn property(&self, name: &str) -> Option<&PropertyValue> {
        self.properties.get(name)
    }

    /// Gives read access to the full property map.
    pub fn properties(&self) -> &PropertyMap {
        &self.properties
    }
}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Atom {{ name: \"{}\", type: \"{}\", mass: {:.4}, charge: {:.4} }}",
            self.name, self.atom_type, self.mass, self.charge
        )
    }
}
