use super::property::{PropertyMap, PropertyValue};
use smol_str::SmolStr;
use std::fmt;

/// Named group of atom indices, typically one monomer of a polymer chain.
///
/// Residues are independent of bonding: membership is a plain index set, and
/// any relation between residues (such as being linked by a bond) is derived
/// by the owning [`Topology`](super::topology::Topology).
#[derive(Debug, Clone, PartialEq)]
pub struct Residue {
    pub name: SmolStr,
    pub id: Option<i64>,
    atoms: Vec<usize>,
    properties: PropertyMap,
}

impl Residue {
    pub fn new(name: &str) -> Self {
        Self {
            name: SmolStr::new(name),
            id: None,
            atoms: Vec::new(),
            properties: PropertyMap::new(),
        }
    }

    pub fn with_id(name: &str, id: i64) -> Self {
        Self {
            id: Some(id),
            ..Self::new(name)
        }
    }

    /// Adds an atom index to this residue. Duplicates are ignored.
    pub fn add_atom(&mut self, index: usize) {
        if let Err(slot) = self.atoms.binary_search(&index) {
            self.atoms.insert(slot, index);
        }
    }

    /// Removes an atom index from this residue, reporting whether it was present.
    pub fn remove_atom(&mut self, index: usize) -> bool {
        match self.atoms.binary_search(&index) {
            Ok(slot) => {
                self.atoms.remove(slot);
                true
            }
            Err(_) => false,
        }
    }

    pub fn contains(&self, index: usize) -> bool {
        self.atoms.binary_search(&index).is_ok()
    }

    /// Member atom indices in ascending order.
    pub fn atoms(&self) -> &[usize] {
        &self.atoms
    }

    pub fn atom_count(&self) -> usize {
        self.atoms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    pub fn iter_atoms(&self) -> std::iter::Copied<std::slice::Iter<'_, usize>> {
        self.atoms.iter().copied()
    }

    pub fn set_property(&mut self, name: &str, value: impl Into<PropertyValue>) {
        self.properties.set(name, value);
    }

    pub fn property(&self, name: &str) -> Option<&PropertyValue> {
        self.properties.get(name)
    }

    pub fn properties(&self) -> &PropertyMap {
        &self.properties
    }

    /// Rewrites membership after atom `removed` left the topology: the removed
    /// index is dropped and every higher index shifts down by one.
    pub(crate) fn renumber_after_removal(&mut self, removed: usize) {
        self.atoms.retain(|&atom| atom != removed);
        for atom in &mut self.atoms {
            if *atom > removed {
                *atom -= 1;
            }
        }
    }
}

impl fmt::Display for Residue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.id {
            Some(id) => write!(
                f,
                "Residue {{ name: \"{}\", id: {}, atoms: {} }}",
                self.name,
                id,
                self.atom_count()
            ),
            None => write!(
                f,
                "Residue {{ name: \"{}\", atoms: {} }}",
                self.name,
                self.atom_count()
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_residue_is_empty_without_id() {
        let residue = Residue::new("ALA");
        assert_eq!(residue.name, "ALA");
        assert_eq!(residue.id, None);
        assert!(residue.is_empty());
    }

    #[test]
    fn with_id_stores_the_identifier() {
        let residue = Residue::with_id("HOH", 541);
        assert_eq!(residue.id, Some(541));
    }

    #[test]
    fn add_atom_keeps_members_sorted_and_unique() {
        let mut residue = Residue::new("GLY");
        residue.add_atom(7);
        residue.add_atom(2);
        residue.add_atom(7);
        residue.add_atom(4);

        assert_eq!(residue.atoms(), &[2, 4, 7]);
        assert_eq!(residue.atom_count(), 3);
    }

    #[test]
    fn contains_and_remove_track_membership() {
        let mut residue = Residue::new("GLY");
        residue.add_atom(3);

        assert!(residue.contains(3));
        assert!(!residue.contains(4));
        assert!(residue.remove_atom(3));
        assert!(!residue.remove_atom(3));
        assert!(residue.is_empty());
    }

    #[test]
    fn renumber_after_removal_shifts_higher_indices() {
        let mut residue = Residue::new("SER");
        residue.add_atom(1);
        residue.add_atom(3);
        residue.add_atom(5);

        residue.renumber_after_removal(3);
        assert_eq!(residue.atoms(), &[1, 4]);

        residue.renumber_after_removal(0);
        assert_eq!(residue.atoms(), &[0, 3]);
    }

    #[test]
    fn properties_round_trip_on_residues() {
        let mut residue = Residue::new("LIG");
        residue.set_property("is_solvent", false);
        residue.set_property("segment", "A");

        assert_eq!(
            residue.property("is_solvent").and_then(PropertyValue::as_bool),
            Some(false)
        );
        assert_eq!(
            residue.property("segment").and_then(PropertyValue::as_str),
            Some("A")
        );
    }

    #[test]
    fn residue_display_formats_correctly() {
        let mut residue = Residue::with_id("ALA", 2);
        residue.add_atom(0);
        assert_eq!(
            format!("{}", residue),
            "Residue { name: \"ALA\", id: 2, atoms: 1 }"
        );
        assert_eq!(
            format!("{}", Residue::new("UNK")),
            "Residue { name: \"UNK\", atoms: 0 }"
        );
    }
}
