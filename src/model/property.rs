//! Open typed property storage attached to atoms and residues.
//!
//! Trajectory formats carry arbitrary per-atom and per-residue annotations
//! (occupancy, alternate location flags, custom vectors). Rather than widening
//! the core types for every possible field, callers store them in a
//! [`PropertyMap`] keyed by name, with values restricted to a small set of
//! variants that downstream consumers know how to interpret.

use nalgebra::Vector3;
use smol_str::SmolStr;
use std::collections::BTreeMap;

/// Dynamically typed value stored in a [`PropertyMap`].
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    /// Boolean flag.
    Bool(bool),
    /// Double-precision scalar.
    Double(f64),
    /// Free-form text.
    String(SmolStr),
    /// Cartesian 3-vector.
    Vector3(Vector3<f64>),
}

impl PropertyValue {
    /// Returns the boolean payload when this value is a [`PropertyValue::Bool`].
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            PropertyValue::Bool(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the scalar payload when this value is a [`PropertyValue::Double`].
    pub fn as_double(&self) -> Option<f64> {
        match self {
            PropertyValue::Double(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the text payload when this value is a [`PropertyValue::String`].
    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropertyValue::String(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the vector payload when this value is a [`PropertyValue::Vector3`].
    pub fn as_vector3(&self) -> Option<Vector3<f64>> {
        match self {
            PropertyValue::Vector3(value) => Some(*value),
            _ => None,
        }
    }
}

impl From<bool> for PropertyValue {
    fn from(value: bool) -> Self {
        PropertyValue::Bool(value)
    }
}

impl From<f64> for PropertyValue {
    fn from(value: f64) -> Self {
        PropertyValue::Double(value)
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        PropertyValue::String(SmolStr::new(value))
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        PropertyValue::String(SmolStr::new(value))
    }
}

impl From<Vector3<f64>> for PropertyValue {
    fn from(value: Vector3<f64>) -> Self {
        PropertyValue::Vector3(value)
    }
}

/// Name-keyed collection of [`PropertyValue`] entries.
///
/// Keys are stored in a sorted map so iteration order is deterministic
/// regardless of insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertyMap {
    entries: BTreeMap<SmolStr, PropertyValue>,
}

impl PropertyMap {
    /// Creates an empty property map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `value` under `name`, replacing any previous entry.
    pub fn set(&mut self, name: &str, value: impl Into<PropertyValue>) {
        self.entries.insert(SmolStr::new(name), value.into());
    }

    /// Looks up the property stored under `name`.
    pub fn get(&self, name: &str) -> Option<&PropertyValue> {
        self.entries.get(name)
    }

    /// Removes and returns the property stored under `name`.
    pub fn remove(&mut self, name: &str) -> Option<PropertyValue> {
        self.entries.remove(name)
    }

    /// Returns the number of stored properties.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when no properties are stored.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over `(name, value)` pairs in sorted key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropertyValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}
