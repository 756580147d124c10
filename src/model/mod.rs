//! Core data structures modeling molecular structures and their connectivity.
//!
//! This module defines the foundational types for representing atoms, residues,
//! bonds with their derived tuples, periodic cells, and frames. These types form
//! the backbone of `mol-sieve` and are consumed by the selection engine and by
//! trajectory tooling layered on top of the crate.

pub mod atom;
pub mod cell;
pub mod connectivity;
pub mod error;
pub mod frame;
pub mod geometry;
pub mod property;
pub mod residue;
pub mod topology;
pub mod types;
