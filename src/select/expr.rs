//! Compiled predicate tree evaluated against candidate atom tuples.
//!
//! The parser lowers a selection expression into [`Expr`], a small tree over
//! positional slots `#1..#arity`. Evaluation binds a candidate [`Match`] to the
//! slots and pulls attribute data from the topology and measurements from the
//! optional geometry provider. Geometry-dependent nodes are the only fallible
//! ones: they report [`Error::GeometryUnavailable`] when no provider is given.

use super::error::Error;
use super::selection::Match;
use crate::model::geometry::Geometry;
use crate::model::topology::Topology;
use smol_str::SmolStr;

/// String-valued atom attribute usable in a predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StrProp {
    Name,
    Type,
}

/// Numeric atom attribute usable in a predicate. The position components
/// require a geometry provider at evaluation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum NumProp {
    Mass,
    Charge,
    Index,
    X,
    Y,
    Z,
}

impl NumProp {
    fn name(self) -> &'static str {
        match self {
            NumProp::Mass => "mass",
            NumProp::Charge => "charge",
            NumProp::Index => "index",
            NumProp::X => "x",
            NumProp::Y => "y",
            NumProp::Z => "z",
        }
    }
}

/// Comparison operator between two numeric values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CmpOp {
    Lt,
    Le,
    Gt,
    Ge,
    Eq,
    Ne,
}

impl CmpOp {
    fn apply(self, lhs: f64, rhs: f64) -> bool {
        match self {
            CmpOp::Lt => lhs < rhs,
            CmpOp::Le => lhs <= rhs,
            CmpOp::Gt => lhs > rhs,
            CmpOp::Ge => lhs >= rhs,
            CmpOp::Eq => lhs == rhs,
            CmpOp::Ne => lhs != rhs,
        }
    }
}

/// Numeric operand: a literal, a per-slot attribute, or a geometry function
/// over referenced slots. Slots are stored 0-based.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum NumExpr {
    Literal(f64),
    Property { prop: NumProp, slot: u8 },
    Distance(u8, u8),
    Angle(u8, u8, u8),
    Dihedral(u8, u8, u8, u8),
    OutOfPlane(u8, u8, u8, u8),
}

impl NumExpr {
    fn value(
        &self,
        topology: &Topology,
        geometry: Option<&dyn Geometry>,
        candidate: &Match,
    ) -> Result<f64, Error> {
        match self {
            NumExpr::Literal(value) => Ok(*value),
            NumExpr::Property { prop, slot } => {
                let index = candidate[*slot as usize];
                match prop {
                    NumProp::Mass => Ok(topology.atoms()[index].mass),
                    NumProp::Charge => Ok(topology.atoms()[index].charge),
                    NumProp::Index => Ok(index as f64),
                    NumProp::X => Ok(require(geometry, prop.name())?.position(index).x),
                    NumProp::Y => Ok(require(geometry, prop.name())?.position(index).y),
                    NumProp::Z => Ok(require(geometry, prop.name())?.position(index).z),
                }
            }
            NumExpr::Distance(i, j) => {
                let geometry = require(geometry, "distance")?;
                Ok(geometry.distance(candidate[*i as usize], candidate[*j as usize]))
            }
            NumExpr::Angle(i, j, k) => {
                let geometry = require(geometry, "angle")?;
                Ok(geometry.angle(
                    candidate[*i as usize],
                    candidate[*j as usize],
                    candidate[*k as usize],
                ))
            }
            NumExpr::Dihedral(i, j, k, m) => {
                let geometry = require(geometry, "dihedral")?;
                Ok(geometry.dihedral(
                    candidate[*i as usize],
                    candidate[*j as usize],
                    candidate[*k as usize],
                    candidate[*m as usize],
                ))
            }
            NumExpr::OutOfPlane(i, j, k, m) => {
                let geometry = require(geometry, "out_of_plane")?;
                Ok(geometry.out_of_plane(
                    candidate[*i as usize],
                    candidate[*j as usize],
                    candidate[*k as usize],
                    candidate[*m as usize],
                ))
            }
        }
    }
}

fn require<'a>(
    geometry: Option<&'a dyn Geometry>,
    function: &'static str,
) -> Result<&'a dyn Geometry, Error> {
    geometry.ok_or(Error::GeometryUnavailable { function })
}

/// Node of the compiled predicate tree.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Expr {
    /// Always true.
    All,
    /// Always false.
    None,
    Not(Box<Expr>),
    And(Box<Expr>, Box<Expr>),
    Or(Box<Expr>, Box<Expr>),
    /// Exact, case-sensitive string comparison against a slot attribute.
    Str {
        prop: StrProp,
        slot: u8,
        value: SmolStr,
        equals: bool,
    },
    /// Numeric comparison between two operands.
    Cmp {
        lhs: NumExpr,
        op: CmpOp,
        rhs: NumExpr,
    },
}

impl Expr {
    /// Evaluates this predicate with `candidate` bound to the slots.
    pub(crate) fn matches(
        &self,
        topology: &Topology,
        geometry: Option<&dyn Geometry>,
        candidate: &Match,
    ) -> Result<bool, Error> {
        match self {
            Expr::All => Ok(true),
            Expr::None => Ok(false),
            Expr::Not(inner) => Ok(!inner.matches(topology, geometry, candidate)?),
            Expr::And(lhs, rhs) => Ok(lhs.matches(topology, geometry, candidate)?
                && rhs.matches(topology, geometry, candidate)?),
            Expr::Or(lhs, rhs) => Ok(lhs.matches(topology, geometry, candidate)?
                || rhs.matches(topology, geometry, candidate)?),
            Expr::Str {
                prop,
                slot,
                value,
                equals,
            } => {
                let atom = &topology.atoms()[candidate[*slot as usize]];
                let attribute = match prop {
                    StrProp::Name => &atom.name,
                    StrProp::Type => &atom.atom_type,
                };
                Ok((attribute == value) == *equals)
            }
            Expr::Cmp { lhs, op, rhs } => {
                let left = lhs.value(topology, geometry, candidate)?;
                let right = rhs.value(topology, geometry, candidate)?;
                Ok(op.apply(left, right))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::atom::Atom;

    fn two_atom_topology() -> Topology {
        let mut topology = Topology::new();
        topology.add_atom(Atom::new("H1", "H"));
        topology.add_atom(Atom::new("O1", "O"));
        topology
    }

    #[test]
    fn all_and_none_are_constant() {
        let topology = two_atom_topology();
        let candidate = Match::new(&[0]);

        assert!(Expr::All.matches(&topology, None, &candidate).unwrap());
        assert!(!Expr::None.matches(&topology, None, &candidate).unwrap());
    }

    #[test]
    fn string_predicates_compare_exactly() {
        let topology = two_atom_topology();
        let candidate = Match::new(&[0, 1]);

        let name_is_h1 = Expr::Str {
            prop: StrProp::Name,
            slot: 0,
            value: SmolStr::new("H1"),
            equals: true,
        };
        assert!(name_is_h1.matches(&topology, None, &candidate).unwrap());

        let type_not_h = Expr::Str {
            prop: StrProp::Type,
            slot: 1,
            value: SmolStr::new("H"),
            equals: false,
        };
        assert!(type_not_h.matches(&topology, None, &candidate).unwrap());

        // Case matters.
        let lowercase = Expr::Str {
            prop: StrProp::Name,
            slot: 0,
            value: SmolStr::new("h1"),
            equals: true,
        };
        assert!(!lowercase.matches(&topology, None, &candidate).unwrap());
    }

    #[test]
    fn numeric_comparison_reads_slot_attributes() {
        let topology = two_atom_topology();
        let candidate = Match::new(&[1, 0]);

        // Slot #1 holds atom 1 (oxygen): mass ~ 16.
        let heavy = Expr::Cmp {
            lhs: NumExpr::Property {
                prop: NumProp::Mass,
                slot: 0,
            },
            op: CmpOp::Gt,
            rhs: NumExpr::Literal(3.4),
        };
        assert!(heavy.matches(&topology, None, &candidate).unwrap());

        let index_check = Expr::Cmp {
            lhs: NumExpr::Property {
                prop: NumProp::Index,
                slot: 1,
            },
            op: CmpOp::Eq,
            rhs: NumExpr::Literal(0.0),
        };
        assert!(index_check.matches(&topology, None, &candidate).unwrap());
    }

    #[test]
    fn boolean_connectives_combine_results() {
        let topology = two_atom_topology();
        let candidate = Match::new(&[0]);

        let both = Expr::And(Box::new(Expr::All), Box::new(Expr::None));
        assert!(!both.matches(&topology, None, &candidate).unwrap());

        let either = Expr::Or(Box::new(Expr::None), Box::new(Expr::All));
        assert!(either.matches(&topology, None, &candidate).unwrap());

        let negated = Expr::Not(Box::new(Expr::None));
        assert!(negated.matches(&topology, None, &candidate).unwrap());
    }

    #[test]
    fn geometry_functions_fail_without_a_provider() {
        let topology = two_atom_topology();
        let candidate = Match::new(&[0, 1]);

        let near = Expr::Cmp {
            lhs: NumExpr::Distance(0, 1),
            op: CmpOp::Lt,
            rhs: NumExpr::Literal(2.0),
        };
        assert_eq!(
            near.matches(&topology, None, &candidate),
            Err(Error::GeometryUnavailable {
                function: "distance"
            })
        );

        let x_positive = Expr::Cmp {
            lhs: NumExpr::Property {
                prop: NumProp::X,
                slot: 0,
            },
            op: CmpOp::Gt,
            rhs: NumExpr::Literal(0.0),
        };
        assert_eq!(
            x_positive.matches(&topology, None, &candidate),
            Err(Error::GeometryUnavailable { function: "x" })
        );
    }
}
