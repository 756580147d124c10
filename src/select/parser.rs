//! Recursive-descent parser lowering selection text into a predicate tree.
//!
//! The grammar is small enough that each production maps onto one method:
//! `or`-chains over `and`-chains over unary nodes, with predicates resolving
//! their identifier against the fixed set of known properties and geometry
//! functions. Positional references are validated against the selection arity
//! here, so a compiled selection can never reference a missing slot.

use super::error::Error;
use super::expr::{CmpOp, Expr, NumExpr, NumProp, StrProp};
use super::lexer::{tokenize, Token, TokenKind};
use super::selection::Kind;
use smol_str::SmolStr;

/// Parses a full selection string, including the optional `kind:` prefix.
pub(crate) fn parse(selection: &str) -> Result<(Kind, Expr), Error> {
    let (kind, expr_text, offset) = split_kind(selection)?;
    let tokens = tokenize(expr_text, offset)?;
    if tokens.is_empty() {
        return Err(Error::parse("empty selection", offset));
    }

    let mut parser = Parser {
        tokens: &tokens,
        cursor: 0,
        arity: kind.arity(),
        end: selection.len(),
    };
    let expr = parser.parse_expr()?;
    if let Some(token) = parser.peek() {
        return Err(Error::parse(
            "unexpected input after the end of the selection",
            token.position,
        ));
    }
    Ok((kind, expr))
}

/// Splits the optional `kind:` prefix off a selection string.
///
/// Returns the kind, the remaining expression text, and the byte offset of
/// that text inside the original string.
fn split_kind(selection: &str) -> Result<(Kind, &str, usize), Error> {
    match selection.find(':') {
        None => Ok((Kind::Atoms, selection, 0)),
        Some(index) => {
            let keyword = selection[..index].trim();
            let kind = Kind::from_keyword(keyword).ok_or_else(|| {
                Error::parse(format!("unknown selection kind '{}'", keyword), 0)
            })?;
            Ok((kind, &selection[index + 1..], index + 1))
        }
    }
}

fn num_prop(word: &str) -> Option<NumProp> {
    match word {
        "mass" => Some(NumProp::Mass),
        "charge" => Some(NumProp::Charge),
        "index" => Some(NumProp::Index),
        "x" => Some(NumProp::X),
        "y" => Some(NumProp::Y),
        "z" => Some(NumProp::Z),
        _ => None,
    }
}

fn is_function(word: &str) -> bool {
    matches!(word, "distance" | "angle" | "dihedral" | "out_of_plane")
}

struct Parser<'a> {
    tokens: &'a [Token],
    cursor: usize,
    arity: u8,
    end: usize,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.cursor)
    }

    fn advance(&mut self) -> Option<&'a Token> {
        let token = self.tokens.get(self.cursor);
        if token.is_some() {
            self.cursor += 1;
        }
        token
    }

    fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.peek().map(|t| &t.kind) == Some(kind) {
            self.cursor += 1;
            true
        } else {
            false
        }
    }

    /// Position to report for an unexpected-end error.
    fn here(&self) -> usize {
        self.peek().map_or(self.end, |t| t.position)
    }

    fn parse_expr(&mut self) -> Result<Expr, Error> {
        let mut node = self.parse_and()?;
        while self.eat(&TokenKind::Or) {
            let rhs = self.parse_and()?;
            node = Expr::Or(Box::new(node), Box::new(rhs));
        }
        Ok(node)
    }

    fn parse_and(&mut self) -> Result<Expr, Error> {
        let mut node = self.parse_unary()?;
        while self.eat(&TokenKind::And) {
            let rhs = self.parse_unary()?;
            node = Expr::And(Box::new(node), Box::new(rhs));
        }
        Ok(node)
    }

    fn parse_unary(&mut self) -> Result<Expr, Error> {
        match self.peek().map(|t| &t.kind) {
            Some(TokenKind::Not) => {
                self.cursor += 1;
                let inner = self.parse_unary()?;
                Ok(Expr::Not(Box::new(inner)))
            }
            Some(TokenKind::LParen) => {
                self.cursor += 1;
                let expr = self.parse_expr()?;
                if !self.eat(&TokenKind::RParen) {
                    return Err(Error::parse("expected closing ')'", self.here()));
                }
                Ok(expr)
            }
            Some(TokenKind::Ident(_)) => self.parse_predicate(),
            Some(_) => Err(Error::parse(
                "expected a predicate, 'not', or '('",
                self.here(),
            )),
            None => Err(Error::parse("unexpected end of selection", self.end)),
        }
    }

    fn parse_predicate(&mut self) -> Result<Expr, Error> {
        let token = self.advance().expect("caller checked for an identifier");
        let TokenKind::Ident(word) = &token.kind else {
            unreachable!("caller checked for an identifier");
        };

        match word.as_str() {
            "all" => Ok(Expr::All),
            "none" => Ok(Expr::None),
            "name" => self.parse_string_predicate(StrProp::Name),
            "type" => self.parse_string_predicate(StrProp::Type),
            _ => {
                if let Some(prop) = num_prop(word) {
                    let slot = self.parse_optional_ref()?;
                    let op = self.expect_cmp_op()?;
                    let rhs = self.parse_numeric()?;
                    Ok(Expr::Cmp {
                        lhs: NumExpr::Property { prop, slot },
                        op,
                        rhs,
                    })
                } else if is_function(word) {
                    let lhs = self.parse_function(word, token.position)?;
                    let op = self.expect_cmp_op()?;
                    let rhs = self.parse_numeric()?;
                    Ok(Expr::Cmp { lhs, op, rhs })
                } else {
                    Err(Error::parse(
                        format!("unknown property '{}'", word),
                        token.position,
                    ))
                }
            }
        }
    }

    fn parse_string_predicate(&mut self, prop: StrProp) -> Result<Expr, Error> {
        let slot = self.parse_optional_ref()?;
        let equals = if self.eat(&TokenKind::Eq) {
            true
        } else if self.eat(&TokenKind::Neq) {
            false
        } else {
            true
        };
        let value = self.expect_string_value()?;
        Ok(Expr::Str {
            prop,
            slot,
            value,
            equals,
        })
    }

    /// Parses an optional `(#n)` reference, defaulting to slot `#1`.
    fn parse_optional_ref(&mut self) -> Result<u8, Error> {
        if !self.eat(&TokenKind::LParen) {
            return Ok(0);
        }
        let reference = self.expect_ref()?;
        if !self.eat(&TokenKind::RParen) {
            return Err(Error::parse("expected ')' after the reference", self.here()));
        }
        Ok(reference)
    }

    /// Consumes a `#n` token and validates it against the arity, returning the
    /// 0-based slot.
    fn expect_ref(&mut self) -> Result<u8, Error> {
        match self.peek().map(|t| &t.kind) {
            Some(&TokenKind::Ref(reference)) => {
                self.cursor += 1;
                if reference == 0 || reference > self.arity {
                    return Err(Error::InvalidReference {
                        reference,
                        arity: self.arity,
                    });
                }
                Ok(reference - 1)
            }
            _ => Err(Error::parse("expected a '#n' reference", self.here())),
        }
    }

    fn expect_string_value(&mut self) -> Result<SmolStr, Error> {
        match self.peek().map(|t| &t.kind) {
            Some(TokenKind::Ident(value)) => {
                let value = value.clone();
                self.cursor += 1;
                Ok(value)
            }
            _ => Err(Error::parse("expected a string value", self.here())),
        }
    }

    fn expect_cmp_op(&mut self) -> Result<CmpOp, Error> {
        let op = match self.peek().map(|t| &t.kind) {
            Some(TokenKind::Lt) => CmpOp::Lt,
            Some(TokenKind::Le) => CmpOp::Le,
            Some(TokenKind::Gt) => CmpOp::Gt,
            Some(TokenKind::Ge) => CmpOp::Ge,
            Some(TokenKind::Eq) => CmpOp::Eq,
            Some(TokenKind::Neq) => CmpOp::Ne,
            _ => return Err(Error::parse("expected a comparison operator", self.here())),
        };
        self.cursor += 1;
        Ok(op)
    }

    fn parse_numeric(&mut self) -> Result<NumExpr, Error> {
        match self.peek().map(|t| t.kind.clone()) {
            Some(TokenKind::Number(value)) => {
                self.cursor += 1;
                Ok(NumExpr::Literal(value))
            }
            Some(TokenKind::Ident(word)) => {
                let position = self.here();
                self.cursor += 1;
                if let Some(prop) = num_prop(&word) {
                    let slot = self.parse_optional_ref()?;
                    Ok(NumExpr::Property { prop, slot })
                } else if is_function(&word) {
                    self.parse_function(&word, position)
                } else {
                    Err(Error::parse(
                        format!("unknown numeric property '{}'", word),
                        position,
                    ))
                }
            }
            _ => Err(Error::parse(
                "expected a number or numeric property",
                self.here(),
            )),
        }
    }

    /// Parses a geometry function call `func(#a, #b, ...)`.
    fn parse_function(&mut self, name: &str, position: usize) -> Result<NumExpr, Error> {
        if !self.eat(&TokenKind::LParen) {
            return Err(Error::parse(
                format!("expected '(' after '{}'", name),
                self.here(),
            ));
        }

        let mut slots = Vec::new();
        loop {
            slots.push(self.expect_ref()?);
            if !self.eat(&TokenKind::Comma) {
                break;
            }
        }
        if !self.eat(&TokenKind::RParen) {
            return Err(Error::parse("expected ')' after the references", self.here()));
        }

        match (name, slots.as_slice()) {
            ("distance", &[i, j]) => Ok(NumExpr::Distance(i, j)),
            ("angle", &[i, j, k]) => Ok(NumExpr::Angle(i, j, k)),
            ("dihedral", &[i, j, k, m]) => Ok(NumExpr::Dihedral(i, j, k, m)),
            ("out_of_plane", &[i, j, k, m]) => Ok(NumExpr::OutOfPlane(i, j, k, m)),
            _ => Err(Error::parse(
                format!(
                    "'{}' does not take {} reference(s)",
                    name,
                    slots.len()
                ),
                position,
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_kind_is_atoms() {
        let (kind, expr) = parse("all").unwrap();
        assert_eq!(kind, Kind::Atoms);
        assert_eq!(expr, Expr::All);
    }

    #[test]
    fn kind_prefix_selects_kind_and_arity() {
        for (text, kind) in [
            ("atoms: all", Kind::Atoms),
            ("one: all", Kind::Atoms),
            ("pairs: all", Kind::Pairs),
            ("two: all", Kind::Pairs),
            ("three: all", Kind::Three),
            ("four: all", Kind::Four),
            ("bonds: all", Kind::Bonds),
            ("angles: all", Kind::Angles),
            ("dihedrals: all", Kind::Dihedrals),
            ("impropers: all", Kind::Impropers),
        ] {
            let (parsed, _) = parse(text).unwrap();
            assert_eq!(parsed, kind, "for {:?}", text);
        }
    }

    #[test]
    fn unknown_kind_is_a_parse_error() {
        assert!(matches!(
            parse("chains: all"),
            Err(Error::Parse { position: 0, .. })
        ));
    }

    #[test]
    fn bare_string_predicate_defaults_to_equality_on_slot_one() {
        let (_, expr) = parse("name H").unwrap();
        assert_eq!(
            expr,
            Expr::Str {
                prop: StrProp::Name,
                slot: 0,
                value: SmolStr::new("H"),
                equals: true,
            }
        );
    }

    #[test]
    fn explicit_reference_binds_the_slot() {
        let (_, expr) = parse("pairs: type(#2) Ow").unwrap();
        assert_eq!(
            expr,
            Expr::Str {
                prop: StrProp::Type,
                slot: 1,
                value: SmolStr::new("Ow"),
                equals: true,
            }
        );
    }

    #[test]
    fn string_predicate_accepts_explicit_operators() {
        let (_, expr) = parse("name != H").unwrap();
        assert_eq!(
            expr,
            Expr::Str {
                prop: StrProp::Name,
                slot: 0,
                value: SmolStr::new("H"),
                equals: false,
            }
        );
    }

    #[test]
    fn numeric_predicate_parses_operator_and_literal() {
        let (_, expr) = parse("mass < 3.4").unwrap();
        assert_eq!(
            expr,
            Expr::Cmp {
                lhs: NumExpr::Property {
                    prop: NumProp::Mass,
                    slot: 0
                },
                op: CmpOp::Lt,
                rhs: NumExpr::Literal(3.4),
            }
        );
    }

    #[test]
    fn geometry_function_parses_with_reference_list() {
        let (_, expr) = parse("pairs: distance(#1, #2) <= 3.0").unwrap();
        assert_eq!(
            expr,
            Expr::Cmp {
                lhs: NumExpr::Distance(0, 1),
                op: CmpOp::Le,
                rhs: NumExpr::Literal(3.0),
            }
        );
    }

    #[test]
    fn function_arity_mismatch_is_a_parse_error() {
        assert!(matches!(
            parse("four: distance(#1, #2, #3) < 1.0"),
            Err(Error::Parse { .. })
        ));
        assert!(matches!(
            parse("four: angle(#1, #2) < 1.0"),
            Err(Error::Parse { .. })
        ));
    }

    #[test]
    fn and_binds_tighter_than_or() {
        let (_, expr) = parse("name H or name O and mass > 2").unwrap();
        // Expected shape: or(name H, and(name O, mass > 2)).
        match expr {
            Expr::Or(lhs, rhs) => {
                assert!(matches!(*lhs, Expr::Str { .. }));
                assert!(matches!(*rhs, Expr::And(_, _)));
            }
            other => panic!("unexpected tree: {:?}", other),
        }
    }

    #[test]
    fn parentheses_override_precedence() {
        let (_, expr) = parse("(name H or name O) and mass > 2").unwrap();
        match expr {
            Expr::And(lhs, rhs) => {
                assert!(matches!(*lhs, Expr::Or(_, _)));
                assert!(matches!(*rhs, Expr::Cmp { .. }));
            }
            other => panic!("unexpected tree: {:?}", other),
        }
    }

    #[test]
    fn not_applies_to_the_nearest_unary() {
        let (_, expr) = parse("not name H and all").unwrap();
        match expr {
            Expr::And(lhs, rhs) => {
                assert!(matches!(*lhs, Expr::Not(_)));
                assert_eq!(*rhs, Expr::All);
            }
            other => panic!("unexpected tree: {:?}", other),
        }
    }

    #[test]
    fn reference_out_of_arity_is_invalid_reference() {
        assert_eq!(
            parse("name(#2) H"),
            Err(Error::InvalidReference {
                reference: 2,
                arity: 1
            })
        );
        assert_eq!(
            parse("three: distance(#1, #4) < 2.0"),
            Err(Error::InvalidReference {
                reference: 4,
                arity: 3
            })
        );
        assert_eq!(
            parse("pairs: name(#0) H"),
            Err(Error::InvalidReference {
                reference: 0,
                arity: 2
            })
        );
    }

    #[test]
    fn unknown_property_reports_its_position() {
        assert_eq!(
            parse("pairs: resname LIG"),
            Err(Error::parse("unknown property 'resname'", 7))
        );
    }

    #[test]
    fn trailing_tokens_are_rejected() {
        assert!(matches!(
            parse("all all"),
            Err(Error::Parse { position: 4, .. })
        ));
    }

    #[test]
    fn unbalanced_parentheses_are_rejected() {
        assert!(matches!(parse("(name H"), Err(Error::Parse { .. })));
        assert!(matches!(parse("name H)"), Err(Error::Parse { .. })));
    }

    #[test]
    fn empty_selection_is_rejected() {
        assert!(matches!(parse(""), Err(Error::Parse { .. })));
        assert!(matches!(parse("bonds: "), Err(Error::Parse { .. })));
    }

    #[test]
    fn missing_operand_is_rejected() {
        assert!(matches!(parse("name H and"), Err(Error::Parse { .. })));
        assert!(matches!(parse("not"), Err(Error::Parse { .. })));
        assert!(matches!(parse("mass <"), Err(Error::Parse { .. })));
    }

    #[test]
    fn numeric_rhs_may_be_a_property_or_function() {
        let (_, expr) = parse("pairs: mass(#1) >= mass(#2)").unwrap();
        assert_eq!(
            expr,
            Expr::Cmp {
                lhs: NumExpr::Property {
                    prop: NumProp::Mass,
                    slot: 0
                },
                op: CmpOp::Ge,
                rhs: NumExpr::Property {
                    prop: NumProp::Mass,
                    slot: 1
                },
            }
        );

        let (_, expr) = parse("pairs: mass > distance(#1, #2)").unwrap();
        assert!(matches!(
            expr,
            Expr::Cmp {
                rhs: NumExpr::Distance(0, 1),
                ..
            }
        ));
    }
}
