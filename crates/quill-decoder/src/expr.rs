//! The expression constraint engine.
//!
//! Classifies an expression node against an ordered constraint sequence.
//! Sequence constructions match the first list, set or tuple constraint (in
//! that order); keyed constructions match object then map; literal scalars
//! match only on exact type equality. Single-part templates unwrap to their
//! inner expression. Everything else (references, function calls, multi-part
//! templates) is categorically unsupported: the engine never evaluates.

use std::fmt;

use quill_schema::{ExprConstraints, ValueType};
use quill_syntax::{Expression, LiteralExpr, LiteralValue, ObjectConsExpr, TupleConsExpr};

/// A successful classification of an expression against its constraints.
#[derive(Debug)]
pub(crate) enum MatchedExpr<'a> {
    /// A sequence construction matched a list, set or tuple constraint.
    Tuple(&'a TupleConsExpr, &'a ValueType),
    /// A keyed construction matched an object or map constraint.
    Object(&'a ObjectConsExpr, &'a ValueType),
    /// A literal scalar matched a constraint of exactly its type.
    Literal(&'a LiteralExpr, ValueType),
}

/// Why an expression could not be classified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum MatchError {
    /// The expression kind is outside the engine's scope, or no compatible
    /// constraint was declared for a construction expression.
    Unsupported { kind: &'static str },
    /// The literal's value type matches no declared constraint.
    NoLiteralConstraint { type_name: String },
}

impl fmt::Display for MatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchError::Unsupported { kind } => {
                write!(f, "unsupported expression ({kind})")
            }
            MatchError::NoLiteralConstraint { type_name } => {
                write!(f, "no schema for literal type {type_name:?}")
            }
        }
    }
}

/// Classify `expr` against `constraints`.
pub(crate) fn match_expr<'a>(
    expr: &'a Expression,
    constraints: &'a ExprConstraints,
) -> Result<MatchedExpr<'a>, MatchError> {
    match expr {
        Expression::Template(tpl) if tpl.parts.len() == 1 => {
            match_expr(&tpl.parts[0], constraints)
        }
        Expression::TemplateWrap(wrap) => match_expr(&wrap.wrapped, constraints),
        Expression::TupleCons(tuple) => constraints
            .list_type()
            .or_else(|| constraints.set_type())
            .or_else(|| constraints.tuple_type())
            .map(|ty| MatchedExpr::Tuple(tuple, ty))
            .ok_or(MatchError::Unsupported {
                kind: "tuple constructor",
            }),
        Expression::ObjectCons(object) => constraints
            .object_type()
            .or_else(|| constraints.map_type())
            .map(|ty| MatchedExpr::Object(object, ty))
            .ok_or(MatchError::Unsupported {
                kind: "object constructor",
            }),
        Expression::Literal(lit) => {
            let Some(value_type) = ValueType::of_literal(&lit.value) else {
                return Err(MatchError::NoLiteralConstraint {
                    type_name: "unknown".to_string(),
                });
            };
            if constraints.exact_type(&value_type).is_none() {
                return Err(MatchError::NoLiteralConstraint {
                    type_name: value_type.friendly_name(),
                });
            }
            Ok(MatchedExpr::Literal(lit, value_type))
        }
        Expression::Template(_) => Err(MatchError::Unsupported { kind: "template" }),
        Expression::Reference(_) => Err(MatchError::Unsupported { kind: "reference" }),
        Expression::FunctionCall(_) => Err(MatchError::Unsupported {
            kind: "function call",
        }),
    }
}

/// Unwrap single-part templates down to an inner literal value, if any.
///
/// Quoted strings come out of the parser as single-part templates, so both
/// dependency keys and object-construction keys go through this.
pub(crate) fn literal_value(expr: &Expression) -> Option<&LiteralValue> {
    match expr {
        Expression::Literal(lit) => Some(&lit.value),
        Expression::Template(tpl) if tpl.parts.len() == 1 => literal_value(&tpl.parts[0]),
        Expression::TemplateWrap(wrap) => literal_value(&wrap.wrapped),
        _ => None,
    }
}
