//! Value expressions.
//!
//! Quill attribute values are expressions. The analysis engine only reasons
//! about literal-shaped expressions (scalars, tuple and object construction,
//! and single-part templates that wrap them); references, function calls and
//! anything else are represented so the engine can recognize and skip them,
//! never evaluated.

use crate::span::Span;

/// A value expression, as produced by the parser.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    /// A literal scalar value, e.g. `"web"`, `3`, `true`.
    Literal(LiteralExpr),
    /// A template, e.g. `"prefix-${var.name}"`. A single-part template is
    /// how the parser represents a plain quoted string.
    Template(TemplateExpr),
    /// A template that wraps exactly one interpolation, e.g. `"${var.tags}"`.
    TemplateWrap(TemplateWrapExpr),
    /// Sequence construction, e.g. `[1, 2, 3]`.
    TupleCons(TupleConsExpr),
    /// Keyed construction, e.g. `{ name = "web" }`.
    ObjectCons(ObjectConsExpr),
    /// A reference to another value, e.g. `var.name`.
    Reference(ReferenceExpr),
    /// A function call, e.g. `max(1, 2)`.
    FunctionCall(FunctionCallExpr),
}

impl Expression {
    /// The source span covering the whole expression.
    pub fn span(&self) -> Span {
        match self {
            Expression::Literal(e) => e.span,
            Expression::Template(e) => e.span,
            Expression::TemplateWrap(e) => e.span,
            Expression::TupleCons(e) => e.span,
            Expression::ObjectCons(e) => e.span,
            Expression::Reference(e) => e.span,
            Expression::FunctionCall(e) => e.span,
        }
    }

    /// Create a literal expression.
    pub fn literal(value: LiteralValue, span: Span) -> Self {
        Expression::Literal(LiteralExpr { value, span })
    }

    /// Create a tuple construction expression.
    pub fn tuple_cons(exprs: Vec<Expression>, span: Span) -> Self {
        Expression::TupleCons(TupleConsExpr { exprs, span })
    }

    /// Create an object construction expression.
    pub fn object_cons(items: Vec<ObjectConsItem>, span: Span) -> Self {
        Expression::ObjectCons(ObjectConsExpr { items, span })
    }
}

/// A literal scalar expression.
#[derive(Debug, Clone, PartialEq)]
pub struct LiteralExpr {
    /// The literal value.
    pub value: LiteralValue,
    /// Source span.
    pub span: Span,
}

/// The value carried by a literal expression.
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    /// The value is not (yet) known, e.g. the attribute is mid-edit and has
    /// no value text after `=`.
    Unknown,
    /// A boolean.
    Bool(bool),
    /// A number. Quill numbers are IEEE doubles.
    Number(f64),
    /// A string.
    String(String),
}

impl LiteralValue {
    /// Whether the value is wholly known.
    pub fn is_known(&self) -> bool {
        !matches!(self, LiteralValue::Unknown)
    }

    /// The string content, if this is a known string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            LiteralValue::String(s) => Some(s),
            _ => None,
        }
    }
}

/// A template expression made of one or more parts.
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateExpr {
    /// The template parts, in source order.
    pub parts: Vec<Expression>,
    /// Source span.
    pub span: Span,
}

/// A template wrapping a single interpolated expression.
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateWrapExpr {
    /// The wrapped expression.
    pub wrapped: Box<Expression>,
    /// Source span.
    pub span: Span,
}

/// Sequence construction syntax (`[ ... ]`).
#[derive(Debug, Clone, PartialEq)]
pub struct TupleConsExpr {
    /// Element expressions, in source order.
    pub exprs: Vec<Expression>,
    /// Source span.
    pub span: Span,
}

/// Keyed construction syntax (`{ key = value, ... }`).
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectConsExpr {
    /// Key/value items, in source order.
    pub items: Vec<ObjectConsItem>,
    /// Source span.
    pub span: Span,
}

/// A single `key = value` item inside an object construction.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectConsItem {
    /// The key expression.
    pub key: Expression,
    /// The value expression.
    pub value: Expression,
}

/// A reference to another value (`var.name`, `local.region`).
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceExpr {
    /// Traversal parts, e.g. `["var", "name"]`.
    pub parts: Vec<String>,
    /// Source span.
    pub span: Span,
}

/// A function call expression.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionCallExpr {
    /// The function name.
    pub name: String,
    /// Argument expressions.
    pub args: Vec<Expression>,
    /// Source span.
    pub span: Span,
}
