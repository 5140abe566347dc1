//! Semantic token emission.
//!
//! A best-effort pass: constructs the schema does not know, expressions the
//! constraint engine cannot classify and labels beyond the declared count all
//! produce no tokens, never an error. Block bodies with a matching dependent
//! schema are walked twice, once under the plain schema and once under the
//! dependent one with the `Dependent` modifier applied.

use quill_schema::{BodySchema, ValueType};
use quill_syntax::{Body, Expression, LiteralValue, Span};

use crate::MAX_NESTING_DEPTH;
use crate::expr::{MatchedExpr, literal_value, match_expr};
use crate::lang::{SemanticToken, TokenModifier, TokenType};

pub(crate) fn collect_tokens(
    body: &Body,
    schema: &BodySchema,
    dependent: bool,
    depth: usize,
    out: &mut Vec<SemanticToken>,
) {
    if depth >= MAX_NESTING_DEPTH {
        return;
    }

    for attr in &body.attributes {
        let attr_schema = match schema.attributes.get(&attr.name) {
            Some(s) => Some(s),
            None => schema.any_attribute.as_ref(),
        };
        let Some(attr_schema) = attr_schema else {
            continue;
        };

        let mut modifiers = Vec::new();
        if dependent {
            modifiers.push(TokenModifier::Dependent);
        }
        if attr_schema.is_deprecated {
            modifiers.push(TokenModifier::Deprecated);
        }
        out.push(SemanticToken {
            token_type: TokenType::AttrName,
            modifiers,
            span: attr.name_span,
        });

        if let Ok(matched) = match_expr(&attr.expr, &attr_schema.expr) {
            tokens_for_matched(&matched, out);
        }
    }

    for block in &body.blocks {
        let Some(block_schema) = schema.blocks.get(&block.block_type) else {
            continue;
        };

        let mut modifiers = Vec::new();
        if dependent {
            modifiers.push(TokenModifier::Dependent);
        }
        if block_schema.is_deprecated {
            modifiers.push(TokenModifier::Deprecated);
        }
        out.push(SemanticToken {
            token_type: TokenType::BlockType,
            modifiers,
            span: block.type_span,
        });

        for (i, label) in block.labels.iter().enumerate() {
            let Some(label_schema) = block_schema.labels.get(i) else {
                break;
            };
            let modifiers = if label_schema.is_dep_key {
                vec![TokenModifier::Dependent]
            } else {
                Vec::new()
            };
            out.push(SemanticToken {
                token_type: TokenType::BlockLabel,
                modifiers,
                span: label.span,
            });
        }

        if let Some(block_body) = &block.body {
            if let Some(plain) = &block_schema.body {
                collect_tokens(block_body, plain, false, depth + 1, out);
            }
            if let Some(dep) = block_schema.dependent_body_schema(block) {
                collect_tokens(block_body, dep, true, depth + 1, out);
            }
        }
    }
}

fn tokens_for_matched(matched: &MatchedExpr<'_>, out: &mut Vec<SemanticToken>) {
    match matched {
        MatchedExpr::Literal(lit, ty) => {
            push_primitive_token(&lit.value, ty, lit.span, out);
        }
        MatchedExpr::Tuple(tuple, ty) => {
            tokens_for_sequence(&tuple.exprs, ty, out);
        }
        MatchedExpr::Object(object, ty) => {
            tokens_for_keyed(&object.items, ty, out);
        }
    }
}

fn tokens_for_sequence(exprs: &[Expression], ty: &ValueType, out: &mut Vec<SemanticToken>) {
    match ty {
        ValueType::List(elem) | ValueType::Set(elem) => {
            for expr in exprs {
                tokens_for_typed_expr(expr, elem, out);
            }
        }
        ValueType::Tuple(elems) => {
            // Elements beyond the declared arity have no type to check.
            for (expr, elem) in exprs.iter().zip(elems) {
                tokens_for_typed_expr(expr, elem, out);
            }
        }
        _ => {}
    }
}

fn tokens_for_keyed(
    items: &[quill_syntax::ObjectConsItem],
    ty: &ValueType,
    out: &mut Vec<SemanticToken>,
) {
    match ty {
        ValueType::Object(attrs) => {
            for item in items {
                let Some(LiteralValue::String(key)) = literal_value(&item.key) else {
                    continue;
                };
                let Some(attr_type) = attrs.get(key) else {
                    continue;
                };
                out.push(SemanticToken {
                    token_type: TokenType::ObjectKey,
                    modifiers: Vec::new(),
                    span: item.key.span(),
                });
                tokens_for_typed_expr(&item.value, attr_type, out);
            }
        }
        ValueType::Map(elem) => {
            for item in items {
                let Some(LiteralValue::String(_)) = literal_value(&item.key) else {
                    continue;
                };
                out.push(SemanticToken {
                    token_type: TokenType::MapKey,
                    modifiers: Vec::new(),
                    span: item.key.span(),
                });
                tokens_for_typed_expr(&item.value, elem, out);
            }
        }
        _ => {}
    }
}

/// Tokens for an expression expected to be of `ty`. A mismatch emits nothing.
fn tokens_for_typed_expr(expr: &Expression, ty: &ValueType, out: &mut Vec<SemanticToken>) {
    match expr {
        Expression::Template(tpl) if tpl.parts.len() == 1 => {
            tokens_for_typed_expr(&tpl.parts[0], ty, out);
        }
        Expression::TemplateWrap(wrap) => tokens_for_typed_expr(&wrap.wrapped, ty, out),
        Expression::Literal(lit) => {
            if ValueType::of_literal(&lit.value).as_ref() == Some(ty) {
                push_primitive_token(&lit.value, ty, lit.span, out);
            }
        }
        Expression::TupleCons(tuple) => tokens_for_sequence(&tuple.exprs, ty, out),
        Expression::ObjectCons(object) => tokens_for_keyed(&object.items, ty, out),
        _ => {}
    }
}

fn push_primitive_token(
    value: &LiteralValue,
    ty: &ValueType,
    span: Span,
    out: &mut Vec<SemanticToken>,
) {
    let token_type = match (value, ty) {
        (LiteralValue::Bool(_), ValueType::Bool) => TokenType::Bool,
        (LiteralValue::Number(_), ValueType::Number) => TokenType::Number,
        (LiteralValue::String(_), ValueType::String) => TokenType::String,
        _ => return,
    };
    out.push(SemanticToken {
        token_type,
        modifiers: Vec::new(),
        span,
    });
}
