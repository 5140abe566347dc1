//! Completion candidate generation.
//!
//! Two distinct situations produce candidates: an attribute whose value is
//! still unwritten (candidates come from the declared constraints), and a
//! position inside a body but outside every construct (candidates are the
//! attribute names and block types the body schema declares and the document
//! does not yet use).

use quill_schema::{AttributeSchema, BlockSchema, BodySchema, ValueType};
use quill_syntax::{Body, Expression, Pos, Span};

use crate::error::Error;
use crate::hover::{detail_for_attribute, detail_for_block};
use crate::lang::{Candidate, CandidateKind, Candidates, MarkupContent, TextEdit};
use crate::{MAX_NESTING_DEPTH, merged_body_schema};

pub(crate) fn candidates_at_pos(
    file: &str,
    body: &Body,
    schema: &BodySchema,
    pos: Pos,
    depth: usize,
) -> Result<Candidates, Error> {
    if depth >= MAX_NESTING_DEPTH {
        return Err(Error::positional(file, pos, "nesting depth exceeded"));
    }

    for attr in &body.attributes {
        // An unwritten value collapses to a zero-width span, which plain
        // containment can never hit; it is targetable at its exact position.
        let expr_span = attr.expr.span();
        let at_empty_value = expr_span.is_empty() && expr_span.start == pos;
        if !attr.span.contains(pos) && !at_empty_value {
            continue;
        }
        let attr_schema = match schema.attributes.get(&attr.name) {
            Some(s) => s,
            None => match &schema.any_attribute {
                Some(s) => s,
                None => {
                    return Err(Error::positional(
                        file,
                        pos,
                        format!("unknown attribute {:?}", attr.name),
                    ));
                }
            },
        };
        if expr_span.contains(pos) || at_empty_value {
            return Ok(expr_candidates(&attr.expr, attr_schema));
        }
        // Anywhere else inside the attribute (its name, the `=`) there is
        // nothing to offer.
        return Ok(Candidates::none());
    }

    for block in &body.blocks {
        if !block.span.contains(pos) {
            continue;
        }
        let Some(block_schema) = schema.blocks.get(&block.block_type) else {
            return Err(Error::positional(
                file,
                pos,
                format!("unknown block type {:?}", block.block_type),
            ));
        };
        if let Some(block_body) = &block.body {
            if block_body.span.contains(pos) {
                let dependent = block_schema.dependent_body_schema(block);
                let Some(merged) = merged_body_schema(block_schema.body.as_ref(), dependent)
                else {
                    return Ok(Candidates::none());
                };
                return candidates_at_pos(file, block_body, &merged, pos, depth + 1);
            }
        }
        // The type keyword or a label.
        return Ok(Candidates::none());
    }

    Ok(body_candidates(body, schema, pos))
}

/// Candidates for an attribute's value position. Only an unwritten value
/// (an unknown literal) produces any; a written value is not second-guessed.
fn expr_candidates(expr: &Expression, schema: &AttributeSchema) -> Candidates {
    let is_unwritten = matches!(
        expr,
        Expression::Literal(lit) if !lit.value.is_known()
    );
    if !is_unwritten {
        return Candidates::none();
    }

    let edit_span = expr.span().collapsed_to_start();
    let mut list = Vec::new();
    for ty in schema.expr.literal_value_types() {
        candidates_for_type(ty, edit_span, &mut list);
    }
    Candidates::complete(list)
}

fn candidates_for_type(ty: &ValueType, edit_span: Span, out: &mut Vec<Candidate>) {
    match ty {
        ValueType::Bool => {
            for value in ["false", "true"] {
                out.push(Candidate {
                    label: value.to_string(),
                    detail: "bool".to_string(),
                    description: Some(MarkupContent::plain_text("bool")),
                    kind: CandidateKind::LiteralValue,
                    text_edit: TextEdit {
                        new_text: value.to_string(),
                        snippet: format!("${{1:{value}}}"),
                        span: edit_span,
                    },
                });
            }
        }
        // A bare string or number value cannot be guessed.
        ValueType::String | ValueType::Number => {}
        _ => {
            let mut placeholder = 1;
            out.push(Candidate {
                label: label_for_type(ty),
                detail: ty.friendly_name(),
                description: None,
                kind: CandidateKind::LiteralValue,
                text_edit: TextEdit {
                    new_text: new_text_for_type(ty),
                    snippet: snippet_for_type(ty, &mut placeholder),
                    span: edit_span,
                },
            });
        }
    }
}

/// Short display label for a compound type's skeleton candidate: member
/// types rendered by name, capped at two members before an ellipsis.
fn label_for_type(ty: &ValueType) -> String {
    match ty {
        ValueType::Bool | ValueType::Number | ValueType::String => ty.friendly_name(),
        ValueType::List(elem) | ValueType::Set(elem) => {
            format!("[ {} ]", label_for_type(elem))
        }
        ValueType::Tuple(elems) => match elems.len() {
            0 => "[ ]".to_string(),
            1 => format!("[ {} ]", label_for_type(&elems[0])),
            2 => format!(
                "[ {} , {} ]",
                label_for_type(&elems[0]),
                label_for_type(&elems[1])
            ),
            _ => format!(
                "[ {} , {}, ... ]",
                label_for_type(&elems[0]),
                label_for_type(&elems[1])
            ),
        },
        ValueType::Map(elem) => format!("{{ \"key\" = {} }}", label_for_type(elem)),
        ValueType::Object(attrs) => {
            let entries: Vec<String> = attrs
                .iter()
                .take(2)
                .map(|(name, ty)| format!("{} = {}", name, label_for_type(ty)))
                .collect();
            match attrs.len() {
                0 => "{ }".to_string(),
                1 | 2 => format!("{{ {} }}", entries.join(", ")),
                _ => format!("{{ {} … }}", entries.join(", ")),
            }
        }
    }
}

/// Plain skeleton text for a type, inserted when snippets are unsupported.
fn new_text_for_type(ty: &ValueType) -> String {
    match ty {
        ValueType::Bool => "false".to_string(),
        ValueType::Number => "1".to_string(),
        ValueType::String => "\"\"".to_string(),
        ValueType::List(elem) | ValueType::Set(elem) => {
            format!("[ {} ]", new_text_for_type(elem))
        }
        ValueType::Tuple(elems) => match elems.len() {
            0 => "[ ]".to_string(),
            1 => format!("[ {} ]", new_text_for_type(&elems[0])),
            _ => {
                let inner: Vec<String> = elems
                    .iter()
                    .map(|e| format!("  {}", new_text_for_type(e)))
                    .collect();
                format!("[\n{}\n]", inner.join(",\n"))
            }
        },
        ValueType::Map(elem) => format!("{{\n  \"key\" = {}\n}}", new_text_for_type(elem)),
        ValueType::Object(attrs) => {
            if attrs.is_empty() {
                return "{ }".to_string();
            }
            let inner: Vec<String> = attrs
                .iter()
                .map(|(name, ty)| format!("  {} = {}", name, new_text_for_type(ty)))
                .collect();
            format!("{{\n{}\n}}", inner.join("\n"))
        }
    }
}

/// Skeleton text with `${n:default}` tab stops, `placeholder` numbering them
/// across the whole candidate.
fn snippet_for_type(ty: &ValueType, placeholder: &mut u32) -> String {
    match ty {
        ValueType::Bool => {
            let snippet = format!("${{{placeholder}:false}}");
            *placeholder += 1;
            snippet
        }
        ValueType::Number => {
            let snippet = format!("${{{placeholder}:1}}");
            *placeholder += 1;
            snippet
        }
        ValueType::String => {
            let snippet = format!("\"${{{placeholder}:value}}\"");
            *placeholder += 1;
            snippet
        }
        ValueType::List(elem) | ValueType::Set(elem) => {
            format!("[ {} ]", snippet_for_type(elem, placeholder))
        }
        ValueType::Tuple(elems) => match elems.len() {
            0 => "[ ]".to_string(),
            1 => format!("[ {} ]", snippet_for_type(&elems[0], placeholder)),
            _ => {
                let inner: Vec<String> = elems
                    .iter()
                    .map(|e| format!("  {}", snippet_for_type(e, placeholder)))
                    .collect();
                format!("[\n{}\n]", inner.join(",\n"))
            }
        },
        ValueType::Map(elem) => {
            let key = format!("\"${{{placeholder}:key}}\"");
            *placeholder += 1;
            format!("{{\n  {} = {}\n}}", key, snippet_for_type(elem, placeholder))
        }
        ValueType::Object(attrs) => {
            if attrs.is_empty() {
                return "{ }".to_string();
            }
            let inner: Vec<String> = attrs
                .iter()
                .map(|(name, ty)| format!("  {} = {}", name, snippet_for_type(ty, placeholder)))
                .collect();
            format!("{{\n{}\n}}", inner.join("\n"))
        }
    }
}

/// Candidates for a position inside a body but outside every construct:
/// attribute names the document does not set yet, plus block types.
fn body_candidates(body: &Body, schema: &BodySchema, pos: Pos) -> Candidates {
    let edit_span = Span::new(pos, pos);
    let mut list = Vec::new();

    for (name, attr_schema) in &schema.attributes {
        if body.attributes.iter().any(|a| &a.name == name) {
            continue;
        }
        list.push(attribute_candidate(name, attr_schema, edit_span));
    }
    for (block_type, block_schema) in &schema.blocks {
        list.push(block_candidate(block_type, block_schema, edit_span));
    }

    list.sort_by(|a, b| a.label.cmp(&b.label));
    Candidates::complete(list)
}

fn attribute_candidate(name: &str, schema: &AttributeSchema, edit_span: Span) -> Candidate {
    let (value_text, value_snippet) = match schema.expr.literal_value_types().first() {
        Some(ty) => {
            let mut placeholder = 1;
            (
                new_text_for_type(ty),
                snippet_for_type(ty, &mut placeholder),
            )
        }
        None => (String::new(), "${1}".to_string()),
    };
    Candidate {
        label: name.to_string(),
        detail: detail_for_attribute(schema),
        description: schema
            .description
            .as_ref()
            .map(|d| MarkupContent::markdown(d.clone())),
        kind: CandidateKind::Attribute,
        text_edit: TextEdit {
            new_text: format!("{name} = {value_text}"),
            snippet: format!("{name} = {value_snippet}"),
            span: edit_span,
        },
    }
}

fn block_candidate(block_type: &str, schema: &BlockSchema, edit_span: Span) -> Candidate {
    let mut new_text = block_type.to_string();
    let mut snippet = block_type.to_string();
    for (i, label) in schema.labels.iter().enumerate() {
        new_text.push_str(" \"\"");
        snippet.push_str(&format!(" \"${{{}:{}}}\"", i + 1, label.name));
    }
    new_text.push_str(" {\n}");
    snippet.push_str(&format!(" {{\n  ${{{}}}\n}}", schema.labels.len() + 1));

    Candidate {
        label: block_type.to_string(),
        detail: detail_for_block(schema),
        description: schema
            .description
            .as_ref()
            .map(|d| MarkupContent::markdown(d.clone())),
        kind: CandidateKind::Block,
        text_edit: TextEdit {
            new_text,
            snippet,
            span: edit_span,
        },
    }
}
