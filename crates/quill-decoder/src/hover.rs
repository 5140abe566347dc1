//! The position resolver and hover formatter.
//!
//! Recursive descent over a body alongside its schema, terminal at the first
//! construct containing the query position. Expression-level decisions are
//! delegated to the constraint engine in [`crate::expr`].

use quill_schema::{AttributeSchema, BlockSchema, BodySchema, ValueType, number_to_string};
use quill_syntax::{Block, Body, LiteralValue, Pos};
use url::Url;

use crate::error::Error;
use crate::expr::{MatchedExpr, match_expr};
use crate::lang::{HoverData, MarkupContent};
use crate::{MAX_NESTING_DEPTH, merged_body_schema};

pub(crate) fn hover_at_pos(
    file: &str,
    body: &Body,
    schema: Option<&BodySchema>,
    pos: Pos,
    depth: usize,
) -> Result<Option<HoverData>, Error> {
    // A body whose own schema lookup upstream failed yields no result
    // rather than an error.
    let Some(schema) = schema else {
        return Ok(None);
    };
    if depth >= MAX_NESTING_DEPTH {
        return Err(Error::positional(file, pos, "nesting depth exceeded"));
    }

    for attr in &body.attributes {
        if !attr.span.contains(pos) {
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

        if attr.name_span.contains(pos) {
            return Ok(Some(HoverData {
                content: content_for_attribute(&attr.name, attr_schema),
                span: attr.span,
            }));
        }

        if attr.expr.span().contains(pos) {
            let content = content_for_expr(attr, attr_schema)
                .map_err(|err| Error::positional(file, pos, err))?;
            return Ok(Some(HoverData {
                content,
                span: attr.expr.span(),
            }));
        }
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

        if block.type_span.contains(pos) {
            return Ok(Some(HoverData {
                content: content_for_block(&block.block_type, block_schema),
                span: block.type_span,
            }));
        }

        for (i, label) in block.labels.iter().enumerate() {
            if !label.span.contains(pos) {
                continue;
            }
            if i >= block_schema.labels.len() {
                return Err(Error::positional(
                    file,
                    pos,
                    format!("unexpected label ({}) {:?}", i, label.value),
                ));
            }
            return Ok(Some(HoverData {
                content: content_for_label(i, block, block_schema),
                span: label.span,
            }));
        }

        if let Some(block_body) = &block.body {
            if block_body.span.contains(pos) {
                let dependent = block_schema.dependent_body_schema(block);
                let merged = merged_body_schema(block_schema.body.as_ref(), dependent);
                return hover_at_pos(file, block_body, merged.as_ref(), pos, depth + 1);
            }
        }

        return Err(Error::positional(
            file,
            pos,
            format!("position outside of {:?} body", block.block_type),
        ));
    }

    Err(Error::positional(
        file,
        pos,
        "position outside of any attribute name, value or block",
    ))
}

fn content_for_attribute(name: &str, schema: &AttributeSchema) -> MarkupContent {
    let mut value = format!("**{}** _{}_", name, detail_for_attribute(schema));
    if let Some(description) = &schema.description {
        value.push_str("\n\n");
        value.push_str(description);
    }
    MarkupContent::markdown(value)
}

pub(crate) fn detail_for_attribute(schema: &AttributeSchema) -> String {
    if let Some(detail) = &schema.detail {
        return detail.clone();
    }
    let mut parts = Vec::new();
    if schema.is_deprecated {
        parts.push("deprecated".to_string());
    }
    let types: Vec<String> = schema
        .expr
        .literal_value_types()
        .iter()
        .map(|ty| ty.friendly_name())
        .collect();
    if !types.is_empty() {
        parts.push(types.join(" or "));
    }
    if parts.is_empty() {
        return "attribute".to_string();
    }
    parts.join(", ")
}

fn content_for_block(block_type: &str, schema: &BlockSchema) -> MarkupContent {
    let mut value = format!("**{}** _{}_", block_type, detail_for_block(schema));
    if let Some(description) = &schema.description {
        value.push_str("\n\n");
        value.push_str(description);
    }
    MarkupContent::markdown(value)
}

pub(crate) fn detail_for_block(schema: &BlockSchema) -> String {
    if let Some(detail) = &schema.detail {
        return detail.clone();
    }
    if schema.is_deprecated {
        "Block, deprecated".to_string()
    } else {
        "Block".to_string()
    }
}

fn content_for_label(i: usize, block: &Block, block_schema: &BlockSchema) -> MarkupContent {
    let label = &block.labels[i];
    let label_schema = &block_schema.labels[i];

    if label_schema.is_dep_key {
        if let Some(dep) = block_schema.dependent_body_schema(block) {
            let mut content = format!("`{}`", label.value);
            if let Some(detail) = &dep.detail {
                content.push(' ');
                content.push_str(detail);
            } else if !label_schema.name.is_empty() {
                content.push(' ');
                content.push_str(&label_schema.name);
            }
            if let Some(description) = &dep.description {
                content.push_str("\n\n");
                content.push_str(description);
            } else if let Some(description) = &label_schema.description {
                content.push_str("\n\n");
                content.push_str(description);
            }

            let docs_link = dep
                .docs_link
                .as_ref()
                .or_else(|| block_schema.body.as_ref().and_then(|b| b.docs_link.as_ref()));
            if let Some(link) = docs_link {
                if let Ok(url) = Url::parse(&link.url) {
                    if let Some(host) = url.host_str() {
                        content.push_str(&format!("\n\n[`{}` on {}]({})", label.value, host, url));
                    }
                }
            }

            return MarkupContent::markdown(content);
        }
    }

    let mut content = format!("{:?}", label.value);
    if !label_schema.name.is_empty() {
        content.push_str(&format!(" ({})", label_schema.name));
    }
    if let Some(description) = &label_schema.description {
        content.push_str("\n\n");
        content.push_str(description);
    }
    MarkupContent::markdown(content)
}

fn content_for_expr(
    attr: &quill_syntax::Attribute,
    schema: &AttributeSchema,
) -> Result<MarkupContent, String> {
    match match_expr(&attr.expr, &schema.expr) {
        Ok(MatchedExpr::Tuple(_, ty)) | Ok(MatchedExpr::Object(_, ty)) => {
            Ok(content_for_type(ty))
        }
        Ok(MatchedExpr::Literal(lit, ty)) => Ok(content_for_value(&lit.value, &ty)),
        Err(err) => Err(err.to_string()),
    }
}

fn content_for_type(ty: &ValueType) -> MarkupContent {
    if let ValueType::Object(attrs) = ty {
        if attrs.is_empty() {
            return MarkupContent::markdown(ty.friendly_name());
        }
        let mut value = "```\n{\n".to_string();
        for (name, attr_type) in attrs {
            value.push_str(&format!("  {} = {}\n", name, attr_type.friendly_name()));
        }
        value.push_str("}\n```\n_object_");
        return MarkupContent::markdown(value);
    }
    MarkupContent::markdown(format!("_{}_", ty.friendly_name()))
}

fn content_for_value(value: &LiteralValue, ty: &ValueType) -> MarkupContent {
    let rendered = match value {
        LiteralValue::Bool(b) => format!("`{}`", b),
        LiteralValue::Number(n) => format!("`{}`", number_to_string(*n)),
        LiteralValue::String(s) => format!("`{}`", s),
        // Unknown values never match a constraint.
        LiteralValue::Unknown => String::new(),
    };
    MarkupContent::markdown(format!("{} _{}_", rendered, ty.friendly_name()))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use quill_schema::{DocsLink, ExprConstraints, LabelSchema};
    use quill_syntax::{Attribute, Expression, Label, Span};

    use super::*;

    /// Span of the first occurrence of `needle` in `source`.
    fn span_of(source: &str, needle: &str) -> Span {
        let start = source.find(needle).expect("needle not in source") as u32;
        Span::new(start, start + needle.len() as u32)
    }

    // Mirrors: instance_type = "t2.micro"
    const SRC: &str = r#"instance_type = "t2.micro""#;

    fn attr_body() -> Body {
        let mut body = Body::new(Span::new(0, SRC.len() as u32));
        body.attributes.push(Attribute::new(
            "instance_type",
            span_of(SRC, "instance_type"),
            Expression::literal(
                LiteralValue::String("t2.micro".into()),
                span_of(SRC, "\"t2.micro\""),
            ),
        ));
        body
    }

    fn string_attr_schema() -> BodySchema {
        BodySchema {
            attributes: HashMap::from([(
                "instance_type".to_string(),
                AttributeSchema {
                    expr: ExprConstraints::literal_type_only(ValueType::String),
                    description: Some("Instance type to use".to_string()),
                    ..Default::default()
                },
            )]),
            ..Default::default()
        }
    }

    #[test]
    fn attribute_name_hover() {
        let body = attr_body();
        let schema = string_attr_schema();
        let data = hover_at_pos("test.q", &body, Some(&schema), 2, 0)
            .unwrap()
            .expect("hover data");
        assert_eq!(
            data.content,
            MarkupContent::markdown("**instance_type** _string_\n\nInstance type to use")
        );
        assert_eq!(data.span, body.attributes[0].span);
    }

    #[test]
    fn attribute_value_hover() {
        let body = attr_body();
        let schema = string_attr_schema();
        let pos = span_of(SRC, "\"t2.micro\"").start + 1;
        let data = hover_at_pos("test.q", &body, Some(&schema), pos, 0)
            .unwrap()
            .expect("hover data");
        assert_eq!(data.content, MarkupContent::markdown("`t2.micro` _string_"));
        assert_eq!(data.span, span_of(SRC, "\"t2.micro\""));
    }

    #[test]
    fn unknown_attribute_is_positional_error() {
        let body = attr_body();
        let schema = BodySchema::default();
        let err = hover_at_pos("test.q", &body, Some(&schema), 2, 0).unwrap_err();
        assert_eq!(
            err,
            Error::positional("test.q", 2, "unknown attribute \"instance_type\"")
        );
    }

    #[test]
    fn any_attribute_fallback_applies() {
        let body = attr_body();
        let schema = BodySchema {
            any_attribute: Some(AttributeSchema {
                expr: ExprConstraints::literal_type_only(ValueType::String),
                ..Default::default()
            }),
            ..Default::default()
        };
        let data = hover_at_pos("test.q", &body, Some(&schema), 2, 0)
            .unwrap()
            .expect("hover data");
        assert_eq!(
            data.content,
            MarkupContent::markdown("**instance_type** _string_")
        );
    }

    #[test]
    fn position_outside_everything_is_positional_error() {
        let src = "a = 1  ";
        let mut body = Body::new(Span::new(0, src.len() as u32));
        body.attributes.push(Attribute::new(
            "a",
            Span::new(0, 1),
            Expression::literal(LiteralValue::Number(1.0), Span::new(4, 5)),
        ));
        let schema = BodySchema::default();
        let err = hover_at_pos("test.q", &body, Some(&schema), 6, 0).unwrap_err();
        assert_eq!(
            err,
            Error::positional(
                "test.q",
                6,
                "position outside of any attribute name, value or block"
            )
        );
    }

    #[test]
    fn missing_schema_yields_no_result() {
        let body = attr_body();
        assert_eq!(hover_at_pos("test.q", &body, None, 2, 0).unwrap(), None);
    }

    #[test]
    fn object_type_hover_lists_attributes() {
        let src = "tags = { env = \"prod\" }";
        let mut body = Body::new(Span::new(0, src.len() as u32));
        body.attributes.push(Attribute::new(
            "tags",
            span_of(src, "tags"),
            Expression::object_cons(vec![], span_of(src, "{ env = \"prod\" }")),
        ));
        let schema = BodySchema {
            attributes: HashMap::from([(
                "tags".to_string(),
                AttributeSchema {
                    expr: ExprConstraints::literal_type_only(ValueType::object([
                        ("env", ValueType::String),
                        ("count", ValueType::Number),
                    ])),
                    ..Default::default()
                },
            )]),
            ..Default::default()
        };
        let data = hover_at_pos("test.q", &body, Some(&schema), span_of(src, "{").start, 0)
            .unwrap()
            .expect("hover data");
        assert_eq!(
            data.content,
            MarkupContent::markdown("```\n{\n  count = number\n  env = string\n}\n```\n_object_")
        );
    }

    #[test]
    fn dep_key_label_hover_prefers_dependent_schema() {
        let src = r#"resource "aws_instance" "web" {}"#;
        let mut body = Body::new(Span::new(0, src.len() as u32));
        body.blocks.push(Block {
            block_type: "resource".to_string(),
            type_span: span_of(src, "resource"),
            labels: vec![
                Label::new("aws_instance", span_of(src, "\"aws_instance\"")),
                Label::new("web", span_of(src, "\"web\"")),
            ],
            body: Some(Body::new(span_of(src, "{}"))),
            span: Span::new(0, src.len() as u32),
        });

        let dep_keys = quill_schema::DependencyKeys::default().with_label(0, "aws_instance");
        let schema = BodySchema {
            blocks: HashMap::from([(
                "resource".to_string(),
                BlockSchema {
                    labels: vec![LabelSchema::dep_key("type"), LabelSchema::new("name")],
                    dependent_body: HashMap::from([(
                        dep_keys.schema_key(),
                        BodySchema {
                            detail: Some("AWS EC2 instance".to_string()),
                            docs_link: Some(DocsLink {
                                url: "https://registry.example.com/aws_instance".to_string(),
                                tooltip: None,
                            }),
                            ..Default::default()
                        },
                    )]),
                    ..Default::default()
                },
            )]),
            ..Default::default()
        };

        let pos = span_of(src, "\"aws_instance\"").start + 1;
        let data = hover_at_pos("test.q", &body, Some(&schema), pos, 0)
            .unwrap()
            .expect("hover data");
        assert_eq!(
            data.content,
            MarkupContent::markdown(
                "`aws_instance` AWS EC2 instance\n\n\
                 [`aws_instance` on registry.example.com](https://registry.example.com/aws_instance)"
            )
        );
    }

    #[test]
    fn non_matching_dep_key_label_falls_back_to_label_schema() {
        let src = r#"resource "other_type" "web" {}"#;
        let mut body = Body::new(Span::new(0, src.len() as u32));
        body.blocks.push(Block {
            block_type: "resource".to_string(),
            type_span: span_of(src, "resource"),
            labels: vec![
                Label::new("other_type", span_of(src, "\"other_type\"")),
                Label::new("web", span_of(src, "\"web\"")),
            ],
            body: Some(Body::new(span_of(src, "{}"))),
            span: Span::new(0, src.len() as u32),
        });
        let schema = BodySchema {
            blocks: HashMap::from([(
                "resource".to_string(),
                BlockSchema {
                    labels: vec![LabelSchema::dep_key("type"), LabelSchema::new("name")],
                    ..Default::default()
                },
            )]),
            ..Default::default()
        };

        let pos = span_of(src, "\"other_type\"").start + 1;
        let data = hover_at_pos("test.q", &body, Some(&schema), pos, 0)
            .unwrap()
            .expect("hover data");
        assert_eq!(
            data.content,
            MarkupContent::markdown("\"other_type\" (type)")
        );
    }

    #[test]
    fn label_beyond_schema_is_positional_error() {
        let src = r#"resource "a" "b" "c" {}"#;
        let mut body = Body::new(Span::new(0, src.len() as u32));
        body.blocks.push(Block {
            block_type: "resource".to_string(),
            type_span: span_of(src, "resource"),
            labels: vec![
                Label::new("a", span_of(src, "\"a\"")),
                Label::new("b", span_of(src, "\"b\"")),
                Label::new("c", span_of(src, "\"c\"")),
            ],
            body: Some(Body::new(span_of(src, "{}"))),
            span: Span::new(0, src.len() as u32),
        });
        let schema = BodySchema {
            blocks: HashMap::from([(
                "resource".to_string(),
                BlockSchema {
                    labels: vec![LabelSchema::new("type"), LabelSchema::new("name")],
                    ..Default::default()
                },
            )]),
            ..Default::default()
        };

        let pos = span_of(src, "\"c\"").start + 1;
        let err = hover_at_pos("test.q", &body, Some(&schema), pos, 0).unwrap_err();
        assert_eq!(err, Error::positional("test.q", pos, "unexpected label (2) \"c\""));
    }
}
