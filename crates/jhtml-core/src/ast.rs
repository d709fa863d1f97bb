use crate::coerce::{coerce, is_falsy};
use crate::config::{FieldNames, DEFAULT_DOCTYPE, DOCTYPE_SENTINEL};
use crate::CompileError;
use crate::value::{field, Value};

/// A document value after classification. Produced once from the parsed
/// value so rendering never inspects raw JSON shapes again.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// `null`, `false`, `0`, `""` or `[]`: renders nothing.
    Empty,
    /// Raw text, written as-is unless escaping is enabled.
    Text(String),
    Sequence(Vec<Node>),
    Tag(Tag),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Tag {
    /// `<!DOCTYPE {declaration}>`, never closed and never given attributes.
    Doctype { declaration: String },
    Element(Element),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub name: String,
    pub attributes: Vec<Attribute>,
    /// `None` renders the element self-closing.
    pub body: Option<Box<Node>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

impl Node {
    pub fn classify(value: &Value) -> Result<Node, CompileError> {
        if is_falsy(value) {
            return Ok(Node::Empty);
        }
        match value {
            Value::String(text) => Ok(Node::Text(text.clone())),
            Value::Array(items) => items
                .iter()
                .map(Node::classify)
                .collect::<Result<Vec<_>, _>>()
                .map(Node::Sequence),
            _ => Tag::classify(value).map(Node::Tag),
        }
    }
}

impl Tag {
    /// Classify a value that is neither text nor a sequence. Anything that
    /// is not an object, or an object without a usable tag name, fails.
    pub fn classify(value: &Value) -> Result<Tag, CompileError> {
        let fields = FieldNames::SIBLINGS;
        let map = value.as_object();

        let name = map
            .and_then(|m| resolve_tag_name(m, &fields))
            .ok_or_else(|| CompileError::MissingTagName {
                node: describe(value),
            })?;
        let body = map
            .and_then(|m| field(m, fields.body))
            .filter(|b| !is_falsy(b));

        if name == DOCTYPE_SENTINEL {
            let declaration = body.map_or_else(|| DEFAULT_DOCTYPE.to_string(), coerce);
            return Ok(Tag::Doctype { declaration });
        }

        let body = match body {
            Some(b) => Some(Box::new(Node::classify(b)?)),
            None => None,
        };

        Ok(Tag::Element(Element {
            name,
            attributes: Attribute::collect(map, &fields),
            body,
        }))
    }
}

impl Attribute {
    /// Every non-reserved field of a tag node, in declaration order, with
    /// its value coerced to a string. An absent mapping has no attributes.
    pub fn collect(map: Option<&[(String, Value)]>, fields: &FieldNames) -> Vec<Attribute> {
        let Some(map) = map else {
            return Vec::new();
        };
        map.iter()
            .filter(|(key, _)| !fields.is_reserved(key))
            .map(|(key, value)| Attribute {
                name: key.clone(),
                value: coerce(value),
            })
            .collect()
    }
}

fn resolve_tag_name(map: &[(String, Value)], fields: &FieldNames) -> Option<String> {
    fields
        .tag
        .iter()
        .filter_map(|name| field(map, name))
        .filter(|v| !is_falsy(v))
        .map(coerce)
        .find(|name| !name.is_empty())
}

/// Most field names listed when describing a nameless node in an error.
const DESCRIBED_FIELDS: usize = 8;

/// Short form of a node for error messages: an object lists its field
/// names, never their values.
fn describe(value: &Value) -> String {
    let Some(map) = value.as_object() else {
        return coerce(value);
    };
    if map.is_empty() {
        return "{}".to_string();
    }
    let mut names: Vec<&str> = map
        .iter()
        .take(DESCRIBED_FIELDS)
        .map(|(key, _)| key.as_str())
        .collect();
    if map.len() > DESCRIBED_FIELDS {
        names.push("...");
    }
    format!("{{ {} }}", names.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn classify(value: serde_json::Value) -> Result<Node, CompileError> {
        Node::classify(&Value::from(value))
    }

    fn element(value: serde_json::Value) -> Element {
        match classify(value).unwrap() {
            Node::Tag(Tag::Element(el)) => el,
            other => panic!("expected element, got {other:?}"),
        }
    }

    fn missing_name(value: Value) -> String {
        match Node::classify(&value) {
            Err(CompileError::MissingTagName { node }) => node,
            other => panic!("expected MissingTagName, got {other:?}"),
        }
    }

    #[test]
    fn test_falsy_values_are_empty() {
        for value in [json!(null), json!(false), json!(0), json!(""), json!([])] {
            assert_eq!(classify(value).unwrap(), Node::Empty);
        }
        assert_eq!(Node::classify(&Value::Number(f64::NAN)).unwrap(), Node::Empty);
    }

    #[test]
    fn test_text_and_sequence() {
        assert_eq!(classify(json!("hi")).unwrap(), Node::Text("hi".into()));
        assert_eq!(
            classify(json!(["a", null, "b"])).unwrap(),
            Node::Sequence(vec![Node::Text("a".into()), Node::Empty, Node::Text("b".into())])
        );
    }

    #[test]
    fn test_elem_fallback_and_priority() {
        assert_eq!(element(json!({ "elem": "section" })).name, "section");
        assert_eq!(element(json!({ "$": "p", "elem": "div" })).name, "p");
        assert_eq!(element(json!({ "$": "", "elem": "div" })).name, "div");
        assert_eq!(element(json!({ "$": 5 })).name, "5");
    }

    #[test]
    fn test_missing_tag_name() {
        for value in [
            json!({ "body": "orphan" }),
            json!({ "$": "" }),
            json!({ "$": null, "elem": false }),
            json!(42),
            json!(true),
        ] {
            let err = classify(value.clone()).unwrap_err();
            assert!(
                matches!(err, CompileError::MissingTagName { .. }),
                "{value} should fail, got {err:?}"
            );
        }
    }

    #[test]
    fn test_infinite_body_is_read_as_tag() {
        let value = Value::Object(vec![
            ("$".into(), Value::String("p".into())),
            ("body".into(), Value::Number(f64::INFINITY)),
        ]);
        assert_eq!(missing_name(value), "Infinity");
    }

    #[test]
    fn test_missing_tag_name_nested_in_body() {
        let value = Value::from(json!({ "$": "div", "body": [{ "$": "p" }, { "class": "x" }] }));
        assert_eq!(missing_name(value), "{ class }");
    }

    #[test]
    fn test_missing_tag_name_lists_only_field_names() {
        let mut fields: Vec<(String, Value)> = (0..20)
            .map(|i| (format!("f{i}"), Value::String("x".repeat(1000))))
            .collect();
        fields.insert(0, ("body".into(), Value::String("y".repeat(10_000))));
        let node = missing_name(Value::Object(fields));
        assert_eq!(node, "{ body, f0, f1, f2, f3, f4, f5, f6, ... }");
        assert_eq!(missing_name(Value::Object(vec![])), "{}");
    }

    #[test]
    fn test_attributes_skip_reserved_fields_in_order() {
        let el = element(json!({
            "id": "main",
            "$": "h1",
            "body": "x",
            "elem": "ignored",
            "class": "title",
            "tabindex": 2,
        }));
        let names: Vec<_> = el.attributes.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, ["id", "class", "tabindex"]);
        assert_eq!(el.attributes[2].value, "2");
    }

    #[test]
    fn test_non_finite_attribute_values() {
        let value = Value::Object(vec![
            ("$".into(), Value::String("td".into())),
            ("colspan".into(), Value::Number(f64::INFINITY)),
            ("rowspan".into(), Value::Number(f64::NAN)),
        ]);
        let Node::Tag(Tag::Element(el)) = Node::classify(&value).unwrap() else {
            panic!("expected element");
        };
        assert_eq!(el.attributes[0].value, "Infinity");
        assert_eq!(el.attributes[1].value, "NaN");
    }

    #[test]
    fn test_absent_mapping_has_no_attributes() {
        assert!(Attribute::collect(None, &FieldNames::SIBLINGS).is_empty());
    }

    #[test]
    fn test_falsy_body_is_none() {
        for body in [json!(null), json!(false), json!(0), json!(""), json!([])] {
            assert_eq!(element(json!({ "$": "br", "body": body })).body, None);
        }
        assert_eq!(element(json!({ "$": "br" })).body, None);
    }

    #[test]
    fn test_doctype() {
        assert_eq!(
            classify(json!({ "$": "doctype" })).unwrap(),
            Node::Tag(Tag::Doctype { declaration: "html".into() })
        );
        assert_eq!(
            classify(json!({ "$": "doctype", "body": "html5", "lang": "en" })).unwrap(),
            Node::Tag(Tag::Doctype { declaration: "html5".into() })
        );
        assert_eq!(
            classify(json!({ "elem": "doctype", "body": "" })).unwrap(),
            Node::Tag(Tag::Doctype { declaration: "html".into() })
        );
    }
}
