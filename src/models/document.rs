//! Format-independent configuration document
//!
//! Both TOML and JSON sources are deserialized into a `serde_json::Value`
//! tree. [`Document`] owns that tree and guarantees the root is a mapping;
//! [`Node`] is a borrowed, tagged view used by the validator to read fields
//! without coercing types.

use serde_json::{Map, Value};
use std::fmt;
use thiserror::Error;

/// The root of a document was not a mapping, so it cannot be traversed by
/// section name.
#[derive(Error, Debug, Clone, PartialEq, Eq, miette::Diagnostic)]
#[error("configuration root must be a mapping, found {found}")]
#[diagnostic(
    code(anchorcheck::malformed_document),
    help("a configuration file must start with top-level sections such as `contract` and `attestors`")
)]
pub struct MalformedDocument {
    pub found: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    root: Map<String, Value>,
}

impl Document {
    pub fn root(&self) -> Node<'_> {
        Node::Mapping(&self.root)
    }

    /// Look up a top-level section
    pub fn section(&self, key: &str) -> Node<'_> {
        self.root().get(key)
    }

    pub fn as_value(&self) -> Value {
        Value::Object(self.root.clone())
    }
}

impl TryFrom<Value> for Document {
    type Error = MalformedDocument;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(root) => Ok(Self { root }),
            other => Err(MalformedDocument {
                found: Node::from(&other).kind().name(),
            }),
        }
    }
}

/// The shape of a node, used in type-mismatch messages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Absent,
    Null,
    Boolean,
    Integer,
    Float,
    String,
    Sequence,
    Mapping,
}

impl Kind {
    pub fn name(self) -> &'static str {
        match self {
            Kind::Absent => "nothing",
            Kind::Null => "null",
            Kind::Boolean => "boolean",
            Kind::Integer => "integer",
            Kind::Float => "float",
            Kind::String => "string",
            Kind::Sequence => "array",
            Kind::Mapping => "table",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Why a typed accessor could not produce a value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldIssue {
    Missing,
    WrongType { expected: Kind, found: Kind },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Node<'a> {
    Absent,
    Null,
    Boolean(bool),
    Integer(i128),
    Float(f64),
    String(&'a str),
    Sequence(&'a [Value]),
    Mapping(&'a Map<String, Value>),
}

impl<'a> From<&'a Value> for Node<'a> {
    fn from(value: &'a Value) -> Self {
        match value {
            Value::Null => Node::Null,
            Value::Bool(b) => Node::Boolean(*b),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Node::Integer(i128::from(i))
                } else if let Some(u) = n.as_u64() {
                    Node::Integer(i128::from(u))
                } else {
                    Node::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            Value::String(s) => Node::String(s),
            Value::Array(items) => Node::Sequence(items),
            Value::Object(map) => Node::Mapping(map),
        }
    }
}

impl<'a> Node<'a> {
    pub fn kind(&self) -> Kind {
        match self {
            Node::Absent => Kind::Absent,
            Node::Null => Kind::Null,
            Node::Boolean(_) => Kind::Boolean,
            Node::Integer(_) => Kind::Integer,
            Node::Float(_) => Kind::Float,
            Node::String(_) => Kind::String,
            Node::Sequence(_) => Kind::Sequence,
            Node::Mapping(_) => Kind::Mapping,
        }
    }

    /// Absent and null are both treated as "not provided"
    pub fn is_missing(&self) -> bool {
        matches!(self, Node::Absent | Node::Null)
    }

    /// Child lookup. Anything that is not a mapping has no children.
    pub fn get(&self, key: &str) -> Node<'a> {
        match self {
            Node::Mapping(map) => map.get(key).map(Node::from).unwrap_or(Node::Absent),
            _ => Node::Absent,
        }
    }

    /// Elements of a sequence; empty for anything else
    pub fn items(self) -> impl Iterator<Item = Node<'a>> {
        let items: &'a [Value] = match self {
            Node::Sequence(items) => items,
            _ => &[],
        };
        items.iter().map(Node::from)
    }

    /// Kind plus the value for scalars, e.g. `string "3600"`
    pub fn describe(&self) -> String {
        match self {
            Node::Boolean(b) => format!("boolean {b}"),
            Node::Integer(i) => format!("integer {i}"),
            Node::Float(f) => format!("float {f:?}"),
            Node::String(s) => format!("string {s:?}"),
            other => other.kind().name().to_string(),
        }
    }

    fn mismatch(&self, expected: Kind) -> FieldIssue {
        if self.is_missing() {
            FieldIssue::Missing
        } else {
            FieldIssue::WrongType {
                expected,
                found: self.kind(),
            }
        }
    }

    pub fn expect_str(&self) -> Result<&'a str, FieldIssue> {
        match self {
            Node::String(s) => Ok(*s),
            other => Err(other.mismatch(Kind::String)),
        }
    }

    pub fn expect_integer(&self) -> Result<i128, FieldIssue> {
        match self {
            Node::Integer(i) => Ok(*i),
            other => Err(other.mismatch(Kind::Integer)),
        }
    }

    pub fn expect_bool(&self) -> Result<bool, FieldIssue> {
        match self {
            Node::Boolean(b) => Ok(*b),
            other => Err(other.mismatch(Kind::Boolean)),
        }
    }

    pub fn expect_sequence(&self) -> Result<&'a [Value], FieldIssue> {
        match self {
            Node::Sequence(items) => Ok(*items),
            other => Err(other.mismatch(Kind::Sequence)),
        }
    }

    pub fn expect_mapping(&self) -> Result<&'a Map<String, Value>, FieldIssue> {
        match self {
            Node::Mapping(map) => Ok(*map),
            other => Err(other.mismatch(Kind::Mapping)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_root_must_be_mapping() {
        let err = Document::try_from(json!(["contract"])).unwrap_err();
        assert_eq!(err.found, "array");
        assert!(err.to_string().contains("must be a mapping"));

        let err = Document::try_from(json!("text")).unwrap_err();
        assert_eq!(err.found, "string");

        assert!(Document::try_from(json!({})).is_ok());
    }

    #[test]
    fn test_nested_lookup() {
        let doc = Document::try_from(json!({
            "attestors": { "registry": [ { "name": "a" } ] }
        }))
        .unwrap();

        let registry = doc.section("attestors").get("registry");
        assert_eq!(registry.kind(), Kind::Sequence);
        let first = registry.items().next().unwrap();
        assert_eq!(first.get("name").expect_str(), Ok("a"));
        assert_eq!(first.get("address"), Node::Absent);
        assert_eq!(doc.section("contract").get("name"), Node::Absent);
    }

    #[test]
    fn test_null_counts_as_missing() {
        let doc = Document::try_from(json!({ "contract": null })).unwrap();
        let contract = doc.section("contract");
        assert!(contract.is_missing());
        assert_eq!(contract.expect_mapping(), Err(FieldIssue::Missing));
    }

    #[test]
    fn test_accessors_do_not_coerce() {
        let doc = Document::try_from(json!({
            "flag": true,
            "float": 3600.0,
            "number": 42,
            "text": "42"
        }))
        .unwrap();

        assert_eq!(
            doc.section("flag").expect_integer(),
            Err(FieldIssue::WrongType {
                expected: Kind::Integer,
                found: Kind::Boolean
            })
        );
        assert_eq!(
            doc.section("float").expect_integer(),
            Err(FieldIssue::WrongType {
                expected: Kind::Integer,
                found: Kind::Float
            })
        );
        assert_eq!(doc.section("number").expect_integer(), Ok(42));
        assert!(doc.section("text").expect_integer().is_err());
        assert_eq!(doc.section("flag").expect_bool(), Ok(true));
    }

    #[test]
    fn test_describe_echoes_scalars() {
        let doc = Document::try_from(json!({
            "s": "3600",
            "f": 1.5,
            "list": [1, 2]
        }))
        .unwrap();
        assert_eq!(doc.section("s").describe(), "string \"3600\"");
        assert_eq!(doc.section("f").describe(), "float 1.5");
        assert_eq!(doc.section("list").describe(), "array");
        assert_eq!(doc.section("missing").describe(), "nothing");
    }

    #[test]
    fn test_large_unsigned_stays_integer() {
        let doc = Document::try_from(json!({ "big": u64::MAX })).unwrap();
        assert_eq!(
            doc.section("big").expect_integer(),
            Ok(i128::from(u64::MAX))
        );
    }
}
