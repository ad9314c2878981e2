//! YAML/JSON front ends producing a generic [`Document`].

use std::fmt;
use std::path::Path;

use serde::de::{self, EnumAccess, IgnoredAny, MapAccess, SeqAccess, VariantAccess, Visitor};
use serde::{Deserialize, Deserializer};
use tracing::{debug, instrument};

use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::{Document, DocumentError, NodePath};

/// Source syntax of a translation file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Yaml,
    Json,
}

impl DocumentFormat {
    /// Guess from the file extension; anything but `.json` is read as YAML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => DocumentFormat::Json,
            _ => DocumentFormat::Yaml,
        }
    }
}

/// Parse `content` in `format`. An empty document yields an empty mapping.
///
/// Repeated keys are kept in the resulting [`Document`] and reported by the builder.
#[instrument(level = "debug", skip(content))]
pub fn parse_str(content: &str, format: DocumentFormat) -> ApplicationResult<Document> {
    let document = match format {
        DocumentFormat::Yaml => from_yaml_str(content)?,
        DocumentFormat::Json => from_json_str(content)?,
    };
    debug!(
        keys = document.as_mapping().map_or(0, <[_]>::len),
        "document parsed"
    );
    Ok(document)
}

pub fn from_yaml_str(content: &str) -> ApplicationResult<Document> {
    if is_blank_yaml(content) {
        return Ok(Document::Mapping(Vec::new()));
    }
    let raw: RawNode =
        serde_yaml::from_str(content).map_err(|e| ApplicationError::OperationFailed {
            context: "parse yaml".to_string(),
            source: Box::new(e),
        })?;
    Ok(raw.into_document()?)
}

pub fn from_json_str(content: &str) -> ApplicationResult<Document> {
    let raw: RawNode =
        serde_json::from_str(content).map_err(|e| ApplicationError::OperationFailed {
            context: "parse json".to_string(),
            source: Box::new(e),
        })?;
    Ok(raw.into_document()?)
}

/// Comments, blank lines and document markers only.
fn is_blank_yaml(content: &str) -> bool {
    content.lines().map(str::trim).all(|line| {
        line.is_empty() || line.starts_with('#') || line == "---" || line == "..."
    })
}

/// Syntax tree as read, before structural checks.
///
/// Mapping entries are collected pair by pair, so repeated keys reach the
/// builder instead of being merged or rejected by the format crate.
#[derive(Debug)]
enum RawNode {
    Null,
    Scalar(String),
    Sequence,
    Mapping(Vec<(RawNode, RawNode)>),
}

impl RawNode {
    /// A null root is an empty document.
    fn into_document(self) -> Result<Document, DocumentError> {
        match self {
            RawNode::Null => Ok(Document::Mapping(Vec::new())),
            other => convert_raw(other, &NodePath::root()),
        }
    }
}

impl<'de> Deserialize<'de> for RawNode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(RawNodeVisitor)
    }
}

struct RawNodeVisitor;

impl<'de> Visitor<'de> for RawNodeVisitor {
    type Value = RawNode;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a scalar or a mapping")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Self::Value, E> {
        Ok(RawNode::Scalar(v.to_string()))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(RawNode::Scalar(v.to_string()))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(RawNode::Scalar(v.to_string()))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        Ok(RawNode::Scalar(v.to_string()))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok(RawNode::Scalar(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
        Ok(RawNode::Scalar(v))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(RawNode::Null)
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(RawNode::Null)
    }

    fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        RawNode::deserialize(deserializer)
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        while seq.next_element::<IgnoredAny>()?.is_some() {}
        Ok(RawNode::Sequence)
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
        while let Some(entry) = map.next_entry::<RawNode, RawNode>()? {
            entries.push(entry);
        }
        Ok(RawNode::Mapping(entries))
    }

    // YAML tags (`!tag value`) arrive as single-variant enums
    fn visit_enum<A>(self, data: A) -> Result<Self::Value, A::Error>
    where
        A: EnumAccess<'de>,
    {
        let (_tag, variant) = data.variant::<IgnoredAny>()?;
        variant.newtype_variant()
    }
}

fn convert_raw(node: RawNode, path: &NodePath) -> Result<Document, DocumentError> {
    match node {
        RawNode::Null => Err(malformed(path, "null value")),
        RawNode::Scalar(text) => Ok(Document::Scalar(text)),
        RawNode::Sequence => Err(malformed(path, "sequences are not supported")),
        RawNode::Mapping(entries) => {
            let mut pairs = Vec::with_capacity(entries.len());
            for (key, value) in entries {
                let RawNode::Scalar(key) = key else {
                    return Err(malformed(path, "mapping keys must be scalars"));
                };
                let child = convert_raw(value, &path.child(&key))?;
                pairs.push((key, child));
            }
            Ok(Document::Mapping(pairs))
        }
    }
}

impl TryFrom<serde_yaml::Value> for Document {
    type Error = DocumentError;

    fn try_from(value: serde_yaml::Value) -> Result<Self, Self::Error> {
        convert_yaml(value, &NodePath::root())
    }
}

impl TryFrom<serde_json::Value> for Document {
    type Error = DocumentError;

    fn try_from(value: serde_json::Value) -> Result<Self, Self::Error> {
        convert_json(value, &NodePath::root())
    }
}

fn convert_yaml(value: serde_yaml::Value, path: &NodePath) -> Result<Document, DocumentError> {
    use serde_yaml::Value;

    match value {
        Value::Null => Err(malformed(path, "null value")),
        Value::Bool(b) => Ok(Document::Scalar(b.to_string())),
        Value::Number(n) => Ok(Document::Scalar(n.to_string())),
        Value::String(s) => Ok(Document::Scalar(s)),
        Value::Sequence(_) => Err(malformed(path, "sequences are not supported")),
        Value::Mapping(map) => {
            let mut pairs = Vec::with_capacity(map.len());
            for (key, value) in map {
                let key = match key {
                    Value::String(s) => s,
                    Value::Number(n) => n.to_string(),
                    Value::Bool(b) => b.to_string(),
                    _ => return Err(malformed(path, "mapping keys must be scalars")),
                };
                let child = convert_yaml(value, &path.child(&key))?;
                pairs.push((key, child));
            }
            Ok(Document::Mapping(pairs))
        }
        Value::Tagged(tagged) => convert_yaml(tagged.value, path),
    }
}

fn convert_json(value: serde_json::Value, path: &NodePath) -> Result<Document, DocumentError> {
    use serde_json::Value;

    match value {
        Value::Null => Err(malformed(path, "null value")),
        Value::Bool(b) => Ok(Document::Scalar(b.to_string())),
        Value::Number(n) => Ok(Document::Scalar(n.to_string())),
        Value::String(s) => Ok(Document::Scalar(s)),
        Value::Array(_) => Err(malformed(path, "arrays are not supported")),
        Value::Object(map) => {
            let mut pairs = Vec::with_capacity(map.len());
            for (key, value) in map {
                let child = convert_json(value, &path.child(&key))?;
                pairs.push((key, child));
            }
            Ok(Document::Mapping(pairs))
        }
    }
}

fn malformed(path: &NodePath, reason: &str) -> DocumentError {
    DocumentError::Malformed {
        path: path.to_string(),
        reason: reason.to_string(),
    }
}
