/*!
 * Document tree model for locale files.
 *
 * Locale files are arbitrarily nested YAML or JSON documents. This module maps
 * them into a closed sum type the walker can exhaustively match on, and maps
 * the result back out for serialization. Mapping key order is preserved in
 * both directions; it is a hard invariant of the whole pipeline.
 */

use anyhow::{Result, anyhow};
use std::path::Path;

use crate::errors::AppError;

/// Serialization format of a locale file, detected from its extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    /// YAML (`.yml` / `.yaml`)
    Yaml,
    /// JSON (`.json`)
    Json,
}

impl DocumentFormat {
    /// Detect the format from a file path, or None for unsupported extensions
    pub fn from_path<P: AsRef<Path>>(path: P) -> Option<Self> {
        let ext = path.as_ref().extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "yml" | "yaml" => Some(Self::Yaml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }

    /// File extension used when writing this format
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Yaml => "yml",
            Self::Json => "json",
        }
    }
}

/// A parsed locale document node
///
/// Only `Text` payloads are ever rewritten by translation; every other
/// variant passes through a walk untouched.
#[derive(Debug, Clone, PartialEq)]
pub enum DocumentNode {
    /// Ordered key/value pairs; keys are structural identifiers and are
    /// never translated or reordered
    Mapping(Vec<(String, DocumentNode)>),
    /// Ordered list of child nodes
    Sequence(Vec<DocumentNode>),
    /// A string leaf, the only translatable unit
    Text(String),
    /// Boolean leaf, passed through unchanged
    Bool(bool),
    /// Integer leaf, passed through unchanged
    Int(i64),
    /// Float leaf, passed through unchanged
    Float(f64),
    /// Null leaf, passed through unchanged
    Null,
}

impl DocumentNode {
    /// Parse a document from text in the given format
    pub fn parse(content: &str, format: DocumentFormat) -> Result<Self> {
        match format {
            DocumentFormat::Yaml => {
                let value: serde_yaml::Value = serde_yaml::from_str(content)
                    .map_err(|e| anyhow!(AppError::Document(format!("Invalid YAML: {}", e))))?;
                Self::from_yaml(value)
            },
            DocumentFormat::Json => {
                let value: serde_json::Value = serde_json::from_str(content)
                    .map_err(|e| anyhow!(AppError::Document(format!("Invalid JSON: {}", e))))?;
                Ok(Self::from_json(value))
            },
        }
    }

    /// Serialize the document back to text in the given format
    pub fn serialize(&self, format: DocumentFormat) -> Result<String> {
        match format {
            DocumentFormat::Yaml => {
                let value = self.to_yaml();
                serde_yaml::to_string(&value)
                    .map_err(|e| anyhow!(AppError::Document(format!("YAML serialization failed: {}", e))))
            },
            DocumentFormat::Json => {
                let value = self.to_json()?;
                let mut out = serde_json::to_string_pretty(&value)
                    .map_err(|e| anyhow!(AppError::Document(format!("JSON serialization failed: {}", e))))?;
                out.push('\n');
                Ok(out)
            },
        }
    }

    /// Convert from a YAML value, preserving mapping order
    pub fn from_yaml(value: serde_yaml::Value) -> Result<Self> {
        match value {
            serde_yaml::Value::Null => Ok(Self::Null),
            serde_yaml::Value::Bool(b) => Ok(Self::Bool(b)),
            serde_yaml::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Ok(Self::Int(i))
                } else if let Some(f) = n.as_f64() {
                    Ok(Self::Float(f))
                } else {
                    Err(anyhow!(AppError::Document(format!("Unrepresentable number: {}", n))))
                }
            },
            serde_yaml::Value::String(s) => Ok(Self::Text(s)),
            serde_yaml::Value::Sequence(seq) => {
                let items = seq.into_iter()
                    .map(Self::from_yaml)
                    .collect::<Result<Vec<_>>>()?;
                Ok(Self::Sequence(items))
            },
            serde_yaml::Value::Mapping(map) => {
                let mut pairs = Vec::with_capacity(map.len());
                for (key, val) in map {
                    // Plugin locale files key everything by strings; a non-string
                    // key means this is not a locale file we can safely rewrite
                    let key = match key {
                        serde_yaml::Value::String(s) => s,
                        other => {
                            return Err(anyhow!(AppError::Document(
                                format!("Non-string mapping key: {:?}", other))));
                        },
                    };
                    pairs.push((key, Self::from_yaml(val)?));
                }
                Ok(Self::Mapping(pairs))
            },
            // Tagged values are rare in locale files; keep the payload, drop the tag
            serde_yaml::Value::Tagged(tagged) => Self::from_yaml(tagged.value),
        }
    }

    /// Convert back to a YAML value, preserving mapping order
    pub fn to_yaml(&self) -> serde_yaml::Value {
        match self {
            Self::Null => serde_yaml::Value::Null,
            Self::Bool(b) => serde_yaml::Value::Bool(*b),
            Self::Int(i) => serde_yaml::Value::Number((*i).into()),
            Self::Float(f) => serde_yaml::Value::Number((*f).into()),
            Self::Text(s) => serde_yaml::Value::String(s.clone()),
            Self::Sequence(items) => {
                serde_yaml::Value::Sequence(items.iter().map(|n| n.to_yaml()).collect())
            },
            Self::Mapping(pairs) => {
                let mut map = serde_yaml::Mapping::with_capacity(pairs.len());
                for (key, val) in pairs {
                    map.insert(serde_yaml::Value::String(key.clone()), val.to_yaml());
                }
                serde_yaml::Value::Mapping(map)
            },
        }
    }

    /// Convert from a JSON value (requires serde_json's preserve_order feature
    /// so object insertion order survives)
    pub fn from_json(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Self::Int(i)
                } else {
                    Self::Float(n.as_f64().unwrap_or(0.0))
                }
            },
            serde_json::Value::String(s) => Self::Text(s),
            serde_json::Value::Array(items) => {
                Self::Sequence(items.into_iter().map(Self::from_json).collect())
            },
            serde_json::Value::Object(map) => {
                Self::Mapping(map.into_iter().map(|(k, v)| (k, Self::from_json(v))).collect())
            },
        }
    }

    /// Convert back to a JSON value, preserving mapping order
    pub fn to_json(&self) -> Result<serde_json::Value> {
        Ok(match self {
            Self::Null => serde_json::Value::Null,
            Self::Bool(b) => serde_json::Value::Bool(*b),
            Self::Int(i) => serde_json::Value::Number((*i).into()),
            Self::Float(f) => {
                let num = serde_json::Number::from_f64(*f)
                    .ok_or_else(|| anyhow!(AppError::Document(
                        format!("Float {} is not representable in JSON", f))))?;
                serde_json::Value::Number(num)
            },
            Self::Text(s) => serde_json::Value::String(s.clone()),
            Self::Sequence(items) => {
                let converted = items.iter().map(|n| n.to_json()).collect::<Result<Vec<_>>>()?;
                serde_json::Value::Array(converted)
            },
            Self::Mapping(pairs) => {
                let mut map = serde_json::Map::with_capacity(pairs.len());
                for (key, val) in pairs {
                    map.insert(key.clone(), val.to_json()?);
                }
                serde_json::Value::Object(map)
            },
        })
    }

    /// Count the string leaves in this subtree
    pub fn count_text_leaves(&self) -> usize {
        match self {
            Self::Text(_) => 1,
            Self::Sequence(items) => items.iter().map(|n| n.count_text_leaves()).sum(),
            Self::Mapping(pairs) => pairs.iter().map(|(_, v)| v.count_text_leaves()).sum(),
            _ => 0,
        }
    }
}
