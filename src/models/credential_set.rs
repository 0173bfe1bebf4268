//! Nested credential mapping parsed from a YAML document.

use crate::error::LoadError;
use crate::util::mask;
use serde::Serialize;
use serde_yaml::Value;
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use thiserror::Error;

pub type CredentialMap = BTreeMap<String, CredentialValue>;

/// Why a YAML document cannot become a credential set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShapeError {
    #[error("top-level YAML value must be a mapping")]
    NotAMapping,

    /// Two keys that read the same as text, e.g. `1` and `"1"`.
    #[error("duplicate key '{0}'")]
    DuplicateKey(String),
}

/// A node of a credential document. Scalars keep their YAML spelling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum CredentialValue {
    Text(String),
    List(Vec<CredentialValue>),
    Map(CredentialMap),
}

impl CredentialValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            CredentialValue::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&CredentialMap> {
        match self {
            CredentialValue::Map(m) => Some(m),
            _ => None,
        }
    }

    fn from_yaml(value: Value, path: &str) -> Result<Self, ShapeError> {
        match value {
            Value::Sequence(items) => items
                .into_iter()
                .enumerate()
                .map(|(i, item)| Self::from_yaml(item, &format!("{}[{}]", path, i)))
                .collect::<Result<_, _>>()
                .map(CredentialValue::List),
            Value::Mapping(mapping) => {
                map_from_yaml(mapping, Some(path)).map(CredentialValue::Map)
            }
            Value::Tagged(tagged) => Self::from_yaml(tagged.value, path),
            scalar => Ok(CredentialValue::Text(
                scalar_text(&scalar).unwrap_or_default(),
            )),
        }
    }

    fn masked(&self) -> Self {
        match self {
            CredentialValue::Text(s) => CredentialValue::Text(mask::mask_value(s)),
            CredentialValue::List(items) => {
                CredentialValue::List(items.iter().map(Self::masked).collect())
            }
            CredentialValue::Map(m) => CredentialValue::Map(
                m.iter().map(|(k, v)| (k.clone(), v.masked())).collect(),
            ),
        }
    }

    fn flatten_into<'a>(&'a self, prefix: String, out: &mut Vec<(String, &'a str)>) {
        match self {
            CredentialValue::Text(s) => out.push((prefix, s.as_str())),
            CredentialValue::List(items) => {
                for (i, item) in items.iter().enumerate() {
                    item.flatten_into(format!("{}[{}]", prefix, i), out);
                }
            }
            CredentialValue::Map(m) => {
                for (k, v) in m {
                    v.flatten_into(format!("{}.{}", prefix, k), out);
                }
            }
        }
    }
}

/// Read-only snapshot of a credential file: service name to fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CredentialSet {
    entries: CredentialMap,
}

impl CredentialSet {
    /// Build from a parsed YAML document. An empty document gives an empty
    /// set; merge keys must already be applied.
    pub fn from_yaml(value: Value) -> Result<Self, ShapeError> {
        match value {
            Value::Null => Ok(Self::default()),
            Value::Mapping(mapping) => Ok(Self {
                entries: map_from_yaml(mapping, None)?,
            }),
            Value::Tagged(tagged) => Self::from_yaml(tagged.value),
            _ => Err(ShapeError::NotAMapping),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn services(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CredentialValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Top-level entry by name, whatever its shape.
    pub fn entry(&self, name: &str) -> Option<&CredentialValue> {
        self.entries.get(name)
    }

    /// Fields of a service block.
    pub fn service(&self, service: &str) -> Option<&CredentialMap> {
        self.entries.get(service).and_then(CredentialValue::as_map)
    }

    pub fn get(&self, service: &str, field: &str) -> Option<&CredentialValue> {
        self.service(service).and_then(|fields| fields.get(field))
    }

    /// Text value of `service.field`, failing when either key is absent.
    pub fn field(&self, service: &str, field: &str) -> Result<&str, LoadError> {
        let fields = self
            .service(service)
            .ok_or_else(|| LoadError::MissingService {
                service: service.to_string(),
            })?;
        let value = fields.get(field).ok_or_else(|| LoadError::MissingField {
            service: service.to_string(),
            field: field.to_string(),
        })?;
        value.as_text().ok_or_else(|| LoadError::NotText {
            key: format!("{}.{}", service, field),
        })
    }

    /// Copy with every text value replaced by its masked preview.
    pub fn masked(&self) -> Self {
        Self {
            entries: self
                .entries
                .iter()
                .map(|(k, v)| (k.clone(), v.masked()))
                .collect(),
        }
    }

    /// Dotted key paths (`service.field`, `list[0]`) paired with text values.
    pub fn flatten(&self) -> Vec<(String, &str)> {
        let mut out = Vec::new();
        for (k, v) in &self.entries {
            v.flatten_into(k.clone(), &mut out);
        }
        out
    }
}

/// Convert a mapping, refusing keys that collide once stringified.
/// `parent` is the dotted path used in error messages.
fn map_from_yaml(
    mapping: serde_yaml::Mapping,
    parent: Option<&str>,
) -> Result<CredentialMap, ShapeError> {
    let mut out = CredentialMap::new();
    for (k, v) in mapping {
        let key = key_text(&k);
        let path = match parent {
            Some(parent) => format!("{}.{}", parent, key),
            None => key.clone(),
        };
        let value = CredentialValue::from_yaml(v, &path)?;
        match out.entry(key) {
            Entry::Vacant(slot) => {
                slot.insert(value);
            }
            Entry::Occupied(_) => return Err(ShapeError::DuplicateKey(path)),
        }
    }
    Ok(out)
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => Some(String::new()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) => Some(s.clone()),
        Value::Tagged(tagged) => scalar_text(&tagged.value),
        Value::Sequence(_) | Value::Mapping(_) => None,
    }
}

fn key_text(key: &Value) -> String {
    scalar_text(key).unwrap_or_else(|| {
        serde_yaml::to_string(key)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(doc: &str) -> CredentialSet {
        let value: Value = serde_yaml::from_str(doc).unwrap();
        CredentialSet::from_yaml(value).unwrap()
    }

    #[test]
    fn test_scalars_become_text() {
        let set = parse("svc:\n  port: 8080\n  enabled: true\n  empty: ~\n  name: x\n");
        assert_eq!(set.field("svc", "port").unwrap(), "8080");
        assert_eq!(set.field("svc", "enabled").unwrap(), "true");
        assert_eq!(set.field("svc", "empty").unwrap(), "");
        assert_eq!(set.field("svc", "name").unwrap(), "x");
    }

    #[test]
    fn test_numeric_keys_are_stringified() {
        let set = parse("svc:\n  1: one\n");
        assert_eq!(set.field("svc", "1").unwrap(), "one");
    }

    #[test]
    fn test_colliding_keys_rejected() {
        let value: Value = serde_yaml::from_str("svc: {1: numeric, \"1\": quoted}\n").unwrap();
        assert_eq!(
            CredentialSet::from_yaml(value),
            Err(ShapeError::DuplicateKey("svc.1".to_string()))
        );

        let value: Value = serde_yaml::from_str("true: a\n\"true\": b\n").unwrap();
        assert_eq!(
            CredentialSet::from_yaml(value),
            Err(ShapeError::DuplicateKey("true".to_string()))
        );
    }

    #[test]
    fn test_lists_are_kept() {
        let set = parse("svc:\n  hosts:\n    - a\n    - b\n");
        let hosts = set.get("svc", "hosts").unwrap();
        assert_eq!(
            hosts,
            &CredentialValue::List(vec![
                CredentialValue::Text("a".into()),
                CredentialValue::Text("b".into()),
            ])
        );
        assert!(matches!(
            set.field("svc", "hosts"),
            Err(LoadError::NotText { .. })
        ));
    }

    #[test]
    fn test_missing_keys() {
        let set = parse("twitter:\n  consumer_key: K\n");
        assert!(matches!(
            set.field("github", "token"),
            Err(LoadError::MissingService { .. })
        ));
        let err = set.field("twitter", "consumer_secret").unwrap_err();
        assert!(matches!(err, LoadError::MissingField { .. }));
        assert!(err.to_string().contains("consumer_secret"));
        assert!(set.get("twitter", "consumer_secret").is_none());
    }

    #[test]
    fn test_top_level_scalar_rejected() {
        let value: Value = serde_yaml::from_str("just a string").unwrap();
        assert_eq!(CredentialSet::from_yaml(value), Err(ShapeError::NotAMapping));
    }

    #[test]
    fn test_null_document_is_empty() {
        let set = CredentialSet::from_yaml(Value::Null).unwrap();
        assert!(set.is_empty());
    }

    #[test]
    fn test_flatten_paths() {
        let set = parse("a:\n  b: x\n  c:\n    - y\nz: w\n");
        let flat = set.flatten();
        assert_eq!(
            flat,
            vec![
                ("a.b".to_string(), "x"),
                ("a.c[0]".to_string(), "y"),
                ("z".to_string(), "w"),
            ]
        );
    }

    #[test]
    fn test_masked_hides_values() {
        let set = parse("twitter:\n  consumer_key: abcdefgh\n");
        let masked = set.masked();
        assert_eq!(masked.field("twitter", "consumer_key").unwrap(), "ab...gh");
        assert_eq!(set.field("twitter", "consumer_key").unwrap(), "abcdefgh");
    }

    #[test]
    fn test_serializes_as_plain_mapping() {
        let set = parse("twitter:\n  consumer_key: K\n");
        let json = serde_json::to_value(&set).unwrap();
        assert_eq!(json, serde_json::json!({"twitter": {"consumer_key": "K"}}));
    }
}
