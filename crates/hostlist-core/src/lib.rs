#![cfg_attr(docsrs, feature(doc_cfg))]
//! Host attributes: raw device fields with read-time coercion.

pub mod coerce;

use std::fmt;

use hostlist_xml::ItemNode;
use tracing::trace;

pub use coerce::{coerce, AttrError, AttrValue, CoercionKind, BOOLEAN_FIELDS, INTEGER_FIELDS};

/// Raw attributes of one host as reported by the device.
///
/// Reading a field that was never populated is not an error: it yields the
/// default of the field's [`CoercionKind`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostAttributes {
    raw: Vec<(String, String)>,
}

impl HostAttributes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the raw text of `name`, replacing an earlier value.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        if let Some(slot) = self.raw.iter_mut().find(|(field, _)| *field == name) {
            slot.1 = value;
        } else {
            self.raw.push((name, value));
        }
    }

    /// Raw text of `name`, `None` when the source never carried the field.
    pub fn raw(&self, name: &str) -> Option<&str> {
        self.raw
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn is_present(&self, name: &str) -> bool {
        self.raw(name).is_some()
    }

    /// Number of populated fields.
    pub fn len(&self) -> usize {
        self.raw.len()
    }

    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Coerced value of `name`; absent fields return their default.
    pub fn get(&self, name: &str) -> Result<AttrValue, AttrError> {
        coerce(name, self.raw(name))
    }

    /// Integer view of `name` regardless of its coercion kind.
    pub fn get_int(&self, name: &str) -> Result<i64, AttrError> {
        coerce::coerce_as(CoercionKind::Integer, name, self.raw(name)).map(|value| match value {
            AttrValue::Int(value) => value,
            _ => 0,
        })
    }

    /// Boolean view of `name` regardless of its coercion kind.
    pub fn get_bool(&self, name: &str) -> Result<bool, AttrError> {
        coerce::coerce_as(CoercionKind::Boolean, name, self.raw(name))
            .map(|value| matches!(value, AttrValue::Bool(true)))
    }

    /// Raw text of `name`, empty when absent.
    pub fn get_text(&self, name: &str) -> &str {
        self.raw(name).unwrap_or_default()
    }

    /// Snapshot of every populated field with coercion applied.
    pub fn attributes(&self) -> Result<AttributeSnapshot, AttrError> {
        let mut values = Vec::with_capacity(self.raw.len());
        for (name, raw) in &self.raw {
            let value = coerce(name, Some(raw.as_str()))?;
            values.push((name.clone(), value));
        }
        trace!(fields = values.len(), "host attribute snapshot");
        Ok(AttributeSnapshot { values })
    }
}

impl From<ItemNode> for HostAttributes {
    fn from(node: ItemNode) -> Self {
        let mut attrs = HostAttributes::new();
        for (name, text) in node.fields {
            attrs.set(name, text);
        }
        attrs
    }
}

impl fmt::Display for HostAttributes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, (name, value)) in self.raw.iter().enumerate() {
            if idx > 0 {
                writeln!(f)?;
            }
            write!(f, "{name}: {value}")?;
        }
        Ok(())
    }
}

/// Coerced attributes of one host, in the order they were observed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeSnapshot {
    values: Vec<(String, AttrValue)>,
}

impl AttributeSnapshot {
    pub fn get(&self, name: &str) -> Option<&AttrValue> {
        self.values
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttrValue)> {
        self.values.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(feature = "serde")]
#[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
impl serde::Serialize for AttributeSnapshot {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (name, value) in &self.values {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}
