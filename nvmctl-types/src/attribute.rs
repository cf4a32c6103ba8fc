// SPDX-License-Identifier: GPL-3.0-only

//! Loosely-typed attribute bags for device, goal, and namespace records
//!
//! Records coming back from the device model are heterogeneous: each one is
//! an ordered set of named attributes whose types vary per attribute. The
//! filter engine and the display layer both work on this representation.

use serde::{Deserialize, Serialize};

/// A single attribute value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeValue {
    Bool(bool),
    Uint(u64),
    Str(String),
    UintList(Vec<u64>),
    StrList(Vec<String>),
}

impl AttributeValue {
    /// Canonical display rendering, used for filter comparison and output
    pub fn to_display_string(&self) -> String {
        match self {
            AttributeValue::Bool(value) => {
                if *value { "1".to_string() } else { "0".to_string() }
            }
            AttributeValue::Uint(value) => value.to_string(),
            AttributeValue::Str(value) => value.clone(),
            AttributeValue::UintList(values) => values
                .iter()
                .map(|v| v.to_string())
                .collect::<Vec<_>>()
                .join(", "),
            AttributeValue::StrList(values) => values.join(", "),
        }
    }

    /// Numeric view; string values that parse as u64 count
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            AttributeValue::Uint(value) => Some(*value),
            AttributeValue::Bool(value) => Some(u64::from(*value)),
            AttributeValue::Str(value) => value.parse().ok(),
            _ => None,
        }
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        AttributeValue::Str(value)
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        AttributeValue::Str(value.to_string())
    }
}

impl From<u64> for AttributeValue {
    fn from(value: u64) -> Self {
        AttributeValue::Uint(value)
    }
}

impl From<bool> for AttributeValue {
    fn from(value: bool) -> Self {
        AttributeValue::Bool(value)
    }
}

/// One device/goal/namespace record: an ordered, case-insensitively keyed
/// attribute map
///
/// Insertion order is preserved because it determines display order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AttributeRecord {
    entries: Vec<(String, AttributeValue)>,
}

impl AttributeRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from (name, value) pairs, preserving order
    pub fn from_pairs<N, V>(pairs: impl IntoIterator<Item = (N, V)>) -> Self
    where
        N: Into<String>,
        V: Into<AttributeValue>,
    {
        let mut record = Self::new();
        for (name, value) in pairs {
            record.set(name.into(), value.into());
        }
        record
    }

    /// Look up an attribute, matching the name case-insensitively
    pub fn get(&self, name: &str) -> Option<&AttributeValue> {
        self.entries
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value)
    }

    /// Set an attribute: replaces in place if the name exists (keeping its
    /// position), appends otherwise
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<AttributeValue>) {
        let name = name.into();
        let value = value.into();
        match self
            .entries
            .iter_mut()
            .find(|(key, _)| key.eq_ignore_ascii_case(&name))
        {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    /// Remove an attribute by name, case-insensitively
    pub fn remove(&mut self, name: &str) -> Option<AttributeValue> {
        let index = self
            .entries
            .iter()
            .position(|(key, _)| key.eq_ignore_ascii_case(name))?;
        Some(self.entries.remove(index).1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttributeValue)> {
        self.entries
            .iter()
            .map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_is_case_insensitive() {
        let record = AttributeRecord::from_pairs([("DimmID", "0x0001")]);
        assert_eq!(
            record.get("dimmid"),
            Some(&AttributeValue::Str("0x0001".into()))
        );
        assert_eq!(record.get("SocketID"), None);
    }

    #[test]
    fn test_set_replaces_in_place() {
        let mut record = AttributeRecord::from_pairs([("Capacity", 1024u64), ("HealthState", 0u64)]);
        record.set("capacity", "1.0 GiB");
        let names: Vec<&str> = record.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["Capacity", "HealthState"]);
        assert_eq!(
            record.get("Capacity"),
            Some(&AttributeValue::Str("1.0 GiB".into()))
        );
    }

    #[test]
    fn test_display_strings() {
        assert_eq!(AttributeValue::Bool(true).to_display_string(), "1");
        assert_eq!(AttributeValue::Uint(42).to_display_string(), "42");
        assert_eq!(
            AttributeValue::UintList(vec![1, 2]).to_display_string(),
            "1, 2"
        );
    }

    #[test]
    fn test_remove_preserves_remaining_order() {
        let mut record =
            AttributeRecord::from_pairs([("A", 1u64), ("B", 2u64), ("C", 3u64)]);
        assert_eq!(record.remove("b"), Some(AttributeValue::Uint(2)));
        let names: Vec<&str> = record.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["A", "C"]);
    }
}
