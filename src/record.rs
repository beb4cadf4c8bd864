// Record Module for tablegate
//
// A record is an ordered mapping from column names to SQLite values. It is the
// input shape for inserts and updates and the output shape for every read.
// Field order is kept as inserted, which for rows read back from SQLite is the
// column order of the result set.

use rusqlite::types::Value;
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    fields: Vec<(String, Value)>,
}

impl Record {
    /// Creates a new, empty record.
    pub fn new() -> Self {
        Record { fields: Vec::new() }
    }

    /// Inserts or replaces a field. A replaced field keeps its position.
    pub fn set_field(&mut self, key: &str, value: impl Into<Value>) {
        let value = value.into();
        match self.fields.iter_mut().find(|(name, _)| name == key) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((key.to_string(), value)),
        }
    }

    /// Builder-style variant of [`Record::set_field`].
    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.set_field(key, value);
        self
    }

    /// Returns a reference to the value of the specified field, if it exists.
    pub fn get_field(&self, key: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value)
    }

    /// Removes a field, returning its value.
    pub fn remove_field(&mut self, key: &str) -> Option<Value> {
        let index = self.fields.iter().position(|(name, _)| name == key)?;
        Some(self.fields.remove(index).1)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get_field(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Field names in order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    /// Values in field order.
    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.fields.iter().map(|(_, value)| value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = Record::new();
        for (key, value) in iter {
            record.set_field(&key.into(), value);
        }
        record
    }
}

impl IntoIterator for Record {
    type Item = (String, Value);
    type IntoIter = std::vec::IntoIter<(String, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, &value_to_json(value))?;
        }
        map.end()
    }
}

/// Converts a SQLite value into its JSON counterpart.
///
/// Non-finite reals become `null` and blobs become arrays of bytes.
pub fn value_to_json(value: &Value) -> serde_json::Value {
    match value {
        Value::Null => serde_json::Value::Null,
        Value::Integer(i) => serde_json::Value::from(*i),
        Value::Real(f) => serde_json::Number::from_f64(*f)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        Value::Text(t) => serde_json::Value::String(t.clone()),
        Value::Blob(b) => serde_json::Value::from(b.clone()),
    }
}

/// Parses a command-line literal into a value.
///
/// `null` (any case) is NULL, integers and reals parse as numbers, and
/// everything else is text.
pub fn parse_value(raw: &str) -> Value {
    if raw.eq_ignore_ascii_case("null") {
        Value::Null
    } else if let Ok(i) = raw.parse::<i64>() {
        Value::Integer(i)
    } else if let Ok(f) = raw.parse::<f64>() {
        if f.is_finite() {
            Value::Real(f)
        } else {
            Value::Text(raw.to_string())
        }
    } else {
        Value::Text(raw.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_get_field() {
        let mut record = Record::new();
        record.set_field("name", "Alice".to_string());
        record.set_field("age", 30i64);

        assert_eq!(record.get_field("name"), Some(&Value::Text("Alice".to_string())));
        assert_eq!(record.get_field("age"), Some(&Value::Integer(30)));
        assert_eq!(record.get_field("missing"), None);
    }

    #[test]
    fn test_replace_keeps_position() {
        let mut record = Record::new().with("a", 1i64).with("b", 2i64).with("c", 3i64);
        record.set_field("b", "two".to_string());

        let keys: Vec<&str> = record.keys().collect();
        assert_eq!(keys, vec!["a", "b", "c"]);
        assert_eq!(record.get_field("b"), Some(&Value::Text("two".to_string())));
        assert_eq!(record.len(), 3);
    }

    #[test]
    fn test_remove_field() {
        let mut record = Record::new().with("id", 7i64).with("name", "x".to_string());
        assert_eq!(record.remove_field("id"), Some(Value::Integer(7)));
        assert!(!record.contains("id"));
        assert_eq!(record.remove_field("id"), None);
    }

    #[test]
    fn test_from_iterator() {
        let record: Record = vec![("name", Value::from("A".to_string())), ("email", Value::from("a@x.com".to_string()))]
            .into_iter()
            .collect();
        let keys: Vec<&str> = record.keys().collect();
        assert_eq!(keys, vec!["name", "email"]);
    }

    #[test]
    fn test_serialize_as_json_object() {
        let record = Record::new()
            .with("id", 1i64)
            .with("score", 2.5f64)
            .with("name", "A".to_string())
            .with("note", Value::Null)
            .with("raw", vec![1u8, 2u8]);

        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"id":1,"score":2.5,"name":"A","note":null,"raw":[1,2]}"#);
    }

    #[test]
    fn test_serialize_keeps_field_order() {
        let record = Record::new()
            .with("zeta", 1i64)
            .with("alpha", 2i64)
            .with("mid", 3i64);

        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"zeta":1,"alpha":2,"mid":3}"#);
    }

    #[test]
    fn test_parse_value() {
        assert_eq!(parse_value("42"), Value::Integer(42));
        assert_eq!(parse_value("-3"), Value::Integer(-3));
        assert_eq!(parse_value("1.5"), Value::Real(1.5));
        assert_eq!(parse_value("NULL"), Value::Null);
        assert_eq!(parse_value("hello"), Value::Text("hello".to_string()));
        assert_eq!(parse_value("inf"), Value::Text("inf".to_string()));
    }
}
