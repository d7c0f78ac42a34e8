//! Ordered, case-insensitive field mapping.

use std::fmt;

use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::userdef::UserDef;

/// Reserved key under which user-defined field declarations are exposed.
///
/// It never appears as a flat field; [`FieldMap::insert`] ignores it.
pub const USERDEFS_KEY: &str = "USERDEFS";

/// Ordered collection of `(NAME, value)` pairs.
///
/// Names are normalized to uppercase on insert and looked up
/// case-insensitively. Insertion order is kept since it determines the output
/// layout. Re-inserting an existing name replaces the value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldMap {
    fields: Vec<(String, String)>,
    userdefs: Vec<UserDef>,
}

impl FieldMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a field, returning the previous value.
    ///
    /// The reserved `USERDEFS` name is not stored; use
    /// [`push_userdef`](Self::push_userdef) instead.
    pub fn insert(&mut self, name: impl AsRef<str>, value: impl Into<String>) -> Option<String> {
        let name = name.as_ref().to_ascii_uppercase();
        if name == USERDEFS_KEY {
            return None;
        }
        let value = value.into();
        match self.position(&name) {
            Some(idx) => Some(std::mem::replace(&mut self.fields[idx].1, value)),
            None => {
                self.fields.push((name, value));
                None
            }
        }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.position(name).map(|idx| self.fields[idx].1.as_str())
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.position(name).map(|idx| self.fields.remove(idx).1)
    }

    /// Number of flat fields (user-defined declarations are not counted).
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// True when there are neither flat fields nor user-defined declarations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.userdefs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    #[must_use]
    pub fn userdefs(&self) -> &[UserDef] {
        &self.userdefs
    }

    pub fn push_userdef(&mut self, userdef: UserDef) {
        self.userdefs.push(userdef);
    }

    pub fn set_userdefs(&mut self, userdefs: Vec<UserDef>) {
        self.userdefs = userdefs;
    }

    /// Declared names of all user-defined fields, uppercased.
    #[must_use]
    pub fn userdef_names(&self) -> Vec<String> {
        self.userdefs.iter().map(UserDef::field_name).collect()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.fields
            .iter()
            .position(|(key, _)| key.eq_ignore_ascii_case(name))
    }
}

impl<K: AsRef<str>, V: Into<String>> FromIterator<(K, V)> for FieldMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (name, value) in iter {
            map.insert(name, value);
        }
        map
    }
}

impl<K: AsRef<str>, V: Into<String>, const N: usize> From<[(K, V); N]> for FieldMap {
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}

impl Serialize for FieldMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let extra = usize::from(!self.userdefs.is_empty());
        let mut map = serializer.serialize_map(Some(self.fields.len() + extra))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        if !self.userdefs.is_empty() {
            map.serialize_entry(USERDEFS_KEY, &self.userdefs)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for FieldMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(FieldMapVisitor)
    }
}

struct FieldMapVisitor;

impl<'de> Visitor<'de> for FieldMapVisitor {
    type Value = FieldMap;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of field names to string values")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut map = FieldMap::new();
        while let Some(key) = access.next_key::<String>()? {
            if key.eq_ignore_ascii_case(USERDEFS_KEY) {
                map.userdefs = access.next_value()?;
            } else {
                let value: FieldValue = access.next_value()?;
                map.insert(&key, value.0);
            }
        }
        Ok(map)
    }
}

/// String-or-number field value; numbers are kept in their textual form.
struct FieldValue(String);

impl<'de> Deserialize<'de> for FieldValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ValueVisitor;

        impl Visitor<'_> for ValueVisitor {
            type Value = FieldValue;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a string or number")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
                Ok(FieldValue(v.to_string()))
            }

            fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
                Ok(FieldValue(v))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
                Ok(FieldValue(v.to_string()))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
                Ok(FieldValue(v.to_string()))
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
                Ok(FieldValue(v.to_string()))
            }

            fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
                Ok(FieldValue(String::new()))
            }
        }

        deserializer.deserialize_any(ValueVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_names_and_keeps_order() {
        let mut map = FieldMap::new();
        map.insert("call", "DF1ASC");
        map.insert("Name", "Andreas");
        map.insert("QSO_DATE", "20231204");

        let names: Vec<&str> = map.names().collect();
        assert_eq!(names, vec!["CALL", "NAME", "QSO_DATE"]);
        assert_eq!(map.get("name"), Some("Andreas"));
        assert!(map.contains("qso_date"));
    }

    #[test]
    fn non_ascii_names_are_found_again() {
        let mut map = FieldMap::new();
        map.insert("straße", "1");
        assert_eq!(map.names().collect::<Vec<_>>(), vec!["STRAßE"]);
        assert_eq!(map.get("straße"), Some("1"));
        assert_eq!(map.get("STRAßE"), Some("1"));
        assert_eq!(map.insert("Straße", "2"), Some("1".to_string()));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn reinsert_replaces_in_place() {
        let mut map = FieldMap::from([("A", "1"), ("B", "2")]);
        assert_eq!(map.insert("a", "3"), Some("1".to_string()));
        let pairs: Vec<(&str, &str)> = map.iter().collect();
        assert_eq!(pairs, vec![("A", "3"), ("B", "2")]);
    }

    #[test]
    fn reserved_key_is_not_a_field() {
        let mut map = FieldMap::new();
        assert_eq!(map.insert("userdefs", "x"), None);
        assert!(map.is_empty());
        assert!(!map.contains(USERDEFS_KEY));
    }

    #[test]
    fn userdefs_count_as_content() {
        let mut map = FieldMap::new();
        map.push_userdef(UserDef::new("Test", Some("N")));
        assert!(!map.is_empty());
        assert_eq!(map.len(), 0);
        assert_eq!(map.userdef_names(), vec!["TEST"]);
    }

    #[test]
    fn json_roundtrip_with_userdefs() {
        let mut map = FieldMap::from([("PROGRAMID", "Test")]);
        map.push_userdef(UserDef::new("Test,{A,B}", Some("E")));

        let json = serde_json::to_string(&map).expect("serialize");
        assert_eq!(
            json,
            r#"{"PROGRAMID":"Test","USERDEFS":[{"dtype":"E","definition":"Test,{A,B}"}]}"#
        );
        let back: FieldMap = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, map);
    }

    #[test]
    fn json_numbers_become_text() {
        let map: FieldMap =
            serde_json::from_str(r#"{"dist": 99, "freq": 0.138, "call": "N2X"}"#)
                .expect("deserialize");
        assert_eq!(map.get("DIST"), Some("99"));
        assert_eq!(map.get("FREQ"), Some("0.138"));
        assert_eq!(map.get("CALL"), Some("N2X"));
    }
}
