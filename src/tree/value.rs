//! Configuration values: scalars, lists and mappings.

use serde::de::{self, Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};
use std::collections::BTreeMap;
use std::fmt;

/// A mapping from keys to values.
///
/// Keys iterate in ascending lexical order, so iteration output never depends
/// on the order in which the configuration producer inserted them.
pub type Mapping = BTreeMap<String, ConfigValue>;

/// A leaf value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scalar {
    Str(String),
    Bool(bool),
}

impl Scalar {
    /// The label form used for branch matching and inline substitution.
    ///
    /// Booleans render as `True` / `False`; strings render as-is.
    pub fn canonical(&self) -> &str {
        match self {
            Scalar::Str(s) => s,
            Scalar::Bool(true) => "True",
            Scalar::Bool(false) => "False",
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.canonical())
    }
}

/// A node of the configuration tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigValue {
    Scalar(Scalar),
    List(Vec<ConfigValue>),
    Mapping(Mapping),
}

impl ConfigValue {
    /// Short name of the variant, for error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            ConfigValue::Scalar(_) => "scalar",
            ConfigValue::List(_) => "list",
            ConfigValue::Mapping(_) => "mapping",
        }
    }

    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            ConfigValue::Scalar(s) => Some(s),
            _ => None,
        }
    }

    /// Select a child by key (mappings) or by ordinal (lists).
    ///
    /// Scalars have no children.
    pub fn child(&self, key: &str) -> Option<&ConfigValue> {
        match self {
            ConfigValue::Mapping(map) => map.get(key),
            ConfigValue::List(items) => key.parse::<usize>().ok().and_then(|i| items.get(i)),
            ConfigValue::Scalar(_) => None,
        }
    }
}

impl From<&str> for ConfigValue {
    fn from(value: &str) -> Self {
        ConfigValue::Scalar(Scalar::Str(value.to_string()))
    }
}

impl From<String> for ConfigValue {
    fn from(value: String) -> Self {
        ConfigValue::Scalar(Scalar::Str(value))
    }
}

impl From<bool> for ConfigValue {
    fn from(value: bool) -> Self {
        ConfigValue::Scalar(Scalar::Bool(value))
    }
}

impl From<Vec<ConfigValue>> for ConfigValue {
    fn from(value: Vec<ConfigValue>) -> Self {
        ConfigValue::List(value)
    }
}

impl From<Mapping> for ConfigValue {
    fn from(value: Mapping) -> Self {
        ConfigValue::Mapping(value)
    }
}

/// A deserialized value that may be null.
///
/// Nulls inside mappings are dropped so that they resolve as absent; nulls
/// inside lists become empty strings so later ordinals keep their positions.
pub(crate) struct MaybeValue(pub(crate) Option<ConfigValue>);

impl<'de> Deserialize<'de> for MaybeValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(ValueVisitor)
    }
}

impl<'de> Deserialize<'de> for ConfigValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let MaybeValue(value) = MaybeValue::deserialize(deserializer)?;
        value.ok_or_else(|| de::Error::custom("expected a value, found null"))
    }
}

struct ValueVisitor;

impl<'de> Visitor<'de> for ValueVisitor {
    type Value = MaybeValue;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a scalar, sequence or mapping")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Self::Value, E> {
        Ok(MaybeValue(Some(ConfigValue::from(v))))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(MaybeValue(Some(ConfigValue::from(v.to_string()))))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(MaybeValue(Some(ConfigValue::from(v.to_string()))))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        // Debug keeps a trailing `.0` on whole numbers, which solver
        // dictionaries read as floating point.
        Ok(MaybeValue(Some(ConfigValue::from(format!("{:?}", v)))))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok(MaybeValue(Some(ConfigValue::from(v))))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
        Ok(MaybeValue(Some(ConfigValue::from(v))))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(MaybeValue(None))
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(MaybeValue(None))
    }

    fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        MaybeValue::deserialize(deserializer)
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(MaybeValue(item)) = seq.next_element()? {
            items.push(item.unwrap_or_else(|| ConfigValue::from("")));
        }
        Ok(MaybeValue(Some(ConfigValue::List(items))))
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut entries = Mapping::new();
        while let Some((MaybeValue(key), MaybeValue(value))) = map.next_entry()? {
            let key = match key {
                Some(ConfigValue::Scalar(scalar)) => scalar.canonical().to_string(),
                Some(other) => {
                    return Err(de::Error::custom(format!(
                        "mapping keys must be scalars, found a {}",
                        other.kind()
                    )));
                }
                None => return Err(de::Error::custom("mapping keys must not be null")),
            };
            if let Some(value) = value {
                entries.insert(key, value);
            }
        }
        Ok(MaybeValue(Some(ConfigValue::Mapping(entries))))
    }
}
