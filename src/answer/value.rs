use serde::de::{self, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::borrow::Cow;
use std::fmt;

/// A respondent's answer to a single question.
///
/// Answers arrive from the outside world as loosely typed JSON, so the enum
/// covers every shape a question widget can produce: nothing, a toggle, a
/// number, free text, or a multi-select list.
#[derive(Debug, Clone, PartialEq)]
pub enum AnswerValue {
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
    Multi(Vec<String>),
}

impl AnswerValue {
    /// Whether this value counts as a real answer.
    ///
    /// `Null`, an empty string and an empty selection list are all treated
    /// as "not answered"; everything else, including `false` and `0`, is a
    /// deliberate response.
    pub fn is_answered(&self) -> bool {
        match self {
            AnswerValue::Null => false,
            AnswerValue::Text(s) => !s.is_empty(),
            AnswerValue::Multi(items) => !items.is_empty(),
            AnswerValue::Bool(_) | AnswerValue::Number(_) => true,
        }
    }

    /// Attempts to read this value as a number for ordering comparisons.
    ///
    /// Numeric text like `" 10 "` is parsed; booleans and lists are not
    /// numbers and return `None`.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            AnswerValue::Number(n) => Some(*n),
            AnswerValue::Text(s) => s.trim().parse().ok(),
            AnswerValue::Null | AnswerValue::Bool(_) | AnswerValue::Multi(_) => None,
        }
    }

    /// The textual form of a scalar value, used for membership and substring
    /// matching. Lists and `Null` have no single textual form.
    pub fn as_match_text(&self) -> Option<Cow<'_, str>> {
        match self {
            AnswerValue::Text(s) => Some(Cow::Borrowed(s.as_str())),
            AnswerValue::Number(n) => Some(Cow::Owned(format_number(*n))),
            AnswerValue::Bool(b) => Some(Cow::Borrowed(if *b { "true" } else { "false" })),
            AnswerValue::Null | AnswerValue::Multi(_) => None,
        }
    }
}

/// Renders a float the way survey authors wrote it: whole numbers without a
/// trailing `.0`.
pub(crate) fn format_number(n: f64) -> String {
    if n.fract() == 0.0 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

impl fmt::Display for AnswerValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnswerValue::Null => write!(f, "null"),
            AnswerValue::Bool(b) => write!(f, "{}", b),
            AnswerValue::Number(n) => write!(f, "{}", format_number(*n)),
            AnswerValue::Text(s) => write!(f, "{:?}", s),
            AnswerValue::Multi(items) => {
                let joined = items
                    .iter()
                    .map(|s| format!("{:?}", s))
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(f, "[{}]", joined)
            }
        }
    }
}

impl From<bool> for AnswerValue {
    fn from(b: bool) -> Self {
        AnswerValue::Bool(b)
    }
}

impl From<f64> for AnswerValue {
    fn from(n: f64) -> Self {
        AnswerValue::Number(n)
    }
}

impl From<i64> for AnswerValue {
    fn from(n: i64) -> Self {
        AnswerValue::Number(n as f64)
    }
}

impl From<&str> for AnswerValue {
    fn from(s: &str) -> Self {
        AnswerValue::Text(s.to_string())
    }
}

impl From<String> for AnswerValue {
    fn from(s: String) -> Self {
        AnswerValue::Text(s)
    }
}

impl From<Vec<String>> for AnswerValue {
    fn from(items: Vec<String>) -> Self {
        AnswerValue::Multi(items)
    }
}

impl From<Vec<&str>> for AnswerValue {
    fn from(items: Vec<&str>) -> Self {
        AnswerValue::Multi(items.into_iter().map(str::to_string).collect())
    }
}

// Serialization is format-aware. Human-readable formats (JSON) carry answers
// as bare scalars, matching what question widgets emit. Binary formats get a
// conventionally tagged enum, because bincode cannot decode self-describing
// data.

#[derive(Serialize)]
enum BinaryRepr<'a> {
    Null,
    Bool(bool),
    Number(f64),
    Text(&'a str),
    Multi(&'a [String]),
}

#[derive(Deserialize)]
enum OwnedRepr {
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
    Multi(Vec<String>),
}

impl<'a> From<&'a AnswerValue> for BinaryRepr<'a> {
    fn from(value: &'a AnswerValue) -> Self {
        match value {
            AnswerValue::Null => BinaryRepr::Null,
            AnswerValue::Bool(b) => BinaryRepr::Bool(*b),
            AnswerValue::Number(n) => BinaryRepr::Number(*n),
            AnswerValue::Text(s) => BinaryRepr::Text(s),
            AnswerValue::Multi(items) => BinaryRepr::Multi(items),
        }
    }
}

impl From<OwnedRepr> for AnswerValue {
    fn from(repr: OwnedRepr) -> Self {
        match repr {
            OwnedRepr::Null => AnswerValue::Null,
            OwnedRepr::Bool(b) => AnswerValue::Bool(b),
            OwnedRepr::Number(n) => AnswerValue::Number(n),
            OwnedRepr::Text(s) => AnswerValue::Text(s),
            OwnedRepr::Multi(items) => AnswerValue::Multi(items),
        }
    }
}

impl Serialize for AnswerValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if serializer.is_human_readable() {
            match self {
                AnswerValue::Null => serializer.serialize_unit(),
                AnswerValue::Bool(b) => serializer.serialize_bool(*b),
                AnswerValue::Number(n) => serializer.serialize_f64(*n),
                AnswerValue::Text(s) => serializer.serialize_str(s),
                AnswerValue::Multi(items) => items.serialize(serializer),
            }
        } else {
            BinaryRepr::from(self).serialize(serializer)
        }
    }
}

struct AnswerValueVisitor;

impl<'de> Visitor<'de> for AnswerValueVisitor {
    type Value = AnswerValue;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("null, a boolean, a number, a string, or an array of strings")
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(AnswerValue::Null)
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(AnswerValue::Null)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        deserializer.deserialize_any(AnswerValueVisitor)
    }

    fn visit_bool<E: de::Error>(self, b: bool) -> Result<Self::Value, E> {
        Ok(AnswerValue::Bool(b))
    }

    fn visit_i64<E: de::Error>(self, n: i64) -> Result<Self::Value, E> {
        Ok(AnswerValue::Number(n as f64))
    }

    fn visit_u64<E: de::Error>(self, n: u64) -> Result<Self::Value, E> {
        Ok(AnswerValue::Number(n as f64))
    }

    fn visit_f64<E: de::Error>(self, n: f64) -> Result<Self::Value, E> {
        Ok(AnswerValue::Number(n))
    }

    fn visit_str<E: de::Error>(self, s: &str) -> Result<Self::Value, E> {
        Ok(AnswerValue::Text(s.to_string()))
    }

    fn visit_string<E: de::Error>(self, s: String) -> Result<Self::Value, E> {
        Ok(AnswerValue::Text(s))
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut items = Vec::new();
        while let Some(item) = seq.next_element::<String>()? {
            items.push(item);
        }
        Ok(AnswerValue::Multi(items))
    }
}

impl<'de> Deserialize<'de> for AnswerValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        if deserializer.is_human_readable() {
            deserializer.deserialize_any(AnswerValueVisitor)
        } else {
            OwnedRepr::deserialize(deserializer).map(AnswerValue::from)
        }
    }
}
