//! Serde helpers for integers that browsers send as strings
//!
//! Form selects and `Object.keys` produce `"3"` where the API expects `3`.
//! Both forms are accepted.

use serde::de::{self, Deserializer, Unexpected, Visitor};
use serde::Deserialize;
use std::fmt;

struct IntVisitor;

impl<'de> Visitor<'de> for IntVisitor {
    type Value = i64;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an integer or a string containing an integer")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<i64, E> {
        Ok(v)
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<i64, E> {
        i64::try_from(v).map_err(|_| E::invalid_value(Unexpected::Unsigned(v), &self))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<i64, E> {
        if v.fract() == 0.0 && v >= i64::MIN as f64 && v <= i64::MAX as f64 {
            Ok(v as i64)
        } else {
            Err(E::invalid_value(Unexpected::Float(v), &self))
        }
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<i64, E> {
        v.trim()
            .parse()
            .map_err(|_| E::invalid_value(Unexpected::Str(v), &self))
    }
}

/// Deserialize an integer from a JSON number or numeric string.
pub fn int<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(IntVisitor)
}

/// Like [`int`], for fields that may be absent or null.
pub fn opt_int<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    struct OptVisitor;

    impl<'de> Visitor<'de> for OptVisitor {
        type Value = Option<i64>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("an optional integer")
        }

        fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_some<D: Deserializer<'de>>(self, d: D) -> Result<Self::Value, D::Error> {
            int(d).map(Some)
        }
    }

    deserializer.deserialize_option(OptVisitor)
}

/// Optional unsigned query parameter where an empty value (`?page=`) counts
/// as absent.
pub fn opt_query_u32<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value.parse().map(Some).map_err(|_| {
            de::Error::invalid_value(Unexpected::Str(value), &"a non-negative integer")
        }),
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Body {
        #[serde(deserialize_with = "super::int")]
        category: i64,
        #[serde(default, deserialize_with = "super::opt_int")]
        difficulty: Option<i64>,
    }

    #[test]
    fn accepts_numbers_and_strings() {
        let b: Body = serde_json::from_str(r#"{"category": 3, "difficulty": "2"}"#).unwrap();
        assert_eq!(b.category, 3);
        assert_eq!(b.difficulty, Some(2));

        let b: Body = serde_json::from_str(r#"{"category": " 4 "}"#).unwrap();
        assert_eq!(b.category, 4);
        assert_eq!(b.difficulty, None);

        let b: Body = serde_json::from_str(r#"{"category": 1.0, "difficulty": null}"#).unwrap();
        assert_eq!(b.category, 1);
        assert_eq!(b.difficulty, None);
    }

    #[derive(Deserialize)]
    struct Page {
        #[serde(default, deserialize_with = "super::opt_query_u32")]
        page: Option<u32>,
    }

    #[test]
    fn empty_query_value_is_absent() {
        let p: Page = serde_json::from_str(r#"{"page": ""}"#).unwrap();
        assert_eq!(p.page, None);
        let p: Page = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(p.page, None);
        let p: Page = serde_json::from_str(r#"{"page": "3"}"#).unwrap();
        assert_eq!(p.page, Some(3));
        assert!(serde_json::from_str::<Page>(r#"{"page": "-1"}"#).is_err());
        assert!(serde_json::from_str::<Page>(r#"{"page": "two"}"#).is_err());
    }

    #[test]
    fn rejects_garbage() {
        assert!(serde_json::from_str::<Body>(r#"{"category": "science"}"#).is_err());
        assert!(serde_json::from_str::<Body>(r#"{"category": 1.5}"#).is_err());
        assert!(serde_json::from_str::<Body>(r#"{"category": true}"#).is_err());
    }
}
