//! Platform user/role identifiers.
//!
//! Discord ids are 64-bit integers that do not fit an IEEE double, so they are
//! always carried as decimal strings. Integer JSON numbers are accepted on input
//! and converted exactly; fractional numbers are rejected because any precision
//! they had is already gone.

use std::fmt;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Snowflake(String);

impl Snowflake {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Snowflake {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for Snowflake {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

struct SnowflakeVisitor;

impl<'de> Visitor<'de> for SnowflakeVisitor {
    type Value = Snowflake;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("an id as a string or an integer")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Snowflake, E> {
        Ok(Snowflake(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Snowflake, E> {
        Ok(Snowflake(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Snowflake, E> {
        Ok(Snowflake(v.to_string()))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Snowflake, E> {
        Ok(Snowflake(v.to_string()))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Snowflake, E> {
        Err(E::custom(format!(
            "id {v} is not an exact integer; send large ids as strings"
        )))
    }
}

impl<'de> Deserialize<'de> for Snowflake {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(SnowflakeVisitor)
    }
}
